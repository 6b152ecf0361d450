// This file implements the transaction model the ledger settles
// Each transaction consumes previous outputs (by txid + index) and creates new ones
// Inputs are authorized by a signature from the key the spent output is locked to

use crate::core::UTXO;
use crate::error::{LedgerError, Result};
use crate::utils::{deserialize, serialize, sha256_digest};
use crate::wallet::Wallet;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// This represents a transaction input - it references a previous transaction output
// Think of it as "I want to spend output #2 from transaction ABC123"
#[derive(
    Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, bincode::Encode, bincode::Decode,
)]
pub struct TXInput {
    txid: Vec<u8>,      // The ID of the transaction containing the output I want to spend
    vout: usize,        // The index of the output in that transaction
    signature: Vec<u8>, // Signature over this input's signable content
}

impl TXInput {
    // A new input starts unsigned
    pub fn new(txid: &[u8], vout: usize) -> TXInput {
        TXInput {
            txid: txid.to_vec(),
            vout,
            signature: vec![],
        }
    }

    pub fn get_txid(&self) -> &[u8] {
        self.txid.as_slice()
    }

    pub fn get_vout(&self) -> usize {
        self.vout
    }

    pub fn get_signature(&self) -> &[u8] {
        self.signature.as_slice()
    }

    /// The pool key this input claims.
    pub fn get_utxo(&self) -> UTXO {
        UTXO::new(&self.txid, self.vout)
    }
}

// This represents a transaction output - "pay `value` to whoever holds the private key for `pub_key`"
// The value is deliberately not checked here; the validator decides whether it is acceptable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
pub struct TXOutput {
    value: i64,       // Value in satoshis
    pub_key: Vec<u8>, // SEC1 public key that must sign to spend this output
}

impl TXOutput {
    pub fn new(value: i64, pub_key: &[u8]) -> TXOutput {
        TXOutput {
            value,
            pub_key: pub_key.to_vec(),
        }
    }

    pub fn get_value(&self) -> i64 {
        self.value
    }

    pub fn get_pub_key(&self) -> &[u8] {
        self.pub_key.as_slice()
    }

    pub fn is_locked_with_key(&self, pub_key: &[u8]) -> bool {
        self.pub_key.eq(pub_key)
    }
}

// What input `index` signs: the output it spends plus every output of the transaction.
// No signature of any input is part of it, so signing one input never invalidates another.
#[derive(Serialize, bincode::Encode)]
struct SignableContent {
    txid: Vec<u8>,
    vout: usize,
    outputs: Vec<TXOutput>,
}

fn raw_data_to_sign(vin: &[TXInput], vout: &[TXOutput], index: usize) -> Result<Vec<u8>> {
    let input = vin.get(index).ok_or_else(|| {
        LedgerError::Transaction(format!(
            "Input index {index} out of range for {} inputs",
            vin.len()
        ))
    })?;
    serialize(&SignableContent {
        txid: input.txid.clone(),
        vout: input.vout,
        outputs: vout.to_vec(),
    })
}

/// A transfer of value: ordered inputs, ordered outputs and the hash identifying them.
///
/// Transactions are produced by [`TransactionBuilder::build`] (or
/// [`Transaction::new_coinbase`]) and have no mutators afterwards, so `id`
/// always matches the content. Bytes become a `Transaction` only through
/// [`Transaction::deserialize`], which recomputes the id; there is no
/// `Deserialize` or `Decode` impl to bypass it.
#[derive(Debug, Clone, Serialize, bincode::Encode)]
pub struct Transaction {
    id: Vec<u8>,         // SHA-256 of the content below
    vin: Vec<TXInput>,   // What I'm spending
    vout: Vec<TXOutput>, // Where the money is going
}

// Wire form of a transaction; field order matches `Transaction`.
#[derive(Deserialize, bincode::Decode)]
struct EncodedTransaction {
    id: Vec<u8>,
    vin: Vec<TXInput>,
    vout: Vec<TXOutput>,
}

impl Transaction {
    /// A transaction minting `value` to `pub_key` out of nothing.
    ///
    /// It carries one marker input with an empty txid and a random nonce in
    /// the signature slot so that two coinbases paying the same key get
    /// different ids. The marker never names a pool entry, so a coinbase
    /// submitted for settlement is always rejected; use it to seed a
    /// [`crate::storage::UTXOPool`].
    pub fn new_coinbase(pub_key: &[u8], value: i64) -> Result<Transaction> {
        let tx_input = TXInput {
            signature: Uuid::new_v4().as_bytes().to_vec(),
            ..Default::default()
        };
        let mut tx = Transaction {
            id: vec![],
            vin: vec![tx_input],
            vout: vec![TXOutput::new(value, pub_key)],
        };
        tx.id = tx.hash()?;
        Ok(tx)
    }

    pub fn is_coinbase(&self) -> bool {
        self.vin.len() == 1 && self.vin[0].txid.is_empty()
    }

    fn hash(&self) -> Result<Vec<u8>> {
        let tx_copy = Transaction {
            id: vec![],
            vin: self.vin.clone(),
            vout: self.vout.clone(),
        };
        Ok(sha256_digest(&tx_copy.serialize()?))
    }

    pub fn get_id(&self) -> &[u8] {
        self.id.as_slice()
    }

    pub fn get_vin(&self) -> &[TXInput] {
        self.vin.as_slice()
    }

    pub fn get_vout(&self) -> &[TXOutput] {
        self.vout.as_slice()
    }

    pub fn get_input(&self, index: usize) -> Option<&TXInput> {
        self.vin.get(index)
    }

    pub fn get_output(&self, index: usize) -> Option<&TXOutput> {
        self.vout.get(index)
    }

    /// The bytes input `index` is signed over.
    pub fn get_raw_data_to_sign(&self, index: usize) -> Result<Vec<u8>> {
        raw_data_to_sign(&self.vin, &self.vout, index)
    }

    pub fn serialize(&self) -> Result<Vec<u8>> {
        serialize(self)
    }

    /// Decode a transaction and check that its id matches its content.
    pub fn deserialize(bytes: &[u8]) -> Result<Transaction> {
        let encoded: EncodedTransaction = deserialize(bytes)?;
        let tx = Transaction {
            id: encoded.id,
            vin: encoded.vin,
            vout: encoded.vout,
        };
        if tx.hash()? != tx.id {
            return Err(LedgerError::Transaction(
                "Transaction id does not match its content".to_string(),
            ));
        }
        Ok(tx)
    }
}

impl PartialEq for Transaction {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Transaction {}

/// Assembles a transaction: add inputs and outputs, sign, then `build` to fix the id.
///
/// Signatures cover the outputs, so add every output before signing.
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    vin: Vec<TXInput>,
    vout: Vec<TXOutput>,
}

impl TransactionBuilder {
    pub fn new() -> TransactionBuilder {
        TransactionBuilder::default()
    }

    pub fn input(mut self, txid: &[u8], vout: usize) -> TransactionBuilder {
        self.vin.push(TXInput::new(txid, vout));
        self
    }

    pub fn output(mut self, value: i64, pub_key: &[u8]) -> TransactionBuilder {
        self.vout.push(TXOutput::new(value, pub_key));
        self
    }

    pub fn raw_data_to_sign(&self, index: usize) -> Result<Vec<u8>> {
        raw_data_to_sign(&self.vin, &self.vout, index)
    }

    /// Attach an externally produced signature to input `index`.
    pub fn signature(mut self, index: usize, signature: Vec<u8>) -> Result<TransactionBuilder> {
        let inputs = self.vin.len();
        let input = self.vin.get_mut(index).ok_or_else(|| {
            LedgerError::Transaction(format!(
                "Input index {index} out of range for {inputs} inputs"
            ))
        })?;
        input.signature = signature;
        Ok(self)
    }

    pub fn sign_input(self, index: usize, wallet: &Wallet) -> Result<TransactionBuilder> {
        let message = self.raw_data_to_sign(index)?;
        let signature = wallet.sign(&message)?;
        self.signature(index, signature)
    }

    /// Sign every input with the same wallet.
    pub fn sign_all(mut self, wallet: &Wallet) -> Result<TransactionBuilder> {
        for idx in 0..self.vin.len() {
            self = self.sign_input(idx, wallet)?;
        }
        Ok(self)
    }

    pub fn build(self) -> Result<Transaction> {
        let mut tx = Transaction {
            id: vec![],
            vin: self.vin,
            vout: self.vout,
        };
        tx.id = tx.hash()?;
        Ok(tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ecdsa_p256_sha256_sign_verify;

    #[test]
    fn test_signable_content_excludes_signatures() {
        let wallet = Wallet::new().unwrap();
        let unsigned = TransactionBuilder::new()
            .input(&[1; 32], 0)
            .input(&[2; 32], 1)
            .output(10, wallet.get_public_key());
        let before = unsigned.raw_data_to_sign(0).unwrap();

        let signed = unsigned.sign_all(&wallet).unwrap();
        assert_eq!(signed.raw_data_to_sign(0).unwrap(), before);

        let tx = signed.build().unwrap();
        assert_eq!(tx.get_raw_data_to_sign(0).unwrap(), before);
        assert_ne!(
            tx.get_raw_data_to_sign(0).unwrap(),
            tx.get_raw_data_to_sign(1).unwrap()
        );
    }

    #[test]
    fn test_signable_content_covers_outputs() {
        let wallet = Wallet::new().unwrap();
        let a = TransactionBuilder::new()
            .input(&[1; 32], 0)
            .output(10, wallet.get_public_key());
        let b = a.clone().output(1, wallet.get_public_key());
        assert_ne!(a.raw_data_to_sign(0).unwrap(), b.raw_data_to_sign(0).unwrap());
    }

    #[test]
    fn test_sign_input_produces_verifiable_signature() {
        let wallet = Wallet::new().unwrap();
        let tx = TransactionBuilder::new()
            .input(&[3; 32], 2)
            .output(5, wallet.get_public_key())
            .sign_input(0, &wallet)
            .unwrap()
            .build()
            .unwrap();

        let input = tx.get_input(0).unwrap();
        assert!(ecdsa_p256_sha256_sign_verify(
            wallet.get_public_key(),
            input.get_signature(),
            &tx.get_raw_data_to_sign(0).unwrap()
        ));
    }

    #[test]
    fn test_out_of_range_index_is_an_error() {
        let wallet = Wallet::new().unwrap();
        let builder = TransactionBuilder::new().output(5, wallet.get_public_key());
        assert!(matches!(
            builder.raw_data_to_sign(0),
            Err(LedgerError::Transaction(_))
        ));
        assert!(builder.clone().sign_input(0, &wallet).is_err());
        assert!(builder.signature(1, vec![1]).is_err());
    }

    #[test]
    fn test_id_is_deterministic_and_content_bound() {
        let wallet = Wallet::new().unwrap();
        let builder = TransactionBuilder::new()
            .input(&[4; 32], 0)
            .output(7, wallet.get_public_key());
        let a = builder.clone().build().unwrap();
        let b = builder.clone().build().unwrap();
        let c = builder.output(1, wallet.get_public_key()).build().unwrap();

        assert_eq!(a.get_id().len(), 32);
        assert_eq!(a.get_id(), b.get_id());
        assert_ne!(a.get_id(), c.get_id());
    }

    #[test]
    fn test_coinbases_get_distinct_ids() {
        let wallet = Wallet::new().unwrap();
        let a = Transaction::new_coinbase(wallet.get_public_key(), 50).unwrap();
        let b = Transaction::new_coinbase(wallet.get_public_key(), 50).unwrap();
        assert!(a.is_coinbase());
        assert_ne!(a.get_id(), b.get_id());
        assert_eq!(a.get_output(0).unwrap().get_value(), 50);
    }

    #[test]
    fn test_deserialize_checks_id() {
        let wallet = Wallet::new().unwrap();
        let tx = Transaction::new_coinbase(wallet.get_public_key(), 50).unwrap();
        let bytes = tx.serialize().unwrap();
        let decoded = Transaction::deserialize(&bytes).unwrap();
        assert_eq!(decoded, tx);
        assert_eq!(decoded.get_vout(), tx.get_vout());

        let forged = Transaction {
            id: vec![0; 32],
            vin: tx.vin.clone(),
            vout: tx.vout.clone(),
        };
        assert!(Transaction::deserialize(&forged.serialize().unwrap()).is_err());
    }

    #[test]
    fn test_wire_bytes_cannot_claim_another_transactions_id() {
        use crate::core::{TxHandler, UTXO};
        use crate::storage::UTXOPool;

        let bob = Wallet::new().unwrap();
        let mallory = Wallet::new().unwrap();
        let victim = Transaction::new_coinbase(bob.get_public_key(), 1000).unwrap();
        let own = Transaction::new_coinbase(mallory.get_public_key(), 1).unwrap();
        let mut pool = UTXOPool::new();
        pool.add_transaction_outputs(&victim);
        pool.add_transaction_outputs(&own);

        let self_spend = TransactionBuilder::new()
            .input(own.get_id(), 0)
            .output(1, mallory.get_public_key())
            .sign_all(&mallory)
            .unwrap()
            .build()
            .unwrap();
        let relabelled = Transaction {
            id: victim.get_id().to_vec(),
            vin: self_spend.vin.clone(),
            vout: self_spend.vout.clone(),
        };
        let bytes = relabelled.serialize().unwrap();
        assert!(matches!(
            Transaction::deserialize(&bytes),
            Err(LedgerError::Transaction(_))
        ));

        // The honest encoding still decodes and settles without touching Bob's output
        let decoded = Transaction::deserialize(&self_spend.serialize().unwrap()).unwrap();
        let mut handler = TxHandler::new(&pool);
        assert_eq!(handler.handle_txs(&[decoded]).len(), 1);
        let bobs = handler
            .get_utxo_pool()
            .get_tx_output(&UTXO::new(victim.get_id(), 0))
            .unwrap();
        assert_eq!(bobs.get_value(), 1000);
        assert!(bobs.is_locked_with_key(bob.get_public_key()));
    }

    #[test]
    fn test_negative_outputs_are_representable() {
        let wallet = Wallet::new().unwrap();
        let output = TXOutput::new(-1, wallet.get_public_key());
        assert_eq!(output.get_value(), -1);
        assert!(output.is_locked_with_key(wallet.get_public_key()));
    }
}

//! Test utilities for ledger testing

use crate::core::{Transaction, TransactionBuilder};
use crate::storage::UTXOPool;
use crate::wallet::Wallet;

/// A participant holding one key pair
pub struct TestParty {
    pub wallet: Wallet,
}

impl Default for TestParty {
    fn default() -> Self {
        Self::new()
    }
}

impl TestParty {
    pub fn new() -> TestParty {
        TestParty {
            wallet: Wallet::new().expect("key generation should work in tests"),
        }
    }

    pub fn public_key(&self) -> &[u8] {
        self.wallet.get_public_key()
    }
}

/// Install a test logger so `RUST_LOG=debug` shows settlement decisions
pub fn init_test_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A pool holding one input-less genesis transaction paying each of `values` to `owner`.
pub fn genesis_pool(owner: &TestParty, values: &[i64]) -> (UTXOPool, Transaction) {
    let genesis = values
        .iter()
        .fold(TransactionBuilder::new(), |builder, value| {
            builder.output(*value, owner.public_key())
        })
        .build()
        .expect("genesis should build");
    let mut pool = UTXOPool::new();
    pool.add_transaction_outputs(&genesis);
    (pool, genesis)
}

/// A transaction spending `inputs` (txid, index), all signed by `signer`.
pub fn spend(
    signer: &TestParty,
    inputs: &[(&[u8], usize)],
    outputs: &[(i64, &TestParty)],
) -> Transaction {
    let mut builder = TransactionBuilder::new();
    for (txid, vout) in inputs {
        builder = builder.input(txid, *vout);
    }
    for (value, to) in outputs {
        builder = builder.output(*value, to.public_key());
    }
    builder
        .sign_all(&signer.wallet)
        .and_then(TransactionBuilder::build)
        .expect("test transaction should sign and build")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UTXO;

    #[test]
    fn test_genesis_pool() {
        let owner = TestParty::new();
        let (pool, genesis) = genesis_pool(&owner, &[1, 2, 3]);
        assert_eq!(pool.len(), 3);
        assert_eq!(pool.total_value(), Some(6));
        let out = pool.get_tx_output(&UTXO::new(genesis.get_id(), 2)).unwrap();
        assert!(out.is_locked_with_key(owner.public_key()));
    }

    #[test]
    fn test_spend_is_signed_by_signer() {
        let owner = TestParty::new();
        let (_, genesis) = genesis_pool(&owner, &[5]);
        let tx = spend(&owner, &[(genesis.get_id(), 0)], &[(5, &owner)]);
        assert_eq!(tx.get_vin().len(), 1);
        assert!(!tx.get_vin()[0].get_signature().is_empty());
    }
}

use crate::core::{TXOutput, Transaction, UTXO};
use std::collections::HashMap;

/// The set of currently spendable outputs, keyed by the UTXO naming each one.
///
/// `Clone` copies every key and output, so a cloned pool shares nothing with
/// its source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UTXOPool {
    // ( K -> (txid, index), V => TXOutput )
    inner: HashMap<UTXO, TXOutput>,
}

impl UTXOPool {
    pub fn new() -> UTXOPool {
        UTXOPool {
            inner: HashMap::new(),
        }
    }

    pub fn contains(&self, utxo: &UTXO) -> bool {
        self.inner.contains_key(utxo)
    }

    pub fn get_tx_output(&self, utxo: &UTXO) -> Option<&TXOutput> {
        self.inner.get(utxo)
    }

    /// Inserts or overwrites the output stored under `utxo`.
    pub fn add_utxo(&mut self, utxo: UTXO, output: TXOutput) {
        self.inner.insert(utxo, output);
    }

    /// Removing a UTXO that is not in the pool does nothing.
    pub fn remove_utxo(&mut self, utxo: &UTXO) {
        self.inner.remove(utxo);
    }

    /// Adds every output of `tx` under `(tx.id, index)`.
    pub fn add_transaction_outputs(&mut self, tx: &Transaction) {
        for (idx, out) in tx.get_vout().iter().enumerate() {
            self.add_utxo(UTXO::new(tx.get_id(), idx), out.clone());
        }
    }

    /// All UTXOs in the pool, sorted.
    pub fn get_all_utxo(&self) -> Vec<UTXO> {
        let mut utxos: Vec<UTXO> = self.inner.keys().cloned().collect();
        utxos.sort();
        utxos
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Sum of all stored values, or `None` on overflow.
    pub fn total_value(&self) -> Option<i64> {
        self.inner
            .values()
            .try_fold(0i64, |acc, out| acc.checked_add(out.get_value()))
    }
}

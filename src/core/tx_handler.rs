// This is where a batch ("epoch") of candidate transactions is settled against the ledger
// Candidates are evaluated one at a time, in the order the caller gave them,
// and every accepted one is applied to the pool before the next is evaluated

use crate::config::Config;
use crate::core::{Rejection, Transaction, TxValidator};
use crate::storage::UTXOPool;
use data_encoding::HEXLOWER;

/// The result of one settlement pass.
#[derive(Debug, Clone, Default)]
pub struct EpochOutcome {
    /// Accepted transactions, in acceptance order
    pub accepted: Vec<Transaction>,
    /// `(txid, reason)` for each dropped candidate, in evaluation order.
    /// Empty unless [`Config::record_rejections`] is set.
    pub rejected: Vec<(Vec<u8>, Rejection)>,
}

/// Owns the current UTXO pool and decides which transactions may be applied to it.
pub struct TxHandler {
    utxo_pool: UTXOPool,
    config: Config,
}

impl TxHandler {
    /// Creates a ledger whose current pool is a copy of `utxo_pool`.
    /// Nothing the handler does afterwards is visible through `utxo_pool`.
    pub fn new(utxo_pool: &UTXOPool) -> TxHandler {
        Self::with_config(utxo_pool, Config::default())
    }

    pub fn with_config(utxo_pool: &UTXOPool, config: Config) -> TxHandler {
        TxHandler {
            utxo_pool: utxo_pool.clone(),
            config,
        }
    }

    pub fn get_utxo_pool(&self) -> &UTXOPool {
        &self.utxo_pool
    }

    pub fn into_utxo_pool(self) -> UTXOPool {
        self.utxo_pool
    }

    pub fn get_config(&self) -> &Config {
        &self.config
    }

    /// True iff `tx` can be applied to the current pool. See [`TxValidator::validate`].
    pub fn is_valid_tx(&self, tx: &Transaction) -> bool {
        self.validate_tx(tx).is_ok()
    }

    pub fn validate_tx(&self, tx: &Transaction) -> Result<(), Rejection> {
        TxValidator::new(&self.utxo_pool).validate(tx)
    }

    /// Settles one epoch and returns the accepted transactions in acceptance order.
    ///
    /// Invalid candidates are dropped silently and never reconsidered in this pass.
    pub fn handle_txs(&mut self, possible_txs: &[Transaction]) -> Vec<Transaction> {
        self.settle_epoch(possible_txs).accepted
    }

    /// Same pass as [`TxHandler::handle_txs`], also reporting why candidates were dropped.
    pub fn settle_epoch(&mut self, possible_txs: &[Transaction]) -> EpochOutcome {
        let mut outcome = EpochOutcome::default();
        for tx in possible_txs {
            match self.validate_tx(tx) {
                Ok(()) => {
                    self.commit(tx);
                    outcome.accepted.push(tx.clone());
                }
                Err(rejection) => {
                    log::log!(
                        self.config.rejection_log_level,
                        "Rejected transaction {}: {rejection}",
                        HEXLOWER.encode(tx.get_id())
                    );
                    if self.config.record_rejections {
                        outcome.rejected.push((tx.get_id().to_vec(), rejection));
                    }
                }
            }
        }
        log::debug!(
            "Epoch settled: {} of {} candidates accepted, {} UTXOs unspent",
            outcome.accepted.len(),
            possible_txs.len(),
            self.utxo_pool.len()
        );
        outcome
    }

    // Only call this with a transaction that just passed validation
    fn commit(&mut self, tx: &Transaction) {
        // remove spent UTXOs
        for vin in tx.get_vin() {
            self.utxo_pool.remove_utxo(&vin.get_utxo());
        }
        // add new UTXOs
        self.utxo_pool.add_transaction_outputs(tx);
        log::debug!(
            "Committed transaction {}: {} spent, {} created",
            HEXLOWER.encode(tx.get_id()),
            tx.get_vin().len(),
            tx.get_vout().len()
        );
    }
}

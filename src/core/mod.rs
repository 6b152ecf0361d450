//! Core ledger functionality
//!
//! The transaction model, the validation predicate and the epoch handler that
//! applies accepted transactions to the UTXO pool.

pub mod monetary;
pub mod transaction;
pub mod tx_handler;
pub mod utxo;
pub mod validation;

pub use monetary::SATOSHIS_PER_COIN;
pub use transaction::{TXInput, TXOutput, Transaction, TransactionBuilder};
pub use tx_handler::{EpochOutcome, TxHandler};
pub use utxo::UTXO;
pub use validation::{Rejection, TxValidator};

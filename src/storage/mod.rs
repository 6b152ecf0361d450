//! Ledger state
//!
//! The in-memory UTXO pool. Nothing here is persisted; a pool lives as long
//! as the handler that owns it.

pub mod utxo_pool;

pub use utxo_pool::UTXOPool;

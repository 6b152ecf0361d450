//! # UTXO Ledger - Transaction Validation and Epoch Settlement
//!
//! This crate decides which of a batch of proposed transactions can be applied
//! to a set of unspent outputs, and applies them.
//!
//! ## What It Does
//! - **Validation**: a transaction is accepted only if every output it claims is
//!   unspent, every input is signed by the claimed output's owner, no output is
//!   claimed twice, no output value is negative, and it creates no value
//! - **Settlement**: an epoch of candidates is processed in caller order; each
//!   accepted transaction is applied before the next one is checked, so spends
//!   of the same output conflict (first wins) and chained spends resolve
//! - **Isolation**: a handler copies the pool it is given and owns the copy
//!
//! ## How the Code Is Organized
//! - `core/`: UTXO references, the transaction model, validation, the epoch handler
//! - `storage/`: the in-memory UTXO pool
//! - `wallet/`: ECDSA P-256 key pairs that own outputs and sign inputs
//! - `utils/`: SHA-256, signatures and the bincode encoding everything hashes over
//! - `config/`: handler settings from the environment or TOML
//!
//! ## Example
//! ```
//! use utxo_ledger::{TransactionBuilder, TxHandler, UTXOPool, Wallet};
//!
//! let alice = Wallet::new().unwrap();
//! let bob = Wallet::new().unwrap();
//!
//! let genesis = TransactionBuilder::new()
//!     .output(100, alice.get_public_key())
//!     .build()
//!     .unwrap();
//! let mut pool = UTXOPool::new();
//! pool.add_transaction_outputs(&genesis);
//!
//! let pay_bob = TransactionBuilder::new()
//!     .input(genesis.get_id(), 0)
//!     .output(90, bob.get_public_key())
//!     .sign_input(0, &alice)
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let mut handler = TxHandler::new(&pool);
//! let accepted = handler.handle_txs(&[pay_bob.clone(), pay_bob]);
//! assert_eq!(accepted.len(), 1);
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod storage;
pub mod utils;
pub mod wallet;

#[cfg(test)]
pub mod testnet;

// Re-export commonly used types for convenience
pub use config::Config;
pub use self::core::{
    EpochOutcome, Rejection, TXInput, TXOutput, Transaction, TransactionBuilder, TxHandler,
    TxValidator, UTXO,
};
pub use error::{LedgerError, Result};
pub use storage::UTXOPool;
pub use utils::{
    ecdsa_p256_sha256_sign_digest, ecdsa_p256_sha256_sign_verify, new_key_pair, sha256_digest,
};
pub use wallet::Wallet;

//! Key management and signing
//!
//! A wallet owns outputs through its public key and authorizes spends with
//! its private key.

#[allow(clippy::module_inception)]
pub mod wallet;

pub use wallet::Wallet;

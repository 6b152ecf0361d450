//! Utility functions and helpers
//!
//! Hashing, signatures and the bincode encoding that transaction ids and
//! signable content are computed from.

pub mod crypto;
pub mod serialization;

pub use crypto::{
    ecdsa_p256_sha256_sign_digest, ecdsa_p256_sha256_sign_verify, new_key_pair, sha256_digest,
};

pub use serialization::{deserialize, serialize};

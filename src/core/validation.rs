// The validation predicate: can this transaction be applied to the pool as it is right now?
// Nothing in here mutates the pool.

use crate::core::{Transaction, UTXO};
use crate::storage::UTXOPool;
use crate::utils::ecdsa_p256_sha256_sign_verify;
use std::collections::HashSet;
use std::fmt;

/// The first condition a rejected transaction failed
///
/// Every variant means the same thing to settlement ("not accepted"); the
/// detail is for logs and callers who want to know why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The same UTXO is claimed by two inputs of one transaction
    DuplicateClaim { input_index: usize, utxo: UTXO },
    /// The claimed UTXO is not in the pool (never existed or already spent)
    MissingOutput { input_index: usize, utxo: UTXO },
    /// The signature does not verify under the spent output's key
    InvalidSignature { input_index: usize },
    /// An output carries a negative value
    NegativeOutput { output_index: usize, value: i64 },
    /// Summing input or output values overflowed
    ValueOverflow,
    /// The outputs are worth more than the inputs
    InsufficientInputValue { input_value: i64, output_value: i64 },
    /// The signable content for an input could not be produced
    MalformedInput { input_index: usize },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::DuplicateClaim { input_index, utxo } => {
                write!(f, "input {input_index} claims {utxo} a second time")
            }
            Rejection::MissingOutput { input_index, utxo } => {
                write!(f, "input {input_index} claims {utxo}, which is not unspent")
            }
            Rejection::InvalidSignature { input_index } => {
                write!(f, "input {input_index} has an invalid signature")
            }
            Rejection::NegativeOutput {
                output_index,
                value,
            } => write!(f, "output {output_index} has negative value {value}"),
            Rejection::ValueOverflow => write!(f, "value sum overflow"),
            Rejection::InsufficientInputValue {
                input_value,
                output_value,
            } => write!(
                f,
                "outputs ({output_value}) exceed inputs ({input_value})"
            ),
            Rejection::MalformedInput { input_index } => {
                write!(f, "input {input_index} has no signable content")
            }
        }
    }
}

/// Checks transactions against a borrowed pool.
pub struct TxValidator<'a> {
    utxo_pool: &'a UTXOPool,
}

impl<'a> TxValidator<'a> {
    pub fn new(utxo_pool: &'a UTXOPool) -> TxValidator<'a> {
        TxValidator { utxo_pool }
    }

    pub fn is_valid(&self, tx: &Transaction) -> bool {
        self.validate(tx).is_ok()
    }

    /// Accepts `tx` iff
    /// (1) every UTXO it claims is in the pool,
    /// (2) every input signature verifies under the claimed output's key,
    /// (3) no UTXO is claimed twice,
    /// (4) no output value is negative, and
    /// (5) input value >= output value.
    pub fn validate(&self, tx: &Transaction) -> Result<(), Rejection> {
        let mut claimed: HashSet<UTXO> = HashSet::new();
        let mut input_value = 0i64;

        for (idx, vin) in tx.get_vin().iter().enumerate() {
            let utxo = vin.get_utxo();
            if claimed.contains(&utxo) {
                return Err(Rejection::DuplicateClaim {
                    input_index: idx,
                    utxo,
                });
            }

            let prev_out = match self.utxo_pool.get_tx_output(&utxo) {
                Some(out) => out,
                None => {
                    return Err(Rejection::MissingOutput {
                        input_index: idx,
                        utxo,
                    })
                }
            };

            let message = tx.get_raw_data_to_sign(idx).map_err(|e| {
                log::error!("No signable content for input {idx}: {e}");
                Rejection::MalformedInput { input_index: idx }
            })?;
            if !ecdsa_p256_sha256_sign_verify(prev_out.get_pub_key(), vin.get_signature(), &message)
            {
                return Err(Rejection::InvalidSignature { input_index: idx });
            }

            input_value = input_value
                .checked_add(prev_out.get_value())
                .ok_or(Rejection::ValueOverflow)?;
            claimed.insert(utxo);
        }

        let mut output_value = 0i64;
        for (idx, vout) in tx.get_vout().iter().enumerate() {
            if vout.get_value() < 0 {
                return Err(Rejection::NegativeOutput {
                    output_index: idx,
                    value: vout.get_value(),
                });
            }
            output_value = output_value
                .checked_add(vout.get_value())
                .ok_or(Rejection::ValueOverflow)?;
        }

        // The difference is an implicit fee; it is not accounted for anywhere
        if input_value < output_value {
            return Err(Rejection::InsufficientInputValue {
                input_value,
                output_value,
            });
        }
        Ok(())
    }
}

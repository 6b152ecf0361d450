/// Ledger monetary units
///
/// Values are held as signed integers of the smallest unit (satoshi). The sign
/// is there so that a malformed negative output can be represented and then
/// rejected by validation; committed outputs are never negative.
///
/// Number of satoshis in one coin (same as Bitcoin)
pub const SATOSHIS_PER_COIN: i64 = 100_000_000;

/// Utility functions for monetary conversions
pub mod conversions {
    use super::*;

    /// Convert coins to satoshis, rounding to the nearest satoshi
    ///
    /// # Examples
    /// ```
    /// use utxo_ledger::core::monetary::conversions::coins_to_satoshis;
    /// assert_eq!(coins_to_satoshis(1.0), 100_000_000);
    /// assert_eq!(coins_to_satoshis(-0.5), -50_000_000);
    /// ```
    pub fn coins_to_satoshis(coins: f64) -> i64 {
        (coins * SATOSHIS_PER_COIN as f64).round() as i64
    }

    /// Convert satoshis to coins
    ///
    /// # Examples
    /// ```
    /// use utxo_ledger::core::monetary::conversions::satoshis_to_coins;
    /// assert_eq!(satoshis_to_coins(100_000_000), 1.0);
    /// assert_eq!(satoshis_to_coins(50_000_000), 0.5);
    /// ```
    pub fn satoshis_to_coins(satoshis: i64) -> f64 {
        satoshis as f64 / SATOSHIS_PER_COIN as f64
    }

    /// Format satoshis as a human-readable string
    ///
    /// # Examples
    /// ```
    /// use utxo_ledger::core::monetary::conversions::format_satoshis;
    /// assert_eq!(format_satoshis(100_000_000), "1.00000000 coins");
    /// assert_eq!(format_satoshis(1_000), "0.00001000 coins");
    /// ```
    pub fn format_satoshis(satoshis: i64) -> String {
        format!("{:.8} coins", satoshis_to_coins(satoshis))
    }
}

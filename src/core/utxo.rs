use data_encoding::HEXLOWER;
use std::fmt;

/// A reference to one output of one transaction: "output #`index` of
/// transaction `txid`". Two references are the same UTXO iff both parts match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UTXO {
    txid: Vec<u8>,
    index: usize,
}

impl UTXO {
    pub fn new(txid: &[u8], index: usize) -> UTXO {
        UTXO {
            txid: txid.to_vec(),
            index,
        }
    }

    pub fn get_txid(&self) -> &[u8] {
        self.txid.as_slice()
    }

    pub fn get_index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for UTXO {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", HEXLOWER.encode(&self.txid), self.index)
    }
}

//! Core types: Price, Quantity, Symbol

use std::fmt;

/// Price in smallest units (cents).
///
/// `Price(10050)` represents $100.50.
/// Using fixed-point avoids floating-point errors in the accounting engine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    pub const ZERO: Price = Price(0);
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dollars = self.0 / 100;
        let cents = (self.0 % 100).abs();
        if self.0 < 0 {
            write!(f, "-${}.{:02}", dollars.abs(), cents)
        } else {
            write!(f, "${}.{:02}", dollars, cents)
        }
    }
}

/// Quantity of shares. Always positive in a live position.
pub type Quantity = u64;

/// Ticker symbol, stored inline (max 8 ASCII bytes).
///
/// Symbols are tiny, immutable, and used as map keys on every trade, so they
/// are kept inline and `Copy` instead of heap-allocated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Symbol {
    bytes: [u8; 8],
    len: u8,
}

impl Symbol {
    /// Maximum symbol length in bytes.
    pub const MAX_LEN: usize = 8;

    /// Create a symbol from a ticker string.
    ///
    /// # Panics
    ///
    /// Panics if `s` is empty, longer than [`MAX_LEN`](Self::MAX_LEN) bytes,
    /// or not ASCII. Symbols come from the compiled-in listing; user input
    /// stays a `&str` until it resolves against the market.
    pub fn new(s: &str) -> Self {
        assert!(
            !s.is_empty() && s.len() <= Self::MAX_LEN && s.is_ascii(),
            "invalid symbol: {s:?}"
        );
        let mut bytes = [0u8; Self::MAX_LEN];
        bytes[..s.len()].copy_from_slice(s.as_bytes());
        Self {
            bytes,
            len: s.len() as u8,
        }
    }

    /// The symbol as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.bytes[..self.len as usize]).expect("symbol bytes are ASCII")
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Symbol").field(&self.as_str()).finish()
    }
}

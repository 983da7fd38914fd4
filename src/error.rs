//! Error types for trade validation.

use crate::types::{Price, Quantity, Symbol};

/// Errors surfaced by buy/sell operations and symbol resolution.
///
/// Every variant is recoverable: the failed operation leaves no state change
/// behind, and the session keeps accepting commands.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TradeError {
    /// Quantity must be greater than zero.
    #[error("quantity must be greater than zero")]
    InvalidQuantity,

    /// Buy cost exceeds the available cash balance.
    #[error("insufficient funds: need {required}, have {available}")]
    InsufficientFunds {
        /// Total cost of the attempted buy
        required: Price,
        /// Cash balance at the time of the attempt
        available: Price,
    },

    /// Sell quantity exceeds the held quantity.
    #[error("insufficient shares: tried to sell {requested}, hold {held}")]
    InsufficientShares {
        /// Quantity the caller tried to sell
        requested: Quantity,
        /// Quantity actually held
        held: Quantity,
    },

    /// Sell attempted on a symbol with no open position.
    #[error("no open position in {0}")]
    NotHeld(Symbol),

    /// Symbol does not resolve against the market listing.
    #[error("unknown symbol: {0:?}")]
    UnknownSymbol(String),
}

pub type Result<T> = std::result::Result<T, TradeError>;

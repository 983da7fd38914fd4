//! Position tracking for a single symbol.

use crate::types::{Price, Quantity, Symbol};

/// A long position in a single instrument.
///
/// Tracks the held quantity and the weighted-average cost basis. The exact
/// cumulative cost paid is stored alongside the derived average so repeated
/// buys never lose sub-cent remainders to integer truncation.
///
/// A `Position` exists only while shares are held: it is created by the first
/// buy of a symbol and removed from the ledger by the sell that takes the
/// quantity to zero.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Symbol this position is for
    pub symbol: Symbol,
    /// Shares held. Positive for the whole life of the position.
    pub quantity: Quantity,
    /// Cumulative cost paid for the held shares (cents)
    total_cost: i64,
}

impl Position {
    /// Open a position with its first lot: `quantity` shares bought for a
    /// total of `cost` cents.
    pub(crate) fn open(symbol: Symbol, quantity: Quantity, cost: i64) -> Self {
        debug_assert!(quantity > 0, "position opened with zero quantity");
        Self {
            symbol,
            quantity,
            total_cost: cost,
        }
    }

    /// Add a lot: `quantity` more shares bought for a total of `cost` cents.
    ///
    /// The average reweights through the cost actually paid this transaction,
    /// never a restatement at some later price.
    pub(crate) fn add(&mut self, quantity: Quantity, cost: i64) {
        self.total_cost += cost;
        self.quantity += quantity;
    }

    /// Remove `quantity` shares, returning the cost basis released (cents).
    ///
    /// Sold shares release basis at the current average, leaving the average
    /// of the remaining shares unchanged; a full liquidation releases the
    /// entire remaining basis so truncation remainders never leak.
    pub(crate) fn reduce(&mut self, quantity: Quantity) -> i64 {
        debug_assert!(
            quantity > 0 && quantity <= self.quantity,
            "reduce of {quantity} from a position of {}",
            self.quantity
        );
        let released = if quantity == self.quantity {
            self.total_cost
        } else {
            self.avg_cost().0 * quantity as i64
        };
        self.total_cost -= released;
        self.quantity -= quantity;
        released
    }

    /// Weighted-average cost per share (cents, truncated).
    #[inline]
    pub fn avg_cost(&self) -> Price {
        Price(self.total_cost / self.quantity as i64)
    }

    /// Exact cumulative cost of the held shares (cents).
    #[inline]
    pub fn cost_basis(&self) -> i64 {
        self.total_cost
    }

    /// Market value of the position at the given price (cents).
    #[inline]
    pub fn market_value(&self, price: Price) -> i64 {
        self.quantity as i64 * price.0
    }

    /// Unrealized PnL at the given price (cents).
    #[inline]
    pub fn unrealized_pnl(&self, price: Price) -> i64 {
        self.market_value(price) - self.total_cost
    }
}

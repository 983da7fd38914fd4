//! Portfolio ledger: cash, positions, and weighted-average-cost accounting.
//!
//! The ledger is the only writer of its own state: cash and positions move
//! exclusively through [`Portfolio::buy`] and [`Portfolio::sell`], and every
//! rejected operation returns before anything is touched. Prices come in from
//! the caller as part of the [`Instrument`] reference, so the ledger itself
//! never consults the market, and sells can never restate the cost basis of
//! the shares that remain.
//!
//! # Example
//!
//! ```
//! use minimarket::{Instrument, Portfolio, Price, Symbol};
//!
//! let aapl = Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(150_00));
//! let mut portfolio = Portfolio::new(10_000_00); // $10,000
//!
//! portfolio.buy(&aapl, 10).unwrap();
//! assert_eq!(portfolio.cash(), 8_500_00);
//!
//! let pos = portfolio.position(&Symbol::new("AAPL")).unwrap();
//! assert_eq!(pos.quantity, 10);
//! assert_eq!(pos.avg_cost(), Price(150_00));
//! ```

pub mod position;

pub use position::Position;

use crate::error::TradeError;
use crate::instrument::Instrument;
use crate::market::Market;
use crate::types::{Price, Quantity, Symbol};
use rustc_hash::FxHashMap;
use std::fmt;

/// Side of an execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Buy,
    Sell,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Confirmation record for an executed buy or sell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Execution {
    /// Symbol that traded
    pub symbol: Symbol,
    /// Whether this was a buy or a sell
    pub side: Side,
    /// Shares executed
    pub quantity: Quantity,
    /// Quoted price at execution time
    pub price: Price,
    /// Cash moved by the execution: `price * quantity` (cents)
    pub notional: i64,
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {} ({} total)",
            self.side,
            self.quantity,
            self.symbol,
            self.price,
            Price(self.notional)
        )
    }
}

/// A single holding in a [`PortfolioSnapshot`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Holding {
    /// Held symbol
    pub symbol: Symbol,
    /// Shares held
    pub quantity: Quantity,
    /// Weighted-average cost per share
    pub avg_cost: Price,
}

/// A point-in-time read-only view of ledger state.
///
/// Holdings are sorted by symbol so the view is stable across runs.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioSnapshot {
    /// Cash balance (cents)
    pub cash: i64,
    /// Open holdings, sorted by symbol
    pub holdings: Vec<Holding>,
    /// Cumulative realized PnL across all closed lots (cents)
    pub realized_pnl: i64,
}

/// A cash portfolio trading against a market listing.
///
/// Balance and positions are mutated only through [`buy`](Portfolio::buy) and
/// [`sell`](Portfolio::sell); the balance never goes negative, and a position
/// whose quantity reaches zero is removed outright.
#[derive(Clone, Debug)]
pub struct Portfolio {
    /// Cash balance (cents)
    cash: i64,
    /// Positions indexed by symbol
    positions: FxHashMap<Symbol, Position>,
    /// Realized PnL accumulated across sells (cents)
    realized_pnl: i64,
}

impl Portfolio {
    /// Create a portfolio with an initial cash balance (cents).
    ///
    /// Negative initial cash is a programming error (`debug_assert`).
    pub fn new(initial_cash: i64) -> Self {
        debug_assert!(
            initial_cash >= 0,
            "initial_cash must be non-negative, got {initial_cash}"
        );
        Self {
            cash: initial_cash,
            positions: FxHashMap::default(),
            realized_pnl: 0,
        }
    }

    // === Queries ===

    /// Current cash balance (cents).
    #[inline]
    pub fn cash(&self) -> i64 {
        self.cash
    }

    /// Cumulative realized PnL (cents).
    #[inline]
    pub fn realized_pnl(&self) -> i64 {
        self.realized_pnl
    }

    /// Get a position by symbol, if one is open.
    pub fn position(&self, symbol: &Symbol) -> Option<&Position> {
        self.positions.get(symbol)
    }

    /// Iterator over all open positions.
    pub fn positions(&self) -> impl Iterator<Item = (&Symbol, &Position)> {
        self.positions.iter()
    }

    /// Total portfolio value at current quotes: cash plus the market value of
    /// every open position.
    pub fn total_equity(&self, market: &Market) -> i64 {
        let position_value: i64 = self
            .positions
            .values()
            .map(|pos| {
                market
                    .lookup(pos.symbol.as_str())
                    .map(|inst| pos.market_value(inst.price()))
                    .unwrap_or(0)
            })
            .sum();
        self.cash + position_value
    }

    /// Take a read-only snapshot of the ledger: balance, holdings (sorted by
    /// symbol), and realized PnL. No mutation.
    pub fn snapshot(&self) -> PortfolioSnapshot {
        let mut holdings: Vec<Holding> = self
            .positions
            .values()
            .map(|pos| Holding {
                symbol: pos.symbol,
                quantity: pos.quantity,
                avg_cost: pos.avg_cost(),
            })
            .collect();
        holdings.sort_by_key(|h| h.symbol);
        PortfolioSnapshot {
            cash: self.cash,
            holdings,
            realized_pnl: self.realized_pnl,
        }
    }

    // === Execution ===

    /// Buy `quantity` shares of `instrument` at its current quoted price.
    ///
    /// On success the cost is deducted from cash and the position for the
    /// symbol is created or reweighted through the cost actually paid.
    ///
    /// # Errors
    ///
    /// [`TradeError::InvalidQuantity`] on a zero quantity,
    /// [`TradeError::InsufficientFunds`] if the cost exceeds the balance.
    /// Either way, nothing changes.
    pub fn buy(
        &mut self,
        instrument: &Instrument,
        quantity: Quantity,
    ) -> Result<Execution, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let price = instrument.price();
        let cost = price.0 * quantity as i64;
        if cost > self.cash {
            return Err(TradeError::InsufficientFunds {
                required: Price(cost),
                available: Price(self.cash),
            });
        }

        self.positions
            .entry(instrument.symbol)
            .and_modify(|pos| pos.add(quantity, cost))
            .or_insert_with(|| Position::open(instrument.symbol, quantity, cost));
        self.cash -= cost;

        let execution = Execution {
            symbol: instrument.symbol,
            side: Side::Buy,
            quantity,
            price,
            notional: cost,
        };
        log::debug!("fill: {execution}");
        Ok(execution)
    }

    /// Sell `quantity` shares of `instrument` at its current quoted price.
    ///
    /// On success the proceeds are credited to cash, the position quantity is
    /// reduced (its average cost untouched), realized PnL accrues, and a
    /// position taken to zero is removed from the ledger.
    ///
    /// # Errors
    ///
    /// [`TradeError::InvalidQuantity`] on a zero quantity,
    /// [`TradeError::NotHeld`] if no position is open for the symbol,
    /// [`TradeError::InsufficientShares`] if `quantity` exceeds the holding.
    /// Either way, nothing changes.
    pub fn sell(
        &mut self,
        instrument: &Instrument,
        quantity: Quantity,
    ) -> Result<Execution, TradeError> {
        if quantity == 0 {
            return Err(TradeError::InvalidQuantity);
        }
        let pos = self
            .positions
            .get_mut(&instrument.symbol)
            .ok_or(TradeError::NotHeld(instrument.symbol))?;
        if quantity > pos.quantity {
            return Err(TradeError::InsufficientShares {
                requested: quantity,
                held: pos.quantity,
            });
        }

        let price = instrument.price();
        let proceeds = price.0 * quantity as i64;
        let released = pos.reduce(quantity);
        let depleted = pos.quantity == 0;

        self.cash += proceeds;
        self.realized_pnl += proceeds - released;
        if depleted {
            self.positions.remove(&instrument.symbol);
        }

        let execution = Execution {
            symbol: instrument.symbol,
            side: Side::Sell,
            quantity,
            price,
            notional: proceeds,
        };
        log::debug!("fill: {execution}");
        Ok(execution)
    }
}

// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! # minimarket
//!
//! An interactive stock market simulator: a fixed listing of instruments
//! whose prices follow a random walk, and a single cash portfolio that buys
//! and sells against them with weighted-average cost accounting.
//!
//! ## Quick Start
//!
//! ```
//! use minimarket::{Command, Instrument, Market, Output, Price, Session, Symbol};
//!
//! let listing = vec![
//!     Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(150_00)),
//!     Instrument::new(Symbol::new("TSLA"), "Tesla Inc.", Price(700_00)),
//! ];
//!
//! // seeded market → the price walk replays identically every run
//! let market = Market::with_seed(listing, 42);
//! let mut session = Session::new(market, 10_000_00); // $10,000
//!
//! let out = session.apply(Command::Buy { symbol: "AAPL".into(), quantity: 10 }).unwrap();
//! assert!(matches!(out, Output::Trade(_)));
//! assert_eq!(session.portfolio().cash(), 8_500_00);
//!
//! // prices move, the ledger doesn't
//! session.apply(Command::SimulateFluctuation).unwrap();
//! let pos = session.portfolio().position(&Symbol::new("AAPL")).unwrap();
//! assert_eq!(pos.avg_cost(), Price(150_00));
//! ```
//!
//! ## Price Representation
//!
//! All monetary values are [`i64`] cents ([`Price`]), so the accounting
//! engine never sees a float:
//!
//! ```
//! use minimarket::Price;
//!
//! let price = Price(100_50); // $100.50
//! assert_eq!(format!("{}", price), "$100.50");
//! ```
//!
//! ## Average-Cost Accounting
//!
//! Repeated buys reweight the position's average through the cost actually
//! paid in each transaction; sells reduce quantity at the current quote and
//! leave the average of the remaining shares untouched. Selling a position
//! down to zero removes it from the ledger entirely.
//!
//! ```
//! use minimarket::{Instrument, Portfolio, Price, Symbol};
//!
//! let mut portfolio = Portfolio::new(10_000_00);
//!
//! let at = |p| Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(p));
//! portfolio.buy(&at(150_00), 10).unwrap();
//! portfolio.buy(&at(200_00), 10).unwrap(); // price moved between buys
//!
//! let pos = portfolio.position(&Symbol::new("AAPL")).unwrap();
//! assert_eq!(pos.avg_cost(), Price(175_00)); // (150*10 + 200*10) / 20
//!
//! portfolio.sell(&at(200_00), 20).unwrap();
//! assert!(portfolio.position(&Symbol::new("AAPL")).is_none());
//! assert_eq!(portfolio.cash(), 10_500_00);
//! ```
//!
//! ## Failure Semantics
//!
//! Every rejected operation returns a [`TradeError`] and leaves the ledger
//! bit-for-bit unchanged. Overdrawing cash, overselling a holding, selling
//! a symbol that isn't held, and zero quantities are all reported, never
//! applied:
//!
//! ```
//! use minimarket::{Instrument, Portfolio, Price, Symbol, TradeError};
//!
//! let aapl = Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(150_00));
//! let mut portfolio = Portfolio::new(1000_00);
//!
//! let err = portfolio.buy(&aapl, 10).unwrap_err();
//! assert!(matches!(err, TradeError::InsufficientFunds { .. }));
//! assert_eq!(portfolio.cash(), 1000_00);
//! ```
//!
//! ## The Price Walk
//!
//! [`Market::perturb_all`] moves every instrument by a uniform whole-percent
//! change in `[-5, +5]` and clamps at the $1.00 floor. The rng is owned by
//! the market and injected at construction, so tests and demos can pin the
//! walk with [`Market::with_seed`].

mod error;
mod instrument;
mod market;
pub mod portfolio;
mod session;
mod types;

// Re-export public API
pub use error::{Result, TradeError};
pub use instrument::Instrument;
pub use market::Market;
pub use portfolio::{Execution, Holding, Portfolio, PortfolioSnapshot, Position, Side};
pub use session::{Command, Output, Session};
pub use types::{Price, Quantity, Symbol};

//! Command dispatch: the seam between a presentation loop and the core.
//!
//! A [`Session`] owns one market and one portfolio and applies one
//! [`Command`] at a time, returning an [`Output`] for the caller to render.
//! No I/O happens here (reading commands and printing outputs belong to the
//! binary), so a whole user session can be driven from a test.

use crate::error::TradeError;
use crate::instrument::Instrument;
use crate::market::Market;
use crate::portfolio::{Execution, Portfolio, PortfolioSnapshot};
use crate::types::Quantity;

/// A single user command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Show the market listing with current prices
    ViewMarket,
    /// Buy shares of a symbol
    Buy { symbol: String, quantity: Quantity },
    /// Sell shares of a symbol
    Sell { symbol: String, quantity: Quantity },
    /// Show holdings and balance
    ViewPortfolio,
    /// Resample every instrument's price
    SimulateFluctuation,
    /// End the session
    Exit,
}

/// What a command produced, for the presentation layer to render.
#[derive(Clone, Debug)]
pub enum Output {
    /// Current quotes, in listing order
    Market(Vec<Instrument>),
    /// Confirmation of an executed trade
    Trade(Execution),
    /// Holdings, balance, and realized PnL, with total equity at current
    /// quotes
    Portfolio {
        snapshot: PortfolioSnapshot,
        equity: i64,
    },
    /// Prices were resampled
    PricesUpdated,
    /// The session is over
    Exit,
}

/// An interactive trading session: one market, one portfolio.
pub struct Session {
    market: Market,
    portfolio: Portfolio,
}

impl Session {
    /// Start a session over `market` with `initial_cash` cents of balance.
    pub fn new(market: Market, initial_cash: i64) -> Self {
        Self {
            market,
            portfolio: Portfolio::new(initial_cash),
        }
    }

    /// The session's market.
    pub fn market(&self) -> &Market {
        &self.market
    }

    /// The session's portfolio.
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    /// Apply one command and return the output to render.
    ///
    /// Buy/sell symbols are resolved here: an unlisted symbol fails with
    /// [`TradeError::UnknownSymbol`] before the ledger is reached. Failed
    /// commands leave both market and portfolio untouched.
    pub fn apply(&mut self, command: Command) -> Result<Output, TradeError> {
        match command {
            Command::ViewMarket => Ok(Output::Market(self.market.instruments().to_vec())),
            Command::Buy { symbol, quantity } => {
                let Some(instrument) = self.market.lookup(&symbol) else {
                    return Err(TradeError::UnknownSymbol(symbol));
                };
                self.portfolio.buy(instrument, quantity).map(Output::Trade)
            }
            Command::Sell { symbol, quantity } => {
                let Some(instrument) = self.market.lookup(&symbol) else {
                    return Err(TradeError::UnknownSymbol(symbol));
                };
                self.portfolio.sell(instrument, quantity).map(Output::Trade)
            }
            Command::ViewPortfolio => Ok(Output::Portfolio {
                snapshot: self.portfolio.snapshot(),
                equity: self.portfolio.total_equity(&self.market),
            }),
            Command::SimulateFluctuation => {
                self.market.perturb_all();
                Ok(Output::PricesUpdated)
            }
            Command::Exit => Ok(Output::Exit),
        }
    }
}

//! Market registry: the instrument listing and the simulated price walk.

use crate::instrument::Instrument;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A market of tradable instruments with simulated price movement.
///
/// The listing is fixed at construction: instruments are never added or
/// removed during a run, and their order is preserved. Prices move only
/// through [`perturb_all`](Market::perturb_all), which draws from the rng
/// owned by the market: seed it via [`with_seed`](Market::with_seed) and the
/// walk replays identically every run.
///
/// ```
/// use minimarket::{Instrument, Market, Price, Symbol};
///
/// let listing = vec![Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(150_00))];
/// let mut market = Market::with_seed(listing, 7);
///
/// let before = market.lookup("AAPL").unwrap().price();
/// market.perturb_all();
/// let after = market.lookup("AAPL").unwrap().price();
///
/// // a single tick moves the price by at most 5% in either direction
/// assert!((after.0 - before.0).abs() <= before.0 * 5 / 100);
/// assert!(after >= Instrument::FLOOR);
/// ```
#[derive(Debug)]
pub struct Market {
    instruments: Vec<Instrument>,
    rng: StdRng,
}

impl Market {
    /// Largest single-tick move, in whole percent, either direction.
    const MAX_MOVE_PCT: i64 = 5;

    /// Create a market seeded from OS entropy.
    pub fn new(instruments: Vec<Instrument>) -> Self {
        Self::with_rng(instruments, StdRng::from_os_rng())
    }

    /// Create a market with a fixed seed, for reproducible price walks.
    pub fn with_seed(instruments: Vec<Instrument>, seed: u64) -> Self {
        Self::with_rng(instruments, StdRng::seed_from_u64(seed))
    }

    fn with_rng(instruments: Vec<Instrument>, rng: StdRng) -> Self {
        debug_assert!(
            {
                let mut symbols: Vec<_> = instruments.iter().map(|i| i.symbol).collect();
                symbols.sort();
                symbols.windows(2).all(|w| w[0] != w[1])
            },
            "duplicate symbols in market listing"
        );
        Self { instruments, rng }
    }

    /// Look up an instrument by exact (case-sensitive) symbol match.
    pub fn lookup(&self, symbol: &str) -> Option<&Instrument> {
        self.instruments.iter().find(|i| i.symbol.as_str() == symbol)
    }

    /// The full listing, in registration order.
    pub fn instruments(&self) -> &[Instrument] {
        &self.instruments
    }

    /// Number of listed instruments.
    pub fn len(&self) -> usize {
        self.instruments.len()
    }

    /// Returns true if the listing is empty.
    pub fn is_empty(&self) -> bool {
        self.instruments.is_empty()
    }

    /// Resample every instrument's price.
    ///
    /// Each instrument independently draws a uniform whole-percent change in
    /// `[-5, +5]` (11 equally likely outcomes, including 0) and applies it,
    /// clamping at [`Instrument::FLOOR`].
    pub fn perturb_all(&mut self) {
        let rng = &mut self.rng;
        for inst in &mut self.instruments {
            let pct = rng.random_range(-Self::MAX_MOVE_PCT..=Self::MAX_MOVE_PCT);
            inst.apply_change(pct);
            log::trace!("repriced {} to {}", inst.symbol, inst.price());
        }
    }
}

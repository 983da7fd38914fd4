// Allow our dollar.cents digit grouping convention (e.g., 100_00 = $100.00)
#![allow(clippy::inconsistent_digit_grouping)]

//! Property-based tests for ledger and market invariants.
//!
//! These tests use proptest to verify that the accounting rules hold
//! across randomly generated trade sequences and price walks.

use minimarket::{Instrument, Market, Portfolio, Price, Symbol, TradeError};
use proptest::prelude::*;

/// Generate a valid quoted price (at or above the $1.00 floor)
fn price_strategy() -> impl Strategy<Value = i64> {
    1_00i64..=5000_00i64
}

/// Generate a valid trade quantity
fn quantity_strategy() -> impl Strategy<Value = u64> {
    1u64..=500u64
}

/// Generate a buy-or-sell flag
fn side_strategy() -> impl Strategy<Value = bool> {
    any::<bool>()
}

fn aapl_at(price: i64) -> Instrument {
    Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(price))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // ========================================================================
    // CONSERVATION INVARIANTS
    // ========================================================================

    /// Cash moves by exactly the notional of each accepted fill, never goes
    /// negative, and rejected fills leave the snapshot bit-identical.
    #[test]
    fn cash_conservation(
        fills in prop::collection::vec(
            (side_strategy(), price_strategy(), quantity_strategy()),
            1..60
        )
    ) {
        let initial = 100_000_00i64;
        let mut portfolio = Portfolio::new(initial);
        let mut expected_cash = initial;
        let mut expected_qty = 0u64;

        for (buy, price, quantity) in fills {
            let inst = aapl_at(price);
            let before = portfolio.snapshot();

            let result = if buy {
                portfolio.buy(&inst, quantity)
            } else {
                portfolio.sell(&inst, quantity)
            };

            match result {
                Ok(exec) => {
                    prop_assert_eq!(exec.notional, price * quantity as i64);
                    if buy {
                        expected_cash -= exec.notional;
                        expected_qty += quantity;
                    } else {
                        expected_cash += exec.notional;
                        expected_qty -= quantity;
                    }
                }
                Err(_) => {
                    // rejection must change nothing
                    prop_assert_eq!(portfolio.snapshot(), before);
                }
            }

            prop_assert_eq!(portfolio.cash(), expected_cash);
            prop_assert!(portfolio.cash() >= 0);
            let held = portfolio.position(&Symbol::new("AAPL")).map_or(0, |p| p.quantity);
            prop_assert_eq!(held, expected_qty);
        }
    }

    /// After any sequence of buys, the cost basis is the exact sum of the
    /// costs paid and the average is its quotient over total quantity.
    #[test]
    fn average_cost_is_total_paid_over_total_quantity(
        buys in prop::collection::vec((price_strategy(), 1u64..=50u64), 1..40)
    ) {
        let mut portfolio = Portfolio::new(i64::MAX / 4);
        let mut total_cost = 0i64;
        let mut total_qty = 0u64;

        for (price, quantity) in buys {
            portfolio.buy(&aapl_at(price), quantity).unwrap();
            total_cost += price * quantity as i64;
            total_qty += quantity;
        }

        let pos = portfolio.position(&Symbol::new("AAPL")).unwrap();
        prop_assert_eq!(pos.cost_basis(), total_cost);
        prop_assert_eq!(pos.avg_cost(), Price(total_cost / total_qty as i64));
    }

    /// Partial sells leave the average untouched; a full liquidation removes
    /// the position and the next sell reports NotHeld.
    #[test]
    fn liquidation_lifecycle(
        buys in prop::collection::vec((price_strategy(), 1u64..=50u64), 1..10),
        exit_price in price_strategy(),
    ) {
        let mut portfolio = Portfolio::new(i64::MAX / 4);
        let mut total_qty = 0u64;
        for (price, quantity) in &buys {
            portfolio.buy(&aapl_at(*price), *quantity).unwrap();
            total_qty += quantity;
        }
        let avg = portfolio.position(&Symbol::new("AAPL")).unwrap().avg_cost();

        let exit = aapl_at(exit_price);
        if total_qty > 1 {
            portfolio.sell(&exit, total_qty / 2).unwrap();
            let pos = portfolio.position(&Symbol::new("AAPL")).unwrap();
            prop_assert_eq!(pos.avg_cost(), avg);
            portfolio.sell(&exit, total_qty - total_qty / 2).unwrap();
        } else {
            portfolio.sell(&exit, total_qty).unwrap();
        }

        prop_assert!(portfolio.position(&Symbol::new("AAPL")).is_none());
        prop_assert_eq!(
            portfolio.sell(&exit, 1),
            Err(TradeError::NotHeld(Symbol::new("AAPL")))
        );
    }

    // ========================================================================
    // MARKET INVARIANTS
    // ========================================================================

    /// No instrument ever quotes below the floor, whatever the seed, the
    /// starting prices, or the number of ticks.
    #[test]
    fn price_floor_holds(
        seed in any::<u64>(),
        starts in prop::collection::vec(price_strategy(), 1..8),
        ticks in 1usize..100,
    ) {
        let listing: Vec<Instrument> = starts
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                Instrument::new(Symbol::new(&format!("S{i}")), format!("Stock {i}"), Price(p))
            })
            .collect();
        let mut market = Market::with_seed(listing, seed);

        for _ in 0..ticks {
            market.perturb_all();
            for inst in market.instruments() {
                prop_assert!(inst.price() >= Instrument::FLOOR);
            }
        }
    }

    /// A single tick never moves a price by more than 5% of its old value.
    #[test]
    fn single_tick_bounded(seed in any::<u64>(), start in price_strategy()) {
        let listing = vec![Instrument::new(Symbol::new("S"), "Stock", Price(start))];
        let mut market = Market::with_seed(listing, seed);

        market.perturb_all();
        let after = market.instruments()[0].price().0;
        let delta = after - start;
        prop_assert!(delta.abs() <= start * 5 / 100 || after == Instrument::FLOOR.0);
    }

    /// The walk is a pure function of the seed.
    #[test]
    fn seeded_walk_reproducible(seed in any::<u64>(), ticks in 1usize..50) {
        let listing = vec![
            Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(150_00)),
            Instrument::new(Symbol::new("TSLA"), "Tesla Inc.", Price(700_00)),
        ];
        let mut a = Market::with_seed(listing.clone(), seed);
        let mut b = Market::with_seed(listing, seed);

        for _ in 0..ticks {
            a.perturb_all();
            b.perturb_all();
        }

        let pa: Vec<Price> = a.instruments().iter().map(|i| i.price()).collect();
        let pb: Vec<Price> = b.instruments().iter().map(|i| i.price()).collect();
        prop_assert_eq!(pa, pb);
    }
}

//! Interactive stock market simulator CLI.
//!
//! A REPL over a simulated market and a cash portfolio.
//!
//! Usage:
//!   cargo run --bin sim
//!   sim --seed 42        (reproducible price walk)

use clap::Parser;
use minimarket::{
    Command, Instrument, Market, Output, Price, Session, Symbol, TradeError,
};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "sim")]
#[command(about = "Interactive stock market simulator")]
#[command(version)]
struct Cli {
    /// Seed for the price walk (omit for OS entropy)
    #[arg(long)]
    seed: Option<u64>,

    /// Starting cash balance in dollars
    #[arg(long, default_value_t = 10_000.0)]
    balance: f64,
}

/// The launch listing, straight from the prospectus.
fn listing() -> Vec<Instrument> {
    vec![
        Instrument::new(Symbol::new("AAPL"), "Apple Inc.", Price(150_00)),
        Instrument::new(Symbol::new("GOOGL"), "Alphabet Inc.", Price(2800_00)),
        Instrument::new(Symbol::new("TSLA"), "Tesla Inc.", Price(700_00)),
        Instrument::new(Symbol::new("AMZN"), "Amazon Inc.", Price(3300_00)),
    ]
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();

    let market = match cli.seed {
        Some(seed) => Market::with_seed(listing(), seed),
        None => Market::new(listing()),
    };
    let initial_cash = ((cli.balance * 100.0).round() as i64).max(0);
    let mut session = Session::new(market, initial_cash);

    println!("Stock Market Simulator v0.3.0");
    println!("Type 'help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("mkt> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break; // EOF
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts.first().map(|s| s.to_lowercase());

        match cmd.as_deref() {
            Some("help" | "h" | "?") => print_help(),
            Some("quit" | "exit" | "q") => break,
            Some("market" | "m") => render(session.apply(Command::ViewMarket)),
            Some("portfolio" | "p") => render(session.apply(Command::ViewPortfolio)),
            Some("buy") => handle_trade(&mut session, true, &parts[1..]),
            Some("sell") => handle_trade(&mut session, false, &parts[1..]),
            Some("tick" | "t") => handle_tick(&mut session, &parts[1..]),
            Some(cmd) => println!("Unknown command: '{}'. Type 'help' for commands.", cmd),
            None => {}
        }
    }

    println!("Goodbye!");
}

fn print_help() {
    println!(
        r#"
Commands:
  market                Show the market listing with current prices
  buy <symbol> <qty>    Buy shares at the current price
  sell <symbol> <qty>   Sell shares at the current price
  portfolio             Show holdings, balance, and PnL
  tick [n]              Simulate n rounds of price fluctuation (default: 1)
  help                  Show this help
  quit                  Exit

Examples:
  buy AAPL 10           Buy 10 shares of AAPL
  sell AAPL 5           Sell 5 shares of AAPL
  tick 3                Let prices wander for 3 rounds

Symbols are case-sensitive, exactly as listed by 'market'.
"#
    );
}

fn render(result: Result<Output, TradeError>) {
    match result {
        Ok(Output::Market(quotes)) => print_market(&quotes),
        Ok(Output::Trade(exec)) => println!("{exec}"),
        Ok(Output::Portfolio { snapshot, equity }) => {
            println!();
            if snapshot.holdings.is_empty() {
                println!("  No open positions.");
            } else {
                println!("  {:<10}{:>10}  {:>12}", "Symbol", "Quantity", "Avg Price");
                for holding in &snapshot.holdings {
                    println!(
                        "  {:<10}{:>10}  {:>12}",
                        holding.symbol.as_str(),
                        holding.quantity,
                        holding.avg_cost.to_string()
                    );
                }
            }
            println!("  Balance:      {}", Price(snapshot.cash));
            println!("  Equity:       {}", Price(equity));
            println!("  Realized PnL: {}", Price(snapshot.realized_pnl));
            println!();
        }
        Ok(Output::PricesUpdated) => println!("Prices updated."),
        Ok(Output::Exit) => {}
        Err(err) => println!("{err}"),
    }
}

fn print_market(quotes: &[Instrument]) {
    println!();
    println!("  {:<10}{:<20}{:>10}", "Symbol", "Company", "Price");
    for inst in quotes {
        println!(
            "  {:<10}{:<20}{:>10}",
            inst.symbol.as_str(),
            inst.name,
            inst.price().to_string()
        );
    }
    println!();
}

fn handle_trade(session: &mut Session, buy: bool, args: &[&str]) {
    if args.len() < 2 {
        println!("Usage: {} <symbol> <qty>", if buy { "buy" } else { "sell" });
        return;
    }

    let symbol = args[0].to_string();
    let quantity: u64 = match args[1].parse() {
        Ok(q) => q,
        Err(_) => {
            println!("Invalid quantity: '{}'", args[1]);
            return;
        }
    };

    let command = if buy {
        Command::Buy { symbol, quantity }
    } else {
        Command::Sell { symbol, quantity }
    };
    render(session.apply(command));
}

fn handle_tick(session: &mut Session, args: &[&str]) {
    let rounds: u32 = match args.first() {
        Some(s) => match s.parse() {
            Ok(n) if n >= 1 => n,
            _ => {
                println!("Invalid tick count: '{}'", s);
                return;
            }
        },
        None => 1,
    };

    for _ in 0..rounds {
        let _ = session.apply(Command::SimulateFluctuation);
    }
    if rounds == 1 {
        println!("Prices updated.");
    } else {
        println!("Prices updated ({rounds} rounds).");
    }
}

//! CLI entry point for the rewards calculator.
//!
//! Usage: `cargo run -- <transactions.csv> [--format summary|monthly|json]`

use std::process;

use clap::Parser;
use rewards_points::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    rewards_points::logging::init_logging(&config);

    if let Err(e) = rewards_points::run(&config, std::io::stdout()).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

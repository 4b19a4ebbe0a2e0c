//! Alarm Quote CLI
//!
//! Loads the materials catalog, prices the requested installation and
//! prints the quote as CSV. With a submit URL, the quote is also posted.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --catalog-file catalog.json --tier business --term 36 --set sensor=2
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `ALARM_QUOTE_CATALOG_URL`, `ALARM_QUOTE_SUBMIT_URL`: endpoint defaults

use alarm_quote::{
    Catalog, CatalogSource, CliConfig, LoadState, QuoteClient, Result, Selection,
};
use chrono::Utc;
use clap::Parser;
use std::fs::File;
use std::io::{self, BufReader};
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();
    init_logger(config.verbose);

    if let Err(e) = run(config).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

async fn run(config: CliConfig) -> Result<()> {
    config.validate()?;

    let client = QuoteClient::new();
    let fetched = load_catalog(&client, &config.catalog_source()?).await;
    let mut calculator = LoadState::from_fetch(fetched).into_calculator()?;

    if config.no_preset {
        let zeroed = Selection::zeroed_for(calculator.catalog());
        calculator.set_selection(zeroed);
    }
    for assignment in &config.assignments {
        calculator.apply_assignment(assignment)?;
    }
    calculator.set_tier(config.tier);
    calculator.set_term(config.term);
    calculator.set_offer_name(config.offer_name.clone());

    let stdout = io::stdout();
    calculator.quote().write_csv(stdout.lock())?;

    if let Some(url) = &config.submit_url {
        let submission = calculator.build_submission(Utc::now());
        let outcome = client.submit_quote(url, &submission).await;

        let now = Instant::now();
        calculator.record_submission_outcome(&outcome, now);
        if let Some(notification) = calculator.notification(now) {
            eprintln!("{}", notification.message);
        }
        outcome?;
    }

    Ok(())
}

async fn load_catalog(client: &QuoteClient, source: &CatalogSource) -> Result<Catalog> {
    match source {
        CatalogSource::Url(url) => client.fetch_catalog(url).await,
        CatalogSource::File(path) => {
            let file = File::open(path)?;
            Catalog::from_json_reader(BufReader::new(file))
        }
    }
}

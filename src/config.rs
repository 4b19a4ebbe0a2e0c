//! Command-line configuration.

use crate::error::{QuoteError, Result};
use crate::selection::Selection;
use crate::terms::{CustomerTier, FinancingTerm};
use clap::Parser;
use std::path::PathBuf;

/// Where the price list comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    Url(String),
    File(PathBuf),
}

#[derive(Parser, Debug, Clone)]
#[command(name = "alarm-quote")]
#[command(about = "Quotes a home-alarm installation, optionally financed, and submits it")]
#[command(version)]
pub struct CliConfig {
    /// URL of the materials catalog endpoint
    #[arg(long, env = "ALARM_QUOTE_CATALOG_URL")]
    pub catalog_url: Option<String>,

    /// Local JSON catalog, used instead of the endpoint
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Customer tier: individual or business
    #[arg(long, default_value = "individual")]
    pub tier: CustomerTier,

    /// Financing term in months: 0 (upfront), 12, 24, 36 or 48
    #[arg(long, default_value = "36")]
    pub term: FinancingTerm,

    /// Component quantity as <id>=<quantity>, repeatable
    #[arg(long = "set", value_name = "ID=QTY")]
    pub assignments: Vec<String>,

    /// Start every component at 0 instead of the default preset
    #[arg(long)]
    pub no_preset: bool,

    /// Commercial offer name attached to the submitted quote
    #[arg(long, default_value = "")]
    pub offer_name: String,

    /// Webhook receiving the quote; nothing is submitted when absent
    #[arg(long, env = "ALARM_QUOTE_SUBMIT_URL")]
    pub submit_url: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Checks everything that can be checked before touching the network.
    pub fn validate(&self) -> Result<()> {
        self.catalog_source()?;
        for assignment in &self.assignments {
            Selection::parse_assignment(assignment)?;
        }
        Ok(())
    }

    pub fn catalog_source(&self) -> Result<CatalogSource> {
        match (&self.catalog_url, &self.catalog_file) {
            (Some(_), Some(_)) => Err(QuoteError::ConflictingCatalogSources),
            (Some(url), None) => Ok(CatalogSource::Url(url.clone())),
            (None, Some(path)) => Ok(CatalogSource::File(path.clone())),
            (None, None) => Err(QuoteError::MissingCatalogSource),
        }
    }
}

//! # Alarm Quote
//!
//! Pricing engine for home-alarm installations: given a priced catalog,
//! the selected component quantities, a customer tier and a financing
//! term, it computes the material cost, the amount due upfront and the
//! final monthly fee, and can submit the quote to a webhook.
//!
//! ## Design Principles
//!
//! - **Fixed-point arithmetic**: amounts use 4 decimal places via `rust_decimal`,
//!   rounded to cents for display
//! - **Pure pricing**: [`compute_quote`] is a total function with no I/O
//! - **Explicit state**: [`QuoteCalculator`] recomputes on every input change
//! - **Mandatory hub**: always priced once and always present in submissions
//!
//! ## Example
//!
//! ```
//! use alarm_quote::{compute_quote, Catalog, CustomerTier, FinancingTerm, Selection};
//!
//! let catalog = Catalog::from_json_str(
//!     r#"{"hub": {"name": "Hub", "price": 50}, "sensor": {"name": "Sensor", "price": 20}}"#,
//! )
//! .unwrap();
//! let mut selection = Selection::new();
//! selection.set_quantity("sensor", 2);
//!
//! let quote = compute_quote(&catalog, &selection, CustomerTier::Individual, FinancingTerm::Upfront);
//! assert_eq!(quote.initial_cost.to_string(), "90.00");
//! assert_eq!(quote.final_monthly_cost.to_string(), "27.99");
//! ```

pub mod calculator;
pub mod catalog;
pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod money;
pub mod selection;
pub mod submission;
pub mod terms;

pub use calculator::{LoadState, Notification, NotificationKind, QuoteCalculator};
pub use catalog::{Catalog, Component, HUB_ID};
pub use client::QuoteClient;
pub use config::{CatalogSource, CliConfig};
pub use engine::{
    amortization_summary, amortized_payment, compute_quote, AmortizationSummary, QuoteResult,
};
pub use error::{QuoteError, Result};
pub use money::Money;
pub use selection::Selection;
pub use submission::{QuoteSubmission, SubmissionSummary};
pub use terms::{CustomerTier, FinancingTerm};

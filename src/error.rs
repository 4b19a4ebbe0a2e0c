//! Error types for the quote engine.

use thiserror::Error;

/// Result type alias for quote operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors that can occur while loading inputs, printing or submitting a quote.
///
/// The pricing engine itself never fails; every variant here comes from the
/// surfaces around it (catalog loading, CLI input, output and HTTP).
#[derive(Error, Debug)]
pub enum QuoteError {
    /// Failed to open or read a local file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV output error
    #[error("CSV output error: {0}")]
    Csv(#[from] csv::Error),

    /// Malformed JSON in a catalog or while encoding a submission
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network failure talking to the catalog or submission endpoint
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Endpoint answered with a non-2xx status
    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    /// Catalog content violates an invariant
    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    /// Catalog has no `hub` entry
    #[error("Invalid catalog: the mandatory 'hub' component is missing")]
    MissingHub,

    /// The catalog could not be obtained, the session cannot continue
    #[error("Could not load the component catalog ({message}). Please try again later")]
    CatalogUnavailable { message: String },

    /// Unknown customer tier
    #[error("Invalid customer tier '{0}'. Expected 'individual' or 'business'")]
    InvalidTier(String),

    /// Financing term outside the offered options
    #[error("Invalid financing term '{0}'. Expected one of 0, 12, 24, 36, 48")]
    InvalidTerm(String),

    /// Malformed `id=quantity` argument
    #[error("Invalid component assignment '{0}'. Expected <id>=<quantity>")]
    InvalidAssignment(String),

    /// Neither a catalog URL nor a catalog file was configured
    #[error("Missing catalog source. Use --catalog-url <URL> or --catalog-file <PATH>")]
    MissingCatalogSource,

    /// Both a catalog URL and a catalog file were configured
    #[error("Conflicting catalog sources: use either --catalog-url or --catalog-file, not both")]
    ConflictingCatalogSources,
}

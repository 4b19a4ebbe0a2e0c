//! Calculator session state.
//!
//! Holds every user input in one struct and recomputes the quote
//! synchronously after each mutation, so [`QuoteCalculator::quote`] always
//! reflects the latest inputs.

use crate::catalog::Catalog;
use crate::engine::{compute_quote, QuoteResult};
use crate::error::{QuoteError, Result};
use crate::selection::Selection;
use crate::submission::QuoteSubmission;
use crate::terms::{CustomerTier, FinancingTerm};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::time::{Duration, Instant};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(5);

const SUBMIT_SUCCESS_MESSAGE: &str = "Quote submitted successfully!";
const SUBMIT_FAILURE_MESSAGE: &str = "Could not submit the quote. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

/// Transient, dismissable message shown after a submission attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    raised_at: Instant,
}

impl Notification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, raised_at: Instant) -> Self {
        Notification {
            kind,
            message: message.into(),
            raised_at,
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= NOTIFICATION_TTL
    }
}

/// All inputs of a quote plus the quote derived from them.
#[derive(Debug, Clone)]
pub struct QuoteCalculator {
    catalog: Catalog,
    selection: Selection,
    tier: CustomerTier,
    term: FinancingTerm,
    offer_name: String,
    quote: QuoteResult,
    notification: Option<Notification>,
}

impl QuoteCalculator {
    /// Opens a calculator with the default preset, tier and term.
    pub fn new(catalog: Catalog) -> Self {
        let selection = Selection::for_catalog(&catalog);
        QuoteCalculator::with_selection(catalog, selection)
    }

    pub fn with_selection(catalog: Catalog, selection: Selection) -> Self {
        let tier = CustomerTier::default();
        let term = FinancingTerm::default();
        let quote = compute_quote(&catalog, &selection, tier, term);

        QuoteCalculator {
            catalog,
            selection,
            tier,
            term,
            offer_name: String::new(),
            quote,
            notification: None,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn tier(&self) -> CustomerTier {
        self.tier
    }

    pub fn term(&self) -> FinancingTerm {
        self.term
    }

    pub fn offer_name(&self) -> &str {
        &self.offer_name
    }

    /// Quote for the current inputs.
    pub fn quote(&self) -> &QuoteResult {
        &self.quote
    }

    pub fn set_tier(&mut self, tier: CustomerTier) {
        self.tier = tier;
        self.recompute();
    }

    pub fn set_term(&mut self, term: FinancingTerm) {
        self.term = term;
        self.recompute();
    }

    /// Replaces every quantity at once.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.recompute();
    }

    /// Sets a quantity (negative input clamps to 0) and recomputes.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> u32 {
        self.warn_if_unknown(id);
        let stored = self.selection.set_quantity(id, quantity);
        self.recompute();
        stored
    }

    pub fn increment(&mut self, id: &str) -> u32 {
        self.warn_if_unknown(id);
        let stored = self.selection.increment(id);
        self.recompute();
        stored
    }

    pub fn decrement(&mut self, id: &str) -> u32 {
        let stored = self.selection.decrement(id);
        self.recompute();
        stored
    }

    /// Applies an `id=quantity` assignment.
    pub fn apply_assignment(&mut self, input: &str) -> Result<u32> {
        let (id, quantity) = Selection::parse_assignment(input)?;
        Ok(self.set_quantity(&id, quantity))
    }

    /// Offer name does not affect pricing.
    pub fn set_offer_name(&mut self, offer_name: impl Into<String>) {
        self.offer_name = offer_name.into();
    }

    /// Swaps in a new price list, keeping the current quantities.
    pub fn replace_catalog(&mut self, catalog: Catalog) {
        self.catalog = catalog;
        self.recompute();
    }

    /// Payload for the current quote.
    pub fn build_submission(&self, timestamp: DateTime<Utc>) -> QuoteSubmission {
        QuoteSubmission::new(
            self.offer_name.clone(),
            self.tier,
            &self.selection,
            &self.quote,
            timestamp,
        )
    }

    /// Raises the notification matching a submission outcome.
    pub fn record_submission_outcome(&mut self, outcome: &Result<()>, now: Instant) {
        match outcome {
            Ok(()) => self.notify_success(SUBMIT_SUCCESS_MESSAGE, now),
            Err(e) => {
                warn!("Quote submission failed: {}", e);
                self.notify_error(SUBMIT_FAILURE_MESSAGE, now);
            }
        }
    }

    pub fn notify_success(&mut self, message: impl Into<String>, now: Instant) {
        self.notification = Some(Notification::new(NotificationKind::Success, message, now));
    }

    pub fn notify_error(&mut self, message: impl Into<String>, now: Instant) {
        self.notification = Some(Notification::new(NotificationKind::Error, message, now));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Visible notification at `now`; expired ones are dropped.
    pub fn notification(&mut self, now: Instant) -> Option<&Notification> {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| n.is_expired(now))
        {
            self.notification = None;
        }
        self.notification.as_ref()
    }

    fn recompute(&mut self) {
        self.quote = compute_quote(&self.catalog, &self.selection, self.tier, self.term);
        debug!(
            "Recomputed quote: initial {}, monthly {}",
            self.quote.initial_cost, self.quote.final_monthly_cost
        );
    }

    fn warn_if_unknown(&self, id: &str) {
        if self.catalog.get(id).is_none() {
            warn!("Component '{}' is not in the catalog and will not be priced", id);
        }
    }
}

/// Readiness of a calculator session.
///
/// The catalog gates everything: until it is loaded there is nothing to
/// price, and a failed load is final for the session.
#[derive(Debug, Clone, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Failed(String),
    Ready(QuoteCalculator),
}

impl LoadState {
    /// Settles the session from the outcome of the catalog fetch.
    pub fn from_fetch(result: Result<Catalog>) -> Self {
        match result {
            Ok(catalog) => LoadState::Ready(QuoteCalculator::new(catalog)),
            Err(e) => {
                warn!("Catalog unavailable: {}", e);
                LoadState::Failed(e.to_string())
            }
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, LoadState::Ready(_))
    }

    /// Takes the calculator out of a ready session.
    pub fn into_calculator(self) -> Result<QuoteCalculator> {
        match self {
            LoadState::Ready(calculator) => Ok(calculator),
            LoadState::Failed(message) => Err(QuoteError::CatalogUnavailable { message }),
            LoadState::Loading => Err(QuoteError::CatalogUnavailable {
                message: "catalog is still loading".to_string(),
            }),
        }
    }
}

//! Payload posted to the quote webhook.
//!
//! Key names and value types follow what the webhook consumer reads:
//! the term is `permanence`, tiers are `particular`/`negocio`, and the
//! summary amounts are plain JSON numbers at full internal precision.

use crate::engine::{AmortizationSummary, QuoteResult};
use crate::error::Result;
use crate::money::{self, Money};
use crate::selection::Selection;
use crate::terms::{CustomerTier, FinancingTerm};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// A quote as submitted to the remote endpoint.
///
/// `components` always carries `hub: 1`, and `amortization_details` is
/// `null` when nothing is financed (upfront term or zero material cost).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSubmission {
    pub offer_name: String,
    pub customer_type: CustomerTier,
    #[serde(rename = "permanence")]
    pub financing_term: FinancingTerm,
    pub amortization_details: Option<AmortizationSummary>,
    pub components: BTreeMap<String, u32>,
    pub summary: SubmissionSummary,
    pub timestamp: DateTime<Utc>,
}

/// Quote figures in the shape of the webhook's `summary` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionSummary {
    #[serde(serialize_with = "money::serialize_number")]
    pub total_material_cost: Money,
    #[serde(serialize_with = "money::serialize_number")]
    pub initial_cost: Money,
    #[serde(rename = "monthlyCost", serialize_with = "money::serialize_number")]
    pub final_monthly_cost: Money,
    #[serde(serialize_with = "money::serialize_number")]
    pub base_rate: Money,
    #[serde(rename = "permanence")]
    pub term: FinancingTerm,
    #[serde(
        rename = "monthlyPermanenceCost",
        serialize_with = "money::serialize_number"
    )]
    pub monthly_financing_surcharge: Money,
}

impl From<&QuoteResult> for SubmissionSummary {
    fn from(quote: &QuoteResult) -> Self {
        SubmissionSummary {
            total_material_cost: quote.total_material_cost,
            initial_cost: quote.initial_cost,
            final_monthly_cost: quote.final_monthly_cost,
            base_rate: quote.base_rate,
            term: quote.term,
            monthly_financing_surcharge: quote.monthly_financing_surcharge,
        }
    }
}

impl QuoteSubmission {
    pub fn new(
        offer_name: impl Into<String>,
        tier: CustomerTier,
        selection: &Selection,
        quote: &QuoteResult,
        timestamp: DateTime<Utc>,
    ) -> Self {
        QuoteSubmission {
            offer_name: offer_name.into(),
            customer_type: tier,
            financing_term: quote.term,
            amortization_details: quote.amortization(),
            components: selection.with_hub(),
            summary: SubmissionSummary::from(quote),
            timestamp,
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

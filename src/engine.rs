//! Core pricing engine.
//!
//! A quote is a pure function of the catalog, the selected quantities, the
//! customer tier and the financing term. Nothing here performs I/O or keeps
//! state; callers recompute the quote whenever one of its inputs changes.

use crate::catalog::Catalog;
use crate::error::Result;
use crate::money::Money;
use crate::selection::Selection;
use crate::terms::{CustomerTier, FinancingTerm};
use log::debug;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::io::Write;

/// Decimal places kept for the monthly interest rate in summaries.
const MONTHLY_RATE_SCALE: u32 = 6;

/// Nominal annual interest rate applied to financed installations (7 %).
pub const NOMINAL_ANNUAL_RATE: Decimal = Decimal::from_parts(7, 0, 0, false, 2);

pub const MONTHS_PER_YEAR: u32 = 12;

/// Monthly rate derived from [`NOMINAL_ANNUAL_RATE`].
pub fn monthly_rate() -> Decimal {
    NOMINAL_ANNUAL_RATE / Decimal::from(MONTHS_PER_YEAR)
}

/// Result of pricing a selection.
///
/// # Invariants
///
/// - `final_monthly_cost == base_rate + monthly_financing_surcharge`
/// - An upfront term has no surcharge and `initial_cost == total_material_cost`
/// - A financed term has `initial_cost == 0`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteResult {
    /// Hub plus every selected component, at catalog prices.
    pub total_material_cost: Money,

    /// Fixed monthly rate of the customer tier.
    pub base_rate: Money,

    /// Amount due when the quote is accepted.
    pub initial_cost: Money,

    /// Monthly charge repaying the financed installation.
    pub monthly_financing_surcharge: Money,

    /// What the customer pays each month.
    pub final_monthly_cost: Money,

    /// Financing term the quote was computed for.
    pub term: FinancingTerm,
}

impl QuoteResult {
    /// Loan breakdown for this quote, if the installation is financed.
    pub fn amortization(&self) -> Option<AmortizationSummary> {
        amortization_summary(
            self.total_material_cost,
            self.term,
            self.monthly_financing_surcharge,
        )
    }

    /// Writes the quote as a one-row CSV table.
    ///
    /// All monetary values are formatted with exactly 2 decimal places.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "term",
            "total_material_cost",
            "base_rate",
            "initial_cost",
            "monthly_financing_surcharge",
            "final_monthly_cost",
        ])?;
        csv_writer.write_record([
            self.term.to_string(),
            self.total_material_cost.to_string(),
            self.base_rate.to_string(),
            self.initial_cost.to_string(),
            self.monthly_financing_surcharge.to_string(),
            self.final_monthly_cost.to_string(),
        ])?;

        csv_writer.flush()?;
        Ok(())
    }
}

/// Loan figures attached to a submitted quote.
///
/// Currency fields are rounded to cents, the monthly rate to 6 places.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmortizationSummary {
    pub principal: Money,
    #[serde(serialize_with = "crate::money::serialize_decimal_number")]
    pub annual_interest_rate: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub monthly_interest_rate: Decimal,
    pub number_of_payments: u32,
    pub monthly_payment: Money,
    pub total_paid: Money,
    pub total_interest_paid: Money,
}

/// Prices a selection.
///
/// Selection entries that are not in the catalog are ignored. This never
/// fails: zero cost and upfront payment are ordinary branches.
pub fn compute_quote(
    catalog: &Catalog,
    selection: &Selection,
    tier: CustomerTier,
    term: FinancingTerm,
) -> QuoteResult {
    let total_material_cost = total_material_cost(catalog, selection);
    let base_rate = tier.base_rate();

    let (initial_cost, monthly_financing_surcharge) = if !term.is_financed() {
        (total_material_cost, Money::ZERO)
    } else if total_material_cost.is_positive() {
        let payment = amortized_payment(total_material_cost, monthly_rate(), term.months());
        (Money::ZERO, payment)
    } else {
        (Money::ZERO, Money::ZERO)
    };

    debug!(
        "Quote for {} over {} months: material {}, surcharge {}",
        tier,
        term.months(),
        total_material_cost,
        monthly_financing_surcharge
    );

    QuoteResult {
        total_material_cost,
        base_rate,
        initial_cost,
        monthly_financing_surcharge,
        final_monthly_cost: base_rate + monthly_financing_surcharge,
        term,
    }
}

/// Hub price plus quantity times price for every known selected component.
///
/// Saturates at [`Money::MAX`] rather than overflowing.
pub fn total_material_cost(catalog: &Catalog, selection: &Selection) -> Money {
    let components: Money = selection
        .iter()
        .filter_map(|(id, quantity)| match catalog.price(id) {
            Some(price) => Some(price * quantity),
            None => {
                debug!("Ignoring '{}': not in the catalog", id);
                None
            }
        })
        .sum();

    catalog.hub_price() + components
}

/// Fixed-rate amortizing payment:
/// `principal * r * (1 + r)^n / ((1 + r)^n - 1)`.
///
/// Falls back to straight-line repayment (`principal / n`) when the
/// denominator is not positive, which only happens for rates ≤ 0.
pub fn amortized_payment(principal: Money, monthly_rate: Decimal, months: u32) -> Money {
    if months == 0 {
        return principal;
    }

    let annuity = compound_factor(monthly_rate, months).and_then(|factor| {
        let denominator = factor.checked_sub(Decimal::ONE)?;
        if denominator <= Decimal::ZERO {
            return None;
        }
        let ratio = monthly_rate.checked_mul(factor)?.checked_div(denominator)?;
        principal.amount().checked_mul(ratio)
    });

    match annuity {
        Some(payment) => Money::new(payment),
        None => Money::new(principal.amount() / Decimal::from(months)),
    }
}

/// `(1 + rate)^months`, or `None` on overflow.
fn compound_factor(rate: Decimal, months: u32) -> Option<Decimal> {
    let base = Decimal::ONE.checked_add(rate)?;
    (0..months).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(base))
}

/// Totals of a financed installation.
///
/// Returns `None` for an upfront term or a zero principal, where there is
/// nothing to amortize.
pub fn amortization_summary(
    principal: Money,
    term: FinancingTerm,
    monthly_payment: Money,
) -> Option<AmortizationSummary> {
    if !term.is_financed() || !principal.is_positive() {
        return None;
    }

    let total_paid = monthly_payment * term.months();
    let total_interest_paid = total_paid - principal;

    Some(AmortizationSummary {
        principal: principal.round_to_cents(),
        annual_interest_rate: NOMINAL_ANNUAL_RATE,
        monthly_interest_rate: monthly_rate()
            .round_dp_with_strategy(MONTHLY_RATE_SCALE, RoundingStrategy::MidpointAwayFromZero),
        number_of_payments: term.months(),
        monthly_payment: monthly_payment.round_to_cents(),
        total_paid: total_paid.round_to_cents(),
        total_interest_paid: total_interest_paid.round_to_cents(),
    })
}

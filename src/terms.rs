//! Customer tiers and financing terms offered to the customer.

use crate::error::QuoteError;
use crate::money::Money;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Customer classification that determines the base monthly rate.
///
/// On the wire the tiers keep the webhook's names, `particular` and
/// `negocio`; the English names are accepted when reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CustomerTier {
    /// Private household.
    #[default]
    #[serde(rename = "particular", alias = "individual")]
    Individual,

    /// Small business.
    #[serde(rename = "negocio", alias = "business")]
    Business,
}

impl CustomerTier {
    pub const ALL: [CustomerTier; 2] = [CustomerTier::Individual, CustomerTier::Business];

    /// Fixed base monthly rate, VAT included.
    pub fn base_rate(self) -> Money {
        match self {
            CustomerTier::Individual => Money::new(Decimal::new(2799, 2)),
            CustomerTier::Business => Money::new(Decimal::new(3499, 2)),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CustomerTier::Individual => "individual",
            CustomerTier::Business => "business",
        }
    }
}

impl fmt::Display for CustomerTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CustomerTier {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "individual" | "particular" => Ok(CustomerTier::Individual),
            "business" | "negocio" => Ok(CustomerTier::Business),
            other => Err(QuoteError::InvalidTier(other.to_string())),
        }
    }
}

/// Number of months over which the installation is financed.
///
/// `Upfront` means the installation is paid in full when the quote is
/// accepted; every other term finances it at the nominal annual rate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum FinancingTerm {
    Upfront,
    Months12,
    Months24,
    #[default]
    Months36,
    Months48,
}

impl FinancingTerm {
    pub const ALL: [FinancingTerm; 5] = [
        FinancingTerm::Upfront,
        FinancingTerm::Months12,
        FinancingTerm::Months24,
        FinancingTerm::Months36,
        FinancingTerm::Months48,
    ];

    pub fn months(self) -> u32 {
        match self {
            FinancingTerm::Upfront => 0,
            FinancingTerm::Months12 => 12,
            FinancingTerm::Months24 => 24,
            FinancingTerm::Months36 => 36,
            FinancingTerm::Months48 => 48,
        }
    }

    /// Returns `true` for every term except `Upfront`.
    pub fn is_financed(self) -> bool {
        self.months() > 0
    }

    /// Human-readable option label.
    pub fn label(self) -> String {
        match self {
            FinancingTerm::Upfront => "Installation paid by the customer".to_string(),
            financed => format!("{} months", financed.months()),
        }
    }
}

impl TryFrom<u32> for FinancingTerm {
    type Error = QuoteError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        FinancingTerm::ALL
            .into_iter()
            .find(|term| term.months() == months)
            .ok_or_else(|| QuoteError::InvalidTerm(months.to_string()))
    }
}

impl From<FinancingTerm> for u32 {
    fn from(term: FinancingTerm) -> Self {
        term.months()
    }
}

impl FromStr for FinancingTerm {
    type Err = QuoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let months: u32 = trimmed
            .parse()
            .map_err(|_| QuoteError::InvalidTerm(trimmed.to_string()))?;
        FinancingTerm::try_from(months)
    }
}

impl fmt::Display for FinancingTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.months())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_rates() {
        assert_eq!(CustomerTier::Individual.base_rate().to_string(), "27.99");
        assert_eq!(CustomerTier::Business.base_rate().to_string(), "34.99");
    }

    #[test]
    fn test_tier_parsing_accepts_aliases() {
        assert_eq!(
            CustomerTier::from_str(" Business ").unwrap(),
            CustomerTier::Business
        );
        assert_eq!(
            CustomerTier::from_str("particular").unwrap(),
            CustomerTier::Individual
        );
        assert_eq!(
            CustomerTier::from_str("negocio").unwrap(),
            CustomerTier::Business
        );
        assert!(matches!(
            CustomerTier::from_str("enterprise"),
            Err(QuoteError::InvalidTier(_))
        ));
    }

    #[test]
    fn test_tier_serde_uses_webhook_names() {
        assert_eq!(
            serde_json::to_string(&CustomerTier::Business).unwrap(),
            "\"negocio\""
        );
        assert_eq!(
            serde_json::to_string(&CustomerTier::Individual).unwrap(),
            "\"particular\""
        );
        let tier: CustomerTier = serde_json::from_str("\"individual\"").unwrap();
        assert_eq!(tier, CustomerTier::Individual);
        let tier: CustomerTier = serde_json::from_str("\"negocio\"").unwrap();
        assert_eq!(tier, CustomerTier::Business);
    }

    #[test]
    fn test_term_months_and_financing() {
        let months: Vec<u32> = FinancingTerm::ALL.iter().map(|t| t.months()).collect();
        assert_eq!(months, vec![0, 12, 24, 36, 48]);
        assert!(!FinancingTerm::Upfront.is_financed());
        assert!(FinancingTerm::Months12.is_financed());
    }

    #[test]
    fn test_term_parsing_rejects_unknown_values() {
        assert_eq!(
            FinancingTerm::from_str("24").unwrap(),
            FinancingTerm::Months24
        );
        assert!(matches!(
            FinancingTerm::from_str("18"),
            Err(QuoteError::InvalidTerm(_))
        ));
        assert!(matches!(
            FinancingTerm::from_str("-12"),
            Err(QuoteError::InvalidTerm(_))
        ));
        assert!(FinancingTerm::try_from(60).is_err());
    }

    #[test]
    fn test_term_serializes_as_month_count() {
        assert_eq!(
            serde_json::to_string(&FinancingTerm::Months48).unwrap(),
            "48"
        );
        let term: FinancingTerm = serde_json::from_str("0").unwrap();
        assert_eq!(term, FinancingTerm::Upfront);
        assert!(serde_json::from_str::<FinancingTerm>("7").is_err());
    }

    #[test]
    fn test_defaults_match_initial_form() {
        assert_eq!(CustomerTier::default(), CustomerTier::Individual);
        assert_eq!(FinancingTerm::default(), FinancingTerm::Months36);
        assert_eq!(FinancingTerm::Months12.label(), "12 months");
    }
}

//! Component catalog as served by the materials endpoint.
//!
//! The wire format is a JSON object keyed by component id, each value being
//! `{ "name": string, "price": number }`. The `hub` entry is mandatory: it
//! is the base station every installation includes exactly once.

use crate::error::{QuoteError, Result};
use crate::money::Money;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Read;

/// Identifier of the mandatory base station.
pub const HUB_ID: &str = "hub";

/// A priced, installable component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Display name; may be empty if the endpoint omits it.
    #[serde(default)]
    pub name: String,

    /// Unit price, never negative. At most 4 decimal places are accepted;
    /// finer prices are rejected rather than rounded.
    #[serde(deserialize_with = "crate::money::deserialize_exact")]
    pub price: Money,
}

impl Component {
    pub fn new(name: impl Into<String>, price: Money) -> Self {
        Component {
            name: name.into(),
            price,
        }
    }
}

/// Validated price list.
///
/// # Invariants
///
/// - A `hub` component is always present
/// - No price is negative
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    hub: Component,
    optional: BTreeMap<String, Component>,
}

impl Catalog {
    /// Builds a catalog from raw components, enforcing the invariants.
    pub fn new(mut components: BTreeMap<String, Component>) -> Result<Self> {
        if let Some((id, component)) = components.iter().find(|(_, c)| c.price.is_negative()) {
            return Err(QuoteError::InvalidCatalog {
                message: format!("component '{}' has negative price {}", id, component.price),
            });
        }

        let hub = components.remove(HUB_ID).ok_or(QuoteError::MissingHub)?;

        debug!(
            "Catalog built: hub at {}, {} optional components",
            hub.price,
            components.len()
        );

        Ok(Catalog {
            hub,
            optional: components,
        })
    }

    /// Parses the JSON body returned by the materials endpoint.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let components: BTreeMap<String, Component> = serde_json::from_str(json)?;
        let catalog = Catalog::new(components)?;
        info!("Loaded catalog with {} components", catalog.component_count());
        Ok(catalog)
    }

    /// Parses a catalog from any reader, e.g. a local JSON file.
    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self> {
        let components: BTreeMap<String, Component> = serde_json::from_reader(reader)?;
        let catalog = Catalog::new(components)?;
        info!("Loaded catalog with {} components", catalog.component_count());
        Ok(catalog)
    }

    pub fn hub(&self) -> &Component {
        &self.hub
    }

    pub fn hub_price(&self) -> Money {
        self.hub.price
    }

    /// Looks up any component, `hub` included.
    pub fn get(&self, id: &str) -> Option<&Component> {
        if id == HUB_ID {
            Some(&self.hub)
        } else {
            self.optional.get(id)
        }
    }

    pub fn price(&self, id: &str) -> Option<Money> {
        self.get(id).map(|c| c.price)
    }

    /// Ids of the user-selectable components, sorted, `hub` excluded.
    pub fn optional_ids(&self) -> impl Iterator<Item = &str> {
        self.optional.keys().map(String::as_str)
    }

    /// User-selectable components, sorted by id.
    pub fn optional_components(&self) -> impl Iterator<Item = (&str, &Component)> {
        self.optional.iter().map(|(id, c)| (id.as_str(), c))
    }

    /// Number of components including the hub.
    pub fn component_count(&self) -> usize {
        self.optional.len() + 1
    }
}

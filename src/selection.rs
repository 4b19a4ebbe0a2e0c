//! Component quantities chosen by the user.

use crate::catalog::{Catalog, HUB_ID};
use crate::error::{QuoteError, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quantities preselected when a fresh form is opened for a catalog.
const DEFAULT_PRESET: [(&str, u32); 3] = [("fotodetector", 2), ("contacto", 1), ("teclado", 1)];

/// Mapping from component id to a non-negative quantity.
///
/// The hub is never stored here: it is implicitly selected exactly once,
/// and [`Selection::with_hub`] injects it when a quote is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    quantities: BTreeMap<String, u32>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Selection::default()
    }

    /// Every optional component of the catalog at quantity 0.
    pub fn zeroed_for(catalog: &Catalog) -> Self {
        let quantities = catalog
            .optional_ids()
            .map(|id| (id.to_string(), 0))
            .collect();
        Selection { quantities }
    }

    /// Initial selection for a freshly loaded catalog: every optional
    /// component at 0, then the preset applied to the ids the catalog has.
    pub fn for_catalog(catalog: &Catalog) -> Self {
        let mut selection = Selection::zeroed_for(catalog);
        for (id, quantity) in DEFAULT_PRESET {
            if let Some(slot) = selection.quantities.get_mut(id) {
                *slot = quantity;
            }
        }
        selection
    }

    /// Sets a quantity, clamping negative input to 0.
    ///
    /// Returns the stored quantity. The hub cannot be changed and always
    /// reports 1.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) -> u32 {
        if id == HUB_ID {
            debug!("Ignoring quantity change for the mandatory hub");
            return 1;
        }

        let clamped = u32::try_from(quantity.max(0)).unwrap_or(u32::MAX);
        self.quantities.insert(id.to_string(), clamped);
        clamped
    }

    pub fn increment(&mut self, id: &str) -> u32 {
        let next = i64::from(self.quantity(id)) + 1;
        self.set_quantity(id, next)
    }

    /// Decrements, saturating at 0.
    pub fn decrement(&mut self, id: &str) -> u32 {
        let next = i64::from(self.quantity(id)) - 1;
        self.set_quantity(id, next)
    }

    /// Current quantity; 1 for the hub, 0 for unknown ids.
    pub fn quantity(&self, id: &str) -> u32 {
        if id == HUB_ID {
            return 1;
        }
        self.quantities.get(id).copied().unwrap_or(0)
    }

    /// Iterates over the stored entries, sorted by id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.quantities.iter().map(|(id, q)| (id.as_str(), *q))
    }

    pub fn len(&self) -> usize {
        self.quantities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }

    /// Component map as submitted, with `hub: 1` injected.
    pub fn with_hub(&self) -> BTreeMap<String, u32> {
        let mut components = self.quantities.clone();
        components.insert(HUB_ID.to_string(), 1);
        components
    }

    /// Parses an `id=quantity` assignment.
    ///
    /// The quantity may be negative; clamping happens when it is applied.
    pub fn parse_assignment(input: &str) -> Result<(String, i64)> {
        let invalid = || QuoteError::InvalidAssignment(input.to_string());

        let (id, quantity) = input.split_once('=').ok_or_else(invalid)?;
        let id = id.trim();
        if id.is_empty() {
            return Err(invalid());
        }
        let quantity: i64 = quantity.trim().parse().map_err(|_| invalid())?;

        Ok((id.to_string(), quantity))
    }

    /// Parses and applies an `id=quantity` assignment.
    pub fn apply_assignment(&mut self, input: &str) -> Result<u32> {
        let (id, quantity) = Selection::parse_assignment(input)?;
        Ok(self.set_quantity(&id, quantity))
    }
}

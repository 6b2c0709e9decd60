//! Fare tables: prices per rider category for one fare product.
//!
//! A table may serve as a template for other tables. [`FareTable::add_note`]
//! and [`FareTable::derive_with_notes_from`] produce annotated copies without
//! touching a shared original.

use super::category::FareCategory;
use super::money::{Currency, Money};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt::Display;

/// A single priced entry of a fare table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FareTypeCost {
    pub category: FareCategory,
    pub money: Money,
}

impl FareTypeCost {
    pub fn new(category: FareCategory, money: Money) -> Self {
        Self { category, money }
    }
}

impl Display for FareTypeCost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.category, self.money)
    }
}

impl Serialize for FareTypeCost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FareTypeCost", 3)?;
        state.serialize_field("category", &self.category)?;
        state.serialize_field("currency", self.money.currency())?;
        state.serialize_field("cents", &self.money.cents())?;
        state.end()
    }
}

/// A set of prices for different classes of riders.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FareTable {
    agency_id: Option<String>,
    agency_name: Option<String>,
    name: Option<String>,
    fares: HashMap<FareCategory, FareTypeCost>,
    /// `None` until the table is first annotated; see [`FareTable::add_note`].
    notes: Option<Vec<String>>,
}

impl FareTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agency(agency_id: &str, name: &str) -> Self {
        Self {
            agency_id: Some(agency_id.to_string()),
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    /// Copy used for derivation: entries, agency id and name. Notes and the
    /// agency name are left for the caller to fill in.
    fn copy_base(&self) -> Self {
        Self {
            agency_id: self.agency_id.clone(),
            agency_name: None,
            name: self.name.clone(),
            fares: self.fares.clone(),
            notes: None,
        }
    }

    pub fn agency_id(&self) -> Option<&str> {
        self.agency_id.as_deref()
    }

    pub fn agency_name(&self) -> Option<&str> {
        self.agency_name.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn notes(&self) -> Option<&[String]> {
        self.notes.as_deref()
    }

    pub fn len(&self) -> usize {
        self.fares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fares.is_empty()
    }

    /// Sets the price for `category`, replacing any previous one.
    pub fn add_fare(&mut self, category: FareCategory, money: Money) {
        self.fares
            .insert(category.clone(), FareTypeCost::new(category, money));
    }

    pub fn add_fare_cents(&mut self, category: FareCategory, currency: Currency, cents: i64) {
        self.add_fare(category, Money::new(currency, cents));
    }

    /// The price recorded for exactly `category`.
    ///
    /// Parent categories are not consulted; callers decide whether a missing
    /// price falls back, counts as free or is an error.
    pub fn get_fare(&self, category: &FareCategory) -> Option<&Money> {
        self.fares.get(category).map(|cost| &cost.money)
    }

    /// All entries, in map iteration order.
    pub fn fare_type_costs(&self) -> Vec<FareTypeCost> {
        self.fares.values().cloned().collect()
    }

    /// A copy of this table carrying `source`'s notes. `self` is unchanged.
    pub fn derive_with_notes_from(&self, source: &FareTable) -> FareTable {
        let mut derived = self.copy_base();
        derived.notes = source.notes.clone();
        derived
    }

    /// Adds a usage note.
    ///
    /// A table that has never been annotated is treated as a shared template:
    /// the note goes on a fresh copy returned as [`Cow::Owned`] and `self` is
    /// left untouched. Once a table has notes, further notes are appended to
    /// it in place and it is returned as [`Cow::Borrowed`].
    pub fn add_note(&mut self, note: impl Into<String>) -> Cow<'_, FareTable> {
        let Some(notes) = self.notes.as_mut() else {
            let mut copy = self.copy_base();
            copy.notes = Some(vec![note.into()]);
            return Cow::Owned(copy);
        };
        notes.push(note.into());
        Cow::Borrowed(self)
    }

    pub fn set_agency(&mut self, agency_id: &str) -> &mut Self {
        self.agency_id = Some(agency_id.to_string());
        self
    }

    pub fn set_agency_name(&mut self, agency_name: &str) -> &mut Self {
        self.agency_name = Some(agency_name.to_string());
        self
    }

    pub fn set_name(&mut self, name: &str) -> &mut Self {
        self.name = Some(name.to_string());
        self
    }
}

impl Display for FareTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Fare({} [", self.name.as_deref().unwrap_or_default())?;
        for note in self.notes.iter().flatten() {
            write!(f, "{note}")?;
        }
        write!(f, "], ")?;
        for cost in self.fares.values() {
            write!(f, "[{cost}] ")?;
        }
        write!(f, ")")
    }
}

impl Serialize for FareTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FareTable", 5)?;
        state.serialize_field("agency_id", &self.agency_id)?;
        state.serialize_field("agency_name", &self.agency_name)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("notes", &self.notes.as_deref().unwrap_or_default())?;
        state.serialize_field("fare_types", &self.fare_type_costs())?;
        state.end()
    }
}

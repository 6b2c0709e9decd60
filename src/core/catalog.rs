//! Builds fare tables from configuration

use super::category::CategoryRegistry;
use super::config::{AppConfig, FareConfig};
use super::fare::FareTable;
use anyhow::{Context, Result, anyhow, bail};
use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// The categories and fare tables described by one configuration.
#[derive(Debug, Clone)]
pub struct FareCatalog {
    registry: CategoryRegistry,
    fares: Vec<(String, FareTable)>,
}

impl FareCatalog {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let mut registry = CategoryRegistry::new();
        for category in &config.categories {
            registry.register(&category.name, category.parent.as_deref(), category.global)?;
        }

        let mut catalog = FareCatalog {
            registry,
            fares: Vec::with_capacity(config.fares.len()),
        };
        for fare in &config.fares {
            if catalog.get(&fare.id).is_some() {
                bail!("Fare '{}' is defined more than once", fare.id);
            }
            let table = catalog
                .build_fare(fare, config)
                .with_context(|| format!("Failed to build fare '{}'", fare.id))?;
            debug!(id = %fare.id, entries = table.len(), "Built fare table");
            catalog.fares.push((fare.id.clone(), table));
        }
        Ok(catalog)
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn get(&self, id: &str) -> Option<&FareTable> {
        self.fares
            .iter()
            .find(|(fare_id, _)| fare_id == id)
            .map(|(_, table)| table)
    }

    /// Fares in declaration order, with their ids.
    pub fn fares(&self) -> impl Iterator<Item = (&str, &FareTable)> {
        self.fares.iter().map(|(id, table)| (id.as_str(), table))
    }

    fn earlier(&self, id: &str, role: &str) -> Result<&FareTable> {
        self.get(id)
            .ok_or_else(|| anyhow!("{} '{}' must refer to an earlier fare", role, id))
    }

    fn build_fare(&self, fare: &FareConfig, config: &AppConfig) -> Result<FareTable> {
        let notes_source = match &fare.notes_from {
            Some(id) => Some(self.earlier(id, "notes_from")?),
            None => None,
        };

        // Templated fares start from a private derivation so that in-place
        // note appends never reach the shared template.
        let (mut table, inherited_agency_name) = match &fare.template {
            Some(id) => {
                let template = self.earlier(id, "template")?;
                let table = template.derive_with_notes_from(notes_source.unwrap_or(template));
                (table, template.agency_name())
            }
            None => {
                let base = FareTable::new();
                let table = match notes_source {
                    Some(source) => base.derive_with_notes_from(source),
                    None => base,
                };
                (table, None)
            }
        };

        let agency_id = fare
            .agency_id
            .clone()
            .or_else(|| table.agency_id().map(str::to_string));
        let agency_name = fare
            .agency_name
            .clone()
            .or_else(|| inherited_agency_name.map(str::to_string));
        let name = fare
            .name
            .clone()
            .or_else(|| table.name().map(str::to_string));

        let attributes = HashMap::from([
            ("id", fare.id.as_str()),
            ("agency_id", agency_id.as_deref().unwrap_or_default()),
            ("agency_name", agency_name.as_deref().unwrap_or_default()),
            ("name", name.as_deref().unwrap_or_default()),
        ]);
        // The first note on an unannotated table yields a fresh copy, which
        // does not carry the agency name; scalars are applied afterwards.
        for props in &fare.notes {
            let Some(note) = props.generate_note(&attributes) else {
                continue;
            };
            let diverged = match table.add_note(note) {
                Cow::Owned(copy) => Some(copy),
                Cow::Borrowed(_) => None,
            };
            if let Some(copy) = diverged {
                table = copy;
            }
        }

        if let Some(agency_id) = &agency_id {
            table.set_agency(agency_id);
        }
        if let Some(agency_name) = &agency_name {
            table.set_agency_name(agency_name);
        }
        if let Some(name) = &name {
            table.set_name(name);
        }

        let currency = fare.currency.as_ref().unwrap_or(&config.currency);
        let mut priced = HashSet::new();
        for (category_name, cents) in &fare.prices {
            let category = self.registry.get(category_name)?;
            if !priced.insert(category.clone()) {
                bail!("Category '{}' is priced more than once", category);
            }
            table.add_fare_cents(category, currency.clone(), *cents);
        }
        Ok(table)
    }
}

//! Rider-facing price resolution on top of exact fare lookups.
//!
//! [`FareTable::get_fare`] only answers for the exact category asked. This
//! module applies the itinerary policy: fall back through parent categories,
//! then add every global surcharge the table prices.

use super::category::FareCategory;
use super::fare::FareTable;
use super::money::Money;
use anyhow::Result;
use tracing::debug;

/// Where a resolved price came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFare {
    /// The category that was asked for.
    pub requested: FareCategory,
    /// The category whose entry supplied the price.
    pub source: FareCategory,
    pub money: Money,
}

impl ResolvedFare {
    pub fn is_fallback(&self) -> bool {
        self.requested != self.source
    }
}

/// A passenger price plus the surcharges stacked on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub base: ResolvedFare,
    pub surcharges: Vec<(FareCategory, Money)>,
    pub total: Money,
}

/// Walks `category` and its ancestors and returns the first price found.
pub fn resolve_fare(table: &FareTable, category: &FareCategory) -> Option<ResolvedFare> {
    category.lineage().find_map(|candidate| {
        table.get_fare(&candidate).map(|money| ResolvedFare {
            requested: category.clone(),
            source: candidate.clone(),
            money: money.clone(),
        })
    })
}

/// Prices a trip for `category`, adding each of `globals` the table has a
/// price for. Returns `None` when no category in the chain is priced.
///
/// A global category asked for directly is quoted on its own.
pub fn quote<'a>(
    table: &FareTable,
    category: &FareCategory,
    globals: impl IntoIterator<Item = &'a FareCategory>,
) -> Result<Option<Quote>> {
    let Some(base) = resolve_fare(table, category) else {
        debug!(category = %category, "No price in category chain");
        return Ok(None);
    };

    let mut total = base.money.clone();
    let mut surcharges = Vec::new();
    if !category.is_global() {
        // A global ancestor may already have supplied the base price.
        let chain: Vec<FareCategory> = category.lineage().collect();
        for global in globals {
            if !global.is_global() || chain.contains(global) {
                continue;
            }
            if let Some(money) = table.get_fare(global) {
                total = total.checked_add(money)?;
                surcharges.push((global.clone(), money.clone()));
            }
        }
    }

    debug!(
        category = %category,
        source = %base.source,
        surcharges = surcharges.len(),
        total = %total,
        "Resolved quote"
    );
    Ok(Some(Quote {
        base,
        surcharges,
        total,
    }))
}

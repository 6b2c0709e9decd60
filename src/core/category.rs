//! Rider categories and their fallback hierarchy

use anyhow::{Result, anyhow, bail};
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

/// A class of rider a fare can be priced for.
///
/// Each category may name a parent to consult when a fare has no price for
/// it, and may be global: its price is a surcharge added on top of whichever
/// passenger category is selected (a bicycle ticket, for example).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FareCategory {
    Regular,
    Student,
    Senior,
    Bicycle,
    Custom(Arc<CustomCategory>),
}

/// A user-declared category. The parent must exist before the child is built,
/// so a chain can never loop back on itself.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct CustomCategory {
    name: String,
    parent: Option<FareCategory>,
    global: bool,
}

impl FareCategory {
    pub fn custom(name: &str, parent: Option<FareCategory>, global: bool) -> Self {
        FareCategory::Custom(Arc::new(CustomCategory {
            name: name.to_lowercase(),
            parent,
            global,
        }))
    }

    /// The built-in categories, in display order.
    pub fn built_ins() -> [FareCategory; 4] {
        [
            FareCategory::Regular,
            FareCategory::Student,
            FareCategory::Senior,
            FareCategory::Bicycle,
        ]
    }

    pub fn name(&self) -> &str {
        match self {
            FareCategory::Regular => "regular",
            FareCategory::Student => "student",
            FareCategory::Senior => "senior",
            FareCategory::Bicycle => "bicycle",
            FareCategory::Custom(c) => &c.name,
        }
    }

    pub fn parent(&self) -> Option<FareCategory> {
        match self {
            FareCategory::Regular | FareCategory::Bicycle => None,
            FareCategory::Student | FareCategory::Senior => Some(FareCategory::Regular),
            FareCategory::Custom(c) => c.parent.clone(),
        }
    }

    pub fn is_global(&self) -> bool {
        match self {
            FareCategory::Bicycle => true,
            FareCategory::Regular | FareCategory::Student | FareCategory::Senior => false,
            FareCategory::Custom(c) => c.global,
        }
    }

    /// This category followed by each of its ancestors, nearest first.
    pub fn lineage(&self) -> impl Iterator<Item = FareCategory> {
        std::iter::successors(Some(self.clone()), FareCategory::parent)
    }
}

impl Display for FareCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl Serialize for FareCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Name lookup for built-in and configured categories.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    by_name: HashMap<String, FareCategory>,
    order: Vec<FareCategory>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            by_name: HashMap::new(),
            order: Vec::new(),
        };
        for category in FareCategory::built_ins() {
            registry.insert(category);
        }
        registry
    }

    fn insert(&mut self, category: FareCategory) {
        self.by_name
            .insert(category.name().to_string(), category.clone());
        self.order.push(category);
    }

    /// Declares a custom category. Its parent, if any, must already be known.
    pub fn register(
        &mut self,
        name: &str,
        parent: Option<&str>,
        global: bool,
    ) -> Result<FareCategory> {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            bail!("Fare category name must not be empty");
        }
        if self.by_name.contains_key(&key) {
            bail!("Fare category '{}' is already defined", key);
        }
        let parent = match parent {
            Some(p) => Some(self.get(p).map_err(|_| {
                anyhow!(
                    "Parent '{}' of fare category '{}' must be declared before it",
                    p,
                    key
                )
            })?),
            None => None,
        };
        let category = FareCategory::custom(&key, parent, global);
        self.insert(category.clone());
        Ok(category)
    }

    pub fn get(&self, name: &str) -> Result<FareCategory> {
        self.by_name
            .get(&name.trim().to_lowercase())
            .cloned()
            .ok_or_else(|| anyhow!("Unknown fare category: {}", name))
    }

    /// All categories in declaration order, built-ins first.
    pub fn categories(&self) -> &[FareCategory] {
        &self.order
    }

    pub fn globals(&self) -> impl Iterator<Item = &FareCategory> {
        self.order.iter().filter(|c| c.is_global())
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_hierarchy() {
        assert_eq!(FareCategory::Regular.parent(), None);
        assert_eq!(FareCategory::Student.parent(), Some(FareCategory::Regular));
        assert_eq!(FareCategory::Senior.parent(), Some(FareCategory::Regular));
        assert_eq!(FareCategory::Bicycle.parent(), None);

        assert!(FareCategory::Bicycle.is_global());
        assert!(!FareCategory::Regular.is_global());
        assert!(!FareCategory::Student.is_global());
        assert!(!FareCategory::Senior.is_global());
    }

    #[test]
    fn test_lineage_walks_to_root() {
        let youth = FareCategory::custom("youth", Some(FareCategory::Student), false);
        let chain: Vec<String> = youth.lineage().map(|c| c.name().to_string()).collect();
        assert_eq!(chain, vec!["youth", "student", "regular"]);

        let bike: Vec<FareCategory> = FareCategory::Bicycle.lineage().collect();
        assert_eq!(bike, vec![FareCategory::Bicycle]);
    }

    #[test]
    fn test_custom_categories_compare_by_definition() {
        let a = FareCategory::custom("Pet", None, true);
        let b = FareCategory::custom("pet", None, true);
        assert_eq!(a, b);
        assert_eq!(a.name(), "pet");
        assert!(a.is_global());
        assert_ne!(a, FareCategory::custom("pet", None, false));
    }

    #[test]
    fn test_registry_requires_declared_parent() {
        let mut registry = CategoryRegistry::new();
        let youth = registry.register("youth", Some("student"), false).unwrap();
        assert_eq!(youth.parent(), Some(FareCategory::Student));
        assert_eq!(registry.get("YOUTH").unwrap(), youth);

        let err = registry.register("child", Some("toddler"), false).unwrap_err();
        assert!(err.to_string().contains("must be declared before"));

        let err = registry.register("student", None, false).unwrap_err();
        assert!(err.to_string().contains("already defined"));

        assert!(registry.get("nobody").is_err());
    }

    #[test]
    fn test_registry_order_and_globals() {
        let mut registry = CategoryRegistry::new();
        registry.register("pet", None, true).unwrap();
        let names: Vec<&str> = registry.categories().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["regular", "student", "senior", "bicycle", "pet"]);

        let globals: Vec<&str> = registry.globals().map(|c| c.name()).collect();
        assert_eq!(globals, vec!["bicycle", "pet"]);
    }
}

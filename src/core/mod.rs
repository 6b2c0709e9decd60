//! Fare model and the configuration that populates it

pub mod catalog;
pub mod category;
pub mod config;
pub mod fare;
pub mod log;
pub mod money;
pub mod note;
pub mod resolve;

// Re-export main types for cleaner imports
pub use catalog::FareCatalog;
pub use category::{CategoryRegistry, FareCategory};
pub use fare::{FareTable, FareTypeCost};
pub use money::{Currency, Money};
pub use note::{NoteMatcher, NoteProperties};
pub use resolve::{Quote, ResolvedFare, quote, resolve_fare};

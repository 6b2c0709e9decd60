pub mod categories;
pub mod export;
pub mod quote;
pub mod setup;
pub mod show;
pub mod ui;

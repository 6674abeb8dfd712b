//! Shared types for letter statistics: the data model, error type, letter
//! categories, report rendering and command-line settings.

pub mod categories;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

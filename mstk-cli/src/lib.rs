//! CLI library for testing purposes

pub mod validation;

pub use validation::{ValidationContext, validate_context, validate_spreadsheet};

#![forbid(unsafe_code)]
//! Mobile Strings Toolkit.
//!
//! Generates platform localization files from a single translation
//! spreadsheet. Each row of the sheet is one string, one string-array item or
//! one plural form, with a column per language.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mstk::{CsvLoader, Project};
//!
//! // mst.cfg in the project root names the generator and output paths
//! let project = Project::load(".", mstk::DEFAULT_CONFIG_FILE)?;
//! let report = project.generate(&CsvLoader::new("strings.csv"))?;
//! println!("wrote {} files", report.files.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Supported Targets
//!
//! - **Android `strings.xml`**: strings, string arrays and plurals
//! - **Apple `.strings`**: plain strings
//!
//! Existing Android projects can be brought into a spreadsheet with the
//! [`importer`] and [`export`] modules.

pub mod config;
pub mod error;
pub mod export;
pub mod generators;
pub mod importer;
pub mod loader;
pub mod project;
pub mod resources;
pub mod spreadsheet;

// Re-export most used types for easy consumption
pub use crate::{
    config::{Config, DEFAULT_CONFIG_FILE},
    error::Error,
    generators::{EmptyStrings, Generator, GeneratorKind},
    importer::AndroidImporter,
    loader::{CsvLoader, Loader, MemoryLoader},
    project::{GenerationReport, Project, RenderedFile},
    resources::{
        Keyed, PluralStrings, Quantity, Resource, ResourceKind, ResourceSet, ResourceText,
        SimpleString, StringList,
    },
    spreadsheet::Spreadsheet,
};

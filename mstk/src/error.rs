//! All error types for the mstk crate.
//!
//! Every fallible operation (configuration, loading, parsing, merging, generation)
//! returns this error. None of them is recoverable within a run: the caller is
//! expected to abort instead of writing output for a subset of languages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("malformed header: can't find `{column}` column in header [{}]", header.join(", "))]
    MalformedHeader { column: String, header: Vec<String> },

    #[error("unknown language `{language}` for resource `{key}`")]
    UnknownLanguage { key: String, language: String },

    #[error("invalid quantity `{0}`, accepted values are: zero, one, two, few, many, other")]
    InvalidQuantity(String),

    #[error("cannot merge resources with different keys: `{expected}` != `{found}`")]
    KeyMismatch { expected: String, found: String },

    #[error("cannot merge `{key}`: languages [{}] are present on both sides", languages.join(", "))]
    LanguageConflict { key: String, languages: Vec<String> },

    #[error("malformed key `{key}` in row {row}: {reason}")]
    MalformedKey {
        row: usize,
        key: String,
        reason: String,
    },

    #[error("invalid resource: {0}")]
    InvalidResource(String),

    #[error("data source error: {0}")]
    DataSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] quick_xml::Error),

    #[error("CSV error: {0}")]
    CsvParse(#[from] csv::Error),
}

impl Error {
    /// Creates a new configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Creates a new data source error.
    pub fn data_source(message: impl Into<String>) -> Self {
        Error::DataSource(message.into())
    }

    pub(crate) fn unknown_language(key: &str, language: &str) -> Self {
        Error::UnknownLanguage {
            key: key.to_string(),
            language: language.to_string(),
        }
    }
}

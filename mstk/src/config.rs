//! Project configuration.
//!
//! The configuration is a JSON file (`mst.cfg` by default) kept in the project
//! root:
//!
//! ```json
//! {
//!     "generator": "android",
//!     "paths": {
//!         "en": "res/values/strings.xml",
//!         "fr": "res/values-fr/strings.xml"
//!     },
//!     "sorted": true
//! }
//! ```
//!
//! The keys of `paths` are the languages to generate. Optional fields:
//! `sorted` (default `true`), `empty_strings` (`emit` or `omit`, default
//! depends on the generator) and `key_column` (default depends on the
//! generator).

use std::{
    collections::BTreeMap,
    fmt::Display,
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    generators::{EmptyStrings, GeneratorKind},
};

pub const DEFAULT_CONFIG_FILE: &str = "mst.cfg";

fn default_sorted() -> bool {
    true
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    generator: String,
    paths: BTreeMap<String, PathBuf>,
    #[serde(default = "default_sorted")]
    sorted: bool,
    #[serde(default)]
    empty_strings: Option<EmptyStrings>,
    #[serde(default)]
    key_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    root: PathBuf,
    generator: GeneratorKind,
    paths: BTreeMap<String, PathBuf>,
    sorted: bool,
    empty_strings: EmptyStrings,
    key_column: String,
}

impl Config {
    /// Reads `config_file` from `project_root`.
    pub fn load<P: AsRef<Path>>(project_root: P, config_file: &str) -> Result<Self, Error> {
        let root = project_root.as_ref();
        let path = root.join(config_file);
        let content = fs::read_to_string(&path).map_err(|e| {
            Error::configuration(format!(
                "cannot open config file {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration");
        Self::from_json(root, &content)
    }

    /// Parses configuration JSON for a project rooted at `project_root`.
    pub fn from_json<P: AsRef<Path>>(project_root: P, json: &str) -> Result<Self, Error> {
        let raw: RawConfig = serde_json::from_str(json)
            .map_err(|e| Error::configuration(format!("invalid configuration: {}", e)))?;

        let generator = raw.generator.parse::<GeneratorKind>()?;
        if raw.paths.is_empty() {
            return Err(Error::configuration(
                "`paths` must name at least one language",
            ));
        }
        for language in raw.paths.keys() {
            if language.parse::<LanguageIdentifier>().is_err() {
                tracing::warn!(language = %language, "language code is not a valid BCP 47 identifier");
            }
        }

        Ok(Self {
            root: project_root.as_ref().to_path_buf(),
            generator,
            paths: raw.paths,
            sorted: raw.sorted,
            empty_strings: raw
                .empty_strings
                .unwrap_or_else(|| generator.default_empty_strings()),
            key_column: raw
                .key_column
                .unwrap_or_else(|| generator.key_column().to_string()),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn generator(&self) -> GeneratorKind {
        self.generator
    }

    /// Languages to generate, ordered by code.
    pub fn languages(&self) -> Vec<String> {
        self.paths.keys().cloned().collect()
    }

    pub fn sorted(&self) -> bool {
        self.sorted
    }

    pub fn empty_strings(&self) -> EmptyStrings {
        self.empty_strings
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    /// Output file for `language`, resolved against the project root.
    pub fn resource_file_path(&self, language: &str) -> Result<PathBuf, Error> {
        self.paths
            .get(language)
            .map(|path| self.root.join(path))
            .ok_or_else(|| {
                Error::configuration(format!("no output path configured for `{}`", language))
            })
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Config {{ generator: {}, languages: [{}], sorted: {} }}",
            self.generator,
            self.languages().join(", "),
            self.sorted
        )
    }
}

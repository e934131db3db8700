//! Header-driven spreadsheet parser.
//!
//! Row 0 is the header, every following row is data. The header must name a
//! `type` column, the key column of the target platform, one column per
//! requested language and an `options` column. Columns may appear in any order.
//!
//! | type         | android_id  | en       | fr         | options |
//! |--------------|-------------|----------|------------|---------|
//! | string       | greeting    | Hello    | Bonjour    |         |
//! | string-array | planets:0   | Mercury  | Mercure    |         |
//! | plurals      | count:one   | 1 item   | 1 élément  |         |

use std::collections::HashMap;

use lazy_static::lazy_static;
use regex::Regex;

use crate::{
    error::Error,
    resources::{
        PluralStrings, Quantity, Resource, ResourceKind, ResourceText, SimpleString, StringList,
    },
};

lazy_static! {
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

pub const TYPE_COLUMN: &str = "type";
pub const OPTIONS_COLUMN: &str = "options";

/// A parsed spreadsheet with resolved column positions.
#[derive(Debug, Clone)]
pub struct Spreadsheet {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    languages: Vec<String>,
    type_column: usize,
    id_column: usize,
    language_columns: HashMap<String, usize>,
    options_column: usize,
}

impl Spreadsheet {
    /// Splits `data` into header and rows and resolves every required column.
    ///
    /// Fails with [`Error::MalformedHeader`] before any data row is looked at.
    pub fn new<S: AsRef<str>>(
        key_column: &str,
        mut data: Vec<Vec<String>>,
        languages: &[S],
    ) -> Result<Self, Error> {
        let header: Vec<String> = if data.is_empty() {
            Vec::new()
        } else {
            data.remove(0).into_iter().map(|cell| cell.trim().to_string()).collect()
        };

        let find = |column: &str| {
            header
                .iter()
                .position(|cell| cell == column)
                .ok_or_else(|| Error::MalformedHeader {
                    column: column.to_string(),
                    header: header.clone(),
                })
        };

        let type_column = find(TYPE_COLUMN)?;
        let id_column = find(key_column)?;
        let mut language_columns = HashMap::new();
        for language in languages {
            let language = language.as_ref();
            language_columns.insert(language.to_string(), find(language)?);
        }
        let options_column = find(OPTIONS_COLUMN)?;

        Ok(Self {
            header,
            rows: data,
            languages: languages.iter().map(|l| l.as_ref().to_string()).collect(),
            type_column,
            id_column,
            language_columns,
            options_column,
        })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Data rows, header excluded.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn type_column(&self) -> usize {
        self.type_column
    }

    pub fn id_column(&self) -> usize {
        self.id_column
    }

    pub fn language_column(&self, language: &str) -> Option<usize> {
        self.language_columns.get(language).copied()
    }

    pub fn options_column(&self) -> usize {
        self.options_column
    }

    /// All plain strings, one per valid row.
    pub fn extract_strings(&self) -> Result<Vec<SimpleString>, Error> {
        let mut resources = Vec::new();
        for (row_number, row) in self.rows_of(ResourceKind::String) {
            let key = cell(row, self.id_column).trim();
            let mut resource = SimpleString::new(key, &self.languages)?;
            for (language, text) in self.texts(row) {
                resource.set(language, text)?;
            }
            tracing::trace!(row = row_number, key, "string");
            resources.push(resource);
        }
        Ok(resources)
    }

    /// All string arrays. Rows sharing a key are gathered into one resource,
    /// returned in order of the key's first appearance.
    pub fn extract_string_arrays(&self) -> Result<Vec<StringList>, Error> {
        let mut resources = Accumulator::default();
        for (row_number, row) in self.rows_of(ResourceKind::StringArray) {
            let key = parse_indexed_key(row_number, cell(row, self.id_column))?;
            let list = resources.get_or_try_insert(key.key, || {
                StringList::new(key.key, &self.languages)
            })?;
            for (language, text) in self.texts(row) {
                list.set(language, key.index, text)?;
            }
        }
        Ok(resources.into_values())
    }

    /// All plurals. Rows sharing a key are gathered into one resource,
    /// returned in order of the key's first appearance.
    pub fn extract_plural_strings(&self) -> Result<Vec<PluralStrings>, Error> {
        let mut resources = Accumulator::default();
        for (row_number, row) in self.rows_of(ResourceKind::Plurals) {
            let key = parse_quantity_key(row_number, cell(row, self.id_column))?;
            let plural = resources.get_or_try_insert(key.key, || {
                PluralStrings::new(key.key, &self.languages)
            })?;
            for (language, text) in self.texts(row) {
                plural.set(language, key.quantity, text)?;
            }
        }
        Ok(resources.into_values())
    }

    /// Strings, then arrays, then plurals.
    pub fn extract_all(&self) -> Result<Vec<Resource>, Error> {
        let mut resources: Vec<Resource> = Vec::new();
        resources.extend(self.extract_strings()?.into_iter().map(Resource::from));
        resources.extend(self.extract_string_arrays()?.into_iter().map(Resource::from));
        resources.extend(self.extract_plural_strings()?.into_iter().map(Resource::from));
        Ok(resources)
    }

    /// Valid rows of the given kind, with their 1-based position in the sheet
    /// (the header is row 1).
    fn rows_of(&self, kind: ResourceKind) -> impl Iterator<Item = (usize, &Vec<String>)> {
        self.rows
            .iter()
            .enumerate()
            .map(|(index, row)| (index + 2, row))
            .filter(move |(row_number, row)| {
                let row_type = cell(row, self.type_column).trim();
                if row_type != kind.as_str() {
                    if kind == ResourceKind::String && row_type.parse::<ResourceKind>().is_err() {
                        tracing::debug!(row = *row_number, row_type, "skipping row of unknown type");
                    }
                    return false;
                }
                if !self.has_valid_key(row) {
                    tracing::debug!(row = *row_number, "skipping row without key");
                    return false;
                }
                true
            })
    }

    fn has_valid_key(&self, row: &[String]) -> bool {
        !cell(row, self.id_column).trim().is_empty()
    }

    fn options(&self, row: &[String]) -> Vec<String> {
        parse_options(cell(row, self.options_column))
    }

    /// Each language with its text in `row`, carrying the row's options.
    fn texts<'a>(&'a self, row: &'a [String]) -> impl Iterator<Item = (&'a str, ResourceText)> + 'a {
        let options = self.options(row);
        self.languages.iter().map(move |language| {
            let column = self.language_columns[language];
            (
                language.as_str(),
                ResourceText::with_options(cell(row, column), options.clone()),
            )
        })
    }
}

fn cell(row: &[String], column: usize) -> &str {
    row.get(column).map(String::as_str).unwrap_or("")
}

/// Splits an options cell into tags: whitespace is removed and `;` separates.
pub fn parse_options(raw: &str) -> Vec<String> {
    WHITESPACE
        .replace_all(raw, "")
        .split(';')
        .filter(|option| !option.is_empty())
        .map(str::to_string)
        .collect()
}

/// A `key:index` cell of a string-array row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexedKey<'a> {
    pub key: &'a str,
    pub index: usize,
}

/// A `key:quantity` cell of a plurals row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityKey<'a> {
    pub key: &'a str,
    pub quantity: Quantity,
}

fn split_composite<'a>(row: usize, raw: &'a str, form: &str) -> Result<(&'a str, &'a str), Error> {
    let raw = raw.trim();
    let malformed = |reason: String| Error::MalformedKey {
        row,
        key: raw.to_string(),
        reason,
    };
    let (key, suffix) = raw
        .split_once(':')
        .ok_or_else(|| malformed(format!("expected `{}`", form)))?;
    if suffix.contains(':') {
        return Err(malformed(format!("expected a single `:` in `{}`", form)));
    }
    let key = key.trim();
    if key.is_empty() {
        return Err(malformed("empty resource key".to_string()));
    }
    Ok((key, suffix.trim()))
}

pub fn parse_indexed_key(row: usize, raw: &str) -> Result<IndexedKey<'_>, Error> {
    let (key, index) = split_composite(row, raw, "key:index")?;
    let malformed = || Error::MalformedKey {
        row,
        key: raw.trim().to_string(),
        reason: format!("`{}` is not a non-negative integer index", index),
    };
    // `usize::from_str` also takes a leading `+`
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }
    let index = index.parse::<usize>().map_err(|_| malformed())?;
    Ok(IndexedKey { key, index })
}

pub fn parse_quantity_key(row: usize, raw: &str) -> Result<QuantityKey<'_>, Error> {
    let (key, quantity) = split_composite(row, raw, "key:quantity")?;
    Ok(QuantityKey {
        key,
        quantity: quantity.parse()?,
    })
}

/// Key-to-resource map that remembers first-insertion order.
struct Accumulator<T> {
    positions: HashMap<String, usize>,
    values: Vec<T>,
}

impl<T> Default for Accumulator<T> {
    fn default() -> Self {
        Self {
            positions: HashMap::new(),
            values: Vec::new(),
        }
    }
}

impl<T> Accumulator<T> {
    fn get_or_try_insert(
        &mut self,
        key: &str,
        create: impl FnOnce() -> Result<T, Error>,
    ) -> Result<&mut T, Error> {
        let position = match self.positions.get(key) {
            Some(position) => *position,
            None => {
                self.values.push(create()?);
                let position = self.values.len() - 1;
                self.positions.insert(key.to_string(), position);
                position
            }
        };
        Ok(&mut self.values[position])
    }

    fn into_values(self) -> Vec<T> {
        self.values
    }
}

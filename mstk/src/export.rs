//! Writes resources back into the spreadsheet layout.
//!
//! The exported table has the columns `type`, the key column, one column per
//! language and `options`, so it can be loaded again by
//! [`Spreadsheet`](crate::spreadsheet::Spreadsheet).

use std::{collections::BTreeSet, fs::File, io::Write, path::Path};

use crate::{
    error::Error,
    resources::{Keyed, PluralStrings, Quantity, Resource, ResourceKind, ResourceText, SimpleString, StringList},
    spreadsheet::{OPTIONS_COLUMN, TYPE_COLUMN},
};

/// Header row followed by one row per string, array item and plural form.
///
/// Resources keep their order. Plural forms that are empty in every language
/// are left out. Languages a resource does not declare get empty cells.
pub fn to_rows(resources: &[Resource], key_column: &str, languages: &[String]) -> Vec<Vec<String>> {
    let mut header = vec![TYPE_COLUMN.to_string(), key_column.to_string()];
    header.extend(languages.iter().cloned());
    header.push(OPTIONS_COLUMN.to_string());

    let mut rows = vec![header];
    for resource in resources {
        match resource {
            Resource::String(res) => rows.push(string_row(res, languages)),
            Resource::Array(res) => rows.extend(array_rows(res, languages)),
            Resource::Plural(res) => rows.extend(plural_rows(res, languages)),
        }
    }
    rows
}

/// Writes the table produced by [`to_rows`] as comma-separated values.
pub fn write_csv<W: Write>(
    writer: W,
    resources: &[Resource],
    key_column: &str,
    languages: &[String],
) -> Result<(), Error> {
    let mut csv_writer = csv::WriterBuilder::new().flexible(false).from_writer(writer);
    for row in to_rows(resources, key_column, languages) {
        csv_writer.write_record(&row)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn write_csv_file<P: AsRef<Path>>(
    path: P,
    resources: &[Resource],
    key_column: &str,
    languages: &[String],
) -> Result<(), Error> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    write_csv(file, resources, key_column, languages)?;
    tracing::info!(path = %path.display(), resources = resources.len(), "exported spreadsheet");
    Ok(())
}

fn row(kind: ResourceKind, key: String, texts: Vec<Option<&ResourceText>>) -> Vec<String> {
    let options = texts
        .iter()
        .flatten()
        .map(|text| text.options())
        .find(|options| !options.is_empty())
        .map(|options| options.join(";"))
        .unwrap_or_default();

    let mut row = vec![kind.as_str().to_string(), key];
    row.extend(
        texts
            .into_iter()
            .map(|text| text.map(|t| t.as_str().to_string()).unwrap_or_default()),
    );
    row.push(options);
    row
}

fn string_row(resource: &SimpleString, languages: &[String]) -> Vec<String> {
    let texts = languages
        .iter()
        .map(|language| resource.get(language).ok())
        .collect();
    row(ResourceKind::String, resource.key().to_string(), texts)
}

fn array_rows(resource: &StringList, languages: &[String]) -> Vec<Vec<String>> {
    let indices: BTreeSet<usize> = languages
        .iter()
        .filter_map(|language| resource.indexed_items(language).ok())
        .flatten()
        .map(|(index, _)| index)
        .collect();

    indices
        .into_iter()
        .map(|index| {
            let texts = languages
                .iter()
                .map(|language| resource.get(language, index).ok().flatten())
                .collect();
            row(
                ResourceKind::StringArray,
                format!("{}:{}", resource.key(), index),
                texts,
            )
        })
        .collect()
}

fn plural_rows(resource: &PluralStrings, languages: &[String]) -> Vec<Vec<String>> {
    Quantity::ALL
        .iter()
        .filter_map(|quantity| {
            let texts: Vec<Option<&ResourceText>> = languages
                .iter()
                .map(|language| resource.get(language, *quantity).ok())
                .collect();
            if texts.iter().flatten().all(|text| text.is_empty()) {
                return None;
            }
            Some(row(
                ResourceKind::Plurals,
                format!("{}:{}", resource.key(), quantity),
                texts,
            ))
        })
        .collect()
}

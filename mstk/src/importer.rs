//! Reads existing Android `strings.xml` files back into resources.
//!
//! Each file holds one language. Resources found in several files are merged
//! with the disjoint merge of the resource model, and every imported resource
//! ends up declaring every imported language (missing translations are empty).
//! Only direct children of `<resources>` are read: `<string>`,
//! `<string-array>` with `<item>` children and `<plurals>` with
//! `<item quantity="...">` children.

use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
};

use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::Error,
    generators::escape::unescape_apostrophes,
    resources::{Keyed, PluralStrings, Quantity, Resource, ResourceKind, SimpleString, StringList},
};

/// Collects one `strings.xml` per language and imports them together.
#[derive(Debug, Clone, Default)]
pub struct AndroidImporter {
    files: BTreeMap<String, PathBuf>,
}

impl AndroidImporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the file holding the translations for `language`.
    pub fn add_file<P: AsRef<Path>>(&mut self, language: impl Into<String>, path: P) -> &mut Self {
        self.files.insert(language.into(), path.as_ref().to_path_buf());
        self
    }

    pub fn languages(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }

    /// Parses every registered file and merges the results.
    pub fn import(&self) -> Result<Vec<Resource>, Error> {
        let mut per_language = Vec::with_capacity(self.files.len());
        for (language, path) in &self.files {
            let file = File::open(path).map_err(|e| {
                Error::data_source(format!("cannot open {}: {}", path.display(), e))
            })?;
            let resources = parse_strings_xml(BufReader::new(file), language)?;
            tracing::info!(
                language = %language,
                path = %path.display(),
                resources = resources.len(),
                "imported Android resources"
            );
            per_language.push(resources);
        }
        merge_languages(per_language, &self.languages())
    }
}

/// Parses one `strings.xml` document. Every resource declares `language` only.
pub fn parse_strings_xml<R: BufRead>(reader: R, language: &str) -> Result<Vec<Resource>, Error> {
    // Text is not trimmed: whitespace inside a resource body is content.
    // Whitespace between structural elements falls through the catch-all arms.
    let mut xml_reader = Reader::from_reader(reader);

    let mut buf = Vec::new();
    let mut resources = Vec::new();
    let mut in_root = false;

    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if !in_root => {
                if e.name().as_ref() != b"resources" {
                    return Err(Error::InvalidResource(format!(
                        "expected `<resources>` root, found `<{}>`",
                        String::from_utf8_lossy(e.name().as_ref())
                    )));
                }
                in_root = true;
            }
            Event::Start(ref e) => match e.name().as_ref() {
                b"string" => {
                    let key = name_attribute(e)?;
                    let text = read_text(&mut xml_reader)?;
                    let mut resource = SimpleString::new(key, [language])?;
                    resource.set(language, unescape_apostrophes(&text))?;
                    resources.push(resource.into());
                }
                b"string-array" => {
                    let key = name_attribute(e)?;
                    resources.push(read_string_array(&mut xml_reader, key, language)?.into());
                }
                b"plurals" => {
                    let key = name_attribute(e)?;
                    resources.push(read_plurals(&mut xml_reader, key, language)?.into());
                }
                other => {
                    tracing::debug!(
                        element = %String::from_utf8_lossy(other),
                        "skipping unsupported element"
                    );
                    read_text(&mut xml_reader)?;
                }
            },
            Event::Empty(ref e) if in_root && e.name().as_ref() == b"string" => {
                let key = name_attribute(e)?;
                resources.push(SimpleString::new(key, [language])?.into());
            }
            Event::End(ref e) if e.name().as_ref() == b"resources" => in_root = false,
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }
    Ok(resources)
}

/// Same as [`parse_strings_xml`] for a document held in memory.
pub fn parse_str(xml: &str, language: &str) -> Result<Vec<Resource>, Error> {
    parse_strings_xml(xml.as_bytes(), language)
}

/// Merges single-language resource lists into resources that declare all of
/// `languages`. Order follows the first appearance of each resource.
pub fn merge_languages(
    per_language: Vec<Vec<Resource>>,
    languages: &[String],
) -> Result<Vec<Resource>, Error> {
    let mut positions: HashMap<(ResourceKind, String), usize> = HashMap::new();
    let mut merged: Vec<Resource> = Vec::new();

    for resource in per_language.into_iter().flatten() {
        let id = (resource.kind(), resource.key().to_string());
        match positions.get(&id) {
            Some(position) => merged[*position].merge(resource)?,
            None => {
                positions.insert(id, merged.len());
                merged.push(resource);
            }
        }
    }

    for resource in &mut merged {
        let missing: Vec<String> = languages
            .iter()
            .filter(|language| !resource.languages().contains(language.as_str()))
            .cloned()
            .collect();
        for language in missing {
            tracing::debug!(key = resource.key(), language = %language, "translation missing");
            let placeholder = blank(resource.kind(), resource.key(), &language)?;
            resource.merge(placeholder)?;
        }
    }
    Ok(merged)
}

fn blank(kind: ResourceKind, key: &str, language: &str) -> Result<Resource, Error> {
    Ok(match kind {
        ResourceKind::String => SimpleString::new(key, [language])?.into(),
        ResourceKind::StringArray => StringList::new(key, [language])?.into(),
        ResourceKind::Plurals => PluralStrings::new(key, [language])?.into(),
    })
}

fn attribute(e: &BytesStart, name: &str) -> Result<Option<String>, Error> {
    let attr = e
        .try_get_attribute(name)
        .map_err(quick_xml::Error::from)?;
    match attr {
        Some(attr) => Ok(Some(attr.unescape_value()?.to_string())),
        None => Ok(None),
    }
}

fn name_attribute(e: &BytesStart) -> Result<String, Error> {
    attribute(e, "name")?.ok_or_else(|| {
        Error::InvalidResource(format!(
            "`<{}>` tag missing `name`",
            String::from_utf8_lossy(e.name().as_ref())
        ))
    })
}

/// Reads the text of the element whose start tag was just consumed, up to and
/// including its end tag. Inline child elements (`<b>`, `<xliff:g>`) are kept
/// as markup in the returned text.
fn read_text<R: BufRead>(xml_reader: &mut Reader<R>) -> Result<String, Error> {
    let mut buf = Vec::new();
    let mut text = String::new();
    let mut depth = 0usize;
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Text(e) => text.push_str(&e.unescape()?),
            Event::CData(e) => text.push_str(&String::from_utf8_lossy(&e)),
            Event::Start(e) => {
                depth += 1;
                text.push('<');
                text.push_str(&String::from_utf8_lossy(&e));
                text.push('>');
            }
            Event::Empty(e) => {
                text.push('<');
                text.push_str(&String::from_utf8_lossy(&e));
                text.push_str("/>");
            }
            Event::End(_) if depth == 0 => break,
            Event::End(e) => {
                depth -= 1;
                text.push_str("</");
                text.push_str(&String::from_utf8_lossy(e.name().as_ref()));
                text.push('>');
            }
            Event::Eof => {
                return Err(Error::InvalidResource(
                    "unexpected end of document".to_string(),
                ));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(text)
}

fn read_string_array<R: BufRead>(
    xml_reader: &mut Reader<R>,
    key: String,
    language: &str,
) -> Result<StringList, Error> {
    let mut resource = StringList::new(key, [language])?;
    let mut buf = Vec::new();
    let mut index = 0;
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                let text = read_text(xml_reader)?;
                resource.set(language, index, unescape_apostrophes(&text))?;
                index += 1;
            }
            Event::Empty(ref e) if e.name().as_ref() == b"item" => {
                resource.set(language, index, "")?;
                index += 1;
            }
            Event::Start(_) => {
                read_text(xml_reader)?;
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::InvalidResource(format!(
                    "unexpected end of document in string-array `{}`",
                    resource.key()
                )));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(resource)
}

fn read_plurals<R: BufRead>(
    xml_reader: &mut Reader<R>,
    key: String,
    language: &str,
) -> Result<PluralStrings, Error> {
    let mut resource = PluralStrings::new(key, [language])?;
    let mut buf = Vec::new();
    loop {
        match xml_reader.read_event_into(&mut buf)? {
            Event::Start(ref e) if e.name().as_ref() == b"item" => {
                let quantity = attribute(e, "quantity")?;
                let text = read_text(xml_reader)?;
                if let Some(quantity) = plural_quantity(resource.key(), quantity) {
                    resource.set(language, quantity, unescape_apostrophes(&text))?;
                }
            }
            Event::Start(_) => {
                read_text(xml_reader)?;
            }
            Event::End(_) => break,
            Event::Eof => {
                return Err(Error::InvalidResource(format!(
                    "unexpected end of document in plurals `{}`",
                    resource.key()
                )));
            }
            _ => {}
        }
        buf.clear();
    }
    Ok(resource)
}

fn plural_quantity(key: &str, quantity: Option<String>) -> Option<Quantity> {
    match quantity.as_deref().map(str::parse::<Quantity>) {
        Some(Ok(quantity)) => Some(quantity),
        _ => {
            tracing::warn!(key, quantity = ?quantity, "skipping plural item with invalid quantity");
            None
        }
    }
}

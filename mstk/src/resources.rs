//! Language-keyed resource model.
//!
//! The spreadsheet parser builds these; generators read them.
//! A resource owns one key and the translations of that key for a fixed set
//! of languages declared at construction.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt::Display,
    ops::Deref,
    str::FromStr,
};

use unicode_normalization::UnicodeNormalization;

use crate::error::Error;

/// Text of a single translation together with the row options it came with.
///
/// Options are free-form tags (formatting hints and the like) that generators
/// may look at. They are ignored by equality.
#[derive(Debug, Clone, Default, Eq)]
pub struct ResourceText {
    text: String,
    options: Vec<String>,
}

impl ResourceText {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options(text: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            text: text.into(),
            options,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    fn normalized(self) -> Self {
        Self {
            text: self.text.nfc().collect(),
            options: self.options,
        }
    }
}

impl PartialEq for ResourceText {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl PartialEq<str> for ResourceText {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl Deref for ResourceText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.text
    }
}

impl From<&str> for ResourceText {
    fn from(value: &str) -> Self {
        ResourceText::new(value)
    }
}

impl From<String> for ResourceText {
    fn from(value: String) -> Self {
        ResourceText::new(value)
    }
}

impl Display for ResourceText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Anything identified by a resource key.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// The kind of resource a spreadsheet row feeds, named as in the `type` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    String,
    StringArray,
    Plurals,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::String => "string",
            ResourceKind::StringArray => "string-array",
            ResourceKind::Plurals => "plurals",
        }
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "string" => Ok(ResourceKind::String),
            "string-array" => Ok(ResourceKind::StringArray),
            "plurals" => Ok(ResourceKind::Plurals),
            other => Err(Error::InvalidResource(format!(
                "unknown resource type `{}`",
                other
            ))),
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Plural quantity categories, in the order generators emit them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quantity {
    Zero,
    One,
    Two,
    Few,
    Many,
    Other,
}

impl Quantity {
    pub const ALL: [Quantity; 6] = [
        Quantity::Zero,
        Quantity::One,
        Quantity::Two,
        Quantity::Few,
        Quantity::Many,
        Quantity::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quantity::Zero => "zero",
            Quantity::One => "one",
            Quantity::Two => "two",
            Quantity::Few => "few",
            Quantity::Many => "many",
            Quantity::Other => "other",
        }
    }
}

impl FromStr for Quantity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "zero" => Ok(Quantity::Zero),
            "one" => Ok(Quantity::One),
            "two" => Ok(Quantity::Two),
            "few" => Ok(Quantity::Few),
            "many" => Ok(Quantity::Many),
            "other" => Ok(Quantity::Other),
            _ => Err(Error::InvalidQuantity(s.to_string())),
        }
    }
}

impl Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn validate_key(key: String) -> Result<String, Error> {
    if key.trim().is_empty() {
        return Err(Error::InvalidResource(
            "resource key must not be empty".to_string(),
        ));
    }
    Ok(key)
}

fn declare<L, S, T>(languages: L, empty: impl Fn() -> T) -> BTreeMap<String, T>
where
    L: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    languages
        .into_iter()
        .map(|lang| (lang.as_ref().to_string(), empty()))
        .collect()
}

// Both sides must share the key and have no language in common.
fn check_merge<T, U>(
    key: &str,
    ours: &BTreeMap<String, T>,
    other_key: &str,
    theirs: &BTreeMap<String, U>,
) -> Result<(), Error> {
    if key != other_key {
        return Err(Error::KeyMismatch {
            expected: key.to_string(),
            found: other_key.to_string(),
        });
    }
    let common: Vec<String> = theirs
        .keys()
        .filter(|lang| ours.contains_key(*lang))
        .cloned()
        .collect();
    if !common.is_empty() {
        return Err(Error::LanguageConflict {
            key: key.to_string(),
            languages: common,
        });
    }
    Ok(())
}

/// A plain string resource with one text per language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleString {
    key: String,
    strings: BTreeMap<String, ResourceText>,
}

impl SimpleString {
    /// Creates a string resource; every language starts with empty text.
    pub fn new<L, S>(key: impl Into<String>, languages: L) -> Result<Self, Error>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            key: validate_key(key.into())?,
            strings: declare(languages, ResourceText::default),
        })
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.strings.keys().map(String::as_str)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.strings.contains_key(language)
    }

    pub fn set(&mut self, language: &str, text: impl Into<ResourceText>) -> Result<(), Error> {
        match self.strings.get_mut(language) {
            Some(slot) => {
                *slot = text.into().normalized();
                Ok(())
            }
            None => Err(Error::unknown_language(&self.key, language)),
        }
    }

    pub fn get(&self, language: &str) -> Result<&ResourceText, Error> {
        self.strings
            .get(language)
            .ok_or_else(|| Error::unknown_language(&self.key, language))
    }

    /// Moves the languages of `other` into this resource.
    pub fn merge(&mut self, other: SimpleString) -> Result<(), Error> {
        check_merge(&self.key, &self.strings, &other.key, &other.strings)?;
        self.strings.extend(other.strings);
        Ok(())
    }
}

impl Keyed for SimpleString {
    fn key(&self) -> &str {
        &self.key
    }
}

/// An ordered list of strings per language. Slots are addressed by index and
/// need not be contiguous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringList {
    key: String,
    arrays: BTreeMap<String, BTreeMap<usize, ResourceText>>,
}

impl StringList {
    pub fn new<L, S>(key: impl Into<String>, languages: L) -> Result<Self, Error>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            key: validate_key(key.into())?,
            arrays: declare(languages, BTreeMap::new),
        })
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.arrays.keys().map(String::as_str)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.arrays.contains_key(language)
    }

    fn array(&self, language: &str) -> Result<&BTreeMap<usize, ResourceText>, Error> {
        self.arrays
            .get(language)
            .ok_or_else(|| Error::unknown_language(&self.key, language))
    }

    pub fn set(
        &mut self,
        language: &str,
        index: usize,
        text: impl Into<ResourceText>,
    ) -> Result<(), Error> {
        match self.arrays.get_mut(language) {
            Some(array) => {
                array.insert(index, text.into().normalized());
                Ok(())
            }
            None => Err(Error::unknown_language(&self.key, language)),
        }
    }

    /// Returns the text at `index`, or `None` when the slot was never populated.
    pub fn get(&self, language: &str, index: usize) -> Result<Option<&ResourceText>, Error> {
        Ok(self.array(language)?.get(&index))
    }

    /// All populated slots ordered by index.
    pub fn items(&self, language: &str) -> Result<Vec<&ResourceText>, Error> {
        Ok(self.array(language)?.values().collect())
    }

    /// Populated slots with their indexes, ordered by index.
    pub fn indexed_items(&self, language: &str) -> Result<Vec<(usize, &ResourceText)>, Error> {
        Ok(self
            .array(language)?
            .iter()
            .map(|(index, text)| (*index, text))
            .collect())
    }

    pub fn size(&self, language: &str) -> Result<usize, Error> {
        Ok(self.array(language)?.len())
    }

    pub fn merge(&mut self, other: StringList) -> Result<(), Error> {
        check_merge(&self.key, &self.arrays, &other.key, &other.arrays)?;
        self.arrays.extend(other.arrays);
        Ok(())
    }
}

impl Keyed for StringList {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Quantity strings. All six categories exist for every language and default
/// to empty text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluralStrings {
    key: String,
    quantities: BTreeMap<String, BTreeMap<Quantity, ResourceText>>,
}

impl PluralStrings {
    pub fn new<L, S>(key: impl Into<String>, languages: L) -> Result<Self, Error>
    where
        L: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self {
            key: validate_key(key.into())?,
            quantities: declare(languages, || {
                Quantity::ALL
                    .iter()
                    .map(|quantity| (*quantity, ResourceText::default()))
                    .collect()
            }),
        })
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.quantities.keys().map(String::as_str)
    }

    pub fn has_language(&self, language: &str) -> bool {
        self.quantities.contains_key(language)
    }

    pub fn set(
        &mut self,
        language: &str,
        quantity: Quantity,
        text: impl Into<ResourceText>,
    ) -> Result<(), Error> {
        match self.quantities.get_mut(language) {
            Some(forms) => {
                forms.insert(quantity, text.into().normalized());
                Ok(())
            }
            None => Err(Error::unknown_language(&self.key, language)),
        }
    }

    /// Same as [`PluralStrings::set`] with the category given by name.
    pub fn set_str(
        &mut self,
        language: &str,
        quantity: &str,
        text: impl Into<ResourceText>,
    ) -> Result<(), Error> {
        let quantity = quantity.parse::<Quantity>()?;
        self.set(language, quantity, text)
    }

    pub fn get(&self, language: &str, quantity: Quantity) -> Result<&ResourceText, Error> {
        let forms = self.quantities(language)?;
        // every category is populated at construction
        Ok(&forms[&quantity])
    }

    /// All six categories for `language`, in declaration order.
    pub fn quantities(&self, language: &str) -> Result<&BTreeMap<Quantity, ResourceText>, Error> {
        self.quantities
            .get(language)
            .ok_or_else(|| Error::unknown_language(&self.key, language))
    }

    pub fn merge(&mut self, other: PluralStrings) -> Result<(), Error> {
        check_merge(&self.key, &self.quantities, &other.key, &other.quantities)?;
        self.quantities.extend(other.quantities);
        Ok(())
    }
}

impl Keyed for PluralStrings {
    fn key(&self) -> &str {
        &self.key
    }
}

/// Any of the three resource variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resource {
    String(SimpleString),
    Array(StringList),
    Plural(PluralStrings),
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        match self {
            Resource::String(_) => ResourceKind::String,
            Resource::Array(_) => ResourceKind::StringArray,
            Resource::Plural(_) => ResourceKind::Plurals,
        }
    }

    pub fn languages(&self) -> BTreeSet<&str> {
        match self {
            Resource::String(res) => res.languages().collect(),
            Resource::Array(res) => res.languages().collect(),
            Resource::Plural(res) => res.languages().collect(),
        }
    }

    /// Merges two resources of the same kind.
    pub fn merge(&mut self, other: Resource) -> Result<(), Error> {
        match (self, other) {
            (Resource::String(ours), Resource::String(theirs)) => ours.merge(theirs),
            (Resource::Array(ours), Resource::Array(theirs)) => ours.merge(theirs),
            (Resource::Plural(ours), Resource::Plural(theirs)) => ours.merge(theirs),
            (ours, theirs) => Err(Error::InvalidResource(format!(
                "cannot merge {} `{}` with {} `{}`",
                ours.kind(),
                ours.key(),
                theirs.kind(),
                theirs.key()
            ))),
        }
    }
}

impl Keyed for Resource {
    fn key(&self) -> &str {
        match self {
            Resource::String(res) => res.key(),
            Resource::Array(res) => res.key(),
            Resource::Plural(res) => res.key(),
        }
    }
}

impl Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let languages = self.languages().into_iter().collect::<Vec<_>>();
        write!(
            f,
            "{} `{}` [{}]",
            self.kind(),
            self.key(),
            languages.join(", ")
        )
    }
}

impl From<SimpleString> for Resource {
    fn from(value: SimpleString) -> Self {
        Resource::String(value)
    }
}

impl From<StringList> for Resource {
    fn from(value: StringList) -> Self {
        Resource::Array(value)
    }
}

impl From<PluralStrings> for Resource {
    fn from(value: PluralStrings) -> Self {
        Resource::Plural(value)
    }
}

/// Resources handed to a generator, partitioned by kind.
///
/// Each partition keeps insertion order. When `sorted` is set, iteration
/// within a partition is by ascending key instead.
#[derive(Debug, Clone, Default)]
pub struct ResourceSet {
    strings: Vec<SimpleString>,
    arrays: Vec<StringList>,
    plurals: Vec<PluralStrings>,
    sorted: bool,
}

impl ResourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    pub fn add(&mut self, resource: impl Into<Resource>) {
        match resource.into() {
            Resource::String(res) => self.strings.push(res),
            Resource::Array(res) => self.arrays.push(res),
            Resource::Plural(res) => self.plurals.push(res),
        }
    }

    pub fn strings(&self) -> Vec<&SimpleString> {
        ordered(&self.strings, self.sorted)
    }

    pub fn arrays(&self) -> Vec<&StringList> {
        ordered(&self.arrays, self.sorted)
    }

    pub fn plurals(&self) -> Vec<&PluralStrings> {
        ordered(&self.plurals, self.sorted)
    }

    pub fn len(&self) -> usize {
        self.strings.len() + self.arrays.len() + self.plurals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Extend<Resource> for ResourceSet {
    fn extend<T: IntoIterator<Item = Resource>>(&mut self, iter: T) {
        for resource in iter {
            self.add(resource);
        }
    }
}

impl FromIterator<Resource> for ResourceSet {
    fn from_iter<T: IntoIterator<Item = Resource>>(iter: T) -> Self {
        let mut set = ResourceSet::new();
        set.extend(iter);
        set
    }
}

fn ordered<T: Keyed>(items: &[T], sorted: bool) -> Vec<&T> {
    let mut refs: Vec<&T> = items.iter().collect();
    if sorted {
        refs.sort_by(|a, b| a.key().cmp(b.key()));
    }
    refs
}

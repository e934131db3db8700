//! Platform generators.
//!
//! A generator turns a [`ResourceSet`] into one document per language. All
//! variants share the [`Generator`] contract and differ only in serialization:
//!
//! - [`AndroidGenerator`]: Android `strings.xml`, assembled as markup text
//! - [`AndroidXmlGenerator`]: Android `strings.xml`, built as an element tree
//! - [`AppleGenerator`]: Apple `.strings` key-value pairs

pub mod android;
pub mod android_xml;
pub mod apple;
pub mod escape;

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::Deserialize;
use unicode_normalization::UnicodeNormalization;

pub use android::AndroidGenerator;
pub use android_xml::AndroidXmlGenerator;
pub use apple::AppleGenerator;

use crate::{
    error::Error,
    resources::{Keyed, PluralStrings, Quantity, ResourceSet, ResourceText, SimpleString, StringList},
};

/// What to do with a plain string whose translation is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyStrings {
    /// Write the entry with empty content.
    Emit,
    /// Leave the entry out of the document.
    Omit,
}

impl FromStr for EmptyStrings {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emit" => Ok(EmptyStrings::Emit),
            "omit" => Ok(EmptyStrings::Omit),
            other => Err(Error::configuration(format!(
                "unknown empty string policy `{}`. Allowed: emit, omit",
                other
            ))),
        }
    }
}

/// Serializer for one target platform.
///
/// `generate` drives the other methods: it resets the generator with `init`,
/// feeds strings, then arrays, then plurals, and finally calls `serialize`.
/// A generator can be reused for any number of languages.
pub trait Generator {
    /// Drops everything produced for the previous document.
    fn init(&mut self);

    fn add_string(&mut self, resource: &SimpleString, language: &str) -> Result<(), Error>;

    fn add_string_array(&mut self, resource: &StringList, language: &str) -> Result<(), Error>;

    fn add_quantity_string(
        &mut self,
        resource: &PluralStrings,
        language: &str,
    ) -> Result<(), Error>;

    /// Renders the document built since the last `init`.
    fn serialize(&mut self) -> Result<String, Error>;

    /// Produces the complete document for `language`, normalized to NFC.
    fn generate(&mut self, resources: &ResourceSet, language: &str) -> Result<String, Error> {
        self.init();
        for resource in resources.strings() {
            self.add_string(resource, language)?;
        }
        for resource in resources.arrays() {
            self.add_string_array(resource, language)?;
        }
        for resource in resources.plurals() {
            self.add_quantity_string(resource, language)?;
        }
        let document = self.serialize()?;
        Ok(document.nfc().collect())
    }
}

/// Text of a plain string for `language`, or `None` when the policy drops it.
pub(crate) fn string_text<'a>(
    resource: &'a SimpleString,
    language: &str,
    policy: EmptyStrings,
) -> Result<Option<&'a ResourceText>, Error> {
    let text = resource.get(language)?;
    if text.is_empty() && policy == EmptyStrings::Omit {
        tracing::debug!(key = resource.key(), language, "omitting empty string");
        return Ok(None);
    }
    Ok(Some(text))
}

/// Non-empty array items in index order. An empty result means the whole
/// array is left out of the document.
pub(crate) fn array_items<'a>(
    resource: &'a StringList,
    language: &str,
) -> Result<Vec<&'a ResourceText>, Error> {
    let items: Vec<&ResourceText> = resource
        .items(language)?
        .into_iter()
        .filter(|text| !text.is_empty())
        .collect();
    if items.is_empty() {
        tracing::debug!(key = resource.key(), language, "omitting empty string array");
    }
    Ok(items)
}

/// Non-empty plural forms in category order. An empty result means the whole
/// plural is left out of the document.
pub(crate) fn plural_items<'a>(
    resource: &'a PluralStrings,
    language: &str,
) -> Result<Vec<(Quantity, &'a ResourceText)>, Error> {
    let items: Vec<(Quantity, &ResourceText)> = resource
        .quantities(language)?
        .iter()
        .filter(|(_, text)| !text.is_empty())
        .map(|(quantity, text)| (*quantity, text))
        .collect();
    if items.is_empty() {
        tracing::debug!(key = resource.key(), language, "omitting empty plurals");
    }
    Ok(items)
}

/// All available generators, as named in the project configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratorKind {
    /// Android `strings.xml` written as markup text.
    Android,
    /// Android `strings.xml` written from an element tree.
    AndroidXml,
    /// Apple `.strings`.
    Apple,
}

impl GeneratorKind {
    pub const ALL: [GeneratorKind; 3] = [
        GeneratorKind::Android,
        GeneratorKind::AndroidXml,
        GeneratorKind::Apple,
    ];

    /// Spreadsheet column holding the resource keys for this platform.
    pub fn key_column(&self) -> &'static str {
        match self {
            GeneratorKind::Android | GeneratorKind::AndroidXml => "android_id",
            GeneratorKind::Apple => "ios_id",
        }
    }

    pub fn default_empty_strings(&self) -> EmptyStrings {
        match self {
            GeneratorKind::Android => EmptyStrings::Emit,
            GeneratorKind::AndroidXml | GeneratorKind::Apple => EmptyStrings::Omit,
        }
    }

    /// Creates a generator with the platform's default empty string policy.
    pub fn create(&self) -> Box<dyn Generator> {
        self.create_with(self.default_empty_strings())
    }

    pub fn create_with(&self, empty_strings: EmptyStrings) -> Box<dyn Generator> {
        match self {
            GeneratorKind::Android => Box::new(AndroidGenerator::new(empty_strings)),
            GeneratorKind::AndroidXml => Box::new(AndroidXmlGenerator::new(empty_strings)),
            GeneratorKind::Apple => Box::new(AppleGenerator::new(empty_strings)),
        }
    }
}

impl Display for GeneratorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            GeneratorKind::Android => write!(f, "android"),
            GeneratorKind::AndroidXml => write!(f, "android_xml"),
            GeneratorKind::Apple => write!(f, "ios"),
        }
    }
}

/// Accepts `android`, `android_xml` and `ios` (alias `apple`), ignoring case.
impl FromStr for GeneratorKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "android" => Ok(GeneratorKind::Android),
            "android_xml" | "android-xml" => Ok(GeneratorKind::AndroidXml),
            "ios" | "apple" => Ok(GeneratorKind::Apple),
            other => {
                let allowed = GeneratorKind::ALL
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                Err(Error::configuration(format!(
                    "unknown generator requested: `{}`. Allowed: {}",
                    other, allowed
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::Resource;

    fn sample_set() -> ResourceSet {
        let mut greeting = SimpleString::new("greeting", ["en", "fr"]).unwrap();
        greeting.set("en", "Hello").unwrap();
        greeting.set("fr", "Bonjour").unwrap();
        let mut farewell = SimpleString::new("farewell", ["en", "fr"]).unwrap();
        farewell.set("en", "Bye").unwrap();
        let mut count = PluralStrings::new("count", ["en", "fr"]).unwrap();
        count.set("en", Quantity::One, "1 item").unwrap();
        count.set("fr", Quantity::Other, "%d éléments").unwrap();
        vec![
            Resource::from(greeting),
            Resource::from(farewell),
            Resource::from(count),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_generator_kind_from_str() {
        assert_eq!(
            "android".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::Android
        );
        assert_eq!(
            "ANDROID_XML".parse::<GeneratorKind>().unwrap(),
            GeneratorKind::AndroidXml
        );
        assert_eq!("ios".parse::<GeneratorKind>().unwrap(), GeneratorKind::Apple);
        assert_eq!(" apple ".parse::<GeneratorKind>().unwrap(), GeneratorKind::Apple);
        let err = "windows".parse::<GeneratorKind>().unwrap_err();
        assert!(err.to_string().contains("android, android_xml, ios"));
    }

    #[test]
    fn test_generator_kind_display_round_trips() {
        for kind in GeneratorKind::ALL {
            assert_eq!(kind.to_string().parse::<GeneratorKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_key_columns() {
        assert_eq!(GeneratorKind::Android.key_column(), "android_id");
        assert_eq!(GeneratorKind::AndroidXml.key_column(), "android_id");
        assert_eq!(GeneratorKind::Apple.key_column(), "ios_id");
    }

    #[test]
    fn test_empty_strings_from_str() {
        assert_eq!("emit".parse::<EmptyStrings>().unwrap(), EmptyStrings::Emit);
        assert_eq!(" Omit".parse::<EmptyStrings>().unwrap(), EmptyStrings::Omit);
        assert!("drop".parse::<EmptyStrings>().is_err());
    }

    #[test]
    fn test_languages_do_not_leak_between_documents() {
        let set = sample_set();
        for kind in GeneratorKind::ALL {
            let mut generator = kind.create();
            let en = generator.generate(&set, "en").unwrap();
            let fr = generator.generate(&set, "fr").unwrap();
            assert!(en.contains("Hello"), "{kind}: {en}");
            assert!(!en.contains("Bonjour"), "{kind}: {en}");
            assert!(fr.contains("Bonjour"), "{kind}: {fr}");
            assert!(!fr.contains("Hello"), "{kind}: {fr}");
            // same language twice gives the same document
            assert_eq!(generator.generate(&set, "en").unwrap(), en);
        }
    }

    #[test]
    fn test_unknown_language_fails_generation() {
        let set = sample_set();
        let mut generator = GeneratorKind::AndroidXml.create();
        assert!(matches!(
            generator.generate(&set, "de"),
            Err(Error::UnknownLanguage { .. })
        ));
    }

    #[test]
    fn test_plural_items_keep_category_order() {
        let mut plural = PluralStrings::new("count", ["en"]).unwrap();
        plural.set("en", Quantity::Other, "many things").unwrap();
        plural.set("en", Quantity::Zero, "nothing").unwrap();
        plural.set("en", Quantity::Few, "a few").unwrap();
        let items = plural_items(&plural, "en").unwrap();
        let order: Vec<Quantity> = items.iter().map(|(q, _)| *q).collect();
        assert_eq!(order, vec![Quantity::Zero, Quantity::Few, Quantity::Other]);
    }

    #[test]
    fn test_array_items_skip_empty() {
        let mut list = StringList::new("list", ["en"]).unwrap();
        list.set("en", 0, "A").unwrap();
        list.set("en", 1, "").unwrap();
        list.set("en", 2, "C").unwrap();
        let items: Vec<&str> = array_items(&list, "en")
            .unwrap()
            .into_iter()
            .map(|t| t.as_str())
            .collect();
        assert_eq!(items, vec!["A", "C"]);
    }
}

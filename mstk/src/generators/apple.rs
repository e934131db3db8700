//! Apple `.strings` generator.
//!
//! The format only knows `"key" = "value";` pairs, so string arrays and
//! plurals produce nothing.

use super::{EmptyStrings, Generator, escape::escape_quotes, string_text};
use crate::{
    error::Error,
    resources::{Keyed, PluralStrings, SimpleString, StringList},
};

#[derive(Debug, Clone)]
pub struct AppleGenerator {
    lines: Vec<String>,
    empty_strings: EmptyStrings,
}

impl AppleGenerator {
    pub fn new(empty_strings: EmptyStrings) -> Self {
        Self {
            lines: Vec::new(),
            empty_strings,
        }
    }
}

impl Default for AppleGenerator {
    fn default() -> Self {
        Self::new(EmptyStrings::Omit)
    }
}

impl Generator for AppleGenerator {
    fn init(&mut self) {
        self.lines.clear();
    }

    fn add_string(&mut self, resource: &SimpleString, language: &str) -> Result<(), Error> {
        if let Some(text) = string_text(resource, language, self.empty_strings)? {
            self.lines.push(format!(
                "\"{}\" = \"{}\";",
                escape_quotes(resource.key()),
                escape_quotes(text)
            ));
        }
        Ok(())
    }

    fn add_string_array(&mut self, resource: &StringList, language: &str) -> Result<(), Error> {
        tracing::trace!(key = resource.key(), language, "string arrays are not supported in .strings");
        Ok(())
    }

    fn add_quantity_string(
        &mut self,
        resource: &PluralStrings,
        language: &str,
    ) -> Result<(), Error> {
        tracing::trace!(key = resource.key(), language, "plurals are not supported in .strings");
        Ok(())
    }

    fn serialize(&mut self) -> Result<String, Error> {
        let mut document = self.lines.join("\n");
        if !document.is_empty() {
            document.push('\n');
        }
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Quantity, Resource, ResourceSet};

    #[test]
    fn test_pairs_only() {
        let mut greeting = SimpleString::new("greeting", ["en"]).unwrap();
        greeting.set("en", "Hello").unwrap();
        let mut farewell = SimpleString::new("farewell", ["en"]).unwrap();
        farewell.set("en", "Bye").unwrap();
        let mut list = StringList::new("list", ["en"]).unwrap();
        list.set("en", 0, "A").unwrap();
        let mut count = PluralStrings::new("count", ["en"]).unwrap();
        count.set("en", Quantity::One, "1 item").unwrap();

        let set: ResourceSet = vec![
            Resource::from(greeting),
            Resource::from(list),
            Resource::from(farewell),
            Resource::from(count),
        ]
        .into_iter()
        .collect();

        let output = AppleGenerator::default().generate(&set, "en").unwrap();
        assert_eq!(output, "\"greeting\" = \"Hello\";\n\"farewell\" = \"Bye\";\n");

        let sorted = set.with_sorted(true);
        let output = AppleGenerator::default().generate(&sorted, "en").unwrap();
        assert_eq!(output, "\"farewell\" = \"Bye\";\n\"greeting\" = \"Hello\";\n");
    }

    #[test]
    fn test_quotes_are_escaped() {
        let mut quote = SimpleString::new("quote", ["en"]).unwrap();
        quote.set("en", r#"Say "cheese""#).unwrap();
        let set: ResourceSet = vec![Resource::from(quote)].into_iter().collect();
        let output = AppleGenerator::default().generate(&set, "en").unwrap();
        assert_eq!(output, "\"quote\" = \"Say \\\"cheese\\\"\";\n");
    }

    #[test]
    fn test_trailing_backslash_keeps_line_terminated() {
        let mut path = SimpleString::new("path", ["en"]).unwrap();
        path.set("en", r"C:\").unwrap();
        let set: ResourceSet = vec![Resource::from(path)].into_iter().collect();
        let output = AppleGenerator::default().generate(&set, "en").unwrap();
        assert_eq!(output, "\"path\" = \"C:\\\\\";\n");
    }

    #[test]
    fn test_empty_strings_policy() {
        let empty = SimpleString::new("empty", ["en"]).unwrap();
        let set: ResourceSet = vec![Resource::from(empty)].into_iter().collect();
        assert_eq!(AppleGenerator::default().generate(&set, "en").unwrap(), "");
        assert_eq!(
            AppleGenerator::new(EmptyStrings::Emit)
                .generate(&set, "en")
                .unwrap(),
            "\"empty\" = \"\";\n"
        );
    }
}

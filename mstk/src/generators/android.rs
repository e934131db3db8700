//! Android `strings.xml` assembled directly as text.
//!
//! The layout is fixed (four space indentation, one element per line) so the
//! output stays byte-for-byte stable between runs.

use indoc::indoc;
use quick_xml::escape::{escape, partial_escape};

use super::{EmptyStrings, Generator, array_items, escape::escape_apostrophes, plural_items, string_text};
use crate::{
    error::Error,
    resources::{Keyed, PluralStrings, SimpleString, StringList},
};

const PROLOGUE: &str = indoc! {r#"
    <?xml version="1.0" encoding="utf-8"?>
    <resources>
"#};

const EPILOGUE: &str = "</resources>\n";

#[derive(Debug, Clone)]
pub struct AndroidGenerator {
    body: String,
    empty_strings: EmptyStrings,
}

impl AndroidGenerator {
    pub fn new(empty_strings: EmptyStrings) -> Self {
        Self {
            body: String::new(),
            empty_strings,
        }
    }
}

impl Default for AndroidGenerator {
    fn default() -> Self {
        Self::new(EmptyStrings::Emit)
    }
}

fn text_content(text: &str) -> String {
    partial_escape(&escape_apostrophes(text)).into_owned()
}

impl Generator for AndroidGenerator {
    fn init(&mut self) {
        self.body.clear();
    }

    fn add_string(&mut self, resource: &SimpleString, language: &str) -> Result<(), Error> {
        if let Some(text) = string_text(resource, language, self.empty_strings)? {
            self.body.push_str(&format!(
                "    <string name=\"{}\">{}</string>\n",
                escape(resource.key()),
                text_content(text)
            ));
        }
        Ok(())
    }

    fn add_string_array(&mut self, resource: &StringList, language: &str) -> Result<(), Error> {
        let items = array_items(resource, language)?;
        if items.is_empty() {
            return Ok(());
        }
        self.body.push_str(&format!(
            "    <string-array name=\"{}\">\n",
            escape(resource.key())
        ));
        for text in items {
            self.body
                .push_str(&format!("        <item>{}</item>\n", text_content(text)));
        }
        self.body.push_str("    </string-array>\n");
        Ok(())
    }

    fn add_quantity_string(
        &mut self,
        resource: &PluralStrings,
        language: &str,
    ) -> Result<(), Error> {
        let items = plural_items(resource, language)?;
        if items.is_empty() {
            return Ok(());
        }
        self.body.push_str(&format!(
            "    <plurals name=\"{}\">\n",
            escape(resource.key())
        ));
        for (quantity, text) in items {
            self.body.push_str(&format!(
                "        <item quantity=\"{}\">{}</item>\n",
                quantity,
                text_content(text)
            ));
        }
        self.body.push_str("    </plurals>\n");
        Ok(())
    }

    fn serialize(&mut self) -> Result<String, Error> {
        let mut document = String::with_capacity(PROLOGUE.len() + self.body.len() + EPILOGUE.len());
        document.push_str(PROLOGUE);
        document.push_str(&self.body);
        document.push_str(EPILOGUE);
        Ok(document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Quantity, Resource, ResourceSet};
    use indoc::indoc;

    fn generate(resources: Vec<Resource>, language: &str) -> String {
        let set: ResourceSet = resources.into_iter().collect();
        AndroidGenerator::default().generate(&set, language).unwrap()
    }

    #[test]
    fn test_full_document_layout() {
        let mut greeting = SimpleString::new("greeting", ["en"]).unwrap();
        greeting.set("en", "Hello").unwrap();
        let mut planets = StringList::new("planets", ["en"]).unwrap();
        planets.set("en", 1, "Venus").unwrap();
        planets.set("en", 0, "Mercury").unwrap();
        let mut count = PluralStrings::new("count", ["en"]).unwrap();
        count.set("en", Quantity::Other, "%d items").unwrap();
        count.set("en", Quantity::One, "1 item").unwrap();

        let output = generate(
            vec![greeting.into(), planets.into(), count.into()],
            "en",
        );
        let expected = indoc! {r#"
            <?xml version="1.0" encoding="utf-8"?>
            <resources>
                <string name="greeting">Hello</string>
                <string-array name="planets">
                    <item>Mercury</item>
                    <item>Venus</item>
                </string-array>
                <plurals name="count">
                    <item quantity="one">1 item</item>
                    <item quantity="other">%d items</item>
                </plurals>
            </resources>
        "#};
        assert_eq!(output, expected);
    }

    #[test]
    fn test_empty_string_is_emitted_by_default() {
        let empty = SimpleString::new("empty", ["en"]).unwrap();
        let output = generate(vec![empty.into()], "en");
        assert!(output.contains("    <string name=\"empty\"></string>\n"));
    }

    #[test]
    fn test_empty_string_can_be_omitted() {
        let empty = SimpleString::new("empty", ["en"]).unwrap();
        let set: ResourceSet = vec![Resource::from(empty)].into_iter().collect();
        let output = AndroidGenerator::new(EmptyStrings::Omit)
            .generate(&set, "en")
            .unwrap();
        assert!(!output.contains("empty"));
    }

    #[test]
    fn test_empty_array_and_plural_are_omitted() {
        let list = StringList::new("list", ["en"]).unwrap();
        let plural = PluralStrings::new("plural", ["en"]).unwrap();
        let output = generate(vec![list.into(), plural.into()], "en");
        assert_eq!(output, format!("{}{}", PROLOGUE, EPILOGUE));
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let mut string = SimpleString::new("warning", ["en"]).unwrap();
        string.set("en", "Don't use <b> & \\'friends\\'").unwrap();
        let output = generate(vec![string.into()], "en");
        assert!(output.contains(r#"<string name="warning">Don\'t use &lt;b&gt; &amp; \'friends\'</string>"#));
    }
}

//! Android `strings.xml` built as an element tree and serialized with
//! quick-xml's indenting writer.

use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};

use super::{EmptyStrings, Generator, array_items, escape::escape_apostrophes, plural_items, string_text};
use crate::{
    error::Error,
    resources::{Keyed, PluralStrings, SimpleString, StringList},
};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Element {
    name: &'static str,
    attributes: Vec<(&'static str, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &'static str) -> Self {
        Self {
            name,
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    fn attribute(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    fn text(mut self, text: &str) -> Self {
        self.text = Some(escape_apostrophes(text));
        self
    }

    fn write<W: std::io::Write>(&self, writer: &mut Writer<W>) -> Result<(), Error> {
        let mut start = BytesStart::new(self.name);
        for (name, value) in &self.attributes {
            start.push_attribute((*name, value.as_str()));
        }
        writer.write_event(Event::Start(start))?;
        if let Some(text) = &self.text {
            writer.write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))?;
        }
        for child in &self.children {
            child.write(writer)?;
        }
        writer.write_event(Event::End(BytesEnd::new(self.name)))?;
        Ok(())
    }
}

/// Children of the `resources` root, collected between `init` and `serialize`.
#[derive(Debug, Clone)]
pub struct AndroidXmlGenerator {
    elements: Vec<Element>,
    empty_strings: EmptyStrings,
}

impl AndroidXmlGenerator {
    pub fn new(empty_strings: EmptyStrings) -> Self {
        Self {
            elements: Vec::new(),
            empty_strings,
        }
    }
}

impl Default for AndroidXmlGenerator {
    fn default() -> Self {
        Self::new(EmptyStrings::Omit)
    }
}

impl Generator for AndroidXmlGenerator {
    fn init(&mut self) {
        self.elements.clear();
    }

    fn add_string(&mut self, resource: &SimpleString, language: &str) -> Result<(), Error> {
        if let Some(text) = string_text(resource, language, self.empty_strings)? {
            self.elements.push(
                Element::new("string")
                    .attribute("name", resource.key())
                    .text(text),
            );
        }
        Ok(())
    }

    fn add_string_array(&mut self, resource: &StringList, language: &str) -> Result<(), Error> {
        let items = array_items(resource, language)?;
        if items.is_empty() {
            return Ok(());
        }
        let mut array = Element::new("string-array").attribute("name", resource.key());
        array.children = items
            .into_iter()
            .map(|text| Element::new("item").text(text))
            .collect();
        self.elements.push(array);
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
        let mut plurals = Element::new("plurals").attribute("name", resource.key());
        plurals.children = items
            .into_iter()
            .map(|(quantity, text)| {
                Element::new("item")
                    .attribute("quantity", quantity.as_str())
                    .text(text)
            })
            .collect();
        self.elements.push(plurals);
        Ok(())
    }

    fn serialize(&mut self) -> Result<String, Error> {
        let mut buffer = Vec::new();
        let mut writer = Writer::new_with_indent(&mut buffer, b' ', 4);

        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        if self.elements.is_empty() {
            writer.write_event(Event::Empty(BytesStart::new("resources")))?;
        } else {
            writer.write_event(Event::Start(BytesStart::new("resources")))?;
            for element in &self.elements {
                element.write(&mut writer)?;
            }
            writer.write_event(Event::End(BytesEnd::new("resources")))?;
        }
        buffer.push(b'\n');

        String::from_utf8(buffer)
            .map_err(|e| Error::InvalidResource(format!("generated XML is not UTF-8: {}", e)))
    }
}

//! A headless document head: the live stylesheet sink without a browser.
//!
//! Elements live in a slotmap arena; document order is kept separately so
//! removal is O(n) in the element count and lookup is O(1).

use slotmap::{new_key_type, SlotMap};

use crate::config::MARKER_ATTRIBUTE;

use super::markup;
use super::sheet::Stylesheet;
use super::sink::{ServerSheet, StylesheetSink};

new_key_type! {
    /// Identifier of an element in a [`Document`].
    pub struct ElementId;
}

/// Elements without content or end tag.
const VOID: &[&str] = &["base", "link", "meta"];

/// One head element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Set an attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attribute(name, value);
        self
    }

    /// Set the text content (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set or replace an attribute.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => *slot = value,
            None => self.attributes.push((name, value)),
        }
    }

    /// An attribute's value.
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Serialize to HTML.
    pub fn to_html(&self) -> String {
        let mut out = format!("<{}", self.tag);
        for (name, value) in &self.attributes {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&html_escape::encode_double_quoted_attribute(value));
            out.push('"');
        }
        out.push('>');
        if VOID.contains(&self.tag.as_str()) {
            return out;
        }
        if markup::is_raw_text(&self.tag) {
            out.push_str(&self.text.replace(&format!("</{}", self.tag), &format!("<\\/{}", self.tag)));
        } else {
            out.push_str(&html_escape::encode_text(&self.text));
        }
        out.push_str(&format!("</{}>", self.tag));
        out
    }
}

impl From<markup::Parsed> for Element {
    fn from(parsed: markup::Parsed) -> Self {
        Self {
            tag: parsed.tag,
            attributes: parsed.attributes,
            text: parsed.text,
        }
    }
}

/// A flat, ordered set of head elements.
#[derive(Debug, Default)]
pub struct Document {
    elements: SlotMap<ElementId, Element>,
    order: Vec<ElementId>,
    /// The stylesheet element written by the registry.
    owned_sheet: Option<ElementId>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a document head from server-rendered markup.
    pub fn from_html(html: &str) -> Self {
        let mut document = Self::new();
        for parsed in markup::parse(html) {
            document.insert(parsed.into());
        }
        document
    }

    /// Append an element.
    pub fn insert(&mut self, element: Element) -> ElementId {
        let id = self.elements.insert(element);
        self.order.push(id);
        id
    }

    /// Remove an element, returning it if it existed.
    pub fn remove(&mut self, id: ElementId) -> Option<Element> {
        let element = self.elements.remove(id)?;
        self.order.retain(|&other| other != id);
        if self.owned_sheet == Some(id) {
            self.owned_sheet = None;
        }
        Some(element)
    }

    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn get_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    /// Replace an element's text. Returns `false` if it does not exist.
    pub fn set_text(&mut self, id: ElementId, text: impl Into<String>) -> bool {
        match self.elements.get_mut(id) {
            Some(element) => {
                element.text = text.into();
                true
            }
            None => false,
        }
    }

    /// Elements carrying `name`, in document order.
    pub fn query_by_attribute(&self, name: &str) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, element)| element.attribute(name).is_some())
            .map(|(id, _)| id)
            .collect()
    }

    /// Elements with the given tag, in document order.
    pub fn query_by_tag(&self, tag: &str) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, element)| element.tag.eq_ignore_ascii_case(tag))
            .map(|(id, _)| id)
            .collect()
    }

    /// `(id, element)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Element)> {
        self.order
            .iter()
            .filter_map(|&id| self.elements.get(id).map(|element| (id, element)))
    }

    /// The stylesheet element owned by the registry, once written or adopted.
    pub fn owned_sheet(&self) -> Option<&Element> {
        self.owned_sheet.and_then(|id| self.elements.get(id))
    }

    /// Identifier of the owned stylesheet element.
    pub fn owned_sheet_id(&self) -> Option<ElementId> {
        self.owned_sheet.filter(|&id| self.elements.contains_key(id))
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Serialize every element, in document order.
    pub fn to_html(&self) -> String {
        self.iter().map(|(_, element)| element.to_html()).collect()
    }
}

impl StylesheetSink for Document {
    fn claim_server_sheets(&mut self) -> Vec<ServerSheet> {
        let ids: Vec<ElementId> = self
            .query_by_tag("style")
            .into_iter()
            .filter(|&id| Some(id) != self.owned_sheet)
            .filter(|&id| {
                self.elements
                    .get(id)
                    .is_some_and(|element| element.attribute(MARKER_ATTRIBUTE).is_some())
            })
            .collect();

        let server_sheet = |element: &Element| {
            let manifest = element.attribute(MARKER_ATTRIBUTE).unwrap_or_default();
            ServerSheet::new(element.text.clone(), manifest)
        };

        let mut claimed = Vec::with_capacity(ids.len());
        for id in ids {
            // The first server sheet becomes the owned one and stays in place.
            if self.owned_sheet_id().is_none() {
                if let Some(element) = self.elements.get(id) {
                    claimed.push(server_sheet(element));
                    self.owned_sheet = Some(id);
                }
                continue;
            }
            if let Some(element) = self.remove(id) {
                claimed.push(server_sheet(&element));
            }
        }
        claimed
    }

    fn write_sheet(&mut self, sheet: &Stylesheet) {
        let id = match self.owned_sheet_id() {
            Some(id) => id,
            None => {
                let id = self.insert(Element::new("style"));
                self.owned_sheet = Some(id);
                id
            }
        };
        if let Some(element) = self.elements.get_mut(id) {
            element.set_attribute(MARKER_ATTRIBUTE, sheet.manifest());
            element.text = sheet.css.clone();
        }
    }
}

//! Style declarations and declaration lists.
//!
//! A [`Style`] is an ordered mapping from property name to either a value or a
//! nested declaration (state buckets, `self`, named child targets). A
//! [`StyleList`] is the recursive list form accepted by the style API; it
//! flattens left to right with later entries replacing earlier ones.

use crate::style::value::StyleValue;

/// Key of the hover state bucket.
pub const HOVER: &str = "hover";
/// Key of the focus state bucket.
pub const FOCUS: &str = "focus";
/// Key of the press state bucket.
pub const PRESS: &str = "press";
/// Key of the combined hover-or-focus bucket.
pub const FOVER: &str = "fover";
/// Key of the component's own root inside compound styles.
pub const SELF: &str = "self";

/// Keys that never name a style property.
pub const RESERVED_KEYS: [&str; 5] = [HOVER, FOCUS, PRESS, FOVER, SELF];

/// One entry of a [`Style`].
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    /// A style property value.
    Value(StyleValue),
    /// A nested declaration: state bucket, `self`, or child target.
    Nested(Style),
}

/// A style declaration.
///
/// Keys keep their first insertion position; re-inserting a key replaces its
/// value in place, like object spread.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    entries: Vec<(String, Entry)>,
}

impl Style {
    /// Create an empty declaration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property value (builder).
    pub fn set(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, Entry::Value(value.into()));
        self
    }

    /// Set the hover bucket (builder).
    pub fn hover(self, style: Style) -> Self {
        self.nest(HOVER, style)
    }

    /// Set the focus bucket (builder).
    pub fn focus(self, style: Style) -> Self {
        self.nest(FOCUS, style)
    }

    /// Set the press bucket (builder).
    pub fn press(self, style: Style) -> Self {
        self.nest(PRESS, style)
    }

    /// Set the hover-or-focus bucket (builder).
    pub fn fover(self, style: Style) -> Self {
        self.nest(FOVER, style)
    }

    /// Styles for the component's own root (builder).
    pub fn self_style(self, style: Style) -> Self {
        self.nest(SELF, style)
    }

    /// Styles for a named child target (builder).
    pub fn child(self, name: impl Into<String>, style: Style) -> Self {
        self.nest(name, style)
    }

    fn nest(mut self, key: impl Into<String>, style: Style) -> Self {
        self.insert(key, Entry::Nested(style));
        self
    }

    /// Insert an entry, replacing an existing one with the same key in place.
    pub fn insert(&mut self, key: impl Into<String>, entry: Entry) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = entry,
            None => self.entries.push((key, entry)),
        }
    }

    /// Look up an entry.
    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, e)| e)
    }

    /// Look up a nested declaration.
    pub fn nested(&self, key: &str) -> Option<&Style> {
        match self.get(key) {
            Some(Entry::Nested(style)) => Some(style),
            _ => None,
        }
    }

    /// Entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Entry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns `true` if any interaction-state bucket is present.
    pub fn has_state(&self) -> bool {
        [HOVER, FOCUS, PRESS, FOVER]
            .iter()
            .any(|key| self.get(key).is_some())
    }

    /// Merge `other` on top of `self`. Entries of `other` win on collision.
    pub fn merge(&self, other: &Style) -> Style {
        let mut merged = self.clone();
        merged.extend(other);
        merged
    }

    fn extend(&mut self, other: &Style) {
        for (key, entry) in &other.entries {
            self.insert(key.clone(), entry.clone());
        }
    }
}

// ---------------------------------------------------------------------------
// StyleList
// ---------------------------------------------------------------------------

/// A recursively nested list of declarations.
///
/// `Empty` stands for the `null`/`false` entries of conditional style lists.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum StyleList {
    #[default]
    Empty,
    Style(Style),
    List(Vec<StyleList>),
}

impl StyleList {
    /// Flatten into a single declaration, later entries overriding earlier ones.
    pub fn flatten(&self) -> Style {
        let mut out = Style::new();
        self.flatten_into(&mut out);
        out
    }

    fn flatten_into(&self, out: &mut Style) {
        match self {
            StyleList::Empty => {}
            StyleList::Style(style) => out.extend(style),
            StyleList::List(items) => {
                for item in items {
                    item.flatten_into(out);
                }
            }
        }
    }
}

impl From<Style> for StyleList {
    fn from(style: Style) -> Self {
        StyleList::Style(style)
    }
}

impl From<&Style> for StyleList {
    fn from(style: &Style) -> Self {
        StyleList::Style(style.clone())
    }
}

impl<T: Into<StyleList>> From<Option<T>> for StyleList {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleList::Empty, Into::into)
    }
}

impl<T: Into<StyleList>> From<Vec<T>> for StyleList {
    fn from(items: Vec<T>) -> Self {
        StyleList::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<StyleList>, const N: usize> From<[T; N]> for StyleList {
    fn from(items: [T; N]) -> Self {
        StyleList::List(items.into_iter().map(Into::into).collect())
    }
}

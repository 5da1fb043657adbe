//! Native target output: inline style objects and state style functions.

use std::fmt;
use std::rc::Rc;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::config::Target;
use crate::resolve::{resolve, ResolveContext};
use crate::shorthand;
use crate::state::{Interaction, State, StateStyles};
use crate::style::declaration::{Entry, Style};
use crate::style::value::Literal;

// ---------------------------------------------------------------------------
// InlineStyle
// ---------------------------------------------------------------------------

/// A resolved, insertion-ordered style object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InlineStyle {
    entries: Vec<(String, Literal)>,
}

impl InlineStyle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a property (builder).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Literal>) -> Self {
        self.insert(key, value.into());
        self
    }

    /// Set a property, replacing an earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: Literal) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Literal> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Literal)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Copy every property of `other` over this one; `other` wins.
    pub fn extend(&mut self, other: &InlineStyle) {
        for (key, value) in other.iter() {
            self.insert(key, value.clone());
        }
    }

    /// As a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

impl Serialize for InlineStyle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<K: Into<String>, V: Into<Literal>> FromIterator<(K, V)> for InlineStyle {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut style = InlineStyle::new();
        for (key, value) in iter {
            style.insert(key, value.into());
        }
        style
    }
}

// ---------------------------------------------------------------------------
// NativeStyle
// ---------------------------------------------------------------------------

/// A style function of the live interaction state.
#[derive(Clone)]
pub struct StateStyleFn(Rc<dyn Fn(Interaction) -> InlineStyle>);

impl StateStyleFn {
    pub fn new(f: impl Fn(Interaction) -> InlineStyle + 'static) -> Self {
        Self(Rc::new(f))
    }

    pub fn call(&self, interaction: Interaction) -> InlineStyle {
        (self.0)(interaction)
    }
}

impl fmt::Debug for StateStyleFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateStyleFn(..)")
    }
}

/// Native style output.
#[derive(Debug, Clone)]
pub enum NativeStyle {
    /// A plain style object.
    Inline(InlineStyle),
    /// Evaluated by the UI layer whenever the interaction state changes.
    Stateful(StateStyleFn),
}

impl NativeStyle {
    /// The style object under `interaction`.
    pub fn at(&self, interaction: Interaction) -> InlineStyle {
        match self {
            NativeStyle::Inline(style) => style.clone(),
            NativeStyle::Stateful(f) => f.call(interaction),
        }
    }

    pub fn is_stateful(&self) -> bool {
        matches!(self, NativeStyle::Stateful(_))
    }
}

impl Default for NativeStyle {
    fn default() -> Self {
        NativeStyle::Inline(InlineStyle::new())
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolve one bucket: expand shorthands, then resolve every primitive.
/// Values resolving to nothing are left out.
pub fn resolve_style(style: &Style, ctx: &ResolveContext<'_>) -> InlineStyle {
    let mut out = InlineStyle::new();
    for (key, entry) in style.iter() {
        let Entry::Value(value) = entry else {
            continue;
        };
        for (primitive, value) in shorthand::expand(key, value, Target::Native) {
            if let Some(literal) = resolve(&value, ctx) {
                out.insert(primitive, literal);
            }
        }
    }
    out
}

/// Build the native output of one target.
///
/// Without state buckets the result is a plain object. With them it is a
/// function applying, over the normal bucket, every active state bucket in
/// cascade order. `passthrough` is applied last and always wins.
pub fn native_style(
    styles: &StateStyles,
    ctx: &ResolveContext<'_>,
    passthrough: Option<&InlineStyle>,
) -> NativeStyle {
    let mut normal = resolve_style(&styles.normal, ctx);
    let passthrough = passthrough.cloned().unwrap_or_default();

    if !styles.has_state() {
        normal.extend(&passthrough);
        return NativeStyle::Inline(normal);
    }

    let states: Vec<(State, InlineStyle)> = styles
        .buckets()
        .filter(|(state, _)| *state != State::Normal)
        .map(|(state, bucket)| (state, resolve_style(bucket, ctx)))
        .collect();

    NativeStyle::Stateful(StateStyleFn::new(move |interaction| {
        let mut out = normal.clone();
        for (state, style) in &states {
            if state.is_active(interaction) {
                out.extend(style);
            }
        }
        out.extend(&passthrough);
        out
    }))
}

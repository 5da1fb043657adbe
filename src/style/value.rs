//! Style values: literals, theme functions and breakpoint maps.

use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::theme::{Breakpoint, Theme};
use crate::units::Length;

// ---------------------------------------------------------------------------
// Literal
// ---------------------------------------------------------------------------

/// A concrete style value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A bare number like `10` or `0.5`.
    Number(f64),
    /// A keyword or pre-formatted value like `red`, `10px`, `#fff`.
    Text(String),
    /// Any other structured value (arrays, objects, booleans), carried verbatim.
    Json(Value),
}

impl Literal {
    /// Convert a JSON value into a literal.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Literal::Text(s.clone()),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Literal::Number(f),
                None => Literal::Json(value.clone()),
            },
            other => Literal::Json(other.clone()),
        }
    }

    /// The numeric value, if this is a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The text value, if this is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Literal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Literal::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => {
                serializer.serialize_i64(*n as i64)
            }
            Literal::Number(n) => serializer.serialize_f64(*n),
            Literal::Text(s) => serializer.serialize_str(s),
            Literal::Json(v) => v.serialize(serializer),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{n}")
                }
            }
            Literal::Text(s) => f.write_str(s),
            Literal::Json(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_owned())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

macro_rules! literal_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Literal {
                fn from(value: $ty) -> Self {
                    Literal::Number(value as f64)
                }
            }

            impl From<$ty> for StyleValue {
                fn from(value: $ty) -> Self {
                    StyleValue::Literal(Literal::from(value))
                }
            }
        )*
    };
}

literal_from_number!(f64, f32, i32, i64, u32, u64, usize);

// ---------------------------------------------------------------------------
// ThemeFn
// ---------------------------------------------------------------------------

/// A function from the active theme to a style value.
#[derive(Clone)]
pub struct ThemeFn(Rc<dyn Fn(&Theme) -> StyleValue>);

impl ThemeFn {
    /// Wrap a closure.
    pub fn new(f: impl Fn(&Theme) -> StyleValue + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Call the function with a theme.
    pub fn call(&self, theme: &Theme) -> StyleValue {
        (self.0)(theme)
    }
}

impl fmt::Debug for ThemeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ThemeFn(..)")
    }
}

impl PartialEq for ThemeFn {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

// ---------------------------------------------------------------------------
// StyleValue
// ---------------------------------------------------------------------------

/// The value of a single style property before resolution.
#[derive(Debug, Clone, PartialEq)]
pub enum StyleValue {
    /// A concrete value.
    Literal(Literal),
    /// Computed from the theme; the result may itself be a breakpoint map.
    Theme(ThemeFn),
    /// A responsive value keyed by breakpoint tier.
    Breakpoints(Breakpoints),
    /// A length; CSS text on the browser, a number on native.
    Length(Length),
    /// No value. The property is omitted from the output.
    Unset,
}

impl StyleValue {
    /// A value computed from the theme.
    pub fn theme(f: impl Fn(&Theme) -> StyleValue + 'static) -> Self {
        StyleValue::Theme(ThemeFn::new(f))
    }

    /// A value read from the theme by dotted path. Missing paths are unset.
    pub fn token(path: impl Into<String>) -> Self {
        let path = path.into();
        StyleValue::theme(move |theme| match theme.literal(&path) {
            Some(literal) => StyleValue::Literal(literal),
            None => StyleValue::Unset,
        })
    }

    /// Returns `true` for [`StyleValue::Unset`].
    pub fn is_unset(&self) -> bool {
        matches!(self, StyleValue::Unset)
    }
}

impl From<Literal> for StyleValue {
    fn from(value: Literal) -> Self {
        StyleValue::Literal(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Literal(value.into())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        StyleValue::Literal(value.into())
    }
}

impl From<Breakpoints> for StyleValue {
    fn from(value: Breakpoints) -> Self {
        StyleValue::Breakpoints(value)
    }
}

impl From<ThemeFn> for StyleValue {
    fn from(value: ThemeFn) -> Self {
        StyleValue::Theme(value)
    }
}

impl<T: Into<StyleValue>> From<Option<T>> for StyleValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(StyleValue::Unset, Into::into)
    }
}

// ---------------------------------------------------------------------------
// Breakpoints
// ---------------------------------------------------------------------------

/// A responsive value: one [`StyleValue`] per breakpoint tier.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Breakpoints {
    entries: BTreeMap<Breakpoint, StyleValue>,
}

impl Breakpoints {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the value for a tier (builder).
    pub fn with(mut self, tier: Breakpoint, value: impl Into<StyleValue>) -> Self {
        self.entries.insert(tier, value.into());
        self
    }

    /// Value from `xs` up (builder).
    pub fn xs(self, value: impl Into<StyleValue>) -> Self {
        self.with(Breakpoint::Xs, value)
    }

    /// Value from `sm` up (builder).
    pub fn sm(self, value: impl Into<StyleValue>) -> Self {
        self.with(Breakpoint::Sm, value)
    }

    /// Value from `md` up (builder).
    pub fn md(self, value: impl Into<StyleValue>) -> Self {
        self.with(Breakpoint::Md, value)
    }

    /// Value from `lg` up (builder).
    pub fn lg(self, value: impl Into<StyleValue>) -> Self {
        self.with(Breakpoint::Lg, value)
    }

    /// Value from `xl` up (builder).
    pub fn xl(self, value: impl Into<StyleValue>) -> Self {
        self.with(Breakpoint::Xl, value)
    }

    /// Insert a value for a tier.
    pub fn insert(&mut self, tier: Breakpoint, value: StyleValue) {
        self.entries.insert(tier, value);
    }

    /// The value explicitly set for a tier.
    pub fn get(&self, tier: Breakpoint) -> Option<&StyleValue> {
        self.entries.get(&tier)
    }

    /// Entries in ascending tier order.
    pub fn iter(&self) -> impl Iterator<Item = (Breakpoint, &StyleValue)> {
        self.entries.iter().map(|(bp, v)| (*bp, v))
    }

    /// Returns `true` if no tier has a value.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

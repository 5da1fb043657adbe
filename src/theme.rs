//! Theme record and breakpoint tiers.
//!
//! The [`Theme`] is an open key-value record supplied by the application. The
//! engine only ever reads it, when resolving theme-function style values.
//! [`Breakpoint`] is the fixed, ordered set of viewport tiers used by
//! responsive values.

use std::fmt;
use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::ThemeError;
use crate::style::value::Literal;

// ---------------------------------------------------------------------------
// Breakpoint
// ---------------------------------------------------------------------------

/// A named viewport-width tier.
///
/// Tiers are ordered `Xs < Sm < Md < Lg < Xl`; each one applies from its
/// pixel threshold upwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    #[default]
    Xs,
    Sm,
    Md,
    Lg,
    Xl,
}

impl Breakpoint {
    /// All tiers in ascending order.
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Xs,
        Breakpoint::Sm,
        Breakpoint::Md,
        Breakpoint::Lg,
        Breakpoint::Xl,
    ];

    /// Minimum viewport width (in pixels) at which this tier applies.
    pub fn threshold(self) -> u32 {
        match self {
            Breakpoint::Xs => 0,
            Breakpoint::Sm => 600,
            Breakpoint::Md => 900,
            Breakpoint::Lg => 1200,
            Breakpoint::Xl => 1600,
        }
    }

    /// Short tier name as used in declarations, class names and section markers.
    pub fn name(self) -> &'static str {
        match self {
            Breakpoint::Xs => "xs",
            Breakpoint::Sm => "sm",
            Breakpoint::Md => "md",
            Breakpoint::Lg => "lg",
            Breakpoint::Xl => "xl",
        }
    }

    /// The largest tier whose threshold is `<= width`.
    pub fn from_width(width: f32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|bp| width >= bp.threshold() as f32)
            .unwrap_or(Breakpoint::Xs)
    }

    /// Tiers from `self` down to `Xs`, largest first.
    pub fn cascade(self) -> impl Iterator<Item = Breakpoint> {
        Self::ALL.into_iter().rev().filter(move |bp| *bp <= self)
    }

    /// Returns `true` if `name` is a recognized tier name.
    pub fn is_tier_name(name: &str) -> bool {
        name.parse::<Breakpoint>().is_ok()
    }
}

impl fmt::Display for Breakpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown tier name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown breakpoint: {0}")]
pub struct UnknownBreakpoint(pub String);

impl FromStr for Breakpoint {
    type Err = UnknownBreakpoint;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xs" => Ok(Breakpoint::Xs),
            "sm" => Ok(Breakpoint::Sm),
            "md" => Ok(Breakpoint::Md),
            "lg" => Ok(Breakpoint::Lg),
            "xl" => Ok(Breakpoint::Xl),
            other => Err(UnknownBreakpoint(other.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

/// An open, read-only theme record.
///
/// Backed by a JSON object so applications can carry any shape they like.
/// Nested values are addressed with dotted paths: `colors.primary`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Theme {
    values: Map<String, Value>,
}

impl Theme {
    /// Create an empty theme.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a theme from a JSON value. The value must be an object.
    pub fn from_value(value: Value) -> Result<Self, ThemeError> {
        match value {
            Value::Object(values) => Ok(Self { values }),
            other => Err(ThemeError::NotAnObject(kind_of(&other))),
        }
    }

    /// Parse a theme from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ThemeError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    /// Set a top-level entry (builder).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Look up a value by dotted path.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let first = segments.next()?;
        let mut current = self.values.get(first)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Look up a value by dotted path and convert it to a style [`Literal`].
    ///
    /// Strings and numbers map to their literal counterparts; anything else is
    /// carried as a JSON literal.
    pub fn literal(&self, path: &str) -> Option<Literal> {
        self.get(path).map(Literal::from_json)
    }

    /// The underlying JSON object.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.values
    }
}

pub(crate) fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn breakpoints_are_ordered() {
        assert!(Breakpoint::Xs < Breakpoint::Sm);
        assert!(Breakpoint::Md < Breakpoint::Xl);
        assert_eq!(Breakpoint::Lg.threshold(), 1200);
    }

    #[test]
    fn from_width_picks_largest_tier_below() {
        assert_eq!(Breakpoint::from_width(0.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(599.0), Breakpoint::Xs);
        assert_eq!(Breakpoint::from_width(600.0), Breakpoint::Sm);
        assert_eq!(Breakpoint::from_width(1000.0), Breakpoint::Md);
        assert_eq!(Breakpoint::from_width(4000.0), Breakpoint::Xl);
    }

    #[test]
    fn cascade_walks_down() {
        let tiers: Vec<_> = Breakpoint::Md.cascade().collect();
        assert_eq!(tiers, vec![Breakpoint::Md, Breakpoint::Sm, Breakpoint::Xs]);
    }

    #[test]
    fn parse_tier_names() {
        assert_eq!("lg".parse::<Breakpoint>(), Ok(Breakpoint::Lg));
        assert!("huge".parse::<Breakpoint>().is_err());
        assert!(Breakpoint::is_tier_name("xs"));
        assert!(!Breakpoint::is_tier_name("color"));
    }

    #[test]
    fn theme_dotted_lookup() {
        let theme = Theme::new().with("colors", json!({ "primary": "#ff0000" }));
        assert_eq!(theme.get("colors.primary"), Some(&json!("#ff0000")));
        assert_eq!(theme.get("colors.missing"), None);
        assert_eq!(theme.get("nope"), None);
    }

    #[test]
    fn theme_from_json_requires_object() {
        assert!(Theme::from_json(r#"{"spacing": 8}"#).is_ok());
        let err = Theme::from_json("[1, 2]").unwrap_err();
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn theme_literal_conversion() {
        let theme = Theme::new().with("spacing", 8).with("accent", "blue");
        assert_eq!(theme.literal("spacing"), Some(Literal::Number(8.0)));
        assert_eq!(theme.literal("accent"), Some(Literal::Text("blue".into())));
    }
}

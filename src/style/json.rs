//! JSON wire format for declarations.
//!
//! Declarations arrive from calling components as plain nested objects. An
//! object can mean three different things here and its shape is all we have
//! to tell them apart:
//!
//! - an object whose keys are *all* breakpoint tier names is a breakpoint map;
//! - inside a state bucket, any other object names a child target;
//! - anywhere else, it is an object-valued literal (`shadowOffset` on native).
//!
//! The first rule is a best-effort guess: `{}` and `{ "sm": 1 }` are always
//! read as breakpoint maps. Outside state buckets, child targets can only be
//! declared with [`Style::child`]. Object-valued literals have no CSS form and
//! produce no class on the browser.

use serde_json::{Map, Value};

use crate::error::StyleError;
use crate::style::declaration::{Entry, Style, StyleList, FOCUS, FOVER, HOVER, PRESS, SELF};
use crate::style::value::{Breakpoints, Literal, StyleValue};
use crate::theme::{kind_of, Breakpoint};

/// Returns `true` if every key of `map` is a breakpoint tier name.
pub fn is_breakpoints(map: &Map<String, Value>) -> bool {
    map.keys().all(|key| Breakpoint::is_tier_name(key))
}

impl Style {
    /// Read a declaration from a JSON object.
    pub fn from_json(value: &Value) -> Result<Style, StyleError> {
        match value {
            Value::Object(map) => read_style(map, false),
            other => Err(StyleError::NotAnObject(kind_of(other))),
        }
    }

    /// Parse a declaration from JSON text.
    pub fn from_json_str(text: &str) -> Result<Style, StyleError> {
        let value: Value = serde_json::from_str(text)?;
        Style::from_json(&value)
    }
}

impl StyleList {
    /// Read a declaration list: objects, nested arrays, `null` and `false`.
    pub fn from_json(value: &Value) -> Result<StyleList, StyleError> {
        match value {
            Value::Null | Value::Bool(false) => Ok(StyleList::Empty),
            Value::Object(map) => Ok(StyleList::Style(read_style(map, false)?)),
            Value::Array(items) => items
                .iter()
                .map(StyleList::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(StyleList::List),
            other => Err(StyleError::NotAnObject(kind_of(other))),
        }
    }

    /// Parse a declaration list from JSON text.
    pub fn from_json_str(text: &str) -> Result<StyleList, StyleError> {
        let value: Value = serde_json::from_str(text)?;
        StyleList::from_json(&value)
    }
}

fn read_style(map: &Map<String, Value>, in_state: bool) -> Result<Style, StyleError> {
    let mut style = Style::new();
    for (key, value) in map {
        let entry = match key.as_str() {
            HOVER | FOCUS | PRESS | FOVER => Entry::Nested(read_bucket(key, value, true)?),
            SELF => Entry::Nested(read_bucket(key, value, false)?),
            _ => match value {
                Value::Object(inner) if !is_breakpoints(inner) && in_state => {
                    Entry::Nested(read_style(inner, false)?)
                }
                other => Entry::Value(read_value(other)),
            },
        };
        style.insert(key.clone(), entry);
    }
    Ok(style)
}

fn read_bucket(key: &str, value: &Value, in_state: bool) -> Result<Style, StyleError> {
    match value {
        Value::Object(inner) => read_style(inner, in_state),
        other => Err(StyleError::InvalidValue {
            property: key.to_owned(),
            message: format!("expected a nested style object, got {}", kind_of(other)),
        }),
    }
}

fn read_value(value: &Value) -> StyleValue {
    match value {
        Value::Null => StyleValue::Unset,
        Value::Object(map) if is_breakpoints(map) => {
            let mut breakpoints = Breakpoints::new();
            for (tier, tier_value) in map {
                if let Ok(tier) = tier.parse::<Breakpoint>() {
                    breakpoints.insert(tier, read_value(tier_value));
                }
            }
            StyleValue::Breakpoints(breakpoints)
        }
        other => StyleValue::Literal(Literal::from_json(other)),
    }
}

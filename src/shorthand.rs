//! Shorthand property expansion.
//!
//! Shorthands are expanded before resolution, so every primitive they write
//! carries the shorthand's original value (literal, theme function, or
//! breakpoint map) unchanged.

use crate::config::Target;
use crate::style::value::StyleValue;

/// Primitive properties written by a shorthand, or `None` for a plain property.
fn primitives(key: &str) -> Option<&'static [&'static str]> {
    let expanded: &'static [&'static str] = match key {
        "p" => &["padding"],
        "pX" | "paddingX" => &["paddingLeft", "paddingRight"],
        "pY" | "paddingY" => &["paddingTop", "paddingBottom"],
        "m" => &["margin"],
        "mX" | "marginX" => &["marginLeft", "marginRight"],
        "mY" | "marginY" => &["marginTop", "marginBottom"],
        "bg" => &["backgroundColor"],
        _ => return None,
    };
    Some(expanded)
}

/// Returns `true` if `key` is a shorthand.
pub fn is_shorthand(key: &str) -> bool {
    primitives(key).is_some()
}

/// Expand a property into its primitive `(key, value)` pairs.
///
/// Unknown keys pass through unchanged. On the browser, `bg` also resets the
/// legacy `background` shorthand so an earlier `background` cannot leak
/// through.
pub fn expand(key: &str, value: &StyleValue, target: Target) -> Vec<(String, StyleValue)> {
    let Some(keys) = primitives(key) else {
        return vec![(key.to_owned(), value.clone())];
    };

    let mut out = Vec::with_capacity(keys.len() + 1);
    if key == "bg" && target == Target::Browser {
        out.push(("background".to_owned(), StyleValue::from("unset")));
    }
    for primitive in keys {
        out.extend(expand(primitive, value, target));
    }
    out
}

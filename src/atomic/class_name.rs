//! Class name derivation and class list deduplication.
//!
//! Atomic class names have the shape
//!
//! ```text
//! ys-{state_}{tier_}{property}-{value}
//! ```
//!
//! The value part is encoded so it never contains `-`, which makes everything
//! between the prefix and the last `-` the class's *property identity*.
//! Within one class list only the last class per identity survives.

use std::fmt::Write;

use crate::config::CLASS_PREFIX;
use crate::state::State;
use crate::style::value::Literal;
use crate::theme::Breakpoint;

/// Encode a value for use in a class name.
///
/// ASCII letters and digits are kept; every other byte becomes `_xx` (lowercase
/// hex). Distinct values never share an encoding.
pub fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() {
            out.push(byte as char);
        } else {
            let _ = write!(out, "_{byte:02x}");
        }
    }
    out
}

/// The atomic class for a resolved property under a state and breakpoint.
pub fn atomic(state: State, breakpoint: Option<Breakpoint>, property: &str, value: &Literal) -> String {
    let mut name = String::from(CLASS_PREFIX);
    if state != State::Normal {
        name.push_str(state.name());
        name.push('_');
    }
    if let Some(tier) = breakpoint {
        name.push_str(tier.name());
        name.push('_');
    }
    name.push_str(property);
    name.push('-');
    name.push_str(&encode(&value.to_string()));
    name
}

/// The class for a child target's property under its parent's state.
pub fn child(
    state: State,
    breakpoint: Option<Breakpoint>,
    target: &str,
    property: &str,
    value: &Literal,
) -> String {
    let mut name = String::from(CLASS_PREFIX);
    name.push_str(state.name());
    name.push('_');
    if let Some(tier) = breakpoint {
        name.push_str(tier.name());
        name.push('_');
    }
    name.push_str(&encode(target));
    name.push('_');
    name.push_str(property);
    name.push('-');
    name.push_str(&encode(&value.to_string()));
    name
}

/// The marker class a parent carries so its child targets can be scoped to it.
pub fn scope(target: &str) -> String {
    format!("{CLASS_PREFIX}scope_{}", encode(target))
}

/// The property identity of a generated class, or `None` for any other class.
pub fn identity(class: &str) -> Option<&str> {
    let rest = class.strip_prefix(CLASS_PREFIX)?;
    let end = rest.rfind('-')?;
    (end > 0).then(|| &rest[..end])
}

/// Join class lists, keeping only the last class per property identity.
///
/// A class keeps the position of the first class with the same identity, like
/// re-setting a key in an insertion-ordered map. Classes without an identity
/// are deduplicated by exact name.
pub fn dedup<'a>(classes: impl IntoIterator<Item = &'a str>) -> String {
    let mut slots: Vec<(&str, &str)> = Vec::new();
    for class in classes {
        if class.is_empty() {
            continue;
        }
        let id = identity(class).unwrap_or(class);
        match slots.iter_mut().find(|(slot_id, _)| *slot_id == id) {
            Some(slot) => slot.1 = class,
            None => slots.push((id, class)),
        }
    }
    slots
        .into_iter()
        .map(|(_, class)| class)
        .collect::<Vec<_>>()
        .join(" ")
}

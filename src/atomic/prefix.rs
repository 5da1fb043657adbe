//! CSS declaration output: property names, units and vendor prefixes.

use crate::config::StyleConfig;
use crate::style::value::Literal;

/// Properties whose bare numbers are not lengths.
const UNITLESS: &[&str] = &[
    "animationIterationCount",
    "aspectRatio",
    "columnCount",
    "columns",
    "fillOpacity",
    "flex",
    "flexGrow",
    "flexShrink",
    "fontWeight",
    "gridColumn",
    "gridColumnEnd",
    "gridColumnStart",
    "gridRow",
    "gridRowEnd",
    "gridRowStart",
    "lineClamp",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "scale",
    "stopOpacity",
    "strokeOpacity",
    "strokeWidth",
    "tabSize",
    "widows",
    "zIndex",
    "zoom",
];

/// Properties that still need vendor-prefixed copies.
const PREFIXED: &[(&str, &[&str])] = &[
    ("appearance", &["-webkit-", "-moz-"]),
    ("backdropFilter", &["-webkit-"]),
    ("boxDecorationBreak", &["-webkit-"]),
    ("clipPath", &["-webkit-"]),
    ("hyphens", &["-webkit-"]),
    ("lineClamp", &["-webkit-"]),
    ("maskImage", &["-webkit-"]),
    ("textSizeAdjust", &["-webkit-", "-moz-"]),
    ("userSelect", &["-webkit-", "-moz-"]),
];

/// CSS shorthand properties. Their rules must precede longhand rules.
const CSS_SHORTHANDS: &[&str] = &[
    "animation",
    "background",
    "border",
    "borderBottom",
    "borderColor",
    "borderLeft",
    "borderRadius",
    "borderRight",
    "borderStyle",
    "borderTop",
    "borderWidth",
    "columns",
    "flex",
    "flexFlow",
    "font",
    "gap",
    "grid",
    "gridArea",
    "gridTemplate",
    "inset",
    "listStyle",
    "margin",
    "mask",
    "outline",
    "overflow",
    "padding",
    "placeContent",
    "placeItems",
    "textDecoration",
    "transition",
];

/// Convert a camelCase property key to its CSS name: `backgroundColor` ->
/// `background-color`. Already kebab-cased keys are left alone.
pub fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// Returns `true` if `css_name` (kebab-case) is a CSS shorthand property.
pub fn is_css_shorthand(css_name: &str) -> bool {
    CSS_SHORTHANDS.iter().any(|key| kebab_case(key) == css_name)
}

fn is_unitless(key: &str) -> bool {
    UNITLESS.contains(&key) || key.starts_with("--")
}

/// The CSS text of a resolved value.
pub fn css_value(key: &str, value: &Literal, config: &StyleConfig) -> String {
    let text = match value {
        Literal::Number(n) if config.pixel_units && *n != 0.0 && !is_unitless(key) => {
            format!("{value}px")
        }
        other => other.to_string(),
    };
    // Rules are stored one per line.
    text.replace(['\n', '\r'], " ")
}

/// The `(css-property, css-value)` declarations for one resolved property,
/// including vendor-prefixed copies when enabled.
pub fn declarations(key: &str, value: &Literal, config: &StyleConfig) -> Vec<(String, String)> {
    let name = kebab_case(key);
    let text = css_value(key, value, config);
    let mut out = Vec::with_capacity(2);

    if config.vendor_prefixes {
        if let Some((_, prefixes)) = PREFIXED.iter().find(|(k, _)| *k == key) {
            for prefix in *prefixes {
                out.push((format!("{prefix}{name}"), text.clone()));
            }
        }
        if name == "position" && text == "sticky" {
            out.push((name.clone(), "-webkit-sticky".to_owned()));
        }
    }

    out.push((name, text));
    out
}

/// Format declarations as a rule block: `{ a: b; c: d; }`.
pub fn block(declarations: &[(String, String)]) -> String {
    let mut out = String::from("{ ");
    for (name, value) in declarations {
        out.push_str(name);
        out.push_str(": ");
        out.push_str(value);
        out.push_str("; ");
    }
    out.push('}');
    out
}

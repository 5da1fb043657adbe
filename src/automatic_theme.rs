//! Light/dark themes backed by CSS variables.
//!
//! Both variants are written once as user rules; the returned theme refers to
//! the variables, so the browser switches between them with
//! `prefers-color-scheme` and no re-render.

use serde_json::{Map, Value};

use crate::error::ThemeError;
use crate::registry::key::StyleKey;
use crate::registry::Registry;
use crate::style::value::Literal;
use crate::theme::{kind_of, Theme};

struct Variable {
    name: String,
    light: String,
    dark: String,
}

/// Keep a name usable inside a CSS custom property.
fn ident(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

fn leaf(value: &Value) -> String {
    Literal::from_json(value).to_string()
}

fn walk(
    prefix: &str,
    path: &str,
    light: &Map<String, Value>,
    dark: &Map<String, Value>,
    variables: &mut Vec<Variable>,
) -> Result<Map<String, Value>, ThemeError> {
    let mut out = Map::new();
    for (name, light_value) in light {
        let here = if path.is_empty() {
            name.clone()
        } else {
            format!("{path}.{name}")
        };
        let dark_value = dark
            .get(name)
            .ok_or_else(|| ThemeError::ShapeMismatch { path: here.clone() })?;

        let value = match (light_value, dark_value) {
            (Value::Object(l), Value::Object(d)) => {
                Value::Object(walk(&format!("{prefix}-{}", ident(name)), &here, l, d, variables)?)
            }
            (Value::Object(_), _) | (_, Value::Object(_)) => {
                return Err(ThemeError::ShapeMismatch { path: here });
            }
            (l, d) => {
                let variable = format!("{prefix}-{}", ident(name));
                let reference = Value::String(format!("var({variable})"));
                variables.push(Variable {
                    name: variable,
                    light: leaf(l),
                    dark: leaf(d),
                });
                reference
            }
        };
        out.insert(name.clone(), value);
    }
    if let Some(extra) = dark.keys().find(|name| !light.contains_key(*name)) {
        let path = if path.is_empty() {
            extra.clone()
        } else {
            format!("{path}.{extra}")
        };
        return Err(ThemeError::ShapeMismatch { path });
    }
    Ok(out)
}

fn body(variables: &[Variable], pick: impl Fn(&Variable) -> &str) -> String {
    let declarations: Vec<String> = variables
        .iter()
        .map(|variable| format!("{}: {};", variable.name, pick(variable)))
        .collect();
    format!("body {{ {} }}", declarations.join(" "))
}

/// Register light and dark variants of a theme as CSS variables and return a
/// theme whose leaves are `var(--…)` references.
///
/// Variables are named `--{key}-{path}-{leaf}`. The user rules `{key}-light`
/// and `{key}-dark` are registered once; calling again with the same key is a
/// no-op for the registry.
pub fn automatic_theme(
    registry: &mut Registry,
    key: &str,
    light: &Value,
    dark: &Value,
) -> Result<Theme, ThemeError> {
    let (Value::Object(light), Value::Object(dark)) = (light, dark) else {
        let culprit = if light.is_object() { dark } else { light };
        return Err(ThemeError::NotAnObject(kind_of(culprit)));
    };

    let key = ident(key);
    let mut variables = Vec::new();
    let tree = walk(&format!("--{key}"), "", light, dark, &mut variables)?;

    registry.add_rule(
        StyleKey::user(format!("{key}-light")),
        body(&variables, |variable| variable.light.as_str()),
    );
    registry.add_rule(
        StyleKey::user(format!("{key}-dark")),
        format!(
            "@media (prefers-color-scheme: dark) {{ {} }}",
            body(&variables, |variable| variable.dark.as_str())
        ),
    );

    Theme::from_value(Value::Object(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn variables_and_rules() {
        let mut registry = Registry::new();
        let theme = automatic_theme(
            &mut registry,
            "app",
            &json!({ "colors": { "bg": "white", "fg": "black" }, "radius": 4 }),
            &json!({ "colors": { "bg": "black", "fg": "white" }, "radius": 4 }),
        )
        .unwrap();

        assert_eq!(theme.get("colors.bg"), Some(&json!("var(--app-colors-bg)")));
        assert_eq!(theme.get("radius"), Some(&json!("var(--app-radius)")));

        let rules = registry.flush();
        assert_eq!(
            rules,
            vec![
                "body { --app-colors-bg: white; --app-colors-fg: black; --app-radius: 4; }".to_owned(),
                "@media (prefers-color-scheme: dark) { body { --app-colors-bg: black; --app-colors-fg: white; --app-radius: 4; } }"
                    .to_owned(),
            ]
        );
    }

    #[test]
    fn registering_twice_is_a_no_op() {
        let mut registry = Registry::new();
        let light = json!({ "a": 1 });
        let dark = json!({ "a": 2 });
        automatic_theme(&mut registry, "t", &light, &dark).unwrap();
        registry.flush();
        automatic_theme(&mut registry, "t", &light, &dark).unwrap();
        assert!(registry.flush().is_empty());
    }

    #[test]
    fn shape_mismatches_are_reported() {
        let mut registry = Registry::new();
        let err = automatic_theme(
            &mut registry,
            "t",
            &json!({ "colors": { "bg": "white" } }),
            &json!({ "colors": "black" }),
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::ShapeMismatch { ref path } if path == "colors"));

        let err = automatic_theme(
            &mut registry,
            "t",
            &json!({ "colors": { "bg": "white" } }),
            &json!({ "colors": { "bg": "black", "fg": "white" } }),
        )
        .unwrap_err();
        assert!(matches!(err, ThemeError::ShapeMismatch { ref path } if path == "colors.fg"));
        assert!(registry.is_empty());
    }

    #[test]
    fn non_objects_are_rejected() {
        let mut registry = Registry::new();
        let err = automatic_theme(&mut registry, "t", &json!({}), &json!([1])).unwrap_err();
        assert!(matches!(err, ThemeError::NotAnObject("array")));
    }
}

//! Stylesheet serialization and parsing.
//!
//! A serialized stylesheet is plain CSS, one rule per line, split into
//! sections by marker comments:
//!
//! ```text
//!
//! /* a-normal-default */
//! .ys-color-black { color: black; }
//!
//! /* a-hover-default */
//! :where(body:not(.noHover)) .ys-hover_color-blue:hover { color: blue; }
//! ```
//!
//! The rule keys travel next to it as a space-separated manifest, one key per
//! rule line, in the same order.

use std::collections::BTreeMap;

use crate::atomic::rule::precedence;
use crate::config::MARKER_ATTRIBUTE;
use crate::state::State;

use super::key::{Category, SectionKey, StyleKey};

/// A rule stored in a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub key: String,
    pub css: String,
}

/// Rules grouped by section. Sections iterate in output order.
pub type Sections = BTreeMap<SectionKey, Vec<Rule>>;

/// A serialized stylesheet and its key manifest.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stylesheet {
    pub css: String,
    pub keys: Vec<String>,
}

impl Stylesheet {
    /// The manifest attribute value: keys joined by spaces.
    pub fn manifest(&self) -> String {
        self.keys.join(" ")
    }

    /// Server markup: a `<style>` element carrying the manifest.
    pub fn to_component(&self) -> String {
        let manifest = html_escape::encode_double_quoted_attribute(&self.manifest()).into_owned();
        // A literal `</style` would end the element early.
        let css = self.css.replace("</style", "<\\/style");
        format!("<style {MARKER_ATTRIBUTE}=\"{manifest}\">{css}</style>")
    }
}

/// Rules of one section in output order: CSS shorthands first, then
/// longhands, each group in registration order.
pub fn ordered(rules: &[Rule]) -> impl Iterator<Item = &Rule> {
    let shorthands = rules.iter().filter(|rule| precedence(&rule.css) == 0);
    let longhands = rules.iter().filter(|rule| precedence(&rule.css) != 0);
    shorthands.chain(longhands)
}

/// Serialize every section in canonical order.
pub fn serialize(sections: &Sections) -> Stylesheet {
    let mut lines = Vec::new();
    let mut keys = Vec::new();
    for (section, rules) in sections {
        if rules.is_empty() {
            continue;
        }
        lines.push(String::new());
        lines.push(section.marker());
        for rule in ordered(rules) {
            lines.push(rule.css.clone());
            keys.push(rule.key.clone());
        }
    }
    Stylesheet {
        css: lines.join("\n"),
        keys,
    }
}

/// The outcome of reading a serialized stylesheet back.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parsed {
    /// Recovered rules with their full keys, in stylesheet order.
    pub rules: Vec<(StyleKey, String)>,
    /// Rule lines found in the stylesheet.
    pub rule_lines: usize,
    /// Whether the manifest ran out before the rule lines did.
    pub truncated: bool,
}

/// Read a serialized stylesheet back into keyed rules.
///
/// Stops at the first rule line without a manifest key. Rules before any
/// marker belong to `a-normal-default`. Rules under an unrecognized marker
/// are skipped but still consume their key, so later sections stay aligned.
pub fn parse(css: &str, keys: &[&str]) -> Parsed {
    let mut parsed = Parsed::default();
    let mut section = Some(SectionKey {
        category: Category::Atomic,
        state: State::Normal,
        breakpoint: None,
    });
    let mut keys = keys.iter();

    for line in css.lines().map(str::trim).filter(|line| !line.is_empty()) {
        if let Some(marker) = SectionKey::parse_marker(line) {
            section = match marker {
                Ok(key) => Some(key),
                Err(unknown) => {
                    log::warn!("unrecognized stylesheet section `{unknown}`");
                    None
                }
            };
            continue;
        }

        parsed.rule_lines += 1;
        if parsed.truncated {
            continue;
        }
        let Some(key) = keys.next() else {
            parsed.truncated = true;
            continue;
        };
        if let Some(section) = section {
            let key = StyleKey {
                category: section.category,
                key: (*key).to_owned(),
                breakpoint: section.breakpoint,
                state: section.state,
            };
            parsed.rules.push((key, line.to_owned()));
        }
    }
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::Breakpoint;
    use pretty_assertions::assert_eq;

    fn rule(key: &str, css: &str) -> Rule {
        Rule {
            key: key.to_owned(),
            css: css.to_owned(),
        }
    }

    fn sections() -> Sections {
        let mut sections = Sections::new();
        sections.insert(
            SectionKey {
                category: Category::Atomic,
                state: State::Hover,
                breakpoint: None,
            },
            vec![rule("ys-hover_color-blue", ".ys-hover_color-blue:hover { color: blue; }")],
        );
        sections.insert(
            SectionKey {
                category: Category::Atomic,
                state: State::Normal,
                breakpoint: None,
            },
            vec![
                rule("ys-backgroundColor-red", ".ys-backgroundColor-red { background-color: red; }"),
                rule("ys-background-unset", ".ys-background-unset { background: unset; }"),
            ],
        );
        sections
    }

    #[test]
    fn serialize_orders_sections_and_shorthands() {
        let sheet = serialize(&sections());
        insta::assert_snapshot!(sheet.css.trim(), @r"
        /* a-normal-default */
        .ys-background-unset { background: unset; }
        .ys-backgroundColor-red { background-color: red; }

        /* a-hover-default */
        .ys-hover_color-blue:hover { color: blue; }
        ");
        assert_eq!(
            sheet.manifest(),
            "ys-background-unset ys-backgroundColor-red ys-hover_color-blue"
        );
        assert!(sheet.css.starts_with("\n/* a-normal-default */"));
    }

    #[test]
    fn empty_sections_are_skipped() {
        let mut sections = Sections::new();
        sections.insert(
            SectionKey {
                category: Category::User,
                state: State::Normal,
                breakpoint: None,
            },
            Vec::new(),
        );
        assert_eq!(serialize(&sections), Stylesheet::default());
    }

    #[test]
    fn parse_recovers_serialized_rules() {
        let sheet = serialize(&sections());
        let keys: Vec<&str> = sheet.keys.iter().map(String::as_str).collect();
        let parsed = parse(&sheet.css, &keys);
        assert_eq!(parsed.rule_lines, 3);
        assert!(!parsed.truncated);
        let (key, css) = &parsed.rules[2];
        assert_eq!(key, &StyleKey::atomic("ys-hover_color-blue", State::Hover, None));
        assert_eq!(css, ".ys-hover_color-blue:hover { color: blue; }");
    }

    #[test]
    fn parse_stops_when_keys_run_out() {
        let css = "/* a-normal-md */\n.a { color: red; }\n.b { color: blue; }";
        let parsed = parse(css, &["a"]);
        assert!(parsed.truncated);
        assert_eq!(parsed.rule_lines, 2);
        assert_eq!(
            parsed.rules,
            vec![(
                StyleKey::atomic("a", State::Normal, Some(Breakpoint::Md)),
                ".a { color: red; }".to_owned()
            )]
        );
    }

    #[test]
    fn parse_skips_unknown_sections_but_keeps_alignment() {
        let css = "/* z-normal-default */\n.x { color: red; }\n/* u-normal-default */\nbody { margin: 0; }";
        let parsed = parse(css, &["x", "reset"]);
        assert_eq!(parsed.rules.len(), 1);
        assert_eq!(parsed.rules[0].0, StyleKey::user("reset"));
    }

    #[test]
    fn parse_puts_unmarked_rules_in_the_default_section() {
        let css = ".a { color: red; }\n/* a-hover-default */\n.b:hover { color: blue; }";
        let parsed = parse(css, &["a", "b"]);
        assert_eq!(
            parsed.rules,
            vec![
                (StyleKey::atomic("a", State::Normal, None), ".a { color: red; }".to_owned()),
                (
                    StyleKey::atomic("b", State::Hover, None),
                    ".b:hover { color: blue; }".to_owned()
                ),
            ]
        );
    }

    #[test]
    fn component_markup_escapes() {
        let sheet = Stylesheet {
            css: ".a { content: \"</style>\"; }".to_owned(),
            keys: vec!["a\"b".to_owned()],
        };
        assert_eq!(
            sheet.to_component(),
            "<style data-yoshiki=\"a&quot;b\">.a { content: \"<\\/style>\"; }</style>"
        );
    }
}

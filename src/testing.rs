//! Test helpers: shared registries and stylesheet inspection.
//!
//! Serialized stylesheets are hard to assert on as a whole; these split them
//! back into their marked sections.

use std::cell::RefCell;
use std::rc::Rc;

use crate::api::StyleContext;
use crate::registry::key::SectionKey;
use crate::registry::Registry;
use crate::theme::Theme;

/// A fresh registry ready to share with a [`StyleContext`].
pub fn shared_registry() -> Rc<RefCell<Registry>> {
    Rc::new(RefCell::new(Registry::new()))
}

/// A browser context over `theme` with its own registry.
pub fn browser_context(theme: Theme) -> (StyleContext, Rc<RefCell<Registry>>) {
    let registry = shared_registry();
    let ctx = StyleContext::new(theme).with_registry(Rc::clone(&registry));
    (ctx, registry)
}

/// Split a serialized stylesheet into `(section marker name, rules)` pairs, in
/// stylesheet order. Lines before the first marker are reported under `""`.
pub fn sections(css: &str) -> Vec<(String, Vec<String>)> {
    let mut out: Vec<(String, Vec<String>)> = Vec::new();
    for line in css.lines().map(str::trim).filter(|line| !line.is_empty()) {
        match SectionKey::parse_marker(line) {
            Some(Ok(section)) => out.push((section.to_string(), Vec::new())),
            Some(Err(unknown)) => out.push((unknown, Vec::new())),
            None => match out.last_mut() {
                Some((_, rules)) => rules.push(line.to_owned()),
                None => out.push((String::new(), vec![line.to_owned()])),
            },
        }
    }
    out
}

/// The section names of a serialized stylesheet, in order.
pub fn section_names(css: &str) -> Vec<String> {
    sections(css).into_iter().map(|(name, _)| name).collect()
}

/// The rules of one section (`"a-hover-default"`), or an empty list.
pub fn rules_in(css: &str, section: &str) -> Vec<String> {
    sections(css)
        .into_iter()
        .find(|(name, _)| name == section)
        .map(|(_, rules)| rules)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CSS: &str = "\n/* a-normal-default */\n.a { color: red; }\n.b { margin: 0; }\n\n/* g-press-md */\n.c { color: blue; }";

    #[test]
    fn splits_sections() {
        assert_eq!(section_names(CSS), vec!["a-normal-default", "g-press-md"]);
        assert_eq!(
            rules_in(CSS, "a-normal-default"),
            vec![".a { color: red; }", ".b { margin: 0; }"]
        );
        assert!(rules_in(CSS, "u-normal-default").is_empty());
    }

    #[test]
    fn stray_lines_get_an_unnamed_section() {
        assert_eq!(
            sections(".x {}\n/* zzz */"),
            vec![
                (String::new(), vec![".x {}".to_owned()]),
                ("zzz".to_owned(), Vec::new()),
            ]
        );
    }
}

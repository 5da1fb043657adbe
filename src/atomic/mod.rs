//! Atomic class generator.
//!
//! Every resolved `(property, value, state, breakpoint)` tuple becomes one
//! class and one rule. The same tuple always yields the same class name, so
//! components asking for the same declaration share a single rule.
//!
//! Pipeline per property:
//!
//! ```text
//! shorthand::expand -> resolve::apply_theme -> one class per breakpoint tier
//! ```

pub mod class_name;
pub mod prefix;
pub mod rule;

use crate::config::StyleConfig;
use crate::registry::key::StyleKey;
use crate::resolve::{apply_theme, resolve, ResolveContext};
use crate::shorthand;
use crate::state::{State, StateStyles};
use crate::style::declaration::Entry;
use crate::style::value::{Literal, StyleValue};
use crate::theme::{Breakpoint, Theme};

/// A generated class and the rule that styles it.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub class_name: String,
    pub key: StyleKey,
    pub css: String,
}

/// Structured literals only exist on native; they have no CSS text.
fn css_literal<'v>(property: &str, value: &'v Literal) -> Option<&'v Literal> {
    if let Literal::Json(json) = value {
        log::warn!("`{property}` has no CSS form ({json}), skipping it");
        return None;
    }
    Some(value)
}

/// Generates classes for one theme and configuration.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    theme: &'a Theme,
    config: &'a StyleConfig,
}

impl<'a> Generator<'a> {
    pub fn new(theme: &'a Theme, config: &'a StyleConfig) -> Self {
        Self { theme, config }
    }

    /// The class and rule for one resolved property.
    ///
    /// Returns `None` when the value resolved to nothing: no class, no rule.
    pub fn generate(
        &self,
        property: &str,
        value: Option<&Literal>,
        state: State,
        breakpoint: Option<Breakpoint>,
    ) -> Option<Generated> {
        let value = css_literal(property, value?)?;
        let class_name = class_name::atomic(state, breakpoint, property, value);
        let selectors = rule::atomic_selectors(state, &class_name, &self.config.no_hover_class);
        let declarations = prefix::declarations(property, value, self.config);
        let css = rule::rule(&selectors, &declarations, breakpoint);
        Some(Generated {
            key: StyleKey::atomic(class_name.clone(), state, breakpoint),
            class_name,
            css,
        })
    }

    /// The class and rule for a child target's property under its parent's
    /// `state`. The rule only matches direct children of the parent's scope
    /// class.
    pub fn generate_child(
        &self,
        target: &str,
        property: &str,
        value: Option<&Literal>,
        state: State,
        breakpoint: Option<Breakpoint>,
    ) -> Option<Generated> {
        let value = css_literal(property, value?)?;
        let class_name = class_name::child(state, breakpoint, target, property, value);
        let selectors = rule::scoped_selectors(
            state,
            &class_name::scope(target),
            &class_name,
            &self.config.no_hover_class,
        );
        let declarations = prefix::declarations(property, value, self.config);
        let css = rule::rule(&selectors, &declarations, breakpoint);
        Some(Generated {
            key: StyleKey::general(class_name.clone(), state, breakpoint),
            class_name,
            css,
        })
    }

    /// All classes for one declared property under `state`.
    ///
    /// Breakpoint maps yield one media-scoped class per tier entry, each tier
    /// value resolved at its own tier. `child` names the target when the
    /// property belongs to a child's state bucket.
    pub fn property(
        &self,
        key: &str,
        value: &StyleValue,
        state: State,
        child: Option<&str>,
    ) -> Vec<Generated> {
        let mut out = Vec::new();
        for (primitive, value) in shorthand::expand(key, value, self.config.target) {
            match apply_theme(&value, self.theme) {
                StyleValue::Breakpoints(map) => {
                    for (tier, tier_value) in map.iter() {
                        let ctx = ResolveContext::new(self.theme, tier);
                        let literal = resolve(tier_value, &ctx);
                        out.extend(self.one(child, &primitive, literal.as_ref(), state, Some(tier)));
                    }
                }
                other => {
                    let ctx = ResolveContext::new(self.theme, Breakpoint::Xs);
                    let literal = resolve(&other, &ctx);
                    out.extend(self.one(child, &primitive, literal.as_ref(), state, None));
                }
            }
        }
        out
    }

    fn one(
        &self,
        child: Option<&str>,
        property: &str,
        value: Option<&Literal>,
        state: State,
        breakpoint: Option<Breakpoint>,
    ) -> Option<Generated> {
        // A child's normal styles are plain classes on the child itself.
        match child {
            Some(target) if state != State::Normal => {
                self.generate_child(target, property, value, state, breakpoint)
            }
            _ => self.generate(property, value, state, breakpoint),
        }
    }

    /// All classes of a target's state buckets, in cascade order.
    pub fn styles(&self, styles: &StateStyles, child: Option<&str>) -> Vec<Generated> {
        let mut out = Vec::new();
        for (state, bucket) in styles.buckets() {
            for (key, entry) in bucket.iter() {
                if let Entry::Value(value) = entry {
                    out.extend(self.property(key, value, state, child));
                }
            }
        }
        out
    }
}

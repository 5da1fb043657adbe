//! Style value resolution.
//!
//! Turns a [`StyleValue`] into a concrete [`Literal`] for a theme and an
//! active breakpoint tier. Breakpoint maps cascade downward: the largest tier
//! `<=` the active one that has an entry wins; larger tiers are never used.

use crate::config::Target;
use crate::style::value::{Literal, StyleValue};
use crate::theme::{Breakpoint, Theme};
use crate::units::Viewport;

/// Theme functions returning theme functions are followed at most this deep.
const MAX_THEME_DEPTH: usize = 16;

/// Inputs of a resolution.
#[derive(Debug, Clone, Copy)]
pub struct ResolveContext<'a> {
    pub theme: &'a Theme,
    pub breakpoint: Breakpoint,
    /// Lengths become numbers only on native.
    pub target: Target,
    pub viewport: Option<Viewport>,
}

impl<'a> ResolveContext<'a> {
    /// Create a browser context.
    pub fn new(theme: &'a Theme, breakpoint: Breakpoint) -> Self {
        Self {
            theme,
            breakpoint,
            target: Target::Browser,
            viewport: None,
        }
    }

    /// Resolve lengths for `target`, measured against `viewport` (builder).
    pub fn for_target(mut self, target: Target, viewport: Option<Viewport>) -> Self {
        self.target = target;
        self.viewport = viewport;
        self
    }

    /// The same context at another tier.
    pub fn at(&self, breakpoint: Breakpoint) -> Self {
        Self { breakpoint, ..*self }
    }
}

/// Resolve a value to a literal. `None` means the property is omitted.
pub fn resolve(value: &StyleValue, ctx: &ResolveContext<'_>) -> Option<Literal> {
    resolve_depth(value, ctx, 0)
}

fn resolve_depth(value: &StyleValue, ctx: &ResolveContext<'_>, depth: usize) -> Option<Literal> {
    match value {
        StyleValue::Literal(literal) => Some(literal.clone()),
        StyleValue::Unset => None,
        StyleValue::Length(length) => Some(length.literal(ctx.target, ctx.viewport.as_ref())),
        StyleValue::Theme(f) => {
            if depth >= MAX_THEME_DEPTH {
                log::warn!("theme function nesting exceeds {MAX_THEME_DEPTH}, dropping value");
                return None;
            }
            resolve_depth(&f.call(ctx.theme), ctx, depth + 1)
        }
        StyleValue::Breakpoints(map) => ctx
            .breakpoint
            .cascade()
            .find_map(|tier| map.get(tier))
            .and_then(|tier_value| resolve_depth(tier_value, ctx, depth)),
    }
}

/// Call theme functions until the value is a literal, a breakpoint map, or unset.
///
/// The browser target needs the breakpoint map itself, to emit one media
/// query per tier, rather than a single tier's value.
pub fn apply_theme(value: &StyleValue, theme: &Theme) -> StyleValue {
    let mut current = value.clone();
    for _ in 0..MAX_THEME_DEPTH {
        match current {
            StyleValue::Theme(f) => current = f.call(theme),
            other => return other,
        }
    }
    log::warn!("theme function nesting exceeds {MAX_THEME_DEPTH}, dropping value");
    StyleValue::Unset
}

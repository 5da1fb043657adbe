//! Selector and rule text for generated classes.

use crate::state::State;
use crate::theme::Breakpoint;

use super::prefix;

/// Selectors matching `base` under an interaction state.
///
/// Hover is guarded by `no_hover_class` on `body`, so touch input can switch
/// hover rules off. `fover` yields a selector list matching hover or focus.
pub fn state_selectors(state: State, base: &str, no_hover_class: &str) -> Vec<String> {
    let hover = || format!(":where(body:not(.{no_hover_class})) {base}:hover");
    let focus = || format!("{base}:focus-visible");
    match state {
        State::Normal => vec![base.to_owned()],
        State::Fover => vec![hover(), focus()],
        State::Hover => vec![hover()],
        State::Focus => vec![focus()],
        State::Press => vec![format!("{base}:active")],
    }
}

/// Selectors for an atomic class.
pub fn atomic_selectors(state: State, class: &str, no_hover_class: &str) -> Vec<String> {
    state_selectors(state, &format!(".{class}"), no_hover_class)
}

/// Selectors for a child class styled by the state of its parent scope.
///
/// Only direct children of the scope element match, so a nested component
/// reusing the child name is not styled by the outer parent's state.
pub fn scoped_selectors(state: State, scope: &str, class: &str, no_hover_class: &str) -> Vec<String> {
    state_selectors(state, &format!(".{scope}"), no_hover_class)
        .into_iter()
        .map(|selector| format!("{selector} > .{class}"))
        .collect()
}

/// A full one-line rule: selector list, block, and an optional media query.
pub fn rule(
    selectors: &[String],
    declarations: &[(String, String)],
    breakpoint: Option<Breakpoint>,
) -> String {
    let body = format!("{} {}", selectors.join(", "), prefix::block(declarations));
    match breakpoint {
        Some(tier) => media(tier, &body),
        None => body,
    }
}

/// Wrap a rule in the min-width media query of a tier.
pub fn media(tier: Breakpoint, rule: &str) -> String {
    format!("@media (min-width: {}px) {{ {rule} }}", tier.threshold())
}

/// The first property declared by a rule, read back from its text.
fn first_property(css: &str) -> Option<&str> {
    let open = css.rfind('{')?;
    let declaration = &css[open + 1..];
    let colon = declaration.find(':')?;
    Some(declaration[..colon].trim())
}

/// Ordering weight of a rule inside its section: CSS shorthands (0) before
/// longhands (1).
///
/// Computed from the rule text alone, so a hydrated registry orders rules the
/// same way the one that produced the stylesheet did.
pub fn precedence(css: &str) -> u8 {
    match first_property(css) {
        Some(property) if prefix::is_css_shorthand(property) => 0,
        _ => 1,
    }
}

//! Interaction states and the state splitter.
//!
//! [`split`] partitions a flattened declaration into the normal bucket and one
//! bucket per interaction state, for the component itself and separately for
//! every named child target.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::style::declaration::{Entry, Style, FOCUS, FOVER, HOVER, PRESS, SELF};

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// The interaction state a rule applies under.
///
/// Declaration order is cascade order: later states override earlier ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    Normal,
    /// Hover or focus.
    Fover,
    Hover,
    Focus,
    Press,
}

impl State {
    /// All states in cascade order.
    pub const ALL: [State; 5] = [
        State::Normal,
        State::Fover,
        State::Hover,
        State::Focus,
        State::Press,
    ];

    /// Name used in declarations, class names and section markers.
    pub fn name(self) -> &'static str {
        match self {
            State::Normal => "normal",
            State::Fover => FOVER,
            State::Hover => HOVER,
            State::Focus => FOCUS,
            State::Press => PRESS,
        }
    }

    /// The state bucket a reserved declaration key names.
    pub fn from_key(key: &str) -> Option<State> {
        match key {
            FOVER => Some(State::Fover),
            HOVER => Some(State::Hover),
            FOCUS => Some(State::Focus),
            PRESS => Some(State::Press),
            _ => None,
        }
    }

    /// Whether rules of this state apply under `interaction`.
    pub fn is_active(self, interaction: Interaction) -> bool {
        match self {
            State::Normal => true,
            State::Fover => interaction.hovered || interaction.focused,
            State::Hover => interaction.hovered,
            State::Focus => interaction.focused,
            State::Press => interaction.pressed,
        }
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for State {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "normal" {
            return Ok(State::Normal);
        }
        State::from_key(s).ok_or(())
    }
}

/// Live interaction state of a component, as reported by the gesture layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interaction {
    pub hovered: bool,
    pub focused: bool,
    pub pressed: bool,
}

impl Interaction {
    /// No interaction.
    pub fn idle() -> Self {
        Self::default()
    }

    /// Set the hovered flag (builder).
    pub fn hovered(mut self, hovered: bool) -> Self {
        self.hovered = hovered;
        self
    }

    /// Set the focused flag (builder).
    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    /// Set the pressed flag (builder).
    pub fn pressed(mut self, pressed: bool) -> Self {
        self.pressed = pressed;
        self
    }
}

// ---------------------------------------------------------------------------
// Split
// ---------------------------------------------------------------------------

/// The per-state declarations of one target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateStyles {
    /// Unconditional properties.
    pub normal: Style,
    /// Properties per interaction state. Never contains [`State::Normal`].
    pub states: BTreeMap<State, Style>,
}

impl StateStyles {
    /// Returns `true` if any state bucket is non-empty.
    pub fn has_state(&self) -> bool {
        self.states.values().any(|style| !style.is_empty())
    }

    /// The bucket for a state; `Normal` yields the normal bucket.
    pub fn get(&self, state: State) -> Option<&Style> {
        match state {
            State::Normal => Some(&self.normal),
            other => self.states.get(&other),
        }
    }

    /// Non-empty buckets in cascade order, normal first.
    pub fn buckets(&self) -> impl Iterator<Item = (State, &Style)> {
        std::iter::once((State::Normal, &self.normal))
            .chain(self.states.iter().map(|(state, style)| (*state, style)))
            .filter(|(_, style)| !style.is_empty())
    }

    fn bucket_mut(&mut self, state: State) -> &mut Style {
        match state {
            State::Normal => &mut self.normal,
            other => self.states.entry(other).or_default(),
        }
    }
}

/// A declaration split by target and state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Split {
    /// The component's own styles.
    pub root: StateStyles,
    /// Styles for named child targets, aggregated across all states.
    pub children: BTreeMap<String, StateStyles>,
}

impl Split {
    /// Returns `true` if the root or any child has a state bucket.
    pub fn has_state(&self) -> bool {
        self.root.has_state() || self.children.values().any(StateStyles::has_state)
    }
}

/// Split a declaration into normal and per-state buckets.
pub fn split(style: &Style) -> Split {
    let mut out = Split::default();

    if style.iter().all(|(_, entry)| matches!(entry, Entry::Value(_))) {
        out.root.normal = style.clone();
        return out;
    }

    split_into(style, State::Normal, None, &mut out);
    out
}

/// Walk `style` as the `state` bucket of `target` (`None` is the root).
fn split_into(style: &Style, state: State, target: Option<&str>, out: &mut Split) {
    for (key, entry) in style.iter() {
        match entry {
            Entry::Value(value) => {
                let styles = match target {
                    None => &mut out.root,
                    Some(name) => out.children.entry(name.to_owned()).or_default(),
                };
                styles.bucket_mut(state).insert(key, Entry::Value(value.clone()));
            }
            Entry::Nested(nested) => match (State::from_key(key), state) {
                (Some(inner), State::Normal) => split_into(nested, inner, target, out),
                (Some(inner), outer) => {
                    log::debug!("ignoring `{inner}` bucket nested inside `{outer}`");
                }
                (None, _) if key == SELF => split_into(nested, state, target, out),
                (None, _) => match target {
                    None => split_into(nested, state, Some(key), out),
                    Some(parent) => {
                        log::debug!("ignoring child target `{key}` nested inside `{parent}`");
                    }
                },
            },
        }
    }
}

//! Rule identity and stylesheet section ordering.
//!
//! Every registered rule lives in exactly one section, identified by a
//! [`SectionKey`]. Sections serialize in canonical order, which is what keeps
//! the cascade deterministic no matter which component registered first:
//!
//! ```text
//! (category, state, breakpoint)
//! ```
//!
//! Fields are ordered so that the derived `Ord` (lexicographic) is the output
//! order:
//! - atomic before general (compound child) before user rules
//! - normal before fover before hover before focus before press
//! - the default breakpoint before xs before sm ... before xl

use std::fmt;
use std::str::FromStr;

use crate::state::State;
use crate::theme::Breakpoint;

/// Origin of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// One property/value pair for one class.
    Atomic,
    /// Compound rules: child targets styled by their parent's state.
    General,
    /// Rules registered directly by application code.
    User,
}

impl Category {
    /// All categories in output order.
    pub const ALL: [Category; 3] = [Category::Atomic, Category::General, Category::User];

    /// One-letter code used in section markers.
    pub fn code(self) -> char {
        match self {
            Category::Atomic => 'a',
            Category::General => 'g',
            Category::User => 'u',
        }
    }

    /// Category for a section marker code.
    pub fn from_code(code: &str) -> Option<Category> {
        match code {
            "a" => Some(Category::Atomic),
            "g" => Some(Category::General),
            "u" => Some(Category::User),
            _ => None,
        }
    }
}

/// Identity of a registered rule.
///
/// Two rules with equal keys are the same rule; registering one twice is a
/// no-op.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    pub category: Category,
    /// Class name for generated rules, or a caller-chosen name for user rules.
    pub key: String,
    /// `None` is the default (unconditional) breakpoint.
    pub breakpoint: Option<Breakpoint>,
    pub state: State,
}

impl StyleKey {
    /// An atomic rule key.
    pub fn atomic(key: impl Into<String>, state: State, breakpoint: Option<Breakpoint>) -> Self {
        Self {
            category: Category::Atomic,
            key: key.into(),
            breakpoint,
            state,
        }
    }

    /// A general (compound) rule key.
    pub fn general(key: impl Into<String>, state: State, breakpoint: Option<Breakpoint>) -> Self {
        Self {
            category: Category::General,
            key: key.into(),
            breakpoint,
            state,
        }
    }

    /// An unconditional user rule key.
    pub fn user(key: impl Into<String>) -> Self {
        Self {
            category: Category::User,
            key: key.into(),
            breakpoint: None,
            state: State::Normal,
        }
    }

    /// The section this rule serializes into.
    pub fn section(&self) -> SectionKey {
        SectionKey {
            category: self.category,
            state: self.state,
            breakpoint: self.breakpoint,
        }
    }
}

/// A stylesheet section. Ordering is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionKey {
    pub category: Category,
    pub state: State,
    pub breakpoint: Option<Breakpoint>,
}

impl SectionKey {
    /// The comment line that opens this section in a serialized stylesheet.
    pub fn marker(&self) -> String {
        format!("/* {self} */")
    }

    /// Parse a marker comment line. Returns `None` for any other line.
    pub fn parse_marker(line: &str) -> Option<Result<SectionKey, String>> {
        let inner = line.trim().strip_prefix("/* ")?.strip_suffix(" */")?;
        Some(inner.parse().map_err(|()| inner.to_owned()))
    }
}

impl fmt::Display for SectionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let breakpoint = self.breakpoint.map_or("default", Breakpoint::name);
        write!(f, "{}-{}-{}", self.category.code(), self.state, breakpoint)
    }
}

impl FromStr for SectionKey {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('-');
        let category = parts.next().and_then(Category::from_code).ok_or(())?;
        let state = parts.next().ok_or(())?.parse::<State>()?;
        let breakpoint = match parts.next().ok_or(())? {
            "default" => None,
            tier => Some(tier.parse::<Breakpoint>().map_err(|_| ())?),
        };
        if parts.next().is_some() {
            return Err(());
        }
        Ok(SectionKey {
            category,
            state,
            breakpoint,
        })
    }
}

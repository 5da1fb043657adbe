//! # yoshiki
//!
//! An atomic CSS-in-Rust styling engine with responsive, themed and stateful
//! declarations.
//!
//! A style declaration maps properties to values that may be literals, theme
//! functions or breakpoint maps, with nested `hover`/`focus`/`press` buckets
//! and named child targets. yoshiki turns it into inline styles for native
//! targets, or into deduplicated atomic class names plus a canonically
//! ordered stylesheet for the browser, with server rendering and client
//! hydration of that stylesheet.
//!
//! ## Core Systems
//!
//! - **[`style`]** — `Style`, `StyleValue`, `Breakpoints` and the JSON wire format
//! - **[`resolve`]** — theme functions and breakpoint cascade to concrete values
//! - **[`shorthand`]** — `p`, `pX`, `mY`, `bg`, ... expansion
//! - **[`state`]** — splitting declarations into interaction-state buckets
//! - **[`atomic`]** — class names, selectors, vendor prefixes and CSS rules
//! - **[`registry`]** — the flushable rule store, stylesheet sections and hydration
//! - **[`native`]** — inline style objects and state style functions
//! - **[`api`]** — `StyleContext::css`, the composition entry point
//! - **[`units`]** — lengths for both targets
//! - **[`automatic_theme`]** — light/dark themes backed by CSS variables
//!
//! ## Example
//!
//! ```
//! use yoshiki::{Breakpoints, Props, Style, StyleContext, Theme};
//! use yoshiki::testing::shared_registry;
//!
//! let registry = shared_registry();
//! let ctx = StyleContext::new(Theme::new()).with_registry(registry.clone());
//! let card = Style::new()
//!     .set("padding", 10)
//!     .set("backgroundColor", Breakpoints::new().xs("green").md("red"));
//!
//! let props = ctx.css(card, Props::new());
//! assert!(props.class_name.is_some());
//! assert!(!registry.borrow_mut().flush().is_empty());
//! ```

// Foundation
pub mod config;
pub mod error;
pub mod theme;

// Declarations
pub mod style;

// Pipeline
pub mod resolve;
pub mod shorthand;
pub mod state;
pub mod atomic;

// Output
pub mod native;
pub mod registry;

// Composition
pub mod api;

// Helpers
pub mod automatic_theme;
pub mod testing;
pub mod units;

pub use api::{Props, StyleContext, StyledChild, StyledProps};
pub use automatic_theme::automatic_theme;
pub use config::{StyleConfig, Target};
pub use error::{ConfigError, HydrationError, StyleError, ThemeError};
pub use native::{InlineStyle, NativeStyle, StateStyleFn};
pub use registry::document::Document;
pub use registry::key::{Category, StyleKey};
pub use registry::sink::{ServerSheet, StringSink, StylesheetSink};
pub use registry::{Phase, Registry};
pub use state::{Interaction, State};
pub use style::declaration::{Style, StyleList};
pub use style::value::{Breakpoints, Literal, StyleValue, ThemeFn};
pub use theme::{Breakpoint, Theme};
pub use units::{Length, Viewport};

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use yoshiki_macros::style;

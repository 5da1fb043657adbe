//! Engine configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Prefix of every generated class name.
pub const CLASS_PREFIX: &str = "ys-";

/// Attribute marking server-rendered and client-owned `<style>` elements.
pub const MARKER_ATTRIBUTE: &str = "data-yoshiki";

/// Which output the style API produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    /// Atomic class names plus registered stylesheet rules.
    #[default]
    Browser,
    /// Inline style objects (or state functions returning them).
    Native,
}

/// Configuration for the style engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Output target.
    pub target: Target,
    /// Body class that disables hover rules (set while the user is on touch input).
    pub no_hover_class: String,
    /// Emit vendor-prefixed declarations alongside the standard ones.
    pub vendor_prefixes: bool,
    /// Append `px` to bare numbers for properties that take a length.
    pub pixel_units: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            target: Target::Browser,
            no_hover_class: "noHover".into(),
            vendor_prefixes: true,
            pixel_units: true,
        }
    }
}

impl StyleConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config for the native target.
    pub fn native() -> Self {
        Self::default().with_target(Target::Native)
    }

    /// Parse a config from JSON text. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Set the target (builder).
    pub fn with_target(mut self, target: Target) -> Self {
        self.target = target;
        self
    }

    /// Set the no-hover body class (builder).
    pub fn with_no_hover_class(mut self, class: impl Into<String>) -> Self {
        self.no_hover_class = class.into();
        self
    }

    /// Enable or disable vendor prefixes (builder).
    pub fn with_vendor_prefixes(mut self, enabled: bool) -> Self {
        self.vendor_prefixes = enabled;
        self
    }

    /// Enable or disable automatic `px` units (builder).
    pub fn with_pixel_units(mut self, enabled: bool) -> Self {
        self.pixel_units = enabled;
        self
    }
}

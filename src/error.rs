//! Error types.
//!
//! Nothing in here crosses the style API boundary: [`crate::api::StyleContext`]
//! and [`crate::registry::Registry::flush_to_browser`] log these and degrade
//! gracefully. They are surfaced to callers that load themes, configs, or JSON
//! declarations directly, or that drive hydration by hand.

/// Errors from reading JSON style declarations.
#[derive(Debug, thiserror::Error)]
pub enum StyleError {
    #[error("expected a style object, got {0}")]
    NotAnObject(&'static str),
    #[error("invalid value for {property}: {message}")]
    InvalidValue { property: String, message: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from theme loading and automatic theme generation.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    #[error("expected a theme object, got {0}")]
    NotAnObject(&'static str),
    #[error("light and dark themes differ at `{path}`")]
    ShapeMismatch { path: String },
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from rehydrating a registry with server-rendered styles.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HydrationError {
    #[error("hydration mismatch: {rules} css rules but only {keys} keys")]
    MissingKeys { rules: usize, keys: usize },
    #[error("cannot hydrate a registry that has already been flushed")]
    AfterFlush,
}

/// Errors from loading a [`crate::config::StyleConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse style config: {0}")]
    Parse(#[from] serde_json::Error),
}

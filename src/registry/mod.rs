//! The style registry.
//!
//! An accumulating, flushable store of keyed CSS rules. Rules are kept in
//! structured `(category, state, breakpoint)` sections at all times; every
//! serialization regenerates the full stylesheet from them.
//!
//! Lifecycle:
//!
//! ```text
//! Idle -> Accumulating -> Flushed -> Accumulating -> ...
//!   \-> Hydrated (optional, before the first flush)
//! ```
//!
//! A registry is created per server render, or once per client application.

pub mod document;
pub mod key;
pub mod markup;
pub mod sheet;
pub mod sink;

use std::collections::HashSet;

use crate::error::HydrationError;

use key::StyleKey;
use sheet::{Rule, Sections, Stylesheet};
use sink::StylesheetSink;

/// Where a registry is in its lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    /// Freshly created, nothing registered.
    #[default]
    Idle,
    /// Rules are pending a flush.
    Accumulating,
    /// Server rules were read back; nothing flushed yet.
    Hydrated,
    /// Everything registered has been flushed.
    Flushed,
}

/// Keyed rule store.
#[derive(Debug, Default)]
pub struct Registry {
    /// Every key ever registered or hydrated.
    known: HashSet<StyleKey>,
    /// Rules added since the last flush, in registration order.
    pending: Vec<(StyleKey, String)>,
    /// Completed rules.
    sections: Sections,
    phase: Phase,
    has_flushed: bool,
    claimed_server_sheets: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Register a rule. No-op (returns `false`) if the key is already known,
    /// whatever the CSS text.
    ///
    /// Newlines in `css` are replaced so the rule stays on one line.
    pub fn add_rule(&mut self, key: StyleKey, css: impl Into<String>) -> bool {
        if self.known.contains(&key) {
            return false;
        }
        let css = css.into().replace(['\n', '\r'], " ");
        self.known.insert(key.clone());
        self.pending.push((key, css));
        self.phase = Phase::Accumulating;
        true
    }

    /// Whether a rule with this key was registered or hydrated.
    pub fn contains(&self, key: &StyleKey) -> bool {
        self.known.contains(key)
    }

    /// Number of known rules, flushed or not.
    pub fn len(&self) -> usize {
        self.known.len()
    }

    /// Whether no rule is known.
    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }

    /// Number of rules waiting for a flush.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Drain the rules added since the last flush (or since hydration) and
    /// mark them completed. Returns their CSS in registration order.
    ///
    /// With nothing pending this is a no-op.
    pub fn flush(&mut self) -> Vec<String> {
        if self.pending.is_empty() {
            return Vec::new();
        }

        let mut flushed = Vec::with_capacity(self.pending.len());
        for (key, css) in self.pending.drain(..) {
            flushed.push(css.clone());
            let section = key.section();
            self.sections.entry(section).or_default().push(Rule { key: key.key, css });
        }
        self.has_flushed = true;
        self.phase = Phase::Flushed;
        log::debug!("flushed {} style rule(s), {} total", flushed.len(), self.known.len());
        flushed
    }

    /// The full stylesheet of completed rules in canonical order.
    pub fn to_style_string(&self) -> Stylesheet {
        sheet::serialize(&self.sections)
    }

    /// Flush, then serialize everything completed so far.
    pub fn flush_to_string(&mut self) -> String {
        self.flush();
        self.to_style_string().css
    }

    /// Flush, then render a `<style>` element for server output.
    pub fn flush_to_component(&mut self) -> String {
        self.flush();
        self.to_style_string().to_component()
    }

    /// Read a server-emitted stylesheet back into this registry.
    ///
    /// `keys` is the manifest, one key per rule line. Returns the number of
    /// rules added. Rules read before a key/rule count mismatch are kept; the
    /// rest will simply be generated again.
    pub fn hydrate_style(&mut self, css: &str, keys: &[&str]) -> Result<usize, HydrationError> {
        if self.has_flushed {
            return Err(HydrationError::AfterFlush);
        }

        let parsed = sheet::parse(css, keys);
        let mut added = 0;
        for (key, css) in parsed.rules {
            if let Some(position) = self.pending.iter().position(|(pending, _)| *pending == key) {
                self.pending.remove(position);
            } else if self.known.contains(&key) {
                continue;
            }
            self.known.insert(key.clone());
            let section = key.section();
            self.sections.entry(section).or_default().push(Rule { key: key.key, css });
            added += 1;
        }

        self.phase = if self.pending.is_empty() {
            Phase::Hydrated
        } else {
            Phase::Accumulating
        };

        if parsed.truncated {
            return Err(HydrationError::MissingKeys {
                rules: parsed.rule_lines,
                keys: keys.len(),
            });
        }
        Ok(added)
    }

    /// Flush into a live stylesheet sink.
    ///
    /// The first call claims any server-rendered stylesheets from the sink
    /// and hydrates from them. The owned stylesheet is rewritten whenever
    /// something changed. Returns the newly flushed rules.
    pub fn flush_to_browser(&mut self, sink: &mut impl StylesheetSink) -> Vec<String> {
        let mut changed = false;
        if !self.claimed_server_sheets {
            self.claimed_server_sheets = true;
            for server in sink.claim_server_sheets() {
                changed = true;
                if let Err(err) = self.hydrate_style(&server.css, &server.keys()) {
                    log::error!("server stylesheet only partially hydrated: {err}");
                }
            }
        }

        let flushed = self.flush();
        if changed || !flushed.is_empty() {
            sink.write_sheet(&self.to_style_string());
        }
        flushed
    }
}

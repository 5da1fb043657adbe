//! Where flushed stylesheets go.

use super::sheet::Stylesheet;

/// A stylesheet emitted by a previous (server) render.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerSheet {
    pub css: String,
    /// Space-separated rule keys, one per rule line of `css`.
    pub manifest: String,
}

impl ServerSheet {
    pub fn new(css: impl Into<String>, manifest: impl Into<String>) -> Self {
        Self {
            css: css.into(),
            manifest: manifest.into(),
        }
    }

    /// The manifest split into keys.
    pub fn keys(&self) -> Vec<&str> {
        self.manifest.split_whitespace().collect()
    }
}

/// The output side of a registry flush.
pub trait StylesheetSink {
    /// Return every server-rendered stylesheet still present and take them
    /// out of the sink. A sink may keep one of them in place as the target
    /// of later [`write_sheet`](Self::write_sheet) calls.
    ///
    /// Called once, before the first flush.
    fn claim_server_sheets(&mut self) -> Vec<ServerSheet>;

    /// Replace the owned stylesheet with `sheet`.
    fn write_sheet(&mut self, sheet: &Stylesheet);
}

/// A sink that keeps the last written stylesheet as a string.
#[derive(Debug, Clone, Default)]
pub struct StringSink {
    sheet: Stylesheet,
    writes: usize,
}

impl StringSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current stylesheet CSS.
    pub fn css(&self) -> &str {
        &self.sheet.css
    }

    /// The current stylesheet as server markup.
    pub fn to_component(&self) -> String {
        self.sheet.to_component()
    }

    /// How many times the sheet was written.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl StylesheetSink for StringSink {
    fn claim_server_sheets(&mut self) -> Vec<ServerSheet> {
        Vec::new()
    }

    fn write_sheet(&mut self, sheet: &Stylesheet) {
        self.sheet = sheet.clone();
        self.writes += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_keys_split_on_whitespace() {
        let sheet = ServerSheet::new("", " a  b\nc ");
        assert_eq!(sheet.keys(), vec!["a", "b", "c"]);
        assert!(ServerSheet::default().keys().is_empty());
    }

    #[test]
    fn string_sink_keeps_last_write() {
        let mut sink = StringSink::new();
        assert!(sink.claim_server_sheets().is_empty());
        sink.write_sheet(&Stylesheet {
            css: ".a { color: red; }".to_owned(),
            keys: vec!["a".to_owned()],
        });
        sink.write_sheet(&Stylesheet {
            css: ".b { color: blue; }".to_owned(),
            keys: vec!["b".to_owned()],
        });
        assert_eq!(sink.css(), ".b { color: blue; }");
        assert_eq!(sink.writes(), 2);
        assert_eq!(
            sink.to_component(),
            "<style data-yoshiki=\"b\">.b { color: blue; }</style>"
        );
    }
}

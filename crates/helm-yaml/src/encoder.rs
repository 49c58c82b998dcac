use std::io::Write;

use tracing::debug;

use crate::annotate::Modifier;
use crate::error::{Error, Result};
use crate::layout::Layout;
use crate::node::{Kind, Node};

/// Marker line written before every document.
const DOCUMENT_START: &str = "---";

/// Encoder settings. Owned by one [`Encoder`] and changed through
/// [`Encoder::apply`]; changes take effect on the next encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// Columns per nesting level. Sequence items sit `indent - 2` columns
    /// right of their key so the text after `- ` lines up with nested keys.
    pub indent: usize,
    /// Column budget for comment lines, indentation included. `0` disables
    /// wrapping.
    pub wrap: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self { indent: 2, wrap: 0 }
    }
}

/// Sets [`Settings::indent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(pub usize);

impl Modifier<Settings> for Indent {
    fn modify(self, settings: &mut Settings) {
        settings.indent = self.0;
    }
}

/// Sets [`Settings::wrap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wrap(pub usize);

impl Modifier<Settings> for Wrap {
    fn modify(self, settings: &mut Settings) {
        settings.wrap = self.0;
    }
}

impl Modifier<Settings> for Settings {
    fn modify(self, settings: &mut Settings) {
        *settings = self;
    }
}

/// Writes documents to a sink, one `---` separated document per
/// [`encode`](Encoder::encode) call.
///
/// Not meant to be shared between threads without external locking: setting
/// changes and encodes on one instance must be serialized by the caller.
pub struct Encoder<W> {
    writer: W,
    settings: Settings,
}

impl<W: Write> Encoder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            settings: Settings::default(),
        }
    }

    #[must_use]
    pub fn with(mut self, modifier: impl Modifier<Settings>) -> Self {
        modifier.modify(&mut self.settings);
        self
    }

    pub fn apply(&mut self, modifier: impl Modifier<Settings>) -> &mut Self {
        modifier.modify(&mut self.settings);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Render `root` and append it to the sink as a new document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRoot`] before writing anything when `root` is
    /// not a mapping, and [`Error::Io`] when the sink fails.
    pub fn encode(&mut self, root: &Node) -> Result<()> {
        let Kind::Mapping(entries) = root.kind() else {
            return Err(Error::InvalidRoot {
                found: root.kind().name(),
            });
        };

        let lines = Layout::new(&self.settings).document(root, entries);
        let mut output = String::with_capacity(DOCUMENT_START.len() + 1 + lines.len() * 16);
        output.push_str(DOCUMENT_START);
        output.push('\n');
        for line in &lines {
            output.push_str(line);
            output.push('\n');
        }

        self.writer.write_all(output.as_bytes())?;
        debug!(
            indent = self.settings.indent,
            wrap = self.settings.wrap,
            entries = entries.len(),
            bytes = output.len(),
            "encoded document"
        );
        Ok(())
    }
}

/// Encode a single document into a string.
///
/// # Errors
///
/// Returns [`Error::InvalidRoot`] when `root` is not a mapping.
pub fn to_string(root: &Node, settings: Settings) -> Result<String> {
    let mut encoder = Encoder::new(Vec::new()).with(settings);
    encoder.encode(root)?;
    Ok(String::from_utf8_lossy(&encoder.into_inner()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn defaults_are_explicit() {
        let encoder = Encoder::new(Vec::new());
        assert_eq!(encoder.settings(), &Settings { indent: 2, wrap: 0 });
    }

    #[test]
    fn rejects_non_mapping_root_without_writing() {
        let mut encoder = Encoder::new(Vec::new());
        let err = encoder
            .encode(&Node::sequence([Node::scalar("1")]))
            .expect_err("sequence root must fail");
        assert!(matches!(err, Error::InvalidRoot { found: "sequence" }));
        assert!(encoder.get_ref().is_empty());
    }

    #[test]
    fn propagates_sink_errors() {
        let mut encoder = Encoder::new(FailingSink);
        let err = encoder
            .encode(&Node::mapping([("a", Node::scalar("1"))]))
            .expect_err("write must fail");
        assert!(matches!(err, Error::Io(_)));
        assert_eq!(err.to_string(), "sink closed");
    }

    #[test]
    fn empty_root_is_just_the_marker() -> anyhow::Result<()> {
        let root = Node::from(Kind::Mapping(Vec::new()));
        assert_eq!(to_string(&root, Settings::default())?, "---\n");
        Ok(())
    }

    #[test]
    fn apply_changes_later_encodes_only() -> anyhow::Result<()> {
        let root = Node::mapping([("a", Node::mapping([("b", Node::scalar("1"))]))]);
        let mut encoder = Encoder::new(Vec::new());
        encoder.encode(&root)?;
        encoder.apply(Indent(3)).apply(Wrap(40));
        assert_eq!(encoder.settings(), &Settings { indent: 3, wrap: 40 });
        encoder.encode(&root)?;
        let out = String::from_utf8(encoder.into_inner())?;
        assert_eq!(out, "---\na:\n  b: 1\n---\na:\n   b: 1\n");
        Ok(())
    }
}

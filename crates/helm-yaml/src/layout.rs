use crate::comment::wrap_comment;
use crate::encoder::Settings;
use crate::node::{Kind, Node};

/// Width of the `- ` sequence item marker.
const ITEM_MARKER: &str = "- ";

/// Recursive line renderer.
///
/// Every call receives the column its node starts at and, optionally, the
/// unterminated line already written for it (a `- ` marker, possibly a chain
/// of them). Nothing else is carried between calls.
pub(crate) struct Layout {
    indent: usize,
    wrap: usize,
}

/// The pending line left after an annotation barrier, plus whether a closing
/// directive is owed.
struct Opened {
    pending: Option<String>,
    guarded: bool,
}

impl Layout {
    pub(crate) fn new(settings: &Settings) -> Self {
        Self {
            indent: settings.indent,
            wrap: settings.wrap,
        }
    }

    /// Render a root mapping. Its entries sit at column zero.
    pub(crate) fn document(&self, root: &Node, entries: &[(String, Node)]) -> Vec<String> {
        let mut out = Vec::new();
        let opened = self.open(root, 0, None, &mut out);
        self.entries(entries, 0, opened.pending, &mut out);
        self.close(opened.guarded, 0, &mut out);
        out
    }

    /// Emit the comment and the opening directive of `node`, if any.
    ///
    /// The first comment line terminates `pending`. A condition without a
    /// comment terminates it as-is. An unannotated node hands `pending` back
    /// untouched so its content can be inlined.
    fn open(
        &self,
        node: &Node,
        column: usize,
        mut pending: Option<String>,
        out: &mut Vec<String>,
    ) -> Opened {
        if let Some(comment) = node.comment() {
            for text in wrap_comment(comment, self.wrap, column) {
                let mut line = pending.take().unwrap_or_else(|| indent(column));
                if text.is_empty() {
                    line.push('#');
                } else {
                    line.push_str("# ");
                    line.push_str(&text);
                }
                out.push(line);
            }
        }

        let Some(condition) = node.condition() else {
            return Opened {
                pending,
                guarded: false,
            };
        };
        if let Some(line) = pending.take() {
            out.push(line.trim_end().to_string());
        }
        out.push(format!("{}{{{{- {condition} }}}}", indent(column)));
        Opened {
            pending: None,
            guarded: true,
        }
    }

    fn close(&self, guarded: bool, column: usize, out: &mut Vec<String>) {
        if guarded {
            out.push(format!("{}{{{{- end }}}}", indent(column)));
        }
    }

    /// Render mapping entries with keys at `column`. Only the first entry may
    /// continue `pending`.
    fn entries(
        &self,
        entries: &[(String, Node)],
        column: usize,
        mut pending: Option<String>,
        out: &mut Vec<String>,
    ) {
        for (key, value) in entries {
            let opened = self.open(value, column, pending.take(), out);
            let mut line = start_line(opened.pending, column);
            line.push_str(key);
            line.push(':');
            self.value(value, column, line, out);
            self.close(opened.guarded, column, out);
        }
    }

    /// Render the value of a key written at `column`. Scalars stay on the key
    /// line; containers start on the following line.
    fn value(&self, value: &Node, column: usize, mut line: String, out: &mut Vec<String>) {
        if let Some(text) = inline_text(value) {
            if !text.is_empty() {
                line.push(' ');
                line.push_str(text);
            }
            out.push(line);
            return;
        }
        out.push(line);
        match value.kind() {
            Kind::Mapping(entries) => self.entries(entries, column + self.indent, None, out),
            Kind::Sequence(items) => self.items(items, column, None, out),
            Kind::Scalar(_) => {}
        }
    }

    /// Render sequence members for a sequence whose content starts at
    /// `column`. Items sit at `column + indent - 2` so the text after each
    /// marker lines up one indent unit deeper.
    fn items(
        &self,
        items: &[Node],
        column: usize,
        mut pending: Option<String>,
        out: &mut Vec<String>,
    ) {
        let item_column = (column + self.indent).saturating_sub(ITEM_MARKER.len());
        for item in items {
            let opened = self.open(item, item_column, pending.take(), out);
            let mut line = start_line(opened.pending, item_column);
            line.push_str(ITEM_MARKER);
            self.inline(item, item_column + ITEM_MARKER.len(), line, out);
            self.close(opened.guarded, item_column, out);
        }
    }

    /// Continue `line` with the content of `node`, which starts at `column`.
    fn inline(&self, node: &Node, column: usize, mut line: String, out: &mut Vec<String>) {
        if let Some(text) = inline_text(node) {
            if text.is_empty() {
                // Bare marker.
                line.truncate(line.trim_end().len());
            } else {
                line.push_str(text);
            }
            out.push(line);
            return;
        }
        match node.kind() {
            Kind::Mapping(entries) => self.entries(entries, column, Some(line), out),
            Kind::Sequence(items) => self.items(items, column, Some(line), out),
            Kind::Scalar(_) => {}
        }
    }
}

/// Text for nodes that always fit on their parent's line: scalars and empty
/// containers, which fall back to flow notation.
fn inline_text(node: &Node) -> Option<&str> {
    match node.kind() {
        Kind::Scalar(text) => Some(text),
        Kind::Sequence(items) if items.is_empty() => Some("[]"),
        Kind::Mapping(entries) if entries.is_empty() => Some("{}"),
        Kind::Sequence(_) | Kind::Mapping(_) => None,
    }
}

/// Continue `pending` padded out to `column`, or start a fresh indented line.
fn start_line(pending: Option<String>, column: usize) -> String {
    let Some(mut line) = pending else {
        return indent(column);
    };
    let width = line.chars().count();
    if width < column {
        line.extend(core::iter::repeat_n(' ', column - width));
    }
    line
}

fn indent(column: usize) -> String {
    " ".repeat(column)
}

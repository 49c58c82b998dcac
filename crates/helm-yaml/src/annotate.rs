use crate::node::Node;

/// A change applied to a node or to encoder settings.
///
/// Node annotations ([`Comment`], [`Condition`]) and encoder options
/// ([`Indent`](crate::Indent), [`Wrap`](crate::Wrap)) share this trait so
/// both can be applied at construction time or to an existing value.
pub trait Modifier<T> {
    fn modify(self, target: &mut T);
}

/// Free-text comment rendered as `# ` lines before the node.
///
/// Lines are separated by `\n`; an empty line renders as a bare `#`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment(pub String);

impl Comment {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Modifier<Node> for Comment {
    fn modify(self, node: &mut Node) {
        node.comment = Some(self.0);
    }
}

/// Template condition wrapped around the node as `{{- <text> }}` ...
/// `{{- end }}`. The text is emitted verbatim and never evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition(pub String);

impl Condition {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
}

impl Modifier<Node> for Condition {
    fn modify(self, node: &mut Node) {
        node.condition = Some(self.0);
    }
}

use crate::annotate::Modifier;

/// The content of a [`Node`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Kind {
    /// Pre-formatted literal text, written verbatim.
    Scalar(String),
    /// Anonymous members in output order.
    Sequence(Vec<Node>),
    /// Key/value entries in insertion order. Keys are not deduplicated.
    Mapping(Vec<(String, Node)>),
}

impl Kind {
    pub fn name(&self) -> &'static str {
        match self {
            Kind::Scalar(_) => "scalar",
            Kind::Sequence(_) => "sequence",
            Kind::Mapping(_) => "mapping",
        }
    }
}

/// An element of the document tree.
///
/// Besides its content a node carries at most one comment and at most one
/// template condition. Both are set through [`Node::apply`] (or the
/// builder-style [`Node::with`]); applying a second value of the same kind
/// replaces the first.
///
/// Annotating mutates the node in place, so it must not race with an encoder
/// reading the same tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: Kind,
    pub(crate) comment: Option<String>,
    pub(crate) condition: Option<String>,
}

impl From<Kind> for Node {
    fn from(kind: Kind) -> Self {
        Self {
            kind,
            comment: None,
            condition: None,
        }
    }
}

impl Node {
    pub fn scalar(text: impl Into<String>) -> Self {
        Kind::Scalar(text.into()).into()
    }

    pub fn sequence(items: impl IntoIterator<Item = Node>) -> Self {
        Kind::Sequence(items.into_iter().collect()).into()
    }

    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Node)>) -> Self {
        Kind::Mapping(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value))
                .collect(),
        )
        .into()
    }

    /// Apply an annotation and return the node, for use while building.
    #[must_use]
    pub fn with(mut self, modifier: impl Modifier<Node>) -> Self {
        modifier.modify(&mut self);
        self
    }

    /// Apply an annotation to an existing node.
    pub fn apply(&mut self, modifier: impl Modifier<Node>) -> &mut Self {
        modifier.modify(self);
        self
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut Kind {
        &mut self.kind
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn condition(&self) -> Option<&str> {
        self.condition.as_deref()
    }

    /// True when the node carries a comment or a condition.
    pub fn is_annotated(&self) -> bool {
        self.comment.is_some() || self.condition.is_some()
    }

    /// Append a member to a sequence or an entry to a mapping.
    ///
    /// Returns the value back when the node cannot hold it: a scalar never
    /// can, a sequence ignores `key`, a mapping requires one.
    pub fn push(&mut self, key: Option<&str>, value: Node) -> Result<(), Node> {
        match (&mut self.kind, key) {
            (Kind::Sequence(items), _) => {
                items.push(value);
                Ok(())
            }
            (Kind::Mapping(entries), Some(key)) => {
                entries.push((key.to_string(), value));
                Ok(())
            }
            _ => Err(value),
        }
    }

    /// Resolve a dotted path such as `spec.containers.0.image`.
    ///
    /// Mapping segments match the first entry with that key; sequence
    /// segments are decimal indices. The empty path is the node itself.
    pub fn find_mut(&mut self, path: &str) -> Option<&mut Node> {
        if path.is_empty() {
            return Some(self);
        }
        path.split('.')
            .try_fold(self, |node, segment| match &mut node.kind {
                Kind::Mapping(entries) => entries
                    .iter_mut()
                    .find(|(key, _)| key == segment)
                    .map(|(_, value)| value),
                Kind::Sequence(items) => segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get_mut(index)),
                Kind::Scalar(_) => None,
            })
    }
}

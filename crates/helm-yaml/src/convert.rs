use serde_json::Value;

use crate::node::{Kind, Node};
use crate::scalar::format_string;

/// Build an unannotated tree from a generic data value. Object key order is
/// preserved; strings are quoted only where needed.
impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::scalar("~"),
            Value::Bool(b) => Node::scalar(if *b { "true" } else { "false" }),
            Value::Number(n) => Node::scalar(n.to_string()),
            Value::String(s) => Node::scalar(format_string(s)),
            Value::Array(items) => Node::sequence(items.iter().map(Node::from)),
            Value::Object(map) => Node::from(Kind::Mapping(
                map.iter()
                    .map(|(key, value)| (format_string(key), Node::from(value)))
                    .collect(),
            )),
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Node::from(&value)
    }
}

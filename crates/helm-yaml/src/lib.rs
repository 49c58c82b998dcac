#![doc = include_str!("../README.md")]

mod annotate;
mod comment;
mod convert;
mod encoder;
mod error;
mod layout;
mod node;
mod scalar;

pub use annotate::{Comment, Condition, Modifier};
pub use comment::wrap_comment;
pub use encoder::{Encoder, Indent, Settings, Wrap, to_string};
pub use error::{Error, Result};
pub use node::{Kind, Node};
pub use scalar::format_string;

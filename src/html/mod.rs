//! Minimal tag-soup HTML handling: tokenizer, stack-based tree builder and
//! depth-first tree queries. No entity handling beyond [`entities`].

pub mod entities;
pub mod node;
pub mod tokenizer;
pub mod tree;

pub use node::{Descendants, Document, NodeId, NodeRef};
pub use tokenizer::{TokenStream, tokenize};
pub use tree::{BuildOutcome, TreeError, build_tree, parse_html};

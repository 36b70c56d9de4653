//! Builds a [`Document`] from a [`TokenStream`] with a single open-element
//! cursor: opening tags push, closing tags pop.

use thiserror::Error;
use tracing::warn;

use crate::html::node::{Document, NodeId};
use crate::html::tokenizer::{TokenStream, tokenize};

/// Tags that never get a matching close and are attached as leaves.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("closing tag {tag} at token {token_index} has no open element")]
    UnbalancedClose { tag: String, token_index: usize },
}

/// A built tree plus the reason construction stopped early, if it did.
/// Nodes built before the stop are kept.
#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub document: Document,
    pub error: Option<TreeError>,
}

impl BuildOutcome {
    pub fn is_truncated(&self) -> bool {
        self.error.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TagKind {
    Leaf,
    Close,
    Open,
    Literal,
}

fn classify(tag: &str) -> TagKind {
    if tag.starts_with("<!") {
        return TagKind::Leaf;
    }
    if tag.starts_with("</") {
        return TagKind::Close;
    }
    if !tag.starts_with('<') {
        return TagKind::Literal;
    }
    let name = tag[1..]
        .split(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .next()
        .unwrap_or("");
    if VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name)) || self_closing(tag, name) {
        TagKind::Leaf
    } else {
        TagKind::Open
    }
}

/// `<x/>`, `<x />` and `<x a="b"/>` close themselves; in `<a href=u/>` the
/// slash belongs to the unquoted value.
fn self_closing(tag: &str, name: &str) -> bool {
    let Some(head) = tag.strip_suffix("/>") else {
        return false;
    };
    head.len() == name.len() + 1
        || head.ends_with(|c: char| c.is_whitespace() || c == '"' || c == '\'')
}

pub fn build_tree(tokens: &TokenStream<'_>) -> BuildOutcome {
    let mut document = Document::new();
    let mut current = NodeId::ROOT;
    let mut error = None;

    for (token_index, (tag, text)) in tokens.pairs().enumerate() {
        match classify(tag) {
            TagKind::Leaf => {
                document.append_child(current, tag, text);
            }
            TagKind::Close => match document.parent_of(current) {
                Some(parent) => current = parent,
                None => {
                    warn!(
                        "unbalanced closing tag {tag} at token {token_index}; ignoring remaining {} tokens",
                        tokens.len() - token_index - 1
                    );
                    error = Some(TreeError::UnbalancedClose {
                        tag: tag.to_string(),
                        token_index,
                    });
                    break;
                }
            },
            TagKind::Open => {
                current = document.append_child(current, tag, text);
            }
            TagKind::Literal => document.set_text(current, tag),
        }
    }

    BuildOutcome { document, error }
}

pub fn parse_html(html: &str) -> BuildOutcome {
    build_tree(&tokenize(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_tags_become_nested_nodes() {
        let outcome = parse_html("<a><b>hello</b></a>");
        assert!(outcome.error.is_none());
        let root = outcome.document.root();
        let a = root.children().next().expect("a");
        assert_eq!(a.name(), "a");
        let b = a.children().next().expect("b");
        assert_eq!(b.name(), "b");
        assert_eq!(b.text(), "hello");
        assert_eq!(b.parent().map(|p| p.name()), Some("a"));
    }

    #[test]
    fn void_and_comment_tags_are_leaves() {
        let outcome = parse_html("<div>x<br>after<!-- note --><p>in</p></div>");
        let div = outcome.document.root().tags_by_name("div")[0];
        let kids: Vec<(&str, &str)> = div.children().map(|c| (c.name(), c.text())).collect();
        assert_eq!(kids, vec![("br", "after"), ("!--", ""), ("p", "in")]);
        assert!(outcome.error.is_none());
    }

    #[test]
    fn extra_close_halts_but_keeps_built_nodes() {
        let outcome = parse_html("<a>one</a></b><c>lost</c>");
        assert_eq!(
            outcome.error,
            Some(TreeError::UnbalancedClose {
                tag: "</b>".to_string(),
                token_index: 2
            })
        );
        assert!(outcome.is_truncated());
        assert_eq!(outcome.document.root().tags_by_name("a").len(), 1);
        assert!(outcome.document.root().tags_by_name("c").is_empty());
    }

    #[test]
    fn trailing_slash_in_unquoted_href_opens_element() {
        let outcome = parse_html(
            "<div><a href=https://youtu.be/>Vid</a><br>Jan 1</div><p>next</p><x/><y a=\"1\"/>",
        );
        assert!(outcome.error.is_none());
        let div = outcome.document.root().tags_by_name("div")[0];
        let kids: Vec<&str> = div.children().map(|c| c.name()).collect();
        assert_eq!(kids, vec!["a", "br"]);
        assert_eq!(div.tags_by_name("a")[0].text(), "Vid");
        assert_eq!(div.last_child().map(|c| c.text()), Some("Jan 1"));

        let top: Vec<&str> = outcome.document.root().children().map(|c| c.name()).collect();
        assert_eq!(top, vec!["div", "p", "x", "y"]);
    }

    #[test]
    fn unclosed_tags_are_tolerated() {
        let outcome = parse_html("<html><body><div>open");
        assert!(outcome.error.is_none());
        assert_eq!(outcome.document.len(), 4);
        assert!(!outcome.document.is_empty());
        assert!(parse_html("no tags here").document.is_empty());
    }

    #[test]
    fn literal_tokens_overwrite_parent_text() {
        let tokens = TokenStream {
            tags: vec!["<p>", "stray"],
            texts: vec!["first", ""],
        };
        let outcome = build_tree(&tokens);
        let p = outcome.document.root().tags_by_name("p")[0];
        assert_eq!(p.text(), "stray");
    }
}

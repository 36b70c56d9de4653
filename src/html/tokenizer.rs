//! Splits raw HTML into tag tokens and the text that trails each tag.

use once_cell::sync::Lazy;
use regex::Regex;

static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern must compile"));

/// Tags and trailing texts, aligned by index: `texts[i]` is the text between
/// `tags[i]` and the next tag. Anything before the first tag is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenStream<'a> {
    pub tags: Vec<&'a str>,
    pub texts: Vec<&'a str>,
}

impl<'a> TokenStream<'a> {
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'a str, &'a str)> + '_ {
        self.tags.iter().copied().zip(self.texts.iter().copied())
    }
}

pub fn tokenize(html: &str) -> TokenStream<'_> {
    let mut tags = Vec::new();
    let mut texts = Vec::new();
    let mut last_end: Option<usize> = None;

    for m in TAG_RE.find_iter(html) {
        if let Some(end) = last_end {
            texts.push(html[end..m.start()].trim());
        }
        tags.push(m.as_str().trim());
        last_end = Some(m.end());
    }
    if let Some(end) = last_end {
        texts.push(html[end..].trim());
    }

    TokenStream { tags, texts }
}

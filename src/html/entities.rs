//! Entity decoding for extracted field text and the non-breaking-space delimiter.

use std::borrow::Cow;

/// Non-breaking space as it appears in export text, literal or escaped.
pub const NBSP: char = '\u{a0}';
pub const NBSP_ENTITY: &str = "&nbsp;";

const ENTITIES: [(&str, &str); 8] = [
    ("&nbsp;", "\u{a0}"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&#x27;", "'"),
    ("&emsp;", "\u{2003}"),
    // last so `&amp;lt;` decodes to `&lt;`, not `<`
    ("&amp;", "&"),
];

/// Decodes the handful of named entities that show up in field text.
pub fn decode_entities(s: &str) -> Cow<'_, str> {
    if !s.contains('&') {
        return Cow::Borrowed(s);
    }
    let mut out = s.to_string();
    for (entity, value) in ENTITIES {
        if out.contains(entity) {
            out = out.replace(entity, value);
        }
    }
    Cow::Owned(out)
}

/// Splits at the first non-breaking space, literal or `&nbsp;`.
pub fn split_nbsp(s: &str) -> Option<(&str, &str)> {
    let literal = s.find(NBSP).map(|i| (i, NBSP.len_utf8()));
    let escaped = s.find(NBSP_ENTITY).map(|i| (i, NBSP_ENTITY.len()));
    let (at, width) = match (literal, escaped) {
        (Some(a), Some(b)) => {
            if a.0 < b.0 {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some((&s[..at], &s[at + width..]))
}

//! Tokenizer for the attribute list of a single start tag.
//!
//! Callers hand in the text between the tag name and the closing `>`;
//! every attribute is reported with its byte span so it can be removed
//! without touching its neighbours.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s"'<>/=]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
        .expect("ATTRIBUTE_RE: hardcoded regex is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute<'a> {
    pub name: &'a str,
    /// Unquoted value; `None` for a bare attribute such as `hidden`.
    pub value: Option<&'a str>,
    pub span: Range<usize>,
}

pub fn parse(attrs: &str) -> Vec<Attribute<'_>> {
    ATTRIBUTE_RE
        .captures_iter(attrs)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|m| m.as_str());
            Some(Attribute {
                name,
                value,
                span: whole.range(),
            })
        })
        .collect()
}

/// First attribute called `name`, compared case-insensitively.
pub fn find<'a>(attrs: &'a str, name: &str) -> Option<Attribute<'a>> {
    parse(attrs)
        .into_iter()
        .find(|attr| attr.name.eq_ignore_ascii_case(name))
}

pub fn has(attrs: &str, name: &str) -> bool {
    find(attrs, name).is_some()
}

/// Drops every attribute whose name is in `names`, together with the
/// whitespace that separated it from the previous token.
pub fn remove(attrs: &str, names: &[&str]) -> String {
    let mut out = String::with_capacity(attrs.len());
    let mut cursor = 0usize;

    for attr in parse(attrs) {
        if !names.iter().any(|n| attr.name.eq_ignore_ascii_case(n)) {
            continue;
        }
        let start = attrs[..attr.span.start].trim_end().len().max(cursor);
        out.push_str(&attrs[cursor..start]);
        cursor = attr.span.end;
    }

    out.push_str(&attrs[cursor..]);
    out
}

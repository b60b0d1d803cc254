use std::collections::HashSet;
use std::fmt::Write as _;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::attrs;
use crate::formats::HeadingLevel;
use crate::slug::slugify;

static H2_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(h2)(\s[^>]*)?>(.*?)(</h2\s*>)").expect("H2_RE: hardcoded regex is valid")
});

static H3_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(h3)(\s[^>]*)?>(.*?)(</h3\s*>)").expect("H3_RE: hardcoded regex is valid")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("TAG_RE: hardcoded regex is valid"));

static START_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<[a-zA-Z][^\s/>]*(\s[^>]*)?>").expect("START_TAG_RE: hardcoded regex is valid")
});

/// How ids are generated for headings that lack one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdPolicy {
    /// Use the slug as is, even when another heading already uses it.
    #[default]
    Preserve,
    /// Suffix repeated slugs with `-2`, `-3`, ... so every anchor is unique.
    Unique,
}

/// One h2/h3 element located in a document.
#[derive(Debug, Clone)]
pub(crate) struct HeadingMatch<'a> {
    pub level: HeadingLevel,
    pub span: Range<usize>,
    /// Tag name with its original casing.
    pub tag: &'a str,
    pub attrs: &'a str,
    pub inner: &'a str,
    pub close: &'a str,
}

impl<'a> HeadingMatch<'a> {
    /// Plain text of the heading: tags stripped, entities decoded, trimmed.
    pub fn text(&self) -> String {
        heading_text(self.inner)
    }

    /// Value of the `id` attribute. A bare `id` without a value does not count.
    pub fn explicit_id(&self) -> Option<&'a str> {
        attrs::find(self.attrs, "id").and_then(|attr| attr.value)
    }
}

/// All h2/h3 elements in document order. A match that starts inside an
/// earlier one is dropped.
pub(crate) fn scan_headings(html: &str) -> Vec<HeadingMatch<'_>> {
    let mut found = Vec::new();
    for (re, level) in [(&*H2_RE, HeadingLevel::H2), (&*H3_RE, HeadingLevel::H3)] {
        for caps in re.captures_iter(html) {
            let (Some(whole), Some(tag), Some(inner), Some(close)) =
                (caps.get(0), caps.get(1), caps.get(3), caps.get(4))
            else {
                continue;
            };
            found.push(HeadingMatch {
                level,
                span: whole.range(),
                tag: tag.as_str(),
                attrs: caps.get(2).map_or("", |m| m.as_str()),
                inner: inner.as_str(),
                close: close.as_str(),
            });
        }
    }

    found.sort_by_key(|h| h.span.start);

    let mut headings: Vec<HeadingMatch<'_>> = Vec::with_capacity(found.len());
    for heading in found {
        if let Some(prev) = headings.last()
            && heading.span.start < prev.span.end
        {
            tracing::trace!(
                start = heading.span.start,
                "skipping heading nested inside another heading"
            );
            continue;
        }
        headings.push(heading);
    }
    headings
}

pub(crate) fn heading_text(inner: &str) -> String {
    let stripped = TAG_RE.replace_all(inner, "");
    html_escape::decode_html_entities(&stripped).trim().to_owned()
}

/// Adds an `id` to every h2/h3 that does not have one yet.
#[must_use]
pub fn inject_ids(html: &str) -> String {
    inject_ids_with(html, IdPolicy::default())
}

#[must_use]
pub fn inject_ids_with(html: &str, policy: IdPolicy) -> String {
    let headings = scan_headings(html);

    let mut used = if policy == IdPolicy::Unique {
        document_ids(html)
    } else {
        HashSet::new()
    };

    let mut out = String::with_capacity(html.len() + headings.len() * 16);
    let mut cursor = 0usize;
    let mut injected = 0usize;

    for heading in &headings {
        if heading.explicit_id().is_some() {
            continue;
        }
        let slug = slugify(&heading.text());
        if slug.is_empty() {
            continue;
        }
        let id = match policy {
            IdPolicy::Preserve => slug,
            IdPolicy::Unique => unique_id(slug, &mut used),
        };

        out.push_str(&html[cursor..heading.span.start]);
        // Writing into a String cannot fail.
        let _ = write!(
            out,
            "<{tag} id=\"{id}\"{attrs}>{inner}{close}",
            tag = heading.tag,
            attrs = attrs::remove(heading.attrs, &["id"]),
            inner = heading.inner,
            close = heading.close,
        );
        cursor = heading.span.end;
        injected += 1;
    }
    out.push_str(&html[cursor..]);

    tracing::debug!(
        headings = headings.len(),
        injected,
        ?policy,
        "inject heading ids"
    );
    out
}

/// Every `id` value carried by any start tag in `html`.
fn document_ids(html: &str) -> HashSet<String> {
    START_TAG_RE
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .filter_map(|tag_attrs| attrs::find(tag_attrs.as_str(), "id").and_then(|attr| attr.value))
        .map(str::to_owned)
        .collect()
}

fn unique_id(slug: String, used: &mut HashSet<String>) -> String {
    if used.insert(slug.clone()) {
        return slug;
    }
    let mut n = 2usize;
    loop {
        let candidate = format!("{slug}-{n}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}

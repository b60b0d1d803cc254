//! Removal of JSON-LD structured data from CMS HTML.
//!
//! Structured data reaches the page in two shapes: proper
//! `<script type="application/ld+json">` blocks, and bare JSON left behind
//! as visible text when a sanitizer dropped the script tags but kept their
//! content. Both are cut out of the HTML; every block that parses as JSON
//! is handed back to the caller in document order.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;
use serde::de::IgnoredAny;
use serde_json::Value;

use crate::attrs;
use crate::formats::JsonLdSplit;

static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<script\b([^>]*)>(.*?)</script\s*>")
        .expect("SCRIPT_RE: hardcoded regex is valid")
});

const JSON_LD_TYPE: &str = "application/ld+json";
const CONTEXT_KEY: &str = "\"@context\"";

#[derive(Debug)]
struct Removal {
    span: Range<usize>,
    block: Option<String>,
}

#[must_use]
pub fn strip_json_ld(html: &str) -> String {
    split_content_and_json_ld(html).cleaned_html
}

#[must_use]
pub fn split_content_and_json_ld(html: &str) -> JsonLdSplit {
    if html.is_empty() {
        return JsonLdSplit::default();
    }

    let mut removals = Vec::new();
    let mut scripts = Vec::new();

    for caps in SCRIPT_RE.captures_iter(html) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        scripts.push(whole.range());

        let script_attrs = caps.get(1).map_or("", |m| m.as_str());
        if !is_json_ld_script(script_attrs) {
            continue;
        }

        let inner = caps.get(2).map_or("", |m| m.as_str()).trim();
        let block = if is_valid_json(inner) {
            Some(inner.to_owned())
        } else {
            tracing::debug!(
                start = whole.start(),
                len = inner.len(),
                "dropping invalid json-ld script block"
            );
            None
        };
        removals.push(Removal {
            span: whole.range(),
            block,
        });
    }

    for span in bare_json_ld_spans(html, &scripts) {
        let block = html[span.clone()].to_owned();
        removals.push(Removal {
            span,
            block: Some(block),
        });
    }

    removals.sort_by_key(|r| r.span.start);

    let mut cleaned_html = String::with_capacity(html.len());
    let mut json_ld_blocks = Vec::new();
    let mut cursor = 0usize;
    for removal in &removals {
        cleaned_html.push_str(&html[cursor..removal.span.start]);
        cursor = removal.span.end;
        if let Some(block) = &removal.block {
            json_ld_blocks.push(block.clone());
        }
    }
    cleaned_html.push_str(&html[cursor..]);

    tracing::debug!(
        removed = removals.len(),
        blocks = json_ld_blocks.len(),
        "strip json-ld"
    );

    JsonLdSplit {
        cleaned_html,
        json_ld_blocks,
    }
}

fn is_json_ld_script(script_attrs: &str) -> bool {
    attrs::find(script_attrs, "type")
        .and_then(|attr| attr.value)
        .is_some_and(|value| value.trim().eq_ignore_ascii_case(JSON_LD_TYPE))
}

fn is_valid_json(text: &str) -> bool {
    !text.is_empty() && serde_json::from_str::<IgnoredAny>(text).is_ok()
}

/// Spans of JSON fragments outside any `<script>` element that open with an
/// `"@context"` key, or arrays of such objects carrying `"@type"`.
fn bare_json_ld_spans(html: &str, scripts: &[Range<usize>]) -> Vec<Range<usize>> {
    let mut spans = Vec::new();
    let mut search_from = 0usize;

    while let Some(rel) = html[search_from..].find(CONTEXT_KEY) {
        let key_at = search_from + rel;
        search_from = key_at + CONTEXT_KEY.len();

        if scripts.iter().any(|s| s.contains(&key_at)) || inside_start_tag(html, key_at) {
            continue;
        }
        let Some(object_start) =
            preceding_non_ws(html, key_at).filter(|&i| html.as_bytes()[i] == b'{')
        else {
            continue;
        };

        let array_span = preceding_non_ws(html, object_start)
            .filter(|&i| html.as_bytes()[i] == b'[')
            .and_then(|start| balanced_end(html, start).map(|end| start..end))
            .filter(|span| is_json_ld_array(&html[span.clone()]));

        let span = match array_span {
            Some(span) => span,
            None => match balanced_end(html, object_start) {
                Some(end) if is_json_ld_object(&html[object_start..end]) => object_start..end,
                _ => continue,
            },
        };

        tracing::trace!(start = span.start, end = span.end, "bare json-ld fragment");
        search_from = span.end;
        spans.push(span);
    }

    spans
}

/// True when `pos` sits between a `<` and its `>`, i.e. in tag markup
/// such as a quoted attribute value.
fn inside_start_tag(html: &str, pos: usize) -> bool {
    html[..pos]
        .rfind('<')
        .is_some_and(|lt| !html[lt..pos].contains('>'))
}

fn preceding_non_ws(html: &str, before: usize) -> Option<usize> {
    html[..before]
        .char_indices()
        .rev()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(idx, _)| idx)
}

/// Byte offset just past the bracket that closes the one at `start`.
/// String literals are skipped so braces inside them do not count.
fn balanced_end(html: &str, start: usize) -> Option<usize> {
    let bytes = html.as_bytes();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &b) in bytes[start..].iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' | b'[' => depth += 1,
            b'}' | b']' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(start + offset + 1);
                }
            }
            b'<' => return None,
            _ => {}
        }
    }
    None
}

fn is_json_ld_object(fragment: &str) -> bool {
    matches!(
        serde_json::from_str::<Value>(fragment),
        Ok(Value::Object(map)) if map.contains_key("@context")
    )
}

fn is_json_ld_array(fragment: &str) -> bool {
    let Ok(Value::Array(items)) = serde_json::from_str::<Value>(fragment) else {
        return false;
    };
    items.iter().any(|item| item.get("@type").is_some())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_json_ld_removes_script_blocks() {
        let html = r#"<p>A</p><script type="application/ld+json">{"@context":"https://schema.org"}</script><p>B</p>"#;
        assert_eq!(strip_json_ld(html), "<p>A</p><p>B</p>");
    }

    #[test]
    fn strip_json_ld_matches_case_and_quote_variants() {
        let html = concat!(
            "<p>A</p>",
            "<SCRIPT TYPE='Application/LD+JSON' class=\"yoast-schema-graph\">{\"@type\":\"Thing\"}</SCRIPT>",
            "<p>B</p>",
            "<script data-x=\"1\" type=\"application/ld+json\">\n[{\"@type\":\"Menu\"}]\n</script >",
        );
        assert_eq!(strip_json_ld(html), "<p>A</p><p>B</p>");
    }

    #[test]
    fn strip_json_ld_keeps_other_scripts() {
        let html = r#"<script>var ld = {"@context": "https://schema.org", "@type": "X"};</script><p>A</p>"#;
        assert_eq!(strip_json_ld(html), html);
    }

    #[test]
    fn strip_json_ld_without_matches_is_identity() {
        let html = "<h2>Menu</h2><p>{\"price\": 5}</p>";
        assert_eq!(strip_json_ld(html), html);
        assert_eq!(strip_json_ld(""), "");
    }

    #[test]
    fn strip_json_ld_is_idempotent() {
        let html = concat!(
            "<p>A</p>",
            "<script type=\"application/ld+json\">{\"@context\":\"https://schema.org\"}</script>",
            "<p>{\"@context\":\"https://schema.org\",\"@type\":\"Restaurant\"}</p>",
        );
        let once = strip_json_ld(html);
        assert_eq!(once, "<p>A</p><p></p>");
        assert_eq!(strip_json_ld(&once), once);
    }

    #[test]
    fn split_collects_trimmed_valid_blocks_in_order() {
        let html = concat!(
            "<script type=\"application/ld+json\">\n  {\"@context\":\"https://schema.org\",\"@type\":\"Article\"}\n</script>",
            "<p>Body</p>",
            "<script type=\"application/ld+json\">{not json}</script>",
            "<script type=\"application/ld+json\">[{\"@type\":\"FAQPage\"}]</script>",
        );
        let split = split_content_and_json_ld(html);
        assert_eq!(split.cleaned_html, "<p>Body</p>");
        assert_eq!(
            split.json_ld_blocks,
            vec![
                r#"{"@context":"https://schema.org","@type":"Article"}"#.to_owned(),
                r#"[{"@type":"FAQPage"}]"#.to_owned(),
            ]
        );
    }

    #[test]
    fn split_drops_empty_script_blocks() {
        let split = split_content_and_json_ld(
            "<script type=\"application/ld+json\">   </script><p>x</p>",
        );
        assert_eq!(split.cleaned_html, "<p>x</p>");
        assert!(split.json_ld_blocks.is_empty());
    }

    #[test]
    fn split_removes_bare_context_objects() {
        let html = concat!(
            "<p>Intro</p>\n",
            "{\"@context\": \"https://schema.org\", \"@graph\": [{\"@type\": \"WebPage\", \"name\": \"a {b}\"}]}\n",
            "<p>Outro</p>",
        );
        let split = split_content_and_json_ld(html);
        assert_eq!(split.cleaned_html, "<p>Intro</p>\n\n<p>Outro</p>");
        assert_eq!(split.json_ld_blocks.len(), 1);
        assert!(split.json_ld_blocks[0].starts_with("{\"@context\""));
    }

    #[test]
    fn split_removes_bare_arrays_with_types() {
        let html = r#"<p>[ {"@context":"https://schema.org","@type":"Restaurant"}, {"@context":"https://schema.org","@type":"Menu"} ]</p>"#;
        let split = split_content_and_json_ld(html);
        assert_eq!(split.cleaned_html, "<p></p>");
        assert_eq!(split.json_ld_blocks.len(), 1);
        assert!(split.json_ld_blocks[0].starts_with('['));
    }

    #[test]
    fn split_leaves_malformed_bare_fragments() {
        let html = r#"<p>{"@context": "https://schema.org", "@type": }</p>"#;
        let split = split_content_and_json_ld(html);
        assert_eq!(split.cleaned_html, html);
        assert!(split.json_ld_blocks.is_empty());
    }

    #[test]
    fn split_leaves_json_ld_inside_attribute_values() {
        let html = r#"<div data-schema='{"@context":"https://schema.org","@type":"X"}'>x</div>"#;
        let split = split_content_and_json_ld(html);
        assert_eq!(split.cleaned_html, html);
        assert!(split.json_ld_blocks.is_empty());
    }

    #[test]
    fn split_ignores_context_mentioned_in_prose() {
        let html = r#"<p>The "@context" key links the vocabulary.</p>"#;
        assert_eq!(strip_json_ld(html), html);
    }
}

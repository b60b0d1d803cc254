use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::attrs;

static TABLE_TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(/?)table\b[^>]*>").expect("TABLE_TAG_RE: hardcoded regex is valid")
});

static IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<(img)\b([^>]*?)(\s*/?)>").expect("IMG_RE: hardcoded regex is valid")
});

pub const DEFAULT_TABLE_WRAPPER_CLASS: &str = "table-responsive";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponsiveOptions {
    /// Class of the `<div>` placed around every table.
    pub table_wrapper_class: String,
}

impl Default for ResponsiveOptions {
    fn default() -> Self {
        Self {
            table_wrapper_class: DEFAULT_TABLE_WRAPPER_CLASS.to_owned(),
        }
    }
}

impl ResponsiveOptions {
    fn wrapper_open(&self) -> String {
        format!(
            "<div class=\"{}\">",
            html_escape::encode_double_quoted_attribute(&self.table_wrapper_class)
        )
    }
}

#[must_use]
pub fn make_responsive(html: &str) -> String {
    make_responsive_with(html, &ResponsiveOptions::default())
}

#[must_use]
pub fn make_responsive_with(html: &str, options: &ResponsiveOptions) -> String {
    let wrapped = wrap_tables(html, options);
    enhance_images(&wrapped).into_owned()
}

/// Puts each `<table>` inside a wrapper `<div>`, with the wrapper's
/// `</div>` right after the matching `</table>`. Nested tables get their
/// own wrappers. Tables already sitting directly inside the wrapper are
/// left alone, as are opening and closing tags without a partner.
pub fn wrap_tables<'a>(html: &'a str, options: &ResponsiveOptions) -> Cow<'a, str> {
    let open = options.wrapper_open();

    let tags = TABLE_TAG_RE
        .captures_iter(html)
        .filter_map(|caps| {
            let tag = caps.get(0)?;
            let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
            Some((tag.range(), closing))
        })
        .collect::<Vec<_>>();

    let mut wrap = vec![false; tags.len()];
    let mut open_stack = Vec::new();
    for (idx, (span, closing)) in tags.iter().enumerate() {
        if !closing {
            open_stack.push(idx);
            continue;
        }
        let Some(open_idx) = open_stack.pop() else {
            continue;
        };
        let open_span = &tags[open_idx].0;
        let already_wrapped = html[..open_span.start].trim_end().ends_with(&open)
            && html[span.end..].trim_start().starts_with("</div>");
        if !already_wrapped {
            wrap[open_idx] = true;
            wrap[idx] = true;
        }
    }

    let wrapped = wrap.iter().filter(|w| **w).count() / 2;
    tracing::debug!(wrapped, "wrap tables");
    if wrapped == 0 {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len() + wrapped * (open.len() + 6));
    let mut cursor = 0usize;
    for ((span, closing), wrap) in tags.iter().zip(wrap) {
        if !wrap {
            continue;
        }
        if *closing {
            out.push_str(&html[cursor..span.end]);
            out.push_str("</div>");
        } else {
            out.push_str(&html[cursor..span.start]);
            out.push_str(&open);
            out.push_str(&html[span.clone()]);
        }
        cursor = span.end;
    }
    out.push_str(&html[cursor..]);
    Cow::Owned(out)
}

/// Lazy loading, async decoding and an empty `alt` for every `<img>`;
/// explicit `width`/`height` are dropped so CSS controls the size.
pub fn enhance_images(html: &str) -> Cow<'_, str> {
    IMG_RE.replace_all(html, |caps: &Captures<'_>| {
        let tag = caps.get(1).map_or("img", |m| m.as_str());
        let original = caps.get(2).map_or("", |m| m.as_str());
        let end = caps.get(3).map_or("", |m| m.as_str());

        let mut img_attrs = attrs::remove(original, &["width", "height"]);
        if !attrs::has(&img_attrs, "loading") {
            img_attrs.push_str(" loading=\"lazy\"");
        }
        if !attrs::has(&img_attrs, "alt") {
            img_attrs.push_str(" alt=\"\"");
        }
        if !attrs::has(&img_attrs, "decoding") {
            img_attrs.push_str(" decoding=\"async\"");
        }

        format!("<{tag}{img_attrs}{end}>")
    })
}

use crate::config::Config;
use crate::formats::{ProcessedContent, RenderedPost};
use crate::headings::{IdPolicy, inject_ids_with};
use crate::jsonld::split_content_and_json_ld;
use crate::responsive::make_responsive_with;
use crate::toc::extract_toc;

/// Injects heading ids, then reads the table of contents from the result,
/// so every TOC id names an `id` attribute in `processed_html`.
///
/// The input is expected to be free of JSON-LD already.
#[must_use]
pub fn process_content(html: &str) -> ProcessedContent {
    process_content_with(html, IdPolicy::default())
}

#[must_use]
pub fn process_content_with(html: &str, policy: IdPolicy) -> ProcessedContent {
    let processed_html = inject_ids_with(html, policy);
    let toc_items = extract_toc(&processed_html);
    ProcessedContent {
        processed_html,
        toc_items,
    }
}

/// Full render flow for one blog post: JSON-LD split off, heading ids and
/// TOC, then responsive tables and images.
#[must_use]
pub fn render_post(html: &str, config: &Config) -> RenderedPost {
    let split = split_content_and_json_ld(html);
    let processed = process_content_with(&split.cleaned_html, config.id_policy);
    let html = make_responsive_with(&processed.processed_html, &config.responsive_options());

    tracing::debug!(
        toc_items = processed.toc_items.len(),
        json_ld_blocks = split.json_ld_blocks.len(),
        "render post"
    );

    RenderedPost {
        html,
        toc_items: processed.toc_items,
        json_ld_blocks: split.json_ld_blocks,
    }
}

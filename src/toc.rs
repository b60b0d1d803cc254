use crate::formats::TocItem;
use crate::headings::scan_headings;
use crate::slug::slugify;

/// Lists the h2/h3 headings of `html` in document order.
///
/// An explicit `id` attribute wins; otherwise the id is the slug of the
/// heading text, so this also works on HTML that never went through
/// [`crate::headings::inject_ids`]. Headings with an empty id or empty text
/// are skipped. Repeated headings are reported as often as they occur.
#[must_use]
pub fn extract_toc(html: &str) -> Vec<TocItem> {
    let headings = scan_headings(html);
    let total = headings.len();

    let items = headings
        .into_iter()
        .filter_map(|heading| {
            let text = heading.text();
            let id = match heading.explicit_id() {
                Some(id) => id.to_owned(),
                None => slugify(&text),
            };
            if id.is_empty() || text.is_empty() {
                tracing::trace!(
                    level = heading.level.as_u8(),
                    start = heading.span.start,
                    "skipping heading without id or text"
                );
                return None;
            }
            Some(TocItem {
                id,
                text,
                level: heading.level,
            })
        })
        .collect::<Vec<_>>();

    tracing::debug!(headings = total, items = items.len(), "extract toc");
    items
}

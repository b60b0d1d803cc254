/// Converts arbitrary text into an anchor-safe slug.
///
/// ASCII word characters are kept (lower-cased), runs of whitespace,
/// underscores and hyphens become a single `-`, everything else is dropped.
/// The result never starts or ends with `-` and may be empty.
#[must_use]
pub fn slugify(text: &str) -> String {
    let lowered = text.trim().to_lowercase();

    let mut out = String::with_capacity(lowered.len());
    let mut pending_separator = false;
    for ch in lowered.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !out.is_empty() {
                out.push('-');
            }
            pending_separator = false;
            out.push(ch);
        } else if ch.is_whitespace() || ch == '_' || ch == '-' {
            pending_separator = true;
        }
    }

    out
}

//! Text normalization for extracted fragments
//!
//! Scraped text arrives with entity leftovers, zero-width characters,
//! layout whitespace, and truncation ellipses. `normalize_text` reduces it
//! to a single trimmed line. The function is idempotent.

/// HTML entity spellings of a non-breaking space that survive extraction
const NBSP_ENTITIES: &[&str] = &["&nbsp;", "&#160;", "&#xa0;", "&#xA0;"];

/// Normalize a raw text fragment
pub fn normalize_text(raw: &str) -> String {
    // Map whitespace (including U+00A0) to spaces and drop everything unprintable
    let mut text: String = raw
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if is_printable(c) {
                Some(c)
            } else {
                None
            }
        })
        .collect();

    for entity in NBSP_ENTITIES {
        if text.contains(entity) {
            text = text.replace(entity, " ");
        }
    }

    let mut text = collapse_whitespace(&text);

    while let Some(stripped) = strip_trailing_ellipsis(&text) {
        text = stripped;
    }

    text
}

/// Printable ASCII, Latin-1 supplement through Latin Extended-B, and
/// general punctuation (dashes, quotes, bullets, ellipsis).
fn is_printable(c: char) -> bool {
    matches!(c,
        '\u{0020}'..='\u{007E}'
        | '\u{00A1}'..='\u{024F}'
        | '\u{2010}'..='\u{2027}'
    )
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove one trailing run of three or more periods (or a trailing `…`).
/// Returns `None` when there is nothing to strip.
fn strip_trailing_ellipsis(text: &str) -> Option<String> {
    if let Some(rest) = text.strip_suffix('…') {
        return Some(rest.trim_end().to_string());
    }

    let dots = text.chars().rev().take_while(|&c| c == '.').count();
    if dots >= 3 {
        Some(text[..text.len() - dots].trim_end().to_string())
    } else {
        None
    }
}

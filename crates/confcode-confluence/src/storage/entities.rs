//! HTML entity to Unicode conversion.
//!
//! The storage format uses named HTML entities (e.g. `&lsquo;`) without
//! declaring them, so an XML parser would choke on the raw body. Named
//! entities are converted to Unicode up front; standard XML entities
//! (amp, lt, gt, quot, apos) are preserved as-is.

use std::sync::LazyLock;

use regex::Regex;

/// Regex pattern for matching named HTML entities.
static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z]+);").expect("invalid entity regex"));

/// Convert named HTML entities to Unicode characters.
pub(crate) fn convert_html_entities(markup: &str) -> String {
    ENTITY_PATTERN
        .replace_all(markup, |caps: &regex::Captures| {
            entity_to_unicode(&caps[1]).map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

/// Map HTML entity name to Unicode character.
fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        // Whitespace and punctuation
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "middot" => "\u{00b7}",

        // Arrows
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",

        // Math
        "le" => "\u{2264}",
        "ge" => "\u{2265}",
        "ne" => "\u{2260}",
        "plusmn" => "\u{00b1}",
        "times" => "\u{00d7}",
        "divide" => "\u{00f7}",

        // Legal and currency
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "cent" => "\u{00a2}",

        // Misc symbols
        "deg" => "\u{00b0}",
        "para" => "\u{00b6}",
        "sect" => "\u{00a7}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",

        _ => return None,
    })
}

//! Entity references in text runs.
//!
//! Only the five predefined XML entities are decoded. Anything else that
//! looks like a reference (`&nbsp;`, `&#160;`) is kept verbatim and reported
//! once through the warning system.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use trellis_common::warning::warn_once;
use trellis_dom::text::NAMED_ENTITIES;

/// Anything shaped like an entity or character reference.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").expect("reference regex")
});

/// Look up one of the predefined entities, e.g. `"&amp;"` → `'&'`.
#[must_use]
pub fn lookup(reference: &str) -> Option<char> {
    NAMED_ENTITIES
        .iter()
        .find(|(entity, _)| *entity == reference)
        .map(|(_, ch)| *ch)
}

/// Decode the predefined entities in a text run.
#[must_use]
pub fn decode_text(run: &str) -> Cow<'_, str> {
    REFERENCE.replace_all(run, |caps: &Captures<'_>| {
        let reference = &caps[0];
        lookup(reference).map_or_else(
            || {
                warn_once(
                    "Parser",
                    &format!("unknown entity reference '{reference}' kept verbatim"),
                );
                reference.to_string()
            },
            String::from,
        )
    })
}

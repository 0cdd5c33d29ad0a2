//! Normalization of free-text identifiers before they reach lookups or storage.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ANGLE_BRACKETS: Regex = Regex::new(r"[<>]").unwrap();
}

pub const MAX_VOTE_TAG_LENGTH: usize = 30;
pub const MAX_VOTE_PLACE_ID_LENGTH: usize = 50;
pub const MAX_SUBMITTED_TAG_LENGTH: usize = 50;
pub const MAX_SUBMITTED_TAGS: usize = 6;

/// Trims, truncates to `max_chars` characters, then strips `<` and `>`.
pub fn sanitize(input: &str, max_chars: usize) -> String {
    let truncated: String = input.trim().chars().take(max_chars).collect();
    ANGLE_BRACKETS.replace_all(&truncated, "").into_owned()
}

pub fn sanitize_optional(input: Option<&str>, max_chars: usize) -> Option<String> {
    input
        .map(|v| sanitize(v, max_chars))
        .filter(|v| !v.is_empty())
}

/// Sanitizes user-submitted tag names: empty entries are dropped, at most
/// [`MAX_SUBMITTED_TAGS`] are kept, duplicates are removed preserving order.
pub fn sanitize_tag_list(tags: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for tag in tags
        .iter()
        .map(|t| sanitize(t, MAX_SUBMITTED_TAG_LENGTH))
        .filter(|t| !t.is_empty())
        .take(MAX_SUBMITTED_TAGS)
    {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

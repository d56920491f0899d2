//! URL slug derivation.
//!
//! Titles and category names in any script are transliterated to Latin with
//! [`deunicode`], lowercased, and reduced to `[a-z0-9]` runs joined by single
//! hyphens. Posts without a usable title get a dated random slug instead.

use chrono::NaiveDate;
use rand::Rng;

/// Maximum length of a client-supplied slug.
pub const MAX_SLUG_LEN: usize = 100;

/// Length of the random part of a generated post slug.
const GENERATED_SUFFIX_LEN: usize = 6;

/// Length of the random marker appended to the slug of a deleted post.
const DELETED_SUFFIX_LEN: usize = 8;

/// Marker inserted between the original slug and the random suffix on delete.
pub const DELETED_MARKER: &str = "_del_";

/// Transliterate `text` and reduce it to a URL-safe slug.
///
/// Returns an empty string when nothing alphanumeric survives.
///
/// ```
/// use quill_core::slug::slugify;
///
/// assert_eq!(slugify("Hello, World!"), "hello-world");
/// assert_eq!(slugify("北亰"), "bei-jing");
/// ```
pub fn slugify(text: &str) -> String {
    let latin = deunicode::deunicode(text).to_lowercase();

    let mut slug = String::with_capacity(latin.len());
    let mut pending_hyphen = false;
    for ch in latin.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// Slug for a new post: the transliterated title, or a dated random slug
/// when the title is absent or transliterates to nothing.
///
/// Title slugs are cut to [`MAX_SLUG_LEN`] characters.
pub fn generate_post_slug(title: Option<&str>, today: NaiveDate) -> String {
    let mut from_title = title.map(slugify).unwrap_or_default();
    if from_title.len() > MAX_SLUG_LEN {
        from_title.truncate(MAX_SLUG_LEN);
        from_title.truncate(from_title.trim_end_matches('-').len());
    }
    if from_title.is_empty() {
        dated_random_slug(today)
    } else {
        from_title
    }
}

/// `YYYY-MM-DD-xxxxxx` with a lowercase alphanumeric suffix.
pub fn dated_random_slug(date: NaiveDate) -> String {
    format!(
        "{}-{}",
        date.format("%Y-%m-%d"),
        random_suffix(GENERATED_SUFFIX_LEN)
    )
}

/// Suffix appended to the slug of a soft-deleted post: `_del_` plus eight
/// random characters.
pub fn deleted_slug_suffix() -> String {
    format!("{DELETED_MARKER}{}", random_suffix(DELETED_SUFFIX_LEN))
}

/// Random lowercase alphanumeric string of `len` characters.
pub fn random_suffix(len: usize) -> String {
    rand::rng()
        .sample_iter(&rand::distr::Alphanumeric)
        .take(len)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect()
}

/// Returns `true` if `slug` is non-empty, at most [`MAX_SLUG_LEN`] long and
/// made only of lowercase ASCII letters, digits and hyphens.
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_SLUG_LEN
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

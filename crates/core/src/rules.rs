//! Input rules applied to request payloads.
//!
//! The `validate_*` functions have the signature `validator` expects for
//! `#[validate(custom(function = ...))]`, so request types can reference
//! them directly.

use std::borrow::Cow;
use std::collections::HashSet;

use validator::ValidationError;

use crate::slug::{is_valid_slug, MAX_SLUG_LEN};

/// Maximum post title length.
pub const MAX_TITLE_LEN: u64 = 100;

/// Maximum category name length.
pub const MAX_CATEGORY_LEN: usize = 50;

/// Maximum number of tags on one post.
pub const MAX_TAGS: usize = 20;

/// Maximum tag name length (after trimming).
pub const MAX_TAG_LEN: usize = 50;

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Slug format: `^[a-z0-9-]+$`, at most 100 characters.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if is_valid_slug(slug) {
        Ok(())
    } else {
        Err(error(
            "slug",
            format!(
                "Slug can only contain lowercase letters, numbers, and hyphens \
                 (max {MAX_SLUG_LEN} characters)"
            ),
        ))
    }
}

/// Usernames: 3 to 32 characters of ASCII letters, digits, `_` or `-`.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(3..=32).contains(&len) {
        return Err(error("username", "Username must be 3 to 32 characters long"));
    }
    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(error(
            "username",
            "Username may only contain letters, numbers, '_' and '-'",
        ));
    }
    Ok(())
}

/// Category names: 1 to 50 characters after trimming.
pub fn validate_category_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 || len > MAX_CATEGORY_LEN {
        return Err(error(
            "category",
            format!("Category must be 1 to {MAX_CATEGORY_LEN} characters long"),
        ));
    }
    Ok(())
}

/// Tag lists: at most 20 names, each 1 to 50 characters after trimming.
pub fn validate_tag_names(names: &[String]) -> Result<(), ValidationError> {
    if names.len() > MAX_TAGS {
        return Err(error("tags", format!("At most {MAX_TAGS} tags are allowed")));
    }
    for name in names {
        let len = name.trim().chars().count();
        if len == 0 || len > MAX_TAG_LEN {
            return Err(error(
                "tags",
                format!("Each tag must be 1 to {MAX_TAG_LEN} characters long"),
            ));
        }
    }
    Ok(())
}

/// Trim tag names and drop duplicates and blanks, keeping first occurrences
/// in their original order.
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .map(|n| n.trim())
        .filter(|n| !n.is_empty())
        .filter(|n| seen.insert(*n))
        .map(str::to_string)
        .collect()
}

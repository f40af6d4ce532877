//! Slug derivation for URL-safe identifiers.
//!
//! Categories slugify their name directly; videos append a short random
//! suffix so two uploads with the same title never collide.

use uuid::Uuid;

/// Number of random hex characters appended to video slugs.
const VIDEO_SLUG_SUFFIX_LEN: usize = 8;

/// Lowercase a string and replace runs of non-alphanumeric characters with
/// single hyphens. Leading/trailing hyphens are trimmed.
///
/// Returns an empty string when the input contains no alphanumerics.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    slug
}

/// Derive a unique-ish video slug from a title: `slugify(title)-xxxxxxxx`.
///
/// The suffix is the first 8 hex characters of a random UUID, matching the
/// uniqueness guarantee the database constraint ultimately enforces.
pub fn derive_video_slug(title: &str) -> String {
    let base = slugify(title);
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(VIDEO_SLUG_SUFFIX_LEN)
        .collect();
    if base.is_empty() {
        suffix
    } else {
        format!("{base}-{suffix}")
    }
}

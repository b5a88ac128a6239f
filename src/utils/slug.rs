//! Identity derivation for albums.
//!
//! An album id is `{release_date}-{slug(artist)}-{slug(album)}`, so the same
//! release typed twice produces the same id. Collisions are expected; the
//! caller checks the collection before inserting.

use unicode_normalization::UnicodeNormalization;

/// Release date placeholder used when an album has no known date
pub const UNKNOWN_RELEASE_DATE: &str = "0000-00-00";

/// Fold text to a lowercase ASCII slug.
///
/// Characters are NFKD-decomposed and anything outside ASCII is dropped, so
/// "Beyoncé" becomes "beyonce". Runs of non-alphanumeric characters collapse
/// into one hyphen; leading and trailing hyphens are trimmed.
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev_was_hyphen = true;

    for c in text.nfkd().filter(char::is_ascii) {
        if c.is_ascii_alphanumeric() {
            result.push(c.to_ascii_lowercase());
            prev_was_hyphen = false;
        } else if !prev_was_hyphen {
            result.push('-');
            prev_was_hyphen = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Derive the album identity from its release date, artist, and title
pub fn derive_id(date: &str, artist: &str, album: &str) -> String {
    format!("{}-{}-{}", date, slugify(artist), slugify(album))
}

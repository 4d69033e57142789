#![forbid(unsafe_code)]

//! Display text helpers for product cards.
//!
//! Lengths are measured in grapheme clusters so emoji and combining marks
//! are never split.

use std::borrow::Cow;

use unicode_segmentation::UnicodeSegmentation;

/// Suffix appended to truncated text.
pub const ELLIPSIS: &str = "...";

const IMAGE_EXTENSIONS: [&str; 5] = [".jpg", ".jpeg", ".png", ".webp", ".avif"];

/// Shorten `text` to at most `max_len` graphemes, trimming whitespace at
/// the cut and appending `...`. Text that already fits is returned as is.
#[must_use]
pub fn truncate_text(text: &str, max_len: usize) -> Cow<'_, str> {
    let mut graphemes = text.grapheme_indices(true);
    let Some((cut, _)) = graphemes.nth(max_len) else {
        return Cow::Borrowed(text);
    };
    Cow::Owned(format!("{}{ELLIPSIS}", text[..cut].trim()))
}

/// Up to two uppercase initials from the first two words, used when a
/// product image is unavailable.
#[must_use]
pub fn product_initials(title: &str) -> String {
    title
        .split_whitespace()
        .filter_map(|word| word.graphemes(true).next())
        .take(2)
        .collect::<String>()
        .to_uppercase()
}

/// Schemes whose URLs must name a host.
const HOST_SCHEMES: [&str; 5] = ["http", "https", "ws", "wss", "ftp"];

/// Whether `url` is an absolute URL ending in a supported image extension
/// (case-insensitive).
///
/// Any well-formed scheme is accepted, so `s3:` or `data:` references pass.
/// Network schemes (`http`, `https`, `ws`, `wss`, `ftp`) must name a host
/// without whitespace; extra slashes before the host are skipped the way
/// browsers skip them.
#[must_use]
pub fn is_valid_image_url(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
        return false;
    }
    let Some((scheme, rest)) = lower.trim_start().split_once(':') else {
        return false;
    };
    if !is_url_scheme(scheme) {
        return false;
    }
    if !HOST_SCHEMES.contains(&scheme) {
        return true;
    }
    let authority = rest
        .trim_start_matches(['/', '\\'])
        .split(['/', '\\', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    !host.is_empty() && !host.contains(char::is_whitespace)
}

fn is_url_scheme(scheme: &str) -> bool {
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Alt text naming the product and its badges: `Title (New, Bestseller)`.
#[must_use]
pub fn image_alt_text(title: &str, badges: &[String]) -> String {
    if badges.is_empty() {
        title.to_owned()
    } else {
        format!("{title} ({})", badges.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn truncation() {
        assert_eq!(truncate_text("Hazelnut Praline", 40), "Hazelnut Praline");
        assert_eq!(truncate_text("Hazelnut Praline", 16), "Hazelnut Praline");
        assert_eq!(truncate_text("Hazelnut Praline", 9), "Hazelnut...");
        assert_eq!(truncate_text("Hazelnut Praline", 0), "...");
    }

    #[test]
    fn truncation_keeps_graphemes_whole() {
        assert_eq!(truncate_text("café crème", 4), "café...");
        assert_eq!(truncate_text("🍫🍫🍫", 2), "🍫🍫...");
    }

    #[test]
    fn initials() {
        assert_eq!(product_initials("dark truffle box"), "DT");
        assert_eq!(product_initials("  Opera   cake"), "OC");
        assert_eq!(product_initials("Macarons"), "M");
        assert_eq!(product_initials(""), "");
    }

    #[test]
    fn image_urls() {
        assert!(is_valid_image_url("https://cdn.example.com/box.jpg"));
        assert!(is_valid_image_url("http://cdn.example.com/a/b/box.WEBP"));
        assert!(is_valid_image_url("https://cdn.example.com/box.avif"));
        assert!(!is_valid_image_url("https://cdn.example.com/box.gif"));
        assert!(!is_valid_image_url("/images/box.jpg"));
        assert!(!is_valid_image_url("box.jpg"));
        assert!(!is_valid_image_url("https://cdn.example.com/box.jpg?w=400"));
    }

    #[test]
    fn image_urls_accept_any_scheme() {
        assert!(is_valid_image_url("ftp://files.example.com/box.png"));
        assert!(is_valid_image_url("s3:bucket/box.png"));
        assert!(is_valid_image_url("file:///srv/images/box.jpeg"));
        assert!(!is_valid_image_url("3d:bucket/box.png"));
        assert!(!is_valid_image_url(":box.png"));
    }

    #[test]
    fn network_urls_need_a_host() {
        assert!(!is_valid_image_url("https://"));
        assert!(!is_valid_image_url("https://bad host/box.jpg"));
        assert!(!is_valid_image_url("https://user@/box.jpg"));
        // Spaces in the path are fine; only the host is strict.
        assert!(is_valid_image_url("https://cdn.example.com/my box.png"));
        assert!(is_valid_image_url("https:///cdn.example.com/box.jpg"));
    }

    #[test]
    fn alt_text() {
        assert_eq!(image_alt_text("Opera Cake", &[]), "Opera Cake");
        let badges = vec!["New".to_owned(), "Eggless".to_owned()];
        assert_eq!(image_alt_text("Opera Cake", &badges), "Opera Cake (New, Eggless)");
    }

    proptest! {
        #[test]
        fn truncated_length_is_bounded(text in "\\PC{0,60}", max in 0usize..40) {
            let out = truncate_text(&text, max);
            let graphemes = out.graphemes(true).count();
            prop_assert!(graphemes <= max + ELLIPSIS.len());
        }
    }
}

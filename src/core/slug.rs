use regex::Regex;
use std::sync::LazyLock;

// Everything that is not a Latin or Cyrillic letter, a digit or whitespace.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zа-яё0-9\s]").expect("slug filter pattern is valid"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));
static CLEAN_SLUG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zа-яё0-9]+(?:-[a-zа-яё0-9]+)*$").expect("clean slug pattern is valid")
});

/// Derives a URL-safe slug from a title.
///
/// Lower-cases, drops punctuation, joins words with single hyphens and trims
/// hyphens from both ends. Cyrillic letters are kept as is.
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    let filtered = DISALLOWED.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&filtered, "-");
    hyphenated.trim_matches('-').to_string()
}

/// True when `slug` already has the shape [`slugify`] produces.
pub fn is_clean_slug(slug: &str) -> bool {
    CLEAN_SLUG.is_match(slug)
}

/// Keeps `preferred` when it is already clean, otherwise slugifies the
/// fallbacks in order and returns the first non-empty result.
pub fn choose_slug<'a>(preferred: &str, fallbacks: impl IntoIterator<Item = &'a str>) -> Option<String> {
    let preferred = preferred.trim();
    if is_clean_slug(preferred) {
        return Some(preferred.to_string());
    }
    fallbacks
        .into_iter()
        .map(slugify)
        .find(|slug| !slug.is_empty())
}

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_]+").expect("static non-word pattern"));

/// Fallback stem when nothing usable survives sanitizing.
const FALLBACK_STEM: &str = "image";

/// Filesystem-safe version of an uploaded file's name.
///
/// Diacritics are stripped, runs of non-word characters in the stem become a
/// single hyphen, and leading/trailing hyphens are trimmed. The extension is
/// kept (alphanumerics only, lowercased).
pub fn sanitize_file_name(name: &str) -> String {
    let plain: String = name
        .nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect();

    let (stem, ext) = match plain.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext)),
        _ => (plain.as_str(), None),
    };

    let stem = NON_WORD_RE.replace_all(stem, "-");
    let stem = stem.trim_matches('-');
    let stem = if stem.is_empty() { FALLBACK_STEM } else { stem };

    let ext: Option<String> = ext
        .map(|e| {
            e.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .collect::<String>()
                .to_ascii_lowercase()
        })
        .filter(|e| !e.is_empty());

    match ext {
        Some(ext) => format!("{}.{}", stem, ext),
        None => stem.to_string(),
    }
}

/// Object key for an upload: `{epoch-millis}-{sanitized-name}`.
pub fn object_key(file_name: &str, epoch_millis: i64) -> String {
    format!("{}-{}", epoch_millis, sanitize_file_name(file_name))
}

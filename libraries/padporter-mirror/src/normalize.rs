//! Deterministic name normalization
//!
//! The sampler accepts only `[a-zA-Z0-9_]` names. Arbitrary entry names
//! are reduced to that charset: NFKD decomposition separates base
//! letters from combining marks, so accented Latin letters degrade to
//! their plain base while non-Latin scripts are erased entirely by the
//! ASCII filter that follows.

use unicode_normalization::UnicodeNormalization;

/// Fallback stem for names the filter empties out
const EMPTY_FALLBACK: &str = "unnamed";

/// Normalize an entry name, appending a zero-padded uniqueness counter
/// when `counter > 0`
///
/// The result always matches `^[a-zA-Z0-9_]+(\.[a-z0-9]+)?$`. The
/// function performs no collision detection; assigning counters is the
/// caller's job (files get the per-directory counter, directories always
/// pass 0).
pub fn normalize(raw_name: &str, counter: u32) -> String {
    let (raw_stem, raw_extension) = split_name(raw_name);

    let mut stem = clean_stem(raw_stem);
    if stem.is_empty() {
        stem.push_str(EMPTY_FALLBACK);
    }
    if counter > 0 {
        stem.push_str(&format!("_{counter:03}"));
    }

    match raw_extension.and_then(clean_extension) {
        Some(extension) => format!("{stem}.{extension}"),
        None => stem,
    }
}

/// Split at the last dot; names with no interior dot have no extension
fn split_name(raw_name: &str) -> (&str, Option<&str>) {
    match raw_name.rfind('.') {
        Some(idx) if idx > 0 && idx + 1 < raw_name.len() => {
            (&raw_name[..idx], Some(&raw_name[idx + 1..]))
        }
        _ => (raw_name, None),
    }
}

/// NFKD-decompose, map whitespace to underscores, drop everything
/// outside `[a-zA-Z0-9_]`, collapse underscore runs, trim
fn clean_stem(raw_stem: &str) -> String {
    let mut cleaned = String::with_capacity(raw_stem.len());
    for c in raw_stem.nfkd() {
        if c.is_whitespace() || c == '_' {
            if !cleaned.ends_with('_') {
                cleaned.push('_');
            }
        } else if c.is_ascii_alphanumeric() {
            cleaned.push(c);
        }
        // Everything else (combining marks, punctuation, non-Latin
        // letters) is dropped.
    }
    cleaned.trim_matches('_').to_string()
}

/// Lower-case and restrict the extension to `[a-z0-9]`; an extension
/// that filters to nothing is treated as absent
fn clean_extension(raw_extension: &str) -> Option<String> {
    let cleaned: String = raw_extension
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        .collect();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}

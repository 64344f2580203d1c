//! Filename sanitizing for user-supplied names.
//!
//! Produces a single safe path component: ASCII alphanumerics, `.`, `-`
//! and `_` are kept, whitespace becomes `_`, everything else (path
//! separators, control characters, non-ASCII) is dropped. Leading and
//! trailing `.`/`_` are stripped, so `..` can never survive.

/// Sanitize a user-supplied filename into a safe path component.
///
/// May return an empty string if nothing safe remains; callers treat that
/// as "no name given".
pub fn sanitize_filename(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
            cleaned.push(c);
        } else if c.is_whitespace() {
            cleaned.push('_');
        }
    }
    cleaned.trim_matches(|c| c == '.' || c == '_').to_string()
}

/// Stem of a PDF filename: the name with a trailing `.pdf` removed.
pub fn file_stem(filename: &str) -> &str {
    filename.strip_suffix(".pdf").unwrap_or(filename)
}

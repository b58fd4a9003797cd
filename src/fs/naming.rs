//! Filename derivation and sanitizing.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use crate::error::{Error, Result};

/// Characters allowed in a sanitized name are `[A-Za-z0-9_.-]`.
static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_.\-]").expect("static regex is valid"));

/// Map a display string to a filesystem-safe token.
///
/// Surrounding whitespace is trimmed, inner whitespace becomes `_`, and any
/// character outside `[A-Za-z0-9_.-]` is dropped. Pure: the same input always
/// yields the same output.
pub fn sanitize_name(name: &str) -> String {
    let underscored: String = name
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect();

    match DISALLOWED.replace_all(&underscored, "") {
        Cow::Borrowed(_) => underscored,
        Cow::Owned(cleaned) => cleaned,
    }
}

/// Sanitize a name and reject results that cannot be used as a path component.
pub fn sanitize_filename(name: &str) -> Result<String> {
    let sanitized = sanitize_name(name);

    if sanitized.is_empty() {
        return Err(Error::InvalidFilename(format!(
            "'{}' has no usable characters",
            name
        )));
    }

    // Dots survive sanitizing, so `.` and `..` must be rejected explicitly
    if sanitized == "." || sanitized == ".." {
        return Err(Error::InvalidFilename(format!(
            "Path traversal detected: '{}'",
            name
        )));
    }

    Ok(sanitized)
}

/// Derive the on-disk filename for a downloaded resource.
///
/// Takes the last path segment of the final (post-redirect) URL, ignoring the
/// query string, percent-decodes it and sanitizes the result.
pub fn filename_from_url(url: &Url) -> Result<String> {
    let segment = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");

    let decoded = urlencoding::decode_binary(segment.as_bytes());
    let decoded = String::from_utf8_lossy(&decoded);

    sanitize_filename(&decoded).map_err(|_| {
        Error::InvalidFilename(format!("No usable filename in URL: {}", url))
    })
}

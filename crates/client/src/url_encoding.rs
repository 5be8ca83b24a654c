//! URL encoding utilities for constructing safe request paths.
//!
//! Provides percent-encoding for URL path segments so special characters in
//! service, profile, or label names cannot cause path traversal or incorrect
//! URL resolution.
//!
//! Without percent-encoding, special characters in names could:
//! - Cause path traversal (e.g., `app/name` would create a nested path)
//! - Break URL parsing (e.g., `app?name` would create a query parameter)
//! - Cause double-decode issues (e.g., `app%20name` might be decoded prematurely)

use percent_encoding::{AsciiSet, CONTROLS, percent_encode};

/// Characters that must be percent-encoded in URL path segments.
///
/// Based on RFC 3986 section 3.3, plus additional characters that could
/// cause issues in request paths:
/// - Space, quotes, angle brackets: problematic in URLs
/// - Backslash, pipe, caret, backtick, tilde: often blocked or problematic
/// - Plus, comma, semicolon: can have special meaning in some contexts
/// - Curly braces, square brackets: reserved in URI templates
/// - Percent: must be encoded to prevent double-encoding issues
/// - Slash: must be encoded to prevent path traversal
/// - Question mark and hash: have special URL meaning
pub(crate) const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')      // Space
    .add(b'"')      // Double quote
    .add(b'<')      // Less than
    .add(b'>')      // Greater than
    .add(b'`')      // Backtick
    .add(b'{')      // Left curly brace
    .add(b'}')      // Right curly brace
    .add(b'|')      // Pipe
    .add(b'\\')     // Backslash
    .add(b'^')      // Caret
    .add(b'~')      // Tilde
    .add(b'%')      // Percent (prevents double-encoding)
    .add(b'/')      // Forward slash (prevents path traversal)
    .add(b'?')      // Question mark
    .add(b'#')      // Hash
    .add(b'+')      // Plus
    .add(b',')      // Comma
    .add(b';')      // Semicolon
    .add(b'[')      // Left square bracket
    .add(b']'); // Right square bracket

/// Percent-encode a string for safe use as a URL path segment.
///
/// Used for every caller-provided value interpolated into the request path:
/// service names, profile names, and labels.
pub(crate) fn encode_path_segment(segment: &str) -> String {
    percent_encode(segment.as_bytes(), PATH_SEGMENT_ENCODE_SET).to_string()
}

//! Per-field size limits.
//!
//! Each field keeps its own rule:
//! - message, function name: keep the leading 255 characters
//! - source file: over 255 characters, keep the trailing 254 (path tail)
//! - detail: byte-gated at 1 MiB, then cut to the leading 255 characters
//!
//! Limits count `char`s, never bytes, so a cut can't split a code point.

/// Character limit for message, function name and source file.
pub const MAX_FIELD_CHARS: usize = 255;

/// Characters kept from the end of an oversized source file.
pub const SOURCE_TAIL_CHARS: usize = 254;

/// Byte length above which `detail` is cut down.
pub const MAX_DETAIL_BYTES: usize = 1_048_576;

fn keep_leading(value: &str, max_chars: usize) -> &str {
    match value.char_indices().nth(max_chars) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

fn keep_trailing(value: &str, max_chars: usize) -> &str {
    let total = value.chars().count();
    if total <= max_chars {
        return value;
    }
    match value.char_indices().nth(total - max_chars) {
        Some((start, _)) => &value[start..],
        None => value,
    }
}

/// First 255 characters of the message.
pub fn message(value: &str) -> String {
    keep_leading(value, MAX_FIELD_CHARS).to_string()
}

/// First 255 characters of the function name.
pub fn function_name(value: &str) -> String {
    keep_leading(value, MAX_FIELD_CHARS).to_string()
}

/// Over 255 characters, the last 254 are kept.
pub fn source_file(value: &str) -> String {
    if value.chars().count() > MAX_FIELD_CHARS {
        keep_trailing(value, SOURCE_TAIL_CHARS).to_string()
    } else {
        value.to_string()
    }
}

/// Oversized guard: more than 1 MiB of UTF-8 collapses to 255 characters.
pub fn detail(value: String) -> String {
    if value.len() > MAX_DETAIL_BYTES {
        keep_leading(&value, MAX_FIELD_CHARS).to_string()
    } else {
        value
    }
}

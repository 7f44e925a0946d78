//! Content line folding (RFC 5545 §3.1).

use kunai_core::constants::{FOLD_CONTINUATION, MAX_LINE_OCTETS};

/// Folds a line so that no segment exceeds 75 octets.
///
/// Segments are joined with CRLF + space; the space counts toward its
/// segment's length. Folds only at UTF-8 character boundaries, so unfolding
/// reconstructs the input exactly.
#[must_use]
pub fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_string();
    }

    let mut result =
        String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * FOLD_CONTINUATION.len());
    let mut current_len = 0;

    for c in line.chars() {
        let char_len = c.len_utf8();

        if current_len + char_len > MAX_LINE_OCTETS {
            result.push_str(FOLD_CONTINUATION);
            current_len = 1; // The leading space
        }

        result.push(c);
        current_len += char_len;
    }

    result
}

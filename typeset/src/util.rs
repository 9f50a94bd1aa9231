// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Misc helpers.

use core::ops::Range;

/// Returns the index after the last non-whitespace character in `range`, or
/// `range.start` if the range is entirely whitespace.
pub(crate) fn trailing_whitespace_start(text: &str, range: Range<usize>) -> usize {
    let start = range.start;
    text[range]
        .char_indices()
        .rev()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(index, ch)| start + index + ch.len_utf8())
        .unwrap_or(start)
}

/// Returns the index of the first non-whitespace character in `range`, or
/// `range.end` if the range is entirely whitespace.
pub(crate) fn leading_whitespace_end(text: &str, range: Range<usize>) -> usize {
    let (start, end) = (range.start, range.end);
    text[range]
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map(|(index, _)| start + index)
        .unwrap_or(end)
}

/// Length in bytes of the character starting at `index`, or `1` if `index` does not
/// start a character.
pub(crate) fn char_len_at(text: &str, index: usize) -> usize {
    text.get(index..)
        .and_then(|rest| rest.chars().next())
        .map(char::len_utf8)
        .unwrap_or(1)
}

/// Start of the character that contains the byte at `index`.
pub(crate) fn char_start_before(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Returns true if `level` is a right-to-left embedding level.
#[inline(always)]
pub(crate) fn is_rtl(level: u8) -> bool {
    level & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_edges() {
        let text = "  ab  c \t";
        assert_eq!(trailing_whitespace_start(text, 0..text.len()), 7);
        assert_eq!(trailing_whitespace_start(text, 0..6), 4);
        assert_eq!(trailing_whitespace_start(text, 0..2), 0);
        assert_eq!(leading_whitespace_end(text, 0..text.len()), 2);
        assert_eq!(leading_whitespace_end(text, 4..text.len()), 6);
        assert_eq!(leading_whitespace_end(text, 7..text.len()), text.len());
    }

    #[test]
    fn multibyte_whitespace() {
        // U+3000 IDEOGRAPHIC SPACE is three bytes long.
        let text = "a\u{3000}";
        assert_eq!(trailing_whitespace_start(text, 0..text.len()), 1);
        assert_eq!(char_len_at(text, 1), 3);
        assert_eq!(char_start_before(text, 3), 1);
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec;

use super::utils::{line_ranges, TestDoc, ADVANCE};
use crate::testing::{FixedShaper, ForcedLevels};
use crate::{BreakMode, ErrorKind, Truncation, TruncationPlace};

/// Hebrew word, space, "world", space, Hebrew word: 8 + 1 + 5 + 1 + 8 bytes.
const SHALOM_WORLD: &str = "\u{5e9}\u{5dc}\u{5d5}\u{5dd} world \u{5e2}\u{5d5}\u{5dc}\u{5dd}";

#[test]
fn end_character_truncation_cuts_after_fitting_characters() {
    let typesetter = TestDoc::new("abcdEFGH")
        .levels(ForcedLevels::new(0).with_level(4..8, 1))
        .build();

    let line = typesetter.truncate(0..8, 50.0, TruncationPlace::End, BreakMode::Character);
    assert_eq!(line.range(), 0..4);
    assert_eq!(line_ranges(&line), vec![Some(0..4), None]);
    assert!(line.width() <= 50.0);
    assert_eq!(line.width(), 50.0);
}

#[test]
fn fitting_line_is_not_truncated() {
    let typesetter = TestDoc::new("abcdEFGH")
        .levels(ForcedLevels::new(0).with_level(4..8, 1))
        .build();

    for place in [
        TruncationPlace::Start,
        TruncationPlace::Middle,
        TruncationPlace::End,
    ] {
        let line = typesetter.truncate(0..8, 80.0, place, BreakMode::Word);
        let plain = typesetter.create_line(0..8).unwrap();
        assert_eq!(line.range(), plain.range());
        assert_eq!(line_ranges(&line), line_ranges(&plain));
        assert_eq!(line.width(), plain.width());
    }
}

#[test]
fn end_word_truncation_drops_whitespace_before_token() {
    let typesetter = TestDoc::new("hello big world").build();

    let line = typesetter.truncate(0..15, 100.0, TruncationPlace::End, BreakMode::Word);
    assert_eq!(line.range(), 0..9);
    assert_eq!(line_ranges(&line), vec![Some(0..9), None]);
    assert_eq!(line.width(), 100.0);
    assert!(line.runs()[1].is_token());
    assert_eq!(line.runs()[1].origin_x(), 90.0);
}

#[test]
fn start_truncation_keeps_the_tail() {
    let typesetter = TestDoc::new("abcdefgh").build();

    let line = typesetter.truncate(0..8, 50.0, TruncationPlace::Start, BreakMode::Character);
    assert_eq!(line.range(), 4..8);
    assert_eq!(line_ranges(&line), vec![None, Some(4..8)]);
    assert_eq!(line.width(), 50.0);
}

#[test]
fn start_truncation_drops_whitespace_after_token() {
    let typesetter = TestDoc::new("The quick brown fox jumps over the lazy dog.").build();

    let line = typesetter.truncate(0..44, 55.0, TruncationPlace::Start, BreakMode::Character);
    assert_eq!(line.range(), 40..44);
    assert_eq!(line_ranges(&line), vec![None, Some(40..44)]);
    assert_eq!(line.width(), 50.0);
}

#[test]
fn start_word_truncation_does_not_count_trailing_space_of_dropped_word() {
    // "world " is 60 wide and only fits if its trailing space is ignored.
    let typesetter = TestDoc::new(SHALOM_WORLD).build();

    let line = typesetter.truncate(0..23, 100.0, TruncationPlace::Start, BreakMode::Word);
    assert_eq!(line.range(), 15..23);
    assert_eq!(line_ranges(&line), vec![Some(15..23), None]);
    assert_eq!(line.width(), 50.0);
}

#[test]
fn rtl_start_truncation_puts_token_between_runs() {
    let typesetter = TestDoc::new(SHALOM_WORLD).build();

    let line = typesetter.truncate(0..23, 100.0, TruncationPlace::Start, BreakMode::Character);
    assert_eq!(line.range(), 10..23);
    assert_eq!(line_ranges(&line), vec![Some(14..23), None, Some(10..14)]);
    assert_eq!(line.paragraph_level(), 1);
    assert!(line.width() <= 100.0);
    assert_eq!(line.runs()[1].origin_x(), 50.0);
}

#[test]
fn middle_truncation_keeps_both_ends() {
    let typesetter = TestDoc::new("abcdefghij").build();

    let line = typesetter.truncate(0..10, 70.0, TruncationPlace::Middle, BreakMode::Character);
    assert_eq!(line.range(), 0..10);
    assert_eq!(line_ranges(&line), vec![Some(0..3), None, Some(7..10)]);
    assert_eq!(line.width(), 70.0);
}

#[test]
fn rtl_end_truncation_puts_token_on_the_left() {
    let typesetter = TestDoc::new("abcdefgh")
        .levels(ForcedLevels::new(1))
        .build();

    let line = typesetter.truncate(0..8, 50.0, TruncationPlace::End, BreakMode::Character);
    assert_eq!(line.range(), 0..4);
    assert_eq!(line_ranges(&line), vec![None, Some(0..4)]);
    assert_eq!(line.paragraph_level(), 1);
}

#[test]
fn token_takes_style_of_truncation_point() {
    let typesetter = TestDoc::new("abcdefgh")
        .typeface("bold", 6..8)
        .font_size(30.0, 6..8)
        .build();

    let end = typesetter
        .create_token(None, TruncationPlace::End, 0..8, &FixedShaper::new(ADVANCE))
        .unwrap();
    assert_eq!(*end.runs()[0].glyph_run().typeface(), "bold");
    assert_eq!(end.ascent(), 24.0);
    assert_eq!(end.width(), ADVANCE);

    let start = typesetter
        .create_token(Some(".."), TruncationPlace::Start, 0..8, &FixedShaper::new(ADVANCE))
        .unwrap();
    assert_eq!(*start.runs()[0].glyph_run().typeface(), "regular");
    assert_eq!(start.width(), 2.0 * ADVANCE);
}

#[test]
fn token_wider_than_limit_is_rejected() {
    let typesetter = TestDoc::new("abcdefgh").build();
    let truncation = Truncation::default();
    let token = typesetter.test_token(truncation, 0..8);

    let err = typesetter
        .create_truncated_line(0..8, 5.0, truncation, &token)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TokenTooWide);
}

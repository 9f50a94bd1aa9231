// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::error::Error as _;
use core::ops::Range;

use super::utils::TestDoc;
use crate::bidi::BidiParagraph;
use crate::testing::FixedShaper;
use crate::{
    Attribute, BaseDirection, BidiService, Error, ErrorKind, FrameBounds, FrameOptions,
    Truncation, TypesetterBuilder,
};

#[test]
fn empty_text_is_rejected() {
    let mut builder = TypesetterBuilder::new("");
    builder.push_default(Attribute::Typeface("regular"));
    let err = builder.build(&FixedShaper::new(10.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::EmptyText);
}

#[test]
fn missing_typeface_is_reported_with_its_range() {
    let mut builder = TypesetterBuilder::new("abcdef");
    builder.push(Attribute::Typeface("regular"), 0..4);
    let err = builder.build(&FixedShaper::new(10.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingTypeface);
    assert_eq!(err.range(), Some(4..6));
}

#[test]
fn attribute_splitting_a_character_is_rejected() {
    let mut builder = TypesetterBuilder::new("a\u{e9}b");
    builder.push_default(Attribute::Typeface("regular"));
    builder.push(Attribute::FontSize(30.0), 0..2);
    let err = builder.build(&FixedShaper::new(10.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidRange);
}

#[test]
fn bad_ranges_are_rejected() {
    let typesetter = TestDoc::new("a\u{e9}bc").build();
    let reversed = Range { start: 3, end: 1 };
    let bad = [2..2, reversed, 0..9, 0..2];
    for range in bad {
        let err = typesetter.create_line(range.clone()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange, "{range:?}");
        assert_eq!(
            typesetter.measure(range.clone()).unwrap_err().kind(),
            ErrorKind::InvalidRange
        );
    }
    assert_eq!(
        typesetter.suggest_line_boundary(5, 10.0).unwrap_err().kind(),
        ErrorKind::InvalidRange
    );
    assert_eq!(
        typesetter.paragraph_level_at(5).unwrap_err().kind(),
        ErrorKind::InvalidRange
    );
}

#[test]
fn bad_widths_are_rejected() {
    let typesetter = TestDoc::new("abc").build();
    for width in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        assert_eq!(
            typesetter.suggest_char_boundary(0, width).unwrap_err().kind(),
            ErrorKind::InvalidWidth
        );
        let truncation = Truncation::default();
        let token = typesetter.test_token(truncation, 0..3);
        assert_eq!(
            typesetter
                .create_truncated_line(0..3, width, truncation, &token)
                .unwrap_err()
                .kind(),
            ErrorKind::InvalidWidth
        );
    }
}

#[test]
fn degenerate_frames_are_rejected() {
    let typesetter = TestDoc::new("abc").build();
    for bounds in [
        FrameBounds::new(0.0, 0.0, 0.0, 10.0),
        FrameBounds::new(0.0, 0.0, 10.0, -1.0),
        FrameBounds::new(f32::NAN, 0.0, 10.0, 10.0),
    ] {
        let err = typesetter
            .create_frame(0..3, bounds, &FrameOptions::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFrame);
    }
}

#[derive(Debug)]
struct Unavailable;

impl core::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("bidi data unavailable")
    }
}

impl core::error::Error for Unavailable {}

#[derive(Debug)]
struct FailingBidi;

impl BidiService for FailingBidi {
    fn create_paragraph(
        &self,
        _text: &Arc<str>,
        _range: Range<usize>,
        _base: BaseDirection,
    ) -> Result<Arc<dyn BidiParagraph>, Error> {
        Err(Error::collaborator(Unavailable))
    }
}

#[test]
fn collaborator_failures_propagate() {
    let mut builder = TypesetterBuilder::new("abc");
    builder.push_default(Attribute::Typeface("regular"));
    builder.set_bidi_service(FailingBidi);
    let err = builder.build(&FixedShaper::new(10.0)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Collaborator);
    assert!(err.source().is_some_and(|source| source.is::<Unavailable>()));
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use crate::testing::{FixedShaper, ForcedLevels};
use crate::{
    Attribute, TextLine, Truncation, TruncationPlace, Typesetter, TypesetterBuilder,
};

/// Advance of every glyph produced by the test shaper.
pub(crate) const ADVANCE: f32 = 10.0;

/// Typeface covering the whole text unless a test overrides it.
const REGULAR: &str = "regular";

/// Document under test. Font size 20 makes every line 20 units tall.
pub(crate) struct TestDoc {
    builder: TypesetterBuilder<&'static str>,
    shaper: FixedShaper,
}

impl TestDoc {
    pub(crate) fn new(text: &str) -> Self {
        let mut builder = TypesetterBuilder::new(text);
        builder.push_default(Attribute::Typeface(REGULAR));
        builder.push_default(Attribute::FontSize(20.0));
        Self {
            builder,
            shaper: FixedShaper::new(ADVANCE),
        }
    }

    pub(crate) fn typeface(mut self, typeface: &'static str, range: Range<usize>) -> Self {
        self.builder.push(Attribute::Typeface(typeface), range);
        self
    }

    pub(crate) fn font_size(mut self, size: f32, range: Range<usize>) -> Self {
        self.builder.push(Attribute::FontSize(size), range);
        self
    }

    pub(crate) fn levels(mut self, levels: ForcedLevels) -> Self {
        self.builder.set_bidi_service(levels);
        self
    }

    /// Vertical metrics as fractions of the font size.
    pub(crate) fn line_metrics(mut self, ascent: f32, descent: f32, leading: f32) -> Self {
        self.shaper = self.shaper.with_metrics(ascent, descent, leading);
        self
    }

    pub(crate) fn build(self) -> Typesetter<&'static str> {
        self.builder.build(&self.shaper).unwrap()
    }
}

impl Typesetter<&'static str> {
    /// Default ellipsis token for truncating `range` at `truncation`.
    pub(crate) fn test_token(
        &self,
        truncation: Truncation,
        range: Range<usize>,
    ) -> TextLine<&'static str> {
        self.create_token(None, truncation.place, range, &FixedShaper::new(ADVANCE))
            .unwrap()
    }

    pub(crate) fn truncate(
        &self,
        range: Range<usize>,
        max_width: f32,
        place: TruncationPlace,
        mode: crate::BreakMode,
    ) -> TextLine<&'static str> {
        let truncation = Truncation::new(place, mode);
        let token = self.test_token(truncation, range.clone());
        self.create_truncated_line(range, max_width, truncation, &token)
            .unwrap()
    }
}

/// Ranges of a line's runs in visual order, with token runs reported as `None`.
pub(crate) fn line_ranges<F: crate::Typeface>(line: &TextLine<F>) -> Vec<Option<Range<usize>>> {
    line.runs()
        .iter()
        .map(|run| (!run.is_token()).then(|| run.range()))
        .collect()
}

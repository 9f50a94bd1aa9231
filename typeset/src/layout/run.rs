// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use core::ops::Range;

use super::GlyphRun;
use crate::bidi::BidiLevel;
use crate::style::Typeface;

/// Visual slice of exactly one glyph run, positioned within a line.
#[derive(Clone, Debug)]
pub struct TextRun<F: Typeface> {
    glyph_run: Arc<GlyphRun<F>>,
    range: Range<usize>,
    glyph_range: Range<usize>,
    width: f32,
    origin_x: f32,
    is_token: bool,
}

impl<F: Typeface> TextRun<F> {
    pub(crate) fn new(glyph_run: Arc<GlyphRun<F>>, range: Range<usize>) -> Self {
        let glyph_range = glyph_run.glyph_range_for_chars(range.clone());
        let width = glyph_run.measure_glyphs(glyph_range.clone());
        Self {
            glyph_run,
            range,
            glyph_range,
            width,
            origin_x: 0.0,
            is_token: false,
        }
    }

    /// Returns a copy of this run flagged as belonging to a truncation token.
    pub(crate) fn to_token(&self) -> Self {
        Self {
            is_token: true,
            ..self.clone()
        }
    }

    /// Glyph run this run is a slice of.
    pub fn glyph_run(&self) -> &Arc<GlyphRun<F>> {
        &self.glyph_run
    }

    /// Range of text displayed by the run.
    ///
    /// For token runs the range refers to the token's own text.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Range of glyphs within the glyph run.
    pub fn glyph_range(&self) -> Range<usize> {
        self.glyph_range.clone()
    }

    /// Embedding level of the run.
    pub fn bidi_level(&self) -> BidiLevel {
        self.glyph_run.bidi_level()
    }

    /// Returns true if the run is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.glyph_run.is_rtl()
    }

    /// Returns true if the run was spliced in from a truncation token.
    pub fn is_token(&self) -> bool {
        self.is_token
    }

    /// Sum of the advances of the run's glyphs.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Horizontal offset of the run from the line origin.
    pub fn origin_x(&self) -> f32 {
        self.origin_x
    }

    pub(crate) fn set_origin_x(&mut self, origin_x: f32) {
        self.origin_x = origin_x;
    }

    /// Glyph identifiers of the run, in visual order.
    pub fn glyph_ids(&self) -> &[u32] {
        &self.glyph_run.glyph_ids()[self.glyph_range.clone()]
    }

    /// Glyph advances of the run, in visual order.
    pub fn advances(&self) -> &[f32] {
        &self.glyph_run.advances()[self.glyph_range.clone()]
    }

    /// Glyph offsets of the run, in visual order.
    pub fn offsets(&self) -> &[(f32, f32)] {
        &self.glyph_run.offsets()[self.glyph_range.clone()]
    }

    /// Horizontal position, from the line origin, of the caret before the character
    /// at `index`.
    ///
    /// Indices outside the run are clamped to it. The end of the run maps to its
    /// right edge, or its left edge when right-to-left.
    pub fn caret_edge(&self, index: usize) -> f32 {
        let index = index.clamp(self.range.start, self.range.end);
        let distance = self.logical_distance(index).clamp(0.0, self.width);
        if self.is_rtl() {
            self.origin_x + self.width - distance
        } else {
            self.origin_x + distance
        }
    }

    /// Returns the caret index closest to `x`, measured from the line origin.
    ///
    /// Within a character the caret snaps to whichever side is nearer. Positions
    /// before the run give its start and positions past it give its end.
    pub fn nearest_char_index(&self, x: f32) -> usize {
        let distance = if self.is_rtl() {
            self.origin_x + self.width - x
        } else {
            x - self.origin_x
        };
        let mut nearest = self.range.start;
        let mut previous = 0.0;
        for (index, _) in self.glyph_run.carets_after(self.range.clone()) {
            let current = self.logical_distance(index);
            if distance <= current {
                return if distance - previous < current - distance {
                    nearest
                } else {
                    index
                };
            }
            nearest = index;
            previous = current;
        }
        self.range.end
    }

    fn logical_distance(&self, index: usize) -> f32 {
        self.glyph_run.caret_offset(index) - self.glyph_run.caret_offset(self.range.start)
    }

    /// Width of the glyphs displaying the text from `whitespace_start` to the end
    /// of the run.
    pub(crate) fn trailing_width_from(&self, whitespace_start: usize) -> f32 {
        let start = whitespace_start.max(self.range.start);
        if self.is_token || start >= self.range.end {
            return 0.0;
        }
        self.glyph_run.measure_chars(start..self.range.end)
    }
}

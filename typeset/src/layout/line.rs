// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::ops::Range;

use super::TextRun;
use crate::bidi::BidiLevel;
use crate::style::Typeface;
use crate::util::{is_rtl, trailing_whitespace_start};

/// Visually ordered line of text.
#[derive(Clone, Debug)]
pub struct TextLine<F: Typeface> {
    range: Range<usize>,
    runs: Vec<TextRun<F>>,
    ascent: f32,
    descent: f32,
    leading: f32,
    width: f32,
    trailing_whitespace_width: f32,
    paragraph_level: BidiLevel,
    origin: (f32, f32),
}

impl<F: Typeface> TextLine<F> {
    /// Lays out `runs` side by side and computes the line metrics.
    pub(crate) fn compose(
        text: &str,
        range: Range<usize>,
        mut runs: Vec<TextRun<F>>,
        paragraph_level: BidiLevel,
    ) -> Self {
        let whitespace_start = trailing_whitespace_start(text, range.clone());
        let mut ascent = 0.0_f32;
        let mut descent = 0.0_f32;
        let mut leading = 0.0_f32;
        let mut width = 0.0_f32;
        let mut trailing_whitespace_width = 0.0;

        for run in &mut runs {
            run.set_origin_x(width);
            let glyph_run = run.glyph_run();
            ascent = ascent.max(glyph_run.ascent());
            descent = descent.max(glyph_run.descent());
            leading = leading.max(glyph_run.leading());
            trailing_whitespace_width += run.trailing_width_from(whitespace_start);
            width += run.width();
        }

        Self {
            range,
            runs,
            ascent,
            descent,
            leading,
            width,
            trailing_whitespace_width,
            paragraph_level,
            origin: (0.0, 0.0),
        }
    }

    /// Range of text covered by the line.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Runs of the line in visual order.
    pub fn runs(&self) -> &[TextRun<F>] {
        &self.runs
    }

    /// Returns the non-token run displaying the character at `index`.
    pub fn run_at_char(&self, index: usize) -> Option<&TextRun<F>> {
        self.runs
            .iter()
            .filter(|run| !run.is_token())
            .find(|run| run.range().contains(&index))
    }

    /// Largest ascent of the line's runs.
    pub fn ascent(&self) -> f32 {
        self.ascent
    }

    /// Largest descent of the line's runs.
    pub fn descent(&self) -> f32 {
        self.descent
    }

    /// Largest leading of the line's runs.
    pub fn leading(&self) -> f32 {
        self.leading
    }

    /// Total height of the line: ascent, descent and leading.
    pub fn height(&self) -> f32 {
        self.ascent + self.descent + self.leading
    }

    /// Sum of the widths of all runs.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Width of the whitespace at the logical end of the line.
    pub fn trailing_whitespace_width(&self) -> f32 {
        self.trailing_whitespace_width
    }

    /// Base level of the paragraph the line starts in.
    pub fn paragraph_level(&self) -> BidiLevel {
        self.paragraph_level
    }

    /// Position of the line's baseline start, once placed in a frame.
    pub fn origin(&self) -> (f32, f32) {
        self.origin
    }

    /// Top edge of the line, once placed in a frame.
    pub fn top(&self) -> f32 {
        self.origin.1 - self.ascent
    }

    /// Bottom edge of the line, once placed in a frame. Includes the leading.
    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }

    /// Horizontal position of the caret at `index`, from the line origin.
    ///
    /// Returns `None` if `index` lies outside the line. The end of the line maps to
    /// the trailing edge of the run that ends there, or to the line's width when a
    /// token follows the cut.
    pub fn char_distance(&self, index: usize) -> Option<f32> {
        if index < self.range.start || index > self.range.end {
            return None;
        }
        let run = self.run_at_char(index).or_else(|| {
            self.runs
                .iter()
                .filter(|run| !run.is_token())
                .find(|run| run.range().end == index)
        });
        Some(run.map_or(self.width, |run| run.caret_edge(index)))
    }

    /// Returns the `(left, right)` edges, from the line origin, covering the part of
    /// `range` displayed by each run, left to right.
    ///
    /// Token runs are never included. The range is clipped to the line.
    pub fn visual_edges(&self, range: Range<usize>) -> Vec<(f32, f32)> {
        self.runs
            .iter()
            .filter(|run| !run.is_token())
            .filter_map(|run| {
                let start = range.start.max(run.range().start);
                let end = range.end.min(run.range().end);
                (start < end).then(|| {
                    let (a, b) = (run.caret_edge(start), run.caret_edge(end));
                    (a.min(b), a.max(b))
                })
            })
            .collect()
    }

    /// Returns the caret index closest to `x`, measured from the line origin.
    ///
    /// The run under `x` decides, or the first run when `x` is before the line. A
    /// position over a token resolves within the text run before it.
    pub fn nearest_char_index(&self, x: f32) -> usize {
        let mut text_runs = self.runs.iter().filter(|run| !run.is_token());
        let Some(first) = text_runs.next() else {
            return self.range.start;
        };
        let run = text_runs
            .rev()
            .find(|run| run.origin_x() <= x)
            .unwrap_or(first);
        run.nearest_char_index(x)
    }

    /// Pen offset that aligns the line within `flush_width`.
    ///
    /// A `flush_factor` of 0 aligns the visible text to the left, 1 to the right,
    /// and 0.5 centers it. Trailing whitespace is kept out of the visible width and,
    /// for right-to-left paragraphs, hangs past the left edge.
    pub fn flush_pen_offset(&self, flush_factor: f32, flush_width: f32) -> f32 {
        let visible_width = self.width - self.trailing_whitespace_width;
        let mut offset = (flush_width - visible_width) * flush_factor;
        if is_rtl(self.paragraph_level) {
            offset -= self.trailing_whitespace_width;
        }
        offset
    }

    pub(crate) fn set_origin(&mut self, origin: (f32, f32)) {
        self.origin = origin;
    }

    /// Grows the line to `multiplier` times its height, keeping the text centered.
    pub(crate) fn scale_height(&mut self, multiplier: f32) {
        let height = self.height();
        let half_growth = (height * multiplier - height) / 2.0;
        self.ascent += half_growth;
        self.descent += half_growth;
    }

    pub(crate) fn add_leading(&mut self, spacing: f32) {
        self.leading += spacing;
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion of character ranges into glyph run slices.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use super::{GlyphRun, TextRun};
use crate::bidi::BidiLevel;
use crate::style::Typeface;
use crate::util::is_rtl;

/// Index of the glyph run containing `index`.
pub(crate) fn run_index_at<F: Typeface>(runs: &[Arc<GlyphRun<F>>], index: usize) -> usize {
    runs.partition_point(|run| run.range().end <= index)
}

/// Logical width of `range`, summed over the glyph runs it covers.
pub(crate) fn measure<F: Typeface>(runs: &[Arc<GlyphRun<F>>], range: Range<usize>) -> f32 {
    let mut width = 0.0;
    let mut start = range.start;
    if start >= range.end {
        return width;
    }
    for run in &runs[run_index_at(runs, start)..] {
        let end = run.range().end.min(range.end);
        width += run.measure_chars(start..end);
        start = end;
        if start >= range.end {
            break;
        }
    }
    width
}

/// Decides where each glyph run slice of a visual run is placed in a line.
///
/// A visual run whose glyph runs share one right-to-left level must have its later
/// slices land before its earlier ones, so such slices are inserted at a fixed
/// cursor. Everything else is appended.
#[derive(Clone, Copy, Debug)]
pub(crate) struct VisualInserter {
    previous_level: Option<BidiLevel>,
    cursor: usize,
}

impl VisualInserter {
    /// Starts a visual run on a list currently holding `len` runs.
    pub(crate) fn new(len: usize) -> Self {
        Self {
            previous_level: None,
            cursor: len,
        }
    }

    /// Returns the position for the next slice, given its level and the current list
    /// length.
    pub(crate) fn next_position(&mut self, level: BidiLevel, len: usize) -> usize {
        let continues_rtl = self.previous_level == Some(level) && is_rtl(level);
        if !continues_rtl {
            self.cursor = len;
        }
        self.previous_level = Some(level);
        self.cursor
    }
}

/// Appends the slices of the visual run `range` to `out`.
pub(crate) fn add_visual_runs<F: Typeface>(
    runs: &[Arc<GlyphRun<F>>],
    range: Range<usize>,
    out: &mut Vec<TextRun<F>>,
) {
    let mut inserter = VisualInserter::new(out.len());
    let mut start = range.start;
    while start < range.end {
        let glyph_run = &runs[run_index_at(runs, start)];
        let end = glyph_run.range().end.min(range.end);
        let index = inserter.next_position(glyph_run.bidi_level(), out.len());
        out.insert(index, TextRun::new(glyph_run.clone(), start..end));
        start = end;
    }
}

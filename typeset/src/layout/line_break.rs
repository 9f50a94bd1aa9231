// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width constrained break search.

use alloc::sync::Arc;
use core::ops::Range;

use log::trace;

use super::segment::measure;
use super::GlyphRun;
use crate::analysis::{BreakKind, BreakRecord};
use crate::style::Typeface;
use crate::util::{
    char_len_at, char_start_before, leading_whitespace_end, trailing_whitespace_start,
};

/// Granularity of a break search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BreakMode {
    /// Break between words, falling back to characters.
    #[default]
    Word,
    /// Break between grapheme clusters.
    Character,
}

/// Read-only view of the tables a break search needs.
#[derive(Clone, Copy)]
pub(crate) struct BreakSearch<'a, F: Typeface> {
    pub(crate) text: &'a str,
    pub(crate) breaks: &'a BreakRecord,
    pub(crate) runs: &'a [Arc<GlyphRun<F>>],
}

impl<F: Typeface> BreakSearch<'_, F> {
    fn measure(&self, range: Range<usize>) -> f32 {
        measure(self.runs, range)
    }

    /// Scans forward from `range.start`, returning the furthest break whose text fits
    /// in `extent`, or `range.start` if none does.
    pub(crate) fn find_forward_break(
        &self,
        kind: BreakKind,
        range: Range<usize>,
        extent: f32,
    ) -> usize {
        let mut forward_break = range.start;
        let mut measurement = 0.0;

        for index in range.clone() {
            if self.breaks.is_forward(index, BreakKind::Paragraph) {
                let segment_end = index + 1;
                measurement += self.measure(forward_break..segment_end);
                if measurement <= extent {
                    forward_break = segment_end;
                }
                break;
            }

            if self.breaks.is_forward(index, kind) {
                let segment_end = index + 1;
                measurement += self.measure(forward_break..segment_end);
                if measurement > extent {
                    let whitespace_start =
                        trailing_whitespace_start(self.text, forward_break..segment_end);
                    let whitespace_width = self.measure(whitespace_start..segment_end);
                    if measurement - whitespace_width <= extent {
                        forward_break = segment_end;
                    }
                    break;
                }
                forward_break = segment_end;
            }
        }

        forward_break
    }

    /// Scans backward from `range.end`, returning the earliest break whose text fits
    /// in `extent`, or `range.end` if none does.
    pub(crate) fn find_backward_break(
        &self,
        kind: BreakKind,
        range: Range<usize>,
        extent: f32,
    ) -> usize {
        let mut backward_break = range.end;
        let mut measurement = 0.0;

        for index in range.clone().rev() {
            if self.breaks.is_backward(index, BreakKind::Paragraph) {
                measurement += self.measure(index..backward_break);
                if measurement <= extent {
                    backward_break = index;
                }
                break;
            }

            if self.breaks.is_backward(index, kind) {
                measurement += self.measure(index..backward_break);
                if measurement > extent {
                    let whitespace_end = leading_whitespace_end(self.text, index..backward_break);
                    let whitespace_width = self.measure(index..whitespace_end);
                    if measurement - whitespace_width <= extent {
                        backward_break = index;
                    }
                    break;
                }
                backward_break = index;
            }
        }

        backward_break
    }

    /// Forward character break, taking at least one grapheme.
    pub(crate) fn suggest_forward_char_break(&self, range: Range<usize>, extent: f32) -> usize {
        let forward_break = self.find_forward_break(BreakKind::Character, range.clone(), extent);
        if forward_break != range.start {
            return forward_break;
        }
        trace!("no grapheme of {range:?} fits in {extent}, taking one");
        range
            .clone()
            .find(|&index| self.breaks.is_forward(index, BreakKind::Character))
            .map(|index| index + 1)
            .unwrap_or_else(|| (range.start + char_len_at(self.text, range.start)).min(range.end))
    }

    /// Backward character break, leaving at least one grapheme.
    pub(crate) fn suggest_backward_char_break(&self, range: Range<usize>, extent: f32) -> usize {
        let backward_break = self.find_backward_break(BreakKind::Character, range.clone(), extent);
        if backward_break != range.end {
            return backward_break;
        }
        trace!("no grapheme of {range:?} fits in {extent}, taking one");
        range
            .clone()
            .rev()
            .find(|&index| self.breaks.is_backward(index, BreakKind::Character))
            .unwrap_or_else(|| char_start_before(self.text, range.end - 1).max(range.start))
    }

    /// Forward line break, falling back to a character break.
    pub(crate) fn suggest_forward_line_break(&self, range: Range<usize>, extent: f32) -> usize {
        let forward_break = self.find_forward_break(BreakKind::Line, range.clone(), extent);
        if forward_break != range.start {
            return forward_break;
        }
        trace!("no line break of {range:?} fits in {extent}, breaking characters");
        self.suggest_forward_char_break(range, extent)
    }

    /// Backward line break, falling back to a character break.
    pub(crate) fn suggest_backward_line_break(&self, range: Range<usize>, extent: f32) -> usize {
        let backward_break = self.find_backward_break(BreakKind::Line, range.clone(), extent);
        if backward_break != range.end {
            return backward_break;
        }
        trace!("no line break of {range:?} fits in {extent}, breaking characters");
        self.suggest_backward_char_break(range, extent)
    }

    pub(crate) fn suggest_forward_break(
        &self,
        range: Range<usize>,
        extent: f32,
        mode: BreakMode,
    ) -> usize {
        match mode {
            BreakMode::Word => self.suggest_forward_line_break(range, extent),
            BreakMode::Character => self.suggest_forward_char_break(range, extent),
        }
    }

    pub(crate) fn suggest_backward_break(
        &self,
        range: Range<usize>,
        extent: f32,
        mode: BreakMode,
    ) -> usize {
        match mode {
            BreakMode::Word => self.suggest_backward_line_break(range, extent),
            BreakMode::Character => self.suggest_backward_char_break(range, extent),
        }
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Width bounded lines ending, starting or broken in the middle with a token.

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use log::trace;

use super::segment::add_visual_runs;
use super::{BreakMode, GlyphRun, TextLine, TextRun, Typesetter};
use crate::bidi::BidiRun;
use crate::error::{verify_range, verify_width};
use crate::style::Typeface;
use crate::util::{leading_whitespace_end, trailing_whitespace_start};
use crate::Error;

/// Where the elided text of a truncated line is taken from.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum TruncationPlace {
    /// Elide the start of the line.
    Start,
    /// Elide the middle of the line.
    Middle,
    /// Elide the end of the line.
    #[default]
    End,
}

/// How a line is truncated.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Truncation {
    /// Which part of the line is elided.
    pub place: TruncationPlace,
    /// Granularity of the cut.
    pub mode: BreakMode,
}

impl Truncation {
    /// Creates a truncation with the given place and mode.
    pub fn new(place: TruncationPlace, mode: BreakMode) -> Self {
        Self { place, mode }
    }
}

/// Collects the visual runs of a line while leaving out the text in `skip`, noting
/// where the token goes on either side of the hole.
struct SkipCollector<'a, F: Typeface> {
    glyph_runs: &'a [Arc<GlyphRun<F>>],
    skip: Range<usize>,
    runs: Vec<TextRun<F>>,
    leading_token_index: Option<usize>,
    trailing_token_index: Option<usize>,
}

impl<'a, F: Typeface> SkipCollector<'a, F> {
    fn new(glyph_runs: &'a [Arc<GlyphRun<F>>], skip: Range<usize>) -> Self {
        Self {
            glyph_runs,
            skip,
            runs: Vec::new(),
            leading_token_index: None,
            trailing_token_index: None,
        }
    }

    fn accept(&mut self, bidi_run: &BidiRun) {
        let (start, end) = (bidi_run.range.start, bidi_run.range.end);
        let (skip_start, skip_end) = (self.skip.start, self.skip.end);

        if bidi_run.is_rtl() {
            if end >= skip_end {
                add_visual_runs(self.glyph_runs, start.max(skip_end)..end, &mut self.runs);
                if start < skip_end {
                    self.trailing_token_index = Some(self.runs.len());
                }
            }
            if start <= skip_start {
                if end > skip_start {
                    self.leading_token_index = Some(self.runs.len());
                }
                add_visual_runs(self.glyph_runs, start..end.min(skip_start), &mut self.runs);
            }
        } else {
            if start <= skip_start {
                add_visual_runs(self.glyph_runs, start..end.min(skip_start), &mut self.runs);
                if end > skip_start {
                    self.leading_token_index = Some(self.runs.len());
                }
            }
            if end >= skip_end {
                if start < skip_end {
                    self.trailing_token_index = Some(self.runs.len());
                }
                add_visual_runs(self.glyph_runs, start.max(skip_end)..end, &mut self.runs);
            }
        }
    }
}

/// Splices copies of the token's runs into `runs` at `index`.
fn insert_token<F: Typeface>(runs: &mut Vec<TextRun<F>>, token: &TextLine<F>, index: usize) {
    let index = index.min(runs.len());
    runs.splice(index..index, token.runs().iter().map(TextRun::to_token));
}

impl<F: Typeface> Typesetter<F> {
    /// Creates a line for `range` that fits in `max_width`, eliding text and inserting
    /// `token` if it does not.
    ///
    /// A range that already fits produces the same line as [`Self::create_line`].
    pub fn create_truncated_line(
        &self,
        range: Range<usize>,
        max_width: f32,
        truncation: Truncation,
        token: &TextLine<F>,
    ) -> Result<TextLine<F>, Error> {
        verify_range(self.text(), &range)?;
        verify_width(max_width)?;
        if max_width < token.width() {
            return Err(Error::token_too_wide(max_width, token.width()));
        }
        if self.measure(range.clone())? <= max_width {
            trace!("{range:?} fits in {max_width}, not truncating");
            return self.create_line(range);
        }

        let tokenless_width = max_width - token.width();
        match truncation.place {
            TruncationPlace::Start => {
                self.truncate_start(range, tokenless_width, truncation.mode, token)
            }
            TruncationPlace::Middle => {
                self.truncate_middle(range, tokenless_width, truncation.mode, token)
            }
            TruncationPlace::End => self.truncate_end(range, tokenless_width, truncation.mode, token),
        }
    }

    fn collect_skipping(
        &self,
        range: Range<usize>,
        skip: Range<usize>,
    ) -> Result<SkipCollector<'_, F>, Error> {
        let mut collector = SkipCollector::new(self.glyph_runs(), skip);
        self.for_each_visual_run(range, |run| collector.accept(run))?;
        Ok(collector)
    }

    fn truncate_start(
        &self,
        range: Range<usize>,
        tokenless_width: f32,
        mode: BreakMode,
        token: &TextLine<F>,
    ) -> Result<TextLine<F>, Error> {
        let truncated_start =
            self.break_search()
                .suggest_backward_break(range.clone(), tokenless_width, mode);
        if truncated_start <= range.start {
            trace!("no backward cut in {range:?}, not truncating");
            return self.create_line(range);
        }
        // The token replaces any whitespace after the cut.
        let truncated_start = leading_whitespace_end(self.text(), truncated_start..range.end);

        let mut runs = Vec::new();
        let mut token_index = 0;
        if truncated_start < range.end {
            let collector = self.collect_skipping(range.clone(), range.start..truncated_start)?;
            token_index = collector.trailing_token_index.unwrap_or(0);
            runs = collector.runs;
        }
        insert_token(&mut runs, token, token_index);

        let level = self.paragraph_level_at(truncated_start.min(range.end - 1))?;
        Ok(TextLine::compose(
            self.text(),
            truncated_start..range.end,
            runs,
            level,
        ))
    }

    fn truncate_end(
        &self,
        range: Range<usize>,
        tokenless_width: f32,
        mode: BreakMode,
        token: &TextLine<F>,
    ) -> Result<TextLine<F>, Error> {
        let truncated_end =
            self.break_search()
                .suggest_forward_break(range.clone(), tokenless_width, mode);
        if truncated_end >= range.end {
            trace!("no forward cut in {range:?}, not truncating");
            return self.create_line(range);
        }
        // The token replaces any whitespace before the cut.
        let truncated_end = trailing_whitespace_start(self.text(), range.start..truncated_end);

        let mut runs = Vec::new();
        let mut token_index = 0;
        if range.start < truncated_end {
            let collector = self.collect_skipping(range.clone(), truncated_end..range.end)?;
            token_index = collector
                .leading_token_index
                .unwrap_or(collector.runs.len());
            runs = collector.runs;
        }
        insert_token(&mut runs, token, token_index);

        let level = self.paragraph_level_at(range.start)?;
        Ok(TextLine::compose(
            self.text(),
            range.start..truncated_end,
            runs,
            level,
        ))
    }

    fn truncate_middle(
        &self,
        range: Range<usize>,
        tokenless_width: f32,
        mode: BreakMode,
        token: &TextLine<F>,
    ) -> Result<TextLine<F>, Error> {
        let half_width = tokenless_width / 2.0;
        let search = self.break_search();
        let first_end = search.suggest_forward_break(range.clone(), half_width, mode);
        let second_start = search.suggest_backward_break(range.clone(), half_width, mode);
        // The token replaces whitespace on both sides of the hole.
        let first_end = trailing_whitespace_start(self.text(), range.start..first_end);
        let second_start = leading_whitespace_end(self.text(), second_start..range.end);
        if first_end >= second_start {
            trace!("middle cuts of {range:?} overlap, not truncating");
            return self.create_line(range);
        }

        let mut runs = Vec::new();
        let mut token_index = 0;
        if range.start < first_end || second_start < range.end {
            let collector = self.collect_skipping(range.clone(), first_end..second_start)?;
            token_index = collector
                .leading_token_index
                .unwrap_or(collector.runs.len());
            runs = collector.runs;
        }
        insert_token(&mut runs, token, token_index);

        let level = self.paragraph_level_at(range.start)?;
        Ok(TextLine::compose(self.text(), range, runs, level))
    }
}

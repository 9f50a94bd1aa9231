// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::Range;

use super::line_break::BreakSearch;
use super::segment::{add_visual_runs, measure, run_index_at};
use super::{GlyphRun, TextLine, TruncationPlace};
use crate::analysis::BreakRecord;
use crate::bidi::{BidiLevel, BidiParagraph, BidiRun};
use crate::error::{verify_range, verify_width};
use crate::resolve::AttributeMap;
use crate::shape::Shaper;
use crate::style::{Attribute, Typeface};
use crate::util::char_start_before;
use crate::{Error, TypesetterBuilder};

/// Text used for truncation tokens when none is given.
pub const DEFAULT_TOKEN: &str = "\u{2026}";

/// Immutable, analyzed and shaped document from which lines and frames are composed.
///
/// All composition methods take `&self` and may be called concurrently.
#[derive(Debug)]
pub struct Typesetter<F: Typeface> {
    text: Arc<str>,
    attributes: AttributeMap<F>,
    breaks: BreakRecord,
    paragraphs: Vec<Arc<dyn BidiParagraph>>,
    runs: Vec<Arc<GlyphRun<F>>>,
}

impl<F: Typeface> Typesetter<F> {
    pub(crate) fn from_parts(
        text: Arc<str>,
        attributes: AttributeMap<F>,
        breaks: BreakRecord,
        paragraphs: Vec<Arc<dyn BidiParagraph>>,
        runs: Vec<Arc<GlyphRun<F>>>,
    ) -> Self {
        Self {
            text,
            attributes,
            breaks,
            paragraphs,
            runs,
        }
    }

    /// The document text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Length of the document in bytes.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Always false; empty documents are rejected when building.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Resolved attribute spans of the document.
    pub fn attributes(&self) -> &AttributeMap<F> {
        &self.attributes
    }

    /// Break classification of the document.
    pub fn break_record(&self) -> &BreakRecord {
        &self.breaks
    }

    /// Bidi paragraphs of the document, in order.
    pub fn paragraphs(&self) -> &[Arc<dyn BidiParagraph>] {
        &self.paragraphs
    }

    /// Glyph runs partitioning the document, in logical order.
    pub fn glyph_runs(&self) -> &[Arc<GlyphRun<F>>] {
        &self.runs
    }

    pub(crate) fn break_search(&self) -> BreakSearch<'_, F> {
        BreakSearch {
            text: &self.text,
            breaks: &self.breaks,
            runs: &self.runs,
        }
    }

    pub(crate) fn paragraph_index_at(&self, index: usize) -> usize {
        self.paragraphs
            .partition_point(|paragraph| paragraph.range().end <= index)
    }

    /// Base level of the paragraph containing `index`.
    pub fn paragraph_level_at(&self, index: usize) -> Result<BidiLevel, Error> {
        if index >= self.len() {
            return Err(Error::invalid_range(index..index + 1, self.len()));
        }
        Ok(self.paragraphs[self.paragraph_index_at(index)].base_level())
    }

    /// Logical width of `range`.
    pub fn measure(&self, range: Range<usize>) -> Result<f32, Error> {
        verify_range(&self.text, &range)?;
        Ok(measure(&self.runs, range))
    }

    fn verify_start(&self, start: usize) -> Result<(), Error> {
        if start >= self.len() || !self.text.is_char_boundary(start) {
            return Err(Error::invalid_range(start..self.len(), self.len()));
        }
        Ok(())
    }

    /// Returns the end of the longest run of whole grapheme clusters starting at
    /// `start` that fits in `max_width`.
    ///
    /// Always advances by at least one grapheme cluster, and never past the end
    /// of the paragraph containing `start`.
    pub fn suggest_char_boundary(&self, start: usize, max_width: f32) -> Result<usize, Error> {
        self.verify_start(start)?;
        verify_width(max_width)?;
        Ok(self
            .break_search()
            .suggest_forward_char_break(start..self.len(), max_width))
    }

    /// Returns the end of the longest run of whole words starting at `start` that
    /// fits in `max_width`, falling back to [`Self::suggest_char_boundary`].
    pub fn suggest_line_boundary(&self, start: usize, max_width: f32) -> Result<usize, Error> {
        self.verify_start(start)?;
        verify_width(max_width)?;
        Ok(self
            .break_search()
            .suggest_forward_line_break(start..self.len(), max_width))
    }

    /// Calls `f` with the visual runs of `range`, one paragraph at a time.
    pub(crate) fn for_each_visual_run(
        &self,
        range: Range<usize>,
        mut f: impl FnMut(&BidiRun),
    ) -> Result<(), Error> {
        let mut start = range.start;
        let mut index = self.paragraph_index_at(start);
        while start < range.end {
            let paragraph = &self.paragraphs[index];
            let end = paragraph.range().end.min(range.end);
            let line = paragraph.create_line(start..end)?;
            for run in line.visual_runs() {
                f(run);
            }
            start = end;
            index += 1;
        }
        Ok(())
    }

    /// Creates a visually ordered line for `range`.
    pub fn create_line(&self, range: Range<usize>) -> Result<TextLine<F>, Error> {
        verify_range(&self.text, &range)?;
        let mut runs = Vec::new();
        self.for_each_visual_run(range.clone(), |run| {
            add_visual_runs(&self.runs, run.range.clone(), &mut runs);
        })?;
        let level = self.paragraph_level_at(range.start)?;
        Ok(TextLine::compose(&self.text, range, runs, level))
    }

    /// Creates a truncation token for lines of `range` truncated at `place`.
    ///
    /// The token is shaped with the typeface and size found at the truncation point.
    /// `text` defaults to [`DEFAULT_TOKEN`].
    pub fn create_token(
        &self,
        text: Option<&str>,
        place: TruncationPlace,
        range: Range<usize>,
        shaper: &impl Shaper<F>,
    ) -> Result<TextLine<F>, Error> {
        verify_range(&self.text, &range)?;
        let index = match place {
            TruncationPlace::Start => range.start,
            TruncationPlace::Middle => char_start_before(&self.text, (range.start + range.end) / 2),
            TruncationPlace::End => char_start_before(&self.text, range.end - 1),
        };
        let glyph_run = &self.runs[run_index_at(&self.runs, index)];
        let text = text.filter(|text| !text.is_empty()).unwrap_or(DEFAULT_TOKEN);

        let mut builder = TypesetterBuilder::new(text);
        builder.push_default(Attribute::Typeface(glyph_run.typeface().clone()));
        builder.push_default(Attribute::FontSize(glyph_run.font_size()));
        let token = builder.build(shaper)?;
        token.create_line(0..token.len())
    }
}

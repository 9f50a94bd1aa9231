// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bidirectional text collaborator.
//!
//! The typesetter does not resolve embedding levels itself. It asks a
//! [`BidiService`] for paragraphs, and asks each paragraph for short-lived
//! [`BidiLine`]s whose visual runs it consumes while composing a single line.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use smallvec::SmallVec;
use unicode_bidi::{bidi_class, BidiClass, BidiInfo, Level};

use crate::Error;

/// Bidirectional embedding level (even = left-to-right, odd = right-to-left).
pub type BidiLevel = u8;

/// Direction used to resolve the base level of a paragraph.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum BaseDirection {
    /// Determined from the first strong character, falling back to left-to-right.
    #[default]
    Auto,
    /// Base level 0.
    LeftToRight,
    /// Base level 1.
    RightToLeft,
}

/// A range of text at a single embedding level.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BidiRun {
    /// Range of the run in the document.
    pub range: Range<usize>,
    /// Embedding level of the run.
    pub level: BidiLevel,
}

impl BidiRun {
    /// Returns true if the run is right-to-left.
    pub fn is_rtl(&self) -> bool {
        self.level & 1 != 0
    }
}

/// Producer of bidirectional paragraphs.
pub trait BidiService: Debug {
    /// Creates the paragraph starting at `range.start`.
    ///
    /// The paragraph ends after the first paragraph separator inside `range`, or at
    /// `range.end` if there is none.
    fn create_paragraph(
        &self,
        text: &Arc<str>,
        range: Range<usize>,
        base: BaseDirection,
    ) -> Result<Arc<dyn BidiParagraph>, Error>;
}

/// A resolved bidirectional paragraph.
pub trait BidiParagraph: Debug + Send + Sync {
    /// Range of the paragraph in the document, including its separator.
    fn range(&self) -> Range<usize>;

    /// Base embedding level of the paragraph.
    fn base_level(&self) -> BidiLevel;

    /// Level runs of the paragraph in logical order.
    fn logical_runs(&self) -> &[BidiRun];

    /// Creates a line for a sub-range of the paragraph.
    ///
    /// The returned line borrows the paragraph and releases whatever it holds when
    /// dropped.
    fn create_line(&self, range: Range<usize>) -> Result<Box<dyn BidiLine + '_>, Error>;
}

/// A line of a bidirectional paragraph, reordered for display.
pub trait BidiLine {
    /// Range of the line in the document.
    fn range(&self) -> Range<usize>;

    /// Runs of the line in visual order, left to right.
    fn visual_runs(&self) -> &[BidiRun];
}

/// [`BidiService`] backed by the `unicode-bidi` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct UnicodeBidi;

impl BidiService for UnicodeBidi {
    fn create_paragraph(
        &self,
        text: &Arc<str>,
        range: Range<usize>,
        base: BaseDirection,
    ) -> Result<Arc<dyn BidiParagraph>, Error> {
        let start = range.start;
        let end = paragraph_end(text, range);
        let slice = &text[start..end];

        let default_level = match base {
            BaseDirection::Auto => None,
            BaseDirection::LeftToRight => Some(Level::ltr()),
            BaseDirection::RightToLeft => Some(Level::rtl()),
        };
        let mut info = BidiInfo::new(slice, default_level);
        let Some(first) = info.paragraphs.first() else {
            return Err(Error::contract("bidi analysis produced no paragraph"));
        };
        let base_level = first.level;
        // A CR LF pair is split by `unicode-bidi`; pin the trailing LF to the same level.
        if info.paragraphs.len() > 1 && default_level.is_none() {
            info = BidiInfo::new(slice, Some(base_level));
        }

        let mut runs: Vec<BidiRun> = Vec::new();
        for (offset, level) in info.levels.iter().enumerate() {
            let level = level.number();
            match runs.last_mut() {
                Some(run) if run.level == level => run.range.end = start + offset + 1,
                _ => runs.push(BidiRun {
                    range: start + offset..start + offset + 1,
                    level,
                }),
            }
        }

        Ok(Arc::new(UnicodeBidiParagraph {
            text: text.clone(),
            range: start..end,
            base_level: base_level.number(),
            runs,
        }))
    }
}

/// Returns the end of the paragraph beginning at `range.start`.
fn paragraph_end(text: &str, range: Range<usize>) -> usize {
    let start = range.start;
    let end = range.end;
    let mut chars = text[range].char_indices().peekable();
    while let Some((index, ch)) = chars.next() {
        if bidi_class(ch) == BidiClass::B {
            let mut separator_end = start + index + ch.len_utf8();
            if ch == '\r' && matches!(chars.peek(), Some((_, '\n'))) {
                separator_end += 1;
            }
            return separator_end;
        }
    }
    end
}

#[derive(Debug)]
struct UnicodeBidiParagraph {
    text: Arc<str>,
    range: Range<usize>,
    base_level: BidiLevel,
    runs: Vec<BidiRun>,
}

impl BidiParagraph for UnicodeBidiParagraph {
    fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    fn base_level(&self) -> BidiLevel {
        self.base_level
    }

    fn logical_runs(&self) -> &[BidiRun] {
        &self.runs
    }

    fn create_line(&self, range: Range<usize>) -> Result<Box<dyn BidiLine + '_>, Error> {
        if range.start >= range.end || range.start < self.range.start || range.end > self.range.end
        {
            return Err(Error::contract("bidi line outside of its paragraph"));
        }
        let level =
            Level::new(self.base_level).map_err(|_| Error::contract("invalid base level"))?;
        let offset = self.range.start;
        let info = BidiInfo::new(&self.text[self.range.clone()], Some(level));
        let line = range.start - offset..range.end - offset;

        let mut pieces: SmallVec<[SmallVec<[BidiRun; 4]>; 1]> = SmallVec::new();
        for paragraph in &info.paragraphs {
            let clipped =
                line.start.max(paragraph.range.start)..line.end.min(paragraph.range.end);
            if clipped.start >= clipped.end {
                continue;
            }
            let (levels, runs) = info.visual_runs(paragraph, clipped);
            pieces.push(
                runs.into_iter()
                    .map(|run| BidiRun {
                        level: levels[run.start].number(),
                        range: run.start + offset..run.end + offset,
                    })
                    .collect(),
            );
        }
        // Logically later pieces sit visually before earlier ones in a right-to-left line.
        if self.base_level & 1 != 0 {
            pieces.reverse();
        }

        Ok(Box::new(UnicodeBidiLine {
            range,
            runs: pieces.into_iter().flatten().collect(),
        }))
    }
}

struct UnicodeBidiLine {
    range: Range<usize>,
    runs: SmallVec<[BidiRun; 4]>,
}

impl BidiLine for UnicodeBidiLine {
    fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    fn visual_runs(&self) -> &[BidiRun] {
        &self.runs
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Synthetic collaborators for exercising layout without fonts.
//!
//! [`FixedShaper`] gives every character one glyph of a fixed advance, and
//! [`ForcedLevels`] assigns embedding levels by range instead of running the bidi
//! algorithm.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::ops::Range;

use crate::bidi::{
    BaseDirection, BidiLevel, BidiLine, BidiParagraph, BidiRun, BidiService,
};
use crate::shape::{ShapedGlyphs, Shaper};
use crate::style::Typeface;
use crate::util::is_rtl;
use crate::Error;

/// Shaper producing one glyph per character, each with the same advance.
///
/// Vertical metrics scale with the font size; the advance does not.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FixedShaper {
    advance: f32,
    ascent: f32,
    descent: f32,
    leading: f32,
}

impl FixedShaper {
    /// Creates a shaper with the given per character advance.
    ///
    /// Lines are as tall as their font size: 0.8 of it above the baseline and 0.2
    /// below, with no leading.
    pub fn new(advance: f32) -> Self {
        Self {
            advance,
            ascent: 0.8,
            descent: 0.2,
            leading: 0.0,
        }
    }

    /// Sets the vertical metrics, as fractions of the font size.
    pub fn with_metrics(mut self, ascent: f32, descent: f32, leading: f32) -> Self {
        self.ascent = ascent;
        self.descent = descent;
        self.leading = leading;
        self
    }
}

impl<F: Typeface> Shaper<F> for FixedShaper {
    fn shape(
        &self,
        text: &str,
        range: Range<usize>,
        _typeface: &F,
        font_size: f32,
        bidi_level: BidiLevel,
    ) -> Result<ShapedGlyphs, Error> {
        let slice = &text[range];
        let count = slice.chars().count();
        let is_backward = is_rtl(bidi_level);

        let mut glyph_ids = Vec::with_capacity(count);
        let mut cluster_map = Vec::with_capacity(slice.len());
        for (i, ch) in slice.chars().enumerate() {
            let glyph = if is_backward { count - 1 - i } else { i };
            cluster_map.extend(core::iter::repeat_n(glyph, ch.len_utf8()));
            glyph_ids.push(u32::from(ch));
        }
        if is_backward {
            glyph_ids.reverse();
        }

        Ok(ShapedGlyphs {
            glyph_ids,
            offsets: vec![(0.0, 0.0); count],
            advances: vec![self.advance; count],
            cluster_map,
            is_backward,
            ascent: self.ascent * font_size,
            descent: self.descent * font_size,
            leading: self.leading * font_size,
        })
    }
}

/// Bidi service with caller chosen embedding levels.
///
/// Paragraphs end after each `'\n'`. Visual order follows the reversal rule of
/// the bidi algorithm, without any special handling of whitespace.
#[derive(Clone, Debug, Default)]
pub struct ForcedLevels {
    base_level: BidiLevel,
    overrides: Vec<(Range<usize>, BidiLevel)>,
}

impl ForcedLevels {
    /// Creates a service where every paragraph and character has `base_level`.
    pub fn new(base_level: BidiLevel) -> Self {
        Self {
            base_level,
            overrides: Vec::new(),
        }
    }

    /// Forces the level of `range`. Later calls win where ranges overlap.
    pub fn with_level(mut self, range: Range<usize>, level: BidiLevel) -> Self {
        self.overrides.push((range, level));
        self
    }

    fn level_at(&self, index: usize) -> BidiLevel {
        self.overrides
            .iter()
            .rev()
            .find(|(range, _)| range.contains(&index))
            .map_or(self.base_level, |(_, level)| *level)
    }
}

impl BidiService for ForcedLevels {
    fn create_paragraph(
        &self,
        text: &Arc<str>,
        range: Range<usize>,
        _base: BaseDirection,
    ) -> Result<Arc<dyn BidiParagraph>, Error> {
        let start = range.start;
        let end = text[range.clone()]
            .find('\n')
            .map_or(range.end, |i| start + i + 1);

        let mut runs: Vec<BidiRun> = Vec::new();
        for index in start..end {
            let level = self.level_at(index);
            match runs.last_mut() {
                Some(run) if run.level == level => run.range.end = index + 1,
                _ => runs.push(BidiRun {
                    range: index..index + 1,
                    level,
                }),
            }
        }

        Ok(Arc::new(ForcedParagraph {
            range: start..end,
            base_level: self.base_level,
            runs,
        }))
    }
}

#[derive(Debug)]
struct ForcedParagraph {
    range: Range<usize>,
    base_level: BidiLevel,
    runs: Vec<BidiRun>,
}

impl BidiParagraph for ForcedParagraph {
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
        let mut runs: Vec<BidiRun> = self
            .runs
            .iter()
            .filter(|run| run.range.end > range.start && run.range.start < range.end)
            .map(|run| BidiRun {
                range: run.range.start.max(range.start)..run.range.end.min(range.end),
                level: run.level,
            })
            .collect();
        reorder(&mut runs);
        Ok(Box::new(ForcedLine { range, runs }))
    }
}

/// Reverses every maximal sequence of runs at or above each odd level, from the
/// highest level down.
fn reorder(runs: &mut [BidiRun]) {
    let Some(highest) = runs.iter().map(|run| run.level).max() else {
        return;
    };
    let Some(lowest_odd) = runs
        .iter()
        .map(|run| run.level)
        .filter(|&level| is_rtl(level))
        .min()
    else {
        return;
    };
    for level in (lowest_odd..=highest).rev() {
        let mut i = 0;
        while i < runs.len() {
            if runs[i].level >= level {
                let start = i;
                while i < runs.len() && runs[i].level >= level {
                    i += 1;
                }
                runs[start..i].reverse();
            } else {
                i += 1;
            }
        }
    }
}

struct ForcedLine {
    range: Range<usize>,
    runs: Vec<BidiRun>,
}

impl BidiLine for ForcedLine {
    fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    fn visual_runs(&self) -> &[BidiRun] {
        &self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn visual(service: &ForcedLevels, text: &str, range: Range<usize>) -> Vec<(Range<usize>, u8)> {
        let text: Arc<str> = text.into();
        let paragraph = service
            .create_paragraph(&text, 0..text.len(), BaseDirection::Auto)
            .unwrap();
        let line = paragraph.create_line(range).unwrap();
        line.visual_runs()
            .iter()
            .map(|run| (run.range.clone(), run.level))
            .collect()
    }

    #[test]
    fn nested_levels_reverse_twice() {
        let service = ForcedLevels::new(0)
            .with_level(2..8, 1)
            .with_level(4..6, 2);
        assert_eq!(
            visual(&service, "abcdefghij", 0..10),
            vec![(0..2, 0), (6..8, 1), (4..6, 2), (2..4, 1), (8..10, 0)]
        );
    }

    #[test]
    fn line_clips_runs() {
        let service = ForcedLevels::new(1).with_level(0..3, 2);
        assert_eq!(
            visual(&service, "abcdef", 1..5),
            vec![(3..5, 1), (1..3, 2)]
        );
    }

    #[test]
    fn fixed_shaper_reverses_rtl_glyphs() {
        let glyphs = Shaper::<()>::shape(&FixedShaper::new(10.0), "a\u{5d0}b", 0..4, &(), 20.0, 1)
            .unwrap();
        assert!(glyphs.is_backward);
        assert_eq!(glyphs.glyph_ids, vec![u32::from('b'), 0x5d0, u32::from('a')]);
        assert_eq!(glyphs.cluster_map, vec![2, 1, 1, 0]);
        assert_eq!(glyphs.ascent, 16.0);
        assert_eq!(glyphs.descent, 4.0);
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ops::Range;

use crate::bidi::BidiLevel;
use crate::shape::ShapedGlyphs;
use crate::style::Typeface;
use crate::util::is_rtl;

/// Shaped, attribute-uniform and level-uniform span of a document.
///
/// Glyph runs partition the document and are shared by every line built from it.
/// All indices taken by its methods are document byte offsets.
#[derive(Clone, Debug)]
pub struct GlyphRun<F: Typeface> {
    range: Range<usize>,
    typeface: F,
    font_size: f32,
    bidi_level: BidiLevel,
    glyphs: ShapedGlyphs,
    /// Character starts and the run end, each with its logical distance from the
    /// start of the run.
    carets: Box<[(usize, f32)]>,
}

impl<F: Typeface> GlyphRun<F> {
    pub(crate) fn new(
        range: Range<usize>,
        typeface: F,
        font_size: f32,
        bidi_level: BidiLevel,
        glyphs: ShapedGlyphs,
        text: &str,
    ) -> Self {
        let mut run = Self {
            range,
            typeface,
            font_size,
            bidi_level,
            glyphs,
            carets: Box::default(),
        };
        run.carets = run.compute_carets(text);
        run
    }

    /// Splits the advance of every cluster evenly among its characters.
    fn compute_carets(&self, text: &str) -> Box<[(usize, f32)]> {
        let mut carets = Vec::new();
        let mut distance = 0.0;
        let mut cluster_start = self.range.start;
        while cluster_start < self.range.end {
            let cluster_end = self.cluster_end(cluster_start);
            let advance = self.measure_chars(cluster_start..cluster_end);
            match text.get(cluster_start..cluster_end) {
                Some(cluster) => {
                    let share = advance / cluster.chars().count().max(1) as f32;
                    for (i, (offset, _)) in cluster.char_indices().enumerate() {
                        carets.push((cluster_start + offset, distance + share * i as f32));
                    }
                }
                None => carets.push((cluster_start, distance)),
            }
            distance += advance;
            cluster_start = cluster_end;
        }
        carets.push((self.range.end, distance));
        carets.into_boxed_slice()
    }

    /// Range of text covered by the run.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Typeface the run was shaped with.
    pub fn typeface(&self) -> &F {
        &self.typeface
    }

    /// Font size the run was shaped with.
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Embedding level of the run.
    pub fn bidi_level(&self) -> BidiLevel {
        self.bidi_level
    }

    /// Returns true if the run is right-to-left.
    pub fn is_rtl(&self) -> bool {
        is_rtl(self.bidi_level)
    }

    /// Returns true if glyphs are stored in reverse logical order.
    pub fn is_backward(&self) -> bool {
        self.glyphs.is_backward
    }

    /// Number of glyphs.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.glyph_ids.len()
    }

    /// Glyph identifiers.
    pub fn glyph_ids(&self) -> &[u32] {
        &self.glyphs.glyph_ids
    }

    /// Glyph offsets.
    pub fn offsets(&self) -> &[(f32, f32)] {
        &self.glyphs.offsets
    }

    /// Glyph advances.
    pub fn advances(&self) -> &[f32] {
        &self.glyphs.advances
    }

    /// Cluster map, one entry per byte of the run.
    pub fn cluster_map(&self) -> &[usize] {
        &self.glyphs.cluster_map
    }

    /// Distance from the baseline to the top of the run.
    pub fn ascent(&self) -> f32 {
        self.glyphs.ascent
    }

    /// Distance from the baseline to the bottom of the run.
    pub fn descent(&self) -> f32 {
        self.glyphs.descent
    }

    /// Recommended gap below the run.
    pub fn leading(&self) -> f32 {
        self.glyphs.leading
    }

    /// Returns the range of glyphs that display the characters in `range`.
    ///
    /// Clusters that are only partially covered contribute all of their glyphs.
    pub fn glyph_range_for_chars(&self, range: Range<usize>) -> Range<usize> {
        let map = self.cluster_map();
        let glyph_count = self.glyph_count();
        let first = range.start - self.range.start;
        let last = range.end - 1 - self.range.start;
        if self.is_backward() {
            map[last]..backward_glyph_index(map, first, glyph_count) + 1
        } else {
            map[first]..forward_glyph_index(map, last, glyph_count) + 1
        }
    }

    /// Index of the glyph that visually leads the cluster of the character at `index`.
    pub fn leading_glyph_index(&self, index: usize) -> usize {
        let offset = index - self.range.start;
        if self.is_backward() {
            backward_glyph_index(self.cluster_map(), offset, self.glyph_count())
        } else {
            self.cluster_map()[offset]
        }
    }

    /// Index of the glyph that visually trails the cluster of the character at `index`.
    pub fn trailing_glyph_index(&self, index: usize) -> usize {
        let offset = index - self.range.start;
        if self.is_backward() {
            self.cluster_map()[offset]
        } else {
            forward_glyph_index(self.cluster_map(), offset, self.glyph_count())
        }
    }

    /// First index of the cluster containing `index`.
    pub fn cluster_start(&self, index: usize) -> usize {
        let map = self.cluster_map();
        let offset = index - self.range.start;
        let common = map[offset];
        let start = map[..offset]
            .iter()
            .rposition(|&glyph| glyph != common)
            .map_or(0, |i| i + 1);
        self.range.start + start
    }

    /// End index of the cluster containing `index`.
    pub fn cluster_end(&self, index: usize) -> usize {
        let map = self.cluster_map();
        let offset = index - self.range.start;
        let common = map[offset];
        let end = map[offset + 1..]
            .iter()
            .position(|&glyph| glyph != common)
            .map_or(map.len(), |i| offset + 1 + i);
        self.range.start + end
    }

    /// Logical distance of the caret before the character at `index` from the start
    /// of the run.
    ///
    /// Characters sharing a cluster divide its advance evenly. An index inside a
    /// character maps to that character's caret.
    pub fn caret_offset(&self, index: usize) -> f32 {
        let i = self.carets.partition_point(|&(start, _)| start <= index);
        self.carets[i.saturating_sub(1)].1
    }

    /// Caret stops after `range.start` up to and including `range.end`.
    pub(crate) fn carets_after(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.carets
            .iter()
            .copied()
            .skip_while(move |&(index, _)| index <= range.start)
            .take_while(move |&(index, _)| index <= range.end)
    }

    /// Sum of the advances of the glyphs in `range`.
    pub fn measure_glyphs(&self, range: Range<usize>) -> f32 {
        self.advances()[range].iter().sum()
    }

    /// Width of the glyphs displaying the characters in `range`.
    pub fn measure_chars(&self, range: Range<usize>) -> f32 {
        if range.start >= range.end {
            return 0.0;
        }
        self.measure_glyphs(self.glyph_range_for_chars(range))
    }
}

/// Last glyph of the cluster at `offset` when glyphs run in logical order.
fn forward_glyph_index(map: &[usize], offset: usize, glyph_count: usize) -> usize {
    let common = map[offset];
    map[offset + 1..]
        .iter()
        .find(|&&glyph| glyph != common)
        .map_or(glyph_count - 1, |&glyph| glyph - 1)
}

/// Last glyph of the cluster at `offset` when glyphs run in reverse logical order.
fn backward_glyph_index(map: &[usize], offset: usize, glyph_count: usize) -> usize {
    let common = map[offset];
    map[..offset]
        .iter()
        .rev()
        .find(|&&glyph| glyph != common)
        .map_or(glyph_count - 1, |&glyph| glyph - 1)
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shaping collaborator.

use alloc::vec::Vec;
use core::ops::Range;

use crate::bidi::BidiLevel;
use crate::style::Typeface;
use crate::Error;

/// Glyphs produced for one attribute-uniform, level-uniform range of text.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ShapedGlyphs {
    /// Glyph identifiers.
    pub glyph_ids: Vec<u32>,
    /// Per glyph `(x, y)` offsets from the pen position.
    pub offsets: Vec<(f32, f32)>,
    /// Per glyph advances.
    pub advances: Vec<f32>,
    /// For every byte of the shaped range, the index of the first glyph of its cluster.
    pub cluster_map: Vec<usize>,
    /// Whether glyphs are stored in reverse logical order.
    pub is_backward: bool,
    /// Ascent of the typeface at the shaped size.
    pub ascent: f32,
    /// Descent of the typeface at the shaped size (positive below the baseline).
    pub descent: f32,
    /// Recommended gap between lines.
    pub leading: f32,
}

impl ShapedGlyphs {
    /// Checks the glyph arrays against each other and against the shaped range length.
    pub(crate) fn verify(&self, range_len: usize) -> Result<(), Error> {
        let glyph_count = self.glyph_ids.len();
        if self.advances.len() != glyph_count || self.offsets.len() != glyph_count {
            return Err(Error::contract("glyph arrays differ in length"));
        }
        if self.cluster_map.len() != range_len {
            return Err(Error::contract("cluster map does not cover the shaped range"));
        }
        if glyph_count == 0 || self.cluster_map.iter().any(|&glyph| glyph >= glyph_count) {
            return Err(Error::contract("cluster map refers to a missing glyph"));
        }
        Ok(())
    }
}

/// Producer of shaped glyphs.
///
/// Called once per glyph run while a [`Typesetter`](crate::Typesetter) is built, and
/// again for truncation tokens.
pub trait Shaper<F: Typeface> {
    /// Shapes `text[range]` with the given typeface, size and embedding level.
    fn shape(
        &self,
        text: &str,
        range: Range<usize>,
        typeface: &F,
        font_size: f32,
        bidi_level: BidiLevel,
    ) -> Result<ShapedGlyphs, Error>;
}

impl<F: Typeface, S: Shaper<F> + ?Sized> Shaper<F> for &S {
    fn shape(
        &self,
        text: &str,
        range: Range<usize>,
        typeface: &F,
        font_size: f32,
        bidi_level: BidiLevel,
    ) -> Result<ShapedGlyphs, Error> {
        (**self).shape(text, range, typeface, font_size, bidi_level)
    }
}

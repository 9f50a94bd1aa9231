// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Boundary providers backed by ICU4X segmenters with compiled data.

use alloc::vec::Vec;

use icu_segmenter::options::{LineBreakOptions, LineBreakWordOption};
use icu_segmenter::{GraphemeClusterSegmenter, LineSegmenter};

use super::BoundaryProvider;
use crate::Error;

/// Line break opportunities according to UAX #14, using the ICU4X line segmenter.
///
/// Complex scripts (Thai, Lao, Khmer, Burmese) are segmented with the
/// dictionary/LSTM models bundled as compiled data.
#[derive(Clone, Copy, Debug)]
pub struct IcuLineBoundaries {
    word_option: LineBreakWordOption,
}

impl Default for IcuLineBoundaries {
    fn default() -> Self {
        Self {
            word_option: LineBreakWordOption::Normal,
        }
    }
}

impl IcuLineBoundaries {
    /// Creates a provider using the specified CSS `word-break` behaviour.
    pub fn with_word_option(word_option: LineBreakWordOption) -> Self {
        Self { word_option }
    }
}

impl BoundaryProvider for IcuLineBoundaries {
    fn boundaries(&self, text: &str) -> Result<Vec<usize>, Error> {
        let mut options = LineBreakOptions::default();
        options.word_option = Some(self.word_option);
        let segmenter = LineSegmenter::new_auto(options);
        Ok(segmenter.segment_str(text).collect())
    }
}

/// Extended grapheme cluster boundaries according to UAX #29.
#[derive(Clone, Copy, Debug, Default)]
pub struct IcuGraphemeBoundaries;

impl BoundaryProvider for IcuGraphemeBoundaries {
    fn boundaries(&self, text: &str) -> Result<Vec<usize>, Error> {
        let segmenter = GraphemeClusterSegmenter::new();
        Ok(segmenter.segment_str(text).collect())
    }
}

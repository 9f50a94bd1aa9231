// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Break classification.
//!
//! Every byte index of the document gets a small mask recording which kinds of
//! break may be taken at it, and from which scan direction. A forward scan tests
//! the bit at the index it is standing on and breaks *after* it; a backward scan
//! tests the bit at its index and breaks *before* it. The two directions are
//! therefore recorded one index apart.

mod segment;

use alloc::boxed::Box;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::ops::Range;

use crate::Error;

pub use segment::{IcuGraphemeBoundaries, IcuLineBoundaries};

/// Source of legal boundary offsets for a text.
pub trait BoundaryProvider: Debug + Send + Sync {
    /// Returns the boundary offsets of `text` in increasing order.
    ///
    /// Offsets `0` and `text.len()` may or may not be included; both are accepted.
    fn boundaries(&self, text: &str) -> Result<Vec<usize>, Error>;
}

/// Kind of break opportunity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BreakKind {
    /// End of a paragraph. Always honored.
    Paragraph,
    /// Optional line break (between words).
    Line,
    /// Optional break between grapheme clusters.
    Character,
}

impl BreakKind {
    const fn forward_mask(self) -> u8 {
        match self {
            Self::Line => 1 << 0,
            Self::Character => 1 << 2,
            Self::Paragraph => 1 << 4,
        }
    }

    const fn backward_mask(self) -> u8 {
        self.forward_mask() << 1
    }
}

/// Per-index break classification of a document.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BreakRecord {
    masks: Box<[u8]>,
}

impl BreakRecord {
    /// Classifies `text` using the given boundary providers and paragraph ranges.
    pub fn new(
        text: &str,
        line_boundaries: &dyn BoundaryProvider,
        char_boundaries: &dyn BoundaryProvider,
        paragraphs: impl IntoIterator<Item = Range<usize>>,
    ) -> Result<Self, Error> {
        let mut masks = vec![0_u8; text.len()];
        mark_boundaries(
            &mut masks,
            &line_boundaries.boundaries(text)?,
            BreakKind::Line,
        );
        mark_boundaries(
            &mut masks,
            &char_boundaries.boundaries(text)?,
            BreakKind::Character,
        );
        for paragraph in paragraphs {
            if paragraph.start >= paragraph.end || paragraph.end > masks.len() {
                return Err(Error::contract("paragraph range outside of text"));
            }
            masks[paragraph.start] |= BreakKind::Paragraph.backward_mask();
            masks[paragraph.end - 1] |= BreakKind::Paragraph.forward_mask();
        }
        Ok(Self {
            masks: masks.into_boxed_slice(),
        })
    }

    /// Number of classified indices (the document length).
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// Returns true if nothing was classified.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }

    /// Returns true if a forward scan may break after `index`.
    #[inline]
    pub fn is_forward(&self, index: usize, kind: BreakKind) -> bool {
        let mask = kind.forward_mask();
        self.masks[index] & mask == mask
    }

    /// Returns true if a backward scan may break before `index`.
    #[inline]
    pub fn is_backward(&self, index: usize, kind: BreakKind) -> bool {
        let mask = kind.backward_mask();
        self.masks[index] & mask == mask
    }
}

fn mark_boundaries(masks: &mut [u8], boundaries: &[usize], kind: BreakKind) {
    let len = masks.len();
    let forward = kind.forward_mask();
    for &boundary in boundaries {
        if boundary >= 1 && boundary <= len {
            masks[boundary - 1] |= forward;
        }
    }
    let backward = kind.backward_mask();
    for &boundary in boundaries.iter().rev() {
        if boundary < len {
            masks[boundary] |= backward;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Fixed(Vec<usize>);

    impl BoundaryProvider for Fixed {
        fn boundaries(&self, _text: &str) -> Result<Vec<usize>, Error> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn directions_are_one_index_apart() {
        let text = "ab cd";
        let lines = Fixed(vec![0, 3, 5]);
        let chars = Fixed(vec![0, 1, 2, 3, 4, 5]);
        let record = BreakRecord::new(text, &lines, &chars, [0..5]).unwrap();

        assert_eq!(record.len(), 5);
        // Boundary 3 is usable after index 2 going forward and before index 3 going back.
        assert!(record.is_forward(2, BreakKind::Line));
        assert!(record.is_backward(3, BreakKind::Line));
        assert!(!record.is_forward(3, BreakKind::Line));
        assert!(!record.is_backward(2, BreakKind::Line));
        // Boundary 5 (text end) has no backward index.
        assert!(record.is_forward(4, BreakKind::Line));
        // Boundary 0 has no forward index.
        assert!(record.is_backward(0, BreakKind::Line));
        for i in 0..5 {
            assert!(record.is_forward(i, BreakKind::Character), "char {i} forward");
            assert!(record.is_backward(i, BreakKind::Character), "char {i} backward");
        }
    }

    #[test]
    fn paragraph_bits_mark_edges() {
        let text = "ab\ncd";
        let none = Fixed(vec![]);
        let record = BreakRecord::new(text, &none, &none, [0..3, 3..5]).unwrap();
        assert!(record.is_backward(0, BreakKind::Paragraph));
        assert!(record.is_forward(2, BreakKind::Paragraph));
        assert!(record.is_backward(3, BreakKind::Paragraph));
        assert!(record.is_forward(4, BreakKind::Paragraph));
        assert!(!record.is_forward(1, BreakKind::Paragraph));
    }

    #[test]
    fn bad_paragraph_is_a_contract_error() {
        let none = Fixed(vec![]);
        let err = BreakRecord::new("abc", &none, &none, [0..4]).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Collaborator);
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::bidi::BidiLevel;
use crate::util::is_rtl;

/// Horizontal alignment of lines within a frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Alignment {
    /// Align to the reading start: left for LTR paragraphs, right for RTL ones.
    #[default]
    Start,
    /// Align to the reading end: right for LTR paragraphs, left for RTL ones.
    End,
    /// Align to the left edge.
    Left,
    /// Center within the frame.
    Center,
    /// Align to the right edge.
    Right,
}

impl Alignment {
    /// Returns the flush factor for a paragraph of the given base level.
    pub fn flush_factor(self, paragraph_level: BidiLevel) -> f32 {
        let rtl = is_rtl(paragraph_level);
        match (self, rtl) {
            (Self::Left, _) | (Self::Start, false) | (Self::End, true) => 0.0,
            (Self::Right, _) | (Self::Start, true) | (Self::End, false) => 1.0,
            (Self::Center, _) => 0.5,
        }
    }
}

/// Vertical placement of the composed lines within a frame.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VerticalAlignment {
    /// Lines start at the top edge.
    #[default]
    Top,
    /// Lines are centered vertically.
    Middle,
    /// Lines end at the bottom edge.
    Bottom,
}

impl VerticalAlignment {
    pub(crate) fn factor(self) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Middle => 0.5,
            Self::Bottom => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directional_alignments_follow_paragraph_level() {
        assert_eq!(Alignment::Start.flush_factor(0), 0.0);
        assert_eq!(Alignment::Start.flush_factor(1), 1.0);
        assert_eq!(Alignment::End.flush_factor(0), 1.0);
        assert_eq!(Alignment::End.flush_factor(1), 0.0);
        assert_eq!(Alignment::Center.flush_factor(1), 0.5);
        assert_eq!(Alignment::Left.flush_factor(1), 0.0);
        assert_eq!(Alignment::Right.flush_factor(0), 1.0);
    }
}

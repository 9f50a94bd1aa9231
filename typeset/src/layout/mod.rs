// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line and frame composition.

mod alignment;
mod frame;
mod glyph_run;
mod line;
mod line_break;
mod run;
mod segment;
mod truncate;
mod typesetter;

pub use alignment::{Alignment, VerticalAlignment};
pub use frame::{FrameBounds, FrameOptions, SelectionRect, TextFrame};
pub use glyph_run::GlyphRun;
pub use line::TextLine;
pub use line_break::BreakMode;
pub use run::TextRun;
pub use truncate::{Truncation, TruncationPlace};
pub use typesetter::{Typesetter, DEFAULT_TOKEN};

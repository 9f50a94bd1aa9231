// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Line and frame composition for bidirectional Unicode text.
//!
//! Typeset decides where lines break, how bidirectional text is sliced into
//! visually ordered runs, how an overflowing line is truncated with a token, and how
//! lines are stacked into a bounded frame. Shaping and the bidi algorithm are
//! consumed through the [`Shaper`] and [`BidiService`] traits.
//!
//! ```
//! use typeset::testing::FixedShaper;
//! use typeset::{Attribute, FrameBounds, FrameOptions, TypesetterBuilder};
//!
//! let mut builder = TypesetterBuilder::new("Hello world, and goodbye.");
//! builder.push_default(Attribute::Typeface("sans"));
//! builder.push_default(Attribute::FontSize(20.0));
//! let typesetter = builder.build(&FixedShaper::new(10.0)).unwrap();
//!
//! let bounds = FrameBounds::new(0.0, 0.0, 120.0, 100.0);
//! let frame = typesetter
//!     .create_frame(0..typesetter.len(), bounds, &FrameOptions::default())
//!     .unwrap();
//! assert_eq!(frame.lines().len(), 2);
//! assert_eq!(frame.range(), 0..typesetter.len());
//! ```

#![cfg_attr(all(not(feature = "std"), not(test)), no_std)]

extern crate alloc;

mod builder;
mod error;
mod resolve;
mod util;

pub mod analysis;
pub mod bidi;
pub mod layout;
pub mod shape;
pub mod style;
pub mod testing;

pub use builder::TypesetterBuilder;
pub use error::{Error, ErrorKind, SourceError};
pub use resolve::{AttributeMap, AttributeSpan};

pub use analysis::{BoundaryProvider, BreakKind, BreakRecord};
pub use bidi::{BaseDirection, BidiLevel, BidiService, UnicodeBidi};
pub use layout::{
    Alignment, BreakMode, FrameBounds, FrameOptions, GlyphRun, SelectionRect, TextFrame, TextLine,
    TextRun, Truncation, TruncationPlace, Typesetter, VerticalAlignment,
};
pub use shape::{ShapedGlyphs, Shaper};
pub use style::{Attribute, ResolvedAttributes, Typeface};

#[cfg(test)]
mod tests;

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text attributes.

use core::fmt::Debug;

/// Font size used where no [`Attribute::FontSize`] covers a range.
pub const DEFAULT_FONT_SIZE: f32 = 16.0;

/// Trait for types that identify a typeface.
///
/// The typesetter never looks inside a typeface; it only hands it to the
/// [`Shaper`](crate::Shaper) and compares it when merging attribute spans.
pub trait Typeface: Clone + PartialEq + Debug {}

impl<T: Clone + PartialEq + Debug> Typeface for T {}

/// Attributes that can be applied to a range of text.
#[derive(Clone, PartialEq, Debug)]
pub enum Attribute<F: Typeface> {
    /// Typeface used to shape the range.
    Typeface(F),
    /// Font size in layout units. Negative sizes are clamped to zero.
    FontSize(f32),
}

/// Fully resolved attributes of a span of text.
#[derive(Clone, PartialEq, Debug)]
pub struct ResolvedAttributes<F: Typeface> {
    /// Typeface, if any was declared over the span.
    pub typeface: Option<F>,
    /// Font size.
    pub font_size: f32,
}

impl<F: Typeface> Default for ResolvedAttributes<F> {
    fn default() -> Self {
        Self {
            typeface: None,
            font_size: DEFAULT_FONT_SIZE,
        }
    }
}

impl<F: Typeface> ResolvedAttributes<F> {
    /// Applies the specified attribute, overriding any earlier value.
    pub(crate) fn apply(&mut self, attribute: Attribute<F>) {
        match attribute {
            Attribute::Typeface(typeface) => self.typeface = Some(typeface),
            Attribute::FontSize(size) => self.font_size = size.max(0.0),
        }
    }
}

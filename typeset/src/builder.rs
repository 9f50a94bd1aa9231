// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builder for constructing a typesetter.

use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::ops::RangeBounds;

use log::debug;

use crate::analysis::{BoundaryProvider, BreakRecord, IcuGraphemeBoundaries, IcuLineBoundaries};
use crate::bidi::{BaseDirection, BidiParagraph, BidiService, UnicodeBidi};
use crate::layout::{GlyphRun, Typesetter};
use crate::resolve::{AttributeMap, RangedAttributeBuilder};
use crate::shape::Shaper;
use crate::style::{Attribute, Typeface};
use crate::Error;

/// Builder for a [`Typesetter`] over a text with ranged attributes.
#[derive(Debug)]
pub struct TypesetterBuilder<F: Typeface> {
    text: Arc<str>,
    attributes: RangedAttributeBuilder<F>,
    base_direction: BaseDirection,
    bidi: Box<dyn BidiService>,
    line_boundaries: Box<dyn BoundaryProvider>,
    char_boundaries: Box<dyn BoundaryProvider>,
}

impl<F: Typeface> TypesetterBuilder<F> {
    /// Creates a builder for `text` using the default collaborators.
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let len = text.len();
        Self {
            text,
            attributes: RangedAttributeBuilder::new(len),
            base_direction: BaseDirection::default(),
            bidi: Box::new(UnicodeBidi),
            line_boundaries: Box::new(IcuLineBoundaries::default()),
            char_boundaries: Box::new(IcuGraphemeBoundaries),
        }
    }

    /// Sets an attribute for the whole text.
    pub fn push_default(&mut self, attribute: Attribute<F>) {
        self.attributes.push_default(attribute);
    }

    /// Sets an attribute for `range`, overriding earlier attributes where they overlap.
    pub fn push(&mut self, attribute: Attribute<F>, range: impl RangeBounds<usize>) {
        self.attributes.push(attribute, range);
    }

    /// Sets the direction used to resolve paragraph base levels.
    pub fn set_base_direction(&mut self, base_direction: BaseDirection) {
        self.base_direction = base_direction;
    }

    /// Replaces the bidi service.
    pub fn set_bidi_service(&mut self, bidi: impl BidiService + 'static) {
        self.bidi = Box::new(bidi);
    }

    /// Replaces the line and grapheme boundary providers.
    pub fn set_boundaries(
        &mut self,
        line_boundaries: impl BoundaryProvider + 'static,
        char_boundaries: impl BoundaryProvider + 'static,
    ) {
        self.line_boundaries = Box::new(line_boundaries);
        self.char_boundaries = Box::new(char_boundaries);
    }

    /// Analyzes and shapes the text.
    pub fn build(self, shaper: &impl Shaper<F>) -> Result<Typesetter<F>, Error> {
        let text = self.text;
        let len = text.len();
        if len == 0 {
            return Err(Error::empty_text());
        }

        let spans = self.attributes.finish();
        for span in &spans {
            if !text.is_char_boundary(span.range.start) || !text.is_char_boundary(span.range.end) {
                return Err(Error::invalid_range(span.range.clone(), len));
            }
        }
        let attributes = AttributeMap::new(spans);

        let mut paragraphs: Vec<Arc<dyn BidiParagraph>> = Vec::new();
        let mut start = 0;
        while start < len {
            let paragraph = self
                .bidi
                .create_paragraph(&text, start..len, self.base_direction)?;
            let range = paragraph.range();
            if range.start != start || range.end <= start || range.end > len {
                return Err(Error::contract("paragraphs do not partition the text"));
            }
            start = range.end;
            paragraphs.push(paragraph);
        }

        let breaks = BreakRecord::new(
            &text,
            &*self.line_boundaries,
            &*self.char_boundaries,
            paragraphs.iter().map(|paragraph| paragraph.range()),
        )?;

        let mut runs = Vec::new();
        let mut end = 0;
        for paragraph in &paragraphs {
            for bidi_run in paragraph.logical_runs() {
                if bidi_run.range.start != end {
                    return Err(Error::contract("logical runs do not partition the paragraph"));
                }
                end = bidi_run.range.end;
                for (range, attrs) in attributes.spans_in(bidi_run.range.clone()) {
                    let Some(typeface) = attrs.typeface.as_ref() else {
                        return Err(Error::missing_typeface(range, len));
                    };
                    let glyphs = shaper.shape(
                        &text,
                        range.clone(),
                        typeface,
                        attrs.font_size,
                        bidi_run.level,
                    )?;
                    glyphs.verify(range.len())?;
                    runs.push(Arc::new(GlyphRun::new(
                        range,
                        typeface.clone(),
                        attrs.font_size,
                        bidi_run.level,
                        glyphs,
                        &text,
                    )));
                }
            }
            if end != paragraph.range().end {
                return Err(Error::contract("logical runs do not cover the paragraph"));
            }
        }

        debug!(
            "built typesetter for {len} bytes: {} paragraphs, {} glyph runs",
            paragraphs.len(),
            runs.len()
        );
        Ok(Typesetter::from_parts(
            text, attributes, breaks, paragraphs, runs,
        ))
    }
}

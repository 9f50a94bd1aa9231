// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of overlapping attribute declarations into a span table.

pub(crate) mod range;

use alloc::vec::Vec;
use core::ops::Range;

use crate::style::{Attribute, ResolvedAttributes, Typeface};

pub(crate) use range::RangedAttributeBuilder;

/// Attribute with an associated range.
#[derive(Clone, Debug)]
pub(crate) struct RangedAttribute<F: Typeface> {
    pub(crate) attribute: Attribute<F>,
    pub(crate) range: Range<usize>,
}

/// Resolved attributes with an associated range.
#[derive(Clone, PartialEq, Debug)]
pub struct AttributeSpan<F: Typeface> {
    /// Attributes in effect over `range`.
    pub attributes: ResolvedAttributes<F>,
    /// Range of text covered by the span.
    pub range: Range<usize>,
}

/// Non-overlapping, sorted table of attribute spans covering a whole document.
///
/// Built once per document; lookups are binary searches.
#[derive(Clone, Debug)]
pub struct AttributeMap<F: Typeface> {
    spans: Vec<AttributeSpan<F>>,
}

impl<F: Typeface> AttributeMap<F> {
    pub(crate) fn new(spans: Vec<AttributeSpan<F>>) -> Self {
        Self { spans }
    }

    /// Returns all spans in text order.
    pub fn spans(&self) -> &[AttributeSpan<F>] {
        &self.spans
    }

    /// Returns the spans overlapping `range`, clipped to it.
    pub fn spans_in(
        &self,
        range: Range<usize>,
    ) -> impl Iterator<Item = (Range<usize>, &ResolvedAttributes<F>)> + '_ {
        let (start, end) = (range.start, range.end);
        let first = self.spans.partition_point(|span| span.range.end <= start);
        self.spans[first..]
            .iter()
            .take_while(move |span| span.range.start < end)
            .map(move |span| {
                let clipped = span.range.start.max(start)..span.range.end.min(end);
                (clipped, &span.attributes)
            })
    }

    /// Returns the attributes in effect at `index`.
    pub fn at(&self, index: usize) -> Option<&ResolvedAttributes<F>> {
        let i = self.spans.partition_point(|span| span.range.end <= index);
        self.spans
            .get(i)
            .filter(|span| span.range.contains(&index))
            .map(|span| &span.attributes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn clipped_lookup() {
        let mut builder = RangedAttributeBuilder::new(12);
        builder.push_default(Attribute::Typeface("a"));
        builder.push(Attribute::Typeface("b"), 4..8);
        let map = AttributeMap::new(builder.finish());

        let clipped: Vec<_> = map
            .spans_in(2..6)
            .map(|(range, attrs)| (range, attrs.typeface))
            .collect();
        assert_eq!(clipped, vec![(2..4, Some("a")), (4..6, Some("b"))]);

        assert_eq!(map.at(7).and_then(|attrs| attrs.typeface), Some("b"));
        assert_eq!(map.at(8).and_then(|attrs| attrs.typeface), Some("a"));
        assert!(map.at(12).is_none(), "lookup past the end should fail");
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flattening of ranged attribute declarations.

use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Bound, Range, RangeBounds};

use super::{AttributeSpan, RangedAttribute};
use crate::style::{Attribute, ResolvedAttributes, Typeface};

/// Collects attribute declarations over a text of known length.
///
/// Declarations are resolved in push order, so a later push wins wherever it
/// overlaps an earlier one.
#[derive(Clone, Debug)]
pub(crate) struct RangedAttributeBuilder<F: Typeface> {
    declarations: Vec<RangedAttribute<F>>,
    root: ResolvedAttributes<F>,
    len: usize,
}

impl<F: Typeface> RangedAttributeBuilder<F> {
    pub(crate) fn new(len: usize) -> Self {
        Self {
            declarations: Vec::new(),
            root: ResolvedAttributes::default(),
            len,
        }
    }

    /// Sets an attribute for the whole text, beneath every ranged push.
    pub(crate) fn push_default(&mut self, attribute: Attribute<F>) {
        self.root.apply(attribute);
    }

    /// Declares `attribute` over `range`, clamped to the text.
    pub(crate) fn push(&mut self, attribute: Attribute<F>, range: impl RangeBounds<usize>) {
        let range = clamp_range(range, self.len);
        self.declarations.push(RangedAttribute { attribute, range });
    }

    pub(crate) fn finish(&self) -> Vec<AttributeSpan<F>> {
        resolve_spans(self.len, &self.root, &self.declarations)
    }
}

/// Flattens `declarations` over a root span `0..len` into sorted, non-overlapping
/// spans, merging neighbours that end up equal.
pub(crate) fn resolve_spans<F: Typeface>(
    len: usize,
    root: &ResolvedAttributes<F>,
    declarations: &[RangedAttribute<F>],
) -> Vec<AttributeSpan<F>> {
    let mut spans = vec![AttributeSpan {
        attributes: root.clone(),
        range: 0..len,
    }];
    for declaration in declarations {
        let range = declaration.range.clone();
        if range.is_empty() {
            continue;
        }
        split_at(&mut spans, range.start);
        split_at(&mut spans, range.end);
        let first = spans.partition_point(|span| span.range.end <= range.start);
        for span in spans[first..]
            .iter_mut()
            .take_while(|span| span.range.start < range.end)
        {
            span.attributes.apply(declaration.attribute.clone());
        }
    }
    spans.dedup_by(|next, previous| {
        let equal = next.attributes == previous.attributes;
        if equal {
            previous.range.end = next.range.end;
        }
        equal
    });
    spans
}

/// Makes a span boundary fall on `index`, splitting the span that straddles it.
fn split_at<F: Typeface>(spans: &mut Vec<AttributeSpan<F>>, index: usize) {
    let i = spans.partition_point(|span| span.range.end <= index);
    let Some(span) = spans.get_mut(i) else {
        return;
    };
    if span.range.start < index {
        let mut tail = span.clone();
        span.range.end = index;
        tail.range.start = index;
        spans.insert(i + 1, tail);
    }
}

fn clamp_range(range: impl RangeBounds<usize>, len: usize) -> Range<usize> {
    let start = match range.start_bound() {
        Bound::Included(&start) => start,
        Bound::Excluded(&start) => start.saturating_add(1),
        Bound::Unbounded => 0,
    };
    let end = match range.end_bound() {
        Bound::Included(&end) => end.saturating_add(1),
        Bound::Excluded(&end) => end,
        Bound::Unbounded => len,
    };
    start.min(len)..end.min(len)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typefaces(spans: &[AttributeSpan<&'static str>]) -> Vec<(Range<usize>, Option<&'static str>)> {
        spans
            .iter()
            .map(|span| (span.range.clone(), span.attributes.typeface))
            .collect()
    }

    #[test]
    fn later_attribute_wins_on_overlap() {
        let mut builder = RangedAttributeBuilder::new(10);
        builder.push_default(Attribute::Typeface("serif"));
        builder.push(Attribute::Typeface("sans"), 2..6);
        builder.push(Attribute::Typeface("mono"), 4..8);
        assert_eq!(
            typefaces(&builder.finish()),
            vec![
                (0..2, Some("serif")),
                (2..4, Some("sans")),
                (4..8, Some("mono")),
                (8..10, Some("serif")),
            ]
        );
    }

    #[test]
    fn inner_attribute_splits_outer_span() {
        let mut builder = RangedAttributeBuilder::new(9);
        builder.push(Attribute::Typeface("sans"), 0..9);
        builder.push(Attribute::Typeface("mono"), 3..6);
        assert_eq!(
            typefaces(&builder.finish()),
            vec![(0..3, Some("sans")), (3..6, Some("mono")), (6..9, Some("sans"))]
        );
    }

    #[test]
    fn equal_neighbours_are_merged() {
        let mut builder = RangedAttributeBuilder::new(6);
        builder.push_default(Attribute::Typeface("sans"));
        builder.push(Attribute::FontSize(20.0), 0..3);
        builder.push(Attribute::FontSize(20.0), 3..6);
        let spans = builder.finish();
        assert_eq!(spans.len(), 1, "adjacent identical spans should merge");
        assert_eq!(spans[0].range, 0..6);
        assert_eq!(spans[0].attributes.font_size, 20.0);
    }

    #[test]
    fn uncovered_ranges_have_no_typeface() {
        let mut builder = RangedAttributeBuilder::new(5);
        builder.push(Attribute::Typeface("sans"), 1..3);
        assert_eq!(
            typefaces(&builder.finish()),
            vec![(0..1, None), (1..3, Some("sans")), (3..5, None)]
        );
    }

    #[test]
    fn negative_font_size_clamps_to_zero() {
        let mut builder = RangedAttributeBuilder::<&'static str>::new(4);
        builder.push(Attribute::FontSize(-3.0), ..);
        let spans = builder.finish();
        assert_eq!(spans.len(), 1, "full range override should leave one span");
        assert_eq!(spans[0].attributes.font_size, 0.0);
    }

    #[test]
    fn pushes_sharing_a_boundary_do_not_leave_empty_spans() {
        let mut builder = RangedAttributeBuilder::new(6);
        builder.push(Attribute::Typeface("sans"), 0..3);
        builder.push(Attribute::Typeface("mono"), 3..=5);
        builder.push(Attribute::Typeface("mono"), 2..2);
        let spans = builder.finish();
        assert_eq!(
            typefaces(&spans),
            vec![(0..3, Some("sans")), (3..6, Some("mono"))]
        );
        assert!(spans.iter().all(|span| !span.range.is_empty()));
    }
}

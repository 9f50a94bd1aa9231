// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacking of lines into a bounded area.

use alloc::vec::Vec;
use core::ops::Range;

use log::trace;

use super::{Alignment, TextLine, Truncation, Typesetter, VerticalAlignment};
use crate::error::verify_range;
use crate::style::Typeface;
use crate::util::is_rtl;
use crate::Error;

/// Rectangle a frame is composed in. `y` grows downward.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct FrameBounds {
    /// Left edge.
    pub x: f32,
    /// Top edge.
    pub y: f32,
    /// Horizontal extent.
    pub width: f32,
    /// Vertical extent.
    pub height: f32,
}

impl FrameBounds {
    /// Creates bounds from an origin and a size.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn verify(&self) -> Result<(), Error> {
        let finite = self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite();
        if finite && self.width > 0.0 && self.height > 0.0 {
            Ok(())
        } else {
            Err(Error::invalid_frame(self.width, self.height))
        }
    }
}

/// Axis aligned rectangle covering part of a selection.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SelectionRect {
    /// Left edge.
    pub x0: f32,
    /// Top edge.
    pub y0: f32,
    /// Right edge.
    pub x1: f32,
    /// Bottom edge.
    pub y1: f32,
}

impl SelectionRect {
    /// Creates a rectangle from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

/// Options controlling how lines are placed in a frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameOptions {
    /// Horizontal alignment of each line.
    pub alignment: Alignment,
    /// Vertical placement of the block of lines.
    pub vertical_alignment: VerticalAlignment,
    /// Maximum number of lines, if any. Zero means no limit.
    pub max_lines: Option<usize>,
    /// Factor applied to every line height. The text stays centered in the grown line.
    pub line_height_multiplier: f32,
    /// Extra space added below every line.
    pub extra_line_spacing: f32,
}

impl Default for FrameOptions {
    fn default() -> Self {
        Self {
            alignment: Alignment::Start,
            vertical_alignment: VerticalAlignment::Top,
            max_lines: None,
            line_height_multiplier: 1.0,
            extra_line_spacing: 0.0,
        }
    }
}

/// Lines of text placed within bounds.
#[derive(Clone, Debug)]
pub struct TextFrame<F: Typeface> {
    range: Range<usize>,
    lines: Vec<TextLine<F>>,
    bounds: FrameBounds,
}

impl<F: Typeface> TextFrame<F> {
    /// Range of text covered by the frame.
    ///
    /// Ends before the requested range when the text did not fit.
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Lines with resolved origins, top to bottom.
    pub fn lines(&self) -> &[TextLine<F>] {
        &self.lines
    }

    /// Bounds the frame was composed in.
    pub fn bounds(&self) -> FrameBounds {
        self.bounds
    }

    /// Height taken up by the lines.
    pub fn occupied_height(&self) -> f32 {
        self.lines.iter().map(TextLine::height).sum()
    }

    /// Returns the index of the line containing `index`.
    pub fn line_index_at(&self, index: usize) -> Option<usize> {
        let i = self.lines.partition_point(|line| line.range().end <= index);
        (i < self.lines.len() && self.lines[i].range().contains(&index)).then_some(i)
    }

    /// Returns the index of the line spanning the vertical position `y`.
    ///
    /// Positions above the first line give the first line and positions below the
    /// last give the last. Returns `None` only for a frame without lines.
    pub fn line_index_at_position(&self, y: f32) -> Option<usize> {
        let last = self.lines.len().checked_sub(1)?;
        let i = self.lines.partition_point(|line| line.bottom() < y);
        Some(i.min(last))
    }

    /// Returns the rectangles highlighting `range`, in frame coordinates.
    ///
    /// This is a convenience method built on
    /// [`selection_rects_with`](Self::selection_rects_with).
    pub fn selection_rects(&self, range: Range<usize>) -> Vec<SelectionRect> {
        let mut rects = Vec::new();
        self.selection_rects_with(range, |rect| rects.push(rect));
        rects
    }

    /// Invokes `f` with the rectangles highlighting `range`, in frame coordinates.
    ///
    /// The selected text of the first and last lines is covered run by run. A
    /// selection that continues past the first line also covers the padding after
    /// it, every line in between across the full frame width, and the padding
    /// before the last line. The range is clipped to the frame.
    pub fn selection_rects_with(&self, range: Range<usize>, mut f: impl FnMut(SelectionRect)) {
        let start = range.start.max(self.range.start);
        let end = range.end.min(self.range.end);
        if start >= end {
            return;
        }
        let (Some(first_index), Some(last_index)) =
            (self.line_index_at(start), self.line_index_at(end - 1))
        else {
            return;
        };
        let mut emit = |x0: f32, y0: f32, x1: f32, y1: f32| {
            if x0 < x1 {
                f(SelectionRect::new(x0, y0, x1, y1));
            }
        };
        let frame_left = self.bounds.x;
        let frame_right = self.bounds.x + self.bounds.width;
        let first = &self.lines[first_index];
        let last = &self.lines[last_index];

        if first_index == last_index {
            line_parts(first, start..end, &mut emit);
            return;
        }

        line_parts(first, start..first.range().end, &mut emit);
        let (left, right) = horizontal_extent(first);
        if is_rtl(first.paragraph_level()) {
            emit(frame_left, first.top(), left, first.bottom());
        } else {
            emit(right, first.top(), frame_right, first.bottom());
        }

        for line in &self.lines[first_index + 1..last_index] {
            emit(frame_left, line.top(), frame_right, line.bottom());
        }

        let (left, right) = horizontal_extent(last);
        if is_rtl(last.paragraph_level()) {
            emit(right, last.top(), frame_right, last.bottom());
        } else {
            emit(frame_left, last.top(), left, last.bottom());
        }
        line_parts(last, last.range().start..end, &mut emit);
    }
}

fn horizontal_extent<F: Typeface>(line: &TextLine<F>) -> (f32, f32) {
    let left = line.origin().0;
    (left, left + line.width())
}

/// Covers the text of `range` on `line`, one rectangle per run.
fn line_parts<F: Typeface>(
    line: &TextLine<F>,
    range: Range<usize>,
    emit: &mut impl FnMut(f32, f32, f32, f32),
) {
    let left = line.origin().0;
    for (x0, x1) in line.visual_edges(range) {
        emit(left + x0, line.top(), left + x1, line.bottom());
    }
}

/// Frame lines placed so far.
struct FrameFiller<'a> {
    bounds: FrameBounds,
    options: &'a FrameOptions,
    cursor_y: f32,
    last_flush_factor: f32,
}

impl FrameFiller<'_> {
    /// Applies the height options to `line` and places it at the cursor.
    fn prepare<F: Typeface>(&self, line: &mut TextLine<F>, flush_factor: f32) {
        if self.options.line_height_multiplier != 1.0 {
            line.scale_height(self.options.line_height_multiplier);
        }
        if self.options.extra_line_spacing != 0.0 {
            line.add_leading(self.options.extra_line_spacing);
        }
        let x = self.bounds.x + line.flush_pen_offset(flush_factor, self.bounds.width);
        let y = self.bounds.y + self.cursor_y + line.ascent();
        line.set_origin((x, y));
    }
}

impl<F: Typeface> Typesetter<F> {
    /// Fills `bounds` with lines of `range`, top to bottom.
    ///
    /// Stops at the first line that would overflow the bounds, or at
    /// [`FrameOptions::max_lines`].
    pub fn create_frame(
        &self,
        range: Range<usize>,
        bounds: FrameBounds,
        options: &FrameOptions,
    ) -> Result<TextFrame<F>, Error> {
        verify_range(self.text(), &range)?;
        bounds.verify()?;
        let mut filler = FrameFiller {
            bounds,
            options,
            cursor_y: 0.0,
            last_flush_factor: 0.0,
        };
        let lines = self.fill_frame(range.clone(), &mut filler)?;
        let end = lines.last().map_or(range.start, |line| line.range().end);
        Ok(finish_frame(range.start..end, lines, &filler))
    }

    /// Like [`Self::create_frame`], but if the text does not fit, the last line is
    /// replaced with a truncated line running to the end of `range`.
    pub fn create_truncated_frame(
        &self,
        range: Range<usize>,
        bounds: FrameBounds,
        options: &FrameOptions,
        truncation: Truncation,
        token: &TextLine<F>,
    ) -> Result<TextFrame<F>, Error> {
        verify_range(self.text(), &range)?;
        bounds.verify()?;
        let mut filler = FrameFiller {
            bounds,
            options,
            cursor_y: 0.0,
            last_flush_factor: 0.0,
        };
        let mut lines = self.fill_frame(range.clone(), &mut filler)?;

        let Some(last) = lines.pop() else {
            return Ok(finish_frame(range.start..range.start, lines, &filler));
        };
        if last.range().end == range.end {
            lines.push(last);
            return Ok(finish_frame(range, lines, &filler));
        }

        trace!("truncating last line of frame at {}", last.range().start);
        filler.cursor_y -= last.height();
        let mut truncated = self.create_truncated_line(
            last.range().start..range.end,
            bounds.width,
            truncation,
            token,
        )?;
        filler.prepare(&mut truncated, filler.last_flush_factor);
        filler.cursor_y += truncated.height();
        lines.push(truncated);
        Ok(finish_frame(range, lines, &filler))
    }

    fn fill_frame(
        &self,
        range: Range<usize>,
        filler: &mut FrameFiller<'_>,
    ) -> Result<Vec<TextLine<F>>, Error> {
        let search = self.break_search();
        let max_lines = filler
            .options
            .max_lines
            .filter(|&max| max > 0)
            .unwrap_or(usize::MAX);
        let mut lines = Vec::new();
        let mut start = range.start;
        let mut paragraph_index = self.paragraph_index_at(start);

        while start < range.end {
            let paragraph = &self.paragraphs()[paragraph_index];
            let segment_end = paragraph.range().end.min(range.end);
            let flush_factor = filler.options.alignment.flush_factor(paragraph.base_level());

            let mut line_start = start;
            while line_start < segment_end {
                let line_end =
                    search.suggest_forward_line_break(line_start..segment_end, filler.bounds.width);
                let mut line = self.create_line(line_start..line_end)?;
                filler.prepare(&mut line, flush_factor);

                if filler.cursor_y + line.height() > filler.bounds.height {
                    trace!(
                        "line {:?} overflows frame height {}, stopping",
                        line.range(),
                        filler.bounds.height
                    );
                    return Ok(lines);
                }
                filler.cursor_y += line.height();
                filler.last_flush_factor = flush_factor;
                lines.push(line);
                if lines.len() >= max_lines {
                    trace!("frame reached {max_lines} lines");
                    return Ok(lines);
                }
                line_start = line_end;
            }

            start = segment_end;
            paragraph_index += 1;
        }

        Ok(lines)
    }
}

/// Applies vertical alignment and assembles the frame.
fn finish_frame<F: Typeface>(
    range: Range<usize>,
    mut lines: Vec<TextLine<F>>,
    filler: &FrameFiller<'_>,
) -> TextFrame<F> {
    let remaining = filler.bounds.height - filler.cursor_y;
    let dy = remaining * filler.options.vertical_alignment.factor();
    if dy != 0.0 {
        for line in &mut lines {
            let (x, y) = line.origin();
            line.set_origin((x, y + dy));
        }
    }
    TextFrame {
        range,
        lines,
        bounds: filler.bounds,
    }
}

// Copyright 2025 the Typeset Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use core::ops::Range;

/// Boxed error produced by a collaborator (bidi service, shaper, boundary provider).
pub type SourceError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// Error type for typesetting operations.
///
/// Carries a non-exhaustive [`ErrorKind`] plus whatever context was available at the
/// point of failure: the offending range, the text length, or the widths involved.
/// All errors are precondition or configuration failures; none of them are transient.
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    context: Context,
    source: Option<SourceError>,
}

#[derive(Debug, Clone, PartialEq)]
enum Context {
    None,
    Range { range: Range<usize>, len: usize },
    Width { width: f32 },
    Token { max_width: f32, token_width: f32 },
    Frame { width: f32, height: f32 },
    Message(&'static str),
}

impl Error {
    /// The machine-readable category for this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The range provided by the caller, for range and typeface errors.
    pub fn range(&self) -> Option<Range<usize>> {
        match &self.context {
            Context::Range { range, .. } => Some(range.clone()),
            _ => None,
        }
    }

    pub(crate) fn empty_text() -> Self {
        Self {
            kind: ErrorKind::EmptyText,
            context: Context::None,
            source: None,
        }
    }

    pub(crate) fn invalid_range(range: Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::InvalidRange,
            context: Context::Range { range, len },
            source: None,
        }
    }

    pub(crate) fn invalid_width(width: f32) -> Self {
        Self {
            kind: ErrorKind::InvalidWidth,
            context: Context::Width { width },
            source: None,
        }
    }

    pub(crate) fn token_too_wide(max_width: f32, token_width: f32) -> Self {
        Self {
            kind: ErrorKind::TokenTooWide,
            context: Context::Token {
                max_width,
                token_width,
            },
            source: None,
        }
    }

    pub(crate) fn invalid_frame(width: f32, height: f32) -> Self {
        Self {
            kind: ErrorKind::InvalidFrame,
            context: Context::Frame { width, height },
            source: None,
        }
    }

    pub(crate) fn missing_typeface(range: Range<usize>, len: usize) -> Self {
        Self {
            kind: ErrorKind::MissingTypeface,
            context: Context::Range { range, len },
            source: None,
        }
    }

    /// Wraps a failure reported by a collaborator.
    ///
    /// The original error stays reachable through [`core::error::Error::source`].
    pub fn collaborator(source: impl Into<SourceError>) -> Self {
        Self {
            kind: ErrorKind::Collaborator,
            context: Context::None,
            source: Some(source.into()),
        }
    }

    /// Reports a collaborator contract violation that has no underlying error value.
    pub fn contract(message: &'static str) -> Self {
        Self {
            kind: ErrorKind::Collaborator,
            context: Context::Message(message),
            source: None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match (&self.kind, &self.context) {
            (ErrorKind::EmptyText, _) => write!(f, "text is empty"),
            (ErrorKind::InvalidRange, Context::Range { range, len }) => write!(
                f,
                "bad range {}..{} for text of len {}",
                range.start, range.end, len
            ),
            (ErrorKind::InvalidWidth, Context::Width { width }) => {
                write!(f, "width {width} is not a positive finite value")
            }
            (
                ErrorKind::TokenTooWide,
                Context::Token {
                    max_width,
                    token_width,
                },
            ) => write!(
                f,
                "max width {max_width} is less than truncation token width {token_width}"
            ),
            (ErrorKind::InvalidFrame, Context::Frame { width, height }) => {
                write!(f, "frame of size {width}x{height} is empty or degenerate")
            }
            (ErrorKind::MissingTypeface, Context::Range { range, .. }) => write!(
                f,
                "no typeface is specified for range {}..{}",
                range.start, range.end
            ),
            (ErrorKind::Collaborator, Context::Message(message)) => {
                write!(f, "collaborator contract violated: {message}")
            }
            (ErrorKind::Collaborator, _) => match &self.source {
                Some(source) => write!(f, "collaborator failed: {source}"),
                None => write!(f, "collaborator failed"),
            },
            (kind, _) => write!(f, "{kind:?}"),
        }
    }
}

impl core::error::Error for Error {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|source| source as &(dyn core::error::Error + 'static))
    }
}

/// The non-exhaustive category of an error.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The text handed to the builder was empty.
    EmptyText,

    /// A character range was empty, reversed, out of bounds, or not aligned to a
    /// `char` boundary.
    InvalidRange,

    /// A width was zero, negative, or not finite.
    InvalidWidth,

    /// The truncation width is smaller than the truncation token itself.
    TokenTooWide,

    /// The frame bounds have zero area or are not finite.
    InvalidFrame,

    /// Some covered range has no typeface attribute.
    MissingTypeface,

    /// A collaborator (bidi service, shaper, boundary provider) failed.
    Collaborator,
}

/// Checks that `range` is a non-empty range of `text` lying on `char` boundaries.
pub(crate) fn verify_range(text: &str, range: &Range<usize>) -> Result<(), Error> {
    let len = text.len();
    if range.start >= range.end
        || range.end > len
        || !text.is_char_boundary(range.start)
        || !text.is_char_boundary(range.end)
    {
        return Err(Error::invalid_range(range.clone(), len));
    }
    Ok(())
}

/// Checks that `width` is usable as a layout extent.
pub(crate) fn verify_width(width: f32) -> Result<(), Error> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_width(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn range_validation() {
        let text = "ab\u{0627}c";
        assert!(verify_range(text, &(0..2)).is_ok());
        assert!(verify_range(text, &(0..text.len())).is_ok());

        let err = verify_range(text, &(2..2)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);
        assert_eq!(err.range(), Some(2..2));

        // Splits the two-byte Arabic letter.
        let err = verify_range(text, &(0..3)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidRange);

        let err = verify_range(text, &(1..9)).unwrap_err();
        assert_eq!(err.to_string(), "bad range 1..9 for text of len 5");
    }

    #[test]
    fn width_validation() {
        assert!(verify_width(1.0).is_ok());
        assert_eq!(
            verify_width(0.0).unwrap_err().kind(),
            ErrorKind::InvalidWidth
        );
        assert_eq!(
            verify_width(f32::NAN).unwrap_err().kind(),
            ErrorKind::InvalidWidth
        );
        assert_eq!(
            verify_width(f32::INFINITY).unwrap_err().kind(),
            ErrorKind::InvalidWidth
        );
    }

    #[test]
    fn collaborator_source_is_preserved() {
        use core::error::Error as _;

        let err = Error::collaborator("bidi buffer exhausted");
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(
            err.source().map(|source| source.to_string()),
            Some("bidi buffer exhausted".to_string())
        );
        assert_eq!(err.to_string(), "collaborator failed: bidi buffer exhausted");
    }
}

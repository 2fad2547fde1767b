//! Errors raised by the host driver.
//!
//! The scanner itself never fails; it only declines (`NoMatch`) or runs
//! out of input (`Incomplete`). The host turns the situations it cannot
//! recover from into a `LexError` carrying where it happened, what went
//! wrong, and what the driver was inside of at the time.

use hdoc_scanner::Span;
use thiserror::Error;

/// A host lexing error.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
#[error("{kind} at {span}")]
pub struct LexError {
    /// Location of the error in source.
    pub span: Span,
    /// What went wrong.
    pub kind: LexErrorKind,
    /// What the driver was lexing when it happened.
    pub context: LexErrorContext,
}

/// What kind of error occurred.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Error)]
pub enum LexErrorKind {
    /// Input ended before the closing delimiter line.
    #[error("unterminated heredoc, expected a closing `{delimiter}` line")]
    UnterminatedHeredoc { delimiter: String },
    /// Input ended before the `}` of an embedded expression.
    #[error("unterminated embedded expression, expected `}}`")]
    UnterminatedExpression,
    /// Neither the scanner nor the host rules accept this codepoint.
    #[error("unexpected {found:?} in heredoc body")]
    UnexpectedCharacter { found: char },
    /// A NUL byte inside the source; the scanner reads it as end of input.
    #[error("null byte in source")]
    InteriorNull,
    /// Offsets are `u32`, so sources must stay below 4 GiB.
    #[error("source of {len} bytes is too large")]
    SourceTooLarge { len: usize },
}

/// Lexing context at the point of error.
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum LexErrorContext {
    /// Outside any heredoc.
    #[default]
    TopLevel,
    /// Inside the heredoc opened at `start`.
    InsideHeredoc { start: u32 },
    /// Inside the embedded expression whose brace sits at `start`.
    InsideExpression { start: u32 },
}

impl LexError {
    pub fn unterminated_heredoc(span: Span, delimiter: impl Into<String>) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnterminatedHeredoc {
                delimiter: delimiter.into(),
            },
            context: LexErrorContext::InsideHeredoc { start: span.start },
        }
    }

    pub fn unterminated_expression(span: Span) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnterminatedExpression,
            context: LexErrorContext::InsideExpression { start: span.start },
        }
    }

    pub fn unexpected_character(span: Span, found: char, heredoc_start: u32) -> Self {
        LexError {
            span,
            kind: LexErrorKind::UnexpectedCharacter { found },
            context: LexErrorContext::InsideHeredoc {
                start: heredoc_start,
            },
        }
    }

    pub fn interior_null(pos: u32) -> Self {
        LexError {
            span: Span::new(pos, pos.saturating_add(1)),
            kind: LexErrorKind::InteriorNull,
            context: LexErrorContext::TopLevel,
        }
    }

    pub fn source_too_large(len: usize) -> Self {
        LexError {
            span: Span::point(0),
            kind: LexErrorKind::SourceTooLarge { len },
            context: LexErrorContext::TopLevel,
        }
    }

    /// Short advice on how to fix the source, if there is any.
    pub fn hint(&self) -> Option<String> {
        match &self.kind {
            LexErrorKind::UnterminatedHeredoc { delimiter } => Some(format!(
                "add a line starting with `{delimiter}` followed by a newline"
            )),
            LexErrorKind::UnterminatedExpression => {
                Some("close the embedded expression with `}`".to_owned())
            }
            LexErrorKind::UnexpectedCharacter { found: '{' } => {
                Some("escape the brace as `\\{` to keep it literal".to_owned())
            }
            LexErrorKind::InteriorNull => Some("remove the null byte".to_owned()),
            LexErrorKind::UnexpectedCharacter { .. } | LexErrorKind::SourceTooLarge { .. } => None,
        }
    }
}

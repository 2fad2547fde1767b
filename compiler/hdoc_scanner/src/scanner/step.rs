//! Traced cursor steps.
//!
//! Every scanner movement goes through a [`Tape`], which logs the step name
//! and the codepoint it acted on before forwarding to the host [`Lexer`].
//! Matching logic never looks at the trace.

use std::fmt;

use tracing::trace;

use crate::{Lexer, Span};

/// Name of one cursor step.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Codepoint becomes part of the pending token.
    Consume,
    /// Codepoint is discarded; the token starts after it.
    Skip,
    /// Token end committed at the current position.
    Mark,
}

impl Step {
    pub const fn as_str(self) -> &'static str {
        match self {
            Step::Consume => "consume",
            Step::Skip => "skip",
            Step::Mark => "mark",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Codepoint rendered on one visible column: `\n`, `\r`, `\t`, `\0` are
/// escaped and any other whitespace prints as `\s`.
#[derive(Copy, Clone, Debug)]
pub struct Printable(pub char);

impl fmt::Display for Printable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            '\n' => f.write_str("\\n"),
            '\r' => f.write_str("\\r"),
            '\t' => f.write_str("\\t"),
            '\0' => f.write_str("\\0"),
            c if c.is_whitespace() => f.write_str("\\s"),
            c => write!(f, "{c}"),
        }
    }
}

/// Host lexer wrapped with step tracing.
pub(crate) struct Tape<'l, L: Lexer + ?Sized> {
    lexer: &'l mut L,
}

impl<'l, L: Lexer + ?Sized> Tape<'l, L> {
    pub(crate) fn new(lexer: &'l mut L) -> Self {
        Tape { lexer }
    }

    #[inline]
    pub(crate) fn peek(&self) -> char {
        self.lexer.lookahead()
    }

    pub(crate) fn consume(&mut self) {
        self.trace(Step::Consume);
        self.lexer.advance();
    }

    pub(crate) fn skip(&mut self) {
        self.trace(Step::Skip);
        self.lexer.skip();
    }

    pub(crate) fn mark(&mut self) {
        self.trace(Step::Mark);
        self.lexer.mark_end();
    }

    pub(crate) fn span(&self) -> Span {
        self.lexer.token_span()
    }

    fn trace(&self, step: Step) {
        trace!(step = step.as_str(), ch = %Printable(self.peek()));
    }
}

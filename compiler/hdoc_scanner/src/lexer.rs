//! The host engine's cursor contract.
//!
//! The scanner never owns input. Every call receives a [`Lexer`] from the
//! host, positioned where the host wants the next token to begin, and talks
//! to it only through these operations.

use crate::Span;

/// Codepoint cursor supplied by the host parsing engine.
///
/// # Token boundaries
///
/// A token starts at the first position that was not skipped and ends at
/// the last [`mark_end`](Lexer::mark_end) call. If the scanner never marks,
/// the token ends at the current position. Codepoints consumed after the
/// last mark are lookahead only: the host re-lexes from the marked end.
pub trait Lexer {
    /// The codepoint at the current position, or `'\0'` at end of input.
    fn lookahead(&self) -> char;

    /// Consume the current codepoint into the pending token.
    ///
    /// At end of input this is a no-op.
    fn advance(&mut self);

    /// Discard the current codepoint; the token start moves past it.
    fn skip(&mut self);

    /// Commit the current position as the end of the pending token.
    fn mark_end(&mut self);

    /// Span of the pending token as committed so far.
    fn token_span(&self) -> Span;
}

//! Delimiter opener: `<<<NAME`, `<<<"NAME"` and `<<<'NAME'`.

use tracing::{trace, trace_span};

use super::delimiter::scan_delimiter;
use super::step::Tape;
use super::{Miss, Transition};
use crate::chars::{is_delimiter_continue, is_delimiter_start};
use crate::state::{OpenHeredoc, ScannerState};
use crate::{ExternalToken, Lexer};

/// Recognize a heredoc opening line.
///
/// The tape may sit on `<<<` (consumed as part of the token) or just after
/// it when the host grammar matched the introducer itself. The token ends
/// after the name or its closing quote; the line break after it is consumed
/// as lookahead so the next line can be checked for an immediate close.
pub(super) fn scan_start<L: Lexer + ?Sized>(tape: &mut Tape<'_, L>) -> Transition {
    let _span = trace_span!("scan_start").entered();

    while tape.peek().is_whitespace() {
        tape.skip();
    }

    if tape.peek() == '<' {
        for _ in 0..3 {
            if tape.peek() != '<' {
                return Err(Miss::NoMatch);
            }
            tape.consume();
        }
        while matches!(tape.peek(), ' ' | '\t') {
            tape.consume();
        }
    }

    let quote = match tape.peek() {
        q @ ('\'' | '"') => {
            tape.consume();
            Some(q)
        }
        _ => None,
    };

    let mut delimiter = String::new();
    if is_delimiter_start(tape.peek()) {
        delimiter.push(tape.peek());
        tape.consume();
        while is_delimiter_continue(tape.peek()) {
            delimiter.push(tape.peek());
            tape.consume();
        }
    }
    trace!(delimiter = %delimiter, quote = ?quote);

    if let Some(q) = quote {
        if tape.peek() != q {
            return Err(Miss::NoMatch);
        }
        tape.consume();
    }

    // No whitespace allowed between the name and the line break.
    if tape.peek() != '\n' || delimiter.is_empty() {
        return Err(Miss::NoMatch);
    }

    tape.mark();
    tape.consume();

    let mut open = OpenHeredoc::new(delimiter, quote == Some('\''));
    if scan_delimiter(tape, &open.delimiter) {
        if tape.peek() == ';' {
            tape.consume();
        }
        // <<<EOF\n
        // EOF;  ^^ empty body, the end is already known
        open.did_end = tape.peek() == '\n';
    }

    Ok((ExternalToken::HeredocStart, ScannerState::Open(open)))
}

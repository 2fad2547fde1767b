//! Body scanner: literal text, escapes, embeddings and line boundaries.

use tracing::trace_span;

use super::delimiter::scan_delimiter;
use super::step::Tape;
use super::{Miss, Transition};
use crate::chars::is_identifier_start;
use crate::state::{OpenHeredoc, ScannerState};
use crate::{ExternalToken, Lexer};

/// Scan one chunk of an open heredoc.
///
/// `did_advance` records whether body text was accumulated in this call.
/// It decides between the newline tokens and a body chunk at line
/// boundaries, and keeps a `{$` that follows buffered text literal so the
/// text is flushed before the embedding opens on the next call.
///
/// State updates on success:
/// - `HEREDOC_START_NEWLINE`: `did_start`
/// - `HEREDOC_BODY` at a closing line, `HEREDOC_END_NEWLINE`: `did_start` and `did_end`
/// - `HEREDOC_END`: back to [`ScannerState::Empty`]
/// - other `HEREDOC_BODY`, `EMBEDDED_OPENING_BRACE`: unchanged
pub(super) fn scan_body<L: Lexer + ?Sized>(
    open: &OpenHeredoc,
    tape: &mut Tape<'_, L>,
) -> Transition {
    let _span = trace_span!("scan_body", delimiter = %open.delimiter).entered();

    let mut did_advance = false;

    loop {
        let c = tape.peek();

        if c == '\0' {
            return Err(Miss::Incomplete);
        }

        if c == '\\' {
            tape.consume();
            tape.consume();
            did_advance = true;
            continue;
        }

        if (c == '{' || c == '$') && !open.is_nowdoc {
            tape.mark();

            if c == '{' {
                tape.consume();

                if tape.peek() == '$' && !did_advance {
                    tape.mark();
                    tape.consume();

                    if is_identifier_start(tape.peek()) {
                        return Ok((
                            ExternalToken::EmbeddedOpeningBrace,
                            ScannerState::Open(open.clone()),
                        ));
                    }
                }
            }

            if tape.peek() == '$' {
                tape.consume();

                if is_identifier_start(tape.peek()) {
                    // A leading `$name` belongs to the host's variable rule.
                    return if did_advance {
                        Ok((ExternalToken::HeredocBody, ScannerState::Open(open.clone())))
                    } else {
                        Err(Miss::NoMatch)
                    };
                }
            }

            did_advance = true;
            continue;
        }

        if open.did_end || c == '\n' {
            if did_advance {
                // <<<EOF
                // x     \n
                // EOF;  ^^ the end is detected here, the body stops before it
                tape.mark();
                tape.consume();
            } else if c == '\n' {
                if open.did_end {
                    // Accounted for by the lookahead of an earlier call.
                    tape.skip();
                } else {
                    // Start newline, end newline, or the first byte of a body chunk.
                    tape.consume();
                    tape.mark();
                }
            }

            if scan_delimiter(tape, &open.delimiter) {
                if !did_advance && open.did_end {
                    tape.mark();
                }
                if tape.peek() == ';' {
                    tape.consume();
                }
                if tape.peek() == '\n' {
                    let transition = if did_advance {
                        (ExternalToken::HeredocBody, ScannerState::Open(open.ending()))
                    } else if open.did_end {
                        (ExternalToken::HeredocEnd, ScannerState::Empty)
                    } else {
                        (
                            ExternalToken::HeredocEndNewline,
                            ScannerState::Open(open.ending()),
                        )
                    };
                    return Ok(transition);
                }
            } else if !open.did_start && !did_advance {
                return Ok((
                    ExternalToken::HeredocStartNewline,
                    ScannerState::Open(open.started()),
                ));
            }

            did_advance = true;
            continue;
        }

        tape.consume();
        did_advance = true;
    }
}

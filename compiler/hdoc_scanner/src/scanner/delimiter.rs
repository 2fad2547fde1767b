//! Delimiter matcher.

use tracing::{trace, trace_span};

use super::step::Tape;
use crate::Lexer;

/// Consume `delimiter` from the tape, codepoint by codepoint.
///
/// Returns `false` at the first mismatch. The matched prefix stays
/// consumed and the tape is left on the mismatching codepoint.
pub(super) fn scan_delimiter<L: Lexer + ?Sized>(tape: &mut Tape<'_, L>, delimiter: &str) -> bool {
    let _span = trace_span!("scan_delimiter").entered();
    for expected in delimiter.chars() {
        if tape.peek() != expected {
            trace!(matched = false);
            return false;
        }
        tape.consume();
    }
    trace!(matched = true);
    true
}

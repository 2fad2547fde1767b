//! Scan dispatcher and the scanner's public entry point.
//!
//! # Design
//!
//! Sub-scanners never touch the persistent state. They read it, drive the
//! host cursor, and return a [`Transition`]: the produced kind together with
//! the successor state. [`Scanner::scan`] commits the successor only when a
//! token was produced, so a speculative call that fails leaves the state
//! exactly as the last successful call left it.

mod body;
mod delimiter;
mod opener;
mod step;

use tracing::{debug, trace, warn};

pub use step::{Printable, Step};

use crate::codec::{self, StateCodecError};
use crate::state::ScannerState;
use crate::{ExternalToken, Lexer, Token, ValidTokens};
use step::Tape;

/// Why a sub-scanner produced no token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Miss {
    /// The input is not this scanner's business; the host tries other rules.
    NoMatch,
    /// End of input inside an open heredoc.
    Incomplete,
}

/// Kind produced and the state to commit, or why nothing was produced.
pub(crate) type Transition = Result<(ExternalToken, ScannerState), Miss>;

/// Result of one scanner call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Exactly one token with its committed span.
    Token(Token),
    /// No token here; the host falls back to its own rules.
    NoMatch,
    /// End of input reached inside an unterminated heredoc.
    Incomplete,
}

impl ScanOutcome {
    /// The produced token, if any.
    pub fn token(self) -> Option<Token> {
        match self {
            ScanOutcome::Token(token) => Some(token),
            ScanOutcome::NoMatch | ScanOutcome::Incomplete => None,
        }
    }

    /// The produced kind, if any.
    pub fn kind(self) -> Option<ExternalToken> {
        self.token().map(|token| token.kind)
    }
}

/// Heredoc external scanner.
///
/// One instance per parse. The host calls [`scan`](Self::scan) at every
/// lexical decision point and persists the state in between with
/// [`serialize`](Self::serialize) / [`deserialize`](Self::deserialize).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scanner {
    state: ScannerState,
}

impl Scanner {
    /// Create a scanner with no heredoc open.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner resuming from `state`.
    pub fn with_state(state: ScannerState) -> Self {
        Scanner { state }
    }

    /// Current persistent state.
    pub fn state(&self) -> &ScannerState {
        &self.state
    }

    /// Scan for one external token.
    ///
    /// Routes to the body scanner when a heredoc is open and any of
    /// `HEREDOC_BODY`, `HEREDOC_END`, `EMBEDDED_OPENING_BRACE` is acceptable,
    /// otherwise to the opener when `HEREDOC_START` is acceptable. `valid`
    /// only selects the sub-scanner; it never changes how a body is scanned.
    pub fn scan<L: Lexer + ?Sized>(&mut self, lexer: &mut L, valid: ValidTokens) -> ScanOutcome {
        trace!(valid = %valid, "scan");
        let mut tape = Tape::new(lexer);

        let transition = match &self.state {
            ScannerState::Open(open) if valid.intersects(ValidTokens::BODY_SCAN) => {
                body::scan_body(open, &mut tape)
            }
            _ if valid.accepts(ExternalToken::HeredocStart) => opener::scan_start(&mut tape),
            _ => return ScanOutcome::NoMatch,
        };

        match transition {
            Ok((kind, next)) => {
                self.state = next;
                let token = Token::new(kind, tape.span());
                debug!(token = %kind, span = %token.span, "emit");
                ScanOutcome::Token(token)
            }
            Err(Miss::NoMatch) => ScanOutcome::NoMatch,
            Err(Miss::Incomplete) => {
                debug!(delimiter = %self.state.delimiter(), "unterminated heredoc");
                ScanOutcome::Incomplete
            }
        }
    }

    /// Write the state into the host's buffer; `0` if it does not fit.
    pub fn serialize(&self, buffer: &mut [u8]) -> usize {
        codec::serialize(&self.state, buffer)
    }

    /// Restore the state from a host blob.
    ///
    /// A malformed blob resets the scanner to [`ScannerState::Empty`] and
    /// returns the decoding error.
    pub fn deserialize(&mut self, buffer: &[u8]) -> Result<(), StateCodecError> {
        match codec::deserialize(buffer) {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "discarding malformed scanner state");
                self.state = ScannerState::Empty;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests;

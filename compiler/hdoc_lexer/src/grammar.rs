//! Where the host grammar stands relative to heredocs.
//!
//! The phase decides which external kinds the host reports as acceptable.
//! The scanner only uses that set to pick a sub-scanner, so the phases
//! mirror the grammar rule
//! `<<< START [START_NEWLINE] (BODY | variable | BRACE expr })* [END_NEWLINE] END`
//! without tracking it more finely.

use hdoc_scanner::{ExternalToken, ValidTokens};

/// Position of the host grammar.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    /// Not inside a heredoc.
    #[default]
    Outside,
    /// Right after `HEREDOC_START`.
    Opened,
    /// Inside the body.
    Body,
}

impl Phase {
    /// External kinds acceptable in this phase.
    pub fn valid_tokens(self) -> ValidTokens {
        match self {
            Phase::Outside => ValidTokens::HEREDOC_START,
            Phase::Opened => ValidTokens::HEREDOC_START_NEWLINE | Phase::Body.valid_tokens(),
            Phase::Body => {
                ValidTokens::HEREDOC_BODY
                    | ValidTokens::HEREDOC_END_NEWLINE
                    | ValidTokens::HEREDOC_END
                    | ValidTokens::EMBEDDED_OPENING_BRACE
            }
        }
    }

    /// Phase after the scanner produced `kind`.
    pub fn after(self, kind: ExternalToken) -> Phase {
        match kind {
            ExternalToken::HeredocStart => Phase::Opened,
            ExternalToken::HeredocEnd => Phase::Outside,
            ExternalToken::HeredocStartNewline
            | ExternalToken::HeredocBody
            | ExternalToken::HeredocEndNewline
            | ExternalToken::EmbeddedOpeningBrace => Phase::Body,
        }
    }

    pub fn in_heredoc(self) -> bool {
        self != Phase::Outside
    }
}

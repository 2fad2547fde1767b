//! External token kinds and the acceptable-kinds set.
//!
//! [`ExternalToken`] is the scanner's entire output alphabet. The ordinal of
//! each variant is the index the host engine uses in its external-token
//! table, so the `repr(u8)` discriminants are part of the host contract and
//! must never be reordered.

use std::fmt;

use bitflags::bitflags;

use crate::Span;

/// Token kinds produced by the heredoc scanner.
#[repr(u8)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ExternalToken {
    /// `<<<[quote]NAME[quote]` with the delimiter captured.
    HeredocStart = 0,
    /// Line break right after the opening line, before any body text.
    HeredocStartNewline = 1,
    /// One chunk of literal body text.
    HeredocBody = 2,
    /// Line break directly preceding the closing delimiter line.
    HeredocEndNewline = 3,
    /// The closing delimiter name.
    HeredocEnd = 4,
    /// `{` immediately followed by `$` and an identifier start.
    EmbeddedOpeningBrace = 5,
}

impl ExternalToken {
    /// Every kind, in ordinal order.
    pub const ALL: [ExternalToken; 6] = [
        ExternalToken::HeredocStart,
        ExternalToken::HeredocStartNewline,
        ExternalToken::HeredocBody,
        ExternalToken::HeredocEndNewline,
        ExternalToken::HeredocEnd,
        ExternalToken::EmbeddedOpeningBrace,
    ];

    /// Canonical upper-case name, as it appears in grammar definitions.
    pub const fn name(self) -> &'static str {
        match self {
            ExternalToken::HeredocStart => "HEREDOC_START",
            ExternalToken::HeredocStartNewline => "HEREDOC_START_NEWLINE",
            ExternalToken::HeredocBody => "HEREDOC_BODY",
            ExternalToken::HeredocEndNewline => "HEREDOC_END_NEWLINE",
            ExternalToken::HeredocEnd => "HEREDOC_END",
            ExternalToken::EmbeddedOpeningBrace => "EMBEDDED_OPENING_BRACE",
        }
    }

    /// Look up a kind by its host ordinal.
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(ordinal as usize).copied()
    }

    /// The single-kind set containing `self`.
    #[inline]
    pub const fn bit(self) -> ValidTokens {
        ValidTokens::from_bits_truncate(1 << self as u8)
    }
}

impl fmt::Display for ExternalToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags! {
    /// Set of token kinds the host grammar accepts at the current position.
    ///
    /// Bit `n` corresponds to the kind with ordinal `n`.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ValidTokens: u8 {
        const HEREDOC_START = 1 << 0;
        const HEREDOC_START_NEWLINE = 1 << 1;
        const HEREDOC_BODY = 1 << 2;
        const HEREDOC_END_NEWLINE = 1 << 3;
        const HEREDOC_END = 1 << 4;
        const EMBEDDED_OPENING_BRACE = 1 << 5;
    }
}

impl ValidTokens {
    /// Kinds that route a call to the body scanner.
    pub const BODY_SCAN: ValidTokens = ValidTokens::HEREDOC_BODY
        .union(ValidTokens::HEREDOC_END)
        .union(ValidTokens::EMBEDDED_OPENING_BRACE);

    /// Build a set from a host `expected` table indexed by ordinal.
    ///
    /// Entries past the last known kind are ignored.
    pub fn from_expected(expected: &[bool]) -> Self {
        expected
            .iter()
            .enumerate()
            .filter(|(_, accepted)| **accepted)
            .filter_map(|(ordinal, _)| u8::try_from(ordinal).ok())
            .filter_map(ExternalToken::from_ordinal)
            .fold(ValidTokens::empty(), |set, kind| set | kind.bit())
    }

    /// Returns `true` if `kind` is acceptable.
    #[inline]
    pub fn accepts(self, kind: ExternalToken) -> bool {
        self.contains(kind.bit())
    }

    /// Iterate the accepted kinds in ordinal order.
    pub fn kinds(self) -> impl Iterator<Item = ExternalToken> {
        ExternalToken::ALL
            .into_iter()
            .filter(move |kind| self.accepts(*kind))
    }
}

impl From<ExternalToken> for ValidTokens {
    fn from(kind: ExternalToken) -> Self {
        kind.bit()
    }
}

impl fmt::Display for ValidTokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for kind in self.kinds() {
            if !first {
                f.write_str(" ")?;
            }
            f.write_str(kind.name())?;
            first = false;
        }
        Ok(())
    }
}

/// A produced token: its kind plus the exact span the host committed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Token {
    pub kind: ExternalToken,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: ExternalToken, span: Span) -> Self {
        Token { kind, span }
    }
}

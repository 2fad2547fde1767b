//! Host token stream.

use std::fmt;

use hdoc_scanner::{ExternalToken, Span};

/// Kind of a token in the host stream.
///
/// Heredoc boundaries come from the external scanner; everything the
/// scanner leaves to the grammar (variables, embedded expressions, text
/// outside heredocs) is lexed by the host itself.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum TokenKind {
    /// Produced by the heredoc scanner.
    External(ExternalToken),
    /// Source text outside any heredoc.
    Text,
    /// `$name` inside a heredoc body.
    Variable,
    /// Everything between an embedded opening brace and its closing `}`.
    Expression,
    /// `}` closing an embedded expression.
    CloseBrace,
}

impl TokenKind {
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::External(kind) => kind.name(),
            TokenKind::Text => "TEXT",
            TokenKind::Variable => "VARIABLE",
            TokenKind::Expression => "EXPRESSION",
            TokenKind::CloseBrace => "CLOSE_BRACE",
        }
    }
}

impl From<ExternalToken> for TokenKind {
    fn from(kind: ExternalToken) -> Self {
        TokenKind::External(kind)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A token in the host stream.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// Source text covered by this token.
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        source.get(self.span.to_range()).unwrap_or_default()
    }
}

impl From<hdoc_scanner::Token> for Token {
    fn from(token: hdoc_scanner::Token) -> Self {
        Token::new(TokenKind::External(token.kind), token.span)
    }
}

/// A token together with the source text it covers.
#[derive(Copy, Clone, Debug, serde::Serialize)]
pub struct TokenDump<'src> {
    #[serde(flatten)]
    pub token: Token,
    pub text: &'src str,
}

/// Render `tokens` as a pretty-printed JSON array of [`TokenDump`]s.
pub fn to_json(source: &str, tokens: &[Token]) -> serde_json::Result<String> {
    let dump: Vec<TokenDump<'_>> = tokens
        .iter()
        .map(|&token| TokenDump {
            token,
            text: token.text(source),
        })
        .collect();
    serde_json::to_string_pretty(&dump)
}

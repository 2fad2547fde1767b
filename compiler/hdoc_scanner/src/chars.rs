//! Codepoint classes shared by the scanner and its hosts.

/// First codepoint of a heredoc delimiter name.
#[inline]
pub fn is_delimiter_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

/// Subsequent codepoints of a heredoc delimiter name.
#[inline]
pub fn is_delimiter_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// First codepoint of a variable name after `$`.
///
/// Latin-1 codepoints `U+0080..=U+00FF` count as letters, matching the
/// host grammar's variable rule.
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    matches!(c, '_' | 'a'..='z' | 'A'..='Z' | '\u{80}'..='\u{ff}')
}

/// Subsequent codepoints of a variable name.
#[inline]
pub fn is_identifier_continue(c: char) -> bool {
    is_identifier_start(c) || c.is_ascii_digit()
}

//! Reference [`Lexer`] over a sentinel-terminated buffer.
//!
//! The cursor decodes one UTF-8 codepoint at a time. End of input is the
//! sentinel (`0x00`) at or past the source length; the lookahead there is
//! `'\0'`, exactly what the scanner contract expects.
//!
//! Besides the read position the cursor tracks the pending token: where it
//! starts (moved by [`skip`](Lexer::skip)) and where it was last marked to
//! end (set by [`mark_end`](Lexer::mark_end)).

use crate::{Lexer, Span};

/// Codepoint cursor with token-boundary tracking.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor) or
/// [`SourceBuffer::cursor_at()`](crate::SourceBuffer::cursor_at).
/// The cursor is [`Copy`], enabling cheap snapshots for speculative scans.
///
/// # Invariant
///
/// `buf[source_len] == 0x00` and all later bytes are `0x00`, and `pos`
/// always sits on a UTF-8 character boundary.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// First byte of the pending token.
    token_start: u32,
    /// Committed end of the pending token, if marked.
    marked_end: Option<u32>,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source_len: u32, pos: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            source_len,
            pos,
            token_start: pos,
            marked_end: None,
        }
    }

    /// Returns the byte at the current position.
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Decode the codepoint at the current position.
    ///
    /// Returns `'\0'` at EOF and for interior null bytes; use
    /// [`is_eof()`](Self::is_eof) to distinguish.
    pub fn lookahead_char(&self) -> char {
        let lead = self.current();
        if lead.is_ascii() {
            return char::from(lead);
        }
        let start = self.pos as usize;
        let end = start + Self::utf8_char_width(lead) as usize;
        std::str::from_utf8(&self.buf[start..end])
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Returns `true` if the cursor has reached EOF.
    ///
    /// EOF is when the current byte is the sentinel (`0x00`) and the
    /// position is at or past the source length.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.current() == 0 && self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// First byte of the pending token.
    #[inline]
    pub fn token_start(&self) -> u32 {
        self.token_start
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    ///
    /// - `0xC0..=0xDF`: 2 bytes
    /// - `0xE0..=0xEF`: 3 bytes
    /// - `0xF0..=0xF7`: 4 bytes
    /// - Everything else (ASCII, continuation, invalid): 1 byte
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance past one full UTF-8 character. No-op at EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        if !self.is_eof() {
            self.pos += Self::utf8_char_width(self.current());
        }
    }

    /// Extract a source substring.
    ///
    /// Returns an empty string if `start..end` does not fall on character
    /// boundaries within the source content.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        let end = end.min(self.source_len) as usize;
        let start = (start as usize).min(end);
        std::str::from_utf8(&self.buf[start..end]).unwrap_or_default()
    }
}

impl Lexer for Cursor<'_> {
    #[inline]
    fn lookahead(&self) -> char {
        self.lookahead_char()
    }

    #[inline]
    fn advance(&mut self) {
        self.advance_char();
    }

    fn skip(&mut self) {
        self.advance_char();
        self.token_start = self.pos;
    }

    #[inline]
    fn mark_end(&mut self) {
        self.marked_end = Some(self.pos);
    }

    fn token_span(&self) -> Span {
        let end = self.marked_end.unwrap_or(self.pos);
        Span::new(self.token_start, end.max(self.token_start))
    }
}

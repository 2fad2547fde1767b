//! Whole-document driver.
//!
//! Plays the part of the parsing engine: it decides which external kinds
//! are acceptable, persists the scanner state after every produced token,
//! and restores it before every call. Whatever the scanner declines inside
//! a heredoc (`$name`, the inside of `{$...}`) is lexed here.

use hdoc_scanner::chars::{is_identifier_continue, is_identifier_start};
use hdoc_scanner::{ExternalToken, ScanOutcome, Scanner, SourceBuffer, Span};
use tracing::{trace, warn};

use crate::grammar::Phase;
use crate::{LexError, LexOptions, Token, TokenKind};

const INTRODUCER: &[u8] = b"<<<";

pub(crate) struct Driver<'src> {
    source: &'src str,
    buffer: SourceBuffer,
    scanner: Scanner,
    /// Last persisted state, as the engine would store it.
    blob: Vec<u8>,
    /// Host-owned serialization buffer; its length is the capacity.
    scratch: Vec<u8>,
    pos: u32,
    phase: Phase,
    heredoc_start: u32,
    tokens: Vec<Token>,
}

impl<'src> Driver<'src> {
    pub(crate) fn new(source: &'src str, buffer: SourceBuffer, options: &LexOptions) -> Self {
        Driver {
            source,
            buffer,
            scanner: Scanner::new(),
            blob: Vec::new(),
            scratch: vec![0; options.state_capacity],
            pos: 0,
            phase: Phase::Outside,
            heredoc_start: 0,
            tokens: Vec::new(),
        }
    }

    pub(crate) fn run(mut self) -> Result<Vec<Token>, LexError> {
        let len = self.buffer.len();
        while self.pos < len {
            if self.phase.in_heredoc() {
                self.heredoc_step()?;
            } else {
                self.outside_step();
            }
        }

        if self.phase.in_heredoc() {
            self.restore();
            if !self.scanner.state().is_empty() {
                return Err(self.unterminated());
            }
        }
        Ok(self.tokens)
    }

    fn outside_step(&mut self) {
        let rest = self
            .source
            .as_bytes()
            .get(self.pos as usize..)
            .unwrap_or_default();

        match memchr::memmem::find(rest, INTRODUCER) {
            Some(0) => self.open_heredoc(),
            Some(offset) => self.push(TokenKind::Text, forward(self.pos, offset)),
            None => self.push(TokenKind::Text, self.buffer.len()),
        }
    }

    fn open_heredoc(&mut self) {
        self.restore();
        let mut cursor = self.buffer.cursor_at(self.pos);
        match self.scanner.scan(&mut cursor, Phase::Outside.valid_tokens()) {
            ScanOutcome::Token(token) => self.accept(token),
            ScanOutcome::NoMatch | ScanOutcome::Incomplete => {
                trace!(pos = self.pos, "`<<<` does not open a heredoc");
                self.push(TokenKind::Text, forward(self.pos, INTRODUCER.len()));
            }
        }
    }

    fn heredoc_step(&mut self) -> Result<(), LexError> {
        self.restore();
        if self.scanner.state().is_empty() {
            warn!(
                pos = self.pos,
                "heredoc state was not persisted; lexing the rest as plain text"
            );
            self.phase = Phase::Outside;
            return Ok(());
        }

        let mut cursor = self.buffer.cursor_at(self.pos);
        match self.scanner.scan(&mut cursor, self.phase.valid_tokens()) {
            ScanOutcome::Token(token) => {
                self.accept(token);
                if token.kind == ExternalToken::EmbeddedOpeningBrace {
                    self.embedded_expression(token.span.start)?;
                }
                Ok(())
            }
            ScanOutcome::NoMatch => self.variable(),
            ScanOutcome::Incomplete => Err(self.unterminated()),
        }
    }

    /// `$name` inside a body, left to the host by the scanner.
    fn variable(&mut self) -> Result<(), LexError> {
        let source = self.source;
        let rest = source.get(self.pos as usize..).unwrap_or_default();
        let mut chars = rest.chars();
        let found = chars.next().unwrap_or('\0');

        if found == '$' && chars.clone().next().is_some_and(is_identifier_start) {
            let name_len: usize = chars
                .take_while(|&c| is_identifier_continue(c))
                .map(char::len_utf8)
                .sum();
            self.push(TokenKind::Variable, forward(self.pos, 1 + name_len));
            self.phase = Phase::Body;
            return Ok(());
        }

        let span = Span::new(self.pos, forward(self.pos, found.len_utf8()));
        Err(LexError::unexpected_character(
            span,
            found,
            self.heredoc_start,
        ))
    }

    /// Everything up to the `}` balancing the embedded opening brace.
    fn embedded_expression(&mut self, brace: u32) -> Result<(), LexError> {
        let source = self.source;
        let rest = source.get(self.pos as usize..).unwrap_or_default();
        let mut depth = 0u32;

        for (offset, c) in rest.char_indices() {
            match c {
                '{' => depth += 1,
                '}' if depth == 0 => {
                    let close = forward(self.pos, offset);
                    self.push(TokenKind::Expression, close);
                    self.push(TokenKind::CloseBrace, forward(close, 1));
                    return Ok(());
                }
                '}' => depth -= 1,
                _ => {}
            }
        }

        Err(LexError::unterminated_expression(Span::new(
            brace,
            self.buffer.len(),
        )))
    }

    fn accept(&mut self, token: hdoc_scanner::Token) {
        debug_assert!(token.span.end > self.pos, "external token made no progress");
        if token.kind == ExternalToken::HeredocStart {
            self.heredoc_start = token.span.start;
        }
        self.tokens.push(token.into());
        self.pos = token.span.end;
        self.phase = self.phase.after(token.kind);
        self.persist();
    }

    fn persist(&mut self) {
        let written = self.scanner.serialize(&mut self.scratch);
        self.blob.clear();
        self.blob
            .extend_from_slice(self.scratch.get(..written).unwrap_or_default());
    }

    fn restore(&mut self) {
        if self.scanner.deserialize(&self.blob).is_err() {
            self.phase = Phase::Outside;
        }
    }

    fn unterminated(&self) -> LexError {
        LexError::unterminated_heredoc(
            Span::new(self.heredoc_start, self.buffer.len()),
            self.scanner.state().delimiter(),
        )
    }

    /// Push a host token from the current position to `end`.
    ///
    /// Adjacent text tokens are merged.
    fn push(&mut self, kind: TokenKind, end: u32) {
        let span = Span::new(self.pos, end);
        trace!(kind = %kind, span = %span, "host token");
        match self.tokens.last_mut() {
            Some(last)
                if kind == TokenKind::Text
                    && last.kind == TokenKind::Text
                    && last.span.end == span.start =>
            {
                last.span = Span::new(last.span.start, end);
            }
            _ => self.tokens.push(Token::new(kind, span)),
        }
        self.pos = end;
    }
}

fn forward(pos: u32, bytes: usize) -> u32 {
    pos.saturating_add(u32::try_from(bytes).unwrap_or(u32::MAX))
}

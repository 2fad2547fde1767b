use pretty_assertions::assert_eq;

use super::*;
use crate::state::OpenHeredoc;
use crate::{SourceBuffer, Span, SERIALIZATION_BUFFER_SIZE};

use ExternalToken::{
    EmbeddedOpeningBrace, HeredocBody, HeredocEnd, HeredocEndNewline, HeredocStart,
    HeredocStartNewline,
};

/// Drives the scanner the way a host engine does: each call starts at the
/// end of the previous token, and the host steps over text it lexes itself.
struct Harness {
    buffer: SourceBuffer,
    scanner: Scanner,
    pos: u32,
    /// Round-trip the state through the codec before every call.
    persist: bool,
    blob: Vec<u8>,
}

impl Harness {
    fn new(source: &str) -> Self {
        Harness {
            buffer: SourceBuffer::new(source),
            scanner: Scanner::new(),
            pos: 0,
            persist: false,
            blob: Vec::new(),
        }
    }

    fn persisted(source: &str) -> Self {
        Harness {
            persist: true,
            ..Harness::new(source)
        }
    }

    fn scan(&mut self, valid: ValidTokens) -> ScanOutcome {
        if self.persist {
            let mut restored = Scanner::new();
            restored.deserialize(&self.blob).unwrap();
            self.scanner = restored;
        }
        let mut cursor = self.buffer.cursor_at(self.pos);
        let outcome = self.scanner.scan(&mut cursor, valid);
        if let ScanOutcome::Token(token) = outcome {
            self.pos = token.span.end;
            let mut buf = [0; SERIALIZATION_BUFFER_SIZE];
            let len = self.scanner.serialize(&mut buf);
            self.blob = buf[..len].to_vec();
        }
        outcome
    }

    fn text(&self, span: Span) -> &str {
        self.buffer.cursor().slice(span.start, span.end)
    }

    /// Scan and return `(kind, text)`; panics on no token.
    fn next(&mut self, valid: ValidTokens) -> (ExternalToken, String) {
        let outcome = self.scan(valid);
        let Some(token) = outcome.token() else {
            panic!("expected a token at {}, got {outcome:?}", self.pos);
        };
        (token.kind, self.text(token.span).to_owned())
    }

    fn start(&mut self) -> (ExternalToken, String) {
        self.next(ValidTokens::HEREDOC_START)
    }

    fn body(&mut self) -> (ExternalToken, String) {
        self.next(in_heredoc())
    }

    /// The host lexed `n` bytes on its own (a variable or an expression).
    fn host(&mut self, text: &str) {
        let end = self.pos + u32::try_from(text.len()).unwrap();
        assert_eq!(self.text(Span::new(self.pos, end)), text);
        self.pos = end;
    }

    fn rest(&self) -> &str {
        self.text(Span::new(self.pos, self.buffer.len()))
    }
}

fn in_heredoc() -> ValidTokens {
    ValidTokens::all() - ValidTokens::HEREDOC_START
}

fn tok(kind: ExternalToken, text: &str) -> (ExternalToken, String) {
    (kind, text.to_owned())
}

// === Basic lifecycle ===

#[test]
fn simple_heredoc() {
    let mut h = Harness::new("<<<D\nbody\nD;\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<D"));
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocBody, "body"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
    assert!(h.scanner.state().is_empty());
    assert_eq!(h.rest(), ";\n");
}

#[test]
fn double_quoted_delimiter() {
    let mut h = Harness::new("<<<\"D\"\nbody\nD;\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<\"D\""));
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocBody, "body"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn closing_line_without_semicolon() {
    let mut h = Harness::new("<<<EOT\nbody\nEOT\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "body"));
    assert_eq!(h.body(), tok(HeredocEnd, "EOT"));
    assert_eq!(h.rest(), "\n");
}

#[test]
fn multi_line_body_is_one_chunk() {
    let mut h = Harness::new("<<<D\nline1\nline2\nD;\n");
    h.start();
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocBody, "line1\nline2"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn immediate_termination_skips_newline_tokens() {
    let mut h = Harness::new("<<<EOF\nEOF;\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<EOF"));
    assert_eq!(
        h.scanner.state().heredoc().map(|open| open.did_end),
        Some(true)
    );
    assert_eq!(h.body(), tok(HeredocEnd, "EOF"));
    assert!(h.scanner.state().is_empty());
}

#[test]
fn state_survives_codec_between_calls() {
    let mut h = Harness::persisted("<<<D\nab{$x}\nD;\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<D"));
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocBody, "ab"));
    assert_eq!(h.body(), tok(EmbeddedOpeningBrace, "{"));
    h.host("$x}");
    assert_eq!(h.body(), tok(HeredocEndNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
    assert_eq!(h.blob, vec![0, 0, 0]);
}

// === Opener ===

#[test]
fn host_consumed_introducer() {
    let mut h = Harness::new("<<<EOF\nx\nEOF\n");
    h.pos = 3;
    assert_eq!(h.start(), tok(HeredocStart, "EOF"));
    assert_eq!(h.scanner.state().delimiter(), "EOF");
}

#[test]
fn leading_whitespace_is_skipped() {
    let mut h = Harness::new("  \n\t<<<EOF\nx\nEOF\n");
    let outcome = h.scan(ValidTokens::HEREDOC_START);
    assert_eq!(outcome.token().map(|t| t.span), Some(Span::new(4, 10)));
}

#[test]
fn blanks_after_introducer_belong_to_token() {
    let mut h = Harness::new("<<<  EOF\nx\nEOF\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<  EOF"));
}

#[test]
fn nowdoc_flag() {
    let mut h = Harness::new("<<<'EOF'\nx\nEOF\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<'EOF'"));
    assert_eq!(
        h.scanner.state(),
        &ScannerState::Open(OpenHeredoc::new("EOF", true))
    );
}

#[test]
fn unicode_delimiter() {
    let mut h = Harness::new("<<<ÉTÉ\nsoleil\nÉTÉ;\n");
    assert_eq!(h.start(), tok(HeredocStart, "<<<ÉTÉ"));
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "soleil"));
    assert_eq!(h.body(), tok(HeredocEnd, "ÉTÉ"));
}

#[test]
fn malformed_openers_are_rejected() {
    for source in [
        "<<<\nx\n",
        "<<<EOF x\nEOF\n",
        "<<<EOF \nEOF\n",
        "<<<'EOF\nEOF\n",
        "<<<\"EOF'\nEOF\n",
        "<<<1EOF\nEOF\n",
        "<<<EOF",
        "<<EOF\nEOF\n",
        "",
    ] {
        let mut h = Harness::new(source);
        assert_eq!(
            h.scan(ValidTokens::HEREDOC_START),
            ScanOutcome::NoMatch,
            "{source:?}"
        );
        assert!(h.scanner.state().is_empty(), "{source:?}");
    }
}

#[test]
fn failed_open_keeps_previous_state() {
    let previous = ScannerState::Open(OpenHeredoc {
        delimiter: "OUTER".to_owned(),
        is_nowdoc: false,
        did_start: true,
        did_end: false,
    });
    let buffer = SourceBuffer::new("<<<'EOF\n");
    let mut scanner = Scanner::with_state(previous.clone());
    let mut cursor = buffer.cursor();
    assert_eq!(
        scanner.scan(&mut cursor, ValidTokens::HEREDOC_START),
        ScanOutcome::NoMatch
    );
    assert_eq!(scanner.state(), &previous);
}

// === Dispatcher ===

#[test]
fn nothing_acceptable_is_no_match() {
    let mut h = Harness::new("<<<EOF\nEOF\n");
    assert_eq!(h.scan(ValidTokens::empty()), ScanOutcome::NoMatch);
}

#[test]
fn body_kinds_without_open_heredoc_is_no_match() {
    let mut h = Harness::new("body\n");
    assert_eq!(h.scan(ValidTokens::BODY_SCAN), ScanOutcome::NoMatch);
}

#[test]
fn newline_kinds_alone_do_not_route_to_body() {
    let mut h = Harness::new("<<<D\nx\nD\n");
    h.start();
    let valid = ValidTokens::HEREDOC_START_NEWLINE | ValidTokens::HEREDOC_END_NEWLINE;
    assert_eq!(h.scan(valid), ScanOutcome::NoMatch);
}

#[test]
fn open_heredoc_takes_priority_over_start() {
    let mut h = Harness::new("<<<D\n<<<E\nD\n");
    h.start();
    assert_eq!(h.next(ValidTokens::all()), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.next(ValidTokens::all()), tok(HeredocBody, "<<<E"));
}

// === Embedding ===

#[test]
fn brace_dollar_at_call_start_opens_embedding() {
    let mut h = Harness::new("<<<D\n{$name}\nD;\n");
    h.start();
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.body(), tok(EmbeddedOpeningBrace, "{"));
    assert_eq!(h.rest(), "$name}\nD;\n");
}

#[test]
fn brace_dollar_after_text_flushes_body_first() {
    let mut h = Harness::new("<<<D\nab{$x}cd\nD;\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "ab"));
    assert_eq!(h.body(), tok(EmbeddedOpeningBrace, "{"));
    h.host("$x}");
    assert_eq!(h.body(), tok(HeredocBody, "cd"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn leading_variable_is_left_to_host() {
    let mut h = Harness::new("<<<D\n$x\nD;\n");
    h.start();
    h.body();
    let before = h.scanner.state().clone();
    assert_eq!(h.scan(in_heredoc()), ScanOutcome::NoMatch);
    assert_eq!(h.scanner.state(), &before);
    h.host("$x");
    assert_eq!(h.body(), tok(HeredocEndNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn variable_after_text_ends_body_chunk() {
    let mut h = Harness::new("<<<D\nHello $name!\nD;\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "Hello "));
    h.host("$name");
    assert_eq!(h.body(), tok(HeredocBody, "!"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn dollar_without_identifier_is_text() {
    let mut h = Harness::new("<<<D\ncost: $5 {x} $\nD;\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "cost: $5 {x} $"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn latin1_identifier_starts_variable() {
    let mut h = Harness::new("<<<D\nx$\u{e9}t\u{e9}\nD;\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "x"));
}

#[test]
fn nowdoc_suppresses_embedding() {
    let mut h = Harness::new("<<<'D'\n{$x} and $y\nD;\n");
    h.start();
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    assert_eq!(h.body(), tok(HeredocBody, "{$x} and $y"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

// === Escapes ===

#[test]
fn escaped_brace_never_opens_embedding() {
    let mut h = Harness::new("<<<D\na\\{$x}b\nD;\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "a\\{"));
    h.host("$x");
    assert_eq!(h.body(), tok(HeredocBody, "}b"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

#[test]
fn escaped_dollar_is_text() {
    let mut h = Harness::new("<<<D\n\\$x\nD;\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "\\$x"));
}

#[test]
fn escaped_newline_hides_closing_line() {
    let mut h = Harness::new("<<<D\nx\\\nD\nD\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "x\\\nD"));
    assert_eq!(h.body(), tok(HeredocEnd, "D"));
}

// === Closing line ===

#[test]
fn delimiter_prefix_line_is_body() {
    let mut h = Harness::new("<<<EOF\nEOFX\nEOF\n");
    h.start();
    assert_eq!(h.body(), tok(HeredocBody, "\nEOFX"));
    assert_eq!(h.body(), tok(HeredocEnd, "EOF"));
}

#[test]
fn delimiter_match_is_case_sensitive() {
    let mut h = Harness::new("<<<EOF\neof\nEOF\n");
    h.start();
    h.body();
    assert_eq!(h.body(), tok(HeredocBody, "eof"));
}

#[test]
fn closing_line_requires_trailing_newline() {
    let mut h = Harness::new("<<<D\nx\nD;");
    h.start();
    h.body();
    let before = h.scanner.state().clone();
    assert_eq!(h.scan(in_heredoc()), ScanOutcome::Incomplete);
    assert_eq!(h.scanner.state(), &before);
}

#[test]
fn unterminated_heredoc_is_incomplete() {
    let mut h = Harness::new("<<<EOF\nbody");
    h.start();
    assert_eq!(h.body(), tok(HeredocStartNewline, "\n"));
    let before = h.blob.clone();
    assert_eq!(h.scan(in_heredoc()), ScanOutcome::Incomplete);
    assert_eq!(h.blob, before);
    assert_eq!(h.scanner.state().delimiter(), "EOF");
}

#[test]
fn failed_scan_is_repeatable() {
    let mut h = Harness::persisted("<<<EOF\nbody");
    h.start();
    h.body();
    for _ in 0..3 {
        assert_eq!(h.scan(in_heredoc()), ScanOutcome::Incomplete);
    }
    assert_eq!(h.scanner.state().heredoc().map(|o| o.did_start), Some(true));
}

// === Steps ===

#[test]
fn printable_escapes_invisible_chars() {
    assert_eq!(Printable('\n').to_string(), "\\n");
    assert_eq!(Printable('\r').to_string(), "\\r");
    assert_eq!(Printable('\t').to_string(), "\\t");
    assert_eq!(Printable(' ').to_string(), "\\s");
    assert_eq!(Printable('\u{a0}').to_string(), "\\s");
    assert_eq!(Printable('\0').to_string(), "\\0");
    assert_eq!(Printable('E').to_string(), "E");
}

#[test]
fn step_names() {
    assert_eq!(Step::Consume.to_string(), "consume");
    assert_eq!(Step::Skip.as_str(), "skip");
    assert_eq!(Step::Mark.as_str(), "mark");
}

// === Deserialize ===

#[test]
fn malformed_blob_resets_scanner() {
    let mut scanner = Scanner::with_state(ScannerState::open("EOF", false));
    assert!(scanner.deserialize(&[1]).is_err());
    assert!(scanner.state().is_empty());
}

//! Resumable external scanner for heredoc and nowdoc string literals.
//!
//! Heredocs (`<<<EOF ... EOF;`) cannot be expressed as a regular token: the
//! closing delimiter is chosen by the opening line, the body must be walked
//! codepoint by codepoint to find escapes and embedded-expression openings,
//! and telling "string text" from "end of heredoc" needs lookahead across
//! lines. This crate is the stateful scanner a host parsing engine calls for
//! those six token kinds.
//!
//! # Pieces
//!
//! - [`Scanner`]: dispatcher plus the opener, body scanner and delimiter
//!   matcher behind it.
//! - [`Lexer`]: the host cursor contract. [`Cursor`] over a
//!   [`SourceBuffer`] is the reference implementation.
//! - [`ScannerState`] and the [`codec`]: the only memory that survives
//!   between calls, packed into the host's fixed-capacity blob.
//! - [`ExternalToken`] / [`ValidTokens`]: output alphabet and the host's
//!   acceptable-kinds set.
//!
//! # Example
//!
//! ```
//! use hdoc_scanner::{ExternalToken, Scanner, SourceBuffer, ValidTokens};
//!
//! let source = SourceBuffer::new("<<<EOF\nEOF;\n");
//! let mut scanner = Scanner::new();
//!
//! let mut cursor = source.cursor();
//! let start = scanner.scan(&mut cursor, ValidTokens::HEREDOC_START).token().unwrap();
//! assert_eq!(start.kind, ExternalToken::HeredocStart);
//!
//! let mut cursor = source.cursor_at(start.span.end);
//! let end = scanner.scan(&mut cursor, ValidTokens::BODY_SCAN).token().unwrap();
//! assert_eq!(end.kind, ExternalToken::HeredocEnd);
//! assert!(scanner.state().is_empty());
//! ```

pub mod chars;
pub mod codec;
mod cursor;
mod lexer;
mod scanner;
mod source_buffer;
mod span;
pub mod state;
mod tag;

pub use codec::{StateCodecError, SERIALIZATION_BUFFER_SIZE};
pub use cursor::Cursor;
pub use lexer::Lexer;
pub use scanner::{Printable, ScanOutcome, Scanner, Step};
pub use source_buffer::SourceBuffer;
pub use span::Span;
pub use state::{OpenHeredoc, ScannerState};
pub use tag::{ExternalToken, Token, ValidTokens};

//! Reference host for the heredoc scanner.
//!
//! [`tokenize`] walks a whole document the way a parsing engine would:
//! text outside heredocs is passed through, `<<<` is offered to the
//! scanner, and inside a heredoc the scanner is asked for body pieces
//! while variables and embedded expressions are lexed by the host.
//!
//! The scanner state is serialized after every external token and
//! restored before every call, so any state that does not survive the
//! codec does not survive here either.
//!
//! ```
//! use hdoc_lexer::{tokenize, TokenKind};
//! use hdoc_scanner::ExternalToken;
//!
//! let source = "$x = <<<EOF\nHi $name\nEOF;\n";
//! let tokens = tokenize(source).unwrap();
//! let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
//! assert_eq!(kinds, [
//!     TokenKind::Text,
//!     TokenKind::External(ExternalToken::HeredocStart),
//!     TokenKind::External(ExternalToken::HeredocStartNewline),
//!     TokenKind::External(ExternalToken::HeredocBody),
//!     TokenKind::Variable,
//!     TokenKind::External(ExternalToken::HeredocEndNewline),
//!     TokenKind::External(ExternalToken::HeredocEnd),
//!     TokenKind::Text,
//! ]);
//! ```

mod driver;
mod grammar;
mod lex_error;
mod options;
mod token;

use std::sync::Once;

use hdoc_scanner::SourceBuffer;

pub use grammar::Phase;
pub use lex_error::{LexError, LexErrorContext, LexErrorKind};
pub use options::{LexOptions, OptionError};
pub use token::{to_json, Token, TokenDump, TokenKind};

/// Tokenize `source` with default options.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tokenize_with(source, &LexOptions::default())
}

/// Tokenize `source`.
///
/// Fails on sources the scanner cannot read faithfully (interior NUL
/// bytes, more than `u32::MAX` bytes) and on heredocs or embedded
/// expressions left open at end of input.
#[tracing::instrument(level = "debug", skip_all, fields(len = source.len()))]
pub fn tokenize_with(source: &str, options: &LexOptions) -> Result<Vec<Token>, LexError> {
    if u32::try_from(source.len()).is_err() {
        return Err(LexError::source_too_large(source.len()));
    }
    let buffer = SourceBuffer::new(source);
    if let Some(&pos) = buffer.interior_nulls().first() {
        return Err(LexError::interior_null(pos));
    }
    driver::Driver::new(source, buffer, options).run()
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing with a hierarchical subscriber.
///
/// Safe to call multiple times. Enabled only when `RUST_LOG` is set, e.g.
/// `RUST_LOG=hdoc_scanner=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_bracketed_fields(true),
                )
                .init();
        }
    });
}

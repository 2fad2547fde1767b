//! Persistent scanner state.
//!
//! The only memory the scanner keeps between calls. The host owns one
//! [`ScannerState`] per parse (inside a [`Scanner`](crate::Scanner)) and
//! round-trips it through the [codec](crate::codec) whenever it needs to
//! resume scanning somewhere else.

/// Heredoc context carried across scanner calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScannerState {
    /// No heredoc is open.
    #[default]
    Empty,
    /// Between a heredoc's start token and its end token.
    Open(OpenHeredoc),
}

/// An open heredoc: its closing delimiter plus progress flags.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct OpenHeredoc {
    /// Closing tag; never empty.
    pub delimiter: String,
    /// Opened with a single-quoted delimiter: verbatim body.
    pub is_nowdoc: bool,
    /// The start-newline decision for this heredoc has been made.
    pub did_start: bool,
    /// A lookahead already confirmed the closing delimiter line follows.
    pub did_end: bool,
}

impl OpenHeredoc {
    /// A freshly opened heredoc with no progress flags set.
    pub fn new(delimiter: impl Into<String>, is_nowdoc: bool) -> Self {
        OpenHeredoc {
            delimiter: delimiter.into(),
            is_nowdoc,
            did_start: false,
            did_end: false,
        }
    }

    /// Same heredoc with the end memo recorded.
    ///
    /// Producing a body chunk or an end-newline both settle the start
    /// decision as well, so both flags are set together.
    #[must_use]
    pub(crate) fn ending(&self) -> Self {
        OpenHeredoc {
            did_start: true,
            did_end: true,
            ..self.clone()
        }
    }

    /// Same heredoc with the start-newline emitted.
    #[must_use]
    pub(crate) fn started(&self) -> Self {
        OpenHeredoc {
            did_start: true,
            ..self.clone()
        }
    }
}

impl ScannerState {
    /// Build the state for `delimiter`; an empty delimiter means no heredoc.
    pub fn open(delimiter: impl Into<String>, is_nowdoc: bool) -> Self {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            ScannerState::Empty
        } else {
            ScannerState::Open(OpenHeredoc::new(delimiter, is_nowdoc))
        }
    }

    /// Returns `true` when no heredoc is open.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, ScannerState::Empty)
    }

    /// The open heredoc, if any.
    #[inline]
    pub fn heredoc(&self) -> Option<&OpenHeredoc> {
        match self {
            ScannerState::Empty => None,
            ScannerState::Open(open) => Some(open),
        }
    }

    /// The closing delimiter, or `""` when no heredoc is open.
    pub fn delimiter(&self) -> &str {
        self.heredoc().map_or("", |open| open.delimiter.as_str())
    }
}

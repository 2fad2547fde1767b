//! State codec: [`ScannerState`] to and from the host's state blob.
//!
//! # Layout
//!
//! ```text
//! [is_nowdoc, did_start, did_end, delimiter_utf8...]
//!  0          1          2        3..
//! ```
//!
//! Flags are one byte each (`0` or `1`). An empty state writes three zero
//! flag bytes and no delimiter. The host hands the scanner a fixed-capacity
//! buffer; a state that does not fit is not written at all, and the host
//! then restores from an empty blob on the next call.

use thiserror::Error;
use tracing::warn;

use crate::state::{OpenHeredoc, ScannerState};

/// Serialization buffer size of the host engine.
pub const SERIALIZATION_BUFFER_SIZE: usize = 1024;

/// Number of flag bytes preceding the delimiter.
pub const HEADER_LEN: usize = 3;

/// Malformed state blob handed to [`deserialize`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum StateCodecError {
    /// Non-empty blob shorter than the flag header.
    #[error("state blob of {len} bytes is shorter than the {HEADER_LEN}-byte flag header")]
    Truncated { len: usize },
    /// Delimiter bytes are not valid UTF-8.
    #[error("state blob delimiter is not valid UTF-8")]
    InvalidDelimiter(#[from] std::str::Utf8Error),
}

/// Bytes needed to serialize `state`.
pub fn encoded_len(state: &ScannerState) -> usize {
    HEADER_LEN + state.delimiter().len()
}

/// Write `state` into `buffer`, returning the number of bytes written.
///
/// The capacity is `buffer.len()`. Returns `0` without touching `buffer`
/// when the state does not fit.
pub fn serialize(state: &ScannerState, buffer: &mut [u8]) -> usize {
    let len = encoded_len(state);
    if len > buffer.len() {
        warn!(
            delimiter_len = state.delimiter().len(),
            capacity = buffer.len(),
            "heredoc state exceeds serialization buffer"
        );
        return 0;
    }

    let (nowdoc, started, ended) = match state {
        ScannerState::Empty => (false, false, false),
        ScannerState::Open(open) => (open.is_nowdoc, open.did_start, open.did_end),
    };
    buffer[0] = u8::from(nowdoc);
    buffer[1] = u8::from(started);
    buffer[2] = u8::from(ended);
    buffer[HEADER_LEN..len].copy_from_slice(state.delimiter().as_bytes());
    len
}

/// Rebuild a state from a blob produced by [`serialize`].
///
/// An empty blob, and a blob whose delimiter is empty, decode to
/// [`ScannerState::Empty`].
pub fn deserialize(buffer: &[u8]) -> Result<ScannerState, StateCodecError> {
    if buffer.is_empty() {
        return Ok(ScannerState::Empty);
    }
    if buffer.len() < HEADER_LEN {
        return Err(StateCodecError::Truncated { len: buffer.len() });
    }

    let delimiter = std::str::from_utf8(&buffer[HEADER_LEN..])?;
    if delimiter.is_empty() {
        return Ok(ScannerState::Empty);
    }

    Ok(ScannerState::Open(OpenHeredoc {
        delimiter: delimiter.to_owned(),
        is_nowdoc: buffer[0] != 0,
        did_start: buffer[1] != 0,
        did_end: buffer[2] != 0,
    }))
}

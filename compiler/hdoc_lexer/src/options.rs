//! Driver configuration.

use std::fmt;

use hdoc_scanner::SERIALIZATION_BUFFER_SIZE;

/// Options for [`tokenize_with`](crate::tokenize_with).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexOptions {
    /// Bytes available for the persisted scanner state.
    ///
    /// Defaults to the host's [`SERIALIZATION_BUFFER_SIZE`]. A heredoc whose
    /// state does not fit is not persisted, and lexing resumes as if no
    /// heredoc were open.
    pub state_capacity: usize,
}

impl Default for LexOptions {
    fn default() -> Self {
        LexOptions {
            state_capacity: SERIALIZATION_BUFFER_SIZE,
        }
    }
}

/// Rejected command-line option.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionError {
    pub flag: &'static str,
    pub value: String,
}

impl fmt::Display for OptionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}' for {}", self.value, self.flag)
    }
}

impl std::error::Error for OptionError {}

impl LexOptions {
    /// Applies `arg` if it is a driver flag.
    ///
    /// Returns `Ok(false)` when the argument is not a driver flag.
    pub fn apply_flag(&mut self, arg: &str) -> Result<bool, OptionError> {
        if let Some(value) = arg.strip_prefix("--state-capacity=") {
            self.state_capacity = value.parse().map_err(|_| OptionError {
                flag: "--state-capacity",
                value: value.to_owned(),
            })?;
            return Ok(true);
        }
        Ok(false)
    }
}

//! Sentinel-terminated source buffer backing the reference [`Cursor`].
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! so the cursor reports `'\0'` at end of input without bounds checks. The
//! total buffer size is rounded up to the next 64-byte boundary, which also
//! leaves room for a full 4-byte UTF-8 read at any position.
//!
//! # Interior Null Bytes
//!
//! The scanner contract uses `'\0'` as the end-of-input lookahead, so a NUL
//! inside the source reads as end of input to the scanner. Construction
//! records every interior NUL so hosts can reject or report such input
//! before scanning.

use crate::Cursor;

/// Cache line size in bytes, used for buffer alignment padding.
const CACHE_LINE: usize = 64;

/// Sentinel-terminated source buffer.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     rounded up to 64-byte boundary
///              source_len (sentinel)
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the actual source content (excludes sentinel and padding).
    source_len: u32,
    /// Byte positions of NUL bytes inside the source content.
    interior_nulls: Vec<u32>,
}

impl SourceBuffer {
    /// Create a new sentinel-terminated buffer from source text.
    ///
    /// Sources larger than `u32::MAX` bytes saturate `source_len`; hosts
    /// reject such inputs before constructing a buffer.
    pub fn new(source: &str) -> Self {
        let source_bytes = source.as_bytes();
        let source_len = source_bytes.len();

        // Round up to next 64-byte boundary (minimum: source + 1 sentinel byte).
        let padded_len = (source_len + 1 + CACHE_LINE - 1) & !(CACHE_LINE - 1);

        // The sentinel (buf[source_len]) and padding are already 0x00.
        let mut buf = vec![0u8; padded_len];
        buf[..source_len].copy_from_slice(source_bytes);

        let interior_nulls = detect_interior_nulls(source_bytes);

        Self {
            buf,
            source_len: u32::try_from(source_len).unwrap_or(u32::MAX),
            interior_nulls,
        }
    }

    /// Returns the source bytes (without sentinel or padding).
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Returns the full buffer including sentinel and padding.
    pub fn as_sentinel_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len, 0)
    }

    /// Create a [`Cursor`] whose pending token starts at `pos`.
    ///
    /// `pos` is clamped to the source length. It must fall on a UTF-8
    /// character boundary, which holds for every token end the cursor
    /// reports.
    pub fn cursor_at(&self, pos: u32) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len, pos.min(self.source_len))
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    /// Returns `true` if the source content is empty.
    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }

    /// Positions of NUL bytes inside the source content.
    pub fn interior_nulls(&self) -> &[u32] {
        &self.interior_nulls
    }
}

/// Uses `memchr` for SIMD-accelerated null byte search instead of
/// byte-at-a-time iteration.
fn detect_interior_nulls(source: &[u8]) -> Vec<u32> {
    memchr::memchr_iter(0, source)
        .filter_map(|pos| u32::try_from(pos).ok())
        .collect()
}

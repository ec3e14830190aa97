//! The decoder's error taxonomy.
//!
//! spec.md describes a single "data error" condition with a fixed list of
//! triggering conditions (see §7). We give each condition its own variant so
//! callers can `match` on the failure instead of parsing a message, but the
//! crate still treats every variant the same way: unrecoverable within the
//! call, no partial-output guarantee.

use thiserror::Error;

/// All the ways a call to [`crate::inflate`] can fail.
///
/// Every variant corresponds to one bullet in spec.md §7. There is no
/// recovery path for any of these: on error, bytes already written to the
/// caller's output buffer are left in an undefined state.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DataError {
    /// BTYPE == 0b11, the reserved block type.
    #[error("reserved block type (BTYPE=3)")]
    ReservedBlockType,

    /// A stored block's `LEN` did not equal the one's complement of `NLEN`.
    #[error("stored block LEN/NLEN mismatch")]
    StoredLengthMismatch,

    /// The bit reader was asked for bits it can't produce because the input
    /// buffer is exhausted.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Literal/length symbol 286 or 287, which RFC 1951 reserves.
    #[error("reserved literal/length symbol")]
    ReservedLiteralLengthSymbol,

    /// Distance symbol 30 or 31, which RFC 1951 reserves.
    #[error("invalid distance symbol")]
    InvalidDistanceSymbol,

    /// A back-reference's distance exceeds the number of bytes written so
    /// far, i.e. it would read before the start of the output.
    #[error("back-reference distance exceeds bytes written so far")]
    DistanceTooFar,

    /// Writing the next byte would exceed the caller's output buffer.
    #[error("output buffer overflow")]
    OutputOverflow,

    /// Code-length symbol 16 ("repeat previous length") appeared before any
    /// length had been decoded.
    #[error("code-length symbol 16 with no previous length")]
    UndefinedPreviousLength,

    /// A dynamic block's code-length sequence decoded more entries than
    /// `HLIT + HDIST` calls for.
    #[error("dynamic tree descriptor overflowed HLIT+HDIST")]
    TreeDescriptorOverflow,

    /// A Huffman code failed to resolve to a symbol within the 15-bit
    /// maximum code length, which means the table is malformed.
    #[error("malformed Huffman code (no symbol within 15 bits)")]
    MalformedHuffmanCode,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DataError>;

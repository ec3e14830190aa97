//! # A decoder for the DEFLATE compressed data format
//!
//! This crate decodes raw DEFLATE (RFC 1951) streams: no zlib or gzip
//! framing, no checksum verification, no streaming API. Given a compressed
//! byte buffer and a caller-owned output buffer sized to at least the known
//! decompressed length, [`inflate`] reconstructs the original bytes and
//! returns the written prefix of the output buffer.
//!
//! ```
//! use inflate_core::inflate;
//!
//! let compressed = [0xcb, 0xc8, 0x04, 0x00];
//! let mut dest = [0u8; 2];
//! assert_eq!(inflate(&compressed, &mut dest).unwrap(), b"hi");
//! ```

pub mod bit_reader;
pub mod block;
pub mod error;
pub mod huffman;
pub mod inflate;
pub mod state;
pub mod tables;

pub use error::DataError;
pub use inflate::inflate;

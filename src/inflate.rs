//! The top-level driver: orchestrates block parsing and body expansion
//! until the final block is seen.

use log::trace;

use crate::block::{
    decode_dynamic_block, decode_fixed_block, decode_stored_block, read_block_header,
    BTYPE_DYNAMIC, BTYPE_FIXED, BTYPE_RESERVED, BTYPE_STORED,
};
use crate::error::{DataError, Result};
use crate::state::DecoderState;

/// Decompresses a raw DEFLATE (RFC 1951) stream from `source` into `dest`.
///
/// `dest` must be at least as long as the known decompressed size; this
/// decoder never grows the output buffer. On success, returns the prefix of
/// `dest` that was written, whose length is the true decompressed size —
/// `dest` may be longer than needed, and the unwritten tail is left
/// untouched.
///
/// # Errors
///
/// Returns [`DataError`] on any malformed input: a reserved block type, a
/// stored block whose `LEN`/`NLEN` don't match, a back-reference distance
/// exceeding the bytes written so far, output that would overflow `dest`,
/// or input that ends before the final block does. On error the contents
/// already written to `dest` are left in an undefined state.
///
/// # Examples
///
/// ```
/// use inflate_core::inflate;
///
/// // BFINAL=1, BTYPE=1 (fixed Huffman), literal 'h' 'i' then end-of-block.
/// let compressed = [0xcb, 0xc8, 0x04, 0x00];
/// let mut dest = [0u8; 2];
/// let out = inflate(&compressed, &mut dest).unwrap();
/// assert_eq!(out, b"hi");
/// ```
pub fn inflate<'a>(source: &[u8], dest: &'a mut [u8]) -> Result<&'a [u8]> {
    let mut state = DecoderState::new(source, dest);

    loop {
        let (bfinal, btype) = read_block_header(&mut state)?;
        match btype {
            BTYPE_STORED => decode_stored_block(&mut state)?,
            BTYPE_FIXED => decode_fixed_block(&mut state)?,
            BTYPE_DYNAMIC => decode_dynamic_block(&mut state)?,
            BTYPE_RESERVED => return Err(DataError::ReservedBlockType),
            _ => unreachable!("BTYPE is 2 bits, all four values handled above"),
        }
        trace!("block complete, {} bytes written so far", state.written());
        if bfinal {
            break;
        }
    }

    Ok(state.into_written())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_empty_stream_fixed_huffman_eob_only() {
        // BFINAL=1, BTYPE=1, then just the end-of-block symbol (256, which
        // the fixed tree assigns the 7-bit all-zero code). Transmission
        // order: bfinal(1), btype bit0(1), btype bit1(0), then 7 zero bits
        // for the EOB code -- 10 bits total, so two bytes are needed even
        // though only the first carries any set bits.
        let data = [0b0000_0011, 0b0000_0000];
        let mut dest = [0u8; 0];
        let out = inflate(&data, &mut dest).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn s2_single_stored_block() {
        let data = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
        let mut dest = [0u8; 5];
        let out = inflate(&data, &mut dest).unwrap();
        assert_eq!(out, b"Hello");
    }

    #[test]
    fn stored_length_mismatch_is_a_data_error() {
        let data = [0x01, 0x05, 0x00, 0x00, 0x00, b'H', b'e', b'l', b'l', b'o'];
        let mut dest = [0u8; 5];
        assert_eq!(
            inflate(&data, &mut dest),
            Err(DataError::StoredLengthMismatch)
        );
    }

    #[test]
    fn reserved_block_type_is_a_data_error() {
        // BFINAL=1, BTYPE=3
        let data = [0b0000_0111];
        let mut dest = [0u8; 1];
        assert_eq!(inflate(&data, &mut dest), Err(DataError::ReservedBlockType));
    }

    #[test]
    fn truncated_input_is_a_data_error() {
        let data = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l'];
        let mut dest = [0u8; 5];
        assert_eq!(inflate(&data, &mut dest), Err(DataError::UnexpectedEof));
    }

    #[test]
    fn oversized_output_buffer_yields_exact_length_view() {
        let data = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
        let mut dest = [0u8; 64];
        let out = inflate(&data, &mut dest).unwrap();
        assert_eq!(out.len(), 5);
        assert_eq!(out, b"Hello");
    }

    #[test]
    fn determinism_same_input_same_output() {
        let data = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
        let mut dest_a = [0u8; 5];
        let mut dest_b = [0u8; 5];
        let a = inflate(&data, &mut dest_a).unwrap().to_vec();
        let b = inflate(&data, &mut dest_b).unwrap().to_vec();
        assert_eq!(a, b);
    }
}

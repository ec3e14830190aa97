//! Per-block parsing: header, dynamic-tree descriptor, and body expansion.
//!
//! A DEFLATE stream is a sequence of blocks. Each one starts with a 1-bit
//! `BFINAL` flag and a 2-bit `BTYPE`; what follows depends on `BTYPE`. This
//! module implements all three block bodies (stored, fixed-Huffman,
//! dynamic-Huffman) plus the dynamic block's code-length descriptor.

use log::trace;

use crate::error::{DataError, Result};
use crate::huffman::HuffmanTable;
use crate::state::DecoderState;
use crate::tables::{self, CLCIDX};

pub const BTYPE_STORED: u32 = 0b00;
pub const BTYPE_FIXED: u32 = 0b01;
pub const BTYPE_DYNAMIC: u32 = 0b10;
pub const BTYPE_RESERVED: u32 = 0b11;

const END_OF_BLOCK: u16 = 256;
const MAX_LITERAL_LENGTH_SYMBOL: u16 = 287;
const MAX_VALID_DISTANCE_SYMBOL: usize = 29;

/// Largest `HLIT + HDIST` the 5-bit fields in the descriptor header can
/// encode: `HLIT` tops out at 257 + 31 = 288, `HDIST` at 1 + 31 = 32.
const MAX_DESCRIPTOR_ENTRIES: usize = 288 + 32;

const CODE_LENGTH_ALPHABET_SIZE: usize = 19;

/// Reads the per-block `BFINAL`/`BTYPE` prelude.
pub fn read_block_header(state: &mut DecoderState) -> Result<(bool, u32)> {
    let bfinal = state.reader.get_bit()? == 1;
    let btype = state.reader.read_bits(2, 0)?;
    trace!("block header: bfinal={bfinal} btype={btype}");
    Ok((bfinal, btype))
}

/// BTYPE=0: an uncompressed block. Aligns to the next byte boundary, reads
/// `LEN`/`NLEN`, verifies they're complementary, and copies `LEN` raw bytes.
pub fn decode_stored_block(state: &mut DecoderState) -> Result<()> {
    state.reader.align_to_byte();
    let len = state.reader.read_raw_u16_le()?;
    let nlen = state.reader.read_raw_u16_le()?;
    if len != !nlen {
        return Err(DataError::StoredLengthMismatch);
    }
    trace!("stored block: len={len}");
    state.copy_stored_bytes(len as usize)
}

/// BTYPE=1 or BTYPE=2: repeatedly decodes literal/length symbols against
/// `lt`, expanding length/distance pairs against `dt` via LZ77 back-copies,
/// until the end-of-block symbol (256) is seen.
pub fn decode_huffman_block(
    state: &mut DecoderState,
    lt: &HuffmanTable,
    dt: &HuffmanTable,
) -> Result<()> {
    loop {
        let symbol = lt.decode_symbol(&mut state.reader)?;
        match symbol {
            0..=255 => state.push_byte(symbol as u8)?,
            END_OF_BLOCK => break,
            257..=285 => {
                let i = (symbol - 257) as usize;
                let length = tables::LENGTH_BASE[i] as u32
                    + state
                        .reader
                        .read_bits(tables::LENGTH_EXTRA_BITS[i] as u32, 0)?;

                let dist_symbol = dt.decode_symbol(&mut state.reader)? as usize;
                if dist_symbol > MAX_VALID_DISTANCE_SYMBOL {
                    return Err(DataError::InvalidDistanceSymbol);
                }
                let dist = tables::DIST_BASE[dist_symbol] as u32
                    + state
                        .reader
                        .read_bits(tables::DIST_EXTRA_BITS[dist_symbol] as u32, 0)?;

                state.copy_back_reference(dist as usize, length as usize)?;
            }
            286..=MAX_LITERAL_LENGTH_SYMBOL => {
                return Err(DataError::ReservedLiteralLengthSymbol);
            }
            _ => return Err(DataError::ReservedLiteralLengthSymbol),
        }
    }
    Ok(())
}

/// BTYPE=1: decodes a block against the process-wide fixed trees.
pub fn decode_fixed_block(state: &mut DecoderState) -> Result<()> {
    let (lt, dt) = tables::fixed_trees();
    decode_huffman_block(state, lt, dt)
}

/// BTYPE=2: reads the dynamic-tree descriptor (HLIT/HDIST/HCLEN, the
/// code-length alphabet, and the run-length-encoded literal/length and
/// distance code lengths), builds `state.lt`/`state.dt` from it, then
/// decodes the block body against them.
pub fn decode_dynamic_block(state: &mut DecoderState) -> Result<()> {
    read_dynamic_trees(state)?;
    // Borrow-split: decode_huffman_block needs `&state.lt`/`&state.dt` plus
    // `&mut state` for the body, so clone the (small, fixed-size) tables
    // rather than fight the borrow checker over one struct.
    let lt = state.lt.clone();
    let dt = state.dt.clone();
    decode_huffman_block(state, &lt, &dt)
}

/// Reads HLIT/HDIST/HCLEN and the resulting code-length sequence, storing
/// the built literal/length and distance trees into `state.lt`/`state.dt`.
fn read_dynamic_trees(state: &mut DecoderState) -> Result<()> {
    let hlit = state.reader.read_bits(5, 257)? as usize;
    let hdist = state.reader.read_bits(5, 1)? as usize;
    let hclen = state.reader.read_bits(4, 4)? as usize;
    trace!("dynamic tree descriptor: hlit={hlit} hdist={hdist} hclen={hclen}");

    let mut cl_lengths = [0u8; CODE_LENGTH_ALPHABET_SIZE];
    for &position in CLCIDX.iter().take(hclen) {
        cl_lengths[position] = state.reader.read_bits(3, 0)? as u8;
    }
    let code_length_table = HuffmanTable::build(&cl_lengths);

    let total = hlit + hdist;
    if total > MAX_DESCRIPTOR_ENTRIES {
        return Err(DataError::TreeDescriptorOverflow);
    }
    let mut lengths = [0u8; MAX_DESCRIPTOR_ENTRIES];
    let mut i = 0;
    while i < total {
        let symbol = code_length_table.decode_symbol(&mut state.reader)?;
        match symbol {
            0..=15 => {
                lengths[i] = symbol as u8;
                i += 1;
            }
            16 => {
                if i == 0 {
                    return Err(DataError::UndefinedPreviousLength);
                }
                let repeat = 3 + state.reader.read_bits(2, 0)? as usize;
                let prev = lengths[i - 1];
                if i + repeat > total {
                    return Err(DataError::TreeDescriptorOverflow);
                }
                lengths[i..i + repeat].fill(prev);
                i += repeat;
            }
            17 => {
                let repeat = 3 + state.reader.read_bits(3, 0)? as usize;
                if i + repeat > total {
                    return Err(DataError::TreeDescriptorOverflow);
                }
                i += repeat;
            }
            18 => {
                let repeat = 11 + state.reader.read_bits(7, 0)? as usize;
                if i + repeat > total {
                    return Err(DataError::TreeDescriptorOverflow);
                }
                i += repeat;
            }
            _ => return Err(DataError::MalformedHuffmanCode),
        }
    }

    state.lt = HuffmanTable::build(&lengths[..hlit]);
    state.dt = HuffmanTable::build(&lengths[hlit..total]);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_block_length_mismatch_is_rejected() {
        // BFINAL=1, BTYPE=0, LEN=5, NLEN=0x0000 (should be 0xFFFA)
        let data = [0x01, 0x05, 0x00, 0x00, 0x00, b'H', b'e', b'l', b'l', b'o'];
        let mut out = [0u8; 16];
        let mut state = DecoderState::new(&data, &mut out);
        let (_, btype) = read_block_header(&mut state).unwrap();
        assert_eq!(btype, BTYPE_STORED);
        assert_eq!(
            decode_stored_block(&mut state),
            Err(DataError::StoredLengthMismatch)
        );
    }

    #[test]
    fn stored_block_copies_payload() {
        // BFINAL=1, BTYPE=0, LEN=5, NLEN=0xFFFA, "Hello"
        let data = [0x01, 0x05, 0x00, 0xFA, 0xFF, b'H', b'e', b'l', b'l', b'o'];
        let mut out = [0u8; 16];
        let mut state = DecoderState::new(&data, &mut out);
        let (bfinal, btype) = read_block_header(&mut state).unwrap();
        assert!(bfinal);
        assert_eq!(btype, BTYPE_STORED);
        decode_stored_block(&mut state).unwrap();
        assert_eq!(state.into_written(), b"Hello");
    }
}

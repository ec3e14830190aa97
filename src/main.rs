use inflate_core::inflate;

/// A raw DEFLATE stream encoding "Hello, DEFLATE world!" as a single
/// stored (uncompressed) block. Embedded here purely to give the binary
/// something to decode; see `tests/inflate_test.rs` for streams that
/// actually exercise fixed- and dynamic-Huffman blocks.
const DATA_COMPRESSED: &[u8] = &[
    0x01, 0x15, 0x00, 0xea, 0xff, b'H', b'e', b'l', b'l', b'o', b',', b' ', b'D', b'E', b'F',
    b'L', b'A', b'T', b'E', b' ', b'w', b'o', b'r', b'l', b'd', b'!',
];

const DECOMPRESSED_LEN: usize = 21;

fn main() {
    env_logger::init();
    let mut dest = [0u8; DECOMPRESSED_LEN];
    let data = inflate(DATA_COMPRESSED, &mut dest).expect("embedded payload is valid DEFLATE");
    println!("{}", String::from_utf8_lossy(data));
    println!("Data: \n{}", display_data(data));
}

/// Display the data in hex format.
fn display_data(data: &[u8]) -> String {
    let mut result = String::new();

    for (i, chunk) in data.chunks(16).enumerate() {
        result.push_str(&format!("{:08x}: ", i * 16));

        for byte in chunk {
            result.push_str(&format!("{:02x} ", byte));
        }

        for _ in 0..(16 - chunk.len()) {
            result.push_str("   ");
        }

        result.push_str(" |");
        for byte in chunk {
            if byte.is_ascii_graphic() {
                result.push(*byte as char);
            } else {
                result.push('.');
            }
        }
        result.push_str("|\n");
    }

    result
}

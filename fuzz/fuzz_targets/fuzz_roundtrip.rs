#![no_main]

use huffpack::{compress, decode_only, decompress, encode_only};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Limit data size to avoid slowdowns
    let data = if data.len() > 64 * 1024 { &data[..64 * 1024] } else { data };

    let (packed, ring) = compress(data).expect("non-empty input must compress");
    let restored = decompress(&packed, &ring).expect("own output must decompress");
    assert_eq!(restored, data, "Round-trip mismatch");

    let (bits, ring) = encode_only(data).expect("non-empty input must encode");
    assert_eq!(decode_only(&bits, &ring).expect("own bits must decode"), data);
});

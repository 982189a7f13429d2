#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn bmp8(width: i32, height: i32, palette: bool, pixels: &[u8]) -> Vec<u8> {
    let stride = (width.unsigned_abs() as usize + 3) & !3;
    let rows = height.unsigned_abs() as usize;
    let offset = 54 + if palette { 1024 } else { 0 };
    let mut out = vec![0u8; offset];
    out[0] = b'B'; out[1] = b'M';
    out[2..6].copy_from_slice(&((offset + stride * rows) as u32).to_le_bytes()); // file size
    out[10..14].copy_from_slice(&(offset as u32).to_le_bytes()); // data offset
    out[14..18].copy_from_slice(&40u32.to_le_bytes()); // info header size
    out[18..22].copy_from_slice(&width.to_le_bytes());
    out[22..26].copy_from_slice(&height.to_le_bytes());
    out[26..28].copy_from_slice(&1u16.to_le_bytes()); // planes
    out[28..30].copy_from_slice(&8u16.to_le_bytes()); // bpp
    if palette {
        for i in 0..256usize {
            out[54 + i * 4..54 + i * 4 + 3].fill(i as u8);
        }
    }
    for row in pixels.chunks(width.unsigned_abs() as usize) {
        out.extend_from_slice(row);
        out.resize(out.len() + stride - row.len(), 0);
    }
    out
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_decode";
    fs::create_dir_all(dir).unwrap();

    // Palette 3x2 bottom-up (padded rows)
    fs::write(format!("{dir}/pal_3x2.bmp"), bmp8(3, 2, true, &[0, 64, 128, 192, 255, 100])).unwrap();

    // Direct 4x2 top-down
    fs::write(format!("{dir}/direct_4x2_topdown.bmp"), bmp8(4, -2, false, &[1, 2, 3, 4, 5, 6, 7, 8])).unwrap();

    // RAW 8x8 gradient
    let raw: Vec<u8> = (0..64u8).map(|i| i * 4).collect();
    fs::write(format!("{dir}/gradient_8x8.raw"), raw).unwrap();

    // Truncated/malformed seeds for edge coverage
    fs::write(format!("{dir}/empty.bin"), b"").unwrap();
    fs::write(format!("{dir}/bm_short.bin"), b"BM\x00\x00").unwrap();
    let mut bad_depth = bmp8(1, 1, false, &[9]);
    bad_depth[28] = 24;
    fs::write(format!("{dir}/bmp_24bit.bin"), bad_depth).unwrap();

    println!("Generated seed corpus in {dir}/");
}

#![no_main]
use libfuzzer_sys::fuzz_target;
use grayraster::bmp::{BmpLayout, RowOrder, encode_gray8};
use grayraster::*;

fuzz_target!(|data: &[u8]| {
    // First byte picks the width; the rest are samples
    let Some((&w, pixels)) = data.split_first() else {
        return;
    };
    let w = u32::from(w.max(1));
    let h = pixels.len() as u32 / w;
    let Ok(src) = decode_raw(pixels, w, h) else {
        return;
    };

    for layout in [BmpLayout::Palette, BmpLayout::Direct] {
        for order in [RowOrder::BottomUp, RowOrder::TopDown] {
            let encoded = encode_gray8(&src, layout, order, enough::Unstoppable)
                .expect("encode failed");
            let decoded = decode_bmp(&encoded, w, h).expect("re-encoded data failed to decode");
            assert_eq!(decoded, src, "roundtrip pixel mismatch");
        }
    }

    // Same-size nearest resize is the identity
    let same = resample::resize_nearest(&src, w, h).expect("resize failed");
    assert_eq!(same, src);
});

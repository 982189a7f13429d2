#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must never panic, whatever the header claims
    let _ = grayraster::bmp::BmpHeaders::parse(data);
    for (w, h) in [(1, 1), (3, 5), (8, 8), (64, 64)] {
        let _ = grayraster::decode_bmp(data, w, h);
        let _ = grayraster::decode_raw(data, w, h);
    }

    // Decode at whatever geometry the header declares
    if let Ok(headers) = grayraster::bmp::BmpHeaders::parse(data) {
        let (w, h) = headers.dimensions();
        if let Ok(w) = u32::try_from(w) {
            let limits = grayraster::Limits {
                max_pixels: Some(1 << 20),
                ..Default::default()
            };
            let _ = grayraster::DecodeRequest::bmp(data, w, h)
                .with_limits(&limits)
                .decode(enough::Unstoppable);
        }
    }
});

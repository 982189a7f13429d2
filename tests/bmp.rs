use grayraster::bmp::{self, BmpHeaders, BmpLayout, RowOrder};
use grayraster::*;

/// Refuses every check.
struct Cancelled;

impl Stop for Cancelled {
    fn check(&self) -> Result<(), StopReason> {
        Err(StopReason::Cancelled)
    }
}

fn noise(w: u32, h: u32) -> Raster {
    let mut state: u32 = 0xDEAD_BEEF;
    Raster::from_fn(w, h, |_, _| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state as u8
    })
    .unwrap()
}

fn encode(r: &Raster, layout: BmpLayout, order: RowOrder) -> Vec<u8> {
    bmp::encode_gray8(r, layout, order, Unstoppable).unwrap()
}

/// Hand-assembled 8-bit BMP with an explicit palette and pre-padded rows.
fn handmade(width: i32, height: i32, palette: &[[u8; 4]], rows: &[&[u8]]) -> Vec<u8> {
    let offset = 54 + palette.len() * 4;
    let data_len: usize = rows.iter().map(|r| r.len()).sum();
    let mut out = Vec::new();
    out.extend_from_slice(b"BM");
    out.extend_from_slice(&((offset + data_len) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 4]);
    out.extend_from_slice(&(offset as u32).to_le_bytes());
    out.extend_from_slice(&40u32.to_le_bytes());
    out.extend_from_slice(&width.to_le_bytes());
    out.extend_from_slice(&height.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&8u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&(data_len as u32).to_le_bytes());
    out.extend_from_slice(&[0; 8]);
    let used = if palette.len() == 256 { 0 } else { palette.len() as u32 };
    out.extend_from_slice(&used.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    for entry in palette {
        out.extend_from_slice(entry);
    }
    for row in rows {
        out.extend_from_slice(row);
    }
    out
}

fn assert_blank(f: &Failure, w: u32, h: u32) {
    let blank = f.blank().expect("blank raster");
    assert_eq!(blank.dimensions(), (w, h));
    assert!(blank.pixels().iter().all(|&v| v == 0));
}

// ── Round trips ──────────────────────────────────────────────────────

#[test]
fn identity_palette_reproduces_indices() {
    let src = noise(16, 12);
    let encoded = encode(&src, BmpLayout::Palette, RowOrder::BottomUp);
    assert_eq!(&encoded[0..2], b"BM");
    assert_eq!(u32::from_le_bytes(encoded[10..14].try_into().unwrap()), 1078);
    let decoded = decode_bmp(&encoded, 16, 12).unwrap();
    assert_eq!(decoded, src);
}

#[test]
fn padded_widths_roundtrip_in_every_layout() {
    for (w, h) in [(1, 1), (3, 2), (5, 7), (13, 4)] {
        let src = noise(w, h);
        for layout in [BmpLayout::Palette, BmpLayout::Direct] {
            for order in [RowOrder::BottomUp, RowOrder::TopDown] {
                let encoded = encode(&src, layout, order);
                let decoded = decode_bmp(&encoded, w, h)
                    .unwrap_or_else(|e| panic!("{w}x{h} {layout:?} {order:?}: {e}"));
                assert_eq!(decoded, src, "{w}x{h} {layout:?} {order:?}");
            }
        }
    }
}

// ── Layout and orientation ───────────────────────────────────────────

#[test]
fn bottom_up_rows_are_flipped() {
    let gray: Vec<[u8; 4]> = (0..=255u8).map(|i| [i, i, i, 0]).collect();
    // 2x2, stored bottom row first, each row padded to 4 bytes
    let data = handmade(2, 2, &gray, &[&[30, 40, 0, 0], &[10, 20, 0, 0]]);
    let r = decode_bmp(&data, 2, 2).unwrap();
    assert_eq!(r.pixels(), &[10, 20, 30, 40]);
}

#[test]
fn negative_height_is_top_down() {
    let gray: Vec<[u8; 4]> = (0..=255u8).map(|i| [i, i, i, 0]).collect();
    let data = handmade(2, -2, &gray, &[&[10, 20, 0, 0], &[30, 40, 0, 0]]);
    let r = decode_bmp(&data, 2, 2).unwrap();
    assert_eq!(r.pixels(), &[10, 20, 30, 40]);
}

#[test]
fn palette_gray_is_truncating_mean() {
    let mut palette: Vec<[u8; 4]> = (0..=255u8).map(|i| [i, i, i, 0]).collect();
    palette[7] = [1, 1, 2, 0]; // 4 / 3 = 1
    palette[8] = [255, 0, 0, 0]; // 255 / 3 = 85
    palette[9] = [200, 201, 200, 99]; // 601 / 3 = 200, reserved ignored
    let data = handmade(3, 1, &palette, &[&[7, 8, 9, 0]]);
    let r = decode_bmp(&data, 3, 1).unwrap();
    assert_eq!(r.pixels(), &[1, 85, 200]);
}

#[test]
fn short_palette_from_colors_used() {
    let palette = [[0, 0, 0, 0], [90, 90, 90, 0]];
    let data = handmade(4, 1, &palette, &[&[1, 0, 1, 5]]);
    let headers = BmpHeaders::parse(&data).unwrap();
    assert_eq!(headers.palette_len(), 2);
    assert_eq!(headers.layout(), BmpLayout::Palette);
    let r = decode_bmp(&data, 4, 1).unwrap();
    // index 5 is past the palette
    assert_eq!(r.pixels(), &[90, 0, 90, 0]);
}

#[test]
fn full_table_ignores_small_colors_used() {
    let gray: Vec<[u8; 4]> = (0..=255u8).map(|i| [i, i, i, 0]).collect();
    let mut data = handmade(4, 1, &gray, &[&[10, 20, 30, 40]]);
    data[46..50].copy_from_slice(&2u32.to_le_bytes());
    assert_eq!(u32::from_le_bytes(data[10..14].try_into().unwrap()), 1078);
    assert_eq!(BmpHeaders::parse(&data).unwrap().palette_len(), 256);
    let r = decode_bmp(&data, 4, 1).unwrap();
    assert_eq!(r.pixels(), &[10, 20, 30, 40]);
}

#[test]
fn probe_reports_layout_and_order() {
    let src = noise(8, 3);
    let direct = encode(&src, BmpLayout::Direct, RowOrder::TopDown);
    let headers = BmpHeaders::parse(&direct).unwrap();
    assert_eq!(headers.layout(), BmpLayout::Direct);
    assert_eq!(headers.row_order(), RowOrder::TopDown);
    assert_eq!(headers.dimensions(), (8, 3));
    assert_eq!(headers.info.height, -3);

    let paletted = encode(&src, BmpLayout::Palette, RowOrder::BottomUp);
    let headers = BmpHeaders::parse(&paletted).unwrap();
    assert_eq!(headers.layout(), BmpLayout::Palette);
    let palette = headers.read_palette(&paletted).unwrap();
    assert_eq!(palette.len(), 256);
    assert_eq!(palette[200], bmp::PaletteEntry::gray(200));
}

// ── Failures ─────────────────────────────────────────────────────────

#[test]
fn wrong_bit_depth_is_format_mismatch_with_blank() {
    let mut data = encode(&noise(4, 4), BmpLayout::Palette, RowOrder::BottomUp);
    data[28..30].copy_from_slice(&24u16.to_le_bytes());
    let f = decode_bmp(&data, 4, 4).unwrap_err();
    assert!(matches!(f.error(), RasterError::FormatMismatch(_)), "{f}");
    assert_blank(&f, 4, 4);
}

#[test]
fn bit_depth_is_checked_before_geometry() {
    let mut data = encode(&noise(4, 4), BmpLayout::Palette, RowOrder::BottomUp);
    data[28..30].copy_from_slice(&24u16.to_le_bytes());
    let f = decode_bmp(&data, 8, 8).unwrap_err();
    match f.error() {
        RasterError::FormatMismatch(msg) => assert!(msg.contains("bit count"), "{msg}"),
        other => panic!("expected FormatMismatch, got {other:?}"),
    }
}

#[test]
fn geometry_mismatch_is_not_cropped() {
    let data = encode(&noise(8, 8), BmpLayout::Palette, RowOrder::BottomUp);
    for (w, h) in [(4, 8), (8, 4), (16, 16)] {
        let f = decode_bmp(&data, w, h).unwrap_err();
        assert!(matches!(f.error(), RasterError::FormatMismatch(_)));
        assert_blank(&f, w, h);
    }
}

#[test]
fn negative_width_is_mismatch() {
    let gray: Vec<[u8; 4]> = (0..=255u8).map(|i| [i, i, i, 0]).collect();
    let data = handmade(-2, 1, &gray, &[&[1, 2, 0, 0]]);
    let f = decode_bmp(&data, 2, 1).unwrap_err();
    assert!(matches!(f.error(), RasterError::FormatMismatch(_)));
}

#[test]
fn compressed_is_format_mismatch() {
    let mut data = encode(&noise(4, 4), BmpLayout::Palette, RowOrder::BottomUp);
    data[30..34].copy_from_slice(&1u32.to_le_bytes());
    let f = decode_bmp(&data, 4, 4).unwrap_err();
    assert!(matches!(f.error(), RasterError::FormatMismatch(_)));
}

#[test]
fn bad_magic_is_format_mismatch() {
    let mut data = encode(&noise(4, 4), BmpLayout::Direct, RowOrder::BottomUp);
    data[0] = b'X';
    let f = decode_bmp(&data, 4, 4).unwrap_err();
    assert!(matches!(f.error(), RasterError::FormatMismatch(_)));
}

#[test]
fn missing_rows_are_truncated_data() {
    let data = encode(&noise(5, 6), BmpLayout::Palette, RowOrder::BottomUp);
    let cut = &data[..data.len() - 9];
    let f = decode_bmp(cut, 5, 6).unwrap_err();
    assert!(matches!(f.error(), RasterError::TruncatedData { .. }), "{f}");
    assert_blank(&f, 5, 6);
}

#[test]
fn final_row_padding_may_be_missing() {
    let src = noise(5, 2);
    let data = encode(&src, BmpLayout::Direct, RowOrder::TopDown);
    let cut = &data[..data.len() - 3];
    assert_eq!(decode_bmp(cut, 5, 2).unwrap(), src);
}

#[test]
fn truncated_header_is_truncated_data() {
    let f = decode_bmp(b"BM\x00\x00\x00", 4, 4).unwrap_err();
    assert!(matches!(f.error(), RasterError::TruncatedData { .. }));
    assert_blank(&f, 4, 4);
}

#[test]
fn limits_reject_before_decoding() {
    let data = encode(&noise(8, 8), BmpLayout::Palette, RowOrder::BottomUp);
    let limits = Limits {
        max_pixels: Some(32),
        ..Default::default()
    };
    let f = DecodeRequest::bmp(&data, 8, 8)
        .with_limits(&limits)
        .decode(Unstoppable)
        .unwrap_err();
    match f.into_error() {
        RasterError::LimitExceeded(_) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn cancelled_decode_yields_blank() {
    let data = encode(&noise(8, 8), BmpLayout::Palette, RowOrder::BottomUp);
    let f = DecodeRequest::bmp(&data, 8, 8)
        .decode(Cancelled)
        .unwrap_err();
    assert!(matches!(f.error(), RasterError::Cancelled(_)), "{f}");
    assert_blank(&f, 8, 8);
}

#[test]
fn read_file_uses_extension() {
    let dir = tempfile::tempdir().unwrap();
    let src = noise(6, 5);
    let path = dir.path().join("boat.bmp");
    std::fs::write(&path, encode(&src, BmpLayout::Palette, RowOrder::BottomUp)).unwrap();
    assert_eq!(read_file(&path, 6, 5).unwrap(), src);
}

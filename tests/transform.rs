use grayraster::transform::{self, PointTransform};
use grayraster::*;

fn every_level() -> Raster {
    Raster::from_fn(16, 16, |x, y| (y * 16 + x) as u8).unwrap()
}

#[test]
fn negative_is_an_involution() {
    let src = every_level();
    let once = transform::negative(&src);
    assert_eq!(once.get(10, 0), Some(245));
    assert_eq!(once.get(0, 0), Some(255));
    assert_eq!(transform::negative(&once), src);
}

#[test]
fn gamma_one_is_identity() {
    let src = every_level();
    assert_eq!(transform::gamma(&src, 1.0).unwrap(), src);
}

#[test]
fn gamma_half_brightens() {
    let src = Raster::new(vec![0, 64, 128, 255], 4, 1).unwrap();
    let out = transform::gamma(&src, 0.5).unwrap();
    assert_eq!(out.pixels(), &[0, 127, 180, 255]);
}

#[test]
fn gamma_above_one_darkens() {
    let src = Raster::new(vec![128], 1, 1).unwrap();
    let out = transform::gamma(&src, 2.2).unwrap();
    assert_eq!(out.pixels(), &[55]);
}

#[test]
fn log_of_black_is_black() {
    let src = Raster::zeroed(7, 5).unwrap();
    assert_eq!(transform::log(&src), src);
}

#[test]
fn log_is_monotonic_and_lifts_shadows() {
    let out = transform::log(&every_level());
    assert!(out.pixels().windows(2).all(|p| p[0] <= p[1]));
    assert_eq!(out.get(1, 0), Some(31));
}

#[test]
fn apply_matches_free_functions() {
    let src = every_level();
    assert_eq!(
        PointTransform::Negative.apply(&src).unwrap(),
        transform::negative(&src)
    );
    assert_eq!(PointTransform::Log.apply(&src).unwrap(), transform::log(&src));
}

#[test]
fn source_is_left_untouched() {
    let src = every_level();
    let copy = src.clone();
    let _ = transform::negative(&src);
    let _ = transform::gamma(&src, 0.3).unwrap();
    assert_eq!(src, copy);
}

#[test]
fn non_positive_gamma_fails_with_blank() {
    let src = every_level();
    let f = transform::gamma(&src, 0.0).unwrap_err();
    assert!(matches!(f.error(), RasterError::InvalidParameter(_)));
    let blank = f.blank().unwrap();
    assert_eq!(blank.dimensions(), src.dimensions());
    assert!(blank.pixels().iter().all(|&v| v == 0));
}

#[test]
fn rounding_is_opt_in() {
    let src = Raster::new(vec![128], 1, 1).unwrap();
    let t = PointTransform::Gamma(0.5);
    assert_eq!(t.apply(&src).unwrap().pixels(), &[180]);
    assert_eq!(
        t.apply_with(&src, ByteConversion::Round).unwrap().pixels(),
        &[181]
    );
}

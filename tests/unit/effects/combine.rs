use super::*;

fn one(combine: Combine, format: PixelFormat, sample: PatternSample, src: &[u8]) -> Vec<u8> {
    let mut dst = vec![0xAAu8; src.len()];
    combine_pixel(combine, format, sample, src, &mut dst);
    dst
}

#[test]
fn luma_endpoints_and_weights() {
    assert_eq!(luma(0, 0, 0), 0);
    assert_eq!(luma(255, 255, 255), 255);
    assert!(luma(0, 255, 0) > luma(255, 0, 0));
    assert!(luma(255, 0, 0) > luma(0, 0, 255));
}

#[test]
fn replace_writes_black_or_white_and_keeps_alpha() {
    let src = [10u8, 20, 30, 77];
    assert_eq!(
        one(Combine::Replace, PixelFormat::Rgba8, PatternSample::On, &src),
        vec![255, 255, 255, 77]
    );
    assert_eq!(
        one(Combine::Replace, PixelFormat::Bgra8, PatternSample::Off, &src),
        vec![0, 0, 0, 77]
    );
    assert_eq!(
        one(Combine::Replace, PixelFormat::Gray8, PatternSample::On, &[3u8]),
        vec![255]
    );
}

#[test]
fn invert_keeps_on_and_inverts_off() {
    let src = [10u8, 20, 30, 200];
    assert_eq!(
        one(Combine::Invert, PixelFormat::Rgba8, PatternSample::On, &src),
        src.to_vec()
    );
    assert_eq!(
        one(Combine::Invert, PixelFormat::Rgba8, PatternSample::Off, &src),
        vec![245, 235, 225, 200]
    );
    assert_eq!(
        one(Combine::Invert, PixelFormat::Gray8, PatternSample::Off, &[5u8]),
        vec![250]
    );
}

#[test]
fn luma_xor_flips_on_bright_sources() {
    let dark = [0u8, 0, 0];
    let bright = [255u8, 255, 255];
    let f = PixelFormat::Rgb8;
    assert_eq!(one(Combine::LumaXor, f, PatternSample::On, &dark), vec![255; 3]);
    assert_eq!(one(Combine::LumaXor, f, PatternSample::On, &bright), vec![0; 3]);
    assert_eq!(one(Combine::LumaXor, f, PatternSample::Off, &bright), vec![255; 3]);
    assert_eq!(one(Combine::LumaXor, f, PatternSample::Off, &dark), vec![0; 3]);
}

#[test]
fn row_pass_applies_phase_and_threshold() {
    let pass = RowPass {
        combine: Combine::Replace,
        format: PixelFormat::Gray8,
        phase: Phase::new(10),
        threshold: 100,
    };
    let table = [0u8, 89, 90, 250];
    let src = [7u8; 4];
    let mut dst = [0u8; 4];
    pass.run(&table, &src, &mut dst);
    // 10, 99 -> off; 100 -> on; 260 wraps to 4 -> off.
    assert_eq!(dst, [0, 0, 255, 0]);
}

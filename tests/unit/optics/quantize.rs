use super::*;

fn phases() -> impl Iterator<Item = Phase> {
    [0i64, 1, 100, 255].into_iter().map(Phase::new)
}

#[test]
fn minimum_threshold_saturates_on() {
    for phase in phases() {
        for v in 0..=255u8 {
            assert_eq!(quantize(v, phase, THRESHOLD_MIN), PatternSample::On);
        }
    }
}

#[test]
fn maximum_threshold_saturates_off() {
    for phase in phases() {
        for v in 0..=255u8 {
            assert_eq!(quantize(v, phase, THRESHOLD_MAX), PatternSample::Off);
        }
    }
}

#[test]
fn out_of_domain_thresholds_match_nearest_bound() {
    for phase in phases() {
        for v in [0u8, 1, 127, 128, 254, 255] {
            for low in [-1, -500, i32::MIN] {
                assert_eq!(quantize(v, phase, low), quantize(v, phase, THRESHOLD_MIN));
            }
            for high in [257, 10_000, i32::MAX] {
                assert_eq!(quantize(v, phase, high), quantize(v, phase, THRESHOLD_MAX));
            }
        }
    }
}

#[test]
fn phase_shifts_modulo_period() {
    // 200 + 100 wraps to 44, which is below 128.
    assert_eq!(quantize(200, Phase::new(100), 128), PatternSample::Off);
    assert_eq!(quantize(200, Phase::ZERO, 128), PatternSample::On);
    assert_eq!(quantize(27, Phase::new(100), 128), PatternSample::Off);
    assert_eq!(quantize(28, Phase::new(100), 128), PatternSample::On);
}

#[test]
fn mid_threshold_splits_the_domain_in_half() {
    let on = (0..=255u8)
        .filter(|&v| quantize(v, Phase::ZERO, 128).is_on())
        .count();
    assert_eq!(on, 128);
}

#[test]
fn clamp_threshold_bounds() {
    assert_eq!(clamp_threshold(-3), 0);
    assert_eq!(clamp_threshold(77), 77);
    assert_eq!(clamp_threshold(999), 256);
}

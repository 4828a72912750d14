use super::*;

#[test]
fn new_reduces_into_period() {
    assert_eq!(Phase::new(0).value(), 0);
    assert_eq!(Phase::new(256).value(), 0);
    assert_eq!(Phase::new(257).value(), 1);
    assert_eq!(Phase::new(-1).value(), 255);
    assert_eq!(Phase::new(i64::MIN).value(), 0);
}

#[test]
fn advance_wraps_in_both_directions() {
    assert_eq!(Phase::new(250).advance(10).value(), 4);
    assert_eq!(Phase::new(3).advance(-5).value(), 254);
    assert_eq!(advance(Phase::ZERO, i32::MIN).value(), 0);
    assert_eq!(advance(Phase::ZERO, i32::MAX).value(), 255);
}

#[test]
fn full_period_of_advances_returns_to_start() {
    for speed in [-300, -17, -1, 0, 1, 3, 16, 128, 255, 1000] {
        for start in [0i64, 1, 77, 255] {
            let start = Phase::new(start);
            let mut p = start;
            for _ in 0..PATTERN_PERIOD {
                p = advance(p, speed);
                assert!(p.value() < PATTERN_PERIOD);
            }
            assert_eq!(p, start, "speed {speed}");
        }
    }
}

#[test]
fn zero_speed_never_moves() {
    let p = Phase::new(42);
    assert_eq!(p.advance(0), p);
}

use std::sync::{Arc, Mutex};

use super::*;
use crate::effects::config::{DEFAULT_SPEED_INC, DEFAULT_THRESHOLD};
use crate::foundation::core::Timestamp;
use crate::frame::video::PixelFormat;

fn gray_frame(width: u32, height: u32) -> VideoFrame {
    VideoFrame::new(width, height, PixelFormat::Gray8, Timestamp::default()).unwrap()
}

fn recorder(fx: &HypnoticElement) -> Arc<Mutex<Vec<ConfigChange>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    fx.subscribe(move |c| sink.lock().unwrap().push(*c));
    seen
}

#[test]
fn setters_notify_only_on_change() {
    let fx = HypnoticElement::new();
    let seen = recorder(&fx);

    assert!(fx.set_speed_inc(3));
    assert!(!fx.set_speed_inc(3));
    assert!(fx.set_threshold(-40));
    assert!(!fx.set_threshold(-40));
    assert!(fx.set_mode("parabola"));
    assert!(!fx.set_mode("Parabola"));

    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ConfigChange::SpeedInc(3),
            ConfigChange::Threshold(-40),
            ConfigChange::Mode(OpticMode::Parabola),
        ]
    );
}

#[test]
fn unknown_mode_keeps_previous_value_silently() {
    let fx = HypnoticElement::new();
    fx.set_optic_mode(OpticMode::Spiral2);
    let seen = recorder(&fx);

    assert!(!fx.set_mode("moire"));
    assert_eq!(fx.mode(), OpticMode::Spiral2);
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn resets_restore_defaults() {
    let fx = HypnoticElement::new();
    fx.set_mode("horizontalStripe");
    fx.set_speed_inc(-9);
    fx.set_threshold(3);

    assert!(fx.reset_mode());
    assert!(fx.reset_speed_inc());
    assert!(fx.reset_threshold());
    assert!(!fx.reset_mode());

    assert_eq!(fx.mode(), OpticMode::Spiral1);
    assert_eq!(fx.speed_inc(), DEFAULT_SPEED_INC);
    assert_eq!(fx.threshold(), DEFAULT_THRESHOLD);
    assert_eq!(fx.config(), EffectConfig::default());
}

#[test]
fn apply_params_routes_through_setters() {
    let fx = HypnoticElement::new();
    let seen = recorder(&fx);
    fx.apply_params(&serde_json::json!({
        "mode": "spiral2",
        "speedInc": 16,
        "threshold": 300,
        "unrelated": true
    }))
    .unwrap();

    assert_eq!(fx.mode(), OpticMode::Spiral2);
    assert_eq!(fx.threshold(), 300);
    // speedInc was already 16: no notification for it.
    assert_eq!(
        *seen.lock().unwrap(),
        vec![
            ConfigChange::Mode(OpticMode::Spiral2),
            ConfigChange::Threshold(300)
        ]
    );
}

#[test]
fn apply_params_type_checks_before_applying() {
    let fx = HypnoticElement::new();
    let err = fx
        .apply_params(&serde_json::json!({ "mode": "parabola", "speedInc": "fast" }))
        .unwrap_err();
    assert!(err.to_string().contains("'speedInc' must be an integer"));
    assert_eq!(fx.mode(), OpticMode::Spiral1);

    let err = fx
        .apply_params(&serde_json::json!({ "threshold": 5_000_000_000i64 }))
        .unwrap_err();
    assert!(err.to_string().contains("out of range"));

    assert!(fx.apply_params(&serde_json::json!([1, 2])).is_err());
    assert!(fx.apply_params(&serde_json::json!({ "mode": 3 })).is_err());
}

#[test]
fn apply_params_ignores_unknown_mode_value() {
    let fx = HypnoticElement::new();
    fx.apply_params(&serde_json::json!({ "mode": "tunnel", "speedInc": 2 }))
        .unwrap();
    assert_eq!(fx.mode(), OpticMode::Spiral1);
    assert_eq!(fx.speed_inc(), 2);
}

#[test]
fn phase_advances_once_per_processed_frame() {
    let fx = HypnoticElement::new();
    fx.set_speed_inc(100);
    let frame = gray_frame(4, 4);

    fx.process(&frame).unwrap();
    assert_eq!(fx.phase().value(), 100);
    fx.process(&frame).unwrap();
    assert_eq!(fx.phase().value(), 200);
    fx.process(&frame).unwrap();
    assert_eq!(fx.phase().value(), 44);

    fx.process(&gray_frame(0, 4)).unwrap();
    assert_eq!(fx.phase().value(), 44);

    let stats = fx.stats();
    assert_eq!(stats.frames_processed, 3);
    assert_eq!(stats.frames_passed_through, 1);
}

#[test]
fn table_rebuilds_only_on_geometry_or_mode_change() {
    let fx = HypnoticElement::new();
    let small = gray_frame(8, 8);
    let wide = gray_frame(16, 8);

    fx.process(&small).unwrap();
    fx.set_threshold(3);
    fx.set_speed_inc(-1);
    fx.process(&small).unwrap();
    assert_eq!(fx.stats().table_rebuilds, 1);

    fx.process(&wide).unwrap();
    assert_eq!(fx.stats().table_rebuilds, 2);

    fx.set_mode("parabola");
    fx.process(&wide).unwrap();
    assert_eq!(fx.stats().table_rebuilds, 3);

    fx.process(&small).unwrap();
    assert_eq!(fx.stats().table_rebuilds, 4);
}

#[test]
fn mode_change_is_lazy() {
    let fx = HypnoticElement::new();
    fx.set_mode("spiral2");
    fx.set_mode("parabola");
    assert_eq!(fx.stats().table_rebuilds, 0);
}

#[test]
fn zero_threads_is_rejected() {
    let err = HypnoticElement::with_opts(HypnoticOpts {
        combine: Combine::Replace,
        threading: RowThreading {
            parallel: true,
            threads: Some(0),
        },
    })
    .unwrap_err();
    assert!(err.to_string().contains("threads"));
}

#[test]
fn with_config_sets_initial_values_without_notifying() {
    let cfg = EffectConfig {
        mode: OpticMode::HorizontalStripe,
        speed_inc: 0,
        threshold: 0,
    };
    let fx = HypnoticElement::new().with_config(cfg);
    assert_eq!(fx.config(), cfg);
}

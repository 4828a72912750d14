use super::*;

#[test]
fn identifiers_round_trip() {
    for mode in OpticMode::ALL {
        assert_eq!(mode.as_str().parse::<OpticMode>().unwrap(), mode);
        assert_eq!(mode.to_string(), mode.as_str());
    }
}

#[test]
fn parsing_tolerates_case_and_separators() {
    assert_eq!(
        "HORIZONTAL_STRIPE".parse::<OpticMode>().unwrap(),
        OpticMode::HorizontalStripe
    );
    assert_eq!(
        " horizontal-stripe ".parse::<OpticMode>().unwrap(),
        OpticMode::HorizontalStripe
    );
    assert_eq!("Spiral2".parse::<OpticMode>().unwrap(), OpticMode::Spiral2);
}

#[test]
fn unknown_identifiers_are_rejected() {
    let err = "spiral3".parse::<OpticMode>().unwrap_err();
    assert!(err.to_string().contains("unknown optic mode 'spiral3'"));
    assert!("".parse::<OpticMode>().is_err());
}

#[test]
fn serde_uses_property_identifiers() {
    let json = serde_json::to_string(&OpticMode::HorizontalStripe).unwrap();
    assert_eq!(json, "\"horizontalStripe\"");
    let back: OpticMode = serde_json::from_str("\"parabola\"").unwrap();
    assert_eq!(back, OpticMode::Parabola);
    assert!(serde_json::from_str::<OpticMode>("\"zigzag\"").is_err());
}

#[test]
fn default_is_spiral1() {
    assert_eq!(OpticMode::default(), OpticMode::Spiral1);
}

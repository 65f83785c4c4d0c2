use super::*;

#[test]
fn from_parts_defaults() {
    let cfg = MeterConfig::from_parts("proximity", DEFAULT_VIEWPORT, DEFAULT_DPR).unwrap();
    assert_eq!(cfg, MeterConfig::default());
}

#[test]
fn from_parts_parses_overrides() {
    let cfg = MeterConfig::from_parts("absolute", "1920x1080", 2.0).unwrap();
    assert_eq!(cfg.policy, PolicyKind::Absolute);
    assert_eq!(cfg.viewport, (1920.0, 1080.0));
    assert_eq!(cfg.dpr, 2.0);
}

#[test]
fn from_parts_rejects_unknown_policy() {
    let err = MeterConfig::from_parts("silver", DEFAULT_VIEWPORT, 1.0).unwrap_err();
    assert!(matches!(err, ConfigError::Policy(_)));
    assert!(err.to_string().contains("silver"));
}

#[test]
fn from_parts_rejects_non_positive_dpr() {
    assert_eq!(MeterConfig::from_parts("proximity", DEFAULT_VIEWPORT, 0.0), Err(ConfigError::Dpr(0.0)));
}

#[test]
fn parse_size_accepts_separators_and_spaces() {
    assert_eq!(parse_size("800x600").unwrap(), (800.0, 600.0));
    assert_eq!(parse_size(" 800 X 600 ").unwrap(), (800.0, 600.0));
    assert_eq!(parse_size("400*300.5").unwrap(), (400.0, 300.5));
}

#[test]
fn parse_size_rejects_malformed() {
    for raw in ["800", "x600", "800x", "0x600", "-1x5", "axb", "infx1"] {
        assert_eq!(parse_size(raw), Err(ConfigError::Size(raw.to_owned())), "{raw}");
    }
}

#[test]
fn parse_point_accepts_decimals_and_negatives() {
    assert_eq!(parse_point("100,150").unwrap(), (100.0, 150.0));
    assert_eq!(parse_point("-3.5, 0.25").unwrap(), (-3.5, 0.25));
}

#[test]
fn parse_point_rejects_malformed() {
    for raw in ["100", "100;150", "a,b", "NaN,1"] {
        assert!(parse_point(raw).is_err(), "{raw}");
    }
}

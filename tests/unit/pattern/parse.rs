use super::*;

#[test]
fn linear_requires_direction() {
    let err = parse_pattern("linear", &serde_json::json!({ "droop": 0.2 })).unwrap_err();
    assert!(matches!(err, MaskError::Config(_)));
    assert!(err.to_string().contains("'direction'"));
}

#[test]
fn direction_aliases_parse() {
    assert_eq!(
        parse_pattern("linear", &serde_json::json!({ "direction": "cols", "droop": 0.25 }))
            .unwrap(),
        PatternSpec::Linear {
            direction: Direction::Column,
            droop: 0.25
        }
    );
    assert_eq!(
        parse_pattern("shutter", &serde_json::json!({ "direction": "diag" })).unwrap(),
        PatternSpec::Shutter {
            direction: Direction::Diagonal
        }
    );
    assert_eq!(
        parse_pattern("Row", &serde_json::Value::Null).unwrap(),
        PatternSpec::Linear {
            direction: Direction::Row,
            droop: 0.0
        }
    );
}

#[test]
fn unknown_direction_and_kind_are_rejected() {
    let err = parse_pattern("curtain", &serde_json::json!({ "direction": "sideways" }))
        .unwrap_err()
        .to_string();
    assert!(err.contains("unknown direction 'sideways'"));

    let err = parse_pattern("zigzag", &serde_json::Value::Null)
        .unwrap_err()
        .to_string();
    assert!(err.contains("unknown pattern kind 'zigzag'"));

    assert!(parse_pattern("  ", &serde_json::Value::Null).is_err());
}

#[test]
fn infect_requires_density() {
    let err = parse_pattern("infect", &serde_json::json!({})).unwrap_err();
    assert!(err.to_string().contains("'density'"));
    assert_eq!(
        parse_pattern("infect", &serde_json::json!({ "density": 0.1 })).unwrap(),
        PatternSpec::Infect { density: 0.1 }
    );
}

#[test]
fn spiral_defaults_and_loop_count_alias() {
    let spec = parse_pattern(
        "spiral",
        &serde_json::json!({ "loop_count": 3.0, "arm_count": 2 }),
    )
    .unwrap();
    assert_eq!(
        spec,
        PatternSpec::Spiral(SpiralParams {
            spiral_count: 3.0,
            arm_count: 2,
            ..SpiralParams::default()
        })
    );
}

#[test]
fn out_of_range_values_fail_fast() {
    assert!(
        parse_pattern("linear", &serde_json::json!({ "direction": "row", "droop": 2.0 }))
            .is_err()
    );
    assert!(parse_pattern("spiral", &serde_json::json!({ "fill_delay": 20 })).is_err());
    assert!(parse_pattern("random", &serde_json::json!({ "range": 0 })).is_err());
    assert!(parse_pattern("random", &serde_json::json!({ "range": -3 })).is_err());
    assert!(parse_pattern("infect", &serde_json::json!({ "density": "lots" })).is_err());
}

#[test]
fn params_must_be_an_object() {
    let err = parse_pattern("diamond", &serde_json::json!([1, 2]))
        .unwrap_err()
        .to_string();
    assert!(err.contains("params must be an object"));
}

#[test]
fn wrappers_parse() {
    assert_eq!(
        parse_wrapper("interlace", &serde_json::json!({ "stride": 3 })).unwrap(),
        OrderWrapper::Interlace { stride: 3 }
    );
    assert_eq!(
        parse_wrapper("Reversed", &serde_json::Value::Null).unwrap(),
        OrderWrapper::Reverse
    );
    assert_eq!(
        parse_wrapper("mirror", &serde_json::Value::Null).unwrap(),
        OrderWrapper::Mirror
    );
    assert!(
        parse_wrapper("interlace", &serde_json::json!({}))
            .unwrap_err()
            .to_string()
            .contains("'stride'")
    );
    assert!(parse_wrapper("interlace", &serde_json::json!({ "stride": 0 })).is_err());
    assert!(parse_wrapper("twist", &serde_json::Value::Null).is_err());
}

#[test]
fn keys_a_kind_does_not_read_are_rejected() {
    let err = parse_pattern("curtain", &serde_json::json!({ "direction": "row", "droop": 0.5 }))
        .unwrap_err();
    assert!(matches!(err, MaskError::Config(_)));
    assert!(err.to_string().contains("pattern 'curtain' does not take 'droop'"));

    let err = parse_pattern("diamond", &serde_json::json!({ "stride": 2 }))
        .unwrap_err()
        .to_string();
    assert!(err.contains("does not take 'stride'"), "{err}");

    let err = parse_pattern("spiral", &serde_json::json!({ "fill_dealy": 3 }))
        .unwrap_err()
        .to_string();
    assert!(err.contains("'fill_dealy'"), "{err}");

    let err = parse_wrapper("reverse", &serde_json::json!({ "stride": 2 }))
        .unwrap_err()
        .to_string();
    assert!(err.contains("wrapper 'reverse' does not take 'stride'"), "{err}");
}

#[test]
fn every_documented_key_is_accepted() {
    assert!(
        parse_pattern(
            "spiral",
            &serde_json::json!({
                "fill_delay": 3,
                "spiral_count": 2,
                "arm_count": 2,
                "angle": 0.5,
                "fill_meet": 0.5
            })
        )
        .is_ok()
    );
    assert!(parse_pattern("column", &serde_json::json!({ "droop": 0.1 })).is_ok());
    assert!(parse_pattern("shutter", &serde_json::json!({ "direction": "row" })).is_ok());
    assert!(parse_pattern("random", &serde_json::json!({ "range": 4 })).is_ok());
    assert!(parse_pattern("box", &serde_json::json!({})).is_ok());
}

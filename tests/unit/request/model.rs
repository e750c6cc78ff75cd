use serde_json::json;

use super::*;
use crate::pattern::generators::Direction;

fn request(value: serde_json::Value) -> MaskRequest {
    serde_json::from_value(value).unwrap()
}

fn basic() -> serde_json::Value {
    json!({
        "width": 64,
        "height": 32,
        "rows": 4,
        "cols": 8,
        "delay": 0.5,
        "pattern": { "kind": "linear", "params": { "direction": "row" } },
        "particle": { "shape": "circle" }
    })
}

#[test]
fn minimal_request_uses_defaults() {
    let req = request(basic());
    req.validate().unwrap();
    assert_eq!(req.seed, 0);
    assert!(req.wrappers.is_empty());
    assert!(!req.threading.parallel);
    assert_eq!(
        req.pattern_spec().unwrap(),
        PatternSpec::Linear {
            direction: Direction::Row,
            droop: 0.0
        }
    );
    assert_eq!(
        req.particle.source().unwrap(),
        ParticleSource::Shape {
            shape: ParticleShape::Circle,
            size: ParticleConfig::DEFAULT_SHAPE_SIZE
        }
    );
}

#[test]
fn wrappers_parse_in_order() {
    let mut v = basic();
    v["wrappers"] = json!([
        { "kind": "interlace", "params": { "stride": 3 } },
        { "kind": "reversed" },
        { "kind": "mirror" }
    ]);
    let req = request(v);
    assert_eq!(
        req.wrapper_list().unwrap(),
        vec![
            OrderWrapper::Interlace { stride: 3 },
            OrderWrapper::Reverse,
            OrderWrapper::Mirror
        ]
    );
}

#[test]
fn bad_fields_fail_validation_with_the_key_named() {
    let cases = [
        ("delay", json!(1.5), "'delay'"),
        ("rows", json!(0), "grid"),
        ("width", json!(0), "canvas"),
        ("pattern", json!({ "kind": "curtain" }), "'direction'"),
        ("pattern", json!({ "kind": "zigzag" }), "unknown pattern kind 'zigzag'"),
        (
            "wrappers",
            json!([{ "kind": "interlace" }]),
            "'stride'",
        ),
        ("particle", json!({}), "'shape' or 'path'"),
        ("threading", json!({ "threads": 0 }), "'threading.threads'"),
    ];
    for (key, value, needle) in cases {
        let mut v = basic();
        v[key] = value;
        let err = request(v).validate().unwrap_err().to_string();
        assert!(err.contains(needle), "{key}: {err}");
    }
}

#[test]
fn unknown_particle_fields_are_rejected() {
    let mut v = basic();
    v["particle"] = json!({ "shape": "circle", "colour": "red" });
    assert!(serde_json::from_value::<MaskRequest>(v).is_err());
}

#[test]
fn particle_sources_resolve_by_extension() {
    let svg = ParticleConfig {
        path: Some("./shapes/Leaf.SVG".into()),
        ..Default::default()
    };
    assert_eq!(
        svg.source().unwrap(),
        ParticleSource::Svg {
            path: "shapes/Leaf.SVG".into(),
            max_side: ParticleConfig::DEFAULT_SVG_SIZE
        }
    );

    let png = ParticleConfig {
        path: Some("dot.png".into()),
        ..Default::default()
    };
    assert_eq!(
        png.source().unwrap(),
        ParticleSource::Raster {
            path: "dot.png".into()
        }
    );

    let sized_png = ParticleConfig {
        size: Some(12),
        ..png
    };
    assert!(sized_png.source().is_err());

    let both = ParticleConfig {
        shape: Some("square".into()),
        path: Some("dot.png".into()),
        ..Default::default()
    };
    assert!(both.source().is_err());

    let star = ParticleConfig {
        shape: Some("star".into()),
        points: Some(7),
        size: Some(30),
        ..Default::default()
    };
    assert_eq!(
        star.source().unwrap(),
        ParticleSource::Shape {
            shape: ParticleShape::Star { points: 7 },
            size: 30
        }
    );
}

#[test]
fn particle_paths_must_stay_relative() {
    assert_eq!(normalize_rel_path("a\\b/./c.png").unwrap(), "a/b/c.png");
    assert!(normalize_rel_path("/etc/passwd").is_err());
    assert!(normalize_rel_path("../up.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

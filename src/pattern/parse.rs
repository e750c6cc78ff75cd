use serde_json::{Map, Value};

use crate::{
    foundation::error::{MaskError, MaskResult},
    pattern::{
        generators::{Direction, PatternSpec},
        spiral::SpiralParams,
        wrappers::OrderWrapper,
    },
};

type Params<'a> = Option<&'a Map<String, Value>>;

/// Parses a pattern `kind` and its JSON `params` object.
pub fn parse_pattern(kind: &str, params: &Value) -> MaskResult<PatternSpec> {
    let kind = kind.trim().to_ascii_lowercase();
    if kind.is_empty() {
        return Err(MaskError::config("pattern kind must be non-empty"));
    }
    let owner = format!("pattern '{kind}'");
    let params = params_object(params, &owner)?;

    let spec = match kind.as_str() {
        "linear" | "wipe" => PatternSpec::Linear {
            direction: required_direction(params, &owner)?,
            droop: opt_f64(params, "droop", &owner)?.unwrap_or(0.0),
        },
        "row" | "column" | "diagonal" => PatternSpec::Linear {
            direction: parse_direction(&kind)?,
            droop: opt_f64(params, "droop", &owner)?.unwrap_or(0.0),
        },
        "curtain" => PatternSpec::Curtain {
            direction: required_direction(params, &owner)?,
        },
        "shutter" => PatternSpec::Shutter {
            direction: required_direction(params, &owner)?,
        },
        "diamond" => PatternSpec::Diamond,
        "box" => PatternSpec::Box,
        "spiral" => {
            let d = SpiralParams::default();
            let loops = match opt_f64(params, "spiral_count", &owner)? {
                Some(v) => Some(v),
                None => opt_f64(params, "loop_count", &owner)?,
            };
            PatternSpec::Spiral(SpiralParams {
                fill_delay: opt_f64(params, "fill_delay", &owner)?.unwrap_or(d.fill_delay),
                spiral_count: loops.unwrap_or(d.spiral_count),
                arm_count: opt_u32(params, "arm_count", &owner)?.unwrap_or(d.arm_count),
                angle: opt_f64(params, "angle", &owner)?.unwrap_or(d.angle),
                fill_meet: opt_f64(params, "fill_meet", &owner)?,
            })
        }
        "random" => PatternSpec::Random {
            range: opt_u32(params, "range", &owner)?.unwrap_or(PatternSpec::DEFAULT_RANDOM_RANGE),
        },
        "infect" => PatternSpec::Infect {
            density: opt_f64(params, "density", &owner)?
                .ok_or_else(|| MaskError::missing_key(&owner, "density"))?,
        },
        _ => {
            return Err(MaskError::config(format!(
                "unknown pattern kind '{kind}'"
            )));
        }
    };

    only_keys(params, pattern_keys(&kind), &owner)?;
    spec.validate()?;
    Ok(spec)
}

/// Parses a wrapper `kind` and its JSON `params` object.
pub fn parse_wrapper(kind: &str, params: &Value) -> MaskResult<OrderWrapper> {
    let kind = kind.trim().to_ascii_lowercase();
    let owner = format!("wrapper '{kind}'");
    let params = params_object(params, &owner)?;

    let wrapper = match kind.as_str() {
        "interlace" | "interlaced" => OrderWrapper::Interlace {
            stride: opt_u32(params, "stride", &owner)?
                .ok_or_else(|| MaskError::missing_key(&owner, "stride"))?,
        },
        "reflect" | "reflected" => OrderWrapper::Reflect,
        "reverse" | "reversed" => OrderWrapper::Reverse,
        "mirror" | "mirrored" => OrderWrapper::Mirror,
        "flip" | "flipped" => OrderWrapper::Flip,
        "" => return Err(MaskError::config("wrapper kind must be non-empty")),
        _ => {
            return Err(MaskError::config(format!(
                "unknown wrapper kind '{kind}'"
            )));
        }
    };

    let allowed: &[&str] = match wrapper {
        OrderWrapper::Interlace { .. } => &["stride"],
        _ => &[],
    };
    only_keys(params, allowed, &owner)?;
    wrapper.validate()?;
    Ok(wrapper)
}

pub fn parse_direction(s: &str) -> MaskResult<Direction> {
    match s.trim().to_ascii_lowercase().as_str() {
        "row" | "rows" => Ok(Direction::Row),
        "column" | "columns" | "col" | "cols" => Ok(Direction::Column),
        "diagonal" | "diag" => Ok(Direction::Diagonal),
        other => Err(MaskError::config(format!("unknown direction '{other}'"))),
    }
}

fn pattern_keys(kind: &str) -> &'static [&'static str] {
    match kind {
        "linear" | "wipe" => &["direction", "droop"],
        "row" | "column" | "diagonal" => &["droop"],
        "curtain" | "shutter" => &["direction"],
        "spiral" => &[
            "fill_delay",
            "spiral_count",
            "loop_count",
            "arm_count",
            "angle",
            "fill_meet",
        ],
        "random" => &["range"],
        "infect" => &["density"],
        _ => &[],
    }
}

/// Rejects keys a kind does not read, so a misspelled or misplaced
/// parameter is not silently ignored.
fn only_keys(params: Params<'_>, allowed: &[&str], owner: &str) -> MaskResult<()> {
    let Some(params) = params else {
        return Ok(());
    };
    match params.keys().find(|k| !allowed.contains(&k.as_str())) {
        Some(key) => Err(MaskError::config(format!("{owner} does not take '{key}'"))),
        None => Ok(()),
    }
}

fn params_object<'a>(params: &'a Value, owner: &str) -> MaskResult<Params<'a>> {
    if params.is_null() {
        return Ok(None);
    }
    params
        .as_object()
        .map(Some)
        .ok_or_else(|| MaskError::config(format!("{owner} params must be an object")))
}

fn required_direction(params: Params<'_>, owner: &str) -> MaskResult<Direction> {
    let value = params
        .and_then(|p| p.get("direction"))
        .ok_or_else(|| MaskError::missing_key(owner, "direction"))?;
    let s = value
        .as_str()
        .ok_or_else(|| MaskError::config(format!("{owner} 'direction' must be a string")))?;
    parse_direction(s)
}

fn opt_f64(params: Params<'_>, key: &str, owner: &str) -> MaskResult<Option<f64>> {
    match params.and_then(|p| p.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| MaskError::config(format!("{owner} '{key}' must be a number"))),
    }
}

fn opt_u32(params: Params<'_>, key: &str, owner: &str) -> MaskResult<Option<u32>> {
    match params.and_then(|p| p.get(key)) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| {
                MaskError::config(format!("{owner} '{key}' must be a non-negative integer"))
            }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/parse.rs"]
mod tests;

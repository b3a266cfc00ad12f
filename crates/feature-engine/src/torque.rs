//! Torque Normalization
//!
//! Listings quote torque as `"190Nm@ 2000rpm"`, `"22.4 kgm at 1750-2750rpm"`
//! or `"12.7@ 2,700(kgm@ rpm)"`. All of them are reduced to a single value
//! in Newton-meters; the RPM annotation is dropped.

use regex::Regex;
use std::sync::OnceLock;

/// Newton-meters per kilogram-force meter
pub const KGF_M_TO_NM: f64 = 9.80665;

const UNIT_ALTERNATIVES: &str = r"kgf\.m|kgf-m|kgm|n-m|nm";

fn leading_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(\d+(?:\.\d+)?)\s*({})?", UNIT_ALTERNATIVES))
            .expect("torque pattern is valid")
    })
}

/// A unit token, with the digit it qualifies captured when there is one
fn trailing_unit_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(&format!(r"(\d\s*)?({})", UNIT_ALTERNATIVES)).expect("unit pattern is valid")
    })
}

/// Torque unit recognized in a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TorqueUnit {
    NewtonMeter,
    KilogramForceMeter,
}

impl TorqueUnit {
    fn from_token(token: &str) -> Self {
        if token.starts_with("kg") {
            TorqueUnit::KilogramForceMeter
        } else {
            TorqueUnit::NewtonMeter
        }
    }

    fn to_newton_meters(self, value: f64) -> f64 {
        match self {
            TorqueUnit::NewtonMeter => value,
            TorqueUnit::KilogramForceMeter => value * KGF_M_TO_NM,
        }
    }
}

/// Normalize a torque string to Newton-meters.
///
/// The unit is the token right after the first number; failing that, the
/// first later unit token that does not follow a number of its own, as in
/// `"(kgm@ rpm)"`. Units attached to another figure, such as the kgm
/// equivalent in `"110(11.2 kgm)"`, are ignored. With no usable unit the
/// value is taken to be in N·m already.
pub fn normalize_torque(text: Option<&str>) -> Option<f64> {
    let cleaned = text?.to_lowercase().replace(',', "");

    let caps = leading_pattern().captures(&cleaned)?;
    let number = caps.get(1)?;
    let value = number.as_str().parse::<f64>().ok().filter(|v| v.is_finite())?;

    let unit = match caps.get(2) {
        Some(token) => TorqueUnit::from_token(token.as_str()),
        None => trailing_unit_pattern()
            .captures_iter(&cleaned[number.end()..])
            .filter(|unit| unit.get(1).is_none())
            .find_map(|unit| unit.get(2))
            .map(|token| TorqueUnit::from_token(token.as_str()))
            .unwrap_or(TorqueUnit::NewtonMeter),
    };

    Some(unit.to_newton_meters(value))
}

//! Easing curves.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Easing curve applied to normalized tween progress.
///
/// The `Power2*` family is cubic, matching the curves of the same name in
/// common web tweening libraries. Names are matched case-insensitively when
/// deserialized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Easing {
    /// No easing.
    #[default]
    #[serde(rename = "linear")]
    Linear,
    /// Accelerates from rest.
    #[serde(rename = "power2.in")]
    Power2In,
    /// Decelerates into the target.
    #[serde(rename = "power2.out")]
    Power2Out,
    /// Accelerates, then decelerates.
    #[serde(rename = "power2.inOut")]
    Power2InOut,
}

impl Easing {
    /// Maps progress `t` in `[0, 1]` to eased progress. Out-of-range input is
    /// clamped, and the endpoints map exactly to `0.0` and `1.0`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power2In => t * t * t,
            Self::Power2Out => 1.0 - (1.0 - t).powi(3),
            Self::Power2InOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
        }
    }

    /// Returns the conventional name of the curve.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Power2In => "power2.in",
            Self::Power2Out => "power2.out",
            Self::Power2InOut => "power2.inOut",
        }
    }
}

impl fmt::Display for Easing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown easing name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown easing: {0}")]
pub struct UnknownEasing(pub String);

impl FromStr for Easing {
    type Err = UnknownEasing;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Linear, Self::Power2In, Self::Power2Out, Self::Power2InOut]
            .into_iter()
            .find(|easing| easing.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownEasing(s.to_owned()))
    }
}

impl TryFrom<String> for Easing {
    type Error = UnknownEasing;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

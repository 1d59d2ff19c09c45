use crate::geometry::Vec2;
use serde::{Deserialize, Serialize};

/// One steering decision per simulation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveType {
    Left,
    Center,
    Right,
}

/// Genotype representation for policy search
///
/// A genotype is a fixed-length sequence of moves indexed by classifier
/// cluster id: when the classifier maps a sensor sweep to cluster `k`, the
/// policy plays `genotype[k]`. The sequence is the unit being optimized by
/// an external search process; the core only scores it.
///
/// Genotypes are compared and cached element-wise, so two searches that
/// produce the same move table share one simulation run.
pub type Genotype = Vec<MoveType>;

/// Vehicle pose: position plus heading in degrees, kept in `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleState {
    pub position: Vec2,
    pub heading: f64,
}

impl VehicleState {
    pub fn new(position: Vec2, heading: f64) -> Self {
        Self {
            position,
            heading: heading.rem_euclid(360.0),
        }
    }
}

/// Player selection at startup. Human input capture lives outside the core;
/// the runner only knows scripted move sequences and genotype-backed policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerKind {
    Scripted,
    Policy,
}

impl std::str::FromStr for PlayerKind {
    type Err = crate::error::RacelineError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "scripted" => Ok(PlayerKind::Scripted),
            "policy" => Ok(PlayerKind::Policy),
            other => Err(crate::error::RacelineError::Configuration(format!(
                "Unsupported player kind '{}', expected 'scripted' or 'policy'",
                other
            ))),
        }
    }
}

use super::traits::ConfigSection;
use crate::error::RacelineError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Distance covered per transition.
    pub move_step_size: f64,
    /// Heading change in degrees for LEFT/RIGHT moves.
    pub angle_step_size: f64,
    /// Upper bound on transitions per run. The state machine alone never
    /// guarantees termination: a policy that circles forever would loop
    /// indefinitely without this.
    pub max_steps: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            move_step_size: 2.5,
            angle_step_size: 3.0,
            max_steps: 10_000,
        }
    }
}

impl ConfigSection for SimulationConfig {
    fn section_name() -> &'static str {
        "simulation"
    }

    fn validate(&self) -> Result<(), RacelineError> {
        if !(self.move_step_size > 0.0) {
            return Err(RacelineError::Configuration(
                "Move step size must be positive".to_string(),
            ));
        }
        if !(self.angle_step_size > 0.0 && self.angle_step_size < 360.0) {
            return Err(RacelineError::Configuration(
                "Angle step size must be in (0, 360)".to_string(),
            ));
        }
        if self.max_steps == 0 {
            return Err(RacelineError::Configuration(
                "Max steps must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

use super::traits::ConfigSection;
use crate::error::RacelineError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorsConfig {
    /// Ray offsets in degrees relative to the vehicle heading.
    pub offsets: Vec<i32>,
    /// Sweeps cached per structural state key before the cache is cleared.
    pub cache_capacity: usize,
    /// When set, every freshly computed sweep is appended to this file as a
    /// width-only binary record.
    pub telemetry_path: Option<PathBuf>,
}

impl Default for SensorsConfig {
    fn default() -> Self {
        Self {
            offsets: vec![0, 20, 340, 90, 270],
            cache_capacity: 4096,
            telemetry_path: None,
        }
    }
}

impl ConfigSection for SensorsConfig {
    fn section_name() -> &'static str {
        "sensors"
    }

    fn validate(&self) -> Result<(), RacelineError> {
        if self.offsets.is_empty() {
            return Err(RacelineError::Configuration(
                "At least one sensor offset is required".to_string(),
            ));
        }
        let mut seen = std::collections::HashSet::new();
        for &offset in &self.offsets {
            if !seen.insert(offset.rem_euclid(360)) {
                return Err(RacelineError::Configuration(format!(
                    "Duplicate sensor offset {}",
                    offset
                )));
            }
        }
        if self.cache_capacity == 0 {
            return Err(RacelineError::Configuration(
                "Sensor cache capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

use super::traits::ConfigSection;
use crate::error::RacelineError;
use crate::types::{MoveType, PlayerKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    pub player: PlayerKind,
    /// Move sequence for the scripted player; once exhausted it keeps
    /// driving straight.
    pub scripted_moves: Vec<MoveType>,
    /// Classifier artifact for the policy player.
    pub classifier_artifact: Option<PathBuf>,
    /// Move table for the policy player, indexed by cluster id.
    pub genotype: Vec<MoveType>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            player: PlayerKind::Scripted,
            scripted_moves: Vec::new(),
            classifier_artifact: None,
            genotype: Vec::new(),
        }
    }
}

impl ConfigSection for RunnerConfig {
    fn section_name() -> &'static str {
        "runner"
    }

    fn validate(&self) -> Result<(), RacelineError> {
        if self.player == PlayerKind::Policy {
            if self.classifier_artifact.is_none() {
                return Err(RacelineError::Configuration(
                    "Policy player requires a classifier artifact path".to_string(),
                ));
            }
            if self.genotype.is_empty() {
                return Err(RacelineError::Configuration(
                    "Policy player requires a non-empty genotype".to_string(),
                ));
            }
        }
        Ok(())
    }
}

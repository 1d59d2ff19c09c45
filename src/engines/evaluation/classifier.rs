use super::policy::ClusterModel;
use crate::error::{RacelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized classifier artifact: the canonical sensor-offset order the
/// model was trained against plus its parameters. The offsets travel with
/// the model because feature order is part of the trained contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterArtifact {
    pub offsets: Vec<i32>,
    pub centroids: Vec<Vec<f64>>,
}

impl ClusterArtifact {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(&path).map_err(|e| {
            RacelineError::Artifact(format!(
                "failed to read classifier artifact {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        let artifact: ClusterArtifact = serde_json::from_str(&contents)?;
        artifact.validate()?;
        Ok(artifact)
    }

    pub fn validate(&self) -> Result<()> {
        if self.offsets.is_empty() {
            return Err(RacelineError::Artifact(
                "artifact carries no sensor offsets".to_string(),
            ));
        }
        if self.centroids.is_empty() {
            return Err(RacelineError::Artifact(
                "artifact carries no centroids".to_string(),
            ));
        }
        if let Some(bad) = self
            .centroids
            .iter()
            .position(|c| c.len() != self.offsets.len())
        {
            return Err(RacelineError::Artifact(format!(
                "centroid {} has {} dimensions, expected {}",
                bad,
                self.centroids[bad].len(),
                self.offsets.len()
            )));
        }
        Ok(())
    }
}

/// Minimal concrete [`ClusterModel`]: cluster id of the nearest centroid by
/// squared Euclidean distance, first minimum on ties.
pub struct NearestCentroidModel {
    centroids: Vec<Vec<f64>>,
}

impl NearestCentroidModel {
    pub fn new(centroids: Vec<Vec<f64>>) -> Self {
        Self { centroids }
    }

    pub fn from_artifact(artifact: &ClusterArtifact) -> Self {
        Self::new(artifact.centroids.clone())
    }

    pub fn cluster_count(&self) -> usize {
        self.centroids.len()
    }
}

impl ClusterModel for NearestCentroidModel {
    fn predict(&self, features: &[f64]) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (i, centroid) in self.centroids.iter().enumerate() {
            let distance: f64 = centroid
                .iter()
                .zip(features)
                .map(|(c, f)| (c - f) * (c - f))
                .sum();
            if distance < best_distance {
                best = i;
                best_distance = distance;
            }
        }
        best
    }
}

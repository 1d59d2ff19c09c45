use crate::engines::simulation::SimulationState;
use crate::error::{RacelineError, Result};
use crate::sensors::SensorArray;
use crate::types::{Genotype, MoveType};
use std::sync::Arc;

/// The clustering capability the core consumes. Training and serialization
/// live outside; the contract is exactly feature vector in, cluster id out.
/// Implementations must be usable from parallel evaluation, hence the
/// `Send + Sync` bound.
pub trait ClusterModel: Send + Sync {
    fn predict(&self, features: &[f64]) -> usize;
}

/// A genotype bound to the perception stack: sensor widths in the canonical
/// order the classifier was trained against, classifier cluster id, then
/// the genotype entry at that index.
#[derive(Clone)]
pub struct Policy {
    model: Arc<dyn ClusterModel>,
    offsets: Vec<i32>,
    sensors: Arc<SensorArray>,
    genotype: Genotype,
}

impl Policy {
    pub fn genotype(&self) -> &Genotype {
        &self.genotype
    }

    pub fn decide(&self, state: &SimulationState) -> Result<MoveType> {
        let sweep = self.sensors.sweep(state)?;
        let mut features = Vec::with_capacity(self.offsets.len());
        for offset in &self.offsets {
            let reading = sweep.get(offset).ok_or_else(|| {
                RacelineError::Configuration(format!(
                    "Sensor array has no sensor at offset {}",
                    offset
                ))
            })?;
            features.push(reading.length());
        }
        let cluster = self.model.predict(&features);
        self.genotype
            .get(cluster)
            .copied()
            .ok_or(RacelineError::PolicyIndexOutOfRange {
                cluster,
                len: self.genotype.len(),
            })
    }
}

/// Shares one classifier, offset list and sensor array across every
/// genotype a batch evaluation binds.
pub struct PolicyFactory {
    model: Arc<dyn ClusterModel>,
    offsets: Vec<i32>,
    sensors: Arc<SensorArray>,
}

impl PolicyFactory {
    pub fn new(model: Arc<dyn ClusterModel>, offsets: Vec<i32>, sensors: Arc<SensorArray>) -> Self {
        Self {
            model,
            offsets,
            sensors,
        }
    }

    pub fn sensors(&self) -> &Arc<SensorArray> {
        &self.sensors
    }

    pub fn policy_for(&self, genotype: Genotype) -> Policy {
        Policy {
            model: Arc::clone(&self.model),
            offsets: self.offsets.clone(),
            sensors: Arc::clone(&self.sensors),
            genotype,
        }
    }
}

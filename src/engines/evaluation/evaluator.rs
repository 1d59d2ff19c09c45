use super::policy::PolicyFactory;
use crate::course::Course;
use crate::engines::simulation::{SimulationState, Simulator};
use crate::error::Result;
use crate::players::PolicyPlayer;
use crate::types::{Genotype, MoveType};
use rayon::prelude::*;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

const SCORE_CACHE_CAPACITY: usize = 1 << 16;

/// Scores genotypes by running each to termination on every course and
/// summing the terminal progress values. Scores are memoized element-wise
/// by genotype, so an external search re-submitting survivors across
/// generations pays for each distinct move table once.
pub struct FitnessEvaluator {
    factory: PolicyFactory,
    initial_states: Vec<SimulationState>,
    simulator: Simulator,
    score_cache: Mutex<HashMap<Genotype, f64>>,
}

impl FitnessEvaluator {
    pub fn new(factory: PolicyFactory, courses: Vec<Arc<Course>>, simulator: Simulator) -> Self {
        let initial_states = courses.into_iter().map(SimulationState::initial).collect();
        Self {
            factory,
            initial_states,
            simulator,
            score_cache: Mutex::new(HashMap::new()),
        }
    }

    /// Structural signal independent of any simulation: how many genotype
    /// entries drive straight.
    pub fn move_score(genotype: &Genotype) -> usize {
        genotype.iter().filter(|&&m| m == MoveType::Center).count()
    }

    pub fn evaluate(&self, genotype: &Genotype) -> Result<f64> {
        if let Some(&score) = self.score_cache.lock().unwrap().get(genotype) {
            return Ok(score);
        }
        let score = self.simulate(genotype)?;
        let mut cache = self.score_cache.lock().unwrap();
        if cache.len() >= SCORE_CACHE_CAPACITY {
            cache.clear();
        }
        cache.insert(genotype.clone(), score);
        Ok(score)
    }

    pub fn evaluate_genotypes(&self, genotypes: &[Genotype]) -> Result<Vec<f64>> {
        genotypes.iter().map(|g| self.evaluate(g)).collect()
    }

    /// Parallel batch path. Both the score cache and the sensor cache are
    /// mutex-synchronized, so concurrent evaluation units share them; the
    /// worst case for two workers racing on the same genotype is one
    /// redundant simulation, never a wrong score.
    pub fn par_evaluate_genotypes(&self, genotypes: &[Genotype]) -> Result<Vec<f64>> {
        genotypes.par_iter().map(|g| self.evaluate(g)).collect()
    }

    /// Scores plus per-genotype CENTER counts, for callers that want the
    /// structural signal alongside the simulated one.
    pub fn evaluate_genotypes_with_move_scores(
        &self,
        genotypes: &[Genotype],
    ) -> Result<(Vec<f64>, Vec<usize>)> {
        let scores = self.evaluate_genotypes(genotypes)?;
        let move_scores = genotypes.iter().map(Self::move_score).collect();
        Ok((scores, move_scores))
    }

    pub fn clear_cache(&self) {
        self.score_cache.lock().unwrap().clear();
    }

    fn simulate(&self, genotype: &Genotype) -> Result<f64> {
        let policy = self.factory.policy_for(genotype.clone());
        let mut score = 0.0;
        for initial in &self.initial_states {
            let mut player = PolicyPlayer::new(policy.clone());
            let outcome = self.simulator.run(initial, &mut player)?;
            score += outcome.state.progress();
        }
        Ok(score)
    }
}

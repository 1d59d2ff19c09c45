use raceline::config::SimulationConfig;
use raceline::course::{loader, Course};
use raceline::engines::evaluation::{
    ClusterModel, FitnessEvaluator, NearestCentroidModel, PolicyFactory,
};
use raceline::engines::simulation::Simulator;
use raceline::sensors::SensorArray;
use raceline::types::{Genotype, MoveType};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const CORRIDOR: &str = "\
0 0
0 100

50 0
50 100

25 0 90
0 100 50 100
";

/// Counts predictions so cache hits are observable: a memoized score must
/// not touch the classifier at all.
struct CountingModel {
    inner: NearestCentroidModel,
    calls: AtomicUsize,
}

impl CountingModel {
    fn new(inner: NearestCentroidModel) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ClusterModel for CountingModel {
    fn predict(&self, features: &[f64]) -> usize {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.predict(features)
    }
}

fn corridor() -> Arc<Course> {
    Arc::new(loader::from_str(CORRIDOR).unwrap())
}

fn evaluator_with_counter(courses: Vec<Arc<Course>>) -> (FitnessEvaluator, Arc<CountingModel>) {
    let offsets = vec![0, 90, 270];
    // One centroid: every sweep lands in cluster 0.
    let model = Arc::new(CountingModel::new(NearestCentroidModel::new(vec![vec![
        0.0, 0.0, 0.0,
    ]])));
    let sensors = Arc::new(SensorArray::new(&offsets, 4096));
    let factory = PolicyFactory::new(Arc::clone(&model) as Arc<dyn ClusterModel>, offsets, sensors);
    let evaluator = FitnessEvaluator::new(
        factory,
        courses,
        Simulator::new(SimulationConfig::default()),
    );
    (evaluator, model)
}

#[test]
fn straight_genotype_scores_the_full_corridor() {
    let (evaluator, _) = evaluator_with_counter(vec![corridor()]);
    let genotype: Genotype = vec![MoveType::Center];
    let score = evaluator.evaluate(&genotype).unwrap();
    assert!((score - 100.0).abs() < 1e-9);
}

#[test]
fn scores_sum_across_courses() {
    let (evaluator, _) = evaluator_with_counter(vec![corridor(), corridor()]);
    let genotype: Genotype = vec![MoveType::Center];
    let score = evaluator.evaluate(&genotype).unwrap();
    assert!((score - 200.0).abs() < 1e-9);
}

#[test]
fn repeated_evaluation_is_a_cache_hit() {
    let (evaluator, model) = evaluator_with_counter(vec![corridor()]);
    let genotype: Genotype = vec![MoveType::Center];

    let first = evaluator.evaluate(&genotype).unwrap();
    let calls_after_first = model.calls();
    assert!(calls_after_first > 0, "first evaluation must simulate");

    let second = evaluator.evaluate(&genotype).unwrap();
    assert_eq!(first.to_bits(), second.to_bits(), "scores must be bit-identical");
    assert_eq!(
        model.calls(),
        calls_after_first,
        "second evaluation must not re-simulate"
    );

    // A structurally equal but separately allocated genotype also hits.
    let clone: Genotype = vec![MoveType::Center];
    evaluator.evaluate(&clone).unwrap();
    assert_eq!(model.calls(), calls_after_first);
}

#[test]
fn cache_clear_forces_resimulation() {
    let (evaluator, model) = evaluator_with_counter(vec![corridor()]);
    let genotype: Genotype = vec![MoveType::Center];
    evaluator.evaluate(&genotype).unwrap();
    let calls = model.calls();

    evaluator.clear_cache();
    evaluator.evaluate(&genotype).unwrap();
    assert!(model.calls() > calls);
}

#[test]
fn move_scores_count_center_entries() {
    let genotypes: Vec<Genotype> = vec![
        vec![MoveType::Center, MoveType::Left, MoveType::Center],
        vec![MoveType::Left, MoveType::Right],
    ];
    let (evaluator, _) = evaluator_with_counter(vec![corridor()]);
    let (scores, move_scores) = evaluator
        .evaluate_genotypes_with_move_scores(&genotypes)
        .unwrap();
    assert_eq!(scores.len(), 2);
    assert_eq!(move_scores, vec![2, 0]);
}

#[test]
fn parallel_batch_matches_sequential() {
    let genotypes: Vec<Genotype> = vec![
        vec![MoveType::Center],
        vec![MoveType::Left],
        vec![MoveType::Right],
        vec![MoveType::Center, MoveType::Center],
    ];
    let (sequential_eval, _) = evaluator_with_counter(vec![corridor()]);
    let (parallel_eval, _) = evaluator_with_counter(vec![corridor()]);

    let sequential = sequential_eval.evaluate_genotypes(&genotypes).unwrap();
    let parallel = parallel_eval.par_evaluate_genotypes(&genotypes).unwrap();
    assert_eq!(sequential.len(), parallel.len());
    for (a, b) in sequential.iter().zip(&parallel) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn empty_genotype_fails_with_index_error() {
    let (evaluator, _) = evaluator_with_counter(vec![corridor()]);
    let err = evaluator.evaluate(&Vec::new()).unwrap_err();
    assert!(matches!(
        err,
        raceline::RacelineError::PolicyIndexOutOfRange { cluster: 0, len: 0 }
    ));
}

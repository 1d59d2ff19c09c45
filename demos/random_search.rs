//! Random-search demo: the batch-evaluation contract an external optimizer
//! drives. Draws random genotypes, scores them through the evaluator and
//! keeps the best, round after round.
//!
//! Usage: cargo run --example random_search [batch-size] [rounds]

use rand::Rng;
use raceline::config::SimulationConfig;
use raceline::course::loader;
use raceline::engines::evaluation::{
    ClusterModel, FitnessEvaluator, NearestCentroidModel, PolicyFactory,
};
use raceline::engines::simulation::Simulator;
use raceline::sensors::SensorArray;
use raceline::types::{Genotype, MoveType};
use std::sync::Arc;

const COURSE: &str = "\
0 0
0 80
40 120

60 0
60 60
100 100

30 0 90
40 120 100 100
";

fn random_genotype(rng: &mut impl Rng, len: usize) -> Genotype {
    (0..len)
        .map(|_| match rng.gen_range(0..3) {
            0 => MoveType::Left,
            1 => MoveType::Center,
            _ => MoveType::Right,
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let batch_size: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(32);
    let rounds: usize = args.get(2).and_then(|s| s.parse().ok()).unwrap_or(10);

    println!("=== raceline random search ===");
    println!("batch size {}, rounds {}\n", batch_size, rounds);

    let course = Arc::new(loader::from_str(COURSE)?);
    let offsets = vec![0, 20, 340, 90, 270];
    // Hand-picked centroids: roughly "open ahead", "wall near left",
    // "wall near right", "boxed in". A trained artifact would normally
    // come from telemetry; the demo only needs plausible buckets.
    let model = Arc::new(NearestCentroidModel::new(vec![
        vec![0.0, 60.0, 60.0, 30.0, 30.0],
        vec![40.0, 20.0, 60.0, 10.0, 50.0],
        vec![40.0, 60.0, 20.0, 50.0, 10.0],
        vec![15.0, 15.0, 15.0, 15.0, 15.0],
    ]));
    let genotype_len = model.cluster_count();
    let sensors = Arc::new(SensorArray::new(&offsets, 4096));
    let factory = PolicyFactory::new(
        Arc::clone(&model) as Arc<dyn ClusterModel>,
        offsets,
        sensors,
    );
    let evaluator = FitnessEvaluator::new(
        factory,
        vec![course],
        Simulator::new(SimulationConfig::default()),
    );

    let mut rng = rand::thread_rng();
    let mut best: Option<(Genotype, f64)> = None;

    for round in 0..rounds {
        let genotypes: Vec<Genotype> = (0..batch_size)
            .map(|_| random_genotype(&mut rng, genotype_len))
            .collect();
        let scores = evaluator.par_evaluate_genotypes(&genotypes)?;

        for (genotype, score) in genotypes.into_iter().zip(scores) {
            let improved = best.as_ref().map_or(true, |(_, s)| score > *s);
            if improved {
                best = Some((genotype, score));
            }
        }
        let (_, best_score) = best.as_ref().unwrap();
        println!("round {:>3}: best score {:.1}", round + 1, best_score);
    }

    if let Some((genotype, score)) = best {
        println!("\nbest genotype: {:?}", genotype);
        println!("score: {:.1}", score);
        println!(
            "center entries: {}",
            FitnessEvaluator::move_score(&genotype)
        );
    }
    Ok(())
}

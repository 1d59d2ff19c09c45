use anyhow::Context;
use raceline::config::ConfigManager;
use raceline::course::loader;
use raceline::engines::evaluation::{ClusterArtifact, NearestCentroidModel, PolicyFactory};
use raceline::engines::simulation::{SimulationState, Simulator};
use raceline::players::{LogRenderer, Player, PolicyPlayer, Renderer, ScriptedPlayer};
use raceline::sensors::{telemetry::TelemetrySink, SensorArray};
use raceline::types::PlayerKind;
use std::path::Path;
use std::sync::Arc;

const CONFIG_FILE: &str = "raceline.toml";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        anyhow::bail!("usage: raceline <course-file> <scripted|policy> [telemetry-path]");
    }
    let course_path = &args[1];
    let player_kind: PlayerKind = args[2].parse()?;

    let manager = ConfigManager::new();
    if Path::new(CONFIG_FILE).exists() {
        manager
            .load_from_file(CONFIG_FILE)
            .with_context(|| format!("loading {}", CONFIG_FILE))?;
    }
    let mut config = manager.get();
    config.runner.player = player_kind;
    if let Some(path) = args.get(3) {
        config.sensors.telemetry_path = Some(path.into());
    }
    config.validate()?;

    let course = Arc::new(loader::from_file(course_path)?);
    let simulator = Simulator::new(config.simulation.clone());
    let initial = SimulationState::initial(course);

    // In policy mode the sensor offsets come from the artifact, since
    // feature order is part of the trained contract. One shared array
    // serves both the policy and the renderer: the second sweep of a step
    // is a cache hit, and telemetry records each state once.
    let (sensors, mut player): (Arc<SensorArray>, Box<dyn Player>) = match player_kind {
        PlayerKind::Scripted => {
            let sensors = Arc::new(SensorArray::from_config(&config.sensors)?);
            let player = ScriptedPlayer::new(config.runner.scripted_moves.clone());
            (sensors, Box::new(player))
        }
        PlayerKind::Policy => {
            let artifact_path = config.runner.classifier_artifact.as_ref().ok_or_else(|| {
                raceline::RacelineError::Configuration(
                    "Policy player requires a classifier artifact path".to_string(),
                )
            })?;
            let artifact = ClusterArtifact::from_file(artifact_path)?;
            let mut array = SensorArray::new(&artifact.offsets, config.sensors.cache_capacity);
            if let Some(path) = &config.sensors.telemetry_path {
                array = array.with_telemetry(TelemetrySink::open(path)?);
            }
            let sensors = Arc::new(array);
            let model = Arc::new(NearestCentroidModel::from_artifact(&artifact));
            let factory =
                PolicyFactory::new(model, artifact.offsets.clone(), Arc::clone(&sensors));
            let player = PolicyPlayer::new(factory.policy_for(config.runner.genotype.clone()));
            (sensors, Box::new(player))
        }
    };

    let mut renderer = LogRenderer;
    let mut state = initial;
    let mut steps = 0usize;
    while !state.is_terminal() && steps < config.simulation.max_steps {
        let move_type = player.next_move(&state)?;
        state = simulator.step(&state, move_type);
        renderer.render(&state, &sensors.sweep(&state)?);
        steps += 1;
    }

    let verdict = if matches!(state, SimulationState::Won { .. }) {
        "won"
    } else if state.is_terminal() {
        "lost"
    } else {
        "cut off at step bound"
    };
    println!(
        "{} after {} steps, progress {:.1}",
        verdict,
        steps,
        state.progress()
    );
    Ok(())
}

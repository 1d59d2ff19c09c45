use raceline::config::SimulationConfig;
use raceline::course::{loader, Course};
use raceline::engines::simulation::{SimulationState, Simulator};
use raceline::geometry::{Segment, Vec2};
use raceline::players::ScriptedPlayer;
use raceline::types::{MoveType, VehicleState};
use std::sync::Arc;

const CORRIDOR: &str = "\
0 0
0 100

50 0
50 100

25 0 90
0 100 50 100
";

fn corridor() -> Arc<Course> {
    Arc::new(loader::from_str(CORRIDOR).unwrap())
}

#[test]
fn straight_corridor_run_wins_without_crashing() {
    // Left border (0,0)-(0,100), right border (50,0)-(50,100), finish at
    // y=100, start (25,0) heading 90: CENTER moves drive straight up the
    // middle and finish once the vehicle reaches the finish line.
    let simulator = Simulator::new(SimulationConfig::default());
    let initial = SimulationState::initial(corridor());
    let mut player = ScriptedPlayer::new(vec![]);

    let outcome = simulator.run(&initial, &mut player).unwrap();
    assert!(outcome.finished());
    assert!(matches!(outcome.state, SimulationState::Won { .. }));
    assert!((outcome.state.progress() - 100.0).abs() < 1e-9);
    // 40 moves to touch y=100, one more transition to report the win.
    assert_eq!(outcome.steps, 41);
}

#[test]
fn progress_after_n_center_steps_is_n_times_step_size() {
    let config = SimulationConfig::default();
    let simulator = Simulator::new(config.clone());
    let mut state = SimulationState::initial(corridor());
    for n in 1..=30 {
        state = simulator.step(&state, MoveType::Center);
        assert!(!state.is_terminal());
        assert!(
            (state.progress() - n as f64 * config.move_step_size).abs() < 1e-9,
            "progress diverged at step {}",
            n
        );
    }
}

#[test]
fn won_state_survives_further_transitions_unchanged() {
    let simulator = Simulator::new(SimulationConfig::default());
    let initial = SimulationState::initial(corridor());
    let mut player = ScriptedPlayer::new(vec![]);
    let outcome = simulator.run(&initial, &mut player).unwrap();
    let progress = outcome.state.progress();

    let mut state = outcome.state;
    for _ in 0..5 {
        state = simulator.step(&state, MoveType::Left);
        assert!(matches!(state, SimulationState::Won { .. }));
        assert_eq!(state.progress(), progress);
    }
}

#[test]
fn heading_into_a_wall_loses() {
    // Heading 0 from the center aims straight at the right wall.
    let course = Arc::new(
        Course::new(
            vec![Segment::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 100.0))],
            vec![Segment::new(Vec2::new(50.0, 0.0), Vec2::new(50.0, 100.0))],
            VehicleState::new(Vec2::new(25.0, 50.0), 0.0),
            Segment::new(Vec2::new(0.0, 100.0), Vec2::new(50.0, 100.0)),
        )
        .unwrap(),
    );
    let simulator = Simulator::new(SimulationConfig::default());
    let mut player = ScriptedPlayer::new(vec![]);
    let outcome = simulator
        .run(&SimulationState::initial(course), &mut player)
        .unwrap();
    assert!(matches!(outcome.state, SimulationState::Lost { .. }));

    let again = simulator.step(&outcome.state, MoveType::Center);
    assert!(matches!(again, SimulationState::Lost { .. }));
    assert_eq!(again.progress(), outcome.state.progress());
}

#[test]
fn step_bound_cuts_off_a_run_that_cannot_finish() {
    let config = SimulationConfig {
        max_steps: 10,
        ..Default::default()
    };
    let simulator = Simulator::new(config);
    let initial = SimulationState::initial(corridor());
    let mut player = ScriptedPlayer::new(vec![]);

    let outcome = simulator.run(&initial, &mut player).unwrap();
    assert!(!outcome.finished());
    assert_eq!(outcome.steps, 10);
    // Progress at the cutoff still scores: 10 steps of 2.5 up the corridor.
    assert!((outcome.state.progress() - 25.0).abs() < 1e-9);
}

#[test]
fn scripted_turns_change_the_outcome() {
    // Constant turning from the corridor axis curls the vehicle into a
    // wall well before the finish.
    let simulator = Simulator::new(SimulationConfig::default());
    let initial = SimulationState::initial(corridor());
    let mut player = ScriptedPlayer::new(vec![MoveType::Left; 200]);

    let outcome = simulator.run(&initial, &mut player).unwrap();
    assert!(matches!(outcome.state, SimulationState::Lost { .. }));
    assert!(outcome.state.progress() < 100.0);
}

//! Finite-state simulation of a single vehicle run.

pub mod motion;
pub mod state;

pub use state::SimulationState;

use crate::config::SimulationConfig;
use crate::error::Result;
use crate::geometry::Segment;
use crate::players::Player;
use std::sync::Arc;

/// Drives [`SimulationState`] transitions under one motion profile.
pub struct Simulator {
    config: SimulationConfig,
}

/// Where a run ended up. `state` is terminal unless the step bound cut the
/// run short; either way `state.progress()` is the score contribution.
#[derive(Debug)]
pub struct RunOutcome {
    pub state: SimulationState,
    pub steps: usize,
}

impl RunOutcome {
    pub fn finished(&self) -> bool {
        self.state.is_terminal()
    }
}

impl Simulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// One transition. Crossing detection evaluates the movement that
    /// produced the *current* pose, so a crossing caused by the move
    /// requested here is only reported on the next call. That one-frame lag
    /// is part of the scoring semantics, not an optimization.
    pub fn step(&self, state: &SimulationState, move_type: crate::types::MoveType) -> SimulationState {
        match state {
            SimulationState::Won { .. } | SimulationState::Lost { .. } => state.clone(),
            SimulationState::InProgress {
                course,
                previous,
                vehicle,
                progress,
            } => {
                let movement = Segment::new(previous.position, vehicle.position);
                if movement.intersects(course.finish_line) {
                    SimulationState::Won {
                        course: Arc::clone(course),
                        vehicle: *vehicle,
                        progress: *progress,
                    }
                } else if course.borders().any(|border| movement.intersects(*border)) {
                    SimulationState::Lost {
                        course: Arc::clone(course),
                        vehicle: *vehicle,
                        progress: *progress,
                    }
                } else {
                    let next = motion::advance(
                        *vehicle,
                        move_type,
                        self.config.move_step_size,
                        self.config.angle_step_size,
                    );
                    SimulationState::InProgress {
                        course: Arc::clone(course),
                        previous: *vehicle,
                        vehicle: next,
                        progress: course.progress_at(next.position),
                    }
                }
            }
        }
    }

    /// Step until a terminal state or the configured step bound, whichever
    /// comes first.
    pub fn run(&self, initial: &SimulationState, player: &mut dyn Player) -> Result<RunOutcome> {
        let mut state = initial.clone();
        let mut steps = 0;
        while !state.is_terminal() && steps < self.config.max_steps {
            let move_type = player.next_move(&state)?;
            state = self.step(&state, move_type);
            steps += 1;
        }
        if !state.is_terminal() {
            log::warn!(
                "run stopped at the {}-step bound with progress {:.1}",
                self.config.max_steps,
                state.progress()
            );
        }
        Ok(RunOutcome { state, steps })
    }
}

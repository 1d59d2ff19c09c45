//! Move sources and display boundaries. Human keyboard capture lives
//! outside the crate; anything that can answer "next move for this state"
//! plugs in here.

use crate::engines::evaluation::Policy;
use crate::engines::simulation::SimulationState;
use crate::error::Result;
use crate::sensors::SensorSweep;
use crate::types::MoveType;

pub trait Player {
    fn next_move(&mut self, state: &SimulationState) -> Result<MoveType>;
}

/// Plays a fixed move sequence, then keeps driving straight once the
/// script runs out -- the same default a human player produces with no key
/// pressed.
pub struct ScriptedPlayer {
    moves: Vec<MoveType>,
    cursor: usize,
}

impl ScriptedPlayer {
    pub fn new(moves: Vec<MoveType>) -> Self {
        Self { moves, cursor: 0 }
    }
}

impl Player for ScriptedPlayer {
    fn next_move(&mut self, _state: &SimulationState) -> Result<MoveType> {
        let move_type = self.moves.get(self.cursor).copied().unwrap_or(MoveType::Center);
        self.cursor += 1;
        Ok(move_type)
    }
}

/// Adapts a genotype-backed [`Policy`] to the player interface.
pub struct PolicyPlayer {
    policy: Policy,
}

impl PolicyPlayer {
    pub fn new(policy: Policy) -> Self {
        Self { policy }
    }
}

impl Player for PolicyPlayer {
    fn next_move(&mut self, state: &SimulationState) -> Result<MoveType> {
        self.policy.decide(state)
    }
}

/// Fire-and-forget display boundary: takes the state and the sensor sweep,
/// returns nothing. On-screen drawing is implemented outside the crate.
pub trait Renderer {
    fn render(&mut self, state: &SimulationState, sweep: &SensorSweep);
}

/// Headless renderer for the runner binary: one log line per frame.
pub struct LogRenderer;

impl Renderer for LogRenderer {
    fn render(&mut self, state: &SimulationState, sweep: &SensorSweep) {
        match state {
            SimulationState::Won { progress, .. } => {
                log::info!("run won, progress {:.1}", progress);
            }
            SimulationState::Lost { progress, .. } => {
                log::info!("run lost, progress {:.1}", progress);
            }
            SimulationState::InProgress {
                vehicle, progress, ..
            } => {
                let widths: Vec<String> = sweep
                    .iter()
                    .map(|(offset, reading)| format!("{}:{:.1}", offset, reading.length()))
                    .collect();
                log::debug!(
                    "pos ({:.1}, {:.1}) heading {:.0} progress {:.1} sensors [{}]",
                    vehicle.position.x,
                    vehicle.position.y,
                    vehicle.heading,
                    progress,
                    widths.join(" ")
                );
            }
        }
    }
}

use crate::course::Course;
use crate::types::VehicleState;
use std::sync::Arc;

/// Run state as a closed sum so every consumer has to handle all three
/// outcomes. `Won` and `Lost` are terminal: stepping them is the identity.
#[derive(Debug, Clone)]
pub enum SimulationState {
    InProgress {
        course: Arc<Course>,
        /// Pose before the last realized move. Crossing checks run on the
        /// segment `previous.position -> vehicle.position`.
        previous: VehicleState,
        vehicle: VehicleState,
        progress: f64,
    },
    Won {
        course: Arc<Course>,
        vehicle: VehicleState,
        progress: f64,
    },
    Lost {
        course: Arc<Course>,
        vehicle: VehicleState,
        progress: f64,
    },
}

impl SimulationState {
    /// Starting state: previous and current pose coincide, so the first
    /// crossing check sees a zero-length movement segment.
    pub fn initial(course: Arc<Course>) -> Self {
        let vehicle = course.initial_state;
        let progress = course.progress_at(vehicle.position);
        SimulationState::InProgress {
            course,
            previous: vehicle,
            vehicle,
            progress,
        }
    }

    pub fn course(&self) -> &Arc<Course> {
        match self {
            SimulationState::InProgress { course, .. }
            | SimulationState::Won { course, .. }
            | SimulationState::Lost { course, .. } => course,
        }
    }

    pub fn vehicle(&self) -> VehicleState {
        match self {
            SimulationState::InProgress { vehicle, .. }
            | SimulationState::Won { vehicle, .. }
            | SimulationState::Lost { vehicle, .. } => *vehicle,
        }
    }

    pub fn progress(&self) -> f64 {
        match self {
            SimulationState::InProgress { progress, .. }
            | SimulationState::Won { progress, .. }
            | SimulationState::Lost { progress, .. } => *progress,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, SimulationState::InProgress { .. })
    }
}

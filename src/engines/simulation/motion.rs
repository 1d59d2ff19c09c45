use crate::geometry::Vec2;
use crate::types::{MoveType, VehicleState};

/// Apply one move: LEFT/RIGHT turn first, then every move advances one
/// fixed step along the (possibly updated) heading. `VehicleState::new`
/// wraps the heading back into `[0, 360)`.
pub(crate) fn advance(
    vehicle: VehicleState,
    move_type: MoveType,
    step_size: f64,
    angle_step: f64,
) -> VehicleState {
    let heading = match move_type {
        MoveType::Center => vehicle.heading,
        MoveType::Left => vehicle.heading - angle_step,
        MoveType::Right => vehicle.heading + angle_step,
    };
    let displacement = Vec2::new(1.0, 0.0).rotated_degrees(heading) * step_size;
    VehicleState::new(vehicle.position + displacement, heading)
}

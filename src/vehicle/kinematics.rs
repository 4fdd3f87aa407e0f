/// The fixed simulation time step in s.
pub const TIME_STEP: f64 = 1.0; // s

/// Distance travelled in one time step, under constant acceleration.
///
/// Floored at zero, so a vehicle never moves backward within a step even
/// when its deceleration would analytically imply it.
pub fn displacement(vel: f64, acc: f64) -> f64 {
    let dt = TIME_STEP;
    f64::max(vel * dt + 0.5 * acc * dt.powi(2), 0.0)
}

/// Velocity after one time step, floored at zero.
pub fn next_velocity(vel: f64, acc: f64) -> f64 {
    f64::max(vel + acc * TIME_STEP, 0.0)
}

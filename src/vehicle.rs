//! Per-vehicle models: kinematics, the car-following rule and velocity jitter.

pub use acceleration::{set_accelerations, AccelerationPolicy};
pub use jitter::VelocityJitter;
pub use kinematics::{displacement, next_velocity, TIME_STEP};

mod acceleration;
mod jitter;
mod kinematics;

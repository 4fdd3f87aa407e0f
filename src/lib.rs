//! A discrete-time simulation of a single lane of one-directional traffic.
//!
//! Vehicles are points with a position, velocity and acceleration, indexed
//! from the rear of the lane to the front. Each step jitters velocities,
//! applies a simple car-following rule, integrates, and clamps any vehicle
//! that would pass the one ahead of it.

pub use collision::{consolidate_collisions, DisjointSet};
pub use data::{CollisionGroup, SimData};
pub use error::{Error, Result};
pub use params::Params;
pub use report::{summarize, RunSummary, StepSummary};
pub use simulation::{initialize, simulate, simulate_step, step_time, Simulation};
pub use state::SimState;
pub use vehicle::{
    displacement, next_velocity, set_accelerations, AccelerationPolicy, VelocityJitter, TIME_STEP,
};

mod collision;
mod data;
mod error;
mod params;
pub mod report;
mod simulation;
mod state;
pub mod vehicle;

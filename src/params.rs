//! Run parameters, supplied once per simulation.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The parameters of a simulation run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Params {
    /// The number of vehicles in the lane.
    pub num_cars: usize,
    /// The initial velocity of every vehicle in m/s.
    pub v_0: f64,
    /// The standard deviation of the per-step velocity jitter in m/s.
    pub v_jitter: f64,
    /// The velocity above which vehicles stop accelerating, in m/s.
    pub v_max: f64,
    /// The initial time-headway between consecutive vehicles in s.
    pub t_spacing_0: f64,
    /// The time-headway below which a vehicle brakes, in s.
    pub t_spacing_min: f64,
    /// The braking acceleration, a negative number in m/s<sup>2</sup>.
    pub acc_neg: f64,
    /// The throttle acceleration in m/s<sup>2</sup>.
    pub acc_pos: f64,
}

impl Default for Params {
    fn default() -> Self {
        Self {
            num_cars: 10,
            v_0: 10.0,
            v_jitter: 0.5,
            v_max: 15.0,
            t_spacing_0: 2.0,
            t_spacing_min: 1.0,
            acc_neg: -3.0,
            acc_pos: 1.0,
        }
    }
}

impl Params {
    /// Parses and validates parameters from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)?;
        params.validate()?;
        Ok(params)
    }

    /// Reads, parses and validates parameters from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Checks that the parameters describe a runnable simulation.
    pub fn validate(&self) -> Result<()> {
        if self.num_cars == 0 {
            return Err(Error::NoVehicles);
        }

        let fields = [
            ("v_0", self.v_0),
            ("v_jitter", self.v_jitter),
            ("v_max", self.v_max),
            ("t_spacing_0", self.t_spacing_0),
            ("t_spacing_min", self.t_spacing_min),
            ("acc_neg", self.acc_neg),
            ("acc_pos", self.acc_pos),
        ];
        if let Some((name, value)) = fields.into_iter().find(|(_, value)| !value.is_finite()) {
            return Err(Error::InvalidParameter { name, value });
        }

        let non_negative = [
            ("v_0", self.v_0),
            ("v_jitter", self.v_jitter),
            ("v_max", self.v_max),
            ("t_spacing_0", self.t_spacing_0),
            ("t_spacing_min", self.t_spacing_min),
        ];
        if let Some((name, value)) = non_negative.into_iter().find(|(_, value)| *value < 0.0) {
            return Err(Error::InvalidParameter { name, value });
        }

        if self.t_spacing_0 <= self.t_spacing_min {
            log::warn!(
                "initial time-headway {} s is not above the minimum {} s; vehicles will brake immediately",
                self.t_spacing_0,
                self.t_spacing_min
            );
        }

        Ok(())
    }
}

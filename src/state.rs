use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// The state of every vehicle in the lane at one instant.
///
/// Vehicles are identified only by index. Index 0 is the rearmost vehicle
/// and the last index is the leader, so after each resolved step
/// `xs[i] <= xs[i + 1]` and every velocity is non-negative.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimState {
    /// Positions in m.
    pub xs: Vec<f64>,
    /// Velocities in m/s.
    pub vs: Vec<f64>,
    /// Accelerations in m/s<sup>2</sup>.
    pub accs: Vec<f64>,
}

impl SimState {
    /// Creates a state from its three sequences, which must be of equal length.
    pub fn new(xs: Vec<f64>, vs: Vec<f64>, accs: Vec<f64>) -> Result<Self> {
        if xs.len() != vs.len() || xs.len() != accs.len() {
            return Err(Error::LengthMismatch {
                xs: xs.len(),
                vs: vs.len(),
                accs: accs.len(),
            });
        }
        Ok(Self { xs, vs, accs })
    }

    /// Creates `num_cars` evenly spaced vehicles travelling at `v_0`, such that
    /// consecutive vehicles are exactly `t_spacing_0` seconds apart.
    pub fn initial(num_cars: usize, v_0: f64, t_spacing_0: f64) -> Result<Self> {
        if num_cars == 0 {
            return Err(Error::NoVehicles);
        }
        let x_spacing = v_0 * t_spacing_0;
        Ok(Self {
            xs: (0..num_cars).map(|i| i as f64 * x_spacing).collect(),
            vs: vec![v_0; num_cars],
            accs: vec![0.0; num_cars],
        })
    }

    /// The number of vehicles.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether the lane holds no vehicles.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// The distance from vehicle `idx` to the vehicle ahead of it,
    /// or `None` for the leader.
    pub fn gap(&self, idx: usize) -> Option<f64> {
        Some(self.xs.get(idx + 1)? - self.xs[idx])
    }

    /// Returns a copy of this state with its velocities replaced.
    pub fn with_vs(&self, vs: Vec<f64>) -> Self {
        debug_assert_eq!(vs.len(), self.len());
        Self {
            vs,
            ..self.clone()
        }
    }

    /// Returns a copy of this state with its accelerations replaced.
    pub fn with_accs(&self, accs: Vec<f64>) -> Self {
        debug_assert_eq!(accs.len(), self.len());
        Self {
            accs,
            ..self.clone()
        }
    }
}

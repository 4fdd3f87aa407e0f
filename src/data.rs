use crate::{Result, SimState};
use itertools::izip;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;

/// A maximal set of vehicles, by index, that touched one another in a step.
pub type CollisionGroup = BTreeSet<usize>;

/// The recorded trajectory of a simulation run.
///
/// The four sequences are parallel, holding one entry per recorded step.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SimData {
    /// Vehicle positions at each step.
    pub xs: Vec<Vec<f64>>,
    /// Vehicle velocities at each step.
    pub vs: Vec<Vec<f64>>,
    /// Vehicle accelerations at each step.
    pub accs: Vec<Vec<f64>>,
    /// The collision groups detected in each step.
    pub collisions: Vec<Vec<CollisionGroup>>,
}

impl SimData {
    /// Creates an empty history.
    pub fn new() -> Self {
        Default::default()
    }

    /// Creates a history containing a single snapshot.
    pub fn from_step(state: &SimState, collisions: Vec<CollisionGroup>) -> Self {
        let mut data = Self::new();
        data.push(state, collisions);
        data
    }

    /// Records a snapshot of `state` along with the step's collision groups.
    pub fn push(&mut self, state: &SimState, collisions: Vec<CollisionGroup>) {
        self.xs.push(state.xs.clone());
        self.vs.push(state.vs.clone());
        self.accs.push(state.accs.clone());
        self.collisions.push(collisions);
    }

    /// Appends all steps of `other` after the steps of this history.
    pub fn append(&mut self, mut other: SimData) {
        self.xs.append(&mut other.xs);
        self.vs.append(&mut other.vs);
        self.accs.append(&mut other.accs);
        self.collisions.append(&mut other.collisions);
    }

    /// Concatenates two histories.
    pub fn combine(mut first: SimData, second: SimData) -> SimData {
        first.append(second);
        first
    }

    /// The number of recorded steps.
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether no steps have been recorded.
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Reconstructs the state recorded at `step`.
    pub fn state_at(&self, step: usize) -> Option<SimState> {
        Some(SimState {
            xs: self.xs.get(step)?.clone(),
            vs: self.vs.get(step)?.clone(),
            accs: self.accs.get(step)?.clone(),
        })
    }

    /// The `(position, velocity, acceleration)` series of a single vehicle.
    pub fn vehicle_trajectory(&self, idx: usize) -> Vec<(f64, f64, f64)> {
        izip!(&self.xs, &self.vs, &self.accs)
            .filter_map(|(xs, vs, accs)| Some((*xs.get(idx)?, *vs.get(idx)?, *accs.get(idx)?)))
            .collect()
    }

    /// The indices of the steps in which at least one collision occurred.
    pub fn collision_steps(&self) -> Vec<usize> {
        self.collisions
            .iter()
            .enumerate()
            .filter(|(_, groups)| !groups.is_empty())
            .map(|(step, _)| step)
            .collect()
    }

    /// Serializes the history as a JSON string.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Writes the history as JSON.
    pub fn write_json(&self, writer: impl Write) -> Result<()> {
        serde_json::to_writer(writer, self)?;
        Ok(())
    }
}

//! Summary statistics over a recorded history, for offline analysis.

use crate::SimData;
use itertools::{izip, Itertools, MinMaxResult};
use serde::{Deserialize, Serialize};

/// Aggregate figures for a single recorded step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepSummary {
    /// The step index, 0 being the initial state.
    pub step: usize,
    /// The mean vehicle velocity in m/s.
    pub mean_velocity: f64,
    /// The lowest vehicle velocity in m/s.
    pub min_velocity: f64,
    /// The highest vehicle velocity in m/s.
    pub max_velocity: f64,
    /// The smallest gap between consecutive vehicles in m,
    /// or `None` if there is only one vehicle.
    pub min_gap: Option<f64>,
    /// The number of collision groups.
    pub collision_groups: usize,
    /// The number of vehicles involved in a collision.
    pub collided_vehicles: usize,
}

/// Aggregate figures for a whole run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The number of recorded steps, including the initial state.
    pub steps: usize,
    /// The number of collision groups summed over all steps.
    pub total_collision_groups: usize,
    /// The size of the largest collision group seen in any step.
    pub max_group_size: usize,
    /// The mean velocity in the last recorded step.
    pub final_mean_velocity: Option<f64>,
}

/// Summarizes every step of a history.
pub fn summarize(data: &SimData) -> Vec<StepSummary> {
    izip!(&data.xs, &data.vs, &data.collisions)
        .enumerate()
        .map(|(step, (xs, vs, collisions))| {
            let (min_velocity, max_velocity) = match vs.iter().copied().minmax_by(f64::total_cmp) {
                MinMaxResult::NoElements => (0.0, 0.0),
                MinMaxResult::OneElement(v) => (v, v),
                MinMaxResult::MinMax(min, max) => (min, max),
            };
            let mean_velocity = if vs.is_empty() {
                0.0
            } else {
                vs.iter().sum::<f64>() / vs.len() as f64
            };
            let min_gap = xs
                .iter()
                .tuple_windows()
                .map(|(a, b)| b - a)
                .min_by(f64::total_cmp);
            StepSummary {
                step,
                mean_velocity,
                min_velocity,
                max_velocity,
                min_gap,
                collision_groups: collisions.len(),
                collided_vehicles: collisions.iter().map(|group| group.len()).sum(),
            }
        })
        .collect()
}

impl RunSummary {
    /// Summarizes a whole history.
    pub fn from_data(data: &SimData) -> Self {
        let steps = summarize(data);
        Self {
            steps: steps.len(),
            total_collision_groups: steps.iter().map(|s| s.collision_groups).sum(),
            max_group_size: data
                .collisions
                .iter()
                .flatten()
                .map(|group| group.len())
                .max()
                .unwrap_or(0),
            final_mean_velocity: steps.last().map(|s| s.mean_velocity),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{CollisionGroup, SimState};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn summarizes_steps() {
        let mut data = SimData::new();
        data.push(
            &SimState::new(vec![0.0, 4.0, 10.0], vec![2.0, 4.0, 6.0], vec![0.0; 3]).unwrap(),
            vec![],
        );
        data.push(
            &SimState::new(vec![5.0, 5.0, 14.0], vec![0.0, 3.0, 6.0], vec![0.0; 3]).unwrap(),
            vec![CollisionGroup::from([0, 1])],
        );

        let steps = summarize(&data);
        assert_eq!(steps.len(), 2);
        assert_approx_eq!(steps[0].mean_velocity, 4.0);
        assert_eq!(steps[0].min_gap, Some(4.0));
        assert_eq!(steps[0].collision_groups, 0);
        assert_eq!(steps[1].min_velocity, 0.0);
        assert_eq!(steps[1].max_velocity, 6.0);
        assert_eq!(steps[1].min_gap, Some(0.0));
        assert_eq!(steps[1].collided_vehicles, 2);

        let run = RunSummary::from_data(&data);
        assert_eq!(run.steps, 2);
        assert_eq!(run.total_collision_groups, 1);
        assert_eq!(run.max_group_size, 2);
        assert_approx_eq!(run.final_mean_velocity.unwrap(), 3.0);
    }

    #[test]
    fn single_vehicle_has_no_gap() {
        let data = SimData::from_step(&SimState::initial(1, 3.0, 1.0).unwrap(), vec![]);
        assert_eq!(summarize(&data)[0].min_gap, None);
    }
}

use crate::{Params, SimState};

/// The car-following rule deciding each vehicle's acceleration for the coming step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AccelerationPolicy {
    /// The velocity at or above which vehicles stop accelerating, in m/s.
    pub v_max: f64,
    /// The time-headway at or below which a vehicle brakes, in s.
    pub t_spacing_min: f64,
    /// The braking acceleration in m/s<sup>2</sup>.
    pub acc_neg: f64,
    /// The throttle acceleration in m/s<sup>2</sup>.
    pub acc_pos: f64,
}

impl AccelerationPolicy {
    /// Creates the policy described by the run parameters.
    pub fn new(params: &Params) -> Self {
        Self {
            v_max: params.v_max,
            t_spacing_min: params.t_spacing_min,
            acc_neg: params.acc_neg,
            acc_pos: params.acc_pos,
        }
    }

    /// Calculates the acceleration of a vehicle following another.
    ///
    /// # Arguments
    /// * `vel` - The velocity of the following vehicle (m/s).
    /// * `gap` - The distance to the vehicle ahead (m).
    pub fn follow(&self, vel: f64, gap: f64) -> f64 {
        if vel == 0.0 {
            // Stationary: time-headway is undefined, so move off whenever there's room
            if gap == 0.0 {
                0.0
            } else {
                self.acc_pos
            }
        } else if gap / vel <= self.t_spacing_min {
            self.acc_neg
        } else if vel < self.v_max {
            self.acc_pos
        } else {
            0.0
        }
    }

    /// Calculates the acceleration of the front vehicle, which has no leader.
    ///
    /// At or above `v_max` the previous acceleration is kept rather than reset
    /// to zero, unlike [`follow`](Self::follow).
    pub fn lead(&self, vel: f64, prev_acc: f64) -> f64 {
        if vel < self.v_max {
            self.acc_pos
        } else {
            prev_acc
        }
    }

    /// Decides the acceleration of every vehicle from the current state.
    pub fn accelerations(&self, state: &SimState) -> Vec<f64> {
        let n = state.len();
        let mut accs = Vec::with_capacity(n);
        accs.extend(
            state
                .xs
                .windows(2)
                .zip(&state.vs)
                .map(|(xs, vel)| self.follow(*vel, xs[1] - xs[0])),
        );
        if let (Some(vel), Some(acc)) = (state.vs.last(), state.accs.last()) {
            accs.push(self.lead(*vel, *acc));
        }
        accs
    }

    /// Returns a copy of `state` with this step's accelerations applied.
    pub fn set_accelerations(&self, state: &SimState) -> SimState {
        state.with_accs(self.accelerations(state))
    }
}

/// Applies the car-following rule with the given limits to `state`.
pub fn set_accelerations(
    state: &SimState,
    v_max: f64,
    t_spacing_min: f64,
    acc_neg: f64,
    acc_pos: f64,
) -> SimState {
    AccelerationPolicy {
        v_max,
        t_spacing_min,
        acc_neg,
        acc_pos,
    }
    .set_accelerations(state)
}

#[cfg(test)]
mod test {
    use super::*;

    fn state(xs: &[f64], vs: &[f64], accs: &[f64]) -> SimState {
        SimState::new(xs.to_vec(), vs.to_vec(), accs.to_vec()).unwrap()
    }

    #[test]
    fn no_accelerations() {
        let state = state(&[0.0, 10.0], &[1.0, 1.0], &[0.0, 0.0]);
        assert_eq!(set_accelerations(&state, 1.0, 5.0, -10.0, 10.0), state);
    }

    #[test]
    fn deceleration() {
        let state = state(&[0.0, 2.0], &[10.0, 20.0], &[0.0, 0.0]);
        assert_eq!(
            set_accelerations(&state, 20.0, 1.0, -10.0, 10.0),
            state.with_accs(vec![-10.0, 0.0])
        );
    }

    #[test]
    fn acceleration() {
        let state = state(&[0.0, 100.0], &[1.0, 1.0], &[0.0, 0.0]);
        assert_eq!(
            set_accelerations(&state, 20.0, 1.0, -10.0, 10.0),
            state.with_accs(vec![10.0, 10.0])
        );
    }

    #[test]
    fn stationary_vehicles() {
        // Touching the car ahead: no division, no movement
        let touching = state(&[0.0, 0.0, 5.0], &[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0]);
        assert_eq!(
            set_accelerations(&touching, 20.0, 1.0, -10.0, 10.0).accs,
            vec![0.0, 10.0, 10.0]
        );
    }

    #[test]
    fn leader_keeps_previous_acceleration() {
        let policy = AccelerationPolicy {
            v_max: 5.0,
            t_spacing_min: 1.0,
            acc_neg: -2.0,
            acc_pos: 1.0,
        };
        let state = state(&[0.0, 100.0], &[6.0, 6.0], &[1.0, 1.0]);
        // The follower resets to zero, the leader keeps its previous value
        assert_eq!(policy.accelerations(&state), vec![0.0, 1.0]);
    }

    #[test]
    fn single_vehicle() {
        let policy = AccelerationPolicy {
            v_max: 5.0,
            t_spacing_min: 1.0,
            acc_neg: -2.0,
            acc_pos: 1.0,
        };
        assert_eq!(policy.accelerations(&state(&[3.0], &[1.0], &[0.0])), vec![1.0]);
        assert_eq!(policy.accelerations(&state(&[3.0], &[5.0], &[-2.0])), vec![-2.0]);
    }
}

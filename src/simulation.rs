use crate::collision::consolidate_collisions;
use crate::vehicle::{displacement, next_velocity, AccelerationPolicy, VelocityJitter};
use crate::{CollisionGroup, Params, Result, SimData, SimState};
use itertools::izip;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A single-lane traffic simulation.
pub struct Simulation<R = StdRng> {
    /// The run parameters.
    params: Params,
    /// The car-following rule.
    policy: AccelerationPolicy,
    /// The velocity perturbation applied before each step.
    jitter: VelocityJitter,
    /// The source of randomness for the jitter.
    rng: R,
    /// The current state of the lane.
    state: SimState,
    /// Every state recorded so far, starting with the initial one.
    data: SimData,
    /// The number of completed steps.
    frame: usize,
}

impl Simulation<StdRng> {
    /// Creates a new simulation, seeding its randomness from the OS.
    pub fn new(params: Params) -> Result<Self> {
        Self::with_rng(params, StdRng::from_entropy())
    }

    /// Creates a new simulation whose jitter is reproducible from `seed`.
    pub fn with_seed(params: Params, seed: u64) -> Result<Self> {
        log::debug!("seeding simulation with {}", seed);
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Creates a new simulation drawing its jitter from `rng`.
    pub fn with_rng(params: Params, rng: R) -> Result<Self> {
        params.validate()?;
        let jitter = VelocityJitter::new(params.v_jitter)?;
        let (state, data) = initialize(params.num_cars, params.v_0, params.t_spacing_0)?;
        log::debug!(
            "created simulation of {} vehicles at {} m/s",
            params.num_cars,
            params.v_0
        );
        Ok(Self {
            policy: AccelerationPolicy::new(&params),
            params,
            jitter,
            rng,
            state,
            data,
            frame: 0,
        })
    }

    /// Advances the simulation by one time step,
    /// returning the collision groups detected in that step.
    pub fn step(&mut self) -> &[CollisionGroup] {
        let (state, data) = simulate_step(&self.state, &self.policy, &self.jitter, &mut self.rng);
        self.state = state;
        self.data.append(data);
        self.frame += 1;

        let collisions = self.data.collisions.last().map_or(&[][..], |c| &c[..]);
        if collisions.is_empty() {
            log::trace!("step {}: no collisions", self.frame);
        } else {
            log::debug!(
                "step {}: {} collision group(s) {:?}",
                self.frame,
                collisions.len(),
                collisions
            );
        }
        collisions
    }

    /// Advances the simulation by `num_steps` time steps.
    pub fn run(&mut self, num_steps: usize) {
        for _ in 0..num_steps {
            self.step();
        }
        log::debug!(
            "ran {} steps, {} recorded in total",
            num_steps,
            self.data.len()
        );
    }

    /// The run parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The current state of the lane.
    pub fn state(&self) -> &SimState {
        &self.state
    }

    /// The history recorded so far.
    pub fn data(&self) -> &SimData {
        &self.data
    }

    /// Consumes the simulation, returning its recorded history.
    pub fn into_data(self) -> SimData {
        self.data
    }

    /// Gets the number of completed steps.
    pub fn frame(&self) -> usize {
        self.frame
    }
}

/// Runs a fresh simulation for `num_steps` steps and returns its full history,
/// which holds `num_steps + 1` entries.
pub fn simulate<R: Rng>(params: &Params, num_steps: usize, rng: R) -> Result<SimData> {
    let mut sim = Simulation::with_rng(params.clone(), rng)?;
    sim.run(num_steps);
    Ok(sim.into_data())
}

/// Builds the initial state and a history containing just that state.
pub fn initialize(num_cars: usize, v_0: f64, t_spacing_0: f64) -> Result<(SimState, SimData)> {
    let state = SimState::initial(num_cars, v_0, t_spacing_0)?;
    let data = SimData::from_step(&state, vec![]);
    Ok((state, data))
}

/// Jitters velocities, applies the car-following rule, then advances time.
pub fn simulate_step<R: Rng + ?Sized>(
    state: &SimState,
    policy: &AccelerationPolicy,
    jitter: &VelocityJitter,
    rng: &mut R,
) -> (SimState, SimData) {
    let state = jitter.jitter_velocities(state, rng);
    let state = policy.set_accelerations(&state);
    step_time(&state)
}

/// Integrates every vehicle by one time step using its current acceleration,
/// then resolves rear-end overlaps.
///
/// Overlaps are resolved from the front of the lane backwards, so that each
/// vehicle is clamped against a leader whose position is already final. A
/// clamped vehicle is stopped dead. The returned data holds the resolved
/// state and the consolidated collision groups.
pub fn step_time(state: &SimState) -> (SimState, SimData) {
    debug_assert_eq!(state.xs.len(), state.vs.len());
    debug_assert_eq!(state.xs.len(), state.accs.len());

    // Where each vehicle would go without obstacles
    let mut xs: Vec<f64> = izip!(&state.xs, &state.vs, &state.accs)
        .map(|(x, v, a)| x + displacement(*v, *a))
        .collect();
    let mut vs: Vec<f64> = izip!(&state.vs, &state.accs)
        .map(|(v, a)| next_velocity(*v, *a))
        .collect();
    let mut accs = state.accs.clone();

    let mut pairs = vec![];
    for i in (0..state.len().saturating_sub(1)).rev() {
        if xs[i] > xs[i + 1] {
            xs[i] = xs[i + 1];
            vs[i] = 0.0;
            accs[i] = 0.0;
            pairs.push((i, i + 1));
        }
    }

    let state = SimState { xs, vs, accs };
    let data = SimData::from_step(&state, consolidate_collisions(&pairs));
    (state, data)
}

#[cfg(test)]
mod test {
    use super::*;

    fn state(xs: &[f64], vs: &[f64], accs: &[f64]) -> SimState {
        SimState::new(xs.to_vec(), vs.to_vec(), accs.to_vec()).unwrap()
    }

    #[test]
    fn initialize_simple() {
        let (state, data) = initialize(2, 1.0, 1.0).unwrap();
        assert_eq!(state, self::state(&[0.0, 1.0], &[1.0, 1.0], &[0.0, 0.0]));
        assert_eq!(
            data,
            SimData {
                xs: vec![vec![0.0, 1.0]],
                vs: vec![vec![1.0, 1.0]],
                accs: vec![vec![0.0, 0.0]],
                collisions: vec![vec![]],
            }
        );
    }

    #[test]
    fn no_collisions() {
        let (next, data) = step_time(&state(&[0.0, 5.0], &[1.0, 1.0], &[2.0, 2.0]));
        let expected = state(&[2.0, 7.0], &[3.0, 3.0], &[2.0, 2.0]);
        assert_eq!(next, expected);
        assert_eq!(data, SimData::from_step(&expected, vec![]));
    }

    #[test]
    fn single_collision() {
        let (next, data) = step_time(&state(&[0.0, 1.0], &[1.0, 0.0], &[2.0, 0.0]));
        let expected = state(&[1.0, 1.0], &[0.0, 0.0], &[0.0, 0.0]);
        assert_eq!(next, expected);
        assert_eq!(
            data,
            SimData::from_step(&expected, vec![CollisionGroup::from([0, 1])])
        );
    }

    #[test]
    fn multi_collision() {
        let (next, data) = step_time(&state(&[0.0, 1.0, 1.5], &[2.0, 1.0, 0.0], &[0.0; 3]));
        let expected = state(&[1.5, 1.5, 1.5], &[0.0, 0.0, 0.0], &[0.0; 3]);
        assert_eq!(next, expected);
        assert_eq!(data.collisions, vec![vec![CollisionGroup::from([0, 1, 2])]]);
    }

    #[test]
    fn separate_collisions_in_one_step() {
        let (next, data) = step_time(&state(
            &[0.0, 1.0, 10.0, 11.0],
            &[3.0, 0.0, 3.0, 0.0],
            &[0.0; 4],
        ));
        assert_eq!(next.xs, vec![1.0, 1.0, 11.0, 11.0]);
        assert_eq!(
            data.collisions,
            vec![vec![CollisionGroup::from([0, 1]), CollisionGroup::from([2, 3])]]
        );
    }

    #[test]
    fn nonnegative_velocities() {
        let (next, _) = step_time(&state(&[0.0], &[1.0], &[-10.0]));
        assert_eq!(next.vs[0], 0.0);
        assert_eq!(next.xs[0], 0.0);
    }

    #[test]
    fn step_without_jitter() {
        let params = Params {
            num_cars: 2,
            v_0: 1.0,
            v_jitter: 0.0,
            v_max: 20.0,
            t_spacing_0: 100.0,
            t_spacing_min: 1.0,
            acc_neg: -10.0,
            acc_pos: 10.0,
        };
        let (initial, _) = initialize(2, 1.0, 100.0).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let (next, data) = simulate_step(
            &initial,
            &AccelerationPolicy::new(&params),
            &VelocityJitter::new(0.0).unwrap(),
            &mut rng,
        );
        // Both vehicles accelerate: dx = 1 + 10/2, v = 1 + 10
        assert_eq!(next, state(&[6.0, 106.0], &[11.0, 11.0], &[10.0, 10.0]));
        assert_eq!(data.len(), 1);
    }
}

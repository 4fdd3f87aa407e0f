use crate::{Error, Result, SimState};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Random per-step velocity perturbation, emulating driver variability.
#[derive(Clone, Copy, Debug)]
pub struct VelocityJitter {
    /// `None` when the standard deviation is zero, in which case no samples are drawn.
    distr: Option<Normal<f64>>,
}

impl VelocityJitter {
    /// Creates a jitter source adding zero-mean Gaussian noise with the given
    /// standard deviation in m/s.
    pub fn new(std_dev: f64) -> Result<Self> {
        if std_dev < 0.0 || !std_dev.is_finite() {
            return Err(Error::InvalidParameter {
                name: "v_jitter",
                value: std_dev,
            });
        }
        if std_dev == 0.0 {
            return Ok(Self { distr: None });
        }
        let distr = Normal::new(0.0, std_dev).map_err(|_| Error::InvalidParameter {
            name: "v_jitter",
            value: std_dev,
        })?;
        Ok(Self { distr: Some(distr) })
    }

    /// Perturbs each velocity by one sample, then floors it at zero.
    pub fn apply<R: Rng + ?Sized>(&self, vs: &[f64], rng: &mut R) -> Vec<f64> {
        match &self.distr {
            Some(distr) => vs
                .iter()
                .map(|v| f64::max(v + distr.sample(rng), 0.0))
                .collect(),
            None => vs.iter().map(|v| f64::max(*v, 0.0)).collect(),
        }
    }

    /// Returns a copy of `state` with jittered velocities.
    pub fn jitter_velocities<R: Rng + ?Sized>(&self, state: &SimState, rng: &mut R) -> SimState {
        state.with_vs(self.apply(&state.vs, rng))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn zero_deviation_is_noop() {
        let jitter = VelocityJitter::new(0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        let vs = vec![0.0, 1.5, 20.0];
        assert_eq!(jitter.apply(&vs, &mut rng), vs);
    }

    #[test]
    fn never_negative() {
        let jitter = VelocityJitter::new(5.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let vs = vec![0.0; 100];
        let jittered = jitter.apply(&vs, &mut rng);
        assert!(jittered.iter().all(|v| *v >= 0.0));
        assert!(jittered.iter().any(|v| *v > 0.0));
    }

    #[test]
    fn seeded_is_reproducible() {
        let jitter = VelocityJitter::new(1.0).unwrap();
        let vs = vec![10.0; 5];
        let a = jitter.apply(&vs, &mut StdRng::seed_from_u64(3));
        let b = jitter.apply(&vs, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
        assert_ne!(a, vs);
    }

    #[test]
    fn rejects_negative_deviation() {
        assert!(matches!(
            VelocityJitter::new(-1.0),
            Err(Error::InvalidParameter { name: "v_jitter", .. })
        ));
        assert!(VelocityJitter::new(f64::NAN).is_err());
        assert!(VelocityJitter::new(f64::INFINITY).is_err());
    }
}

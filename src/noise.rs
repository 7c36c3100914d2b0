//! Additive noise for score estimates.

use std::f64::consts::TAU;

use tinyrand::Rand;

use crate::random::random_f64;

/// Standard deviation of the points noise added to classifier score estimates.
pub const SCORE_NOISE_STD_DEV: f64 = 5.0;

pub trait Noise {
    /// A zero-centred sample with the given standard deviation.
    fn sample(&mut self, std_dev: f64) -> f64;
}

/// Normally distributed noise via the Box–Muller transform.
#[derive(Debug)]
pub struct Gaussian<R: Rand> {
    rand: R,
    spare: Option<f64>,
}

impl<R: Rand> Gaussian<R> {
    pub fn new(rand: R) -> Self {
        Self { rand, spare: None }
    }

    fn standard(&mut self) -> f64 {
        if let Some(spare) = self.spare.take() {
            return spare;
        }
        let u1 = random_f64(&mut self.rand).max(f64::MIN_POSITIVE);
        let u2 = random_f64(&mut self.rand);
        let radius = (-2. * u1.ln()).sqrt();
        let (sin, cos) = (TAU * u2).sin_cos();
        self.spare = Some(radius * sin);
        radius * cos
    }
}

impl<R: Rand> Noise for Gaussian<R> {
    fn sample(&mut self, std_dev: f64) -> f64 {
        self.standard() * std_dev
    }
}

/// No noise at all.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Noise for Silent {
    fn sample(&mut self, _std_dev: f64) -> f64 {
        0.
    }
}

impl<N: Noise + ?Sized> Noise for &mut N {
    fn sample(&mut self, std_dev: f64) -> f64 {
        (**self).sample(std_dev)
    }
}

#[cfg(test)]
mod tests {
    use tinyrand::{Seeded, StdRand};

    use super::*;

    #[test]
    fn silent_is_zero() {
        assert_eq!(0., Silent.sample(5.0));
    }

    #[test]
    fn gaussian_moments() {
        let mut noise = Gaussian::new(StdRand::seed(42));
        let samples: Vec<_> = (0..100_000).map(|_| noise.sample(5.0)).collect();
        let mean = samples.iter().sum::<f64>() / samples.len() as f64;
        let variance =
            samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / samples.len() as f64;
        assert!(mean.abs() < 0.1, "mean {mean}");
        assert!((variance.sqrt() - 5.0).abs() < 0.1, "std dev {}", variance.sqrt());
        assert!(samples.iter().all(|s| s.is_finite()));
    }

    #[test]
    fn gaussian_is_seeded() {
        let mut a = Gaussian::new(StdRand::seed(7));
        let mut b = Gaussian::new(StdRand::seed(7));
        for _ in 0..10 {
            assert_eq!(a.sample(1.0), b.sample(1.0));
        }
    }
}

//! Common types and helpers for synthetic profile generators.

use rand::{Rng, rngs::StdRng};

/// A source of instantaneous power, sampled once per timestep.
///
/// Values are magnitudes in watts (never negative); whether a device generates
/// or consumes is implied by its role in the balance.
pub trait Device {
    /// Returns the power at the specified timestep (W, >= 0).
    fn power_w(&mut self, timestep: usize) -> f64;

    /// Returns a human-readable type name for the device.
    fn device_type(&self) -> &'static str;
}

/// Utility function to generate Gaussian noise using Box-Muller transform.
///
/// # Arguments
///
/// * `rng` - Random number generator
/// * `std_dev` - Standard deviation of the noise
///
/// # Returns
///
/// Random value from a Gaussian distribution with mean 0 and specified standard deviation
pub fn gaussian_noise(rng: &mut StdRng, std_dev: f64) -> f64 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f64 = rng.random::<f64>().clamp(1e-9, 1.0);
    let u2: f64 = rng.random::<f64>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
    z0 * std_dev
}

/// Half-sine daylight shape in `[0, 1]` for timestep `t`.
///
/// Zero outside `[sunrise_idx, sunset_idx)`, peaking midway between them.
/// `t` wraps every `steps_per_day` steps.
pub fn daylight_frac(t: usize, steps_per_day: usize, sunrise_idx: usize, sunset_idx: usize) -> f64 {
    let t = t % steps_per_day.max(1);
    if t < sunrise_idx || t >= sunset_idx {
        return 0.0;
    }
    let span = (sunset_idx - sunrise_idx) as f64;
    let pos = (t - sunrise_idx) as f64 / span;
    (std::f64::consts::PI * pos).sin().max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn zero_std_dev_gives_no_noise() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(gaussian_noise(&mut rng, 0.0), 0.0);
        assert_eq!(gaussian_noise(&mut rng, -1.0), 0.0);
    }

    #[test]
    fn noise_is_roughly_centred() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 10_000;
        let mean: f64 = (0..n).map(|_| gaussian_noise(&mut rng, 1.0)).sum::<f64>() / n as f64;
        assert!(mean.abs() < 0.05, "mean was {mean}");
    }

    #[test]
    fn daylight_shape() {
        assert_eq!(daylight_frac(0, 24, 6, 18), 0.0);
        assert_eq!(daylight_frac(5, 24, 6, 18), 0.0);
        assert_eq!(daylight_frac(18, 24, 6, 18), 0.0);
        assert!(daylight_frac(6, 24, 6, 18) < 0.1);
        assert!(daylight_frac(12, 24, 6, 18) > 0.95);
        assert!((daylight_frac(9, 24, 6, 18) - daylight_frac(15, 24, 6, 18)).abs() < 1e-9);
    }

    #[test]
    fn daylight_wraps_across_days() {
        assert_eq!(daylight_frac(36, 24, 6, 18), daylight_frac(12, 24, 6, 18));
    }
}

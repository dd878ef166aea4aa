use rand::{SeedableRng, rngs::StdRng};

use crate::devices::types::{Device, gaussian_noise};

/// House consumption generator following a daily sinusoidal pattern.
///
/// # Examples
///
/// ```
/// use home_energy_balance::devices::{Device, HouseLoad};
///
/// let mut load = HouseLoad::new(
///     800.0, // base_w - average consumption
///     400.0, // amp_w - daily variation
///     0.0,   // phase_rad - no phase shift
///     50.0,  // noise_std - small random variation
///     24,    // steps_per_day - hourly resolution
///     42,    // seed - for reproducible randomness
/// );
///
/// assert!(load.power_w(12) >= 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct HouseLoad {
    /// Baseline consumption in watts
    pub base_w: f64,

    /// Amplitude of the sinusoidal variation in watts
    pub amp_w: f64,

    /// Phase offset of the sinusoidal pattern in radians
    pub phase_rad: f64,

    /// Standard deviation of the Gaussian noise in watts
    pub noise_std: f64,

    /// Number of time steps per simulated day
    pub steps_per_day: usize,

    rng: StdRng,
}

impl HouseLoad {
    /// Creates a new house load generator.
    ///
    /// # Arguments
    ///
    /// * `base_w` - The baseline consumption in watts
    /// * `amp_w` - The amplitude of sinusoidal daily variation in watts
    /// * `phase_rad` - The phase offset in radians
    /// * `noise_std` - The standard deviation of Gaussian noise in watts
    /// * `steps_per_day` - The number of time steps per simulated day
    /// * `seed` - Random seed for reproducible noise generation
    pub fn new(
        base_w: f64,
        amp_w: f64,
        phase_rad: f64,
        noise_std: f64,
        steps_per_day: usize,
        seed: u64,
    ) -> Self {
        Self {
            base_w,
            amp_w,
            phase_rad,
            noise_std,
            steps_per_day: steps_per_day.max(1),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Device for HouseLoad {
    /// Baseline plus sinusoid plus noise, never negative.
    fn power_w(&mut self, timestep: usize) -> f64 {
        let day_pos = (timestep % self.steps_per_day) as f64 / self.steps_per_day as f64; // [0,1)
        let angle = 2.0 * std::f64::consts::PI * day_pos + self.phase_rad;
        let noise = gaussian_noise(&mut self.rng, self.noise_std);

        (self.base_w + self.amp_w * angle.sin() + noise).max(0.0)
    }

    fn device_type(&self) -> &'static str {
        "HouseLoad"
    }
}

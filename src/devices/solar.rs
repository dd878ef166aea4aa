use crate::devices::types::{Device, daylight_frac, gaussian_noise};
use crate::sim::types::SimConfig;
use rand::{SeedableRng, rngs::StdRng};

/// Rooftop PV array feeding the house bus, in watts.
///
/// Output rises from zero at `sunrise_idx`, tops out at `peak_w` halfway to
/// `sunset_idx` and is zero outside that window. Multiplicative noise stands in
/// for passing clouds.
#[derive(Debug, Clone)]
pub struct SolarPv {
    /// Clear-sky output at solar noon (W).
    pub peak_w: f64,

    steps_per_day: usize,

    /// First daylight step of each day.
    pub sunrise_idx: usize,

    /// First dark step after daylight.
    pub sunset_idx: usize,

    /// Relative noise, e.g. `0.1` scatters output by roughly 10%.
    pub noise_std: f64,

    rng: StdRng,
}

impl SolarPv {
    /// Builds an array sized `peak_w` whose daylight window is
    /// `sunrise_idx..sunset_idx` within each day of `config`.
    ///
    /// Negative `peak_w` and `noise_std` are raised to zero. The noise stream is
    /// reproducible for a given `seed`.
    ///
    /// # Panics
    ///
    /// If the window is empty or ends after the last step of the day.
    pub fn new(
        peak_w: f64,
        sunrise_idx: usize,
        sunset_idx: usize,
        noise_std: f64,
        config: &SimConfig,
        seed: u64,
    ) -> Self {
        assert!(sunrise_idx < sunset_idx && sunset_idx <= config.steps_per_day);
        Self {
            peak_w: peak_w.max(0.0),
            steps_per_day: config.steps_per_day,
            sunrise_idx,
            sunset_idx,
            noise_std: noise_std.max(0.0),
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Device for SolarPv {
    fn power_w(&mut self, timestep: usize) -> f64 {
        let frac = daylight_frac(
            timestep,
            self.steps_per_day,
            self.sunrise_idx,
            self.sunset_idx,
        );
        // dark steps draw no noise sample
        if frac <= 0.0 {
            return 0.0;
        }

        let cloud = 1.0 + gaussian_noise(&mut self.rng, self.noise_std);
        (self.peak_w * frac * cloud).max(0.0)
    }

    fn device_type(&self) -> &'static str {
        "SolarPV"
    }
}

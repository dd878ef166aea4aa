//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use std::ops::{Deref, DerefMut};

use home_energy_balance::EnergyState;
use home_energy_balance::config::ScenarioConfig;
use home_energy_balance::sim::engine::Engine;

/// Device under test: a fresh energy state whose flows are zeroed again when
/// the test is done with it.
#[derive(Debug, Default)]
pub struct Dut {
    state: EnergyState,
}

impl Dut {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ends the test explicitly and hands back the state as teardown leaves it.
    pub fn teardown(mut self) -> EnergyState {
        let mut state = std::mem::take(&mut self.state);
        state.reset();
        state
    }
}

impl Deref for Dut {
    type Target = EnergyState;

    fn deref(&self) -> &EnergyState {
        &self.state
    }
}

impl DerefMut for Dut {
    fn deref_mut(&mut self) -> &mut EnergyState {
        &mut self.state
    }
}

impl Drop for Dut {
    fn drop(&mut self) {
        self.state.reset();
    }
}

/// Fibonacci sequence seeded at (1, 1), used as a deterministic,
/// ever-increasing input source. Restart by constructing a new one.
///
/// Ends after the largest term that fits in `u64`.
#[derive(Debug, Clone)]
pub struct Fibonacci {
    current: Option<u64>,
    following: Option<u64>,
}

impl Fibonacci {
    pub fn new() -> Self {
        Self {
            current: Some(1),
            following: Some(1),
        }
    }
}

impl Iterator for Fibonacci {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        let current = self.current?;
        self.current = self.following;
        self.following = self.following.and_then(|f| current.checked_add(f));
        Some(current)
    }
}

/// Next Fibonacci term as watts.
pub fn next_w(fib: &mut Fibonacci) -> f64 {
    fib.next().expect("Fibonacci sequence does not run out this early") as f64
}

/// Engine for the named preset with noiseless profiles, so figures are exact
/// enough to assert on.
pub fn noiseless_engine(preset: &str) -> Engine {
    let mut cfg = ScenarioConfig::from_preset(preset).expect("known preset");
    cfg.solar.noise_std = 0.0;
    cfg.house.noise_std = 0.0;
    assert!(cfg.validate().is_empty());
    cfg.build_engine()
}

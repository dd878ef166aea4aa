//! Synthetic PV and house-load profiles feeding the balance engine.

/// Daily house consumption profile.
pub mod house;
/// Solar photovoltaic generation model.
pub mod solar;
pub mod types;

pub use house::HouseLoad;
pub use solar::SolarPv;
pub use types::Device;

//! Physical components of the simulated household.

/// Appliance load records and window arithmetic.
pub mod appliance;
/// Solar-charged battery storage model.
pub mod battery;
/// Hourly solar irradiance profiles.
pub mod solar;

// Re-export the main types for convenience
pub use appliance::{ApplianceLoad, Season};
pub use battery::Battery;
pub use solar::IrradianceProfile;

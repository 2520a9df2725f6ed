//! 24-slot hourly power profiles.

use crate::HOURS_PER_DAY;
use crate::devices::ApplianceLoad;

/// Aggregate hourly power over one day, indexed by hour.
///
/// Values are signed: battery discharge entries contribute negative power.
/// Consumers that require non-negative consumption (e.g. cost calculation)
/// clamp per hour on their side.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HourlyProfile {
    kw: [f32; HOURS_PER_DAY],
}

impl HourlyProfile {
    /// Sums the rated power of every appliance active in each hour,
    /// wrapping overnight windows past midnight.
    pub fn from_appliances(loads: &[ApplianceLoad]) -> Self {
        let mut profile = Self::default();
        for load in loads {
            if load.rated_power_kw == 0.0 {
                continue;
            }
            for hour in load.window_hours() {
                profile.kw[hour] += load.rated_power_kw;
            }
        }
        profile
    }

    /// Aggregate power at the given hour, zero outside `0..24`.
    pub fn at(&self, hour: usize) -> f32 {
        self.kw.get(hour).copied().unwrap_or(0.0)
    }

    /// Adds a signed contribution at the given hour.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24`.
    pub fn add_kw(&mut self, hour: usize, kw: f32) {
        self.kw[hour] += kw;
    }

    /// All 24 hourly values, indexed by hour.
    pub fn hourly_kw(&self) -> &[f32; HOURS_PER_DAY] {
        &self.kw
    }

    /// Iterates `(hour, kw)` pairs in hour order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.kw.iter().copied().enumerate()
    }

    /// Largest hourly value.
    pub fn peak_kw(&self) -> f32 {
        self.kw.iter().copied().fold(f32::MIN, f32::max)
    }

    /// Energy over the whole day in kWh (hourly slots).
    pub fn total_kwh(&self) -> f32 {
        self.kw.iter().sum()
    }

    /// Returns a copy with every hourly value scaled by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        let mut kw = self.kw;
        for value in &mut kw {
            *value *= factor;
        }
        Self { kw }
    }
}

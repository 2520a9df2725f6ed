//! Hourly solar irradiance profiles.

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::HOURS_PER_DAY;
use crate::error::InputError;

/// Ordered hour-to-irradiance mapping in kW/m² covering one day.
///
/// Hours absent from the source data are implicitly zero.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IrradianceProfile {
    values: [f32; HOURS_PER_DAY],
}

impl IrradianceProfile {
    /// A profile with zero irradiance at every hour (overcast day).
    pub fn zero() -> Self {
        Self::default()
    }

    /// Builds a profile from `(hour, irradiance)` pairs.
    ///
    /// Hours not mentioned stay at zero.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if an hour is 24 or larger, a value is
    /// negative or not finite, or an hour appears twice.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (usize, f32)>) -> Result<Self, InputError> {
        let mut values = [0.0_f32; HOURS_PER_DAY];
        let mut seen = [false; HOURS_PER_DAY];
        for (hour, irradiance) in pairs {
            if hour >= HOURS_PER_DAY {
                return Err(InputError::HourOutOfRange {
                    field: "irradiance hour",
                    value: hour as i64,
                });
            }
            if !irradiance.is_finite() {
                return Err(InputError::NonFinite {
                    field: "irradiance",
                    value: irradiance,
                });
            }
            if irradiance < 0.0 {
                return Err(InputError::NegativeValue {
                    field: "irradiance",
                    value: irradiance,
                });
            }
            if seen[hour] {
                return Err(InputError::DuplicateHour {
                    field: "irradiance",
                    hour,
                });
            }
            seen[hour] = true;
            values[hour] = irradiance;
        }
        Ok(Self { values })
    }

    /// Generates a synthetic clear-sky profile.
    ///
    /// Irradiance follows a half-sine arc between sunrise (inclusive) and
    /// sunset (exclusive) peaking at `peak_kw_m2`, with multiplicative
    /// Gaussian noise to mimic passing clouds. Deterministic per seed.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `sunrise_hour >= sunset_hour`,
    /// `sunset_hour > 24`, or `peak_kw_m2`/`noise_std` is negative or not
    /// finite.
    pub fn clear_sky(
        peak_kw_m2: f32,
        sunrise_hour: usize,
        sunset_hour: usize,
        noise_std: f32,
        seed: u64,
    ) -> Result<Self, InputError> {
        if sunrise_hour >= sunset_hour {
            return Err(InputError::EmptyInterval {
                field: "daylight window",
                start: sunrise_hour,
                end: sunset_hour,
            });
        }
        if sunset_hour > HOURS_PER_DAY {
            return Err(InputError::HourOutOfRange {
                field: "sunset_hour",
                value: sunset_hour as i64,
            });
        }
        for (field, value) in [("peak_kw_m2", peak_kw_m2), ("noise_std", noise_std)] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, value });
            }
            if value < 0.0 {
                return Err(InputError::NegativeValue { field, value });
            }
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let daylight = (sunset_hour - sunrise_hour) as f32;
        let mut values = [0.0_f32; HOURS_PER_DAY];
        for (hour, value) in values.iter_mut().enumerate() {
            if hour < sunrise_hour || hour >= sunset_hour {
                continue;
            }
            // Sample the arc at the middle of the hourly slot.
            let progress = (hour as f32 - sunrise_hour as f32 + 0.5) / daylight;
            let arc = (std::f32::consts::PI * progress).sin();
            let noise_mult = 1.0 + gaussian_noise(&mut rng, noise_std);
            *value = (peak_kw_m2 * arc * noise_mult).max(0.0);
        }
        Ok(Self { values })
    }

    /// Irradiance at the given hour, zero for any hour outside `0..24`.
    pub fn at(&self, hour: usize) -> f32 {
        self.values.get(hour).copied().unwrap_or(0.0)
    }

    /// All 24 hourly values, indexed by hour.
    pub fn hourly(&self) -> &[f32; HOURS_PER_DAY] {
        &self.values
    }
}

/// Gaussian noise via the Box-Muller transform.
fn gaussian_noise(rng: &mut StdRng, std_dev: f32) -> f32 {
    if std_dev <= 0.0 {
        return 0.0;
    }

    let u1: f32 = rng.random::<f32>().clamp(1e-6, 1.0);
    let u2: f32 = rng.random::<f32>();
    let z0 = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f32::consts::PI * u2).cos();
    z0 * std_dev
}

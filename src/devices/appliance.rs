//! Appliance load records and operating-window arithmetic.

use std::fmt;

use crate::HOURS_PER_DAY;
use crate::error::InputError;

/// Season selector for appliance operating windows and irradiance data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Summer,
}

impl Season {
    /// Both seasons, in reporting order.
    pub const ALL: [Season; 2] = [Season::Winter, Season::Summer];
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Season::Winter => write!(f, "winter"),
            Season::Summer => write!(f, "summer"),
        }
    }
}

/// A household appliance with a rated power draw and a daily operating window.
///
/// Hours are stored normalized to `0..=23`; an input of `24` wraps to `0`.
/// `start_hour == end_hour` denotes an always-on 24-hour window, and
/// `end_hour < start_hour` a window crossing midnight. Battery discharge is
/// represented with synthetic entries carrying negative rated power (see
/// [`ApplianceLoad::battery_discharge`]).
#[derive(Debug, Clone, PartialEq)]
pub struct ApplianceLoad {
    /// Display name, unique only by convention.
    pub name: String,
    /// Rated power draw in kW while the appliance is active. Negative for
    /// synthetic battery-discharge entries.
    pub rated_power_kw: f32,
    /// Shedding rank: higher values are relocated first, values at or below
    /// the scheduler's floor are considered essential.
    pub priority_group: u8,
    start_hour: u8,
    end_hour: u8,
}

impl ApplianceLoad {
    /// Creates a new appliance load.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if either hour exceeds 24 or the rated
    /// power is not finite.
    pub fn new(
        name: impl Into<String>,
        rated_power_kw: f32,
        priority_group: u8,
        start_hour: u8,
        end_hour: u8,
    ) -> Result<Self, InputError> {
        if !rated_power_kw.is_finite() {
            return Err(InputError::NonFinite {
                field: "rated_power_kw",
                value: rated_power_kw,
            });
        }
        let mut load = Self {
            name: name.into(),
            rated_power_kw,
            priority_group,
            start_hour: 0,
            end_hour: 0,
        };
        load.set_window(start_hour, end_hour)?;
        Ok(load)
    }

    /// Creates a synthetic one-hour discharge entry for the given hour.
    ///
    /// Carries negative rated power so that profile aggregation subtracts
    /// the discharge, and priority group 0 so the scheduler never moves it.
    ///
    /// # Panics
    ///
    /// Panics if `hour >= 24` or `discharge_kw` is negative; discharge
    /// entries are produced by the simulator, not parsed from input.
    pub fn battery_discharge(hour: usize, discharge_kw: f32) -> Self {
        assert!(hour < HOURS_PER_DAY);
        assert!(discharge_kw >= 0.0);
        Self {
            name: format!("Battery Discharge (Hour {hour})"),
            rated_power_kw: -discharge_kw,
            priority_group: 0,
            start_hour: hour as u8,
            end_hour: ((hour + 1) % HOURS_PER_DAY) as u8,
        }
    }

    /// First hour of the operating window, normalized to `0..=23`.
    pub fn start_hour(&self) -> u8 {
        self.start_hour
    }

    /// End hour (exclusive) of the operating window, normalized to `0..=23`.
    pub fn end_hour(&self) -> u8 {
        self.end_hour
    }

    /// Rewrites the operating window, normalizing an hour of 24 to 0.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if either hour exceeds 24.
    pub fn set_window(&mut self, start_hour: u8, end_hour: u8) -> Result<(), InputError> {
        for (field, value) in [("start_hour", start_hour), ("end_hour", end_hour)] {
            if usize::from(value) > HOURS_PER_DAY {
                return Err(InputError::HourOutOfRange {
                    field,
                    value: i64::from(value),
                });
            }
        }
        self.start_hour = start_hour % HOURS_PER_DAY as u8;
        self.end_hour = end_hour % HOURS_PER_DAY as u8;
        Ok(())
    }

    /// Length of the operating window in hours (24 for always-on).
    pub fn duration_hours(&self) -> usize {
        let (start, end) = (usize::from(self.start_hour), usize::from(self.end_hour));
        if start < end {
            end - start
        } else {
            HOURS_PER_DAY - start + end
        }
    }

    /// Iterates the hours of the operating window, wrapping past midnight.
    pub fn window_hours(&self) -> impl Iterator<Item = usize> {
        let (start, end) = (usize::from(self.start_hour), usize::from(self.end_hour));
        let (head, tail) = if start < end {
            (start..end, 0..0)
        } else {
            (start..HOURS_PER_DAY, 0..end)
        };
        head.chain(tail)
    }

    /// Returns `true` when the appliance draws power during `hour`.
    pub fn is_active_at(&self, hour: usize) -> bool {
        self.window_hours().any(|h| h == hour)
    }

    /// Energy drawn over one day in kWh (signed for discharge entries).
    pub fn energy_kwh(&self) -> f32 {
        self.rated_power_kw * self.duration_hours() as f32
    }
}

//! Core simulation types: peak-hour windows and discharge records.

use crate::HOURS_PER_DAY;
use crate::error::InputError;

/// Default start of the daily peak window (inclusive).
pub const DEFAULT_PEAK_START_HOUR: usize = 17;
/// Default end of the daily peak window (inclusive).
pub const DEFAULT_PEAK_END_HOUR: usize = 22;

/// The set of hours billed and managed as the daily demand peak.
///
/// Usually a contiguous evening window but any subset of the day is
/// accepted.
///
/// # Examples
///
/// ```
/// use peakshift::sim::types::PeakHours;
///
/// let peak = PeakHours::default();
/// assert!(peak.contains(17));
/// assert!(peak.contains(22));
/// assert!(!peak.contains(23));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeakHours {
    mask: [bool; HOURS_PER_DAY],
}

impl PeakHours {
    /// Builds a contiguous window covering `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `start > end` or `end > 23`.
    pub fn from_range_inclusive(start: usize, end: usize) -> Result<Self, InputError> {
        if end >= HOURS_PER_DAY {
            return Err(InputError::HourOutOfRange {
                field: "peak_end_hour",
                value: end as i64,
            });
        }
        if start > end {
            return Err(InputError::EmptyInterval {
                field: "peak window",
                start,
                end,
            });
        }
        let mut mask = [false; HOURS_PER_DAY];
        for slot in &mut mask[start..=end] {
            *slot = true;
        }
        Ok(Self { mask })
    }

    /// Builds an arbitrary hour set; duplicates are allowed, order ignored.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if any hour is 24 or larger.
    pub fn from_hours(hours: &[usize]) -> Result<Self, InputError> {
        let mut mask = [false; HOURS_PER_DAY];
        for &hour in hours {
            if hour >= HOURS_PER_DAY {
                return Err(InputError::HourOutOfRange {
                    field: "peak hour",
                    value: hour as i64,
                });
            }
            mask[hour] = true;
        }
        Ok(Self { mask })
    }

    /// Returns `true` when `hour` belongs to the peak set.
    pub fn contains(&self, hour: usize) -> bool {
        self.mask.get(hour).copied().unwrap_or(false)
    }

    /// Iterates the member hours in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.mask
            .iter()
            .enumerate()
            .filter_map(|(hour, &member)| member.then_some(hour))
    }

    /// Number of member hours.
    pub fn count(&self) -> usize {
        self.mask.iter().filter(|&&member| member).count()
    }
}

impl Default for PeakHours {
    /// The default 17:00 to 22:00 (inclusive) evening window.
    fn default() -> Self {
        Self::from_range_inclusive(DEFAULT_PEAK_START_HOUR, DEFAULT_PEAK_END_HOUR)
            .expect("default window is valid")
    }
}

/// Battery activity during one simulated hour.
///
/// The simulator emits exactly one record per hour of the day, including
/// hours with zero discharge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DischargeRecord {
    /// Hour of day, `0..24`.
    pub hour: usize,
    /// Power discharged toward the load during this hour (kW, >= 0).
    pub discharge_kw: f32,
    /// State of charge after the hour was processed, in percent.
    pub soc_after_percent: f32,
}

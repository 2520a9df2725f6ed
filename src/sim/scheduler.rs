//! Greedy single-pass peak-hour load shifting.

use std::cmp::Reverse;

use tracing::debug;

use crate::HOURS_PER_DAY;
use crate::devices::ApplianceLoad;
use crate::error::InputError;
use crate::sim::types::PeakHours;

/// A peak hour still exceeding the threshold after a scheduling pass.
///
/// This is a reportable outcome of the heuristic, not a fault.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HourViolation {
    /// Hour of day, `0..24`.
    pub hour: usize,
    /// Aggregate power above the threshold in kW.
    pub excess_kw: f32,
}

/// Result of one scheduling pass.
#[derive(Debug, Clone)]
pub struct ShiftOutcome {
    /// The input collection with some operating windows rewritten. The
    /// input itself is never mutated.
    pub loads: Vec<ApplianceLoad>,
    /// Number of appliances that were relocated.
    pub moved: usize,
    /// Peak hours left above the threshold, in hour order.
    pub unresolved: Vec<HourViolation>,
}

/// Greedy scheduler that relocates flexible appliances out of overloaded
/// peak hours.
///
/// Appliances are processed once in descending priority-group order; each
/// gets at most one relocation attempt, to a same-duration block starting
/// at [`LoadScheduler::relocation_start_hour`]. A relocation is committed
/// only when every peak hour inside the destination block stays at or
/// under the threshold. The pass never revisits already shifted
/// appliances, so the result is a best-effort local reduction rather than
/// a global optimum.
#[derive(Debug, Clone)]
pub struct LoadScheduler {
    /// Appliances with a priority group at or below this value are
    /// essential and never moved.
    pub min_shiftable_priority: u8,
    /// First hour of the candidate destination block.
    pub relocation_start_hour: usize,
}

impl Default for LoadScheduler {
    fn default() -> Self {
        Self {
            min_shiftable_priority: 2,
            relocation_start_hour: 23,
        }
    }
}

impl LoadScheduler {
    /// Shifts eligible appliances out of overloaded peak hours.
    ///
    /// Total rated power is conserved: only operating windows move. Hours
    /// the pass could not relieve are reported in
    /// [`ShiftOutcome::unresolved`].
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `threshold_kw` is negative or not
    /// finite, or `relocation_start_hour` exceeds 23.
    pub fn shift(
        &self,
        loads: &[ApplianceLoad],
        threshold_kw: f32,
        peak_hours: &PeakHours,
    ) -> Result<ShiftOutcome, InputError> {
        if !threshold_kw.is_finite() {
            return Err(InputError::NonFinite {
                field: "threshold_kw",
                value: threshold_kw,
            });
        }
        if threshold_kw < 0.0 {
            return Err(InputError::NegativeValue {
                field: "threshold_kw",
                value: threshold_kw,
            });
        }
        if self.relocation_start_hour >= HOURS_PER_DAY {
            return Err(InputError::HourOutOfRange {
                field: "relocation_start_hour",
                value: self.relocation_start_hour as i64,
            });
        }

        let mut result = loads.to_vec();

        // Signed aggregate per peak hour; discharge entries reduce it.
        let mut aggregate = [0.0_f32; HOURS_PER_DAY];
        for load in &result {
            if load.rated_power_kw == 0.0 {
                continue;
            }
            for hour in load.window_hours() {
                if peak_hours.contains(hour) {
                    aggregate[hour] += load.rated_power_kw;
                }
            }
        }
        let mut errors = [0.0_f32; HOURS_PER_DAY];
        for hour in peak_hours.iter() {
            errors[hour] = (aggregate[hour] - threshold_kw).max(0.0);
        }
        debug!(
            initial_violations = errors.iter().filter(|&&e| e > 0.0).count(),
            "starting scheduling pass"
        );

        // Highest priority group first; ties keep input order.
        let mut order: Vec<usize> = (0..result.len()).collect();
        order.sort_by_key(|&idx| Reverse(result[idx].priority_group));

        let mut moved = 0;
        for idx in order {
            if !errors.iter().any(|&excess| excess > 0.0) {
                break;
            }

            let (power_kw, duration, vacated) = {
                let load = &result[idx];
                if load.rated_power_kw <= 0.0 {
                    continue;
                }
                if load.priority_group <= self.min_shiftable_priority {
                    continue;
                }
                if !load.window_hours().any(|hour| peak_hours.contains(hour)) {
                    continue;
                }
                (
                    load.rated_power_kw,
                    load.duration_hours(),
                    load.window_hours().collect::<Vec<usize>>(),
                )
            };

            let block: Vec<usize> = (0..duration)
                .map(|offset| (self.relocation_start_hour + offset) % HOURS_PER_DAY)
                .collect();
            let admissible = block.iter().all(|&hour| {
                !peak_hours.contains(hour) || aggregate[hour] + power_kw <= threshold_kw
            });
            if !admissible {
                debug!(name = %result[idx].name, "no admissible destination, left in place");
                continue;
            }

            for &hour in &vacated {
                if peak_hours.contains(hour) {
                    aggregate[hour] -= power_kw;
                    errors[hour] = (aggregate[hour] - threshold_kw).max(0.0);
                }
            }
            for &hour in &block {
                if peak_hours.contains(hour) {
                    aggregate[hour] += power_kw;
                    errors[hour] = (aggregate[hour] - threshold_kw).max(0.0);
                }
            }

            let new_start = self.relocation_start_hour as u8;
            let new_end = ((self.relocation_start_hour + duration) % HOURS_PER_DAY) as u8;
            result[idx].set_window(new_start, new_end)?;
            moved += 1;
            debug!(
                name = %result[idx].name,
                start_hour = new_start,
                "relocated appliance"
            );
        }

        let unresolved: Vec<HourViolation> = peak_hours
            .iter()
            .filter(|&hour| errors[hour] > 0.0)
            .map(|hour| HourViolation {
                hour,
                excess_kw: errors[hour],
            })
            .collect();

        Ok(ShiftOutcome {
            loads: result,
            moved,
            unresolved,
        })
    }
}

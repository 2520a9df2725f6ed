//! Hour-by-hour battery state machine.

use tracing::debug;

use crate::HOURS_PER_DAY;
use crate::devices::battery::{
    Battery, SOC_PEAK_CHARGE_CAP_PERCENT, SOC_RESERVE_FLOOR_PERCENT,
};
use crate::devices::{ApplianceLoad, IrradianceProfile};
use crate::error::InputError;
use crate::sim::profile::HourlyProfile;
use crate::sim::types::{DischargeRecord, PeakHours};

/// One-shot simulation of a battery over a 24-hour appliance profile.
///
/// The simulator owns its battery and `simulate` consumes the simulator:
/// SoC carried out of one day must not leak into another, so every run
/// starts from a freshly constructed instance.
#[derive(Debug)]
pub struct BatterySimulator {
    battery: Battery,
}

/// Everything one battery run produces.
#[derive(Debug, Clone)]
pub struct BatteryRun {
    /// One record per hour of the day, zero-discharge hours included.
    pub schedule: Vec<DischargeRecord>,
    /// The input appliances plus one synthetic negative-power discharge
    /// entry per hour with positive discharge.
    pub adjusted_loads: Vec<ApplianceLoad>,
    /// State of charge after the last hour, in percent.
    pub final_soc_percent: f32,
}

impl BatteryRun {
    /// Discharged power at the given hour in kW.
    pub fn discharge_at(&self, hour: usize) -> f32 {
        self.schedule
            .get(hour)
            .map(|record| record.discharge_kw)
            .unwrap_or(0.0)
    }
}

impl BatterySimulator {
    /// Creates a simulator around a fresh battery.
    pub fn new(battery: Battery) -> Self {
        Self { battery }
    }

    /// Advances the battery through all 24 hours in order.
    ///
    /// Each hour charges from solar below the applicable ceiling (50% in
    /// peak hours, 80% otherwise), applies the peak-hour minimum-reserve
    /// top-up when SoC has fallen under 30%, and discharges during peak
    /// hours whenever the hourly aggregate demand exceeds `threshold_kw`.
    /// Hours are strictly sequential; each SoC depends on all prior hours.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `threshold_kw` is negative or not
    /// finite.
    pub fn simulate(
        mut self,
        loads: &[ApplianceLoad],
        irradiance: &IrradianceProfile,
        threshold_kw: f32,
        peak_hours: &PeakHours,
    ) -> Result<BatteryRun, InputError> {
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

        // Demand is fixed for the whole day; discharge does not feed back
        // into it.
        let demand = HourlyProfile::from_appliances(loads);
        let mut schedule = Vec::with_capacity(HOURS_PER_DAY);

        for hour in 0..HOURS_PER_DAY {
            let irradiance_kw_m2 = irradiance.at(hour);
            let in_peak = peak_hours.contains(hour);

            if in_peak {
                if self.battery.soc_percent() < SOC_PEAK_CHARGE_CAP_PERCENT {
                    self.battery.charge_from_solar(irradiance_kw_m2, true);
                }
            } else {
                self.battery.charge_from_solar(irradiance_kw_m2, false);
            }

            let mut discharge_kw = 0.0;
            if in_peak {
                // Minimum-reserve policy: one extra top-up attempt before
                // discharging when the reserve has been eaten into.
                if self.battery.soc_percent() < SOC_RESERVE_FLOOR_PERCENT {
                    self.battery.charge_from_solar(irradiance_kw_m2, true);
                }
                discharge_kw = self
                    .battery
                    .discharge_for_demand(demand.at(hour), threshold_kw);
            }

            let soc_after_percent = self.battery.soc_percent();
            assert!(
                (0.0..=100.0).contains(&soc_after_percent),
                "SoC left [0, 100] at hour {hour}: {soc_after_percent}"
            );

            debug!(
                hour,
                irradiance_kw_m2,
                demand_kw = demand.at(hour),
                discharge_kw,
                soc_percent = soc_after_percent,
                "simulated hour"
            );

            schedule.push(DischargeRecord {
                hour,
                discharge_kw,
                soc_after_percent,
            });
        }

        let mut adjusted_loads = loads.to_vec();
        adjusted_loads.extend(
            schedule
                .iter()
                .filter(|record| record.discharge_kw > 0.0)
                .map(|record| ApplianceLoad::battery_discharge(record.hour, record.discharge_kw)),
        );

        Ok(BatteryRun {
            final_soc_percent: self.battery.soc_percent(),
            schedule,
            adjusted_loads,
        })
    }
}

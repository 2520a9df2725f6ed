//! Analysis pipeline: battery simulation, load shifting, and costing.

use std::fmt;

use tracing::info;

use crate::devices::{ApplianceLoad, Battery, IrradianceProfile};
use crate::error::InputError;
use crate::sim::battery_sim::BatterySimulator;
use crate::sim::cost::TariffSchedule;
use crate::sim::profile::HourlyProfile;
use crate::sim::scheduler::{HourViolation, LoadScheduler};
use crate::sim::types::{DischargeRecord, PeakHours};

/// Orchestrates one full analysis: original costing, battery simulation,
/// load shifting, and costing of the adjusted and shifted profiles.
///
/// Holds the run-wide parameters (threshold, peak window, tariff,
/// scheduler policy); appliances, irradiance, and a fresh battery are
/// supplied per run. The battery is taken by value so a drained instance
/// cannot be reused for a second season.
#[derive(Debug, Clone)]
pub struct Engine {
    threshold_kw: f32,
    peak_hours: PeakHours,
    tariff: TariffSchedule,
    scheduler: LoadScheduler,
}

/// Results of one seasonal analysis run.
#[derive(Debug, Clone)]
pub struct SeasonReport {
    /// Cost of the unmodified appliance profile.
    pub original_cost: f32,
    /// Cost after battery peak shaving.
    pub battery_cost: f32,
    /// Cost after battery peak shaving plus load shifting.
    pub shifted_cost: f32,
    /// Hourly aggregate of the unmodified appliances.
    pub original_profile: HourlyProfile,
    /// Hourly aggregate net of battery discharge.
    pub battery_profile: HourlyProfile,
    /// Hourly aggregate after load shifting.
    pub shifted_profile: HourlyProfile,
    /// Battery activity, one record per hour.
    pub discharge_schedule: Vec<DischargeRecord>,
    /// The rescheduled appliance collection (discharge entries included).
    pub shifted_loads: Vec<ApplianceLoad>,
    /// Number of appliances the scheduler relocated.
    pub moved_appliances: usize,
    /// Peak hours still above the threshold after shifting.
    pub unresolved: Vec<HourViolation>,
    /// Battery state of charge at the end of the day, in percent.
    pub final_soc_percent: f32,
}

impl SeasonReport {
    /// Cost saved by the battery alone.
    pub fn battery_savings(&self) -> f32 {
        self.original_cost - self.battery_cost
    }

    /// Cost saved by battery and load shifting together.
    pub fn total_savings(&self) -> f32 {
        self.original_cost - self.shifted_cost
    }
}

impl fmt::Display for SeasonReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Original cost:      $ {:.3}", self.original_cost)?;
        writeln!(f, "With battery:       $ {:.3}", self.battery_cost)?;
        writeln!(f, "After load shift:   $ {:.3}", self.shifted_cost)?;
        writeln!(f, "Total savings:      $ {:.3}", self.total_savings())?;
        writeln!(f, "Battery final SoC:  {:.1}%", self.final_soc_percent)?;
        writeln!(f, "Appliances moved:   {}", self.moved_appliances)?;
        if self.unresolved.is_empty() {
            write!(f, "Peak overloads:     none")
        } else {
            write!(f, "Peak overloads:    ")?;
            for violation in &self.unresolved {
                write!(f, " {}h +{:.2} kW", violation.hour, violation.excess_kw)?;
            }
            Ok(())
        }
    }
}

impl Engine {
    /// Creates an engine with the given run-wide parameters.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if `threshold_kw` is negative or not
    /// finite.
    pub fn new(
        threshold_kw: f32,
        peak_hours: PeakHours,
        tariff: TariffSchedule,
        scheduler: LoadScheduler,
    ) -> Result<Self, InputError> {
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
        Ok(Self {
            threshold_kw,
            peak_hours,
            tariff,
            scheduler,
        })
    }

    /// The peak-hour demand threshold in kW.
    pub fn threshold_kw(&self) -> f32 {
        self.threshold_kw
    }

    /// The peak-hour window used for shaving, shifting, and billing.
    pub fn peak_hours(&self) -> &PeakHours {
        &self.peak_hours
    }

    /// The tariff used for costing.
    pub fn tariff(&self) -> &TariffSchedule {
        &self.tariff
    }

    /// Runs the full pipeline for one season.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] from the battery simulator or the
    /// scheduler (both only reject invalid thresholds, which `Engine::new`
    /// already screens).
    pub fn run(
        &self,
        loads: &[ApplianceLoad],
        irradiance: &IrradianceProfile,
        battery: Battery,
    ) -> Result<SeasonReport, InputError> {
        let original_profile = HourlyProfile::from_appliances(loads);
        let original_cost = self.tariff.energy_cost(&original_profile, &self.peak_hours);

        let run = BatterySimulator::new(battery).simulate(
            loads,
            irradiance,
            self.threshold_kw,
            &self.peak_hours,
        )?;
        let battery_profile = HourlyProfile::from_appliances(&run.adjusted_loads);
        let battery_cost = self.tariff.energy_cost(&battery_profile, &self.peak_hours);

        let outcome = self
            .scheduler
            .shift(&run.adjusted_loads, self.threshold_kw, &self.peak_hours)?;
        let shifted_profile = HourlyProfile::from_appliances(&outcome.loads);
        let shifted_cost = self.tariff.energy_cost(&shifted_profile, &self.peak_hours);

        info!(
            original_cost,
            battery_cost,
            shifted_cost,
            moved = outcome.moved,
            unresolved = outcome.unresolved.len(),
            "analysis complete"
        );

        Ok(SeasonReport {
            original_cost,
            battery_cost,
            shifted_cost,
            original_profile,
            battery_profile,
            shifted_profile,
            discharge_schedule: run.schedule,
            shifted_loads: outcome.loads,
            moved_appliances: outcome.moved,
            unresolved: outcome.unresolved,
            final_soc_percent: run.final_soc_percent,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn battery(soc: f32) -> Battery {
        Battery::new(10.0, 0.2, 0.3, soc, 10.0, 0.7).expect("valid battery")
    }

    fn default_engine() -> Engine {
        Engine::new(
            3.0,
            PeakHours::default(),
            TariffSchedule::default(),
            LoadScheduler::default(),
        )
        .expect("valid engine")
    }

    fn household() -> Vec<ApplianceLoad> {
        vec![
            ApplianceLoad::new("Fridge", 0.2, 1, 0, 0).expect("valid appliance"),
            ApplianceLoad::new("Heater", 2.0, 2, 17, 22).expect("valid appliance"),
            ApplianceLoad::new("Washer", 2.5, 4, 18, 20).expect("valid appliance"),
        ]
    }

    #[test]
    fn pipeline_reduces_cost_stepwise() {
        let engine = default_engine();
        let report = engine
            .run(&household(), &IrradianceProfile::zero(), battery(90.0))
            .expect("valid run");
        assert!(report.battery_cost <= report.original_cost + 1e-5);
        assert!(report.shifted_cost <= report.battery_cost + 1e-5);
        assert!(report.total_savings() >= -1e-5);
    }

    #[test]
    fn report_carries_24_discharge_records() {
        let engine = default_engine();
        let report = engine
            .run(&household(), &IrradianceProfile::zero(), battery(50.0))
            .expect("valid run");
        assert_eq!(report.discharge_schedule.len(), 24);
    }

    #[test]
    fn negative_threshold_rejected_at_construction() {
        let result = Engine::new(
            -1.0,
            PeakHours::default(),
            TariffSchedule::default(),
            LoadScheduler::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_household_yields_zero_costs() {
        let engine = default_engine();
        let report = engine
            .run(&[], &IrradianceProfile::zero(), battery(50.0))
            .expect("valid run");
        assert_eq!(report.original_cost, 0.0);
        assert_eq!(report.battery_cost, 0.0);
        assert_eq!(report.shifted_cost, 0.0);
        assert_eq!(report.moved_appliances, 0);
        assert!(report.unresolved.is_empty());
    }

    #[test]
    fn display_mentions_all_three_costs() {
        let engine = default_engine();
        let report = engine
            .run(&household(), &IrradianceProfile::zero(), battery(50.0))
            .expect("valid run");
        let text = format!("{report}");
        assert!(text.contains("Original cost"));
        assert!(text.contains("With battery"));
        assert!(text.contains("After load shift"));
    }
}

//! Solar-charged battery with a peak-hour reserve policy.

use crate::error::InputError;

/// Charge ceiling outside peak hours, in percent of capacity.
pub const SOC_CHARGE_CEILING_PERCENT: f32 = 80.0;

/// Charge ceiling during peak hours, in percent of capacity. Solar energy
/// arriving in peak hours is prioritized for immediate load relief, so the
/// battery only tops up to half.
pub const SOC_PEAK_CHARGE_CAP_PERCENT: f32 = 50.0;

/// Reserve floor in percent of capacity. Discharge never draws the battery
/// below this level.
pub const SOC_RESERVE_FLOOR_PERCENT: f32 = 30.0;

/// A battery charged from a rooftop PV array and discharged to shave
/// peak-hour demand.
///
/// Charge and discharge rates are expressed as fractions of capacity per
/// hour. All energy exchange assumes one-hour steps, so a power of `x` kW
/// sustained for one slot transfers `x` kWh.
///
/// State of charge is tracked in percent and clamped to `[0, 100]` after
/// every update. A battery is moved into a simulation run and consumed by
/// it; a second run needs a freshly constructed instance.
#[derive(Debug, Clone)]
pub struct Battery {
    /// Total energy capacity in kWh.
    pub capacity_kwh: f32,
    /// Maximum charge per hour as a fraction of capacity.
    pub charge_rate: f32,
    /// Maximum discharge per hour as a fraction of capacity.
    pub discharge_rate: f32,
    /// Rooftop panel area in m².
    pub panel_area_m2: f32,
    /// Panel conversion efficiency (0.0 to 1.0).
    pub panel_efficiency: f32,
    soc_percent: f32,
}

impl Battery {
    /// Creates a new battery.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] if the capacity is not strictly positive,
    /// a rate or the panel area is negative, the initial SoC is outside
    /// `[0, 100]`, the efficiency is outside `[0, 1]`, or any field is not
    /// finite.
    pub fn new(
        capacity_kwh: f32,
        charge_rate: f32,
        discharge_rate: f32,
        initial_soc_percent: f32,
        panel_area_m2: f32,
        panel_efficiency: f32,
    ) -> Result<Self, InputError> {
        for (field, value) in [
            ("capacity_kwh", capacity_kwh),
            ("charge_rate", charge_rate),
            ("discharge_rate", discharge_rate),
            ("initial_soc_percent", initial_soc_percent),
            ("panel_area_m2", panel_area_m2),
            ("panel_efficiency", panel_efficiency),
        ] {
            if !value.is_finite() {
                return Err(InputError::NonFinite { field, value });
            }
        }
        if capacity_kwh <= 0.0 {
            return Err(InputError::NonPositive {
                field: "capacity_kwh",
                value: capacity_kwh,
            });
        }
        for (field, value) in [
            ("charge_rate", charge_rate),
            ("discharge_rate", discharge_rate),
            ("panel_area_m2", panel_area_m2),
        ] {
            if value < 0.0 {
                return Err(InputError::NegativeValue { field, value });
            }
        }
        if !(0.0..=100.0).contains(&initial_soc_percent) {
            return Err(InputError::OutOfRange {
                field: "initial_soc_percent",
                min: 0.0,
                max: 100.0,
                value: initial_soc_percent,
            });
        }
        if !(0.0..=1.0).contains(&panel_efficiency) {
            return Err(InputError::OutOfRange {
                field: "panel_efficiency",
                min: 0.0,
                max: 1.0,
                value: panel_efficiency,
            });
        }

        Ok(Self {
            capacity_kwh,
            charge_rate,
            discharge_rate,
            panel_area_m2,
            panel_efficiency,
            soc_percent: initial_soc_percent,
        })
    }

    /// Current state of charge in percent of capacity.
    pub fn soc_percent(&self) -> f32 {
        self.soc_percent
    }

    /// Maximum discharge power in kW over one hourly slot.
    pub fn max_discharge_kw(&self) -> f32 {
        self.discharge_rate * self.capacity_kwh
    }

    /// Electrical power produced by the panels at the given irradiance.
    pub fn solar_power_kw(&self, irradiance_kw_m2: f32) -> f32 {
        irradiance_kw_m2 * self.panel_area_m2 * self.panel_efficiency
    }

    /// Charges from solar for one hourly slot, honoring the applicable SoC
    /// ceiling (50% in peak hours, 80% otherwise).
    ///
    /// The charge is the minimum of the available solar power, the charge
    /// rate, and the energy needed to reach the ceiling. Returns the energy
    /// charged in kWh (zero when there is no irradiance or the ceiling is
    /// already reached).
    pub fn charge_from_solar(&mut self, irradiance_kw_m2: f32, in_peak_hours: bool) -> f32 {
        if irradiance_kw_m2 <= 0.0 {
            return 0.0;
        }
        let ceiling = if in_peak_hours {
            SOC_PEAK_CHARGE_CAP_PERCENT
        } else {
            SOC_CHARGE_CEILING_PERCENT
        };
        if self.soc_percent >= ceiling {
            return 0.0;
        }

        let solar_kw = self.solar_power_kw(irradiance_kw_m2);
        let needed_kwh = (ceiling - self.soc_percent) * self.capacity_kwh / 100.0;
        let charge_kwh = solar_kw
            .min(self.charge_rate * self.capacity_kwh)
            .min(needed_kwh);

        self.apply_soc_delta(charge_kwh / self.capacity_kwh * 100.0);
        assert!(
            self.soc_percent <= ceiling + 1e-4,
            "charging overshot the {ceiling}% ceiling: SoC = {}",
            self.soc_percent
        );
        charge_kwh
    }

    /// Discharges to pull the hour's demand down toward `threshold_kw`.
    ///
    /// Only discharges while SoC is above the 30% reserve floor and demand
    /// exceeds the threshold. The discharge is the minimum of the discharge
    /// rate, the excess demand, and the energy above the reserve floor.
    /// Returns the discharged power in kW (zero when conditions are unmet).
    pub fn discharge_for_demand(&mut self, demand_kw: f32, threshold_kw: f32) -> f32 {
        if self.soc_percent <= SOC_RESERVE_FLOOR_PERCENT || demand_kw <= threshold_kw {
            return 0.0;
        }

        let headroom_kwh =
            (self.soc_percent - SOC_RESERVE_FLOOR_PERCENT) * self.capacity_kwh / 100.0;
        let discharge_kw = self
            .max_discharge_kw()
            .min(demand_kw - threshold_kw)
            .min(headroom_kwh);

        assert!(
            discharge_kw >= 0.0 && discharge_kw <= self.max_discharge_kw() + 1e-6,
            "discharge {discharge_kw} kW exceeds the rate limit"
        );

        self.apply_soc_delta(-(discharge_kw / self.capacity_kwh * 100.0));
        assert!(
            self.soc_percent >= SOC_RESERVE_FLOOR_PERCENT - 1e-4,
            "discharge drew SoC below the reserve floor: {}",
            self.soc_percent
        );
        discharge_kw
    }

    fn apply_soc_delta(&mut self, delta_percent: f32) {
        self.soc_percent = (self.soc_percent + delta_percent).clamp(0.0, 100.0);
    }
}

//! TOML-based scenario configuration and preset definitions.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::HOURS_PER_DAY;
use crate::devices::{ApplianceLoad, Battery, IrradianceProfile, Season};
use crate::error::{ConfigError, InputError};
use crate::sim::cost::TariffSchedule;
use crate::sim::engine::Engine;
use crate::sim::scheduler::LoadScheduler;
use crate::sim::types::PeakHours;

/// Seed offset for the summer irradiance RNG to avoid correlation with the
/// winter profile.
const SUMMER_SEED_OFFSET: u64 = 31;

/// Top-level scenario configuration parsed from TOML.
///
/// All fields have defaults matching the baseline scenario except the
/// appliance list, which every scenario must provide. Load from TOML with
/// [`ScenarioConfig::from_toml_file`] or use [`ScenarioConfig::baseline`]
/// for the built-in default household.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Threshold, peak window, and seeding.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Battery and rooftop panel parameters.
    #[serde(default)]
    pub battery: BatteryConfig,
    /// Synthetic clear-sky irradiance parameters.
    #[serde(default)]
    pub solar: SolarConfig,
    /// Tariff band rates.
    #[serde(default)]
    pub tariff: TariffConfig,
    /// Load-shifting policy.
    #[serde(default)]
    pub scheduler: SchedulerConfig,
    /// Household appliances with per-season operating windows.
    #[serde(default)]
    pub appliances: Vec<ApplianceConfig>,
}

/// Threshold, peak window, and seeding.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationConfig {
    /// Peak-hour demand threshold in kW.
    pub threshold_kw: f32,
    /// First peak hour (inclusive).
    pub peak_start_hour: usize,
    /// Last peak hour (inclusive).
    pub peak_end_hour: usize,
    /// Master random seed for synthetic irradiance.
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            threshold_kw: 3.0,
            peak_start_hour: 17,
            peak_end_hour: 22,
            seed: 42,
        }
    }
}

/// Battery and rooftop panel parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatteryConfig {
    /// Total energy capacity (kWh).
    pub capacity_kwh: f32,
    /// Maximum charge per hour as a fraction of capacity.
    pub charge_rate: f32,
    /// Maximum discharge per hour as a fraction of capacity.
    pub discharge_rate: f32,
    /// Initial state of charge in percent.
    pub initial_soc_percent: f32,
    /// Rooftop panel area (m²).
    pub panel_area_m2: f32,
    /// Panel conversion efficiency (0.0 to 1.0).
    pub panel_efficiency: f32,
}

impl Default for BatteryConfig {
    fn default() -> Self {
        Self {
            capacity_kwh: 5.0,
            charge_rate: 0.2,
            discharge_rate: 0.3,
            initial_soc_percent: 10.0,
            panel_area_m2: 10.0,
            panel_efficiency: 0.70,
        }
    }
}

/// Synthetic clear-sky irradiance parameters, used when no weather file is
/// supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolarConfig {
    /// Midday peak irradiance in winter (kW/m²).
    pub winter_peak_kw_m2: f32,
    /// Midday peak irradiance in summer (kW/m²).
    pub summer_peak_kw_m2: f32,
    /// Sunrise hour (inclusive).
    pub sunrise_hour: usize,
    /// Sunset hour (exclusive).
    pub sunset_hour: usize,
    /// Multiplicative cloud-noise standard deviation.
    pub noise_std: f32,
}

impl Default for SolarConfig {
    fn default() -> Self {
        Self {
            winter_peak_kw_m2: 0.35,
            summer_peak_kw_m2: 0.75,
            sunrise_hour: 7,
            sunset_hour: 19,
            noise_std: 0.05,
        }
    }
}

/// Tariff band rates in $ per kWh.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TariffConfig {
    /// Peak-hour rate.
    pub peak_rate: f32,
    /// Mid-peak rate.
    pub mid_peak_rate: f32,
    /// Off-peak rate.
    pub off_peak_rate: f32,
    /// Start of the mid-peak band (inclusive).
    pub mid_peak_start_hour: usize,
    /// End of the mid-peak band (exclusive).
    pub mid_peak_end_hour: usize,
}

impl Default for TariffConfig {
    fn default() -> Self {
        Self {
            peak_rate: 0.30,
            mid_peak_rate: 0.20,
            off_peak_rate: 0.10,
            mid_peak_start_hour: 6,
            mid_peak_end_hour: 17,
        }
    }
}

/// Load-shifting policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// Appliances at or below this priority group are essential and never
    /// moved.
    pub min_shiftable_priority: u8,
    /// First hour of the relocation block.
    pub relocation_start_hour: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            min_shiftable_priority: 2,
            relocation_start_hour: 23,
        }
    }
}

/// One appliance with optional per-season operating windows.
///
/// A window is `[start_hour, end_hour]` with hours in `0..=24`; equal
/// hours mean always-on and `end < start` wraps past midnight. An absent
/// window means the appliance is unused that season.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApplianceConfig {
    /// Display name.
    pub name: String,
    /// Rated power draw in kW.
    pub rated_power_kw: f32,
    /// Shedding rank; higher moves first.
    pub priority_group: u8,
    /// Winter operating window.
    #[serde(default)]
    pub winter_hours: Option<[u8; 2]>,
    /// Summer operating window.
    #[serde(default)]
    pub summer_hours: Option<[u8; 2]>,
}

impl ApplianceConfig {
    fn window_for(&self, season: Season) -> Option<[u8; 2]> {
        match season {
            Season::Winter => self.winter_hours,
            Season::Summer => self.summer_hours,
        }
    }
}

fn appliance(
    name: &str,
    rated_power_kw: f32,
    priority_group: u8,
    winter_hours: Option<[u8; 2]>,
    summer_hours: Option<[u8; 2]>,
) -> ApplianceConfig {
    ApplianceConfig {
        name: name.to_string(),
        rated_power_kw,
        priority_group,
        winter_hours,
        summer_hours,
    }
}

impl ScenarioConfig {
    /// Returns the baseline scenario: a nine-appliance household with the
    /// default battery, tariff, and 3 kW threshold.
    pub fn baseline() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            battery: BatteryConfig::default(),
            solar: SolarConfig::default(),
            tariff: TariffConfig::default(),
            scheduler: SchedulerConfig::default(),
            appliances: vec![
                appliance("Refrigerator", 0.15, 1, Some([0, 0]), Some([0, 0])),
                appliance("Lighting", 0.4, 1, Some([17, 23]), Some([19, 23])),
                appliance("Electric Heater", 2.0, 2, Some([16, 22]), None),
                appliance("Air Conditioner", 1.8, 2, None, Some([14, 21])),
                appliance("Oven", 2.2, 3, Some([17, 19]), Some([17, 18])),
                appliance("Water Heater", 1.5, 3, Some([17, 20]), Some([18, 20])),
                appliance("Washing Machine", 0.9, 4, Some([18, 20]), Some([18, 20])),
                appliance("Dishwasher", 1.2, 5, Some([19, 21]), Some([20, 22])),
                appliance("Tumble Dryer", 1.5, 5, Some([20, 22]), Some([21, 23])),
            ],
        }
    }

    /// Returns the pv-heavy preset: a large array and battery that can
    /// carry most of the evening peak.
    pub fn pv_heavy() -> Self {
        Self {
            battery: BatteryConfig {
                capacity_kwh: 10.0,
                initial_soc_percent: 30.0,
                panel_area_m2: 16.0,
                ..BatteryConfig::default()
            },
            solar: SolarConfig {
                winter_peak_kw_m2: 0.5,
                summer_peak_kw_m2: 0.9,
                sunrise_hour: 6,
                sunset_hour: 20,
                ..SolarConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Returns the tight-grid preset: a 2 kW threshold and a small battery,
    /// leaving plenty of work for the scheduler.
    pub fn tight_grid() -> Self {
        Self {
            simulation: SimulationConfig {
                threshold_kw: 2.0,
                ..SimulationConfig::default()
            },
            battery: BatteryConfig {
                capacity_kwh: 4.0,
                discharge_rate: 0.25,
                ..BatteryConfig::default()
            },
            ..Self::baseline()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["baseline", "pv_heavy", "tight_grid"];

    /// Loads a scenario from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "baseline" => Ok(Self::baseline()),
            "pv_heavy" => Ok(Self::pv_heavy()),
            "tight_grid" => Ok(Self::tight_grid()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a scenario from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is
    /// invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a scenario from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown
    /// fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let s = &self.simulation;

        if !s.threshold_kw.is_finite() || s.threshold_kw < 0.0 {
            errors.push(ConfigError::new(
                "simulation.threshold_kw",
                "must be finite and >= 0",
            ));
        }
        if s.peak_end_hour >= HOURS_PER_DAY {
            errors.push(ConfigError::new("simulation.peak_end_hour", "must be <= 23"));
        }
        if s.peak_start_hour > s.peak_end_hour {
            errors.push(ConfigError::new(
                "simulation.peak_start_hour",
                "must be <= simulation.peak_end_hour",
            ));
        }

        let b = &self.battery;
        if !(b.capacity_kwh.is_finite() && b.capacity_kwh > 0.0) {
            errors.push(ConfigError::new("battery.capacity_kwh", "must be > 0"));
        }
        if !(b.charge_rate.is_finite() && b.charge_rate >= 0.0) {
            errors.push(ConfigError::new("battery.charge_rate", "must be >= 0"));
        }
        if !(b.discharge_rate.is_finite() && b.discharge_rate >= 0.0) {
            errors.push(ConfigError::new("battery.discharge_rate", "must be >= 0"));
        }
        if !(0.0..=100.0).contains(&b.initial_soc_percent) {
            errors.push(ConfigError::new(
                "battery.initial_soc_percent",
                "must be in [0, 100]",
            ));
        }
        if !(b.panel_area_m2.is_finite() && b.panel_area_m2 >= 0.0) {
            errors.push(ConfigError::new("battery.panel_area_m2", "must be >= 0"));
        }
        if !(0.0..=1.0).contains(&b.panel_efficiency) {
            errors.push(ConfigError::new(
                "battery.panel_efficiency",
                "must be in [0.0, 1.0]",
            ));
        }

        let sol = &self.solar;
        if sol.sunrise_hour >= sol.sunset_hour {
            errors.push(ConfigError::new(
                "solar.sunrise_hour",
                "must be < solar.sunset_hour",
            ));
        }
        if sol.sunset_hour > HOURS_PER_DAY {
            errors.push(ConfigError::new("solar.sunset_hour", "must be <= 24"));
        }
        for (field, value) in [
            ("solar.winter_peak_kw_m2", sol.winter_peak_kw_m2),
            ("solar.summer_peak_kw_m2", sol.summer_peak_kw_m2),
            ("solar.noise_std", sol.noise_std),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be >= 0"));
            }
        }

        let t = &self.tariff;
        for (field, value) in [
            ("tariff.peak_rate", t.peak_rate),
            ("tariff.mid_peak_rate", t.mid_peak_rate),
            ("tariff.off_peak_rate", t.off_peak_rate),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                errors.push(ConfigError::new(field, "must be >= 0"));
            }
        }
        if !(t.peak_rate > t.mid_peak_rate && t.mid_peak_rate > t.off_peak_rate) {
            errors.push(ConfigError::new(
                "tariff.peak_rate",
                "bands must satisfy peak > mid-peak > off-peak",
            ));
        }
        if t.mid_peak_start_hour >= t.mid_peak_end_hour {
            errors.push(ConfigError::new(
                "tariff.mid_peak_start_hour",
                "must be < tariff.mid_peak_end_hour",
            ));
        }
        if t.mid_peak_end_hour > HOURS_PER_DAY {
            errors.push(ConfigError::new("tariff.mid_peak_end_hour", "must be <= 24"));
        }

        if self.scheduler.relocation_start_hour >= HOURS_PER_DAY {
            errors.push(ConfigError::new(
                "scheduler.relocation_start_hour",
                "must be <= 23",
            ));
        }

        if self.appliances.is_empty() {
            errors.push(ConfigError::new(
                "appliances",
                "at least one appliance is required",
            ));
        }
        for (index, a) in self.appliances.iter().enumerate() {
            let field = |suffix: &str| format!("appliances[{index}].{suffix}");
            if !(a.rated_power_kw.is_finite() && a.rated_power_kw >= 0.0) {
                errors.push(ConfigError::new(field("rated_power_kw"), "must be >= 0"));
            }
            if a.winter_hours.is_none() && a.summer_hours.is_none() {
                errors.push(ConfigError::new(
                    field("winter_hours"),
                    "at least one seasonal window is required",
                ));
            }
            for (name, window) in [
                ("winter_hours", a.winter_hours),
                ("summer_hours", a.summer_hours),
            ] {
                if let Some([start, end]) = window {
                    if usize::from(start) > HOURS_PER_DAY || usize::from(end) > HOURS_PER_DAY {
                        errors.push(ConfigError::new(
                            field(name),
                            "hours must be within 0..=24",
                        ));
                    }
                }
            }
        }

        errors
    }

    /// The peak-hour window described by `[simulation]`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for an inverted or out-of-range window.
    pub fn peak_hours(&self) -> Result<PeakHours, InputError> {
        PeakHours::from_range_inclusive(self.simulation.peak_start_hour, self.simulation.peak_end_hour)
    }

    /// The tariff schedule described by `[tariff]`.
    pub fn tariff_schedule(&self) -> TariffSchedule {
        TariffSchedule {
            peak_rate: self.tariff.peak_rate,
            mid_peak_rate: self.tariff.mid_peak_rate,
            off_peak_rate: self.tariff.off_peak_rate,
            mid_peak_start_hour: self.tariff.mid_peak_start_hour,
            mid_peak_end_hour: self.tariff.mid_peak_end_hour,
        }
    }

    /// The scheduling policy described by `[scheduler]`.
    pub fn load_scheduler(&self) -> LoadScheduler {
        LoadScheduler {
            min_shiftable_priority: self.scheduler.min_shiftable_priority,
            relocation_start_hour: self.scheduler.relocation_start_hour,
        }
    }

    /// A fresh battery built from `[battery]`. Call once per season.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for out-of-range battery parameters.
    pub fn battery(&self) -> Result<Battery, InputError> {
        let b = &self.battery;
        Battery::new(
            b.capacity_kwh,
            b.charge_rate,
            b.discharge_rate,
            b.initial_soc_percent,
            b.panel_area_m2,
            b.panel_efficiency,
        )
    }

    /// The appliance collection for one season. Appliances without a
    /// window for that season are omitted.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for out-of-range hours or non-finite
    /// power.
    pub fn loads_for(&self, season: Season) -> Result<Vec<ApplianceLoad>, InputError> {
        self.appliances
            .iter()
            .filter_map(|a| {
                a.window_for(season).map(|[start, end]| {
                    ApplianceLoad::new(&a.name, a.rated_power_kw, a.priority_group, start, end)
                })
            })
            .collect()
    }

    /// A synthetic clear-sky irradiance profile for one season, seeded
    /// from `[simulation].seed`.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for an invalid daylight window.
    pub fn irradiance_for(&self, season: Season) -> Result<IrradianceProfile, InputError> {
        let (peak_kw_m2, seed) = match season {
            Season::Winter => (self.solar.winter_peak_kw_m2, self.simulation.seed),
            Season::Summer => (
                self.solar.summer_peak_kw_m2,
                self.simulation.seed.wrapping_add(SUMMER_SEED_OFFSET),
            ),
        };
        IrradianceProfile::clear_sky(
            peak_kw_m2,
            self.solar.sunrise_hour,
            self.solar.sunset_hour,
            self.solar.noise_std,
            seed,
        )
    }

    /// The analysis engine described by this scenario.
    ///
    /// # Errors
    ///
    /// Returns an [`InputError`] for an invalid threshold or peak window.
    pub fn engine(&self) -> Result<Engine, InputError> {
        Engine::new(
            self.simulation.threshold_kw,
            self.peak_hours()?,
            self.tariff_schedule(),
            self.load_scheduler(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseline_preset_valid() {
        let cfg = ScenarioConfig::baseline();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "baseline should be valid: {errors:?}");
    }

    #[test]
    fn all_presets_are_valid() {
        for name in ScenarioConfig::PRESETS {
            let cfg = ScenarioConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
        }
    }

    #[test]
    fn from_preset_unknown() {
        let err = ScenarioConfig::from_preset("nonexistent");
        assert!(err.is_err());
        let e = err.unwrap_err();
        assert!(e.message.contains("unknown preset"));
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[simulation]
threshold_kw = 2.5
peak_start_hour = 18
peak_end_hour = 21
seed = 99

[battery]
capacity_kwh = 8.0
charge_rate = 0.25
discharge_rate = 0.4
initial_soc_percent = 20.0
panel_area_m2 = 12.0
panel_efficiency = 0.65

[solar]
winter_peak_kw_m2 = 0.3
summer_peak_kw_m2 = 0.8
sunrise_hour = 6
sunset_hour = 20
noise_std = 0.1

[tariff]
peak_rate = 0.40
mid_peak_rate = 0.22
off_peak_rate = 0.12
mid_peak_start_hour = 7
mid_peak_end_hour = 18

[scheduler]
min_shiftable_priority = 3
relocation_start_hour = 22

[[appliances]]
name = "Heat Pump"
rated_power_kw = 2.4
priority_group = 2
winter_hours = [16, 22]

[[appliances]]
name = "Dishwasher"
rated_power_kw = 1.2
priority_group = 5
winter_hours = [19, 21]
summer_hours = [20, 22]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.expect("parsed");
        assert_eq!(cfg.simulation.threshold_kw, 2.5);
        assert_eq!(cfg.battery.capacity_kwh, 8.0);
        assert_eq!(cfg.appliances.len(), 2);
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[simulation]
threshold_kw = 3.0
bogus_field = true
"#;
        let result = ScenarioConfig::from_toml_str(toml);
        assert!(result.is_err());
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[simulation]
seed = 99

[[appliances]]
name = "Heater"
rated_power_kw = 2.0
priority_group = 3
winter_hours = [17, 21]
"#;
        let cfg = ScenarioConfig::from_toml_str(toml).expect("parses");
        assert_eq!(cfg.simulation.seed, 99);
        // threshold and peak window kept default
        assert_eq!(cfg.simulation.threshold_kw, 3.0);
        assert_eq!(cfg.simulation.peak_start_hour, 17);
        assert_eq!(cfg.battery.capacity_kwh, 5.0);
    }

    #[test]
    fn validation_catches_zero_capacity() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.capacity_kwh = 0.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "battery.capacity_kwh"));
    }

    #[test]
    fn validation_catches_invalid_soc() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.battery.initial_soc_percent = 150.0;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "battery.initial_soc_percent")
        );
    }

    #[test]
    fn validation_catches_inverted_peak_window() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.peak_start_hour = 22;
        cfg.simulation.peak_end_hour = 17;
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "simulation.peak_start_hour")
        );
    }

    #[test]
    fn validation_catches_negative_threshold() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.simulation.threshold_kw = -3.0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "simulation.threshold_kw"));
    }

    #[test]
    fn validation_catches_unordered_tariff_bands() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.tariff.mid_peak_rate = 0.5;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "tariff.peak_rate"));
    }

    #[test]
    fn validation_requires_appliances() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.appliances.clear();
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "appliances"));
    }

    #[test]
    fn validation_requires_some_seasonal_window() {
        let mut cfg = ScenarioConfig::baseline();
        cfg.appliances[0].winter_hours = None;
        cfg.appliances[0].summer_hours = None;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field.contains("appliances[0]")));
    }

    #[test]
    fn seasonal_loads_follow_the_windows() {
        let cfg = ScenarioConfig::baseline();
        let winter = cfg.loads_for(Season::Winter).expect("valid loads");
        let summer = cfg.loads_for(Season::Summer).expect("valid loads");

        // The heater only runs in winter, the air conditioner in summer.
        assert!(winter.iter().any(|l| l.name == "Electric Heater"));
        assert!(!winter.iter().any(|l| l.name == "Air Conditioner"));
        assert!(summer.iter().any(|l| l.name == "Air Conditioner"));
        assert!(!summer.iter().any(|l| l.name == "Electric Heater"));
    }

    #[test]
    fn synthetic_irradiance_is_deterministic_and_seasonal() {
        let cfg = ScenarioConfig::baseline();
        let winter_a = cfg.irradiance_for(Season::Winter).expect("valid solar");
        let winter_b = cfg.irradiance_for(Season::Winter).expect("valid solar");
        assert_eq!(winter_a, winter_b);

        let summer = cfg.irradiance_for(Season::Summer).expect("valid solar");
        assert_ne!(winter_a, summer);
        // Summer midday outshines winter midday.
        assert!(summer.at(12) > winter_a.at(12));
    }

    #[test]
    fn pv_heavy_has_larger_array() {
        let base = ScenarioConfig::baseline();
        let pv = ScenarioConfig::pv_heavy();
        assert!(pv.battery.panel_area_m2 > base.battery.panel_area_m2);
        assert!(pv.battery.capacity_kwh > base.battery.capacity_kwh);
    }

    #[test]
    fn tight_grid_has_lower_threshold() {
        let base = ScenarioConfig::baseline();
        let tight = ScenarioConfig::tight_grid();
        assert!(tight.simulation.threshold_kw < base.simulation.threshold_kw);
    }

    #[test]
    fn engine_builds_from_baseline() {
        let cfg = ScenarioConfig::baseline();
        let engine = cfg.engine().expect("valid engine");
        assert_eq!(engine.threshold_kw(), 3.0);
        assert!(engine.peak_hours().contains(17));
        assert!(engine.peak_hours().contains(22));
    }
}

//! Shared test fixtures for integration tests.

use peakshift::devices::{ApplianceLoad, Battery, IrradianceProfile};
use peakshift::sim::cost::TariffSchedule;
use peakshift::sim::engine::Engine;
use peakshift::sim::scheduler::LoadScheduler;
use peakshift::sim::types::PeakHours;

/// Default engine (3 kW threshold, 17..=22 peak window, default tariff and
/// scheduler policy).
pub fn default_engine() -> Engine {
    Engine::new(
        3.0,
        PeakHours::default(),
        TariffSchedule::default(),
        LoadScheduler::default(),
    )
    .expect("default engine is valid")
}

/// Default battery (10 kWh, 0.2/0.3 rates, 10 m² panels at 70%).
pub fn default_battery(initial_soc_percent: f32) -> Battery {
    Battery::new(10.0, 0.2, 0.3, initial_soc_percent, 10.0, 0.7).expect("default battery is valid")
}

/// Appliance shorthand for test scenarios.
pub fn appliance(name: &str, kw: f32, priority: u8, start: u8, end: u8) -> ApplianceLoad {
    ApplianceLoad::new(name, kw, priority, start, end).expect("valid appliance")
}

/// A small evening-heavy household.
pub fn household() -> Vec<ApplianceLoad> {
    vec![
        appliance("Refrigerator", 0.2, 1, 0, 0),
        appliance("Electric Heater", 2.0, 2, 16, 22),
        appliance("Oven", 2.2, 3, 17, 19),
        appliance("Washing Machine", 0.9, 4, 18, 20),
        appliance("Dishwasher", 1.2, 5, 19, 21),
    ]
}

/// A deterministic sunny day peaking at 0.8 kW/m².
pub fn sunny_day() -> IrradianceProfile {
    IrradianceProfile::clear_sky(0.8, 7, 19, 0.0, 42).expect("valid daylight window")
}

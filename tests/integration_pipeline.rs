//! End-to-end properties of the battery, scheduler, and costing pipeline.

mod common;

use peakshift::devices::{ApplianceLoad, IrradianceProfile};
use peakshift::sim::cost::TariffSchedule;
use peakshift::sim::profile::HourlyProfile;
use peakshift::sim::types::PeakHours;

#[test]
fn round_trip_single_overloaded_appliance() {
    // A single 5 kW appliance over 18..20 against a 3 kW threshold. The
    // battery sits at 10% SoC with no sun, so shaving falls entirely to
    // the scheduler: the window relocates to 23..1 and the peak empties.
    let engine = common::default_engine();
    let loads = vec![common::appliance("Washer", 5.0, 4, 18, 20)];
    let report = engine
        .run(&loads, &IrradianceProfile::zero(), common::default_battery(10.0))
        .expect("valid run");

    assert_eq!(report.moved_appliances, 1);
    assert!(report.unresolved.is_empty());

    let washer = report
        .shifted_loads
        .iter()
        .find(|l| l.name == "Washer")
        .expect("washer present");
    assert_eq!(washer.start_hour(), 23);
    assert_eq!(washer.end_hour(), 1);
    assert_eq!(washer.duration_hours(), 2);

    assert_eq!(report.shifted_profile.at(18), 0.0);
    assert_eq!(report.shifted_profile.at(19), 0.0);
    assert_eq!(report.shifted_profile.at(23), 5.0);
    assert_eq!(report.shifted_profile.at(0), 5.0);

    // Off-peak beats peak pricing.
    assert!(report.shifted_cost < report.original_cost);
}

#[test]
fn reserve_floor_blocks_discharge_all_day() {
    // 10 kWh at 10% SoC against an 8 kW peak demand: every hour records
    // zero discharge and SoC never moves.
    let engine = common::default_engine();
    let loads = vec![common::appliance("Everything", 8.0, 2, 17, 23)];
    let report = engine
        .run(&loads, &IrradianceProfile::zero(), common::default_battery(10.0))
        .expect("valid run");

    assert_eq!(report.discharge_schedule.len(), 24);
    for record in &report.discharge_schedule {
        assert_eq!(record.discharge_kw, 0.0);
        assert_eq!(record.soc_after_percent, 10.0);
    }
    assert_eq!(report.battery_cost, report.original_cost);
}

#[test]
fn soc_and_discharge_invariants_hold_across_a_rich_day() {
    let engine = common::default_engine();
    let report = engine
        .run(&common::household(), &common::sunny_day(), common::default_battery(40.0))
        .expect("valid run");

    let mut soc_before = 40.0_f32;
    for record in &report.discharge_schedule {
        assert!((0.0..=100.0).contains(&record.soc_after_percent));
        // Never beyond the rate limit or the 30% reserve headroom.
        assert!(record.discharge_kw <= 3.0 + 1e-5);
        let headroom_kw = ((soc_before - 30.0) / 100.0 * 10.0).max(0.0);
        assert!(record.discharge_kw <= headroom_kw + 1e-5);
        soc_before = record.soc_after_percent;
    }
}

#[test]
fn shifting_conserves_per_appliance_energy() {
    let engine = common::default_engine();
    let loads = common::household();
    let report = engine
        .run(&loads, &IrradianceProfile::zero(), common::default_battery(90.0))
        .expect("valid run");

    // Every input appliance keeps its rated power and duration; only
    // windows may differ. Discharge entries are additions, not edits.
    for original in &loads {
        let shifted = report
            .shifted_loads
            .iter()
            .find(|l| l.name == original.name)
            .expect("appliance still present");
        assert_eq!(shifted.rated_power_kw, original.rated_power_kw);
        assert_eq!(shifted.duration_hours(), original.duration_hours());
        assert!((shifted.energy_kwh() - original.energy_kwh()).abs() < 1e-5);
    }
}

#[test]
fn battery_shaving_never_raises_cost() {
    let engine = common::default_engine();
    for soc in [0.0, 10.0, 35.0, 60.0, 95.0] {
        let report = engine
            .run(&common::household(), &common::sunny_day(), common::default_battery(soc))
            .expect("valid run");
        assert!(report.battery_cost <= report.original_cost + 1e-5);
        assert!(report.shifted_cost <= report.battery_cost + 1e-5);
    }
}

#[test]
fn cost_is_linear_in_the_profile() {
    let tariff = TariffSchedule::default();
    let peak = PeakHours::default();
    let profile = HourlyProfile::from_appliances(&common::household());

    let base_cost = tariff.energy_cost(&profile, &peak);
    for factor in [0.5, 2.0, 7.25] {
        let scaled_cost = tariff.energy_cost(&profile.scaled(factor), &peak);
        assert!((scaled_cost - factor * base_cost).abs() < 1e-3);
    }
}

#[test]
fn flat_kilowatt_costs_are_band_arithmetic() {
    let tariff = TariffSchedule::default();
    let flat = HourlyProfile::from_appliances(&[common::appliance("Flat", 1.0, 1, 0, 0)]);

    // Default inclusive 17..=22 window: 6*0.3 + 11*0.2 + 7*0.1.
    let inclusive = tariff.energy_cost(&flat, &PeakHours::default());
    assert!((inclusive - 4.7).abs() < 1e-5);

    // Exclusive 17..21 window: 5*0.3 + 11*0.2 + 8*0.1.
    let exclusive_window = PeakHours::from_range_inclusive(17, 21).expect("valid window");
    let exclusive = tariff.energy_cost(&flat, &exclusive_window);
    assert!((exclusive - 4.5).abs() < 1e-5);
}

#[test]
fn pipeline_is_deterministic() {
    let engine = common::default_engine();
    let run = |soc: f32| {
        engine
            .run(&common::household(), &common::sunny_day(), common::default_battery(soc))
            .expect("valid run")
    };
    let a = run(40.0);
    let b = run(40.0);
    assert_eq!(a.original_profile, b.original_profile);
    assert_eq!(a.battery_profile, b.battery_profile);
    assert_eq!(a.shifted_profile, b.shifted_profile);
    assert_eq!(a.original_cost, b.original_cost);
    assert_eq!(a.battery_cost, b.battery_cost);
    assert_eq!(a.shifted_cost, b.shifted_cost);
}

#[test]
fn discharge_entries_line_up_with_the_schedule() {
    let engine = common::default_engine();
    let report = engine
        .run(&common::household(), &IrradianceProfile::zero(), common::default_battery(90.0))
        .expect("valid run");

    let entries: Vec<&ApplianceLoad> = report
        .shifted_loads
        .iter()
        .filter(|l| l.rated_power_kw < 0.0)
        .collect();
    let discharging_hours = report
        .discharge_schedule
        .iter()
        .filter(|r| r.discharge_kw > 0.0)
        .count();
    assert_eq!(entries.len(), discharging_hours);
    assert!(discharging_hours > 0, "scenario should exercise the battery");

    for entry in entries {
        let record = &report.discharge_schedule[usize::from(entry.start_hour())];
        assert!((entry.rated_power_kw + record.discharge_kw).abs() < 1e-6);
    }
}

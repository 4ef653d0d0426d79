use fcs_schema::{CalculationDefaults, FuelCellSpec, FuelType, SizingInputs, Technology};
use fcs_sizing::{PaybackStatus, calculate};

fn ballard() -> FuelCellSpec {
    FuelCellSpec {
        manufacturer: "Ballard".to_string(),
        model: "FCgen-H2PM".to_string(),
        technology: Technology::Pemfc,
        rated_power_kw: 5.0,
        min_power_kw: 1.0,
        max_power_kw: Some(5.0),
        output_voltage_v: 48.0,
        fuel_consumption_per_kwh: 0.06,
        efficiency: 50.0,
        parasitic_loss: 0.08,
        fuel_type: FuelType::Hydrogen,
        lhv: 33.3,
        capex_per_kw: 3500.0,
        datasheet_url: None,
        source: None,
        reference_url: None,
        telecom_application: None,
    }
}

fn close(a: f64, b: f64, tol: f64) {
    assert!((a - b).abs() <= tol, "{a} != {b} (tol {tol})");
}

#[test]
fn five_kw_eight_hours_at_defaults() {
    let inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
    let report = calculate(&inputs, &ballard()).unwrap();

    close(report.battery_capacity_kwh, 50.0, 1e-9);
    close(report.battery_capacity_ah, 1041.7, 0.05);
    assert_eq!(report.battery_strings, 7);

    assert_eq!(report.derating_factor, 1.0);
    assert_eq!(report.required_stack_count, 2);
    assert!(report.needs_multiple_stacks);
    assert!(!report.is_undersized);
    close(report.fc_capex, 35_000.0, 1e-6);

    close(report.fuel_consumption_hourly, 0.3003, 1e-4);
    close(report.dg_daily_cost, 73.248, 1e-9);
    close(report.fc_daily_cost, 120.1189, 1e-4);
    assert!(report.annual_savings < 0.0);
    assert_eq!(report.payback_years, None);
    assert_eq!(report.payback_status, PaybackStatus::DieselFavorable);

    assert_eq!(report.cylinders_required, 57);
    assert_eq!(report.bundles_required, 5);
}

#[test]
fn expensive_diesel_pays_back_fast() {
    let mut inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
    inputs.diesel_price = 3.0;
    inputs.h2_price = 5.0;
    let report = calculate(&inputs, &ballard()).unwrap();

    close(report.daily_savings, 154.9044, 1e-3);
    close(report.payback_years.unwrap(), 0.5306, 1e-3);
    assert_eq!(report.payback_status, PaybackStatus::Excellent);
    assert!(report.fc_tco_10yr < report.dg_tco_10yr);
}

#[test]
fn hot_high_site_is_derated() {
    let mut inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
    inputs.max_temperature = 45.0;
    inputs.altitude = 1500.0;
    let report = calculate(&inputs, &ballard()).unwrap();

    close(report.derating_factor, 0.75, 1e-12);
    close(report.gross_power_required, 6.6667, 1e-4);
    close(report.fc_derated_power, 3.45, 1e-9);
    assert_eq!(report.required_stack_count, 2);
}

#[test]
fn zero_load_has_no_margin() {
    let inputs = SizingInputs::with_defaults(0.0, 8.0, &CalculationDefaults::default());
    let report = calculate(&inputs, &ballard()).unwrap();
    assert_eq!(report.capacity_margin, None);
    assert_eq!(report.required_stack_count, 1);
    assert_eq!(report.battery_capacity_kwh, 0.0);
}

#[test]
fn rounded_view_matches_wire_precision() {
    let inputs = SizingInputs::with_defaults(5.0, 8.0, &CalculationDefaults::default());
    let report = calculate(&inputs, &ballard()).unwrap().rounded();

    assert_eq!(report.battery_capacity_kwh, 50.0);
    assert_eq!(report.battery_capacity_ah, 1041.7);
    assert_eq!(report.cable_size_mm2, 26.0);
    assert_eq!(report.fuel_consumption_hourly, 0.3);
    assert_eq!(report.dg_load_factor, 31.0);
    assert_eq!(report.capacity_margin, Some(84.0));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["paybackStatus"], "diesel-favorable");
    assert!(json["paybackYears"].is_null());
    assert_eq!(json["totalH2Required"], 50.5);
    assert!(json.get("dgTco10yr").is_some());
}

#[test]
fn every_builtin_model_sizes_cleanly() {
    let catalog = fcs_schema::builtin_catalog().unwrap();
    let inputs = SizingInputs::with_defaults(3.0, 4.0, &CalculationDefaults::default());
    for spec in &catalog.fuel_cells {
        let report = calculate(&inputs, spec).unwrap();
        assert!(report.required_stack_count >= 1, "{}", spec.display_name());
        assert!(!report.is_undersized, "{}", spec.display_name());
    }
}

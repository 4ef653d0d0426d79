use fcs_schema::*;

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
        datasheet_url: Some("https://www.ballard.com/fuel-cell-solutions/backup-power".to_string()),
        source: Some("Ballard Power Systems".to_string()),
        reference_url: None,
        telecom_application: None,
    }
}

#[test]
fn roundtrip_yaml_catalog() {
    let catalog = CatalogFile {
        version: LATEST_VERSION,
        fuel_cells: vec![ballard()],
    };

    let path = std::env::temp_dir().join("fcs_schema_roundtrip_catalog.yaml");
    save_catalog(&path, &catalog).unwrap();
    let loaded = load_catalog(&path).unwrap();

    assert_eq!(catalog, loaded);
}

#[test]
fn roundtrip_json_catalog() {
    let catalog = CatalogFile {
        version: LATEST_VERSION,
        fuel_cells: vec![ballard()],
    };

    let path = std::env::temp_dir().join("fcs_schema_roundtrip_catalog.json");
    save_catalog(&path, &catalog).unwrap();
    let loaded = load_catalog(&path).unwrap();

    assert_eq!(catalog, loaded);
}

#[test]
fn v1_catalog_is_migrated_on_load() {
    let yaml = r#"
version: 1
fuel_cells:
  - manufacturer: Horizon
    model: H-3000
    type: PEMFC
    ratedPowerKw: 3.0
    outputVoltageV: 48
    fuelConsumptionPerKwh: 0.062
    efficiency: 48
    parasiticLoss: 7
"#;
    let catalog = parse_catalog_yaml(yaml).unwrap();
    assert_eq!(catalog.version, LATEST_VERSION);
    assert!((catalog.fuel_cells[0].parasitic_loss - 0.07).abs() < 1e-12);
}

#[test]
fn save_rejects_invalid_catalog() {
    let mut bad = ballard();
    bad.rated_power_kw = -1.0;
    let catalog = CatalogFile {
        version: LATEST_VERSION,
        fuel_cells: vec![bad],
    };

    let path = std::env::temp_dir().join("fcs_schema_invalid_catalog.yaml");
    let err = save_catalog(&path, &catalog).unwrap_err();
    assert!(matches!(err, SchemaError::Validation(_)));
}

#[test]
fn future_version_is_rejected() {
    let yaml = "version: 99\nfuel_cells: []\n";
    let err = parse_catalog_yaml(yaml).unwrap_err();
    assert!(matches!(
        err,
        SchemaError::Validation(ValidationError::UnsupportedVersion { version: 99 })
    ));
}

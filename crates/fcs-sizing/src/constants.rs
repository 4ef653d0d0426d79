//! Engineering constants of the sizing model.

/// Ambient temperature up to which stacks deliver rated power (°C).
pub const REFERENCE_TEMPERATURE_C: f64 = 35.0;
/// Fractional capacity lost per °C above the reference temperature.
pub const TEMPERATURE_DERATE_PER_C: f64 = 0.015;
/// Altitude up to which no derating applies (m).
pub const ALTITUDE_THRESHOLD_M: f64 = 500.0;
/// Fractional capacity lost per 100 m above the threshold.
pub const ALTITUDE_DERATE_PER_100M: f64 = 0.01;
/// Derating never goes below this factor.
pub const MIN_DERATING_FACTOR: f64 = 0.5;

/// Capacity of one battery block (Ah).
pub const BATTERY_BLOCK_AH: f64 = 150.0;

/// Allowed DC current density for copper cable (A/mm²).
pub const CABLE_CURRENT_DENSITY_A_PER_MM2: f64 = 4.0;

/// kW per kVA for generator nameplate ratings.
pub const DG_POWER_FACTOR: f64 = 0.8;
/// No-load burn per kW of generator rating (L/h/kW).
pub const DG_IDLE_FUEL_L_PER_KW: f64 = 0.07;
/// Incremental burn per kW of load (L/h/kW).
pub const DG_LOAD_FUEL_L_PER_KW: f64 = 0.24;
/// Generator maintenance ($/h).
pub const DG_MAINTENANCE_PER_HOUR: f64 = 0.50;
/// Fuel-cell maintenance ($/h).
pub const FC_MAINTENANCE_PER_HOUR: f64 = 0.05;
/// Diesel combustion emissions (kg CO2/L).
pub const DIESEL_CO2_KG_PER_L: f64 = 2.68;

/// Usable hydrogen in a 50 L cylinder at 200 bar (kg).
pub const H2_CYLINDER_KG: f64 = 0.89;
/// Cylinders per delivery bundle.
pub const CYLINDERS_PER_BUNDLE: f64 = 12.0;

/// Payback at or below this is rated excellent (years).
pub const PAYBACK_EXCELLENT_YEARS: f64 = 5.0;
/// Payback at or below this is rated good (years).
pub const PAYBACK_GOOD_YEARS: f64 = 10.0;
/// Horizon for total-cost-of-ownership figures (years).
pub const TCO_HORIZON_YEARS: f64 = 10.0;

/// Version stamped into input fingerprints.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

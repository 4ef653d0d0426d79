//! uom quantities for the electrical sizing steps.
//!
//! Engine inputs arrive as plain kW, V and hours; battery and cable sizing
//! go through these types so kWh, Ah and A come out of the unit system
//! rather than hand-placed factors of 1000.

use uom::si::f64::{
    ElectricCharge as UomElectricCharge, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, Energy as UomEnergy, Power as UomPower,
    Time as UomTime,
};

pub type Charge = UomElectricCharge;
pub type Current = UomElectricCurrent;
pub type Voltage = UomElectricPotential;
pub type Energy = UomEnergy;
pub type Power = UomPower;
pub type Time = UomTime;

#[inline]
pub fn kw(v: f64) -> Power {
    use uom::si::power::kilowatt;
    Power::new::<kilowatt>(v)
}

#[inline]
pub fn volts(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn hours(v: f64) -> Time {
    use uom::si::time::hour;
    Time::new::<hour>(v)
}

#[inline]
pub fn as_kwh(e: Energy) -> f64 {
    use uom::si::energy::kilowatt_hour;
    e.get::<kilowatt_hour>()
}

#[inline]
pub fn as_amp_hours(q: Charge) -> f64 {
    use uom::si::electric_charge::ampere_hour;
    q.get::<ampere_hour>()
}

#[inline]
pub fn as_amps(i: Current) -> f64 {
    use uom::si::electric_current::ampere;
    i.get::<ampere>()
}

pub mod constants {
    /// Hours in a day of continuous duty.
    pub const HOURS_PER_DAY: f64 = 24.0;
    /// Days used to annualize daily figures.
    pub const DAYS_PER_YEAR: f64 = 365.0;
    /// Upper bound for operating hours in a (non-leap) year.
    pub const HOURS_PER_YEAR_MAX: f64 = 8760.0;
}

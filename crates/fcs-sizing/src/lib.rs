//! fcs-sizing: the fuel-cell backup power sizing engine.
//!
//! One pure pass from resolved site inputs and a fuel-cell datasheet to a
//! [`SizingReport`]: derating, stack count, fuel burn, battery bank, cable,
//! diesel baseline, economics and refuelling logistics.

pub mod battery;
pub mod cable;
pub mod constants;
pub mod derating;
pub mod diesel;
pub mod economics;
pub mod engine;
pub mod error;
pub mod fuel;
pub mod power;
pub mod report;

pub use battery::BatteryBank;
pub use cable::CableSizing;
pub use constants::ENGINE_VERSION;
pub use derating::DeratingCurve;
pub use diesel::DieselBaseline;
pub use economics::{Financials, FuelCellCost, PaybackStatus};
pub use engine::{SizingEngine, StorageSizing, calculate};
pub use error::{SizingError, SizingResult};
pub use fuel::{FuelDemand, RefuelingPlan};
pub use power::StackSizing;
pub use report::SizingReport;

//! fcs-core: shared foundation for the fuel-cell sizing workspace.
//!
//! - `units`: uom SI quantities for the electrical values the engine sizes
//! - `numeric`: float helpers for rounding, counting and comparison
//! - `ids`: 1-based record ids for catalog and project rows
//! - `timing`: wall-clock timer for service instrumentation

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;
pub mod units;

pub use error::{CoreError, CoreResult};
pub use ids::*;
pub use numeric::*;
pub use timing::Timer;
pub use units::*;

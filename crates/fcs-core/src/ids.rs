use core::fmt;
use core::num::NonZeroU32;
use core::str::FromStr;

use crate::CoreError;

/// Identifier of a stored catalog or project row.
///
/// - 1-based like a database serial column; `0` is never a valid id
/// - `NonZero` enables `Option<RecordId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct RecordId(NonZeroU32);

impl RecordId {
    /// The first id handed out by an empty store.
    pub const FIRST: RecordId = RecordId(NonZeroU32::MIN);

    /// Wrap a raw serial value. Returns `None` for `0`.
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    /// Raw serial value.
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Id that follows this one. Saturates at `u32::MAX`.
    pub fn next(self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self.get())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

impl FromStr for RecordId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(RecordId::new)
            .ok_or_else(|| CoreError::InvalidId {
                input: s.to_string(),
            })
    }
}

/// Domain-specific ID aliases for clarity (no runtime cost).
pub type FuelCellId = RecordId;
pub type ProjectId = RecordId;

//! Content fingerprints for stored projects.

use fcs_schema::{FuelCellSpec, SizingInputs};
use sha2::{Digest, Sha256};

/// SHA-256 over the resolved inputs, the selected fuel-cell spec and the
/// engine version. Equal fingerprints mean equal computed outputs.
pub fn compute_input_fingerprint(
    inputs: &SizingInputs,
    fuel_cell: Option<&FuelCellSpec>,
    engine_version: &str,
) -> String {
    let mut hasher = Sha256::new();

    let inputs_json = serde_json::to_string(inputs).unwrap_or_default();
    hasher.update(inputs_json.as_bytes());

    match fuel_cell {
        Some(spec) => {
            let spec_json = serde_json::to_string(spec).unwrap_or_default();
            hasher.update(spec_json.as_bytes());
        }
        None => hasher.update(b"no-fuel-cell"),
    }

    hasher.update(engine_version.as_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}

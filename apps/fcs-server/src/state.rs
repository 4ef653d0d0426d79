use std::sync::Arc;

use fcs_schema::CalculationDefaults;
use fcs_store::Storage;

/// Shared handler state: the store and the configured calculation defaults.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Storage>,
    pub defaults: Arc<CalculationDefaults>,
}

impl AppState {
    pub fn new(store: Arc<dyn Storage>, defaults: CalculationDefaults) -> Self {
        Self {
            store,
            defaults: Arc::new(defaults),
        }
    }
}

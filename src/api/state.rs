//! Application state shared by all request handlers.

use std::sync::Arc;

use uuid::Uuid;

use crate::config::HrConfig;
use crate::error::HrResult;
use crate::models::LeaveType;
use crate::notify::Notifier;
use crate::store::MemoryStore;
use crate::workflow::Hooks;

/// Shared application state.
///
/// Holds the store, the validated configuration and the post-commit hook
/// list. Construction seeds the leave-type catalog from configuration so
/// balance provisioning has types to work from.
#[derive(Clone)]
pub struct AppState {
    store: Arc<MemoryStore>,
    config: Arc<HrConfig>,
    hooks: Arc<Hooks>,
}

impl AppState {
    /// Creates the application state and seeds the leave-type catalog.
    pub fn new(config: HrConfig, notifier: Arc<dyn Notifier>) -> HrResult<Self> {
        let store = MemoryStore::new();
        store.transaction(|tables| {
            for leave_type in config.leave_types() {
                tables.insert_leave_type(LeaveType {
                    id: Uuid::new_v4(),
                    name: leave_type.name.clone(),
                    days_allowed: leave_type.days_allowed,
                    is_paid: leave_type.is_paid,
                    requires_approval: leave_type.requires_approval,
                    exclude_weekends: leave_type.exclude_weekends,
                })?;
            }
            Ok(())
        })?;

        Ok(Self {
            store: Arc::new(store),
            config: Arc::new(config),
            hooks: Arc::new(Hooks::new(notifier)),
        })
    }

    /// Returns the store.
    pub fn store(&self) -> &MemoryStore {
        &self.store
    }

    /// Returns the configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    /// Returns the post-commit hook list.
    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EngineSettings, LeaveTypeConfig};
    use crate::notify::TracingNotifier;
    use rust_decimal::Decimal;

    #[test]
    fn test_app_state_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_new_seeds_leave_type_catalog() {
        let config = HrConfig::new(
            EngineSettings {
                standard_daily_hours: Decimal::from(8),
            },
            vec![LeaveTypeConfig {
                name: "annual".to_string(),
                days_allowed: 20,
                is_paid: true,
                requires_approval: true,
                exclude_weekends: true,
            }],
            vec![],
        );
        let state = AppState::new(config, Arc::new(TracingNotifier)).unwrap();
        let seeded = state.store().read(|tables| tables.leave_types().count());
        assert_eq!(seeded, 1);
    }
}

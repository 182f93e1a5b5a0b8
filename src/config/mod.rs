//! Engine configuration loaded from YAML files.
//!
//! Deployment-specific policy lives outside the code: the standard working
//! day, the leave-type catalog with yearly allowances, and the performance
//! criteria with their percentage weights. Weight totals are validated at
//! load time so the weighted-score calculator can compute literally.

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    CriteriaCategory, CriterionConfig, EngineSettings, HrConfig, LeaveTypeConfig,
};

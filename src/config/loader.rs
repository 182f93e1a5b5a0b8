//! Configuration loading and validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{HrError, HrResult};

use super::types::{CriterionConfig, EngineSettings, HrConfig, LeaveTypeConfig};

/// Loads and validates engine configuration from a directory.
///
/// # Directory Structure
///
/// ```text
/// config/hr/
/// ├── engine.yaml       # Working-day settings
/// ├── leave_types.yaml  # Leave-type catalog with yearly allowances
/// └── criteria.yaml     # Performance criteria with percentage weights
/// ```
///
/// # Example
///
/// ```no_run
/// use hr_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/hr").unwrap();
/// assert!(loader.config().standard_daily_hours() > rust_decimal::Decimal::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HrConfig,
}

#[derive(serde::Deserialize)]
struct LeaveTypesFile {
    leave_types: Vec<LeaveTypeConfig>,
}

#[derive(serde::Deserialize)]
struct CriteriaFile {
    criteria: Vec<CriterionConfig>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if a required file is missing, contains invalid
    /// YAML, or fails validation:
    /// - `standard_daily_hours` must be positive,
    /// - leave type names must be unique and allowances non-zero,
    /// - active criteria weights must sum to exactly 100.
    pub fn load<P: AsRef<Path>>(path: P) -> HrResult<Self> {
        let path = path.as_ref();

        let engine: EngineSettings = Self::load_yaml(&path.join("engine.yaml"))?;
        let leave_types: LeaveTypesFile = Self::load_yaml(&path.join("leave_types.yaml"))?;
        let criteria: CriteriaFile = Self::load_yaml(&path.join("criteria.yaml"))?;

        Self::validate_engine(&engine, path)?;
        Self::validate_leave_types(&leave_types.leave_types, path)?;
        Self::validate_criteria(&criteria.criteria, path)?;

        Ok(Self {
            config: HrConfig::new(engine, leave_types.leave_types, criteria.criteria),
        })
    }

    /// Returns the validated configuration.
    pub fn config(&self) -> &HrConfig {
        &self.config
    }

    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> HrResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| HrError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| HrError::ConfigInvalid {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_engine(engine: &EngineSettings, dir: &Path) -> HrResult<()> {
        if engine.standard_daily_hours <= Decimal::ZERO {
            return Err(HrError::ConfigInvalid {
                path: dir.join("engine.yaml").display().to_string(),
                message: "standard_daily_hours must be positive".to_string(),
            });
        }
        Ok(())
    }

    fn validate_leave_types(leave_types: &[LeaveTypeConfig], dir: &Path) -> HrResult<()> {
        let path = dir.join("leave_types.yaml").display().to_string();

        let mut seen = HashSet::new();
        for leave_type in leave_types {
            if !seen.insert(leave_type.name.as_str()) {
                return Err(HrError::ConfigInvalid {
                    path,
                    message: format!("duplicate leave type '{}'", leave_type.name),
                });
            }
            if leave_type.days_allowed == 0 {
                return Err(HrError::ConfigInvalid {
                    path,
                    message: format!("leave type '{}' allows zero days", leave_type.name),
                });
            }
        }
        Ok(())
    }

    fn validate_criteria(criteria: &[CriterionConfig], dir: &Path) -> HrResult<()> {
        let path = dir.join("criteria.yaml").display().to_string();

        let mut seen = HashSet::new();
        for criterion in criteria {
            if !seen.insert(criterion.name.as_str()) {
                return Err(HrError::ConfigInvalid {
                    path,
                    message: format!("duplicate criterion '{}'", criterion.name),
                });
            }
        }

        // The weighted-score calculator computes the formula literally; a
        // weight total other than 100 is caught here, at configuration time.
        let total: u32 = criteria
            .iter()
            .filter(|c| c.is_active)
            .map(|c| c.weight)
            .sum();
        if total != 100 {
            return Err(HrError::ConfigInvalid {
                path,
                message: format!("active criteria weights sum to {total}, expected 100"),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_shipped_config() {
        let loader = ConfigLoader::load("./config/hr").expect("shipped config must load");
        let config = loader.config();
        assert_eq!(config.standard_daily_hours(), Decimal::from(8));
        assert!(config.leave_types().iter().any(|t| t.name == "annual"));
        let total: u32 = config.active_criteria().map(|c| c.weight).sum();
        assert_eq!(total, 100);
    }

    #[test]
    fn test_missing_directory_is_config_not_found() {
        let result = ConfigLoader::load("./config/does_not_exist");
        assert!(matches!(result, Err(HrError::ConfigNotFound { .. })));
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        let criteria = vec![
            CriterionConfig {
                name: "a".to_string(),
                category: crate::config::CriteriaCategory::Technical,
                weight: 50,
                is_active: true,
            },
            CriterionConfig {
                name: "b".to_string(),
                category: crate::config::CriteriaCategory::Soft,
                weight: 40,
                is_active: true,
            },
        ];
        let result = ConfigLoader::validate_criteria(&criteria, Path::new("."));
        match result {
            Err(HrError::ConfigInvalid { message, .. }) => {
                assert!(message.contains("sum to 90"));
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn test_inactive_criteria_excluded_from_weight_total() {
        let criteria = vec![
            CriterionConfig {
                name: "a".to_string(),
                category: crate::config::CriteriaCategory::Technical,
                weight: 100,
                is_active: true,
            },
            CriterionConfig {
                name: "b".to_string(),
                category: crate::config::CriteriaCategory::Soft,
                weight: 40,
                is_active: false,
            },
        ];
        assert!(ConfigLoader::validate_criteria(&criteria, Path::new(".")).is_ok());
    }

    #[test]
    fn test_duplicate_leave_type_rejected() {
        let leave_types = vec![
            LeaveTypeConfig {
                name: "annual".to_string(),
                days_allowed: 20,
                is_paid: true,
                requires_approval: true,
                exclude_weekends: false,
            },
            LeaveTypeConfig {
                name: "annual".to_string(),
                days_allowed: 10,
                is_paid: true,
                requires_approval: true,
                exclude_weekends: false,
            },
        ];
        assert!(ConfigLoader::validate_leave_types(&leave_types, Path::new(".")).is_err());
    }
}

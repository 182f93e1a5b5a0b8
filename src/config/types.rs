//! Configuration data structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Engine-wide tunables from `engine.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Length of a standard working day in hours; hours beyond this count
    /// as overtime.
    pub standard_daily_hours: Decimal,
}

/// One leave type from `leave_types.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveTypeConfig {
    /// Leave type name (unique).
    pub name: String,
    /// Days allowed per employee per year.
    pub days_allowed: u32,
    /// Whether leave of this type is paid.
    #[serde(default = "default_true")]
    pub is_paid: bool,
    /// Whether requests of this type need an approval step.
    #[serde(default = "default_true")]
    pub requires_approval: bool,
    /// Whether Saturdays and Sundays are excluded when counting duration.
    #[serde(default)]
    pub exclude_weekends: bool,
}

fn default_true() -> bool {
    true
}

/// The category a performance criterion belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CriteriaCategory {
    /// Technical skills.
    Technical,
    /// Soft skills.
    Soft,
    /// Leadership.
    Leadership,
    /// Productivity.
    Productivity,
}

/// One performance criterion from `criteria.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionConfig {
    /// Criterion name (unique), referenced by performance scores.
    pub name: String,
    /// The category this criterion belongs to.
    pub category: CriteriaCategory,
    /// Weight in percent. Active weights must sum to 100.
    pub weight: u32,
    /// Whether the criterion participates in overall-score calculation.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// The full validated configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrConfig {
    engine: EngineSettings,
    leave_types: Vec<LeaveTypeConfig>,
    criteria: Vec<CriterionConfig>,
}

impl HrConfig {
    /// Assembles a configuration from its parts. Validation happens in the
    /// loader before this is constructed.
    pub(crate) fn new(
        engine: EngineSettings,
        leave_types: Vec<LeaveTypeConfig>,
        criteria: Vec<CriterionConfig>,
    ) -> Self {
        Self {
            engine,
            leave_types,
            criteria,
        }
    }

    /// The standard working day length in hours.
    pub fn standard_daily_hours(&self) -> Decimal {
        self.engine.standard_daily_hours
    }

    /// The configured leave-type catalog.
    pub fn leave_types(&self) -> &[LeaveTypeConfig] {
        &self.leave_types
    }

    /// The active performance criteria.
    pub fn active_criteria(&self) -> impl Iterator<Item = &CriterionConfig> {
        self.criteria.iter().filter(|c| c.is_active)
    }

    /// Looks up the weight of an active criterion by name.
    pub fn criterion_weight(&self, name: &str) -> Option<u32> {
        self.active_criteria()
            .find(|c| c.name == name)
            .map(|c| c.weight)
    }
}

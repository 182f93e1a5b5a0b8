//! Performance review models.
//!
//! A [`PerformanceReview`] moves strictly through draft → in_review →
//! completed → acknowledged. Its `overall_score` is derived from the
//! associated [`PerformanceScore`] rows weighted by the configured criteria.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of review cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewType {
    /// Quarterly check-in.
    Quarterly,
    /// Half-year review.
    SemiAnnual,
    /// Annual review.
    Annual,
    /// End-of-probation review.
    Probation,
}

/// Lifecycle states of a performance review. Strictly sequential; no
/// skipping and no reverting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// Being written by the reviewer.
    Draft,
    /// Submitted for scoring and sign-off.
    InReview,
    /// Scored; overall score computed.
    Completed,
    /// Acknowledged by the reviewed employee. Terminal.
    Acknowledged,
}

impl ReviewStatus {
    /// Returns the canonical lowercase name of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Draft => "draft",
            ReviewStatus::InReview => "in_review",
            ReviewStatus::Completed => "completed",
            ReviewStatus::Acknowledged => "acknowledged",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review of one employee by one reviewer over a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReview {
    /// Unique identifier.
    pub id: Uuid,
    /// The employee being reviewed.
    pub employee: Uuid,
    /// The reviewer.
    pub reviewer: Uuid,
    /// The kind of review cycle.
    pub review_type: ReviewType,
    /// First day of the review period (inclusive).
    pub period_start: NaiveDate,
    /// Last day of the review period (inclusive).
    pub period_end: NaiveDate,
    /// Current lifecycle status.
    pub status: ReviewStatus,
    /// Derived: weighted average of the review's scores, set on completion.
    #[serde(default)]
    pub overall_score: Option<Decimal>,
    /// Reviewer's summary.
    #[serde(default)]
    pub summary: String,
    /// When the employee acknowledged the review.
    #[serde(default)]
    pub acknowledged_at: Option<NaiveDateTime>,
    /// Creation timestamp.
    pub created_at: NaiveDateTime,
}

/// One criteria score within a review. Unique per (review, criteria).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceScore {
    /// Unique identifier.
    pub id: Uuid,
    /// The review this score belongs to.
    pub review: Uuid,
    /// The criteria being scored, referenced by its configured name.
    pub criteria: String,
    /// Score on a 0–5 scale.
    pub score: Decimal,
    /// Reviewer comments for this criteria.
    #[serde(default)]
    pub comments: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReviewStatus::InReview).unwrap(),
            "\"in_review\""
        );
        assert_eq!(
            serde_json::to_string(&ReviewStatus::Acknowledged).unwrap(),
            "\"acknowledged\""
        );
    }

    #[test]
    fn test_review_type_serialization() {
        assert_eq!(
            serde_json::to_string(&ReviewType::SemiAnnual).unwrap(),
            "\"semi_annual\""
        );
    }
}

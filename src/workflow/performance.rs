//! Performance review lifecycle.
//!
//! draft → in_review → completed → acknowledged, strictly sequential.
//! Completion derives the overall score from the recorded per-criterion
//! scores and the configured weights; acknowledgment belongs to the
//! reviewed employee alone.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::calculation::weighted_score;
use crate::config::HrConfig;
use crate::error::{HrError, HrResult};
use crate::models::{PerformanceReview, PerformanceScore, ReviewStatus, ReviewType};
use crate::policy::{Action, Actor, ResourceKind, evaluate};
use crate::store::MemoryStore;
use crate::workflow::employee_resource;
use crate::workflow::engine::{Hooks, Lifecycle, Transition, WorkflowEvent, plan_transition};

impl Lifecycle for PerformanceReview {
    type Status = ReviewStatus;
    const ENTITY: &'static str = "performance_review";

    fn can_transition(from: ReviewStatus, to: ReviewStatus) -> bool {
        matches!(
            (from, to),
            (ReviewStatus::Draft, ReviewStatus::InReview)
                | (ReviewStatus::InReview, ReviewStatus::Completed)
                | (ReviewStatus::Completed, ReviewStatus::Acknowledged)
        )
    }
}

/// Input for opening a review.
#[derive(Debug, Clone)]
pub struct NewReview {
    /// The employee under review.
    pub employee: Uuid,
    /// The reviewing identity; defaults to the actor.
    pub reviewer: Option<Uuid>,
    /// The review cadence.
    pub review_type: ReviewType,
    /// Start of the reviewed period.
    pub period_start: NaiveDate,
    /// End of the reviewed period.
    pub period_end: NaiveDate,
}

/// Input for recording one criterion score.
#[derive(Debug, Clone)]
pub struct NewScore {
    /// The criterion name, as configured.
    pub criteria: String,
    /// The score, 1 to 5.
    pub score: Decimal,
    /// Reviewer comments.
    pub comments: String,
}

/// Opens a review in the draft state.
pub fn create_review(
    store: &MemoryStore,
    actor: &Actor,
    input: NewReview,
    now: NaiveDateTime,
) -> HrResult<PerformanceReview> {
    if input.period_start > input.period_end {
        return Err(HrError::Validation {
            field: "period_end",
            message: "must not precede period_start".to_string(),
        });
    }

    store.transaction(|tables| {
        let resource = employee_resource(tables, ResourceKind::PerformanceReview, input.employee)?;
        evaluate(Some(actor), Action::Write, &resource).require()?;

        let review = PerformanceReview {
            id: Uuid::new_v4(),
            employee: input.employee,
            reviewer: input.reviewer.unwrap_or(actor.id),
            review_type: input.review_type,
            period_start: input.period_start,
            period_end: input.period_end,
            status: ReviewStatus::Draft,
            overall_score: None,
            summary: String::new(),
            acknowledged_at: None,
            created_at: now,
        };
        tables.insert_review(review.clone());
        Ok(review)
    })
}

/// Records or replaces one criterion score on a review still being written.
///
/// The criterion must exist and be active in the configuration, and scores
/// run from 1 to 5. Scoring a completed or acknowledged review is rejected.
pub fn record_score(
    store: &MemoryStore,
    config: &HrConfig,
    actor: &Actor,
    review_id: Uuid,
    input: NewScore,
) -> HrResult<PerformanceScore> {
    if config.criterion_weight(&input.criteria).is_none() {
        return Err(HrError::Validation {
            field: "criteria",
            message: format!("unknown or inactive criterion: {}", input.criteria),
        });
    }
    if input.score < Decimal::ONE || input.score > Decimal::from(5) {
        return Err(HrError::Validation {
            field: "score",
            message: "must be between 1 and 5".to_string(),
        });
    }

    store.transaction(|tables| {
        let review = tables.review(review_id)?.clone();
        let resource = employee_resource(tables, ResourceKind::PerformanceReview, review.employee)?;
        evaluate(Some(actor), Action::Write, &resource).require()?;

        if !matches!(review.status, ReviewStatus::Draft | ReviewStatus::InReview) {
            return Err(HrError::Validation {
                field: "status",
                message: format!("review is {}, scores may no longer change", review.status),
            });
        }

        let score = PerformanceScore {
            id: Uuid::new_v4(),
            review: review_id,
            criteria: input.criteria.clone(),
            score: input.score,
            comments: input.comments.clone(),
        };
        tables.upsert_score(score.clone());
        Ok(score)
    })
}

/// Moves a review through its lifecycle.
///
/// Completion computes the overall score as the weighted average of the
/// recorded scores against the active criteria weights; a review with no
/// scores cannot complete. Acknowledgment is reserved for the reviewed
/// employee and stamps `acknowledged_at`.
pub fn move_review(
    store: &MemoryStore,
    config: &HrConfig,
    hooks: &Hooks,
    actor: &Actor,
    review_id: Uuid,
    requested: ReviewStatus,
    now: NaiveDateTime,
) -> HrResult<PerformanceReview> {
    let mut applied = false;
    let moved = store.transaction(|tables| {
        let review = tables.review(review_id)?.clone();

        if requested == ReviewStatus::Acknowledged {
            if review.employee != actor.id {
                return Err(HrError::PermissionDenied);
            }
        } else {
            let resource =
                employee_resource(tables, ResourceKind::PerformanceReview, review.employee)?;
            evaluate(Some(actor), Action::Approve, &resource).require()?;
        }

        let to = match plan_transition::<PerformanceReview>(review.status, requested)? {
            Transition::NoOp(_) => return Ok(review),
            Transition::Applied { to, .. } => to,
        };

        let overall = if to == ReviewStatus::Completed {
            let weighted: Vec<(Decimal, Decimal)> = tables
                .scores_for_review(review_id)
                .into_iter()
                .filter_map(|score| {
                    config
                        .criterion_weight(&score.criteria)
                        .map(|weight| (score.score, Decimal::from(weight)))
                })
                .collect();
            if weighted.is_empty() {
                return Err(HrError::Validation {
                    field: "scores",
                    message: "cannot complete a review with no scores".to_string(),
                });
            }
            Some(weighted_score(&weighted))
        } else {
            None
        };

        let stored = tables.review_mut(review_id)?;
        stored.status = to;
        if let Some(overall) = overall {
            stored.overall_score = Some(overall);
        }
        if to == ReviewStatus::Acknowledged {
            stored.acknowledged_at = Some(now);
        }
        applied = true;
        Ok(stored.clone())
    })?;

    if applied {
        hooks.run(
            store,
            &WorkflowEvent::ReviewMoved {
                review: moved.id,
                employee: moved.employee,
                status: moved.status,
            },
        );
    }
    Ok(moved)
}

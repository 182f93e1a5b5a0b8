//! Request types for the HTTP API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{
    LeaveStatus, PayrollRecordStatus, PeriodStatus, PeriodType, ReviewStatus, ReviewType, Role,
};
use crate::workflow::{
    LeaveDecision, NewIdentity, NewLeaveRequest, NewPayrollPeriod, NewPayrollRecord, NewReview,
    NewScore,
};

/// Request body for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEmployeeRequest {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Initial role.
    pub role: Role,
    /// Department assignment.
    #[serde(default)]
    pub department: Option<Uuid>,
    /// Reporting manager.
    #[serde(default)]
    pub manager: Option<Uuid>,
}

impl From<CreateEmployeeRequest> for NewIdentity {
    fn from(request: CreateEmployeeRequest) -> Self {
        Self {
            name: request.name,
            email: request.email,
            role: request.role,
            department: request.department,
            manager: request.manager,
        }
    }
}

/// Request body for `POST /employees/{id}/role`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeRoleRequest {
    /// The role to assign.
    pub role: Role,
}

/// Request body for `POST /leave/requests`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateLeaveRequest {
    /// The employee the request is for; defaults to the caller.
    #[serde(default)]
    pub employee: Option<Uuid>,
    /// The requested leave type.
    pub leave_type: Uuid,
    /// First day of leave, inclusive.
    pub start_date: NaiveDate,
    /// Last day of leave, inclusive.
    pub end_date: NaiveDate,
    /// Free-form reason.
    #[serde(default)]
    pub reason: String,
}

impl From<CreateLeaveRequest> for NewLeaveRequest {
    fn from(request: CreateLeaveRequest) -> Self {
        Self {
            employee: request.employee,
            leave_type: request.leave_type,
            start_date: request.start_date,
            end_date: request.end_date,
            reason: request.reason,
        }
    }
}

/// Request body for `POST /leave/requests/{id}/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveDecisionRequest {
    /// `approved` or `rejected`.
    pub status: LeaveStatus,
    /// Required when rejecting.
    #[serde(default)]
    pub rejection_reason: Option<String>,
}

impl From<LeaveDecisionRequest> for LeaveDecision {
    fn from(request: LeaveDecisionRequest) -> Self {
        Self {
            status: request.status,
            rejection_reason: request.rejection_reason,
        }
    }
}

/// Request body for `POST /payroll/periods`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePeriodRequest {
    /// The cadence the period covers.
    pub period_type: PeriodType,
    /// First day, inclusive.
    pub start_date: NaiveDate,
    /// Last day, inclusive.
    pub end_date: NaiveDate,
    /// Free-text notes.
    #[serde(default)]
    pub notes: String,
}

impl From<CreatePeriodRequest> for NewPayrollPeriod {
    fn from(request: CreatePeriodRequest) -> Self {
        Self {
            period_type: request.period_type,
            start_date: request.start_date,
            end_date: request.end_date,
            notes: request.notes,
        }
    }
}

/// Request body for `POST /payroll/periods/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodStatusRequest {
    /// The requested status.
    pub status: PeriodStatus,
}

/// Request body for `POST /payroll/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// The period the record belongs to.
    pub payroll_period: Uuid,
    /// The employee being paid.
    pub employee: Uuid,
    /// Base salary for the period.
    pub basic_salary: Decimal,
    /// Overtime hours worked.
    #[serde(default)]
    pub overtime_hours: Decimal,
    /// Hourly overtime rate.
    #[serde(default)]
    pub overtime_rate: Decimal,
    /// Total allowances.
    #[serde(default)]
    pub allowances: Decimal,
    /// Total deductions.
    #[serde(default)]
    pub deductions: Decimal,
    /// Tax withheld.
    #[serde(default)]
    pub tax: Decimal,
    /// Payment method description.
    #[serde(default)]
    pub payment_method: String,
}

impl From<CreateRecordRequest> for NewPayrollRecord {
    fn from(request: CreateRecordRequest) -> Self {
        Self {
            payroll_period: request.payroll_period,
            employee: request.employee,
            basic_salary: request.basic_salary,
            overtime_hours: request.overtime_hours,
            overtime_rate: request.overtime_rate,
            allowances: request.allowances,
            deductions: request.deductions,
            tax: request.tax,
            payment_method: request.payment_method,
        }
    }
}

/// Request body for `POST /payroll/records/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordStatusRequest {
    /// The requested status.
    pub status: PayrollRecordStatus,
}

/// Request body for `POST /performance/reviews`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateReviewRequest {
    /// The employee under review.
    pub employee: Uuid,
    /// The reviewing identity; defaults to the caller.
    #[serde(default)]
    pub reviewer: Option<Uuid>,
    /// The review cadence.
    pub review_type: ReviewType,
    /// Start of the reviewed period.
    pub period_start: NaiveDate,
    /// End of the reviewed period.
    pub period_end: NaiveDate,
}

impl From<CreateReviewRequest> for NewReview {
    fn from(request: CreateReviewRequest) -> Self {
        Self {
            employee: request.employee,
            reviewer: request.reviewer,
            review_type: request.review_type,
            period_start: request.period_start,
            period_end: request.period_end,
        }
    }
}

/// Request body for `POST /performance/reviews/{id}/scores`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    /// The criterion name, as configured.
    pub criteria: String,
    /// The score, 1 to 5.
    pub score: Decimal,
    /// Reviewer comments.
    #[serde(default)]
    pub comments: String,
}

impl From<ScoreRequest> for NewScore {
    fn from(request: ScoreRequest) -> Self {
        Self {
            criteria: request.criteria,
            score: request.score,
            comments: request.comments,
        }
    }
}

/// Request body for `POST /performance/reviews/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewStatusRequest {
    /// The requested status.
    pub status: ReviewStatus,
}

/// Query parameters accepted by the list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Restrict to one employee.
    #[serde(default)]
    pub employee: Option<Uuid>,
    /// Restrict to one status, by its lowercase name.
    #[serde(default)]
    pub status: Option<String>,
    /// Restrict to dates on or after this one.
    #[serde(default)]
    pub from: Option<NaiveDate>,
    /// Restrict to dates on or before this one.
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

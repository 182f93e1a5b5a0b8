//! HTTP request handlers for the HR workflow engine API.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::HrError;
use crate::models::Role;
use crate::policy::{Action, Actor, ResourceKind, ResourceRef, evaluate};
use crate::store::Tables;
use crate::workflow;

use super::request::{
    ChangeRoleRequest, CreateEmployeeRequest, CreateLeaveRequest, CreatePeriodRequest,
    CreateRecordRequest, CreateReviewRequest, LeaveDecisionRequest, ListQuery,
    PeriodStatusRequest, RecordStatusRequest, ReviewStatusRequest, ScoreRequest,
};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/employees", post(create_employee))
        .route("/employees/:id/role", post(change_role))
        .route("/employees/:id/subordinates", get(list_subordinates))
        .route("/leave/types", get(list_leave_types))
        .route("/leave/balances", get(list_balances))
        .route("/leave/requests", post(create_leave).get(list_leave))
        .route("/leave/requests/:id/approve", post(decide_leave))
        .route("/leave/requests/:id/cancel", post(cancel_leave))
        .route("/attendance/check_in", post(check_in))
        .route("/attendance/check_out", post(check_out))
        .route("/attendance", get(list_attendance))
        .route("/payroll/periods", post(create_period).get(list_periods))
        .route("/payroll/periods/:id/status", post(move_period))
        .route("/payroll/records", post(create_record).get(list_records))
        .route("/payroll/records/:id/status", post(move_record))
        .route(
            "/performance/reviews",
            post(create_review).get(list_reviews),
        )
        .route(
            "/performance/reviews/:id/scores",
            post(record_score).get(list_scores),
        )
        .route("/performance/reviews/:id/status", post(move_review))
        .with_state(state)
}

// ----- request context ------------------------------------------------------

fn parse_role(value: &str) -> Option<Role> {
    match value {
        "admin" => Some(Role::Admin),
        "hr" => Some(Role::Hr),
        "manager" => Some(Role::Manager),
        "employee" => Some(Role::Employee),
        _ => None,
    }
}

/// Reads the actor from the trusted identity headers. A missing id header
/// means an unauthenticated request; a present but unparseable header is a
/// client error.
fn actor_from_headers(headers: &HeaderMap) -> Result<Option<Actor>, ApiErrorResponse> {
    let Some(raw_id) = headers.get("x-actor-id") else {
        return Ok(None);
    };
    let id: Uuid = raw_id
        .to_str()
        .ok()
        .and_then(|value| value.parse().ok())
        .ok_or(ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::invalid_header("x-actor-id"),
        })?;

    let role = headers
        .get("x-actor-role")
        .and_then(|value| value.to_str().ok())
        .and_then(parse_role)
        .ok_or(ApiErrorResponse {
            status: StatusCode::BAD_REQUEST,
            error: ApiError::invalid_header("x-actor-role"),
        })?;

    let department = match headers.get("x-actor-department") {
        None => None,
        Some(raw) => Some(
            raw.to_str()
                .ok()
                .and_then(|value| value.parse().ok())
                .ok_or(ApiErrorResponse {
                    status: StatusCode::BAD_REQUEST,
                    error: ApiError::invalid_header("x-actor-department"),
                })?,
        ),
    };

    Ok(Some(Actor {
        id,
        role,
        department,
    }))
}

fn require_actor(headers: &HeaderMap) -> Result<Actor, ApiErrorResponse> {
    actor_from_headers(headers)?.ok_or_else(|| HrError::PermissionDenied.into())
}

fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(correlation_id = %correlation_id, error = %body_text, "JSON data error");
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(correlation_id = %correlation_id, error = %err, "JSON syntax error");
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((StatusCode::BAD_REQUEST, Json(error)).into_response())
        }
    }
}

fn created<T: Serialize>(value: T) -> Response {
    (StatusCode::CREATED, Json(value)).into_response()
}

fn ok_json<T: Serialize>(value: T) -> Response {
    (StatusCode::OK, Json(value)).into_response()
}

fn fail(correlation_id: Uuid, error: HrError) -> Response {
    warn!(correlation_id = %correlation_id, error = %error, "request failed");
    ApiErrorResponse::from(error).into_response()
}

/// Keeps the rows the actor may read, applying the shared query filters.
fn visible_rows<T: Clone>(
    tables: &Tables,
    actor: &Actor,
    kind: ResourceKind,
    rows: impl Iterator<Item = T>,
    owner: impl Fn(&T) -> Uuid,
    date: impl Fn(&T) -> Option<NaiveDate>,
    query: &ListQuery,
) -> Vec<T> {
    rows.filter(|row| {
        if let Some(employee) = query.employee {
            if owner(row) != employee {
                return false;
            }
        }
        if let (Some(from), Some(on)) = (query.from, date(row)) {
            if on < from {
                return false;
            }
        }
        if let (Some(to), Some(on)) = (query.to, date(row)) {
            if on > to {
                return false;
            }
        }
        match workflow::employee_resource(tables, kind, owner(row)) {
            Ok(resource) => evaluate(Some(actor), Action::Read, &resource).is_allow(),
            Err(_) => false,
        }
    })
    .collect()
}

// ----- identities -----------------------------------------------------------

async fn create_employee(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateEmployeeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::create_identity(
        state.store(),
        state.hooks(),
        actor.as_ref(),
        request.into(),
        Utc::now().date_naive(),
    ) {
        Ok(identity) => {
            info!(correlation_id = %correlation_id, employee = %identity.id, "employee created");
            created(identity)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn change_role(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<ChangeRoleRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::change_role(state.store(), &actor, id, request.role) {
        Ok(identity) => {
            info!(correlation_id = %correlation_id, employee = %id, role = %identity.role, "role changed");
            ok_json(identity)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_subordinates(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::subordinates(state.store(), actor.as_ref(), id) {
        Ok(reports) => ok_json(reports),
        Err(error) => fail(correlation_id, error),
    }
}

// ----- leave ----------------------------------------------------------------

async fn list_leave_types(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match actor_from_headers(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let resource = ResourceRef::new(ResourceKind::LeaveTypeCatalog);
    if let Err(error) = evaluate(actor.as_ref(), Action::Read, &resource).require() {
        return fail(correlation_id, error);
    }

    let types = state
        .store()
        .read(|tables| tables.leave_types().cloned().collect::<Vec<_>>());
    ok_json(types)
}

async fn list_balances(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let balances = state.store().read(|tables| {
        visible_rows(
            tables,
            &actor,
            ResourceKind::LeaveBalance,
            tables.leave_balances().cloned(),
            |balance| balance.employee,
            |_| None,
            &query,
        )
    });
    ok_json(balances)
}

async fn create_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateLeaveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::create_request(
        state.store(),
        state.hooks(),
        &actor,
        request.into(),
        Utc::now().naive_utc(),
    ) {
        Ok(leave) => {
            info!(correlation_id = %correlation_id, request = %leave.id, "leave request submitted");
            created(leave)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_leave(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let requests = state.store().read(|tables| {
        let mut rows = visible_rows(
            tables,
            &actor,
            ResourceKind::LeaveRequest,
            tables.leave_requests().cloned(),
            |request| request.employee,
            |request| Some(request.start_date),
            &query,
        );
        if let Some(status) = &query.status {
            rows.retain(|request| request.status.as_str() == status);
        }
        rows
    });
    ok_json(requests)
}

async fn decide_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<LeaveDecisionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::decide_request(
        state.store(),
        state.hooks(),
        &actor,
        id,
        request.into(),
        Utc::now().naive_utc(),
    ) {
        Ok(leave) => {
            info!(correlation_id = %correlation_id, request = %id, status = %leave.status, "leave request decided");
            ok_json(leave)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn cancel_leave(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::cancel_request(
        state.store(),
        state.hooks(),
        &actor,
        id,
        Utc::now().naive_utc(),
    ) {
        Ok(leave) => {
            info!(correlation_id = %correlation_id, request = %id, "leave request cancelled");
            ok_json(leave)
        }
        Err(error) => fail(correlation_id, error),
    }
}

// ----- attendance -----------------------------------------------------------

async fn check_in(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::check_in(
        state.store(),
        state.config(),
        &actor,
        Utc::now().naive_utc(),
        String::new(),
    ) {
        Ok(record) => {
            info!(correlation_id = %correlation_id, employee = %actor.id, "checked in");
            created(record)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn check_out(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::check_out(state.store(), state.config(), &actor, Utc::now().naive_utc()) {
        Ok(record) => {
            info!(correlation_id = %correlation_id, employee = %actor.id, "checked out");
            ok_json(record)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_attendance(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let records = state.store().read(|tables| {
        visible_rows(
            tables,
            &actor,
            ResourceKind::AttendanceRecord,
            tables.attendance_records().cloned(),
            |record| record.employee,
            |record| Some(record.date),
            &query,
        )
    });
    ok_json(records)
}

// ----- payroll --------------------------------------------------------------

async fn create_period(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreatePeriodRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::create_period(
        state.store(),
        &actor,
        request.into(),
        Utc::now().naive_utc(),
    ) {
        Ok(period) => {
            info!(correlation_id = %correlation_id, period = %period.id, "payroll period created");
            created(period)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_periods(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let resource = ResourceRef::new(ResourceKind::PayrollPeriod);
    if let Err(error) = evaluate(Some(&actor), Action::Read, &resource).require() {
        return fail(correlation_id, error);
    }

    let periods = state.store().read(|tables| {
        let mut rows: Vec<_> = tables.payroll_periods().cloned().collect();
        if let Some(status) = &query.status {
            rows.retain(|period| period.status.as_str() == status);
        }
        rows
    });
    ok_json(periods)
}

async fn move_period(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<PeriodStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::move_period(state.store(), state.hooks(), &actor, id, request.status) {
        Ok(period) => {
            info!(correlation_id = %correlation_id, period = %id, status = %period.status, "payroll period moved");
            ok_json(period)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn create_record(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateRecordRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::create_record(state.store(), &actor, request.into()) {
        Ok(record) => {
            info!(correlation_id = %correlation_id, record = %record.id, "payroll record created");
            created(record)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_records(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let records = state.store().read(|tables| {
        let mut rows = visible_rows(
            tables,
            &actor,
            ResourceKind::PayrollRecord,
            tables.payroll_records().cloned(),
            |record| record.employee,
            |_| None,
            &query,
        );
        if let Some(status) = &query.status {
            rows.retain(|record| record.status.as_str() == status);
        }
        rows
    });
    ok_json(records)
}

async fn move_record(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<RecordStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::move_record(
        state.store(),
        state.hooks(),
        &actor,
        id,
        request.status,
        Utc::now().naive_utc(),
    ) {
        Ok(record) => {
            info!(correlation_id = %correlation_id, record = %id, status = %record.status, "payroll record moved");
            ok_json(record)
        }
        Err(error) => fail(correlation_id, error),
    }
}

// ----- performance ----------------------------------------------------------

async fn create_review(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<CreateReviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::create_review(
        state.store(),
        &actor,
        request.into(),
        Utc::now().naive_utc(),
    ) {
        Ok(review) => {
            info!(correlation_id = %correlation_id, review = %review.id, "performance review created");
            created(review)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_reviews(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ListQuery>,
) -> Response {
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let reviews = state.store().read(|tables| {
        let mut rows = visible_rows(
            tables,
            &actor,
            ResourceKind::PerformanceReview,
            tables.reviews().cloned(),
            |review| review.employee,
            |review| Some(review.period_end),
            &query,
        );
        if let Some(status) = &query.status {
            rows.retain(|review| review.status.as_str() == status);
        }
        rows
    });
    ok_json(reviews)
}

async fn record_score(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::record_score(state.store(), state.config(), &actor, id, request.into()) {
        Ok(score) => {
            info!(correlation_id = %correlation_id, review = %id, criteria = %score.criteria, "score recorded");
            created(score)
        }
        Err(error) => fail(correlation_id, error),
    }
}

async fn list_scores(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    let result = state.store().read(|tables| {
        let review = tables.review(id)?.clone();
        let resource =
            workflow::employee_resource(tables, ResourceKind::PerformanceReview, review.employee)?;
        evaluate(Some(&actor), Action::Read, &resource).require()?;
        Ok(tables
            .scores_for_review(id)
            .into_iter()
            .cloned()
            .collect::<Vec<_>>())
    });
    match result {
        Ok(scores) => ok_json(scores),
        Err(error) => fail(correlation_id, error),
    }
}

async fn move_review(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    payload: Result<Json<ReviewStatusRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };
    let actor = match require_actor(&headers) {
        Ok(actor) => actor,
        Err(response) => return response.into_response(),
    };

    match workflow::move_review(
        state.store(),
        state.config(),
        state.hooks(),
        &actor,
        id,
        request.status,
        Utc::now().naive_utc(),
    ) {
        Ok(review) => {
            info!(correlation_id = %correlation_id, review = %id, status = %review.status, "performance review moved");
            ok_json(review)
        }
        Err(error) => fail(correlation_id, error),
    }
}

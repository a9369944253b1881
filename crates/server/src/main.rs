// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use leave_ledger::EmployeeLockRegistry;
use leave_ledger_api::{
    ApiError, ApiResult, EntryActionRequest, GrantAllowanceRequest, RecomputeRequest,
    RecordAdjustmentRequest, RecordLeaveEventRequest, RegisterAttendanceRequest,
    RegisterHolidayRequest, archive_ledger_entry, delete_ledger_entry, export_ledger_history_csv,
    get_balance_as_of, get_ledger_history, grant_allowance, record_adjustment, record_leave_event,
    recompute, register_attendance, register_holiday, run_aggregation,
};
use leave_ledger_audit::{Actor, Cause};
use leave_ledger_domain::EmployeeId;
use leave_ledger_persistence::Persistence;
use serde::Deserialize;
use std::sync::{Arc, PoisonError};
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Leave Ledger Server - HTTP server for the leave balance ledger.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    /// The persistence layer, serialized behind a mutex.
    persistence: Arc<Mutex<Persistence>>,
    /// Per-employee write locks. A cascade owns its employee's chain for
    /// the whole trigger-plus-recompute operation; different employees
    /// stay independent.
    locks: Arc<EmployeeLockRegistry>,
}

/// Actor and cause fields carried by every state-changing request.
#[derive(Debug, Clone, Deserialize)]
struct ActorContext {
    /// The actor ID performing this action.
    actor_id: String,
    /// The type of actor (e.g., "user", "scheduler").
    actor_type: String,
    /// The cause ID for this action.
    cause_id: String,
    /// The cause description.
    cause_description: String,
}

impl ActorContext {
    fn actor(&self) -> Actor {
        Actor::new(self.actor_id.clone(), self.actor_type.clone())
    }

    fn cause(&self) -> Cause {
        Cause::new(self.cause_id.clone(), self.cause_description.clone())
    }
}

/// A state-changing request body: actor context plus the operation
/// payload, flattened into one JSON object.
#[derive(Debug, Deserialize)]
struct WithContext<T> {
    #[serde(flatten)]
    context: ActorContext,
    #[serde(flatten)]
    request: T,
}

/// Payload-free body for the aggregation trigger.
#[derive(Debug, Deserialize)]
struct EmptyPayload {}

fn error_response(err: &ApiError) -> Response {
    let status: StatusCode = match err {
        ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
        ApiError::CascadeFailed { .. } => StatusCode::CONFLICT,
        ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status == StatusCode::INTERNAL_SERVER_ERROR {
        error!("Request failed: {err}");
    }

    (status, Json(serde_json::json!({ "error": err.to_string() }))).into_response()
}

/// The server's evaluation day (UTC).
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Persists the audit event an operation produced, surfacing storage
/// failures instead of dropping the trail.
fn commit_audit<T>(
    persistence: &mut Persistence,
    result: ApiResult<T>,
) -> Result<T, ApiError> {
    persistence
        .persist_audit_event(&result.audit_event)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to persist audit event: {e}"),
        })?;
    Ok(result.response)
}

async fn health() -> &'static str {
    "ok"
}

async fn post_leave_event(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<RecordLeaveEventRequest>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let handle = state.locks.handle(EmployeeId::new(body.request.employee_id));
    let _chain_guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

    let result = record_leave_event(
        &mut persistence,
        &body.request,
        body.context.actor(),
        body.context.cause(),
        today(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_adjustment(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<RecordAdjustmentRequest>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let handle = state.locks.handle(EmployeeId::new(body.request.employee_id));
    let _chain_guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

    let result = record_adjustment(
        &mut persistence,
        &body.request,
        body.context.actor(),
        body.context.cause(),
        today(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_allowance(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<GrantAllowanceRequest>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let handle = state.locks.handle(EmployeeId::new(body.request.employee_id));
    let _chain_guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

    let result = grant_allowance(
        &mut persistence,
        &body.request,
        body.context.actor(),
        body.context.cause(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_holiday(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<RegisterHolidayRequest>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    match register_holiday(&mut persistence, &body) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_attendance(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<RegisterAttendanceRequest>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    match register_attendance(&mut persistence, &body) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_recompute(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<RecomputeRequest>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let handle = state.locks.handle(EmployeeId::new(body.request.employee_id));
    let _chain_guard = handle.lock().unwrap_or_else(PoisonError::into_inner);

    let result = recompute(
        &mut persistence,
        &body.request,
        body.context.actor(),
        body.context.cause(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_run_aggregation(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<EmptyPayload>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    let result = run_aggregation(
        &mut persistence,
        body.context.actor(),
        body.context.cause(),
        today(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_delete_entry(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<EntryActionRequest>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    let result = delete_ledger_entry(
        &mut persistence,
        &body.request,
        body.context.actor(),
        body.context.cause(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn post_archive_entry(
    AxumState(state): AxumState<AppState>,
    Json(body): Json<WithContext<EntryActionRequest>>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    let result = archive_ledger_entry(
        &mut persistence,
        &body.request,
        body.context.actor(),
        body.context.cause(),
    )
    .and_then(|result| commit_audit(&mut persistence, result));

    match result {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
struct BalanceQuery {
    /// The evaluation date; defaults to the current day.
    date: Option<String>,
}

async fn get_balance(
    AxumState(state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<BalanceQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;
    let as_of: String = query.date.unwrap_or_else(|| today().to_string());

    match get_balance_as_of(&mut persistence, employee_id, &as_of) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
struct LedgerQuery {
    /// Whether archived entries are included.
    include_archived: Option<bool>,
}

async fn get_ledger(
    AxumState(state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<LedgerQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    match get_ledger_history(
        &mut persistence,
        employee_id,
        query.include_archived.unwrap_or(false),
    ) {
        Ok(response) => Json(response).into_response(),
        Err(err) => error_response(&err),
    }
}

async fn get_ledger_csv(
    AxumState(state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Query(query): Query<LedgerQuery>,
) -> Response {
    let mut persistence = state.persistence.lock().await;

    match export_ledger_history_csv(
        &mut persistence,
        employee_id,
        query.include_archived.unwrap_or(false),
    ) {
        Ok(csv) => ([(header::CONTENT_TYPE, "text/csv")], csv).into_response(),
        Err(err) => error_response(&err),
    }
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/leave-events", post(post_leave_event))
        .route("/adjustments", post(post_adjustment))
        .route("/allowances", post(post_allowance))
        .route("/holidays", post(post_holiday))
        .route("/attendance", post(post_attendance))
        .route("/recompute", post(post_recompute))
        .route("/aggregation/run", post(post_run_aggregation))
        .route("/entries/delete", post(post_delete_entry))
        .route("/entries/archive", post(post_archive_entry))
        .route("/employees/{employee_id}/balance", get(get_balance))
        .route("/employees/{employee_id}/ledger", get(get_ledger))
        .route("/employees/{employee_id}/ledger.csv", get(get_ledger_csv))
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Args = Args::parse();

    let persistence: Persistence = match &args.database {
        Some(path) => {
            info!("Opening database at {path}");
            Persistence::new_with_file(path)?
        }
        None => {
            info!("Using in-memory database");
            Persistence::new_in_memory()?
        }
    };

    let state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        locks: Arc::new(EmployeeLockRegistry::new()),
    };

    let app: Router = build_router(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", args.port)).await?;
    info!("Leave Ledger server listening on port {}", args.port);
    axum::serve(listener, app).await?;

    Ok(())
}

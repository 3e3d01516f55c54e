//! API routes for corad
//!
//! Route groups mirror the service surface: session lifecycle, the two-step
//! auth gate, account-scoped lookups, the public catalog, and health.
//! Unknown and expired sessions are indistinguishable on the wire - both are
//! a 404 telling the client to re-authenticate.

use crate::auth::{self, NricOutcome, PhoneOutcome};
use crate::server::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use cora_common::{
    AccountResponse, CoraError, FaqHit, FaqSearchRequest, FaqSearchResponse, HealthResponse,
    PlanSummary, PlansResponse, SessionSnapshot, StartSessionResponse, StoresResponse,
    VerifyNricRequest, VerifyPhoneRequest, VerifyResponse,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

type AppStateArc = Arc<AppState>;

fn session_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, CoraError::SessionNotFound.to_string())
}

// ============================================================================
// Session Routes
// ============================================================================

pub fn session_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/session/start", post(start_session))
        .route("/v1/session/:id", get(get_session))
        .route("/v1/session/:id/end", post(end_session))
}

async fn start_session(State(state): State<AppStateArc>) -> Json<StartSessionResponse> {
    let mut store = state.sessions.write().await;
    let session_id = store.create();
    info!("[S] Session {} started", session_id);

    Json(StartSessionResponse {
        session_id,
        expires_in_secs: store.idle_timeout().as_secs(),
    })
}

async fn get_session(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionSnapshot>, (StatusCode, String)> {
    let mut store = state.sessions.write().await;
    let record = store
        .snapshot(&id)
        .ok_or_else(session_not_found)?;

    // The cached profile name stays server-side until both factors pass
    let customer_name = if record.is_authenticated() {
        record.customer_name.clone()
    } else {
        None
    };

    Ok(Json(SessionSnapshot {
        session_id: id,
        phone_verified: record.phone_verified,
        nric_verified: record.nric_verified,
        authenticated: record.is_authenticated(),
        failed_nric_attempts: record.failed_nric_attempts,
        created_at: record.created_at,
        customer_name,
    }))
}

async fn end_session(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, String)> {
    let mut store = state.sessions.write().await;
    if store.end(&id) {
        info!("[S] Session {} ended", id);
        Ok(StatusCode::OK)
    } else {
        Err(session_not_found())
    }
}

// ============================================================================
// Auth Routes
// ============================================================================

pub fn auth_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/auth/:id/phone", post(verify_phone))
        .route("/v1/auth/:id/nric", post(verify_nric))
}

async fn verify_phone(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
    Json(req): Json<VerifyPhoneRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, String)> {
    let directory = state.directory.clone();
    let mut store = state.sessions.write().await;

    let (outcome, authenticated) = store
        .update(&id, |record| {
            let outcome = auth::verify_phone(record, &directory, &req.mobile);
            (outcome, record.is_authenticated())
        })
        .ok_or_else(session_not_found)?;

    let response = match outcome {
        PhoneOutcome::Verified => VerifyResponse {
            verified: true,
            authenticated,
            message: "Phone number verified. Please confirm the last 4 characters of your NRIC."
                .to_string(),
            attempts_remaining: None,
        },
        PhoneOutcome::InvalidFormat => VerifyResponse {
            verified: false,
            authenticated,
            message: "That does not look like a valid Singapore mobile number.".to_string(),
            attempts_remaining: None,
        },
        PhoneOutcome::UnknownNumber => VerifyResponse {
            verified: false,
            authenticated,
            message: "We could not find an account for that number.".to_string(),
            attempts_remaining: None,
        },
    };
    Ok(Json(response))
}

async fn verify_nric(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
    Json(req): Json<VerifyNricRequest>,
) -> Result<Json<VerifyResponse>, (StatusCode, String)> {
    let directory = state.directory.clone();
    let max_attempts = state.max_nric_attempts;
    let mut store = state.sessions.write().await;

    let (outcome, authenticated) = store
        .update(&id, |record| {
            let outcome = auth::verify_nric(record, &directory, &req.nric_last4, max_attempts);
            (outcome, record.is_authenticated())
        })
        .ok_or_else(session_not_found)?;

    let response = match outcome {
        NricOutcome::Verified => VerifyResponse {
            verified: true,
            authenticated,
            message: "Identity confirmed. You now have full account access.".to_string(),
            attempts_remaining: None,
        },
        NricOutcome::PhoneNotVerified => {
            return Err((StatusCode::CONFLICT, CoraError::VerificationOrder.to_string()))
        }
        NricOutcome::InvalidFormat => VerifyResponse {
            verified: false,
            authenticated,
            message: "Please provide exactly the last 4 characters of your NRIC.".to_string(),
            attempts_remaining: None,
        },
        NricOutcome::Mismatch { attempts_remaining } => VerifyResponse {
            verified: false,
            authenticated,
            message: "That does not match our records.".to_string(),
            attempts_remaining: Some(attempts_remaining),
        },
        NricOutcome::GateReset => VerifyResponse {
            verified: false,
            authenticated,
            message: "Too many failed attempts. Please verify your phone number again."
                .to_string(),
            attempts_remaining: Some(0),
        },
    };
    Ok(Json(response))
}

// ============================================================================
// Account Routes
// ============================================================================

pub fn account_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/account/:id", get(get_account))
}

async fn get_account(
    State(state): State<AppStateArc>,
    Path(id): Path<Uuid>,
) -> Result<Json<AccountResponse>, (StatusCode, String)> {
    let record = {
        let mut store = state.sessions.write().await;
        store
            .snapshot(&id)
            .ok_or_else(session_not_found)?
    };

    if !record.is_authenticated() {
        return Err((StatusCode::UNAUTHORIZED, CoraError::NotAuthenticated.to_string()));
    }

    let mobile = record.customer_mobile.as_deref().unwrap_or_default();
    let account = state.directory.find_by_mobile(mobile).ok_or_else(|| {
        error!("[A] Authenticated session {} bound to unknown mobile", id);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "account record missing".to_string(),
        )
    })?;
    let plan = state.directory.plan(&account.plan_id).ok_or_else(|| {
        error!("[A] Account {} references unknown plan {}", account.name, account.plan_id);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "plan record missing".to_string(),
        )
    })?;

    Ok(Json(AccountResponse {
        name: account.name.clone(),
        mobile: account.mobile.clone(),
        plan: PlanSummary {
            id: plan.id.clone(),
            name: plan.name.clone(),
            monthly_cents: plan.monthly_cents,
            data_gb: plan.data_gb,
        },
        outstanding_cents: account.outstanding_cents,
        bill_due_date: account.bill_due_date,
        data_used_mb: account.data_used_mb,
        data_total_mb: plan.data_gb * 1024,
        payment_status: account.payment_status,
    }))
}

// ============================================================================
// Catalog Routes
// ============================================================================

#[derive(Debug, Deserialize)]
struct StoresQuery {
    /// Postal-district prefix filter
    near: Option<String>,
}

pub fn catalog_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/v1/plans", get(list_plans))
        .route("/v1/stores", get(list_stores))
        .route("/v1/faq/search", post(search_faq))
}

async fn list_plans(State(state): State<AppStateArc>) -> Json<PlansResponse> {
    Json(PlansResponse {
        plans: state.directory.plans().to_vec(),
    })
}

async fn list_stores(
    State(state): State<AppStateArc>,
    Query(query): Query<StoresQuery>,
) -> Json<StoresResponse> {
    let stores = match query.near.as_deref() {
        Some(prefix) => state
            .directory
            .stores_near(prefix)
            .into_iter()
            .cloned()
            .collect(),
        None => state.directory.stores().to_vec(),
    };
    Json(StoresResponse { stores })
}

async fn search_faq(
    State(state): State<AppStateArc>,
    Json(req): Json<FaqSearchRequest>,
) -> Json<FaqSearchResponse> {
    let limit = req.limit.unwrap_or(5);
    let hits = state
        .directory
        .search_faq(&req.query, limit)
        .into_iter()
        .map(|(entry, score)| FaqHit {
            id: entry.id.clone(),
            question: entry.question.clone(),
            answer: entry.answer.clone(),
            score,
        })
        .collect();
    Json(FaqSearchResponse { hits })
}

// ============================================================================
// Health Routes
// ============================================================================

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    // Sweep before counting so the number reflects live sessions only
    let active_sessions = {
        let mut store = state.sessions.write().await;
        store.sweep();
        store.len()
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        active_sessions,
    })
}

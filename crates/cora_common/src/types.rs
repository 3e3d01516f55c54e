//! Wire types shared between corad and coractl
//!
//! Every request/response crossing the daemon HTTP API lives here so both
//! sides stay in lockstep. NRIC values never appear in any response type;
//! only verification booleans do.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::directory::{BillingPlan, PaymentStatus, StoreLocation};

/// Response to POST /v1/session/start
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: Uuid,
    /// Idle window before the session is evicted
    pub expires_in_secs: u64,
}

/// Auth-state snapshot for GET /v1/session/:id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: Uuid,
    pub phone_verified: bool,
    pub nric_verified: bool,
    /// Derived: phone_verified && nric_verified
    pub authenticated: bool,
    pub failed_nric_attempts: u32,
    pub created_at: DateTime<Utc>,
    /// Only present once the session is fully authenticated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
}

/// Request body for POST /v1/auth/:id/phone
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyPhoneRequest {
    pub mobile: String,
}

/// Request body for POST /v1/auth/:id/nric
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyNricRequest {
    pub nric_last4: String,
}

/// Outcome of either verification step.
///
/// A failed guess is a normal client-visible outcome, not a transport error,
/// so it travels as `verified: false` with a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub verified: bool,
    pub authenticated: bool,
    pub message: String,
    /// NRIC guesses left before the gate resets (phone step: None)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts_remaining: Option<u32>,
}

/// Plan summary embedded in account responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSummary {
    pub id: String,
    pub name: String,
    pub monthly_cents: i64,
    pub data_gb: u32,
}

/// Account snapshot for GET /v1/account/:id (authenticated sessions only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountResponse {
    pub name: String,
    pub mobile: String,
    pub plan: PlanSummary,
    pub outstanding_cents: i64,
    pub bill_due_date: NaiveDate,
    pub data_used_mb: u32,
    pub data_total_mb: u32,
    pub payment_status: PaymentStatus,
}

/// Request body for POST /v1/faq/search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqSearchRequest {
    pub query: String,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// A scored FAQ hit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqHit {
    pub id: String,
    pub question: String,
    pub answer: String,
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqSearchResponse {
    pub hits: Vec<FaqHit>,
}

/// Response to GET /v1/plans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlansResponse {
    pub plans: Vec<BillingPlan>,
}

/// Response to GET /v1/stores
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoresResponse {
    pub stores: Vec<StoreLocation>,
}

/// Response to GET /v1/health
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub active_sessions: usize,
}

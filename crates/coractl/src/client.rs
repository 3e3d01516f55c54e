//! HTTP client - communicates with corad

use anyhow::{Context, Result};
use cora_common::{
    AccountResponse, CoraError, FaqSearchRequest, FaqSearchResponse, HealthResponse,
    PlansResponse, SessionSnapshot, StartSessionResponse, StoresResponse, VerifyNricRequest,
    VerifyPhoneRequest, VerifyResponse,
};
use serde::de::DeserializeOwned;
use uuid::Uuid;

const DAEMON_URL: &str = "http://127.0.0.1:7870";

/// Resolve the daemon base URL: flag > $CORAD_URL > default
pub fn resolve_base_url(flag: Option<String>) -> String {
    flag.or_else(|| std::env::var("CORAD_URL").ok())
        .unwrap_or_else(|| DAEMON_URL.to_string())
}

/// Client for the corad HTTP API
pub struct CoraClient {
    client: reqwest::Client,
    base_url: String,
}

impl CoraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        self.get("/v1/health").await
    }

    pub async fn start_session(&self) -> Result<StartSessionResponse> {
        self.post("/v1/session/start", &serde_json::json!({})).await
    }

    pub async fn session(&self, id: Uuid) -> Result<SessionSnapshot> {
        self.get(&format!("/v1/session/{}", id)).await
    }

    pub async fn end_session(&self, id: Uuid) -> Result<()> {
        let url = format!("{}/v1/session/{}/end", self.base_url, id);
        let resp = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(map_connect_error)?;
        check_status(resp).await?;
        Ok(())
    }

    pub async fn verify_phone(&self, id: Uuid, mobile: &str) -> Result<VerifyResponse> {
        self.post(
            &format!("/v1/auth/{}/phone", id),
            &VerifyPhoneRequest {
                mobile: mobile.to_string(),
            },
        )
        .await
    }

    pub async fn verify_nric(&self, id: Uuid, last4: &str) -> Result<VerifyResponse> {
        self.post(
            &format!("/v1/auth/{}/nric", id),
            &VerifyNricRequest {
                nric_last4: last4.to_string(),
            },
        )
        .await
    }

    pub async fn account(&self, id: Uuid) -> Result<AccountResponse> {
        self.get(&format!("/v1/account/{}", id)).await
    }

    pub async fn plans(&self) -> Result<PlansResponse> {
        self.get("/v1/plans").await
    }

    pub async fn stores(&self, near: Option<&str>) -> Result<StoresResponse> {
        let path = match near {
            Some(prefix) => format!("/v1/stores?near={}", prefix),
            None => "/v1/stores".to_string(),
        };
        self.get(&path).await
    }

    pub async fn search_faq(&self, query: &str, limit: usize) -> Result<FaqSearchResponse> {
        self.post(
            "/v1/faq/search",
            &FaqSearchRequest {
                query: query.to_string(),
                limit: Some(limit),
            },
        )
        .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(map_connect_error)?;
        let resp = check_status(resp).await?;
        resp.json().await.context("Failed to parse daemon response")
    }

    async fn post<B: serde::Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(map_connect_error)?;
        let resp = check_status(resp).await?;
        resp.json().await.context("Failed to parse daemon response")
    }
}

fn map_connect_error(e: reqwest::Error) -> anyhow::Error {
    if e.is_connect() {
        CoraError::DaemonNotRunning.into()
    } else {
        e.into()
    }
}

/// Turn non-2xx responses into errors carrying the daemon's message text
async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response> {
    if resp.status().is_success() {
        return Ok(resp);
    }
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    anyhow::bail!(CoraError::Http(format!("{}: {}", status, text)))
}

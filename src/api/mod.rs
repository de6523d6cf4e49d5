//! HTTP client for the PEARL backend
//!
//! Blocking `ureq` client carrying a bearer token. A `401` triggers one
//! refresh-and-retry; if that is impossible or fails, stored credentials are
//! cleared and the caller gets [`ApiError::ReauthRequired`].

mod types;

pub use types::{
    AuthResponse, JobListing, JourneyRequest, JourneyResponse, OnboardingProgress,
    OnboardingRequest, OnboardingStatus, Skill, TrackEvent, User,
};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::ApiSettings;
use types::{CurrentUserResponse, JobsResponse, RefreshResponse};

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    Http(String, u16),

    #[error("Session expired. Please sign in again.")]
    ReauthRequired,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http(_, code) => Some(*code),
            _ => None,
        }
    }
}

/// Access and refresh tokens
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
}

impl Credentials {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Build a readable message from an error body
///
/// Tries `error`, then `detail`, then `message`, falling back to the raw body.
pub fn format_http_error(code: u16, body: &str) -> String {
    let body = body.trim();
    if body.is_empty() {
        return format!("HTTP {code}");
    }

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return format!("HTTP {code}: {body}");
    };

    let detail = ["error", "detail", "message"]
        .iter()
        .find_map(|k| value.get(*k))
        .map(|v| match v.as_str() {
            Some(s) => s.to_string(),
            None => v.to_string(),
        });

    match detail {
        Some(detail) => format!("HTTP {code}: {detail}"),
        None => format!("HTTP {code}: {body}"),
    }
}

fn encode_query_value(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for &b in value.as_bytes() {
        let is_unreserved =
            matches!(b, b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~');
        if is_unreserved {
            out.push(b as char);
        } else {
            out.push_str(&format!("%{:02X}", b));
        }
    }
    out
}

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    agent: ureq::Agent,
    credentials: Arc<Mutex<Credentials>>,
}

impl ApiClient {
    pub fn new(settings: &ApiSettings) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(settings.connect_timeout_secs))
            .timeout_read(Duration::from_secs(settings.read_timeout_secs))
            .build();

        Self {
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            agent,
            credentials: Arc::new(Mutex::new(Credentials::default())),
        }
    }

    pub fn with_url(base_url: impl Into<String>) -> Self {
        Self::new(&ApiSettings {
            base_url: base_url.into(),
            ..ApiSettings::default()
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn credentials(&self) -> Credentials {
        self.credentials
            .lock()
            .map(|c| c.clone())
            .unwrap_or_default()
    }

    pub fn set_credentials(&self, credentials: Credentials) {
        if let Ok(mut c) = self.credentials.lock() {
            *c = credentials;
        }
    }

    pub fn clear_credentials(&self) {
        self.set_credentials(Credentials::default());
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials().is_authenticated()
    }

    fn url(&self, path: &str, query: &[(&str, String)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        let mut first = true;
        for (k, v) in query {
            url.push(if first { '?' } else { '&' });
            first = false;
            url.push_str(k);
            url.push('=');
            url.push_str(&encode_query_value(v));
        }
        url
    }

    fn send_once(
        &self,
        method: &str,
        url: &str,
        body: Option<&serde_json::Value>,
    ) -> Result<ureq::Response, ApiError> {
        let mut req = self.agent.request(method, url);
        if let Some(token) = self.credentials().access_token {
            req = req.set("Authorization", &format!("Bearer {token}"));
        }

        let result = match body {
            Some(body) => req.send_json(body),
            None => req.call(),
        };
        result.map_err(|e| match e {
            ureq::Error::Status(code, resp) => {
                let body = resp.into_string().unwrap_or_default();
                ApiError::Http(format_http_error(code, &body), code)
            }
            other => ApiError::Transport(other.to_string()),
        })
    }

    /// Exchange the refresh token for a new access token
    fn refresh(&self) -> Result<bool, ApiError> {
        let Some(refresh_token) = self.credentials().refresh_token else {
            return Ok(false);
        };
        let url = self.url("/auth/refresh", &[]);
        let resp = self
            .agent
            .post(&url)
            .send_json(serde_json::json!({ "refresh_token": refresh_token }));

        let resp = match resp {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!("Token refresh failed: {}", e);
                return Ok(false);
            }
        };
        let refreshed: RefreshResponse = resp
            .into_json()
            .map_err(|e| ApiError::Decode(e.to_string()))?;

        self.set_credentials(Credentials {
            access_token: Some(refreshed.access_token),
            refresh_token: refreshed.refresh_token.or(Some(refresh_token)),
        });
        tracing::info!("Access token refreshed");
        Ok(true)
    }

    fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        query: &[(&str, String)],
        body: Option<&serde_json::Value>,
    ) -> Result<T, ApiError> {
        let url = self.url(path, query);
        let resp = match self.send_once(method, &url, body) {
            Err(ApiError::Http(_, 401)) => {
                tracing::warn!("{} {} returned 401, attempting token refresh", method, path);
                if !self.refresh().unwrap_or(false) {
                    self.clear_credentials();
                    return Err(ApiError::ReauthRequired);
                }
                match self.send_once(method, &url, body) {
                    Err(ApiError::Http(_, 401)) => {
                        self.clear_credentials();
                        return Err(ApiError::ReauthRequired);
                    }
                    other => other?,
                }
            }
            other => other?,
        };

        resp.into_json()
            .map_err(|e| ApiError::Decode(format!("{method} {path}: {e}")))
    }

    fn get<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ApiError> {
        self.request("GET", path, query, None)
    }

    fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T, ApiError> {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Decode(e.to_string()))?;
        self.request("POST", path, &[], Some(&body))
    }

    fn require_auth(&self) -> Result<(), ApiError> {
        if self.is_authenticated() {
            Ok(())
        } else {
            Err(ApiError::NotAuthenticated)
        }
    }

    fn adopt(&self, resp: &AuthResponse) {
        self.set_credentials(Credentials {
            access_token: Some(resp.access_token.clone()),
            refresh_token: resp.refresh_token.clone(),
        });
    }

    // ========================================
    // AUTH
    // ========================================

    pub fn signup(&self, email: &str, password: &str, username: &str) -> Result<AuthResponse, ApiError> {
        let resp: AuthResponse = self.post(
            "/auth/signup",
            &serde_json::json!({ "email": email, "password": password, "username": username }),
        )?;
        self.adopt(&resp);
        Ok(resp)
    }

    pub fn signin(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let resp: AuthResponse = self.post(
            "/auth/signin",
            &serde_json::json!({ "email": email, "password": password }),
        )?;
        self.adopt(&resp);
        Ok(resp)
    }

    /// Sign out remotely; local credentials are cleared either way
    pub fn signout(&self) -> Result<(), ApiError> {
        let result = if self.is_authenticated() {
            self.post::<serde_json::Value, _>("/auth/signout", &serde_json::json!({}))
                .map(|_| ())
        } else {
            Ok(())
        };
        self.clear_credentials();
        result
    }

    pub fn current_user(&self) -> Result<User, ApiError> {
        self.require_auth()?;
        let resp: CurrentUserResponse = self.get("/auth/me", &[])?;
        Ok(resp.user)
    }

    // ========================================
    // PROFILE & SKILLS
    // ========================================

    pub fn profile(&self, user_id: &str) -> Result<serde_json::Value, ApiError> {
        self.require_auth()?;
        self.get(
            &format!("/api/profile/complete/{}", encode_query_value(user_id)),
            &[],
        )
    }

    pub fn skills(&self, user_id: &str) -> Result<Vec<Skill>, ApiError> {
        self.require_auth()?;
        self.get(&format!("/api/user/{}/skills", encode_query_value(user_id)), &[])
    }

    // ========================================
    // ONBOARDING
    // ========================================

    pub fn onboarding_status(&self) -> Result<OnboardingStatus, ApiError> {
        self.get("/api/onboarding/status", &[])
    }

    pub fn submit_onboarding(&self, request: &OnboardingRequest) -> Result<serde_json::Value, ApiError> {
        self.require_auth()?;
        self.post("/api/onboarding/start", request)
    }

    // ========================================
    // JOBS & JOURNEY
    // ========================================

    pub fn job_recommendations(
        &self,
        target_role: Option<&str>,
        skills: &[String],
        location: &str,
    ) -> Result<Vec<JobListing>, ApiError> {
        let mut query = vec![("location", location.to_string())];
        if let Some(role) = target_role {
            query.push(("target_role", role.to_string()));
        }
        if !skills.is_empty() {
            query.push(("skills", skills.join(",")));
        }
        let resp: JobsResponse = self.get("/agent/jobs/recommendations", &query)?;
        Ok(resp.into_listings())
    }

    pub fn start_journey(&self, request: &JourneyRequest) -> Result<JourneyResponse, ApiError> {
        self.post("/agent/start-journey", request)
    }

    // ========================================
    // ANALYTICS & HEALTH
    // ========================================

    /// Record an analytics event; anonymous when signed out
    pub fn track(&self, event: &TrackEvent) -> Result<(), ApiError> {
        self.post::<serde_json::Value, _>("/api/analytics/track", event)
            .map(|_| ())
    }

    pub fn health(&self) -> bool {
        self.agent
            .get(&self.url("/health", &[]))
            .call()
            .map(|r| r.status() == 200)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_http_error() {
        assert_eq!(format_http_error(500, ""), "HTTP 500");
        assert_eq!(format_http_error(502, "bad gateway"), "HTTP 502: bad gateway");
        assert_eq!(
            format_http_error(404, r#"{"detail": "Profile not found"}"#),
            "HTTP 404: Profile not found"
        );
        assert_eq!(
            format_http_error(400, r#"{"error": "bad", "detail": "ignored"}"#),
            "HTTP 400: bad"
        );
        assert_eq!(
            format_http_error(422, r#"{"detail": [{"loc": ["body"]}]}"#),
            r#"HTTP 422: [{"loc":["body"]}]"#
        );
    }

    #[test]
    fn test_url_building() {
        let client = ApiClient::with_url("http://localhost:8000/");
        assert_eq!(
            client.url("/agent/jobs/recommendations", &[("skills", "Rust,SQL".into()), ("location", "New York".into())]),
            "http://localhost:8000/agent/jobs/recommendations?skills=Rust%2CSQL&location=New%20York"
        );
    }

    #[test]
    fn test_authenticated_calls_need_a_token() {
        let client = ApiClient::with_url("http://127.0.0.1:9");
        assert!(matches!(client.current_user(), Err(ApiError::NotAuthenticated)));
        assert!(matches!(client.skills("u1"), Err(ApiError::NotAuthenticated)));
    }

    #[test]
    fn test_jobs_response_shapes() {
        let a: JobsResponse = serde_json::from_str(
            r#"{"jobs": [{"title": "Backend Dev", "company": "Acme"}], "count": 1}"#,
        )
        .unwrap();
        assert_eq!(a.into_listings()[0].title, "Backend Dev");

        let b: JobsResponse = serde_json::from_str(
            r#"{"matched_jobs": [{"job": {"title": "SRE"}, "match_percentage": 87.5}]}"#,
        )
        .unwrap();
        let listings = b.into_listings();
        assert_eq!(listings[0].title, "SRE");
        assert_eq!(listings[0].match_score, Some(87.5));
    }
}

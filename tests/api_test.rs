//! Integration tests for the backend client and auth session

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use common::{me_body, signin_body, StubBackend};
use pearl::api::{ApiClient, ApiError, Credentials};
use pearl::auth::AuthSession;
use pearl::store::{keys, KvStore, MemoryStore, Persistence};

#[test]
fn test_signin_persists_tokens_and_sends_bearer() {
    let backend = StubBackend::start(|req| match req.path() {
        "/auth/signin" => (200, signin_body("access-1", "refresh-1")),
        "/auth/me" => (200, me_body()),
        _ => (404, r#"{"detail": "Not Found"}"#.to_string()),
    });

    let store = MemoryStore::new();
    let mut session = AuthSession::restore(
        ApiClient::with_url(&backend.base_url),
        Persistence::new(store.clone()),
    );
    let user = session.signin("ada@example.com", "hunter2").unwrap();
    assert_eq!(user.id, "user-42");

    let signin = &backend.requests_to("/auth/signin")[0];
    assert_eq!(signin.method, "POST");
    assert_eq!(signin.json()["email"], "ada@example.com");
    assert_eq!(signin.json()["password"], "hunter2");

    assert_eq!(
        store.get(keys::AUTH_TOKEN).unwrap().as_deref(),
        Some("\"access-1\"")
    );

    // a fresh session picks the saved token up
    let mut restored = AuthSession::restore(
        ApiClient::with_url(&backend.base_url),
        Persistence::new(store.clone()),
    );
    restored.me().unwrap();
    let me = &backend.requests_to("/auth/me")[0];
    assert_eq!(me.authorization.as_deref(), Some("Bearer access-1"));
}

#[test]
fn test_401_refreshes_once_and_retries() {
    let me_calls = Arc::new(AtomicUsize::new(0));
    let counter = me_calls.clone();
    let backend = StubBackend::start(move |req| match req.path() {
        "/auth/me" => {
            if req.authorization.as_deref() == Some("Bearer fresh") {
                counter.fetch_add(1, Ordering::SeqCst);
                (200, me_body())
            } else {
                (401, r#"{"detail": "Token expired"}"#.to_string())
            }
        }
        "/auth/refresh" => (
            200,
            r#"{"access_token": "fresh", "refresh_token": "refresh-2"}"#.to_string(),
        ),
        _ => (404, "{}".to_string()),
    });

    let store = MemoryStore::new();
    let persistence = Persistence::new(store.clone());
    persistence.save(keys::AUTH_TOKEN, &"stale");
    persistence.save(keys::REFRESH_TOKEN, &"refresh-1");

    let mut session = AuthSession::restore(ApiClient::with_url(&backend.base_url), persistence);
    let user = session.me().unwrap();
    assert_eq!(user.username, "ada");
    assert_eq!(me_calls.load(Ordering::SeqCst), 1);

    let refresh = backend.requests_to("/auth/refresh");
    assert_eq!(refresh.len(), 1);
    assert_eq!(refresh[0].json()["refresh_token"], "refresh-1");

    // rotated tokens are written back
    assert_eq!(
        store.get(keys::AUTH_TOKEN).unwrap().as_deref(),
        Some("\"fresh\"")
    );
    assert_eq!(
        store.get(keys::REFRESH_TOKEN).unwrap().as_deref(),
        Some("\"refresh-2\"")
    );
}

#[test]
fn test_failed_refresh_requires_reauth() {
    let backend = StubBackend::start(|req| match req.path() {
        "/auth/refresh" => (401, r#"{"detail": "Invalid refresh token"}"#.to_string()),
        _ => (401, r#"{"detail": "Token expired"}"#.to_string()),
    });

    let store = MemoryStore::new();
    let persistence = Persistence::new(store.clone());
    persistence.save(keys::AUTH_TOKEN, &"stale");
    persistence.save(keys::REFRESH_TOKEN, &"refresh-1");
    persistence.save(keys::AUTH_USER, &common::user_json());

    let mut session = AuthSession::restore(ApiClient::with_url(&backend.base_url), persistence);
    let err = session.me().unwrap_err();
    assert!(matches!(err, ApiError::ReauthRequired));

    assert!(!session.is_authenticated());
    assert_eq!(store.get(keys::AUTH_TOKEN).unwrap(), None);
    assert_eq!(store.get(keys::REFRESH_TOKEN).unwrap(), None);
    assert_eq!(store.get(keys::AUTH_USER).unwrap(), None);
    // one call, one failed refresh, no retry
    assert_eq!(backend.requests_to("/auth/me").len(), 1);
}

#[test]
fn test_401_without_refresh_token_requires_reauth() {
    let backend = StubBackend::start(|_| (401, "{}".to_string()));
    let client = ApiClient::with_url(&backend.base_url);
    client.set_credentials(Credentials {
        access_token: Some("stale".to_string()),
        refresh_token: None,
    });

    assert!(matches!(client.current_user(), Err(ApiError::ReauthRequired)));
    assert!(!client.is_authenticated());
    assert!(backend.requests_to("/auth/refresh").is_empty());
}

#[test]
fn test_error_bodies_are_reported() {
    let backend = StubBackend::start(|_| (404, r#"{"detail": "Profile not found"}"#.to_string()));
    let client = ApiClient::with_url(&backend.base_url);
    client.set_credentials(Credentials {
        access_token: Some("tok".to_string()),
        refresh_token: None,
    });

    let err = client.profile("user-42").unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.to_string(), "HTTP 404: Profile not found");
}

#[test]
fn test_job_recommendations_query() {
    let backend = StubBackend::start(|_| {
        (
            200,
            r#"{"success": true, "count": 1, "jobs": [{"title": "Backend Engineer", "company": "Acme", "location": "Chennai"}]}"#
                .to_string(),
        )
    });
    let client = ApiClient::with_url(&backend.base_url);

    let jobs = client
        .job_recommendations(Some("Backend Engineer"), &["Rust".to_string(), "SQL".to_string()], "Chennai")
        .unwrap();
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].company, "Acme");

    let req = &backend.requests_to("/agent/jobs/recommendations")[0];
    assert!(req.url.contains("location=Chennai"));
    assert!(req.url.contains("target_role=Backend%20Engineer"));
    assert!(req.url.contains("skills=Rust%2CSQL"));
}

#[test]
fn test_health() {
    let backend = StubBackend::start(|req| match req.path() {
        "/health" => (200, r#"{"status": "ok"}"#.to_string()),
        _ => (404, "{}".to_string()),
    });
    assert!(ApiClient::with_url(&backend.base_url).health());
    assert!(!ApiClient::with_url("http://127.0.0.1:9").health());
}

#[test]
fn test_track_event_body() {
    let backend = StubBackend::start(|_| (200, r#"{"success": true, "tracked": true}"#.to_string()));
    let client = ApiClient::with_url(&backend.base_url);

    let outcome = pearl::practice::PracticeOutcome::Completed {
        set_id: "debugging".to_string(),
        score: 100,
        lives: 3,
    };
    client.track(&pearl::sync::practice_track_event(&outcome)).unwrap();

    let req = &backend.requests_to("/api/analytics/track")[0];
    let body = req.json();
    assert_eq!(body["event_type"], "practice_complete");
    assert_eq!(body["content_type"], "taiken");
    assert_eq!(body["metadata"]["set_id"], "debugging");
}

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use service::auth::AuthConfig;

fn auth_config() -> AuthConfig {
    AuthConfig::from(&configs::AuthConfig {
        jwt_secret: "test-secret".into(),
        token_ttl_hours: 1,
        hash_memory_kib: 8,
        hash_iterations: 1,
        hash_parallelism: 1,
    })
}

async fn body_json(resp: axum::response::Response) -> anyhow::Result<Value> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Router plus a bearer token for a freshly registered user.
async fn app_with_token() -> anyhow::Result<(Router, String)> {
    let db = models::db::connect_sqlite_memory().await?;
    let app = server::startup::build_app(db, auth_config());
    let creds = json!({"email": "ops@example.com", "password": "pw"});
    for uri in ["/auth/register", "/auth/login"] {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&creds)?))?;
        let resp = app.clone().oneshot(req).await?;
        assert_eq!(resp.status(), StatusCode::OK);
        if uri == "/auth/login" {
            let token = body_json(resp).await?["token"].as_str().unwrap_or_default().to_string();
            return Ok((app, token));
        }
    }
    anyhow::bail!("login did not run")
}

fn authed(method: &str, uri: &str, token: &str, body: Option<Value>) -> anyhow::Result<Request<Body>> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"));
    Ok(match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&v)?))?,
        None => builder.body(Body::empty())?,
    })
}

async fn add(app: &Router, token: &str, os: &str) -> anyhow::Result<Value> {
    let resp = app
        .clone()
        .oneshot(authed("POST", "/api/computers", token, Some(json!({"os": os, "cpu": "x86_64", "ram": 16})))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await
}

#[tokio::test]
async fn test_add_get_and_list() -> anyhow::Result<()> {
    let (app, token) = app_with_token().await?;
    let first = add(&app, &token, "ubuntu").await?;
    let second = add(&app, &token, "debian").await?;
    assert_eq!(first["status"], true);
    assert!(first["ssh"].as_str().unwrap_or_default().starts_with("root@"));

    let id = first["id"].as_str().unwrap_or_default();
    let resp = app.clone().oneshot(authed("GET", &format!("/api/computers/{id}"), &token, None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, first);

    let resp = app.oneshot(authed("GET", "/api/computers", &token, None)?).await?;
    let all = body_json(resp).await?;
    assert_eq!(all, json!([first, second]));
    Ok(())
}

#[tokio::test]
async fn test_add_rejects_invalid_ram() -> anyhow::Result<()> {
    let (app, token) = app_with_token().await?;
    let resp = app
        .oneshot(authed("POST", "/api/computers", &token, Some(json!({"os": "linux", "cpu": "arm", "ram": 0})))?)
        .await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn test_reserve_relieve_cycle() -> anyhow::Result<()> {
    let (app, token) = app_with_token().await?;
    let c = add(&app, &token, "ubuntu").await?;
    let id = c["id"].as_str().unwrap_or_default().to_string();

    let resp = app.clone().oneshot(authed("POST", &format!("/api/computers/{id}/reserve"), &token, None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!({"id": id, "reserved": true}));

    let resp = app.clone().oneshot(authed("POST", &format!("/api/computers/{id}/reserve"), &token, None)?).await?;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await?["error"], "Already Reserved");

    let resp = app.clone().oneshot(authed("POST", &format!("/api/computers/{id}/relieve"), &token, None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await?, json!({"id": id, "reserved": false}));

    // relieve is idempotent
    let resp = app.clone().oneshot(authed("POST", &format!("/api/computers/{id}/relieve"), &token, None)?).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.oneshot(authed("GET", &format!("/api/computers/{id}"), &token, None)?).await?;
    let after = body_json(resp).await?;
    assert_eq!(after["status"], true);
    assert_eq!(after["ssh"], c["ssh"]);
    Ok(())
}

#[tokio::test]
async fn test_unknown_computer_is_not_found() -> anyhow::Result<()> {
    let (app, token) = app_with_token().await?;
    let id = Uuid::new_v4();
    for (method, uri) in [
        ("GET", format!("/api/computers/{id}")),
        ("POST", format!("/api/computers/{id}/reserve")),
        ("POST", format!("/api/computers/{id}/relieve")),
    ] {
        let resp = app.clone().oneshot(authed(method, &uri, &token, None)?).await?;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method} {uri}");
    }
    Ok(())
}

#[tokio::test]
async fn test_concurrent_reserve_single_winner() -> anyhow::Result<()> {
    let (app, token) = app_with_token().await?;
    let c = add(&app, &token, "ubuntu").await?;
    let id = c["id"].as_str().unwrap_or_default().to_string();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let req = authed("POST", &format!("/api/computers/{id}/reserve"), &token, None)?;
        handles.push(tokio::spawn(async move { app.oneshot(req).await.map(|r| r.status()) }));
    }
    let mut ok = 0;
    let mut conflict = 0;
    for h in handles {
        match h.await?? {
            StatusCode::OK => ok += 1,
            StatusCode::CONFLICT => conflict += 1,
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!((ok, conflict), (1, 7));
    Ok(())
}

#[tokio::test]
async fn test_bad_path_id_gets_json_error() -> anyhow::Result<()> {
    let (app, token) = app_with_token().await?;
    for (method, uri) in [
        ("GET", "/api/computers/not-a-uuid"),
        ("POST", "/api/computers/not-a-uuid/reserve"),
        ("POST", "/api/computers/not-a-uuid/relieve"),
    ] {
        let resp = app.clone().oneshot(authed(method, uri, &token, None)?).await?;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{method} {uri}");
        let err = body_json(resp).await?;
        assert_eq!(err["status"], "Error");
        assert_eq!(err["error"], "Bad Request");
    }

    let resp = app
        .oneshot(authed("POST", "/api/computers", &token, Some(json!({"os": "linux", "cpu": "arm"})))?)
        .await?;
    assert!(resp.status().is_client_error());
    assert_eq!(body_json(resp).await?["code"], 1001);
    Ok(())
}

//! End-to-end HTTP flows against the router

use authlab_server::response::Reply;
use authlab_server::router;
use authlab_server::server::build_state;
use authlab_token::TokenConfig;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
    response::Response,
};
use tower::ServiceExt;

const SECRET: &str = "http-flow-test-secret-0123456789ab";

fn app() -> Router {
    let state = build_state(&TokenConfig::new(SECRET), chrono::Duration::hours(1)).unwrap();
    router(state)
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn reply(response: Response) -> Reply {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn register(app: &Router, username: &str, password: &str) -> StatusCode {
    let body = format!(r#"{{"username":"{username}","password":"{password}"}}"#);
    app.clone()
        .oneshot(json_post("/register", &body))
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn health_is_public() {
    let response = app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn bearer_login_and_profile() {
    let app = app();
    assert_eq!(register(&app, "testuser", "secret123").await, StatusCode::CREATED);

    let response = app
        .clone()
        .oneshot(json_post(
            "/login",
            r#"{"username":"testuser","password":"secret123"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let login = reply(response).await;
    assert!(login.success);
    let token = login.token.expect("login returns a token");
    assert_eq!(token.split('.').count(), 3);

    let response = app
        .clone()
        .oneshot(
            Request::get("/profile")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(reply(response).await.message.contains("testuser"));
}

#[tokio::test]
async fn duplicate_registration_conflicts() {
    let app = app();
    assert_eq!(register(&app, "taro", "pw").await, StatusCode::CREATED);
    assert_eq!(register(&app, "taro", "pw").await, StatusCode::CONFLICT);
}

#[tokio::test]
async fn invalid_json_is_bad_request() {
    let response = app()
        .oneshot(json_post("/register", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(!reply(response).await.success);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = app();
    register(&app, "taro", "right").await;
    let response = app
        .oneshot(json_post("/login", r#"{"username":"taro","password":"wrong"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = reply(response).await;
    assert!(!body.success);
    assert!(body.token.is_none());
}

#[tokio::test]
async fn profile_rejects_missing_and_bad_tokens() {
    let app = app();
    let cases = [
        None,
        Some("Basic dXNlcjpwdw=="),
        Some("Bearer onlyonepart"),
        Some("Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.e30.AAAA"),
    ];
    for case in cases {
        let mut request = Request::get("/profile");
        if let Some(value) = case {
            request = request.header(header::AUTHORIZATION, value);
        }
        let response = app
            .clone()
            .oneshot(request.body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{case:?}");
    }
}

#[tokio::test]
async fn token_from_another_key_is_rejected() {
    let other = authlab_token::TokenService::from_config(&TokenConfig::new("a-different-secret-entirely-000000"))
        .unwrap();
    let token = other.issue_now("taro").unwrap();
    let response = app()
        .oneshot(
            Request::get("/profile")
                .header(header::AUTHORIZATION, format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn cookie_session_flow() {
    let app = app();
    register(&app, "hanako", "pw123").await;

    let response = app
        .clone()
        .oneshot(json_post(
            "/session/login",
            r#"{"username":"hanako","password":"pw123"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .expect("login sets a cookie")
        .to_string();
    assert!(set_cookie.contains("HttpOnly"));
    let cookie = set_cookie.split(';').next().unwrap().to_string();
    assert!(cookie.starts_with("session_id="));

    let profile = |cookie: String| {
        Request::get("/session/profile")
            .header(header::COOKIE, cookie)
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(profile(cookie.clone())).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(reply(response).await.message.contains("hanako"));

    let response = app
        .clone()
        .oneshot(
            Request::post("/session/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let cleared = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(cleared.contains("Max-Age=0"));

    let response = app.oneshot(profile(cookie)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn session_profile_without_cookie_is_unauthorized() {
    let response = app()
        .oneshot(Request::get("/session/profile").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn out_of_range_session_lifetime_is_a_server_error() {
    let state = build_state(
        &TokenConfig::new(SECRET),
        chrono::Duration::seconds(10_000_000_000_000),
    )
    .unwrap();
    let app = router(state);
    register(&app, "taro", "pw").await;

    let response = app
        .oneshot(json_post(
            "/session/login",
            r#"{"username":"taro","password":"pw"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use http_body_util::BodyExt;
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use std::time::Duration;
use tangocho::AppOptions;
use tangocho::accounts::{AccountStore, Admin, RegisterForm, User};
use tangocho::config::MIN_BCRYPT_COST;
use tangocho::words::fold_case;
use tokio::net::TcpListener;
use tower::ServiceExt;

pub const ANIMALS: &[(&str, &str)] = &[
    ("cat", "猫"),
    ("dog", "犬"),
    ("bird", "鳥"),
    ("fish", "魚"),
];

pub const PASSWORD: &str = "pass123";

pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect(":memory:")
        .await
        .unwrap();
    sqlx::migrate!().run(&pool).await.unwrap();
    pool
}

pub async fn seed_words(pool: &SqlitePool, words: &[(&str, &str)]) {
    for (english, japanese) in words {
        sqlx::query(
            "INSERT INTO word (english, japanese, english_folded, japanese_folded) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(english)
        .bind(japanese)
        .bind(fold_case(english))
        .bind(fold_case(japanese))
        .execute(pool)
        .await
        .unwrap();
    }
}

fn register_form(login_id: &str, name: &str) -> RegisterForm {
    RegisterForm {
        login_id: login_id.to_string(),
        password: PASSWORD.to_string(),
        password_confirm: PASSWORD.to_string(),
        name: name.to_string(),
    }
}

pub async fn create_user(pool: &SqlitePool, login_id: &str) {
    AccountStore::<User>::new(pool.clone(), MIN_BCRYPT_COST)
        .register(register_form(login_id, "Test User"))
        .await
        .unwrap();
}

pub async fn create_admin(pool: &SqlitePool, login_id: &str) {
    AccountStore::<Admin>::new(pool.clone(), MIN_BCRYPT_COST)
        .register(register_form(login_id, "Test Admin"))
        .await
        .unwrap();
}

pub fn test_app(pool: SqlitePool) -> Router {
    test_app_with_idle_timeout(pool, tangocho::session::DEFAULT_IDLE_TIMEOUT)
}

pub fn test_app_with_idle_timeout(pool: SqlitePool, session_idle_timeout: Duration) -> Router {
    tangocho::app_with_config(
        pool,
        AppOptions {
            bcrypt_cost: MIN_BCRYPT_COST,
            session_idle_timeout,
        },
    )
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

impl TestResponse {
    /// `name=value` of the session cookie set by this response, if any.
    pub fn session_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find(|v| v.starts_with("tangocho_session="))
            .and_then(|v| v.split(';').next())
            .map(str::to_string)
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, form: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(form.to_string())).unwrap()
}

/// Log in through the HTTP layer and return the session cookie.
pub async fn login(app: &Router, path: &str, login_id: &str) -> String {
    let form = format!("loginId={}&password={PASSWORD}", login_id.replace('@', "%40"));
    let response = send(app, post_form(path, &form, None)).await;
    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    response.session_cookie().expect("login sets a session cookie")
}

pub async fn admin_app(words: &[(&str, &str)]) -> (Router, String) {
    let pool = memory_pool().await;
    seed_words(&pool, words).await;
    create_admin(&pool, "root").await;
    let app = test_app(pool);
    let cookie = login(&app, "/login/admin", "root").await;
    (app, cookie)
}

pub async fn user_app(words: &[(&str, &str)]) -> (Router, String) {
    let pool = memory_pool().await;
    seed_words(&pool, words).await;
    create_user(&pool, "taro@example.com").await;
    let app = test_app(pool);
    let cookie = login(&app, "/login/user", "taro@example.com").await;
    (app, cookie)
}

pub struct TestServer {
    base_url: String,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn spawn_test_server(pool: SqlitePool) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, test_app(pool)).await.unwrap();
    });

    TestServer {
        base_url: format!("http://{}", addr),
    }
}

mod common;

use axum::http::StatusCode;
use common::{
    PASSWORD, admin_app, create_admin, create_user, get, login, memory_pool, post_form, send,
    test_app, test_app_with_idle_timeout,
};
use std::time::Duration;

#[tokio::test]
async fn user_login_sets_session_and_returns_profile() {
    let pool = memory_pool().await;
    create_user(&pool, "taro@example.com").await;
    let app = test_app(pool);

    let response = send(
        &app,
        post_form("/login/user", &format!("loginId=taro%40example.com&password={PASSWORD}"), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["login_id"], "taro@example.com");
    assert!(response.body.get("password_hash").is_none());

    let cookie = response.session_cookie().unwrap();
    let home = send(&app, get("/user/home", Some(&cookie))).await;
    assert_eq!(home.status, StatusCode::OK);
    assert_eq!(home.body["name"], "Test User");
}

#[tokio::test]
async fn unknown_id_and_wrong_password_look_the_same() {
    let pool = memory_pool().await;
    create_user(&pool, "taro@example.com").await;
    let app = test_app(pool);

    let unknown = send(
        &app,
        post_form("/login/user", "loginId=nobody%40example.com&password=pass123", None),
    )
    .await;
    let wrong = send(
        &app,
        post_form("/login/user", "loginId=taro%40example.com&password=wrong1", None),
    )
    .await;

    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown.body, wrong.body);
    assert_eq!(unknown.body["code"], "AUTH_FAILED");
    assert!(unknown.session_cookie().is_none());
}

#[tokio::test]
async fn user_credentials_do_not_open_admin_login() {
    let pool = memory_pool().await;
    create_user(&pool, "taro@example.com").await;
    let app = test_app(pool);

    let response = send(
        &app,
        post_form("/login/admin", &format!("loginId=taro%40example.com&password={PASSWORD}"), None),
    )
    .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_clears_session() {
    let (app, cookie) = admin_app(&[]).await;

    let response = send(&app, get("/logout", Some(&cookie))).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.session_cookie().as_deref(), Some("tangocho_session="));

    let home = send(&app, get("/admin/home", Some(&cookie))).await;
    assert_eq!(home.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_without_session_is_harmless() {
    let app = test_app(memory_pool().await);

    let response = send(&app, get("/logout", None)).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn login_rotates_token_and_keeps_other_slot() {
    let pool = memory_pool().await;
    create_admin(&pool, "root").await;
    create_user(&pool, "taro@example.com").await;
    let app = test_app(pool);

    let admin_cookie = login(&app, "/login/admin", "root").await;

    let response = send(
        &app,
        post_form(
            "/login/user",
            &format!("loginId=taro%40example.com&password={PASSWORD}"),
            Some(&admin_cookie),
        ),
    )
    .await;
    let both = response.session_cookie().unwrap();
    assert_ne!(both, admin_cookie);

    let stale = send(&app, get("/admin/home", Some(&admin_cookie))).await;
    assert_eq!(stale.status, StatusCode::UNAUTHORIZED);

    let admin_home = send(&app, get("/admin/home", Some(&both))).await;
    assert_eq!(admin_home.status, StatusCode::OK);
    let user_home = send(&app, get("/user/home", Some(&both))).await;
    assert_eq!(user_home.status, StatusCode::OK);
}

#[tokio::test]
async fn idle_session_expires() {
    let pool = memory_pool().await;
    create_user(&pool, "taro@example.com").await;
    let app = test_app_with_idle_timeout(pool, Duration::from_millis(300));

    let cookie = login(&app, "/login/user", "taro@example.com").await;
    let home = send(&app, get("/user/home", Some(&cookie))).await;
    assert_eq!(home.status, StatusCode::OK);

    tokio::time::sleep(Duration::from_millis(500)).await;

    let home = send(&app, get("/user/home", Some(&cookie))).await;
    assert_eq!(home.status, StatusCode::UNAUTHORIZED);
    assert_eq!(home.body["code"], "LOGIN_REQUIRED");
}

#[tokio::test]
async fn user_registration() {
    let app = test_app(memory_pool().await);
    let form = format!(
        "loginId=hanako%40example.com&password={PASSWORD}&passwordConfirm={PASSWORD}&name=Hanako"
    );

    let created = send(&app, post_form("/user/register", &form, None)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["login_id"], "hanako@example.com");

    let again = send(&app, post_form("/user/register", &form, None)).await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    login(&app, "/login/user", "hanako@example.com").await;
}

#[tokio::test]
async fn registration_rejects_mismatch_and_bad_fields() {
    let app = test_app(memory_pool().await);

    let mismatch = send(
        &app,
        post_form(
            "/user/register",
            "loginId=hanako%40example.com&password=pass123&passwordConfirm=pass124&name=Hanako",
            None,
        ),
    )
    .await;
    assert_eq!(mismatch.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(mismatch.body["code"], "VALIDATION_ERROR");

    let not_email = send(
        &app,
        post_form(
            "/user/register",
            "loginId=hanako&password=pass123&passwordConfirm=pass123&name=Hanako",
            None,
        ),
    )
    .await;
    assert_eq!(not_email.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(not_email.body["fields"][0]["field"], "loginId");
}

#[tokio::test]
async fn admin_registration_needs_admin() {
    let (app, cookie) = admin_app(&[]).await;
    let form = format!("loginId=second&password={PASSWORD}&passwordConfirm={PASSWORD}&name=Second");

    let anonymous = send(&app, post_form("/admin/register", &form, None)).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);

    let created = send(&app, post_form("/admin/register", &form, Some(&cookie))).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["login_id"], "second");

    login(&app, "/login/admin", "second").await;
}

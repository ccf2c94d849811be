use learnshelf::client::{ApiClient, CSRF_HEADER};
use learnshelf::model::{AvatarUpload, Progress};
use mockito::Matcher;
use std::sync::Arc;

fn client(server: &mockito::ServerGuard) -> Arc<ApiClient> {
    Arc::new(ApiClient::new(&server.url(), false).unwrap())
}

#[tokio::test]
async fn post_carries_token_and_get_does_not() {
    let mut server = mockito::Server::new_async().await;
    let token = server
        .mock("GET", "/csrf-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"csrf_token": "tok-123"}"#)
        .expect(1)
        .create_async()
        .await;
    let progress = server
        .mock("POST", "/api/course/progress")
        .match_header(CSRF_HEADER, "tok-123")
        .match_body(Matcher::Json(serde_json::json!({
            "course_uid": "c1",
            "status": "Completed"
        })))
        .with_status(200)
        .with_body(r#"{"message": "ok"}"#)
        .create_async()
        .await;
    let content = server
        .mock("GET", "/api/content")
        .match_header(CSRF_HEADER, Matcher::Missing)
        .with_status(200)
        .with_body(r#"{"content": []}"#)
        .create_async()
        .await;

    let api = client(&server);
    assert_eq!(api.prime_csrf().await.as_deref(), Some("tok-123"));
    // Cached: no second fetch.
    assert_eq!(api.prime_csrf().await.as_deref(), Some("tok-123"));

    api.update_progress("c1", Progress::Completed).await.unwrap();
    assert!(api.fetch_content().await.unwrap().is_empty());

    token.assert_async().await;
    progress.assert_async().await;
    content.assert_async().await;
}

#[tokio::test]
async fn failed_token_fetch_still_sends_request_with_empty_header() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/csrf-token")
        .with_status(500)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/api/login")
        .match_header(CSRF_HEADER, "")
        .with_status(400)
        .with_body(r#"{"error": "The CSRF token is missing."}"#)
        .create_async()
        .await;

    let api = client(&server);
    assert!(api.prime_csrf().await.is_none());

    let err = api.login("ana", "pw").await.unwrap_err();
    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message(), "The CSRF token is missing.");
    login.assert_async().await;
}

#[tokio::test]
async fn session_cookie_is_sent_back() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_header("set-cookie", "session=abc; HttpOnly; Path=/")
        .with_body(r#"{"message": "Logged in"}"#)
        .create_async()
        .await;
    let session = server
        .mock("GET", "/api/check_session")
        .match_header("cookie", "session=abc")
        .with_status(200)
        .with_body(r#"{"user": {"id": 1, "username": "ana", "is_admin": false}}"#)
        .create_async()
        .await;

    let api = client(&server);
    api.login("ana", "pw").await.unwrap();
    let user = api.check_session().await.unwrap();
    assert_eq!(user.username, "ana");
    assert!(!user.is_admin);
    session.assert_async().await;
}

#[tokio::test]
async fn avatar_upload_is_guarded_multipart() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/csrf-token")
        .with_status(200)
        .with_body(r#"{"csrf_token": "tok-9"}"#)
        .create_async()
        .await;
    let upload = server
        .mock("POST", "/api/profile/avatar")
        .match_header(CSRF_HEADER, "tok-9")
        .match_header(
            "content-type",
            Matcher::Regex("^multipart/form-data; boundary=".into()),
        )
        .match_body(Matcher::AllOf(vec![
            Matcher::Regex(r#"name="avatar"; filename="me.png""#.into()),
            Matcher::Regex("(?i)content-type: image/png".into()),
            Matcher::Regex("PNGDATA".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"avatar_url": "/static/avatars/me.png"}"#)
        .create_async()
        .await;

    let api = client(&server);
    api.prime_csrf().await;
    let resp = api
        .upload_avatar(&AvatarUpload::new("me.png", b"PNGDATA".to_vec()))
        .await
        .unwrap();
    assert_eq!(resp.avatar_url.as_deref(), Some("/static/avatars/me.png"));
    upload.assert_async().await;
}

#[tokio::test]
async fn logout_drops_session_cookie() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_header("set-cookie", "session=abc; Path=/")
        .with_body("{}")
        .create_async()
        .await;
    server
        .mock("POST", "/api/logout")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;
    let anonymous = server
        .mock("GET", "/api/check_session")
        .match_header("cookie", Matcher::Missing)
        .with_status(401)
        .create_async()
        .await;

    let api = client(&server);
    api.login("ana", "pw").await.unwrap();
    api.logout().await.unwrap();
    assert_eq!(api.check_session().await.unwrap_err().status(), Some(401));
    anonymous.assert_async().await;
}

#[tokio::test]
async fn transport_failure_gets_generic_message() {
    // Nothing listens on port 9 locally.
    let api = ApiClient::new("http://127.0.0.1:9", false).unwrap();
    let err = api.fetch_content().await.unwrap_err();
    assert!(err.is_transport());
    assert_eq!(err.user_message(), learnshelf::error::GENERIC_FAILURE);
}

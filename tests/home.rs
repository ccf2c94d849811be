use learnshelf::client::ApiClient;
use learnshelf::controller::HomeController;
use learnshelf::render::{Body, LOAD_FAILED, NO_TEXTBOOKS, Rows};
use learnshelf::session::{AuthAffordance, NavLinkKind};
use std::sync::Arc;

const CONTENT: &str = r#"{"content": [
    {"uid": "c1", "type": "course", "title": "Intro to Go", "categories": ["Programming"], "user_progress": "In Progress"},
    {"uid": "c2", "type": "course", "title": "Drawing", "categories": null},
    {"uid": "e1", "type": "ebook", "title": "Go Cookbook", "categories": ["Programming"], "path": "/reader/e1"}
]}"#;

fn controller(server: &mockito::ServerGuard) -> HomeController {
    let client = ApiClient::new(&server.url(), false).unwrap();
    HomeController::new(Arc::new(client))
}

async fn mock_token(server: &mut mockito::ServerGuard) {
    server
        .mock("GET", "/csrf-token")
        .with_status(200)
        .with_body(r#"{"csrf_token": "t"}"#)
        .create_async()
        .await;
}

#[tokio::test]
async fn init_loads_content_and_admin_session() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("GET", "/api/content")
        .with_status(200)
        .with_body(CONTENT)
        .create_async()
        .await;
    server
        .mock("GET", "/api/check_session")
        .with_status(200)
        .with_body(r#"{"user": {"id": 1, "username": "root", "is_admin": true}}"#)
        .create_async()
        .await;

    let mut home = controller(&server);
    let screen = home.init("").await;

    assert_eq!(
        screen.nav.auth,
        AuthAffordance::Welcome {
            username: "root".into()
        }
    );
    assert!(screen.nav.has(NavLinkKind::Profile));
    assert!(screen.nav.has(NavLinkKind::Admin));
    assert_eq!(home.state().categories, vec!["Programming"]);

    let Body::Dashboard(dashboard) = screen.body else {
        panic!("expected dashboard");
    };
    assert_eq!(dashboard.courses.items().len(), 2);
    assert_eq!(dashboard.ebooks.items().len(), 1);
    assert_eq!(dashboard.ebooks.items()[0].link, "/reader/e1");
}

#[tokio::test]
async fn content_failure_shows_inline_error() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("GET", "/api/content")
        .with_status(500)
        .create_async()
        .await;
    server
        .mock("GET", "/api/check_session")
        .with_status(401)
        .with_body(r#"{"error": "Not logged in"}"#)
        .create_async()
        .await;

    let mut home = controller(&server);
    let screen = home.init("").await;

    assert!(home.state().store.is_empty());
    let Body::Dashboard(dashboard) = screen.body else {
        panic!("expected dashboard");
    };
    assert_eq!(dashboard.courses, Rows::Error(LOAD_FAILED.to_string()));
    assert_eq!(dashboard.ebooks, Rows::Empty(NO_TEXTBOOKS));
}

#[tokio::test]
async fn no_session_means_login_prompt() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("GET", "/api/content")
        .with_status(200)
        .with_body(CONTENT)
        .create_async()
        .await;
    server
        .mock("GET", "/api/check_session")
        .with_status(401)
        .create_async()
        .await;

    let mut home = controller(&server);
    let screen = home.init("#courses").await;

    assert_eq!(screen.nav.auth, AuthAffordance::LoginPrompt);
    assert!(!screen.nav.has(NavLinkKind::Profile));
    assert!(!screen.nav.has(NavLinkKind::Admin));
    let Body::Library(library) = screen.body else {
        panic!("expected library");
    };
    assert_eq!(library.title, "Full Course Library");
    assert_eq!(library.cards.len(), 2);
}

#[tokio::test]
async fn login_error_text_is_shown_verbatim() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server).await;
    server
        .mock("POST", "/api/login")
        .with_status(401)
        .with_body(r#"{"error": "Invalid username or password."}"#)
        .create_async()
        .await;

    let mut home = controller(&server);
    let err = home.login("ana", "wrong").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid username or password.");
}

#[tokio::test]
async fn register_logs_in_and_reloads() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server).await;
    let register = server
        .mock("POST", "/api/register")
        .with_status(201)
        .with_body(r#"{"message": "Registered"}"#)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/api/login")
        .with_status(200)
        .with_body(r#"{"message": "Logged in"}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/api/check_session")
        .with_status(200)
        .with_body(r#"{"user": {"id": 7, "username": "newbie"}}"#)
        .create_async()
        .await;
    let content = server
        .mock("GET", "/api/content")
        .with_status(200)
        .with_body(CONTENT)
        .expect(1)
        .create_async()
        .await;

    let mut home = controller(&server);
    let screen = home.register("newbie", "pw").await.unwrap();
    assert!(screen.nav.has(NavLinkKind::Profile));
    assert!(!screen.nav.has(NavLinkKind::Admin));
    assert_eq!(home.state().store.len(), 3);

    register.assert_async().await;
    login.assert_async().await;
    content.assert_async().await;
}

#[tokio::test]
async fn duplicate_registration_surfaces_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/register")
        .with_status(409)
        .with_body(r#"{"error": "Username already exists."}"#)
        .create_async()
        .await;
    let login = server
        .mock("POST", "/api/login")
        .expect(0)
        .create_async()
        .await;

    let mut home = controller(&server);
    let err = home.register("ana", "pw").await.unwrap_err();
    assert_eq!(err.user_message(), "Username already exists.");
    login.assert_async().await;
}

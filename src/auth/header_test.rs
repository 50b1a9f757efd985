use super::*;
use crate::dom::{Element, MemoryDocument};
use crate::net::transport::Transport;
use crate::routing::RouteDefinition;
use crate::test_helpers::{ScriptedTransport, sample_routes};
use serde_json::json;

struct Page {
    doc: Arc<MemoryDocument>,
    login: NodeId,
    logout: NodeId,
}

fn page() -> Page {
    let doc = Arc::new(MemoryDocument::new());
    let login = doc.insert(Element::new("a").with_id("loginButton").with_class("d-none"));
    let logout = doc.insert(Element::new("button").with_id("logoutButton"));
    Page { doc, login, logout }
}

fn header(page: &Page, transport: Arc<dyn Transport>, routes: RouteTable) -> AuthHeader {
    AuthHeader::new(page.doc.clone(), JsonClient::new(transport), Arc::new(routes), AuthRoutes::default())
}

#[tokio::test]
async fn successful_probe_shows_logout() {
    let page = page();
    let transport = ScriptedTransport::ok(json!({"success": true}));
    let header = header(&page, transport.clone(), sample_routes());

    let state = header.init(&AuthHeaderOptions::default()).await.expect("init");

    assert_eq!(state, AuthState::LoggedIn);
    assert_eq!(header.state(), AuthState::LoggedIn);
    assert!(page.doc.has_class(page.login, "d-none"));
    assert!(!page.doc.has_class(page.logout, "d-none"));
    assert_eq!(transport.last().url, "/api/routes");
    assert_eq!(transport.last().method, "GET");
}

#[tokio::test]
async fn failed_probe_shows_login_and_binds_logout() {
    let page = page();
    let header = header(&page, ScriptedTransport::failing(500, "Internal Server Error", None), sample_routes());

    let state = header.init(&AuthHeaderOptions::default()).await.expect("init");

    assert_eq!(state, AuthState::LoggedOut(LoggedOutReason::Failed));
    assert!(!page.doc.has_class(page.login, "d-none"));
    assert!(page.doc.has_class(page.logout, "d-none"));
    assert_eq!(page.doc.handler_count(page.logout), 1);
}

#[tokio::test]
async fn rejected_probe_shows_login_without_binding() {
    let page = page();
    let header = header(&page, ScriptedTransport::failing(401, "Unauthorized", None), sample_routes());

    let state = header.init(&AuthHeaderOptions::default()).await.expect("init");

    assert_eq!(state, AuthState::LoggedOut(LoggedOutReason::Rejected(401)));
    assert!(!page.doc.has_class(page.login, "d-none"));
    assert!(page.doc.has_class(page.logout, "d-none"));
    assert_eq!(page.doc.handler_count(page.logout), 0);
}

#[tokio::test]
async fn envelope_failure_counts_as_logged_out() {
    let page = page();
    let header = header(&page, ScriptedTransport::ok(json!({"success": false})), sample_routes());

    let state = header.init(&AuthHeaderOptions::default()).await.expect("init");
    assert_eq!(state, AuthState::LoggedOut(LoggedOutReason::Failed));
}

#[tokio::test]
async fn unresolvable_probe_route_counts_as_logged_out() {
    let page = page();
    let transport = ScriptedTransport::ok(json!({"success": true}));
    let header = header(&page, transport.clone(), RouteTable::default());

    let state = header.init(&AuthHeaderOptions::default()).await.expect("init");
    assert_eq!(state, AuthState::LoggedOut(LoggedOutReason::Failed));
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn logout_click_navigates_to_the_resolved_route() {
    let page = page();
    let header = header(&page, ScriptedTransport::ok(json!({"success": true})), sample_routes());
    header.init(&AuthHeaderOptions::default()).await.expect("init");

    let event = page.doc.click(page.logout);
    assert!(event.default_prevented());
    assert_eq!(page.doc.location().as_deref(), Some("/logout/now"));
}

#[tokio::test]
async fn logout_click_falls_back_when_route_is_missing() {
    let page = page();
    let routes = RouteTable::new(vec![RouteDefinition::new("example.routes", "/api/routes")]);
    let header = header(&page, ScriptedTransport::ok(json!({"success": true})), routes);
    header.init(&AuthHeaderOptions::default()).await.expect("init");

    page.doc.click(page.logout);
    assert_eq!(page.doc.location().as_deref(), Some("/logout"));
}

#[tokio::test]
async fn reinit_rebinds_a_single_handler() {
    let page = page();
    let header = header(&page, ScriptedTransport::ok(json!({"success": true})), sample_routes());
    header.init(&AuthHeaderOptions::default()).await.expect("init");
    header.init(&AuthHeaderOptions::default()).await.expect("init");

    assert_eq!(page.doc.handler_count(page.logout), 1);
}

#[tokio::test]
async fn missing_controls_are_a_no_op() {
    let doc = Arc::new(MemoryDocument::new());
    let login = doc.insert(Element::new("a").with_id("loginButton"));
    let transport = ScriptedTransport::ok(json!({"success": true}));
    let header = AuthHeader::new(doc.clone(), JsonClient::new(transport.clone()), Arc::new(sample_routes()), AuthRoutes::default());

    let state = header.init(&AuthHeaderOptions::default()).await.expect("init");

    assert_eq!(state, AuthState::Unknown);
    assert!(transport.requests().is_empty());
    assert!(!doc.has_class(login, "d-none"));
}

#[tokio::test]
async fn custom_selectors_are_honored() {
    let doc = Arc::new(MemoryDocument::new());
    let login = doc.insert(Element::new("a").with_class("js-login"));
    let logout = doc.insert(Element::new("a").with_class("js-logout").with_class("d-none"));
    let header = AuthHeader::new(
        doc.clone(),
        JsonClient::new(ScriptedTransport::ok(json!({"success": true}))),
        Arc::new(sample_routes()),
        AuthRoutes::default(),
    );
    let options = AuthHeaderOptions { login_selector: " .js-login ".into(), logout_selector: ".js-logout".into() };

    assert_eq!(header.init(&options).await.expect("init"), AuthState::LoggedIn);
    assert!(doc.has_class(login, "d-none"));
    assert!(!doc.has_class(logout, "d-none"));
}

#[tokio::test]
async fn detached_client_is_fatal() {
    let page = page();
    let header = AuthHeader::new(page.doc.clone(), JsonClient::detached(), Arc::new(sample_routes()), AuthRoutes::default());
    let err = header.init(&AuthHeaderOptions::default()).await.expect_err("should be fatal");
    assert_eq!(err, PreconditionError::MissingCapability("http"));
}

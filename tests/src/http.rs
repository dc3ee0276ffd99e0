use std::time::Duration;

use reachr_common::check::{CheckFailure, CheckResult};
use reachr_common::network::target::HostTarget;
use reachr_core::checker::{HttpChecker, HttpProbe};
use tokio::net::TcpListener;

use crate::support::mock_server::{MockServer, Route};

fn checker(max_redirects: usize) -> HttpChecker {
    HttpChecker::with_settings(Duration::from_secs(2), "Mozilla/5.0", max_redirects).unwrap()
}

#[tokio::test]
async fn ok_status_is_success() {
    let server = MockServer::start().await;
    server.route("/", Route::Status(200));

    assert_eq!(checker(10).check(&server.url("/")).await, CheckResult::Success);
}

#[tokio::test]
async fn not_found_is_failure() {
    let server = MockServer::start().await;
    server.route("/missing", Route::Status(404));

    assert_eq!(
        checker(10).check(&server.url("/missing")).await,
        CheckResult::Failure(CheckFailure::HttpStatus(404))
    );
}

#[tokio::test]
async fn server_error_is_failure() {
    let server = MockServer::start().await;
    server.route("/", Route::Status(503));

    assert_eq!(
        checker(10).check(&server.url("/")).await,
        CheckResult::Failure(CheckFailure::HttpStatus(503))
    );
}

#[tokio::test]
async fn redirect_target_decides_the_result() {
    let server = MockServer::start().await;
    server
        .route("/a", Route::Redirect(301, server.url("/b").to_string()))
        .route("/b", Route::Status(404));

    assert_eq!(
        checker(10).check(&server.url("/a")).await,
        CheckResult::Failure(CheckFailure::HttpStatus(404))
    );
    let paths: Vec<String> = server
        .requests()
        .iter()
        .filter_map(|request| request.split_whitespace().nth(1).map(str::to_string))
        .collect();
    assert_eq!(paths, vec!["/a", "/b"]);
}

#[tokio::test]
async fn relative_redirect_chain_within_cap_is_followed() {
    let server = MockServer::start().await;
    server
        .route("/r1", Route::Redirect(302, "/r2".into()))
        .route("/r2", Route::Redirect(307, "/r3".into()))
        .route("/r3", Route::Redirect(308, "/done".into()))
        .route("/done", Route::Status(204));

    assert_eq!(checker(3).check(&server.url("/r1")).await, CheckResult::Success);
}

#[tokio::test]
async fn chain_longer_than_cap_fails() {
    let server = MockServer::start().await;
    server
        .route("/r1", Route::Redirect(302, "/r2".into()))
        .route("/r2", Route::Redirect(302, "/done".into()))
        .route("/done", Route::Status(200));

    assert_eq!(
        checker(1).check(&server.url("/r1")).await,
        CheckResult::Failure(CheckFailure::TooManyRedirects(1))
    );
}

#[tokio::test]
async fn redirect_loop_terminates() {
    let server = MockServer::start().await;
    server.route("/loop", Route::Redirect(302, "/loop".into()));

    let result = tokio::time::timeout(Duration::from_secs(10), checker(3).check(&server.url("/loop")))
        .await
        .expect("redirect loop did not terminate");

    assert_eq!(result, CheckResult::Failure(CheckFailure::TooManyRedirects(3)));
    assert_eq!(server.requests().len(), 4);
}

#[tokio::test]
async fn redirect_without_location_counts_as_success() {
    let server = MockServer::start().await;
    server.route("/", Route::Status(302));

    assert_eq!(checker(10).check(&server.url("/")).await, CheckResult::Success);
}

#[tokio::test]
async fn schemeless_target_tries_https_then_falls_back() {
    let server = MockServer::start().await;
    server.route("/health", Route::Status(200));

    let bare = HostTarget::parse(&format!("{}/health", server.authority())).unwrap();
    let prefixed = HostTarget::parse(&format!("https://{}/health", server.authority())).unwrap();
    assert_eq!(bare.url(), prefixed.url());

    assert_eq!(checker(10).check(bare.url()).await, CheckResult::Success);
    assert_eq!(server.tls_attempts(), 1);
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn relative_redirect_after_fallback_stays_on_http() {
    let server = MockServer::start().await;
    server
        .route("/old", Route::Redirect(301, "/new".into()))
        .route("/new", Route::Status(200));

    let bare = HostTarget::parse(&format!("{}/old", server.authority())).unwrap();
    assert_eq!(checker(10).check(bare.url()).await, CheckResult::Success);
    assert_eq!(server.tls_attempts(), 1);
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn requests_are_head_with_user_agent() {
    let server = MockServer::start().await;
    server.route("/", Route::Status(200));

    checker(10).check(&server.url("/")).await;

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].starts_with("HEAD / HTTP/1.1"));
    assert!(requests[0].to_ascii_lowercase().contains("user-agent: mozilla/5.0"));
}

#[tokio::test]
async fn refused_connection_is_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = url::Url::parse(&format!("http://{addr}/")).unwrap();
    assert!(matches!(
        checker(10).check(&url).await,
        CheckResult::Failure(CheckFailure::Transport(_) | CheckFailure::Timeout)
    ));
}

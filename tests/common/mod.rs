//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::time::Duration;

use widget_router::config::ServerConfig;
use widget_router::http::HttpServer;
use widget_router::lifecycle::Shutdown;
use widget_router::routing::MatchStrategy;

/// One expected exchange: method, path, status, body.
pub type Case = (&'static str, &'static str, u16, &'static str);

/// Request/response expectations for the whole route table.
pub const CASES: &[Case] = &[
    ("GET", "/", 200, "home\n"),
    ("HEAD", "/", 200, "home\n"),
    ("POST", "/", 405, "405 method not allowed\n"),

    ("GET", "/contact", 200, "contact\n"),
    ("HEAD", "/contact", 200, "contact\n"),
    ("POST", "/contact", 405, "405 method not allowed\n"),
    ("GET", "/contact/", 404, "404 page not found\n"),
    ("GET", "/contact/no", 404, "404 page not found\n"),

    ("GET", "/api/widgets", 200, "apiGetWidgets\n"),
    ("HEAD", "/api/widgets", 200, "apiGetWidgets\n"),
    ("GET", "/api/widgets/", 404, "404 page not found\n"),

    ("POST", "/api/widgets", 200, "apiCreateWidget\n"),
    ("POST", "/api/widgets/", 404, "404 page not found\n"),

    ("POST", "/api/widgets/foo", 200, "apiUpdateWidget foo\n"),
    ("POST", "/api/widgets/bar-baz", 200, "apiUpdateWidget bar-baz\n"),
    ("POST", "/api/widgets/foo/", 404, "404 page not found\n"),
    ("GET", "/api/widgets/foo", 405, "405 method not allowed\n"),

    ("POST", "/api/widgets/foo/parts", 200, "apiCreateWidgetPart foo\n"),
    ("POST", "/api/widgets/bar-baz/parts", 200, "apiCreateWidgetPart bar-baz\n"),
    ("POST", "/api/widgets/foo/parts/", 404, "404 page not found\n"),
    ("GET", "/api/widgets/foo/parts", 405, "405 method not allowed\n"),

    ("POST", "/api/widgets/foo/parts/1/update", 200, "apiUpdateWidgetPart foo 1\n"),
    ("POST", "/api/widgets/foo/parts/42/update", 200, "apiUpdateWidgetPart foo 42\n"),
    ("POST", "/api/widgets/bar-baz/parts/99/update", 200, "apiUpdateWidgetPart bar-baz 99\n"),
    ("GET", "/api/widgets/foo/parts/1/update", 405, "405 method not allowed\n"),
    ("POST", "/api/widgets/foo/parts/bar/update", 404, "404 page not found\n"),
    ("POST", "/api/widgets/foo/parts/-1/update", 404, "404 page not found\n"),
    ("POST", "/api/widgets/foo/parts/0/update", 404, "404 page not found\n"),
    ("POST", "/api/widgets/foo/parts/+1/update", 404, "404 page not found\n"),

    ("POST", "/api/widgets/foo/parts/1/delete", 200, "apiDeleteWidgetPart foo 1\n"),
    ("POST", "/api/widgets/foo/parts/42/delete", 200, "apiDeleteWidgetPart foo 42\n"),
    ("POST", "/api/widgets/bar-baz/parts/99/delete", 200, "apiDeleteWidgetPart bar-baz 99\n"),
    ("GET", "/api/widgets/foo/parts/1/delete", 405, "405 method not allowed\n"),

    ("GET", "/foo", 200, "widget foo\n"),
    ("HEAD", "/foo", 200, "widget foo\n"),
    ("GET", "/bar-baz", 200, "widget bar-baz\n"),
    ("GET", "/foo/", 404, "404 page not found\n"),
    ("POST", "/foo", 405, "405 method not allowed\n"),
    ("GET", "/foo%20bar", 200, "widget foo bar\n"),
    ("GET", "/foo%20bar/admin", 200, "widgetAdmin foo bar\n"),
    ("POST", "/api/widgets/foo%2Dbar/parts", 200, "apiCreateWidgetPart foo-bar\n"),
    ("GET", "/%FF", 404, "404 page not found\n"),

    ("GET", "/foo/admin", 200, "widgetAdmin foo\n"),
    ("HEAD", "/foo/admin", 200, "widgetAdmin foo\n"),
    ("GET", "/bar-baz/admin", 200, "widgetAdmin bar-baz\n"),
    ("GET", "/foo/admin/", 404, "404 page not found\n"),
    ("POST", "/foo/admin", 405, "405 method not allowed\n"),

    ("POST", "/foo/image", 200, "widgetImage foo\n"),
    ("GET", "/foo/image", 405, "405 method not allowed\n"),
    ("POST", "/bar-baz/image", 200, "widgetImage bar-baz\n"),
    ("POST", "/foo/image/", 404, "404 page not found\n"),
];

/// Both lookup strategies; every test runs against each.
pub const STRATEGIES: [MatchStrategy; 2] = [MatchStrategy::Linear, MatchStrategy::Prefix];

/// Start a server on an ephemeral port. Keep the returned `Shutdown` alive
/// for as long as the server should run.
#[allow(dead_code)]
pub async fn start_server(strategy: MatchStrategy) -> (SocketAddr, Shutdown) {
    let mut config = ServerConfig::default();
    config.routing.strategy = strategy;
    config.timeouts.shutdown_grace_secs = 1;

    let server = HttpServer::from_config(config).unwrap();
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    // Listener is already bound; give the accept loop a moment to start.
    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

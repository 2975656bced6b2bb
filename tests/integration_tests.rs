// Endpoint tests against the real router (collectors degrade instead of
// failing, so /api/status responds even where the system tools are absent)

use axum_test::TestServer;
use netobserver::config::AppConfig;
use netobserver::routes;

fn test_server() -> TestServer {
    let config = AppConfig::load_from_str("").expect("default config");
    let tera = routes::templates().expect("templates");
    TestServer::new(routes::app(config, tera))
}

#[tokio::test]
async fn test_index_renders_dashboard() {
    let server = test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    let body = response.text();
    assert!(body.contains("netobserver"));
    assert!(body.contains("data-refresh=\"5\""));
    assert!(body.contains("wlan0"));
}

#[tokio::test]
async fn test_version_endpoint() {
    let server = test_server();
    let response = server.get("/version").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(
        json.get("name").and_then(|v| v.as_str()),
        Some("netobserver")
    );
    assert!(json.get("version").and_then(|v| v.as_str()).is_some());
}

#[tokio::test]
async fn test_api_status_shape() {
    let server = test_server();
    let response = server.get("/api/status").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert_eq!(json["interfaces"]["wan"]["name"], "wlan0");
    assert_eq!(json["interfaces"]["lan"]["name"], "eth0");
    assert!(json["interfaces"]["all"].is_object());
    assert!(json["default_route"].is_object());
    assert!(json["nat"]["enabled"].is_boolean());
    assert_eq!(json["connectivity"]["ip"]["target"], "8.8.8.8");
    assert_eq!(json["connectivity"]["dns"]["target"], "google.com");
    assert!(json["errors"].is_array());
    assert!(json["generated_at"].is_string());
}

#[tokio::test]
async fn test_api_dhcp_leases_is_array() {
    let server = test_server();
    let response = server.get("/api/dhcp_leases").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert!(json.is_array());
}

#[tokio::test]
async fn test_api_logs_is_array() {
    let server = test_server();
    let response = server.get("/api/logs").await;
    response.assert_status_ok();
    let json: serde_json::Value = response.json();
    assert!(json.is_array());
}

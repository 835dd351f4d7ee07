//! Mock command server for client integration tests

use latchkey_client::{AuthClient, ClientConfig, SessionToken};
use serde_json::Value;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const ADMIN: &str = "root@example.com";
pub const ADMIN_TOKEN: &str = "admin-session-token";

/// Client with administrator credentials pointed at `server`
pub fn admin_client(server: &MockServer) -> AuthClient {
    let config = ClientConfig::new(server.uri())
        .unwrap()
        .with_admin_credentials(ADMIN, SessionToken::from(ADMIN_TOKEN));
    AuthClient::new(config).unwrap()
}

/// Client without administrator credentials
pub fn anonymous_client(server: &MockServer) -> AuthClient {
    AuthClient::new(ClientConfig::new(server.uri()).unwrap()).unwrap()
}

/// Respond to `POST {route}` whose body contains `expected` with a 200 and `body`
pub async fn mount_ok(server: &MockServer, route: &str, expected: Value, body: Value) {
    Mock::given(method("POST"))
        .and(path(route))
        .and(body_partial_json(expected))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Respond to any `POST {route}` with an error envelope
pub async fn mount_error(server: &MockServer, route: &str, status: u16, code: &str, message: &str) {
    Mock::given(method("POST"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(serde_json::json!({
            "error": { "code": code, "message": message }
        })))
        .mount(server)
        .await;
}

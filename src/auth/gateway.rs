use serde::{Deserialize, Serialize};

use crate::config::KeycloakConfig;
use crate::error::AppError;

/// Token pair issued by the identity provider. Deserialized from the OAuth2
/// wire format, serialized camelCase for API clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    #[serde(rename(deserialize = "access_token", serialize = "accessToken"))]
    pub access_token: String,
    #[serde(rename(deserialize = "refresh_token", serialize = "refreshToken"))]
    pub refresh_token: String,
    #[serde(rename(deserialize = "expires_in", serialize = "expiresIn"))]
    pub expires_in: u64,
    #[serde(rename(deserialize = "token_type", serialize = "tokenType"))]
    pub token_type: String,
}

/// Exchanges credentials for tokens and invalidates sessions against the
/// configured identity provider.
#[derive(Clone)]
pub struct AuthGateway {
    config: KeycloakConfig,
    http: reqwest::Client,
}

impl AuthGateway {
    pub fn new(config: KeycloakConfig, http: reqwest::Client) -> Self {
        Self { config, http }
    }

    /// Password-grant token request.
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenResponse, AppError> {
        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", username),
            ("password", password),
        ];

        let response = self
            .http
            .post(self.config.token_endpoint())
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("identity provider unreachable: {e}")))?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), username, "token request rejected");
            return Err(AppError::Unauthorized("invalid credentials".to_string()));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed token response: {e}")))
    }

    /// Invalidate the session behind a refresh token.
    pub async fn logout(&self, refresh_token: &str) -> Result<(), AppError> {
        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("refresh_token", refresh_token),
        ];

        let response = self
            .http
            .post(self.config.logout_endpoint())
            .form(&form)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("identity provider unreachable: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "failed to logout: {}",
                response.status()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Json};
    use axum::routing::post;
    use axum::Router;

    #[derive(Clone)]
    struct StubProvider {
        status: StatusCode,
        body: serde_json::Value,
    }

    async fn token_stub(State(stub): State<StubProvider>) -> axum::response::Response {
        if stub.body.is_null() {
            stub.status.into_response()
        } else {
            (stub.status, Json(stub.body)).into_response()
        }
    }

    /// Serve a fake provider and return its base URL.
    async fn spawn_provider(status: StatusCode, body: serde_json::Value) -> String {
        let stub = StubProvider { status, body };
        let app = Router::new()
            .route("/realms/site/protocol/openid-connect/token", post(token_stub))
            .route(
                "/realms/site/protocol/openid-connect/logout",
                post(token_stub),
            )
            .with_state(stub);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn gateway(server_url: String) -> AuthGateway {
        AuthGateway::new(
            KeycloakConfig {
                server_url,
                realm: "site".to_string(),
                client_id: "web-app".to_string(),
            },
            reqwest::Client::new(),
        )
    }

    #[tokio::test]
    async fn login_returns_tokens_from_provider() {
        let url = spawn_provider(
            StatusCode::OK,
            serde_json::json!({
                "access_token": "access-123",
                "refresh_token": "refresh-456",
                "expires_in": 300,
                "token_type": "Bearer"
            }),
        )
        .await;

        let tokens = gateway(url).login("alice", "secret").await.unwrap();
        assert!(!tokens.access_token.is_empty());
        assert!(!tokens.refresh_token.is_empty());
        assert_eq!(tokens.token_type, "Bearer");
    }

    #[tokio::test]
    async fn login_with_rejected_credentials_is_unauthorized() {
        let url = spawn_provider(
            StatusCode::UNAUTHORIZED,
            serde_json::json!({ "error": "invalid_grant" }),
        )
        .await;

        let err = gateway(url).login("alice", "wrong").await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn logout_accepts_provider_success() {
        let url = spawn_provider(StatusCode::NO_CONTENT, serde_json::Value::Null).await;
        gateway(url).logout("refresh-456").await.unwrap();
    }

    #[tokio::test]
    async fn logout_failure_is_upstream() {
        let url = spawn_provider(
            StatusCode::BAD_REQUEST,
            serde_json::json!({ "error": "invalid_grant" }),
        )
        .await;

        let err = gateway(url).logout("stale").await.unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[tokio::test]
    async fn unreachable_provider_is_upstream() {
        // Nothing listens on this port
        let err = gateway("http://127.0.0.1:1".to_string())
            .login("alice", "secret")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Upstream(_)));
    }

    #[test]
    fn token_response_parses_oauth2_wire_format() {
        let body = serde_json::json!({
            "access_token": "abc",
            "refresh_token": "def",
            "expires_in": 300,
            "token_type": "Bearer",
            "not_before_policy": 0
        });
        let parsed: TokenResponse = serde_json::from_value(body).unwrap();
        assert_eq!(parsed.access_token, "abc");
        assert_eq!(parsed.refresh_token, "def");
        assert_eq!(parsed.expires_in, 300);
        assert_eq!(parsed.token_type, "Bearer");
    }

    #[test]
    fn token_response_serializes_camel_case() {
        let response = TokenResponse {
            access_token: "abc".to_string(),
            refresh_token: "def".to_string(),
            expires_in: 300,
            token_type: "Bearer".to_string(),
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["accessToken"], "abc");
        assert_eq!(value["refreshToken"], "def");
        assert_eq!(value["expiresIn"], 300);
        assert_eq!(value["tokenType"], "Bearer");
    }
}

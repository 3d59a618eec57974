use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub keycloak: KeycloakConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Identity provider settings, passed explicitly into the auth gateway and
/// token validator constructors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeycloakConfig {
    pub server_url: String,
    pub realm: String,
    pub client_id: String,
}

impl KeycloakConfig {
    pub fn token_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/token",
            self.server_url.trim_end_matches('/'),
            self.realm
        )
    }

    pub fn logout_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/logout",
            self.server_url.trim_end_matches('/'),
            self.realm
        )
    }

    pub fn certs_endpoint(&self) -> String {
        format!(
            "{}/realms/{}/protocol/openid-connect/certs",
            self.server_url.trim_end_matches('/'),
            self.realm
        )
    }
}

impl AppConfig {
    /// Build configuration from environment variables, with development
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("APP_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("APP_MAX_UPLOAD_BYTES") {
            self.server.max_upload_bytes = v.parse().unwrap_or(self.server.max_upload_bytes);
        }

        if let Ok(v) = env::var("DATABASE_URL") {
            self.database.url = v;
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }

        if let Ok(v) = env::var("KEYCLOAK_SERVER_URL") {
            self.keycloak.server_url = v;
        }
        if let Ok(v) = env::var("KEYCLOAK_REALM") {
            self.keycloak.realm = v;
        }
        if let Ok(v) = env::var("KEYCLOAK_CLIENT_ID") {
            self.keycloak.client_id = v;
        }

        self
    }

    fn defaults() -> Self {
        Self {
            server: ServerConfig {
                port: 8080,
                max_upload_bytes: 10 * 1024 * 1024, // 10MB
            },
            database: DatabaseConfig {
                url: "postgres://localhost/introduce".to_string(),
                max_connections: 10,
            },
            keycloak: KeycloakConfig {
                server_url: "http://localhost:8081".to_string(),
                realm: "master".to_string(),
                client_id: "web-app".to_string(),
            },
        }
    }
}

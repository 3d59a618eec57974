use std::collections::HashMap;

use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::auth::Claims;
use crate::config::KeycloakConfig;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
struct JwksResponse {
    keys: Vec<Jwk>,
}

#[derive(Debug, Deserialize)]
struct Jwk {
    kid: String,
    kty: String,
    #[serde(default)]
    n: Option<String>,
    #[serde(default)]
    e: Option<String>,
}

/// Validates bearer tokens against the identity provider's published RSA
/// keys. Keys are cached by `kid`; an unknown `kid` triggers a refetch so
/// provider key rotation is picked up without a restart.
pub struct TokenValidator {
    certs_url: String,
    http: reqwest::Client,
    keys: RwLock<HashMap<String, DecodingKey>>,
}

impl TokenValidator {
    pub fn new(config: KeycloakConfig, http: reqwest::Client) -> Self {
        Self {
            certs_url: config.certs_endpoint(),
            http,
            keys: RwLock::new(HashMap::new()),
        }
    }

    pub async fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let header = decode_header(token)
            .map_err(|e| AppError::Unauthorized(format!("invalid bearer token: {e}")))?;
        let kid = header
            .kid
            .ok_or_else(|| AppError::Unauthorized("bearer token is missing a key id".to_string()))?;

        let key = self.decoding_key(&kid).await?;

        let mut validation = Validation::new(Algorithm::RS256);
        // Keycloak access tokens carry a variable audience; authorization is
        // decided from the role claims instead.
        validation.validate_aud = false;

        let data = decode::<Claims>(token, &key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("invalid bearer token: {e}")))?;
        Ok(data.claims)
    }

    async fn decoding_key(&self, kid: &str) -> Result<DecodingKey, AppError> {
        {
            let keys = self.keys.read().await;
            if let Some(key) = keys.get(kid) {
                return Ok(key.clone());
            }
        }

        self.refresh_keys().await?;

        let keys = self.keys.read().await;
        keys.get(kid)
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("bearer token signed by unknown key".to_string()))
    }

    async fn refresh_keys(&self) -> Result<(), AppError> {
        let response = self
            .http
            .get(&self.certs_url)
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("failed to fetch provider keys: {e}")))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "failed to fetch provider keys: {}",
                response.status()
            )));
        }

        let jwks = response
            .json::<JwksResponse>()
            .await
            .map_err(|e| AppError::Upstream(format!("malformed provider keys: {e}")))?;

        let mut keys = self.keys.write().await;
        keys.clear();
        for jwk in jwks.keys {
            if jwk.kty != "RSA" {
                continue;
            }
            let (Some(n), Some(e)) = (jwk.n.as_deref(), jwk.e.as_deref()) else {
                continue;
            };
            match DecodingKey::from_rsa_components(n, e) {
                Ok(key) => {
                    keys.insert(jwk.kid, key);
                }
                Err(err) => {
                    tracing::warn!(kid = %jwk.kid, "skipping unparseable provider key: {err}");
                }
            }
        }

        tracing::debug!(count = keys.len(), "refreshed provider signing keys");
        Ok(())
    }
}

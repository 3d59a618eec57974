use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{AuthGateway, TokenValidator};
use crate::config::AppConfig;
use crate::database::images::PgImageStore;
use crate::database::introduces::PgIntroduceStore;
use crate::graphql::{build_schema, ContentSchema};
use crate::services::{ImageService, IntroduceService};

/// Shared per-request context: service handles, the auth collaborators, and
/// the connection pool for health checks.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub pool: PgPool,
    pub images: ImageService,
    pub introduces: IntroduceService,
    pub auth: AuthGateway,
    pub validator: Arc<TokenValidator>,
    pub schema: ContentSchema,
}

impl AppState {
    pub fn new(config: AppConfig, pool: PgPool) -> Self {
        let images = ImageService::new(Arc::new(PgImageStore::new(pool.clone())));
        let introduces =
            IntroduceService::new(Arc::new(PgIntroduceStore::new(pool.clone())), images.clone());

        let http = reqwest::Client::new();
        let auth = AuthGateway::new(config.keycloak.clone(), http.clone());
        let validator = Arc::new(TokenValidator::new(config.keycloak.clone(), http));

        let schema = build_schema(introduces.clone());

        Self {
            config,
            pool,
            images,
            introduces,
            auth,
            validator,
            schema,
        }
    }
}

use axum::extract::DefaultBodyLimit;
use axum::middleware::from_fn_with_state;
use axum::routing::{get, post, put};
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use introduce_api::config::AppConfig;
use introduce_api::middleware::auth::require_admin;
use introduce_api::state::AppState;
use introduce_api::{database, graphql, handlers};

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, KEYCLOAK_*, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    let pool = match database::connect(&config.database) {
        Ok(pool) => pool,
        Err(e) => panic!("invalid database configuration: {}", e),
    };

    // The pool is lazy; schema creation is best-effort so the server still
    // boots (reporting degraded health) when the database is down.
    if let Err(e) = database::init_schema(&pool).await {
        tracing::warn!("schema initialization skipped: {}", e);
    }

    let port = config.server.port;
    let state = AppState::new(config, pool);
    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("introduce-api listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Public auth routes
        .merge(auth_routes())
        // Public image + content routes
        .merge(image_routes())
        .merge(introduce_routes())
        // Admin surface (bearer token + ADMIN role)
        .merge(admin_routes(state.clone()))
        // Read-only GraphQL query
        .route("/graphql", post(graphql::graphql_handler))
        // Global middleware
        .layer(DefaultBodyLimit::max(state.config.server.max_upload_bytes))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/logout", post(auth::logout))
}

fn image_routes() -> Router<AppState> {
    use handlers::image;

    Router::new()
        .route("/api/v1/image/upload", post(image::upload))
        .route("/api/v1/image/all", get(image::list_all))
        .route(
            "/api/v1/image/:id",
            get(image::get_by_id).delete(image::delete_by_id),
        )
}

fn introduce_routes() -> Router<AppState> {
    use handlers::introduce;

    Router::new()
        .route("/api/v1/introduce/all", get(introduce::list_all))
        .route(
            "/api/v1/introduce/by-title/:title",
            get(introduce::get_by_title),
        )
        .route("/api/v1/introduce/:id", get(introduce::get_by_id))
}

fn admin_routes(state: AppState) -> Router<AppState> {
    use handlers::admin;

    Router::new()
        .route("/api/v1/admin/introduce", post(admin::create))
        .route(
            "/api/v1/admin/introduce/:id",
            put(admin::update).delete(admin::delete),
        )
        .route(
            "/api/v1/admin/introduce/:id/status",
            put(admin::update_status),
        )
        .layer(from_fn_with_state(state, require_admin))
}

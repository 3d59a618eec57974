use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{realm_roles, Claims, Role};
use crate::error::AppError;
use crate::state::AppState;

/// Authenticated caller context extracted from a validated bearer token.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub subject: String,
    pub username: Option<String>,
    pub roles: Vec<Role>,
}

impl AuthUser {
    fn from_claims(claims: &Claims) -> Self {
        Self {
            subject: claims.sub.clone(),
            username: claims.preferred_username.clone(),
            roles: realm_roles(claims),
        }
    }
}

/// Guard for the admin surface: validates the bearer token against the
/// provider's keys and requires the ADMIN realm role.
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let claims = state.validator.validate(&token).await?;

    let user = AuthUser::from_claims(&claims);
    if !user.roles.contains(&Role::Admin) {
        return Err(AppError::Forbidden("admin role required".to_string()));
    }

    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Result<String, AppError> {
    let header = headers
        .get("authorization")
        .ok_or_else(|| AppError::Unauthorized("missing Authorization header".to_string()))?;

    let value = header
        .to_str()
        .map_err(|_| AppError::Unauthorized("invalid Authorization header".to_string()))?;

    match value.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Ok(token.to_string()),
        Some(_) => Err(AppError::Unauthorized("empty bearer token".to_string())),
        None => Err(AppError::Unauthorized(
            "Authorization header must use the Bearer scheme".to_string(),
        )),
    }
}

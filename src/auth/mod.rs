pub mod gateway;
pub mod validator;

use serde::Deserialize;

pub use gateway::{AuthGateway, TokenResponse};
pub use validator::TokenValidator;

/// Claims we care about from the identity provider's access token.
#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub preferred_username: Option<String>,
    #[serde(default)]
    pub realm_access: RealmAccess,
    pub exp: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Local role identifiers mapped from the provider's realm roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    User,
}

impl Role {
    fn from_claim(name: &str) -> Option<Role> {
        match name {
            "ADMIN" => Some(Role::Admin),
            "USER" => Some(Role::User),
            _ => None,
        }
    }
}

/// Map the token's `realm_access.roles` onto local roles, dropping anything
/// we do not recognize (Keycloak ships several built-in realm roles).
pub fn realm_roles(claims: &Claims) -> Vec<Role> {
    claims
        .realm_access
        .roles
        .iter()
        .filter_map(|role| Role::from_claim(role))
        .collect()
}

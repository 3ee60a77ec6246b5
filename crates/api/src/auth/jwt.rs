//! HS256 bearer tokens shared with the identity provider.
//!
//! The provider signs tokens with `JWT_SECRET`. Folio checks the signature,
//! the expiry (with a small clock-skew leeway) and that the `role` claim is
//! one it knows, then turns the claims into an [`ActorContext`].

use chrono::Utc;
use folio_core::actor::ActorContext;
use folio_core::roles::VALID_ROLES;
use folio_core::types::DbId;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every bearer token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject: the user's id in the `users` mirror table.
    pub sub: DbId,
    /// `"admin"` or `"editor"`.
    pub role: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token id (UUID v4).
    pub jti: String,
}

impl Claims {
    /// Claims for `user_id` valid for the configured lifetime from now.
    pub fn new(user_id: DbId, role: &str, config: &JwtConfig) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id,
            role: role.to_string(),
            exp: now + config.access_token_expiry_mins * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// The capability value handed to workflow operations.
    pub fn actor(&self) -> ActorContext {
        ActorContext::from_role(self.sub, &self.role)
    }
}

/// Why a token was refused.
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("invalid token: {0}")]
    Invalid(#[from] jsonwebtoken::errors::Error),

    #[error("unknown role '{0}'")]
    UnknownRole(String),
}

/// Token validation settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 secret shared with the identity provider.
    pub secret: String,
    /// Lifetime of tokens minted by [`issue_token`] (default: 15).
    pub access_token_expiry_mins: i64,
    /// Accepted clock skew when checking `exp`, in seconds (default: 60).
    pub leeway_secs: u64,
}

const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
const DEFAULT_LEEWAY_SECS: u64 = 60;

impl JwtConfig {
    /// Load token settings from the environment.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `JWT_SECRET`             | **yes**  | --      |
    /// | `JWT_ACCESS_EXPIRY_MINS` | no       | `15`    |
    /// | `JWT_LEEWAY_SECS`        | no       | `60`    |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is missing or empty, or a number does not parse.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let access_token_expiry_mins: i64 = std::env::var("JWT_ACCESS_EXPIRY_MINS")
            .unwrap_or_else(|_| DEFAULT_ACCESS_EXPIRY_MINS.to_string())
            .parse()
            .expect("JWT_ACCESS_EXPIRY_MINS must be a valid i64");

        let leeway_secs: u64 = std::env::var("JWT_LEEWAY_SECS")
            .unwrap_or_else(|_| DEFAULT_LEEWAY_SECS.to_string())
            .parse()
            .expect("JWT_LEEWAY_SECS must be a valid u64");

        Self {
            secret,
            access_token_expiry_mins,
            leeway_secs,
        }
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = self.leeway_secs;
        validation.set_required_spec_claims(&["exp"]);
        validation
    }
}

fn check_role(role: &str) -> Result<(), TokenError> {
    if VALID_ROLES.contains(&role) {
        Ok(())
    } else {
        Err(TokenError::UnknownRole(role.to_string()))
    }
}

/// Mint a token the way the identity provider would. Used by tests and
/// local tooling.
pub fn issue_token(user_id: DbId, role: &str, config: &JwtConfig) -> Result<String, TokenError> {
    check_role(role)?;
    let claims = Claims::new(user_id, role, config);
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(token)
}

/// Check a bearer token and return its claims.
pub fn verify_token(token: &str, config: &JwtConfig) -> Result<Claims, TokenError> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &config.validation(),
    )?;
    check_role(&data.claims.role)?;
    Ok(data.claims)
}

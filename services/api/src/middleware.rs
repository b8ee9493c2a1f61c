//! Authentication middleware for JWT token validation

use async_trait::async_trait;
use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::{error, warn};
use uuid::Uuid;

use crate::{
    error::ApiError,
    models::{Area, Role},
    state::AppState,
};

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: Uuid,
    pub role: Role,
    /// Issued at time
    pub iat: u64,
    /// Expiration time
    pub exp: u64,
    /// Token type (access or refresh)
    pub token_type: TokenType,
}

/// Token type enum
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Access token
    Access,
    /// Refresh token
    Refresh,
}

/// Authenticated user information
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    pub role: Role,
}

/// How issued tokens are signed
#[derive(Debug, Clone)]
pub enum SigningKey {
    /// RS256 public key, PEM encoded
    RsaPublicKey(String),
    /// HS256 shared secret
    Secret(String),
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub key: SigningKey,
    /// Clock skew tolerated on `exp`, in seconds (default: 60)
    pub leeway: u64,
}

impl JwtConfig {
    /// Create a new JwtConfig from environment variables
    ///
    /// # Environment Variables
    /// - `JWT_PUBLIC_KEY`: RS256 public key (PEM format) or path to the key file
    /// - `JWT_SECRET`: HS256 secret, used when no public key is set
    /// - `JWT_LEEWAY`: tolerated clock skew in seconds (default: 60)
    pub fn from_env() -> Result<Self, String> {
        let key = match env::var("JWT_PUBLIC_KEY") {
            Ok(public_key) => SigningKey::RsaPublicKey(read_pem(public_key)?),
            Err(_) => env::var("JWT_SECRET")
                .ok()
                .filter(|secret| !secret.is_empty())
                .map(SigningKey::Secret)
                .ok_or_else(|| "Neither JWT_PUBLIC_KEY nor JWT_SECRET is set".to_string())?,
        };

        let leeway = env::var("JWT_LEEWAY")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .unwrap_or(60);

        Ok(JwtConfig { key, leeway })
    }
}

/// Inline PEM is used as is; anything else is a path, tried from the working
/// directory and then from the crate root
fn read_pem(value: String) -> Result<String, String> {
    if value.starts_with("-----BEGIN") {
        return Ok(value);
    }

    std::fs::read_to_string(&value)
        .or_else(|_| {
            let mut path = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
            path.push(&value);
            std::fs::read_to_string(path)
        })
        .map(|pem| pem.trim().to_string())
        .map_err(|e| format!("Failed to read public key file: {}", e))
}

/// Verifies bearer tokens signed by the auth service
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &JwtConfig) -> Result<Self, jsonwebtoken::errors::Error> {
        let (decoding_key, algorithm) = match &config.key {
            SigningKey::RsaPublicKey(pem) => {
                (DecodingKey::from_rsa_pem(pem.as_bytes())?, Algorithm::RS256)
            }
            SigningKey::Secret(secret) => {
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = true;
        validation.leeway = config.leeway;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

/// Authentication middleware
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let bearer = req
        .headers()
        .typed_get::<Authorization<Bearer>>()
        .ok_or(ApiError::Unauthorized)?;

    let claims = state.verifier.verify(bearer.token()).map_err(|e| {
        error!("Failed to validate token: {}", e);
        ApiError::Unauthorized
    })?;

    if claims.token_type != TokenType::Access {
        warn!(user_id = %claims.sub, "Refresh token presented as bearer credential");
        return Err(ApiError::Unauthorized);
    }

    req.extensions_mut().insert(AuthUser {
        id: claims.sub,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .copied()
            .ok_or(ApiError::Unauthorized)
    }
}

/// Gate for `/api/admin`; runs after [`auth_middleware`]
pub async fn require_admin(
    user: AuthUser,
    req: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    if !user.role.can_access(Area::Admin) {
        warn!(user_id = %user.id, role = %user.role, path = %req.uri().path(), "Admin area denied");
        return Err(ApiError::Forbidden);
    }

    Ok(next.run(req).await)
}

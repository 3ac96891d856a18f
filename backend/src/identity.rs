//! # Identity Context
//!
//! Resolves who is calling from the request's `Authorization: Bearer <jwt>`
//! header. Tokens are issued elsewhere; this module only verifies them (HS256,
//! shared secret) and turns the claims into an [`Identity`].
//!
//! A request without a usable token is not rejected here. It resolves to the
//! anonymous identity and each endpoint decides whether that is acceptable:
//! reads of public surveys and response submission accept it, everything else
//! asks for [`Identity::require_user`] or [`Identity::require_admin`]. A
//! verified token whose roles include neither `USER` nor `ADMIN` is
//! authenticated but may not use those routes.

use crate::error::AppError;
use actix_web::dev::Payload;
use actix_web::http::header::{HeaderMap, AUTHORIZATION};
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use log::warn;
use serde::{Deserialize, Serialize};

/// User id that unauthenticated respondents are recorded under.
pub const GUEST_USER_ID: &str = "guest";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Admin,
}

impl Role {
    /// Accepts `USER`/`ADMIN` with or without a `ROLE_` prefix, in any case.
    pub fn parse(raw: &str) -> Option<Self> {
        let upper = raw.trim().to_ascii_uppercase();
        match upper.strip_prefix("ROLE_").unwrap_or(&upper) {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    user_id: Option<String>,
    roles: Vec<Role>,
}

impl Identity {
    pub fn anonymous() -> Self {
        Self {
            user_id: None,
            roles: Vec::new(),
        }
    }

    pub fn authenticated(user_id: impl Into<String>, roles: Vec<Role>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            roles,
        }
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    pub fn require_authenticated(&self) -> Result<&str, AppError> {
        self.user_id().ok_or(AppError::Unauthenticated)
    }

    /// Guard for routes open to `USER` or `ADMIN`.
    pub fn require_user(&self) -> Result<&str, AppError> {
        let user_id = self.require_authenticated()?;
        if !self.has_role(Role::User) && !self.is_admin() {
            warn!("User {user_id} has no USER or ADMIN role");
            return Err(AppError::PermissionDenied(
                "user or administrator role required".to_string(),
            ));
        }
        Ok(user_id)
    }

    pub fn require_admin(&self) -> Result<&str, AppError> {
        let user_id = self.require_authenticated()?;
        if !self.is_admin() {
            warn!("User {user_id} attempted an admin-only operation");
            return Err(AppError::PermissionDenied(
                "administrator role required".to_string(),
            ));
        }
        Ok(user_id)
    }

    /// The id a submitted response is attributed to.
    pub fn respondent_id(&self) -> &str {
        self.user_id().unwrap_or(GUEST_USER_ID)
    }
}

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub exp: u64,
}

/// Verifies bearer tokens. Registered once as app data.
#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Identity, jsonwebtoken::errors::Error> {
        let claims = decode::<Claims>(token, &self.key, &self.validation)?.claims;
        if claims.sub.trim().is_empty() {
            return Ok(Identity::anonymous());
        }
        let roles = claims.roles.iter().filter_map(|r| Role::parse(r)).collect();
        Ok(Identity::authenticated(claims.sub, roles))
    }

    /// Resolves the caller from request headers, falling back to anonymous.
    pub fn identify(&self, headers: &HeaderMap) -> Identity {
        let Some(token) = bearer_token(headers) else {
            return Identity::anonymous();
        };

        match self.verify(token) {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Rejected bearer token: {e}");
                Identity::anonymous()
            }
        }
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequest for Identity {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let identity = match req.app_data::<web::Data<TokenVerifier>>() {
            Some(verifier) => verifier.identify(req.headers()),
            None => {
                warn!("No token verifier registered, treating caller as anonymous");
                Identity::anonymous()
            }
        };
        ready(Ok(identity))
    }
}

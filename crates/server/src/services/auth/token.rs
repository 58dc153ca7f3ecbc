//! Bearer-token issuing and verification.
//!
//! Tokens are HS256 JWTs signed with the single deployment secret. A token
//! carries the admin id and the role *as of issuance*; the authorization gate
//! re-resolves the identity on every request, so the embedded role is
//! informational and never authoritative.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use angadi_core::{AdminId, Role};

/// Fixed token validity.
pub const TOKEN_VALIDITY_DAYS: i64 = 30;

/// Token verification/issuance failures.
///
/// Callers treat all verification variants identically (reject the request);
/// the distinction exists for logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// The token is past its expiry timestamp.
    #[error("token expired")]
    Expired,
    /// The signature does not match the deployment secret.
    #[error("invalid token signature")]
    InvalidSignature,
    /// The token structure cannot be parsed.
    #[error("malformed token")]
    Malformed,
    /// Signing a new token failed.
    #[error("token signing failed")]
    Signing,
}

/// Claims embedded in every issued token.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Admin id, as a string per JWT convention.
    sub: String,
    /// Role at issuance time; informational only.
    role: Role,
    /// Issued-at (Unix timestamp, seconds).
    iat: i64,
    /// Expiry (Unix timestamp, seconds).
    exp: i64,
}

/// The successfully verified content of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedToken {
    /// Subject admin id.
    pub admin_id: AdminId,
    /// Role snapshot from issuance time.
    pub role: Role,
}

/// Issues and verifies bearer tokens against the deployment secret.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a token service from the signing secret.
    #[must_use]
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Issue a token for `admin_id` valid for [`TOKEN_VALIDITY_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Signing` if encoding fails.
    pub fn issue(&self, admin_id: AdminId, role: Role) -> Result<String, TokenError> {
        self.issue_at(admin_id, role, Utc::now())
    }

    fn issue_at(
        &self,
        admin_id: AdminId,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let expires_at = issued_at + Duration::days(TOKEN_VALIDITY_DAYS);
        let claims = Claims {
            sub: admin_id.to_string(),
            role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding).map_err(|_| TokenError::Signing)
    }

    /// Verify a raw token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Expired` for a token past its expiry,
    /// `TokenError::InvalidSignature` for a signature mismatch, and
    /// `TokenError::Malformed` for anything that does not parse as one of
    /// our tokens.
    pub fn verify(&self, raw: &str) -> Result<VerifiedToken, TokenError> {
        let data = decode::<Claims>(raw, &self.decoding, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed,
            }
        })?;

        let admin_id = data
            .claims
            .sub
            .parse::<i32>()
            .map_err(|_| TokenError::Malformed)?;

        Ok(VerifiedToken {
            admin_id: AdminId::new(admin_id),
            role: data.claims.role,
        })
    }
}

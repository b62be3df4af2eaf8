//! Session token issuing and verification
//! HS256-signed tokens carrying the user id and a fixed one hour lifetime

use crate::{config::AppConfig, error::AppError};
use chrono::Utc;
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

/// Lifetime of every issued token, in seconds. There is no refresh.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Token claims
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at
    pub iat: i64,

    /// Expiration, always `iat + TOKEN_TTL_SECS`
    pub exp: i64,
}

impl Claims {
    /// Numeric user id asserted by the token
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub.parse::<i64>().map_err(|_| {
            tracing::debug!(sub = %self.sub, "Token subject is not a user id");
            AppError::Unauthorized
        })
    }
}

/// JWT service
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtService {
    /// Create JWT service from config
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        Self::from_secret(config.security.jwt_secret.expose_secret())
    }

    pub fn from_secret(secret: &str) -> Result<Self, AppError> {
        // Ensure secret is at least 32 bytes for HS256
        if secret.len() < 32 {
            return Err(AppError::Config("JWT secret too short (min 32 chars)".to_string()));
        }

        // Expiry is checked against an explicit clock in `verify_at`
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        })
    }

    /// Issue a token for `user_id`, valid for one hour from now
    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Issue a token as if the current unix time were `now`
    pub fn issue_at(&self, user_id: i64, now: i64) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: now,
            exp: now + TOKEN_TTL_SECS,
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to encode token: {:?}", e);
            AppError::Internal(format!("Failed to encode token: {}", e))
        })
    }

    /// Verify signature, shape and expiry of a token
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify as if the current unix time were `now`.
    ///
    /// A token is accepted on `[iat, exp)` and rejected from `exp` onwards.
    /// Key and crypto faults are server errors; everything else is `Unauthorized`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, AppError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(classify_decode_error)?
            .claims;

        if claims.exp <= now {
            tracing::debug!(exp = claims.exp, now, "Token expired");
            return Err(AppError::Unauthorized);
        }

        Ok(claims)
    }
}

/// Map a decode failure to the guard's outcome: key and crypto faults are
/// server errors (500), anything wrong with the token itself is 403.
fn classify_decode_error(e: jsonwebtoken::errors::Error) -> AppError {
    match e.kind() {
        ErrorKind::InvalidEcdsaKey
        | ErrorKind::InvalidRsaKey(_)
        | ErrorKind::RsaFailedSigning
        | ErrorKind::InvalidKeyFormat
        | ErrorKind::Crypto(_) => {
            tracing::error!("Token verification fault: {:?}", e);
            AppError::Internal(format!("Token verification fault: {}", e))
        }
        _ => {
            tracing::debug!("Token validation failed: {:?}", e);
            AppError::Unauthorized
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, response::IntoResponse};
    use http_body_util::BodyExt;

    const SECRET: &str = "test_secret_key_32_characters_long!";

    #[test]
    fn test_issue_and_verify() {
        let service = JwtService::from_secret(SECRET).unwrap();

        let token = service.issue(42).unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.exp - claims.iat, TOKEN_TTL_SECS);
    }

    #[test]
    fn test_short_secret_rejected() {
        assert!(JwtService::from_secret("short").is_err());
    }

    #[test]
    fn test_expiry_window() {
        let service = JwtService::from_secret(SECRET).unwrap();
        let issued = Utc::now().timestamp();
        let token = service.issue_at(7, issued).unwrap();

        assert!(service.verify_at(&token, issued).is_ok());
        assert!(service.verify_at(&token, issued + TOKEN_TTL_SECS - 1).is_ok());
        assert!(matches!(
            service.verify_at(&token, issued + TOKEN_TTL_SECS),
            Err(AppError::Unauthorized)
        ));
        assert!(service.verify_at(&token, issued + TOKEN_TTL_SECS + 60).is_err());
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let ours = JwtService::from_secret(SECRET).unwrap();
        let theirs = JwtService::from_secret("another_secret_key_of_32_characters").unwrap();

        let token = theirs.issue(1).unwrap();
        assert!(matches!(ours.verify(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_invalid_token_fails() {
        let service = JwtService::from_secret(SECRET).unwrap();
        assert!(matches!(service.verify("invalid_token"), Err(AppError::Unauthorized)));
        assert!(matches!(service.verify(""), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_non_numeric_subject() {
        let claims = Claims {
            sub: "not-a-number".to_string(),
            iat: 0,
            exp: TOKEN_TTL_SECS,
        };
        assert!(matches!(claims.user_id(), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_token_faults_are_unauthorized() {
        for kind in [
            ErrorKind::InvalidToken,
            ErrorKind::InvalidSignature,
            ErrorKind::ExpiredSignature,
            ErrorKind::InvalidAlgorithm,
        ] {
            assert!(matches!(
                classify_decode_error(kind.into()),
                AppError::Unauthorized
            ));
        }
    }

    #[tokio::test]
    async fn test_key_fault_is_server_error() {
        let error = classify_decode_error(ErrorKind::InvalidKeyFormat.into());
        assert!(matches!(error, AppError::Internal(_)));

        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body, serde_json::json!({"message": "error in server side"}));
    }
}

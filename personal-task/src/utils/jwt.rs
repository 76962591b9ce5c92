// personal-task/src/utils/jwt.rs
//
// ベアラートークンの検証のみを行う。トークンの発行は別サービスの責務。

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const MIN_SECRET_LENGTH: usize = 32;

/// JWT関連のエラー
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Failed to decode JWT: {0}")]
    DecodingError(String),

    #[error("JWT token has expired")]
    TokenExpired,

    #[error("Invalid JWT subject: {0}")]
    InvalidSubject(String),

    #[error("Invalid JWT configuration: {0}")]
    ConfigurationError(String),
}

/// アクセストークンのClaims
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AccessTokenClaims {
    /// Subject (owner ID)
    pub sub: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
}

impl AccessTokenClaims {
    pub fn owner_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::InvalidSubject(self.sub.clone()))
    }
}

/// HS256 トークンの検証器
pub struct JwtManager {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtManager {
    pub fn new(secret_key: &str) -> Result<Self, JwtError> {
        if secret_key.len() < MIN_SECRET_LENGTH {
            return Err(JwtError::ConfigurationError(format!(
                "JWT secret key must be at least {} characters",
                MIN_SECRET_LENGTH
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            decoding_key: DecodingKey::from_secret(secret_key.as_bytes()),
            validation,
        })
    }

    /// アクセストークンを検証・デコード
    pub fn verify_access_token(&self, token: &str) -> Result<AccessTokenClaims, JwtError> {
        decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }
}

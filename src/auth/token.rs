use crate::error::StoreError;
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within a session token.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    #[serde(rename = "userID")]
    pub user_id: i32,
    pub role: String,
    /// Expiration timestamp (seconds since epoch).
    #[serde(rename = "exp")]
    pub expires_at: i64,
}

/// Issues and validates HS256-signed session tokens.
///
/// Sessions are stateless: nothing is recorded server-side, the signed token
/// is the session.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration: Duration,
}

impl AuthService {
    pub fn new(secret: &[u8], expiration: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by hand in `validate_token`, after the signature.
        validation.validate_exp = false;
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            expiration,
        }
    }

    /// Signs a token for `user` that expires `expiration` from now.
    ///
    /// Fails only when signing itself fails, which is reported as `Internal`.
    pub fn issue_token(&self, user: &User) -> Result<String, StoreError> {
        let expires_at = Utc::now()
            .checked_add_signed(self.expiration)
            .ok_or_else(|| StoreError::Internal("token expiration overflows".into()))?
            .timestamp();

        let claims = SessionClaims {
            user_id: user.id,
            role: user.role.clone(),
            expires_at,
        };
        self.sign(&claims)
    }

    pub(crate) fn sign(&self, claims: &SessionClaims) -> Result<String, StoreError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            log::error!("failed to sign session token: {}", e);
            StoreError::Internal(format!("failed to sign token: {}", e))
        })
    }

    /// Verifies the signature, then the expiration.
    ///
    /// Anything that does not decode and verify, malformed encodings included,
    /// is `InvalidSignature`. Only a correctly signed token can be `Expired`.
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, StoreError> {
        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                log::warn!("rejected session token: {}", e);
                StoreError::InvalidSignature
            })?;

        if claims.expires_at < Utc::now().timestamp() {
            log::warn!("rejected expired session token for user {}", claims.user_id);
            return Err(StoreError::Expired);
        }

        Ok(claims)
    }
}

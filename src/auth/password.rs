use crate::error::StoreError;
use bcrypt::{hash, verify, DEFAULT_COST};
use lazy_static::lazy_static;

lazy_static! {
    // Verified against when a login names an unknown user, so that path costs
    // about as much as a wrong password.
    static ref DECOY_HASH: Option<String> = hash("decoy-password", DEFAULT_COST).ok();
}

pub fn hash_password(password: &str) -> Result<String, StoreError> {
    hash(password, DEFAULT_COST).map_err(|e| {
        log::error!("failed to hash password: {}", e);
        StoreError::from(e)
    })
}

pub fn verify_password(password: &str, hashed_password: &str) -> Result<bool, StoreError> {
    verify(password, hashed_password).map_err(|e| {
        log::error!("failed to verify password: {}", e);
        StoreError::from(e)
    })
}

/// Burns one bcrypt verification without a real hash. The outcome is irrelevant.
pub fn verify_decoy(password: &str) {
    if let Some(decoy) = DECOY_HASH.as_deref() {
        let _ = verify(password, decoy);
    }
}

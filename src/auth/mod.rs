pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::user::DEFAULT_ROLE;
use crate::models::NewUser;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use token::{AuthService, SessionClaims};

lazy_static! {
    // Regex for username validation: alphanumeric, underscores, hyphens
    static ref USERNAME_REGEX: regex::Regex = regex::Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap();
}

/// Represents the payload for a user login request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Desired username for the new account.
    /// At most 32 characters, alphanumeric, and can include underscores or hyphens.
    #[validate(
        length(min = 1, max = 32),
        regex(
            path = "USERNAME_REGEX",
            message = "Username must be alphanumeric, underscores, or hyphens"
        )
    )]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
    /// Role tag carried into session tokens. Defaults to `"user"`.
    #[validate(length(min = 1, max = 32))]
    pub role: Option<String>,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        NewUser {
            username: req.username,
            password: req.password,
            role: req.role.unwrap_or_else(|| DEFAULT_ROLE.to_string()),
        }
    }
}

/// Response body of a successful login.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// The signed session token.
    pub token: String,
}

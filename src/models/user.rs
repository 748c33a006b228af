use serde::{Deserialize, Serialize};

pub const DEFAULT_ROLE: &str = "user";

/// A registered account.
///
/// `password_hash` is never serialized, so a `User` can be returned to clients as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: i32,
    pub username: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Carried into session tokens; not interpreted by the auth layer.
    pub role: String,
}

/// What a caller hands to `UserStore::create_user`. Holds the plaintext
/// password, which the store consumes.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

impl NewUser {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            role: DEFAULT_ROLE.to_string(),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_is_not_serialized() {
        let user = User {
            id: 7,
            username: "alice".to_string(),
            password_hash: "$2b$12$abcdefghijklmnopqrstuv".to_string(),
            role: "admin".to_string(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["username"], "alice");
        assert_eq!(json["role"], "admin");
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_new_user_defaults_to_user_role() {
        assert_eq!(NewUser::new("bob", "pw").role, "user");
        assert_eq!(NewUser::new("bob", "pw").with_role("admin").role, "admin");
    }
}

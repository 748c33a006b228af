use chrono::Duration;
use std::sync::Mutex;

use super::lock;
use crate::auth::password::{hash_password, verify_decoy, verify_password};
use crate::auth::token::{AuthService, SessionClaims};
use crate::error::{StoreError, ValidationError, ValidationReason};
use crate::models::{NewUser, User};

#[derive(Debug, Default)]
struct UserTable {
    users: Vec<User>,
    last_user_id: i32,
}

/// Registered users plus the session-token policy that authenticates them.
pub struct UserStore {
    table: Mutex<UserTable>,
    auth: AuthService,
}

impl UserStore {
    pub fn new(secret: &[u8], token_expiration: Duration) -> Self {
        Self {
            table: Mutex::new(UserTable::default()),
            auth: AuthService::new(secret, token_expiration),
        }
    }

    /// Registers a user, hashing the password and assigning the next id.
    ///
    /// The whole operation runs under the store lock, so two concurrent
    /// registrations of one username cannot both succeed. Ids are only
    /// consumed by successful creations.
    pub fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        if new_user.username.is_empty() {
            return Err(ValidationError::new("username", ValidationReason::EmptyField).into());
        }
        if new_user.password.is_empty() {
            return Err(ValidationError::new("password", ValidationReason::EmptyField).into());
        }

        let mut table = lock(&self.table);

        if table.users.iter().any(|u| u.username == new_user.username) {
            return Err(StoreError::UsernameTaken);
        }

        let password_hash = hash_password(&new_user.password)?;
        table.last_user_id += 1;
        let user = User {
            id: table.last_user_id,
            username: new_user.username,
            password_hash,
            role: new_user.role,
        };
        table.users.push(user.clone());

        log::info!("user created: id={} username={}", user.id, user.username);
        Ok(user)
    }

    /// Checks credentials and returns a signed session token.
    ///
    /// An unknown username and a wrong password produce the same error.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<String, StoreError> {
        let table = lock(&self.table);

        let Some(user) = table.users.iter().find(|u| u.username == username) else {
            verify_decoy(password);
            log::debug!("login rejected: unknown username");
            return Err(StoreError::InvalidCredentials);
        };

        if !verify_password(password, &user.password_hash)? {
            log::debug!("login rejected: wrong password for user {}", user.id);
            return Err(StoreError::InvalidCredentials);
        }

        // Issued while still holding the lock, from the record that was verified.
        self.auth.issue_token(user)
    }

    pub fn get_by_username(&self, username: &str) -> Result<User, StoreError> {
        lock(&self.table)
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    /// Verifies a session token's signature and expiry. Needs no lock.
    pub fn validate_token(&self, token: &str) -> Result<SessionClaims, StoreError> {
        self.auth.validate_token(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use std::thread;

    const SECRET: &[u8] = b"user_store_test_secret";

    fn store() -> UserStore {
        UserStore::new(SECRET, Duration::hours(1))
    }

    #[test_log::test]
    fn test_register_then_authenticate() {
        let store = store();
        let user = store
            .create_user(NewUser::new("alice", "secret123"))
            .unwrap();

        assert_eq!(user.id, 1);
        assert_eq!(user.role, "user");
        assert_ne!(user.password_hash, "secret123");
        assert!(!user.password_hash.is_empty());

        let token = store.authenticate("alice", "secret123").unwrap();
        let claims = store.validate_token(&token).unwrap();
        assert_eq!(claims.user_id, 1);
        assert_eq!(claims.role, "user");
    }

    #[test]
    fn test_credential_failures_are_indistinguishable() {
        let store = store();
        store.create_user(NewUser::new("alice", "secret123")).unwrap();

        let wrong_password = store.authenticate("alice", "wrong").unwrap_err();
        let unknown_user = store.authenticate("bob", "x").unwrap_err();

        assert_eq!(wrong_password, StoreError::InvalidCredentials);
        assert_eq!(wrong_password, unknown_user);
        assert_eq!(wrong_password.to_string(), unknown_user.to_string());
    }

    #[test]
    fn test_duplicate_username_is_rejected_without_consuming_an_id() {
        let store = store();
        store.create_user(NewUser::new("alice", "one")).unwrap();

        assert_eq!(
            store.create_user(NewUser::new("alice", "two")),
            Err(StoreError::UsernameTaken)
        );

        let next = store.create_user(NewUser::new("bob", "three")).unwrap();
        assert_eq!(next.id, 2);
        // The original password still works; nothing was overwritten.
        assert!(store.authenticate("alice", "one").is_ok());
    }

    #[test]
    fn test_usernames_are_case_sensitive() {
        let store = store();
        store.create_user(NewUser::new("alice", "pw")).unwrap();
        assert!(store.create_user(NewUser::new("Alice", "pw")).is_ok());
        assert_eq!(
            store.authenticate("ALICE", "pw"),
            Err(StoreError::InvalidCredentials)
        );
    }

    #[test]
    fn test_empty_fields_are_rejected() {
        let store = store();
        assert_eq!(
            store.create_user(NewUser::new("", "pw")),
            Err(StoreError::from(ValidationError::new(
                "username",
                ValidationReason::EmptyField,
            )))
        );
        assert_eq!(
            store.create_user(NewUser::new("carol", "")),
            Err(StoreError::from(ValidationError::new(
                "password",
                ValidationReason::EmptyField,
            )))
        );
        assert_eq!(store.create_user(NewUser::new("carol", "pw")).unwrap().id, 1);
    }

    #[test]
    fn test_get_by_username() {
        let store = store();
        let created = store
            .create_user(NewUser::new("dave", "pw").with_role("admin"))
            .unwrap();

        assert_eq!(store.get_by_username("dave").unwrap(), created);
        assert_eq!(store.get_by_username("erin"), Err(StoreError::NotFound));
    }

    #[test]
    fn test_role_is_carried_into_token() {
        let store = store();
        store
            .create_user(NewUser::new("root", "pw").with_role("admin"))
            .unwrap();
        let token = store.authenticate("root", "pw").unwrap();
        assert_eq!(store.validate_token(&token).unwrap().role, "admin");
    }

    #[test]
    fn test_token_from_other_store_is_rejected() {
        let ours = store();
        let theirs = UserStore::new(b"someone_elses_secret", Duration::hours(1));
        theirs.create_user(NewUser::new("mallory", "pw")).unwrap();
        let token = theirs.authenticate("mallory", "pw").unwrap();

        assert_eq!(ours.validate_token(&token), Err(StoreError::InvalidSignature));
    }

    #[test]
    fn test_short_lived_token_expires() {
        let store = UserStore::new(SECRET, Duration::seconds(1));
        store.create_user(NewUser::new("frank", "pw")).unwrap();
        let token = store.authenticate("frank", "pw").unwrap();
        assert!(store.validate_token(&token).is_ok());

        thread::sleep(std::time::Duration::from_secs(2));
        assert_eq!(store.validate_token(&token), Err(StoreError::Expired));
    }

    #[test_log::test]
    fn test_concurrent_registration_of_same_username() {
        let store = store();

        let results: Vec<Result<User, StoreError>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|n| {
                    let store = &store;
                    scope.spawn(move || store.create_user(NewUser::new("grace", format!("pw{}", n))))
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == StoreError::UsernameTaken));
        assert_eq!(store.get_by_username("grace").unwrap().id, 1);
    }

    #[test]
    fn test_concurrent_registration_assigns_distinct_ids() {
        let store = store();

        thread::scope(|scope| {
            for n in 0..4 {
                let store = &store;
                scope.spawn(move || {
                    store
                        .create_user(NewUser::new(format!("user{}", n), "pw"))
                        .unwrap();
                });
            }
        });

        let ids: HashSet<i32> = (0..4)
            .map(|n| store.get_by_username(&format!("user{}", n)).unwrap().id)
            .collect();
        assert_eq!(ids, (1..=4).collect::<HashSet<i32>>());
    }
}

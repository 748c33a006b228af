#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Task management with user accounts, backed by concurrent in-memory stores."]
#![doc = "`store` holds the user and task collections, `auth` the password hashing and"]
#![doc = "session-token handling, and `routes` the actix-web surface used by `main.rs`."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::{AppError, StoreError};
pub use crate::store::{TaskStore, UserStore};

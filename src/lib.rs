#![doc = "The `taskdesk` library crate."]
#![doc = ""]
#![doc = "Client side of the task management API: the HTTP client and its error"]
#![doc = "normalization, auth and task services, the locale-aware router with its"]
#![doc = "navigation guard, form validation and the message catalogs."]
#![doc = "It is used by the `taskdesk` binary (`main.rs`)."]

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod i18n;
pub mod models;
pub mod notify;
pub mod router;
pub mod services;
pub mod storage;
pub mod validation;

pub use app::App;
pub use error::{ApiError, AppError};

pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod forms;
pub mod mailer;
pub mod models;
pub mod notifier;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod schema;
pub mod services;
pub mod uploads;

/// Role tag granted to back-office accounts.
pub const ADMIN_ROLE: &str = "admin";

/// Role tag assigned to every newly registered account.
pub const DEFAULT_USER_ROLE: &str = "user";

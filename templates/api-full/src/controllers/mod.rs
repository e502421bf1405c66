//! API controllers

mod auth;
mod health;
mod user;

pub use auth::AuthController;
pub use health::HealthController;
pub use user::UserController;


//! Tera template engine integration for email templates
//!
//! This module provides Tera-based email templating capabilities.
//!
//! # Features
//!
//! This module requires the `tera` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! armature-mail = { version = "0.1", features = ["tera"] }
//! ```

// TODO: Implement Tera template engine for emails
// This is a placeholder for future Tera integration

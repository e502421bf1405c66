//! MiniJinja template engine integration for email templates
//!
//! This module provides MiniJinja-based email templating capabilities.
//!
//! # Features
//!
//! This module requires the `minijinja` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! armature-mail = { version = "0.1", features = ["minijinja"] }
//! ```

// TODO: Implement MiniJinja template engine for emails
// This is a placeholder for future MiniJinja integration

/// MiniJinja template engine for email rendering.
pub struct MiniJinjaEngine;

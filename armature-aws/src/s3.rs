//! AWS S3 storage integration
//!
//! This module provides S3 storage capabilities for the Armature framework.
//!
//! # Features
//!
//! This module requires the `s3` feature to be enabled:
//!
//! ```toml
//! [dependencies]
//! armature-aws = { version = "0.1", features = ["s3"] }
//! ```

// TODO: Implement S3 storage backend
// This is a placeholder for future S3 integration

// Validation failures and the report type

use serde::Serialize;
use std::fmt;

/// Prefix used for failures that wrap an error raised while processing a
/// single property (a failing property reader, an unreadable referenced
/// property). Part of the failure contract: callers can detect wrapped
/// errors with [`ValidationReport::has_validation_exception`].
pub const VALIDATION_EXCEPTION_PREFIX: &str = "Object validation exception: ";

/// A single validation failure.
///
/// `members` holds the qualified member paths the failure applies to
/// (`Parent.Child`, `Items[2]`, `Dict[value#3]`). Object-level failures
/// carry no members.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    /// Error message.
    pub message: String,
    /// Qualified member paths, empty for object-level failures.
    pub members: Vec<String>,
}

impl Failure {
    /// Create an object-level failure without member paths.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            members: Vec::new(),
        }
    }

    /// Create a failure for a single qualified member. The message is
    /// prefixed with the member path.
    pub fn for_member(member: impl Into<String>, message: impl fmt::Display) -> Self {
        let member = member.into();
        Self {
            message: format!("{}: {}", member, message),
            members: vec![member],
        }
    }

    /// Create a failure with explicit member paths and an unprefixed message.
    pub fn with_members(message: impl Into<String>, members: Vec<String>) -> Self {
        Self {
            message: message.into(),
            members,
        }
    }

    /// Wrap a property-local error into a failure tagged to the member.
    pub fn exception(member: impl Into<String>, error: impl fmt::Display) -> Self {
        let member = member.into();
        Self {
            message: format!("{}{}: {}", VALIDATION_EXCEPTION_PREFIX, member, error),
            members: vec![member],
        }
    }

    /// Whether this failure wraps a property-local error.
    pub fn is_exception(&self) -> bool {
        self.message.starts_with(VALIDATION_EXCEPTION_PREFIX)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Overall outcome of a validation call: pass/fail plus the bounded
/// failure list.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    /// Overall result.
    pub ok: bool,
    /// Accumulated failures, bounded by the configured error cap.
    pub failures: Vec<Failure>,
}

impl ValidationReport {
    /// Build a report from a failure list.
    pub fn from_failures(ok: bool, failures: Vec<Failure>) -> Self {
        Self { ok, failures }
    }

    /// Check if there are any failures.
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Get the number of failures.
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// All distinct member paths that failed, in first-seen order.
    pub fn failed_members(&self) -> Vec<&str> {
        let mut members: Vec<&str> = Vec::new();
        for failure in &self.failures {
            for member in &failure.members {
                if !members.contains(&member.as_str()) {
                    members.push(member);
                }
            }
        }
        members
    }

    /// Whether any failure wraps a property-local error.
    pub fn has_validation_exception(&self) -> bool {
        self.failures.iter().any(Failure::is_exception)
    }

    /// Convert to JSON representation.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "ok": self.ok,
            "failures": self.failures.iter().map(|f| {
                serde_json::json!({
                    "message": f.message,
                    "members": f.members,
                })
            }).collect::<Vec<_>>()
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for failure in &self.failures {
            writeln!(f, "{}", failure)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_for_member() {
        let failure = Failure::for_member("Parent.Name", "value is required");
        assert_eq!(failure.message, "Parent.Name: value is required");
        assert_eq!(failure.members, vec!["Parent.Name".to_string()]);
    }

    #[test]
    fn test_exception_detection() {
        let failure = Failure::exception("Name", "reader failed");
        assert!(failure.is_exception());
        assert!(!Failure::new("plain").is_exception());
    }

    #[test]
    fn test_failed_members_dedup() {
        let report = ValidationReport::from_failures(
            false,
            vec![
                Failure::for_member("A", "x"),
                Failure::for_member("A", "y"),
                Failure::for_member("B", "z"),
            ],
        );
        assert_eq!(report.failed_members(), vec!["A", "B"]);
    }

    #[test]
    fn test_to_json() {
        let report =
            ValidationReport::from_failures(false, vec![Failure::for_member("A", "bad")]);
        let json = report.to_json();
        assert_eq!(json["ok"], false);
        assert_eq!(json["failures"][0]["members"][0], "A");
    }
}

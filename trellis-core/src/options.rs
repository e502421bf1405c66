//! Caller-owned validation options.
//!
//! The original design kept depth/error caps and type lists in
//! process-wide mutable state; here they live on an options value passed
//! to the entry points and threaded through the whole call tree, so
//! concurrent validation runs with different policies are trivially
//! safe.

use crate::meta::TypeMeta;
use std::sync::Arc;

/// Default maximum recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Default maximum number of accumulated errors.
pub const DEFAULT_MAX_ERRORS: usize = 200;

/// Outcome of an observation hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookOutcome {
    /// Proceed normally.
    Continue,
    /// Cancel the current step: the object validation, the current
    /// property, or (for the property-failure hook) the property loop.
    Cancel,
    /// Mark the current result as failed. A failed state can never be
    /// overridden back to success.
    Fail,
}

/// Snapshot handed to observation hooks.
#[derive(Debug, Clone, Copy)]
pub struct ValidationEvent<'a> {
    /// Type name of the object being validated.
    pub type_name: &'a str,
    /// Qualified path of the object, `None` at the root.
    pub member: Option<&'a str>,
    /// Current property, for per-property hooks.
    pub property: Option<&'a str>,
    /// Current recursion depth (root object is 1).
    pub depth: usize,
    /// Current array level.
    pub array_level: usize,
    /// Whether the validation has already failed.
    pub failed: bool,
    /// Failures accumulated so far across the whole call.
    pub failure_count: usize,
}

/// Observation hook signature.
pub type HookFn = Arc<dyn Fn(&ValidationEvent<'_>) -> HookOutcome + Send + Sync>;

/// Type-eligibility override: `Some(eligible)` to override the
/// classifier's decision, `None` for no opinion.
pub type TypeEligibilityFn = Arc<dyn Fn(&TypeMeta) -> Option<bool> + Send + Sync>;

/// Observation/cancellation hooks, all optional.
#[derive(Clone, Default)]
pub struct Hooks {
    /// Fires before an object's default validation.
    pub on_validation: Option<HookFn>,
    /// Fires before each property is validated.
    pub on_property: Option<HookFn>,
    /// Fires when an object finished with failures.
    pub on_validation_failed: Option<HookFn>,
    /// Fires after a property that produced failures.
    pub on_property_failed: Option<HookFn>,
}

/// Engine configuration for one validation call tree.
#[derive(Clone)]
pub struct ValidationOptions {
    /// Maximum recursion depth, 0 for no limit.
    pub max_depth: usize,
    /// Maximum number of accumulated errors, 0 for no limit.
    pub max_errors: usize,
    /// Tolerate failing readers of read-only properties (log and skip
    /// instead of recording a failure).
    pub ignore_getter_errors: bool,
    /// Type names forced to be validated.
    pub forced_types: Vec<String>,
    /// Type names denied from validation.
    pub denied_types: Vec<String>,
    /// Conditional eligibility override for types the classifier would
    /// otherwise skip or accept.
    pub type_eligibility: Option<TypeEligibilityFn>,
    /// Observation hooks.
    pub hooks: Hooks,
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_errors: DEFAULT_MAX_ERRORS,
            ignore_getter_errors: true,
            forced_types: Vec::new(),
            denied_types: Vec::new(),
            type_eligibility: None,
            hooks: Hooks::default(),
        }
    }
}

impl ValidationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum recursion depth (0 for no limit).
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the error cap (0 for no limit).
    pub fn with_max_errors(mut self, max_errors: usize) -> Self {
        self.max_errors = max_errors;
        self
    }

    /// Set whether failing readers of read-only properties are
    /// tolerated.
    pub fn with_ignore_getter_errors(mut self, ignore: bool) -> Self {
        self.ignore_getter_errors = ignore;
        self
    }

    /// Force a type to be validated.
    pub fn force_type(mut self, name: impl Into<String>) -> Self {
        self.forced_types.push(name.into());
        self
    }

    /// Deny a type from validation.
    pub fn deny_type(mut self, name: impl Into<String>) -> Self {
        self.denied_types.push(name.into());
        self
    }

    /// Install the type-eligibility override.
    pub fn with_type_eligibility<F>(mut self, f: F) -> Self
    where
        F: Fn(&TypeMeta) -> Option<bool> + Send + Sync + 'static,
    {
        self.type_eligibility = Some(Arc::new(f));
        self
    }

    /// Install the pre-validation hook.
    pub fn on_validation<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.on_validation = Some(Arc::new(f));
        self
    }

    /// Install the pre-property hook.
    pub fn on_property<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.on_property = Some(Arc::new(f));
        self
    }

    /// Install the failed-validation hook.
    pub fn on_validation_failed<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.on_validation_failed = Some(Arc::new(f));
        self
    }

    /// Install the failed-property hook.
    pub fn on_property_failed<F>(mut self, f: F) -> Self
    where
        F: Fn(&ValidationEvent<'_>) -> HookOutcome + Send + Sync + 'static,
    {
        self.hooks.on_property_failed = Some(Arc::new(f));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ValidationOptions::default();
        assert_eq!(opts.max_depth, 32);
        assert_eq!(opts.max_errors, 200);
        assert!(opts.ignore_getter_errors);
    }

    #[test]
    fn test_builder() {
        let opts = ValidationOptions::new()
            .with_max_depth(4)
            .with_max_errors(0)
            .deny_type("Secret")
            .force_type("Forced");
        assert_eq!(opts.max_depth, 4);
        assert_eq!(opts.max_errors, 0);
        assert_eq!(opts.denied_types, vec!["Secret".to_string()]);
        assert_eq!(opts.forced_types, vec!["Forced".to_string()]);
    }
}

//! Deep object-graph validation engine.
//!
//! Walks an object instance through its declared properties (nested
//! objects, lists, maps, enums) and applies the rules attached to each,
//! producing a structured list of failures with qualified member paths
//! (`Parent.Child`, `Items[2]`, `Dict[value#3]`).
//!
//! Types take part by implementing [`Validatable`]: static metadata
//! built once with [`TypeMeta::builder`] plus a property reader handing
//! values to the engine as [`Value`] views. The engine handles cycle
//! detection (reference identity), a hard recursion depth bound, a
//! global error cap, nullability policy and container traversal with
//! per-item and per-key rules scoped by array level.
//!
//! # Examples
//!
//! ```
//! use once_cell::sync::Lazy;
//! use trellis_core::{
//!     try_validate, Failure, PropertyError, PropertyMeta, PropertyValue, RuleContext, Rule,
//!     TypeMeta, ValidationOptions, Validatable, Value,
//! };
//!
//! struct NotEmpty;
//!
//! impl Rule for NotEmpty {
//!     fn name(&self) -> &'static str {
//!         "notEmpty"
//!     }
//!
//!     fn check(&self, value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
//!         match value.as_str() {
//!             Some(s) if s.trim().is_empty() => Some(ctx.fail("should not be empty")),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! struct User {
//!     name: String,
//! }
//!
//! static USER_META: Lazy<TypeMeta> = Lazy::new(|| {
//!     TypeMeta::builder("User")
//!         .property(PropertyMeta::new("Name").rule(NotEmpty))
//!         .build()
//! });
//!
//! impl Validatable for User {
//!     fn type_meta(&self) -> &'static TypeMeta {
//!         &USER_META
//!     }
//!
//!     fn read(&self, property: &str) -> PropertyValue<'_> {
//!         match property {
//!             "Name" => Ok(Value::from(&self.name)),
//!             _ => Err(PropertyError::unknown_property("User", property)),
//!         }
//!     }
//! }
//!
//! let mut failures = Vec::new();
//! let user = User { name: String::new() };
//! let ok = try_validate(&user, &mut failures, &ValidationOptions::default()).unwrap();
//! assert!(!ok);
//! assert_eq!(failures[0].members, vec!["Name".to_string()]);
//! ```

mod classify;
mod containers;
mod engine;
mod error;
mod failure;
mod meta;
mod options;
mod rule;
mod state;
mod validatable;
mod value;

pub use classify::{is_item_nullable, is_property_nullable, is_type_validatable, is_value_validatable};
pub use engine::{
    try_validate, try_validate_nullable, try_validate_with, validate, ValidateExt,
};
pub use error::ValidationError;
pub use failure::{Failure, ValidationReport, VALIDATION_EXCEPTION_PREFIX};
pub use meta::{
    ItemRule, ItemSuppression, PropertyMeta, RuleKind, TypeMeta, TypeMetaBuilder, ValidationTarget,
};
pub use options::{
    HookFn, HookOutcome, Hooks, TypeEligibilityFn, ValidationEvent, ValidationOptions,
    DEFAULT_MAX_DEPTH, DEFAULT_MAX_ERRORS,
};
pub use rule::{MultiRule, Rule, RuleContext};
pub use validatable::{PropertyError, PropertyValue, Validatable};
pub use value::{value_eq, EnumMeta, EnumValue, StaticValue, Value};

// Nullability and type eligibility classification

use crate::meta::{PropertyMeta, TypeMeta};
use crate::options::ValidationOptions;
use crate::value::Value;

/// Decide whether a type takes part in deep validation.
///
/// Precedence: forced list, denied list, the type's own never-validate
/// marker, then the conditional override hook. Object types are eligible
/// by default; the hook is consulted whenever the preceding steps would
/// skip the type, and may also veto an otherwise eligible type.
pub fn is_type_validatable(meta: &TypeMeta, opts: &ValidationOptions) -> bool {
    if opts.forced_types.iter().any(|t| t == meta.name) {
        return true;
    }
    let excluded = opts.denied_types.iter().any(|t| t == meta.name) || meta.no_validation;
    match &opts.type_eligibility {
        Some(hook) => hook(meta).unwrap_or(!excluded),
        None => !excluded,
    }
}

/// Decide whether a runtime value is subject to deep validation at all.
/// Scalars and opaque leaves never are; containers and enums always
/// are; objects consult the type classifier.
pub fn is_value_validatable(value: &Value<'_>, opts: &ValidationOptions) -> bool {
    match value {
        Value::Object(obj) => is_type_validatable(obj.type_meta(), opts),
        Value::List(_) | Value::Map(_) | Value::Enum(_) => true,
        _ => false,
    }
}

/// Property nullability: the explicit marker wins over the type-level
/// signal; without either, the property is non-nullable.
pub fn is_property_nullable(prop: &PropertyMeta) -> bool {
    match prop.allow_null {
        Some(explicit) => explicit,
        None => prop.type_nullable,
    }
}

/// Item nullability at a container nesting tier.
pub fn is_item_nullable(prop: &PropertyMeta, array_level: usize) -> bool {
    prop.items_nullable_at(array_level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meta::PropertyMeta;

    #[test]
    fn test_forced_wins_over_denied() {
        let meta = TypeMeta::builder("T").build();
        let opts = ValidationOptions::new().force_type("T").deny_type("T");
        assert!(is_type_validatable(&meta, &opts));
    }

    #[test]
    fn test_denied_type() {
        let meta = TypeMeta::builder("T").build();
        let opts = ValidationOptions::new().deny_type("T");
        assert!(!is_type_validatable(&meta, &opts));
    }

    #[test]
    fn test_no_validation_marker() {
        let meta = TypeMeta::builder("T").no_validation().build();
        assert!(!is_type_validatable(&meta, &ValidationOptions::default()));
    }

    #[test]
    fn test_override_hook() {
        let meta = TypeMeta::builder("T").no_validation().build();
        let opts = ValidationOptions::new().with_type_eligibility(|m| {
            if m.name == "T" { Some(true) } else { None }
        });
        assert!(is_type_validatable(&meta, &opts));
    }

    #[test]
    fn test_property_nullability_precedence() {
        assert!(is_property_nullable(&PropertyMeta::new("A").nullable()));
        assert!(!is_property_nullable(
            &PropertyMeta::new("A").nullable().disallow_null()
        ));
        assert!(is_property_nullable(&PropertyMeta::new("A").allow_null()));
        assert!(!is_property_nullable(&PropertyMeta::new("A")));
    }
}

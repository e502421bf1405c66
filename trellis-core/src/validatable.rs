// The object-graph capability trait

use crate::failure::Failure;
use crate::meta::TypeMeta;
use crate::value::Value;
use std::fmt;

/// Error raised by a property reader.
#[derive(Debug, Clone)]
pub struct PropertyError {
    pub message: String,
}

impl PropertyError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Error for a property the type does not declare.
    pub fn unknown_property(type_name: &str, property: &str) -> Self {
        Self::new(format!(
            "type {} has no readable property {}",
            type_name, property
        ))
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for PropertyError {}

/// Result of reading a property value.
pub type PropertyValue<'a> = Result<Value<'a>, PropertyError>;

/// Capability implemented by every object the engine can walk.
///
/// Implementations pair a value type with its static [`TypeMeta`]
/// (typically a `once_cell::sync::Lazy` built once per type) and expose
/// property values as [`Value`] views:
///
/// ```ignore
/// static USER_META: Lazy<TypeMeta> = Lazy::new(|| {
///     TypeMeta::builder("User")
///         .property(PropertyMeta::new("Name").rule(MinLength(3)))
///         .property(PropertyMeta::new("Age"))
///         .build()
/// });
///
/// impl Validatable for User {
///     fn type_meta(&self) -> &'static TypeMeta {
///         &USER_META
///     }
///
///     fn read(&self, property: &str) -> PropertyValue<'_> {
///         match property {
///             "Name" => Ok(Value::from(&self.name)),
///             "Age" => Ok(Value::from(self.age)),
///             _ => Err(PropertyError::unknown_property("User", property)),
///         }
///     }
/// }
/// ```
pub trait Validatable {
    /// Static metadata of the concrete type: declared properties and the
    /// rules attached to them.
    fn type_meta(&self) -> &'static TypeMeta;

    /// Read a property value. A failing reader is the Rust rendering of
    /// a throwing getter: the engine applies the configured policy.
    fn read(&self, property: &str) -> PropertyValue<'_>;

    /// Optional self-validation capability: custom failures contributed
    /// beyond the declared rules, merged after the per-property pass.
    /// Member names are qualified with the object's path by the engine.
    fn extra_validation(&self) -> Vec<Failure> {
        Vec::new()
    }

    /// Item count for count-limit rules on non-container objects.
    fn count(&self) -> Option<u64> {
        None
    }
}

/// Reference identity of an object in the graph, used by the cycle
/// detection set. The metadata pointer disambiguates a struct from its
/// first field and zero-sized types at the same address.
pub(crate) fn object_id(obj: &dyn Validatable) -> (usize, usize) {
    let meta = obj.type_meta() as *const TypeMeta as usize;
    let addr = (obj as *const dyn Validatable).cast::<()>() as usize;
    (meta, addr)
}

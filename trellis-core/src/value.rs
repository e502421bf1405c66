//! Runtime value model for the traversal engine.
//!
//! Property readers hand values to the engine as [`Value`] views: scalars
//! and [`Value::Opaque`] are leaves, [`Value::Object`] is deep-validated,
//! [`Value::List`] and [`Value::Map`] are the ordered/keyed containers.

use crate::validatable::Validatable;
use std::fmt;

/// Static metadata of an enumeration type: declared members and whether
/// the enum is flags-style (bitwise combinable).
#[derive(Debug)]
pub struct EnumMeta {
    /// Enum type name.
    pub name: &'static str,
    /// Flags-style enum, validated bitwise.
    pub flags: bool,
    /// Declared members as (name, numeric value) pairs.
    pub members: &'static [(&'static str, i128)],
}

impl EnumMeta {
    /// Union of all declared flag values.
    pub fn all_flags(&self) -> i128 {
        self.members.iter().fold(0, |acc, (_, v)| acc | v)
    }

    /// Whether a numeric value equals a declared member.
    pub fn is_defined(&self, value: i128) -> bool {
        self.members.iter().any(|(_, v)| *v == value)
    }
}

/// An enumeration value paired with its type metadata.
#[derive(Debug, Clone, Copy)]
pub struct EnumValue {
    pub meta: &'static EnumMeta,
    pub value: i128,
}

impl EnumValue {
    pub fn new(meta: &'static EnumMeta, value: i128) -> Self {
        Self { meta, value }
    }
}

/// Runtime view of a property value.
pub enum Value<'a> {
    /// Absent value (a `None`).
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(&'a str),
    /// Enumeration value, checked against its declared members.
    Enum(EnumValue),
    /// Nested object, deep-validated through its own metadata.
    Object(&'a dyn Validatable),
    /// Ordered container (list, array, general sequence).
    List(Vec<Value<'a>>),
    /// Keyed container as (key, value) entries in iteration order.
    Map(Vec<(Value<'a>, Value<'a>)>),
    /// Leaf of a known type that is never deep-validated.
    Opaque(&'static str),
}

impl<'a> Value<'a> {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String view, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view for integer values.
    pub fn as_i128(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(*v as i128),
            Value::Uint(v) => Some(*v as i128),
            _ => None,
        }
    }

    /// Numeric view for any numeric value.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Uint(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Item count of containers and countable objects.
    pub fn count(&self) -> Option<u64> {
        match self {
            Value::List(items) => Some(items.len() as u64),
            Value::Map(entries) => Some(entries.len() as u64),
            Value::Object(obj) => obj.count(),
            _ => None,
        }
    }

    /// Label describing the runtime type, for diagnostics and messages.
    pub fn type_label(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "integer",
            Value::Uint(_) => "unsigned integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Enum(e) => e.meta.name,
            Value::Object(obj) => obj.type_meta().name,
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::Opaque(name) => name,
        }
    }

    /// Lift an optional value, mapping `None` to [`Value::Null`].
    pub fn from_option<T: Into<Value<'a>>>(value: Option<T>) -> Value<'a> {
        match value {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

/// Scalar equality across value views. Numeric values compare across
/// widths; objects compare by reference identity; containers never
/// compare equal.
pub fn value_eq(a: &Value<'_>, b: &Value<'_>) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Float(x), Value::Float(y)) => x == y,
        (Value::Enum(x), Value::Enum(y)) => {
            x.meta.name == y.meta.name && x.value == y.value
        }
        (Value::Object(x), Value::Object(y)) => {
            std::ptr::eq(
                (*x as *const dyn Validatable).cast::<()>(),
                (*y as *const dyn Validatable).cast::<()>(),
            )
        }
        _ => match (a.as_i128(), b.as_i128()) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
    }
}

// Manual Debug: `Object` holds a trait object without a Debug bound.
impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(v) => write!(f, "Bool({})", v),
            Value::Int(v) => write!(f, "Int({})", v),
            Value::Uint(v) => write!(f, "Uint({})", v),
            Value::Float(v) => write!(f, "Float({})", v),
            Value::Str(v) => write!(f, "Str({:?})", v),
            Value::Enum(v) => write!(f, "Enum({}={})", v.meta.name, v.value),
            Value::Object(v) => write!(f, "Object({})", v.type_meta().name),
            Value::List(v) => f.debug_tuple("List").field(v).finish(),
            Value::Map(v) => f.debug_tuple("Map").field(v).finish(),
            Value::Opaque(v) => write!(f, "Opaque({})", v),
        }
    }
}

impl<'a> From<&'a str> for Value<'a> {
    fn from(value: &'a str) -> Self {
        Value::Str(value)
    }
}

impl<'a> From<&'a String> for Value<'a> {
    fn from(value: &'a String) -> Self {
        Value::Str(value)
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Value::Float(value as f64)
    }
}

impl From<EnumValue> for Value<'_> {
    fn from(value: EnumValue) -> Self {
        Value::Enum(value)
    }
}

impl<'a> From<Vec<Value<'a>>> for Value<'a> {
    fn from(items: Vec<Value<'a>>) -> Self {
        Value::List(items)
    }
}

impl<'a> From<Vec<(Value<'a>, Value<'a>)>> for Value<'a> {
    fn from(entries: Vec<(Value<'a>, Value<'a>)>) -> Self {
        Value::Map(entries)
    }
}

macro_rules! value_from_int {
    ($($t:ty => $variant:ident as $cast:ty),* $(,)?) => {
        $(impl From<$t> for Value<'_> {
            fn from(value: $t) -> Self {
                Value::$variant(value as $cast)
            }
        })*
    };
}

value_from_int!(
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
    usize => Uint as u64,
);

/// Owned scalar value used in rule configurations (allowed/denied value
/// sets, conditional triggers).
#[derive(Debug, Clone, PartialEq)]
pub enum StaticValue {
    Null,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    /// Enum member as (enum type name, numeric value).
    Enum(&'static str, i128),
}

impl StaticValue {
    /// Whether a runtime value equals this configured value.
    pub fn matches(&self, value: &Value<'_>) -> bool {
        match (self, value) {
            (StaticValue::Null, Value::Null) => true,
            (StaticValue::Bool(x), Value::Bool(y)) => x == y,
            (StaticValue::Str(x), Value::Str(y)) => x == y,
            (StaticValue::Float(x), Value::Float(y)) => x == y,
            (StaticValue::Int(x), _) => value.as_i128() == Some(*x as i128),
            (StaticValue::Uint(x), _) => value.as_i128() == Some(*x as i128),
            (StaticValue::Enum(name, x), Value::Enum(y)) => {
                *name == y.meta.name && *x == y.value
            }
            _ => false,
        }
    }
}

impl From<bool> for StaticValue {
    fn from(value: bool) -> Self {
        StaticValue::Bool(value)
    }
}

impl From<i32> for StaticValue {
    fn from(value: i32) -> Self {
        StaticValue::Int(value as i64)
    }
}

impl From<i64> for StaticValue {
    fn from(value: i64) -> Self {
        StaticValue::Int(value)
    }
}

impl From<u64> for StaticValue {
    fn from(value: u64) -> Self {
        StaticValue::Uint(value)
    }
}

impl From<f64> for StaticValue {
    fn from(value: f64) -> Self {
        StaticValue::Float(value)
    }
}

impl From<&str> for StaticValue {
    fn from(value: &str) -> Self {
        StaticValue::Str(value.to_string())
    }
}

impl From<String> for StaticValue {
    fn from(value: String) -> Self {
        StaticValue::Str(value)
    }
}

impl From<EnumValue> for StaticValue {
    fn from(value: EnumValue) -> Self {
        StaticValue::Enum(value.meta.name, value.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static COLORS: EnumMeta = EnumMeta {
        name: "Color",
        flags: false,
        members: &[("Red", 0), ("Green", 1)],
    };

    #[test]
    fn test_enum_meta() {
        assert!(COLORS.is_defined(1));
        assert!(!COLORS.is_defined(2));
        assert_eq!(COLORS.all_flags(), 1);
    }

    #[test]
    fn test_numeric_views() {
        assert_eq!(Value::from(5i32).as_i128(), Some(5));
        assert_eq!(Value::from(5u64).as_i128(), Some(5));
        assert_eq!(Value::from(2.5f64).as_f64(), Some(2.5));
        assert_eq!(Value::from("x").as_i128(), None);
    }

    #[test]
    fn test_value_eq_cross_width() {
        assert!(value_eq(&Value::Int(5), &Value::Uint(5)));
        assert!(!value_eq(&Value::Int(5), &Value::Uint(6)));
        assert!(value_eq(&Value::Str("a"), &Value::Str("a")));
        assert!(!value_eq(&Value::Null, &Value::Str("a")));
    }

    #[test]
    fn test_static_value_matches() {
        assert!(StaticValue::from(5i32).matches(&Value::Uint(5)));
        assert!(StaticValue::from("a").matches(&Value::Str("a")));
        assert!(!StaticValue::from("a").matches(&Value::Str("b")));
        let ev = EnumValue::new(&COLORS, 1);
        assert!(StaticValue::from(ev).matches(&Value::Enum(ev)));
        assert!(StaticValue::Null.matches(&Value::Null));
    }

    #[test]
    fn test_count() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(list.count(), Some(2));
        assert_eq!(Value::Str("ab").count(), None);
    }

    #[test]
    fn test_from_option() {
        assert!(Value::from_option::<i32>(None).is_null());
        assert_eq!(Value::from_option(Some(3i32)).as_i128(), Some(3));
    }
}

//! Declarative validation rules for the trellis object-graph
//! validation engine.
//!
//! Each rule implements [`trellis_core::Rule`] and can be attached to a
//! property or container via the core metadata builders. The rules are
//! grouped by concern: basic string/pattern/range checks, value sets
//! and counts, conditional checks on sibling properties, and the Luhn
//! checksum family.

mod basic;
mod conditional;
mod luhn;
mod sets;

#[cfg(test)]
mod test_util;

pub use basic::{
    Email, MaxLength, MinLength, Pattern, Phone, Range, Required, StringLength, Url,
};
pub use conditional::{Compare, RequiredIf};
pub use luhn::{CreditCard, Luhn};
pub use sets::{AllowedValues, CountLimit, DeniedValues};

pub mod checksum {
    //! Free-standing checksum helpers.
    pub use crate::luhn::{normalize, validate};
}

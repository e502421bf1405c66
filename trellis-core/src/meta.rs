//! Type and property metadata: the registry the engine queries for
//! declared rules.
//!
//! Metadata is built once per type with [`TypeMeta::builder`] and stored
//! in a `once_cell::sync::Lazy` static, which is the append-only,
//! insert-once, process-lifetime descriptor cache: the first validation
//! of a type pays the construction cost, every later lookup is a static
//! reference.

use crate::rule::{MultiRule, Rule};
use std::sync::Arc;

/// Whether an item rule applies to a container's values/items or its
/// keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationTarget {
    /// Container item (list element, dictionary value).
    Item,
    /// Dictionary key.
    Key,
}

/// A rule stored in metadata, single- or multi-result.
#[derive(Clone)]
pub enum RuleKind {
    Single(Arc<dyn Rule>),
    Multi(Arc<dyn MultiRule>),
}

impl RuleKind {
    pub fn name(&self) -> &'static str {
        match self {
            RuleKind::Single(r) => r.name(),
            RuleKind::Multi(r) => r.name(),
        }
    }
}

/// A rule targeting container elements at a specific nesting tier.
#[derive(Clone)]
pub struct ItemRule {
    pub target: ValidationTarget,
    /// Array level the rule applies to: 0 is the outermost container on
    /// the property, N is N container nestings deep.
    pub array_level: usize,
    pub rule: RuleKind,
}

/// Sentinel suppressing item validation at one array level.
#[derive(Debug, Clone, Copy)]
pub struct ItemSuppression {
    pub target: ValidationTarget,
    pub array_level: usize,
    /// Soft mode: content checks and deep recursion are suppressed, but
    /// null items are still reported.
    pub keep_null_checks: bool,
}

/// Cached descriptor of a single declared property.
pub struct PropertyMeta {
    /// Property name, as used by [`crate::Validatable::read`].
    pub name: &'static str,
    /// Whether the property is writable. Read-only properties may have
    /// failing readers tolerated, per the engine options.
    pub has_setter: bool,
    /// Explicit nullability marker; overrides the type-level signal.
    pub allow_null: Option<bool>,
    /// Type-level nullability (an `Option`-typed property).
    pub type_nullable: bool,
    /// Array levels at which container items are nullable (explicit
    /// marker or `Option`-typed items).
    pub item_nullable_levels: Vec<usize>,
    /// Never validate this property: omitted from the eligible set.
    pub never_validate: bool,
    /// Skip rules and the null check, but still deep-validate the value.
    pub skip_checks: bool,
    /// Declared single-result rules.
    pub rules: Vec<Arc<dyn Rule>>,
    /// Declared multi-result rules.
    pub multi_rules: Vec<Arc<dyn MultiRule>>,
    /// Declared item/key rules.
    pub item_rules: Vec<ItemRule>,
    /// Declared no-item-validation sentinels.
    pub item_suppressions: Vec<ItemSuppression>,
}

impl PropertyMeta {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            has_setter: true,
            allow_null: None,
            type_nullable: false,
            item_nullable_levels: Vec::new(),
            never_validate: false,
            skip_checks: false,
            rules: Vec::new(),
            multi_rules: Vec::new(),
            item_rules: Vec::new(),
            item_suppressions: Vec::new(),
        }
    }

    /// Attach a single-result rule.
    pub fn rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Attach a multi-result rule.
    pub fn multi_rule(mut self, rule: impl MultiRule + 'static) -> Self {
        self.multi_rules.push(Arc::new(rule));
        self
    }

    /// Attach an item rule for the outermost container.
    pub fn item_rule(self, rule: impl Rule + 'static) -> Self {
        self.item_rule_at(0, rule)
    }

    /// Attach an item rule at a specific array level.
    pub fn item_rule_at(mut self, array_level: usize, rule: impl Rule + 'static) -> Self {
        self.item_rules.push(ItemRule {
            target: ValidationTarget::Item,
            array_level,
            rule: RuleKind::Single(Arc::new(rule)),
        });
        self
    }

    /// Attach a multi-result item rule at a specific array level.
    pub fn item_multi_rule_at(
        mut self,
        array_level: usize,
        rule: impl MultiRule + 'static,
    ) -> Self {
        self.item_rules.push(ItemRule {
            target: ValidationTarget::Item,
            array_level,
            rule: RuleKind::Multi(Arc::new(rule)),
        });
        self
    }

    /// Attach a key rule for the outermost container.
    pub fn key_rule(self, rule: impl Rule + 'static) -> Self {
        self.key_rule_at(0, rule)
    }

    /// Attach a key rule at a specific array level.
    pub fn key_rule_at(mut self, array_level: usize, rule: impl Rule + 'static) -> Self {
        self.item_rules.push(ItemRule {
            target: ValidationTarget::Key,
            array_level,
            rule: RuleKind::Single(Arc::new(rule)),
        });
        self
    }

    /// Mark the property type as nullable (`Option`-typed).
    pub fn nullable(mut self) -> Self {
        self.type_nullable = true;
        self
    }

    /// Explicitly allow a null value, overriding the type-level signal.
    pub fn allow_null(mut self) -> Self {
        self.allow_null = Some(true);
        self
    }

    /// Explicitly disallow a null value, overriding the type-level
    /// signal.
    pub fn disallow_null(mut self) -> Self {
        self.allow_null = Some(false);
        self
    }

    /// Mark container items as nullable at an array level.
    pub fn item_nullable(mut self, array_level: usize) -> Self {
        self.item_nullable_levels.push(array_level);
        self
    }

    /// Mark the property as read-only (no setter).
    pub fn read_only(mut self) -> Self {
        self.has_setter = false;
        self
    }

    /// Never validate this property.
    pub fn never_validate(mut self) -> Self {
        self.never_validate = true;
        self
    }

    /// Skip rules and the null check for this property, but still
    /// deep-validate its value.
    pub fn skip_checks(mut self) -> Self {
        self.skip_checks = true;
        self
    }

    /// Suppress all item validation (including null checks) for items at
    /// an array level.
    pub fn no_item_validation(mut self, array_level: usize) -> Self {
        self.item_suppressions.push(ItemSuppression {
            target: ValidationTarget::Item,
            array_level,
            keep_null_checks: false,
        });
        self
    }

    /// Suppress item content checks at an array level; null items are
    /// still reported.
    pub fn no_item_validation_keep_nulls(mut self, array_level: usize) -> Self {
        self.item_suppressions.push(ItemSuppression {
            target: ValidationTarget::Item,
            array_level,
            keep_null_checks: true,
        });
        self
    }

    /// Suppress key validation at an array level.
    pub fn no_key_validation(mut self, array_level: usize) -> Self {
        self.item_suppressions.push(ItemSuppression {
            target: ValidationTarget::Key,
            array_level,
            keep_null_checks: false,
        });
        self
    }

    /// Item rules declared for a target at an array level.
    pub fn item_rules_at(&self, target: ValidationTarget, array_level: usize) -> Vec<&ItemRule> {
        self.item_rules
            .iter()
            .filter(|r| r.target == target && r.array_level == array_level)
            .collect()
    }

    /// Active suppression sentinel for a target at an array level.
    pub fn suppression_at(
        &self,
        target: ValidationTarget,
        array_level: usize,
    ) -> Option<&ItemSuppression> {
        self.item_suppressions
            .iter()
            .find(|s| s.target == target && s.array_level == array_level)
    }

    /// Whether items at an array level are nullable.
    pub fn items_nullable_at(&self, array_level: usize) -> bool {
        self.item_nullable_levels.contains(&array_level)
    }
}

/// Cached metadata of a validatable type.
pub struct TypeMeta {
    /// Type name, used in diagnostics, summaries and the type
    /// allow-/deny-lists.
    pub name: &'static str,
    /// The type is never validated (structural exclusion).
    pub no_validation: bool,
    /// Array level at which item validation is suppressed for every
    /// container property of this type.
    pub item_no_validation: Option<usize>,
    /// Declared properties.
    pub properties: Vec<PropertyMeta>,
}

impl TypeMeta {
    pub fn builder(name: &'static str) -> TypeMetaBuilder {
        TypeMetaBuilder {
            meta: TypeMeta {
                name,
                no_validation: false,
                item_no_validation: None,
                properties: Vec::new(),
            },
        }
    }

    /// Metadata for an opaque type without declared properties.
    pub fn opaque(name: &'static str) -> TypeMeta {
        TypeMeta {
            name,
            no_validation: true,
            item_no_validation: None,
            properties: Vec::new(),
        }
    }

    /// Look up a declared property.
    pub fn property(&self, name: &str) -> Option<&PropertyMeta> {
        self.properties.iter().find(|p| p.name == name)
    }

    /// Properties eligible for validation: never-validate markers are a
    /// hard exclusion applied here.
    pub fn eligible_properties(&self) -> impl Iterator<Item = &PropertyMeta> {
        self.properties.iter().filter(|p| !p.never_validate)
    }
}

/// Builder for [`TypeMeta`].
pub struct TypeMetaBuilder {
    meta: TypeMeta,
}

impl TypeMetaBuilder {
    /// Declare a property.
    pub fn property(mut self, property: PropertyMeta) -> Self {
        self.meta.properties.push(property);
        self
    }

    /// Mark the whole type as never validated.
    pub fn no_validation(mut self) -> Self {
        self.meta.no_validation = true;
        self
    }

    /// Suppress item validation at an array level for every container
    /// property of this type.
    pub fn no_item_validation(mut self, array_level: usize) -> Self {
        self.meta.item_no_validation = Some(array_level);
        self
    }

    pub fn build(self) -> TypeMeta {
        self.meta
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rule::RuleContext;
    use crate::value::Value;
    use crate::Failure;

    struct AlwaysFails;

    impl Rule for AlwaysFails {
        fn name(&self) -> &'static str {
            "alwaysFails"
        }

        fn check(&self, _value: &Value<'_>, ctx: &RuleContext<'_>) -> Option<Failure> {
            Some(ctx.fail("no"))
        }
    }

    #[test]
    fn test_builder() {
        let meta = TypeMeta::builder("Thing")
            .property(PropertyMeta::new("A").rule(AlwaysFails))
            .property(PropertyMeta::new("B").never_validate())
            .build();
        assert_eq!(meta.name, "Thing");
        assert_eq!(meta.properties.len(), 2);
        assert_eq!(meta.eligible_properties().count(), 1);
        assert!(meta.property("B").is_some());
        assert!(meta.property("C").is_none());
    }

    #[test]
    fn test_item_rule_scoping() {
        let prop = PropertyMeta::new("Items")
            .item_rule(AlwaysFails)
            .item_rule_at(1, AlwaysFails)
            .key_rule(AlwaysFails);
        assert_eq!(prop.item_rules_at(ValidationTarget::Item, 0).len(), 1);
        assert_eq!(prop.item_rules_at(ValidationTarget::Item, 1).len(), 1);
        assert_eq!(prop.item_rules_at(ValidationTarget::Key, 0).len(), 1);
        assert_eq!(prop.item_rules_at(ValidationTarget::Key, 1).len(), 0);
    }

    #[test]
    fn test_suppression_lookup() {
        let prop = PropertyMeta::new("Items").no_item_validation_keep_nulls(0);
        let s = prop.suppression_at(ValidationTarget::Item, 0).unwrap();
        assert!(s.keep_null_checks);
        assert!(prop.suppression_at(ValidationTarget::Item, 1).is_none());
    }

    #[test]
    fn test_nullability_markers() {
        let prop = PropertyMeta::new("X").nullable().item_nullable(1);
        assert!(prop.type_nullable);
        assert!(prop.items_nullable_at(1));
        assert!(!prop.items_nullable_at(0));
    }
}

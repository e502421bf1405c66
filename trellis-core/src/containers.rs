// Container validators: keyed and ordered traversal with item rules

use crate::classify;
use crate::engine::{check_enum, validate_object, Sink};
use crate::error::ValidationError;
use crate::failure::Failure;
use crate::meta::{ItemRule, PropertyMeta, RuleKind, ValidationTarget};
use crate::options::ValidationOptions;
use crate::rule::RuleContext;
use crate::state::Traversal;
use crate::validatable::Validatable;
use crate::value::Value;

/// Apply item rules to a single value, collecting all failures.
pub(crate) fn apply_item_rules(
    value: &Value<'_>,
    rules: &[&ItemRule],
    ctx: &RuleContext<'_>,
    sink: &mut Sink<'_>,
) -> bool {
    let mut res = true;
    for item_rule in rules {
        match &item_rule.rule {
            RuleKind::Single(rule) => {
                if let Some(failure) = rule.check(value, ctx) {
                    res = false;
                    sink.push(failure);
                }
            }
            RuleKind::Multi(rule) => {
                let failures = rule.check_all(value, ctx);
                if !failures.is_empty() {
                    res = false;
                    for failure in failures {
                        sink.push(failure);
                    }
                }
            }
        }
    }
    res
}

/// Validate an ordered container: 1-based item counters, paths
/// `member[N]`.
pub(crate) fn validate_seq(
    tr: &mut Traversal<'_>,
    owner: &dyn Validatable,
    prop: &PropertyMeta,
    items: &[Value<'_>],
    sink: &mut Sink<'_>,
    member: &str,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let only_null = match prop.suppression_at(ValidationTarget::Item, tr.array_level) {
        Some(s) if !s.keep_null_checks => {
            tracing::debug!(property = prop.name, member, "item validation suppressed");
            return Ok(true);
        }
        Some(_) => true,
        None => false,
    };
    let item_nullable = classify::is_item_nullable(prop, tr.array_level);
    if only_null && item_nullable {
        // nulls are allowed and nothing else would be checked
        return Ok(true);
    }
    let rules = if only_null {
        Vec::new()
    } else {
        prop.item_rules_at(ValidationTarget::Item, tr.array_level)
    };
    let mut res = true;
    for (index, item) in items.iter().enumerate() {
        if sink.full() {
            break;
        }
        let item_member = format!("{}[{}]", member, index + 1);
        if item.is_null() {
            if !item_nullable {
                res = false;
                sink.push(Failure::for_member(
                    item_member.as_str(),
                    format_args!("value is required (items of {} are not nullable)", prop.name),
                ));
            } else if !rules.is_empty() {
                let ctx = RuleContext {
                    member: Some(&item_member),
                    property: prop.name,
                    object: owner,
                };
                res &= apply_item_rules(item, &rules, &ctx, sink);
            }
            continue;
        }
        if only_null {
            continue;
        }
        res &= validate_item(tr, owner, prop, &item_member, item, &rules, sink, throw, opts)?;
    }
    Ok(res)
}

/// Validate a keyed container: keys and values each get their own pass,
/// paths `member[key#N]` / `member[value#N]`.
pub(crate) fn validate_map(
    tr: &mut Traversal<'_>,
    owner: &dyn Validatable,
    prop: &PropertyMeta,
    entries: &[(Value<'_>, Value<'_>)],
    sink: &mut Sink<'_>,
    member: &str,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let only_null = match prop.suppression_at(ValidationTarget::Item, tr.array_level) {
        Some(s) if !s.keep_null_checks => {
            tracing::debug!(property = prop.name, member, "item validation suppressed");
            return Ok(true);
        }
        Some(_) => true,
        None => false,
    };
    let value_nullable = classify::is_item_nullable(prop, tr.array_level);
    if only_null && value_nullable {
        return Ok(true);
    }
    let key_suppressed = prop
        .suppression_at(ValidationTarget::Key, tr.array_level)
        .is_some();
    let key_rules = if only_null || key_suppressed {
        Vec::new()
    } else {
        prop.item_rules_at(ValidationTarget::Key, tr.array_level)
    };
    let value_rules = if only_null {
        Vec::new()
    } else {
        prop.item_rules_at(ValidationTarget::Item, tr.array_level)
    };
    let mut res = true;
    for (index, (key, value)) in entries.iter().enumerate() {
        if sink.full() {
            break;
        }
        let n = index + 1;
        if !only_null && !key_suppressed {
            let key_member = format!("{}[key#{}]", member, n);
            res &= validate_item(tr, owner, prop, &key_member, key, &key_rules, sink, throw, opts)?;
        }
        let value_member = format!("{}[value#{}]", member, n);
        if value.is_null() {
            if !value_nullable {
                res = false;
                sink.push(Failure::for_member(
                    value_member.as_str(),
                    format_args!("value is required (values of {} are not nullable)", prop.name),
                ));
            } else if !value_rules.is_empty() {
                let ctx = RuleContext {
                    member: Some(&value_member),
                    property: prop.name,
                    object: owner,
                };
                res &= apply_item_rules(value, &value_rules, &ctx, sink);
            }
            continue;
        }
        if only_null {
            continue;
        }
        res &= validate_item(
            tr,
            owner,
            prop,
            &value_member,
            value,
            &value_rules,
            sink,
            throw,
            opts,
        )?;
    }
    Ok(res)
}

/// Validate a single container element: apply the declared item rules,
/// then recurse one array level deeper for nested containers or into the
/// object engine for object items. Suppression at the nested level is
/// handled by the nested pass itself.
pub(crate) fn validate_item(
    tr: &mut Traversal<'_>,
    owner: &dyn Validatable,
    prop: &PropertyMeta,
    member: &str,
    value: &Value<'_>,
    rules: &[&ItemRule],
    sink: &mut Sink<'_>,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let mut res = true;
    {
        let ctx = RuleContext {
            member: Some(member),
            property: prop.name,
            object: owner,
        };
        res &= apply_item_rules(value, rules, &ctx, sink);
    }
    if value.is_null() {
        return Ok(res);
    }
    match value {
        Value::List(items) => {
            let mut nested = tr.fork();
            nested.array_level += 1;
            nested.depth += 1;
            if opts.max_depth != 0 && nested.depth > opts.max_depth {
                return Err(ValidationError::MaxDepthExceeded {
                    depth: nested.depth,
                    max: opts.max_depth,
                });
            }
            res &= validate_seq(&mut nested, owner, prop, items, sink, member, throw, opts)?;
        }
        Value::Map(entries) => {
            let mut nested = tr.fork();
            nested.array_level += 1;
            nested.depth += 1;
            if opts.max_depth != 0 && nested.depth > opts.max_depth {
                return Err(ValidationError::MaxDepthExceeded {
                    depth: nested.depth,
                    max: opts.max_depth,
                });
            }
            res &= validate_map(&mut nested, owner, prop, entries, sink, member, throw, opts)?;
        }
        Value::Object(obj) => {
            if classify::is_type_validatable(obj.type_meta(), opts) {
                res &= validate_object(&mut tr.fork(), *obj, sink, Some(member), None, throw, opts)?;
            } else {
                tracing::debug!(
                    member,
                    value_type = obj.type_meta().name,
                    "item type is not validatable"
                );
            }
        }
        Value::Enum(ev) => {
            res &= check_enum(ev, Some(member), sink);
        }
        _ => {}
    }
    Ok(res)
}

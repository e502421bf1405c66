//! Object traversal engine.
//!
//! Drives the recursive walk over an object graph: cycle detection,
//! depth accounting, per-property rule application, deep-recursion
//! dispatch into the container validators, enum legality checks, and
//! failure accumulation under the global error cap.

use crate::classify;
use crate::containers::{apply_item_rules, validate_map, validate_seq};
use crate::error::ValidationError;
use crate::failure::Failure;
use crate::meta::{TypeMeta, ValidationTarget};
use crate::options::{HookOutcome, ValidationEvent, ValidationOptions};
use crate::rule::RuleContext;
use crate::state::Traversal;
use crate::validatable::{object_id, Validatable};
use crate::value::{EnumValue, Value};
use std::collections::HashSet;

/// Shared failure sink of one validation call tree. Enforces the global
/// error cap: once the cap is reached no further failures are recorded.
pub(crate) struct Sink<'a> {
    out: &'a mut Vec<Failure>,
    max: usize,
}

impl<'a> Sink<'a> {
    pub fn new(out: &'a mut Vec<Failure>, max: usize) -> Self {
        Self { out, max }
    }

    pub fn push(&mut self, failure: Failure) {
        if self.max == 0 || self.out.len() < self.max {
            self.out.push(failure);
        }
    }

    pub fn len(&self) -> usize {
        self.out.len()
    }

    pub fn full(&self) -> bool {
        self.max != 0 && self.out.len() >= self.max
    }

    pub fn since(&self, start: usize) -> &[Failure] {
        &self.out[start..]
    }
}

/// Validate an object graph, accumulating failures into `results`.
///
/// Returns `Ok(true)` when the graph is valid. The error case is
/// reserved for the fatal depth bound; ordinary rule failures land in
/// `results` with an `Ok(false)`.
pub fn try_validate(
    obj: &dyn Validatable,
    results: &mut Vec<Failure>,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    try_validate_with(obj, results, None, None, false, opts)
}

/// Validate an object graph with full control: an optional path prefix
/// for the root object, an optional allow-list of member names to check,
/// and the throw policy.
pub fn try_validate_with(
    obj: &dyn Validatable,
    results: &mut Vec<Failure>,
    member: Option<&str>,
    members: Option<&[&str]>,
    throw_on_error: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let mut seen = HashSet::new();
    let mut tr = Traversal::new(&mut seen);
    let mut sink = Sink::new(results, opts.max_errors);
    validate_object(&mut tr, obj, &mut sink, member, members, throw_on_error, opts)
}

/// Validate an optional object: `None` is vacuously valid.
pub fn try_validate_nullable(
    obj: Option<&dyn Validatable>,
    results: &mut Vec<Failure>,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    match obj {
        Some(obj) => try_validate(obj, results, opts),
        None => Ok(true),
    }
}

/// Validate an object and return it unchanged, raising
/// [`ValidationError::Invalid`] on any failure.
pub fn validate<'a, T: Validatable>(
    obj: &'a T,
    opts: &ValidationOptions,
) -> Result<&'a T, ValidationError> {
    let mut results = Vec::new();
    try_validate_with(obj, &mut results, None, None, true, opts)?;
    Ok(obj)
}

/// Method-call forms of the entry points, available on every
/// [`Validatable`] type.
pub trait ValidateExt: Validatable {
    /// Validate, accumulating failures into `results`.
    fn try_validate(
        &self,
        results: &mut Vec<Failure>,
        opts: &ValidationOptions,
    ) -> Result<bool, ValidationError>
    where
        Self: Sized,
    {
        crate::engine::try_validate(self, results, opts)
    }

    /// Validate and return `self`, raising on any failure.
    fn validate(&self, opts: &ValidationOptions) -> Result<&Self, ValidationError>
    where
        Self: Sized,
    {
        crate::engine::validate(self, opts)
    }

    /// Validate into a report.
    fn validation_report(
        &self,
        opts: &ValidationOptions,
    ) -> Result<crate::failure::ValidationReport, ValidationError>
    where
        Self: Sized,
    {
        let mut failures = Vec::new();
        let ok = crate::engine::try_validate(self, &mut failures, opts)?;
        Ok(crate::failure::ValidationReport::from_failures(ok, failures))
    }
}

impl<T: Validatable> ValidateExt for T {}

/// Validate one object frame. Resets the array level, accounts depth,
/// consults the classifier and the seen set, then runs the frame body.
pub(crate) fn validate_object(
    tr: &mut Traversal<'_>,
    obj: &dyn Validatable,
    sink: &mut Sink<'_>,
    member: Option<&str>,
    members: Option<&[&str]>,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let mut frame = tr.fork();
    // entering a fresh object resets the container nesting context
    frame.array_level = 0;
    frame.depth += 1;
    if opts.max_depth != 0 && frame.depth > opts.max_depth {
        return Err(ValidationError::MaxDepthExceeded {
            depth: frame.depth,
            max: opts.max_depth,
        });
    }
    let meta = obj.type_meta();
    if !classify::is_type_validatable(meta, opts) {
        tracing::debug!(type_name = meta.name, "type skipped for validation");
        return Ok(true);
    }
    let id = object_id(obj);
    if !frame.seen.insert(id) {
        // already being validated higher in the stack
        return Ok(true);
    }
    let out = validate_frame(&mut frame, obj, meta, sink, member, members, throw, opts);
    frame.seen.remove(&id);
    out
}

fn validate_frame(
    tr: &mut Traversal<'_>,
    obj: &dyn Validatable,
    meta: &'static TypeMeta,
    sink: &mut Sink<'_>,
    member: Option<&str>,
    members: Option<&[&str]>,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let start = sink.len();
    let mut res = true;
    let mut cancelled = false;
    if let Some(hook) = &opts.hooks.on_validation {
        let event = ValidationEvent {
            type_name: meta.name,
            member,
            property: None,
            depth: tr.depth,
            array_level: tr.array_level,
            failed: false,
            failure_count: sink.len(),
        };
        match hook(&event) {
            HookOutcome::Cancel => {
                tracing::debug!(type_name = meta.name, "hook cancelled object validation");
                cancelled = true;
            }
            HookOutcome::Fail => res = false,
            HookOutcome::Continue => {}
        }
    }
    if !cancelled {
        res &= validate_properties(tr, obj, meta, sink, member, members, throw, opts)?;
        // self-validation capability, merged after the declared pass
        let extra = obj.extra_validation();
        if !extra.is_empty() {
            res = false;
            for failure in extra {
                sink.push(qualify_failure(failure, member));
            }
        }
    }
    finalize(tr, meta, sink, start, res, member, throw, opts)
}

#[allow(clippy::too_many_arguments)]
fn finalize(
    tr: &mut Traversal<'_>,
    meta: &'static TypeMeta,
    sink: &mut Sink<'_>,
    start: usize,
    res: bool,
    member: Option<&str>,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    if res && sink.len() == start {
        return Ok(true);
    }
    if let Some(hook) = &opts.hooks.on_validation_failed {
        let event = ValidationEvent {
            type_name: meta.name,
            member,
            property: None,
            depth: tr.depth,
            array_level: tr.array_level,
            failed: true,
            failure_count: sink.len(),
        };
        hook(&event);
    }
    let count = sink.len() - start;
    let summary = match member {
        Some(member) => format!(
            "Object validation of {} (depth {}, array level {}, member {}) failed with {} error(s)",
            meta.name, tr.depth, tr.array_level, member, count
        ),
        None => format!(
            "Object validation of {} (depth {}, array level {}) failed with {} error(s)",
            meta.name, tr.depth, tr.array_level, count
        ),
    };
    if throw {
        return Err(ValidationError::Invalid {
            failures: sink.since(start).to_vec(),
            summary,
        });
    }
    tracing::debug!("{}", summary);
    Ok(false)
}

#[allow(clippy::too_many_arguments)]
fn validate_properties(
    tr: &mut Traversal<'_>,
    obj: &dyn Validatable,
    meta: &'static TypeMeta,
    sink: &mut Sink<'_>,
    member: Option<&str>,
    members: Option<&[&str]>,
    throw: bool,
    opts: &ValidationOptions,
) -> Result<bool, ValidationError> {
    let mut res = true;
    let mut loop_cancelled = false;
    let type_no_items = meta.item_no_validation == Some(tr.array_level);
    for prop in meta.eligible_properties() {
        if loop_cancelled {
            tracing::debug!(
                type_name = meta.name,
                property = prop.name,
                "property validation loop cancelled"
            );
            break;
        }
        if let Some(names) = members {
            if !names.contains(&prop.name) {
                continue;
            }
        }
        if let Some(hook) = &opts.hooks.on_property {
            let event = ValidationEvent {
                type_name: meta.name,
                member,
                property: Some(prop.name),
                depth: tr.depth,
                array_level: tr.array_level,
                failed: !res,
                failure_count: sink.len(),
            };
            match hook(&event) {
                HookOutcome::Cancel => {
                    tracing::debug!(property = prop.name, "hook cancelled property validation");
                    continue;
                }
                HookOutcome::Fail => res = false,
                HookOutcome::Continue => {}
            }
        }
        let path = match member {
            Some(member) => format!("{}.{}", member, prop.name),
            None => prop.name.to_string(),
        };
        let value = match obj.read(prop.name) {
            Ok(value) => value,
            Err(err) => {
                if opts.ignore_getter_errors && !prop.has_setter {
                    tracing::warn!(
                        type_name = meta.name,
                        property = prop.name,
                        error = %err,
                        "skipped property value validation"
                    );
                    continue;
                }
                res = false;
                sink.push(Failure::exception(path.as_str(), &err));
                loop_cancelled = fire_property_failed(tr, meta, sink, member, prop.name, opts);
                continue;
            }
        };
        let before = sink.len();
        let mut prop_res = true;
        let ctx = RuleContext {
            member: Some(path.as_str()),
            property: prop.name,
            object: obj,
        };
        if !prop.skip_checks {
            for rule in &prop.rules {
                if let Some(failure) = rule.check(&value, &ctx) {
                    prop_res = false;
                    sink.push(failure);
                }
            }
            for rule in &prop.multi_rules {
                let failures = rule.check_all(&value, &ctx);
                if !failures.is_empty() {
                    prop_res = false;
                    for failure in failures {
                        sink.push(failure);
                    }
                }
            }
        }
        if value.is_null() {
            if !prop.skip_checks {
                if !classify::is_property_nullable(prop) {
                    prop_res = false;
                    sink.push(Failure::for_member(
                        path.as_str(),
                        format_args!("value is required (property {} is not nullable)", prop.name),
                    ));
                } else {
                    // item rules declared for the outermost level still
                    // see the allowed null
                    let rules = prop.item_rules_at(ValidationTarget::Item, tr.array_level);
                    if !rules.is_empty()
                        && prop
                            .suppression_at(ValidationTarget::Item, tr.array_level)
                            .is_none()
                    {
                        prop_res &= apply_item_rules(&Value::Null, &rules, &ctx, sink);
                    }
                }
            }
        } else {
            match &value {
                Value::Map(entries) if !type_no_items => {
                    prop_res &=
                        validate_map(&mut tr.fork(), obj, prop, entries, sink, &path, throw, opts)?;
                }
                Value::List(items) if !type_no_items => {
                    prop_res &=
                        validate_seq(&mut tr.fork(), obj, prop, items, sink, &path, throw, opts)?;
                }
                Value::Map(_) | Value::List(_) => {
                    tracing::debug!(
                        type_name = meta.name,
                        property = prop.name,
                        "item validation suppressed for type"
                    );
                }
                Value::Object(nested) => {
                    if classify::is_type_validatable(nested.type_meta(), opts) {
                        prop_res &= validate_object(
                            &mut tr.fork(),
                            *nested,
                            sink,
                            Some(&path),
                            None,
                            throw,
                            opts,
                        )?;
                    } else {
                        tracing::debug!(
                            property = prop.name,
                            value_type = nested.type_meta().name,
                            "property value type is not validatable"
                        );
                    }
                }
                Value::Enum(ev) => {
                    prop_res &= check_enum(ev, Some(&path), sink);
                }
                _ => {}
            }
        }
        if !prop_res || sink.len() > before {
            prop_res = false;
            loop_cancelled |= fire_property_failed(tr, meta, sink, member, prop.name, opts);
        }
        res &= prop_res;
        if sink.full() {
            loop_cancelled = true;
        }
    }
    Ok(res)
}

/// Fire the failed-property hook; returns whether the loop should stop.
fn fire_property_failed(
    tr: &mut Traversal<'_>,
    meta: &'static TypeMeta,
    sink: &mut Sink<'_>,
    member: Option<&str>,
    property: &'static str,
    opts: &ValidationOptions,
) -> bool {
    let Some(hook) = &opts.hooks.on_property_failed else {
        return false;
    };
    let event = ValidationEvent {
        type_name: meta.name,
        member,
        property: Some(property),
        depth: tr.depth,
        array_level: tr.array_level,
        failed: true,
        failure_count: sink.len(),
    };
    matches!(hook(&event), HookOutcome::Cancel)
}

/// Check an enumeration value against its declared members.
pub(crate) fn check_enum(ev: &EnumValue, member: Option<&str>, sink: &mut Sink<'_>) -> bool {
    let message = if ev.meta.flags {
        let undefined = ev.value & !ev.meta.all_flags();
        if undefined == 0 {
            return true;
        }
        format!(
            "undefined enumeration flags value {} (undefined flag(s) {})",
            ev.value, undefined
        )
    } else {
        if ev.meta.is_defined(ev.value) {
            return true;
        }
        format!("undefined enumeration value {}", ev.value)
    };
    sink.push(match member {
        Some(member) => Failure::for_member(member, message),
        None => Failure::new(message),
    });
    false
}

/// Qualify a failure contributed by the self-validation capability with
/// the object's path prefix. Explicit member names are kept and
/// prefixed; failures without members are tagged with the prefix.
fn qualify_failure(mut failure: Failure, member: Option<&str>) -> Failure {
    let Some(member) = member else {
        return failure;
    };
    if failure.members.is_empty() {
        failure.members.push(member.to_string());
    } else {
        for m in &mut failure.members {
            *m = format!("{}.{}", member, m);
        }
    }
    failure
}

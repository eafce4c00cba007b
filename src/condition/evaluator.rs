//! The pure condition evaluator.
//!
//! Every failure mode here - an unresolved field, a malformed `between`
//! operand, a non-numeric comparison - degrades to "condition does not
//! match". Evaluation never raises; data shape irregularities are business
//! negatives, not errors.

use super::{Condition, ConditionGroup, LogicalOperator, Operator};
use crate::payload::{number_of, resolve, text_of};
use itertools::Itertools;
use serde_json::Value;

/// Evaluates a full group against a payload.
pub fn evaluate_group(group: &ConditionGroup, payload: &Value) -> bool {
    evaluate_all(&group.conditions, group.logical_operator, payload)
}

/// Evaluates a list of conditions under a combinator.
///
/// An empty list is `true` for both combinators: the UI treats "no
/// conditions" as "always pass" regardless of AND/OR.
pub fn evaluate_all(conditions: &[Condition], combinator: LogicalOperator, payload: &Value) -> bool {
    if conditions.is_empty() {
        return true;
    }
    match combinator {
        LogicalOperator::And => conditions.iter().all(|c| evaluate_condition(c, payload)),
        LogicalOperator::Or => conditions.iter().any(|c| evaluate_condition(c, payload)),
    }
}

/// Evaluates a single condition, applying `negate` after the operator.
pub fn evaluate_condition(condition: &Condition, payload: &Value) -> bool {
    let resolved = resolve(payload, &condition.field);
    let matched = apply_operator(condition.operator, resolved, condition.value.as_deref());
    if condition.negate.unwrap_or(false) {
        !matched
    } else {
        matched
    }
}

fn apply_operator(operator: Operator, resolved: Option<&Value>, operand: Option<&str>) -> bool {
    // Emptiness is the only thing a missing field can ever match.
    match operator {
        Operator::IsEmpty => return is_empty(resolved),
        Operator::IsNotEmpty => return !is_empty(resolved),
        _ => {}
    }
    let (Some(actual), Some(expected)) = (resolved, operand) else {
        return false;
    };

    match operator {
        Operator::Equals => loose_eq(actual, expected),
        Operator::NotEquals => has_scalar_form(actual) && !loose_eq(actual, expected),
        Operator::Gt => numeric_cmp(actual, expected, |a, b| a > b),
        Operator::Gte => numeric_cmp(actual, expected, |a, b| a >= b),
        Operator::Lt => numeric_cmp(actual, expected, |a, b| a < b),
        Operator::Lte => numeric_cmp(actual, expected, |a, b| a <= b),
        Operator::Contains => string_cmp(actual, expected, |a, b| a.contains(b)),
        Operator::NotContains => string_cmp(actual, expected, |a, b| !a.contains(b)),
        Operator::StartsWith => string_cmp(actual, expected, |a, b| a.starts_with(b)),
        Operator::EndsWith => string_cmp(actual, expected, |a, b| a.ends_with(b)),
        Operator::In => in_list(actual, expected),
        Operator::NotIn => has_scalar_form(actual) && !in_list(actual, expected),
        Operator::Between => between(actual, expected),
        Operator::IsEmpty | Operator::IsNotEmpty => unreachable!("handled above"),
    }
}

/// Empty = missing, `null`, `""`, or a zero-length array.
fn is_empty(resolved: Option<&Value>) -> bool {
    match resolved {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Loose equality: numeric when both sides parse as numbers, otherwise a
/// case-sensitive string comparison of the scalar forms.
fn loose_eq(actual: &Value, expected: &str) -> bool {
    if let (Some(a), Some(b)) = (number_of(actual), expected.trim().parse::<f64>().ok()) {
        return a == b;
    }
    text_of(actual).is_some_and(|a| a == expected)
}

/// Values without a scalar form (null, arrays, objects) match nothing, not
/// even the negative operators.
fn has_scalar_form(value: &Value) -> bool {
    text_of(value).is_some()
}

fn numeric_cmp(actual: &Value, expected: &str, cmp: impl Fn(f64, f64) -> bool) -> bool {
    match (number_of(actual), expected.trim().parse::<f64>().ok()) {
        (Some(a), Some(b)) => cmp(a, b),
        _ => false,
    }
}

fn string_cmp(actual: &Value, expected: &str, cmp: impl Fn(&str, &str) -> bool) -> bool {
    text_of(actual).is_some_and(|a| cmp(&a, expected))
}

/// `value` is a comma-separated candidate list; each candidate is compared
/// with the same loose equality as `equals`.
fn in_list(actual: &Value, expected: &str) -> bool {
    expected
        .split(',')
        .map(str::trim)
        .any(|candidate| loose_eq(actual, candidate))
}

/// `value` is `"min,max"`; inclusive numeric range test.
fn between(actual: &Value, expected: &str) -> bool {
    let Some(n) = number_of(actual) else {
        return false;
    };
    let Some((min, max)) = expected
        .split(',')
        .map(|part| part.trim().parse::<f64>().ok())
        .collect_tuple()
    else {
        return false;
    };
    match (min, max) {
        (Some(min), Some(max)) => min <= n && n <= max,
        _ => false,
    }
}

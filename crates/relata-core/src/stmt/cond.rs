use super::{Repr, Value};
use crate::{Error, Result};

use serde_json::Map;
use std::cmp::Ordering;

/// A condition on a single property of a `where` clause.
///
/// `{"age": 18}` is [`Cond::Eq`]; `{"age": {"gte": 18}}` uses the operator
/// form.
#[derive(Debug, Clone, PartialEq)]
pub enum Cond {
    Eq(Value),
    Neq(Value),
    Gt(Value),
    Gte(Value),
    Lt(Value),
    Lte(Value),
    Inq(Vec<Value>),
    Nin(Vec<Value>),
    Between(Value, Value),
    Exists(bool),
    Like(String),
    Ilike(String),
}

const OPERATORS: &[&str] = &[
    "eq", "neq", "gt", "gte", "lt", "lte", "inq", "nin", "between", "exists", "like", "ilike",
];

impl Cond {
    /// Parses the JSON value given for `property` in a `where` clause.
    ///
    /// An operator object with several operators yields one condition per
    /// operator, all of which must hold.
    pub fn from_json(property: &str, value: &Value) -> Result<Vec<Cond>> {
        let Value::Object(operators) = value else {
            return Ok(vec![Cond::Eq(value.clone())]);
        };

        if operators.is_empty() || !operators.keys().all(|key| OPERATORS.contains(&key.as_str()))
        {
            return Err(Error::invalid_argument(format!(
                "The property {property:?} of the \"where\" clause should be compared with a value or an operator Object, but {} was given.",
                Repr(value)
            )));
        }

        operators
            .iter()
            .map(|(operator, operand)| parse_operator(property, operator, operand))
            .collect()
    }

    pub fn to_json(&self) -> Value {
        let (operator, operand) = match self {
            Cond::Eq(value) => return value.clone(),
            Cond::Neq(value) => ("neq", value.clone()),
            Cond::Gt(value) => ("gt", value.clone()),
            Cond::Gte(value) => ("gte", value.clone()),
            Cond::Lt(value) => ("lt", value.clone()),
            Cond::Lte(value) => ("lte", value.clone()),
            Cond::Inq(values) => ("inq", Value::Array(values.clone())),
            Cond::Nin(values) => ("nin", Value::Array(values.clone())),
            Cond::Between(low, high) => ("between", Value::Array(vec![low.clone(), high.clone()])),
            Cond::Exists(exists) => ("exists", Value::Bool(*exists)),
            Cond::Like(pattern) => ("like", Value::String(pattern.clone())),
            Cond::Ilike(pattern) => ("ilike", Value::String(pattern.clone())),
        };

        let mut object = Map::new();
        object.insert(operator.to_string(), operand);
        Value::Object(object)
    }

    /// Evaluates the condition against a property value. `None` means the
    /// property is absent from the row.
    pub fn matches(&self, actual: Option<&Value>) -> bool {
        let present = actual.filter(|value| !value.is_null());

        match self {
            Cond::Eq(expected) => match present {
                None => expected.is_null(),
                Some(Value::Array(items)) if !expected.is_array() => {
                    items.iter().any(|item| equals(item, expected))
                }
                Some(actual) => equals(actual, expected),
            },
            Cond::Neq(expected) => !Cond::Eq(expected.clone()).matches(actual),
            Cond::Gt(bound) => ordered(present, bound, |ord| ord == Ordering::Greater),
            Cond::Gte(bound) => ordered(present, bound, |ord| ord != Ordering::Less),
            Cond::Lt(bound) => ordered(present, bound, |ord| ord == Ordering::Less),
            Cond::Lte(bound) => ordered(present, bound, |ord| ord != Ordering::Greater),
            Cond::Inq(values) => {
                let actual = actual.unwrap_or(&Value::Null);
                values.iter().any(|value| equals(actual, value))
            }
            Cond::Nin(values) => !Cond::Inq(values.clone()).matches(actual),
            Cond::Between(low, high) => {
                ordered(present, low, |ord| ord != Ordering::Less)
                    && ordered(present, high, |ord| ord != Ordering::Greater)
            }
            Cond::Exists(exists) => actual.is_some() == *exists,
            Cond::Like(pattern) => match present {
                Some(Value::String(s)) => like(s, pattern),
                _ => false,
            },
            Cond::Ilike(pattern) => match present {
                Some(Value::String(s)) => like(&s.to_lowercase(), &pattern.to_lowercase()),
                _ => false,
            },
        }
    }
}

fn parse_operator(property: &str, operator: &str, operand: &Value) -> Result<Cond> {
    let invalid = |expected: &str| {
        Error::invalid_argument(format!(
            "The operator {operator:?} of the property {property:?} expects {expected}, but {} was given.",
            Repr(operand)
        ))
    };

    Ok(match operator {
        "eq" => Cond::Eq(operand.clone()),
        "neq" => Cond::Neq(operand.clone()),
        "gt" => Cond::Gt(operand.clone()),
        "gte" => Cond::Gte(operand.clone()),
        "lt" => Cond::Lt(operand.clone()),
        "lte" => Cond::Lte(operand.clone()),
        "inq" | "nin" => {
            let Value::Array(values) = operand else {
                return Err(invalid("an Array"));
            };
            if operator == "inq" {
                Cond::Inq(values.clone())
            } else {
                Cond::Nin(values.clone())
            }
        }
        "between" => match operand {
            Value::Array(bounds) if bounds.len() == 2 => {
                Cond::Between(bounds[0].clone(), bounds[1].clone())
            }
            _ => return Err(invalid("an Array of 2 elements")),
        },
        "exists" => match operand {
            Value::Bool(exists) => Cond::Exists(*exists),
            _ => return Err(invalid("a Boolean")),
        },
        "like" | "ilike" => {
            let Value::String(pattern) = operand else {
                return Err(invalid("a String"));
            };
            if operator == "like" {
                Cond::Like(pattern.clone())
            } else {
                Cond::Ilike(pattern.clone())
            }
        }
        _ => return Err(invalid("a known operator")),
    })
}

/// Equality that treats `1` and `1.0` as the same number.
pub(super) fn equals(lhs: &Value, rhs: &Value) -> bool {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => lhs == rhs || lhs.as_f64() == rhs.as_f64(),
        _ => lhs == rhs,
    }
}

/// Orders two values of the same primitive kind. Mixed kinds and composites
/// are unordered.
pub(super) fn compare(lhs: &Value, rhs: &Value) -> Option<Ordering> {
    match (lhs, rhs) {
        (Value::Number(lhs), Value::Number(rhs)) => lhs.as_f64()?.partial_cmp(&rhs.as_f64()?),
        (Value::String(lhs), Value::String(rhs)) => Some(lhs.cmp(rhs)),
        (Value::Bool(lhs), Value::Bool(rhs)) => Some(lhs.cmp(rhs)),
        _ => None,
    }
}

fn ordered(actual: Option<&Value>, bound: &Value, accept: impl Fn(Ordering) -> bool) -> bool {
    actual
        .and_then(|actual| compare(actual, bound))
        .is_some_and(accept)
}

/// SQL `LIKE` matching: `%` is any run of characters, `_` is one character.
fn like(s: &str, pattern: &str) -> bool {
    let s: Vec<char> = s.chars().collect();
    let pattern: Vec<char> = pattern.chars().collect();

    let (mut si, mut pi) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while si < s.len() {
        match pattern.get(pi) {
            Some('%') => {
                backtrack = Some((pi, si));
                pi += 1;
            }
            Some(&c) if c == '_' || c == s[si] => {
                si += 1;
                pi += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    pi = star + 1;
                    si = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[pi..].iter().all(|c| *c == '%')
}

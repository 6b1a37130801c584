//! Configuration merge primitives
//!
//! Two merge strategies with different depths, matching the two-tier
//! precedence of rule composition:
//!
//! - [`deep_merge`]: recursive, webpack-merge style. Objects merge per key,
//!   arrays concatenate (left then right), anything else is replaced by the
//!   right-hand side. Used inside a single feature (default fragment under
//!   user fragment) and for the final base/rules/override overlay.
//! - [`shallow_override`]: top-level keys of the right-hand object replace
//!   the left-hand object's keys wholesale. Used between features
//!   contributing to the same rule category, so a higher-priority feature
//!   wins an option outright instead of mixing with a lower-priority one.

use serde_json::Value;

/// Deep-merges `overlay` onto `base`, consuming both.
///
/// Arrays concatenate rather than replace; scalar conflicts are won by
/// `overlay`.
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut lhs), Value::Object(rhs)) => {
            for (key, rhs_val) in rhs {
                match lhs.remove(&key) {
                    Some(lhs_val) => {
                        lhs.insert(key, deep_merge(lhs_val, rhs_val));
                    }
                    None => {
                        lhs.insert(key, rhs_val);
                    }
                }
            }
            Value::Object(lhs)
        }
        (Value::Array(mut lhs), Value::Array(rhs)) => {
            lhs.extend(rhs);
            Value::Array(lhs)
        }
        (_, overlay) => overlay,
    }
}

/// Deep-merges a sequence of values left to right, later values winning.
pub fn deep_merge_all<I>(values: I) -> Value
where
    I: IntoIterator<Item = Value>,
{
    values
        .into_iter()
        .fold(Value::Object(serde_json::Map::new()), deep_merge)
}

/// Replaces top-level keys of `base` with those of `overlay`, without
/// recursing. Non-object operands behave like [`deep_merge`]'s fallback:
/// `overlay` wins.
pub fn shallow_override(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut lhs), Value::Object(rhs)) => {
            for (key, rhs_val) in rhs {
                lhs.insert(key, rhs_val);
            }
            Value::Object(lhs)
        }
        (_, overlay) => overlay,
    }
}

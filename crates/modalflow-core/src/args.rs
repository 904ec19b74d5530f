//! Argument merging for show calls
//!
//! Registered default args and call-site args are both free-form JSON.
//! When both sides are objects they are shallow-merged with the call-site
//! winning per key; in every other combination the call-site value wins
//! outright.

use serde_json::Value;

/// Merge registered defaults with call-site args.
pub fn merge_args(defaults: Option<&Value>, args: Option<&Value>) -> Option<Value> {
    match (defaults, args) {
        (None, None) => None,
        (Some(defaults), None) => Some(defaults.clone()),
        (None, Some(args)) => Some(args.clone()),
        (Some(Value::Object(defaults)), Some(Value::Object(args))) => {
            let mut merged = defaults.clone();
            for (k, v) in args {
                merged.insert(k.clone(), v.clone());
            }
            Some(Value::Object(merged))
        }
        (Some(_), Some(args)) => Some(args.clone()),
    }
}

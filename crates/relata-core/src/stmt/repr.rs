use super::Value;

use std::fmt;

/// Formats a value for diagnostics.
///
/// Strings are quoted, numbers, booleans and `null` are written literally,
/// and composite values are reduced to their type name (`Array`, `Object`)
/// so error messages stay short.
#[derive(Debug, Clone, Copy)]
pub struct Repr<'a>(pub &'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Value::String(s) => write!(f, "{s:?}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Null => f.write_str("null"),
            Value::Array(_) => f.write_str("Array"),
            Value::Object(_) => f.write_str("Object"),
        }
    }
}

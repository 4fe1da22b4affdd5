//! Scalar values bound to query placeholders
//!
//! This module provides a driver-independent representation of the values
//! that end up in a statement's named-parameter bag. The actual binding
//! to a database driver happens outside the compiler.

use serde::{Deserialize, Serialize};

/// A scalar value that can be bound to a placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// SQL NULL
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// String value
    Str(String),
    /// Array of values; never bindable through a single placeholder
    Array(Vec<Value>),
}

impl Value {
    /// Check if this is a null value
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Check if this is a numeric value (integer or float)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Convert a `serde_json::Value` into a bindable value
    pub fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Float(f)
                } else {
                    // Fallback to string representation
                    Self::Str(n.to_string())
                }
            }
            serde_json::Value::String(s) => Self::Str(s.clone()),
            serde_json::Value::Array(arr) => {
                Self::Array(arr.iter().map(Self::from_json).collect())
            }
            serde_json::Value::Object(_) => Self::Str(value.to_string()),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Self::Array(values)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_impls() {
        let _: Value = true.into();
        let _: Value = "hello".into();
        let _: Value = 42i32.into();
        let _: Value = 42i64.into();
        let _: Value = 3.14f64.into();
        let _: Value = None::<i32>.into();
        assert_eq!(Value::from(Some(42i32)), Value::Int(42));
    }

    #[test]
    fn test_is_numeric() {
        assert!(Value::Int(1).is_numeric());
        assert!(Value::Float(1.5).is_numeric());
        assert!(!Value::Str("1".into()).is_numeric());
        assert!(!Value::Null.is_numeric());
    }

    #[test]
    fn test_from_json() {
        assert_eq!(Value::from_json(&serde_json::Value::Null), Value::Null);
        assert_eq!(Value::from_json(&serde_json::json!(true)), Value::Bool(true));
        assert_eq!(Value::from_json(&serde_json::json!(42)), Value::Int(42));
        assert_eq!(
            Value::from_json(&serde_json::json!("hello")),
            Value::Str("hello".into())
        );

        match Value::from_json(&serde_json::json!([1, 2, 3])) {
            Value::Array(v) => assert_eq!(v.len(), 3),
            other => panic!("expected array, got {:?}", other),
        }
    }
}

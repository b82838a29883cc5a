use alloc::boxed::Box;
use core::fmt;

use crate::value::{RecordType, Value};

/// The declared type of a property.
///
/// Used for setter type checks and to decide what to build when a missing
/// intermediate must be materialised.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ValueType {
    #[default]
    Any,
    Bool,
    Int,
    Float,
    Text,
    List(Box<ValueType>),
    Map(Box<ValueType>),
    Record(RecordType),
}

impl ValueType {
    #[inline]
    pub fn list_of(element: ValueType) -> Self {
        Self::List(Box::new(element))
    }

    #[inline]
    pub fn map_of(element: ValueType) -> Self {
        Self::Map(Box::new(element))
    }

    /// The runtime type of `value`.
    ///
    /// Containers report `Any` elements; `Null` reports `Any`.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Self::Any,
            Value::Bool(_) => Self::Bool,
            Value::Int(_) => Self::Int,
            Value::Float(_) => Self::Float,
            Value::Text(_) => Self::Text,
            Value::Record(r) => Self::Record(r.record_type().clone()),
            Value::Map(_) => Self::map_of(Self::Any),
            Value::List(_) => Self::list_of(Self::Any),
            Value::Wrapped(w) => Self::of(w.value()),
        }
    }

    /// Returns `true` if `value` may be stored in a slot of this type.
    ///
    /// `Null` fits every type and `Any` takes every value.
    ///
    /// # Examples
    ///
    /// ```
    /// use mg_reflect::value::{Value, ValueType};
    ///
    /// let ty = ValueType::list_of(ValueType::Int);
    /// assert!(ty.accepts(&Value::List(vec![Value::Int(1), Value::Null])));
    /// assert!(!ty.accepts(&Value::List(vec![Value::from("x")])));
    /// assert!(!ValueType::Float.accepts(&Value::Int(1)));
    /// ```
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (Self::Any, _) => true,
            (_, Value::Wrapped(w)) => self.accepts(w.value()),
            (Self::Bool, Value::Bool(_))
            | (Self::Int, Value::Int(_))
            | (Self::Float, Value::Float(_))
            | (Self::Text, Value::Text(_)) => true,
            (Self::List(e), Value::List(items)) => items.iter().all(|v| e.accepts(v)),
            (Self::Map(e), Value::Map(map)) => map.values().all(|v| e.accepts(v)),
            (Self::Record(t), Value::Record(r)) => r.record_type() == t,
            _ => false,
        }
    }

    /// Element type reached through an index or key.
    ///
    /// `Any` indexes to `Any`; scalars and records cannot be indexed.
    pub fn element_type(&self) -> Option<&ValueType> {
        match self {
            Self::List(e) | Self::Map(e) => Some(e),
            Self::Any => Some(self),
            _ => None,
        }
    }

    #[inline]
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::List(_))
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("any"),
            Self::Bool => f.write_str("bool"),
            Self::Int => f.write_str("int"),
            Self::Float => f.write_str("float"),
            Self::Text => f.write_str("text"),
            Self::List(e) => write!(f, "list<{e}>"),
            Self::Map(e) => write!(f, "map<{e}>"),
            Self::Record(t) => f.write_str(t.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ValueType;
    use crate::value::{Record, RecordType, Value};

    #[test]
    fn record_identity() {
        let a = RecordType::builder("A").field("x", ValueType::Int).build();
        let b = RecordType::builder("B").field("x", ValueType::Int).build();

        let ty = ValueType::Record(a.clone());
        assert!(ty.accepts(&Value::Record(Record::new(&a))));
        assert!(!ty.accepts(&Value::Record(Record::new(&b))));
        assert_eq!(ValueType::of(&Value::Record(Record::new(&b))), ValueType::Record(b));
    }

    #[test]
    fn element_types() {
        assert_eq!(
            ValueType::map_of(ValueType::Text).element_type(),
            Some(&ValueType::Text)
        );
        assert_eq!(ValueType::Any.element_type(), Some(&ValueType::Any));
        assert_eq!(ValueType::Int.element_type(), None);
        assert_eq!(
            alloc::format!("{}", ValueType::list_of(ValueType::map_of(ValueType::Int))),
            "list<map<int>>"
        );
    }
}

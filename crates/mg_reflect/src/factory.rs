//! Construction of default values for declared types.

use alloc::string::String;
use alloc::vec::Vec;

use crate::ReflectionError;
use crate::value::{Record, Value, ValueMap, ValueType};

/// Builds default instances of declared types.
///
/// Navigation only calls this on the write path, to materialise an absent
/// intermediate before writing through it.
pub trait ObjectFactory: Send + Sync {
    /// Creates a default value of type `ty`.
    fn create(&self, ty: &ValueType) -> Result<Value, ReflectionError>;

    /// Returns `true` if values of `ty` are ordered collections.
    fn is_collection(&self, ty: &ValueType) -> bool {
        ty.is_collection()
    }
}

/// The stock [`ObjectFactory`].
///
/// Scalars start at their zero value, containers and records start empty.
/// [`ValueType::Any`] becomes an empty map, the dynamic container.
///
/// # Examples
///
/// ```
/// use mg_reflect::factory::{DefaultObjectFactory, ObjectFactory};
/// use mg_reflect::value::{Value, ValueMap, ValueType};
///
/// let factory = DefaultObjectFactory;
/// assert_eq!(factory.create(&ValueType::Int).unwrap(), Value::Int(0));
/// assert_eq!(factory.create(&ValueType::Any).unwrap(), Value::Map(ValueMap::new()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectFactory;

impl ObjectFactory for DefaultObjectFactory {
    fn create(&self, ty: &ValueType) -> Result<Value, ReflectionError> {
        Ok(match ty {
            ValueType::Bool => Value::Bool(false),
            ValueType::Int => Value::Int(0),
            ValueType::Float => Value::Float(0.0),
            ValueType::Text => Value::Text(String::new()),
            ValueType::List(_) => Value::List(Vec::new()),
            ValueType::Map(_) | ValueType::Any => Value::Map(ValueMap::new()),
            ValueType::Record(ty) => Value::Record(Record::new(ty)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{DefaultObjectFactory, ObjectFactory};
    use crate::value::{Record, RecordType, Value, ValueType};

    #[test]
    fn defaults() {
        let f = DefaultObjectFactory;
        let ty = RecordType::builder("P").field("x", ValueType::Int).build();

        assert_eq!(f.create(&ValueType::Bool), Ok(Value::Bool(false)));
        assert_eq!(f.create(&ValueType::Text), Ok(Value::from("")));
        assert_eq!(
            f.create(&ValueType::list_of(ValueType::Int)),
            Ok(Value::List(alloc::vec![]))
        );
        assert_eq!(
            f.create(&ValueType::Record(ty.clone())),
            Ok(Value::Record(Record::new(&ty)))
        );
        assert!(f.is_collection(&ValueType::list_of(ValueType::Any)));
        assert!(!f.is_collection(&ValueType::map_of(ValueType::Any)));
    }
}

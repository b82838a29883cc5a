//! The dynamic value model that navigation operates on.
//!
//! An object graph is a tree of [`Value`]s. Structured records carry a
//! [`RecordType`] describing which named properties exist and how they may
//! be accessed; maps and lists are the associative and ordered containers.
//!
//! # Examples
//!
//! ```
//! use mg_reflect::value::{Record, RecordType, Value, ValueType};
//!
//! let user = RecordType::builder("User")
//!     .field("id", ValueType::Int)
//!     .field("name", ValueType::Text)
//!     .build();
//!
//! let record = Record::new(&user).with("id", 7).with("name", "ada");
//! assert_eq!(record.get("id"), Some(&Value::Int(7)));
//! assert_eq!(record.get("name").and_then(Value::as_str), Some("ada"));
//! ```

// -----------------------------------------------------------------------------
// Modules

mod record;
mod record_type;
mod value_type;

// -----------------------------------------------------------------------------
// Exports

pub use record::Record;
pub use record_type::{Access, Member, RecordType, RecordTypeBuilder};
pub use value_type::ValueType;

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::wrapper::ObjectWrapper;

// -----------------------------------------------------------------------------
// Value

/// An associative container keyed by string.
pub type ValueMap = BTreeMap<String, Value>;

/// A node of a dynamic object graph.
///
/// `Null` is absence: navigation treats a `Null` slot exactly like a
/// missing one and never hands out a reference to it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Record(Record),
    Map(ValueMap),
    List(Vec<Value>),
    /// A value that carries the wrapper to navigate it with.
    Wrapped(WrappedValue),
}

/// The shape of a [`Value`], without its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Text,
    Record,
    Map,
    List,
    Wrapped,
}

impl ValueKind {
    /// Lowercase name used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Record => "record",
            Self::Map => "map",
            Self::List => "list",
            Self::Wrapped => "wrapped",
        }
    }
}

impl fmt::Display for ValueKind {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Value {
    /// Pairs `value` with the wrapper that must be used to navigate it.
    pub fn wrapped(wrapper: Arc<dyn ObjectWrapper>, value: impl Into<Value>) -> Self {
        Self::Wrapped(WrappedValue::new(wrapper, value))
    }

    /// Returns the [`ValueKind`] of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Int(_) => ValueKind::Int,
            Self::Float(_) => ValueKind::Float,
            Self::Text(_) => ValueKind::Text,
            Self::Record(_) => ValueKind::Record,
            Self::Map(_) => ValueKind::Map,
            Self::List(_) => ValueKind::List,
            Self::Wrapped(_) => ValueKind::Wrapped,
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// `None` for [`Value::Null`], `Some(self)` otherwise.
    #[inline]
    pub fn present(&self) -> Option<&Value> {
        (!self.is_null()).then_some(self)
    }

    /// `None` for [`Value::Null`], `Some(self)` otherwise.
    #[inline]
    pub fn present_mut(&mut self) -> Option<&mut Value> {
        if self.is_null() { None } else { Some(self) }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_record_mut(&mut self) -> Option<&mut Record> {
        match self {
            Self::Record(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map_mut(&mut self) -> Option<&mut ValueMap> {
        match self {
            Self::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::List(v) => Some(v),
            _ => None,
        }
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from {
    ($($ty:ty => $variant:ident $(as $cast:ty)?),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Self::$variant(value $(as $cast)?)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int,
    u8 => Int as i64,
    u16 => Int as i64,
    u32 => Int as i64,
    f32 => Float as f64,
    f64 => Float,
    String => Text,
    Record => Record,
    ValueMap => Map,
    Vec<Value> => List,
    WrappedValue => Wrapped,
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

// -----------------------------------------------------------------------------
// WrappedValue

/// A value bundled with its own [`ObjectWrapper`].
///
/// Navigation reuses the bundled wrapper as-is instead of selecting one
/// from the value's shape.
#[derive(Clone)]
pub struct WrappedValue {
    wrapper: Arc<dyn ObjectWrapper>,
    value: Box<Value>,
}

impl WrappedValue {
    #[inline]
    pub fn new(wrapper: Arc<dyn ObjectWrapper>, value: impl Into<Value>) -> Self {
        Self {
            wrapper,
            value: Box::new(value.into()),
        }
    }

    #[inline]
    pub fn wrapper(&self) -> &Arc<dyn ObjectWrapper> {
        &self.wrapper
    }

    #[inline]
    pub fn value(&self) -> &Value {
        &self.value
    }

    #[inline]
    pub fn value_mut(&mut self) -> &mut Value {
        &mut self.value
    }

    #[inline]
    pub fn into_value(self) -> Value {
        *self.value
    }
}

impl fmt::Debug for WrappedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedValue")
            .field("wrapper", &self.wrapper.kind())
            .field("value", &self.value)
            .finish()
    }
}

impl PartialEq for WrappedValue {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.wrapper, &other.wrapper) && self.value == other.value
    }
}

// -----------------------------------------------------------------------------
// Tests

//! Uniform access to the four shapes of object a path can cross.
//!
//! An [`ObjectWrapper`] is a strategy: it holds no target of its own and is
//! handed the value it operates on, together with the [`MetaContext`], on
//! every call. [`Wrapper`] is the closed set of built-in strategies plus
//! [`Wrapper::Custom`] for extensions; [`Wrapper::of`] picks one from the
//! shape of a value.
//!
//! Named operations receive a [`PathSegment`]. `get`, `get_mut`, `set` and
//! `instantiate_property_value` act on that one segment and ignore its
//! children. The introspection operations (`find_property`,
//! `getter_type`, `setter_type`, `has_getter`, `has_setter`) are given the
//! remaining path when navigation stops at an absent intermediate, and
//! resolve it from declared types where they can.

// -----------------------------------------------------------------------------
// Modules

mod bean;
mod indexed;
mod map;
mod null;
mod sequence;

// -----------------------------------------------------------------------------
// Exports

pub use bean::BeanWrapper;
pub use map::MapWrapper;
pub use null::NullWrapper;
pub use sequence::SequenceWrapper;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use crate::ReflectionError;
use crate::context::MetaContext;
use crate::path::PathSegment;
use crate::value::{Value, ValueType};

// -----------------------------------------------------------------------------
// ObjectWrapper

/// The capability set every wrapper provides.
///
/// Implement this to teach navigation a new shape, then hand values to it
/// either wrapped ([`Value::wrapped`]) or through an
/// [`ObjectWrapperFactory`].
///
/// Returned references never point at [`Value::Null`]; absence is `None`.
pub trait ObjectWrapper: Send + Sync {
    /// Which family this wrapper belongs to, used in error messages.
    fn kind(&self) -> WrapperKind {
        WrapperKind::Custom
    }

    /// Reads `seg` on `target`.
    fn get<'v>(
        &self,
        target: &'v Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<Option<&'v Value>, ReflectionError>;

    /// Reads `seg` on `target` for writing through it.
    fn get_mut<'v>(
        &self,
        target: &'v mut Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<Option<&'v mut Value>, ReflectionError>;

    /// Writes `value` to `seg` on `target`.
    fn set(
        &self,
        target: &mut Value,
        seg: &PathSegment<'_>,
        value: Value,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError>;

    /// Canonical spelling of the path starting at `seg`, or `None` if some
    /// segment names no property.
    fn find_property(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        relaxed: bool,
        ctx: MetaContext<'_>,
    ) -> Result<Option<String>, ReflectionError>;

    fn getter_names(
        &self,
        target: &Value,
        ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError>;

    fn setter_names(
        &self,
        target: &Value,
        ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError>;

    fn getter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError>;

    fn setter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError>;

    fn has_getter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError>;

    fn has_setter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError>;

    /// Returns `true` if `target` is an ordered collection that accepts
    /// [`add`](Self::add).
    fn is_collection(&self, target: &Value) -> bool;

    fn add(&self, target: &mut Value, element: Value) -> Result<(), ReflectionError>;

    fn add_all(&self, target: &mut Value, elements: Vec<Value>) -> Result<(), ReflectionError>;

    /// Materialises a default value at `seg` on `target`.
    ///
    /// Called on the write path when `seg` is an absent intermediate. On
    /// success a following [`get_mut`](Self::get_mut) of `seg` must find a
    /// value.
    fn instantiate_property_value(
        &self,
        target: &mut Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError>;
}

// -----------------------------------------------------------------------------
// WrapperKind

/// The family of an [`ObjectWrapper`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WrapperKind {
    Null,
    Bean,
    Map,
    Sequence,
    Custom,
}

impl fmt::Display for WrapperKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Bean => "bean",
            Self::Map => "map",
            Self::Sequence => "sequence",
            Self::Custom => "custom",
        })
    }
}

// -----------------------------------------------------------------------------
// ObjectWrapperFactory

/// Extension point that claims values for custom wrappers.
///
/// Consulted for every value that is not already [`Value::Wrapped`],
/// before the built-in shape rules.
pub trait ObjectWrapperFactory: Send + Sync {
    /// The wrapper to use for `value`, or `None` to leave it to the
    /// built-in rules.
    fn wrapper_for(&self, value: &Value) -> Option<Arc<dyn ObjectWrapper>>;

    #[inline]
    fn has_wrapper_for(&self, value: &Value) -> bool {
        self.wrapper_for(value).is_some()
    }
}

/// An [`ObjectWrapperFactory`] that claims nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultObjectWrapperFactory;

impl ObjectWrapperFactory for DefaultObjectWrapperFactory {
    #[inline]
    fn wrapper_for(&self, _value: &Value) -> Option<Arc<dyn ObjectWrapper>> {
        None
    }

    #[inline]
    fn has_wrapper_for(&self, _value: &Value) -> bool {
        false
    }
}

// -----------------------------------------------------------------------------
// Wrapper

/// The wrapper selected for one value.
///
/// # Examples
///
/// ```
/// use mg_reflect::Reflection;
/// use mg_reflect::value::{Value, ValueMap};
/// use mg_reflect::wrapper::{ObjectWrapper, Wrapper, WrapperKind};
///
/// let reflection = Reflection::new();
/// let ctx = reflection.context();
///
/// assert_eq!(Wrapper::of(&Value::Null, ctx).kind(), WrapperKind::Null);
/// assert_eq!(Wrapper::of(&Value::Map(ValueMap::new()), ctx).kind(), WrapperKind::Map);
/// assert_eq!(Wrapper::of(&Value::List(vec![]), ctx).kind(), WrapperKind::Sequence);
/// assert_eq!(Wrapper::of(&Value::Int(1), ctx).kind(), WrapperKind::Bean);
/// ```
#[derive(Clone)]
pub enum Wrapper {
    Null,
    Bean,
    Map,
    Sequence,
    Custom(Arc<dyn ObjectWrapper>),
}

impl Wrapper {
    /// Selects the wrapper for `value`.
    ///
    /// In order: the wrapper a [`Value::Wrapped`] carries, the one the
    /// wrapper factory claims, then by shape (map, list, anything else).
    pub fn of(value: &Value, ctx: MetaContext<'_>) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Wrapped(w) => Self::Custom(Arc::clone(w.wrapper())),
            other => match ctx.wrapper_factory().wrapper_for(other) {
                Some(custom) => Self::Custom(custom),
                None => match other {
                    Value::Map(_) => Self::Map,
                    Value::List(_) => Self::Sequence,
                    _ => Self::Bean,
                },
            },
        }
    }

    /// Selects the wrapper for `value` and the target it operates on.
    ///
    /// The target of a [`Value::Wrapped`] is its inner value.
    pub fn select<'v>(value: &'v Value, ctx: MetaContext<'_>) -> (Self, &'v Value) {
        let wrapper = Self::of(value, ctx);
        match value {
            Value::Wrapped(w) => (wrapper, w.value()),
            other => (wrapper, other),
        }
    }

    /// Mutable [`select`](Self::select).
    pub fn select_mut<'v>(value: &'v mut Value, ctx: MetaContext<'_>) -> (Self, &'v mut Value) {
        let wrapper = Self::of(value, ctx);
        match value {
            Value::Wrapped(w) => (wrapper, w.value_mut()),
            other => (wrapper, other),
        }
    }
}

impl fmt::Debug for Wrapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(w) => f.debug_tuple("Custom").field(&w.kind()).finish(),
            other => fmt::Display::fmt(&other.kind(), f),
        }
    }
}

macro_rules! dispatch {
    ($self:ident.$method:ident($($arg:expr),* $(,)?)) => {
        match $self {
            Wrapper::Null => NullWrapper.$method($($arg),*),
            Wrapper::Bean => BeanWrapper.$method($($arg),*),
            Wrapper::Map => MapWrapper.$method($($arg),*),
            Wrapper::Sequence => SequenceWrapper.$method($($arg),*),
            Wrapper::Custom(custom) => custom.$method($($arg),*),
        }
    };
}

impl ObjectWrapper for Wrapper {
    fn kind(&self) -> WrapperKind {
        dispatch!(self.kind())
    }

    fn get<'v>(
        &self,
        target: &'v Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<Option<&'v Value>, ReflectionError> {
        dispatch!(self.get(target, seg, ctx))
    }

    fn get_mut<'v>(
        &self,
        target: &'v mut Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<Option<&'v mut Value>, ReflectionError> {
        dispatch!(self.get_mut(target, seg, ctx))
    }

    fn set(
        &self,
        target: &mut Value,
        seg: &PathSegment<'_>,
        value: Value,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        dispatch!(self.set(target, seg, value, ctx))
    }

    fn find_property(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        relaxed: bool,
        ctx: MetaContext<'_>,
    ) -> Result<Option<String>, ReflectionError> {
        dispatch!(self.find_property(target, seg, relaxed, ctx))
    }

    fn getter_names(
        &self,
        target: &Value,
        ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        dispatch!(self.getter_names(target, ctx))
    }

    fn setter_names(
        &self,
        target: &Value,
        ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        dispatch!(self.setter_names(target, ctx))
    }

    fn getter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        dispatch!(self.getter_type(target, seg, ctx))
    }

    fn setter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        dispatch!(self.setter_type(target, seg, ctx))
    }

    fn has_getter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        dispatch!(self.has_getter(target, seg, ctx))
    }

    fn has_setter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        dispatch!(self.has_setter(target, seg, ctx))
    }

    fn is_collection(&self, target: &Value) -> bool {
        dispatch!(self.is_collection(target))
    }

    fn add(&self, target: &mut Value, element: Value) -> Result<(), ReflectionError> {
        dispatch!(self.add(target, element))
    }

    fn add_all(&self, target: &mut Value, elements: Vec<Value>) -> Result<(), ReflectionError> {
        dispatch!(self.add_all(target, elements))
    }

    fn instantiate_property_value(
        &self,
        target: &mut Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        dispatch!(self.instantiate_property_value(target, seg, ctx))
    }
}

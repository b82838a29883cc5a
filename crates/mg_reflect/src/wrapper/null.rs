use alloc::string::String;
use alloc::vec::Vec;

use super::{ObjectWrapper, WrapperKind};
use crate::ReflectionError;
use crate::context::MetaContext;
use crate::path::PathSegment;
use crate::value::{Value, ValueType};

/// The wrapper of an absent object.
///
/// Reads find nothing and introspection finds no property. Anything that
/// would need an object to act on fails with `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullWrapper;

impl NullWrapper {
    #[inline]
    fn unsupported(operation: &'static str) -> ReflectionError {
        ReflectionError::unsupported(operation, WrapperKind::Null)
    }
}

impl ObjectWrapper for NullWrapper {
    #[inline]
    fn kind(&self) -> WrapperKind {
        WrapperKind::Null
    }

    #[inline]
    fn get<'v>(
        &self,
        _target: &'v Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<&'v Value>, ReflectionError> {
        Ok(None)
    }

    #[inline]
    fn get_mut<'v>(
        &self,
        _target: &'v mut Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<&'v mut Value>, ReflectionError> {
        Ok(None)
    }

    fn set(
        &self,
        _target: &mut Value,
        _seg: &PathSegment<'_>,
        _value: Value,
        _ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        Err(Self::unsupported("set"))
    }

    fn find_property(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _relaxed: bool,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<String>, ReflectionError> {
        Ok(None)
    }

    fn getter_names(
        &self,
        _target: &Value,
        _ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        Ok(Vec::new())
    }

    fn setter_names(
        &self,
        _target: &Value,
        _ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        Ok(Vec::new())
    }

    fn getter_type(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        Err(Self::unsupported("getter_type"))
    }

    fn setter_type(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        Err(Self::unsupported("setter_type"))
    }

    fn has_getter(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        Ok(false)
    }

    fn has_setter(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        Ok(false)
    }

    fn is_collection(&self, _target: &Value) -> bool {
        false
    }

    fn add(&self, _target: &mut Value, _element: Value) -> Result<(), ReflectionError> {
        Err(Self::unsupported("add"))
    }

    fn add_all(&self, _target: &mut Value, _elements: Vec<Value>) -> Result<(), ReflectionError> {
        Err(Self::unsupported("add_all"))
    }

    fn instantiate_property_value(
        &self,
        _target: &mut Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        Err(Self::unsupported("instantiate_property_value"))
    }
}

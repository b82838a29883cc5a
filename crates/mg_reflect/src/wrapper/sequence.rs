use alloc::string::String;
use alloc::vec::Vec;

use super::{ObjectWrapper, WrapperKind};
use crate::ReflectionError;
use crate::context::MetaContext;
use crate::path::PathSegment;
use crate::value::{Value, ValueType};

/// The wrapper of an ordered collection.
///
/// A sequence only supports appending. It is never the host of a named
/// property: its elements are reached through the indexed segment of the
/// enclosing record or map, so every named operation fails with
/// `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceWrapper;

impl SequenceWrapper {
    #[inline]
    fn unsupported(operation: &'static str) -> ReflectionError {
        ReflectionError::unsupported(operation, WrapperKind::Sequence)
    }

    fn items(target: &mut Value) -> Result<&mut Vec<Value>, ReflectionError> {
        target
            .as_list_mut()
            .ok_or_else(|| Self::unsupported("add"))
    }
}

impl ObjectWrapper for SequenceWrapper {
    #[inline]
    fn kind(&self) -> WrapperKind {
        WrapperKind::Sequence
    }

    fn get<'v>(
        &self,
        _target: &'v Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<&'v Value>, ReflectionError> {
        Err(Self::unsupported("get"))
    }

    fn get_mut<'v>(
        &self,
        _target: &'v mut Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<&'v mut Value>, ReflectionError> {
        Err(Self::unsupported("get"))
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
        Err(Self::unsupported("find_property"))
    }

    fn getter_names(
        &self,
        _target: &Value,
        _ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        Err(Self::unsupported("getter_names"))
    }

    fn setter_names(
        &self,
        _target: &Value,
        _ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        Err(Self::unsupported("setter_names"))
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
        Err(Self::unsupported("has_getter"))
    }

    fn has_setter(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        Err(Self::unsupported("has_setter"))
    }

    #[inline]
    fn is_collection(&self, _target: &Value) -> bool {
        true
    }

    fn add(&self, target: &mut Value, element: Value) -> Result<(), ReflectionError> {
        Self::items(target)?.push(element);
        Ok(())
    }

    fn add_all(&self, target: &mut Value, elements: Vec<Value>) -> Result<(), ReflectionError> {
        Self::items(target)?.extend(elements);
        Ok(())
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

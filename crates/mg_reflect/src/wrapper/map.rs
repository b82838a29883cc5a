use alloc::string::{String, ToString};
use alloc::vec::Vec;

use super::{ObjectWrapper, WrapperKind, indexed};
use crate::ReflectionError;
use crate::context::MetaContext;
use crate::path::PathSegment;
use crate::value::{Value, ValueMap, ValueType};

/// The wrapper of an associative container.
///
/// A segment name is an entry key. Any key may be written, and keys that
/// are present may be read. Absent containers reached through an indexed
/// segment are created as maps, the dynamic container.
#[derive(Debug, Clone, Copy, Default)]
pub struct MapWrapper;

impl MapWrapper {
    #[inline]
    fn unsupported(operation: &'static str) -> ReflectionError {
        ReflectionError::unsupported(operation, WrapperKind::Map)
    }

    fn entries<'v>(
        target: &'v Value,
        seg: &PathSegment<'_>,
    ) -> Result<&'v ValueMap, ReflectionError> {
        target
            .as_map()
            .ok_or_else(|| ReflectionError::type_mismatch(seg.name(), "map", target.kind().name()))
    }

    fn entries_mut<'v>(
        target: &'v mut Value,
        seg: &PathSegment<'_>,
    ) -> Result<&'v mut ValueMap, ReflectionError> {
        let kind = target.kind();
        target
            .as_map_mut()
            .ok_or_else(|| ReflectionError::type_mismatch(seg.name(), "map", kind.name()))
    }

    fn keys(target: &Value) -> Result<Vec<String>, ReflectionError> {
        match target.as_map() {
            Some(map) => Ok(map.keys().cloned().collect()),
            None => Err(Self::unsupported("property names")),
        }
    }

    /// Runtime type of a terminal segment; `Any` when nothing is there.
    fn runtime_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> ValueType {
        if seg.has_next() {
            return ValueType::Any;
        }
        match self.get(target, seg, ctx) {
            Ok(Some(value)) => ValueType::of(value),
            _ => ValueType::Any,
        }
    }
}

impl ObjectWrapper for MapWrapper {
    #[inline]
    fn kind(&self) -> WrapperKind {
        WrapperKind::Map
    }

    fn get<'v>(
        &self,
        target: &'v Value,
        seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<&'v Value>, ReflectionError> {
        let entry = Self::entries(target, seg)?
            .get(seg.name())
            .and_then(Value::present);
        match (entry, seg.index()) {
            (Some(container), Some(_)) => indexed::get(container, seg),
            (entry, _) => Ok(entry),
        }
    }

    fn get_mut<'v>(
        &self,
        target: &'v mut Value,
        seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<&'v mut Value>, ReflectionError> {
        let entry = Self::entries_mut(target, seg)?
            .get_mut(seg.name())
            .and_then(Value::present_mut);
        match (entry, seg.index()) {
            (Some(container), Some(_)) => indexed::get_mut(container, seg),
            (entry, _) => Ok(entry),
        }
    }

    fn set(
        &self,
        target: &mut Value,
        seg: &PathSegment<'_>,
        value: Value,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        let map = Self::entries_mut(target, seg)?;
        if seg.index().is_none() {
            map.insert(seg.name().into(), value);
            return Ok(());
        }

        if map.get(seg.name()).is_none_or(Value::is_null) {
            if value.is_null() {
                return Ok(());
            }
            log::trace!("Creating container `{}` to write `{}`", seg.name(), seg.indexed_name());
            let container = ctx.object_factory().create(&ValueType::Any)?;
            map.insert(seg.name().into(), container);
        }
        indexed::set(map.entry(seg.name().into()).or_default(), seg, value)
    }

    /// Map keys are taken as written.
    fn find_property(
        &self,
        _target: &Value,
        seg: &PathSegment<'_>,
        _relaxed: bool,
        _ctx: MetaContext<'_>,
    ) -> Result<Option<String>, ReflectionError> {
        Ok(Some(seg.to_string()))
    }

    fn getter_names(
        &self,
        target: &Value,
        _ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        Self::keys(target)
    }

    fn setter_names(
        &self,
        target: &Value,
        _ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        Self::keys(target)
    }

    fn getter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        Ok(self.runtime_type(target, seg, ctx))
    }

    fn setter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        Ok(self.runtime_type(target, seg, ctx))
    }

    fn has_getter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        if seg.has_next() {
            return Ok(false);
        }
        Ok(matches!(self.get(target, seg, ctx), Ok(Some(_))))
    }

    #[inline]
    fn has_setter(
        &self,
        _target: &Value,
        _seg: &PathSegment<'_>,
        _ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        Ok(true)
    }

    #[inline]
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
        target: &mut Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        let value = ctx.object_factory().create(&ValueType::Any)?;
        log::trace!("Materialising map entry `{}`", seg.indexed_name());
        self.set(target, seg, value, ctx)
    }
}

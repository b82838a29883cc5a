use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use super::{ObjectWrapper, WrapperKind, indexed};
use crate::ReflectionError;
use crate::context::MetaContext;
use crate::descriptor::{Accessor, TypeDescriptor, TypeNavigator};
use crate::path::PathSegment;
use crate::value::{Value, ValueType};

/// The wrapper of a structured record, and the fallback for scalars.
///
/// Properties are resolved through the record type's
/// [`TypeDescriptor`], so access rights and declared types are enforced
/// here. A scalar has no properties at all.
///
/// On an indexed segment the named property must be readable and hold a
/// list or map; the index is then applied to that container. Writing
/// through an absent container creates it from the declared type first.
#[derive(Debug, Clone, Copy, Default)]
pub struct BeanWrapper;

impl BeanWrapper {
    fn descriptor(target: &Value, ctx: MetaContext<'_>) -> Arc<TypeDescriptor> {
        match target {
            Value::Record(record) => ctx.descriptors().descriptor(record.record_type()),
            other => Arc::new(TypeDescriptor::opaque(other.kind().name())),
        }
    }

    fn type_navigator<'c>(target: &Value, ctx: MetaContext<'c>) -> Option<TypeNavigator<'c>> {
        let ty = target.as_record()?.record_type().clone();
        Some(TypeNavigator::new(ValueType::Record(ty), ctx.descriptors()))
    }

    fn resolve(
        target: &Value,
        seg: &PathSegment<'_>,
        accessor: Accessor,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        match Self::type_navigator(target, ctx) {
            Some(nav) => nav.resolve(seg, accessor),
            None => Err(Self::descriptor(target, ctx).no_such_property(seg.name())),
        }
    }

    fn slot_mut<'v>(
        target: &'v mut Value,
        desc: &TypeDescriptor,
        name: &str,
    ) -> Result<&'v mut Value, ReflectionError> {
        target
            .as_record_mut()
            .and_then(|record| record.get_mut(name))
            .ok_or_else(|| desc.no_such_property(name))
    }

    /// Element type behind the indexed segment `seg`.
    fn element_type<'d>(
        desc: &'d TypeDescriptor,
        seg: &PathSegment<'_>,
    ) -> Result<&'d ValueType, ReflectionError> {
        let container = desc.require_getter(seg.name())?;
        container.element_type().ok_or_else(|| {
            ReflectionError::type_mismatch(seg.indexed_name(), "list or map", container.to_string())
        })
    }

    #[inline]
    fn unsupported(operation: &'static str) -> ReflectionError {
        ReflectionError::unsupported(operation, WrapperKind::Bean)
    }
}

fn mismatch(property: &str, expected: &ValueType, value: &Value) -> ReflectionError {
    ReflectionError::type_mismatch(property, expected.to_string(), ValueType::of(value).to_string())
}

impl ObjectWrapper for BeanWrapper {
    #[inline]
    fn kind(&self) -> WrapperKind {
        WrapperKind::Bean
    }

    fn get<'v>(
        &self,
        target: &'v Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<Option<&'v Value>, ReflectionError> {
        let desc = Self::descriptor(target, ctx);
        desc.require_getter(seg.name())?;
        let slot = target
            .as_record()
            .and_then(|record| record.get(seg.name()))
            .ok_or_else(|| desc.no_such_property(seg.name()))?;
        match (slot.present(), seg.index()) {
            (Some(container), Some(_)) => indexed::get(container, seg),
            (value, _) => Ok(value),
        }
    }

    fn get_mut<'v>(
        &self,
        target: &'v mut Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<Option<&'v mut Value>, ReflectionError> {
        let desc = Self::descriptor(target, ctx);
        desc.require_getter(seg.name())?;
        let slot = Self::slot_mut(target, &desc, seg.name())?;
        match (slot.present_mut(), seg.index()) {
            (Some(container), Some(_)) => indexed::get_mut(container, seg),
            (value, _) => Ok(value),
        }
    }

    fn set(
        &self,
        target: &mut Value,
        seg: &PathSegment<'_>,
        value: Value,
        ctx: MetaContext<'_>,
    ) -> Result<(), ReflectionError> {
        let desc = Self::descriptor(target, ctx);
        let name = seg.name();

        if seg.index().is_none() {
            let ty = desc.require_setter(name)?;
            if !ty.accepts(&value) {
                return Err(mismatch(name, ty, &value));
            }
            *Self::slot_mut(target, &desc, name)? = value;
            return Ok(());
        }

        let element = Self::element_type(&desc, seg)?;
        if !element.accepts(&value) {
            return Err(mismatch(seg.indexed_name(), element, &value));
        }
        let slot = Self::slot_mut(target, &desc, name)?;
        if slot.is_null() {
            if value.is_null() {
                return Ok(());
            }
            let container = desc.require_getter(name)?;
            log::trace!("Creating container `{name}` of `{}` as {container}", desc.name());
            let factory = ctx.object_factory();
            let mut created = factory.create(container)?;
            if factory.is_collection(container) {
                // Ordered collections only take existing positions: the
                // property stays absent unless the write succeeds.
                indexed::set(&mut created, seg, value)?;
                *slot = created;
                return Ok(());
            }
            *slot = created;
        }
        indexed::set(slot, seg, value)
    }

    fn find_property(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        relaxed: bool,
        ctx: MetaContext<'_>,
    ) -> Result<Option<String>, ReflectionError> {
        Ok(Self::type_navigator(target, ctx).and_then(|nav| nav.canonical(seg, relaxed)))
    }

    fn getter_names(
        &self,
        target: &Value,
        ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        let desc = Self::descriptor(target, ctx);
        Ok(desc.readable_names().map(String::from).collect())
    }

    fn setter_names(
        &self,
        target: &Value,
        ctx: MetaContext<'_>,
    ) -> Result<Vec<String>, ReflectionError> {
        let desc = Self::descriptor(target, ctx);
        Ok(desc.writable_names().map(String::from).collect())
    }

    fn getter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        Self::resolve(target, seg, Accessor::Getter, ctx)
    }

    fn setter_type(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<ValueType, ReflectionError> {
        Self::resolve(target, seg, Accessor::Setter, ctx)
    }

    fn has_getter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        Ok(Self::resolve(target, seg, Accessor::Getter, ctx).is_ok())
    }

    fn has_setter(
        &self,
        target: &Value,
        seg: &PathSegment<'_>,
        ctx: MetaContext<'_>,
    ) -> Result<bool, ReflectionError> {
        Ok(Self::resolve(target, seg, Accessor::Setter, ctx).is_ok())
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
        let desc = Self::descriptor(target, ctx);
        let ty = match seg.index() {
            None => desc.require_setter(seg.name())?,
            Some(_) => Self::element_type(&desc, seg)?,
        };
        let value = ctx.object_factory().create(ty)?;
        log::trace!(
            "Materialising `{}` of `{}` as {ty}",
            seg.indexed_name(),
            desc.name()
        );
        self.set(target, seg, value, ctx)
    }
}

//! Path navigation over one object.
//!
//! A [`Navigator`] wraps a single root value. It picks the wrapper for the
//! root once and resolves every path one segment at a time, selecting a
//! fresh wrapper for each intermediate value it passes.
//!
//! Reading through an absent intermediate yields `None`. Writing through
//! one materialises it through the [`ObjectFactory`], unless the value
//! being written is itself null, in which case nothing happens.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::ReflectionError;
use crate::context::MetaContext;
use crate::descriptor::DescriptorCache;
use crate::factory::ObjectFactory;
use crate::path::PathSegment;
use crate::value::{Value, ValueType};
use crate::wrapper::{ObjectWrapper, ObjectWrapperFactory, Wrapper};

static NULL: Value = Value::Null;

// -----------------------------------------------------------------------------
// Navigator

/// Reads, writes and introspects nested properties of one value.
///
/// Navigators are cheap and short-lived: create one per call site with
/// [`Navigator::for_object`] or [`Reflection::navigator`].
///
/// # Examples
///
/// ```
/// use mg_reflect::Reflection;
/// use mg_reflect::value::{Value, ValueMap};
///
/// let reflection = Reflection::new();
/// let mut row = Value::Map(ValueMap::new());
/// let mut nav = reflection.navigator(&mut row);
///
/// nav.set_value("order.items[sku]", 3).unwrap();
/// assert_eq!(nav.get_value("order.items[sku]").unwrap(), Some(&Value::Int(3)));
/// assert_eq!(nav.get_value("order.missing.deeper").unwrap(), None);
/// ```
///
/// [`Reflection::navigator`]: crate::Reflection::navigator
pub struct Navigator<'a> {
    object: Option<&'a mut Value>,
    wrapper: Wrapper,
    ctx: MetaContext<'a>,
}

impl<'a> Navigator<'a> {
    /// Creates a navigator over `object`.
    ///
    /// `None` and [`Value::Null`] both give the null navigator.
    pub fn for_object(
        object: Option<&'a mut Value>,
        object_factory: &'a dyn ObjectFactory,
        wrapper_factory: &'a dyn ObjectWrapperFactory,
        descriptors: &'a DescriptorCache,
    ) -> Self {
        let ctx = MetaContext::new(object_factory, wrapper_factory, descriptors);
        Self::from_context(object, ctx)
    }

    /// Creates a navigator over `object` with the collaborators of `ctx`.
    pub fn from_context(object: Option<&'a mut Value>, ctx: MetaContext<'a>) -> Self {
        let object = object.and_then(Value::present_mut);
        let wrapper = match object.as_deref() {
            Some(value) => Wrapper::of(value, ctx),
            None => Wrapper::Null,
        };
        Self {
            object,
            wrapper,
            ctx,
        }
    }

    /// Returns `true` if this navigator wraps no object.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.object.is_none()
    }

    /// The wrapped value, as given.
    #[inline]
    pub fn original_object(&self) -> Option<&Value> {
        self.object.as_deref()
    }

    #[inline]
    pub fn original_object_mut(&mut self) -> Option<&mut Value> {
        self.object.as_deref_mut()
    }

    /// The wrapper selected for the root value.
    #[inline]
    pub fn wrapper(&self) -> &Wrapper {
        &self.wrapper
    }

    #[inline]
    pub fn context(&self) -> MetaContext<'a> {
        self.ctx
    }

    #[inline]
    pub fn object_factory(&self) -> &'a dyn ObjectFactory {
        self.ctx.object_factory()
    }

    #[inline]
    pub fn wrapper_factory(&self) -> &'a dyn ObjectWrapperFactory {
        self.ctx.wrapper_factory()
    }

    #[inline]
    pub fn descriptors(&self) -> &'a DescriptorCache {
        self.ctx.descriptors()
    }

    /// The value the root wrapper operates on.
    fn target(&self) -> &Value {
        match self.object.as_deref() {
            Some(Value::Wrapped(w)) => w.value(),
            Some(value) => value,
            None => &NULL,
        }
    }

    /// Reads the value at `path`.
    ///
    /// Returns `None` if the value or any intermediate is absent.
    pub fn get_value(&self, path: &str) -> Result<Option<&Value>, ReflectionError> {
        let mut seg = PathSegment::parse(path)?;
        let mut wrapper = self.wrapper.clone();
        let mut target = self.target();
        loop {
            let value = wrapper.get(target, &seg, self.ctx)?.and_then(Value::present);
            let (Some(value), Some(next)) = (value, seg.next_segment()) else {
                return Ok(value);
            };
            (wrapper, target) = Wrapper::select(value, self.ctx);
            seg = next;
        }
    }

    /// Mutable access to the value at `path`.
    ///
    /// Nothing is materialised: absent intermediates give `None`.
    pub fn get_value_mut(&mut self, path: &str) -> Result<Option<&mut Value>, ReflectionError> {
        let ctx = self.ctx;
        let mut seg = PathSegment::parse(path)?;
        let mut wrapper = self.wrapper.clone();
        let Some(mut target) = self.object.as_deref_mut().map(unwrap_mut) else {
            return Ok(None);
        };
        loop {
            let Some(value) = wrapper.get_mut(target, &seg, ctx)?.and_then(Value::present_mut)
            else {
                return Ok(None);
            };
            let Some(next) = seg.next_segment() else {
                return Ok(Some(value));
            };
            (wrapper, target) = Wrapper::select_mut(value, ctx);
            seg = next;
        }
    }

    /// Writes `value` at `path`.
    ///
    /// Absent intermediates are created first, from the declared type of
    /// the property they fill. Writing a null value never creates
    /// anything; if an intermediate is absent the call does nothing.
    pub fn set_value(
        &mut self,
        path: &str,
        value: impl Into<Value>,
    ) -> Result<(), ReflectionError> {
        let value = value.into();
        let ctx = self.ctx;
        let mut seg = PathSegment::parse(path)?;
        let mut wrapper = self.wrapper.clone();
        let mut scratch = Value::Null;
        let mut target = match self.object.as_deref_mut() {
            Some(object) => unwrap_mut(object),
            None => &mut scratch,
        };
        loop {
            let Some(next) = seg.next_segment() else {
                return wrapper.set(target, &seg, value, ctx);
            };
            if wrapper.get_mut(target, &seg, ctx)?.is_none_or(|v| v.is_null()) {
                if value.is_null() {
                    return Ok(());
                }
                log::trace!("Materialising `{}` to write `{path}`", seg.indexed_name());
                wrapper.instantiate_property_value(target, &seg, ctx)?;
            }
            let child = match wrapper.get_mut(target, &seg, ctx)? {
                Some(child) => child,
                None => {
                    return Err(ReflectionError::Instantiation {
                        ty: seg.indexed_name().into(),
                        reason: "the property is still absent after instantiation".into(),
                    });
                }
            };
            (wrapper, target) = Wrapper::select_mut(child, ctx);
            seg = next;
        }
    }

    /// A navigator over the value at `path`, without materialising it.
    pub fn navigator_for_property(&mut self, path: &str) -> Result<Navigator<'_>, ReflectionError> {
        let ctx = self.ctx;
        let value = self.get_value_mut(path)?;
        Ok(Navigator::from_context(value, ctx))
    }

    /// Follows present values along `path` for as long as they can be
    /// read, then hands the rest of the path to `f`.
    ///
    /// `f` receives the last wrapper, its target, the remaining path and
    /// the consumed prefix including its trailing dot.
    fn descend<T>(
        &self,
        path: &str,
        f: impl FnOnce(&Wrapper, &Value, &PathSegment<'_>, &str) -> Result<T, ReflectionError>,
    ) -> Result<T, ReflectionError> {
        let mut seg = PathSegment::parse(path)?;
        let mut wrapper = self.wrapper.clone();
        let mut target = self.target();
        let mut consumed = 0;
        while let Some(next) = seg.next_segment() {
            match wrapper.get(target, &seg, self.ctx) {
                Ok(Some(value)) if !value.is_null() => {
                    consumed += seg.indexed_name().len() + 1;
                    (wrapper, target) = Wrapper::select(value, self.ctx);
                    seg = next;
                }
                _ => break,
            }
        }
        f(&wrapper, target, &seg, &path[..consumed])
    }

    /// Canonical spelling of `path`, or `None` if it names no property.
    ///
    /// With `relaxed`, record properties also match ignoring case and
    /// underscores. Map keys are kept as written.
    pub fn find_property(
        &self,
        path: &str,
        relaxed: bool,
    ) -> Result<Option<String>, ReflectionError> {
        self.descend(path, |wrapper, target, seg, prefix| {
            let rest = wrapper.find_property(target, seg, relaxed, self.ctx)?;
            Ok(rest.map(|rest| [prefix, rest.as_str()].concat()))
        })
    }

    /// Names of the readable properties of the root value.
    pub fn getter_names(&self) -> Result<Vec<String>, ReflectionError> {
        self.wrapper.getter_names(self.target(), self.ctx)
    }

    /// Names of the writable properties of the root value.
    pub fn setter_names(&self) -> Result<Vec<String>, ReflectionError> {
        self.wrapper.setter_names(self.target(), self.ctx)
    }

    pub fn getter_type(&self, path: &str) -> Result<ValueType, ReflectionError> {
        self.descend(path, |wrapper, target, seg, _| {
            wrapper.getter_type(target, seg, self.ctx)
        })
    }

    pub fn setter_type(&self, path: &str) -> Result<ValueType, ReflectionError> {
        self.descend(path, |wrapper, target, seg, _| {
            wrapper.setter_type(target, seg, self.ctx)
        })
    }

    pub fn has_getter(&self, path: &str) -> Result<bool, ReflectionError> {
        self.descend(path, |wrapper, target, seg, _| {
            wrapper.has_getter(target, seg, self.ctx)
        })
    }

    pub fn has_setter(&self, path: &str) -> Result<bool, ReflectionError> {
        self.descend(path, |wrapper, target, seg, _| {
            wrapper.has_setter(target, seg, self.ctx)
        })
    }

    /// Returns `true` if the root value is an ordered collection.
    pub fn is_collection(&self) -> bool {
        self.wrapper.is_collection(self.target())
    }

    /// Appends `element` to the root collection.
    pub fn add(&mut self, element: impl Into<Value>) -> Result<(), ReflectionError> {
        let mut scratch = Value::Null;
        let target = match self.object.as_deref_mut() {
            Some(object) => unwrap_mut(object),
            None => &mut scratch,
        };
        self.wrapper.add(target, element.into())
    }

    /// Appends every element of `elements` to the root collection.
    pub fn add_all<I>(&mut self, elements: I) -> Result<(), ReflectionError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        let elements = elements.into_iter().map(Into::into).collect();
        let mut scratch = Value::Null;
        let target = match self.object.as_deref_mut() {
            Some(object) => unwrap_mut(object),
            None => &mut scratch,
        };
        self.wrapper.add_all(target, elements)
    }
}

/// The value a wrapper operates on: the inner value of a wrapped one.
fn unwrap_mut(value: &mut Value) -> &mut Value {
    match value {
        Value::Wrapped(w) => w.value_mut(),
        other => other,
    }
}

impl fmt::Debug for Navigator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Navigator")
            .field("object", &self.object)
            .field("wrapper", &self.wrapper)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;
    use alloc::vec::Vec;

    use super::Navigator;
    use crate::context::MetaContext;
    use crate::descriptor::DescriptorCache;
    use crate::factory::DefaultObjectFactory;
    use crate::path::PathSegment;
    use crate::value::{Record, RecordType, Value, ValueMap, ValueType};
    use crate::wrapper::{
        DefaultObjectWrapperFactory, MapWrapper, ObjectWrapper, ObjectWrapperFactory, Wrapper,
        WrapperKind,
    };
    use crate::{Reflection, ReflectionError};

    struct Types {
        order: RecordType,
        customer: RecordType,
    }

    fn types() -> Types {
        let item = RecordType::builder("Item")
            .field("price", ValueType::Float)
            .build();
        let address = RecordType::builder("Address")
            .field("city", ValueType::Text)
            .field("zipCode", ValueType::Text)
            .build();
        let customer = RecordType::builder("Customer")
            .field("userName", ValueType::Text)
            .field("address", ValueType::Record(address))
            .getter("id", ValueType::Int)
            .build();
        let order = RecordType::builder("Order")
            .field("customer", ValueType::Record(customer.clone()))
            .field("items", ValueType::list_of(ValueType::Record(item)))
            .field("notes", ValueType::map_of(ValueType::Text))
            .field("extra", ValueType::Any)
            .build();
        Types { order, customer }
    }

    #[test]
    fn null_navigator() {
        let reflection = Reflection::new();
        let mut null = Value::Null;
        let nav = reflection.navigator(&mut null);
        assert!(nav.is_null());
        assert_eq!(nav.wrapper().kind(), WrapperKind::Null);
        assert_eq!(nav.get_value("a.b"), Ok(None));
        assert_eq!(nav.getter_names(), Ok(vec![]));
        assert_eq!(nav.has_getter("a"), Ok(false));
        assert_eq!(nav.find_property("a", true), Ok(None));

        let ctx = reflection.context();
        let mut nav = Navigator::from_context(None, ctx);
        assert_eq!(nav.set_value("a.b", Value::Null), Ok(()));
        assert!(matches!(
            nav.set_value("a", 1),
            Err(ReflectionError::Unsupported { wrapper: WrapperKind::Null, .. })
        ));
        assert!(nav.add(1).is_err());
    }

    #[test]
    fn read_through_absence() {
        let t = types();
        let reflection = Reflection::new();
        let mut order = Value::Record(Record::new(&t.order));
        let nav = reflection.navigator(&mut order);

        assert_eq!(nav.get_value("customer.address.city"), Ok(None));
        assert_eq!(nav.get_value("items[0].price"), Ok(None));
        assert_eq!(nav.get_value("notes[k]"), Ok(None));
        assert_eq!(nav.get_value("extra.anything"), Ok(None));
        assert!(matches!(
            nav.get_value("nope.x"),
            Err(ReflectionError::NoSuchProperty { .. })
        ));
        assert!(matches!(
            nav.get_value("customer..x"),
            Err(ReflectionError::PathSyntax(_))
        ));
    }

    #[test]
    fn write_materialises() {
        let t = types();
        let reflection = Reflection::new();
        let mut order = Value::Record(Record::new(&t.order));
        let mut nav = reflection.navigator(&mut order);

        nav.set_value("customer.address.city", "Oslo").unwrap();
        assert_eq!(
            nav.get_value("customer.address.city"),
            Ok(Some(&Value::from("Oslo")))
        );
        let customer = nav.get_value("customer").unwrap().unwrap();
        assert_eq!(customer.as_record().unwrap().record_type(), &t.customer);

        nav.set_value("extra.color", "red").unwrap();
        assert_eq!(nav.get_value("extra.color"), Ok(Some(&Value::from("red"))));
        assert_eq!(
            nav.get_value("extra").unwrap().map(Value::kind),
            Some(crate::value::ValueKind::Map)
        );

        nav.set_value("notes[greeting]", "hi").unwrap();
        assert_eq!(nav.get_value("notes[greeting]"), Ok(Some(&Value::from("hi"))));
    }

    #[test]
    fn null_write_is_noop() {
        let t = types();
        let reflection = Reflection::new();
        let mut order = Value::Record(Record::new(&t.order));
        let mut nav = reflection.navigator(&mut order);

        nav.set_value("customer.userName", Value::Null).unwrap();
        assert_eq!(nav.get_value("customer"), Ok(None));
        nav.set_value("notes[k]", Value::Null).unwrap();
        assert_eq!(nav.get_value("notes"), Ok(None));
        drop(nav);
        assert_eq!(order, Value::Record(Record::new(&t.order)));
    }

    #[test]
    fn write_errors() {
        let t = types();
        let reflection = Reflection::new();
        let mut order = Value::Record(Record::new(&t.order));
        let mut nav = reflection.navigator(&mut order);

        assert!(matches!(
            nav.set_value("customer.id", 3),
            Err(ReflectionError::NotWritable { .. })
        ));
        assert!(matches!(
            nav.set_value("customer.userName", 3),
            Err(ReflectionError::TypeMismatch { .. })
        ));
        assert!(matches!(
            nav.set_value("customer.nick", "x"),
            Err(ReflectionError::NoSuchProperty { .. })
        ));
        assert!(matches!(
            nav.set_value("items[0].price", 1.0),
            Err(ReflectionError::IndexOutOfRange { index: 0, len: 0, .. })
        ));
    }

    #[test]
    fn map_round_trip() {
        let reflection = Reflection::new();
        let mut root = Value::Map(ValueMap::new());
        let mut nav = reflection.navigator(&mut root);

        nav.set_value("m[k]", 5).unwrap();
        assert_eq!(nav.get_value("m[k]"), Ok(Some(&Value::Int(5))));
        nav.set_value("a.b.c", true).unwrap();
        assert_eq!(nav.get_value("a.b.c"), Ok(Some(&Value::Bool(true))));
        assert_eq!(
            nav.getter_names(),
            Ok(vec![String::from("a"), String::from("m")])
        );
    }

    #[test]
    fn sequences_do_not_grow() {
        let reflection = Reflection::new();
        let mut root = Value::Map(ValueMap::new());
        let mut nav = reflection.navigator(&mut root);
        nav.set_value("list", Value::List(vec![Value::Int(1)])).unwrap();

        nav.set_value("list[0]", 7).unwrap();
        assert_eq!(
            nav.get_value("list"),
            Ok(Some(&Value::List(vec![Value::Int(7)])))
        );
        assert!(matches!(
            nav.set_value("list[2]", 9),
            Err(ReflectionError::IndexOutOfRange { index: 2, len: 1, .. })
        ));
        assert!(matches!(
            nav.get_value("list[2]"),
            Err(ReflectionError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn collections() {
        let reflection = Reflection::new();
        let mut list = Value::List(Vec::new());
        let mut nav = reflection.navigator(&mut list);

        assert!(nav.is_collection());
        nav.add(1).unwrap();
        nav.add_all([2, 3]).unwrap();
        assert!(matches!(
            nav.get_value("x"),
            Err(ReflectionError::Unsupported { wrapper: WrapperKind::Sequence, .. })
        ));
        drop(nav);
        assert_eq!(
            list,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );

        let mut map = Value::Map(ValueMap::new());
        let mut nav = reflection.navigator(&mut map);
        assert!(!nav.is_collection());
        assert!(matches!(
            nav.add(1),
            Err(ReflectionError::Unsupported { wrapper: WrapperKind::Map, .. })
        ));
    }

    #[test]
    fn introspection() {
        let t = types();
        let reflection = Reflection::new();
        let mut order = Value::Record(Record::new(&t.order));
        let mut nav = reflection.navigator(&mut order);

        assert_eq!(
            nav.find_property("customer.user_name", true),
            Ok(Some(String::from("customer.userName")))
        );
        assert_eq!(
            nav.find_property("customer.USERNAME", true),
            Ok(Some(String::from("customer.userName")))
        );
        assert_eq!(nav.find_property("customer.user_name", false), Ok(None));
        assert_eq!(nav.getter_type("customer.address.zipCode"), Ok(ValueType::Text));
        assert_eq!(nav.has_setter("customer.id"), Ok(false));
        assert_eq!(nav.has_getter("customer.id"), Ok(true));

        nav.set_value("extra.inner", Value::Float(1.0)).unwrap();
        assert_eq!(nav.getter_type("extra.inner"), Ok(ValueType::Float));
        assert_eq!(nav.getter_type("extra.other"), Ok(ValueType::Any));
        assert_eq!(
            nav.find_property("extra.some_key", true),
            Ok(Some(String::from("extra.some_key")))
        );
        assert_eq!(
            nav.getter_names(),
            Ok(vec![
                String::from("customer"),
                String::from("items"),
                String::from("notes"),
                String::from("extra"),
            ])
        );
    }

    #[test]
    fn property_navigators() {
        let t = types();
        let reflection = Reflection::new();
        let mut order = Value::Record(Record::new(&t.order));
        let mut nav = reflection.navigator(&mut order);
        nav.set_value("customer.userName", "ada").unwrap();

        let mut customer = nav.navigator_for_property("customer").unwrap();
        assert!(!customer.is_null());
        customer.set_value("address.city", "Rome").unwrap();
        assert!(nav.navigator_for_property("items").unwrap().is_null());

        assert_eq!(nav.get_value("customer.address.city"), Ok(Some(&Value::from("Rome"))));
        assert_eq!(nav.get_value("customer.userName"), Ok(Some(&Value::from("ada"))));
    }

    // Counts reads so tests can tell which wrapper served them.
    #[derive(Default)]
    struct Counting(core::sync::atomic::AtomicUsize);

    impl ObjectWrapper for Counting {
        fn get<'v>(
            &self,
            target: &'v Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<Option<&'v Value>, ReflectionError> {
            self.0.fetch_add(1, core::sync::atomic::Ordering::Relaxed);
            MapWrapper.get(target, seg, ctx)
        }

        fn get_mut<'v>(
            &self,
            target: &'v mut Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<Option<&'v mut Value>, ReflectionError> {
            MapWrapper.get_mut(target, seg, ctx)
        }

        fn set(
            &self,
            target: &mut Value,
            seg: &PathSegment<'_>,
            value: Value,
            ctx: MetaContext<'_>,
        ) -> Result<(), ReflectionError> {
            MapWrapper.set(target, seg, value, ctx)
        }

        fn find_property(
            &self,
            target: &Value,
            seg: &PathSegment<'_>,
            relaxed: bool,
            ctx: MetaContext<'_>,
        ) -> Result<Option<String>, ReflectionError> {
            MapWrapper.find_property(target, seg, relaxed, ctx)
        }

        fn getter_names(
            &self,
            target: &Value,
            ctx: MetaContext<'_>,
        ) -> Result<Vec<String>, ReflectionError> {
            MapWrapper.getter_names(target, ctx)
        }

        fn setter_names(
            &self,
            target: &Value,
            ctx: MetaContext<'_>,
        ) -> Result<Vec<String>, ReflectionError> {
            MapWrapper.setter_names(target, ctx)
        }

        fn getter_type(
            &self,
            target: &Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<ValueType, ReflectionError> {
            MapWrapper.getter_type(target, seg, ctx)
        }

        fn setter_type(
            &self,
            target: &Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<ValueType, ReflectionError> {
            MapWrapper.setter_type(target, seg, ctx)
        }

        fn has_getter(
            &self,
            target: &Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<bool, ReflectionError> {
            MapWrapper.has_getter(target, seg, ctx)
        }

        fn has_setter(
            &self,
            target: &Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<bool, ReflectionError> {
            MapWrapper.has_setter(target, seg, ctx)
        }

        fn is_collection(&self, _target: &Value) -> bool {
            false
        }

        fn add(&self, target: &mut Value, element: Value) -> Result<(), ReflectionError> {
            MapWrapper.add(target, element)
        }

        fn add_all(&self, target: &mut Value, elements: Vec<Value>) -> Result<(), ReflectionError> {
            MapWrapper.add_all(target, elements)
        }

        fn instantiate_property_value(
            &self,
            target: &mut Value,
            seg: &PathSegment<'_>,
            ctx: MetaContext<'_>,
        ) -> Result<(), ReflectionError> {
            MapWrapper.instantiate_property_value(target, seg, ctx)
        }
    }

    impl Counting {
        fn reads(&self) -> usize {
            self.0.load(core::sync::atomic::Ordering::Relaxed)
        }
    }

    struct ClaimsMaps(Arc<Counting>);

    impl ObjectWrapperFactory for ClaimsMaps {
        fn wrapper_for(&self, value: &Value) -> Option<Arc<dyn ObjectWrapper>> {
            match value {
                Value::Map(_) => Some(Arc::clone(&self.0) as Arc<dyn ObjectWrapper>),
                _ => None,
            }
        }
    }

    #[test]
    fn wrapped_values_keep_their_wrapper() {
        let counting = Arc::new(Counting::default());
        let mut inner = ValueMap::new();
        inner.insert("k".into(), Value::Int(1));
        let mut root = Value::wrapped(counting.clone(), inner);

        let reflection = Reflection::new();
        let mut nav = reflection.navigator(&mut root);
        assert_eq!(nav.wrapper().kind(), WrapperKind::Custom);
        assert_eq!(nav.get_value("k"), Ok(Some(&Value::Int(1))));
        nav.set_value("j", 2).unwrap();
        assert_eq!(nav.get_value("j"), Ok(Some(&Value::Int(2))));
        assert_eq!(counting.reads(), 2);
    }

    #[test]
    fn factory_claims_before_shape() {
        let counting = Arc::new(Counting::default());
        let descriptors = DescriptorCache::new();
        let wrappers = ClaimsMaps(counting.clone());
        let mut root = Value::Map(ValueMap::new());

        let mut nav = Navigator::for_object(
            Some(&mut root),
            &DefaultObjectFactory,
            &wrappers,
            &descriptors,
        );
        assert!(matches!(nav.wrapper(), Wrapper::Custom(_)));
        nav.set_value("a.b", 1).unwrap();
        assert_eq!(nav.get_value("a.b"), Ok(Some(&Value::Int(1))));
        assert_eq!(counting.reads(), 2);

        let plain = DefaultObjectWrapperFactory;
        assert!(!plain.has_wrapper_for(&root));
        assert!(wrappers.has_wrapper_for(&root));
    }

    #[test]
    fn descriptors_are_shared() {
        let t = types();
        let reflection = Reflection::new();
        for _ in 0..3 {
            let mut order = Value::Record(Record::new(&t.order));
            let mut nav = reflection.navigator(&mut order);
            nav.set_value("customer.userName", "x").unwrap();
        }
        assert_eq!(reflection.descriptors().introspection_count(), 2);

        let rebuilding = Reflection::builder()
            .descriptors(DescriptorCache::without_caching())
            .build();
        let mut order = Value::Record(Record::new(&t.order));
        let nav = rebuilding.navigator(&mut order);
        nav.get_value("customer").unwrap();
        nav.get_value("customer").unwrap();
        assert_eq!(rebuilding.descriptors().introspection_count(), 2);
    }

    #[test]
    fn same_named_types_keep_their_members() {
        let numeric = RecordType::builder("User")
            .field("age", ValueType::Int)
            .build();
        let textual = RecordType::builder("User")
            .field("age", ValueType::Text)
            .field("nick", ValueType::Text)
            .build();
        let reflection = Reflection::new();

        let mut first = Value::Record(Record::new(&numeric));
        reflection.navigator(&mut first).set_value("age", 7).unwrap();

        let mut second = Value::Record(Record::new(&textual));
        let mut nav = reflection.navigator(&mut second);
        assert!(matches!(
            nav.set_value("age", 7),
            Err(ReflectionError::TypeMismatch { .. })
        ));
        assert_eq!(nav.get_value("age"), Ok(None));
        nav.set_value("nick", "x").unwrap();
        assert_eq!(nav.get_value("nick"), Ok(Some(&Value::from("x"))));
        assert_eq!(nav.setter_type("age"), Ok(ValueType::Text));
    }
}

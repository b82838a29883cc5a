//! The collaborators navigation works with.

use alloc::boxed::Box;
use core::fmt;

use crate::descriptor::{DescriptorCache, TypeNavigator};
use crate::factory::{DefaultObjectFactory, ObjectFactory};
use crate::navigator::Navigator;
use crate::value::{Value, ValueType};
use crate::wrapper::{DefaultObjectWrapperFactory, ObjectWrapperFactory};

// -----------------------------------------------------------------------------
// MetaContext

/// Borrowed view of the three collaborators of a navigation.
///
/// Cheap to copy; every wrapper call receives one.
#[derive(Clone, Copy)]
pub struct MetaContext<'a> {
    object_factory: &'a dyn ObjectFactory,
    wrapper_factory: &'a dyn ObjectWrapperFactory,
    descriptors: &'a DescriptorCache,
}

impl<'a> MetaContext<'a> {
    #[inline]
    pub fn new(
        object_factory: &'a dyn ObjectFactory,
        wrapper_factory: &'a dyn ObjectWrapperFactory,
        descriptors: &'a DescriptorCache,
    ) -> Self {
        Self {
            object_factory,
            wrapper_factory,
            descriptors,
        }
    }

    /// Builds default values for lazy materialisation.
    #[inline]
    pub fn object_factory(&self) -> &'a dyn ObjectFactory {
        self.object_factory
    }

    /// Claims values for custom wrappers.
    #[inline]
    pub fn wrapper_factory(&self) -> &'a dyn ObjectWrapperFactory {
        self.wrapper_factory
    }

    /// Shared descriptors of record types.
    #[inline]
    pub fn descriptors(&self) -> &'a DescriptorCache {
        self.descriptors
    }
}

impl fmt::Debug for MetaContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetaContext")
            .field("descriptors", self.descriptors)
            .finish_non_exhaustive()
    }
}

// -----------------------------------------------------------------------------
// Reflection

/// Owns a set of collaborators and hands out navigators over them.
///
/// Not a global: create one where it is needed and share it by reference.
/// It is `Send + Sync`, so one instance may serve many threads, and the
/// descriptor cache it holds fills up as record types are met.
///
/// # Examples
///
/// ```
/// use mg_reflect::Reflection;
/// use mg_reflect::value::{Record, RecordType, Value, ValueType};
///
/// let address = RecordType::builder("Address")
///     .field("city", ValueType::Text)
///     .build();
/// let user = RecordType::builder("User")
///     .field("address", ValueType::Record(address))
///     .build();
///
/// let reflection = Reflection::new();
/// let mut root = Value::Record(Record::new(&user));
/// let mut nav = reflection.navigator(&mut root);
///
/// nav.set_value("address.city", "Oslo").unwrap();
/// assert_eq!(nav.get_value("address.city").unwrap(), Some(&Value::from("Oslo")));
/// ```
pub struct Reflection {
    object_factory: Box<dyn ObjectFactory>,
    wrapper_factory: Box<dyn ObjectWrapperFactory>,
    descriptors: DescriptorCache,
}

impl Reflection {
    /// Creates an instance with the default factories and an empty cache.
    pub fn new() -> Self {
        Self::builder().build()
    }

    #[inline]
    pub fn builder() -> ReflectionBuilder {
        ReflectionBuilder {
            object_factory: Box::new(DefaultObjectFactory),
            wrapper_factory: Box::new(DefaultObjectWrapperFactory),
            descriptors: DescriptorCache::new(),
        }
    }

    #[inline]
    pub fn context(&self) -> MetaContext<'_> {
        MetaContext::new(
            &*self.object_factory,
            &*self.wrapper_factory,
            &self.descriptors,
        )
    }

    /// A navigator over `object`.
    #[inline]
    pub fn navigator<'a>(&'a self, object: &'a mut Value) -> Navigator<'a> {
        Navigator::from_context(Some(object), self.context())
    }

    /// A navigator over the declared type `root`.
    #[inline]
    pub fn type_navigator(&self, root: ValueType) -> TypeNavigator<'_> {
        TypeNavigator::new(root, &self.descriptors)
    }

    #[inline]
    pub fn descriptors(&self) -> &DescriptorCache {
        &self.descriptors
    }
}

impl Default for Reflection {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reflection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reflection")
            .field("descriptors", &self.descriptors)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Reflection`], see [`Reflection::builder`].
pub struct ReflectionBuilder {
    object_factory: Box<dyn ObjectFactory>,
    wrapper_factory: Box<dyn ObjectWrapperFactory>,
    descriptors: DescriptorCache,
}

impl ReflectionBuilder {
    pub fn object_factory(mut self, factory: impl ObjectFactory + 'static) -> Self {
        self.object_factory = Box::new(factory);
        self
    }

    pub fn wrapper_factory(mut self, factory: impl ObjectWrapperFactory + 'static) -> Self {
        self.wrapper_factory = Box::new(factory);
        self
    }

    /// Replaces the descriptor cache, e.g. with
    /// [`DescriptorCache::without_caching`].
    pub fn descriptors(mut self, descriptors: DescriptorCache) -> Self {
        self.descriptors = descriptors;
        self
    }

    pub fn build(self) -> Reflection {
        Reflection {
            object_factory: self.object_factory,
            wrapper_factory: self.wrapper_factory,
            descriptors: self.descriptors,
        }
    }
}

impl fmt::Debug for ReflectionBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectionBuilder").finish_non_exhaustive()
    }
}

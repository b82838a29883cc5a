use alloc::sync::Arc;
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{PoisonError, RwLock};

use mg_utils::HashMap;

use super::TypeDescriptor;
use crate::value::RecordType;

/// Append-only registry of [`TypeDescriptor`]s keyed by [`RecordType`].
///
/// Types are matched by definition, not by name alone: two types that share
/// a name but declare different members get separate descriptors.
///
/// Lookups take a read lock. On a miss the descriptor is built outside any
/// lock and then published under the write lock; if another thread got
/// there first, its descriptor wins and ours is dropped. Entries are never
/// replaced or evicted.
///
/// # Examples
///
/// ```
/// use mg_reflect::descriptor::DescriptorCache;
/// use mg_reflect::value::{RecordType, ValueType};
///
/// let ty = RecordType::builder("Point").field("x", ValueType::Int).build();
/// let cache = DescriptorCache::new();
///
/// let a = cache.descriptor(&ty);
/// let b = cache.descriptor(&ty);
/// assert_eq!(a, b);
/// assert_eq!(cache.introspection_count(), 1);
/// ```
pub struct DescriptorCache {
    caching: bool,
    entries: RwLock<HashMap<RecordType, Arc<TypeDescriptor>>>,
    introspections: AtomicUsize,
}

impl DescriptorCache {
    /// Creates an empty cache.
    pub const fn new() -> Self {
        Self {
            caching: true,
            entries: RwLock::new(mg_utils::hash::new_map()),
            introspections: AtomicUsize::new(0),
        }
    }

    /// Creates a cache that never stores anything.
    ///
    /// Every request introspects the type again.
    pub const fn without_caching() -> Self {
        Self {
            caching: false,
            entries: RwLock::new(mg_utils::hash::new_map()),
            introspections: AtomicUsize::new(0),
        }
    }

    #[inline]
    pub fn is_caching(&self) -> bool {
        self.caching
    }

    /// Returns the descriptor of `ty`, building it on first request.
    pub fn descriptor(&self, ty: &RecordType) -> Arc<TypeDescriptor> {
        if !self.caching {
            return Arc::new(self.introspect(ty));
        }

        if let Some(desc) = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(ty)
        {
            return Arc::clone(desc);
        }

        let built = Arc::new(self.introspect(ty));

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(entries.entry(ty.clone()).or_insert(built))
    }

    /// Returns `true` if a descriptor for `ty` is stored.
    pub fn is_cached(&self, ty: &RecordType) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(ty)
    }

    /// Number of stored descriptors.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// How many times a type has been introspected by this cache.
    ///
    /// Racing first requests for the same type may each introspect it, so
    /// this can exceed [`len`](Self::len).
    #[inline]
    pub fn introspection_count(&self) -> usize {
        self.introspections.load(Ordering::Relaxed)
    }

    fn introspect(&self, ty: &RecordType) -> TypeDescriptor {
        self.introspections.fetch_add(1, Ordering::Relaxed);
        TypeDescriptor::introspect(ty)
    }
}

impl Default for DescriptorCache {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DescriptorCache")
            .field("caching", &self.caching)
            .field("len", &self.len())
            .field("introspections", &self.introspection_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use super::DescriptorCache;
    use crate::value::{RecordType, ValueType};

    #[test]
    fn memoized() {
        let ty = RecordType::builder("Order")
            .field("id", ValueType::Int)
            .build();
        let cache = DescriptorCache::new();
        assert!(!cache.is_cached(&ty));

        let a = cache.descriptor(&ty);
        let b = cache.descriptor(&ty);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.introspection_count(), 1);
        assert!(cache.is_cached(&ty));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn without_caching() {
        let ty = RecordType::builder("Order")
            .field("id", ValueType::Int)
            .build();
        let cache = DescriptorCache::without_caching();

        let a = cache.descriptor(&ty);
        let b = cache.descriptor(&ty);
        assert_eq!(a, b);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(cache.introspection_count(), 2);
        assert!(cache.is_empty());
    }

    #[test]
    fn same_name_different_members() {
        let first = RecordType::builder("User")
            .field("age", ValueType::Int)
            .build();
        let second = RecordType::builder("User")
            .field("age", ValueType::Text)
            .field("nick", ValueType::Text)
            .build();
        let rebuilt = RecordType::builder("User")
            .field("age", ValueType::Int)
            .build();
        let cache = DescriptorCache::new();

        let a = cache.descriptor(&first);
        let b = cache.descriptor(&second);
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(a.setter_type("age"), Some(&ValueType::Int));
        assert_eq!(b.setter_type("age"), Some(&ValueType::Text));
        assert!(b.has_setter("nick"));
        assert_eq!(cache.len(), 2);

        // Same name and members: shares the first descriptor.
        assert!(Arc::ptr_eq(&a, &cache.descriptor(&rebuilt)));
        assert_eq!(cache.introspection_count(), 2);
    }

    #[test]
    fn concurrent_population() {
        let types: Vec<RecordType> = (0..4)
            .map(|i| {
                RecordType::builder(format!("T{i}"))
                    .field("value", ValueType::Int)
                    .build()
            })
            .collect();
        let cache = DescriptorCache::new();

        let results: Vec<Vec<_>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| types.iter().map(|t| cache.descriptor(t)).collect::<Vec<_>>()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(cache.len(), types.len());
        for per_thread in &results {
            for (desc, ty) in per_thread.iter().zip(&types) {
                assert_eq!(desc.name(), ty.name());
                assert_eq!(**desc, *cache.descriptor(ty));
            }
        }
        assert!(cache.introspection_count() >= types.len());
    }
}

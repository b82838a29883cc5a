use alloc::string::{String, ToString};

use super::DescriptorCache;
use crate::ReflectionError;
use crate::path::PathSegment;
use crate::value::ValueType;

/// Which accessor a terminal segment is resolved through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Accessor {
    Getter,
    Setter,
}

/// Resolves nested property paths against declared types.
///
/// No instance is involved: every step looks at the declared type of the
/// previous one. Intermediate segments go through getters, the terminal
/// segment through the requested accessor. Indexed segments step into the
/// element type of a list or map. Reaching [`ValueType::Any`] ends static
/// resolution and yields `Any`.
///
/// # Examples
///
/// ```
/// use mg_reflect::descriptor::{DescriptorCache, TypeNavigator};
/// use mg_reflect::value::{RecordType, ValueType};
///
/// let address = RecordType::builder("Address")
///     .field("zipCode", ValueType::Text)
///     .build();
/// let user = RecordType::builder("User")
///     .field("addresses", ValueType::list_of(ValueType::Record(address)))
///     .build();
///
/// let cache = DescriptorCache::new();
/// let nav = TypeNavigator::new(ValueType::Record(user), &cache);
///
/// assert_eq!(nav.getter_type("addresses[0].zipCode").unwrap(), ValueType::Text);
/// assert_eq!(
///     nav.find_property("addresses[0].zip_code", true).unwrap().as_deref(),
///     Some("addresses[0].zipCode"),
/// );
/// assert!(!nav.has_setter("addresses[0].city").unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct TypeNavigator<'a> {
    root: ValueType,
    descriptors: &'a DescriptorCache,
}

impl<'a> TypeNavigator<'a> {
    #[inline]
    pub fn new(root: ValueType, descriptors: &'a DescriptorCache) -> Self {
        Self { root, descriptors }
    }

    #[inline]
    pub fn root(&self) -> &ValueType {
        &self.root
    }

    /// Declared type read through `path`.
    pub fn getter_type(&self, path: &str) -> Result<ValueType, ReflectionError> {
        self.resolve(&PathSegment::parse(path)?, Accessor::Getter)
    }

    /// Declared type written through `path`.
    pub fn setter_type(&self, path: &str) -> Result<ValueType, ReflectionError> {
        self.resolve(&PathSegment::parse(path)?, Accessor::Setter)
    }

    /// Returns `true` if `path` resolves to a readable property.
    ///
    /// Only a malformed path is an error.
    pub fn has_getter(&self, path: &str) -> Result<bool, ReflectionError> {
        let seg = PathSegment::parse(path)?;
        Ok(self.resolve(&seg, Accessor::Getter).is_ok())
    }

    /// Returns `true` if `path` resolves to a writable property.
    pub fn has_setter(&self, path: &str) -> Result<bool, ReflectionError> {
        let seg = PathSegment::parse(path)?;
        Ok(self.resolve(&seg, Accessor::Setter).is_ok())
    }

    /// Canonical spelling of `path`, see
    /// [`TypeDescriptor::find_property`](super::TypeDescriptor::find_property).
    ///
    /// Index suffixes are kept, so the result is itself a valid path.
    pub fn find_property(
        &self,
        path: &str,
        relaxed: bool,
    ) -> Result<Option<String>, ReflectionError> {
        let seg = PathSegment::parse(path)?;
        Ok(self.canonical(&seg, relaxed))
    }

    pub(crate) fn resolve(
        &self,
        seg: &PathSegment<'_>,
        accessor: Accessor,
    ) -> Result<ValueType, ReflectionError> {
        let mut current = self.root.clone();
        let mut seg = *seg;
        loop {
            if current == ValueType::Any {
                return Ok(ValueType::Any);
            }
            let accessor = if seg.has_next() { Accessor::Getter } else { accessor };
            current = self.step(&current, &seg, accessor)?;
            match seg.next_segment() {
                Some(next) => seg = next,
                None => return Ok(current),
            }
        }
    }

    pub(crate) fn canonical(&self, seg: &PathSegment<'_>, relaxed: bool) -> Option<String> {
        let mut current = self.root.clone();
        let mut seg = *seg;
        let mut out = String::new();
        loop {
            if !out.is_empty() {
                out.push('.');
            }
            let name = match &current {
                ValueType::Record(ty) => {
                    let desc = self.descriptors.descriptor(ty);
                    let name = desc.find_property(seg.name(), relaxed)?;
                    current = desc
                        .getter_type(name)
                        .or_else(|| desc.setter_type(name))
                        .cloned()
                        .unwrap_or_default();
                    name.to_string()
                }
                ValueType::Map(element) => {
                    current = (**element).clone();
                    seg.name().to_string()
                }
                ValueType::Any => seg.name().to_string(),
                _ => return None,
            };
            out.push_str(&name);
            if seg.index().is_some() {
                out.push_str(&seg.indexed_name()[seg.name().len()..]);
                current = current.element_type()?.clone();
            }
            match seg.next_segment() {
                Some(next) => seg = next,
                None => return Some(out),
            }
        }
    }

    /// Type of `seg` on a value of type `owner`.
    fn step(
        &self,
        owner: &ValueType,
        seg: &PathSegment<'_>,
        accessor: Accessor,
    ) -> Result<ValueType, ReflectionError> {
        let declared = match owner {
            ValueType::Record(ty) => {
                let desc = self.descriptors.descriptor(ty);
                match accessor {
                    Accessor::Getter => desc.require_getter(seg.name())?.clone(),
                    Accessor::Setter if seg.index().is_some() => {
                        desc.require_getter(seg.name())?.clone()
                    }
                    Accessor::Setter => desc.require_setter(seg.name())?.clone(),
                }
            }
            ValueType::Map(element) => (**element).clone(),
            ValueType::Any => ValueType::Any,
            other => {
                return Err(ReflectionError::NoSuchProperty {
                    owner: other.to_string().into(),
                    property: seg.name().into(),
                });
            }
        };
        if seg.index().is_none() {
            return Ok(declared);
        }
        match declared.element_type() {
            Some(element) => Ok(element.clone()),
            None => Err(ReflectionError::type_mismatch(
                seg.indexed_name(),
                "list or map",
                declared.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeNavigator;
    use crate::ReflectionError;
    use crate::descriptor::DescriptorCache;
    use crate::value::{RecordType, ValueType};

    fn order() -> RecordType {
        let item = RecordType::builder("Item")
            .field("price", ValueType::Float)
            .getter("sku", ValueType::Text)
            .build();
        RecordType::builder("Order")
            .field("items", ValueType::list_of(ValueType::Record(item)))
            .field("tags", ValueType::map_of(ValueType::Text))
            .field("extra", ValueType::Any)
            .field("count", ValueType::Int)
            .build()
    }

    fn item_type(nav: &TypeNavigator<'_>) -> RecordType {
        match nav.getter_type("items[0]") {
            Ok(ValueType::Record(ty)) => ty,
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn nested_types() {
        let cache = DescriptorCache::new();
        let nav = TypeNavigator::new(ValueType::Record(order()), &cache);

        assert_eq!(nav.getter_type("items[0].price"), Ok(ValueType::Float));
        assert_eq!(nav.getter_type("tags[k]"), Ok(ValueType::Text));
        assert_eq!(nav.getter_type("extra.anything.at[3]"), Ok(ValueType::Any));
        assert_eq!(
            nav.setter_type("items[0]"),
            Ok(ValueType::Record(item_type(&nav)))
        );
    }

    #[test]
    fn accessors_and_errors() {
        let cache = DescriptorCache::new();
        let nav = TypeNavigator::new(ValueType::Record(order()), &cache);

        assert_eq!(nav.has_getter("items[0].sku"), Ok(true));
        assert_eq!(nav.has_setter("items[0].sku"), Ok(false));
        assert_eq!(nav.has_setter("items[0].price"), Ok(true));
        assert_eq!(nav.has_getter("nope"), Ok(false));
        assert!(matches!(
            nav.setter_type("items[0].sku"),
            Err(ReflectionError::NotWritable { .. })
        ));
        assert!(matches!(
            nav.getter_type("count[0]"),
            Err(ReflectionError::TypeMismatch { .. })
        ));
        assert!(matches!(
            nav.getter_type("count.x"),
            Err(ReflectionError::NoSuchProperty { .. })
        ));
        assert!(matches!(
            nav.getter_type("items[0"),
            Err(ReflectionError::PathSyntax(_))
        ));
    }

    #[test]
    fn canonical_paths() {
        let cache = DescriptorCache::new();
        let nav = TypeNavigator::new(ValueType::Record(order()), &cache);

        assert_eq!(
            nav.find_property("ITEMS[1].Price", true).unwrap().as_deref(),
            Some("items[1].price")
        );
        assert_eq!(
            nav.find_property("tags[a].whatever", false).unwrap(),
            None
        );
        assert_eq!(
            nav.find_property("extra.some_key", false).unwrap().as_deref(),
            Some("extra.some_key")
        );
        assert_eq!(nav.find_property("items[1].Price", false).unwrap(), None);
    }
}

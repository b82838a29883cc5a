use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use mg_utils::HashMap;

use crate::ReflectionError;
use crate::path::is_identifier;
use crate::value::{RecordType, ValueType};

/// Readable and writable properties of one record type.
///
/// Immutable once built. Names keep declaration order; a member declared
/// more than once with the same type is merged, a conflicting redeclaration
/// is skipped.
///
/// # Examples
///
/// ```
/// use mg_reflect::descriptor::TypeDescriptor;
/// use mg_reflect::value::{RecordType, ValueType};
///
/// let ty = RecordType::builder("User")
///     .field("userName", ValueType::Text)
///     .getter("id", ValueType::Int)
///     .build();
/// let desc = TypeDescriptor::introspect(&ty);
///
/// assert!(desc.readable_names().eq(["userName", "id"]));
/// assert!(desc.writable_names().eq(["userName"]));
/// assert_eq!(desc.find_property("user_name", true), Some("userName"));
/// assert_eq!(desc.find_property("user_name", false), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    name: Box<str>,
    getters: HashMap<Box<str>, ValueType>,
    setters: HashMap<Box<str>, ValueType>,
    readable: Vec<Box<str>>,
    writable: Vec<Box<str>>,
    relaxed: HashMap<Box<str>, Box<str>>,
}

/// Key of the relaxed name index: uppercase with `_` removed.
fn relaxed_key(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_')
        .flat_map(char::to_uppercase)
        .collect()
}

impl TypeDescriptor {
    /// A descriptor without any property.
    ///
    /// Used for values that have no declared members, such as scalars.
    pub fn opaque(name: impl Into<Box<str>>) -> Self {
        Self {
            name: name.into(),
            getters: HashMap::default(),
            setters: HashMap::default(),
            readable: Vec::new(),
            writable: Vec::new(),
            relaxed: HashMap::default(),
        }
    }

    /// Builds the descriptor of `ty` from its declared members.
    ///
    /// Members that cannot be described are skipped with a warning:
    /// invalid names, members with no access, and redeclarations whose
    /// type conflicts with an earlier one.
    pub fn introspect(ty: &RecordType) -> Self {
        let mut desc = Self::opaque(ty.name());

        for member in ty.members() {
            let name = member.name();
            if !is_identifier(name) {
                log::warn!("Skip member `{name}` of `{}`: not an identifier", ty.name());
                continue;
            }
            if member.access().is_empty() {
                log::warn!("Skip member `{name}` of `{}`: no access", ty.name());
                continue;
            }
            let declared = desc.getters.get(name).or_else(|| desc.setters.get(name));
            if declared.is_some_and(|t| t != member.value_type()) {
                log::warn!(
                    "Skip member `{name}` of `{}`: conflicting redeclaration as {}",
                    ty.name(),
                    member.value_type(),
                );
                continue;
            }

            if member.is_readable() && !desc.getters.contains_key(name) {
                desc.getters.insert(name.into(), member.value_type().clone());
                desc.readable.push(name.into());
            }
            if member.is_writable() && !desc.setters.contains_key(name) {
                desc.setters.insert(name.into(), member.value_type().clone());
                desc.writable.push(name.into());
            }
            desc.relaxed
                .entry(relaxed_key(name).into_boxed_str())
                .or_insert_with(|| name.into());
        }

        log::debug!(
            "Built descriptor of `{}` with {} readable and {} writable properties",
            desc.name,
            desc.readable.len(),
            desc.writable.len(),
        );
        desc
    }

    /// Name of the described type.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves `name` to the canonical property name.
    ///
    /// Exact match first; with `relaxed`, falls back to a lookup that
    /// ignores case and underscores, so `user_name` and `USERNAME` both
    /// find `userName`.
    pub fn find_property(&self, name: &str, relaxed: bool) -> Option<&str> {
        if let Some((key, _)) = self
            .getters
            .get_key_value(name)
            .or_else(|| self.setters.get_key_value(name))
        {
            return Some(&**key);
        }
        if relaxed {
            return self.relaxed.get(relaxed_key(name).as_str()).map(|n| &**n);
        }
        None
    }

    /// Readable property names in declaration order.
    pub fn readable_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.readable.iter().map(|n| &**n)
    }

    /// Writable property names in declaration order.
    pub fn writable_names(&self) -> impl ExactSizeIterator<Item = &str> + '_ {
        self.writable.iter().map(|n| &**n)
    }

    #[inline]
    pub fn has_getter(&self, name: &str) -> bool {
        self.getters.contains_key(name)
    }

    #[inline]
    pub fn has_setter(&self, name: &str) -> bool {
        self.setters.contains_key(name)
    }

    #[inline]
    pub fn getter_type(&self, name: &str) -> Option<&ValueType> {
        self.getters.get(name)
    }

    #[inline]
    pub fn setter_type(&self, name: &str) -> Option<&ValueType> {
        self.setters.get(name)
    }

    /// The declared type of readable property `name`.
    ///
    /// Fails with `NotReadable` if only a setter exists and with
    /// `NoSuchProperty` if the property is unknown.
    pub fn require_getter(&self, name: &str) -> Result<&ValueType, ReflectionError> {
        match self.getters.get(name) {
            Some(ty) => Ok(ty),
            None if self.setters.contains_key(name) => Err(ReflectionError::NotReadable {
                owner: self.name.clone(),
                property: name.into(),
            }),
            None => Err(self.no_such_property(name)),
        }
    }

    /// The declared type of writable property `name`.
    ///
    /// Fails with `NotWritable` if only a getter exists and with
    /// `NoSuchProperty` if the property is unknown.
    pub fn require_setter(&self, name: &str) -> Result<&ValueType, ReflectionError> {
        match self.setters.get(name) {
            Some(ty) => Ok(ty),
            None if self.getters.contains_key(name) => Err(ReflectionError::NotWritable {
                owner: self.name.clone(),
                property: name.into(),
            }),
            None => Err(self.no_such_property(name)),
        }
    }

    pub(crate) fn no_such_property(&self, name: &str) -> ReflectionError {
        ReflectionError::NoSuchProperty {
            owner: self.name.clone(),
            property: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::TypeDescriptor;
    use crate::ReflectionError;
    use crate::value::{Access, Member, RecordType, ValueType};

    fn account() -> RecordType {
        RecordType::builder("Account")
            .field("owner", ValueType::Text)
            .getter("balance", ValueType::Float)
            .setter("password", ValueType::Text)
            .build()
    }

    #[test]
    fn accessors() {
        let desc = TypeDescriptor::introspect(&account());

        assert!(desc.has_getter("owner") && desc.has_setter("owner"));
        assert!(desc.has_getter("balance") && !desc.has_setter("balance"));
        assert!(!desc.has_getter("password") && desc.has_setter("password"));

        assert_eq!(desc.require_getter("balance"), Ok(&ValueType::Float));
        assert!(matches!(
            desc.require_getter("password"),
            Err(ReflectionError::NotReadable { .. })
        ));
        assert!(matches!(
            desc.require_setter("balance"),
            Err(ReflectionError::NotWritable { .. })
        ));
        assert!(matches!(
            desc.require_setter("missing"),
            Err(ReflectionError::NoSuchProperty { .. })
        ));
    }

    #[test]
    fn relaxed_lookup() {
        let ty = RecordType::builder("User")
            .field("userName", ValueType::Text)
            .build();
        let desc = TypeDescriptor::introspect(&ty);

        assert_eq!(desc.find_property("userName", false), Some("userName"));
        assert_eq!(desc.find_property("user_name", true), Some("userName"));
        assert_eq!(desc.find_property("USERNAME", true), Some("userName"));
        assert_eq!(desc.find_property("USERNAME", false), None);
        assert_eq!(desc.find_property("nick", true), None);
    }

    #[test]
    fn skips_bad_members() {
        let ty = RecordType::builder("Odd")
            .field("ok", ValueType::Int)
            .member(Member::new("not valid", ValueType::Int, Access::READ_WRITE))
            .member(Member::new("hidden", ValueType::Int, Access::empty()))
            .field("ok", ValueType::Text)
            .getter("merged", ValueType::Bool)
            .setter("merged", ValueType::Bool)
            .build();
        let desc = TypeDescriptor::introspect(&ty);

        assert!(desc.readable_names().eq(["ok", "merged"]));
        assert!(desc.writable_names().eq(["ok", "merged"]));
        assert_eq!(desc.getter_type("ok"), Some(&ValueType::Int));
        assert!(!desc.has_getter("hidden"));
    }
}

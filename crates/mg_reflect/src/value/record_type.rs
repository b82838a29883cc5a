use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use core::hash::{Hash, Hasher};

use bitflags::bitflags;

use crate::value::ValueType;

// -----------------------------------------------------------------------------
// Access

bitflags! {
    /// How a record member may be accessed through a property path.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Access: u8 {
        const READ = 1;
        const WRITE = 1 << 1;
        const READ_WRITE = Self::READ.bits() | Self::WRITE.bits();
    }
}

// -----------------------------------------------------------------------------
// Member

/// A declared member of a [`RecordType`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    name: Box<str>,
    ty: ValueType,
    access: Access,
}

impl Member {
    #[inline]
    pub fn new(name: impl Into<Box<str>>, ty: ValueType, access: Access) -> Self {
        Self {
            name: name.into(),
            ty,
            access,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared type of the member.
    #[inline]
    pub fn value_type(&self) -> &ValueType {
        &self.ty
    }

    #[inline]
    pub fn access(&self) -> Access {
        self.access
    }

    #[inline]
    pub fn is_readable(&self) -> bool {
        self.access.contains(Access::READ)
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.access.contains(Access::WRITE)
    }
}

// -----------------------------------------------------------------------------
// RecordType

struct RecordDef {
    name: Box<str>,
    members: Box<[Member]>,
}

/// The concrete runtime type of a [`Record`](crate::value::Record).
///
/// Cheap to clone; all clones share one definition. Two types are equal
/// when they share a definition or declare the same name and members, so
/// same-named types with different members stay distinct.
///
/// # Examples
///
/// ```
/// use mg_reflect::value::{Access, RecordType, ValueType};
///
/// let ty = RecordType::builder("Account")
///     .field("owner", ValueType::Text)
///     .getter("balance", ValueType::Float)
///     .setter("password", ValueType::Text)
///     .build();
///
/// assert_eq!(ty.name(), "Account");
/// assert_eq!(ty.members().len(), 3);
/// assert_eq!(ty.member("balance").unwrap().access(), Access::READ);
/// ```
#[derive(Clone)]
pub struct RecordType(Arc<RecordDef>);

impl RecordType {
    #[inline]
    pub fn builder(name: impl Into<Box<str>>) -> RecordTypeBuilder {
        RecordTypeBuilder {
            name: name.into(),
            members: Vec::new(),
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Members in declaration order, including ones that introspection
    /// may later reject.
    #[inline]
    pub fn members(&self) -> &[Member] {
        &self.0.members
    }

    /// The first member declared with `name`.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.0.members.iter().find(|m| m.name() == name)
    }

    /// Position of the first member declared with `name`.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.0.members.iter().position(|m| m.name() == name)
    }
}

impl PartialEq for RecordType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
            || (self.0.name == other.0.name && self.0.members == other.0.members)
    }
}

impl Eq for RecordType {}

impl Hash for RecordType {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.name.hash(state);
    }
}

impl fmt::Debug for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RecordType").field(&self.name()).finish()
    }
}

impl fmt::Display for RecordType {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Builder for [`RecordType`], see [`RecordType::builder`].
#[derive(Debug, Clone)]
pub struct RecordTypeBuilder {
    name: Box<str>,
    members: Vec<Member>,
}

impl RecordTypeBuilder {
    /// Adds a readable and writable member.
    #[inline]
    pub fn field(self, name: impl Into<Box<str>>, ty: ValueType) -> Self {
        self.member(Member::new(name, ty, Access::READ_WRITE))
    }

    /// Adds a read-only member.
    #[inline]
    pub fn getter(self, name: impl Into<Box<str>>, ty: ValueType) -> Self {
        self.member(Member::new(name, ty, Access::READ))
    }

    /// Adds a write-only member.
    #[inline]
    pub fn setter(self, name: impl Into<Box<str>>, ty: ValueType) -> Self {
        self.member(Member::new(name, ty, Access::WRITE))
    }

    #[inline]
    pub fn member(mut self, member: Member) -> Self {
        self.members.push(member);
        self
    }

    pub fn build(self) -> RecordType {
        RecordType(Arc::new(RecordDef {
            name: self.name,
            members: self.members.into_boxed_slice(),
        }))
    }
}

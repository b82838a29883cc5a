//! Structural descriptors of record types.
//!
//! A [`TypeDescriptor`] lists which properties of a [`RecordType`] are
//! readable or writable and their declared [`ValueType`]s. Descriptors are
//! built once per type name and shared through a [`DescriptorCache`].
//!
//! [`TypeNavigator`] walks nested property paths using declared types
//! only, without any instance at hand.
//!
//! [`RecordType`]: crate::value::RecordType
//! [`ValueType`]: crate::value::ValueType

// -----------------------------------------------------------------------------
// Modules

mod cache;
mod type_descriptor;
mod type_navigator;

// -----------------------------------------------------------------------------
// Exports

pub use cache::DescriptorCache;
pub use type_descriptor::TypeDescriptor;
pub use type_navigator::TypeNavigator;

pub(crate) use type_navigator::Accessor;

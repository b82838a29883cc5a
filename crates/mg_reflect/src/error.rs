use alloc::boxed::Box;

use thiserror::Error;

use crate::path::PathError;
use crate::wrapper::WrapperKind;

// -----------------------------------------------------------------------------
// Error

/// An error raised by one navigation step.
///
/// Every error aborts the whole `get_value` / `set_value` call; there is no
/// partial result. Reading or writing through an absent intermediate is not
/// an error and never produces one of these.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReflectionError {
    #[error(transparent)]
    PathSyntax(#[from] PathError),

    #[error("There is no property named `{property}` in `{owner}`")]
    NoSuchProperty { owner: Box<str>, property: Box<str> },

    #[error("Property `{property}` of `{owner}` has no getter")]
    NotReadable { owner: Box<str>, property: Box<str> },

    #[error("Property `{property}` of `{owner}` has no setter")]
    NotWritable { owner: Box<str>, property: Box<str> },

    #[error("Type mismatch on `{property}`: expected {expected}, found {actual}")]
    TypeMismatch {
        property: Box<str>,
        expected: Box<str>,
        actual: Box<str>,
    },

    #[error("Index {index} is out of range for `{property}` with length {len}")]
    IndexOutOfRange {
        property: Box<str>,
        index: usize,
        len: usize,
    },

    #[error("`{operation}` is not supported by a {wrapper} wrapper")]
    Unsupported {
        operation: &'static str,
        wrapper: WrapperKind,
    },

    #[error("Cannot instantiate a value of type {ty}: {reason}")]
    Instantiation { ty: Box<str>, reason: Box<str> },
}

impl ReflectionError {
    #[inline]
    pub(crate) fn unsupported(operation: &'static str, wrapper: WrapperKind) -> Self {
        Self::Unsupported { operation, wrapper }
    }

    pub(crate) fn type_mismatch(
        property: &str,
        expected: impl Into<Box<str>>,
        actual: impl Into<Box<str>>,
    ) -> Self {
        Self::TypeMismatch {
            property: property.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

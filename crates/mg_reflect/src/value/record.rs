use alloc::boxed::Box;
use alloc::vec;

use crate::value::{RecordType, Value};

/// An instance of a [`RecordType`]: one slot per declared member.
///
/// Slots start as [`Value::Null`]. The record itself does not enforce
/// member access or declared types; that is the job of the navigation
/// layer, which consults the type's descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    ty: RecordType,
    values: Box<[Value]>,
}

impl Record {
    /// Creates a record with every slot set to [`Value::Null`].
    pub fn new(ty: &RecordType) -> Self {
        Self {
            ty: ty.clone(),
            values: vec![Value::Null; ty.members().len()].into_boxed_slice(),
        }
    }

    #[inline]
    pub fn record_type(&self) -> &RecordType {
        &self.ty
    }

    /// The raw slot for `name`, `Null` included.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(self.ty.index_of(name)?)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Value> {
        let index = self.ty.index_of(name)?;
        self.values.get_mut(index)
    }

    /// Stores `value` in the slot for `name`.
    ///
    /// Returns `false` if the type declares no such member.
    pub fn put(&mut self, name: &str, value: impl Into<Value>) -> bool {
        match self.get_mut(name) {
            Some(slot) => {
                *slot = value.into();
                true
            }
            None => false,
        }
    }

    /// Builder-style [`put`](Self::put).
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        if !self.put(name, value) {
            log::warn!("`{}` has no member named `{name}`", self.ty.name());
        }
        self
    }

    /// Iterates `(member name, slot)` pairs in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.ty
            .members()
            .iter()
            .map(|m| m.name())
            .zip(self.values.iter())
    }
}

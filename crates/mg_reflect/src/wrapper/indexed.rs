//! Secondary lookups through the `[index]` of a segment.
//!
//! The container is the value of the segment's name. Lists take a 0-based
//! position; maps take the bracket content as an opaque key.

use crate::ReflectionError;
use crate::path::PathSegment;
use crate::value::Value;

fn position(seg: &PathSegment<'_>, key: &str, len: usize) -> Result<usize, ReflectionError> {
    let index = match key.parse::<usize>() {
        Ok(index) => index,
        // Digits too large for `usize` are past the end of any list.
        Err(_) if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) => usize::MAX,
        Err(_) => {
            return Err(ReflectionError::type_mismatch(seg.indexed_name(), "a list index", key));
        }
    };
    if index < len {
        Ok(index)
    } else {
        Err(ReflectionError::IndexOutOfRange {
            property: seg.name().into(),
            index,
            len,
        })
    }
}

fn not_a_container(seg: &PathSegment<'_>, found: &Value) -> ReflectionError {
    ReflectionError::type_mismatch(seg.indexed_name(), "list or map", found.kind().name())
}

pub(super) fn get<'v>(
    container: &'v Value,
    seg: &PathSegment<'_>,
) -> Result<Option<&'v Value>, ReflectionError> {
    let key = seg.index().unwrap_or_default();
    match container {
        Value::List(items) => Ok(items[position(seg, key, items.len())?].present()),
        Value::Map(map) => Ok(map.get(key).and_then(Value::present)),
        Value::Wrapped(w) => get(w.value(), seg),
        other => Err(not_a_container(seg, other)),
    }
}

pub(super) fn get_mut<'v>(
    container: &'v mut Value,
    seg: &PathSegment<'_>,
) -> Result<Option<&'v mut Value>, ReflectionError> {
    let key = seg.index().unwrap_or_default();
    match container {
        Value::List(items) => {
            let index = position(seg, key, items.len())?;
            Ok(items[index].present_mut())
        }
        Value::Map(map) => Ok(map.get_mut(key).and_then(Value::present_mut)),
        Value::Wrapped(w) => get_mut(w.value_mut(), seg),
        other => Err(not_a_container(seg, other)),
    }
}

/// Stores `value` in the container. Lists never grow.
pub(super) fn set(
    container: &mut Value,
    seg: &PathSegment<'_>,
    value: Value,
) -> Result<(), ReflectionError> {
    let key = seg.index().unwrap_or_default();
    match container {
        Value::List(items) => {
            let index = position(seg, key, items.len())?;
            items[index] = value;
            Ok(())
        }
        Value::Map(map) => {
            map.insert(key.into(), value);
            Ok(())
        }
        Value::Wrapped(w) => set(w.value_mut(), seg, value),
        other => Err(not_a_container(seg, other)),
    }
}

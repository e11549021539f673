//! Reading and writing values at a path.

use super::path::Path;
use super::segment::Segment;
use crate::error::TreeError;
use crate::value::{Map, Value};
use tracing::{debug, trace};

/// Most `Null` entries a single write may add to pad a list up to its index.
pub const MAX_LIST_GAP: usize = 1 << 16;

/// Returns the value at `path`, or `None` if any step is absent.
///
/// A string path that names a key of a map root directly wins over
/// segment-wise descent, so a key literally called `"a.b"` is found before
/// `a` then `b` is tried. A path without segments addresses nothing.
pub fn get<'v>(root: &'v Value, path: &Path) -> Option<&'v Value> {
    if let (Some(raw), Value::Map(map)) = (path.raw(), root) {
        if let Some(found) = map.get(raw) {
            return Some(found);
        }
    }

    let segments = path.resolved();
    if segments.is_empty() {
        return None;
    }

    let mut current = root;
    for segment in &segments {
        current = child(current, segment)?;
    }
    Some(current)
}

fn child<'v>(node: &'v Value, segment: &Segment) -> Option<&'v Value> {
    match node {
        Value::Map(map) => map.get(&segment.to_key()),
        Value::List(list) => segment.as_index().and_then(|i| list.get(i)),
        _ => None,
    }
}

/// Writes `value` at `path`, creating missing intermediate containers.
///
/// A missing container becomes a list when the segment that will index into
/// it looks like an index, and a map otherwise. Writing past the end of a
/// list pads the gap with `Null`. A path without segments writes nothing.
pub fn set(root: &mut Value, path: &Path, value: Value) -> Result<(), TreeError> {
    let segments = path.resolved();
    let Some((last, parents)) = segments.split_last() else {
        debug!("set with an empty path ignored");
        return Ok(());
    };

    let mut current = root;
    for (depth, segment) in parents.iter().enumerate() {
        let upcoming = &segments[depth + 1];
        current = child_or_insert(current, segment, upcoming, &segments[..=depth])?;
    }

    match current {
        Value::Map(map) => {
            map.set(last.to_key().into_owned(), value);
            Ok(())
        }
        Value::List(list) => {
            let index = last
                .as_index()
                .ok_or_else(|| TreeError::invalid_index(join(&segments), last.to_string()))?;
            if index < list.len() {
                list[index] = value;
            } else {
                pad_to(list, index, || join(&segments))?;
                list.push(value);
            }
            Ok(())
        }
        _ => Err(TreeError::write_on_atomic(join(&segments))),
    }
}

fn child_or_insert<'v>(
    node: &'v mut Value,
    segment: &Segment,
    upcoming: &Segment,
    at: &[Segment],
) -> Result<&'v mut Value, TreeError> {
    let fresh = || {
        let created = if upcoming.is_index_like() {
            Value::List(Vec::new())
        } else {
            Value::Map(Map::new())
        };
        trace!(path = %join(at), kind = created.kind(), "auto-vivified container");
        created
    };

    match node {
        Value::Map(map) => Ok(map.entry_or_insert_with(&segment.to_key(), fresh)),
        Value::List(list) => {
            let index = segment
                .as_index()
                .ok_or_else(|| TreeError::invalid_index(join(at), segment.to_string()))?;
            if index >= list.len() {
                pad_to(list, index, || join(at))?;
                list.push(fresh());
            }
            Ok(&mut list[index])
        }
        _ => Err(TreeError::write_on_atomic(join(at))),
    }
}

/// Grows `list` with `Null` until `index` is its length.
fn pad_to(list: &mut Vec<Value>, index: usize, at: impl FnOnce() -> String) -> Result<(), TreeError> {
    if index - list.len() > MAX_LIST_GAP {
        return Err(TreeError::index_out_of_range(at(), index, list.len()));
    }
    list.resize(index, Value::Null);
    Ok(())
}

fn join(segments: &[Segment]) -> String {
    segments
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(".")
}

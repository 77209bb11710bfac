//! Lock-step resolution of a path index against a raw document.
//!
//! One walk over the document matches every declared field at once:
//! recursion only follows keys present in both the index and the data,
//! so the cost is bounded by the number of declared paths rather than
//! fields times document size. Fields sharing a path fall out of the
//! shared terminal sets for free.

use crate::schema::path_index::{PathIndex, PathNode};
use serde_json::{Map, Value};

/// Walk `index` and `raw` together and return the raw value for every
/// field whose path matched.
///
/// A terminal set reached at any depth yields the raw value at that
/// depth for each of its fields, whatever the value's type; fields
/// terminating at the root therefore always receive the whole document.
/// Recursion continues only while the raw value is an object, so a
/// non-mapping value under a deeper path silently contributes nothing.
/// Missing data is never an error: unmatched fields simply keep no
/// entry in the result.
pub(crate) fn resolve_fields(index: &PathIndex, raw: &Value) -> Map<String, Value> {
    let mut resolved = Map::new();
    walk(&index.root, raw, &mut resolved);
    resolved
}

fn walk(node: &PathNode, raw: &Value, resolved: &mut Map<String, Value>) {
    for field in &node.terminal {
        resolved.insert(field.clone(), raw.clone());
    }

    let Value::Object(map) = raw else {
        return;
    };

    for (segment, child) in &node.children {
        if let Some(sub) = map.get(segment) {
            walk(child, sub, resolved);
        }
    }
}

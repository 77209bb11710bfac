//! A per-schema tree of path segments terminating in sets of field names.
//!
//! Built once when a schema is finalized, the index lets the resolver
//! match every declared field in a single pass over the raw document
//! instead of re-walking the document once per field.

use std::collections::BTreeMap;

/// One node of the index: children keyed by path segment plus the set of
/// field names whose path terminates here.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct PathNode {
    pub(crate) children: BTreeMap<String, PathNode>,
    pub(crate) terminal: Vec<String>,
}

impl PathNode {
    fn is_empty(&self) -> bool {
        self.children.is_empty() && self.terminal.is_empty()
    }
}

/// Tree keyed by path segments, recording which field names terminate at
/// which path.
///
/// Invariant: a field name appears in exactly one terminal set, at the
/// node reached by following its path from the root. Multiple names may
/// share a terminal set when their paths are identical (fan-out).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathIndex {
    pub(crate) root: PathNode,
}

impl PathIndex {
    pub fn new() -> Self {
        PathIndex::default()
    }

    /// Insert `field` into the terminal set at the end of `path`,
    /// creating intermediate nodes as needed. Re-installing an already
    /// present field at the same path is a no-op.
    pub fn install(&mut self, field: &str, path: &[String]) {
        let mut node = &mut self.root;
        for segment in path {
            node = node.children.entry(segment.clone()).or_default();
        }
        if !node.terminal.iter().any(|name| name == field) {
            node.terminal.push(field.to_string());
        }
    }

    /// Remove `field` from the terminal set at the end of `path`,
    /// pruning every node left empty on the way back up.
    ///
    /// Pruning must be exact: a dangling empty branch would later match
    /// missing data as present-with-empty-children and corrupt
    /// resolution.
    pub fn uninstall(&mut self, field: &str, path: &[String]) {
        Self::remove(&mut self.root, field, path);
    }

    /// Returns true when the node is empty after removal, telling the
    /// parent to drop it.
    fn remove(node: &mut PathNode, field: &str, path: &[String]) -> bool {
        match path.split_first() {
            None => node.terminal.retain(|name| name != field),
            Some((segment, rest)) => {
                if let Some(child) = node.children.get_mut(segment) {
                    if Self::remove(child, field, rest) {
                        node.children.remove(segment);
                    }
                }
            }
        }
        node.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_empty()
    }
}

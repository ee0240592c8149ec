//! Transitive interface closure over declared interfaces and the
//! supertype chain.

use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use typeforest_model::TypeRef;

use crate::types::HierarchyGraph;

/// An interface reachable from a type, together with the reference it
/// was last reached through
///
/// The closure is keyed on the interface declaration; reaching the same
/// declaration under several generic bindings collapses to one entry
/// and the last-seen binding wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundInterface {
    /// The interface declaration node
    pub decl: NodeIndex,

    /// The winning reference; `type_args` carry the opaque binding
    pub binding: TypeRef,
}

/// Every interface implemented by `node` directly, via
/// interfaces-of-interfaces, or anywhere along its supertype chain
///
/// Pure over the frozen graph. Invisible interfaces are skipped along
/// with everything only reachable through them; the supertype chain is
/// followed regardless of visibility as long as it resolves. The
/// result is sorted case-insensitively by qualified name.
pub(crate) fn transitive_interfaces(
    graph: &HierarchyGraph,
    name_index: &HashMap<String, NodeIndex>,
    node: NodeIndex,
) -> Vec<BoundInterface> {
    let mut found: HashMap<String, BoundInterface> = HashMap::new();
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    collect(graph, name_index, node, &mut found, &mut visited);

    let mut closure: Vec<BoundInterface> = found.into_values().collect();
    closure.sort_by(|a, b| {
        a.binding
            .name
            .to_lowercase()
            .cmp(&b.binding.name.to_lowercase())
    });
    closure
}

fn collect(
    graph: &HierarchyGraph,
    name_index: &HashMap<String, NodeIndex>,
    node: NodeIndex,
    found: &mut HashMap<String, BoundInterface>,
    visited: &mut HashSet<NodeIndex>,
) {
    if !visited.insert(node) {
        return;
    }

    let descriptor = &graph[node];
    for reference in &descriptor.interfaces {
        // Unresolvable references are external types: skip
        let Some(&decl) = name_index.get(&reference.name) else {
            continue;
        };
        if !graph[decl].visible {
            continue;
        }
        found.insert(
            reference.name.clone(),
            BoundInterface {
                decl,
                binding: reference.clone(),
            },
        );
        collect(graph, name_index, decl, found, visited);
    }

    if let Some(super_ref) = &descriptor.super_type {
        if let Some(&super_idx) = name_index.get(&super_ref.name) {
            collect(graph, name_index, super_idx, found, visited);
        }
    }
}

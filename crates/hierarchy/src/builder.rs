use std::collections::{HashMap, HashSet};

use petgraph::graph::NodeIndex;
use typeforest_model::{TypeDescriptor, TypeKind};

use crate::interfaces;
use crate::types::{
    sort_by_qualified_name, HierarchyEdge, HierarchyGraph, Partition, PartitionRoots,
    TypeHierarchy,
};

/// Outcome of one edge registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Registration {
    Added,
    AlreadyPresent,
    CycleDetected,
}

/// Builds a [`TypeHierarchy`] from a batch of descriptors
///
/// Owns all mutable state during construction. For every class, enum
/// and annotation type, walks the supertype chain to the nearest
/// visible ancestor and links a child edge in the matching partition;
/// interfaces are linked under every declared super-interface. Direct
/// implementers are recorded along the way. `finish` freezes the
/// result into an immutable snapshot.
pub struct HierarchyBuilder {
    graph: HierarchyGraph,
    name_index: HashMap<String, NodeIndex>,
    roots: PartitionRoots,
    cycles_detected: usize,
}

impl HierarchyBuilder {
    /// Build the hierarchy for a whole universe in one batch pass
    pub fn build(universe: impl IntoIterator<Item = TypeDescriptor>) -> TypeHierarchy {
        let mut builder = Self {
            graph: HierarchyGraph::new(),
            name_index: HashMap::new(),
            roots: PartitionRoots::default(),
            cycles_detected: 0,
        };

        // Phase 1: intern every descriptor so references resolve
        for descriptor in universe {
            builder.intern(descriptor);
        }

        // Phase 2: link hierarchy edges per kind partition. Only
        // visible declarations are processed; the rest stay interned
        // as reference material for ancestor and closure walks.
        let nodes: Vec<NodeIndex> = builder.graph.node_indices().collect();
        for idx in nodes {
            if !builder.graph[idx].visible {
                continue;
            }
            let kind = builder.graph[idx].kind;
            match kind {
                TypeKind::Interface => builder.process_interface(idx, &mut HashSet::new()),
                _ => builder.process_type(idx, Partition::of(kind), &mut HashSet::new()),
            }
        }

        builder.finish()
    }

    fn intern(&mut self, descriptor: TypeDescriptor) -> NodeIndex {
        if let Some(&existing) = self.name_index.get(&descriptor.qualified_name) {
            log::warn!(
                "duplicate descriptor for {}, keeping the first",
                descriptor.qualified_name
            );
            return existing;
        }
        let name = descriptor.qualified_name.clone();
        let idx = self.graph.add_node(descriptor);
        self.name_index.insert(name, idx);
        idx
    }

    /// Upward walk for one class, enum or annotation type
    ///
    /// Links `node` under its nearest visible ancestor and ascends,
    /// staying in the partition the walk started in. An already-present
    /// edge ends the ascent; so does revisiting a node within the same
    /// walk, which is a supertype cycle in the input.
    fn process_type(
        &mut self,
        node: NodeIndex,
        partition: Partition,
        visited: &mut HashSet<NodeIndex>,
    ) {
        if !visited.insert(node) {
            self.cycles_detected += 1;
            log::warn!(
                "supertype cycle truncated at {}",
                self.graph[node].qualified_name
            );
            return;
        }

        match self.first_visible_ancestor(node) {
            Some(ancestor) => match self.add_child(ancestor, node, partition) {
                Registration::Added => self.process_type(ancestor, partition, visited),
                _ => return,
            },
            None => self.add_root(partition, node),
        }

        self.register_implementers(node);
    }

    /// Register an interface under every declared super-interface
    ///
    /// Interfaces with no declared super-interfaces are forest roots.
    /// A revisit within one walk is a shared node in diamond ancestry
    /// and simply stops; genuine cycles end at the already-present edge
    /// check.
    fn process_interface(&mut self, node: NodeIndex, visited: &mut HashSet<NodeIndex>) {
        if !visited.insert(node) {
            return;
        }

        if self.graph[node].interfaces.is_empty() {
            self.add_root(Partition::Interfaces, node);
            return;
        }

        let parents: Vec<NodeIndex> = self.graph[node]
            .interfaces
            .iter()
            .filter_map(|reference| self.name_index.get(&reference.name).copied())
            .collect();

        for parent in parents {
            if self.add_child(parent, node, Partition::Interfaces) == Registration::Added {
                self.process_interface(parent, visited);
            }
        }
    }

    /// Nearest visible ancestor, skipping non-visible and
    /// out-of-universe supertypes
    ///
    /// A supertype name that resolves to nothing in the universe is an
    /// external type: present but not visible, and its own chain cannot
    /// be followed, so the walk ends there. A chain that resolves back
    /// to the starting node yields no ancestor at all.
    fn first_visible_ancestor(&self, node: NodeIndex) -> Option<NodeIndex> {
        let mut current = self.graph[node].super_type.as_ref()?;
        let mut seen: HashSet<&str> = HashSet::new();
        loop {
            if !seen.insert(current.name.as_str()) {
                return None;
            }
            let &idx = self.name_index.get(&current.name)?;
            if self.graph[idx].visible {
                return (idx != node).then_some(idx);
            }
            current = self.graph[idx].super_type.as_ref()?;
        }
    }

    /// Record `node` in the implementers index for every interface in
    /// its transitive closure
    fn register_implementers(&mut self, node: NodeIndex) {
        let closure = interfaces::transitive_interfaces(&self.graph, &self.name_index, node);
        for bound in closure {
            self.add_implements(bound.decl, node);
        }
    }

    fn add_child(
        &mut self,
        parent: NodeIndex,
        child: NodeIndex,
        partition: Partition,
    ) -> Registration {
        if parent == child {
            return Registration::CycleDetected;
        }
        let edge = HierarchyEdge::Child(partition);
        let present = self
            .graph
            .edges_connecting(parent, child)
            .any(|e| *e.weight() == edge);
        if present {
            Registration::AlreadyPresent
        } else {
            self.graph.add_edge(parent, child, edge);
            log::trace!(
                "{} -> {} [{:?}]",
                self.graph[parent].qualified_name,
                self.graph[child].qualified_name,
                partition
            );
            Registration::Added
        }
    }

    fn add_implements(&mut self, interface: NodeIndex, implementer: NodeIndex) {
        let present = self
            .graph
            .edges_connecting(interface, implementer)
            .any(|e| *e.weight() == HierarchyEdge::Implements);
        if !present {
            self.graph
                .add_edge(interface, implementer, HierarchyEdge::Implements);
        }
    }

    fn add_root(&mut self, partition: Partition, node: NodeIndex) {
        let roots = self.roots.get_mut(partition);
        if !roots.contains(&node) {
            roots.push(node);
        }
    }

    /// Freeze the builder into an immutable query snapshot
    fn finish(self) -> TypeHierarchy {
        let Self {
            graph,
            name_index,
            mut roots,
            cycles_detected,
        } = self;

        for list in [
            &mut roots.classes,
            &mut roots.interfaces,
            &mut roots.enums,
            &mut roots.annotation_types,
        ] {
            sort_by_qualified_name(&graph, list);
        }

        log::info!(
            "built type hierarchy: {} types, {} edges, {} cycle truncations",
            graph.node_count(),
            graph.edge_count(),
            cycles_detected
        );

        TypeHierarchy {
            graph,
            name_index,
            roots,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use typeforest_model::TypeKind;

    fn class(name: &str) -> TypeDescriptor {
        TypeDescriptor::new(TypeKind::Class, name)
    }

    fn names(hierarchy: &TypeHierarchy, nodes: &[NodeIndex]) -> Vec<String> {
        nodes
            .iter()
            .map(|&n| hierarchy.node(n).expect("node").qualified_name.clone())
            .collect()
    }

    #[test]
    fn links_child_under_nearest_visible_ancestor() {
        let hierarchy = HierarchyBuilder::build([
            class("lang.Obj"),
            class("app.Hidden").with_super("lang.Obj").hidden(),
            class("app.Leaf").with_super("app.Hidden"),
        ]);

        let obj = hierarchy.lookup("lang.Obj").expect("obj");
        assert_eq!(
            names(&hierarchy, &hierarchy.subclasses(obj)),
            vec!["app.Leaf"]
        );
    }

    #[test]
    fn out_of_universe_supertype_makes_a_root() {
        let hierarchy = HierarchyBuilder::build([class("app.Orphan").with_super("ext.Unknown")]);

        assert_eq!(
            names(&hierarchy, hierarchy.base_classes()),
            vec!["app.Orphan"]
        );
    }

    #[test]
    fn self_referential_supertype_is_rootless_not_looping() {
        let hierarchy = HierarchyBuilder::build([
            class("app.Selfish").with_super("app.Selfish"),
        ]);

        let selfish = hierarchy.lookup("app.Selfish").expect("selfish");
        assert_eq!(
            names(&hierarchy, hierarchy.base_classes()),
            vec!["app.Selfish"]
        );
        assert!(hierarchy.subclasses(selfish).is_empty());
    }

    #[test]
    fn hidden_self_loop_chain_terminates() {
        // A hidden type whose supertype chain circles back on itself
        let hierarchy = HierarchyBuilder::build([
            class("app.HiddenLoop").with_super("app.HiddenLoop").hidden(),
            class("app.Child").with_super("app.HiddenLoop"),
        ]);

        // The hidden type is reference material only: it is neither a
        // root nor a child, and the chain walk still terminates.
        assert_eq!(
            names(&hierarchy, hierarchy.base_classes()),
            vec!["app.Child"]
        );
    }

    #[test]
    fn supertype_cycle_is_truncated() {
        let hierarchy = HierarchyBuilder::build([
            class("app.A").with_super("app.B"),
            class("app.B").with_super("app.A"),
        ]);

        let a = hierarchy.lookup("app.A").expect("a");
        let b = hierarchy.lookup("app.B").expect("b");
        // Mutually-registered children, no roots: the walk stopped
        // instead of recursing forever.
        assert!(hierarchy.base_classes().is_empty());
        assert_eq!(hierarchy.subclasses(a), vec![b]);
        assert_eq!(hierarchy.subclasses(b), vec![a]);
    }

    #[test]
    fn duplicate_descriptors_keep_the_first() {
        let hierarchy = HierarchyBuilder::build([
            class("app.Twin"),
            class("app.Twin").with_super("app.Missing"),
        ]);

        assert_eq!(hierarchy.node_count(), 1);
        let twin = hierarchy.lookup("app.Twin").expect("twin");
        assert_eq!(hierarchy.node(twin).expect("node").super_type, None);
    }

    #[test]
    fn interface_with_multiple_parents_registers_under_each() {
        let hierarchy = HierarchyBuilder::build([
            TypeDescriptor::new(TypeKind::Interface, "app.Left"),
            TypeDescriptor::new(TypeKind::Interface, "app.Right"),
            TypeDescriptor::new(TypeKind::Interface, "app.Both")
                .with_interface("app.Left")
                .with_interface("app.Right"),
        ]);

        let left = hierarchy.lookup("app.Left").expect("left");
        let right = hierarchy.lookup("app.Right").expect("right");
        assert_eq!(
            names(&hierarchy, &hierarchy.subinterfaces(left)),
            vec!["app.Both"]
        );
        assert_eq!(
            names(&hierarchy, &hierarchy.subinterfaces(right)),
            vec!["app.Both"]
        );
        assert_eq!(
            names(&hierarchy, hierarchy.base_interfaces()),
            vec!["app.Left", "app.Right"]
        );
    }

    #[test]
    fn hidden_super_interface_still_joins_the_forest() {
        // The upward interface walk has no visibility filter: a hidden
        // super-interface of a visible interface becomes its forest
        // parent, and a root when it declares no supers of its own.
        let hierarchy = HierarchyBuilder::build([
            TypeDescriptor::new(TypeKind::Interface, "app.Hid").hidden(),
            TypeDescriptor::new(TypeKind::Interface, "app.Vis").with_interface("app.Hid"),
        ]);

        let hid = hierarchy.lookup("app.Hid").expect("hid");
        assert_eq!(
            names(&hierarchy, hierarchy.base_interfaces()),
            vec!["app.Hid"]
        );
        assert_eq!(
            names(&hierarchy, &hierarchy.subinterfaces(hid)),
            vec!["app.Vis"]
        );
    }

    #[test]
    fn enum_and_annotation_partitions_are_separate() {
        let hierarchy = HierarchyBuilder::build([
            TypeDescriptor::new(TypeKind::Enum, "app.Color"),
            TypeDescriptor::new(TypeKind::AnnotationType, "app.Marker"),
            class("app.Plain"),
        ]);

        assert_eq!(names(&hierarchy, hierarchy.base_enums()), vec!["app.Color"]);
        assert_eq!(
            names(&hierarchy, hierarchy.base_annotation_types()),
            vec!["app.Marker"]
        );
        assert_eq!(
            names(&hierarchy, hierarchy.base_classes()),
            vec!["app.Plain"]
        );
    }

    #[test]
    fn roots_are_sorted_case_insensitively() {
        let hierarchy = HierarchyBuilder::build([
            class("zeta.Last"),
            class("Alpha.First"),
            class("beta.Middle"),
        ]);

        assert_eq!(
            names(&hierarchy, hierarchy.base_classes()),
            vec!["Alpha.First", "beta.Middle", "zeta.Last"]
        );
    }
}

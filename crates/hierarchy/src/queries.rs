//! Read-only hierarchy queries over the frozen snapshot.
//!
//! Every result is freshly collected, deduplicated and sorted
//! case-insensitively by qualified name; missing entries come back as
//! empty sequences, never as errors.

use std::collections::{HashSet, VecDeque};

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use typeforest_model::TypeKind;

use crate::interfaces::{self, BoundInterface};
use crate::types::{sort_by_qualified_name, HierarchyEdge, Partition, TypeHierarchy};

impl TypeHierarchy {
    /// Class-partition roots: classes with no visible ancestor
    pub fn base_classes(&self) -> &[NodeIndex] {
        self.roots.get(Partition::Classes)
    }

    /// Interface-forest roots: interfaces with no declared super-interface
    pub fn base_interfaces(&self) -> &[NodeIndex] {
        self.roots.get(Partition::Interfaces)
    }

    /// Enum-partition roots
    pub fn base_enums(&self) -> &[NodeIndex] {
        self.roots.get(Partition::Enums)
    }

    /// Annotation-type-partition roots
    pub fn base_annotation_types(&self) -> &[NodeIndex] {
        self.roots.get(Partition::AnnotationTypes)
    }

    /// Direct subclasses recorded in the class partition
    pub fn subclasses(&self, class: NodeIndex) -> Vec<NodeIndex> {
        self.children(class, Partition::Classes)
    }

    /// Direct sub-interfaces recorded in the interface forest
    pub fn subinterfaces(&self, interface: NodeIndex) -> Vec<NodeIndex> {
        self.children(interface, Partition::Interfaces)
    }

    /// Direct children in the partition the node dispatches to
    ///
    /// `prefer_enum` forces the enum partition. Otherwise annotation
    /// types and interfaces dispatch to their own partitions, and both
    /// classes and enums to the class partition; the enum kind never
    /// self-selects its partition without the flag.
    pub fn subs(&self, node: NodeIndex, prefer_enum: bool) -> Vec<NodeIndex> {
        let partition = if prefer_enum {
            Partition::Enums
        } else {
            match self.graph[node].kind {
                TypeKind::AnnotationType => Partition::AnnotationTypes,
                TypeKind::Interface => Partition::Interfaces,
                TypeKind::Class | TypeKind::Enum => Partition::Classes,
            }
        };
        self.children(node, partition)
    }

    /// Every direct or indirect descendant in the dispatched partition
    ///
    /// Fixed-point union of children over the finite forest, excluding
    /// the starting node itself, sorted.
    pub fn all_subs(&self, node: NodeIndex, prefer_enum: bool) -> Vec<NodeIndex> {
        let mut seen: HashSet<NodeIndex> = HashSet::new();
        let mut queue: VecDeque<NodeIndex> = self.subs(node, prefer_enum).into();
        let mut descendants = Vec::new();

        while let Some(current) = queue.pop_front() {
            if current == node || !seen.insert(current) {
                continue;
            }
            descendants.push(current);
            queue.extend(self.subs(current, prefer_enum));
        }

        sort_by_qualified_name(&self.graph, &mut descendants);
        descendants
    }

    /// Every class implementing `interface`, directly or through any
    /// transitive sub-interface
    ///
    /// Resolved per call rather than cached at build time; repeated
    /// queries redo the walk.
    pub fn implementing_classes(&self, interface: NodeIndex) -> Vec<NodeIndex> {
        let mut seen: HashSet<NodeIndex> = HashSet::new();
        let mut implementers = Vec::new();
        self.collect_implementers(interface, &mut seen, &mut implementers);
        sort_by_qualified_name(&self.graph, &mut implementers);
        implementers
    }

    /// The full transitive interface closure of a type
    pub fn all_interfaces_of(&self, node: NodeIndex) -> Vec<BoundInterface> {
        interfaces::transitive_interfaces(&self.graph, &self.name_index, node)
    }

    fn collect_implementers(
        &self,
        interface: NodeIndex,
        seen: &mut HashSet<NodeIndex>,
        implementers: &mut Vec<NodeIndex>,
    ) {
        if !seen.insert(interface) {
            return;
        }
        implementers.extend(self.direct_implementers(interface));
        for sub in self.all_subs(interface, false) {
            self.collect_implementers(sub, seen, implementers);
        }
    }

    fn direct_implementers(&self, interface: NodeIndex) -> Vec<NodeIndex> {
        self.graph
            .edges(interface)
            .filter(|e| *e.weight() == HierarchyEdge::Implements)
            .map(|e| e.target())
            .collect()
    }
}

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use typeforest_model::{TypeDescriptor, TypeKind};

use crate::error::{HierarchyError, Result};

/// Underlying graph: descriptors as nodes, hierarchy relations as edges
pub(crate) type HierarchyGraph = DiGraph<TypeDescriptor, HierarchyEdge>;

/// One of the four kind partitions the universe is split into
///
/// Each partition carries its own root set and parent→children edges.
/// Classes, enums and annotation types form proper forests; interfaces
/// may extend several interfaces, so their partition is a multi-rooted
/// DAG.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Partition {
    Classes,
    Interfaces,
    Enums,
    AnnotationTypes,
}

impl Partition {
    /// Partition a descriptor is processed under during the build pass
    #[must_use]
    pub fn of(kind: TypeKind) -> Self {
        match kind {
            TypeKind::Class => Self::Classes,
            TypeKind::Interface => Self::Interfaces,
            TypeKind::Enum => Self::Enums,
            TypeKind::AnnotationType => Self::AnnotationTypes,
        }
    }
}

/// Relation recorded on a hierarchy edge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HierarchyEdge {
    /// Target is a direct child of source within the given partition
    Child(Partition),

    /// Target is a direct implementer of the source interface
    Implements,
}

/// Sorted root lists, one per partition
#[derive(Debug, Clone, Default)]
pub(crate) struct PartitionRoots {
    pub classes: Vec<NodeIndex>,
    pub interfaces: Vec<NodeIndex>,
    pub enums: Vec<NodeIndex>,
    pub annotation_types: Vec<NodeIndex>,
}

impl PartitionRoots {
    pub fn get(&self, partition: Partition) -> &Vec<NodeIndex> {
        match partition {
            Partition::Classes => &self.classes,
            Partition::Interfaces => &self.interfaces,
            Partition::Enums => &self.enums,
            Partition::AnnotationTypes => &self.annotation_types,
        }
    }

    pub fn get_mut(&mut self, partition: Partition) -> &mut Vec<NodeIndex> {
        match partition {
            Partition::Classes => &mut self.classes,
            Partition::Interfaces => &mut self.interfaces,
            Partition::Enums => &mut self.enums,
            Partition::AnnotationTypes => &mut self.annotation_types,
        }
    }
}

/// Immutable hierarchy snapshot with the read-only query layer
///
/// Produced once per batch by [`crate::HierarchyBuilder`]; never mutated
/// afterwards, so queries are safe to run from any number of readers.
pub struct TypeHierarchy {
    /// Directed graph (declaration -> declaration with relations)
    pub(crate) graph: HierarchyGraph,

    /// Qualified name -> NodeIndex mapping, the identity mechanism
    pub(crate) name_index: HashMap<String, NodeIndex>,

    /// Roots per partition, sorted case-insensitively by qualified name
    pub(crate) roots: PartitionRoots,
}

impl TypeHierarchy {
    /// Find a declaration by qualified name
    pub fn find(&self, qualified_name: &str) -> Option<NodeIndex> {
        self.name_index.get(qualified_name).copied()
    }

    /// Find a declaration by qualified name, failing when absent
    pub fn lookup(&self, qualified_name: &str) -> Result<NodeIndex> {
        self.find(qualified_name)
            .ok_or_else(|| HierarchyError::TypeNotFound(qualified_name.to_string()))
    }

    /// Get the descriptor behind a node
    pub fn node(&self, idx: NodeIndex) -> Option<&TypeDescriptor> {
        self.graph.node_weight(idx)
    }

    /// Iterate every declaration in the hierarchy
    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &TypeDescriptor)> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx).map(|desc| (idx, desc)))
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Direct children of a node within one partition, sorted
    pub(crate) fn children(&self, parent: NodeIndex, partition: Partition) -> Vec<NodeIndex> {
        let mut out: Vec<NodeIndex> = self
            .graph
            .edges(parent)
            .filter(|e| *e.weight() == HierarchyEdge::Child(partition))
            .map(|e| e.target())
            .collect();
        sort_by_qualified_name(&self.graph, &mut out);
        out
    }
}

/// Case-insensitive alphabetical order by qualified name, duplicates
/// (same node reached twice) removed
pub(crate) fn sort_by_qualified_name(graph: &HierarchyGraph, nodes: &mut Vec<NodeIndex>) {
    nodes.sort_by(|a, b| {
        graph[*a]
            .qualified_name
            .to_lowercase()
            .cmp(&graph[*b].qualified_name.to_lowercase())
            .then(a.cmp(b))
    });
    nodes.dedup();
}

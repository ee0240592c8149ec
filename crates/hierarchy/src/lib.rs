//! # Typeforest Hierarchy
//!
//! Type-hierarchy indexing over a flat universe of declarations.
//!
//! Builds navigable hierarchy forests and a transitive implements index
//! from the descriptors a universe provider supplies, then answers the
//! hierarchy queries downstream document generation runs on.
//!
//! ## Architecture
//!
//! ```text
//! TypeDescriptor[]
//!     │
//!     ├──> Hierarchy Builder (batch, single pass)
//!     │      ├─ Partition by kind (class / interface / enum / annotation)
//!     │      ├─ Nearest-visible-ancestor linking
//!     │      ├─ Interface forest (multi-rooted DAG)
//!     │      └─ Direct-implementers index
//!     │
//!     ├──> Type Hierarchy (petgraph, frozen after build)
//!     │      ├─ Nodes: type descriptors
//!     │      └─ Edges: child-of (per partition), implements
//!     │
//!     └──> Query Layer (read-only)
//!            ├─ Roots per partition
//!            ├─ Direct and transitive descendants
//!            ├─ Transitive interface closure
//!            └─ Direct + indirect implementers
//! ```
//!
//! ## Example
//!
//! ```
//! use typeforest_hierarchy::HierarchyBuilder;
//! use typeforest_model::{TypeDescriptor, TypeKind};
//!
//! let hierarchy = HierarchyBuilder::build([
//!     TypeDescriptor::new(TypeKind::Class, "lang.Obj"),
//!     TypeDescriptor::new(TypeKind::Class, "app.Base").with_super("lang.Obj"),
//! ]);
//!
//! let obj = hierarchy.lookup("lang.Obj").unwrap();
//! let subclasses = hierarchy.subclasses(obj);
//! assert_eq!(subclasses.len(), 1);
//! ```

mod builder;
mod error;
mod interfaces;
mod queries;
mod types;

pub use builder::HierarchyBuilder;
pub use error::{HierarchyError, Result};
pub use interfaces::BoundInterface;
pub use types::{HierarchyEdge, Partition, TypeHierarchy};

pub use petgraph::graph::NodeIndex;

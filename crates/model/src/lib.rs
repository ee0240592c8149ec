//! # Typeforest Model
//!
//! The typed view of declared types that the hierarchy indexer consumes.
//!
//! A universe provider (compiler front-end, language binding, test fixture)
//! describes every type in a processed batch as a [`TypeDescriptor`]:
//! kind, globally unique qualified name, visibility, declared supertype
//! and declared interfaces. References between descriptors are by
//! qualified name only; a name that resolves to nothing in the batch is
//! an external type and is treated as present-but-not-visible.
//!
//! ## Example
//!
//! ```
//! use typeforest_model::{TypeDescriptor, TypeKind, TypeUniverse};
//!
//! let mut universe = TypeUniverse::new();
//! universe.push(TypeDescriptor::new(TypeKind::Class, "com.example.Base"));
//! universe.push(
//!     TypeDescriptor::new(TypeKind::Class, "com.example.Derived")
//!         .with_super("com.example.Base"),
//! );
//!
//! assert_eq!(universe.len(), 2);
//! ```

mod descriptor;
mod error;
mod universe;

pub use descriptor::{TypeDescriptor, TypeKind, TypeRef};
pub use error::{ModelError, Result};
pub use universe::TypeUniverse;

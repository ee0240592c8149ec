use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::Result;

/// The full batch of type descriptors for one indexing run
///
/// Order is preserved from the provider; the indexer itself does not
/// depend on it beyond determinism of duplicate handling. Serializes as
/// a plain JSON array of descriptors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeUniverse {
    types: Vec<TypeDescriptor>,
}

impl TypeUniverse {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a descriptor to the batch
    pub fn push(&mut self, descriptor: TypeDescriptor) {
        self.types.push(descriptor);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.iter()
    }

    /// Parse a universe from a JSON array of descriptors
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a universe from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let universe = Self::from_json_str(&raw)?;
        log::debug!(
            "loaded universe of {} descriptors from {}",
            universe.len(),
            path.as_ref().display()
        );
        Ok(universe)
    }
}

impl IntoIterator for TypeUniverse {
    type Item = TypeDescriptor;
    type IntoIter = std::vec::IntoIter<TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.into_iter()
    }
}

impl<'a> IntoIterator for &'a TypeUniverse {
    type Item = &'a TypeDescriptor;
    type IntoIter = std::slice::Iter<'a, TypeDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.types.iter()
    }
}

impl FromIterator<TypeDescriptor> for TypeUniverse {
    fn from_iter<I: IntoIterator<Item = TypeDescriptor>>(iter: I) -> Self {
        Self {
            types: iter.into_iter().collect(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// Kind of a declared type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Enum,
    AnnotationType,
}

/// Reference to a declared type by qualified name, possibly parameterized
///
/// Type arguments are carried opaquely; they are never substituted or
/// checked, only reported back with the referenced declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeRef {
    /// Qualified name of the referenced declaration
    pub name: String,

    /// Opaque generic type arguments, empty for a raw reference
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub type_args: Vec<String>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_args: Vec::new(),
        }
    }

    pub fn parameterized(
        name: impl Into<String>,
        type_args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            name: name.into(),
            type_args: type_args.into_iter().map(Into::into).collect(),
        }
    }

    /// Check if this reference carries type arguments
    #[must_use]
    pub fn is_parameterized(&self) -> bool {
        !self.type_args.is_empty()
    }
}

/// One declared type as seen by the hierarchy indexer
///
/// Immutable snapshot of the declaration surface that matters for
/// hierarchy construction. The qualified name is the identity key;
/// duplicates within one universe are a provider bug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Kind of the declaration
    pub kind: TypeKind,

    /// Globally unique dotted identifier
    pub qualified_name: String,

    /// Public, or otherwise included in the processed universe.
    /// Non-visible ancestors are skipped when linking hierarchy edges.
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Declared supertype, absent for hierarchy roots
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub super_type: Option<TypeRef>,

    /// Declared interfaces (super-interfaces for interface kinds),
    /// in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub interfaces: Vec<TypeRef>,
}

fn default_visible() -> bool {
    true
}

impl TypeDescriptor {
    /// Create a visible descriptor with no supertype and no interfaces
    pub fn new(kind: TypeKind, qualified_name: impl Into<String>) -> Self {
        Self {
            kind,
            qualified_name: qualified_name.into(),
            visible: true,
            super_type: None,
            interfaces: Vec::new(),
        }
    }

    /// Set the declared supertype by name
    #[must_use]
    pub fn with_super(mut self, name: impl Into<String>) -> Self {
        self.super_type = Some(TypeRef::new(name));
        self
    }

    /// Set the declared supertype from a full reference
    #[must_use]
    pub fn with_super_ref(mut self, super_type: TypeRef) -> Self {
        self.super_type = Some(super_type);
        self
    }

    /// Append a declared interface by name
    #[must_use]
    pub fn with_interface(mut self, name: impl Into<String>) -> Self {
        self.interfaces.push(TypeRef::new(name));
        self
    }

    /// Append a declared interface from a full reference
    #[must_use]
    pub fn with_interface_ref(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    /// Mark the descriptor as not visible (package-private or excluded)
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Last segment of the qualified name
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.qualified_name
            .rsplit('.')
            .next()
            .unwrap_or(&self.qualified_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn builder_chain_fills_all_fields() {
        let desc = TypeDescriptor::new(TypeKind::Class, "com.example.Worker")
            .with_super("com.example.Base")
            .with_interface("com.example.Runnable")
            .with_interface_ref(TypeRef::parameterized(
                "com.example.Callable",
                ["String"],
            ));

        assert_eq!(desc.simple_name(), "Worker");
        assert!(desc.visible);
        assert_eq!(desc.super_type, Some(TypeRef::new("com.example.Base")));
        assert_eq!(desc.interfaces.len(), 2);
        assert!(desc.interfaces[1].is_parameterized());
    }

    #[test]
    fn hidden_clears_visibility() {
        let desc = TypeDescriptor::new(TypeKind::Class, "Hidden").hidden();
        assert!(!desc.visible);
    }

    #[test]
    fn simple_name_without_package() {
        let desc = TypeDescriptor::new(TypeKind::Interface, "Bare");
        assert_eq!(desc.simple_name(), "Bare");
    }

    #[test]
    fn descriptor_json_defaults() {
        let desc: TypeDescriptor =
            serde_json::from_str(r#"{"kind": "Class", "qualified_name": "a.B"}"#)
                .expect("minimal descriptor");

        assert!(desc.visible);
        assert_eq!(desc.super_type, None);
        assert!(desc.interfaces.is_empty());
    }
}

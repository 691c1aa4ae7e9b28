//! Resolved type handles.
//!
//! A [`TypeHandle`] is what a loader hands back for a name: a stable
//! identity plus the few facts discovery needs. A [`SourceType`] wraps a
//! handle with the context it was discovered in and is the unit that
//! flows to downstream generators.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Stable identity of a loaded type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u64);

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of a named type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    #[default]
    Class,
    Interface,
    Enum,
    Record,
    Annotation,
}

impl TypeKind {
    /// Concrete types: classes, enums and records
    pub fn is_standard(self) -> bool {
        matches!(self, TypeKind::Class | TypeKind::Enum | TypeKind::Record)
    }

    pub fn is_interface(self) -> bool {
        self == TypeKind::Interface
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TypeKind::Class => "class",
            TypeKind::Interface => "interface",
            TypeKind::Enum => "enum",
            TypeKind::Record => "record",
            TypeKind::Annotation => "annotation",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded type.
///
/// Equality and hashing use the identity only: two handles with the same
/// name but different identities are different types.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeHandle {
    pub id: TypeId,
    /// Fully-qualified name, e.g. `com.example.Outer$Inner`
    pub name: String,
    pub kind: TypeKind,
    /// Generated by the compiler, with no author-visible declaration
    #[serde(default)]
    pub synthetic: bool,
    /// Declared without a name of its own
    #[serde(default)]
    pub anonymous: bool,
}

impl TypeHandle {
    /// Create a plain (non-synthetic, named) handle.
    pub fn new(id: TypeId, name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            synthetic: false,
            anonymous: false,
        }
    }

    /// Builder: mark as compiler-generated
    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Builder: mark as anonymous
    pub fn anonymous(mut self) -> Self {
        self.anonymous = true;
        self
    }

    /// Whether code can be generated from this type by name.
    ///
    /// Synthetic and anonymous types have no stable name to refer to.
    pub fn is_representable(&self) -> bool {
        !self.synthetic && !self.anonymous
    }
}

impl PartialEq for TypeHandle {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeHandle {}

impl Hash for TypeHandle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// A type selected for processing, with the context it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceType {
    #[serde(rename = "type")]
    pub ty: TypeHandle,
    /// Type whose declaration led to this one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_in_type: Option<String>,
    /// Member of `used_in_type` that referenced this type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_in_member: Option<String>,
}

impl SourceType {
    /// Wrap a handle with no context.
    pub fn new(ty: TypeHandle) -> Self {
        Self {
            ty,
            used_in_type: None,
            used_in_member: None,
        }
    }

    /// Record the type (and optionally member) this one was reached from.
    pub fn used_in(mut self, type_name: impl Into<String>, member: Option<String>) -> Self {
        self.used_in_type = Some(type_name.into());
        self.used_in_member = member;
        self
    }

    pub fn name(&self) -> &str {
        &self.ty.name
    }
}

impl From<TypeHandle> for SourceType {
    fn from(ty: TypeHandle) -> Self {
        Self::new(ty)
    }
}

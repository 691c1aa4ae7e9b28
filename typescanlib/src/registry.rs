//! An in-memory symbol table.
//!
//! [`Registry`] implements all three discovery collaborators over a list of
//! [`TypeEntry`] records, typically loaded from JSON:
//!
//! ```json
//! {
//!   "types": [
//!     { "name": "com.example.App", "entry_point": true, "resources": ["com.example.UserResource"] },
//!     { "name": "com.example.UserResource" },
//!     { "name": "com.example.Api", "kind": "interface" }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::EntryPointDiscovery;
use crate::error::TypescanError;
use crate::inventory::{SymbolInventory, SymbolScanner};
use crate::loader::TypeLoader;
use crate::types::{SourceType, TypeHandle, TypeId, TypeKind};
use crate::Result;

/// One type known to a [`Registry`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypeEntry {
    pub name: String,
    #[serde(default)]
    pub kind: TypeKind,
    #[serde(default)]
    pub synthetic: bool,
    #[serde(default)]
    pub anonymous: bool,
    /// Declares the application's exposed types in `resources`
    #[serde(default)]
    pub entry_point: bool,
    /// Types an entry point exposes, in declaration order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<String>,
}

impl TypeEntry {
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            ..Self::default()
        }
    }

    pub fn class(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Class)
    }

    pub fn interface(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Interface)
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

    /// Builder: make this an entry point exposing `resources`
    pub fn entry_point<S: AsRef<str>>(mut self, resources: &[S]) -> Self {
        self.entry_point = true;
        self.resources = resources.iter().map(|r| r.as_ref().to_string()).collect();
        self
    }
}

/// On-disk registry layout.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RegistryDocument {
    #[serde(default)]
    types: Vec<TypeEntry>,
}

/// Symbol table backing scanning, loading, and entry-point discovery.
///
/// Identities are assigned in insertion order. Adding a name that already
/// exists replaces the earlier entry and keeps its identity.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    entries: Vec<TypeEntry>,
    index: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = TypeEntry>) -> Self {
        let mut registry = Self::new();
        registry.extend(entries);
        registry
    }

    /// Parse a JSON registry document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: RegistryDocument =
            serde_json::from_str(json).map_err(|e| TypescanError::Registry(e.to_string()))?;
        Ok(Self::from_entries(document.types))
    }

    /// Load a JSON registry file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_file(path.as_ref())?;
        Ok(registry)
    }

    /// Load and merge every registry file matching a filesystem glob.
    ///
    /// Files are merged in path order.
    pub fn from_glob(pattern: &str) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_glob(pattern)?;
        Ok(registry)
    }

    /// Merge every registry file matching a filesystem glob into this one.
    pub fn load_glob(&mut self, pattern: &str) -> Result<()> {
        let paths = ::glob::glob(pattern).map_err(|e| TypescanError::InvalidGlob {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for path in paths {
            let path = path.map_err(|e| TypescanError::Io(e.into_error()))?;
            if path.is_file() {
                files.push(path);
            }
        }

        if files.is_empty() {
            return Err(TypescanError::Registry(format!(
                "no registry files match '{pattern}'"
            )));
        }

        files.sort();
        for file in files {
            self.load_file(&file)?;
        }
        Ok(())
    }

    fn load_file(&mut self, path: &Path) -> Result<()> {
        let json = fs::read_to_string(path).map_err(|source| TypescanError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let document: RegistryDocument = serde_json::from_str(&json)
            .map_err(|e| TypescanError::Registry(format!("{}: {e}", path.display())))?;
        debug!(path = %path.display(), types = document.types.len(), "Loaded registry file");
        self.extend(document.types);
        Ok(())
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, entry: TypeEntry) {
        match self.index.get(&entry.name) {
            Some(&i) => self.entries[i] = entry,
            None => {
                self.index.insert(entry.name.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&TypeEntry> {
        self.index.get(name).map(|&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn handle(&self, i: usize) -> TypeHandle {
        let entry = &self.entries[i];
        TypeHandle {
            id: TypeId(i as u64),
            name: entry.name.clone(),
            kind: entry.kind,
            synthetic: entry.synthetic,
            anonymous: entry.anonymous,
        }
    }
}

impl Extend<TypeEntry> for Registry {
    fn extend<I: IntoIterator<Item = TypeEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.insert(entry);
        }
    }
}

impl SymbolScanner for Registry {
    fn scan_symbols(&self) -> Result<SymbolInventory> {
        let mut standard = Vec::new();
        let mut interfaces = Vec::new();
        let mut others = Vec::new();

        for entry in &self.entries {
            let name = entry.name.clone();
            if entry.kind.is_standard() {
                standard.push(name);
            } else if entry.kind.is_interface() {
                interfaces.push(name);
            } else {
                others.push(name);
            }
        }

        Ok(SymbolInventory::new(standard, interfaces, others))
    }
}

impl TypeLoader for Registry {
    fn load(&self, name: &str) -> Result<TypeHandle> {
        self.index
            .get(name)
            .map(|&i| self.handle(i))
            .ok_or_else(|| TypescanError::resolution(name, "unknown type"))
    }
}

impl EntryPointDiscovery for Registry {
    /// Collect the resources of every non-excluded entry point.
    ///
    /// Excluded resources are skipped, as are synthetic and anonymous ones.
    /// Each result records its entry point in `used_in_type`.
    fn discover_entry_point_types(
        &self,
        inventory: &SymbolInventory,
        exclude: &dyn Fn(&str) -> bool,
        loader: &dyn TypeLoader,
    ) -> Result<Vec<SourceType>> {
        let mut types = Vec::new();

        for name in inventory.all_names() {
            let Some(entry) = self.get(name) else {
                continue;
            };
            if !entry.entry_point || exclude(name) {
                continue;
            }
            debug!(entry_point = %name, resources = entry.resources.len(), "Found entry point");

            for resource in &entry.resources {
                if exclude(resource) {
                    continue;
                }
                let ty = loader.load(resource)?;
                if ty.is_representable() {
                    types.push(SourceType::new(ty).used_in(name.as_str(), None));
                }
            }
        }

        Ok(types)
    }
}

//! Entry-point discovery.
//!
//! Some applications declare the types they expose through a designated
//! entry-point type rather than by listing them. An [`EntryPointDiscovery`]
//! encodes such a convention: given the symbol inventory it finds the entry
//! points and returns the types they lead to.

use crate::inventory::SymbolInventory;
use crate::loader::TypeLoader;
use crate::types::SourceType;
use crate::Result;

/// A convention that infers types to process from the symbol inventory.
pub trait EntryPointDiscovery {
    /// Find the types reachable from entry points in `inventory`.
    ///
    /// Names for which `exclude` returns true must not contribute.
    fn discover_entry_point_types(
        &self,
        inventory: &SymbolInventory,
        exclude: &dyn Fn(&str) -> bool,
        loader: &dyn TypeLoader,
    ) -> Result<Vec<SourceType>>;
}

/// Discovery for programs without an entry-point convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEntryPoints;

impl EntryPointDiscovery for NoEntryPoints {
    fn discover_entry_point_types(
        &self,
        _inventory: &SymbolInventory,
        _exclude: &dyn Fn(&str) -> bool,
        _loader: &dyn TypeLoader,
    ) -> Result<Vec<SourceType>> {
        Ok(Vec::new())
    }
}

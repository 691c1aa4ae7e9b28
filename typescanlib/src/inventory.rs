//! The symbol inventory and its compute-once cache.
//!
//! Enumerating every symbol a program can load is slow, and several
//! discovery strategies need the result. [`LazyInventory`] runs the
//! [`SymbolScanner`] on first use and hands out the same inventory after
//! that.

use std::cell::OnceCell;
use std::collections::BTreeSet;
use std::time::Instant;

use tracing::info;

use crate::Result;

/// Every symbol visible to the program, grouped by category.
///
/// Each list is sorted and free of duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolInventory {
    all: Vec<String>,
    standard: Vec<String>,
    interfaces: Vec<String>,
}

fn sorted_unique(names: impl IntoIterator<Item = String>) -> Vec<String> {
    names
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

impl SymbolInventory {
    /// Build an inventory from concrete type names, interface names, and any
    /// other symbols (annotations and the like) that belong to neither.
    pub fn new(
        standard: impl IntoIterator<Item = String>,
        interfaces: impl IntoIterator<Item = String>,
        others: impl IntoIterator<Item = String>,
    ) -> Self {
        let standard = sorted_unique(standard);
        let interfaces = sorted_unique(interfaces);
        let all = sorted_unique(
            standard
                .iter()
                .chain(interfaces.iter())
                .cloned()
                .chain(others),
        );
        Self {
            all,
            standard,
            interfaces,
        }
    }

    /// Every known symbol name.
    pub fn all_names(&self) -> &[String] {
        &self.all
    }

    /// Names of concrete types.
    pub fn standard_names(&self) -> &[String] {
        &self.standard
    }

    /// Names of interface-like types.
    pub fn interface_names(&self) -> &[String] {
        &self.interfaces
    }

    /// Concrete and interface-like names together, sorted lexicographically.
    ///
    /// These are the candidates glob patterns are matched against.
    pub fn top_level_type_names(&self) -> Vec<String> {
        sorted_unique(self.standard.iter().chain(self.interfaces.iter()).cloned())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.all.binary_search_by(|n| n.as_str().cmp(name)).is_ok()
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

/// Enumerates the symbols of a program image.
///
/// Failures should be reported as [`TypescanError::Enumeration`]; they
/// reach the caller of `discover` unchanged.
///
/// [`TypescanError::Enumeration`]: crate::TypescanError::Enumeration
pub trait SymbolScanner {
    fn scan_symbols(&self) -> Result<SymbolInventory>;
}

/// A [`SymbolScanner`] result computed on first use and then reused.
pub struct LazyInventory<'a> {
    scanner: &'a dyn SymbolScanner,
    inventory: OnceCell<SymbolInventory>,
}

impl<'a> LazyInventory<'a> {
    pub fn new(scanner: &'a dyn SymbolScanner) -> Self {
        Self {
            scanner,
            inventory: OnceCell::new(),
        }
    }

    /// Return the inventory, scanning on the first call only.
    ///
    /// A failed scan is returned as-is and leaves nothing cached.
    pub fn scan(&self) -> Result<&SymbolInventory> {
        if let Some(inventory) = self.inventory.get() {
            return Ok(inventory);
        }

        info!("Scanning symbols");
        let start = Instant::now();
        let inventory = self.scanner.scan_symbols()?;
        info!(
            "Scanning finished in {:.2} seconds. Total number of symbols: {}.",
            start.elapsed().as_secs_f64(),
            inventory.len()
        );

        Ok(self.inventory.get_or_init(|| inventory))
    }

    /// Whether the scanner has already run successfully.
    pub fn is_scanned(&self) -> bool {
        self.inventory.get().is_some()
    }
}

//! Discovery: combine every strategy into one list of input types.
//!
//! This module provides the main entry point, [`discover`]. A
//! [`DiscoveryRequest`] says which strategies to run; a
//! [`DiscoveryContext`] supplies the collaborators that scan, load, and
//! apply the entry-point convention. Strategies run in a fixed order and
//! their results are concatenated:
//!
//! 1. explicit type names
//! 2. glob patterns over the symbol inventory
//! 3. the entry-point type
//! 4. automatic entry-point discovery
//!
//! The inventory is scanned lazily and at most once per call, however many
//! strategies need it.

use std::collections::HashSet;

use serde::Serialize;
use tracing::{error, info};

use crate::entry::EntryPointDiscovery;
use crate::error::TypescanError;
use crate::filter::NameFilter;
use crate::glob::GlobPattern;
use crate::inventory::{LazyInventory, SymbolScanner};
use crate::loader::TypeLoader;
use crate::matcher::filter_names;
use crate::resolver::resolve_names;
use crate::types::{SourceType, TypeHandle};
use crate::Result;

/// Which discovery strategies to run.
///
/// `None` disables a strategy; `Some` of an empty list still runs it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryRequest {
    /// Fully-qualified names to resolve directly
    pub class_names: Option<Vec<String>>,
    /// Globs matched against the inventory's type names
    pub class_name_patterns: Option<Vec<String>>,
    /// Name of the application's entry-point type
    pub entry_point: Option<String>,
    /// Run the entry-point convention over the inventory
    pub automatic_entry_point: bool,
    /// Names automatic discovery must skip
    pub exclude: NameFilter,
}

impl DiscoveryRequest {
    /// Create a request with every strategy disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve these names.
    pub fn class_names<S: AsRef<str>>(mut self, names: &[S]) -> Self {
        self.class_names = Some(names.iter().map(|n| n.as_ref().to_string()).collect());
        self
    }

    /// Match these globs against the inventory.
    pub fn class_name_patterns<S: AsRef<str>>(mut self, globs: &[S]) -> Self {
        self.class_name_patterns = Some(globs.iter().map(|g| g.as_ref().to_string()).collect());
        self
    }

    /// Include the application's entry-point type.
    pub fn entry_point(mut self, name: impl Into<String>) -> Self {
        self.entry_point = Some(name.into());
        self
    }

    /// Enable automatic entry-point discovery.
    pub fn automatic_entry_point(mut self) -> Self {
        self.automatic_entry_point = true;
        self
    }

    /// Set the exclusion filter.
    pub fn exclude(mut self, filter: NameFilter) -> Self {
        self.exclude = filter;
        self
    }
}

/// The collaborators a discovery call works against.
///
/// Passed explicitly to every call; nothing is installed globally.
#[derive(Clone, Copy)]
pub struct DiscoveryContext<'a> {
    pub scanner: &'a dyn SymbolScanner,
    pub loader: &'a dyn TypeLoader,
    pub entry_points: &'a dyn EntryPointDiscovery,
}

impl<'a> DiscoveryContext<'a> {
    pub fn new(
        scanner: &'a dyn SymbolScanner,
        loader: &'a dyn TypeLoader,
        entry_points: &'a dyn EntryPointDiscovery,
    ) -> Self {
        Self {
            scanner,
            loader,
            entry_points,
        }
    }

    /// Use one value for all three roles, e.g. a [`Registry`].
    ///
    /// [`Registry`]: crate::Registry
    pub fn from_provider<P>(provider: &'a P) -> Self
    where
        P: SymbolScanner + TypeLoader + EntryPointDiscovery,
    {
        Self::new(provider, provider, provider)
    }
}

/// The types a code generator should process, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Input {
    source_types: Vec<SourceType>,
}

impl Input {
    /// Build an input from types that are already resolved.
    pub fn from_types(types: impl IntoIterator<Item = TypeHandle>) -> Self {
        Self {
            source_types: types.into_iter().map(SourceType::new).collect(),
        }
    }

    pub fn source_types(&self) -> &[SourceType] {
        &self.source_types
    }

    /// Fully-qualified names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.source_types.iter().map(|t| t.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.source_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.source_types.is_empty()
    }
}

/// Collects strategy results, dropping exact repeats.
#[derive(Default)]
struct Collector {
    types: Vec<SourceType>,
    seen: HashSet<SourceType>,
}

impl Collector {
    fn extend(&mut self, types: Vec<SourceType>) {
        for ty in types {
            if self.seen.insert(ty.clone()) {
                self.types.push(ty);
            }
        }
    }
}

/// Discover input types.
///
/// Scans the symbol inventory only if a pattern or automatic discovery
/// needs it, and then only once.
///
/// A type found again with the same context keeps only its first position.
/// This applies to automatic entry-point output as well: an entry point
/// listing the same resource twice contributes it once.
///
/// # Errors
///
/// Fails with [`TypescanError::EmptyDiscovery`] if nothing was found, and
/// passes through scanner, loader, and entry-point errors unchanged.
///
/// # Example
///
/// ```rust
/// use typescanlib::{discover, DiscoveryContext, DiscoveryRequest, Registry, TypeEntry};
///
/// let registry = Registry::from_entries(vec![
///     TypeEntry::class("a.Foo"),
///     TypeEntry::class("a.Bar"),
///     TypeEntry::class("b.Foo"),
/// ]);
/// let request = DiscoveryRequest::new().class_name_patterns(&["a.*"]);
///
/// let input = discover(&request, &DiscoveryContext::from_provider(&registry)).unwrap();
/// assert_eq!(input.names(), vec!["a.Bar", "a.Foo"]);
/// ```
pub fn discover(request: &DiscoveryRequest, ctx: &DiscoveryContext<'_>) -> Result<Input> {
    let inventory = LazyInventory::new(ctx.scanner);
    discover_with_inventory(request, ctx, &inventory)
}

/// Discover input types against an inventory the caller owns.
///
/// Reusing one [`LazyInventory`] across calls avoids scanning again; the
/// context's scanner is not consulted.
pub fn discover_with_inventory(
    request: &DiscoveryRequest,
    ctx: &DiscoveryContext<'_>,
    inventory: &LazyInventory<'_>,
) -> Result<Input> {
    let mut collector = Collector::default();

    if let Some(names) = &request.class_names {
        collector.extend(resolve_names(names, ctx.loader)?);
    }

    if let Some(globs) = &request.class_name_patterns {
        let patterns = GlobPattern::compile_all(globs);
        let candidates = inventory.scan()?.top_level_type_names();
        let names = filter_names(&candidates, &patterns);
        info!("Found {} types matching pattern.", names.len());
        collector.extend(resolve_names(&names, ctx.loader)?);
    }

    if let Some(name) = &request.entry_point {
        collector.extend(resolve_names(&[name], ctx.loader)?);
    }

    if request.automatic_entry_point {
        let exclude = |name: &str| request.exclude.is_excluded(name);
        let types =
            ctx.entry_points
                .discover_entry_point_types(inventory.scan()?, &exclude, ctx.loader)?;
        collector.extend(types);
    }

    if collector.types.is_empty() {
        error!("No input types found.");
        return Err(TypescanError::EmptyDiscovery);
    }

    Ok(Input {
        source_types: collector.types,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::NoEntryPoints;
    use crate::inventory::SymbolInventory;
    use crate::registry::{Registry, TypeEntry};
    use crate::types::{TypeId, TypeKind};
    use std::cell::{Cell, RefCell};

    /// Wraps a registry and counts how often each collaborator is used.
    struct Recording {
        registry: Registry,
        scans: Cell<usize>,
        loads: RefCell<Vec<String>>,
        seen_inventory: RefCell<Option<SymbolInventory>>,
    }

    impl Recording {
        fn new(entries: Vec<TypeEntry>) -> Self {
            Self {
                registry: Registry::from_entries(entries),
                scans: Cell::new(0),
                loads: RefCell::new(Vec::new()),
                seen_inventory: RefCell::new(None),
            }
        }

        fn ctx(&self) -> DiscoveryContext<'_> {
            DiscoveryContext::from_provider(self)
        }
    }

    impl SymbolScanner for Recording {
        fn scan_symbols(&self) -> Result<SymbolInventory> {
            self.scans.set(self.scans.get() + 1);
            self.registry.scan_symbols()
        }
    }

    impl TypeLoader for Recording {
        fn load(&self, name: &str) -> Result<TypeHandle> {
            self.loads.borrow_mut().push(name.to_string());
            self.registry.load(name)
        }
    }

    impl EntryPointDiscovery for Recording {
        fn discover_entry_point_types(
            &self,
            inventory: &SymbolInventory,
            exclude: &dyn Fn(&str) -> bool,
            loader: &dyn TypeLoader,
        ) -> Result<Vec<SourceType>> {
            *self.seen_inventory.borrow_mut() = Some(inventory.clone());
            self.registry
                .discover_entry_point_types(inventory, exclude, loader)
        }
    }

    struct BrokenScanner;

    impl SymbolScanner for BrokenScanner {
        fn scan_symbols(&self) -> Result<SymbolInventory> {
            Err(TypescanError::Enumeration("no image".to_string()))
        }
    }

    fn universe() -> Recording {
        Recording::new(vec![
            TypeEntry::class("a.Foo"),
            TypeEntry::class("a.Bar"),
            TypeEntry::class("b.Foo"),
            TypeEntry::interface("a.Api"),
            TypeEntry::class("a.sub.Deep"),
            TypeEntry::class("a.Foo$1").anonymous(),
            TypeEntry::class("a.Foo$Map").synthetic(),
            TypeEntry::class("com.example.A"),
            TypeEntry::class("com.example.B"),
            TypeEntry::class("app.App").entry_point(&["app.UserResource", "app.Internal"]),
            TypeEntry::class("app.UserResource"),
            TypeEntry::class("app.Internal"),
        ])
    }

    #[test]
    fn test_nothing_requested_is_an_error() {
        let universe = universe();

        let err = discover(&DiscoveryRequest::new(), &universe.ctx()).unwrap_err();

        assert!(matches!(err, TypescanError::EmptyDiscovery));
        assert_eq!(err.to_string(), "no input types found");
        assert_eq!(universe.scans.get(), 0);
    }

    #[test]
    fn test_explicit_names_in_order() {
        let universe = universe();
        let request = DiscoveryRequest::new().class_names(&["com.example.A", "com.example.B"]);

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(input.names(), vec!["com.example.A", "com.example.B"]);
        assert_eq!(universe.scans.get(), 0);
    }

    #[test]
    fn test_patterns_match_sorted_inventory() {
        let universe = universe();
        let request = DiscoveryRequest::new().class_name_patterns(&["a.*"]);

        let input = discover(&request, &universe.ctx()).unwrap();

        // a.Foo$1 and a.Foo$Map cannot match `*`; a.sub.Deep is nested too deep
        assert_eq!(input.names(), vec!["a.Api", "a.Bar", "a.Foo"]);
        assert_eq!(universe.scans.get(), 1);
    }

    #[test]
    fn test_patterns_skip_unrepresentable_types() {
        let universe = universe();
        let request = DiscoveryRequest::new().class_name_patterns(&["a.**"]);

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(
            input.names(),
            vec!["a.Api", "a.Bar", "a.Foo", "a.sub.Deep"]
        );
    }

    #[test]
    fn test_end_to_end_with_plain_inventory() {
        let universe = Recording::new(vec![
            TypeEntry::class("a.Foo"),
            TypeEntry::class("a.Bar"),
            TypeEntry::class("b.Foo"),
        ]);
        let request = DiscoveryRequest::new().class_name_patterns(&["a.*"]);

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(input.names(), vec!["a.Bar", "a.Foo"]);
        assert_eq!(*universe.loads.borrow(), vec!["a.Bar", "a.Foo"]);
    }

    #[test]
    fn test_patterns_matching_nothing_is_an_error() {
        let universe = universe();
        let request = DiscoveryRequest::new().class_name_patterns(&["zzz.**"]);

        let err = discover(&request, &universe.ctx()).unwrap_err();

        assert!(matches!(err, TypescanError::EmptyDiscovery));
    }

    #[test]
    fn test_entry_point_name() {
        let universe = universe();
        let request = DiscoveryRequest::new().entry_point("app.App");

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(input.names(), vec!["app.App"]);
        assert_eq!(universe.scans.get(), 0);
    }

    #[test]
    fn test_automatic_entry_point_respects_exclusions() {
        let universe = universe();
        let request = DiscoveryRequest::new()
            .automatic_entry_point()
            .exclude(NameFilter::new().exclude_pattern("app.Intern*"));

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(input.names(), vec!["app.UserResource"]);
        assert_eq!(
            input.source_types()[0].used_in_type.as_deref(),
            Some("app.App")
        );
    }

    #[test]
    fn test_strategy_order_and_single_scan() {
        let universe = universe();
        let request = DiscoveryRequest::new()
            .class_names(&["com.example.B"])
            .class_name_patterns(&["b.*"])
            .entry_point("app.App")
            .automatic_entry_point();

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(
            input.names(),
            vec![
                "com.example.B",
                "b.Foo",
                "app.App",
                "app.UserResource",
                "app.Internal"
            ]
        );
        assert_eq!(universe.scans.get(), 1);
        let seen = universe.seen_inventory.borrow();
        assert!(seen.as_ref().unwrap().contains("b.Foo"));
    }

    #[test]
    fn test_repeated_types_keep_first_occurrence() {
        let universe = universe();
        let request = DiscoveryRequest::new()
            .class_names(&["a.Foo", "a.Foo"])
            .class_name_patterns(&["a.Foo"]);

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(input.names(), vec!["a.Foo"]);
    }

    #[test]
    fn test_same_type_with_different_context_is_kept() {
        let universe = universe();
        let request = DiscoveryRequest::new()
            .class_names(&["app.UserResource"])
            .automatic_entry_point();

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(
            input.names(),
            vec!["app.UserResource", "app.UserResource", "app.Internal"]
        );
        assert!(input.source_types()[0].used_in_type.is_none());
        assert_eq!(
            input.source_types()[1].used_in_type.as_deref(),
            Some("app.App")
        );
    }

    #[test]
    fn test_entry_point_listing_a_resource_twice_contributes_it_once() {
        let universe = Recording::new(vec![
            TypeEntry::class("app.App").entry_point(&["app.Res", "app.Other", "app.Res"]),
            TypeEntry::class("app.Res"),
            TypeEntry::class("app.Other"),
        ]);
        let request = DiscoveryRequest::new().automatic_entry_point();

        let input = discover(&request, &universe.ctx()).unwrap();

        assert_eq!(input.names(), vec!["app.Res", "app.Other"]);
    }

    #[test]
    fn test_unknown_explicit_name_fails() {
        let universe = universe();
        let request = DiscoveryRequest::new()
            .class_names(&["a.Foo", "a.Nope"])
            .class_name_patterns(&["a.*"]);

        let err = discover(&request, &universe.ctx()).unwrap_err();

        assert!(matches!(err, TypescanError::Resolution { ref name, .. } if name == "a.Nope"));
        assert_eq!(universe.scans.get(), 0);
    }

    #[test]
    fn test_scanner_failure_passes_through() {
        let universe = universe();
        let ctx = DiscoveryContext::new(&BrokenScanner, &universe, &NoEntryPoints);
        let request = DiscoveryRequest::new()
            .class_names(&["a.Foo"])
            .class_name_patterns(&["a.*"]);

        let err = discover(&request, &ctx).unwrap_err();

        assert!(matches!(err, TypescanError::Enumeration(ref msg) if msg == "no image"));
    }

    #[test]
    fn test_no_entry_points_alone_is_empty() {
        let universe = universe();
        let ctx = DiscoveryContext::new(&universe, &universe, &NoEntryPoints);
        let request = DiscoveryRequest::new().automatic_entry_point();

        let err = discover(&request, &ctx).unwrap_err();

        assert!(matches!(err, TypescanError::EmptyDiscovery));
        assert_eq!(universe.scans.get(), 1);
    }

    #[test]
    fn test_shared_inventory_across_calls() {
        let universe = universe();
        let ctx = universe.ctx();
        let inventory = LazyInventory::new(&universe);

        let first = DiscoveryRequest::new().class_name_patterns(&["b.*"]);
        let second = DiscoveryRequest::new().automatic_entry_point();
        discover_with_inventory(&first, &ctx, &inventory).unwrap();
        discover_with_inventory(&second, &ctx, &inventory).unwrap();

        assert_eq!(universe.scans.get(), 1);
    }

    #[test]
    fn test_input_from_types() {
        let input = Input::from_types(vec![
            TypeHandle::new(TypeId(4), "x.One", TypeKind::Class),
            TypeHandle::new(TypeId(9), "x.Two", TypeKind::Interface),
        ]);

        assert_eq!(input.len(), 2);
        assert_eq!(input.names(), vec!["x.One", "x.Two"]);
        assert!(input.source_types().iter().all(|t| t.used_in_type.is_none()));
        assert!(Input::default().is_empty());
    }
}

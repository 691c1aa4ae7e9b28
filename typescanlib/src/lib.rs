//! # typescanlib
//!
//! Decide which program types a code generator should process.
//!
//! ## Overview
//!
//! Callers describe their input in several ways at once: explicit type
//! names, glob patterns over fully-qualified names, the application's
//! entry-point type, or a request to find entry points automatically. This
//! library resolves all of them into one ordered, deduplicated list of
//! loaded types.
//!
//! The program being inspected is reached through three traits:
//!
//! - [`SymbolScanner`]: enumerates every known symbol (slow; run at most once)
//! - [`TypeLoader`]: loads a type by name
//! - [`EntryPointDiscovery`]: finds types through an entry-point convention
//!
//! [`Registry`] implements all three over an in-memory symbol table that
//! can be loaded from JSON.
//!
//! ## Glob syntax
//!
//! - `*` matches within one name segment (never `.` or `$`)
//! - `**` matches across segments
//!
//! `com.example.*` matches `com.example.Foo` but not `com.example.sub.Foo`;
//! `com.example.**` matches both.
//!
//! ## Example
//!
//! ```rust
//! use typescanlib::{discover, DiscoveryContext, DiscoveryRequest, NameFilter, Registry, TypeEntry};
//!
//! let registry = Registry::from_entries(vec![
//!     TypeEntry::class("com.example.User"),
//!     TypeEntry::class("com.example.dto.UserDto"),
//!     TypeEntry::class("com.example.App").entry_point(&["com.example.UserResource"]),
//!     TypeEntry::class("com.example.UserResource"),
//! ]);
//!
//! let request = DiscoveryRequest::new()
//!     .class_names(&["com.example.User"])
//!     .class_name_patterns(&["com.example.dto.*"])
//!     .automatic_entry_point()
//!     .exclude(NameFilter::new().exclude_pattern("**Internal"));
//!
//! let input = discover(&request, &DiscoveryContext::from_provider(&registry)).unwrap();
//! assert_eq!(
//!     input.names(),
//!     vec!["com.example.User", "com.example.dto.UserDto", "com.example.UserResource"]
//! );
//! ```

pub mod discover;
pub mod entry;
pub mod error;
pub mod filter;
pub mod glob;
pub mod inventory;
pub mod loader;
pub mod matcher;
pub mod registry;
pub mod resolver;
pub mod settings;
pub mod types;

pub use discover::{discover, discover_with_inventory, DiscoveryContext, DiscoveryRequest, Input};
pub use entry::{EntryPointDiscovery, NoEntryPoints};
pub use error::TypescanError;
pub use filter::NameFilter;
pub use crate::glob::GlobPattern;
pub use inventory::{LazyInventory, SymbolInventory, SymbolScanner};
pub use loader::TypeLoader;
pub use matcher::{filter_names, matches_any};
pub use registry::{Registry, TypeEntry};
pub use resolver::resolve_names;
pub use settings::DiscoverySettings;
pub use types::{SourceType, TypeHandle, TypeId, TypeKind};

/// Result type for typescanlib operations
pub type Result<T> = std::result::Result<T, TypescanError>;

//! Loading types by name.

use crate::types::TypeHandle;
use crate::Result;

/// Turns a fully-qualified name into a loaded type.
///
/// An unknown name must be reported as
/// [`TypescanError::Resolution`](crate::TypescanError::Resolution)
/// carrying that name.
pub trait TypeLoader {
    fn load(&self, name: &str) -> Result<TypeHandle>;
}

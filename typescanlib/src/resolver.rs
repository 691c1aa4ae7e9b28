//! Resolving names into source types.

use tracing::debug;

use crate::loader::TypeLoader;
use crate::types::SourceType;
use crate::Result;

/// Load each name and keep the types code can be generated for.
///
/// Stops at the first name the loader cannot resolve. Synthetic and
/// anonymous types are skipped; the rest keep their input order.
pub fn resolve_names<S: AsRef<str>>(names: &[S], loader: &dyn TypeLoader) -> Result<Vec<SourceType>> {
    let mut types = Vec::with_capacity(names.len());

    for name in names {
        let ty = loader.load(name.as_ref())?;
        if !ty.is_representable() {
            debug!(name = %ty.name, synthetic = ty.synthetic, anonymous = ty.anonymous, "Skipping type");
            continue;
        }
        types.push(SourceType::new(ty));
    }

    Ok(types)
}

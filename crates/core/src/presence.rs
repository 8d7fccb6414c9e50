//! Filesystem presence probes
//!
//! The target tree is the sole source of truth for what has already been
//! provisioned. These probes never mutate anything and never error: a
//! missing parent directory simply means "not present".

use std::path::Path;

use crate::deps::BuildRecipe;

/// True iff `path` exists and is a directory
///
/// No recursive content validation: an existing checkout is trusted as-is.
pub fn is_present(path: &Path) -> bool {
    path.is_dir()
}

/// True iff a native build under `root` has already completed
///
/// Requires the generated header plus at least one of the alternative
/// library paths; the host's install layout decides between `lib` and
/// `lib64`. The markers are written only by the build tool itself.
pub fn is_bootstrapped(root: &Path, recipe: &BuildRecipe) -> bool {
    root.join(&recipe.include_marker).is_file()
        && recipe.lib_markers.iter().any(|lib| root.join(lib).is_file())
}

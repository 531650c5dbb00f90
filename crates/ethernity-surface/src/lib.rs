//! Ethernity Surface
//!
//! Lists the externally callable functions of a compiled Solidity contract,
//! with visibility, mutability, modifiers and types, including everything
//! inherited from its base contracts.

pub mod config;
pub mod format;
pub mod loader;
pub mod reconcile;
pub mod walker;

use std::io::Write;
use std::path::Path;

use ethernity_core::{ArtifactSource, Result};
use tracing::info;

pub use config::SurfaceConfig;
pub use format::{format_function, format_inherited_function, Palette, Tag};
pub use loader::{read_artifact, FsArtifactSource, MemoryArtifactSource};
pub use reconcile::{reconcile, render, Resolution};
pub use walker::{ContractSurface, InheritanceTree, InheritanceWalker, ParentFunctions};

/// Resolves every ABI function of the artifact at `artifact` against
/// declarations found through `source`.
pub fn list_functions<S: ArtifactSource>(
    artifact: &Path,
    source: S,
    config: &SurfaceConfig,
) -> Result<Vec<Resolution>> {
    let root = read_artifact(artifact)?;
    let palette = Palette::new(config.color);
    let surface = ContractSurface::build(&root, source, palette, config.max_depth)?;
    let resolutions = reconcile(&root.abi, &surface);

    info!(
        functions = resolutions.len(),
        unresolved = resolutions.iter().filter(|r| !r.is_resolved()).count(),
        levels = surface.tree.depth(),
        "surface resolved"
    );
    Ok(resolutions)
}

/// Full pipeline against the compiler output directory from `config`.
pub fn run<W: Write>(artifact: &Path, config: &SurfaceConfig, out: &mut W) -> Result<()> {
    let source = FsArtifactSource::new(&config.artifacts_dir);
    let resolutions = list_functions(artifact, source, config)?;
    render(&resolutions, Palette::new(config.color), out)
}

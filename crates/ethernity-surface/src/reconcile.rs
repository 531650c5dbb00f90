//! Matching ABI entries against the rendered declarations.

use std::io::Write;

use ethernity_core::utils::format_selector;
use ethernity_core::{AbiEntry, Result};
use tracing::warn;

use crate::format::{Palette, Tag};
use crate::walker::ContractSurface;

/// Outcome for a single ABI function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Declared by the root contract itself.
    Own { name: String, line: String },
    /// Inherited from `contract`.
    Inherited { name: String, contract: String, line: String },
    /// No declaration found in the contract or any of its ancestors.
    Unresolved { name: String },
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, Resolution::Unresolved { .. })
    }
}

/// Resolves every `function` entry of `abi`, in ABI order. Other entry types
/// (constructor, event, error, fallback, receive) are skipped.
pub fn reconcile(abi: &[AbiEntry], surface: &ContractSurface) -> Vec<Resolution> {
    abi.iter()
        .filter(|entry| entry.is_function())
        .map(|entry| resolve_entry(entry, surface))
        .collect()
}

fn resolve_entry(entry: &AbiEntry, surface: &ContractSurface) -> Resolution {
    let name = entry.name.clone();
    if let Some(line) = surface.functions.get(&entry.name) {
        return Resolution::Own { name, line: line.clone() };
    }
    match surface.tree.find(&entry.name) {
        Some((parent, line)) => Resolution::Inherited {
            name,
            contract: parent.contract.clone(),
            line: line.to_string(),
        },
        None => {
            warn!(
                function = %entry.name,
                signature = %entry.signature(),
                selector = %format_selector(&entry.selector()),
                "no declaration found for ABI function"
            );
            Resolution::Unresolved { name }
        }
    }
}

/// Writes the listing, one line per resolved function and two lines
/// (marker, then name) per unresolved one.
pub fn render<W: Write>(resolutions: &[Resolution], palette: Palette, out: &mut W) -> Result<()> {
    for resolution in resolutions {
        match resolution {
            Resolution::Own { line, .. } | Resolution::Inherited { line, .. } => {
                writeln!(out, "{line}")?;
            }
            Resolution::Unresolved { name } => {
                writeln!(
                    out,
                    "{}ERROR{} unknown function source:",
                    palette.tag(Tag::Error),
                    palette.reset()
                )?;
                writeln!(out, "{name}")?;
            }
        }
    }
    Ok(())
}

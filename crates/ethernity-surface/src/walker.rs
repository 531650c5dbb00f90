//! Function collection across a contract's inheritance graph.

use std::collections::HashMap;

use ethernity_core::{ArtifactSource, ContractArtifact, Error, FunctionNode, Result, SourceUnit};
use tracing::{debug, trace};

use crate::format::{format_function, format_inherited_function, Palette};

/// Function name to rendered line.
pub type FunctionMap = HashMap<String, String>;

/// Rendered functions of one base contract.
#[derive(Debug, Clone)]
pub struct ParentFunctions {
    pub contract: String,
    pub functions: FunctionMap,
}

/// Base contracts grouped by inheritance distance from the root.
///
/// Level 0 holds the root's direct bases. Inside a level, entries keep the
/// order in which they were appended during the walk.
#[derive(Debug, Clone, Default)]
pub struct InheritanceTree {
    levels: Vec<Vec<ParentFunctions>>,
}

impl InheritanceTree {
    pub fn levels(&self) -> &[Vec<ParentFunctions>] {
        &self.levels
    }

    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// First declaration of `name`, shallowest level first.
    pub fn find(&self, name: &str) -> Option<(&ParentFunctions, &str)> {
        self.levels
            .iter()
            .flatten()
            .find_map(|parent| parent.functions.get(name).map(|line| (parent, line.as_str())))
    }
}

/// Recursive walker that loads base contracts on demand and fills an
/// [`InheritanceTree`].
pub struct InheritanceWalker<S> {
    source: S,
    palette: Palette,
    max_depth: usize,
    tree: InheritanceTree,
}

impl<S: ArtifactSource> InheritanceWalker<S> {
    pub fn new(source: S, palette: Palette, max_depth: usize) -> Self {
        Self { source, palette, max_depth, tree: InheritanceTree::default() }
    }

    /// Collects the function definitions declared directly in `ast`, in
    /// source order. Base contracts are walked first, last declared base
    /// first, into level `depth`.
    pub fn extract_function_nodes<'a>(
        &mut self,
        ast: &'a SourceUnit,
        depth: usize,
    ) -> Result<Vec<&'a FunctionNode>> {
        let mut functions = Vec::new();
        for contract in ast.contracts() {
            for base in contract.base_names().rev() {
                self.populate_parent_functions(base, depth)?;
            }
            functions.extend(contract.functions());
        }
        Ok(functions)
    }

    /// Loads `contract`, walks its own bases one level deeper and appends its
    /// rendered functions to level `depth`. Constructors are not inherited.
    pub fn populate_parent_functions(&mut self, contract: &str, depth: usize) -> Result<()> {
        if depth >= self.max_depth {
            return Err(Error::DepthExceeded {
                contract: contract.to_string(),
                max_depth: self.max_depth,
            });
        }
        while self.tree.levels.len() <= depth {
            self.tree.levels.push(Vec::new());
        }

        let artifact = self.source.load(contract)?;
        let nodes = self.extract_function_nodes(&artifact.ast, depth + 1)?;

        let mut functions = FunctionMap::new();
        for node in nodes.into_iter().filter(|node| !node.is_constructor()) {
            let name = node.display_name();
            trace!(contract, function = name, "formatting inherited function");
            let line = format_inherited_function(contract, node, name, self.palette)?;
            functions.insert(name.to_string(), line);
        }

        debug!(contract, depth, functions = functions.len(), "base contract resolved");
        self.tree.levels[depth].push(ParentFunctions {
            contract: contract.to_string(),
            functions,
        });
        Ok(())
    }

    pub fn finish(self) -> InheritanceTree {
        self.tree
    }
}

/// Rendered functions of the root contract together with everything it
/// inherits. Built once, read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct ContractSurface {
    pub functions: FunctionMap,
    pub tree: InheritanceTree,
}

impl ContractSurface {
    /// Walks `root` and its whole inheritance graph.
    pub fn build<S: ArtifactSource>(
        root: &ContractArtifact,
        source: S,
        palette: Palette,
        max_depth: usize,
    ) -> Result<Self> {
        let mut walker = InheritanceWalker::new(source, palette, max_depth);
        let nodes = walker.extract_function_nodes(&root.ast, 0)?;

        // duplicate names: last declaration wins
        let mut functions = FunctionMap::new();
        for node in nodes {
            let name = node.display_name();
            trace!(function = name, "formatting function");
            functions.insert(name.to_string(), format_function(node, name, palette)?);
        }

        Ok(Self { functions, tree: walker.finish() })
    }
}

/*!
 * Ethernity Traits
 * 
 * Traits comuns usados em toda a workspace Ethernity
 */

use crate::error::Result;
use crate::types::ContractArtifact;

/// Fonte de artefatos compilados, indexada pelo nome do contrato
pub trait ArtifactSource {
    /// Carrega o artefato do contrato `contract`
    fn load(&self, contract: &str) -> Result<ContractArtifact>;
}

impl<S: ArtifactSource + ?Sized> ArtifactSource for &S {
    fn load(&self, contract: &str) -> Result<ContractArtifact> {
        (**self).load(contract)
    }
}

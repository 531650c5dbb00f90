/*!
 * Ethernity Utils
 * 
 * Utilitários comuns usados em toda a workspace Ethernity
 */

use std::path::{Path, PathBuf};
use tiny_keccak::{Hasher, Keccak};

/// Calcula o hash Keccak-256 de dados
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut result = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut result);
    result
}

/// Seletor de função: primeiros 4 bytes do Keccak-256 da assinatura
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Formata um seletor para exibição
pub fn format_selector(selector: &[u8; 4]) -> String {
    format!("0x{}", hex::encode(selector))
}

/// Caminho do artefato de `contract` dentro do diretório de saída do compilador
pub fn artifact_path(artifacts_dir: &Path, contract: &str) -> PathBuf {
    artifacts_dir
        .join(format!("{contract}.sol"))
        .join(format!("{contract}.json"))
}

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuração da listagem de superfície
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Diretório de saída do compilador com os artefatos dos contratos base
    pub artifacts_dir: PathBuf,
    /// Profundidade máxima da cadeia de herança
    pub max_depth: usize,
    /// Habilita cores ANSI na saída
    pub color: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: PathBuf::from("out"),
            max_depth: 64,
            // respeita NO_COLOR / CLICOLOR / CLICOLOR_FORCE
            color: colored::control::SHOULD_COLORIZE.should_colorize(),
        }
    }
}

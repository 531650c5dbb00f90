use std::path::PathBuf;
use thiserror::Error;

/// Erros comuns da biblioteca Ethernity
#[derive(Error, Debug)]
pub enum Error {
    /// Falha ao ler um artefato do disco
    #[error("Erro de leitura em {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Falha ao escrever a saída
    #[error("Erro de escrita: {0}")]
    Write(#[from] std::io::Error),

    /// Erro de decodificação de dados
    #[error("Erro de decodificação: {0}")]
    DecodeError(String),

    /// Visibilidade fora do conjunto conhecido
    #[error("Visibilidade não reconhecida: {0}")]
    UnknownVisibility(String),

    /// Mutabilidade de estado fora do conjunto conhecido
    #[error("Mutabilidade não reconhecida: {0}")]
    UnknownMutability(String),

    /// Cadeia de herança mais profunda que o limite configurado
    #[error("Profundidade máxima de herança ({max_depth}) excedida em {contract}")]
    DepthExceeded { contract: String, max_depth: usize },

    /// Recurso não encontrado
    #[error("Não encontrado: {0}")]
    NotFound(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::DecodeError(err.to_string())
    }
}

/// Tipo de resultado usado em toda a biblioteca
pub type Result<T> = std::result::Result<T, Error>;

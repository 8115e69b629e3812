use thiserror::Error;

/// Failure taxonomy for the public engine operations.
///
/// Expected conditions (missing creators, missing data, bad arguments)
/// are returned as typed variants with a message suitable for direct
/// display. Unexpected faults are logged at the engine boundary with
/// full context and surface only as the generic `Internal` variant.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("criador não encontrado: {0}")]
    CreatorNotFound(String),

    #[error("conteúdo não encontrado: {0}")]
    ContentNotFound(String),

    #[error("dados insuficientes: {0}")]
    InsufficientData(String),

    #[error("argumento inválido: {0}")]
    InvalidArgument(String),

    #[error("erro interno ao processar a análise")]
    Internal,
}

impl AnalyticsError {
    pub fn is_internal(&self) -> bool {
        matches!(self, AnalyticsError::Internal)
    }
}

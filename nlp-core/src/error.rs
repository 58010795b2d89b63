//! # Taxonomia de Erros
//!
//! Três condições chegam até a fronteira HTTP ([`AnalysisError`]); as demais
//! ([`ModelError`], [`ProjectionError`]) são detalhes internos que acabam
//! convertidos em `AnalysisFailed` com a mensagem original preservada.

use thiserror::Error;

/// Erros visíveis ao chamador de uma análise.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// Texto vazio ou composto apenas de espaços (HTTP 422).
    #[error("Input text cannot be empty.")]
    InvalidInput,

    /// O modelo não foi carregado ou falhou ao carregar (HTTP 503).
    #[error("NLP model is not available.")]
    ModelUnavailable,

    /// Qualquer falha ao invocar o modelo ou projetar sua saída (HTTP 500).
    #[error("An error occurred during text analysis: {0}")]
    AnalysisFailed(String),
}

/// Falhas do modelo de anotação: carregamento e inferência.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown model identifier '{0}'")]
    UnknownModel(String),

    #[error("failed to read lexicon file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid lexicon file: {0}")]
    Lexicon(#[from] serde_json::Error),

    #[error("model produced no document for the submitted batch")]
    EmptyBatch,

    #[error("inference failed: {0}")]
    Inference(String),
}

/// Inconsistências entre o documento produzido pelo modelo e o texto original.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProjectionError {
    #[error("offset {0} is not a character boundary of the document text")]
    InvalidOffset(usize),

    #[error("token {token} points to missing head {head}")]
    DanglingHead { token: usize, head: usize },
}

impl From<ModelError> for AnalysisError {
    fn from(err: ModelError) -> Self {
        AnalysisError::AnalysisFailed(err.to_string())
    }
}

impl From<ProjectionError> for AnalysisError {
    fn from(err: ProjectionError) -> Self {
        AnalysisError::AnalysisFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_public_contract() {
        assert_eq!(AnalysisError::InvalidInput.to_string(), "Input text cannot be empty.");
        assert_eq!(AnalysisError::ModelUnavailable.to_string(), "NLP model is not available.");
        assert_eq!(
            AnalysisError::AnalysisFailed("boom".into()).to_string(),
            "An error occurred during text analysis: boom"
        );
    }

    #[test]
    fn test_projection_error_becomes_analysis_failed() {
        let err: AnalysisError = ProjectionError::InvalidOffset(3).into();
        assert_eq!(
            err,
            AnalysisError::AnalysisFailed("offset 3 is not a character boundary of the document text".into())
        );
    }
}

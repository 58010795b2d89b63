//! # Pipeline de Análise
//!
//! Liga o modelo ao projetor nos dois modos de entrega:
//!
//! - **Completo** ([`analyze`]): anota o texto e projeta todos os tokens,
//!   entidades e sentenças de uma vez.
//! - **Incremental** ([`RecordCursor`]): percorre um documento já anotado
//!   produzindo um [`StreamRecord`] por vez, primeiro todos os tokens e depois
//!   todas as entidades. Cada registro vira uma linha NDJSON ([`StreamLine`]).

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::document::Doc;
use crate::error::{AnalysisError, ModelError, ProjectionError};
use crate::model::AnnotationModel;
use crate::projector::{self, AnalysisResult, CharOffsets, EntityRecord, TokenRecord};

/// Rejeita texto vazio ou composto apenas de espaços.
pub fn validate_text(text: &str) -> Result<&str, AnalysisError> {
    if text.trim().is_empty() {
        return Err(AnalysisError::InvalidInput);
    }
    Ok(text)
}

/// Envia o texto ao modelo como lote de um item e devolve o documento.
pub fn annotate(model: &dyn AnnotationModel, text: &str) -> Result<Doc, AnalysisError> {
    let doc = model
        .pipe(&[text])?
        .into_iter()
        .next()
        .ok_or(ModelError::EmptyBatch)?;
    debug!(
        model = model.name(),
        tokens = doc.tokens.len(),
        entities = doc.ents.len(),
        sentences = doc.sents.len(),
        "texto anotado"
    );
    Ok(doc)
}

/// Análise completa: anotação seguida da projeção de todo o documento.
pub fn analyze(model: &dyn AnnotationModel, text: &str) -> Result<AnalysisResult, AnalysisError> {
    let doc = annotate(model, text)?;
    Ok(projector::project_document(&doc)?)
}

/// Um registro do modo incremental.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum StreamRecord {
    Token(TokenRecord),
    Entity(EntityRecord),
}

/// Uma linha do corpo NDJSON: um registro ou um erro terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StreamLine {
    Record(StreamRecord),
    Error { error: String },
}

impl StreamLine {
    pub fn error(err: &AnalysisError) -> Self {
        StreamLine::Error { error: err.to_string() }
    }

    /// Serializa como uma linha JSON terminada em `\n`.
    pub fn to_ndjson(&self) -> String {
        let mut line = serde_json::to_string(self)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string());
        line.push('\n');
        line
    }
}

/// Cursor sobre os registros de um documento: tokens, depois entidades.
///
/// Após um erro de projeção o cursor termina.
pub struct RecordCursor {
    doc: Doc,
    offsets: CharOffsets,
    next_token: usize,
    next_entity: usize,
    failed: bool,
}

impl RecordCursor {
    pub fn new(doc: Doc) -> Self {
        let offsets = CharOffsets::new(&doc.text);
        Self {
            doc,
            offsets,
            next_token: 0,
            next_entity: 0,
            failed: false,
        }
    }
}

impl Iterator for RecordCursor {
    type Item = Result<StreamRecord, ProjectionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        let item = if self.next_token < self.doc.tokens.len() {
            let i = self.next_token;
            self.next_token += 1;
            projector::project_token(&self.doc, &self.offsets, i).map(StreamRecord::Token)
        } else if self.next_entity < self.doc.ents.len() {
            let i = self.next_entity;
            self.next_entity += 1;
            projector::project_entity(&self.doc.ents[i], &self.offsets).map(StreamRecord::Entity)
        } else {
            return None;
        };

        self.failed = item.is_err();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EnglishModel;

    const REFERENCE: &str = "Apple is looking at buying U.K. startup for $1 billion.";

    struct FailingModel;

    impl AnnotationModel for FailingModel {
        fn name(&self) -> &str {
            "failing"
        }

        fn pipe(&self, _texts: &[&str]) -> Result<Vec<Doc>, ModelError> {
            Err(ModelError::Inference("out of memory".into()))
        }
    }

    struct SilentModel;

    impl AnnotationModel for SilentModel {
        fn name(&self) -> &str {
            "silent"
        }

        fn pipe(&self, _texts: &[&str]) -> Result<Vec<Doc>, ModelError> {
            Ok(vec![])
        }
    }

    #[test]
    fn test_validate_text() {
        assert_eq!(validate_text(""), Err(AnalysisError::InvalidInput));
        assert_eq!(validate_text(" \n\t "), Err(AnalysisError::InvalidInput));
        assert_eq!(validate_text(" hi "), Ok(" hi "));
    }

    #[test]
    fn test_analyze_reference_sentence() {
        let model = EnglishModel::build();
        let result = analyze(&model, REFERENCE).unwrap();

        assert_eq!(result.tokens.len(), 12);
        let labels: Vec<(&str, &str)> = result
            .entities
            .iter()
            .map(|e| (e.text.as_str(), e.label.as_str()))
            .collect();
        assert!(labels.contains(&("Apple", "ORG")));
        assert!(labels.contains(&("U.K.", "GPE")));
        assert!(labels.contains(&("$1 billion", "MONEY")));
    }

    #[test]
    fn test_token_and_sentence_invariants() {
        let model = EnglishModel::build();
        let text = "Dr. Ada Lovelace wrote notes in 1843. They're famous now! Isn't it great?";
        let result = analyze(&model, text).unwrap();

        for token in &result.tokens {
            assert_eq!(token.end - token.start, token.text.chars().count());
            assert_eq!(token.is_entity, token.entity_type.is_some());
        }
        assert_eq!(result.sentences.len(), 3);
        for pair in result.sentences.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
        for pair in result.entities.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }

    #[test]
    fn test_analyze_is_idempotent() {
        let model = EnglishModel::build();
        let first = serde_json::to_string(&analyze(&model, REFERENCE).unwrap()).unwrap();
        let second = serde_json::to_string(&analyze(&model, REFERENCE).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_model_failures_become_analysis_failed() {
        match analyze(&FailingModel, "hello") {
            Err(AnalysisError::AnalysisFailed(msg)) => assert!(msg.contains("out of memory")),
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(analyze(&SilentModel, "hello"), Err(AnalysisError::AnalysisFailed(_))));
        assert_eq!(
            AnalysisError::from(ModelError::Inference("boom".into())).to_string(),
            "An error occurred during text analysis: inference failed: boom"
        );
    }

    #[test]
    fn test_cursor_yields_tokens_then_entities() {
        let model = EnglishModel::build();
        let doc = annotate(&model, REFERENCE).unwrap();
        let (tokens, ents) = (doc.tokens.len(), doc.ents.len());
        let records: Vec<StreamRecord> = RecordCursor::new(doc).map(Result::unwrap).collect();
        assert_eq!(records.len(), tokens + ents);
        assert!(records[..tokens].iter().all(|r| matches!(r, StreamRecord::Token(_))));
        assert!(records[tokens..].iter().all(|r| matches!(r, StreamRecord::Entity(_))));
    }

    #[test]
    fn test_cursor_stops_after_error() {
        let model = EnglishModel::build();
        let mut doc = annotate(&model, "Paris is lovely.").unwrap();
        doc.tokens[1].head = 99;

        let items: Vec<_> = RecordCursor::new(doc).collect();
        assert_eq!(items.len(), 2);
        assert!(items[0].is_ok());
        assert_eq!(items[1], Err(ProjectionError::DanglingHead { token: 1, head: 99 }));
    }

    #[test]
    fn test_stream_line_format() {
        let entity = EntityRecord { text: "Apple".into(), start: 0, end: 5, label: "ORG".into() };
        let line = StreamLine::Record(StreamRecord::Entity(entity)).to_ndjson();
        assert_eq!(
            line,
            "{\"type\":\"entity\",\"data\":{\"text\":\"Apple\",\"start\":0,\"end\":5,\"label\":\"ORG\"}}\n"
        );

        let line = StreamLine::error(&AnalysisError::ModelUnavailable).to_ndjson();
        assert_eq!(line, "{\"error\":\"NLP model is not available.\"}\n");
    }
}

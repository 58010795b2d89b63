//! Corpo NDJSON do `/analyze-stream`.
//!
//! A anotação roda uma única vez em `spawn_blocking`; depois os registros
//! saem um a um do [`RecordCursor`], cedendo o executor entre eles para que o
//! cliente receba as linhas à medida que são produzidas.

use std::convert::Infallible;
use std::sync::Arc;

use axum::body::Body;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use futures::stream::{self, Stream, StreamExt};
use nlp_core::pipeline;
use nlp_core::{AnalysisError, AnnotationModel, Doc, RecordCursor, StreamLine};
use tracing::{debug, warn};

use crate::state::ModelHolder;

pub const NDJSON: &str = "application/x-ndjson";

enum Phase {
    Pending { holder: Arc<ModelHolder>, text: String },
    Records(RecordCursor),
    Done,
}

/// Resposta 200 com o corpo em streaming.
///
/// A disponibilidade do modelo só é verificada quando o corpo começa a ser
/// consumido, então um modelo ausente vira uma linha de erro e não um 503.
pub fn ndjson_response(holder: Arc<ModelHolder>, text: String) -> Response {
    let body = Body::from_stream(record_lines(holder, text).map(Ok::<_, Infallible>));
    ([(header::CONTENT_TYPE, NDJSON)], body).into_response()
}

/// Linhas NDJSON: tokens, depois entidades, ou uma linha de erro terminal.
pub fn record_lines(holder: Arc<ModelHolder>, text: String) -> impl Stream<Item = String> + Send {
    stream::unfold(Phase::Pending { holder, text }, |phase| async move {
        match phase {
            Phase::Pending { holder, text } => {
                let Some(model) = holder.get().await else {
                    return Some(error_line(AnalysisError::ModelUnavailable));
                };
                match annotate_blocking(model, text).await {
                    Ok(doc) => next_record(RecordCursor::new(doc)),
                    Err(err) => Some(error_line(err)),
                }
            }
            Phase::Records(cursor) => {
                tokio::task::yield_now().await;
                next_record(cursor)
            }
            Phase::Done => None,
        }
    })
}

async fn annotate_blocking(model: Arc<dyn AnnotationModel>, text: String) -> Result<Doc, AnalysisError> {
    tokio::task::spawn_blocking(move || pipeline::annotate(model.as_ref(), &text))
        .await
        .map_err(|e| AnalysisError::AnalysisFailed(e.to_string()))?
}

fn next_record(mut cursor: RecordCursor) -> Option<(String, Phase)> {
    match cursor.next() {
        Some(Ok(record)) => Some((StreamLine::Record(record).to_ndjson(), Phase::Records(cursor))),
        Some(Err(err)) => Some(error_line(err.into())),
        None => {
            debug!("stream concluído");
            None
        }
    }
}

fn error_line(err: AnalysisError) -> (String, Phase) {
    warn!(error = %err, "stream encerrado com erro");
    (StreamLine::error(&err).to_ndjson(), Phase::Done)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nlp_core::{EnglishModel, StreamRecord};

    async fn collect(holder: ModelHolder, text: &str) -> Vec<StreamLine> {
        record_lines(Arc::new(holder), text.to_string())
            .map(|line| {
                assert!(line.ends_with('\n'));
                serde_json::from_str(line.trim_end()).unwrap()
            })
            .collect::<Vec<_>>()
            .await
    }

    #[tokio::test]
    async fn test_tokens_then_entities() {
        let text = "Apple is looking at buying U.K. startup for $1 billion.";
        let model = EnglishModel::build();
        let expected = nlp_core::analyze(&model, text).unwrap();
        let lines = collect(ModelHolder::preloaded(Arc::new(model)), text).await;

        let tokens = lines
            .iter()
            .take_while(|l| matches!(l, StreamLine::Record(StreamRecord::Token(_))))
            .count();
        assert_eq!(tokens, expected.tokens.len());
        assert!(lines[tokens..]
            .iter()
            .all(|l| matches!(l, StreamLine::Record(StreamRecord::Entity(_)))));
        assert_eq!(lines.len() - tokens, expected.entities.len());

        // Mesmos registros da análise completa
        match &lines[0] {
            StreamLine::Record(StreamRecord::Token(record)) => assert_eq!(record, &expected.tokens[0]),
            other => panic!("unexpected first line: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unavailable_model_yields_single_error() {
        let lines = collect(ModelHolder::new("never-loaded"), "Hello world.").await;
        assert_eq!(
            lines,
            vec![StreamLine::Error { error: "NLP model is not available.".into() }]
        );
    }
}

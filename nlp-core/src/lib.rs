//! # nlp-core: Anotação Linguística de Textos em Inglês
//!
//! Este crate define a interface de modelo usada pelo servidor HTTP, o modelo
//! embutido que a implementa e a projeção dos documentos anotados em
//! registros planos.
//!
//! ## Arquitetura
//!
//! 1.  **Modelo** ([`model`]): [`AnnotationModel`] recebe um lote de textos e
//!     devolve um [`Doc`] por texto. O [`EnglishModel`] embutido encadeia:
//!     *   **Tokenização** ([`tokenizer`]) com offsets no texto original.
//!     *   **Entidades** ([`rule_based`], [`tagger`]): gazetteers e padrões
//!         produzem tags BIO, decodificadas em spans.
//!     *   **Sentenças** ([`sentencizer`]).
//!     *   **Classes gramaticais e morfologia** ([`pos`]).
//!     *   **Dependências** ([`parser`]) e **lemas** ([`lemmatizer`]).
//! 2.  **Projeção** ([`projector`]): `Doc` → registros de token, entidade e
//!     sentença, com offsets em caracteres.
//! 3.  **Pipeline** ([`pipeline`]): validação da entrada, análise completa e
//!     cursor de registros para o modo incremental.
//!
//! ## Exemplo de Uso
//!
//! ```rust
//! use nlp_core::{analyze, EnglishModel};
//!
//! let model = EnglishModel::build();
//! let result = analyze(&model, "Apple is looking at buying U.K. startup for $1 billion.").unwrap();
//!
//! for entity in &result.entities {
//!     println!("{} ({}) [{}..{}]", entity.text, entity.label, entity.start, entity.end);
//! }
//! assert_eq!(result.entities[0].label, "ORG");
//! ```

pub mod corpus;
pub mod document;
pub mod error;
pub mod features;
pub mod lemmatizer;
pub mod lexicon;
pub mod model;
pub mod parser;
pub mod pipeline;
pub mod pos;
pub mod projector;
pub mod rule_based;
pub mod sentencizer;
pub mod tagger;
pub mod tokenizer;

pub use document::{Doc, Span, TokenAnnotation};
pub use error::{AnalysisError, ModelError, ProjectionError};
pub use model::{AnnotationModel, EnglishModel, BUILTIN_MODEL};
pub use pipeline::{analyze, validate_text, RecordCursor, StreamLine, StreamRecord};
pub use projector::{AnalysisResult, EntityRecord, SentenceRecord, TokenRecord};
pub use tagger::{EntityCategory, EntitySpan, Tag};
pub use tokenizer::Token;

//! # Projeção de Documentos em Registros
//!
//! Converte um [`Doc`] em registros planos e serializáveis: um por token, um
//! por entidade e um por sentença. Os offsets de saída são em **caracteres**
//! (Unicode scalar values), não em bytes.
//!
//! A projeção é pura e determinística. Um offset que não cai numa fronteira de
//! caractere, ou uma cabeça de dependência fora do documento, gera
//! [`ProjectionError`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::document::{Doc, Span};
use crate::error::ProjectionError;

/// Registro de um token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRecord {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub pos: String,
    pub tag: String,
    pub dep: String,
    /// Texto do token cabeça.
    pub head: String,
    pub shape: String,
    pub is_alpha: bool,
    pub is_stop: bool,
    pub is_punct: bool,
    pub is_entity: bool,
    pub entity_type: Option<String>,
    pub morphology: BTreeMap<String, String>,
    pub lemma: String,
}

/// Registro de uma entidade nomeada.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRecord {
    pub text: String,
    pub start: usize,
    pub end: usize,
    pub label: String,
}

/// Registro de uma sentença.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceRecord {
    pub text: String,
    pub start: usize,
    pub end: usize,
}

/// Análise completa de um texto.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub tokens: Vec<TokenRecord>,
    pub entities: Vec<EntityRecord>,
    pub sentences: Vec<SentenceRecord>,
}

/// Tabela de conversão byte → caractere para um texto.
#[derive(Debug, Clone)]
pub struct CharOffsets {
    /// Byte inicial de cada caractere, em ordem crescente.
    boundaries: Vec<usize>,
    text_len: usize,
}

impl CharOffsets {
    pub fn new(text: &str) -> Self {
        Self {
            boundaries: text.char_indices().map(|(byte, _)| byte).collect(),
            text_len: text.len(),
        }
    }

    /// Offset em caracteres do byte `byte`. O fim do texto também é válido.
    pub fn to_char(&self, byte: usize) -> Result<usize, ProjectionError> {
        if byte == self.text_len {
            return Ok(self.boundaries.len());
        }
        self.boundaries
            .binary_search(&byte)
            .map_err(|_| ProjectionError::InvalidOffset(byte))
    }
}

/// Projeta o token `index` do documento.
pub fn project_token(doc: &Doc, offsets: &CharOffsets, index: usize) -> Result<TokenRecord, ProjectionError> {
    let token = &doc.tokens[index];
    let start = offsets.to_char(token.start)?;
    offsets.to_char(token.start + token.text.len())?;
    let head = doc
        .tokens
        .get(token.head)
        .ok_or(ProjectionError::DanglingHead { token: index, head: token.head })?;

    Ok(TokenRecord {
        text: token.text.clone(),
        start,
        end: start + token.text.chars().count(),
        pos: token.pos.clone(),
        tag: token.tag.clone(),
        dep: token.dep.clone(),
        head: head.text.clone(),
        shape: token.shape.clone(),
        is_alpha: token.is_alpha,
        is_stop: token.is_stop,
        is_punct: token.is_punct,
        is_entity: token.ent_type.is_some(),
        entity_type: token.ent_type.clone(),
        morphology: token.morph.clone(),
        lemma: token.lemma.clone(),
    })
}

pub fn project_entity(span: &Span, offsets: &CharOffsets) -> Result<EntityRecord, ProjectionError> {
    Ok(EntityRecord {
        text: span.text.clone(),
        start: offsets.to_char(span.start)?,
        end: offsets.to_char(span.end)?,
        label: span.label.clone().unwrap_or_default(),
    })
}

pub fn project_sentence(span: &Span, offsets: &CharOffsets) -> Result<SentenceRecord, ProjectionError> {
    Ok(SentenceRecord {
        text: span.text.clone(),
        start: offsets.to_char(span.start)?,
        end: offsets.to_char(span.end)?,
    })
}

/// Projeta o documento inteiro, preservando a ordem do modelo.
pub fn project_document(doc: &Doc) -> Result<AnalysisResult, ProjectionError> {
    let offsets = CharOffsets::new(&doc.text);
    let tokens = (0..doc.tokens.len())
        .map(|i| project_token(doc, &offsets, i))
        .collect::<Result<_, _>>()?;
    let entities = doc
        .ents
        .iter()
        .map(|span| project_entity(span, &offsets))
        .collect::<Result<_, _>>()?;
    let sentences = doc
        .sents
        .iter()
        .map(|span| project_sentence(span, &offsets))
        .collect::<Result<_, _>>()?;

    Ok(AnalysisResult { tokens, entities, sentences })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::TokenAnnotation;
    use crate::model::EnglishModel;

    fn bare_token(text: &str, start: usize, head: usize) -> TokenAnnotation {
        TokenAnnotation {
            text: text.to_string(),
            start,
            pos: "X".into(),
            tag: "XX".into(),
            dep: "dep".into(),
            head,
            shape: "x".into(),
            lemma: text.to_lowercase(),
            is_alpha: true,
            is_stop: false,
            is_punct: false,
            ent_type: None,
            morph: BTreeMap::new(),
        }
    }

    #[test]
    fn test_char_offsets() {
        let offsets = CharOffsets::new("né à");
        assert_eq!(offsets.to_char(0), Ok(0));
        assert_eq!(offsets.to_char(3), Ok(2));
        assert_eq!(offsets.to_char(6), Ok(4));
        assert_eq!(offsets.to_char(2), Err(ProjectionError::InvalidOffset(2)));
        assert_eq!(offsets.to_char(60), Err(ProjectionError::InvalidOffset(60)));
    }

    #[test]
    fn test_multibyte_text_uses_char_offsets() {
        let text = "Café owners in Zürich met Tim Cook.";
        let doc = EnglishModel::build().annotate(text);
        let result = project_document(&doc).unwrap();

        let chars: Vec<char> = text.chars().collect();
        for token in &result.tokens {
            assert_eq!(token.end - token.start, token.text.chars().count());
            let slice: String = chars[token.start..token.end].iter().collect();
            assert_eq!(slice, token.text);
            assert_eq!(token.is_entity, token.entity_type.is_some());
        }
        let zurich = result.tokens.iter().find(|t| t.text == "Zürich").unwrap();
        assert_eq!(zurich.start, 15);
    }

    #[test]
    fn test_entity_and_sentence_records() {
        let doc = EnglishModel::build().annotate("Apple is looking at buying U.K. startup for $1 billion.");
        let result = project_document(&doc).unwrap();

        assert_eq!(
            result.entities[0],
            EntityRecord { text: "Apple".into(), start: 0, end: 5, label: "ORG".into() }
        );
        assert_eq!(result.entities[1].text, "U.K.");
        assert_eq!(result.entities[1].label, "GPE");
        assert_eq!(result.sentences.len(), 1);
        assert_eq!(result.sentences[0].end, 55);
        assert_eq!(result.tokens[0].head, "looking");
    }

    #[test]
    fn test_missing_label_becomes_empty_string() {
        let span = Span { text: "x".into(), start_token: 0, end_token: 1, start: 0, end: 1, label: None };
        let record = project_entity(&span, &CharOffsets::new("x")).unwrap();
        assert_eq!(record.label, "");
    }

    #[test]
    fn test_dangling_head_is_an_error() {
        let doc = Doc {
            text: "hi".into(),
            tokens: vec![bare_token("hi", 0, 7)],
            sents: vec![],
            ents: vec![],
        };
        assert_eq!(
            project_document(&doc),
            Err(ProjectionError::DanglingHead { token: 0, head: 7 })
        );
    }

    #[test]
    fn test_offset_inside_a_character_is_an_error() {
        let doc = Doc {
            text: "éa".into(),
            tokens: vec![bare_token("a", 1, 0)],
            sents: vec![],
            ents: vec![],
        };
        assert_eq!(project_document(&doc), Err(ProjectionError::InvalidOffset(1)));
    }
}

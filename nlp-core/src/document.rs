//! # Documento Anotado
//!
//! Saída de um modelo de anotação: o texto original e, para cada token, todos
//! os atributos linguísticos, mais as sentenças e as entidades como spans.
//!
//! Offsets aqui são em **bytes** do texto original; a conversão para
//! caracteres é feita no [`crate::projector`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Um token com todas as suas anotações.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    /// Texto exato do token.
    pub text: String,
    /// Índice de byte inicial no texto do documento.
    pub start: usize,
    /// Classe gramatical universal (UPOS).
    pub pos: String,
    /// Tag fina (Penn Treebank).
    pub tag: String,
    /// Rótulo da relação de dependência.
    pub dep: String,
    /// Índice (no documento) do token cabeça; a raiz aponta para si mesma.
    pub head: usize,
    pub shape: String,
    pub lemma: String,
    pub is_alpha: bool,
    pub is_stop: bool,
    pub is_punct: bool,
    /// Categoria da entidade que contém o token, se houver.
    pub ent_type: Option<String>,
    pub morph: BTreeMap<String, String>,
}

/// Trecho contíguo de tokens (`start_token..end_token`) com offsets em bytes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub text: String,
    pub start_token: usize,
    pub end_token: usize,
    pub start: usize,
    pub end: usize,
    /// Rótulo da entidade; sentenças não têm rótulo.
    pub label: Option<String>,
}

/// Documento produzido por um [`crate::model::AnnotationModel`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    pub text: String,
    pub tokens: Vec<TokenAnnotation>,
    /// Sentenças em ordem, sem sobreposição.
    pub sents: Vec<Span>,
    /// Entidades em ordem, sem sobreposição.
    pub ents: Vec<Span>,
}

impl Doc {
    /// Documento sem tokens (texto vazio ou só espaços).
    pub fn empty(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: vec![],
            sents: vec![],
            ents: vec![],
        }
    }
}

//! # Segmentação de Sentenças
//!
//! Agrupa os tokens em sentenças contíguas e sem sobreposição. Uma sentença
//! termina após `.`, `!`, `?` ou `…` (junto com aspas e parênteses de
//! fechamento que os seguem) e também em linhas em branco.
//!
//! Abreviações (`Mr.`, `U.K.`) são tokens únicos, então o ponto que carregam
//! nunca é tratado como fim de sentença.

use std::ops::Range;

use crate::tokenizer::Token;

/// Retorna os intervalos de índices de token de cada sentença.
///
/// Os intervalos cobrem todos os tokens, em ordem, sem buracos.
pub fn split_sentences(tokens: &[Token], text: &str) -> Vec<Range<usize>> {
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < tokens.len() {
        // Linha em branco antes do token fecha a sentença anterior
        if i > start && has_paragraph_break(text, &tokens[i - 1], &tokens[i]) {
            sentences.push(start..i);
            start = i;
        }

        if is_terminal(&tokens[i].text) {
            let mut end = i + 1;
            while end < tokens.len() && is_terminal(&tokens[end].text) {
                end += 1;
            }
            while end < tokens.len() && is_closing(&tokens[end].text) {
                end += 1;
            }
            sentences.push(start..end);
            start = end;
            i = end;
            continue;
        }
        i += 1;
    }

    if start < tokens.len() {
        sentences.push(start..tokens.len());
    }
    sentences
}

fn is_terminal(text: &str) -> bool {
    matches!(text, "." | "!" | "?" | "…")
}

fn is_closing(text: &str) -> bool {
    matches!(text, "\"" | "'" | ")" | "]" | "}" | "”" | "’" | "»")
}

fn has_paragraph_break(text: &str, prev: &Token, next: &Token) -> bool {
    text.get(prev.end..next.start)
        .is_some_and(|gap| gap.matches('\n').count() >= 2)
}

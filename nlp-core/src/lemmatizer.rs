//! # Lematizador
//!
//! Reduz cada token à sua forma de dicionário usando a classe gramatical já
//! atribuída: tabelas de formas irregulares primeiro, depois regras de sufixo
//! por tag (`-ies` → `-y`, `-ing` com restauração do `e` final, consoante
//! dobrada...).
//!
//! Nomes próprios mantêm a grafia original; as demais classes saem em
//! lowercase.

use crate::lexicon;
use crate::pos::{normalize, verb_stem_s};

/// Lema de um token a partir do texto, classe (UPOS) e tag fina.
pub fn lemmatize(text: &str, pos: &str, tag: &str) -> String {
    match pos {
        "PROPN" | "PUNCT" | "SYM" | "NUM" | "X" => return text.to_string(),
        _ => {}
    }
    let lower = normalize(text);

    match pos {
        "PRON" => pronoun_lemma(&lower),
        "AUX" | "VERB" => verb_lemma(&lower, tag),
        "NOUN" => noun_lemma(&lower, tag),
        "PART" if lower == "n't" => "not".to_string(),
        _ => lower,
    }
}

fn pronoun_lemma(lower: &str) -> String {
    let lemma = match lower {
        "i" | "me" => "I",
        "him" => "he",
        "her" => "she",
        "us" => "we",
        "them" => "they",
        other => other,
    };
    lemma.to_string()
}

fn verb_lemma(lower: &str, tag: &str) -> String {
    let closed = match lower {
        "is" | "are" | "am" | "was" | "were" | "been" | "being" | "'s" | "'re" | "'m" => {
            Some("be")
        }
        "has" | "had" | "'ve" => Some("have"),
        "'d" if tag == "MD" => Some("would"),
        "'d" => Some("have"),
        "does" | "did" | "done" | "doing" => Some("do"),
        "ca" => Some("can"),
        "wo" | "'ll" => Some("will"),
        "sha" => Some("shall"),
        _ => None,
    };
    if let Some(lemma) = closed {
        return lemma.to_string();
    }
    if let Some((base, _)) = lexicon::irregular_verb_base(lower) {
        return base.to_string();
    }

    match tag {
        "VBZ" => verb_stem_s(lower),
        "VBD" | "VBN" => {
            if let Some(stem) = lower.strip_suffix("ied") {
                format!("{stem}y")
            } else if lower.ends_with("eed") {
                lower[..lower.len() - 1].to_string()
            } else if let Some(stem) = lower.strip_suffix("ed") {
                restore_stem(stem)
            } else {
                lower.to_string()
            }
        }
        "VBG" => lower
            .strip_suffix("ing")
            .filter(|stem| !stem.is_empty())
            .map(restore_stem)
            .unwrap_or_else(|| lower.to_string()),
        _ => lower.to_string(),
    }
}

/// Reconstrói a base após remover `-ed`/`-ing`: `runn` → `run`, `mak` → `make`.
fn restore_stem(stem: &str) -> String {
    if lexicon::is_common_verb(stem) || lexicon::is_irregular_base(stem) {
        return stem.to_string();
    }
    let bytes = stem.as_bytes();
    if let [.., a, b] = bytes {
        if a == b && !matches!(*b, b'a' | b'e' | b'i' | b'o' | b'u' | b'w' | b'x' | b'y' | b'l' | b's' | b'z') {
            return stem[..stem.len() - 1].to_string();
        }
    }
    let with_e = format!("{stem}e");
    if lexicon::is_common_verb(&with_e) || lexicon::is_irregular_base(&with_e) {
        return with_e;
    }
    stem.to_string()
}

fn noun_lemma(lower: &str, tag: &str) -> String {
    if tag != "NNS" {
        return lower.to_string();
    }
    if let Some(singular) = lexicon::irregular_noun_singular(lower) {
        return singular.to_string();
    }
    if lower.len() > 4 {
        if let Some(stem) = lower.strip_suffix("ies") {
            return format!("{stem}y");
        }
    }
    for ending in ["ches", "shes", "sses", "xes", "zes"] {
        if lower.ends_with(ending) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    if lower.ends_with("ss") {
        return lower.to_string();
    }
    lower.strip_suffix('s').unwrap_or(lower).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbs() {
        assert_eq!(lemmatize("looking", "VERB", "VBG"), "look");
        assert_eq!(lemmatize("making", "VERB", "VBG"), "make");
        assert_eq!(lemmatize("running", "VERB", "VBG"), "run");
        assert_eq!(lemmatize("stopped", "VERB", "VBD"), "stop");
        assert_eq!(lemmatize("tried", "VERB", "VBD"), "try");
        assert_eq!(lemmatize("agreed", "VERB", "VBD"), "agree");
        assert_eq!(lemmatize("bought", "VERB", "VBD"), "buy");
        assert_eq!(lemmatize("watches", "VERB", "VBZ"), "watch");
        assert_eq!(lemmatize("adding", "VERB", "VBG"), "add");
    }

    #[test]
    fn test_auxiliaries() {
        assert_eq!(lemmatize("is", "AUX", "VBZ"), "be");
        assert_eq!(lemmatize("'s", "AUX", "VBZ"), "be");
        assert_eq!(lemmatize("ca", "AUX", "MD"), "can");
        assert_eq!(lemmatize("n't", "PART", "RB"), "not");
    }

    #[test]
    fn test_nouns() {
        assert_eq!(lemmatize("startups", "NOUN", "NNS"), "startup");
        assert_eq!(lemmatize("companies", "NOUN", "NNS"), "company");
        assert_eq!(lemmatize("boxes", "NOUN", "NNS"), "box");
        assert_eq!(lemmatize("children", "NOUN", "NNS"), "child");
        assert_eq!(lemmatize("Startup", "NOUN", "NN"), "startup");
    }

    #[test]
    fn test_proper_nouns_and_pronouns_keep_case() {
        assert_eq!(lemmatize("Apple", "PROPN", "NNP"), "Apple");
        assert_eq!(lemmatize("U.K.", "PROPN", "NNP"), "U.K.");
        assert_eq!(lemmatize("me", "PRON", "PRP"), "I");
        assert_eq!(lemmatize("They", "PRON", "PRP"), "they");
    }
}

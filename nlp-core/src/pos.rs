//! # Etiquetador Morfossintático (POS)
//!
//! Atribui a cada token uma classe Universal POS (`NOUN`, `VERB`, ...) e uma
//! tag fina Penn Treebank (`NN`, `VBZ`, ...), e deriva o mapa de traços
//! morfológicos a partir da tag.
//!
//! A decisão é tomada token a token, da esquerda para a direita, com a tag do
//! token anterior e o texto do seguinte como contexto:
//!
//! 1. Pontuação, símbolos e números.
//! 2. Casos ambíguos do léxico fechado (`to`, `'s`, `that`, `her`).
//! 3. Entidades nomeadas e palavras capitalizadas → nomes próprios.
//! 4. Léxico fechado (determinantes, pronomes, preposições, auxiliares...).
//! 5. Sufixos e contexto para classes abertas.

use std::collections::BTreeMap;
use std::ops::Range;

use crate::features::{is_capitalized, is_like_num, is_ordinal, is_punct};
use crate::lexicon::{self, PosTag};
use crate::tagger::{EntityCategory, Tag};
use crate::tokenizer::Token;

/// Etiqueta todos os tokens, sentença por sentença.
///
/// `entity_tags` deve estar alinhado com `tokens`.
pub fn tag_tokens(tokens: &[Token], entity_tags: &[Tag], sentences: &[Range<usize>]) -> Vec<PosTag> {
    let mut tags: Vec<PosTag> = vec![("X", "XX"); tokens.len()];

    for sentence in sentences {
        let mut prev: Option<PosTag> = None;
        for i in sentence.clone() {
            let entity = entity_tags.get(i).and_then(Tag::category);
            let assigned = tag_token(tokens, i, i == sentence.start, prev, &tags, entity);
            tags[i] = assigned;
            prev = Some(assigned);
        }
    }
    tags
}

fn tag_token(
    tokens: &[Token],
    i: usize,
    sentence_start: bool,
    prev: Option<PosTag>,
    assigned: &[PosTag],
    entity: Option<EntityCategory>,
) -> PosTag {
    let text = tokens[i].text.as_str();
    let lower = normalize(text);
    let next_lower = tokens.get(i + 1).map(|t| normalize(&t.text));
    let prev_pos = prev.map(|(pos, _)| pos);

    // 1. Pontuação, símbolos e números
    if is_punct(text) {
        return ("PUNCT", punct_tag(text));
    }
    if lexicon::is_currency_symbol(text) {
        return ("SYM", "$");
    }
    if text == "%" {
        return ("NOUN", "NN");
    }
    if !text.chars().any(char::is_alphanumeric) {
        return ("SYM", "SYM");
    }
    if is_ordinal(text) {
        return ("ADJ", "JJ");
    }
    if is_like_num(text) {
        return ("NUM", "CD");
    }

    // 2. Palavras ambíguas resolvidas pelo contexto
    match lower.as_str() {
        "to" => {
            return if next_lower.as_deref().is_some_and(is_base_verb) {
                ("PART", "TO")
            } else {
                ("ADP", "IN")
            };
        }
        "'s" if matches!(prev_pos, Some("NOUN" | "PROPN")) => return ("PART", "POS"),
        "'d" if next_lower.as_deref().is_some_and(is_base_verb) => return ("AUX", "MD"),
        "that" => {
            return if matches!(prev_pos, Some("VERB" | "AUX")) {
                ("SCONJ", "IN")
            } else {
                ("DET", "DT")
            };
        }
        "her" => {
            let next_is_content = next_lower
                .as_deref()
                .is_some_and(|n| n.chars().all(char::is_alphabetic) && lexicon::closed_class(n).is_none());
            return if next_is_content { ("PRON", "PRP$") } else { ("PRON", "PRP") };
        }
        "there" if next_lower.as_deref().is_some_and(|n| matches!(n, "is" | "are" | "was" | "were")) => {
            return ("PRON", "EX");
        }
        "as" => return ("ADP", "IN"),
        "so" => return ("ADV", "RB"),
        _ => {}
    }

    // 3. Nomes próprios
    if let Some(category) = entity {
        if category == EntityCategory::Norp {
            return if lower.ends_with('s') { ("PROPN", "NNPS") } else { ("ADJ", "JJ") };
        }
        if category.is_name() && text.chars().any(char::is_alphabetic) {
            return ("PROPN", "NNP");
        }
    }
    let is_acronym = text.chars().filter(|c| c.is_alphabetic()).count() >= 2
        && !text.chars().any(char::is_lowercase);
    if is_capitalized(text) && (!sentence_start || is_acronym) && lexicon::closed_class(&lower).is_none() {
        return ("PROPN", "NNP");
    }

    // 4. Léxico fechado
    if let Some(entry) = lexicon::closed_class(&lower) {
        return entry;
    }

    // 5. Classes abertas
    guess_open_class(tokens, i, &lower, prev, assigned)
}

fn guess_open_class(
    tokens: &[Token],
    i: usize,
    lower: &str,
    prev: Option<PosTag>,
    assigned: &[PosTag],
) -> PosTag {
    let prev_pos = prev.map(|(pos, _)| pos);
    let prev_tag = prev.map(|(_, tag)| tag);
    let after_aux = preceding_aux(tokens, i, assigned);

    if matches!(prev_tag, Some("MD" | "TO")) {
        return ("VERB", "VB");
    }
    if let Some((_, participle)) = lexicon::irregular_verb_base(lower) {
        return if participle || after_aux { ("VERB", "VBN") } else { ("VERB", "VBD") };
    }
    if lower.len() > 4 && lower.ends_with("ing") {
        return ("VERB", "VBG");
    }
    if lower.len() > 3 && lower.ends_with("ed") {
        if after_aux {
            return ("VERB", "VBN");
        }
        if matches!(prev_pos, Some("DET" | "ADJ")) {
            return ("ADJ", "JJ");
        }
        return ("VERB", "VBD");
    }
    if lower.len() > 4 && lower.ends_with("ly") {
        return ("ADV", "RB");
    }
    const ADJ_SUFFIXES: &[&str] = &["ous", "ful", "ive", "able", "ible", "al", "ic", "less", "ish", "ary"];
    if lower.len() > 4 && ADJ_SUFFIXES.iter().any(|s| lower.ends_with(s)) {
        return ("ADJ", "JJ");
    }

    let after_nominal = matches!(prev_pos, Some("NOUN" | "PROPN" | "PRON"));
    let after_modifier = matches!(prev_pos, Some("DET" | "ADJ" | "NUM")) || prev_tag == Some("PRP$");

    if lexicon::is_common_verb(lower) {
        return if after_modifier {
            ("NOUN", "NN")
        } else if after_nominal || after_aux {
            ("VERB", "VBP")
        } else {
            ("VERB", "VB")
        };
    }
    if lower.len() > 3 && lower.ends_with('s') && !lower.ends_with("ss") && !lower.ends_with("us") && !lower.ends_with("is") {
        if after_nominal && !after_modifier && lexicon::is_common_verb(&verb_stem_s(lower)) {
            return ("VERB", "VBZ");
        }
        return ("NOUN", "NNS");
    }
    if lexicon::irregular_noun_singular(lower).is_some() {
        return ("NOUN", "NNS");
    }
    ("NOUN", "NN")
}

/// Há um auxiliar `be`/`have` até dois tokens atrás (pulando advérbios e negação)?
fn preceding_aux(tokens: &[Token], i: usize, assigned: &[PosTag]) -> bool {
    let mut j = i;
    let mut steps = 0;
    while j > 0 && steps < 3 {
        j -= 1;
        steps += 1;
        let (pos, _) = assigned[j];
        if pos == "ADV" || pos == "PART" {
            continue;
        }
        return lexicon::is_perfect_or_passive_aux(&normalize(&tokens[j].text));
    }
    false
}

/// Forma base de um verbo terminado em `-s` (`looks` → `look`, `tries` → `try`).
pub(crate) fn verb_stem_s(lower: &str) -> String {
    if let Some(stem) = lower.strip_suffix("ies") {
        return format!("{stem}y");
    }
    for ending in ["ches", "shes", "sses", "xes", "zes", "oes"] {
        if lower.ends_with(ending) {
            return lower[..lower.len() - 2].to_string();
        }
    }
    lower.strip_suffix('s').unwrap_or(lower).to_string()
}

fn is_base_verb(lower: &str) -> bool {
    lexicon::is_common_verb(lower) || lexicon::is_irregular_base(lower)
}

/// Lowercase com apóstrofo tipográfico normalizado.
pub(crate) fn normalize(text: &str) -> String {
    text.to_lowercase().replace('\u{2019}', "'")
}

fn punct_tag(text: &str) -> &'static str {
    match text {
        "." | "!" | "?" => ".",
        "," => ",",
        ":" | ";" | "..." | "…" | "—" | "–" | "--" => ":",
        "-" => "HYPH",
        "(" | "[" | "{" => "-LRB-",
        ")" | "]" | "}" => "-RRB-",
        "“" | "‘" | "``" => "``",
        "\"" | "'" | "”" | "’" | "''" => "''",
        _ => "NFP",
    }
}

/// Traços morfológicos (formato Universal Dependencies) derivados da tag.
///
/// O mapa é ordenado, o que mantém a serialização determinística.
pub fn morphology(text: &str, pos: &str, tag: &str) -> BTreeMap<String, String> {
    let lower = normalize(text);
    let mut feats: Vec<(&str, &str)> = match tag {
        "NN" | "NNP" => vec![("Number", "Sing")],
        "NNS" | "NNPS" => vec![("Number", "Plur")],
        "VB" => vec![("VerbForm", "Inf")],
        "VBP" => vec![("Tense", "Pres"), ("VerbForm", "Fin")],
        "VBZ" => vec![("Number", "Sing"), ("Person", "3"), ("Tense", "Pres"), ("VerbForm", "Fin")],
        "VBD" => vec![("Tense", "Past"), ("VerbForm", "Fin")],
        "VBG" => vec![("Aspect", "Prog"), ("Tense", "Pres"), ("VerbForm", "Part")],
        "VBN" => vec![("Aspect", "Perf"), ("Tense", "Past"), ("VerbForm", "Part")],
        "MD" => vec![("VerbType", "Mod")],
        "JJ" => vec![("Degree", "Pos")],
        "JJR" => vec![("Degree", "Cmp")],
        "JJS" => vec![("Degree", "Sup")],
        "CD" => vec![("NumType", "Card")],
        "DT" => determiner_features(&lower),
        "PRP" | "PRP$" => pronoun_features(&lower, tag == "PRP$"),
        "," => vec![("PunctType", "Comm")],
        "." => vec![("PunctType", "Peri")],
        "HYPH" => vec![("PunctType", "Dash")],
        ":" if matches!(lower.as_str(), "—" | "–" | "--") => vec![("PunctType", "Dash")],
        "-LRB-" => vec![("PunctSide", "Ini"), ("PunctType", "Brck")],
        "-RRB-" => vec![("PunctSide", "Fin"), ("PunctType", "Brck")],
        "``" => vec![("PunctSide", "Ini"), ("PunctType", "Quot")],
        "''" => vec![("PunctSide", "Fin"), ("PunctType", "Quot")],
        _ => vec![],
    };

    if pos == "AUX" && matches!(tag, "VBZ" | "VBP" | "VBD") {
        feats.push(("Mood", "Ind"));
    }
    if matches!(lower.as_str(), "not" | "n't" | "never") {
        feats.push(("Polarity", "Neg"));
    }
    if tag == "JJ" && is_ordinal(text) {
        feats = vec![("NumType", "Ord")];
    }

    feats.into_iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

fn determiner_features(lower: &str) -> Vec<(&'static str, &'static str)> {
    match lower {
        "the" => vec![("Definite", "Def"), ("PronType", "Art")],
        "a" | "an" => vec![("Definite", "Ind"), ("PronType", "Art")],
        "this" | "that" => vec![("Number", "Sing"), ("PronType", "Dem")],
        "these" | "those" => vec![("Number", "Plur"), ("PronType", "Dem")],
        _ => vec![],
    }
}

fn pronoun_features(lower: &str, possessive: bool) -> Vec<(&'static str, &'static str)> {
    let (person, number, case) = match lower {
        "i" => ("1", "Sing", Some("Nom")),
        "me" => ("1", "Sing", Some("Acc")),
        "my" | "mine" | "myself" => ("1", "Sing", None),
        "we" => ("1", "Plur", Some("Nom")),
        "us" => ("1", "Plur", Some("Acc")),
        "our" | "ours" | "ourselves" => ("1", "Plur", None),
        "you" | "your" | "yours" | "yourself" => ("2", "Sing", None),
        "he" | "she" | "it" | "they" => {
            let number = if lower == "they" { "Plur" } else { "Sing" };
            ("3", number, Some("Nom"))
        }
        "him" | "them" => ("3", if lower == "them" { "Plur" } else { "Sing" }, Some("Acc")),
        "her" if !possessive => ("3", "Sing", Some("Acc")),
        "his" | "her" | "its" | "hers" | "himself" | "herself" | "itself" => ("3", "Sing", None),
        "their" | "theirs" | "themselves" => ("3", "Plur", None),
        _ => return vec![("PronType", "Prs")],
    };

    let mut feats = Vec::with_capacity(5);
    if let Some(case) = case {
        feats.push(("Case", case));
    }
    feats.push(("Number", number));
    feats.push(("Person", person));
    if possessive {
        feats.push(("Poss", "Yes"));
    }
    feats.push(("PronType", "Prs"));
    if lower.ends_with("self") || lower.ends_with("selves") {
        feats.push(("Reflex", "Yes"));
    }
    feats
}

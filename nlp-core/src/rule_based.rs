//! # Motor de Regras: Gazetteers e Padrões
//!
//! Reconhecimento de entidades por conhecimento explícito:
//!
//! 1. **Gazetteers** de n-gramas (organizações, lugares, pessoas, produtos...).
//! 2. **Títulos** que precedem nomes (`Mr. Smith`, `President Lincoln`).
//! 3. **Primeiros nomes** conhecidos seguidos de sobrenome capitalizado.
//! 4. **Sufixos corporativos** (`Acme Corp.`, `Apple Inc.`).
//! 5. **Padrões numéricos**: dinheiro, porcentagem, hora, data, ordinal, cardinal.
//!
//! As regras são aplicadas em ordem de prioridade; um token marcado por uma
//! regra anterior não é remarcado por uma posterior, o que garante entidades
//! sem sobreposição.

use std::collections::HashSet;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::features::{is_capitalized, is_like_num, is_ordinal, is_year};
use crate::lexicon;
use crate::tagger::{EntityCategory, Tag};
use crate::tokenizer::{tokenize, Token};

/// Uma correspondência de regra: qual token foi marcado e com qual tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleMatch {
    pub token_index: usize,
    pub tag: Tag,
    pub rule_name: String,
}

/// Uma entrada de gazetteer já tokenizada.
#[derive(Debug, Clone)]
struct GazetteerEntry {
    parts: Vec<String>,
    category: EntityCategory,
    /// Siglas (`US`, `WHO`) só casam com a grafia exata
    case_sensitive: bool,
}

impl GazetteerEntry {
    fn matches(&self, tokens: &[Token]) -> bool {
        tokens.len() == self.parts.len()
            && tokens.iter().zip(&self.parts).all(|(token, part)| {
                if self.case_sensitive {
                    token.text == *part
                } else {
                    token.text.to_lowercase() == *part
                }
            })
    }
}

/// Motor de regras com gazetteers e padrões
pub struct RuleEngine {
    /// Ordenado do maior para o menor n-grama (casamento mais longo primeiro)
    gazetteer: Vec<GazetteerEntry>,
    /// Primeiros nomes (lowercase)
    first_names: HashSet<String>,
    /// Títulos que precedem nomes de pessoas (lowercase)
    person_titles: Vec<String>,
    /// Palavras que fecham nomes de organização (lowercase)
    org_suffixes: Vec<String>,
    time_pattern: Regex,
    decade_pattern: Regex,
}

impl RuleEngine {
    pub fn new() -> Self {
        Self {
            gazetteer: vec![],
            first_names: HashSet::new(),
            person_titles: [
                "mr.", "mrs.", "ms.", "dr.", "prof.", "sir", "dame", "president", "senator",
                "governor", "mayor", "judge", "minister", "chancellor", "ceo", "professor",
                "king", "queen", "pope", "gen.", "sen.", "gov.", "rep.", "capt.",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            org_suffixes: [
                "inc.", "inc", "corp.", "corp", "corporation", "ltd.", "ltd", "llc", "plc",
                "co.", "holdings", "group", "university", "institute", "foundation", "bank",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            time_pattern: Regex::new(r"^\d{1,2}:\d{2}$").expect("valid time pattern"),
            decade_pattern: Regex::new(r"^\d{4}s$").expect("valid decade pattern"),
        }
    }

    /// Adiciona nomes ao gazetteer (cada um pode ter várias palavras).
    ///
    /// As entradas ficam ordenadas da mais longa para a mais curta; a
    /// ordenação é estável e roda uma vez por lote.
    pub fn add_all<'a>(&mut self, names: impl IntoIterator<Item = (&'a str, EntityCategory)>) {
        for (name, category) in names {
            let tokens = tokenize(name);
            if tokens.is_empty() {
                continue;
            }
            let case_sensitive = !name.chars().any(char::is_lowercase);
            let parts = tokens
                .into_iter()
                .map(|t| if case_sensitive { t.text } else { t.text.to_lowercase() })
                .collect();
            self.gazetteer.push(GazetteerEntry { parts, category, case_sensitive });
        }
        self.gazetteer.sort_by(|a, b| b.parts.len().cmp(&a.parts.len()));
    }

    pub fn add_first_name(&mut self, name: &str) {
        self.first_names.insert(name.to_lowercase());
    }

    /// Número de entradas no gazetteer
    pub fn gazetteer_len(&self) -> usize {
        self.gazetteer.len()
    }

    /// Aplica todas as regras à sequência de tokens
    ///
    /// Retorna, para cada posição, a regra que marcou o token (se houver).
    pub fn apply(&self, tokens: &[Token]) -> Vec<Option<RuleMatch>> {
        let mut result: Vec<Option<RuleMatch>> = vec![None; tokens.len()];

        self.apply_gazetteer(tokens, &mut result);
        self.apply_titles(tokens, &mut result);
        self.apply_first_names(tokens, &mut result);
        self.apply_org_suffixes(tokens, &mut result);
        self.apply_money(tokens, &mut result);
        self.apply_percent(tokens, &mut result);
        self.apply_time(tokens, &mut result);
        self.apply_dates(tokens, &mut result);
        apply_ordinals(tokens, &mut result);
        apply_cardinals(tokens, &mut result);

        result
    }

    // 1. Gazetteers (n-gramas, maior casamento primeiro)
    fn apply_gazetteer(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let mut i = 0;
        'outer: while i < tokens.len() {
            if !is_capitalized(&tokens[i].text) {
                i += 1;
                continue;
            }
            for entry in &self.gazetteer {
                let end = i + entry.parts.len();
                if end <= tokens.len() && entry.matches(&tokens[i..end]) && mark(result, i..end, entry.category, "gazetteer") {
                    i = end;
                    continue 'outer;
                }
            }
            i += 1;
        }
    }

    // 2. Título seguido de nomes capitalizados: "Mr. Tim Cook" → PERSON(Tim Cook)
    fn apply_titles(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for i in 0..tokens.len().saturating_sub(1) {
            if !self.person_titles.contains(&tokens[i].text.to_lowercase()) {
                continue;
            }
            let end = capitalized_run_end(tokens, result, i + 1);
            if end > i + 1 {
                mark(result, i + 1..end, EntityCategory::Person, "title_pattern");
            }
        }
    }

    // 3. Primeiro nome conhecido + sobrenomes capitalizados
    fn apply_first_names(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            if result[i].is_none()
                && is_capitalized(&token.text)
                && self.first_names.contains(&token.text.to_lowercase())
            {
                let end = capitalized_run_end(tokens, result, i + 1).max(i + 1);
                mark(result, i..end, EntityCategory::Person, "first_name");
                i = end;
                continue;
            }
            i += 1;
        }
    }

    // 4. Sufixo corporativo: "Acme Corp." → ORG; "Apple Inc." estende o ORG existente
    fn apply_org_suffixes(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for i in 1..tokens.len() {
            if result[i].is_some() || !self.org_suffixes.contains(&tokens[i].text.to_lowercase()) {
                continue;
            }
            let prev_category = result[i - 1].as_ref().and_then(|m| m.tag.category());
            if prev_category == Some(EntityCategory::Org) {
                result[i] = Some(RuleMatch {
                    token_index: i,
                    tag: Tag::Inside(EntityCategory::Org),
                    rule_name: "org_suffix".to_string(),
                });
                continue;
            }

            let mut start = i;
            while start > 0
                && result[start - 1].is_none()
                && is_capitalized(&tokens[start - 1].text)
                && !matches!(lexicon::closed_class(&tokens[start - 1].text.to_lowercase()), Some(_))
            {
                start -= 1;
            }
            if start < i {
                mark(result, start..i + 1, EntityCategory::Org, "org_suffix");
            }
        }
    }

    // 5. Dinheiro: "$1 billion", "5 dollars"
    fn apply_money(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let mut i = 0;
        while i < tokens.len() {
            if lexicon::is_currency_symbol(&tokens[i].text) {
                let end = number_run_end(tokens, i + 1);
                if end > i + 1 && mark(result, i..end, EntityCategory::Money, "money_symbol") {
                    i = end;
                    continue;
                }
            } else if is_like_num(&tokens[i].text) {
                let end = number_run_end(tokens, i);
                if end < tokens.len()
                    && lexicon::is_currency_word(&tokens[end].text.to_lowercase())
                    && mark(result, i..end + 1, EntityCategory::Money, "money_word")
                {
                    i = end + 1;
                    continue;
                }
            }
            i += 1;
        }
    }

    // 6. Porcentagem: "20%", "20 percent"
    fn apply_percent(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for i in 0..tokens.len().saturating_sub(1) {
            let next = tokens[i + 1].text.to_lowercase();
            if is_like_num(&tokens[i].text) && (next == "%" || next == "percent") {
                mark(result, i..i + 2, EntityCategory::Percent, "percent");
            }
        }
    }

    // 7. Hora: "10:30", "10:30 pm", "5 p.m."
    fn apply_time(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        for i in 0..tokens.len() {
            let is_clock = self.time_pattern.is_match(&tokens[i].text);
            let has_meridiem = tokens
                .get(i + 1)
                .is_some_and(|t| matches!(t.text.to_lowercase().as_str(), "am" | "pm" | "a.m." | "p.m."));
            let is_hour = tokens[i].text.len() <= 2 && tokens[i].text.chars().all(|c| c.is_ascii_digit());

            if has_meridiem && (is_clock || is_hour) {
                mark(result, i..i + 2, EntityCategory::Time, "time");
            } else if is_clock {
                mark(result, i..i + 1, EntityCategory::Time, "time");
            }
        }
    }

    // 8. Datas: "March 3, 2021", "3 March", "Monday", "2021", "the 1990s", "last year"
    fn apply_dates(&self, tokens: &[Token], result: &mut [Option<RuleMatch>]) {
        let mut i = 0;
        while i < tokens.len() {
            let lower = tokens[i].text.to_lowercase();
            let end = if lexicon::is_month(&lower) && is_capitalized(&tokens[i].text) {
                month_date_end(tokens, i)
            } else if is_day_number(&tokens[i].text)
                && tokens.get(i + 1).is_some_and(|t| is_capitalized(&t.text) && lexicon::is_month(&t.text.to_lowercase()))
            {
                let mut end = i + 2;
                if tokens.get(end).is_some_and(|t| is_year(&t.text)) {
                    end += 1;
                }
                Some(end)
            } else if lexicon::is_weekday(&lower) || lexicon::is_relative_day(&lower) {
                Some(i + 1)
            } else if is_year(&tokens[i].text) || self.decade_pattern.is_match(&tokens[i].text) {
                Some(i + 1)
            } else if matches!(lower.as_str(), "last" | "next" | "this")
                && tokens.get(i + 1).is_some_and(|t| {
                    matches!(t.text.to_lowercase().as_str(), "year" | "month" | "week" | "quarter")
                })
            {
                Some(i + 2)
            } else {
                None
            };

            match end {
                Some(end) if mark(result, i..end, EntityCategory::Date, "date") => i = end,
                _ => i += 1,
            }
        }
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

// 9. Ordinais: "1st", "second"
fn apply_ordinals(tokens: &[Token], result: &mut [Option<RuleMatch>]) {
    for (i, token) in tokens.iter().enumerate() {
        if is_ordinal(&token.text) {
            mark(result, i..i + 1, EntityCategory::Ordinal, "ordinal");
        }
    }
}

// 10. Cardinais: qualquer número restante ("two hundred", "42")
fn apply_cardinals(tokens: &[Token], result: &mut [Option<RuleMatch>]) {
    let mut i = 0;
    while i < tokens.len() {
        if result[i].is_none() && is_like_num(&tokens[i].text) {
            let mut end = i + 1;
            while end < tokens.len() && result[end].is_none() && is_like_num(&tokens[end].text) {
                end += 1;
            }
            mark(result, i..end, EntityCategory::Cardinal, "cardinal");
            i = end;
            continue;
        }
        i += 1;
    }
}

/// Marca `range` como uma entidade, se nenhum token já estiver marcado.
fn mark(
    result: &mut [Option<RuleMatch>],
    range: std::ops::Range<usize>,
    category: EntityCategory,
    rule_name: &str,
) -> bool {
    if range.is_empty() || range.end > result.len() || result[range.clone()].iter().any(Option::is_some) {
        return false;
    }
    let start = range.start;
    for i in range {
        result[i] = Some(RuleMatch {
            token_index: i,
            tag: if i == start { Tag::Begin(category) } else { Tag::Inside(category) },
            rule_name: rule_name.to_string(),
        });
    }
    true
}

/// Fim (exclusivo) da sequência de tokens capitalizados e livres a partir de `start`.
fn capitalized_run_end(tokens: &[Token], result: &[Option<RuleMatch>], start: usize) -> usize {
    let mut end = start;
    while end < tokens.len()
        && result[end].is_none()
        && is_capitalized(&tokens[end].text)
        && tokens[end].text.chars().any(char::is_alphabetic)
    {
        end += 1;
    }
    end
}

/// Fim (exclusivo) da sequência numérica a partir de `start` ("1", "1 billion", "two hundred").
fn number_run_end(tokens: &[Token], start: usize) -> usize {
    let mut end = start;
    while end < tokens.len() && is_like_num(&tokens[end].text) {
        end += 1;
    }
    end
}

fn is_day_number(text: &str) -> bool {
    text.parse::<u32>().is_ok_and(|d| (1..=31).contains(&d))
}

/// "March", "March 3", "March 3, 2021", "March 2021". "May" sozinho é ambíguo (modal).
fn month_date_end(tokens: &[Token], i: usize) -> Option<usize> {
    let mut end = i + 1;
    if tokens.get(end).is_some_and(|t| is_day_number(&t.text)) {
        end += 1;
        if tokens.get(end).is_some_and(|t| t.text == ",") && tokens.get(end + 1).is_some_and(|t| is_year(&t.text)) {
            end += 2;
        }
    } else if tokens.get(end).is_some_and(|t| is_year(&t.text)) {
        end += 1;
    }

    if tokens[i].text == "May" && end == i + 1 {
        None
    } else {
        Some(end)
    }
}

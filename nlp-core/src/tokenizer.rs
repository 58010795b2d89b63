//! # Tokenizador para Inglês
//!
//! Divide o texto bruto em tokens (palavras, números, pontuações), preservando
//! o offset de byte de cada token no texto original.
//!
//! ## Regras
//!
//! - Espaços separam tokens; pontuação vira token próprio.
//! - Abreviações (`Mr.`, `Inc.`) e siglas com ponto (`U.K.`, `e.g.`) mantêm o ponto.
//! - Números com separadores (`1.5`, `1,000`, `10:30`) permanecem inteiros.
//! - Hífens internos (`state-of-the-art`) não quebram a palavra.
//! - Clíticos são separados: `don't` → `do` + `n't`, `Apple's` → `Apple` + `'s`.
//!
//! ```rust
//! use nlp_core::tokenizer::tokenize;
//!
//! let tokens = tokenize("Apple isn't in the U.K.");
//! let texts: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
//! assert_eq!(texts, ["Apple", "is", "n't", "in", "the", "U.K."]);
//! ```

use serde::{Deserialize, Serialize};

/// Um token extraído do texto original.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    /// O texto do token (ex: "Apple", ",", "n't").
    pub text: String,
    /// Índice de byte inicial no texto original (inclusive).
    pub start: usize,
    /// Índice de byte final no texto original (exclusivo).
    pub end: usize,
    /// Índice sequencial do token na lista (0, 1, 2...).
    pub index: usize,
}

/// Abreviações que não devem ter o ponto tratado como fim de sentença
const ABBREVIATIONS: &[&str] = &[
    "Mr", "Mrs", "Ms", "Dr", "Prof", "Sr", "Jr", "St", "Mt", "Gen", "Gov", "Sen", "Rep",
    "Rev", "Capt", "Col", "Lt", "Sgt", "Inc", "Corp", "Ltd", "Co", "Bros", "vs", "etc",
    "approx", "dept", "Jan", "Feb", "Mar", "Apr", "Jun", "Jul", "Aug", "Sep", "Sept", "Oct",
    "Nov", "Dec",
];

/// Sufixos clíticos separados da palavra base (comparados em lowercase, com `'` normalizado)
const CLITICS: &[&str] = &["'s", "'re", "'ve", "'ll", "'d", "'m", "'"];

/// Tokeniza um texto em inglês.
pub fn tokenize(text: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start = 0;
    let mut current_text = String::new();
    let chars: Vec<(usize, char)> = text.char_indices().collect();

    for (i, &(byte_pos, ch)) in chars.iter().enumerate() {
        let next = chars.get(i + 1).map(|(_, c)| *c);

        if ch.is_alphanumeric() {
            if current_text.is_empty() {
                current_start = byte_pos;
            }
            current_text.push(ch);
        } else if ch == '-' && !current_text.is_empty() && next.is_some_and(char::is_alphanumeric) {
            current_text.push(ch);
        } else if is_apostrophe(ch) && !current_text.is_empty() {
            // Clíticos são separados quando o token é fechado
            current_text.push(ch);
        } else if ch == '.' && !current_text.is_empty() && keeps_period(&current_text, next) {
            current_text.push(ch);
        } else if (ch == ',' || ch == ':')
            && current_text.chars().last().is_some_and(|c| c.is_ascii_digit())
            && next.is_some_and(|c| c.is_ascii_digit())
        {
            current_text.push(ch);
        } else if ch.is_whitespace() {
            flush_token(&mut tokens, &mut current_text, current_start);
        } else {
            flush_token(&mut tokens, &mut current_text, current_start);
            push_token(&mut tokens, ch.to_string(), byte_pos, byte_pos + ch.len_utf8());
        }
    }
    flush_token(&mut tokens, &mut current_text, current_start);

    // Re-indexa os tokens
    for (i, token) in tokens.iter_mut().enumerate() {
        token.index = i;
    }
    tokens
}

fn is_apostrophe(ch: char) -> bool {
    ch == '\'' || ch == '\u{2019}'
}

/// Decide se o ponto após `current` pertence ao token.
fn keeps_period(current: &str, next: Option<char>) -> bool {
    if ABBREVIATIONS.contains(&current) {
        return true;
    }
    // Decimal: 1.5, 1,500.75
    let numeric = current.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
        && current.chars().last().is_some_and(|c| c.is_ascii_digit());
    if numeric && next.is_some_and(|c| c.is_ascii_digit()) {
        return true;
    }
    // Siglas: U.K., e.g., a.m.
    let last_segment = current.rsplit('.').next().unwrap_or(current);
    let mut seg_chars = last_segment.chars();
    let single_letter = matches!((seg_chars.next(), seg_chars.next()), (Some(c), None) if c.is_alphabetic());
    single_letter && (current.contains('.') || next.is_some_and(char::is_alphabetic))
}

/// Fecha o token acumulado, separando clíticos finais (se houver).
fn flush_token(tokens: &mut Vec<Token>, text: &mut String, start: usize) {
    if text.is_empty() {
        return;
    }
    match clitic_split(text) {
        Some(split) => {
            push_token(tokens, text[..split].to_string(), start, start + split);
            push_token(tokens, text[split..].to_string(), start + split, start + text.len());
        }
        None => push_token(tokens, text.clone(), start, start + text.len()),
    }
    text.clear();
}

/// Posição (em bytes) onde o clítico começa, se a palavra terminar em um.
fn clitic_split(word: &str) -> Option<usize> {
    let (apos, _) = word.char_indices().rev().find(|(_, c)| is_apostrophe(*c))?;
    if apos == 0 {
        return None;
    }
    let suffix: String = word[apos..]
        .chars()
        .map(|c| if is_apostrophe(c) { '\'' } else { c.to_ascii_lowercase() })
        .collect();

    if suffix == "'t" {
        // do|n't, ca|n't: o "n" vai junto com o clítico
        let is_n = word[..apos].ends_with(['n', 'N']);
        return (is_n && apos > 1).then_some(apos - 1);
    }
    CLITICS.contains(&suffix.as_str()).then_some(apos)
}

/// Adiciona um token diretamente
fn push_token(tokens: &mut Vec<Token>, text: String, start: usize, end: usize) {
    tokens.push(Token {
        text,
        start,
        end,
        index: 0,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize(text).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn test_tokenize_basic_sentence() {
        assert_eq!(
            texts("Apple is looking at buying U.K. startup for $1 billion."),
            [
                "Apple", "is", "looking", "at", "buying", "U.K.", "startup", "for", "$", "1",
                "billion", "."
            ]
        );
    }

    #[test]
    fn test_offsets_point_into_text() {
        let text = "Héllo, wörld!";
        for token in tokenize(text) {
            assert_eq!(&text[token.start..token.end], token.text);
        }
    }

    #[test]
    fn test_contractions() {
        assert_eq!(texts("I can't go"), ["I", "ca", "n't", "go"]);
        assert_eq!(texts("We're here"), ["We", "'re", "here"]);
        assert_eq!(texts("Apple's plan"), ["Apple", "'s", "plan"]);
        assert_eq!(texts("it\u{2019}s"), ["it", "\u{2019}s"]);
    }

    #[test]
    fn test_abbreviations_and_numbers() {
        assert_eq!(texts("Mr. Smith paid 1,500.75 dollars"), ["Mr.", "Smith", "paid", "1,500.75", "dollars"]);
        assert_eq!(texts("See e.g. this"), ["See", "e.g.", "this"]);
        assert_eq!(texts("The end."), ["The", "end", "."]);
    }

    #[test]
    fn test_clock_time_is_one_token() {
        assert_eq!(texts("at 10:30, then"), ["at", "10:30", ",", "then"]);
    }

    #[test]
    fn test_hyphenated_words() {
        assert_eq!(texts("a state-of-the-art model -"), ["a", "state-of-the-art", "model", "-"]);
    }

    #[test]
    fn test_whitespace_only() {
        assert!(tokenize("   \n\t").is_empty());
    }

    #[test]
    fn test_indices_are_sequential() {
        let tokens = tokenize("One, two, three.");
        for (i, t) in tokens.iter().enumerate() {
            assert_eq!(t.index, i);
        }
    }
}

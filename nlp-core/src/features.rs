//! # Atributos Lexicais de Tokens
//!
//! Atributos calculados apenas a partir do texto do token, sem contexto:
//!
//! - **Forma ortográfica** (`shape`): `Apple` → `Xxxxx`, `U.K.` → `X.X.`, `2023` → `dddd`.
//! - **Flags**: alfabético, pontuação, numérico, capitalizado.
//!
//! Os demais componentes (tagger, regras de entidade, parser) consultam
//! estas funções em vez de reimplementar as mesmas verificações.

use crate::lexicon;

/// Forma ortográfica do token.
///
/// Maiúsculas viram `X`, minúsculas `x`, dígitos `d` e os demais caracteres
/// se mantêm. Sequências do mesmo símbolo são truncadas em 4 repetições
/// (`billion` → `xxxx`).
pub fn word_shape(text: &str) -> String {
    let mut shape = String::with_capacity(text.len());
    let mut last: Option<char> = None;
    let mut run = 0;

    for ch in text.chars() {
        let mapped = if ch.is_uppercase() {
            'X'
        } else if ch.is_lowercase() {
            'x'
        } else if ch.is_numeric() {
            'd'
        } else {
            ch
        };

        if Some(mapped) == last {
            run += 1;
        } else {
            run = 1;
            last = Some(mapped);
        }
        if run <= 4 {
            shape.push(mapped);
        }
    }
    shape
}

/// Todos os caracteres são letras.
pub fn is_alpha(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

/// Todos os caracteres são sinais de pontuação (símbolos como `$` e `%` não contam).
pub fn is_punct(text: &str) -> bool {
    !text.is_empty() && text.chars().all(is_punct_char)
}

fn is_punct_char(ch: char) -> bool {
    matches!(
        ch,
        '!' | '"' | '#' | '&' | '\'' | '(' | ')' | '*' | ',' | '-' | '.' | '/' | ':' | ';'
            | '?' | '@' | '[' | '\\' | ']' | '_' | '{' | '}' | '¡' | '§' | '«' | '¶' | '·'
            | '»' | '¿' | '‐' | '‑' | '‒' | '–' | '—' | '―' | '‘' | '’' | '‚' | '“' | '”'
            | '„' | '†' | '‡' | '•' | '…' | '‹' | '›'
    )
}

/// Parece um número: `42`, `1,000`, `3.14`, `two`, `billion`.
pub fn is_like_num(text: &str) -> bool {
    let starts_with_digit = text.chars().next().is_some_and(|c| c.is_ascii_digit());
    if starts_with_digit
        && text.chars().all(|c| c.is_ascii_digit() || c == ',' || c == '.')
    {
        return true;
    }
    lexicon::is_number_word(&text.to_lowercase())
}

/// Ordinal numérico (`1st`, `22nd`, `3rd`, `4th`) ou por extenso (`first`).
pub fn is_ordinal(text: &str) -> bool {
    let lower = text.to_lowercase();
    if lexicon::is_ordinal_word(&lower) {
        return true;
    }
    let digits = lower.trim_end_matches(|c: char| c.is_alphabetic());
    let suffix = &lower[digits.len()..];
    !digits.is_empty()
        && digits.chars().all(|c| c.is_ascii_digit())
        && matches!(suffix, "st" | "nd" | "rd" | "th")
}

/// Começa com letra maiúscula.
pub fn is_capitalized(text: &str) -> bool {
    text.chars().next().is_some_and(char::is_uppercase)
}

/// Ano plausível de quatro dígitos (1000–2099).
pub fn is_year(text: &str) -> bool {
    text.len() == 4
        && text.chars().all(|c| c.is_ascii_digit())
        && (text.starts_with('1') || text.starts_with("20"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_shape() {
        assert_eq!(word_shape("Apple"), "Xxxxx");
        assert_eq!(word_shape("U.K."), "X.X.");
        assert_eq!(word_shape("billion"), "xxxx");
        assert_eq!(word_shape("$"), "$");
        assert_eq!(word_shape("2023"), "dddd");
        assert_eq!(word_shape("COVID-19"), "XXXX-dd");
    }

    #[test]
    fn test_flags() {
        assert!(is_alpha("startup"));
        assert!(!is_alpha("U.K."));
        assert!(is_punct("."));
        assert!(is_punct("..."));
        assert!(!is_punct("$"));
        assert!(is_like_num("1,000"));
        assert!(is_like_num("billion"));
        assert!(!is_like_num("apple"));
    }

    #[test]
    fn test_ordinals_and_years() {
        assert!(is_ordinal("1st"));
        assert!(is_ordinal("22nd"));
        assert!(is_ordinal("Third"));
        assert!(!is_ordinal("1"));
        assert!(is_year("2023"));
        assert!(is_year("1999"));
        assert!(!is_year("3000"));
    }
}

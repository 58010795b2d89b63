//! # Esquema de Tags BIO e Tipos de Entidade
//!
//! Define o esquema de anotação **BIO** (Beginning-Inside-Outside) usado pelo
//! modelo embutido para rotular tokens, e as categorias de entidade no estilo
//! OntoNotes.
//!
//! ## Categorias principais
//!
//! | Rótulo   | Significado                   | Exemplos                 |
//! |----------|-------------------------------|--------------------------|
//! | PERSON   | Pessoa                        | Tim Cook, Ada Lovelace   |
//! | ORG      | Organização                   | Apple, United Nations    |
//! | GPE      | País, cidade, estado          | U.K., Paris, Texas       |
//! | LOC      | Local não político            | Europe, the Alps         |
//! | NORP     | Nacionalidade, grupo          | American, Democrats      |
//! | MONEY    | Valor monetário               | $1 billion               |
//! | DATE     | Data ou período               | March 3, 2021, Monday    |
//! | CARDINAL | Numeral sem outra categoria   | three, 42                |
//!
//! ## Esquema BIO
//!
//! - `B-TAG`: Begin, primeiro token de uma entidade
//! - `I-TAG`: Inside, tokens subsequentes da mesma entidade
//! - `O`: Outside, não é parte de nenhuma entidade

use serde::{Deserialize, Serialize};

use crate::tokenizer::Token;

/// Categorias de entidade reconhecidas pelo modelo embutido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityCategory {
    Person,
    Norp,
    Fac,
    Org,
    Gpe,
    Loc,
    Product,
    Event,
    WorkOfArt,
    Law,
    Language,
    Date,
    Time,
    Percent,
    Money,
    Quantity,
    Ordinal,
    Cardinal,
}

impl EntityCategory {
    /// Todas as categorias, na ordem de exibição
    pub const ALL: [EntityCategory; 18] = [
        EntityCategory::Person,
        EntityCategory::Norp,
        EntityCategory::Fac,
        EntityCategory::Org,
        EntityCategory::Gpe,
        EntityCategory::Loc,
        EntityCategory::Product,
        EntityCategory::Event,
        EntityCategory::WorkOfArt,
        EntityCategory::Law,
        EntityCategory::Language,
        EntityCategory::Date,
        EntityCategory::Time,
        EntityCategory::Percent,
        EntityCategory::Money,
        EntityCategory::Quantity,
        EntityCategory::Ordinal,
        EntityCategory::Cardinal,
    ];

    /// Nome da categoria como string (para serialização e UI)
    pub fn name(&self) -> &'static str {
        match self {
            EntityCategory::Person => "PERSON",
            EntityCategory::Norp => "NORP",
            EntityCategory::Fac => "FAC",
            EntityCategory::Org => "ORG",
            EntityCategory::Gpe => "GPE",
            EntityCategory::Loc => "LOC",
            EntityCategory::Product => "PRODUCT",
            EntityCategory::Event => "EVENT",
            EntityCategory::WorkOfArt => "WORK_OF_ART",
            EntityCategory::Law => "LAW",
            EntityCategory::Language => "LANGUAGE",
            EntityCategory::Date => "DATE",
            EntityCategory::Time => "TIME",
            EntityCategory::Percent => "PERCENT",
            EntityCategory::Money => "MONEY",
            EntityCategory::Quantity => "QUANTITY",
            EntityCategory::Ordinal => "ORDINAL",
            EntityCategory::Cardinal => "CARDINAL",
        }
    }

    /// Cor CSS para highlight na página de demonstração
    pub fn color(&self) -> &'static str {
        match self {
            EntityCategory::Person => "#3b82f6",
            EntityCategory::Org => "#10b981",
            EntityCategory::Gpe | EntityCategory::Loc | EntityCategory::Fac => "#f59e0b",
            EntityCategory::Norp | EntityCategory::Language => "#ec4899",
            EntityCategory::Money | EntityCategory::Percent | EntityCategory::Quantity => "#14b8a6",
            EntityCategory::Date | EntityCategory::Time => "#6366f1",
            EntityCategory::Ordinal | EntityCategory::Cardinal => "#64748b",
            _ => "#8b5cf6",
        }
    }

    /// Categorias que nomeiam algo (e não quantidades); seus tokens viram PROPN.
    pub fn is_name(&self) -> bool {
        matches!(
            self,
            EntityCategory::Person
                | EntityCategory::Org
                | EntityCategory::Gpe
                | EntityCategory::Loc
                | EntityCategory::Fac
                | EntityCategory::Product
                | EntityCategory::Event
                | EntityCategory::WorkOfArt
                | EntityCategory::Law
        )
    }
}

/// Tag BIO aplicada a um token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tag {
    /// **Begin**: início de uma entidade. Ex: **New** (B-GPE) York.
    Begin(EntityCategory),
    /// **Inside**: continuação de uma entidade. Ex: New **York** (I-GPE).
    Inside(EntityCategory),
    /// **Outside**: o token não faz parte de nenhuma entidade.
    Outside,
}

impl Tag {
    /// Representação textual da tag (ex: "B-PERSON", "I-ORG", "O")
    pub fn label(&self) -> String {
        match self {
            Tag::Begin(cat) => format!("B-{}", cat.name()),
            Tag::Inside(cat) => format!("I-{}", cat.name()),
            Tag::Outside => "O".to_string(),
        }
    }

    /// Retorna a categoria desta tag (se for B- ou I-)
    pub fn category(&self) -> Option<EntityCategory> {
        match self {
            Tag::Begin(c) | Tag::Inside(c) => Some(*c),
            Tag::Outside => None,
        }
    }
}

/// Um token com sua tag BIO e a regra que a produziu
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedToken {
    pub token: Token,
    pub tag: Tag,
    pub source: Option<String>,
}

/// Uma entidade identificada no texto (span de um ou mais tokens)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySpan {
    /// Texto da entidade (ex: "U.K.")
    pub text: String,
    pub category: EntityCategory,
    /// Índice do primeiro token
    pub start_token: usize,
    /// Índice do último token (exclusivo)
    pub end_token: usize,
    /// Posição de byte inicial no texto original
    pub start: usize,
    /// Posição de byte final no texto original
    pub end: usize,
    /// Regra que originou a entidade (ex: "org_gazetteer")
    pub source: String,
}

/// Converte uma sequência de tokens classificados (BIO) em spans de entidades.
///
/// Máquina de estados do esquema BIO:
/// - Inicia uma nova entidade ao encontrar `B-XXX`.
/// - Continua enquanto encontrar `I-XXX` da **mesma** categoria.
/// - Finaliza ao encontrar `O`, `B-YYY` ou `I-YYY` de outra categoria.
///
/// Um `I-XXX` órfão é ignorado. Os spans saem ordenados e sem sobreposição.
pub fn tokens_to_spans(tagged: &[TaggedToken], original_text: &str) -> Vec<EntitySpan> {
    let mut spans = Vec::new();
    let mut i = 0;

    while i < tagged.len() {
        if let Tag::Begin(cat) = tagged[i].tag {
            let start_token = tagged[i].token.index;
            let start_byte = tagged[i].token.start;
            let mut end_byte = tagged[i].token.end;

            let mut j = i + 1;
            while j < tagged.len() && tagged[j].tag == Tag::Inside(cat) {
                end_byte = tagged[j].token.end;
                j += 1;
            }

            spans.push(EntitySpan {
                text: original_text[start_byte..end_byte].to_string(),
                category: cat,
                start_token,
                end_token: start_token + (j - i),
                start: start_byte,
                end: end_byte,
                source: tagged[i].source.clone().unwrap_or_else(|| "rule".to_string()),
            });

            i = j;
        } else {
            i += 1;
        }
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    #[test]
    fn test_tag_labels() {
        assert_eq!(Tag::Outside.label(), "O");
        assert_eq!(Tag::Begin(EntityCategory::Person).label(), "B-PERSON");
        assert_eq!(Tag::Inside(EntityCategory::Gpe).label(), "I-GPE");
    }

    #[test]
    fn test_tokens_to_spans() {
        let text = "Tim Cook visited New York";
        let tags = [
            Tag::Begin(EntityCategory::Person),
            Tag::Inside(EntityCategory::Person),
            Tag::Outside,
            Tag::Begin(EntityCategory::Gpe),
            Tag::Inside(EntityCategory::Gpe),
        ];
        let tagged: Vec<TaggedToken> = tokenize(text)
            .into_iter()
            .zip(tags)
            .map(|(token, tag)| TaggedToken { token, tag, source: None })
            .collect();

        let spans = tokens_to_spans(&tagged, text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].text, "Tim Cook");
        assert_eq!((spans[0].start_token, spans[0].end_token), (0, 2));
        assert_eq!(spans[1].text, "New York");
        assert_eq!(spans[1].category, EntityCategory::Gpe);
    }

    #[test]
    fn test_orphan_inside_is_ignored() {
        let text = "a b";
        let tagged: Vec<TaggedToken> = tokenize(text)
            .into_iter()
            .map(|token| TaggedToken { token, tag: Tag::Inside(EntityCategory::Org), source: None })
            .collect();
        assert!(tokens_to_spans(&tagged, text).is_empty());
    }
}

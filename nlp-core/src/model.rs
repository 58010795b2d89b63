//! # Modelo de Anotação
//!
//! O servidor só conhece a interface [`AnnotationModel`]: recebe um lote de
//! textos e devolve um [`Doc`] por texto. O modelo embutido,
//! [`EnglishModel`], é um anotador determinístico guiado por regras e léxicos:
//!
//! ```text
//! texto → tokenizer → regras/gazetteers (BIO) → sentenças → POS + morfologia
//!       → dependências → lemas → Doc
//! ```
//!
//! ## Identificadores aceitos por [`load`]
//!
//! - `en_core_web_rules`: modelo embutido com os léxicos padrão.
//! - caminho para um arquivo `.json`: modelo embutido estendido com os
//!   gazetteers do arquivo (chaves `person`, `org`, `gpe`, `loc`, `norp`,
//!   `product`, `event`, todas opcionais).

use std::path::Path;
use std::sync::Arc;

use rayon::prelude::*;
use serde::Deserialize;
use tracing::{debug, info, trace, warn};

use crate::document::{Doc, Span, TokenAnnotation};
use crate::error::ModelError;
use crate::features::{is_alpha, is_punct, word_shape};
use crate::lemmatizer::lemmatize;
use crate::lexicon;
use crate::parser::parse;
use crate::pos::{morphology, normalize, tag_tokens};
use crate::rule_based::RuleEngine;
use crate::sentencizer::split_sentences;
use crate::tagger::{tokens_to_spans, EntityCategory, Tag, TaggedToken};
use crate::tokenizer::tokenize;

/// Identificador do modelo embutido.
pub const BUILTIN_MODEL: &str = "en_core_web_rules";

/// Um modelo capaz de anotar lotes de textos em inglês.
///
/// Implementações devem ser imutáveis após a construção: a mesma instância é
/// compartilhada (`Arc`) entre requisições concorrentes.
pub trait AnnotationModel: Send + Sync {
    /// Identificador com que o modelo foi carregado.
    fn name(&self) -> &str;

    /// Anota cada texto do lote. A saída preserva a ordem da entrada.
    fn pipe(&self, texts: &[&str]) -> Result<Vec<Doc>, ModelError>;
}

/// Carrega o modelo indicado pelo identificador de configuração.
pub fn load(identifier: &str) -> Result<Arc<dyn AnnotationModel>, ModelError> {
    if identifier == BUILTIN_MODEL {
        return Ok(Arc::new(EnglishModel::build()));
    }

    let path = Path::new(identifier);
    if path.extension().is_some_and(|ext| ext == "json") {
        let lexicon = LexiconFile::read(path)?;
        if lexicon.is_empty() {
            warn!(path = identifier, "léxico adicional sem entradas; usando apenas os gazetteers padrão");
        }
        let mut model = EnglishModel::build();
        model.extend(&lexicon);
        model.name = identifier.to_string();
        info!(
            path = identifier,
            entries = lexicon.len(),
            "léxico adicional carregado"
        );
        return Ok(Arc::new(model));
    }

    Err(ModelError::UnknownModel(identifier.to_string()))
}

/// Gazetteers extras lidos de um arquivo JSON.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LexiconFile {
    #[serde(default)]
    pub person: Vec<String>,
    #[serde(default)]
    pub org: Vec<String>,
    #[serde(default)]
    pub gpe: Vec<String>,
    #[serde(default)]
    pub loc: Vec<String>,
    #[serde(default)]
    pub norp: Vec<String>,
    #[serde(default)]
    pub product: Vec<String>,
    #[serde(default)]
    pub event: Vec<String>,
}

impl LexiconFile {
    pub fn read(path: &Path) -> Result<Self, ModelError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Todas as entradas com sua categoria.
    pub fn entries(&self) -> impl Iterator<Item = (&str, EntityCategory)> {
        let groups = [
            (&self.person, EntityCategory::Person),
            (&self.org, EntityCategory::Org),
            (&self.gpe, EntityCategory::Gpe),
            (&self.loc, EntityCategory::Loc),
            (&self.norp, EntityCategory::Norp),
            (&self.product, EntityCategory::Product),
            (&self.event, EntityCategory::Event),
        ];
        groups
            .into_iter()
            .flat_map(|(names, category)| names.iter().map(move |n| (n.as_str(), category)))
    }

    pub fn len(&self) -> usize {
        self.entries().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// O modelo embutido: regras, léxicos e heurísticas para o inglês.
pub struct EnglishModel {
    name: String,
    rule_engine: RuleEngine,
}

impl EnglishModel {
    /// Constrói o modelo com os gazetteers padrão.
    pub fn build() -> Self {
        let mut rule_engine = RuleEngine::new();
        rule_engine.add_all(
            builtin_gazetteers()
                .into_iter()
                .flat_map(|(names, category)| names.iter().map(move |name| (*name, category))),
        );
        for name in FIRST_NAMES {
            rule_engine.add_first_name(name);
        }
        debug!(entries = rule_engine.gazetteer_len(), "modelo embutido construído");

        Self {
            name: BUILTIN_MODEL.to_string(),
            rule_engine,
        }
    }

    /// Acrescenta os gazetteers de um arquivo de léxico.
    ///
    /// O primeiro nome de cada pessoa também entra na lista de primeiros nomes.
    pub fn extend(&mut self, lexicon: &LexiconFile) {
        self.rule_engine.add_all(lexicon.entries());
        for (name, category) in lexicon.entries() {
            if category == EntityCategory::Person {
                if let Some(first) = name.split_whitespace().next() {
                    self.rule_engine.add_first_name(first);
                }
            }
        }
    }

    /// Anota um único texto.
    pub fn annotate(&self, text: &str) -> Doc {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return Doc::empty(text);
        }

        // Entidades: regras → tags BIO → spans
        let tagged: Vec<TaggedToken> = tokens
            .iter()
            .zip(self.rule_engine.apply(&tokens))
            .map(|(token, rule)| TaggedToken {
                token: token.clone(),
                tag: rule.as_ref().map_or(Tag::Outside, |m| m.tag),
                source: rule.map(|m| m.rule_name),
            })
            .collect();
        let entity_tags: Vec<Tag> = tagged.iter().map(|t| t.tag).collect();
        let entities = tokens_to_spans(&tagged, text);
        for entity in &entities {
            trace!(text = %entity.text, label = entity.category.name(), rule = %entity.source, "entidade reconhecida");
        }

        let sentences = split_sentences(&tokens, text);
        let pos_tags = tag_tokens(&tokens, &entity_tags, &sentences);
        let deps = parse(&tokens, &pos_tags, &sentences);

        // Tokens dentro de um span recebem o rótulo da entidade
        let mut ent_types: Vec<Option<String>> = vec![None; tokens.len()];
        for entity in &entities {
            for slot in &mut ent_types[entity.start_token..entity.end_token] {
                *slot = Some(entity.category.name().to_string());
            }
        }

        let annotations: Vec<TokenAnnotation> = tokens
            .iter()
            .zip(pos_tags.iter().zip(&deps))
            .zip(ent_types)
            .map(|((token, ((pos, tag), dep)), ent_type)| TokenAnnotation {
                text: token.text.clone(),
                start: token.start,
                pos: pos.to_string(),
                tag: tag.to_string(),
                dep: dep.label.to_string(),
                head: dep.head,
                shape: word_shape(&token.text),
                lemma: lemmatize(&token.text, pos, tag),
                is_alpha: is_alpha(&token.text),
                is_stop: lexicon::is_stop_word(&normalize(&token.text)),
                is_punct: is_punct(&token.text),
                ent_type,
                morph: morphology(&token.text, pos, tag),
            })
            .collect();

        let sents = sentences
            .iter()
            .map(|range| {
                let start = tokens[range.start].start;
                let end = tokens[range.end - 1].end;
                Span {
                    text: text[start..end].to_string(),
                    start_token: range.start,
                    end_token: range.end,
                    start,
                    end,
                    label: None,
                }
            })
            .collect();

        let ents = entities
            .into_iter()
            .map(|e| Span {
                text: e.text,
                start_token: e.start_token,
                end_token: e.end_token,
                start: e.start,
                end: e.end,
                label: Some(e.category.name().to_string()),
            })
            .collect();

        Doc {
            text: text.to_string(),
            tokens: annotations,
            sents,
            ents,
        }
    }
}

impl Default for EnglishModel {
    fn default() -> Self {
        Self::build()
    }
}

impl AnnotationModel for EnglishModel {
    fn name(&self) -> &str {
        &self.name
    }

    fn pipe(&self, texts: &[&str]) -> Result<Vec<Doc>, ModelError> {
        let docs = if texts.len() > 1 {
            texts.par_iter().map(|text| self.annotate(text)).collect()
        } else {
            texts.iter().map(|text| self.annotate(text)).collect()
        };
        Ok(docs)
    }
}

fn builtin_gazetteers() -> [(&'static [&'static str], EntityCategory); 8] {
    [
        (ORGANIZATIONS, EntityCategory::Org),
        (COUNTRIES_AND_CITIES, EntityCategory::Gpe),
        (LOCATIONS, EntityCategory::Loc),
        (NATIONALITIES, EntityCategory::Norp),
        (PRODUCTS, EntityCategory::Product),
        (EVENTS, EntityCategory::Event),
        (LANGUAGES, EntityCategory::Language),
        (PEOPLE, EntityCategory::Person),
    ]
}

const ORGANIZATIONS: &[&str] = &[
    "Apple", "Google", "Alphabet", "Microsoft", "Amazon", "Meta", "Facebook", "Netflix",
    "Tesla", "SpaceX", "IBM", "Intel", "Nvidia", "Samsung", "Sony", "Toyota", "Volkswagen",
    "Boeing", "Airbus", "Uber", "Airbnb", "Twitter", "OpenAI", "Oracle", "Adobe", "Spotify",
    "Goldman Sachs", "JPMorgan", "Morgan Stanley", "Citigroup", "Wells Fargo", "BlackRock",
    "Walmart", "Coca-Cola", "PepsiCo", "McDonald's", "Starbucks", "Nike", "Disney", "Pfizer",
    "Moderna", "NASA", "FBI", "CIA", "NATO", "UN", "United Nations", "European Union", "EU",
    "WHO", "World Health Organization", "World Bank", "IMF", "Federal Reserve",
    "Congress", "Senate", "Supreme Court", "White House", "Pentagon", "Harvard", "MIT",
    "Stanford", "Oxford University", "Cambridge University", "Reuters", "BBC", "CNN",
    "The New York Times", "New York Times", "Wall Street Journal", "Bloomberg",
    "Associated Press", "Democratic Party", "Republican Party", "Labour Party",
];

const COUNTRIES_AND_CITIES: &[&str] = &[
    "U.K.", "UK", "U.S.", "US", "USA", "U.S.A.", "United States", "United Kingdom",
    "America", "Britain", "Great Britain", "England", "Scotland", "Wales", "Ireland",
    "Canada", "Mexico", "Brazil", "Argentina", "Chile", "France", "Germany", "Italy", "Spain",
    "Portugal", "Netherlands", "Belgium", "Switzerland", "Sweden", "Norway", "Denmark",
    "Finland", "Poland", "Ukraine", "Russia", "China", "Japan", "India", "South Korea",
    "North Korea", "Australia", "New Zealand", "Egypt", "Nigeria", "South Africa", "Kenya",
    "Israel", "Iran", "Iraq", "Turkey", "Saudi Arabia", "Singapore", "Indonesia",
    "New York", "New York City", "Los Angeles", "San Francisco", "Chicago", "Boston",
    "Seattle", "Washington", "Texas", "California", "Florida", "London", "Paris", "Berlin",
    "Madrid", "Rome", "Tokyo", "Beijing", "Shanghai", "Moscow", "Toronto", "Sydney",
    "Mumbai", "Delhi", "Dubai", "Hong Kong", "Silicon Valley", "Cupertino",
];

const LOCATIONS: &[&str] = &[
    "Europe", "Asia", "Africa", "North America", "South America", "Latin America",
    "Middle East", "Antarctica", "Pacific", "Atlantic", "Pacific Ocean", "Atlantic Ocean",
    "Mediterranean", "Alps", "Himalayas", "Amazon River", "Nile", "Sahara", "Mount Everest",
];

const NATIONALITIES: &[&str] = &[
    "American", "Americans", "British", "English", "French", "German", "Germans",
    "Italian", "Spanish", "Chinese", "Japanese", "Indian", "Russian", "Russians",
    "Canadian", "Mexican", "Brazilian", "European", "Europeans", "Asian", "African",
    "Democrat", "Democrats", "Republican", "Republicans", "Christian", "Muslim", "Jewish",
    "Catholic",
];

const PRODUCTS: &[&str] = &[
    "iPhone", "iPad", "MacBook", "Windows", "Android", "ChatGPT", "PlayStation", "Xbox",
    "Model S", "Model 3", "Kindle", "Galaxy",
];

const EVENTS: &[&str] = &[
    "World War II", "World War I", "Olympics", "Olympic Games", "World Cup", "Super Bowl",
    "Cold War", "Brexit", "Christmas", "Thanksgiving",
];

const LANGUAGES: &[&str] = &["Spanish language", "Mandarin", "Arabic", "Latin", "Esperanto"];

const PEOPLE: &[&str] = &[
    "Tim Cook", "Steve Jobs", "Elon Musk", "Bill Gates", "Jeff Bezos", "Mark Zuckerberg",
    "Sundar Pichai", "Satya Nadella", "Barack Obama", "Joe Biden", "Donald Trump",
    "Abraham Lincoln", "Albert Einstein", "Isaac Newton", "Ada Lovelace", "Alan Turing",
    "Marie Curie", "William Shakespeare",
];

const FIRST_NAMES: &[&str] = &[
    "John", "James", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan",
    "Jessica", "Sarah", "Karen", "Emma", "Olivia", "Noah", "Liam", "Sophia", "Anna", "Peter",
    "Paul", "George", "Kevin", "Laura", "Maria", "Daniel", "Alice", "Bob", "Tim", "Steve",
    "Mark", "Jeff", "Bill", "Ada", "Alan", "Marie", "Sam", "Emily", "Jack", "Lucy",
];

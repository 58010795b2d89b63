//! # Léxico do Inglês
//!
//! Tabelas fechadas usadas pelo modelo embutido: palavras funcionais com sua
//! classe gramatical (Universal POS + tag Penn Treebank), stop words, formas
//! irregulares para o lematizador e listas auxiliares (meses, numerais,
//! verbos frequentes).
//!
//! Todas as consultas recebem a forma em **lowercase**.

/// Classe fechada: `(pos, tag)`.
pub type PosTag = (&'static str, &'static str);

/// Palavras funcionais com classe gramatical não ambígua (ou quase).
///
/// Casos dependentes de contexto (`to`, `'s`, `that`, `her`) são resolvidos
/// pelo tagger em [`crate::pos`].
pub fn closed_class(lower: &str) -> Option<PosTag> {
    let entry = match lower {
        // Determinantes
        "the" | "a" | "an" | "this" | "these" | "those" | "every" | "each" | "some" | "any"
        | "no" | "another" | "either" | "neither" | "all" | "both" => ("DET", "DT"),
        "which" | "whatever" | "whichever" => ("DET", "WDT"),

        // Pronomes pessoais
        "i" | "you" | "he" | "she" | "it" | "we" | "they" | "me" | "him" | "us" | "them"
        | "myself" | "yourself" | "himself" | "herself" | "itself" | "ourselves"
        | "themselves" => ("PRON", "PRP"),
        "my" | "your" | "his" | "its" | "our" | "their" => ("PRON", "PRP$"),
        "mine" | "yours" | "hers" | "ours" | "theirs" => ("PRON", "PRP"),
        "who" | "whom" | "what" | "whoever" => ("PRON", "WP"),
        "whose" => ("DET", "WP$"),
        "something" | "anything" | "nothing" | "everything" | "someone" | "anyone"
        | "everyone" | "nobody" | "somebody" | "everybody" => ("PRON", "NN"),

        // Preposições
        "at" | "in" | "on" | "for" | "of" | "with" | "by" | "from" | "about" | "into"
        | "over" | "under" | "after" | "before" | "between" | "through" | "during"
        | "without" | "within" | "against" | "among" | "across" | "behind" | "beyond"
        | "near" | "onto" | "toward" | "towards" | "upon" | "via" | "per" | "since"
        | "until" | "despite" | "like" | "than" | "out" | "off" | "around" | "along" => {
            ("ADP", "IN")
        }

        // Conjunções
        "and" | "or" | "but" | "nor" | "yet" | "&" => ("CCONJ", "CC"),
        "because" | "although" | "though" | "while" | "if" | "unless" | "whether"
        | "whereas" | "once" => ("SCONJ", "IN"),

        // Auxiliares e modais
        "is" | "'s" => ("AUX", "VBZ"),
        "are" | "am" | "'re" | "'m" => ("AUX", "VBP"),
        "was" | "were" => ("AUX", "VBD"),
        "be" => ("AUX", "VB"),
        "been" => ("AUX", "VBN"),
        "being" => ("AUX", "VBG"),
        "has" => ("AUX", "VBZ"),
        "have" | "'ve" => ("AUX", "VBP"),
        "had" | "'d" => ("AUX", "VBD"),
        "does" => ("AUX", "VBZ"),
        "do" => ("AUX", "VBP"),
        "did" => ("AUX", "VBD"),
        "will" | "would" | "can" | "could" | "should" | "may" | "might" | "must" | "shall"
        | "'ll" | "ca" | "wo" | "sha" => ("AUX", "MD"),

        // Negação e partículas
        "not" | "n't" | "never" => ("PART", "RB"),

        // Advérbios frequentes
        "very" | "also" | "too" | "just" | "only" | "still" | "already" | "even" | "now"
        | "then" | "here" | "there" | "soon" | "often" | "always" | "again" | "almost"
        | "quite" | "rather" | "perhaps" | "maybe" | "however" | "instead" | "together"
        | "away" | "ago" | "later" | "yesterday" | "today" | "tomorrow" => ("ADV", "RB"),
        "when" | "where" | "why" | "how" => ("ADV", "WRB"),
        "more" | "less" => ("ADJ", "JJR"),
        "most" | "least" => ("ADJ", "JJS"),

        // Interjeições
        "oh" | "hello" | "hi" | "wow" | "yes" | "ok" | "okay" | "hey" | "please" => {
            ("INTJ", "UH")
        }

        _ => return None,
    };
    Some(entry)
}

/// Formas de `be` e `have`, usadas para decidir entre VBD e VBN.
pub fn is_perfect_or_passive_aux(lower: &str) -> bool {
    matches!(
        lower,
        "has" | "have" | "had" | "'ve" | "is" | "are" | "was" | "were" | "be" | "been" | "being"
            | "'s" | "'re" | "am" | "get" | "got"
    )
}

/// Lista de stop words do inglês (mesmo espírito das listas usadas por pipelines de NLP).
const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anyone", "anything", "are", "around", "as", "at", "be", "became", "because", "become",
    "been", "before", "being", "below", "between", "both", "but", "by", "ca", "can", "cannot",
    "could", "did", "do", "does", "doing", "done", "down", "during", "each", "either", "else",
    "enough", "even", "ever", "every", "few", "for", "from", "further", "had", "has", "have",
    "he", "her", "here", "hers", "herself", "him", "himself", "his", "how", "however", "i",
    "if", "in", "into", "is", "it", "its", "itself", "just", "least", "less", "made", "make",
    "many", "may", "me", "might", "mine", "more", "most", "much", "must", "my", "myself",
    "n't", "neither", "never", "no", "nobody", "none", "nor", "not", "nothing", "now", "of",
    "off", "often", "on", "once", "one", "only", "onto", "or", "other", "others", "our",
    "ours", "ourselves", "out", "over", "own", "per", "perhaps", "please", "quite", "rather",
    "really", "'s", "same", "say", "see", "seem", "several", "she", "should", "since", "so",
    "some", "someone", "something", "still", "such", "take", "than", "that", "the", "their",
    "theirs", "them", "themselves", "then", "there", "these", "they", "this", "those",
    "though", "through", "thus", "to", "together", "too", "toward", "towards", "under",
    "until", "up", "upon", "us", "used", "very", "via", "was", "we", "well", "were", "what",
    "whatever", "when", "where", "whether", "which", "while", "who", "whoever", "whole",
    "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself", "yourselves", "'re", "'ve", "'ll", "'d", "'m",
];

pub fn is_stop_word(lower: &str) -> bool {
    STOP_WORDS.contains(&lower)
}

/// Verbos irregulares: `(base, passado, particípio)`.
const IRREGULAR_VERBS: &[(&str, &str, &str)] = &[
    ("be", "was", "been"),
    ("begin", "began", "begun"),
    ("break", "broke", "broken"),
    ("bring", "brought", "brought"),
    ("build", "built", "built"),
    ("buy", "bought", "bought"),
    ("choose", "chose", "chosen"),
    ("come", "came", "come"),
    ("do", "did", "done"),
    ("drive", "drove", "driven"),
    ("eat", "ate", "eaten"),
    ("fall", "fell", "fallen"),
    ("feel", "felt", "felt"),
    ("find", "found", "found"),
    ("fly", "flew", "flown"),
    ("get", "got", "gotten"),
    ("give", "gave", "given"),
    ("go", "went", "gone"),
    ("grow", "grew", "grown"),
    ("have", "had", "had"),
    ("hear", "heard", "heard"),
    ("hold", "held", "held"),
    ("keep", "kept", "kept"),
    ("know", "knew", "known"),
    ("lead", "led", "led"),
    ("leave", "left", "left"),
    ("lose", "lost", "lost"),
    ("make", "made", "made"),
    ("mean", "meant", "meant"),
    ("meet", "met", "met"),
    ("pay", "paid", "paid"),
    ("put", "put", "put"),
    ("read", "read", "read"),
    ("run", "ran", "run"),
    ("say", "said", "said"),
    ("see", "saw", "seen"),
    ("sell", "sold", "sold"),
    ("send", "sent", "sent"),
    ("set", "set", "set"),
    ("speak", "spoke", "spoken"),
    ("spend", "spent", "spent"),
    ("stand", "stood", "stood"),
    ("take", "took", "taken"),
    ("teach", "taught", "taught"),
    ("tell", "told", "told"),
    ("think", "thought", "thought"),
    ("understand", "understood", "understood"),
    ("win", "won", "won"),
    ("write", "wrote", "written"),
];

/// Forma base de um verbo irregular no passado ou particípio.
///
/// Retorna `(base, é_particípio)`.
pub fn irregular_verb_base(lower: &str) -> Option<(&'static str, bool)> {
    IRREGULAR_VERBS.iter().find_map(|(base, past, participle)| {
        if *base == lower {
            None
        } else if *participle == lower && *past != lower {
            Some((*base, true))
        } else if *past == lower {
            Some((*base, false))
        } else {
            None
        }
    })
}

/// Forma base de algum verbo irregular da tabela (`buy`, `be`, `go`...).
pub fn is_irregular_base(lower: &str) -> bool {
    IRREGULAR_VERBS.iter().any(|(base, _, _)| *base == lower)
}

/// Plurais irregulares: `(plural, singular)`.
const IRREGULAR_NOUNS: &[(&str, &str)] = &[
    ("men", "man"),
    ("women", "woman"),
    ("children", "child"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("people", "people"),
    ("data", "datum"),
    ("analyses", "analysis"),
    ("crises", "crisis"),
];

pub fn irregular_noun_singular(lower: &str) -> Option<&'static str> {
    IRREGULAR_NOUNS
        .iter()
        .find(|(plural, _)| *plural == lower)
        .map(|(_, singular)| *singular)
}

/// Verbos regulares frequentes na forma base.
///
/// Ajudam o tagger a reconhecer `looks`/`looking` como verbo e o lematizador
/// a restaurar o `e` final (`making` → `make`).
const COMMON_VERBS: &[&str] = &[
    "accept", "add", "agree", "allow", "announce", "answer", "appear", "ask", "believe",
    "buy", "call", "change", "close", "come", "consider", "continue", "create", "decide",
    "develop", "die", "expect", "explain", "find", "follow", "give", "go", "happen", "help",
    "hire", "hope", "include", "increase", "invest", "join", "keep", "know", "launch",
    "learn", "leave", "like", "live", "look", "love", "make", "manage", "move", "need",
    "offer", "open", "own", "pay", "plan", "play", "produce", "provide", "raise", "reach",
    "receive", "release", "remain", "report", "require", "return", "run", "say", "see",
    "seem", "sell", "serve", "show", "start", "stay", "stop", "study", "suggest", "take",
    "talk", "tell", "think", "try", "turn", "use", "visit", "wait", "walk", "want", "watch",
    "work", "write", "acquire", "merge", "purchase", "plan", "rise", "fall", "grow", "win",
    "lose", "meet", "move", "build", "close", "cut", "drop", "share", "hold",
];

pub fn is_common_verb(lower: &str) -> bool {
    COMMON_VERBS.contains(&lower)
}

/// Nomes de meses (inclui abreviações com ponto).
pub fn is_month(lower: &str) -> bool {
    matches!(
        lower,
        "january" | "february" | "march" | "april" | "may" | "june" | "july" | "august"
            | "september" | "october" | "november" | "december" | "jan." | "feb." | "mar."
            | "apr." | "jun." | "jul." | "aug." | "sep." | "sept." | "oct." | "nov." | "dec."
    )
}

pub fn is_weekday(lower: &str) -> bool {
    matches!(
        lower,
        "monday" | "tuesday" | "wednesday" | "thursday" | "friday" | "saturday" | "sunday"
    )
}

/// Palavras que expressam datas relativas (rotuladas como DATE).
pub fn is_relative_day(lower: &str) -> bool {
    matches!(lower, "today" | "yesterday" | "tomorrow" | "tonight")
}

/// Numerais por extenso.
pub fn is_number_word(lower: &str) -> bool {
    matches!(
        lower,
        "zero" | "one" | "two" | "three" | "four" | "five" | "six" | "seven" | "eight" | "nine"
            | "ten" | "eleven" | "twelve" | "thirteen" | "fourteen" | "fifteen" | "sixteen"
            | "seventeen" | "eighteen" | "nineteen" | "twenty" | "thirty" | "forty" | "fifty"
            | "sixty" | "seventy" | "eighty" | "ninety" | "hundred" | "thousand" | "dozen"
    ) || is_scale_word(lower)
}

/// Multiplicadores que estendem um valor monetário (`$1 billion`).
pub fn is_scale_word(lower: &str) -> bool {
    matches!(lower, "million" | "billion" | "trillion" | "thousand" | "hundred")
}

pub fn is_ordinal_word(lower: &str) -> bool {
    matches!(
        lower,
        "first" | "second" | "third" | "fourth" | "fifth" | "sixth" | "seventh" | "eighth"
            | "ninth" | "tenth"
    )
}

/// Unidades monetárias por extenso (`5 dollars`).
pub fn is_currency_word(lower: &str) -> bool {
    matches!(
        lower,
        "dollar" | "dollars" | "euro" | "euros" | "pound" | "pounds" | "yen" | "cents"
    )
}

pub fn is_currency_symbol(text: &str) -> bool {
    matches!(text, "$" | "€" | "£" | "¥" | "US$")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_class_lookup() {
        assert_eq!(closed_class("the"), Some(("DET", "DT")));
        assert_eq!(closed_class("at"), Some(("ADP", "IN")));
        assert_eq!(closed_class("is"), Some(("AUX", "VBZ")));
        assert_eq!(closed_class("startup"), None);
    }

    #[test]
    fn test_irregular_verbs() {
        assert_eq!(irregular_verb_base("bought"), Some(("buy", false)));
        assert_eq!(irregular_verb_base("written"), Some(("write", true)));
        assert_eq!(irregular_verb_base("looked"), None);
    }

    #[test]
    fn test_stop_words() {
        assert!(is_stop_word("is"));
        assert!(is_stop_word("for"));
        assert!(!is_stop_word("apple"));
    }
}

//! # Análise de Dependências
//!
//! Constrói, para cada sentença, uma árvore de dependências rasa a partir das
//! classes gramaticais:
//!
//! 1. Escolhe a raiz: o primeiro verbo finito (ou precedido de auxiliar), senão
//!    o primeiro verbo, senão o primeiro auxiliar (cópula), senão o núcleo do
//!    primeiro sintagma nominal.
//! 2. Agrupa sintagmas nominais (`the U.K. startup`, `$1 billion`) e liga os
//!    modificadores ao núcleo (`det`, `amod`, `compound`, `nummod`...).
//! 3. Liga cada núcleo nominal ao verbo (`nsubj`, `dobj`, `attr`) ou à
//!    preposição (`pobj`).
//! 4. Liga os tokens restantes (`aux`, `prep`, `pcomp`, `advmod`, `punct`...).
//!
//! A raiz de cada sentença aponta para si mesma com o rótulo `ROOT`. Todas as
//! cabeças ficam dentro da própria sentença.

use std::ops::Range;

use crate::lexicon::PosTag;
use crate::pos::normalize;
use crate::tokenizer::Token;

/// Arco de dependência: índice (no documento) da cabeça e rótulo da relação.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dependency {
    pub head: usize,
    pub label: &'static str,
}

/// Analisa todas as sentenças. O resultado está alinhado com `tokens`.
pub fn parse(tokens: &[Token], tags: &[PosTag], sentences: &[Range<usize>]) -> Vec<Dependency> {
    let mut deps: Vec<Dependency> = (0..tokens.len())
        .map(|i| Dependency { head: i, label: "dep" })
        .collect();

    for sentence in sentences {
        if sentence.is_empty() {
            continue;
        }
        let parser = SentenceParser::new(tokens, tags, sentence.clone());
        for (offset, dep) in parser.run().into_iter().enumerate() {
            deps[sentence.start + offset] = dep;
        }
    }
    deps
}

/// Sintagma nominal: `start..end` (índices no documento) e seu núcleo.
#[derive(Debug, Clone, Copy)]
struct Chunk {
    start: usize,
    end: usize,
    head: usize,
}

struct SentenceParser<'a> {
    tokens: &'a [Token],
    tags: &'a [PosTag],
    range: Range<usize>,
    arcs: Vec<Option<Dependency>>,
    chunk_of: Vec<Option<usize>>,
}

impl<'a> SentenceParser<'a> {
    fn new(tokens: &'a [Token], tags: &'a [PosTag], range: Range<usize>) -> Self {
        let len = range.len();
        Self {
            tokens,
            tags,
            range,
            arcs: vec![None; len],
            chunk_of: vec![None; len],
        }
    }

    fn run(mut self) -> Vec<Dependency> {
        let chunks = self.noun_chunks();
        for (n, chunk) in chunks.iter().enumerate() {
            for i in chunk.start..chunk.end {
                self.chunk_of[i - self.range.start] = Some(n);
            }
        }

        let root = self
            .verbal_root()
            .or_else(|| chunks.first().map(|c| c.head))
            .unwrap_or(self.range.start);
        self.set(root, root, "ROOT");

        for chunk in &chunks {
            self.attach_chunk_members(chunk);
        }
        let mut subject_taken = false;
        for n in 0..chunks.len() {
            self.attach_chunk_head(&chunks, n, root, &mut subject_taken);
        }
        for i in self.range.clone() {
            if self.arcs[i - self.range.start].is_none() {
                self.attach_other(&chunks, i, root);
            }
        }

        self.arcs
            .into_iter()
            .map(|arc| arc.unwrap_or(Dependency { head: root, label: "dep" }))
            .collect()
    }

    // --- acesso ---

    fn pos(&self, i: usize) -> &'static str {
        self.tags[i].0
    }

    fn tag(&self, i: usize) -> &'static str {
        self.tags[i].1
    }

    fn lower(&self, i: usize) -> String {
        normalize(&self.tokens[i].text)
    }

    /// Registra o arco, sem sobrescrever um já existente.
    fn set(&mut self, i: usize, head: usize, label: &'static str) {
        let slot = &mut self.arcs[i - self.range.start];
        if slot.is_none() {
            *slot = Some(Dependency { head, label });
        }
    }

    fn chunk_head_of(&self, chunks: &[Chunk], i: usize) -> Option<usize> {
        self.chunk_of[i - self.range.start].map(|n| chunks[n].head)
    }

    fn is_nominal(&self, i: usize) -> bool {
        matches!(self.pos(i), "NOUN" | "PROPN" | "NUM" | "SYM")
            || (self.pos(i) == "PRON" && self.tag(i) != "PRP$")
    }

    fn is_premodifier(&self, i: usize) -> bool {
        matches!(self.pos(i), "DET" | "ADJ") || matches!(self.tag(i), "PRP$" | "POS")
    }

    fn prev_non_punct(&self, i: usize) -> Option<usize> {
        (self.range.start..i).rev().find(|&j| self.pos(j) != "PUNCT")
    }

    /// Verbo mais próximo antes de `i` (na sentença).
    fn last_verb_before(&self, i: usize) -> Option<usize> {
        (self.range.start..i).rev().find(|&j| self.pos(j) == "VERB")
    }

    /// Próximo verbo a partir de `from`, pulando auxiliares, advérbios,
    /// partículas e pronomes, olhando no máximo `limit` tokens.
    fn next_verb(&self, from: usize, limit: usize) -> Option<usize> {
        for j in (from..self.range.end).take(limit) {
            match self.pos(j) {
                "VERB" => return Some(j),
                "AUX" | "ADV" | "PART" | "PRON" => continue,
                _ => return None,
            }
        }
        None
    }

    fn has_aux_before(&self, i: usize) -> bool {
        for j in (self.range.start..i).rev().take(3) {
            match self.pos(j) {
                "AUX" => return true,
                "ADV" | "PART" | "PRON" => continue,
                _ => return false,
            }
        }
        false
    }

    fn is_passive(&self, verb: usize) -> bool {
        self.tag(verb) == "VBN"
            && (self.range.start..verb).any(|j| {
                self.pos(j) == "AUX"
                    && matches!(self.lower(j).as_str(), "is" | "are" | "was" | "were" | "be" | "been" | "being" | "'s" | "'re")
            })
    }

    // --- etapas ---

    fn verbal_root(&self) -> Option<usize> {
        let range = self.range.clone();
        range
            .clone()
            .find(|&i| {
                self.pos(i) == "VERB"
                    && (matches!(self.tag(i), "VBD" | "VBZ" | "VBP") || self.has_aux_before(i))
            })
            .or_else(|| range.clone().find(|&i| self.pos(i) == "VERB"))
            .or_else(|| range.clone().find(|&i| self.pos(i) == "AUX" && self.tag(i) != "MD"))
    }

    fn noun_chunks(&self) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let end = self.range.end;
        let mut i = self.range.start;

        while i < end {
            if !(self.is_nominal(i) || self.is_premodifier(i)) {
                i += 1;
                continue;
            }
            // Pronome pessoal é sempre um sintagma isolado
            if self.tag(i) == "PRP" {
                chunks.push(Chunk { start: i, end: i + 1, head: i });
                i += 1;
                continue;
            }
            let mut j = i;
            while j < end && (self.is_nominal(j) || self.is_premodifier(j)) && self.tag(j) != "PRP" {
                j += 1;
            }
            if let Some(head) = self.chunk_head(i..j) {
                chunks.push(Chunk { start: i, end: j, head });
            }
            i = j;
        }
        chunks
    }

    /// Núcleo do sintagma: o símbolo monetário quando só há números depois
    /// dele (`$ 1 billion`), senão o último nominal.
    fn chunk_head(&self, span: Range<usize>) -> Option<usize> {
        let currency = span.clone().find(|&k| self.tag(k) == "$");
        if let Some(c) = currency {
            if (c + 1..span.end).all(|k| self.pos(k) == "NUM") {
                return Some(c);
            }
        }
        span.rev().find(|&k| self.is_nominal(k) && self.tag(k) != "POS")
    }

    fn attach_chunk_members(&mut self, chunk: &Chunk) {
        for k in chunk.start..chunk.end {
            if k == chunk.head {
                continue;
            }
            let next = (k + 1 < chunk.end).then_some(k + 1);
            let (head, label) = if self.tag(k) == "POS" {
                (if k > chunk.start { k - 1 } else { chunk.head }, "case")
            } else if next.is_some_and(|n| self.tag(n) == "POS") {
                (chunk.head, "poss")
            } else {
                match self.pos(k) {
                    "DET" => (chunk.head, "det"),
                    "ADJ" => (chunk.head, "amod"),
                    "PRON" if self.tag(k) == "PRP$" => (chunk.head, "poss"),
                    "NUM" => match next {
                        Some(n) if self.pos(n) == "NUM" => (n, "quantmod"),
                        _ => (chunk.head, "nummod"),
                    },
                    "NOUN" | "PROPN" => match next {
                        Some(n) if matches!(self.pos(n), "NOUN" | "PROPN") => (n, "compound"),
                        _ => (chunk.head, "compound"),
                    },
                    "SYM" => (chunk.head, "nmod"),
                    _ => (chunk.head, "dep"),
                }
            };
            self.set(k, head, label);
        }
    }

    fn attach_chunk_head(&mut self, chunks: &[Chunk], n: usize, root: usize, subject_taken: &mut bool) {
        let chunk = chunks[n];
        if chunk.head == root {
            return;
        }
        let before = self.prev_non_punct(chunk.start);

        if let Some(b) = before.filter(|&b| self.pos(b) == "ADP") {
            self.set(chunk.head, b, "pobj");
            return;
        }
        if let Some(b) = before.filter(|&b| self.pos(b) == "CCONJ") {
            if let Some(first) = self.prev_non_punct(b).and_then(|p| self.chunk_head_of(chunks, p)) {
                self.set(chunk.head, first, "conj");
                return;
            }
        }

        // Sujeito: sintagma seguido de verbo ou auxiliar
        let after = chunk.end;
        if after < self.range.end && matches!(self.pos(after), "VERB" | "AUX") {
            let verb = self.next_verb(after, 4).unwrap_or(after);
            if verb == root {
                if *subject_taken {
                    self.set(chunk.head, root, "npadvmod");
                    return;
                }
                *subject_taken = true;
            }
            let label = if self.is_passive(verb) { "nsubjpass" } else { "nsubj" };
            self.set(chunk.head, verb, label);
            return;
        }

        if chunk.head < root {
            let label = if *subject_taken {
                "npadvmod"
            } else if self.is_passive(root) {
                "nsubjpass"
            } else {
                "nsubj"
            };
            *subject_taken = true;
            self.set(chunk.head, root, label);
            return;
        }

        match self.last_verb_before(chunk.start) {
            Some(v) => self.set(chunk.head, v, "dobj"),
            None if self.pos(root) == "AUX" => self.set(chunk.head, root, "attr"),
            None => self.set(chunk.head, root, "dep"),
        }
    }

    fn attach_other(&mut self, chunks: &[Chunk], i: usize, root: usize) {
        let prev = self.prev_non_punct(i);
        let (head, label) = match self.pos(i) {
            "PUNCT" => (root, "punct"),
            "AUX" => match self.next_verb(i + 1, 3) {
                Some(v) if self.tag(v) == "VBN" && self.is_passive(v) => (v, "auxpass"),
                Some(v) => (v, "aux"),
                None => (root, "ccomp"),
            },
            "PART" => match self.tag(i) {
                "TO" => (self.next_verb(i + 1, 2).unwrap_or(root), "aux"),
                "RB" => (self.next_verb(i + 1, 3).unwrap_or(root), "neg"),
                _ => (root, "prt"),
            },
            "ADP" => {
                let head = self
                    .last_verb_before(i)
                    .or_else(|| prev.and_then(|p| self.chunk_head_of(chunks, p)))
                    .unwrap_or(root);
                (head, "prep")
            }
            "VERB" => self.attach_verb(chunks, i, prev, root),
            "SCONJ" => {
                let clause = (i + 1..self.range.end)
                    .find(|&j| self.pos(j) == "VERB")
                    .or_else(|| (i + 1..self.range.end).find(|&j| self.pos(j) == "AUX"))
                    .unwrap_or(root);
                (clause, "mark")
            }
            "CCONJ" => {
                let head = prev
                    .map(|p| self.chunk_head_of(chunks, p).unwrap_or(p))
                    .unwrap_or(root);
                (head, "cc")
            }
            "ADV" => {
                let head = self
                    .next_verb(i + 1, 2)
                    .or_else(|| self.last_verb_before(i))
                    .unwrap_or(root);
                (head, "advmod")
            }
            "ADJ" if self.pos(root) == "AUX" => (root, "acomp"),
            "ADJ" => match self.last_verb_before(i) {
                Some(v) => (v, "acomp"),
                None => (root, "amod"),
            },
            "INTJ" => (root, "intj"),
            _ => (root, "dep"),
        };
        self.set(i, head, label);
    }

    fn attach_verb(&self, chunks: &[Chunk], i: usize, prev: Option<usize>, root: usize) -> (usize, &'static str) {
        if let Some(p) = prev {
            if self.pos(p) == "ADP" {
                return (p, "pcomp");
            }
            if self.tag(p) == "TO" {
                let governor = self.last_verb_before(p).unwrap_or(root);
                return (governor, "xcomp");
            }
        }

        // Oração subordinada: conjunção antes de qualquer outro verbo
        let marker = (self.range.start..i)
            .rev()
            .take_while(|&j| self.pos(j) != "VERB")
            .find(|&j| self.pos(j) == "SCONJ");
        if let Some(m) = marker {
            let label = if self.lower(m) == "that" { "ccomp" } else { "advcl" };
            return (root, label);
        }

        if let Some(p) = prev {
            if self.pos(p) == "CCONJ" {
                return (self.last_verb_before(p).unwrap_or(root), "conj");
            }
            if matches!(self.tag(i), "VBG" | "VBN") {
                if let Some(noun) = self.chunk_head_of(chunks, p) {
                    return (noun, "acl");
                }
            }
        }

        if i > root {
            (root, "ccomp")
        } else {
            (root, "advcl")
        }
    }
}

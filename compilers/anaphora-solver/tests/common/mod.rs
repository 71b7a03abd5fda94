#![allow(dead_code)]

use anaphora_protocol::{AnnotatedSentence, Gender, Number, Relation, TokenId, Word, WordFlags};

pub fn plain(text: &str) -> Word {
    Word::new(text)
}

pub fn person(text: &str) -> Word {
    Word::new(text).with_gender(Gender::Person).with_number(Number::Singular)
}

pub fn male(text: &str) -> Word {
    Word::new(text).with_gender(Gender::Masculine).with_number(Number::Singular)
}

/// Singular noun with no gender annotation.
pub fn thing(text: &str) -> Word {
    Word::new(text).with_number(Number::Singular)
}

pub fn pronoun(text: &str, gender: Gender, number: Number) -> Word {
    Word::new(text).with_flags(WordFlags::PRONOUN).with_gender(gender).with_number(number)
}

pub fn reflexive(text: &str, gender: Gender) -> Word {
    pronoun(text, gender, Number::Singular).with_flags(WordFlags::REFLEXIVE)
}

pub fn sentence(brackets: &str, words: Vec<Word>) -> AnnotatedSentence {
    AnnotatedSentence { words, relations: Vec::new(), constituents: Some(brackets.to_string()) }
}

/// Mark `heads` as relation heads so they lead multi-word phrases.
pub fn with_heads(mut sentence: AnnotatedSentence, heads: &[u32]) -> AnnotatedSentence {
    sentence
        .relations
        .extend(heads.iter().map(|&h| Relation::unary("noun_number", TokenId(h))));
    sentence
}

/// Candidate words for the anaphor exported under `label`.
pub fn candidates_of(exported: &[anaphora_solver::ExportedAnaphor], label: &str) -> Vec<String> {
    exported
        .iter()
        .find(|e| e.label == label)
        .map(|e| e.candidates.clone())
        .unwrap_or_else(|| panic!("no anaphor labelled {label}"))
}

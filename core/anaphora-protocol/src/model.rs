use rkyv::{Archive, Deserialize, Serialize};
use crate::ids::TokenId;
use crate::morphology::{Gender, Number, WordFlags};
use alloc::string::String;
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// One word of a sentence with the attributes the upstream annotator
/// attached to it. Missing gender or number is meaningful, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Word {
    /// Surface form. Empty when the word was folded into an entity name.
    pub text: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub flags: WordFlags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub gender: Option<Gender>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub number: Option<Number>,
}

impl Word {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            flags: WordFlags::empty(),
            gender: None,
            number: None,
        }
    }

    pub fn with_flags(mut self, flags: WordFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_number(mut self, number: Number) -> Self {
        self.number = Some(number);
        self
    }

    pub fn is_pronoun(&self) -> bool {
        self.flags.contains(WordFlags::PRONOUN)
    }

    pub fn is_reflexive(&self) -> bool {
        self.flags.contains(WordFlags::REFLEXIVE)
    }
}

/// A grammatical relation reported upstream, e.g. `_subj(talk, Alice)` or
/// the unary `noun_number(Alice, singular)`. Only the head matters here:
/// a word that heads a relation is taken to lead its enclosing phrase.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Relation {
    pub name: String,
    pub head: TokenId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub dependent: Option<TokenId>,
}

impl Relation {
    pub fn binary(name: impl Into<String>, head: TokenId, dependent: TokenId) -> Self {
        Self { name: name.into(), head, dependent: Some(dependent) }
    }

    pub fn unary(name: impl Into<String>, head: TokenId) -> Self {
        Self { name: name.into(), head, dependent: None }
    }

    pub fn is_binary(&self) -> bool {
        self.dependent.is_some()
    }
}

/// Everything the upstream pipeline hands over for one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct AnnotatedSentence {
    /// Words in surface order; a word's position is its `TokenId`.
    pub words: Vec<Word>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub relations: Vec<Relation>,
    /// Penn-treebank bracket string. Absent for scripts the parser
    /// could not render.
    #[cfg_attr(feature = "serde", serde(default))]
    pub constituents: Option<String>,
}

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// Grammatical gender as reported by the upstream annotator.
///
/// `Person` is the gender of nouns naming people without a known sex
/// ("Alice", "the doctor"); it agrees with both masculine and feminine
/// pronouns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Gender {
    Masculine = 0,
    Feminine = 1,
    Neuter = 2,
    Person = 3,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Gender::Masculine => "masculine",
            Gender::Feminine => "feminine",
            Gender::Neuter => "neuter",
            Gender::Person => "person",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Number {
    Singular = 0,
    Plural = 1,
    Uncountable = 2,
}

impl Number {
    pub fn as_str(self) -> &'static str {
        match self {
            Number::Singular => "singular",
            Number::Plural => "plural",
            Number::Uncountable => "uncountable",
        }
    }
}

bitflags! {
    /// Boolean word features set by the upstream rule engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
    pub struct WordFlags: u32 {
        const PRONOUN = 1;
        const REFLEXIVE = 2;
        const DEFINITE = 4;
    }
}

// rkyv support for WordFlags
impl Archive for WordFlags {
    type Archived = u32;
    type Resolver = ();

    unsafe fn resolve(&self, _pos: usize, _resolver: Self::Resolver, out: *mut Self::Archived) {
        out.write(self.bits());
    }
}

impl<S: rkyv::Fallible + ?Sized> Serialize<S> for WordFlags {
    fn serialize(&self, _serializer: &mut S) -> Result<Self::Resolver, S::Error> {
        Ok(())
    }
}

impl<D: rkyv::Fallible + ?Sized> Deserialize<WordFlags, D> for u32 {
    fn deserialize(&self, _deserializer: &mut D) -> Result<WordFlags, D::Error> {
        // Unknown bits come from a newer annotator; drop them.
        Ok(WordFlags::from_bits_truncate(*self))
    }
}

pub mod error;
pub mod leader;
pub mod parser;
pub mod pronoun;
pub mod token;
pub mod tree;

use anaphora_protocol::{AnnotatedSentence, SentenceId};

pub use crate::error::TreeError;
pub use crate::leader::locate_leaders;
pub use crate::pronoun::{find_pronouns, PronounSite};
pub use crate::tree::{Child, PhraseNode, PhraseTree, PhraseType};

/// Primary entry point: annotated sentence -> tree with leaders.
///
/// `Ok(None)` when the sentence carries no bracket string.
pub fn build_tree(id: SentenceId, sentence: &AnnotatedSentence) -> Result<Option<PhraseTree>, TreeError> {
    let brackets = sentence.constituents.as_deref().unwrap_or("");
    let Some(mut tree) = PhraseTree::build(id, brackets, sentence.words.clone())? else {
        return Ok(None);
    };
    locate_leaders(&mut tree, &sentence.relations);
    Ok(Some(tree))
}

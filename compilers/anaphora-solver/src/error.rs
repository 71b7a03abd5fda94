use anaphora_parser::TreeError;
use anaphora_protocol::SentenceId;
use thiserror::Error;

/// Failure of a whole sentence. Nothing was resolved and nothing was added
/// to history.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("malformed constituent string: {0}")]
    Tree(#[from] TreeError),

    #[error("sentence id {id} is already taken; the next free id is {next}")]
    StaleSentence { id: SentenceId, next: SentenceId },
}

/// Why one anaphor was skipped. Never fatal to the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    #[error("'{word}' is not the direct child of a noun phrase")]
    NotNounPhrase { word: String },

    #[error("noun phrase around '{word}' has no leader")]
    MissingLeader { word: String },

    #[error("no clause or noun phrase above '{word}'")]
    NoClauseAbove { word: String },
}

use thiserror::Error;

/// Fatal problems with a bracket string. Any of these aborts tree
/// construction for the sentence.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("bracket string has {found} word tokens but the sentence has {expected} words")]
    TokenCountMismatch { expected: usize, found: usize },

    #[error("phrase opened at byte {offset} is never closed")]
    UnclosedPhrase { offset: usize },

    #[error("unexpected ')' at byte {offset}")]
    UnexpectedClose { offset: usize },

    #[error("phrase opened at byte {offset} has no type tag")]
    MissingPhraseType { offset: usize },

    #[error("expected '(' at byte {offset}")]
    ExpectedOpen { offset: usize },

    #[error("unexpected input after the root phrase at byte {offset}")]
    TrailingInput { offset: usize },
}

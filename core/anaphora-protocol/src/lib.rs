#![no_std] // Keeps the word model usable from embedded pipelines

extern crate alloc;

// Enable std if the feature is active (for tests/tools)
#[cfg(feature = "std")]
extern crate std;

pub mod ids;
pub mod morphology;

// Re-export core types for convenience
pub use ids::{NodeId, SentenceId, TokenId};
pub use morphology::*;

pub mod model;
pub use model::*;

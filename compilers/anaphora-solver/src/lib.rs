pub mod antecedents;
pub mod config;
pub mod error;
pub mod history;
pub mod hobbs;
pub mod marks;
pub mod phrase;

pub use crate::antecedents::{AntecedentStore, ExportedAnaphor, Filter};
pub use crate::config::{HistoryKind, ResolverConfig};
pub use crate::error::{ResolveError, WalkError};
pub use crate::history::{
    history_for, Clock, CountBoundHistory, ManualClock, SentenceHistory, SentenceRecord,
    SystemClock, TimeWindowHistory,
};
pub use crate::hobbs::Hobbs;
pub use crate::marks::MarkSet;
pub use crate::phrase::{PhraseKey, PhraseRef};

//! History cleaner engine: document model and the clean/restore passes.
mod backup;
mod clean;
mod config;
mod dom;
mod observe;
mod parse;
mod redact;
mod restore;
mod style;
mod types;

pub use backup::{BackupEntry, BackupStore};
pub use clean::Cleaner;
pub use config::CleanerConfig;
pub use dom::Document;
pub use ego_tree::NodeId;
pub use observe::{MutationRecord, ObserverId};
pub use redact::{hide_history, is_hidden};
pub use scraper::{CaseSensitivity, Node, Selector};
pub use types::{
    CleanReport, DomError, FailedRestore, RedactReport, RestoreReport, SkippedNode,
};

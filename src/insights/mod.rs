//! Derived, user-facing insights — model, bounded store, derivation rules.

pub mod derive;
pub mod model;
pub mod store;

pub use derive::{derive_insights, progress_summary};
pub use model::{Insight, InsightKind, InsightPriority};
pub use store::InsightStore;

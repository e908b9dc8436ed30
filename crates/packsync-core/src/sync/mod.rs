//! Adapter synchronization: target selection, the pack applier and the
//! generated entry documents

pub mod applier;
pub mod entry;
pub mod select;

pub use applier::{Action, ApplyRequest, Mode, PackApplier, SyncOutcome};
pub use entry::{build_entry_document, EntryContext};
pub use select::{install_targets, sync_targets, SelectionSource, TargetSelection};

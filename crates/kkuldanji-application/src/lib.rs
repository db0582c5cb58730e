//! Application layer for Kkuldanji.
//!
//! This crate owns the session state and exposes it through the named
//! commands of `HandoverUseCase`, coordinating the domain model, disk access
//! and the model calls.

pub mod bootstrap;
pub mod busy;
pub mod export;
pub mod handover_usecase;
pub mod notices;
pub mod workspace;

pub use bootstrap::build_usecase;
pub use busy::{BusyFlag, BusyGuard};
pub use export::{EXPORT_HEADER, ExportScope};
pub use handover_usecase::{HandoverUseCase, SendOutcome};
pub use workspace::{CallKind, HandoverWorkspace, ViewMode};

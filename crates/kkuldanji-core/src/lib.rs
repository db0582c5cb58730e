//! Domain model for the Kkuldanji handover assistant.
//!
//! Everything in this crate is synchronous and free of I/O: the report
//! document and its path accessor, the form store, tab projection, chat
//! history, uploaded sources and the traits implemented by the outer crates.

pub mod assistant;
pub mod auth;
pub mod config;
pub mod error;
pub mod form;
pub mod report;
pub mod secret;
pub mod session;
pub mod source;
pub mod view;

pub use assistant::HandoverAssistant;
pub use error::{HandoverError, Result};

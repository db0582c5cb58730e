//! Handover report domain module.
//!
//! - `model`: typed report records (`HandoverReport` and friends)
//! - `path`: dot-path accessors over report documents (`FieldPath`, `get`, `set`, ...)
//! - `schema`: section keys, editable lists and the generation response schema

pub mod model;
pub mod path;
pub mod schema;

pub use model::HandoverReport;
pub use path::{FieldPath, append_to_list, get, remove_from_list, set};
pub use schema::{ListField, SECTION_KEYS, missing_sections, response_schema};

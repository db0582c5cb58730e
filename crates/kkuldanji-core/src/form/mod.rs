//! Form state: the editable report and the input conversions feeding it.

mod input;
mod store;

pub use input::{clamp_progress, parse_flag, split_lines};
pub use store::{FormChange, FormStore};

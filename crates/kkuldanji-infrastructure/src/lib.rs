//! Disk and environment access for Kkuldanji.

pub mod file_intake;
pub mod paths;
pub mod secret_service;
pub mod storage;

pub use file_intake::FileIntake;
pub use paths::KkuldanjiPaths;
pub use secret_service::{GEMINI_API_KEY_ENV, SecretServiceImpl};
pub use storage::{ConfigStorage, SecretStorage};

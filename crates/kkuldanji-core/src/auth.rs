//! Login gate in front of the workspace.
//!
//! There is no credential check: both fields only have to be non-empty.

use crate::error::{HandoverError, Result};
use serde::{Deserialize, Serialize};

/// Shown when either login field is blank.
pub const LOGIN_REQUIRED_NOTICE: &str = "아이디와 비밀번호를 입력해 주세요.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub user_id: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: password.into(),
        }
    }

    /// Accepts the pair when both fields are non-blank.
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() || self.password.trim().is_empty() {
            return Err(HandoverError::security(LOGIN_REQUIRED_NOTICE));
        }
        Ok(())
    }
}

/// Tracks whether the shell has been unlocked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginGate {
    user_id: Option<String>,
}

impl LoginGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&mut self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;
        self.user_id = Some(credentials.user_id.trim().to_string());
        Ok(())
    }

    pub fn logout(&mut self) {
        self.user_id = None;
    }

    pub fn is_logged_in(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    /// Fails with the login notice while locked.
    pub fn require_login(&self) -> Result<()> {
        if self.is_logged_in() {
            Ok(())
        } else {
            Err(HandoverError::security(LOGIN_REQUIRED_NOTICE))
        }
    }
}

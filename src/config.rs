use crate::error::{MasspayError, Result};

/// Credentials for the mass pay service.
///
/// All three fields are required by every endpoint, so they are validated once
/// here and the constructor is the only way to obtain a `Config`. Operations
/// never re-check them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    token: String,
    pin: u32,
    uid: String,
}

impl Config {
    /// Validates and builds the service credentials.
    ///
    /// # Arguments
    ///
    /// * `token` - Never-expiring OAuth2 account token.
    /// * `pin` - Numeric account PIN. Zero is rejected.
    /// * `uid` - Account UID (e.g. "123-456-7890").
    pub fn new(token: impl Into<String>, pin: u32, uid: impl Into<String>) -> Result<Self> {
        let token = token.into();
        let uid = uid.into();

        if token.trim().is_empty() {
            return Err(MasspayError::Config("token must not be empty".to_string()));
        }
        if pin == 0 {
            return Err(MasspayError::Config("pin must be set".to_string()));
        }
        if uid.trim().is_empty() {
            return Err(MasspayError::Config("uid must not be empty".to_string()));
        }

        Ok(Self { token, pin, uid })
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn pin(&self) -> u32 {
        self.pin
    }

    pub fn uid(&self) -> &str {
        &self.uid
    }
}

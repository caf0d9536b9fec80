//! Provider configuration.
//!
//! Credentials and thresholds are loaded by the host application and passed
//! in explicitly; nothing here is read from the environment.

/// Credentials and peer thresholds for the Pretome provider.
#[derive(Debug, Clone, Default)]
pub struct PretomeConfig {
    /// Tracker account name.
    pub username: String,
    /// Tracker account password.
    pub password: String,
    /// Numeric login PIN (second factor), sent as a plain form field.
    pub pin: String,
    /// Rows with fewer seeders than this are discarded. The effective floor
    /// is always at least 1.
    pub minimum_seeders: u32,
    /// Declared leecher threshold; not enforced during extraction.
    pub minimum_leechers: u32,
}

impl PretomeConfig {
    /// Returns true when all three credential fields are set.
    ///
    /// Missing credentials only log a warning; the login attempt still goes
    /// ahead and the tracker rejects it with its own error page.
    pub fn has_credentials(&self) -> bool {
        if self.username.is_empty() || self.password.is_empty() || self.pin.is_empty() {
            tracing::warn!("Invalid username or password or pin. Check your settings");
            return false;
        }
        true
    }
}

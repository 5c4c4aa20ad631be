//! Session Config

use clap::Args;
use jiff::SignedDuration;

/// Session cookie settings.
#[derive(Debug, Args)]
pub struct SessionConfig {
    /// Name of the session cookie
    #[arg(long, env = "SESSION_COOKIE_NAME", default_value = "cellar_session")]
    pub cookie_name: String,

    /// Hours a session stays valid after login
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = 12)]
    pub session_ttl_hours: i64,

    /// Only send the session cookie over HTTPS
    #[arg(long, env = "SESSION_COOKIE_SECURE", default_value_t = false)]
    pub cookie_secure: bool,
}

impl SessionConfig {
    #[must_use]
    pub fn ttl(&self) -> SignedDuration {
        SignedDuration::from_hours(self.session_ttl_hours)
    }
}

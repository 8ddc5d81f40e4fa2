use serde::{Deserialize, Serialize};

use super::defaults;

/// HTTP server and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Lifetime of a session in seconds.
    pub session_ttl_secs: Option<u64>,
    /// Mark the session cookie `Secure` (HTTPS deployments).
    pub secure_cookies: Option<bool>,
}

impl ServerConfig {
    pub fn effective_bind_addr(&self) -> &str {
        self.bind_addr
            .as_deref()
            .unwrap_or(defaults::DEFAULT_BIND_ADDR)
    }

    pub fn effective_session_ttl_secs(&self) -> u64 {
        self.session_ttl_secs
            .unwrap_or(defaults::DEFAULT_SESSION_TTL_SECS)
    }

    pub fn effective_secure_cookies(&self) -> bool {
        self.secure_cookies
            .unwrap_or(defaults::DEFAULT_SECURE_COOKIES)
    }
}

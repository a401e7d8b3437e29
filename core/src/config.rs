//! Client configuration.
//!
//! The owner identifier is fixed for this deployment but travels as a value
//! in `ClientConfig` so tests can substitute it.

use crate::types::UserId;

/// The "current user" every list query is scoped to.
pub const OWNER_ID: UserId = 1606;

/// Base URL and owner scope shared by every request a client builds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    owner: UserId,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            owner: OWNER_ID,
        }
    }

    pub fn with_owner(mut self, owner: UserId) -> Self {
        self.owner = owner;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn owner(&self) -> UserId {
        self.owner
    }

    /// Join a route produced by [`crate::routes`] onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_fixed_owner() {
        let config = ClientConfig::new("http://localhost:3000");
        assert_eq!(config.owner(), 1606);
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000///");
        assert_eq!(config.base_url(), "http://localhost:3000");
        assert_eq!(config.url("/todos"), "http://localhost:3000/todos");
    }

    #[test]
    fn owner_can_be_substituted() {
        let config = ClientConfig::new("http://localhost:3000").with_owner(7);
        assert_eq!(config.owner(), 7);
    }
}

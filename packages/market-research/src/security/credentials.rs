//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate to prevent accidental logging of API keys.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

/// A secret string that won't be logged or displayed.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    /// Create a new secret string.
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(Box::from(value.into().as_str())))
    }

    /// Expose the secret value for use in a request header.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose().to_string())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// API keys for the web search providers, in fallback order.
#[derive(Clone, Default)]
pub struct SearchCredentials {
    /// Primary provider.
    pub tavily: Option<SecretString>,

    /// Secondary provider, used when the primary is missing or fails.
    pub brave: Option<SecretString>,
}

impl SearchCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tavily(mut self, key: impl Into<String>) -> Self {
        self.tavily = non_blank(key.into());
        self
    }

    pub fn with_brave(mut self, key: impl Into<String>) -> Self {
        self.brave = non_blank(key.into());
        self
    }

    /// True when no provider can be used.
    pub fn is_empty(&self) -> bool {
        self.tavily.is_none() && self.brave.is_none()
    }

    /// Names of the configured providers, in fallback order.
    pub fn configured_providers(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.tavily.is_some() {
            names.push("tavily");
        }
        if self.brave.is_some() {
            names.push("brave");
        }
        names
    }
}

fn non_blank(key: String) -> Option<SecretString> {
    let trimmed = key.trim();
    (!trimmed.is_empty()).then(|| SecretString::new(trimmed))
}

impl fmt::Debug for SearchCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchCredentials")
            .field("tavily", &self.tavily.as_ref().map(|_| "[REDACTED]"))
            .field("brave", &self.brave.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

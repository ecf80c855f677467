//! Application configuration value object

use serde::{Deserialize, Serialize};

/// Default API host the tenant subdomain is prepended to
pub const DEFAULT_API_HOST: &str = "localhost:8000";

/// Default URL scheme
pub const DEFAULT_API_SCHEME: &str = "http";

/// Default chunk size for file-backed capture streams (bytes)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    pub tenant_domain: Option<String>,
    pub api_host: Option<String>,
    pub api_scheme: Option<String>,
    pub chunk_size: Option<usize>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            tenant_domain: None,
            api_host: Some(DEFAULT_API_HOST.to_string()),
            api_scheme: Some(DEFAULT_API_SCHEME.to_string()),
            chunk_size: Some(DEFAULT_CHUNK_SIZE),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            tenant_domain: other.tenant_domain.or(self.tenant_domain),
            api_host: other.api_host.or(self.api_host),
            api_scheme: other.api_scheme.or(self.api_scheme),
            chunk_size: other.chunk_size.or(self.chunk_size),
        }
    }

    /// Get the API host, or the default if not set
    pub fn api_host_or_default(&self) -> &str {
        self.api_host.as_deref().unwrap_or(DEFAULT_API_HOST)
    }

    /// Get the URL scheme, or the default if not set
    pub fn api_scheme_or_default(&self) -> &str {
        self.api_scheme.as_deref().unwrap_or(DEFAULT_API_SCHEME)
    }

    /// Get the capture chunk size, or the default if not set
    pub fn chunk_size_or_default(&self) -> usize {
        self.chunk_size.unwrap_or(DEFAULT_CHUNK_SIZE)
    }

    /// Derive the API base URL from the tenant domain.
    /// Returns None until a tenant domain is configured.
    pub fn base_url(&self) -> Option<String> {
        let tenant = self.tenant_domain.as_deref()?;
        Some(format!(
            "{}://{}.{}",
            self.api_scheme_or_default(),
            tenant,
            self.api_host_or_default()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_no_tenant() {
        let config = AppConfig::defaults();
        assert!(config.tenant_domain.is_none());
        assert_eq!(config.api_host_or_default(), "localhost:8000");
        assert_eq!(config.api_scheme_or_default(), "http");
    }

    #[test]
    fn base_url_requires_tenant() {
        assert!(AppConfig::empty().base_url().is_none());
    }

    #[test]
    fn base_url_derivation() {
        let config = AppConfig {
            tenant_domain: Some("acme".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.base_url().unwrap(),
            "http://acme.localhost:8000"
        );
    }

    #[test]
    fn base_url_honors_scheme_and_host() {
        let config = AppConfig {
            tenant_domain: Some("acme".to_string()),
            api_host: Some("tasks.example.com".to_string()),
            api_scheme: Some("https".to_string()),
            chunk_size: None,
        };
        assert_eq!(
            config.base_url().unwrap(),
            "https://acme.tasks.example.com"
        );
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            tenant_domain: Some("acme".to_string()),
            api_host: Some("a.example.com".to_string()),
            api_scheme: None,
            chunk_size: Some(1024),
        };
        let other = AppConfig {
            tenant_domain: Some("globex".to_string()),
            api_host: None,
            api_scheme: Some("https".to_string()),
            chunk_size: None,
        };

        let merged = base.merge(other);
        assert_eq!(merged.tenant_domain.as_deref(), Some("globex"));
        assert_eq!(merged.api_host.as_deref(), Some("a.example.com"));
        assert_eq!(merged.api_scheme.as_deref(), Some("https"));
        assert_eq!(merged.chunk_size, Some(1024));
    }
}

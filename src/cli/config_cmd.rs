//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    // Validate value based on key type
    validate_config_value(key, value)?;

    // Load existing config
    let mut config = store.load().await?;

    // Update the appropriate field
    match key {
        "tenant_domain" => config.tenant_domain = Some(value.to_string()),
        "api_host" => config.api_host = Some(value.to_string()),
        "api_scheme" => config.api_scheme = Some(value.to_string()),
        "chunk_size" => {
            config.chunk_size = Some(parse_chunk_size(value).map_err(|message| {
                ConfigError::ValidationError {
                    key: key.to_string(),
                    message,
                }
            })?)
        }
        _ => unreachable!(), // Already validated
    }

    // Save config
    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    // Validate key
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }

    let config = store.load().await?;

    let value = match key {
        "tenant_domain" => config.tenant_domain,
        "api_host" => config.api_host,
        "api_scheme" => config.api_scheme,
        "chunk_size" => config.chunk_size.map(|n| n.to_string()),
        _ => unreachable!(),
    };

    match value {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    presenter.key_value(
        "tenant_domain",
        config.tenant_domain.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "api_host",
        config.api_host.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "api_scheme",
        config.api_scheme.as_deref().unwrap_or("(not set)"),
    );
    presenter.key_value(
        "chunk_size",
        &config
            .chunk_size
            .map(|n| n.to_string())
            .unwrap_or_else(|| "(not set)".to_string()),
    );

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Validate a config value based on key type
fn validate_config_value(key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "api_scheme" => {
            if value != "http" && value != "https" {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!("Invalid value '{}'. Valid options: http, https", value),
                });
            }
        }
        "chunk_size" => {
            parse_chunk_size(value).map_err(|message| ConfigError::ValidationError {
                key: key.to_string(),
                message,
            })?;
        }
        _ => {} // tenant_domain and api_host accept any string
    }
    Ok(())
}

/// Parse a chunk size value, rejecting zero
fn parse_chunk_size(value: &str) -> Result<usize, String> {
    let parsed: usize = value
        .parse()
        .map_err(|_| "Value must be a positive integer".to_string())?;
    if parsed == 0 {
        return Err("Value must be greater than zero".to_string());
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_chunk_size_valid() {
        assert_eq!(parse_chunk_size("4096"), Ok(4096));
        assert_eq!(parse_chunk_size("1"), Ok(1));
    }

    #[test]
    fn parse_chunk_size_invalid() {
        assert!(parse_chunk_size("0").is_err());
        assert!(parse_chunk_size("-1").is_err());
        assert!(parse_chunk_size("big").is_err());
    }

    #[test]
    fn validate_scheme_valid() {
        assert!(validate_config_value("api_scheme", "http").is_ok());
        assert!(validate_config_value("api_scheme", "https").is_ok());
    }

    #[test]
    fn validate_scheme_invalid() {
        assert!(validate_config_value("api_scheme", "ftp").is_err());
    }

    #[test]
    fn validate_free_form_keys() {
        assert!(validate_config_value("tenant_domain", "acme").is_ok());
        assert!(validate_config_value("api_host", "tasks.example.com:8000").is_ok());
    }
}

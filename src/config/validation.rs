//! Configuration validation logic.

use std::path::Path;

use regex::Regex;

use crate::config::loader::Config;
use crate::error::{Error, Result};
use crate::fs::OutputTemplate;

/// Largest page size the timeline endpoint honors.
const MAX_PAGE_SIZE: u32 = 200;

/// Validate the entire configuration, returning the parsed output template.
pub fn validate_config(config: &Config) -> Result<OutputTemplate> {
    validate_bearer_token(&config.client.bearer_token)?;
    validate_user_agent(&config.client.user_agent)?;
    let template = validate_template(&config.options.output_template)?;
    validate_page_size(config.options.page_size)?;

    if config.options.max_pages == Some(0) {
        return Err(Error::ConfigValidation {
            field: "max_pages".to_string(),
            message: "Must be at least 1 when set".to_string(),
        });
    }

    Ok(template)
}

/// Validate the bearer token.
pub fn validate_bearer_token(token: &str) -> Result<()> {
    if token.trim().is_empty() {
        return Err(Error::MissingConfig("bearer_token".to_string()));
    }

    if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return Err(Error::ConfigValidation {
            field: "bearer_token".to_string(),
            message: "Token must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

/// Validate the user agent string.
pub fn validate_user_agent(user_agent: &str) -> Result<()> {
    if user_agent.trim().is_empty() {
        return Err(Error::MissingConfig("user_agent".to_string()));
    }

    Ok(())
}

/// Validate an output template.
pub fn validate_template(template: &str) -> Result<OutputTemplate> {
    let parsed = OutputTemplate::parse(template)?;

    if Path::new(template).is_absolute() || template.starts_with('/') {
        return Err(Error::ConfigValidation {
            field: "output_template".to_string(),
            message: "Template must be relative; use the output directory for the base path"
                .to_string(),
        });
    }

    Ok(parsed)
}

/// Validate the timeline page size.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 || page_size > MAX_PAGE_SIZE {
        return Err(Error::ConfigValidation {
            field: "page_size".to_string(),
            message: format!(
                "Page size must be between 1 and {} (got {})",
                MAX_PAGE_SIZE, page_size
            ),
        });
    }

    Ok(())
}

/// Validate a screen name and strip a leading `@`.
pub fn parse_screen_name(input: &str) -> Result<String> {
    let name = input.trim().trim_start_matches('@');

    // Screen names: 1-15 chars, alphanumeric and underscores
    let pattern = Regex::new(r"^[A-Za-z0-9_]{1,15}$")
        .map_err(|e| Error::Config(format!("Invalid screen name pattern: {}", e)))?;

    if !pattern.is_match(name) {
        return Err(Error::ConfigValidation {
            field: "screen_name".to_string(),
            message: format!(
                "'{}' is not a valid screen name. Use 1-15 letters, digits or underscores.",
                input
            ),
        });
    }

    Ok(name.to_string())
}

use std::collections::HashSet;
use std::path::Path;
use crate::errors::ShopError;
use super::types::{ShopConfig, DEFAULT_CONFIG_FILE};
use super::schema::CONFIG_SCHEMA;
use tracing::{debug, warn};

const MAX_CONFIG_BYTES: u64 = 1_048_576;

/// Schemes that must never be fetched as an image reference.
const FORBIDDEN_IMAGE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Resolve the configuration for this run.
///
/// An explicit path must exist. Without one, `shopmission.yaml` in the working
/// directory is used if present, otherwise built-in defaults.
pub async fn load_config(explicit: Option<&Path>) -> Result<ShopConfig, ShopError> {
    match explicit {
        Some(path) => parse_config(path).await,
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.exists() {
                parse_config(fallback).await
            } else {
                debug!("No configuration file found, using defaults");
                Ok(ShopConfig::default())
            }
        }
    }
}

pub async fn parse_config(path: &Path) -> Result<ShopConfig, ShopError> {
    if !path.exists() {
        return Err(ShopError::Config(format!("Config file not found: {}", path.display())));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > MAX_CONFIG_BYTES {
        return Err(ShopError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    parse_config_str(&content)
}

pub fn parse_config_str(content: &str) -> Result<ShopConfig, ShopError> {
    let yaml: serde_yaml::Value = serde_yaml::from_str(content)?;

    // An empty document is a valid, all-defaults config
    if yaml.is_null() {
        return Ok(ShopConfig::default());
    }

    validate_schema(&yaml)?;

    let config: ShopConfig = serde_yaml::from_value(yaml)?;

    validate_conflicts(&config)?;

    Ok(config)
}

/// Validate config against the JSON schema for structural correctness.
fn validate_schema(yaml: &serde_yaml::Value) -> Result<(), ShopError> {
    let json_value: serde_json::Value = serde_json::to_value(yaml)
        .map_err(|e| ShopError::Config(format!("Config conversion error: {}", e)))?;

    let compiled = jsonschema::JSONSchema::compile(&CONFIG_SCHEMA)
        .map_err(|e| ShopError::Config(format!("Schema compilation error: {}", e)))?;

    let result = compiled.validate(&json_value);
    if let Err(errors) = result {
        // Advisory only; serde decides what is fatal
        for e in errors {
            warn!(validation_error = %format!("{} at {}", e, e.instance_path), "Config schema warning");
        }
    }

    Ok(())
}

/// Detect semantic conflicts in the parsed configuration.
fn validate_conflicts(config: &ShopConfig) -> Result<(), ShopError> {
    if let Some(missions) = &config.missions {
        let mut seen = HashSet::new();
        for mission in missions {
            if mission.title.trim().is_empty() {
                return Err(ShopError::Config("Mission title must not be empty".into()));
            }
            if !seen.insert(mission.title.as_str()) {
                return Err(ShopError::Config(format!(
                    "Duplicate mission title: '{}'",
                    mission.title
                )));
            }
            if mission.budget == 0 {
                warn!(mission = %mission.title, "Mission budget is zero; submission will never be possible");
            }
            if let Some(image) = &mission.image {
                let lower = image.trim().to_lowercase();
                if let Some(scheme) = FORBIDDEN_IMAGE_SCHEMES.iter().find(|s| lower.starts_with(**s)) {
                    return Err(ShopError::Config(format!(
                        "Mission '{}' uses a forbidden image scheme '{}'",
                        mission.title, scheme
                    )));
                }
            }
        }
    }

    if let Some(fetch) = &config.fetch {
        if fetch.timeout_secs == 0 {
            return Err(ShopError::Config("fetch.timeout_secs must be at least 1".into()));
        }
        if fetch.thumbnail_size == 0 {
            return Err(ShopError::Config("fetch.thumbnail_size must be positive".into()));
        }
    }

    if let Some(report) = &config.report {
        if report.max_reason_lines == 0 {
            return Err(ShopError::Config("report.max_reason_lines must be at least 1".into()));
        }
        if report.fonts.is_empty() {
            warn!("No report fonts configured; the built-in bitmap font will be used");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mission;

    #[test]
    fn test_validate_conflicts_duplicate_missions() {
        let config = ShopConfig {
            missions: Some(vec![
                Mission::new("picnic", 10_000, None),
                Mission::new("picnic", 20_000, None),
            ]),
            ..Default::default()
        };
        assert!(validate_conflicts(&config).is_err());
    }

    #[test]
    fn test_validate_conflicts_forbidden_scheme() {
        let config = ShopConfig {
            missions: Some(vec![Mission::new("picnic", 10_000, Some("javascript:alert(1)"))]),
            ..Default::default()
        };
        assert!(validate_conflicts(&config).is_err());
    }

    #[test]
    fn test_validate_conflicts_empty_config() {
        let config = ShopConfig::default();
        assert!(validate_conflicts(&config).is_ok());
    }

    #[test]
    fn test_parse_config_str_missions() {
        let yaml = r#"
catalog: data/products.csv
missions:
  - title: 김밥 싸기
    budget: 12000
  - title: 소풍 간식
    budget: 8000
    image: https://example.com/picnic.jpg
"#;
        let config = parse_config_str(yaml).unwrap();
        let missions = config.missions();
        assert_eq!(missions.len(), 2);
        assert_eq!(missions[0].title, "김밥 싸기");
        assert_eq!(missions[1].image.as_deref(), Some("https://example.com/picnic.jpg"));
        assert_eq!(config.catalog_path(), std::path::PathBuf::from("data/products.csv"));
    }

    #[test]
    fn test_parse_config_str_zero_timeout_rejected() {
        let yaml = "fetch:\n  timeout_secs: 0\n";
        assert!(matches!(parse_config_str(yaml), Err(ShopError::Config(_))));
    }

    #[test]
    fn test_parse_config_str_empty_document() {
        let config = parse_config_str("").unwrap();
        assert!(config.missions.is_none());
    }

    #[tokio::test]
    async fn test_parse_config_missing_file() {
        let result = parse_config(Path::new("/nonexistent/shopmission.yaml")).await;
        assert!(matches!(result, Err(ShopError::Config(_))));
    }
}

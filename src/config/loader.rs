use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

use super::core::ClassificationConfig;
use crate::errors::{ConfigurationError, Result};

/// Pure function to read a config or profile file
pub(crate) fn read_file(path: &Path) -> Result<String> {
    let file = fs::File::open(path).map_err(|source| ConfigurationError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader
        .read_to_string(&mut contents)
        .map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(contents)
}

/// Pure function to parse config from a TOML string
pub fn parse_config(contents: &str) -> Result<ClassificationConfig> {
    toml::from_str::<ClassificationConfig>(contents)
        .map_err(|e| ConfigurationError::parse("classification config", e))
}

/// Reads and parses a TOML config file. Validation is a separate step.
pub fn load_config(path: &Path) -> Result<ClassificationConfig> {
    let contents = read_file(path)?;
    let config = parse_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classification::Role;
    use crate::config::ProfileName;
    use indoc::indoc;

    #[test]
    fn test_parse_full_config() {
        let toml = indoc! {r#"
            profile = "repository-aware"
            min_priority = 72
            parallel = false
            exclude = ["com.acme.generated.*"]

            [priority_overrides]
            "domain.naming.domainService" = 71

            [explicit]
            "com.acme.order.Order" = "AGGREGATE_ROOT"
        "#};
        let config = parse_config(toml).unwrap();
        assert_eq!(config.profile, ProfileName::RepositoryAware);
        assert_eq!(config.min_priority, 72);
        assert!(!config.parallel);
        assert!(config.expand_pivots);

        let validated = config.validate().unwrap();
        assert_eq!(
            validated.explicit().get(&"com.acme.order.Order".into()),
            Some(&Role::AggregateRoot)
        );
        assert_eq!(
            validated.priorities().get("boundary.signature.persistence"),
            Some(&82)
        );
    }

    #[test]
    fn test_empty_config_is_default() {
        assert_eq!(parse_config("").unwrap(), ClassificationConfig::default());
    }

    #[test]
    fn test_parse_error_is_configuration_error() {
        let err = parse_config("profile = 3").unwrap_err();
        assert!(matches!(err, ConfigurationError::Parse { .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/nonexistent/rolemap.toml")).unwrap_err();
        assert!(matches!(err, ConfigurationError::Io { .. }));
    }
}

use std::fmt;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: String, source: std::io::Error },
    Yaml(serde_yaml_ng::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => write!(f, "Config file {}: {}", path, source),
            ConfigError::Yaml(e) => write!(f, "Malformed config: {}", e),
            ConfigError::Invalid(reason) => write!(f, "Config validation error: {}", reason),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            ConfigError::Yaml(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ConfigError::Yaml(e)
    }
}

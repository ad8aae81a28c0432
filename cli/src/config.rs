use std::path::Path;

pub(crate) use tictactoe_engine::config::{
    ConfigError, ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer,
};
use serde::{Deserialize, Serialize};
use tictactoe_engine::logger::LogLevel;
use tictactoe_engine::tictactoe::{DEFAULT_HUMAN_MARK, Mark};

pub const DEFAULT_CONFIG_FILE: &str = "tictactoe_config.yaml";

const MAX_COMPUTER_MOVE_DELAY_MS: u64 = 5000;

pub fn get_config_manager(
    path: &Path,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path)
}

/// Loads the config, falling back to defaults when the file is unusable.
/// The load error is handed back so it can be logged once the logger is up.
pub fn load_or_default(path: &Path) -> (Config, Option<ConfigError>) {
    match get_config_manager(path).get_config() {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Default)]
pub struct Config {
    pub game: GameConfig,
    pub log: LogConfig,
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.game.validate()?;
        Ok(())
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct GameConfig {
    /// X always opens, so `O` hands the first move to the computer.
    pub human_mark: Mark,
    pub computer_move_delay_ms: u64,
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<(), String> {
        if self.human_mark == Mark::Empty {
            return Err("human_mark must be X or O".to_string());
        }
        if self.computer_move_delay_ms > MAX_COMPUTER_MOVE_DELAY_MS {
            return Err(format!(
                "computer_move_delay_ms must not exceed {}",
                MAX_COMPUTER_MOVE_DELAY_MS
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            human_mark: DEFAULT_HUMAN_MARK,
            computer_move_delay_ms: 300,
        }
    }
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct LogConfig {
    pub level: LogLevel,
    pub use_prefix: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            use_prefix: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tictactoe_engine::config::{ConfigContentProvider, ConfigSerializer};

    fn get_temp_file_path() -> PathBuf {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_tictactoe_config_{}.yaml", random_number));
        path
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let serialized_string = serializer.serialize(&default_config).unwrap();
        let deserialized_config: Config = serializer.deserialize(&serialized_string).unwrap();
        assert_eq!(default_config, deserialized_config);
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_file() {
        let default_config = Config::default();
        let serializer = YamlConfigSerializer::new();
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());

        let serialized_string = serializer.serialize(&default_config).unwrap();
        content_provider.set_config_content(&serialized_string).unwrap();

        let read_string = content_provider.get_config_content().unwrap().unwrap();
        let deserialized_config: Config = serializer.deserialize(&read_string).unwrap();
        assert_eq!(default_config, deserialized_config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_can_be_saved_and_loaded_by_manager() {
        let config = Config {
            game: GameConfig {
                human_mark: Mark::O,
                computer_move_delay_ms: 0,
            },
            log: LogConfig {
                level: LogLevel::Debug,
                use_prefix: true,
            },
        };
        let file_path = get_temp_file_path();
        let manager = get_config_manager(&file_path);

        manager.set_config(&config).unwrap();
        assert_eq!(manager.get_config().unwrap(), config);

        let fresh_manager = get_config_manager(&file_path);
        assert_eq!(fresh_manager.get_config().unwrap(), config);

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_config_file_does_not_exist_returns_default_config() {
        let manager = get_config_manager(Path::new("this_file_does_not_exist.yaml"));
        assert_eq!(manager.get_config().unwrap(), Config::default());
    }

    #[test]
    fn test_invalid_config_cant_be_read() {
        let invalid_config_content = r#"
            game:
              human_mark: Empty
              computer_move_delay_ms: 300
            log:
              level: Info
              use_prefix: false
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider.set_config_content(invalid_config_content).unwrap();

        let manager = get_config_manager(&file_path);
        assert!(matches!(manager.get_config(), Err(ConfigError::Invalid(_))));

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_field_cant_be_read() {
        let incomplete_config_content = r#"
            game:
              # human_mark is missing
              computer_move_delay_ms: 300
            log:
              level: Info
              use_prefix: false
        "#;

        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider.set_config_content(incomplete_config_content).unwrap();

        let manager = get_config_manager(&file_path);
        assert!(matches!(manager.get_config(), Err(ConfigError::Yaml(_))));

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_malformed_config_falls_back_to_default() {
        let file_path = get_temp_file_path();
        let content_provider = FileContentConfigProvider::new(file_path.clone());
        content_provider.set_config_content("game: [not, a, map").unwrap();

        let (config, error) = load_or_default(&file_path);
        assert_eq!(config, Config::default());
        assert!(matches!(error, Some(ConfigError::Yaml(_))));

        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_missing_config_loads_default_without_error() {
        let (config, error) = load_or_default(Path::new("this_file_does_not_exist.yaml"));
        assert_eq!(config, Config::default());
        assert!(error.is_none());
    }

    #[test]
    fn test_excessive_delay_is_rejected() {
        let config = GameConfig {
            computer_move_delay_ms: 60_000,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }
}

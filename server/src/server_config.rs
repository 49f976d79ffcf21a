use serde::{Deserialize, Serialize};

/// Session settings, loadable from a YAML file. Width and height are cell
/// counts; the playable grid spans (0,0) ..= (width-1, height-1).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub field_width: i32,
    pub field_height: i32,
    pub tick_interval_ms: u64,
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            field_width: 11,
            field_height: 11,
            tick_interval_ms: 500,
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn load(path: &str) -> Result<ServerConfig, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config {}: {}", path, e))?;
        let config: ServerConfig = serde_yaml_ng::from_str(&content)
            .map_err(|e| format!("Failed to parse config {}: {}", path, e))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.field_width <= 0 || self.field_height <= 0 {
            return Err(format!(
                "Field dimensions must be positive, got {}x{}",
                self.field_width, self.field_height
            ));
        }
        if self.field_width == 1 && self.field_height == 1 {
            return Err("Field must have room for a snake and a food point".to_string());
        }
        if self.tick_interval_ms == 0 {
            return Err("Tick interval must be at least 1 ms".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file_path() -> String {
        let mut path = std::env::temp_dir();
        let random_number: u32 = rand::random();
        path.push(format!("temp_snake_server_config_{}.yaml", random_number));
        path.to_str().unwrap().to_string()
    }

    #[test]
    fn test_default_config_validates() {
        assert!(ServerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_round_trips_through_yaml() {
        let config = ServerConfig {
            field_width: 20,
            field_height: 15,
            tick_interval_ms: 100,
            seed: Some(7),
        };

        let serialized = serde_yaml_ng::to_string(&config).unwrap();
        let deserialized: ServerConfig = serde_yaml_ng::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: ServerConfig = serde_yaml_ng::from_str("field_width: 30\n").unwrap();
        assert_eq!(config.field_width, 30);
        assert_eq!(config.field_height, ServerConfig::default().field_height);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = ServerConfig {
            field_width: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            field_height: -3,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());

        let config = ServerConfig {
            tick_interval_ms: 0,
            ..ServerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = temp_file_path();
        let config = ServerConfig {
            field_width: 12,
            field_height: 9,
            tick_interval_ms: 250,
            seed: Some(99),
        };
        std::fs::write(&path, serde_yaml_ng::to_string(&config).unwrap()).unwrap();

        let loaded = ServerConfig::load(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let path = temp_file_path();
        std::fs::write(&path, "field_width: -5\n").unwrap();

        assert!(ServerConfig::load(&path).is_err());

        std::fs::remove_file(&path).ok();
    }
}

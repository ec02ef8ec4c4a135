use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigResult;
use std::fs;
use std::path::Path;

/// Loads and validates a TOML configuration file.
///
/// # Arguments
///
/// * `path` - Path to the TOML file
///
/// # Returns
///
/// * `Ok(Config)` - Parsed and validated configuration
/// * `Err(ConfigError)` - File, parse, or validation failure
pub fn load_config(path: &Path) -> ConfigResult<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    validate(&config)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config(Path::new("/nonexistent/modscout.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("modscout_config_{}.toml", std::process::id()));
        {
            let mut file = fs::File::create(&path).unwrap();
            writeln!(file, "[site]").unwrap();
            writeln!(file, "base-url = \"https://minecraft-inside.ru\"").unwrap();
        }

        let config = load_config(&path).unwrap();
        assert_eq!(config.site.base_url, "https://minecraft-inside.ru");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_config_rejects_bad_toml() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("modscout_bad_{}.toml", std::process::id()));
        fs::write(&path, "[site\nbase-url = 3").unwrap();

        assert!(load_config(&path).is_err());

        let _ = fs::remove_file(&path);
    }
}

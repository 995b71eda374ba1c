use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Generation defaults that can be set once in the config file instead of
/// being passed on every run. Command-line flags override these; these
/// override the built-in defaults.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Standard PDF font name or path to a .ttf file
    pub font: Option<String>,
    pub font_size: Option<f64>,
    /// "a5", "a4" or "letter"
    pub page_size: Option<String>,
    pub margin_mm: Option<f64>,
    pub hour_start: Option<u32>,
    pub hour_end: Option<u32>,
    pub start_in_april: Option<bool>,
    pub starts_with_monday: Option<bool>,
    pub adjust_left: Option<bool>,
}

/// Get the config file path (~/.config/vercal/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("vercal");
    Ok(dir.join("config.toml"))
}

/// Load the config file. A missing file just means all defaults.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        return Ok(Config::default());
    }
    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_partial_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hour_end = 22\nstart_in_april = false").unwrap();
        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.hour_end, Some(22));
        assert_eq!(config.start_in_april, Some(false));
        assert_eq!(config.font, None);
    }

    #[test]
    fn rejects_malformed_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hour_end = \"late\"").unwrap();
        assert!(load_config_from(file.path()).is_err());
    }
}

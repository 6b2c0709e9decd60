use super::money::Currency;
use super::note::NoteProperties;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CategoryConfig {
    pub name: String,
    pub parent: Option<String>,
    #[serde(default)]
    pub global: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FareConfig {
    pub id: String,
    pub agency_id: Option<String>,
    pub agency_name: Option<String>,
    pub name: Option<String>,
    /// Overrides the top-level currency for this fare's prices.
    pub currency: Option<Currency>,
    /// Price in minor units, keyed by category name.
    #[serde(default)]
    pub prices: BTreeMap<String, i64>,
    #[serde(default)]
    pub notes: Vec<NoteProperties>,
    /// Id of an earlier fare to start from.
    pub template: Option<String>,
    /// Id of an earlier fare whose notes are carried over.
    pub notes_from: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    pub currency: Currency,
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
    #[serde(default)]
    pub fares: Vec<FareConfig>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "fares", "fares")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!(
            categories = config.categories.len(),
            fares = config.fares.len(),
            "Successfully loaded config"
        );
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
currency: "usd"
categories:
  - name: youth
    parent: student
  - name: pet
    global: true
fares:
  - id: metro
    agency_id: "AGN"
    agency_name: "Metro Transit"
    name: "Metro Fare"
    prices:
      regular: 250
      student: 150
      bicycle: 100
    notes:
      - "Valid 90 minutes at {agency_id}"
  - id: metro_night
    template: metro
    currency: "EUR"
    notes_from: metro
    notes: ["Night service"]
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency.code(), "USD");

        assert_eq!(config.categories.len(), 2);
        assert_eq!(config.categories[0].name, "youth");
        assert_eq!(config.categories[0].parent.as_deref(), Some("student"));
        assert!(!config.categories[0].global);
        assert!(config.categories[1].global);
        assert!(config.categories[1].parent.is_none());

        assert_eq!(config.fares.len(), 2);
        let metro = &config.fares[0];
        assert_eq!(metro.id, "metro");
        assert_eq!(metro.agency_id.as_deref(), Some("AGN"));
        assert_eq!(metro.prices.get("student"), Some(&150));
        assert_eq!(metro.notes[0].pattern(), "Valid 90 minutes at {agency_id}");
        assert!(metro.template.is_none());
        assert!(metro.currency.is_none());

        let night = &config.fares[1];
        assert_eq!(night.template.as_deref(), Some("metro"));
        assert_eq!(night.notes_from.as_deref(), Some("metro"));
        assert_eq!(night.currency.as_ref().map(|c| c.code()), Some("EUR"));
        assert!(night.prices.is_empty());
    }

    #[test]
    fn test_config_rejects_bad_currency() {
        let result: Result<AppConfig, _> = serde_yaml::from_str("currency: \"dollars\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_from_path_reports_file() -> Result<()> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "currency: [")?;

        let err = AppConfig::load_from_path(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));

        let missing = file.path().with_extension("missing");
        let err = AppConfig::load_from_path(&missing).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
        Ok(())
    }
}

use std::path::PathBuf;

use config::{Config, ConfigError, Environment};
use serde::Deserialize;

use crate::store::OutputLayout;

pub const DEFAULT_BASE_URL: &str = "https://www.mayoclinic.org";
pub const DEFAULT_INDEX_PATH: &str = "/diseases-conditions";
pub const DEFAULT_OUTPUT: &str = "secciones.json";

const ENV_PREFIX: &str = "MAYO";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Site origin; letter-page hrefs are appended to it.
    pub base_url: String,
    pub index_path: String,
    pub output: PathBuf,
    pub layout: OutputLayout,
    /// Stop after this many condition pages.
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            index_path: DEFAULT_INDEX_PATH.to_string(),
            output: PathBuf::from(DEFAULT_OUTPUT),
            layout: OutputLayout::Nested,
            limit: None,
        }
    }
}

impl Settings {
    /// Defaults, overridden by `MAYO_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("index_path", DEFAULT_INDEX_PATH)?
            .set_default("output", DEFAULT_OUTPUT)?
            .set_default("layout", "nested")?
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn index_url(&self) -> String {
        format!("{}{}", self.base_url, self.index_path)
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_index_url() {
        assert_eq!(
            Settings::default().index_url(),
            "https://www.mayoclinic.org/diseases-conditions"
        );
    }

    // Only test in the crate that touches MAYO_* variables.
    #[test]
    fn environment_overrides_defaults() {
        std::env::set_var("MAYO_OUTPUT", "out/conditions.json");
        std::env::set_var("MAYO_LAYOUT", "flat");
        std::env::set_var("MAYO_LIMIT", "5");
        let settings = Settings::load();
        std::env::remove_var("MAYO_OUTPUT");
        std::env::remove_var("MAYO_LAYOUT");
        std::env::remove_var("MAYO_LIMIT");

        let settings = settings.unwrap();
        assert_eq!(settings.output, PathBuf::from("out/conditions.json"));
        assert_eq!(settings.layout, OutputLayout::Flat);
        assert_eq!(settings.limit, Some(5));
        assert_eq!(settings.base_url, DEFAULT_BASE_URL);
        assert_eq!(settings.index_path, DEFAULT_INDEX_PATH);
    }
}

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

use crate::format::NumberFormat;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub page_title: String,
    pub channel_name: String,
    pub author: String,
    pub default_top_n: usize,
    pub highlight_count: usize,
    pub title_max_chars: usize,
    pub number_format: NumberFormat,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            page_title: "Inteligência em YouTube Shorts".to_string(),
            channel_name: "Cláudio Dantas".to_string(),
            author: "Carlos Becker".to_string(),
            default_top_n: 5,
            highlight_count: 3,
            title_max_chars: 30,
            number_format: NumberFormat::default(),
        }
    }
}

impl DashboardConfig {
    /// Reads a JSON config file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config {}", path.display()))?;
                serde_json::from_str(&raw)
                    .with_context(|| format!("invalid config {}", path.display()))?
            }
            None => Self::default(),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.default_top_n >= 1, "default_top_n must be at least 1");
        ensure!(self.highlight_count >= 1, "highlight_count must be at least 1");
        ensure!(self.title_max_chars >= 1, "title_max_chars must be at least 1");
        Ok(())
    }
}

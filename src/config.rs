use crate::model::{Canvas, DEFAULT_CLUSTERS, clamp_cluster_count};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Tunables for a clustering session, loadable from JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub canvas_width: f64,
    pub canvas_height: f64,
    /// Milliseconds between iterations while running
    pub tick_interval_ms: u64,
    /// Initial cluster count, clamped into the supported range
    pub num_clusters: i64,
    /// Fixed seed for centroid placement; random when absent
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            canvas_width: Canvas::DEFAULT_WIDTH,
            canvas_height: Canvas::DEFAULT_HEIGHT,
            tick_interval_ms: 500,
            num_clusters: DEFAULT_CLUSTERS as i64,
            seed: None,
        }
    }
}

impl SessionConfig {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        info!(path = %path.display(), "session config loaded");
        Ok(config)
    }

    /// Reject settings the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if !Canvas::new(self.canvas_width, self.canvas_height).is_drawable() {
            bail!(
                "canvas must have positive finite size, got {}x{}",
                self.canvas_width,
                self.canvas_height
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("tick_interval_ms must be greater than zero");
        }
        Ok(())
    }

    pub fn cluster_count(&self) -> usize {
        clamp_cluster_count(self.num_clusters)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

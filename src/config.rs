use crate::tools::TerrainCosts;
use crate::types::IndexBase;
use anyhow::Context;
use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone)]
pub struct Config {
    pub logging: LoggingConfig,
    pub engine: EngineConfig,
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "pretty"
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Numbering used for vertex ids in files and output
    pub index_base: IndexBase,
    /// JSON terrain table for grid routing
    pub terrain: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
            engine: EngineConfig {
                index_base: IndexBase::One,
                terrain: None,
            },
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        let config = Self {
            logging: LoggingConfig {
                level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
                format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),
            },
            engine: EngineConfig {
                index_base: env::var("PATH_ENGINE_INDEX_BASE")
                    .unwrap_or_else(|_| "1".to_string())
                    .parse::<IndexBase>()
                    .map_err(|e| anyhow::anyhow!("PATH_ENGINE_INDEX_BASE: {}", e))?,
                terrain: env::var("PATH_ENGINE_TERRAIN").ok().map(PathBuf::from),
            },
        };

        Ok(config)
    }

    /// Terrain table from `PATH_ENGINE_TERRAIN`, or the built-in default
    pub fn terrain_costs(&self) -> anyhow::Result<TerrainCosts> {
        match &self.engine.terrain {
            Some(path) => TerrainCosts::from_json_file(path)
                .with_context(|| format!("failed to load terrain table {}", path.display())),
            None => Ok(TerrainCosts::default()),
        }
    }
}

/// Install the global subscriber; `RUST_LOG` overrides the configured level
///
/// Logs go to stderr so that stdout carries only results.
pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.level));

    match config.format.as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?,
        _ => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.engine.index_base, IndexBase::One);
        assert!(config.engine.terrain.is_none());
    }

    #[test]
    fn test_default_terrain() {
        let terrain = Config::default().terrain_costs().unwrap();
        assert_eq!(terrain, TerrainCosts::default());
    }

    #[test]
    fn test_missing_terrain_file() {
        let mut config = Config::default();
        config.engine.terrain = Some(PathBuf::from("/nonexistent/terrain.json"));
        let err = config.terrain_costs().unwrap_err();
        assert!(err.to_string().contains("terrain table"));
    }
}

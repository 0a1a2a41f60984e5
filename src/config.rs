use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::graph::DEFAULT_MAX_DEPTH;

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub relgraph: RelgraphConfig,
    #[serde(default)]
    pub traversal: TraversalConfig,
    #[serde(default)]
    pub cache: CacheConfig,
}

/// relgraph-specific configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RelgraphConfig {
    /// Schema file, or a directory walked for `.json`/`.yaml`/`.yml`/`.toml` files.
    pub schema_path: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Traversal bounds
#[derive(Debug, Clone, Deserialize)]
pub struct TraversalConfig {
    #[serde(default = "default_max_depth")]
    pub default_max_depth: usize,
    /// Requested depths above this are clamped.
    #[serde(default = "default_max_depth_limit")]
    pub max_depth_limit: usize,
}

impl Default for TraversalConfig {
    fn default() -> Self {
        Self {
            default_max_depth: default_max_depth(),
            max_depth_limit: default_max_depth_limit(),
        }
    }
}

/// Relation cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// 0 disables caching
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_cache_capacity(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_max_depth_limit() -> usize {
    8
}

fn default_cache_capacity() -> usize {
    128
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file
    ///
    /// Loads environment variables from .env file (if present) before loading config.
    /// Looks for config file in this order:
    /// 1. Path specified in RELGRAPH_CONFIG environment variable
    /// 2. ./relgraph.toml in current directory
    pub fn load() -> Result<Self> {
        // .env is optional
        let _ = dotenv::dotenv();

        let config_path = std::env::var("RELGRAPH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("relgraph.toml"));

        let config_str = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config = Self::parse(&config_str)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML text without validating it
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("invalid relgraph configuration")
    }

    /// Default configuration around an explicit schema path
    pub fn for_schema<P: AsRef<Path>>(schema_path: P) -> Result<Self> {
        let config = Config {
            relgraph: RelgraphConfig {
                schema_path: schema_path.as_ref().to_path_buf(),
                log_level: default_log_level(),
            },
            traversal: TraversalConfig::default(),
            cache: CacheConfig::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    fn validate(&self) -> Result<()> {
        if !self.relgraph.schema_path.exists() {
            anyhow::bail!(
                "schema_path does not exist: {}. Set schema_path in relgraph.toml to a schema file or directory.",
                self.relgraph.schema_path.display()
            );
        }

        if self.traversal.default_max_depth == 0 {
            anyhow::bail!("traversal.default_max_depth must be greater than 0");
        }

        if self.traversal.default_max_depth > self.traversal.max_depth_limit {
            anyhow::bail!(
                "traversal.default_max_depth ({}) must not exceed traversal.max_depth_limit ({})",
                self.traversal.default_max_depth,
                self.traversal.max_depth_limit
            );
        }

        Ok(())
    }

    /// Get schema path
    pub fn schema_path(&self) -> &Path {
        &self.relgraph.schema_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    /// Serialize config tests that mutate process-wide env so they don't race.
    static CONFIG_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn create_test_config(temp_dir: &TempDir, extra: &str) -> String {
        let schema_path = temp_dir.path().join("schema.yaml");
        fs::write(&schema_path, "entities: []\n").unwrap();
        let schema_str = schema_path.to_str().unwrap().replace('\\', "\\\\");
        format!(
            r#"
[relgraph]
schema_path = "{}"
log_level = "debug"
{}
"#,
            schema_str, extra
        )
    }

    fn with_config_env(config_path: &Path, f: impl FnOnce()) {
        let original = std::env::var("RELGRAPH_CONFIG").ok();
        std::env::set_var("RELGRAPH_CONFIG", config_path.to_str().unwrap());
        f();
        std::env::remove_var("RELGRAPH_CONFIG");
        if let Some(val) = original {
            std::env::set_var("RELGRAPH_CONFIG", val);
        }
    }

    #[test]
    fn test_config_load_success() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relgraph.toml");
        fs::write(&config_path, create_test_config(&temp_dir, "")).unwrap();

        with_config_env(&config_path, || {
            let config = Config::load();
            assert!(config.is_ok(), "Config::load() failed: {:?}", config.err());
            let config = config.unwrap();
            assert_eq!(config.relgraph.log_level, "debug");
            assert_eq!(config.traversal.default_max_depth, 2);
            assert_eq!(config.traversal.max_depth_limit, 8);
            assert_eq!(config.cache.capacity, 128);
        });
    }

    #[test]
    fn test_config_explicit_sections() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relgraph.toml");
        let extra = "[traversal]\ndefault_max_depth = 3\nmax_depth_limit = 4\n\n[cache]\ncapacity = 0\n";
        fs::write(&config_path, create_test_config(&temp_dir, extra)).unwrap();

        with_config_env(&config_path, || {
            let config = Config::load().unwrap();
            assert_eq!(config.traversal.default_max_depth, 3);
            assert_eq!(config.traversal.max_depth_limit, 4);
            assert_eq!(config.cache.capacity, 0);
        });
    }

    #[test]
    fn test_config_rejects_depth_above_limit() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relgraph.toml");
        let extra = "[traversal]\ndefault_max_depth = 5\nmax_depth_limit = 3\n";
        fs::write(&config_path, create_test_config(&temp_dir, extra)).unwrap();

        with_config_env(&config_path, || {
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("max_depth_limit"));
        });
    }

    #[test]
    fn test_config_rejects_zero_depth() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relgraph.toml");
        let extra = "[traversal]\ndefault_max_depth = 0\n";
        fs::write(&config_path, create_test_config(&temp_dir, extra)).unwrap();

        with_config_env(&config_path, || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_config_missing_schema_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("relgraph.toml");
        fs::write(
            &config_path,
            "[relgraph]\nschema_path = \"/definitely/not/here.yaml\"\n",
        )
        .unwrap();

        with_config_env(&config_path, || {
            let err = Config::load().unwrap_err();
            assert!(err.to_string().contains("schema_path does not exist"));
        });
    }

    #[test]
    fn test_config_invalid_path() {
        let _lock = CONFIG_TEST_LOCK.lock().unwrap();
        with_config_env(Path::new("nonexistent.toml"), || {
            assert!(Config::load().is_err());
        });
    }

    #[test]
    fn test_for_schema() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::for_schema(temp_dir.path()).unwrap();
        assert_eq!(config.schema_path(), temp_dir.path());
        assert_eq!(config.traversal.default_max_depth, 2);

        assert!(Config::for_schema(temp_dir.path().join("missing.json")).is_err());
    }
}

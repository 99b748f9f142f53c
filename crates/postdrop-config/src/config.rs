//! Configuration structures and loading.

use crate::error::{ConfigError, ConfigResult};
use crate::paths::AppPaths;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "POSTDROP_CONFIG";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load configuration the way the deployed function does.
    ///
    /// The file named by `POSTDROP_CONFIG` wins, then the platform config
    /// file, then built-in defaults. Environment overrides apply last.
    pub fn load() -> ConfigResult<Self> {
        let explicit = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        Self::load_with(explicit, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with the config path and variable lookup supplied.
    ///
    /// An explicit path must exist; the platform file is optional.
    pub fn load_with<F>(explicit: Option<PathBuf>, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match explicit {
            Some(path) if !path.exists() => return Err(ConfigError::Missing(path)),
            Some(path) => Self::load_from(&path)?,
            None => match AppPaths::new() {
                Some(paths) => Self::load_from(&paths.config_file)?,
                None => Self::default(),
            },
        };

        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Path of the config file `load` would read, if any.
    pub fn resolve_path() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(explicit));
        }
        AppPaths::new().map(|paths| paths.config_file)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> ConfigResult<()> {
        let contents = toml::to_string_pretty(self)?;
        write_file(path, &contents)
    }

    /// Create a default config file with comments.
    pub fn create_default_file(path: &Path) -> ConfigResult<()> {
        write_file(path, &Self::default_config_string())
    }

    /// Generate a default config file with helpful comments.
    pub fn default_config_string() -> String {
        r#"# Postdrop Configuration

[source]
# JSON resource fetched on every invocation
url = "https://jsonplaceholder.typicode.com/posts"

# Request timeout in seconds (unset = wait for the runtime's own limit)
# timeout_seconds = 30

[storage]
# Destination bucket and its region
bucket = "my-weather-data-650"
region = "us-east-2"

# Objects are written as <key_prefix>/<object_name>-<epoch-millis>.json
key_prefix = "data"
object_name = "posts"
"#
        .to_string()
    }

    /// Apply `POSTDROP_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("POSTDROP_SOURCE_URL") {
            self.source.url = url;
        }
        if let Some(timeout) = lookup("POSTDROP_SOURCE_TIMEOUT_SECONDS") {
            let seconds: u64 = timeout.parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "POSTDROP_SOURCE_TIMEOUT_SECONDS must be a whole number, got '{}'",
                    timeout
                ))
            })?;
            self.source.timeout_seconds = Some(seconds);
        }
        if let Some(bucket) = lookup("POSTDROP_BUCKET") {
            self.storage.bucket = bucket;
        }
        if let Some(region) = lookup("POSTDROP_REGION") {
            self.storage.region = region;
        }
        if let Some(prefix) = lookup("POSTDROP_KEY_PREFIX") {
            self.storage.key_prefix = prefix;
        }
        if let Some(name) = lookup("POSTDROP_OBJECT_NAME") {
            self.storage.object_name = name;
        }
        Ok(())
    }

    /// Check values the handler cannot work without.
    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.source.url.starts_with("http://") || self.source.url.starts_with("https://")) {
            return Err(ConfigError::Invalid(format!(
                "source.url must be an http(s) URL, got '{}'",
                self.source.url
            )));
        }
        if self.source.timeout_seconds == Some(0) {
            return Err(ConfigError::Invalid(
                "source.timeout_seconds must be at least 1 when set".to_string(),
            ));
        }
        if self.storage.bucket.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.bucket must not be empty".to_string()));
        }
        if self.storage.region.trim().is_empty() {
            return Err(ConfigError::Invalid("storage.region must not be empty".to_string()));
        }
        Ok(())
    }
}

fn write_file(path: &Path, contents: &str) -> ConfigResult<()> {
    let to_error = |source: std::io::Error| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    std::fs::write(path, contents).map_err(to_error)
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: "https://jsonplaceholder.typicode.com/posts".to_string(),
            timeout_seconds: None,
        }
    }
}

/// Object storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub key_prefix: String,
    pub object_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            bucket: "my-weather-data-650".to_string(),
            region: "us-east-2".to_string(),
            key_prefix: "data".to_string(),
            object_name: "posts".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.source.url, "https://jsonplaceholder.typicode.com/posts");
        assert_eq!(config.source.timeout_seconds, None);
        assert_eq!(config.storage.bucket, "my-weather-data-650");
        assert_eq!(config.storage.region, "us-east-2");
        assert_eq!(config.storage.key_prefix, "data");
        assert_eq!(config.storage.object_name, "posts");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_default_string_matches_defaults() {
        let parsed: Config = toml::from_str(&Config::default_config_string()).unwrap();
        let defaults = Config::default();

        assert_eq!(parsed.source.url, defaults.source.url);
        assert_eq!(parsed.source.timeout_seconds, None);
        assert_eq!(parsed.storage.bucket, defaults.storage.bucket);
        assert_eq!(parsed.storage.object_name, defaults.storage.object_name);
    }

    #[test]
    fn test_load_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [storage]
            bucket = "archive-bucket"
            "#
        )
        .unwrap();

        let config = Config::load_from(temp_file.path()).unwrap();

        assert_eq!(config.storage.bucket, "archive-bucket");
        // Defaults should still work
        assert_eq!(config.storage.region, "us-east-2");
        assert_eq!(config.source.url, "https://jsonplaceholder.typicode.com/posts");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage.bucket, "my-weather-data-650");
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.source.timeout_seconds = Some(15);
        config.save_to(&path).unwrap();

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded.source.timeout_seconds, Some(15));
    }

    #[test]
    fn test_env_overrides_win() {
        let mut config = Config::default();
        config
            .apply_overrides(lookup_from(&[
                ("POSTDROP_BUCKET", "other-bucket"),
                ("POSTDROP_KEY_PREFIX", "raw"),
                ("POSTDROP_SOURCE_TIMEOUT_SECONDS", "10"),
            ]))
            .unwrap();

        assert_eq!(config.storage.bucket, "other-bucket");
        assert_eq!(config.storage.key_prefix, "raw");
        assert_eq!(config.source.timeout_seconds, Some(10));
        assert_eq!(config.storage.region, "us-east-2");
    }

    #[test]
    fn test_invalid_timeout_override() {
        let mut config = Config::default();
        let result =
            config.apply_overrides(lookup_from(&[("POSTDROP_SOURCE_TIMEOUT_SECONDS", "soon")]));

        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.source.timeout_seconds = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        config.source.timeout_seconds = Some(1);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_with_missing_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let result = Config::load_with(Some(path.clone()), |_: &str| None);

        match result {
            Err(ConfigError::Missing(missing)) => assert_eq!(missing, path),
            other => panic!("expected missing config error, got {other:?}"),
        }
    }

    #[test]
    fn test_load_with_explicit_file_and_overrides() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(
            temp_file,
            r#"
            [storage]
            bucket = "from-file"
            region = "eu-west-1"
            "#
        )
        .unwrap();

        let config = Config::load_with(
            Some(temp_file.path().to_path_buf()),
            lookup_from(&[("POSTDROP_BUCKET", "from-env")]),
        )
        .unwrap();

        assert_eq!(config.storage.bucket, "from-env");
        assert_eq!(config.storage.region, "eu-west-1");
    }

    #[test]
    fn test_parse_error_names_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "[storage\nbucket = ").unwrap();

        let err = Config::load_from(temp_file.path()).unwrap_err();

        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&temp_file.path().display().to_string()));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.source.url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.storage.bucket = "  ".to_string();
        assert!(config.validate().is_err());
    }
}

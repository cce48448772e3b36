use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{GatorError, GatorResult};

pub const CONFIG_FILE_NAME: &str = ".gatorconfig.json";
const DEFAULT_DB_FILE_NAME: &str = "gator.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub db_url: String,
    #[serde(default)]
    pub current_user_name: String,
    #[serde(skip)]
    path: PathBuf,
}

impl Config {
    /// Location of the config file in the user's home directory
    pub fn default_path() -> GatorResult<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| GatorError::Config("cannot determine home directory".to_string()))?;
        Ok(home.join(CONFIG_FILE_NAME))
    }

    /// Load config from `GATOR_CONFIG` or the home directory, applying
    /// `GATOR_DB_URL` as a process-level override
    pub fn load() -> GatorResult<Self> {
        dotenvy::dotenv().ok();

        let path = match std::env::var("GATOR_CONFIG") {
            Ok(p) if !p.is_empty() => PathBuf::from(p),
            _ => Self::default_path()?,
        };

        let mut config = Self::read_or_create(&path)?;

        if let Ok(db_url) = std::env::var("GATOR_DB_URL") {
            if !db_url.is_empty() {
                config.db_url = db_url;
            }
        }

        Ok(config)
    }

    /// Read the config at `path`, writing a default one if the file is missing
    pub fn read_or_create<P: AsRef<Path>>(path: P) -> GatorResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            debug!(path = %path.display(), "config file missing, writing default");
            let config = Self {
                path: path.to_path_buf(),
                ..Self::default()
            };
            config.write()?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&content)?;
        config.path = path.to_path_buf();
        Ok(config)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The configured user, if one is set
    pub fn current_user(&self) -> Option<&str> {
        if self.current_user_name.is_empty() {
            None
        } else {
            Some(&self.current_user_name)
        }
    }

    /// Switch the current user and rewrite the config file
    pub fn set_user(&mut self, name: &str) -> GatorResult<()> {
        self.current_user_name = name.to_string();
        self.write()
    }

    /// Resolve the SQLite path. Empty `db_url` means a database beside the config file.
    pub fn db_path(&self) -> PathBuf {
        let url = self.db_url.trim();
        let url = url.strip_prefix("sqlite://").unwrap_or(url);

        if url.is_empty() {
            self.path
                .parent()
                .map(|dir| dir.join(DEFAULT_DB_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE_NAME))
        } else {
            PathBuf::from(url)
        }
    }

    fn write(&self) -> GatorResult<()> {
        let content = serde_json::to_string(self)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_creates_default() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = Config::read_or_create(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config.db_url, "");
        assert_eq!(config.current_user(), None);
    }

    #[test]
    fn test_set_user_rewrites_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let mut config = Config::read_or_create(&path).unwrap();
        config.set_user("lane").unwrap();

        let reloaded = Config::read_or_create(&path).unwrap();
        assert_eq!(reloaded.current_user(), Some("lane"));

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["current_user_name"], "lane");
        assert!(raw.get("db_url").is_some());
    }

    #[test]
    fn test_reads_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(
            &path,
            r#"{"db_url":"sqlite:///tmp/blog.db","current_user_name":"allan"}"#,
        )
        .unwrap();

        let config = Config::read_or_create(&path).unwrap();
        assert_eq!(config.current_user(), Some("allan"));
        assert_eq!(config.db_path(), PathBuf::from("/tmp/blog.db"));
    }

    #[test]
    fn test_empty_db_url_sits_beside_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = Config::read_or_create(&path).unwrap();
        assert_eq!(config.db_path(), dir.path().join("gator.db"));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "{not json").unwrap();

        let result = Config::read_or_create(&path);
        assert!(matches!(result, Err(GatorError::Json(_))));
    }
}

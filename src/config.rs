//! Configuration for kbase data locations.
//!
//! Configuration sources (highest priority first):
//! 1. `--data` flag or `KBASE_DATA` environment variable
//! 2. Config file (.kbase/config.yaml)
//! 3. Defaults ($KBASE_HOME/data, with KBASE_HOME defaulting to ~/.kbase)
//!
//! Config file discovery:
//! - Searches current directory and parents for .kbase/config.yaml
//! - `paths.data` is relative to the project root (the parent of .kbase/)

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::loader::default_patterns;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub loader: Option<LoaderConfig>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// kbase home directory (relative to .kbase/)
    pub home: Option<String>,
    /// Data directory (relative to project root)
    pub data: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoaderConfig {
    /// Glob patterns selecting data files inside the data directory
    pub patterns: Option<Vec<String>>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// kbase home directory
    pub home: PathBuf,
    /// Directory holding the data files
    pub data: PathBuf,
    /// Glob patterns for data files
    pub patterns: Vec<String>,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Overrides taken from the environment or command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    /// KBASE_HOME
    pub home: Option<PathBuf>,
    /// --data / KBASE_DATA
    pub data: Option<PathBuf>,
}

impl Overrides {
    /// Read overrides from the process environment
    pub fn from_env() -> Self {
        Self {
            home: std::env::var_os("KBASE_HOME").map(PathBuf::from),
            data: std::env::var_os("KBASE_DATA").map(PathBuf::from),
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".kbase").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to `base`
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

fn default_home() -> Result<PathBuf> {
    Ok(dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(".kbase"))
}

/// Resolve configuration from an optional config file and overrides
fn resolve(config_file: Option<PathBuf>, overrides: Overrides) -> Result<ResolvedConfig> {
    let Some(config_path) = config_file else {
        let home = match overrides.home {
            Some(home) => home,
            None => default_home()?,
        };
        let data = overrides.data.unwrap_or_else(|| home.join("data"));

        return Ok(ResolvedConfig {
            home,
            data,
            patterns: default_patterns(),
            config_file: None,
        });
    };

    let config = load_config_file(&config_path)?;

    // .kbase/ and the project root above it
    let kbase_dir = config_path.parent().unwrap_or(Path::new("."));
    let base_dir = kbase_dir.parent().unwrap_or(Path::new("."));

    let home = if let Some(home) = overrides.home {
        home
    } else if let Some(ref home_path) = config.paths.home {
        resolve_path(kbase_dir, home_path)
    } else {
        default_home()?
    };

    let data = if let Some(data) = overrides.data {
        data
    } else if let Some(ref data_path) = config.paths.data {
        resolve_path(base_dir, data_path)
    } else {
        home.join("data")
    };

    let patterns = config
        .loader
        .and_then(|l| l.patterns)
        .filter(|p| !p.is_empty())
        .unwrap_or_else(default_patterns);

    Ok(ResolvedConfig {
        home,
        data,
        patterns,
        config_file: Some(config_path),
    })
}

/// Load configuration from all sources
///
/// `data_override` comes from the command line and wins over everything else.
pub fn load_config(data_override: Option<PathBuf>) -> Result<ResolvedConfig> {
    let mut overrides = Overrides::from_env();
    if data_override.is_some() {
        overrides.data = data_override;
    }

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    resolve(find_config_file(&cwd), overrides)
}

/// Get the global configuration (loads once, then cached)
pub fn config(data_override: Option<PathBuf>) -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config(data_override).map_err(|e| e.to_string()));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(root: &Path, body: &str) -> PathBuf {
        let kbase_dir = root.join(".kbase");
        std::fs::create_dir_all(&kbase_dir).unwrap();

        let config_path = kbase_dir.join("config.yaml");
        let mut file = std::fs::File::create(&config_path).unwrap();
        writeln!(file, "{}", body).unwrap();
        config_path
    }

    #[test]
    fn test_defaults_without_file() {
        let overrides = Overrides {
            home: Some(PathBuf::from("/opt/kbase")),
            data: None,
        };

        let config = resolve(None, overrides).unwrap();
        assert_eq!(config.home, PathBuf::from("/opt/kbase"));
        assert_eq!(config.data, PathBuf::from("/opt/kbase/data"));
        assert_eq!(config.patterns, default_patterns());
        assert!(config.config_file.is_none());
    }

    #[test]
    fn test_config_file_parsing() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  home: ./
  data: content
loader:
  patterns:
    - "*.yaml"
"#,
        );

        let config = load_config_file(&config_path).unwrap();
        assert_eq!(config.version, "1.0");
        assert_eq!(config.paths.home, Some("./".to_string()));
        assert_eq!(config.paths.data, Some("content".to_string()));
        assert_eq!(
            config.loader.unwrap().patterns,
            Some(vec!["*.yaml".to_string()])
        );
    }

    #[test]
    fn test_data_path_relative_to_project_root() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir_all(temp.path().join("content")).unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  home: ./
  data: content
"#,
        );

        let config = resolve(Some(config_path.clone()), Overrides::default()).unwrap();
        let root = temp.path().canonicalize().unwrap();

        assert_eq!(config.data, root.join("content"));
        assert_eq!(config.home, root.join(".kbase"));
        assert_eq!(config.config_file, Some(config_path));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let temp = TempDir::new().unwrap();
        let config_path = write_config(
            temp.path(),
            r#"
version: "1.0"
paths:
  home: ./
  data: content
loader:
  patterns: []
"#,
        );

        let overrides = Overrides {
            home: None,
            data: Some(PathBuf::from("/elsewhere")),
        };
        let config = resolve(Some(config_path), overrides).unwrap();

        assert_eq!(config.data, PathBuf::from("/elsewhere"));
        // An empty pattern list falls back to the defaults
        assert_eq!(config.patterns, default_patterns());
    }

    #[test]
    fn test_find_config_file_in_parent() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "version: \"1.0\"");
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config_file(&nested).unwrap();
        assert!(found.ends_with(".kbase/config.yaml"));
    }

    #[test]
    fn test_resolve_relative_path() {
        let base = PathBuf::from("/home/user/project");

        assert_eq!(
            resolve_path(&base, "./subdir"),
            PathBuf::from("/home/user/project/subdir")
        );
        assert_eq!(
            resolve_path(&base, "/absolute/path"),
            PathBuf::from("/absolute/path")
        );
    }
}

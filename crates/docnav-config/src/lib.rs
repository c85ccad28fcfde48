//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String configuration values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.base_url`
//! - `project.url`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs source directory (relative to the project directory).
    pub source_dir: Option<PathBuf>,
    /// Override output directory for generated artifacts.
    pub output_dir: Option<PathBuf>,
    /// Override public base URL used in the sitemap.
    pub base_url: Option<String>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "docnav.toml";

/// Default docs source directory, relative to the project directory.
const DEFAULT_SOURCE_DIR: &str = "src/docs";

/// Default output directory, relative to the project directory.
const DEFAULT_OUTPUT_DIR: &str = ".docnav";

/// Default name of per-directory title override files.
const DEFAULT_TITLE_FILE: &str = "TITLE";

/// Project type that enables edit-source links.
const GITHUB_PROJECT_TYPE: &str = "github";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Public site configuration.
    pub site: SiteConfig,
    /// Source project configuration.
    pub project: ProjectConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    title_file: Option<String>,
}

/// Resolved documentation configuration.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Project directory (the directory containing `docnav.toml`).
    pub project_dir: PathBuf,
    /// Markdown source directory, relative to `project_dir`.
    pub source_dir: PathBuf,
    /// Output directory for generated artifacts (absolute).
    pub output_dir: PathBuf,
    /// Name of per-directory title override files.
    pub title_file: String,
}

/// How the rendering application routes between pages.
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
    /// Hash-based routing (`/#/documentation/...`).
    #[default]
    Hash,
    /// Browser history API routing.
    Browser,
}

/// Public site configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Public base URL; the sitemap is only generated when set.
    pub base_url: Option<String>,
    /// Routing mode of the rendering application.
    pub history: HistoryMode,
}

/// Source project configuration used for edit-source links.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project hosting type (e.g., "github").
    #[serde(rename = "type")]
    pub project_type: Option<String>,
    /// Project URL (e.g., `https://github.com/org/repo`).
    pub url: Option<String>,
}

impl ProjectConfig {
    /// Base URL for edit-source links, if the project supports them.
    #[must_use]
    pub fn edit_url_base(&self) -> Option<&str> {
        match (self.project_type.as_deref(), self.url.as_deref()) {
            (Some(GITHUB_PROJECT_TYPE), Some(url)) => Some(url),
            _ => None,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`BASE_URL`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the resulting configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.docs_resolved.output_dir = self.docs_resolved.project_dir.join(output_dir);
        }
        if let Some(base_url) = &settings.base_url {
            self.site.base_url = Some(base_url.clone());
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            docs: DocsConfigRaw::default(),
            site: SiteConfig::default(),
            project: ProjectConfig::default(),
            docs_resolved: DocsConfig {
                project_dir: base.to_path_buf(),
                source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                title_file: DEFAULT_TITLE_FILE.to_owned(),
            },
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_docs()?;
        self.validate_urls()?;
        Ok(())
    }

    /// Validate docs configuration.
    fn validate_docs(&self) -> Result<(), ConfigError> {
        let title_file = &self.docs_resolved.title_file;
        require_non_empty(title_file, "docs.title_file")?;
        if title_file.contains(['/', '\\']) {
            return Err(ConfigError::Validation(
                "docs.title_file must be a plain file name".to_owned(),
            ));
        }
        if self.docs_resolved.source_dir.is_absolute() {
            return Err(ConfigError::Validation(
                "docs.source_dir must be relative to the project directory".to_owned(),
            ));
        }
        Ok(())
    }

    /// Validate URL-valued fields.
    fn validate_urls(&self) -> Result<(), ConfigError> {
        if let Some(base_url) = &self.site.base_url {
            require_non_empty(base_url, "site.base_url")?;
            require_http_url(base_url, "site.base_url")?;
        }
        if let Some(url) = &self.project.url {
            require_non_empty(url, "project.url")?;
            require_http_url(url, "project.url")?;
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        if let Some(ref url) = self.site.base_url {
            self.site.base_url = Some(expand::expand_env(url, "site.base_url")?);
        }
        if let Some(ref url) = self.project.url {
            self.project.url = Some(expand::expand_env(url, "project.url")?);
        }
        Ok(())
    }

    /// Resolve configured paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            project_dir: config_dir.to_path_buf(),
            source_dir: PathBuf::from(
                self.docs
                    .source_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_SOURCE_DIR),
            ),
            output_dir: config_dir.join(
                self.docs
                    .output_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_OUTPUT_DIR),
            ),
            title_file: self
                .docs
                .title_file
                .clone()
                .unwrap_or_else(|| DEFAULT_TITLE_FILE.to_owned()),
        };
    }
}

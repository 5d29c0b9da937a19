//! Configuration management for sysman.
//!
//! Parses `sysman.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! `manual.source_dir` and `manual.output_dir` support environment variable
//! expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use serde::Deserialize;
use std::env::VarError;
use std::path::{Component, Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override page source directory.
    pub source_dir: Option<PathBuf>,
    /// Override HTML output directory.
    pub output_dir: Option<PathBuf>,
    /// Override output cleaning.
    pub clean_output: Option<bool>,
    /// Override page ordering.
    pub sort_pages: Option<bool>,
    /// Override the page error policy.
    pub fail_fast: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "sysman.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Manual configuration (paths are relative strings from TOML).
    manual: ManualConfigRaw,

    /// Resolved manual configuration (set after loading).
    #[serde(skip)]
    pub manual_resolved: ManualConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw manual configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct ManualConfigRaw {
    source_dir: Option<String>,
    output_dir: Option<String>,
    clean_output: Option<bool>,
    sort_pages: Option<bool>,
    fail_fast: Option<bool>,
}

/// Resolved manual configuration with absolute paths.
#[derive(Debug, Default)]
pub struct ManualConfig {
    /// Directory of `<title>.<chapter>` page sources.
    pub source_dir: PathBuf,
    /// Directory receiving the rendered HTML.
    pub output_dir: PathBuf,
    /// Whether to clear the output directory before building.
    pub clean_output: bool,
    /// Whether to process pages sorted by file name.
    pub sort_pages: bool,
    /// Whether the first bad page aborts the build.
    pub fail_fast: bool,
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
        /// Config field path (e.g., "`manual.source_dir`").
        field: String,
        /// Error message (e.g., "${`MANUAL_SRC`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `sysman.toml` in current directory and parents.
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
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        let manual = &mut self.manual_resolved;
        if let Some(source_dir) = &settings.source_dir {
            manual.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            manual.output_dir.clone_from(output_dir);
        }
        if let Some(clean_output) = settings.clean_output {
            manual.clean_output = clean_output;
        }
        if let Some(sort_pages) = settings.sort_pages {
            manual.sort_pages = sort_pages;
        }
        if let Some(fail_fast) = settings.fail_fast {
            manual.fail_fast = fail_fast;
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
            manual: ManualConfigRaw::default(),
            manual_resolved: ManualConfig {
                source_dir: base.join("src"),
                output_dir: base.join("out"),
                clean_output: true,
                sort_pages: false,
                fail_fast: false,
            },
            config_path: None,
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
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Directories are compared after normalization, so relative CLI paths,
    /// `.`/`..` components and symlinked ancestors cannot hide an overlap.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the output directory is the
    /// source directory or one of its ancestors. Cleaning the output would
    /// delete the page sources in both cases.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let manual = &self.manual_resolved;
        let source_dir = normalize_dir(&manual.source_dir);
        let output_dir = normalize_dir(&manual.output_dir);

        if source_dir == output_dir {
            return Err(ConfigError::Validation(format!(
                "manual.source_dir and manual.output_dir must differ (both are {})",
                source_dir.display()
            )));
        }
        if source_dir.starts_with(&output_dir) {
            return Err(ConfigError::Validation(format!(
                "manual.output_dir ({}) must not contain manual.source_dir ({})",
                output_dir.display(),
                source_dir.display()
            )));
        }
        Ok(())
    }

    /// Expand `${VAR}` references in the `[manual]` path strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            ("manual.source_dir", &mut self.manual.source_dir),
            ("manual.output_dir", &mut self.manual.output_dir),
        ];
        for (field, value) in fields {
            if let Some(dir) = value.as_mut() {
                *dir = expand_path_vars(dir, field)?;
            }
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.manual_resolved = ManualConfig {
            source_dir: resolve(self.manual.source_dir.as_deref(), "src"),
            output_dir: resolve(self.manual.output_dir.as_deref(), "out"),
            clean_output: self.manual.clean_output.unwrap_or(true),
            sort_pages: self.manual.sort_pages.unwrap_or(false),
            fail_fast: self.manual.fail_fast.unwrap_or(false),
        };
    }
}

/// Expand `${VAR}` and `${VAR:-default}` in a configured path.
///
/// Strings without `${` are returned as is, so a bare `$VAR` stays literal.
fn expand_path_vars(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |name: &str| std::env::var(name).map(Some))
        .map(std::borrow::Cow::into_owned)
        .map_err(|err| {
            let reason = match err.cause {
                VarError::NotPresent => "not set",
                VarError::NotUnicode(_) => "is not valid unicode",
            };
            let var = err.var_name;
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{var}}} {reason}"),
            }
        })
}

/// Absolute form of `dir` for overlap checks.
///
/// The deepest existing ancestor is canonicalized and the missing tail is
/// appended lexically, so directories that do not exist yet still compare
/// against existing ones.
fn normalize_dir(dir: &Path) -> PathBuf {
    let absolute = std::path::absolute(dir).unwrap_or_else(|_| dir.to_path_buf());
    let mut lexical = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }

    for ancestor in lexical.ancestors() {
        if let Ok(canonical) = ancestor.canonicalize() {
            return match lexical.strip_prefix(ancestor) {
                Ok(rest) if !rest.as_os_str().is_empty() => canonical.join(rest),
                _ => canonical,
            };
        }
    }
    lexical
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        let manual = &config.manual_resolved;
        assert_eq!(manual.source_dir, PathBuf::from("/test/src"));
        assert_eq!(manual.output_dir, PathBuf::from("/test/out"));
        assert!(manual.clean_output);
        assert!(!manual.sort_pages);
        assert!(!manual.fail_fast);
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.manual.source_dir.is_none());
    }

    #[test]
    fn test_parse_unknown_manual_key_fails() {
        let result: Result<Config, _> = toml::from_str("[manual]\nsrc = \"pages\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[manual]
source_dir = "sysman/src"
output_dir = "build/man"
clean_output = false
sort_pages = true
fail_fast = true
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        let manual = &config.manual_resolved;
        assert_eq!(manual.source_dir, PathBuf::from("/project/sysman/src"));
        assert_eq!(manual.output_dir, PathBuf::from("/project/build/man"));
        assert!(!manual.clean_output);
        assert!(manual.sort_pages);
        assert!(manual.fail_fast);
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("[manual]\n").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.manual_resolved.source_dir,
            PathBuf::from("/project/src")
        );
        assert_eq!(
            config.manual_resolved.output_dir,
            PathBuf::from("/project/out")
        );
        assert!(config.manual_resolved.clean_output);
    }

    #[test]
    fn test_apply_cli_settings_dirs() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            source_dir: Some(PathBuf::from("/custom/pages")),
            output_dir: Some(PathBuf::from("/custom/html")),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(
            config.manual_resolved.source_dir,
            PathBuf::from("/custom/pages")
        );
        assert_eq!(
            config.manual_resolved.output_dir,
            PathBuf::from("/custom/html")
        );
    }

    #[test]
    fn test_apply_cli_settings_flags() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            clean_output: Some(false),
            sort_pages: Some(true),
            fail_fast: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert!(!config.manual_resolved.clean_output);
        assert!(config.manual_resolved.sort_pages);
        assert!(config.manual_resolved.fail_fast);
        assert_eq!(
            config.manual_resolved.source_dir,
            PathBuf::from("/test/src")
        ); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.manual_resolved.output_dir,
            PathBuf::from("/test/out")
        );
        assert!(config.manual_resolved.clean_output);
    }

    #[test]
    fn test_validate_same_dirs_fails() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.manual_resolved.output_dir = PathBuf::from("/test/src");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must differ"));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_output_containing_source_fails() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.manual_resolved.source_dir = PathBuf::from("/test/man/src");
        config.manual_resolved.output_dir = PathBuf::from("/test/man");

        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("must not contain"));
    }

    #[test]
    fn test_validate_compares_normalized_paths() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("man").join("src");
        std::fs::create_dir_all(&src).unwrap();

        let mut config = Config::default_with_base(dir.path());
        config.manual_resolved.source_dir = src.clone();
        config.manual_resolved.output_dir = src.join("..").join(".");

        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_validate_sibling_with_common_prefix_passes() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.manual_resolved.source_dir = PathBuf::from("/test/man-src");
        config.manual_resolved.output_dir = PathBuf::from("/test/man");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_output_inside_source_passes() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.manual_resolved.output_dir = PathBuf::from("/test/src/html");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_rejects_output_dir_above_sources() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[manual]\nsource_dir = \"man/src\"\noutput_dir = \"man\"\n",
        )
        .unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_normalize_dir_missing_tail_is_kept() {
        let dir = TempDir::new().unwrap();
        let normalized = normalize_dir(&dir.path().join("a").join("..").join("b"));
        assert_eq!(normalized, dir.path().canonicalize().unwrap().join("b"));
    }

    #[test]
    fn test_expand_path_vars_simple() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SYSMAN_TEST_SIMPLE", "pages");
        }
        let result = expand_path_vars("${SYSMAN_TEST_SIMPLE}/man", "manual.source_dir").unwrap();
        assert_eq!(result, "pages/man");
        unsafe {
            std::env::remove_var("SYSMAN_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_path_vars_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SYSMAN_TEST_UNSET_DEFAULT");
        }
        let result =
            expand_path_vars("${SYSMAN_TEST_UNSET_DEFAULT:-out}", "manual.output_dir").unwrap();
        assert_eq!(result, "out");
    }

    #[test]
    fn test_expand_path_vars_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("SYSMAN_TEST_MISSING");
        }
        let err = expand_path_vars("${SYSMAN_TEST_MISSING}", "manual.source_dir").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Environment variable error in manual.source_dir: ${SYSMAN_TEST_MISSING} not set"
        );
    }

    #[test]
    fn test_expand_path_vars_bare_dollar_is_literal() {
        let result = expand_path_vars("src/$NOT_BRACED", "manual.source_dir").unwrap();
        assert_eq!(result, "src/$NOT_BRACED");
    }

    #[test]
    fn test_expand_env_vars_in_paths() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("SYSMAN_TEST_OUT", "public");
        }
        let toml = r#"
[manual]
output_dir = "${SYSMAN_TEST_OUT}/man"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.manual_resolved.output_dir,
            PathBuf::from("/project/public/man")
        );
        unsafe {
            std::env::remove_var("SYSMAN_TEST_OUT");
        }
    }

    #[test]
    fn test_load_explicit_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[manual]\nsource_dir = \"pages\"\nsort_pages = true\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.manual_resolved.source_dir, dir.path().join("pages"));
        assert_eq!(config.manual_resolved.output_dir, dir.path().join("out"));
        assert!(config.manual_resolved.sort_pages);
    }

    #[test]
    fn test_load_cli_settings_take_precedence() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[manual]\nfail_fast = true\n").unwrap();

        let settings = CliSettings {
            fail_fast: Some(false),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert!(!config.manual_resolved.fail_fast);
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let dir = TempDir::new().unwrap();
        let result = Config::load(Some(&dir.path().join("missing.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[manual\n").unwrap();

        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}

use anyhow::Result;
use clap::ArgMatches;
use clap::parser::ValueSource;
use config::{Config as ConfigBuilder, Environment, File, Map};
use quill_core::{Layout, Materializer, SlugStyle, StarterTemplates};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Name of the optional per-repository configuration file
pub const CONFIG_FILE: &str = "quill.toml";

/// Complete configuration that merges CLI args, env vars, config files, and defaults
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QuillConfig {
    /// Repository root every other path is relative to
    pub root: String,
    /// Locations of the manifest and index files
    pub paths: PathsConfig,
    /// Heading new index bullets are inserted under
    pub contents_marker: String,
    /// Manifest key holding the navigation sequence
    pub nav_key: String,
    /// How default folder and file names are derived
    pub slug_style: SlugStyle,
    /// Replace starter files that already exist
    pub overwrite: bool,
    /// Directory with `page.md` / `topic_index.md` starter templates
    #[serde(default)]
    pub templates: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PathsConfig {
    pub manifest: String,
    pub notes: String,
    pub readme: String,
    pub global_index: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            manifest: "mkdocs.yml".to_string(),
            notes: "notes".to_string(),
            readme: "README.md".to_string(),
            global_index: "notes/index.md".to_string(),
        }
    }
}

impl Default for QuillConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
            paths: PathsConfig::default(),
            contents_marker: quill_core::index::CONTENTS_MARKER.to_string(),
            nav_key: "pages".to_string(),
            slug_style: SlugStyle::default(),
            overwrite: true,
            templates: None,
        }
    }
}

impl QuillConfig {
    /// Load configuration with cascading precedence:
    /// 1. CLI arguments (highest priority)
    /// 2. Environment variables (QUILL_*)
    /// 3. `quill.toml` in the repository root
    /// 4. Defaults (lowest priority)
    ///
    /// `quill.toml` is looked up under `--root` if given, else `QUILL_ROOT`,
    /// else the working directory.
    pub fn load(args: &ArgMatches) -> Result<Self> {
        Self::load_with_env(args, None)
    }

    /// Same as [`QuillConfig::load`], reading `QUILL_*` variables from `env`
    /// instead of the process environment when given.
    pub fn load_with_env(args: &ArgMatches, env: Option<Map<String, String>>) -> Result<Self> {
        // Only an explicit --root beats the environment; clap's default does not
        let cli_root = match args.value_source("root") {
            Some(ValueSource::CommandLine) => args.get_one::<String>("root").cloned(),
            _ => None,
        };
        let env_root = match &env {
            Some(vars) => vars.get("QUILL_ROOT").cloned(),
            None => std::env::var("QUILL_ROOT").ok(),
        };
        let search_root = cli_root
            .clone()
            .or(env_root)
            .unwrap_or_else(|| ".".to_string());

        let mut builder = ConfigBuilder::builder();

        // 1. Start with defaults
        let defaults = Self::default();
        builder = builder.add_source(config::Config::try_from(&defaults)?);

        // 2. Add configuration file if it exists
        let config_file = Path::new(&search_root).join(CONFIG_FILE);
        if config_file.exists() {
            log::debug!("Reading {}", config_file.display());
            builder = builder.add_source(File::from(config_file.as_path()));
        }

        // 3. Add environment variables with QUILL_ prefix
        builder = builder.add_source(
            Environment::with_prefix("QUILL")
                .prefix_separator("_")
                .separator("__") // Use double underscore for nested keys
                .source(env),
        );

        // 4. Override with CLI arguments (highest priority)
        let mut cli_overrides = std::collections::HashMap::new();
        if let Some(root) = cli_root {
            cli_overrides.insert("root".to_string(), root);
        }
        if args.try_get_one::<bool>("no-overwrite").unwrap_or(None) == Some(&true) {
            cli_overrides.insert("overwrite".to_string(), "false".to_string());
        }

        if !cli_overrides.is_empty() {
            builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
        }

        let config = builder.build()?;
        let quill_config: QuillConfig = config.try_deserialize()?;

        Ok(quill_config)
    }

    pub fn layout(&self) -> Layout {
        Layout {
            root: PathBuf::from(&self.root),
            manifest: PathBuf::from(&self.paths.manifest),
            notes: PathBuf::from(&self.paths.notes),
            readme: PathBuf::from(&self.paths.readme),
            global_index: PathBuf::from(&self.paths.global_index),
            contents_marker: self.contents_marker.clone(),
            nav_key: self.nav_key.clone(),
        }
    }

    pub fn materializer(&self) -> Result<Materializer> {
        let templates = match &self.templates {
            Some(dir) => StarterTemplates::from_dir(Path::new(&self.root).join(dir))?,
            None => StarterTemplates::builtin(),
        };

        Ok(Materializer::new(templates).overwrite_if_exists(self.overwrite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{Arg, ArgAction, Command};
    use tempfile::TempDir;

    fn command() -> Command {
        Command::new("test")
            .arg(
                Arg::new("root")
                    .long("root")
                    .value_name("DIR")
                    .default_value("."),
            )
            .arg(
                Arg::new("no-overwrite")
                    .long("no-overwrite")
                    .action(ArgAction::SetTrue),
            )
    }

    #[test]
    fn test_default_config() {
        let config = QuillConfig::default();
        assert_eq!(config.root, ".");
        assert_eq!(config.paths.manifest, "mkdocs.yml");
        assert_eq!(config.paths.global_index, "notes/index.md");
        assert_eq!(config.contents_marker, "## Contents");
        assert_eq!(config.slug_style, SlugStyle::Kebab);
        assert!(config.overwrite);
    }

    #[test]
    fn test_cli_args_override() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(vec!["test", "--root", root.as_str(), "--no-overwrite"])
            .unwrap();

        let config = QuillConfig::load(&matches).unwrap();
        assert_eq!(config.root, root);
        assert!(!config.overwrite);
        // Should still have defaults for non-overridden values
        assert_eq!(config.paths.readme, "README.md");
        assert_eq!(config.nav_key, "pages");
    }

    #[test]
    fn test_config_file_in_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "slug_style = \"legacy\"\nnav_key = \"nav\"\n\n[paths]\nnotes = \"docs\"\n",
        )
        .unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(vec!["test", "--root", root.as_str()])
            .unwrap();

        let config = QuillConfig::load(&matches).unwrap();
        assert_eq!(config.slug_style, SlugStyle::Legacy);
        assert_eq!(config.nav_key, "nav");
        assert_eq!(config.paths.notes, "docs");
        assert_eq!(config.paths.manifest, "mkdocs.yml");

        let layout = config.layout();
        assert_eq!(layout.readme_link("go"), "./docs/go/index.md");
    }

    fn env(vars: &[(&str, &str)]) -> Option<Map<String, String>> {
        Some(
            vars.iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_env_root_used_without_flag() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "slug_style = \"legacy\"\n").unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let matches = command().try_get_matches_from(vec!["test"]).unwrap();
        let vars = env(&[("QUILL_ROOT", root.as_str()), ("QUILL_PATHS__NOTES", "wiki")]);

        let config = QuillConfig::load_with_env(&matches, vars).unwrap();
        assert_eq!(config.root, root);
        assert_eq!(config.paths.notes, "wiki");
        // quill.toml is found under the env root
        assert_eq!(config.slug_style, SlugStyle::Legacy);
    }

    #[test]
    fn test_root_flag_beats_env() {
        let flag_dir = TempDir::new().unwrap();
        let env_dir = TempDir::new().unwrap();
        std::fs::write(env_dir.path().join(CONFIG_FILE), "nav_key = \"nav\"\n").unwrap();
        let flag_root = flag_dir.path().to_string_lossy().to_string();
        let env_root = env_dir.path().to_string_lossy().to_string();

        let matches = command()
            .try_get_matches_from(vec!["test", "--root", flag_root.as_str()])
            .unwrap();
        let vars = env(&[("QUILL_ROOT", env_root.as_str())]);

        let config = QuillConfig::load_with_env(&matches, vars).unwrap();
        assert_eq!(config.root, flag_root);
        assert_eq!(config.nav_key, "pages");
    }

    #[test]
    fn test_env_root_outranks_file_root() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "root = \"site\"\n").unwrap();
        let root = dir.path().to_string_lossy().to_string();

        let matches = command().try_get_matches_from(vec!["test"]).unwrap();
        assert_eq!(matches.get_one::<String>("root").unwrap(), ".");

        let vars = env(&[("QUILL_ROOT", root.as_str()), ("QUILL_NAV_KEY", "nav")]);
        let config = QuillConfig::load_with_env(&matches, vars).unwrap();
        assert_eq!(config.root, root);
        assert_eq!(config.nav_key, "nav");
    }
}

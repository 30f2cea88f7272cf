use camino::Utf8PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::{AppContext, InitArgs};

/// Defaults for the packaging commands. CLI flags override these; these
/// override the built-ins. The bundle-type and required-element sets are
/// deliberately absent: they are fixed policy, not configuration.
#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default output directory for `pack`
    pub output_dir: Utf8PathBuf,

    /// Default commit/branch to compare against
    pub current_ref: String,

    /// Default parent commit/branch the feature branch forked from
    pub parent_ref: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: Utf8PathBuf::from("deploy"),
            current_ref: "HEAD".to_string(),
            parent_ref: "develop".to_string(),
        }
    }
}

pub fn load_config() -> Result<Config> {
    let mut builder = config::Config::builder();

    // Load from config files in priority order
    let config_paths = ["branchpack.toml", ".branchpack.toml"];

    for path in &config_paths {
        if std::path::Path::new(path).exists() {
            builder = builder.add_source(config::File::with_name(path));
            break;
        }
    }

    // Add environment variables with BRANCHPACK_ prefix
    builder = builder.add_source(config::Environment::with_prefix("BRANCHPACK"));

    let cfg = builder.build().context("Failed to load configuration")?;
    let parsed: Config = cfg
        .try_deserialize()
        .context("Failed to parse configuration")?;

    Ok(parsed)
}

pub fn init(args: InitArgs, ctx: &AppContext) -> Result<()> {
    let config_path = args.path.join("branchpack.toml");

    if config_path.exists() && !args.force {
        anyhow::bail!(
            "Config file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    let config = Config::default();
    let toml_string =
        toml::to_string_pretty(&config).context("Failed to serialize default config")?;

    std::fs::write(&config_path, toml_string).context("Failed to write config file")?;

    if !ctx.quiet {
        println!("Created config file at {}", config_path.display());
    }
    Ok(())
}

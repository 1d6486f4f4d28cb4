use crate::composer::UrlComposer;
use crate::flags::{MergeFlag, MergeFlags};
use crate::query::{QueryCodec, DEFAULT_SEPARATOR};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Global configuration loaded from `~/.config/urlc/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlcConfig {
    /// Separator written between query pairs (`&`, or `;` for legacy consumers).
    #[serde(default = "default_separator")]
    pub arg_separator: char,
    /// Also split on `;` when decoding queries.
    #[serde(default)]
    pub accept_semicolon: bool,
    /// Flags used by `urlc compose` when none are given on the command line.
    #[serde(default = "default_flags")]
    pub default_flags: Vec<MergeFlag>,
}

fn default_separator() -> char {
    DEFAULT_SEPARATOR
}

fn default_flags() -> Vec<MergeFlag> {
    vec![MergeFlag::Replace]
}

impl Default for UrlcConfig {
    fn default() -> Self {
        Self {
            arg_separator: default_separator(),
            accept_semicolon: false,
            default_flags: default_flags(),
        }
    }
}

impl UrlcConfig {
    pub fn codec(&self) -> QueryCodec {
        QueryCodec::new(self.arg_separator).accept_semicolon(self.accept_semicolon)
    }

    pub fn composer(&self) -> UrlComposer {
        UrlComposer::new(self.codec())
    }

    pub fn merge_flags(&self) -> MergeFlags {
        self.default_flags.iter().copied().collect()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("urlc")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<UrlcConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<UrlcConfig> {
    if !path.exists() {
        let default_cfg = UrlcConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(path)
}

pub fn load_from(path: &Path) -> Result<UrlcConfig> {
    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: UrlcConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::{env_subst::substitute_env, schema::BanterConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["banter.toml", "banter.yaml", "banter.yml", "banter.json"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<BanterConfig> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `dir_override`, when given
/// 2. `./banter.{toml,yaml,yml,json}` (project-local)
/// 3. `~/.config/banter/banter.{toml,yaml,yml,json}` (user-global)
///
/// Returns `BanterConfig::default()` if no config file is found.
pub fn discover_and_load(dir_override: Option<&Path>) -> BanterConfig {
    if let Some(path) = find_config_file(dir_override) {
        debug!(path = %path.display(), "loading config");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load config, using defaults");
            },
        }
    } else {
        debug!("no config file found, using defaults");
    }
    BanterConfig::default()
}

/// Find the first config file in standard locations.
fn find_config_file(dir_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(dir) = dir_override {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
        return None;
    }

    // Project-local
    for name in CONFIG_FILENAMES {
        let p = PathBuf::from(name);
        if p.exists() {
            return Some(p);
        }
    }

    // User-global: ~/.config/banter/
    if let Some(dir) = config_dir() {
        for name in CONFIG_FILENAMES {
            let p = dir.join(name);
            if p.exists() {
                return Some(p);
            }
        }
    }

    None
}

/// Returns the user-global config directory (`~/.config/banter/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "banter").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<BanterConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported config format: .{ext}"),
    }
}

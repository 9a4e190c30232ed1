//! Configuration schema and loading for banter.
//!
//! Config is discovered from `banter.{toml,yaml,yml,json}` in the working
//! directory, then `~/.config/banter/`. String values support `${ENV_VAR}`
//! substitution before parsing.

pub mod env_subst;
pub mod loader;
pub mod schema;

pub use {
    loader::{config_dir, discover_and_load, load_config},
    schema::{BanterConfig, ProvidersConfig, ServerConfig, TelegramConfig},
};

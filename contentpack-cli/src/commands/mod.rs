//! CLI subcommands.

pub mod clean;
pub mod inspect;
pub mod load;

use std::path::PathBuf;

use contentpack::config::{ConfigFile, LoaderConfig};

/// Expand a leading `~` to the home directory.
pub fn expand_home(path: PathBuf) -> PathBuf {
    let Ok(rest) = path.strip_prefix("~") else {
        return path;
    };
    match dirs::home_dir() {
        Some(home) => home.join(rest),
        None => path,
    }
}

/// Build the loader configuration.
///
/// `--mods-dir` takes precedence over `[packs] mods_dir` in the config file.
pub fn loader_config(cli_mods_dir: Option<PathBuf>, config: &ConfigFile) -> LoaderConfig {
    let loader = LoaderConfig::from_file(config);
    let mods_dir = cli_mods_dir.unwrap_or_else(|| loader.mods_dir.clone());
    loader.with_mods_dir(expand_home(mods_dir))
}

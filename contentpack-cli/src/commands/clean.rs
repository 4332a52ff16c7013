//! `clean`: remove a staging folder left behind by an earlier run.

use std::path::PathBuf;

use clap::Args;
use contentpack::catalog::remove_staging_folder;
use contentpack::config::ConfigFile;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct CleanArgs {
    /// Mods directory holding the staging folder (overrides [packs] mods_dir)
    #[arg(long)]
    pub mods_dir: Option<PathBuf>,
}

/// Run the clean command.
pub fn run(args: CleanArgs, config: &ConfigFile) -> Result<(), CliError> {
    let staging_root = super::loader_config(args.mods_dir, config).staging_root();

    let removed = remove_staging_folder(&staging_root).map_err(|e| CliError::Clean {
        path: staging_root.clone(),
        reason: e.to_string(),
    })?;

    if removed {
        println!("Removed staging folder: {}", staging_root.display());
    } else {
        println!("No staging folder at: {}", staging_root.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_clean_removes_staging() {
        let temp = TempDir::new().unwrap();
        let staging = temp.path().join("_ModComponentTemp").join("Pack");
        std::fs::create_dir_all(&staging).unwrap();
        std::fs::write(staging.join("items.bundle"), b"bundle").unwrap();

        let args = CleanArgs {
            mods_dir: Some(temp.path().to_path_buf()),
        };
        run(args, &ConfigFile::default()).unwrap();

        assert!(!temp.path().join("_ModComponentTemp").exists());
        assert!(temp.path().exists());
    }

    #[test]
    fn test_clean_without_staging_is_ok() {
        let temp = TempDir::new().unwrap();
        let args = CleanArgs {
            mods_dir: Some(temp.path().to_path_buf()),
        };
        assert!(run(args, &ConfigFile::default()).is_ok());
    }
}

//! `load`: run the pipeline once against a mods directory and report.

use std::path::PathBuf;

use clap::Args;
use console::style;
use contentpack::catalog::{BundleIndex, StagedCatalog};
use contentpack::config::ConfigFile;
use contentpack::host::OfflineHost;
use contentpack::pack::PackStatus;
use contentpack::pipeline::{PackLoader, PipelineContext};
use tracing::warn;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct LoadArgs {
    /// Directory to scan for packs (overrides [packs] mods_dir)
    #[arg(long)]
    pub mods_dir: Option<PathBuf>,

    /// Leave the staging folder in place after the run
    #[arg(long)]
    pub keep_staging: bool,
}

/// Run the load command.
pub fn run(args: LoadArgs, config: &ConfigFile) -> Result<(), CliError> {
    let loader_config = super::loader_config(args.mods_dir, config);
    println!("Loading packs from: {}", loader_config.mods_dir.display());

    let mut loader = PackLoader::new(loader_config, OfflineHost::new());
    let mut context = loader
        .initialize()
        .map_err(|e| CliError::Pipeline(e.to_string()))?;

    print_packs(&context);
    print_bundles(context.bundle_index());
    print_catalogs(context.catalogs());

    let summary = context.summary();
    println!();
    println!("{}", style(summary).bold());

    if args.keep_staging {
        println!("Staging kept at: {}", context.staging_root().display());
    } else if let Err(e) = context.teardown() {
        warn!(path = %context.staging_root().display(), error = %e, "Could not remove staging folder");
    }

    if summary.packs_failed > 0 {
        return Err(CliError::PacksFailed(summary.packs_failed));
    }
    Ok(())
}

fn print_packs(context: &PipelineContext) {
    println!();
    println!("{}", style("Packs").bold().underlined());

    for (path, status) in context.faults().iter() {
        let label = match status {
            PackStatus::Working => style("OK".to_string()).green(),
            PackStatus::Failed(failure) => style(format!("FAILED ({})", failure.kind)).red(),
        };
        println!("  {} {}", label, path.display());

        if let Some(info) = context.build_info(path) {
            println!("      {}", info);
        }
        if let Some((_, hash)) = context.pack_hashes().find(|(pack, _)| *pack == path) {
            println!("      sha256 {}", style(hash).dim());
        }
        if let PackStatus::Failed(failure) = status {
            println!("      {}", failure.message);
        }
    }
}

fn print_bundles(index: &BundleIndex) {
    if index.is_empty() {
        return;
    }

    println!();
    println!("{}", style("Bundles").bold().underlined());
    for (path, assets) in index.bundles() {
        println!("  {} ({} assets)", path.display(), assets.len());
    }
    let prefabs = index.prefabs().count();
    if prefabs > 0 {
        println!("  {} prefabs", prefabs);
    }
}

fn print_catalogs(catalogs: &[StagedCatalog]) {
    if catalogs.is_empty() {
        return;
    }

    println!();
    println!("{}", style("Catalogs").bold().underlined());
    for catalog in catalogs {
        let outcome = match catalog.outcome() {
            "verified" => style(catalog.outcome()).green(),
            "load-failed" | "invalid" => style(catalog.outcome()).red(),
            other => style(other).yellow(),
        };
        println!("  {:<12} {}", outcome, catalog.name());
        println!("      {}", catalog.state);
    }
}

//! `inspect`: list how each member of an archive would be routed.

use std::path::PathBuf;

use clap::Args;
use console::style;
use contentpack::pipeline::list_entries;

use crate::error::CliError;

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Pack archive to list
    pub archive: PathBuf,
}

/// Run the inspect command.
pub fn run(args: InspectArgs) -> Result<(), CliError> {
    let listings = list_entries(&args.archive).map_err(|e| CliError::Inspect {
        path: args.archive.clone(),
        reason: e.to_string(),
    })?;

    println!("{} ({} entries)", args.archive.display(), listings.len());
    let mut unroutable = 0;
    for listing in &listings {
        let route = match &listing.route {
            Ok(route) => style(format!("{:?}", route)).green(),
            Err(e) => {
                unroutable += 1;
                style(e.to_string()).red()
            }
        };
        println!(
            "  {:<50} {:>10}  {:<14} {}",
            listing.internal_path, listing.size, listing.entry_type, route
        );
    }

    if unroutable > 0 {
        println!();
        println!(
            "{}",
            style(format!("{} entries would fail this pack on load", unroutable)).red()
        );
    }
    Ok(())
}

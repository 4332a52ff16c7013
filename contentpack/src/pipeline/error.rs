//! Errors that abort a pipeline run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole pipeline run.
///
/// Everything else is attributed to a pack or a catalog and recorded in the
/// [`PipelineContext`](super::PipelineContext).
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("could not create staging folder '{}': {source}", path.display())]
    StagingSetup {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

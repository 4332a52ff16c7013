//! One-shot pack loading pipeline.
//!
//! [`PackLoader::initialize`] runs every stage once and returns a
//! [`PipelineContext`] owning everything the run produced:
//!
//! 1. **Staging**: create the staging folder (the only fatal step)
//! 2. **Scanning**: find pack archives in sorted path order
//! 3. **Walking**: per archive, hash the raw file, then walk its entries
//! 4. **IndexingBundles**: list the assets of every staged bundle
//! 5. **LoadingCatalogs**: hand staged catalogs to the host
//! 6. **ValidatingCatalogs**: probe loaded catalogs through their witness
//!
//! An entry failure marks its pack failed and skips the rest of that
//! archive. Catalog failures are recorded per catalog.

mod error;
mod walk;

pub use error::PipelineError;
pub use walk::{list_entries, EntryListing, WalkStats};

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::catalog::{
    BundleIndex, CatalogLoader, CatalogPatcher, CatalogValidator, LoadReport, StagedCatalog, StagingArea,
    ValidationReport,
};
use crate::config::LoaderConfig;
use crate::descriptor::DescriptorRegistry;
use crate::host::{ContentHost, ResourceHost};
use crate::pack::{hash_archive, BuildInfo, ContentHash, ContentPack, FaultRegistry, PackStatus};
use crate::scanner::ArchiveScanner;
use walk::{walk_archive, WalkState};

/// Stage of a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    /// Creating the staging folder.
    Staging,
    /// Looking for pack archives.
    Scanning,
    /// Hashing and walking archives.
    Walking,
    /// Listing the contents of staged bundles.
    IndexingBundles,
    /// Loading staged catalogs into the host.
    LoadingCatalogs,
    /// Probing loaded catalogs.
    ValidatingCatalogs,
    /// Run finished.
    Complete,
}

impl PipelineStage {
    /// Get a human-readable name for the stage.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Staging => "Staging",
            Self::Scanning => "Scanning",
            Self::Walking => "Walking archives",
            Self::IndexingBundles => "Indexing bundles",
            Self::LoadingCatalogs => "Loading catalogs",
            Self::ValidatingCatalogs => "Validating catalogs",
            Self::Complete => "Complete",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Totals for a finished run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    pub packs_found: usize,
    pub packs_working: usize,
    pub packs_failed: usize,
    pub descriptors: usize,
    pub bundles_indexed: usize,
    pub catalogs_staged: usize,
    pub catalogs_loaded: usize,
    pub catalogs_failed: usize,
    pub catalogs_verified: usize,
    pub catalogs_invalid: usize,
}

impl fmt::Display for PipelineSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} packs ({} working, {} failed), {} descriptors, {} bundles, {} catalogs ({} loaded, {} failed, {} verified, {} invalid)",
            self.packs_found,
            self.packs_working,
            self.packs_failed,
            self.descriptors,
            self.bundles_indexed,
            self.catalogs_staged,
            self.catalogs_loaded,
            self.catalogs_failed,
            self.catalogs_verified,
            self.catalogs_invalid,
        )
    }
}

/// Everything one run produced.
#[derive(Debug)]
pub struct PipelineContext {
    packs: Vec<ContentPack>,
    faults: FaultRegistry,
    descriptors: DescriptorRegistry,
    catalogs: Vec<StagedCatalog>,
    staged_bundles: Vec<PathBuf>,
    bundle_index: BundleIndex,
    build_info: BTreeMap<PathBuf, BuildInfo>,
    staging: StagingArea,
    load_report: LoadReport,
    validation_report: ValidationReport,
}

impl PipelineContext {
    fn new(staging: StagingArea) -> Self {
        Self {
            packs: Vec::new(),
            faults: FaultRegistry::new(),
            descriptors: DescriptorRegistry::new(),
            catalogs: Vec::new(),
            staged_bundles: Vec::new(),
            bundle_index: BundleIndex::new(),
            build_info: BTreeMap::new(),
            staging,
            load_report: LoadReport::default(),
            validation_report: ValidationReport::default(),
        }
    }

    /// Content hash of every pack that could be read, in scan order.
    ///
    /// Failed packs are included; the hash is taken before any entry is read.
    pub fn pack_hashes(&self) -> impl Iterator<Item = (&Path, &ContentHash)> {
        self.packs
            .iter()
            .map(|pack| (pack.archive_path.as_path(), &pack.content_hash))
    }

    pub fn packs(&self) -> &[ContentPack] {
        &self.packs
    }

    pub fn is_pack_working(&self, pack: &Path) -> bool {
        self.faults.is_working(pack)
    }

    /// First failure recorded for a pack, if it failed.
    pub fn failure_reason(&self, pack: &Path) -> Option<String> {
        self.faults.failure_reason(pack)
    }

    pub fn pack_status(&self, pack: &Path) -> Option<&PackStatus> {
        self.faults.status(pack)
    }

    pub fn faults(&self) -> &FaultRegistry {
        &self.faults
    }

    pub fn descriptors(&self) -> &DescriptorRegistry {
        &self.descriptors
    }

    /// Staged catalogs in staging order.
    pub fn catalogs(&self) -> &[StagedCatalog] {
        &self.catalogs
    }

    /// Catalogs staged from one pack.
    pub fn catalogs_for(&self, pack: &Path) -> impl Iterator<Item = &StagedCatalog> {
        let pack = pack.to_path_buf();
        self.catalogs
            .iter()
            .filter(move |catalog| catalog.descriptor.source_pack == pack)
    }

    /// Contents of the staged bundles, built-in shader bundles excluded.
    pub fn bundle_index(&self) -> &BundleIndex {
        &self.bundle_index
    }

    /// Whether a staged bundle carries an asset named `name`.
    pub fn is_pack_prefab(&self, name: &str) -> bool {
        self.bundle_index.contains_asset(name)
    }

    /// First staged bundle holding an asset named `name`.
    pub fn prefab_bundle_path(&self, name: &str) -> Option<&Path> {
        self.bundle_index.bundle_for(name)
    }

    pub fn build_info(&self, pack: &Path) -> Option<&BuildInfo> {
        self.build_info.get(pack)
    }

    pub fn staging_root(&self) -> &Path {
        self.staging.root()
    }

    pub fn summary(&self) -> PipelineSummary {
        PipelineSummary {
            packs_found: self.faults.len(),
            packs_working: self.faults.working_count(),
            packs_failed: self.faults.failed_count(),
            descriptors: self.descriptors.len(),
            bundles_indexed: self.bundle_index.len(),
            catalogs_staged: self.catalogs.len(),
            catalogs_loaded: self.load_report.loaded,
            catalogs_failed: self.load_report.failed,
            catalogs_verified: self.validation_report.verified,
            catalogs_invalid: self.validation_report.failed,
        }
    }

    /// Remove the staging area and everything written to it.
    pub fn teardown(&mut self) -> io::Result<usize> {
        self.staging.teardown()
    }
}

/// Runs the pipeline against a host.
pub struct PackLoader<H> {
    config: LoaderConfig,
    host: H,
}

impl<H: ResourceHost + ContentHost> PackLoader<H> {
    pub fn new(config: LoaderConfig, host: H) -> Self {
        Self { config, host }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    /// Run every stage once.
    ///
    /// Only a failure to create the staging folder is returned as an error.
    /// Pack and catalog failures are recorded in the returned context.
    pub fn initialize(&mut self) -> Result<PipelineContext, PipelineError> {
        let staging_root = self.config.staging_root();
        info!(stage = %PipelineStage::Staging, path = %staging_root.display(), "Pipeline stage");
        let staging = StagingArea::create(&staging_root).map_err(|source| {
            PipelineError::StagingSetup {
                path: staging_root.clone(),
                source,
            }
        })?;
        let mut context = PipelineContext::new(staging);

        info!(stage = %PipelineStage::Scanning, root = %self.config.mods_dir.display(), "Pipeline stage");
        let archives = self.scan(&staging_root);
        info!(count = archives.len(), "Found pack archives");

        info!(stage = %PipelineStage::Walking, "Pipeline stage");
        let patcher = CatalogPatcher::new(self.config.builtin_shaders_marker.as_str());
        for archive in &archives {
            self.process_archive(archive, &patcher, &mut context);
        }

        info!(stage = %PipelineStage::IndexingBundles, count = context.staged_bundles.len(), "Pipeline stage");
        context.bundle_index = BundleIndex::build(&mut self.host, &context.staged_bundles);

        info!(stage = %PipelineStage::LoadingCatalogs, count = context.catalogs.len(), "Pipeline stage");
        context.load_report = CatalogLoader::load_all(&mut self.host, &mut context.catalogs);

        info!(stage = %PipelineStage::ValidatingCatalogs, count = context.load_report.loaded, "Pipeline stage");
        context.validation_report = CatalogValidator::validate_all(&self.host, &mut context.catalogs);

        info!(stage = %PipelineStage::Complete, summary = %context.summary(), "Pipeline stage");
        Ok(context)
    }

    fn scan(&self, staging_root: &Path) -> Vec<PathBuf> {
        let scanner = ArchiveScanner::new(&self.config.mods_dir)
            .recursive(self.config.recursive)
            .with_extensions(self.config.extensions.iter().cloned())
            .excluding(staging_root);

        match scanner.find_archives() {
            Ok(archives) => archives,
            Err(e) => {
                error!(root = %self.config.mods_dir.display(), error = %e, "Could not scan for pack archives");
                Vec::new()
            }
        }
    }

    fn process_archive(&mut self, archive: &Path, patcher: &CatalogPatcher, context: &mut PipelineContext) {
        context.faults.register(archive);

        let content_hash = match hash_archive(archive) {
            Ok(hash) => hash,
            Err(e) => {
                context.faults.mark_failed(archive, &e);
                return;
            }
        };
        context.packs.push(ContentPack::new(archive, content_hash));

        let mut build_info = None;
        let mut state = WalkState {
            staging: &mut context.staging,
            patcher,
            descriptors: &mut context.descriptors,
            catalogs: &mut context.catalogs,
            bundles: &mut context.staged_bundles,
            build_info: &mut build_info,
        };

        match walk_archive(archive, &mut self.host, &mut state) {
            Ok(stats) => {
                info!(
                    pack = %archive.display(),
                    hash = %content_hash,
                    entries = stats.dispatched,
                    ignored = stats.ignored,
                    "Pack loaded"
                );
            }
            Err(e) => {
                context.faults.mark_failed(archive, &e);
            }
        }

        if let Some(info) = build_info {
            context.build_info.insert(archive.to_path_buf(), info);
        }
    }
}

//! Streaming walk over one pack archive.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::catalog::{CatalogPatcher, StagedCatalog, StagingArea};
use crate::descriptor::{DescriptorCategory, DescriptorRegistry};
use crate::entry::{
    check_json, decode_utf8, route, split_records, ArchiveEntry, EntryType, Route, RouteError,
};
use crate::error::{entry_location, PackError};
use crate::host::ContentHost;
use crate::pack::{pack_base_name, BuildInfo};

/// Counts from walking one archive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    /// Members read and dispatched.
    pub dispatched: usize,
    /// Members skipped without being read.
    pub ignored: usize,
}

/// Upper bound on buffer pre-allocation; declared sizes come from the archive.
const CAPACITY_HINT_LIMIT: u64 = 1 << 20;

/// One archive member as seen by [`list_entries`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryListing {
    pub internal_path: String,
    pub entry_type: EntryType,
    /// Uncompressed size in bytes.
    pub size: u64,
    pub route: Result<Route, RouteError>,
}

/// List an archive's members in archive order without dispatching them.
///
/// Directories are left out.
pub fn list_entries(archive: &Path) -> Result<Vec<EntryListing>, PackError> {
    let file = File::open(archive).map_err(|e| PackError::io(archive, e))?;
    let mut reader = BufReader::new(file);
    let mut listings = Vec::new();

    while let Some(zip_entry) = zip::read::read_zipfile_from_stream(&mut reader)
        .map_err(|e| PackError::format(archive.display().to_string(), e))?
    {
        if zip_entry.is_dir() {
            continue;
        }
        let internal_path = zip_entry.name().to_string();
        let entry_type = EntryType::classify_path(&internal_path);
        listings.push(EntryListing {
            route: route(&internal_path, entry_type),
            size: zip_entry.size(),
            internal_path,
            entry_type,
        });
    }

    Ok(listings)
}

/// Per-run state an archive walk writes into.
pub(super) struct WalkState<'a> {
    pub staging: &'a mut StagingArea,
    pub patcher: &'a CatalogPatcher,
    pub descriptors: &'a mut DescriptorRegistry,
    pub catalogs: &'a mut Vec<StagedCatalog>,
    /// Staged bundles to index, built-in shader bundles excluded.
    pub bundles: &'a mut Vec<PathBuf>,
    pub build_info: &'a mut Option<BuildInfo>,
}

/// Walk an archive entry by entry, in archive order.
///
/// The first entry that fails stops the walk and is returned; whatever the
/// earlier entries registered stays registered.
pub(super) fn walk_archive<H: ContentHost>(
    archive: &Path,
    host: &mut H,
    state: &mut WalkState<'_>,
) -> Result<WalkStats, PackError> {
    let file = File::open(archive).map_err(|e| PackError::io(archive, e))?;
    let mut reader = BufReader::new(file);
    let mut stats = WalkStats::default();

    loop {
        let mut zip_entry = match zip::read::read_zipfile_from_stream(&mut reader) {
            Ok(Some(zip_entry)) => zip_entry,
            Ok(None) => break,
            Err(e) => return Err(PackError::format(archive.display().to_string(), e)),
        };

        let internal_path = zip_entry.name().to_string();
        if zip_entry.is_dir() || EntryType::classify_path(&internal_path) == EntryType::Ignored {
            stats.ignored += 1;
            continue;
        }

        let mut raw_bytes = Vec::with_capacity(zip_entry.size().min(CAPACITY_HINT_LIMIT) as usize);
        zip_entry
            .read_to_end(&mut raw_bytes)
            .map_err(|e| PackError::format(entry_location(archive, &internal_path), e))?;

        dispatch(archive, ArchiveEntry::new(internal_path, raw_bytes), host, state)?;
        stats.dispatched += 1;
    }

    Ok(stats)
}

fn dispatch<H: ContentHost>(
    archive: &Path,
    entry: ArchiveEntry,
    host: &mut H,
    state: &mut WalkState<'_>,
) -> Result<(), PackError> {
    let location = entry_location(archive, &entry.internal_path);
    let route = entry
        .route()
        .map_err(|e| PackError::format(location.as_str(), e))?;

    debug!(
        pack = %archive.display(),
        entry = %entry.internal_path,
        kind = %entry.entry_type,
        route = ?route,
        "Routing entry"
    );

    let format_error = |e: &dyn std::fmt::Display| PackError::format(location.as_str(), e);
    let resolution_error = |e: &dyn std::fmt::Display| PackError::resolution(location.as_str(), e);

    match route {
        Route::Descriptor { category, name } => {
            let text = decode_utf8(&entry.raw_bytes).map_err(|e| format_error(&e))?;
            check_json(text).map_err(|e| format_error(&e))?;

            let forwarded = match category {
                DescriptorCategory::Blueprint => host.register_blueprint(&name, text),
                DescriptorCategory::Recipe => host.register_recipe(&name, text),
                DescriptorCategory::Localization => host.register_localization(&name, text),
                _ => Ok(()),
            };
            forwarded.map_err(|e| resolution_error(&e))?;

            state.descriptors.register(category, name, text, archive);
        }
        Route::Catalog { file_name } => {
            let descriptor = state
                .patcher
                .stage(state.staging, archive, &file_name, &entry.raw_bytes)
                .map_err(|e| e.into_pack_error(location.as_str()))?;

            state.descriptors.register(
                DescriptorCategory::Catalog,
                descriptor.locator_id.clone(),
                String::from_utf8_lossy(&entry.raw_bytes),
                archive,
            );
            state.catalogs.push(StagedCatalog::new(descriptor));
        }
        Route::BuildInfo => {
            let text = decode_utf8(&entry.raw_bytes).map_err(|e| format_error(&e))?;
            let build_info = BuildInfo::parse(text).map_err(|e| format_error(&e))?;
            info!(pack = %archive.display(), "Found: {}", build_info);
            *state.build_info = Some(build_info);
        }
        Route::GearSpawn { name } => {
            let text = decode_utf8(&entry.raw_bytes).map_err(|e| format_error(&e))?;
            let records = split_records(text);
            host.register_gear_spawns(&name, &records)
                .map_err(|e| resolution_error(&e))?;

            state
                .descriptors
                .register(DescriptorCategory::GearSpawn, name, text, archive);
        }
        Route::StageBundle { file_name } => {
            let pack = pack_base_name(archive);
            let staged_path = state
                .staging
                .write_file(&pack, &file_name, &entry.raw_bytes)
                .map_err(|e| PackError::io(state.staging.staged_path(&pack, &file_name), e))?;
            if !state.patcher.is_builtin_shaders(&file_name) {
                state.bundles.push(staged_path);
            }
        }
        Route::Assembly { file_name } => {
            host.load_assembly(&file_name, &entry.raw_bytes)
                .map_err(|e| resolution_error(&e))?;
        }
        Route::AudioBank { file_name } => {
            host.register_audio_bank(&file_name, &entry.raw_bytes)
                .map_err(|e| resolution_error(&e))?;
        }
        Route::Ignore => {}
    }

    Ok(())
}

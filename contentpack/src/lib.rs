//! ContentPack - Loader for third-party content pack archives
//!
//! This library ingests content pack archives, routes their members to
//! category registrars, patches asset catalogs so they can be loaded from a
//! private staging area, and maps declarative descriptors onto a host
//! object model.
//!
//! # Pipeline
//!
//! ```text
//! ArchiveScanner ──► per archive: hash ──► walk entries
//!                                          ├── EntryClassifier
//!                                          ├── ContentRouter ──► DescriptorRegistry
//!                                          └── CatalogPatcher ──► StagingArea
//!                 after all archives:
//!                 CatalogLoader ──► CatalogValidator
//!
//! MapperLayer reads the DescriptorRegistry independently of catalog loading.
//! ```
//!
//! A failure inside one pack marks that pack failed in the [`pack::FaultRegistry`]
//! and stops processing of its remaining entries. Other packs are unaffected.
//!
//! # Example
//!
//! ```ignore
//! use contentpack::config::LoaderConfig;
//! use contentpack::host::OfflineHost;
//! use contentpack::pipeline::PackLoader;
//!
//! let config = LoaderConfig::new("/games/mods".into());
//! let mut loader = PackLoader::new(config, OfflineHost::new());
//! let context = loader.initialize()?;
//!
//! for (path, hash) in context.pack_hashes() {
//!     println!("{} {}", hash, path.display());
//! }
//! ```

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod entry;
pub mod error;
pub mod host;
pub mod logging;
pub mod mapper;
pub mod pack;
pub mod pipeline;
pub mod scanner;

pub use error::{ErrorKind, PackError};

//! Infrastructure adapters for Stencil.
//!
//! This crate implements the ports defined in `stencil-core::application::ports`
//! and reads domain manifests. It contains all external I/O.

pub mod domain_loader;
pub mod filesystem;

// Re-export commonly used adapters
pub use domain_loader::{
    DomainManifest, LoadedDomain, ManifestFormat, ProjectSection, RejectedEntity, load_domain,
};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};

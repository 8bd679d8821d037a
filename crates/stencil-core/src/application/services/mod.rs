//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "generate every artifact for a domain".

pub mod generation_service;

pub use generation_service::{
    ArtifactOutcome, EntityDefinition, EntityReport, GenerationReport, GenerationService,
    RenderedArtifact,
};

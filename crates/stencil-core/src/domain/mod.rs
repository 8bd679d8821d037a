// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stencil.
//!
//! This module contains pure generation logic with no I/O. Emission to disk
//! is handled via the [`Filesystem`](crate::application::ports::Filesystem)
//! port defined in the application layer.
//!
//! ## Layers inside the domain
//!
//! - **Entity model**: [`Entity`] and [`GenerationContext`], immutable once built
//! - **Resolver**: [`Resolver`] maps entity + context to every [`ClassPath`]
//! - **Composition**: [`Fragments`] and [`SourceSkeleton`]
//! - **Artifacts**: one pure template function per [`ArtifactKind`]
//!
//! Every function here is deterministic: the same entity, context and flags
//! always render byte-identical text.

// Public API - what the world sees
pub mod artifacts;
pub mod composition;
pub mod entities;
pub mod error;
pub mod naming;
pub mod resolver;
pub mod value_objects;

// Re-exports for convenience
pub use artifacts::render;
pub use composition::{FragmentKind, Fragments, SourceSkeleton};
pub use entities::{
    ClassPath, DEFAULT_PARENT_KEY, Entity, EntityBuilder, EntityProperty, GenerationContext,
    ParentRelationship, Root,
};
pub use error::{DomainError, ErrorCategory};
pub use resolver::Resolver;
pub use value_objects::{ArtifactKind, DtoKind, FeatureFlags, PropertyType};

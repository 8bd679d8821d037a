//! Stencil Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Stencil
//! code generator: entity descriptions in, consistent C# feature and test
//! sources out.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           stencil-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │          (GenerationService)            │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │         (Driven: Filesystem)            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     stencil-adapters (Infrastructure)   │
//! │ (LocalFilesystem, MemoryFilesystem, ..) │
//! └─────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │  (Entity, Resolver, artifact templates) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stencil_core::prelude::*;
//!
//! let entity = Entity::builder("Order")
//!     .property(EntityProperty::primary_key("Id", PropertyType::Guid))
//!     .build()
//!     .unwrap();
//! let context = GenerationContext::conventional("./Shop", "Shop");
//! let flags = FeatureFlags::default().soft_delete(true);
//!
//! let text = stencil_core::domain::render(ArtifactKind::DeleteCommandTest, &entity, &context, &flags)
//!     .unwrap();
//! assert!(text.contains("can_softdelete_order_from_db"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ArtifactOutcome, EntityDefinition, GenerationReport, GenerationService, ports::Filesystem,
    };
    pub use crate::domain::{
        ArtifactKind, ClassPath, Entity, EntityBuilder, EntityProperty, FeatureFlags,
        GenerationContext, PropertyType, Resolver,
    };
    pub use crate::error::{StencilError, StencilResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

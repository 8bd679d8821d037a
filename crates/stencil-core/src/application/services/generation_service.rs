//! Generation Service - main application orchestrator.
//!
//! This service coordinates the generation workflow:
//! 1. Build each entity from its definition and resolve parent keys against
//!    the rest of the batch
//! 2. Render every requested artifact through the domain templates
//! 3. Emit the text through the `Filesystem` port
//!
//! Failures are contained at the smallest unit that can fail: an invalid
//! entity skips only that entity, and a failed artifact skips only itself.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{ApplicationError, ports::Filesystem},
    domain::{
        self, ArtifactKind, ClassPath, DomainError, Entity, EntityBuilder, FeatureFlags,
        GenerationContext, Resolver,
    },
    error::{StencilError, StencilResult},
};

/// One entity to generate, with its feature flags.
#[derive(Debug, Clone)]
pub struct EntityDefinition {
    pub entity: EntityBuilder,
    pub flags: FeatureFlags,
}

impl EntityDefinition {
    pub fn new(entity: EntityBuilder, flags: FeatureFlags) -> Self {
        Self { entity, flags }
    }
}

/// Rendered text and where it belongs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedArtifact {
    pub kind: ArtifactKind,
    pub class_path: ClassPath,
    pub content: String,
}

impl RenderedArtifact {
    pub fn path(&self) -> &Path {
        self.class_path.full_path()
    }
}

/// Result of one artifact in a batch.
#[derive(Debug, Clone)]
pub enum ArtifactOutcome {
    /// Emitted to disk.
    Written { kind: ArtifactKind, path: PathBuf },
    /// Rendered during a dry run; nothing was written.
    Planned { kind: ArtifactKind, path: PathBuf },
    Failed {
        kind: ArtifactKind,
        error: StencilError,
    },
}

impl ArtifactOutcome {
    pub fn kind(&self) -> ArtifactKind {
        match self {
            Self::Written { kind, .. } | Self::Planned { kind, .. } | Self::Failed { kind, .. } => {
                *kind
            }
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Per-entity section of a [`GenerationReport`].
#[derive(Debug, Clone)]
pub struct EntityReport {
    /// Normalised name when the entity built, raw input otherwise.
    pub entity: String,
    /// Set when the entity failed validation; no artifacts were attempted.
    pub skipped: Option<StencilError>,
    pub artifacts: Vec<ArtifactOutcome>,
}

/// Summary of a batch run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub dry_run: bool,
    pub entities: Vec<EntityReport>,
}

impl GenerationReport {
    fn outcomes(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.entities.iter().flat_map(|e| e.artifacts.iter())
    }

    pub fn written_count(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, ArtifactOutcome::Written { .. }))
            .count()
    }

    pub fn planned_count(&self) -> usize {
        self.outcomes()
            .filter(|o| matches!(o, ArtifactOutcome::Planned { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes().filter(|o| o.is_failure()).count()
    }

    pub fn skipped_entities(&self) -> impl Iterator<Item = &EntityReport> {
        self.entities.iter().filter(|e| e.skipped.is_some())
    }

    /// Every failure as `(entity, artifact, error)`; `artifact` is `None`
    /// for a skipped entity.
    pub fn failures(&self) -> Vec<(&str, Option<ArtifactKind>, &StencilError)> {
        let mut failures = Vec::new();
        for report in &self.entities {
            if let Some(error) = &report.skipped {
                failures.push((report.entity.as_str(), None, error));
            }
            for outcome in &report.artifacts {
                if let ArtifactOutcome::Failed { kind, error } = outcome {
                    failures.push((report.entity.as_str(), Some(*kind), error));
                }
            }
        }
        failures
    }

    pub fn has_failures(&self) -> bool {
        self.failed_count() > 0 || self.skipped_entities().next().is_some()
    }
}

/// Main generation service.
///
/// Rendering is pure; the only side effect is the injected [`Filesystem`].
pub struct GenerationService {
    filesystem: Box<dyn Filesystem>,
}

impl GenerationService {
    /// Create a new generation service writing through `filesystem`.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Render one artifact without emitting it.
    pub fn render(
        &self,
        kind: ArtifactKind,
        entity: &Entity,
        context: &GenerationContext,
        flags: &FeatureFlags,
    ) -> StencilResult<RenderedArtifact> {
        let class_path = Resolver::new(context, entity).artifact(kind)?;
        let content = domain::render(kind, entity, context, flags)?;
        Ok(RenderedArtifact {
            kind,
            class_path,
            content,
        })
    }

    /// Render one artifact and emit it; returns the written path.
    #[instrument(skip_all, fields(entity = %entity.name(), kind = %kind))]
    pub fn generate(
        &self,
        kind: ArtifactKind,
        entity: &Entity,
        context: &GenerationContext,
        flags: &FeatureFlags,
    ) -> StencilResult<PathBuf> {
        let artifact = self.render(kind, entity, context, flags)?;
        self.emit(&artifact)?;
        debug!(path = %artifact.path().display(), "artifact written");
        Ok(artifact.path().to_path_buf())
    }

    /// Build, render and emit every requested kind for every definition.
    ///
    /// Never aborts early; inspect the returned report for failures.
    #[instrument(skip_all, fields(entities = definitions.len(), kinds = kinds.len()))]
    pub fn generate_batch(
        &self,
        definitions: &[EntityDefinition],
        context: &GenerationContext,
        kinds: &[ArtifactKind],
    ) -> GenerationReport {
        self.run(definitions, context, kinds, false)
    }

    /// Like [`generate_batch`](Self::generate_batch) but never touches the
    /// filesystem; successful artifacts are reported as `Planned`.
    #[instrument(skip_all, fields(entities = definitions.len(), kinds = kinds.len()))]
    pub fn dry_run(
        &self,
        definitions: &[EntityDefinition],
        context: &GenerationContext,
        kinds: &[ArtifactKind],
    ) -> GenerationReport {
        self.run(definitions, context, kinds, true)
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn run(
        &self,
        definitions: &[EntityDefinition],
        context: &GenerationContext,
        kinds: &[ArtifactKind],
        dry_run: bool,
    ) -> GenerationReport {
        let run_id = Uuid::new_v4();
        info!(%run_id, dry_run, "Starting generation run");

        let built: Vec<_> = definitions
            .iter()
            .map(|definition| definition.entity.clone().build())
            .collect();
        let keys = primary_keys(built.iter().filter_map(|entity| entity.as_ref().ok()));

        let entities = definitions
            .iter()
            .zip(built)
            .map(|(definition, entity)| {
                let entity = entity.map(|e| e.with_parent_keys(&keys));
                self.run_entity(definition, entity, context, kinds, dry_run)
            })
            .collect();

        let report = GenerationReport {
            run_id,
            dry_run,
            entities,
        };
        info!(
            %run_id,
            written = report.written_count(),
            planned = report.planned_count(),
            failed = report.failed_count(),
            "Generation run finished"
        );
        report
    }

    fn run_entity(
        &self,
        definition: &EntityDefinition,
        entity: Result<Entity, DomainError>,
        context: &GenerationContext,
        kinds: &[ArtifactKind],
        dry_run: bool,
    ) -> EntityReport {
        let entity = match entity {
            Ok(entity) => entity,
            Err(e) => {
                warn!(entity = %definition.entity.name(), error = %e, "Skipping invalid entity");
                return EntityReport {
                    entity: definition.entity.name().to_string(),
                    skipped: Some(e.into()),
                    artifacts: Vec::new(),
                };
            }
        };

        let artifacts = kinds
            .iter()
            .map(|&kind| {
                let result = self.render(kind, &entity, context, &definition.flags).and_then(|artifact| {
                    if !dry_run {
                        self.emit(&artifact)?;
                    }
                    Ok(artifact.path().to_path_buf())
                });

                match result {
                    Ok(path) if dry_run => ArtifactOutcome::Planned { kind, path },
                    Ok(path) => {
                        debug!(entity = %entity.name(), %kind, path = %path.display(), "artifact written");
                        ArtifactOutcome::Written { kind, path }
                    }
                    Err(error) => {
                        warn!(entity = %entity.name(), %kind, %error, "Artifact failed");
                        ArtifactOutcome::Failed { kind, error }
                    }
                }
            })
            .collect();

        EntityReport {
            entity: entity.name().to_string(),
            skipped: None,
            artifacts,
        }
    }

    /// Ensure the directory exists, then hand the text to the sink.
    fn emit(&self, artifact: &RenderedArtifact) -> StencilResult<()> {
        let directory = artifact.class_path.directory();
        if !self.filesystem.exists(directory) {
            self.filesystem.create_dir_all(directory)?;
        }
        self.filesystem
            .write_file(artifact.path(), &artifact.content)
            .map_err(|e| match e {
                StencilError::Application(ApplicationError::EmissionFailed { .. }) => e,
                other => ApplicationError::EmissionFailed {
                    path: artifact.path().to_path_buf(),
                    reason: other.to_string(),
                }
                .into(),
            })
    }
}

/// Primary-key property name of every entity in a batch, by entity name.
fn primary_keys<'a>(entities: impl Iterator<Item = &'a Entity>) -> HashMap<String, String> {
    entities
        .map(|e| (e.name().to_string(), e.primary_key().name().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::MockFilesystem;
    use crate::domain::{EntityProperty, PropertyType};
    use crate::error::ErrorCategory;

    fn context() -> GenerationContext {
        GenerationContext::conventional("/sln", "Shop")
    }

    fn order() -> EntityBuilder {
        Entity::builder("Order").property(EntityProperty::primary_key("Id", PropertyType::Guid))
    }

    fn permissive_fs() -> MockFilesystem {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| true);
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs
    }

    #[test]
    fn generate_writes_to_resolved_path() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists().returning(|_| false);
        fs.expect_create_dir_all()
            .withf(|p| p.ends_with("Shop.IntegrationTests/FeatureTests/Orders"))
            .times(1)
            .returning(|_| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                p.ends_with("DeleteOrderCommandTests.cs") && content.contains("can_delete_order_from_db")
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let service = GenerationService::new(Box::new(fs));
        let entity = order().build().unwrap();
        let path = service
            .generate(ArtifactKind::DeleteCommandTest, &entity, &context(), &FeatureFlags::default())
            .unwrap();

        assert_eq!(
            path,
            PathBuf::from("/sln/tests/Shop.IntegrationTests/FeatureTests/Orders/DeleteOrderCommandTests.cs")
        );
    }

    #[test]
    fn invalid_entity_is_skipped_others_continue() {
        let mut fs = permissive_fs();
        fs.expect_write_file().times(2).returning(|_, _| Ok(()));

        let definitions = vec![
            EntityDefinition::new(Entity::builder("Broken"), FeatureFlags::default()),
            EntityDefinition::new(order(), FeatureFlags::default()),
        ];
        let kinds = [ArtifactKind::DeleteFeature, ArtifactKind::DeleteCommandTest];

        let report = GenerationService::new(Box::new(fs)).generate_batch(&definitions, &context(), &kinds);

        assert_eq!(report.written_count(), 2);
        assert_eq!(report.failed_count(), 0);
        let skipped: Vec<_> = report.skipped_entities().map(|e| e.entity.as_str()).collect();
        assert_eq!(skipped, vec!["Broken"]);
        assert!(report.has_failures());
        assert_eq!(
            report.failures()[0].2.category(),
            ErrorCategory::Configuration
        );
    }

    #[test]
    fn emission_failure_is_per_artifact() {
        let mut fs = permissive_fs();
        fs.expect_write_file().returning(|path, _| {
            if path.ends_with("DeleteOrder.cs") {
                Err(StencilError::Internal {
                    message: "disk full".into(),
                })
            } else {
                Ok(())
            }
        });

        let definitions = vec![EntityDefinition::new(order(), FeatureFlags::default())];
        let report = GenerationService::new(Box::new(fs)).generate_batch(
            &definitions,
            &context(),
            &ArtifactKind::all(),
        );

        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.written_count(), ArtifactKind::all().len() - 1);

        let (entity, kind, error) = report.failures()[0];
        assert_eq!(entity, "Order");
        assert_eq!(kind, Some(ArtifactKind::DeleteFeature));
        match error {
            StencilError::Application(ApplicationError::EmissionFailed { path, reason }) => {
                assert!(path.ends_with("DeleteOrder.cs"));
                assert!(reason.contains("disk full"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn resolution_failure_names_entity_and_artifact() {
        let fs = permissive_fs();
        let ctx = GenerationContext::new("/sln", "/sln/src", "", "Shop");
        let definitions = vec![EntityDefinition::new(order(), FeatureFlags::default())];

        let report = GenerationService::new(Box::new(fs)).dry_run(
            &definitions,
            &ctx,
            &[ArtifactKind::UpdateEntityTest],
        );

        let (entity, kind, error) = report.failures()[0];
        assert_eq!(entity, "Order");
        assert_eq!(kind, Some(ArtifactKind::UpdateEntityTest));
        assert_eq!(error.category(), ErrorCategory::Resolution);
        assert!(error.to_string().contains("UpdateOrderTests.cs"));
    }

    #[test]
    fn dry_run_never_touches_the_filesystem() {
        // No expectations: any call on the mock panics.
        let fs = MockFilesystem::new();
        let definitions = vec![EntityDefinition::new(order(), FeatureFlags::default())];

        let report =
            GenerationService::new(Box::new(fs)).dry_run(&definitions, &context(), &ArtifactKind::all());

        assert!(report.dry_run);
        assert_eq!(report.planned_count(), ArtifactKind::all().len());
        assert_eq!(report.written_count(), 0);
        assert!(!report.has_failures());
    }

    #[test]
    fn parent_keys_come_from_the_batch() {
        let customer = Entity::builder("Customer")
            .property(EntityProperty::primary_key("Code", PropertyType::String));
        let order = order().property(EntityProperty::foreign_key(
            "CustomerCode",
            PropertyType::String,
            "Customer",
        ));
        let line = Entity::builder("OrderLine")
            .property(EntityProperty::primary_key("Id", PropertyType::Guid))
            .property(EntityProperty::foreign_key("ProductId", PropertyType::Guid, "Product"));

        let mut fs = permissive_fs();
        fs.expect_write_file()
            .withf(|p, content| {
                p.ends_with("DeleteOrderCommandTests.cs")
                    && content.contains(".RuleFor(o => o.CustomerCode, _ => fakeCustomerOne.Code)")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, content| {
                p.ends_with("DeleteOrderLineCommandTests.cs")
                    && content.contains(".RuleFor(o => o.ProductId, _ => fakeProductOne.Id)")
            })
            .times(1)
            .returning(|_, _| Ok(()));
        fs.expect_write_file()
            .withf(|p, _| p.ends_with("DeleteCustomerCommandTests.cs"))
            .times(1)
            .returning(|_, _| Ok(()));

        let definitions = vec![
            EntityDefinition::new(order, FeatureFlags::default()),
            EntityDefinition::new(customer, FeatureFlags::default()),
            EntityDefinition::new(line, FeatureFlags::default()),
        ];
        let report = GenerationService::new(Box::new(fs)).generate_batch(
            &definitions,
            &context(),
            &[ArtifactKind::DeleteCommandTest],
        );

        assert_eq!(report.written_count(), 3);
        assert!(!report.has_failures());
    }

    #[test]
    fn render_returns_path_and_text() {
        let service = GenerationService::new(Box::new(MockFilesystem::new()));
        let entity = order().build().unwrap();
        let artifact = service
            .render(ArtifactKind::EntityFaker, &entity, &context(), &FeatureFlags::default())
            .unwrap();

        assert_eq!(artifact.class_path.class_name(), "FakeOrder");
        assert!(artifact.path().ends_with("Fakes/Order/FakeOrder.cs"));
        assert!(artifact.content.contains("public class FakeOrder"));
    }
}

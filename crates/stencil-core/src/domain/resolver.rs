//! Naming/path resolver.
//!
//! The resolver is the only place that knows the folder conventions of the
//! generated solution. Templates ask it for a [`ClassPath`] instead of
//! formatting namespaces themselves, so the namespace a feature is written
//! under and the `using` a test emits for it come from the same function.
//!
//! ```text
//! test/{Base}.IntegrationTests/FeatureTests/{Plural}/     feature tests
//! test/{Base}.UnitTests/UnitTests/Domain/{Plural}/        entity unit tests
//! test/{Base}.SharedTestHelpers/Fakes/{Name}/             fakers
//! src/{Base}/Domain/{Plural}/Features/                    features
//! src/{Base}/Domain/{Plural}/                             entity
//! src/{Base}/Domain/{Plural}/Services/                    entity services
//! src/{Base}/Domain/{Plural}/Dtos/                        dtos
//! src/{Base}/Services/                                    services
//! solution/SharedKernel/Exceptions/                       exceptions
//! ```

use crate::domain::{
    entities::{
        class_path::{ClassPath, GenerationContext, Root},
        entity::Entity,
    },
    error::DomainError,
    naming,
    value_objects::ArtifactKind,
};

/// Resolves class paths for one entity within one generation context.
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    context: &'a GenerationContext,
    entity: &'a Entity,
}

impl<'a> Resolver<'a> {
    pub fn new(context: &'a GenerationContext, entity: &'a Entity) -> Self {
        Self { context, entity }
    }

    pub fn entity(&self) -> &'a Entity {
        self.entity
    }

    pub fn context(&self) -> &'a GenerationContext {
        self.context
    }

    /// Where the artifact of `kind` for this entity is written.
    pub fn artifact(&self, kind: ArtifactKind) -> Result<ClassPath, DomainError> {
        let file_name = kind.file_name(self.entity.name());
        match kind {
            ArtifactKind::DeleteFeature => self.features(&file_name),
            ArtifactKind::DeleteCommandTest => self.feature_test(&file_name),
            ArtifactKind::UpdateEntityTest => self.unit_test_entity(&file_name),
            ArtifactKind::EntityFaker
            | ArtifactKind::CreationDtoFaker
            | ArtifactKind::UpdateDtoFaker => self.test_fakes(self.entity.name(), &file_name),
        }
    }

    // ── test project ──────────────────────────────────────────────────────

    pub fn feature_test(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        let plural = self.entity.plural();
        self.resolve(Root::Test, Some("IntegrationTests"), &["FeatureTests", plural], file_name)
    }

    pub fn unit_test_entity(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        let plural = self.entity.plural();
        self.resolve(Root::Test, Some("UnitTests"), &["UnitTests", "Domain", plural], file_name)
    }

    /// Fakers live in a folder per entity; `entity_name` may be a parent.
    pub fn test_fakes(&self, entity_name: &str, file_name: &str) -> Result<ClassPath, DomainError> {
        self.resolve(Root::Test, Some("SharedTestHelpers"), &["Fakes", entity_name], file_name)
    }

    // ── src project ───────────────────────────────────────────────────────

    pub fn features(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        let plural = self.entity.plural();
        self.resolve(Root::Src, Some(""), &["Domain", plural, "Features"], file_name)
    }

    pub fn entity_class(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        let plural = self.entity.plural();
        self.resolve(Root::Src, Some(""), &["Domain", plural], file_name)
    }

    /// Repository interface and other per-entity services.
    pub fn entity_services(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        let plural = self.entity.plural();
        self.resolve(Root::Src, Some(""), &["Domain", plural, "Services"], file_name)
    }

    pub fn dtos(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        let plural = self.entity.plural();
        self.resolve(Root::Src, Some(""), &["Domain", plural, "Dtos"], file_name)
    }

    pub fn services(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        self.resolve(Root::Src, Some(""), &["Services"], file_name)
    }

    // ── solution ──────────────────────────────────────────────────────────

    pub fn exceptions(&self, file_name: &str) -> Result<ClassPath, DomainError> {
        self.resolve(Root::Solution, None, &["SharedKernel", "Exceptions"], file_name)
    }

    // ── internals ─────────────────────────────────────────────────────────

    /// Joins `root`, the project folder (`{Base}` or `{Base}.{suffix}`,
    /// skipped when `project` is `None`), the fixed `folders` and the file.
    fn resolve(
        &self,
        root: Root,
        project: Option<&str>,
        folders: &[&str],
        file_name: &str,
    ) -> Result<ClassPath, DomainError> {
        let root_path = root.path(self.context);
        if root_path.as_os_str().is_empty() {
            return Err(self.unresolvable(file_name, format!("{} directory is empty", root.as_str())));
        }
        if file_name.contains(['/', '\\']) {
            return Err(self.unresolvable(file_name, "file name must not contain path separators"));
        }

        let mut segments = Vec::with_capacity(folders.len() + 1);
        if let Some(suffix) = project {
            segments.push(self.project_folder(suffix, file_name)?);
        }
        segments.extend(folders.iter().map(|f| f.to_string()));

        Ok(ClassPath::from_parts(root_path, &segments, file_name))
    }

    fn project_folder(&self, suffix: &str, file_name: &str) -> Result<String, DomainError> {
        let base = self.context.project_base_name.trim();
        if base.is_empty() {
            return Err(self.unresolvable(file_name, "project base name is empty"));
        }
        if !base.split('.').all(naming::is_identifier) {
            return Err(self.unresolvable(
                file_name,
                format!("project base name '{base}' is not a dotted identifier"),
            ));
        }

        Ok(if suffix.is_empty() {
            base.to_string()
        } else {
            format!("{base}.{suffix}")
        })
    }

    fn unresolvable(&self, artifact: &str, reason: impl Into<String>) -> DomainError {
        DomainError::UnresolvableName {
            entity: self.entity.name().to_string(),
            artifact: if artifact.is_empty() {
                "<namespace>".to_string()
            } else {
                artifact.to_string()
            },
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::domain::{EntityProperty, PropertyType};

    fn order() -> Entity {
        Entity::builder("Order")
            .property(EntityProperty::primary_key("Id", PropertyType::Guid))
            .build()
            .unwrap()
    }

    fn context() -> GenerationContext {
        GenerationContext::new("/sln", "/sln/src", "/sln/tests", "Shop")
    }

    #[test]
    fn feature_test_path() {
        let (ctx, entity) = (context(), order());
        let path = Resolver::new(&ctx, &entity)
            .feature_test("DeleteOrderCommandTests.cs")
            .unwrap();

        assert_eq!(path.namespace(), "Shop.IntegrationTests.FeatureTests.Orders");
        assert_eq!(path.class_name(), "DeleteOrderCommandTests");
        assert_eq!(
            path.full_path(),
            Path::new("/sln/tests/Shop.IntegrationTests/FeatureTests/Orders/DeleteOrderCommandTests.cs")
        );
    }

    #[test]
    fn src_and_solution_namespaces() {
        let (ctx, entity) = (context(), order());
        let resolver = Resolver::new(&ctx, &entity);

        assert_eq!(resolver.features("").unwrap().namespace(), "Shop.Domain.Orders.Features");
        assert_eq!(resolver.entity_class("").unwrap().namespace(), "Shop.Domain.Orders");
        assert_eq!(resolver.dtos("").unwrap().namespace(), "Shop.Domain.Orders.Dtos");
        assert_eq!(
            resolver.entity_services("").unwrap().namespace(),
            "Shop.Domain.Orders.Services"
        );
        assert_eq!(resolver.services("").unwrap().namespace(), "Shop.Services");
        assert_eq!(resolver.exceptions("").unwrap().namespace(), "SharedKernel.Exceptions");
        assert_eq!(
            resolver.test_fakes("Customer", "").unwrap().namespace(),
            "Shop.SharedTestHelpers.Fakes.Customer"
        );
        assert_eq!(
            resolver.unit_test_entity("").unwrap().namespace(),
            "Shop.UnitTests.UnitTests.Domain.Orders"
        );
    }

    #[test]
    fn artifact_paths_match_explicit_helpers() {
        let (ctx, entity) = (context(), order());
        let resolver = Resolver::new(&ctx, &entity);

        assert_eq!(
            resolver.artifact(ArtifactKind::DeleteFeature).unwrap(),
            resolver.features("DeleteOrder.cs").unwrap()
        );
        assert_eq!(
            resolver.artifact(ArtifactKind::CreationDtoFaker).unwrap(),
            resolver.test_fakes("Order", "FakeOrderForCreationDto.cs").unwrap()
        );
    }

    #[test]
    fn dotted_base_name_is_accepted() {
        let ctx = GenerationContext::new("/sln", "/sln/src", "/sln/tests", "Acme.Shop");
        let entity = order();
        let path = Resolver::new(&ctx, &entity).features("").unwrap();
        assert_eq!(path.namespace(), "Acme.Shop.Domain.Orders.Features");
    }

    #[test]
    fn empty_root_is_unresolvable() {
        let ctx = GenerationContext::new("/sln", "/sln/src", "", "Shop");
        let entity = order();
        let err = Resolver::new(&ctx, &entity)
            .artifact(ArtifactKind::DeleteCommandTest)
            .unwrap_err();

        match err {
            DomainError::UnresolvableName { entity, artifact, reason } => {
                assert_eq!(entity, "Order");
                assert_eq!(artifact, "DeleteOrderCommandTests.cs");
                assert!(reason.contains("test"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn invalid_base_name_is_unresolvable() {
        for base in ["", "  ", "My Shop", "Shop..Api"] {
            let ctx = GenerationContext::new("/sln", "/sln/src", "/sln/tests", base);
            let entity = order();
            assert!(
                matches!(
                    Resolver::new(&ctx, &entity).features("DeleteOrder.cs"),
                    Err(DomainError::UnresolvableName { .. })
                ),
                "base name {base:?} should be rejected"
            );
        }
    }
}

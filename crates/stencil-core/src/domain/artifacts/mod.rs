//! Artifact template functions.
//!
//! One module per artifact family. Every template takes a [`Resolver`] and
//! returns the full text of one file or an error; none of them perform I/O.
//! [`render`] is the single dispatch point used by the application layer.

pub mod delete_feature;
pub mod fakers;
pub mod parents;

use crate::domain::{
    entities::{Entity, GenerationContext},
    error::DomainError,
    resolver::Resolver,
    value_objects::{ArtifactKind, FeatureFlags},
};

/// Render the artifact of `kind` for `entity`.
pub fn render(
    kind: ArtifactKind,
    entity: &Entity,
    context: &GenerationContext,
    flags: &FeatureFlags,
) -> Result<String, DomainError> {
    let resolver = Resolver::new(context, entity);
    match kind {
        ArtifactKind::DeleteFeature => delete_feature::render(&resolver, flags),
        ArtifactKind::DeleteCommandTest => delete_command_test::render(&resolver, flags),
        ArtifactKind::UpdateEntityTest => update_entity_test::render(&resolver, flags),
        ArtifactKind::EntityFaker => fakers::render_entity_faker(&resolver),
        ArtifactKind::CreationDtoFaker => fakers::render_creation_dto_faker(&resolver),
        ArtifactKind::UpdateDtoFaker => fakers::render_update_dto_faker(&resolver),
    }
}

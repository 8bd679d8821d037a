//! Test-data fakers shared by the generated test suites.
//!
//! All three live in the entity's folder under `SharedTestHelpers/Fakes`,
//! which is the namespace the delete and update tests import.

use crate::domain::{
    composition::SourceSkeleton,
    error::DomainError,
    naming,
    resolver::Resolver,
    value_objects::{ArtifactKind, DtoKind},
};

/// `Fake{Name}`: builds entities through the domain factory.
pub fn render_entity_faker(resolver: &Resolver<'_>) -> Result<String, DomainError> {
    let entity = resolver.entity();
    let class_path = resolver.artifact(ArtifactKind::EntityFaker)?;
    let entity_class = resolver.entity_class("")?;
    let dtos = resolver.dtos("")?;

    let name = entity.name();
    let creation_dto = naming::dto_name(name, DtoKind::Creation);
    let fake_creation_dto = naming::faker_name(&creation_dto);
    let parameter = naming::lowercase_first_letter(&creation_dto);

    let body = format!(
        r#"    public static {name} Generate({creation_dto} {parameter})
    {{
        return {name}.Create({parameter});
    }}

    public static {name} Generate()
    {{
        return {name}.Create(new {fake_creation_dto}().Generate());
    }}"#
    );

    Ok(SourceSkeleton::new(
        class_path.namespace(),
        format!("public class {}", class_path.class_name()),
    )
    .using(entity_class.namespace())
    .using(dtos.namespace())
    .body(body)
    .render())
}

pub fn render_creation_dto_faker(resolver: &Resolver<'_>) -> Result<String, DomainError> {
    render_dto_faker(resolver, ArtifactKind::CreationDtoFaker, DtoKind::Creation)
}

pub fn render_update_dto_faker(resolver: &Resolver<'_>) -> Result<String, DomainError> {
    render_dto_faker(resolver, ArtifactKind::UpdateDtoFaker, DtoKind::Update)
}

/// `AutoFaker<{Dto}>` with foreign keys left for the seeding tests to set.
fn render_dto_faker(
    resolver: &Resolver<'_>,
    kind: ArtifactKind,
    dto: DtoKind,
) -> Result<String, DomainError> {
    let entity = resolver.entity();
    let class_path = resolver.artifact(kind)?;
    let dtos = resolver.dtos("")?;

    let class_name = class_path.class_name();
    let dto_name = naming::dto_name(entity.name(), dto);
    let l = entity.lambda();

    let rules = entity
        .properties()
        .iter()
        .filter(|p| p.is_foreign_key())
        .map(|p| {
            format!(
                "        RuleFor({l} => {l}.{}, _ => default({}));",
                p.name(),
                p.ty().csharp_name()
            )
        })
        .collect::<Vec<_>>();

    let constructor = if rules.is_empty() {
        format!("    public {class_name}()\n    {{\n    }}")
    } else {
        format!(
            "    public {class_name}()\n    {{\n{}\n    }}",
            rules.join("\n")
        )
    };

    Ok(SourceSkeleton::new(
        class_path.namespace(),
        format!("public sealed class {class_name} : AutoFaker<{dto_name}>"),
    )
    .using("AutoBogus")
    .using(dtos.namespace())
    .body(constructor)
    .render())
}

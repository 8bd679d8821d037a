//! The delete feature: a MediatR command record plus its handler.
//!
//! Protection is the only switch. A protected feature injects
//! `IHeimGuardClient` and checks the permission before touching the
//! repository; an open one has no trace of either.

use crate::domain::{
    composition::SourceSkeleton,
    error::DomainError,
    naming,
    resolver::Resolver,
    value_objects::{ArtifactKind, FeatureFlags},
};

const UNIT_OF_WORK: &str = "IUnitOfWork";

pub fn render(resolver: &Resolver<'_>, flags: &FeatureFlags) -> Result<String, DomainError> {
    let entity = resolver.entity();
    let class_path = resolver.artifact(ArtifactKind::DeleteFeature)?;
    let entity_services = resolver.entity_services("")?;
    let services = resolver.services("")?;
    let exceptions = resolver.exceptions("")?;

    let pk = entity.primary_key();
    let command = naming::command_name();
    let repository = naming::repository_interface_name(entity.name());
    let repository_field = format!("_{}Repository", entity.variable_name());
    let permission = flags.effective_permission("Delete", entity.plural());

    // (type, parameter) pairs injected into the handler, in constructor order.
    let mut dependencies = vec![
        (repository, format!("{}Repository", entity.variable_name())),
        (UNIT_OF_WORK.to_string(), "unitOfWork".to_string()),
    ];
    if permission.is_some() {
        dependencies.push(("IHeimGuardClient".to_string(), "heimGuard".to_string()));
    }

    let fields = dependencies
        .iter()
        .map(|(ty, name)| format!("        private readonly {ty} _{name};"))
        .collect::<Vec<_>>()
        .join("\n");
    let parameters = dependencies
        .iter()
        .map(|(ty, name)| format!("{ty} {name}"))
        .collect::<Vec<_>>()
        .join(", ");
    let assignments = dependencies
        .iter()
        .map(|(_, name)| format!("            _{name} = {name};"))
        .collect::<Vec<_>>()
        .join("\n");
    let guard = permission
        .as_deref()
        .map(|permission| {
            format!(
                "            await _heimGuard.MustHavePermission<ForbiddenAccessException>(Permissions.{permission});\n\n"
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"    public sealed record {command}({pk_type} {pk_name}) : IRequest;

    public sealed class Handler : IRequestHandler<{command}>
    {{
{fields}

        public Handler({parameters})
        {{
{assignments}
        }}

        public async Task Handle({command} request, CancellationToken cancellationToken)
        {{
{guard}            var recordToDelete = await {repository_field}.GetById(request.{pk_name}, cancellationToken: cancellationToken);
            {repository_field}.Remove(recordToDelete);
            await _unitOfWork.CommitChanges(cancellationToken);
        }}
    }}"#,
        pk_type = pk.ty().csharp_name(),
        pk_name = pk.name(),
    );

    let mut skeleton = SourceSkeleton::new(
        class_path.namespace(),
        format!("public static class {}", class_path.class_name()),
    )
    .using(entity_services.namespace())
    .using(services.namespace())
    .using(exceptions.namespace());
    if permission.is_some() {
        skeleton = skeleton.using("HeimGuard");
    }

    Ok(skeleton.using("MediatR").body(body).render())
}

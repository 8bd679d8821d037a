//! Implementation of the `stencil list` command.

use serde::Serialize;

use stencil_core::domain::{ArtifactKind, naming};

use crate::{
    cli::ListArgs,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct KindRow {
    kind: &'static str,
    file: String,
    description: &'static str,
}

pub fn execute(args: ListArgs, output: OutputManager) -> CliResult<()> {
    let entity = match args.entity {
        Some(name) if !naming::is_identifier(name.trim()) => {
            return Err(CliError::InvalidInput {
                message: format!("'{name}' is not a valid entity name"),
            });
        }
        Some(name) => naming::pascal_identifier(&name),
        None => "{Name}".to_string(),
    };

    let rows = rows(&entity);

    if output.is_json() {
        output.json(&rows)?;
        return Ok(());
    }

    output.header("Artifact kinds:")?;
    for row in &rows {
        output.print(&format!(
            "  {:<22} {:<36} {}",
            row.kind, row.file, row.description
        ))?;
    }
    Ok(())
}

fn rows(entity: &str) -> Vec<KindRow> {
    ArtifactKind::all()
        .into_iter()
        .map(|kind| KindRow {
            kind: kind.as_str(),
            file: kind.file_name(entity),
            description: kind.description(),
        })
        .collect()
}

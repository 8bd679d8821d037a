//! Implementation of the `stencil generate` command.
//!
//! Responsibility: load the manifest, resolve the generation context, run
//! the core generation service and report per-artifact outcomes. No
//! business logic lives here.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use stencil_adapters::{LoadedDomain, LocalFilesystem, ProjectSection, RejectedEntity, load_domain};
use stencil_core::{
    application::{ArtifactOutcome, GenerationReport, GenerationService},
    domain::{ArtifactKind, GenerationContext},
    error::StencilError,
};

use crate::{
    cli::GenerateArgs,
    config::AppConfig,
    error::{CliError, CliResult, ErrorCategory, IntoCli},
    output::OutputManager,
};

/// Execute the `stencil generate` command.
///
/// 1. Load the manifest (syntax errors abort; bad entities are rejected)
/// 2. Resolve roots and project name: flags, then manifest, then config
/// 3. Generate (or plan, with `--dry-run`) every requested kind
/// 4. Print the summary and fail if anything failed
#[instrument(skip_all, fields(manifest = %args.domain_file.display()))]
pub fn execute(args: GenerateArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let domain = load_domain(&args.domain_file).with_cli_context(|| "loading domain manifest")?;
    let manifest_dir = manifest_directory(&args.domain_file)?;
    let context = resolve_context(&args, &domain.project, &config, &manifest_dir)?;
    let kinds = requested_kinds(&args.only);

    debug!(
        solution = %context.solution_directory.display(),
        src = %context.src_directory.display(),
        test = %context.test_directory.display(),
        project = %context.project_base_name,
        kinds = kinds.len(),
        "Context resolved"
    );

    let service = GenerationService::new(Box::new(LocalFilesystem::new()));
    let report = if args.dry_run {
        service.dry_run(&domain.definitions, &context, &kinds)
    } else {
        service.generate_batch(&domain.definitions, &context, &kinds)
    };

    info!(
        run_id = %report.run_id,
        written = report.written_count(),
        failed = report.failed_count(),
        rejected = domain.rejected.len(),
        "Generation finished"
    );

    if output.is_json() {
        output.json(&Summary::new(&report, &domain))?;
    } else {
        print_report(&report, &domain.rejected, &output)?;
    }

    outcome(&report, &domain.rejected)
}

// ── Context resolution ────────────────────────────────────────────────────────

/// Directory manifest-relative paths are resolved against.
fn manifest_directory(manifest: &Path) -> CliResult<PathBuf> {
    match manifest.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(dir) => Ok(dir.to_path_buf()),
        None => std::env::current_dir().with_cli_context(|| "resolving the working directory"),
    }
}

/// Build the context. Each value comes from the first source that has it:
/// CLI flag, manifest `[project]`, config `[defaults]`. The solution falls
/// back to the manifest's directory and the project name to the solution
/// directory's name.
fn resolve_context(
    args: &GenerateArgs,
    project: &ProjectSection,
    config: &AppConfig,
    manifest_dir: &Path,
) -> CliResult<GenerationContext> {
    let pick = |flag: &Option<PathBuf>, manifest: &Option<PathBuf>, configured: &Option<PathBuf>| {
        flag.clone()
            .or_else(|| manifest.as_ref().map(|p| manifest_dir.join(p)))
            .or_else(|| configured.clone())
    };

    let solution = pick(&args.solution, &project.solution, &config.defaults.solution)
        .unwrap_or_else(|| manifest_dir.to_path_buf());
    let src = pick(&args.src, &project.src, &config.defaults.src)
        .unwrap_or_else(|| solution.join("src"));
    let test = pick(&args.test, &project.test, &config.defaults.test)
        .unwrap_or_else(|| solution.join("tests"));

    let name = args
        .project
        .clone()
        .or_else(|| project.name.clone())
        .or_else(|| config.defaults.project.clone())
        .or_else(|| {
            solution
                .file_name()
                .and_then(|n| n.to_str())
                .map(str::to_string)
        })
        .filter(|n| !n.trim().is_empty())
        .ok_or_else(|| CliError::InvalidInput {
            message: "no project name: pass --project or set [project].name in the manifest"
                .into(),
        })?;

    Ok(GenerationContext::new(solution, src, test, name))
}

/// Every kind when `--only` is absent; otherwise the given kinds, once each,
/// in generation order.
fn requested_kinds(only: &[ArtifactKind]) -> Vec<ArtifactKind> {
    if only.is_empty() {
        return ArtifactKind::all().to_vec();
    }
    let mut kinds = only.to_vec();
    kinds.sort();
    kinds.dedup();
    kinds
}

// ── Reporting ─────────────────────────────────────────────────────────────────

fn print_report(
    report: &GenerationReport,
    rejected: &[RejectedEntity],
    output: &OutputManager,
) -> CliResult<()> {
    let verb = if report.dry_run { "Would write" } else { "Wrote" };
    if report.dry_run {
        output.info("Dry run: nothing will be written")?;
    }
    if report.entities.is_empty() && rejected.is_empty() {
        output.info("The manifest declares no entities")?;
    }

    for entity in &report.entities {
        output.header(&entity.entity)?;
        if let Some(error) = &entity.skipped {
            output.error(&format!("skipped: {error}"))?;
            continue;
        }
        for artifact in &entity.artifacts {
            match artifact {
                ArtifactOutcome::Written { path, .. } | ArtifactOutcome::Planned { path, .. } => {
                    output.success(&format!("{verb} {}", path.display()))?;
                }
                ArtifactOutcome::Failed { kind, error } => {
                    output.error(&format!("{kind}: {error}"))?;
                }
            }
        }
    }

    for entity in rejected {
        output.error(&format!("{} rejected: {}", entity.name, entity.error))?;
    }

    let done = if report.dry_run {
        report.planned_count()
    } else {
        report.written_count()
    };
    let failures = report.failures().len() + rejected.len();
    let summary = format!(
        "{done} file(s) {}, {failures} failure(s)",
        if report.dry_run { "planned" } else { "written" }
    );
    if failures == 0 {
        output.success(&summary)?;
    } else {
        output.warning(&summary)?;
    }
    Ok(())
}

/// Non-zero exit when anything failed, using the most severe category seen.
fn outcome(report: &GenerationReport, rejected: &[RejectedEntity]) -> CliResult<()> {
    let failures = report.failures();
    let failed = failures.len() + rejected.len();
    if failed == 0 {
        return Ok(());
    }

    let rejected_category = (!rejected.is_empty()).then_some(ErrorCategory::Configuration);
    let category = failures
        .iter()
        .map(|(_, _, error)| ErrorCategory::from(error.category()))
        .chain(rejected_category)
        .max()
        .unwrap_or(ErrorCategory::Internal);

    Err(CliError::GenerationFailed { failed, category })
}

// ── JSON summary ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Summary<'a> {
    run_id: String,
    dry_run: bool,
    written: usize,
    planned: usize,
    paths: Vec<&'a Path>,
    failures: Vec<FailureLine>,
}

#[derive(Debug, Serialize)]
struct FailureLine {
    entity: String,
    artifact: Option<&'static str>,
    error: String,
}

impl<'a> Summary<'a> {
    fn new(report: &'a GenerationReport, domain: &LoadedDomain) -> Self {
        let paths = report
            .entities
            .iter()
            .flat_map(|e| &e.artifacts)
            .filter_map(|outcome| match outcome {
                ArtifactOutcome::Written { path, .. } | ArtifactOutcome::Planned { path, .. } => {
                    Some(path.as_path())
                }
                ArtifactOutcome::Failed { .. } => None,
            })
            .collect();

        let mut failures: Vec<FailureLine> = report
            .failures()
            .into_iter()
            .map(|(entity, kind, error)| FailureLine::new(entity, kind, error))
            .collect();
        failures.extend(domain.rejected.iter().map(|r| FailureLine {
            entity: r.name.clone(),
            artifact: None,
            error: r.error.to_string(),
        }));

        Self {
            run_id: report.run_id.to_string(),
            dry_run: report.dry_run,
            written: report.written_count(),
            planned: report.planned_count(),
            paths,
            failures,
        }
    }
}

impl FailureLine {
    fn new(entity: &str, kind: Option<ArtifactKind>, error: &StencilError) -> Self {
        Self {
            entity: entity.to_string(),
            artifact: kind.map(|k| k.as_str()),
            error: error.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::{Cli, Commands};

    fn args(extra: &[&str]) -> GenerateArgs {
        let argv = ["stencil", "generate", "domain.toml"]
            .into_iter()
            .chain(extra.iter().copied());
        match Cli::parse_from(argv).command {
            Commands::Generate(args) => args,
            other => panic!("expected Generate, got {other:?}"),
        }
    }

    fn manifest_project() -> ProjectSection {
        ProjectSection {
            name: Some("Shop".into()),
            solution: Some(PathBuf::from("Shop")),
            src: None,
            test: None,
        }
    }

    #[test]
    fn manifest_paths_are_relative_to_the_manifest() {
        let ctx = resolve_context(
            &args(&[]),
            &manifest_project(),
            &AppConfig::default(),
            Path::new("/work"),
        )
        .unwrap();

        assert_eq!(ctx.solution_directory, PathBuf::from("/work/Shop"));
        assert_eq!(ctx.src_directory, PathBuf::from("/work/Shop/src"));
        assert_eq!(ctx.test_directory, PathBuf::from("/work/Shop/tests"));
        assert_eq!(ctx.project_base_name, "Shop");
    }

    #[test]
    fn flags_override_manifest_and_config() {
        let mut config = AppConfig::default();
        config.defaults.project = Some("FromConfig".into());
        config.defaults.src = Some(PathBuf::from("/config/src"));

        let ctx = resolve_context(
            &args(&["--solution", "/flag", "--project", "Acme.Shop"]),
            &manifest_project(),
            &config,
            Path::new("/work"),
        )
        .unwrap();

        assert_eq!(ctx.solution_directory, PathBuf::from("/flag"));
        assert_eq!(ctx.src_directory, PathBuf::from("/config/src"));
        assert_eq!(ctx.test_directory, PathBuf::from("/flag/tests"));
        assert_eq!(ctx.project_base_name, "Acme.Shop");
    }

    #[test]
    fn project_name_falls_back_to_solution_directory() {
        let ctx = resolve_context(
            &args(&[]),
            &ProjectSection::default(),
            &AppConfig::default(),
            Path::new("/work/Billing"),
        )
        .unwrap();

        assert_eq!(ctx.solution_directory, PathBuf::from("/work/Billing"));
        assert_eq!(ctx.project_base_name, "Billing");
    }

    #[test]
    fn missing_project_name_is_user_error() {
        let err = resolve_context(
            &args(&[]),
            &ProjectSection::default(),
            &AppConfig::default(),
            Path::new("/"),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn requested_kinds_default_to_all_and_dedup() {
        assert_eq!(requested_kinds(&[]), ArtifactKind::all().to_vec());
        assert_eq!(
            requested_kinds(&[
                ArtifactKind::UpdateDtoFaker,
                ArtifactKind::DeleteFeature,
                ArtifactKind::UpdateDtoFaker
            ]),
            vec![ArtifactKind::DeleteFeature, ArtifactKind::UpdateDtoFaker]
        );
    }

    #[test]
    fn manifest_directory_of_bare_file_is_cwd() {
        let dir = manifest_directory(Path::new("domain.toml")).unwrap();
        assert_eq!(dir, std::env::current_dir().unwrap());
        let dir = manifest_directory(Path::new("/work/domain.toml")).unwrap();
        assert_eq!(dir, PathBuf::from("/work"));
    }
}

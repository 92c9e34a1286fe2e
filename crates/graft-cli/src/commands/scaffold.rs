//! Implementation of the `graft scaffold query` command.
//!
//! Responsibility: resolve the app root and module path, turn the arguments
//! into an `OperationDescriptor`, plan with the core scaffold service, and
//! show or apply the plan.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use graft_adapters::{LocalFilesystem, SimpleRenderer};
use graft_core::{
    application::{ScaffoldPlan, ScaffoldService, TemplateService},
    domain::{FieldList, OperationDescriptor},
};

use crate::{
    cli::{GlobalArgs, QueryArgs},
    commands::template_source,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::{JsonEnvelope, OutputManager},
};

const GO_MOD: &str = "go.mod";

/// Execute `graft scaffold query`.
///
/// 1. Resolve app root, module and module path
/// 2. Build the operation descriptor (field parsing + validation)
/// 3. Plan every edit in memory
/// 4. `--dry-run`: print the plan and stop
/// 5. Confirm unless `--yes`, `--quiet` or non-interactive
/// 6. Apply the plan
#[instrument(skip_all, fields(query = %args.name))]
pub fn execute(
    args: QueryArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let root = app_root(&args, &config);
    let op = build_operation(&args, &config, &root)?;

    debug!(
        operation = %op,
        root = %root.display(),
        paginated = op.paginated(),
        "Operation resolved"
    );

    let bundle = TemplateService::new(template_source(&config)).load()?;
    let events = output.events();
    let service = ScaffoldService::new(
        bundle,
        Box::new(SimpleRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(events.clone()),
    )
    .with_layout(config.layout.clone());

    let plan = service.plan(&op)?;
    events.clear();

    if args.dry_run {
        return show_plan(&plan, &output, global.verbose > 0, true);
    }

    if needs_confirmation(&args, &global, &output) {
        show_plan(&plan, &output, false, false)?;
        if !confirm(&format!("Write {} files?", plan.file_count()))? {
            return Err(CliError::Cancelled);
        }
    }

    info!(run_id = %plan.run_id, files = plan.file_count(), "Applying plan");
    let report = service.apply(&plan)?;

    if output.is_json() {
        return output.json(&JsonEnvelope::new("scaffold", &report));
    }

    output.success(&format!(
        "Query '{}' scaffolded in {}",
        op.name().upper_camel(),
        report.root.display()
    ))?;
    Ok(())
}

// ── resolution ────────────────────────────────────────────────────────────────

fn app_root(args: &QueryArgs, config: &AppConfig) -> PathBuf {
    args.path
        .clone()
        .or_else(|| config.defaults.path.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn build_operation(
    args: &QueryArgs,
    config: &AppConfig,
    root: &Path,
) -> CliResult<OperationDescriptor> {
    let module = args
        .module
        .clone()
        .or_else(|| config.defaults.module.clone())
        .ok_or_else(|| CliError::InvalidInput {
            message: "no module given; pass --module or set [defaults] module".into(),
            source: None,
        })?;

    let module_path = match &args.module_path {
        Some(path) => path.clone(),
        None => read_module_path(root)?,
    };
    let app = app_name(&module_path).ok_or_else(|| CliError::InvalidInput {
        message: format!("cannot derive an app name from module path '{module_path}'"),
        source: None,
    })?;

    let request =
        FieldList::parse(&args.req_fields, "request").map_err(|e| CliError::Core(e.into()))?;
    let response =
        FieldList::parse(&args.response, "response").map_err(|e| CliError::Core(e.into()))?;

    let mut builder = OperationDescriptor::builder()
        .name(args.name.as_str())
        .module(module)
        .app(app)
        .module_path(module_path)
        .app_path(root)
        .request_fields(request)
        .response_fields(response)
        .paginated(args.paginated);
    if let Some(desc) = &args.desc {
        builder = builder.description(desc.as_str());
    }

    builder.build().map_err(|e| CliError::Core(e.into()))
}

/// Module path from the `module` directive of `<root>/go.mod`.
fn read_module_path(root: &Path) -> CliResult<String> {
    let path = root.join(GO_MOD);
    if !path.is_file() {
        return Err(CliError::ModuleFileMissing { path });
    }
    let content = fs::read_to_string(&path).with_cli_context(|| format!("reading {}", path.display()))?;
    parse_module_directive(&content).ok_or(CliError::ModuleDirectiveMissing { path })
}

fn parse_module_directive(content: &str) -> Option<String> {
    content.lines().find_map(|line| {
        let rest = line.trim().strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.split("//").next()?.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_string())
    })
}

/// Last segment of a module path, skipping a major version suffix:
/// `github.com/alice/myapp/v2` names the app `myapp`.
fn app_name(module_path: &str) -> Option<String> {
    let mut segments = module_path.rsplit('/').filter(|s| !s.is_empty());
    let last = segments.next()?;
    let is_version = last.len() > 1
        && last.starts_with('v')
        && last[1..].chars().all(|c| c.is_ascii_digit());
    let name = if is_version { segments.next()? } else { last };
    Some(name.to_string())
}

// ── presentation ──────────────────────────────────────────────────────────────

/// `--dry-run --output-format json` body.
#[derive(Debug, Serialize)]
struct PlanView<'a> {
    dry_run: bool,
    run_id: Uuid,
    operation: &'a str,
    root: &'a Path,
    bundle: &'a str,
    fingerprint: &'a str,
    modified: Vec<&'a str>,
    created: Vec<&'a str>,
}

impl<'a> From<&'a ScaffoldPlan> for PlanView<'a> {
    fn from(plan: &'a ScaffoldPlan) -> Self {
        Self {
            dry_run: true,
            run_id: plan.run_id,
            operation: &plan.operation,
            root: &plan.root,
            bundle: &plan.bundle,
            fingerprint: &plan.fingerprint,
            modified: plan.modified.iter().map(|e| e.path.as_str()).collect(),
            created: plan.created.iter().map(|f| f.path.as_str()).collect(),
        }
    }
}

fn show_plan(
    plan: &ScaffoldPlan,
    out: &OutputManager,
    with_content: bool,
    dry_run: bool,
) -> CliResult<()> {
    if dry_run && out.is_json() {
        return out.json(&JsonEnvelope::new("scaffold", PlanView::from(plan)));
    }

    if dry_run {
        out.info(&format!(
            "Dry run: would scaffold {} in {}",
            plan.operation,
            plan.root.display()
        ))?;
    } else {
        out.header(&format!("Scaffolding {}", plan.operation))?;
    }
    out.detail(&format!(
        "  templates: {} ({})",
        plan.bundle,
        &plan.fingerprint[..plan.fingerprint.len().min(12)]
    ))?;

    for edit in &plan.modified {
        out.print(&format!("  ~ {} (+{} bytes)", edit.path, edit.added))?;
    }
    for file in &plan.created {
        out.print(&format!("  + {}", file.path))?;
        if with_content {
            for line in file.content.lines() {
                out.detail(&format!("      {line}"))?;
            }
        }
    }
    out.print("")?;
    Ok(())
}

fn needs_confirmation(args: &QueryArgs, global: &GlobalArgs, out: &OutputManager) -> bool {
    use std::io::IsTerminal;

    !(args.yes || global.quiet || out.is_json() || !std::io::stdin().is_terminal())
}

#[cfg(feature = "interactive")]
fn confirm(prompt: &str) -> CliResult<bool> {
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::InvalidInput {
            message: "failed to read confirmation".into(),
            source: Some(Box::new(e)),
        })
}

#[cfg(not(feature = "interactive"))]
fn confirm(_prompt: &str) -> CliResult<bool> {
    Err(CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn module_directive_is_found_after_comments() {
        let go_mod = "// generated\nmodule github.com/alice/myapp\n\ngo 1.21\n";
        assert_eq!(
            parse_module_directive(go_mod).as_deref(),
            Some("github.com/alice/myapp")
        );
    }

    #[test]
    fn module_directive_allows_quotes_and_trailing_comment() {
        let go_mod = "module \"example.com/chain\" // main module\n";
        assert_eq!(
            parse_module_directive(go_mod).as_deref(),
            Some("example.com/chain")
        );
    }

    #[test]
    fn module_prefixed_words_are_not_directives() {
        assert_eq!(parse_module_directive("modules x\n"), None);
        assert_eq!(parse_module_directive("go 1.21\n"), None);
    }

    #[test]
    fn app_name_is_last_segment() {
        assert_eq!(app_name("github.com/alice/myapp").as_deref(), Some("myapp"));
        assert_eq!(app_name("myapp").as_deref(), Some("myapp"));
    }

    #[test]
    fn app_name_skips_major_version() {
        assert_eq!(app_name("github.com/alice/myapp/v2").as_deref(), Some("myapp"));
        assert_eq!(app_name("github.com/alice/v").as_deref(), Some("v"));
    }

    #[test]
    fn app_name_of_empty_path_is_none() {
        assert_eq!(app_name(""), None);
        assert_eq!(app_name("v3"), None);
    }

    #[test]
    fn missing_go_mod_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_module_path(dir.path()).unwrap_err();

        assert!(matches!(err, CliError::ModuleFileMissing { ref path } if path.ends_with(GO_MOD)));
        assert_eq!(err.exit_code(), 2);
    }
}

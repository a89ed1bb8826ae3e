//! Check command: validate the project config and scan sources for
//! diagnostic calls.
//!
//! Packaged builds drop `console.*` calls and `debugger` statements. The scan
//! shows which sites go away, which take side-effecting arguments with them,
//! and which declared-pure calls the minifier has to keep.

use std::path::PathBuf;

use shellpack_config::{ProductionOptimizer, WatchFilter, validate_schema};
use shellpack_graph::{DiagnosticScanner, GraphError, collect_sources};

use crate::cli::CheckArgs;
use crate::commands::utils::{Context, Overrides, resolve_path};
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the check command.
///
/// # Errors
///
/// Fails on an invalid project config, a missing path, sources that do not
/// parse, or (with `--strict`) any retained diagnostic site or removed call
/// whose arguments had side effects.
pub fn execute(ctx: &Context, args: CheckArgs) -> Result<()> {
    let project = ctx.load_project(&Overrides::default())?;
    validate_schema(&project)?;
    ui::success("Configuration is valid");

    let filter = WatchFilter::new(project.foreign_dirs.iter().cloned())?;
    let build = ProductionOptimizer::from_project(&project).optimize();
    let scanner = DiagnosticScanner::new(build.compression_options);

    let sources = gather_sources(ctx, &args.paths, &filter)?;
    if sources.is_empty() {
        ui::warning("No JavaScript, TypeScript or Vue sources found");
        return Ok(());
    }
    ui::info(&format!("Scanning {} source file(s)...", sources.len()));

    let mut removed = 0usize;
    let mut lost = 0usize;
    let mut retained = 0usize;
    let mut failed = 0usize;
    for path in &sources {
        match scanner.scan_file(path) {
            Ok(report) => {
                removed += report.removed().count();
                lost += report.side_effects_lost().count();
                retained += report.retained().count();
                ui::print_check_report(&report, &ctx.cwd);
            }
            Err(err @ GraphError::Parse { .. }) => {
                failed += 1;
                ui::warning(&err.to_string());
            }
            Err(err) => return Err(err.into()),
        }
    }

    if failed > 0 {
        return Err(CliError::Hinted {
            message: format!("{failed} source file(s) failed to parse"),
            hint: "Fix the syntax errors above; the minifier would reject these files too".to_string(),
        });
    }

    ui::success(&format!("{removed} diagnostic site(s) removed, {retained} retained"));
    if lost > 0 {
        ui::warning(&format!(
            "{lost} removed console call(s) had side-effecting arguments that will not run in the packaged build"
        ));
    }

    if args.strict && (retained > 0 || lost > 0) {
        return Err(CliError::Hinted {
            message: format!(
                "{retained} diagnostic site(s) would survive minification, {lost} would drop side effects"
            ),
            hint: "Hoist side-effecting work out of console calls, and keep declared-pure calls as plain statements"
                .to_string(),
        });
    }
    Ok(())
}

fn gather_sources(ctx: &Context, paths: &[PathBuf], filter: &WatchFilter) -> Result<Vec<PathBuf>> {
    let roots: Vec<PathBuf> = if paths.is_empty() {
        vec![ctx.cwd.clone()]
    } else {
        paths.iter().map(|path| resolve_path(path, &ctx.cwd)).collect()
    };

    let mut sources = Vec::new();
    for root in roots {
        if !root.exists() {
            return Err(CliError::FileNotFound(root));
        }
        sources.extend(collect_sources(&root, Some(filter)));
    }
    sources.sort();
    sources.dedup();
    Ok(sources)
}

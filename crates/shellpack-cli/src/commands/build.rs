//! Build command: resolve the production build and verify manual chunks.

use shellpack_graph::{DependencyGraph, GraphError, PackageJson};

use crate::cli::BuildArgs;
use crate::commands::utils::{Context, Overrides, resolve_path};
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Resolve the production settings and check every chunk module against the
/// project's dependency graph.
///
/// # Errors
///
/// Fails with a module resolution error naming the chunk and module when a
/// declared chunk references something `package.json` does not provide.
pub fn execute(ctx: &Context, args: BuildArgs) -> Result<()> {
    let overrides = Overrides {
        report_compressed_size: args.report_compressed_size.then_some(true),
        ..Overrides::default()
    };
    let config = ctx.resolve(&overrides)?;
    let build = &config.build;
    build.validate()?;

    let manifest = match &args.package {
        Some(path) => {
            let path = resolve_path(path, &ctx.cwd);
            if !path.is_file() {
                return Err(CliError::FileNotFound(path));
            }
            PackageJson::from_path(&path)?
        }
        None => PackageJson::find_from_dir(&ctx.cwd)
            .with_hint("Run from the frontend project, or pass --package <path>")?,
    };
    let graph = DependencyGraph::from_package_json(&manifest);

    // Name every unresolved module, then fail on the first.
    let unresolved = graph.unresolved(&build.chunking_strategy);
    if let Some((first, rest)) = unresolved.split_first() {
        for module in rest {
            ui::error(&format!(
                "chunk '{}' also references unresolved module '{}'",
                module.chunk, module.module
            ));
        }
        return Err(GraphError::from(first.clone()).into());
    }
    let chunks = graph.resolve_chunks(&build.chunking_strategy)?;

    ui::print_build_summary(build, &chunks);
    ui::success(&format!(
        "{} chunk(s), {} module(s) resolved against {}",
        chunks.len(),
        build.chunking_strategy.module_count(),
        manifest.path.display()
    ));
    Ok(())
}

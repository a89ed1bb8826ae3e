//! Dev command: resolve the dev server binding and hold its ports to account.
//!
//! The dev server itself belongs to the external runtime. This command makes
//! sure the fixed port the desktop shell loads is free, prints where the
//! frontend and HMR endpoint will be, and with `--watch` reports which file
//! changes get past the watch filter until Ctrl+C.

use shellpack_config::{DEV_HOST_VAR, Environment, ProcessEnv, ensure_ports_available};
use tokio::signal;

use crate::cli::DevArgs;
use crate::commands::utils::{Context, Overrides};
use crate::dev::FileWatcher;
use crate::error::{Result, ResultExt};
use crate::ui;

pub async fn execute(ctx: &Context, args: DevArgs) -> Result<()> {
    let overrides = Overrides {
        port: args.port,
        ..Overrides::default()
    };
    let config = ctx.resolve(&overrides)?;
    let server = &config.server;

    if ProcessEnv.var(DEV_HOST_VAR).is_some_and(|host| host.is_empty()) {
        ui::warning(&format!("{DEV_HOST_VAR} is empty, binding locally"));
    }

    if args.skip_port_check {
        tracing::debug!("port probe skipped");
    } else {
        ensure_ports_available(server).context("Dev server port check failed")?;
        ui::success(&format!("Port {} is free", server.port));
    }

    ui::print_server_summary(server);

    if !args.watch {
        return Ok(());
    }

    let filter = config.watch_filter()?;
    let (watcher, mut changes) = FileWatcher::new(ctx.cwd.clone(), filter, args.debounce_ms)?;
    ui::info(&format!(
        "Watching {} ({} directories, Ctrl+C to stop)",
        watcher.root().display(),
        watcher.watched_dirs()
    ));

    loop {
        tokio::select! {
            change = changes.recv() => {
                let Some(change) = change else { break };
                let path = change.path();
                let shown = path.strip_prefix(&ctx.cwd).unwrap_or(path);
                tracing::info!(kind = change.kind(), path = %shown.display(), "change");
            }
            result = signal::ctrl_c() => {
                result?;
                break;
            }
        }
    }

    ui::info("Stopped watching");
    Ok(())
}

//! Multi-line summaries for command results.

use owo_colors::OwoColorize;
use shellpack_config::{DevServerConfig, ProductionBuildConfig};
use shellpack_graph::{ResolvedChunk, StripReport};

use super::colors_enabled;

fn label(text: &str) -> String {
    if colors_enabled() {
        text.bold().to_string()
    } else {
        text.to_string()
    }
}

/// Dev server URL, HMR endpoint and watch exclusions.
pub fn print_server_summary(server: &DevServerConfig) {
    eprintln!();
    eprintln!("  {}  {}", label("Local:"), server.url());
    match &server.hmr {
        Some(hmr) => eprintln!("  {}    {}", label("HMR:"), hmr.url()),
        None => eprintln!("  {}    same origin", label("HMR:")),
    }
    if server.watch_exclusions.is_empty() {
        eprintln!("  {} nothing excluded", label("Watch:"));
    } else {
        eprintln!(
            "  {}  ignoring {}",
            label("Watch:"),
            server.watch_exclusions.join(", ")
        );
    }
    eprintln!();
}

/// Minifier settings and resolved chunks.
pub fn print_build_summary(build: &ProductionBuildConfig, chunks: &[ResolvedChunk]) {
    let compress = &build.compression_options;
    eprintln!();
    eprintln!("  {}     {}", label("Minify:"), build.minify);
    eprintln!(
        "  {}   drop console {}, drop debugger {}, pure {}",
        label("Compress:"),
        yes_no(compress.drop_console),
        yes_no(compress.drop_debugger),
        compress.pure_function_names.join(", ")
    );
    eprintln!("  {}     {}", label("Report:"), build.reporter().describe());
    if chunks.is_empty() {
        eprintln!("  {}     automatic only", label("Chunks:"));
    } else {
        eprintln!("  {}", label("Chunks:"));
        for chunk in chunks {
            let modules: Vec<&str> = chunk.modules.iter().map(|m| m.specifier.as_str()).collect();
            eprintln!("    {:<12} {}", chunk.name, modules.join(", "));
        }
    }
    eprintln!();
}

/// Sites from one scanned file, paths shown relative to `root`.
pub fn print_check_report(report: &StripReport, root: &std::path::Path) {
    if report.is_empty() {
        return;
    }
    let path = report
        .path
        .as_deref()
        .map(|p| p.strip_prefix(root).unwrap_or(p).display().to_string())
        .unwrap_or_else(|| "<source>".to_string());

    for site in &report.sites {
        let location = format!("{path}:{}:{}", site.line, site.column);
        let disposition = site.disposition.describe();
        if colors_enabled() {
            if site.disposition.loses_side_effects() {
                println!("  {}  {}  {}", location.dimmed(), site.callee, disposition.red());
            } else if site.disposition.is_removed() {
                println!("  {}  {}  {}", location.dimmed(), site.callee, disposition.green());
            } else {
                println!("  {}  {}  {}", location.dimmed(), site.callee, disposition.yellow());
            }
        } else {
            println!("  {location}  {}  {disposition}", site.callee);
        }
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

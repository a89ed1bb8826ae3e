//! Export in the shape the Vite dev server and bundler read.

use serde_json::{Map, Value, json};

use crate::config::BuildConfiguration;

/// Render `config` as a Vite `UserConfig` object.
///
/// Field names follow the runtime's own option names, which differ from the
/// camelCase model: `watch.ignored`, `terserOptions.compress.drop_console`,
/// `rollupOptions.output.manualChunks` and so on. `server.hmr` is omitted
/// entirely for local binding.
pub fn to_vite_config(config: &BuildConfiguration) -> Value {
    let server = &config.server;
    let build = &config.build;
    let compress = &build.compression_options;

    let mut server_value = Map::new();
    server_value.insert("port".to_string(), json!(server.port));
    server_value.insert("strictPort".to_string(), json!(server.strict_port));
    server_value.insert(
        "host".to_string(),
        server.host.address().map_or(Value::Bool(false), |host| json!(host)),
    );
    if let Some(hmr) = &server.hmr {
        server_value.insert(
            "hmr".to_string(),
            json!({
                "protocol": hmr.protocol.scheme(),
                "host": hmr.host,
                "port": hmr.port,
            }),
        );
    }
    server_value.insert(
        "watch".to_string(),
        json!({ "ignored": server.watch_exclusions }),
    );

    let manual_chunks: Map<String, Value> = build
        .chunking_strategy
        .iter()
        .map(|(name, modules)| (name.to_string(), json!(modules)))
        .collect();

    json!({
        "clearScreen": config.clear_screen,
        "server": server_value,
        "build": {
            "minify": build.minify.to_string(),
            "terserOptions": {
                "compress": {
                    "drop_console": compress.drop_console,
                    "drop_debugger": compress.drop_debugger,
                    "pure_funcs": compress.pure_function_names,
                }
            },
            "rollupOptions": {
                "output": {
                    "manualChunks": manual_chunks,
                }
            },
            "reportCompressedSize": build.report_compressed_size,
        }
    })
}

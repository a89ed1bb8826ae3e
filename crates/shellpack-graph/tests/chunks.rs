//! Chunk resolution against package manifests.

use std::fs;

use proptest::prelude::*;
use shellpack_config::{ChunkingStrategy, ProjectConfig};
use shellpack_graph::{DependencyGraph, DependencyType, GraphError, ModuleOrigin, PackageJson};
use tempfile::TempDir;

#[test]
fn framework_runtime_resolves_when_declared() {
    let chunks = ChunkingStrategy::empty().with_chunk("vendor", ["ui-framework-runtime"]);

    let graph =
        DependencyGraph::new().with_package("ui-framework-runtime", DependencyType::Production);
    let resolved = graph.resolve_chunks(&chunks).unwrap();
    assert_eq!(resolved[0].name, "vendor");
    assert_eq!(resolved[0].modules[0].specifier, "ui-framework-runtime");

    let without = DependencyGraph::new().with_package("other", DependencyType::Production);
    match without.resolve_chunks(&chunks).unwrap_err() {
        GraphError::ModuleResolution { chunk, module } => {
            assert_eq!(chunk, "vendor");
            assert_eq!(module, "ui-framework-runtime");
        }
        other => panic!("expected ModuleResolution, got {other:?}"),
    }
}

#[test]
fn default_chunks_against_manifest_on_disk() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("package.json");
    fs::write(
        &manifest,
        r#"{
  "name": "desktop-app",
  "dependencies": { "vue": "^3.4.0", "@tauri-apps/api": "^2" },
  "devDependencies": { "@vitejs/plugin-vue": "^5", "vite": "^5" }
}"#,
    )
    .unwrap();

    let pkg = PackageJson::from_path(&manifest).unwrap();
    let graph = DependencyGraph::from_package_json(&pkg);
    assert_eq!(graph.package_count(), 4);

    let chunks = ProjectConfig::default().chunks;
    let resolved = graph.resolve_chunks(&chunks).unwrap();
    assert_eq!(resolved.len(), 1);
}

#[test]
fn local_modules_resolve_against_manifest_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("package.json"), "{}").unwrap();
    fs::create_dir_all(dir.path().join("src/lib/icons")).unwrap();
    fs::write(dir.path().join("src/lib/format.ts"), "export {}").unwrap();
    fs::write(dir.path().join("src/lib/icons/index.js"), "export {}").unwrap();

    let pkg = PackageJson::from_path(&dir.path().join("package.json")).unwrap();
    let graph = DependencyGraph::from_package_json(&pkg);

    let format = graph.resolve("./src/lib/format").unwrap();
    assert_eq!(
        format.origin,
        ModuleOrigin::Local {
            path: dir.path().join("src/lib/format.ts")
        }
    );
    assert!(graph.resolve("./src/lib/icons").is_some());
    assert!(graph.resolve("./src/lib/missing").is_none());
}

proptest! {
    #[test]
    fn prop_resolution_matches_declared_packages(
        declared in prop::collection::btree_set("[a-z][a-z0-9-]{0,8}", 0..6),
        referenced in prop::collection::vec("[a-z][a-z0-9-]{0,8}", 1..6),
    ) {
        let graph = declared.iter().fold(DependencyGraph::new(), |graph, name| {
            graph.with_package(name.clone(), DependencyType::Production)
        });
        let chunks = ChunkingStrategy::empty().with_chunk("vendor", referenced.clone());

        let all_declared = referenced.iter().all(|module| declared.contains(module));
        prop_assert_eq!(graph.resolve_chunks(&chunks).is_ok(), all_declared);

        let unresolved = graph.unresolved(&chunks);
        prop_assert_eq!(
            unresolved.len(),
            referenced.iter().filter(|module| !declared.contains(*module)).count()
        );
    }
}

//! End-to-end pipeline runs against the fixture toolchain

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use walkdir::WalkDir;
use wasmbuild_core::{BuildContext, Config, Error, Pipeline, Stage};
use wasmbuild_tests::{FIXTURE_WASM, FixtureToolchain};

fn context(temp_dir: &TempDir, year: i32) -> BuildContext {
    BuildContext::resolve(
        temp_dir.path().to_str().unwrap(),
        Some(PathBuf::from("/home/dev")),
        year,
    )
    .unwrap()
}

#[test]
fn test_full_pipeline_produces_library() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&temp_dir, 2030);
    let cfg = Config::default();
    let toolchain = FixtureToolchain::new(&cfg);

    let report = Pipeline::new(&ctx, &cfg, &toolchain).run().unwrap();

    assert_eq!(
        toolchain.calls(),
        vec![
            Stage::Format,
            Stage::Compile,
            Stage::BindGen,
            Stage::FormatBindings
        ]
    );

    let wasm = fs::read(ctx.path("lib/deno_graph_bg.wasm")).unwrap();
    assert_eq!(wasm.len(), 10);
    assert_eq!(wasm, FIXTURE_WASM);

    let snippet_files: Vec<_> = walk_files(&ctx.path("lib/snippets"));
    assert_eq!(
        snippet_files,
        vec![PathBuf::from("deno_graph-0/src/snippet.js")]
    );
    assert_eq!(report.staged.snippets, snippet_files);

    let js = fs::read_to_string(ctx.path("lib/deno_graph.js")).unwrap();
    let positions = [
        js.find("// Copyright 2018-2030 the Deno authors.").unwrap(),
        js.find("// @generated file from wasmbuild, do not edit").unwrap(),
        js.find("Deno.permissions.request({ name: \"read\", path: wasm_url });").unwrap(),
        js.find("Deno.permissions.request({ name: \"net\", host: wasm_url.host });").unwrap(),
        js.find("export const _wasm = wasm;").unwrap(),
        js.find("export const _wasmInstance = wasmInstance;").unwrap(),
    ];
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    assert_eq!(js.matches("if (\"permissions\" in Deno)").count(), 2);
    assert!(report.anchors.iter().all(|a| a.matches == 1));
}

#[test]
fn test_failure_stops_every_later_stage() {
    let cfg = Config::default();

    for (index, stage) in [
        Stage::Format,
        Stage::Compile,
        Stage::BindGen,
        Stage::FormatBindings,
    ]
    .into_iter()
    .enumerate()
    {
        let temp_dir = TempDir::new().unwrap();
        let ctx = context(&temp_dir, 2024);
        let toolchain = FixtureToolchain::new(&cfg).failing_at(stage);

        let err = Pipeline::new(&ctx, &cfg, &toolchain).run().unwrap_err();
        assert!(
            matches!(err, Error::StageFailed { stage: name, .. } if name == stage.name()),
            "unexpected error for {stage}: {err:?}"
        );
        assert_eq!(toolchain.calls().len(), index + 1);

        if index < 2 {
            assert!(!ctx.path("lib").exists(), "nothing staged after {stage} failed");
        }
    }
}

#[test]
fn test_rerun_replaces_snippets() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&temp_dir, 2024);
    let cfg = Config::default();

    let first = FixtureToolchain::new(&cfg);
    Pipeline::new(&ctx, &cfg, &first).run().unwrap();

    let mut second = FixtureToolchain::new(&cfg);
    second.snippets = vec![("other-1/inline0.js".to_string(), "export const a = 1;\n".to_string())];
    Pipeline::new(&ctx, &cfg, &second).run().unwrap();

    assert_eq!(
        walk_files(&ctx.path("lib/snippets")),
        walk_files(&ctx.path("target/wasm32-bindgen-deno-js/snippets"))
    );
    assert_eq!(
        walk_files(&ctx.path("lib/snippets")),
        vec![PathBuf::from("other-1/inline0.js")]
    );
}

#[test]
fn test_missing_anchor_is_fatal_by_default() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&temp_dir, 2024);
    let cfg = Config::default();

    let mut toolchain = FixtureToolchain::new(&cfg);
    toolchain.bindings = "export function parse() {}\n".to_string();

    let err = Pipeline::new(&ctx, &cfg, &toolchain).run().unwrap_err();
    assert!(matches!(err, Error::AnchorMismatch { .. }));
    assert!(!ctx.path("lib/deno_graph.js").exists());
    assert!(!toolchain.calls().contains(&Stage::FormatBindings));
}

#[test]
fn test_missing_anchor_allowed_when_lenient() {
    let temp_dir = TempDir::new().unwrap();
    let ctx = context(&temp_dir, 2024);
    let cfg = Config::default();

    let mut toolchain = FixtureToolchain::new(&cfg);
    toolchain.bindings = "export function parse() {}\n".to_string();

    let report = Pipeline::new(&ctx, &cfg, &toolchain)
        .strict_anchors(false)
        .run()
        .unwrap();
    assert!(report.anchors.iter().all(|a| a.matches == 0));

    let js = fs::read_to_string(ctx.path("lib/deno_graph.js")).unwrap();
    assert!(js.contains("export function parse() {}\n"));
    assert!(!js.contains("permissions.request"));
}

fn walk_files(dir: &Path) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .sort_by_file_name()
        .into_iter()
        .map(|entry| entry.unwrap())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().strip_prefix(dir).unwrap().to_path_buf())
        .collect()
}

//! Test support for wasmbuild integration tests
//!
//! [`FixtureToolchain`] stands in for cargo, wasm-bindgen and deno. It
//! writes the files the real tools would produce so the whole pipeline can
//! run inside a temp directory.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::Path;

use wasmbuild_core::{Config, Stage, StageCommand, StageExecutor, StageStatus};

pub const FIXTURE_WASM: &[u8; 10] = b"\0asm\x01\0\0\0\0\0";

pub fn fixture_bindings() -> String {
    format!(
        "\
let wasmCode = '';
switch (wasm_url.protocol) {{
    case 'file:':
    {read}
    break
    case 'https:':
    case 'http:':
    {fetch}
    break
}}
const wasmInstance = new WebAssembly.Instance(wasmModule, imports);
const wasm = wasmInstance.exports;
",
        read = wasmbuild_core::patcher::READ_ANCHOR,
        fetch = wasmbuild_core::patcher::FETCH_ANCHOR,
    )
}

pub struct FixtureToolchain {
    cfg: Config,
    pub fail_at: Option<Stage>,
    pub bindings: String,
    pub snippets: Vec<(String, String)>,
    pub calls: RefCell<Vec<Stage>>,
}

impl FixtureToolchain {
    pub fn new(cfg: &Config) -> Self {
        Self {
            cfg: cfg.clone(),
            fail_at: None,
            bindings: fixture_bindings(),
            snippets: vec![("deno_graph-0/src/snippet.js".to_string(), "export {};\n".to_string())],
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn failing_at(mut self, stage: Stage) -> Self {
        self.fail_at = Some(stage);
        self
    }

    pub fn calls(&self) -> Vec<Stage> {
        self.calls.borrow().clone()
    }

    fn compile(&self, root: &Path) -> io::Result<bool> {
        let out = root.join(self.cfg.compiled_wasm());
        fs::create_dir_all(out.parent().unwrap_or(root))?;
        fs::write(out, FIXTURE_WASM)?;
        Ok(true)
    }

    fn bindgen(&self, root: &Path) -> io::Result<bool> {
        let compiled = root.join(self.cfg.compiled_wasm());
        if !compiled.exists() {
            return Ok(false);
        }

        fs::create_dir_all(root.join(&self.cfg.bindgen_out_dir))?;
        fs::copy(&compiled, root.join(self.cfg.generated_wasm()))?;
        fs::write(root.join(self.cfg.generated_js()), &self.bindings)?;

        let snippets = root.join(self.cfg.generated_snippets());
        if snippets.exists() {
            fs::remove_dir_all(&snippets)?;
        }
        for (name, contents) in &self.snippets {
            let path = snippets.join(name);
            fs::create_dir_all(path.parent().unwrap_or(&snippets))?;
            fs::write(path, contents)?;
        }
        Ok(true)
    }
}

impl StageExecutor for FixtureToolchain {
    fn execute(&self, command: &StageCommand) -> io::Result<StageStatus> {
        self.calls.borrow_mut().push(command.stage);

        if self.fail_at == Some(command.stage) {
            return Ok(StageStatus::failure(Some(1)));
        }

        let root = command
            .working_dir
            .as_deref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "no working dir"))?;

        let ok = match command.stage {
            Stage::Format => true,
            Stage::Compile => self.compile(root)?,
            Stage::BindGen => self.bindgen(root)?,
            Stage::FormatBindings => root.join(self.cfg.lib_js()).exists(),
        };

        Ok(if ok {
            StageStatus::success()
        } else {
            StageStatus::failure(Some(1))
        })
    }
}

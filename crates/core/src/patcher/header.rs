pub const COPYRIGHT_START_YEAR: i32 = 2018;

pub const GENERATED_BANNER: &str = "\
// @generated file from wasmbuild, do not edit
// deno-lint-ignore-file
";

/// Re-exports of the module's internal wasm handles for tests and debugging
pub const DEBUG_EXPORTS: &str = "
/* for testing and debugging */
export const _wasm = wasm;
export const _wasmInstance = wasmInstance;
";

pub fn copyright_header(year: i32) -> String {
    format!(
        "// Copyright {COPYRIGHT_START_YEAR}-{year} the Deno authors. All rights reserved. MIT license."
    )
}

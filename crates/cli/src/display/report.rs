use wasmbuild_core::BuildReport;

pub fn print_report(report: &BuildReport) {
    println!("✅ Library staged");
    println!("   • wasm: {}", report.staged.wasm.display());
    println!(
        "   • snippets: {} ({} file{})",
        report.staged.snippets_dir.display(),
        report.staged.snippets.len(),
        if report.staged.snippets.len() == 1 { "" } else { "s" }
    );
    println!("   • bindings: {}", report.bindings.display());

    for anchor in &report.anchors {
        let mark = if anchor.is_exact() { "🔒" } else { "⚠️ " };
        println!(
            "   {} {} guard: {} match{}",
            mark,
            anchor.rule,
            anchor.matches,
            if anchor.matches == 1 { "" } else { "es" }
        );
    }
}

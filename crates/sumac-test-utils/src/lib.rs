pub mod lattice;

use std::fmt::Write;

use sumac_analysis::AccessSummaryAnalysis;
use sumac_ir::{Location, Module};

/// Install a `tracing` subscriber honoring `RUST_LOG`, writing through the
/// test harness. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Shorthand for a location on column 1 of `line`.
pub fn loc(line: u32) -> Location {
    Location::new(line, 1)
}

/// Summarize every function of `module` and render the summaries, one
/// function per block:
///
/// ```text
/// f:
///   read @ 1:1
///   none
/// ```
pub fn dump_summaries(analysis: &mut AccessSummaryAnalysis, module: &Module) -> String {
    let mut out = String::new();
    for (function, decl) in module.functions() {
        let summary = analysis.get_or_create_summary(module, function);
        let _ = writeln!(out, "{}:", decl.name());
        for argument in summary.iter() {
            let _ = writeln!(out, "  {argument}");
        }
    }
    out
}

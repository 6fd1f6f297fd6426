use sumac::prelude::*;
use sumac_test_utils::{dump_summaries, init_tracing};

use Operand::Argument;

/// A buffer handed to a non-escaping closure that forwards it to a chain of
/// helpers.
fn buffer_module() -> (Module, Function) {
    let mut module = Module::new();
    let len = module
        .function()
        .name("len")
        .address_argument("buffer")
        .body(
            Body::builder()
                .access(AccessKind::Read, Argument(0), &[0], Location::new(2, 12))
                .new(),
        )
        .new()
        .unwrap();
    let push = module
        .function()
        .name("push")
        .address_argument("buffer")
        .value_argument("element")
        .body(
            Body::builder()
                .call(len, vec![Argument(0)], Location::new(5, 15))
                .access(AccessKind::Modify, Argument(0), &[1], Location::new(6, 5))
                .new(),
        )
        .new()
        .unwrap();
    // { element in push(&buffer, element) }
    let closure = module
        .function()
        .name("fill_closure")
        .value_argument("element")
        .address_argument("buffer")
        .body(
            Body::builder()
                .call(push, vec![Argument(1), Argument(0)], Location::new(10, 9))
                .new(),
        )
        .new()
        .unwrap();
    let fill = module
        .function()
        .name("fill")
        .address_argument("buffer")
        .address_argument("source")
        .body(
            Body::builder()
                .read(1, Location::new(13, 5))
                .partial_apply(closure, vec![Argument(0)], Location::new(14, 20))
                .call(
                    Callee::Indirect,
                    vec![Operand::Local, Argument(1)],
                    Location::new(14, 5),
                )
                .new(),
        )
        .new()
        .unwrap();
    (module, fill)
}

#[test]
fn test_closure_capture_reports_modification() {
    init_tracing();
    let (module, fill) = buffer_module();
    let mut analysis = AccessSummaryAnalysis::new();

    let summary = analysis.get_or_create_summary(&module, fill);
    assert_eq!(summary[0].access_kind(), Some(AccessKind::Modify));
    assert_eq!(summary[0].location(), Some(Location::new(6, 5)));
    // read locally, then escapes into an unknown call
    assert_eq!(summary[1].access_kind(), Some(AccessKind::Modify));
    assert_eq!(summary[1].location(), Some(Location::new(14, 5)));
}

#[test]
fn test_module_summaries() {
    let (module, _) = buffer_module();
    let mut analysis = AccessSummaryAnalysis::new();
    let dump = dump_summaries(&mut analysis, &module);
    insta::assert_snapshot!(dump.trim_end(), @r"
    len:
      read @ 2:12
    push:
      modify @ 6:5
      none
    fill_closure:
      none
      modify @ 6:5
    fill:
      modify @ 6:5
      modify @ 14:5
    ");
}

#[test]
fn test_buffer_paths_are_interned_once() {
    let (module, fill) = buffer_module();
    let mut analysis = AccessSummaryAnalysis::new();
    analysis.get_or_create_summary(&module, fill);

    let len = module.function_by_name("len").unwrap();
    let push = module.function_by_name("push").unwrap();
    let read = analysis.local_accesses(len)[0];
    let write = analysis.local_accesses(push)[0];
    assert_eq!(analysis.path_trie().path(read.path), vec![0]);
    assert_eq!(analysis.path_trie().path(write.path), vec![1]);
    assert_eq!(write.kind, AccessKind::Modify);
    // fill's own read of `source` has the empty path
    assert_eq!(analysis.local_accesses(fill)[0].path, analysis.sub_path_trie_root());
}

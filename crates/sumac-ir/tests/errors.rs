use sumac_ir::{Body, Callee, IrError, Location, Module, Operand};

fn at(line: u32) -> Location {
    Location::new(line, 1)
}

fn declare_pair(module: &mut Module) -> sumac_ir::Function {
    module
        .function()
        .name("pair")
        .address_argument("a")
        .address_argument("b")
        .new()
        .unwrap()
}

#[test]
fn test_duplicate_function_message() {
    let mut module = Module::new();
    declare_pair(&mut module);
    let err = module.function().name("pair").new().unwrap_err();
    insta::assert_snapshot!(err, @"duplicate function name 'pair'");
}

#[test]
fn test_out_of_range_message() {
    let mut module = Module::new();
    let err = module
        .function()
        .name("f")
        .address_argument("x")
        .body(Body::builder().modify(3, at(1)).new())
        .new()
        .unwrap_err();
    insta::assert_snapshot!(
        err,
        @"argument index 3 out of range for function 'f' with 1 arguments"
    );
}

#[test]
fn test_arity_mismatch_message() {
    let mut module = Module::new();
    let pair = declare_pair(&mut module);
    let err = module
        .function()
        .name("f")
        .address_argument("x")
        .body(Body::builder().call(pair, vec![Operand::Argument(0)], at(1)).new())
        .new()
        .unwrap_err();
    insta::assert_snapshot!(err, @"arity mismatch calling 'pair': expected 2 arguments, got 1");
}

#[test]
fn test_too_many_captures_message() {
    let mut module = Module::new();
    let pair = declare_pair(&mut module);
    let err = module
        .function()
        .name("f")
        .address_argument("x")
        .body(
            Body::builder()
                .partial_apply(
                    pair,
                    vec![Operand::Argument(0), Operand::Local, Operand::Local],
                    at(1),
                )
                .new(),
        )
        .new()
        .unwrap_err();
    insta::assert_snapshot!(
        err,
        @"partial application of 'pair' captures 3 operands but it takes 2"
    );
}

#[test]
fn test_set_body_on_deleted_function() {
    let mut module = Module::new();
    let pair = declare_pair(&mut module);
    module.delete_function(pair).unwrap();
    assert_eq!(
        module.set_body(pair, None),
        Err(IrError::UnknownFunction(pair))
    );
    assert_eq!(module.delete_function(pair), Err(IrError::UnknownFunction(pair)));
    assert!(module.function_by_name("pair").is_none());
}

#[test]
fn test_indirect_calls_are_not_checked() {
    let mut module = Module::new();
    let f = module
        .function()
        .name("f")
        .address_argument("x")
        .body(
            Body::builder()
                .call(Callee::Indirect, vec![], at(1))
                .partial_apply(Callee::Indirect, vec![Operand::Argument(0)], at(2))
                .new(),
        )
        .new()
        .unwrap();
    assert_eq!(module.expect_decl(f).body().unwrap().statements().len(), 2);
}

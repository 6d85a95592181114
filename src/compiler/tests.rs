use inkwell::context::Context;

use crate::{
    backend::{Backend, Signature},
    errors::errors::{ErrorImpl, ErrorKind},
    parser::parser::{parse, parse_with},
};

use super::compiler::Compiler;

#[test]
fn test_function_signature_is_all_doubles() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse("def add(x y) x + y", &mut compiler);
    assert!(errors.is_empty(), "{:?}", errors);

    let function = compiler.module.get_function("add").expect("add was not emitted");
    assert_eq!(function.count_params(), 2);
    assert!(function.verify(false));

    let ir = compiler.print_module();
    assert!(ir.contains("define double @add(double %x, double %y)"), "{}", ir);
    assert!(ir.contains("fadd double"), "{}", ir);
}

#[test]
fn test_comparison_yields_double() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse("def lt(a b) a < b", &mut compiler);
    assert!(errors.is_empty(), "{:?}", errors);

    let ir = compiler.print_module();
    assert!(ir.contains("fcmp ult double"), "{}", ir);
    assert!(ir.contains("uitofp i1"), "{}", ir);
}

#[test]
fn test_if_merges_with_phi() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse(
        "def fib(x) if x < 3 then 1 else fib(x - 1) + fib(x - 2)",
        &mut compiler,
    );
    assert!(errors.is_empty(), "{:?}", errors);

    let ir = compiler.print_module();
    assert!(ir.contains("phi double"), "{}", ir);
    assert!(ir.contains("call double @fib"), "{}", ir);
}

#[test]
fn test_loops_and_mutable_variables() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let source = "
        extern putchard(c)
        def binary : 1 (x y) y
        def count(n) var total = 0 in (for i = 1, i < n in total = total + i) : total
    ";
    let (_, errors) = parse(source, &mut compiler);
    assert!(errors.is_empty(), "{:?}", errors);

    let count = compiler.module.get_function("count").expect("count was not emitted");
    assert!(count.verify(false));

    let ir = compiler.print_module();
    assert!(ir.contains("call double @\"binary:\""), "{}", ir);
    assert!(ir.contains("afterloop"), "{}", ir);
}

#[test]
fn test_unknown_function_is_reported() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse("def f(x) g(x)", &mut compiler);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_kind(), ErrorKind::Resolution);
    // a rejected body leaves nothing behind
    assert!(compiler.module.get_function("f").is_none());
}

#[test]
fn test_undeclared_variable_is_reported() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse("def f(x) (for i = 0, i < 3 in i) + i", &mut compiler);

    assert!(matches!(
        errors[0].get_internal(),
        ErrorImpl::VariableNotDeclared { variable } if variable == "i"
    ));
}

#[test]
fn test_redefinition_is_rejected() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse("def f(x) x\ndef f(x) x + 1", &mut compiler);

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].get_line(), 2);
    assert_eq!(
        errors[0].get_internal(),
        &ErrorImpl::FunctionRedefined {
            function: String::from("f")
        }
    );
}

#[test]
fn test_extern_then_definition() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (parser, errors) = parse("extern twice(n)\ndef twice(x) x * 2\ntwice(4)", &mut compiler);
    assert!(errors.is_empty(), "{:?}", errors);

    assert_eq!(
        compiler.resolve_callee("twice", parser.get_prototypes()),
        Some(Signature::new("twice", 1))
    );
    // the definition names its own parameters
    assert!(compiler.print_module().contains("define double @twice(double %x)"));
    let twice = compiler.module.get_function("twice").expect("twice was not emitted");
    assert_eq!(twice.count_basic_blocks(), 1);
}

#[test]
fn test_optimized_function_has_no_allocas() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test").with_optimizations();

    let (_, errors) = parse("def f(x) var y = x in y * 2", &mut compiler);
    assert!(errors.is_empty(), "{:?}", errors);

    let ir = compiler.print_module();
    assert!(!ir.contains("alloca"), "{}", ir);
}

#[test]
fn test_failed_definition_can_still_be_called() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");

    let (_, errors) = parse("def broken(x) y\nbroken(1)", &mut compiler);
    assert_eq!(errors.len(), 1);

    // the registered prototype is declared again on first use
    let broken = compiler.module.get_function("broken").expect("broken was not declared");
    assert_eq!(broken.count_basic_blocks(), 0);
    assert!(compiler.print_module().contains("call double @broken(double 1"));
}

#[test]
fn test_each_handle_prints_its_own_ir() {
    let context = Context::create();
    let mut compiler = Compiler::new(&context, "test");
    let mut printed = vec![];

    let (_, errors) = parse_with(
        "extern sin(x)\ndef f(x) sin(x) + 1",
        &mut compiler,
        |_, function| printed.push(function.print_to_string().to_string()),
    );
    assert!(errors.is_empty(), "{:?}", errors);

    assert_eq!(printed.len(), 2);
    assert!(printed[0].contains("declare double @sin(double"), "{}", printed[0]);
    assert!(printed[1].contains("define double @f(double %x)"), "{}", printed[1]);
}

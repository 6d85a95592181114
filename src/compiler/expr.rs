use inkwell::{
    values::{BasicMetadataValueEnum, FloatValue, FunctionValue, PointerValue},
    FloatPredicate,
};

use crate::{
    ast::{expressions::Expr, registry::PrototypeRegistry},
    backend::Backend,
    errors::errors::{Error, ErrorImpl},
    scope::scope::{Environment, ScopeOwner},
};

use super::compiler::Compiler;

/// Generates LLVM IR for the given expression, returning its value.
pub fn gen_expression<'ctx>(
    compiler: &mut Compiler<'ctx>,
    prototypes: &PrototypeRegistry,
    expression: &Expr,
) -> Result<FloatValue<'ctx>, Error> {
    match expression {
        Expr::Number(value) => Ok(compiler.context.f64_type().const_float(*value)),
        Expr::Variable(name) => {
            let alloca = lookup_variable(compiler, name)?;
            let value = compiler.codegen(compiler.builder.build_load(alloca, name))?;

            Ok(value.into_float_value())
        }
        Expr::Assign { target, value } => {
            let value = gen_expression(compiler, prototypes, value)?;
            let alloca = lookup_variable(compiler, target)?;
            compiler.codegen(compiler.builder.build_store(alloca, value))?;

            Ok(value)
        }
        Expr::Binary { op, lhs, rhs } => {
            let left = gen_expression(compiler, prototypes, lhs)?;
            let right = gen_expression(compiler, prototypes, rhs)?;

            gen_binary(compiler, prototypes, *op, left, right)
        }
        Expr::Unary { op, operand } => {
            let operand = gen_expression(compiler, prototypes, operand)?;
            let function = callee(compiler, prototypes, &format!("unary{}", op), 1)?;

            gen_call(compiler, function, &[operand], "unop")
        }
        Expr::Call { callee: name, args } => {
            let function = callee(compiler, prototypes, name, args.len())?;

            let mut values = Vec::with_capacity(args.len());
            for arg in args {
                values.push(gen_expression(compiler, prototypes, arg)?);
            }

            gen_call(compiler, function, &values, "calltmp")
        }
        Expr::If {
            condition,
            then_body,
            else_body,
        } => gen_if(compiler, prototypes, condition, then_body, else_body),
        Expr::For {
            var,
            start,
            end,
            step,
            body,
        } => gen_for(compiler, prototypes, var, start, end, step.as_deref(), body),
        Expr::Var { bindings, body } => compiler.in_scope(Environment::new(), |compiler| {
            for (name, initializer) in bindings {
                // Evaluated before `name` is bound, so it sees any outer binding
                let value = match initializer {
                    Some(initializer) => gen_expression(compiler, prototypes, initializer)?,
                    None => compiler.context.f64_type().const_zero(),
                };

                let alloca = compiler.create_entry_block_alloca(name)?;
                compiler.codegen(compiler.builder.build_store(alloca, value))?;
                compiler.scopes().declare_variable(name, alloca);
            }

            gen_expression(compiler, prototypes, body)
        }),
    }
}

fn lookup_variable<'ctx>(
    compiler: &mut Compiler<'ctx>,
    name: &str,
) -> Result<PointerValue<'ctx>, Error> {
    match compiler.scopes().get_variable(name).copied() {
        Some(alloca) => Ok(alloca),
        None => Err(compiler.error_at(ErrorImpl::VariableNotDeclared {
            variable: name.to_string(),
        })),
    }
}

/// Finds the function a call lowers to and checks the argument count.
///
/// The callee is looked up in the session's registry, and declared in the
/// module on first use.
fn callee<'ctx>(
    compiler: &Compiler<'ctx>,
    prototypes: &PrototypeRegistry,
    name: &str,
    received: usize,
) -> Result<FunctionValue<'ctx>, Error> {
    let unknown = || {
        compiler.error_at(ErrorImpl::UnknownFunction {
            function: name.to_string(),
        })
    };

    let signature = compiler.resolve_callee(name, prototypes).ok_or_else(unknown)?;
    if signature.arity != received {
        return Err(compiler.error_at(ErrorImpl::UnexpectedArguments {
            function: name.to_string(),
            expected: signature.arity,
            received,
        }));
    }

    compiler.get_function(name, prototypes).ok_or_else(unknown)
}

fn gen_call<'ctx>(
    compiler: &Compiler<'ctx>,
    function: FunctionValue<'ctx>,
    args: &[FloatValue<'ctx>],
    name: &str,
) -> Result<FloatValue<'ctx>, Error> {
    let args: Vec<BasicMetadataValueEnum<'ctx>> = args.iter().map(|&arg| arg.into()).collect();

    compiler
        .codegen(compiler.builder.build_call(function, &args, name))?
        .try_as_basic_value()
        .left()
        .map(|value| value.into_float_value())
        .ok_or_else(|| compiler.error("call did not produce a value"))
}

fn gen_binary<'ctx>(
    compiler: &Compiler<'ctx>,
    prototypes: &PrototypeRegistry,
    op: char,
    left: FloatValue<'ctx>,
    right: FloatValue<'ctx>,
) -> Result<FloatValue<'ctx>, Error> {
    let builder = &compiler.builder;

    match op {
        '+' => compiler.codegen(builder.build_float_add(left, right, "addtmp")),
        '-' => compiler.codegen(builder.build_float_sub(left, right, "subtmp")),
        '*' => compiler.codegen(builder.build_float_mul(left, right, "multmp")),
        '/' => compiler.codegen(builder.build_float_div(left, right, "divtmp")),
        '<' | '>' => {
            let predicate = if op == '<' {
                FloatPredicate::ULT
            } else {
                FloatPredicate::UGT
            };
            let cmp = compiler.codegen(builder.build_float_compare(predicate, left, right, "cmptmp"))?;

            // 0.0 or 1.0
            compiler.codegen(builder.build_unsigned_int_to_float(
                cmp,
                compiler.context.f64_type(),
                "booltmp",
            ))
        }
        _ => {
            let function = callee(compiler, prototypes, &format!("binary{}", op), 2)?;
            gen_call(compiler, function, &[left, right], "binop")
        }
    }
}

fn current_function<'ctx>(compiler: &Compiler<'ctx>) -> Result<FunctionValue<'ctx>, Error> {
    compiler
        .builder
        .get_insert_block()
        .and_then(|block| block.get_parent())
        .ok_or_else(|| compiler.error("no function is being built"))
}

pub fn gen_sequence<'ctx>(
    compiler: &mut Compiler<'ctx>,
    prototypes: &PrototypeRegistry,
    body: &[Expr],
) -> Result<FloatValue<'ctx>, Error> {
    let mut value = compiler.context.f64_type().const_zero();
    for expr in body {
        value = gen_expression(compiler, prototypes, expr)?;
    }
    Ok(value)
}

fn gen_if<'ctx>(
    compiler: &mut Compiler<'ctx>,
    prototypes: &PrototypeRegistry,
    condition: &Expr,
    then_body: &[Expr],
    else_body: &[Expr],
) -> Result<FloatValue<'ctx>, Error> {
    let parent_function = current_function(compiler)?;
    let zero = compiler.context.f64_type().const_zero();

    let condition = gen_expression(compiler, prototypes, condition)?;
    let condition = compiler.codegen(compiler.builder.build_float_compare(
        FloatPredicate::ONE,
        condition,
        zero,
        "ifcond",
    ))?;

    let then_block = compiler.context.append_basic_block(parent_function, "then");
    let else_block = compiler.context.append_basic_block(parent_function, "else");
    let merge_block = compiler.context.append_basic_block(parent_function, "ifcont");

    compiler.codegen(
        compiler
            .builder
            .build_conditional_branch(condition, then_block, else_block),
    )?;

    compiler.builder.position_at_end(then_block);
    let then_value = gen_sequence(compiler, prototypes, then_body)?;
    compiler.codegen(compiler.builder.build_unconditional_branch(merge_block))?;
    // Codegen of the branch may have moved the insertion point
    let then_end = compiler
        .builder
        .get_insert_block()
        .ok_or_else(|| compiler.error("lost the `then` block"))?;

    compiler.builder.position_at_end(else_block);
    let else_value = gen_sequence(compiler, prototypes, else_body)?;
    compiler.codegen(compiler.builder.build_unconditional_branch(merge_block))?;
    let else_end = compiler
        .builder
        .get_insert_block()
        .ok_or_else(|| compiler.error("lost the `else` block"))?;

    compiler.builder.position_at_end(merge_block);
    let phi = compiler.codegen(
        compiler
            .builder
            .build_phi(compiler.context.f64_type(), "iftmp"),
    )?;
    phi.add_incoming(&[(&then_value, then_end), (&else_value, else_end)]);

    Ok(phi.as_basic_value().into_float_value())
}

/// Lowers
///
/// ```text
/// for var = start, end, step in body
/// ```
///
/// The body runs at least once; the loop exits once `end` evaluates to zero.
fn gen_for<'ctx>(
    compiler: &mut Compiler<'ctx>,
    prototypes: &PrototypeRegistry,
    var: &str,
    start: &Expr,
    end: &Expr,
    step: Option<&Expr>,
    body: &[Expr],
) -> Result<FloatValue<'ctx>, Error> {
    let parent_function = current_function(compiler)?;
    let alloca = compiler.create_entry_block_alloca(var)?;

    // The start value cannot see the loop variable
    let start = gen_expression(compiler, prototypes, start)?;
    compiler.codegen(compiler.builder.build_store(alloca, start))?;

    let loop_block = compiler.context.append_basic_block(parent_function, "loop");
    compiler.codegen(compiler.builder.build_unconditional_branch(loop_block))?;
    compiler.builder.position_at_end(loop_block);

    let mut loop_scope = Environment::new();
    loop_scope.declare_variable(var, alloca);

    compiler.in_scope(loop_scope, |compiler| {
        gen_sequence(compiler, prototypes, body)?;

        let step = match step {
            Some(step) => gen_expression(compiler, prototypes, step)?,
            None => compiler.context.f64_type().const_float(1.0),
        };
        let end = gen_expression(compiler, prototypes, end)?;

        let current = compiler
            .codegen(compiler.builder.build_load(alloca, var))?
            .into_float_value();
        let next = compiler.codegen(compiler.builder.build_float_add(current, step, "nextvar"))?;
        compiler.codegen(compiler.builder.build_store(alloca, next))?;

        let end_condition = compiler.codegen(compiler.builder.build_float_compare(
            FloatPredicate::ONE,
            end,
            compiler.context.f64_type().const_zero(),
            "loopcond",
        ))?;

        let after_block = compiler
            .context
            .append_basic_block(parent_function, "afterloop");
        compiler.codegen(compiler.builder.build_conditional_branch(
            end_condition,
            loop_block,
            after_block,
        ))?;
        compiler.builder.position_at_end(after_block);

        Ok(compiler.context.f64_type().const_zero())
    })
}

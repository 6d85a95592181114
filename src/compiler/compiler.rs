//! Main compiler module.
//!
//! This module contains the Compiler structure, the LLVM code-generation
//! backend. Every value in the language is a double, so every function is
//! lowered to `double(double, ...)`, and every local lives in an alloca in
//! the function's entry block.

use std::{fmt::Display, path::Path};

use inkwell::{
    builder::{Builder, BuilderError},
    context::Context,
    module::Module,
    passes::PassManager,
    targets::{CodeModel, InitializationConfig, RelocMode, Target, TargetMachine},
    types::BasicMetadataTypeEnum,
    values::{FunctionValue, PointerValue},
    OptimizationLevel,
};

use crate::{
    ast::{
        registry::PrototypeRegistry,
        statements::{Function, Prototype},
    },
    backend::Backend,
    errors::errors::{Error, ErrorImpl},
    scope::scope::{Environment, ScopeOwner, ScopeStack},
    Position,
};

use super::expr::gen_sequence;

/// The code-generation state for one module.
///
/// # Type Parameters
///
/// * `'ctx` - Lifetime of the LLVM context
pub struct Compiler<'ctx> {
    /// Per-function optimisation passes, when enabled; dropped before the module
    pass_manager: Option<PassManager<FunctionValue<'ctx>>>,

    /// Reference to the LLVM context
    pub context: &'ctx Context,
    /// The LLVM module being built
    pub module: Module<'ctx>,
    /// The LLVM IR builder
    pub builder: Builder<'ctx>,

    /// Allocas of the bindings visible at the current point
    scopes: ScopeStack<PointerValue<'ctx>>,
    /// Position reported by errors raised while lowering the current function
    position: Position,
}

impl<'ctx> Compiler<'ctx> {
    /// Creates a new Compiler with an empty module named `module_name`.
    pub fn new(context: &'ctx Context, module_name: &str) -> Self {
        Compiler {
            pass_manager: None,
            context,
            module: context.create_module(module_name),
            builder: context.create_builder(),
            scopes: ScopeStack::new(),
            position: Position::start(),
        }
    }

    /// Runs the classic cleanup passes over every function after it is verified.
    pub fn with_optimizations(mut self) -> Self {
        let fpm = PassManager::create(&self.module);

        fpm.add_promote_memory_to_register_pass(); // Promote allocas to registers
        fpm.add_instruction_combining_pass();
        fpm.add_reassociate_pass(); // Reorder expressions to enable better optimizations
        fpm.add_gvn_pass(); // Eliminate redundant calculations
        fpm.add_cfg_simplification_pass(); // Simplify the control flow graph
        fpm.initialize();

        self.pass_manager = Some(fpm);
        self
    }

    /// Sets the module triple and data layout for the host machine.
    pub fn configure_host_target(&self) -> Result<(), Error> {
        Target::initialize_all(&InitializationConfig::default());

        let target_triple = TargetMachine::get_default_triple();
        let target = Target::from_triple(&target_triple).map_err(|e| self.error(e))?;
        let target_machine = target
            .create_target_machine(
                &target_triple,
                "generic",
                "",
                OptimizationLevel::Default,
                RelocMode::PIC,
                CodeModel::Default,
            )
            .ok_or_else(|| self.error("could not create a target machine for the host"))?;

        self.module.set_triple(&target_triple);
        self.module
            .set_data_layout(&target_machine.get_target_data().get_data_layout());

        Ok(())
    }

    /// Returns the textual IR of the module.
    pub fn print_module(&self) -> String {
        self.module.print_to_string().to_string()
    }

    /// Writes the textual IR of the module to `output_file`.
    pub fn save_module_to_file(&self, output_file: &Path) -> Result<(), Error> {
        self.module
            .print_to_file(output_file)
            .map_err(|e| self.error(e))
    }

    /// A backend error at the position of the construct being lowered.
    pub fn error(&self, message: impl Display) -> Error {
        Error::new(
            ErrorImpl::CodegenError {
                message: message.to_string(),
            },
            self.position,
        )
    }

    pub fn error_at(&self, error: ErrorImpl) -> Error {
        Error::new(error, self.position)
    }

    /// Lifts a builder result into the crate's error type.
    pub fn codegen<T>(&self, result: Result<T, BuilderError>) -> Result<T, Error> {
        result.map_err(|e| self.error(e))
    }

    /// Looks a function up in the module, declaring it from its registered
    /// prototype if it is not there yet.
    pub fn get_function(
        &self,
        name: &str,
        prototypes: &PrototypeRegistry,
    ) -> Option<FunctionValue<'ctx>> {
        self.module.get_function(name).or_else(|| {
            prototypes
                .get(name)
                .map(|prototype| self.compile_prototype(prototype))
        })
    }

    /// Declares `double name(double, ...)` in the module.
    fn compile_prototype(&self, prototype: &Prototype) -> FunctionValue<'ctx> {
        let f64_type = self.context.f64_type();
        let param_types: Vec<BasicMetadataTypeEnum> = vec![f64_type.into(); prototype.arity()];
        let function_type = f64_type.fn_type(&param_types, false);

        let function = self.module.add_function(&prototype.name, function_type, None);
        for (param, name) in function.get_param_iter().zip(&prototype.params) {
            param.into_float_value().set_name(name);
        }

        function
    }

    /// Creates a stack slot in the entry block of the function being built.
    pub fn create_entry_block_alloca(&self, name: &str) -> Result<PointerValue<'ctx>, Error> {
        let entry = self
            .builder
            .get_insert_block()
            .and_then(|block| block.get_parent())
            .and_then(|function| function.get_first_basic_block())
            .ok_or_else(|| self.error("no function is being built"))?;

        let builder = self.context.create_builder();
        match entry.get_first_instruction() {
            Some(instruction) => builder.position_before(&instruction),
            None => builder.position_at_end(entry),
        }

        self.codegen(builder.build_alloca(self.context.f64_type(), name))
    }

    fn gen_function_body(
        &mut self,
        function: &Function,
        function_value: FunctionValue<'ctx>,
        prototypes: &PrototypeRegistry,
    ) -> Result<(), Error> {
        let entry = self.context.append_basic_block(function_value, "entry");
        self.builder.position_at_end(entry);

        let mut parameters = Environment::new();
        for (param, name) in function_value
            .get_param_iter()
            .zip(&function.prototype.params)
        {
            // The registered declaration may have used other names
            param.into_float_value().set_name(name);

            let alloca = self.create_entry_block_alloca(name)?;
            self.codegen(self.builder.build_store(alloca, param))?;
            parameters.declare_variable(name, alloca);
        }

        let value = self.in_scope(parameters, |compiler| {
            gen_sequence(compiler, prototypes, &function.body)
        })?;

        self.codegen(self.builder.build_return(Some(&value)))?;
        Ok(())
    }
}

impl<'ctx> ScopeOwner for Compiler<'ctx> {
    type Binding = PointerValue<'ctx>;

    fn scopes(&mut self) -> &mut ScopeStack<PointerValue<'ctx>> {
        &mut self.scopes
    }
}

impl<'ctx> Backend for Compiler<'ctx> {
    type Handle = FunctionValue<'ctx>;

    fn compile_function(
        &mut self,
        function: &Function,
        prototypes: &PrototypeRegistry,
    ) -> Result<FunctionValue<'ctx>, Error> {
        let prototype = &function.prototype;
        self.position = prototype.position;
        self.scopes.clear();

        let function_value = match self.get_function(&prototype.name, prototypes) {
            Some(existing) if existing.count_basic_blocks() > 0 => {
                return Err(self.error_at(ErrorImpl::FunctionRedefined {
                    function: prototype.name.clone(),
                }))
            }
            Some(existing) => existing,
            None => self.compile_prototype(prototype),
        };

        let body = self.gen_function_body(function, function_value, prototypes);

        if body.is_ok() && function_value.verify(true) {
            if let Some(fpm) = &self.pass_manager {
                fpm.run_on(&function_value);
            }
            return Ok(function_value);
        }

        // SAFETY: nothing else holds on to the function once its body is rejected
        unsafe {
            function_value.delete();
        }

        body?;
        Err(self.error(format!(
            "function `{}` failed verification",
            prototype.name
        )))
    }

    fn compile_extern(
        &mut self,
        prototype: &Prototype,
        prototypes: &PrototypeRegistry,
    ) -> Result<FunctionValue<'ctx>, Error> {
        self.position = prototype.position;

        Ok(self
            .get_function(&prototype.name, prototypes)
            .unwrap_or_else(|| self.compile_prototype(prototype)))
    }
}

use std::{env, fs, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::{bail, Context as _, Result};
use exprc::{
    ast::statements::Item, display_error, errors::errors::Error, parser::parser::parse_with,
};

const USAGE: &str = "usage: exprc <file> [--ast] [--ir] [--emit <path>] [-O]";

/// Command-line options.
struct Options {
    file: PathBuf,
    /// Print every compiled item as an s-expression
    print_ast: bool,
    /// Print the IR of every compiled item (`llvm` builds only)
    print_ir: bool,
    /// Where to write the IR (`llvm` builds only)
    emit: Option<PathBuf>,
    /// Run the per-function optimisation passes (`llvm` builds only)
    optimize: bool,
}

impl Options {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut file = None;
        let mut print_ast = false;
        let mut print_ir = false;
        let mut emit = None;
        let mut optimize = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--ast" => print_ast = true,
                "--ir" => print_ir = true,
                "-O" => optimize = true,
                "--emit" => match args.next() {
                    Some(path) => emit = Some(PathBuf::from(path)),
                    None => bail!("--emit needs a path\n{}", USAGE),
                },
                flag if flag.starts_with('-') => bail!("unknown option `{}`\n{}", flag, USAGE),
                _ if file.is_some() => bail!("only one input file is supported\n{}", USAGE),
                _ => file = Some(PathBuf::from(arg)),
            }
        }

        match file {
            Some(file) => Ok(Options {
                file,
                print_ast,
                print_ir,
                emit,
                optimize,
            }),
            None => bail!("no input file\n{}", USAGE),
        }
    }
}

fn report(item: &Item, print_ast: bool) {
    match item {
        Item::Definition(_) => println!("Parsed a function definition."),
        Item::Extern(_) => println!("Parsed an extern."),
        Item::Expression(_) => println!("Parsed a top-level expr"),
    }

    if print_ast {
        println!("{}", item);
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(error) => {
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the file compiled without diagnostics.
fn run() -> Result<bool> {
    let options = Options::parse(env::args().skip(1))?;

    let start = Instant::now();
    let source = fs::read_to_string(&options.file)
        .with_context(|| format!("failed to read `{}`", options.file.display()))?;
    println!("Read in {:?}", start.elapsed());

    let compile_start = Instant::now();
    let errors = compile(&source, &options)?;
    println!("Compiled in {:?}", compile_start.elapsed());

    let file_name = options.file.to_string_lossy();
    for error in &errors {
        display_error(error, &source, &file_name);
    }

    println!("Total time: {:?}", start.elapsed());
    Ok(errors.is_empty())
}

#[cfg(not(feature = "llvm"))]
fn compile(source: &str, options: &Options) -> Result<Vec<Error>> {
    use exprc::resolver::resolver::Resolver;

    if options.print_ir || options.emit.is_some() || options.optimize {
        bail!("--ir, --emit and -O need a build with the `llvm` feature");
    }

    let mut resolver = Resolver::new();
    let (_, errors) = parse_with(source, &mut resolver, |item, _| {
        report(item, options.print_ast)
    });

    Ok(errors)
}

#[cfg(feature = "llvm")]
fn compile(source: &str, options: &Options) -> Result<Vec<Error>> {
    use exprc::compiler::compiler::Compiler;
    use inkwell::context::Context;

    let module_name = options
        .file
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| String::from("main"));

    let context = Context::create();
    let mut compiler = Compiler::new(&context, &module_name);
    if options.optimize {
        compiler = compiler.with_optimizations();
    }
    compiler.configure_host_target()?;

    let (_, errors) = parse_with(source, &mut compiler, |item, function| {
        report(item, options.print_ast);
        if options.print_ir {
            eprint!("{}", function.print_to_string().to_string());
        }
    });

    let output = options
        .emit
        .clone()
        .unwrap_or_else(|| PathBuf::from("build/out.ll"));
    if let Some(parent) = output.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create `{}`", parent.display()))?;
    }

    compiler.save_module_to_file(&output)?;
    println!("Wrote IR to {}", output.display());

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::Options;

    fn options(args: &[&str]) -> anyhow::Result<Options> {
        Options::parse(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_options() {
        let parsed = options(&["demo.ex", "--ast", "--ir", "-O"]).expect("valid options");
        assert_eq!(parsed.file.to_str(), Some("demo.ex"));
        assert!(parsed.print_ast && parsed.print_ir && parsed.optimize);
        assert!(parsed.emit.is_none());

        let parsed = options(&["--emit", "out/demo.ll", "demo.ex"]).expect("valid options");
        assert_eq!(parsed.emit.as_deref().and_then(|path| path.to_str()), Some("out/demo.ll"));
        assert!(!parsed.print_ir);
    }

    #[test]
    fn test_bad_options() {
        assert!(options(&[]).is_err());
        assert!(options(&["a.ex", "b.ex"]).is_err());
        assert!(options(&["a.ex", "--emit"]).is_err());
        assert!(options(&["a.ex", "--verbose"]).is_err());
    }
}

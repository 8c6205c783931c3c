//! Tern CLI

use std::path::PathBuf;
use std::process::ExitCode;

use ternc::{init_tracing, render_error, render_parse_error, run_files, RunConfig};

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let Some(command) = args.get(1) else {
        print_usage();
        return ExitCode::FAILURE;
    };
    let rest = &args[2..];

    match command.as_str() {
        "run" => run(rest),
        "eval" => eval(rest),
        "parse" => parse(rest),
        "help" | "--help" | "-h" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "version" | "--version" | "-V" => {
            println!("tern {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        _ => {
            eprintln!("error: unknown command `{command}`");
            eprintln!();
            print_usage();
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> ExitCode {
    let Some((config, files)) = config_or_exit(args) else {
        return ExitCode::FAILURE;
    };
    if files.is_empty() {
        eprintln!("Usage: tern run [options] <file>...");
        return ExitCode::FAILURE;
    }

    let paths: Vec<PathBuf> = files.iter().map(PathBuf::from).collect();
    let results = run_files(&paths, &config);
    let show_path = paths.len() > 1;

    let mut status = ExitCode::SUCCESS;
    for (path, result) in paths.iter().zip(results) {
        match result {
            Ok(value) if show_path => println!("{}: {value}", path.display()),
            Ok(value) => println!("{value}"),
            Err(err) => {
                eprint!("{}", err.render());
                status = ExitCode::FAILURE;
            }
        }
    }
    status
}

fn eval(args: &[String]) -> ExitCode {
    let Some((config, sources)) = config_or_exit(args) else {
        return ExitCode::FAILURE;
    };
    let [source] = sources.as_slice() else {
        eprintln!("Usage: tern eval [options] <program>");
        return ExitCode::FAILURE;
    };

    match ternc::evaluate_source_with(source, &config) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render_error("<command line>", source, &err));
            ExitCode::FAILURE
        }
    }
}

fn parse(args: &[String]) -> ExitCode {
    let [path] = args else {
        eprintln!("Usage: tern parse <file>");
        return ExitCode::FAILURE;
    };
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("error: cannot read `{path}`: {err}");
            return ExitCode::FAILURE;
        }
    };

    match tern_parse::parse_program(&text) {
        Ok(program) => {
            println!("{program}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprint!("{}", render_parse_error(path, &text, &err));
            ExitCode::FAILURE
        }
    }
}

fn config_or_exit(args: &[String]) -> Option<(RunConfig, Vec<String>)> {
    match RunConfig::from_args(args) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            eprintln!("error: {err}");
            None
        }
    }
}

fn print_usage() {
    eprintln!("Tern - a small expression language");
    eprintln!();
    eprintln!("Usage: tern <command> [options]");
    eprintln!();
    eprintln!("Commands:");
    eprintln!("  run <file>...     Evaluate program files and print their values");
    eprintln!("  eval <program>    Evaluate a program given on the command line");
    eprintln!("  parse <file>      Print a program in surface syntax");
    eprintln!("  help              Show this message");
    eprintln!("  version           Show the version");
    eprintln!();
    eprintln!("Options (run, eval):");
    eprintln!("  --max-depth=N     Fail when user calls nest deeper than N");
    eprintln!("  --budget=N        Fail after N user calls");
    eprintln!("  --timeout-ms=N    Fail after N milliseconds");
    eprintln!("  --no-parallel     Evaluate files one at a time");
    eprintln!();
    eprintln!("Logging: set TERN_LOG (e.g. TERN_LOG=tern_eval=debug); add TERN_LOG_TREE=1 for a span tree.");
}

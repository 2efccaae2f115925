//! Shadow serialization generator CLI.

use std::path::Path;

use ssgc::commands::{check_config, classify, generate, GenerateOptions};
use ssgc::tracing_setup::init_tracing;
use ssgc::{DriverError, FileOutcome};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            let options = match GenerateOptions::parse(&args[2..]) {
                Ok(options) => options,
                Err(err) => {
                    eprintln!("error: {err}");
                    eprintln!(
                        "Usage: ssgc generate <model.json> [--out <dir>] [--project <root>] [-j <threads>]"
                    );
                    std::process::exit(1);
                }
            };
            run_generate(&options);
        }
        "classify" => {
            if args.len() < 3 {
                eprintln!("Usage: ssgc classify <model.json>");
                std::process::exit(1);
            }
            init_tracing(false);
            match classify(Path::new(&args[2])) {
                Ok(lines) => {
                    for line in lines {
                        println!("{line}");
                    }
                }
                Err(err) => fail(&err),
            }
        }
        "check-config" => {
            if args.len() < 3 {
                eprintln!("Usage: ssgc check-config <rcfile>");
                std::process::exit(1);
            }
            init_tracing(false);
            match check_config(Path::new(&args[2])) {
                Ok(config) => print!("{config}"),
                Err(err) => fail(&err),
            }
        }
        "help" | "--help" | "-h" => print_usage(),
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn run_generate(options: &GenerateOptions) {
    let report = match generate(options) {
        Ok(report) => report,
        Err(err) => fail(&err),
    };

    let diagnostics = report.diagnostics();
    for diag in diagnostics.iter() {
        eprintln!("{diag}");
    }

    let generated = report.generated().count();
    let failed = report
        .files
        .iter()
        .filter(|f| f.outcome == FileOutcome::Failed)
        .count();
    match &options.out {
        Some(out) => println!("generated {generated} file(s) into {}", out.display()),
        None => println!("generated {generated} file(s) (dry run, no --out)"),
    }
    if failed > 0 {
        println!("{failed} file(s) failed");
    }

    if diagnostics.has_errors() {
        std::process::exit(1);
    }
}

fn fail(err: &DriverError) -> ! {
    eprintln!("{}", err.to_diagnostic());
    std::process::exit(1);
}

fn print_usage() {
    println!("ssgc - shadow serialization generator");
    println!();
    println!("Usage: ssgc <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <model.json>   Generate shadow serialization sources");
    println!("      --out <dir>         Write generated files into <dir>");
    println!("      --project <root>    Unity project root (default: discovered)");
    println!("      -j <threads>        Worker threads (default: all cores)");
    println!("  classify <model.json>   Print the classification of every annotated member");
    println!("  check-config <rcfile>   Parse a control file and print the effective settings");
    println!("  help                    Show this message");
}

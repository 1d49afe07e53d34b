//! Stencil template compiler CLI.

use stencilc::commands::{
    check_templates, generate_templates, parse_options, parse_template, print_dependents,
    CliOptions,
};
use stencilc::tracing_setup::init_tracing;

fn main() {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return;
    }

    let command = &args[1];

    match command.as_str() {
        "generate" => {
            if args.len() < 3 {
                eprintln!("Usage: stencil generate <root> [-o <dir>] [options]");
                std::process::exit(1);
            }
            generate_templates(&args[2], options_or_exit(&args[3..]));
        }
        "check" => {
            if args.len() < 3 {
                eprintln!("Usage: stencil check <root> [options]");
                std::process::exit(1);
            }
            check_templates(&args[2], options_or_exit(&args[3..]));
        }
        "parse" => {
            if args.len() < 3 {
                eprintln!("Usage: stencil parse <file>");
                std::process::exit(1);
            }
            parse_template(&args[2]);
        }
        "deps" => {
            if args.len() < 4 {
                eprintln!("Usage: stencil deps <root> <name>");
                eprintln!("Example: stencil deps templates tag/card.stn");
                std::process::exit(1);
            }
            print_dependents(&args[2], &args[3]);
        }
        "help" | "--help" | "-h" => {
            print_usage();
        }
        "version" | "--version" | "-v" => {
            println!("stencil {}", env!("CARGO_PKG_VERSION"));
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    }
}

fn options_or_exit(args: &[String]) -> CliOptions {
    match parse_options(args) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("error: {message}");
            eprintln!("Run `stencil help` for the list of options.");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    println!("Stencil template compiler");
    println!();
    println!("Usage: stencil <command> [options]");
    println!();
    println!("Commands:");
    println!("  generate <root>       Compile every template below <root>");
    println!("  check <root>          Generate in memory and report errors");
    println!("  parse <file>          Print the parse events of one template");
    println!("  deps <root> <name>    List the templates that use <name>");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Options (generate, check):");
    println!("  -o <dir>                   Output directory (default: stencil-generated)");
    println!("  --package=<name>           Root package of generated units");
    println!("  --html-tags=<a,b>          HTML tags handed to the hook");
    println!("  --html-attributes=<a,b>    HTML attributes handed to the hook");
    println!("  --binary-threshold=<n>     Move text longer than n bytes to a binary payload");
    println!("  --max-literal=<n>          Split literals longer than n bytes");
    println!();
    println!("Logging is controlled by RUST_LOG, e.g. RUST_LOG=stencilc=debug.");
    println!();
    println!("Examples:");
    println!("  stencil generate templates -o src/generated");
    println!("  stencil check templates --html-tags=form --html-attributes=action");
    println!("  stencil parse templates/page.stn");
    println!("  stencil deps templates tag/card.stn");
}

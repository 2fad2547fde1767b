//! `hdoc`: print the heredoc-aware token stream of a file.

use hdoc_lexer::{init_tracing, to_json, tokenize_with, LexOptions};

fn main() {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let mut options = LexOptions::default();
    let mut json = false;
    let mut path = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "-h" | "--help" => {
                print_usage();
                return;
            }
            "--json" => json = true,
            _ => match options.apply_flag(arg) {
                Ok(true) => {}
                Ok(false) if !arg.starts_with('-') && path.is_none() => path = Some(arg.as_str()),
                Ok(false) => {
                    eprintln!("error: unexpected argument '{arg}'");
                    print_usage();
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            },
        }
    }

    let Some(path) = path else {
        eprintln!("error: no input file");
        print_usage();
        std::process::exit(1);
    };

    let content = read_file(path);
    let tokens = match tokenize_with(&content, &options) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("error: {path}: {err}");
            if let Some(hint) = err.hint() {
                eprintln!("  help: {hint}");
            }
            std::process::exit(1);
        }
    };

    if json {
        match to_json(&content, &tokens) {
            Ok(out) => println!("{out}"),
            Err(e) => {
                eprintln!("error: failed to encode tokens: {e}");
                std::process::exit(1);
            }
        }
    } else {
        println!("Tokens for '{}' ({} tokens):", path, tokens.len());
        for token in &tokens {
            println!(
                "  {} @ {} {:?}",
                token.kind,
                token.span,
                token.text(&content)
            );
        }
    }
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                std::io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                std::io::ErrorKind::PermissionDenied => {
                    format!("permission denied reading '{path}'")
                }
                std::io::ErrorKind::InvalidData => {
                    format!("'{path}' contains invalid UTF-8 data")
                }
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!("Usage: hdoc <file> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --json                  Print tokens as JSON");
    eprintln!("  --state-capacity=<n>    Bytes available for scanner state (default: 1024)");
    eprintln!("  -h, --help              Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG=hdoc_scanner=trace to follow every scanner step.");
}

//! The `lyra` command-line driver.
//!
//! Parses one source file (or a built-in demonstration program when no
//! argument is given) into a concrete syntax tree, prints the tree to
//! stdout, and renders any diagnostics against the source on stderr.
//!
//! The `LYRA_LOG` environment variable selects the log level.

use std::process::ExitCode;

use lyra_mem::{Arena, Interner};
use lyra_syntax::{Parser, print_tree};

const DEMO: &str = "fibonacci(n) = n {\n    0 -> 0,\n    1 -> 1,\n    _ -> fibonacci(n - 1) + fibonacci(n - 2),\n}\n";

fn main() -> ExitCode {
    lyra_log::init_from_env("LYRA_LOG");

    let mut source = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) => {
                lyra_log::error!("cannot read {path}: {err}");
                return ExitCode::FAILURE;
            }
        },
        None => DEMO.to_string(),
    };
    source.push('\0');

    let arena = Arena::new();
    let mut intern = Interner::new();

    let mut parser = match Parser::new(&arena, &mut intern, &source) {
        Ok(parser) => parser,
        Err(err) => {
            lyra_log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let module = parser.module();
    println!("{}", print_tree(module));

    let diagnostics = parser.into_diagnostics();
    for diagnostic in &diagnostics {
        eprintln!("{}", diagnostic.render(&source, true));
    }

    if diagnostics.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

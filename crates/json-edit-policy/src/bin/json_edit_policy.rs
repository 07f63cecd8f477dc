//! `json-edit-policy`: resolve edit policy for every node of a document.
//!
//! Usage:
//!   json-edit-policy <policy-file> [--pointer <pointer>]
//!
//! The document is read from stdin. Set `RUST_LOG=debug` to log each
//! decision to stderr.

use json_edit_policy::cli::{parse_args, run};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match run(&args, &buf) {
        Ok(lines) => {
            let mut out = io::stdout().lock();
            for line in lines {
                if let Err(e) = writeln!(out, "{line}") {
                    eprintln!("{e}");
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

#![forbid(unsafe_code)]

//! `gridarea` binary entry point.

use std::fs;
use std::io::{self, Read};
use std::process;

use gridarea_cli::cli;
use gridarea_cli::report;
use gridarea_core::warn;
use gridarea_layout::LayoutConfig;

fn main() {
    let opts = cli::Opts::parse();
    gridarea_core::logging::init(opts.log_format, "warn");

    let parsed = LayoutConfig::from_env_with_diagnostics();
    for err in &parsed.errors {
        warn!(field = err.field, value = %err.value, "ignoring config: {}", err.message);
    }

    let input = match read_input(opts.input.as_deref()) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "Failed to read {}: {e}",
                opts.input.as_deref().unwrap_or("stdin")
            );
            process::exit(1);
        }
    };

    let report = match report::run(&opts, parsed.config, &input) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            process::exit(1);
        }
    };

    if opts.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Failed to encode report: {e}");
                process::exit(1);
            }
        }
    } else {
        print!("{}", report::render_text(&report));
    }
}

fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

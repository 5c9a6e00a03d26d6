use clap::{Arg, Command};
use icalc::{repl, runner};
use std::fs;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let matches = Command::new("icalc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("An interactive integer calculator with variables")
        .arg(
            Arg::new("file")
                .help("Evaluate this file as one program instead of starting the prompt")
                .value_name("FILE")
                .index(1),
        )
        .get_matches();

    match matches.get_one::<String>("file") {
        Some(file_path) => run_file(file_path),
        None => repl::start(),
    }
}

fn run_file(path: &str) {
    match fs::read_to_string(path) {
        Ok(source) => runner::run(&source, Some(path)),
        Err(e) => println!("Error reading file '{}': {}", path, e),
    }
}

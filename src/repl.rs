use crate::evaluator::Evaluator;
use crate::parser::ParseMode;
use crate::runner::evaluate_source;
use std::io::{self, BufRead, Write};

const PROMPT: &str = ">>> ";

pub fn start() {
    println!("icalc {}", env!("CARGO_PKG_VERSION"));
    println!("Type 'exit' or press Ctrl+D to quit");
    println!();

    let stdin = io::stdin();
    let stdout = io::stdout();
    if let Err(error) = run_session(stdin.lock(), stdout.lock()) {
        eprintln!("Error reading input: {}", error);
    }
}

/// Reads one statement per line, printing each result. Variables declared
/// on earlier lines stay visible for the rest of the session.
pub fn run_session<R: BufRead, W: Write>(mut input: R, mut output: W) -> io::Result<()> {
    let mut evaluator = Evaluator::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // End of input
            writeln!(output)?;
            return Ok(());
        }

        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line == "exit" || line == "quit" {
            writeln!(output, "Goodbye!")?;
            return Ok(());
        }

        match evaluate_source(line, ParseMode::Statement, &mut evaluator) {
            Ok(value) => writeln!(output, "{}", value)?,
            Err(error) => error.emit(line, None, &mut output)?,
        }
    }
}

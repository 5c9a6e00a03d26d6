use crate::error::CalcError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::{ParseMode, Parser};
use std::io::{self, Write};
use tracing::{debug, warn};

/// Runs one unit of source text through lexer, parser and evaluator.
pub fn evaluate_source(
    source: &str,
    mode: ParseMode,
    evaluator: &mut Evaluator,
) -> Result<i64, CalcError> {
    debug!(?mode, len = source.len(), "evaluating source");
    let lexer = Lexer::new(source.to_string());
    let mut parser = Parser::new(lexer)?;
    let node = parser.parse(mode)?;
    Ok(evaluator.evaluate(&node)?)
}

/// Evaluates a whole buffer as one program with a fresh environment and
/// prints either the result or a diagnostic.
pub fn run(source: &str, filename: Option<&str>) {
    let stdout = io::stdout();
    if let Err(write_error) = run_to(source, filename, &mut stdout.lock()) {
        warn!(%write_error, "failed to write result");
    }
}

pub fn run_to<W: Write>(source: &str, filename: Option<&str>, out: &mut W) -> io::Result<()> {
    let mut evaluator = Evaluator::new();
    match evaluate_source(source, ParseMode::Program, &mut evaluator) {
        Ok(value) => writeln!(out, "{}", value),
        Err(error) => error.emit(source, filename, out),
    }
}

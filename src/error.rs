use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::io::{self, Write};
use thiserror::Error;
use tracing::warn;

use crate::lexer::TokenKind;

/// Character offsets into the source text, end exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unrecognized character `{character}`")]
    UnrecognizedCharacter { character: char, position: usize },
    #[error("malformed integer literal `{text}`")]
    MalformedInteger { text: String, span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnrecognizedCharacter { position, .. } => Span::single(*position),
            LexError::MalformedInteger { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unexpected token `{found}`, expected `{expected}`")]
    UnexpectedToken {
        found: TokenKind,
        expected: TokenKind,
        span: Span,
    },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("`{text}` is not a 64-bit integer")]
    NotAnInteger { text: String, span: Span },
}

impl ValueError {
    pub fn span(&self) -> Span {
        match self {
            ValueError::NotAnInteger { span, .. } => *span,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("division by zero")]
    DivisionByZero { span: Span },
    #[error("undefined variable `{name}`")]
    UndefinedVariable { name: String, span: Span },
    #[error("variable `{name}` is already declared")]
    VariableRedeclared { name: String, span: Span },
    #[error("unrecognized node `{kind}`")]
    UnrecognizedNode { kind: &'static str, span: Span },
    #[error("program contains no statements")]
    EmptyProgram { span: Span },
}

impl EvalError {
    pub fn span(&self) -> Span {
        match self {
            EvalError::DivisionByZero { span }
            | EvalError::UndefinedVariable { span, .. }
            | EvalError::VariableRedeclared { span, .. }
            | EvalError::UnrecognizedNode { span, .. }
            | EvalError::EmptyProgram { span } => *span,
        }
    }
}

/// Any failure surfaced by the lex → parse → evaluate pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl CalcError {
    pub fn span(&self) -> Span {
        match self {
            CalcError::Lex(e) => e.span(),
            CalcError::Parse(e) => e.span(),
            CalcError::Value(e) => e.span(),
            CalcError::Eval(e) => e.span(),
        }
    }

    pub fn help(&self) -> Option<String> {
        match self {
            CalcError::Lex(LexError::UnrecognizedCharacter { .. }) => Some(
                "Only digits, identifiers and the symbols + - * / ( ) { } = ; : are allowed."
                    .to_string(),
            ),
            CalcError::Lex(LexError::MalformedInteger { .. }) | CalcError::Value(_) => Some(format!(
                "Integer literals must fit in a signed 64-bit integer (at most {}).",
                i64::MAX
            )),
            CalcError::Parse(ParseError::UnexpectedToken { expected, .. }) => match expected {
                TokenKind::RightParen => {
                    Some("Every '(' must be closed by a matching ')'.".to_string())
                }
                TokenKind::Semicolon => Some(
                    "Separate statements with ';'. Only one operator per precedence level \
                     is folded at a time, so group longer chains: '(1 + 2) + 3'."
                        .to_string(),
                ),
                TokenKind::Identifier => {
                    Some("A declaration looks like 'var name = expression'.".to_string())
                }
                _ => None,
            },
            CalcError::Eval(EvalError::UndefinedVariable { name, .. }) => {
                Some(format!("Declare it first with 'var {} = ...'.", name))
            }
            CalcError::Eval(EvalError::VariableRedeclared { name, .. }) => Some(format!(
                "Use '{} = ...' to change the value of an existing variable.",
                name
            )),
            CalcError::Eval(_) => None,
        }
    }

    fn category(&self) -> (&'static str, Color) {
        match self {
            CalcError::Lex(_) => ("Lexical Error", Color::Red),
            CalcError::Parse(_) => ("Parse Error", Color::Yellow),
            CalcError::Value(_) => ("Value Error", Color::Blue),
            CalcError::Eval(_) => ("Runtime Error", Color::Magenta),
        }
    }

    /// Renders a source-annotated diagnostic into `writer`.
    pub fn report<W: Write>(
        &self,
        source: &str,
        filename: Option<&str>,
        writer: W,
    ) -> io::Result<()> {
        let filename = filename.unwrap_or("<repl>");
        let (kind_str, color) = self.category();
        let span = self.span();
        // EOF tokens sit one past the last character.
        let end = span.end.min(source.chars().count());
        let start = span.start.min(end);
        let message = self.to_string();

        let mut report_builder = Report::build(ReportKind::Error, filename, start)
            .with_message(format!("{}: {}", kind_str.fg(color), message))
            .with_label(
                Label::new((filename, start..end))
                    .with_message(&message)
                    .with_color(color),
            );

        if let Some(help_text) = self.help() {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        report_builder
            .finish()
            .write((filename, Source::from(source)), writer)
    }

    /// Like [`CalcError::report`], falling back to the bare message when the
    /// diagnostic cannot be rendered.
    pub fn emit<W: Write>(
        &self,
        source: &str,
        filename: Option<&str>,
        writer: &mut W,
    ) -> io::Result<()> {
        if let Err(render_error) = self.report(source, filename, &mut *writer) {
            warn!(%render_error, "failed to render diagnostic");
            writeln!(writer, "error: {}", self)?;
        }
        Ok(())
    }
}

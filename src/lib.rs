// icalc: an interactive integer calculator language.
//
// Source text is lexed into tokens, parsed into a syntax tree by a
// recursive-descent parser and reduced to a 64-bit integer by a
// tree-walking evaluator that keeps variables between calls.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;

// Re-export commonly used items
pub use ast::{BinaryOp, Identifier, Node, UnaryOp};
pub use error::{CalcError, EvalError, LexError, ParseError, Span, ValueError};
pub use evaluator::{Environment, Evaluator};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{ParseMode, Parser};

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{evaluate_source, run};

use crate::ast::{BinaryOp, Identifier, Node, UnaryOp};
use crate::error::{CalcError, ParseError, Span};
use crate::lexer::{Lexer, Token, TokenKind};
use tracing::debug;

/// Which top-level rule a parse call starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    /// A single statement (the REPL). Tokens after it are left unread.
    Statement,
    /// A `;`-separated statement sequence (whole files).
    Program,
}

/// Recursive-descent parser pulling tokens from a [`Lexer`] one at a time.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// program   := statement (';' statement)* ';'? EOF
/// statement := 'var' IDENTIFIER '=' expr
///            | IDENTIFIER '=' expr
///            | expr
/// expr      := term (('+' | '-') term)?
/// term      := factor (('*' | '/') factor)?
/// factor    := INTEGER | '(' expr ')' | ('+' | '-') factor | IDENTIFIER
/// ```
///
/// `expr` and `term` fold in at most one operator each: `2 * 3 + 4` parses,
/// `1 + 2 + 3` stops after `1 + 2` and leaves `+ 3` unconsumed. Statement
/// mode ignores the leftover tokens; program mode rejects them.
pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, CalcError> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    pub fn parse(&mut self, mode: ParseMode) -> Result<Node, CalcError> {
        let node = match mode {
            ParseMode::Statement => self.parse_statement()?,
            ParseMode::Program => self.parse_program()?,
        };
        debug!(?mode, ast = %node, "parsed");
        Ok(node)
    }

    /// Parses one statement and stops; `1 + 2 + 3` yields `(+ 1 2)`.
    pub fn parse_statement(&mut self) -> Result<Node, CalcError> {
        self.statement()
    }

    pub fn parse_program(&mut self) -> Result<Node, CalcError> {
        let mut statements = Vec::new();

        while !self.check(TokenKind::Eof) {
            statements.push(self.statement()?);
            if self.check(TokenKind::Eof) {
                break;
            }
            self.consume(TokenKind::Semicolon)?;
        }

        Ok(Node::Program {
            statements,
            span: Span::new(0, self.current.span.start),
        })
    }

    fn statement(&mut self) -> Result<Node, CalcError> {
        if self.current.is_keyword("var") {
            return self.var_declaration();
        }

        if self.check(TokenKind::Identifier) && self.lexer.peek(0) == Some('=') {
            return self.var_assignment();
        }

        self.expr()
    }

    fn var_declaration(&mut self) -> Result<Node, CalcError> {
        self.consume(TokenKind::Keyword)?;
        let name = Identifier::new(self.consume(TokenKind::Identifier)?);
        let equals = self.consume(TokenKind::Equal)?;
        let value = self.expr()?;

        Ok(Node::var_decl(name, equals, value))
    }

    fn var_assignment(&mut self) -> Result<Node, CalcError> {
        let name = Identifier::new(self.consume(TokenKind::Identifier)?);
        let equals = self.consume(TokenKind::Equal)?;
        let value = self.expr()?;

        Ok(Node::var_assign(name, equals, value))
    }

    fn expr(&mut self) -> Result<Node, CalcError> {
        let left = self.term()?;

        if let Some(operator @ (BinaryOp::Add | BinaryOp::Subtract)) =
            BinaryOp::from_token_kind(self.current.kind)
        {
            let token = self.consume(self.current.kind)?;
            let right = self.term()?;
            return Ok(Node::binary(left, operator, token, right));
        }

        Ok(left)
    }

    fn term(&mut self) -> Result<Node, CalcError> {
        let left = self.factor()?;

        if let Some(operator @ (BinaryOp::Multiply | BinaryOp::Divide)) =
            BinaryOp::from_token_kind(self.current.kind)
        {
            let token = self.consume(self.current.kind)?;
            let right = self.factor()?;
            return Ok(Node::binary(left, operator, token, right));
        }

        Ok(left)
    }

    fn factor(&mut self) -> Result<Node, CalcError> {
        match self.current.kind {
            TokenKind::Integer => {
                let token = self.consume(TokenKind::Integer)?;
                Ok(Node::integer(token)?)
            }
            TokenKind::LeftParen => {
                self.consume(TokenKind::LeftParen)?;
                let inner = self.expr()?;
                self.consume(TokenKind::RightParen)?;
                Ok(inner)
            }
            kind @ (TokenKind::Plus | TokenKind::Minus) => {
                let operator = if kind == TokenKind::Plus {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Negate
                };
                let token = self.consume(kind)?;
                let operand = self.factor()?;
                Ok(Node::unary(operator, token, operand))
            }
            TokenKind::Identifier => {
                let token = self.consume(TokenKind::Identifier)?;
                Ok(Node::Identifier(Identifier::new(token)))
            }
            _ => Err(self.unexpected(TokenKind::Integer)),
        }
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Requires the current token to be `kind`, returns it and pulls the next one.
    fn consume(&mut self, kind: TokenKind) -> Result<Token, CalcError> {
        if !self.check(kind) {
            return Err(self.unexpected(kind));
        }

        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn unexpected(&self, expected: TokenKind) -> CalcError {
        ParseError::UnexpectedToken {
            found: self.current.kind,
            expected,
            span: self.current.span,
        }
        .into()
    }
}

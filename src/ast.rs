use crate::error::{Span, ValueError};
use crate::lexer::{Token, TokenKind};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl BinaryOp {
    pub fn from_token_kind(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Subtract),
            TokenKind::Star => Some(BinaryOp::Multiply),
            TokenKind::Slash => Some(BinaryOp::Divide),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,
    Negate,
}

impl UnaryOp {
    pub fn symbol(&self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Negate => "-",
        }
    }
}

/// A variable name, kept as the token it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub token: Token,
}

impl Identifier {
    pub fn new(token: Token) -> Self {
        Self { token }
    }

    pub fn name(&self) -> &str {
        &self.token.lexeme
    }
}

/// One node of the syntax tree. Each variant owns exactly the children it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Program {
        statements: Vec<Node>,
        span: Span,
    },
    IntegerLiteral {
        value: i64,
        token: Token,
    },
    BinaryOp {
        left: Box<Node>,
        operator: BinaryOp,
        token: Token,
        right: Box<Node>,
    },
    UnaryOp {
        operator: UnaryOp,
        token: Token,
        operand: Box<Node>,
    },
    Identifier(Identifier),
    VarDecl {
        name: Identifier,
        value: Box<Node>,
        /// The `=` token.
        token: Token,
    },
    VarAssign {
        name: Identifier,
        value: Box<Node>,
        /// The `=` token.
        token: Token,
    },
}

impl Node {
    /// Builds an integer literal, re-validating the token text.
    pub fn integer(token: Token) -> Result<Node, ValueError> {
        match token.lexeme.parse::<i64>() {
            Ok(value) => Ok(Node::IntegerLiteral { value, token }),
            Err(_) => Err(ValueError::NotAnInteger {
                text: token.lexeme,
                span: token.span,
            }),
        }
    }

    pub fn binary(left: Node, operator: BinaryOp, token: Token, right: Node) -> Node {
        Node::BinaryOp {
            left: Box::new(left),
            operator,
            token,
            right: Box::new(right),
        }
    }

    pub fn unary(operator: UnaryOp, token: Token, operand: Node) -> Node {
        Node::UnaryOp {
            operator,
            token,
            operand: Box::new(operand),
        }
    }

    pub fn var_decl(name: Identifier, token: Token, value: Node) -> Node {
        Node::VarDecl {
            name,
            value: Box::new(value),
            token,
        }
    }

    pub fn var_assign(name: Identifier, token: Token, value: Node) -> Node {
        Node::VarAssign {
            name,
            value: Box::new(value),
            token,
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Node::Program { .. } => "Program",
            Node::IntegerLiteral { .. } => "IntegerLiteral",
            Node::BinaryOp { .. } => "BinaryOp",
            Node::UnaryOp { .. } => "UnaryOp",
            Node::Identifier(_) => "Identifier",
            Node::VarDecl { .. } => "VarDecl",
            Node::VarAssign { .. } => "VarAssign",
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Program { span, .. } => *span,
            Node::IntegerLiteral { token, .. } => token.span,
            Node::BinaryOp { left, right, .. } => Span::new(left.span().start, right.span().end),
            Node::UnaryOp { token, operand, .. } => Span::new(token.span.start, operand.span().end),
            Node::Identifier(ident) => ident.token.span,
            Node::VarDecl { name, value, .. } | Node::VarAssign { name, value, .. } => {
                Span::new(name.token.span.start, value.span().end)
            }
        }
    }
}

/// Fully parenthesized prefix form, e.g. `(+ (* 2 3) 4)`.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Node::Program { statements, .. } => {
                for (i, statement) in statements.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", statement)?;
                }
                Ok(())
            }
            Node::IntegerLiteral { value, .. } => write!(f, "{}", value),
            Node::BinaryOp {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", operator.symbol(), left, right),
            Node::UnaryOp {
                operator, operand, ..
            } => write!(f, "({} {})", operator.symbol(), operand),
            Node::Identifier(ident) => write!(f, "{}", ident.name()),
            Node::VarDecl { name, value, .. } => write!(f, "(var {} {})", name.name(), value),
            Node::VarAssign { name, value, .. } => write!(f, "(= {} {})", name.name(), value),
        }
    }
}

use crate::error::{LexError, Span};
use std::fmt;
use tracing::trace;

/// Reserved words. `func` is reserved but not used by the grammar yet.
pub const KEYWORDS: [&str; 2] = ["var", "func"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Literals
    Integer,
    Identifier,
    Keyword,

    // Single-character tokens
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Equal,
    Semicolon,
    Colon,

    // Special
    Eof,
}

impl TokenKind {
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Integer => "INTEGER",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "STAR",
            TokenKind::Slash => "SLASH",
            TokenKind::LeftParen => "LPAREN",
            TokenKind::RightParen => "RPAREN",
            TokenKind::LeftBrace => "LCURLY",
            TokenKind::RightBrace => "RCURLY",
            TokenKind::Equal => "EQUALS",
            TokenKind::Semicolon => "SEMI",
            TokenKind::Colon => "COLON",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.lexeme == word
    }
}

/// Pull-based lexer: each call to [`Lexer::next_token`] scans exactly one token.
pub struct Lexer {
    chars: Vec<char>,
    current: usize,
}

impl Lexer {
    pub fn new(source: String) -> Self {
        Self {
            chars: source.chars().collect(),
            current: 0,
        }
    }

    /// Current character offset into the source.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();
        let start = self.current;

        let c = match self.current_char() {
            Some(c) => c,
            None => return Ok(Token::new(TokenKind::Eof, "", Span::single(start))),
        };

        let token = if c.is_ascii_digit() {
            self.integer()?
        } else if c.is_alphabetic() || c == '_' {
            self.identifier()
        } else {
            let kind = match c {
                '+' => TokenKind::Plus,
                '-' => TokenKind::Minus,
                '*' => TokenKind::Star,
                '/' => TokenKind::Slash,
                '(' => TokenKind::LeftParen,
                ')' => TokenKind::RightParen,
                '{' => TokenKind::LeftBrace,
                '}' => TokenKind::RightBrace,
                '=' => TokenKind::Equal,
                ';' => TokenKind::Semicolon,
                ':' => TokenKind::Colon,
                _ => {
                    return Err(LexError::UnrecognizedCharacter {
                        character: c,
                        position: start,
                    })
                }
            };
            self.current += 1;
            self.make_token(kind, start)
        };

        trace!(kind = %token.kind, lexeme = %token.lexeme, start = token.span.start, "token");
        Ok(token)
    }

    /// Scans the remaining input, returning every token up to and including EOF.
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    /// Looks `offset` characters ahead of the current position, skipping any
    /// whitespace and digit runs met on the way. `None` past the end of input.
    pub fn peek(&self, offset: usize) -> Option<char> {
        let mut index = self.current + offset;
        while let Some(&c) = self.chars.get(index) {
            if c.is_whitespace() || c.is_ascii_digit() {
                index += 1;
            } else {
                return Some(c);
            }
        }
        None
    }

    fn current_char(&self) -> Option<char> {
        self.chars.get(self.current).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.current_char().is_some_and(char::is_whitespace) {
            self.current += 1;
        }
    }

    fn integer(&mut self) -> Result<Token, LexError> {
        let start = self.current;
        while self.current_char().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }

        let token = self.make_token(TokenKind::Integer, start);
        if token.lexeme.parse::<i64>().is_err() {
            return Err(LexError::MalformedInteger {
                text: token.lexeme,
                span: token.span,
            });
        }
        Ok(token)
    }

    fn identifier(&mut self) -> Token {
        let start = self.current;
        while self
            .current_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_')
        {
            self.current += 1;
        }

        let mut token = self.make_token(TokenKind::Identifier, start);
        if KEYWORDS.contains(&token.lexeme.as_str()) {
            token.kind = TokenKind::Keyword;
        }
        token
    }

    fn make_token(&self, kind: TokenKind, start: usize) -> Token {
        let lexeme: String = self.chars[start..self.current].iter().collect();
        Token::new(kind, lexeme, Span::new(start, self.current))
    }
}

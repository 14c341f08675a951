use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

#[derive(Serialize, Debug, Copy, Clone, Eq, PartialEq)]
pub enum TokenType {
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,
    Comma,
    Semicolon,
    Equal,
    Plus,
    Minus,
    Star,
    Slash,
    Identifier,
    Number,
    String,
    Func,
    Print,
    Variable,
    Illegal,
    Eof,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Token {
    pub ty: TokenType,
    pub literal: String,
    pub line: usize,
    pub col: i64,
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}({:?}) at line {}, col {}",
            self.ty, self.literal, self.line, self.col
        )
    }
}

pub struct Scanner {
    source: Vec<char>,
    cursor: usize,
    line: usize,
    col: i64,
    keywords: HashMap<String, TokenType>,
}

impl Scanner {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            cursor: 0,
            line: 1,
            col: 1,
            keywords: vec![
                ("func", TokenType::Func),
                ("print", TokenType::Print),
                ("variable", TokenType::Variable),
            ]
            .into_iter()
            .map(|(keyword, ty)| (keyword.to_string(), ty))
            .collect(),
        }
    }

    /// Consumes leading whitespace, then classifies and returns the next
    /// token. At end of input this returns `Eof` tokens indefinitely.
    pub fn next_token(&mut self) -> Token {
        while let Some(ch) = self.peek_char() {
            if !ch.is_whitespace() {
                break;
            }
            self.advance();
        }

        let (line, col) = (self.line, self.col);
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return self.make_token(TokenType::Eof, String::new(), line, col),
        };

        let single = match ch {
            '(' => Some(TokenType::LeftParen),
            ')' => Some(TokenType::RightParen),
            '{' => Some(TokenType::LeftBrace),
            '}' => Some(TokenType::RightBrace),
            '[' => Some(TokenType::LeftBracket),
            ']' => Some(TokenType::RightBracket),
            ',' => Some(TokenType::Comma),
            ';' => Some(TokenType::Semicolon),
            '=' => Some(TokenType::Equal),
            '+' => Some(TokenType::Plus),
            '-' => Some(TokenType::Minus),
            '*' => Some(TokenType::Star),
            '/' => Some(TokenType::Slash),
            _ => None,
        };
        if let Some(ty) = single {
            return self.make_token(ty, ch.to_string(), line, col);
        }

        if ch == '"' {
            let literal = self.scan_string();
            return self.make_token(TokenType::String, literal, line, col);
        }
        if ch.is_ascii_digit() {
            let literal = self.scan_while(ch, |c| c.is_ascii_digit());
            return self.make_token(TokenType::Number, literal, line, col);
        }
        if ch.is_alphabetic() {
            let literal = self.scan_while(ch, |c| c.is_alphanumeric());
            let ty = self
                .keywords
                .get(&literal)
                .copied()
                .unwrap_or(TokenType::Identifier);
            return self.make_token(ty, literal, line, col);
        }

        self.make_token(TokenType::Illegal, ch.to_string(), line, col)
    }

    /// Returns the upcoming token without advancing the stream.
    pub fn peek_token(&mut self) -> Token {
        let (cursor, line, col) = (self.cursor, self.line, self.col);
        let token = self.next_token();
        self.cursor = cursor;
        self.line = line;
        self.col = col;
        token
    }

    fn make_token(&self, ty: TokenType, literal: String, line: usize, col: i64) -> Token {
        Token {
            ty,
            literal,
            line,
            col,
        }
    }

    // Everything up to the closing quote, captured verbatim. An escaped
    // quote does not terminate the string; an unterminated string is
    // truncated at end of input rather than rejected.
    fn scan_string(&mut self) -> String {
        let mut literal = String::new();
        while let Some(ch) = self.advance() {
            match ch {
                '"' => break,
                '\\' => {
                    literal.push(ch);
                    if let Some(escaped) = self.advance() {
                        literal.push(escaped);
                    }
                }
                _ => literal.push(ch),
            }
        }
        literal
    }

    fn scan_while(&mut self, first: char, matches: fn(char) -> bool) -> String {
        let mut literal = first.to_string();
        while let Some(ch) = self.peek_char() {
            if !matches(ch) {
                break;
            }
            literal.push(ch);
            self.advance();
        }
        literal
    }

    fn advance(&mut self) -> Option<char> {
        let ch = *self.source.get(self.cursor)?;
        self.cursor += 1;
        if ch == '\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn peek_char(&self) -> Option<char> {
        self.source.get(self.cursor).copied()
    }
}

/// Collects the whole token stream, `Eof` included. Scanning never fails;
/// unexpected characters come back as `Illegal` tokens for the parser to
/// reject.
pub fn scan_tokens(source: &str) -> Vec<Token> {
    let mut scanner = Scanner::new(source);
    let mut tokens = Vec::new();
    loop {
        let token = scanner.next_token();
        let done = token.ty == TokenType::Eof;
        tokens.push(token);
        if done {
            return tokens;
        }
    }
}

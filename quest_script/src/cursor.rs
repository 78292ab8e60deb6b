//! Token-level helpers on top of the scanner: lookahead, separator skipping,
//! and the typed `next_*` readers the directive parser is built from.

use crate::error::ParseError;
use crate::scanner::{Scanner, Token, TokenKind};

pub struct Cursor<'a> {
    scanner: Scanner<'a>,
}

impl<'a> Cursor<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            scanner: Scanner::new(source),
        }
    }

    pub fn peek(&mut self) -> Token {
        self.scanner.peek_token()
    }

    pub fn advance(&mut self) -> Token {
        self.scanner.next_token()
    }

    pub fn at_end(&mut self) -> bool {
        self.peek().kind == TokenKind::EndOfFile
    }

    /// Consume separators of any length.
    pub fn skip_separators(&mut self) {
        while self.peek().kind == TokenKind::Separator {
            self.advance();
        }
    }

    /// Consume an identifier equal to `literal`, ignoring ASCII case.
    pub fn expect(&mut self, literal: &str) -> Result<(), ParseError> {
        self.skip_separators();
        let token = self.advance();
        if token.is_identifier() && token.text.eq_ignore_ascii_case(literal) {
            Ok(())
        } else {
            Err(unexpected(format!("'{literal}'"), &token))
        }
    }

    pub fn next_identifier(&mut self) -> Result<Token, ParseError> {
        self.skip_separators();
        let token = self.advance();
        if token.is_identifier() {
            Ok(token)
        } else {
            Err(unexpected("an identifier".to_string(), &token))
        }
    }

    pub fn next_word(&mut self) -> Result<String, ParseError> {
        self.skip_separators();
        let token = self.advance();
        if token.is_word() {
            Ok(token.text)
        } else {
            Err(unexpected("a word".to_string(), &token))
        }
    }

    pub fn next_number(&mut self) -> Result<i64, ParseError> {
        self.skip_separators();
        let token = self.advance();
        if token.kind == TokenKind::Integer {
            Ok(token.value)
        } else {
            Err(unexpected("a number".to_string(), &token))
        }
    }

    /// Single-line text: words joined with nothing in between, up to the next
    /// separator of any length.
    pub fn next_string(&mut self) -> Result<String, ParseError> {
        self.skip_separators();
        self.with_whitespace(|cursor| {
            let mut text = String::new();
            while cursor.peek().is_word() {
                text.push_str(&cursor.next_word()?);
            }
            Ok(text)
        })
    }

    /// Multi-line text: a single newline becomes `\n`, a blank line ends the
    /// block and is consumed.
    pub fn next_text_block(&mut self) -> Result<String, ParseError> {
        self.skip_separators();
        self.with_whitespace(|cursor| {
            let mut text = String::new();
            let mut pending_newlines = 0;
            loop {
                let token = cursor.peek();
                match token.kind {
                    TokenKind::EndOfFile => break,
                    TokenKind::Separator if token.is_break() => {
                        cursor.advance();
                        break;
                    },
                    TokenKind::Separator => {
                        cursor.advance();
                        pending_newlines += 1;
                    },
                    TokenKind::Identifier | TokenKind::Integer => {
                        for _ in 0..pending_newlines {
                            text.push('\n');
                        }
                        pending_newlines = 0;
                        text.push_str(&cursor.next_word()?);
                    },
                }
            }
            Ok(text)
        })
    }

    fn with_whitespace<T>(
        &mut self,
        read: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let previous = self.scanner.allows_whitespace();
        self.scanner.set_allow_whitespace(true);
        let result = read(self);
        self.scanner.set_allow_whitespace(previous);
        result
    }
}

fn unexpected(expected: String, found: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        expected,
        found: found.to_string(),
        offset: found.offset,
    }
}

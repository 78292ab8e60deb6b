//! Character-level scanner for quest sources.
//!
//! The scanner is ASCII-oriented and never fails: anything that is not a
//! separator, a scope marker or an integer comes back as an identifier.

use std::fmt;

/// Marker that starts a line comment.
pub const COMMENT_MARKER: &[u8] = b"$-";
/// Scope separator between a keyword and its value.
pub const SCOPE: u8 = b':';

const OPEN_SPAN: u8 = b'(';
const CLOSE_SPAN: u8 = b')';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Integer,
    /// A run of newlines; `Token::value` holds the count.
    Separator,
    EndOfFile,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub value: i64,
    /// Byte offset of the first character of the token.
    pub offset: usize,
}

impl Token {
    fn identifier(text: &str, offset: usize) -> Self {
        Self {
            kind: TokenKind::Identifier,
            text: text.to_string(),
            value: 0,
            offset,
        }
    }

    fn integer(value: i64, offset: usize) -> Self {
        Self {
            kind: TokenKind::Integer,
            text: value.to_string(),
            value,
            offset,
        }
    }

    fn separator(count: usize, offset: usize) -> Self {
        Self {
            kind: TokenKind::Separator,
            text: String::new(),
            value: i64::try_from(count).unwrap_or(i64::MAX),
            offset,
        }
    }

    fn end_of_file(offset: usize) -> Self {
        Self {
            kind: TokenKind::EndOfFile,
            text: String::new(),
            value: 0,
            offset,
        }
    }

    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Identifiers and integers both count as words.
    pub fn is_word(&self) -> bool {
        matches!(self.kind, TokenKind::Identifier | TokenKind::Integer)
    }

    /// True for a separator spanning more than one newline.
    pub fn is_break(&self) -> bool {
        self.kind == TokenKind::Separator && self.value >= 2
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Integer => write!(f, "integer {}", self.value),
            TokenKind::Separator if self.value == 1 => write!(f, "line break"),
            TokenKind::Separator => write!(f, "{} line breaks", self.value),
            TokenKind::EndOfFile => write!(f, "end of file"),
        }
    }
}

/// Complete mutable state of a `Scanner`, used for lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    position: usize,
    allow_whitespace: bool,
}

pub struct Scanner<'a> {
    source: &'a str,
    position: usize,
    allow_whitespace: bool,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            position: 0,
            allow_whitespace: false,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn allows_whitespace(&self) -> bool {
        self.allow_whitespace
    }

    /// In whitespace-allowing mode spaces and tabs stay inside a word.
    pub fn set_allow_whitespace(&mut self, allow: bool) {
        self.allow_whitespace = allow;
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            position: self.position,
            allow_whitespace: self.allow_whitespace,
        }
    }

    pub fn restore(&mut self, snapshot: Snapshot) {
        self.position = snapshot.position;
        self.allow_whitespace = snapshot.allow_whitespace;
    }

    /// Scan the next token without consuming it.
    pub fn peek_token(&mut self) -> Token {
        let snapshot = self.snapshot();
        let token = self.next_token();
        self.restore(snapshot);
        token
    }

    /// Scan and consume the next token.
    pub fn next_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();
            let start = self.position;
            let Some(byte) = self.current() else {
                return Token::end_of_file(self.source.len());
            };

            if self.rest().starts_with(COMMENT_MARKER) {
                self.skip_comment();
                continue;
            }

            return match byte {
                SCOPE => {
                    self.position += 1;
                    Token::identifier(":", start)
                },
                b'\n' => self.separator(start),
                _ => self.word(start),
            };
        }
    }

    fn bytes(&self) -> &'a [u8] {
        self.source.as_bytes()
    }

    fn rest(&self) -> &'a [u8] {
        &self.bytes()[self.position..]
    }

    fn current(&self) -> Option<u8> {
        self.bytes().get(self.position).copied()
    }

    fn skip_whitespace(&mut self) {
        while self.current().is_some_and(is_horizontal_whitespace) {
            self.position += 1;
        }
    }

    /// Skip through the end of the line, newline included.
    fn skip_comment(&mut self) {
        while let Some(byte) = self.current() {
            self.position += 1;
            if byte == b'\n' {
                break;
            }
        }
    }

    fn separator(&mut self, start: usize) -> Token {
        let mut count = 0;
        while self.current() == Some(b'\n') {
            count += 1;
            self.position += 1;
            self.skip_whitespace();
        }
        Token::separator(count, start)
    }

    fn word(&mut self, start: usize) -> Token {
        let span = self.current() == Some(OPEN_SPAN);
        let allow_whitespace = self.allow_whitespace || span;
        let mut depth = 0i32;

        while let Some(byte) = self.current() {
            if byte == b'\n' || byte == SCOPE || (!allow_whitespace && is_horizontal_whitespace(byte)) {
                break;
            }
            self.position += 1;
            if span {
                match byte {
                    OPEN_SPAN => depth += 1,
                    CLOSE_SPAN => {
                        depth -= 1;
                        if depth == 0 {
                            break;
                        }
                    },
                    _ => {},
                }
            }
        }

        let mut end = self.position;
        if allow_whitespace {
            while end > start && is_horizontal_whitespace(self.bytes()[end - 1]) {
                end -= 1;
            }
        }

        let text = &self.source[start..end];
        match text.parse::<i64>() {
            Ok(value) => Token::integer(value, start),
            Err(_) => Token::identifier(text, start),
        }
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let token = self.next_token();
        (token.kind != TokenKind::EndOfFile).then_some(token)
    }
}

/// Whitespace that does not end a line.
fn is_horizontal_whitespace(byte: u8) -> bool {
    (byte.is_ascii_whitespace() && byte != b'\n') || byte == 0x0b
}

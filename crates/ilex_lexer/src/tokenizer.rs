use std::borrow::Cow;
use std::iter::FusedIterator;

use ilex_span::Span;
use memchr::memchr;
use tracing::trace;

use super::token::{Token, TokenKind};

/// Construction options for a [`Tokenizer`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexerConfig {
    /// Lex `a-f`/`A-F` as hex digits once a number has started, and treat every
    /// number as `Hex`.
    pub hex_by_default: bool,
}

/// On-demand tokenizer over a borrowed byte buffer.
///
/// The cursor is the only mutable state: tokens are produced one per call and
/// nothing is buffered. Callers can snapshot the cursor with
/// [`Tokenizer::cursor`] and restore it with [`Tokenizer::rewind`].
#[derive(Debug, Clone)]
pub struct Tokenizer<'src> {
    source: &'src [u8],
    cursor: usize,
    hex_by_default: bool,
}

impl<'src> Tokenizer<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_hex(source: &'src [u8], hex_by_default: bool) -> Self {
        Self::with_config(source, LexerConfig { hex_by_default })
    }

    pub fn with_config(source: &'src [u8], config: LexerConfig) -> Self {
        Self {
            source,
            cursor: 0,
            hex_by_default: config.hex_by_default,
        }
    }

    pub fn source(&self) -> &'src [u8] {
        self.source
    }

    pub fn hex_by_default(&self) -> bool {
        self.hex_by_default
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor to `cursor`, clamped to the end of the buffer.
    pub fn rewind(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.source.len());
    }

    //=========================
    // Token retrieval
    //=========================

    /// Lexes the next token. Returns an `End` token, without moving, once the
    /// buffer is exhausted.
    pub fn next_token(&mut self) -> Token<'src> {
        self.lex(false)
    }

    /// Like [`Tokenizer::next_token`], but a leading `a-f`/`A-F` starts a `Hex`
    /// number instead of a string.
    pub fn next_token_expecting_hex(&mut self) -> Token<'src> {
        self.lex(true)
    }

    /// Reads the next `expected.len()` raw bytes and keeps them only if they
    /// spell `expected`. On mismatch the cursor is left where it was.
    pub fn expect_string(&mut self, expected: &str) -> Option<Token<'src>> {
        let checkpoint = self.cursor;
        let token = self.read(expected.len());

        if token.text() == expected {
            return Some(token);
        }

        trace!(expected, found = token.text(), "expect_string rolled back");
        self.cursor = checkpoint;
        None
    }

    /// Lexes the next token and keeps it only if it has kind `expected`. On
    /// mismatch the cursor is left where it was.
    pub fn expect_kind(&mut self, expected: TokenKind) -> Option<Token<'src>> {
        let checkpoint = self.cursor;
        let token = self.lex(expected == TokenKind::Hex);

        if token.kind == expected {
            return Some(token);
        }

        trace!(%expected, found = %token.kind, "expect_kind rolled back");
        self.cursor = checkpoint;
        None
    }

    /// Takes `count` raw bytes after any leading whitespace, whatever their
    /// class. Returns fewer when the buffer runs out.
    pub fn read(&mut self, count: usize) -> Token<'src> {
        if count == 0 {
            return Token::new(TokenKind::String, "", Span::empty(self.cursor));
        }

        self.skip_whitespace();
        let start = self.cursor;
        self.cursor = start.saturating_add(count).min(self.source.len());
        self.token_from(TokenKind::String, start)
    }

    /// Takes every byte after any leading whitespace up to, not including,
    /// `delimiter` or the end of the buffer. The delimiter stays unread.
    ///
    /// A delimiter at the cursor yields an empty token and no progress, so a
    /// loop over `read_to` must consume the delimiter itself to terminate.
    pub fn read_to(&mut self, delimiter: u8) -> Token<'src> {
        self.skip_whitespace();
        let start = self.cursor;
        self.cursor = memchr(delimiter, &self.source[start..])
            .map_or(self.source.len(), |offset| start + offset);
        self.token_from(TokenKind::String, start)
    }

    /// Text of the next token, leaving the cursor untouched.
    pub fn peek(&mut self) -> Cow<'src, str> {
        self.peek_token().text
    }

    pub fn peek_token(&mut self) -> Token<'src> {
        let checkpoint = self.cursor;
        let token = self.next_token();
        self.cursor = checkpoint;
        token
    }

    /// Fraction of the buffer consumed so far: `0.0` at the start, `1.0` or
    /// slightly above once the stream is completed.
    pub fn progress(&self) -> f32 {
        match self.source.len() {
            0 | 1 => {
                if self.completed_stream() {
                    1.0
                } else {
                    0.0
                }
            }
            len => (self.cursor as f64 / (len - 1) as f64) as f32,
        }
    }

    pub fn completed_stream(&self) -> bool {
        self.cursor >= self.source.len()
    }

    //=========================
    // Lexing
    //=========================

    fn lex(&mut self, expect_hex: bool) -> Token<'src> {
        self.skip_whitespace();

        let Some(byte) = self.current() else {
            return Token::end(self.cursor);
        };

        match byte {
            b'-' | b'0'..=b'9' => self.number_token(self.hex_by_default),
            b'a'..=b'f' | b'A'..=b'F' if expect_hex => self.number_token(true),
            b'_' => self.string_token(),
            byte if byte.is_ascii_alphabetic() => self.string_token(),
            byte => {
                let kind = TokenKind::from_symbol(byte).unwrap_or(TokenKind::Unknown);
                self.single_byte_token(kind)
            }
        }
    }

    fn single_byte_token(&mut self, kind: TokenKind) -> Token<'src> {
        let start = self.cursor;
        self.cursor += 1;
        self.token_from(kind, start)
    }

    fn string_token(&mut self) -> Token<'src> {
        let start = self.cursor;
        self.cursor += 1;
        self.advance_while(is_string_byte);
        self.token_from(TokenKind::String, start)
    }

    fn number_token(&mut self, is_hex: bool) -> Token<'src> {
        let start = self.cursor;

        if self.current() == Some(b'-') {
            // A lone `-`, or one in front of anything but a digit, is punctuation.
            if !self.byte_at(start + 1).is_some_and(|byte| byte.is_ascii_digit()) {
                return self.single_byte_token(TokenKind::Hyphen);
            }
            self.cursor += 1;
        }

        let has_prefix =
            self.current() == Some(b'0') && self.byte_at(self.cursor + 1) == Some(b'x');
        let kind = if is_hex || has_prefix {
            TokenKind::Hex
        } else {
            TokenKind::Decimal
        };

        if has_prefix {
            self.cursor += 2;
        }

        // `.` is a decimal point in `Decimal` and a token boundary in `Hex`.
        match kind {
            TokenKind::Hex => self.advance_while(|byte| byte.is_ascii_hexdigit()),
            _ => self.advance_while(|byte| byte.is_ascii_digit() || byte == b'.'),
        }

        self.token_from(kind, start)
    }

    //=========================
    // Cursor helpers
    //=========================

    fn current(&self) -> Option<u8> {
        self.byte_at(self.cursor)
    }

    fn byte_at(&self, index: usize) -> Option<u8> {
        self.source.get(index).copied()
    }

    fn advance_while(&mut self, predicate: impl Fn(u8) -> bool) {
        while self.current().is_some_and(&predicate) {
            self.cursor += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        self.advance_while(is_whitespace);
    }

    fn token_from(&self, kind: TokenKind, start: usize) -> Token<'src> {
        let source = self.source;
        Token::from_bytes(kind, &source[start..self.cursor], Span::new(start, self.cursor))
    }
}

impl<'src> From<&'src str> for Tokenizer<'src> {
    fn from(source: &'src str) -> Self {
        Self::new(source.as_bytes())
    }
}

/// Yields tokens up to, not including, the `End` token.
impl<'src> Iterator for Tokenizer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        (!token.is_end()).then_some(token)
    }
}

impl FusedIterator for Tokenizer<'_> {}

/// Lexes the whole of `source` into a token list, `End` excluded.
pub fn tokenize(source: &[u8], config: LexerConfig) -> Vec<Token<'_>> {
    Tokenizer::with_config(source, config).collect()
}

fn is_whitespace(byte: u8) -> bool {
    matches!(byte, b' ' | b'\n' | b'\r' | b'\t')
}

fn is_string_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-'
}

use std::borrow::Cow;
use std::fmt;

use ilex_span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    End,
    Unknown,

    String,
    /// Reserved: the tokenizer never emits it, see [`Token::into_float`].
    Float,
    Decimal,
    /// Hexadecimal integer, with or without a `0x` prefix.
    Hex,

    Hyphen,
    Comma,
    LeftBracket,
    RightBracket,
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    FwdSlash,
    LessThan,
    GreaterThan,
    Equal,
    Plus,
    Star,
    BackSlash,
    Pound,
    Period,
    SemiColon,
    Colon,
    Apostrophe,
    Quote,
    Pipe,

    NullTerminator,
}

impl TokenKind {
    /// Kind of the single-byte token for `byte`, if it is one of the fixed symbols.
    pub fn from_symbol(byte: u8) -> Option<Self> {
        let kind = match byte {
            b'-' => TokenKind::Hyphen,
            b',' => TokenKind::Comma,
            b'[' => TokenKind::LeftBracket,
            b']' => TokenKind::RightBracket,
            b'{' => TokenKind::LeftBrace,
            b'}' => TokenKind::RightBrace,
            b'(' => TokenKind::LeftParen,
            b')' => TokenKind::RightParen,
            b'/' => TokenKind::FwdSlash,
            b'<' => TokenKind::LessThan,
            b'>' => TokenKind::GreaterThan,
            b'=' => TokenKind::Equal,
            b'+' => TokenKind::Plus,
            b'*' => TokenKind::Star,
            b'\\' => TokenKind::BackSlash,
            b'#' => TokenKind::Pound,
            b'.' => TokenKind::Period,
            b';' => TokenKind::SemiColon,
            b':' => TokenKind::Colon,
            b'\'' => TokenKind::Apostrophe,
            b'"' => TokenKind::Quote,
            b'|' => TokenKind::Pipe,
            b'\0' => TokenKind::NullTerminator,
            _ => return None,
        };
        Some(kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::End => "end",
            TokenKind::Unknown => "unknown",
            TokenKind::String => "string",
            TokenKind::Float => "float",
            TokenKind::Decimal => "decimal",
            TokenKind::Hex => "hex",
            TokenKind::Hyphen => "hyphen",
            TokenKind::Comma => "comma",
            TokenKind::LeftBracket => "left_bracket",
            TokenKind::RightBracket => "right_bracket",
            TokenKind::LeftBrace => "left_brace",
            TokenKind::RightBrace => "right_brace",
            TokenKind::LeftParen => "left_paren",
            TokenKind::RightParen => "right_paren",
            TokenKind::FwdSlash => "fwd_slash",
            TokenKind::LessThan => "less_than",
            TokenKind::GreaterThan => "greater_than",
            TokenKind::Equal => "equal",
            TokenKind::Plus => "plus",
            TokenKind::Star => "star",
            TokenKind::BackSlash => "back_slash",
            TokenKind::Pound => "pound",
            TokenKind::Period => "period",
            TokenKind::SemiColon => "semicolon",
            TokenKind::Colon => "colon",
            TokenKind::Apostrophe => "apostrophe",
            TokenKind::Quote => "quote",
            TokenKind::Pipe => "pipe",
            TokenKind::NullTerminator => "null_terminator",
        }
    }

    pub fn is_number(self) -> bool {
        matches!(self, TokenKind::Float | TokenKind::Decimal | TokenKind::Hex)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One classified run of input.
///
/// `text` borrows from the tokenizer's buffer whenever the covered bytes are
/// valid UTF-8, which always holds for the ASCII alphabet. Stray non-UTF-8 bytes
/// are decoded lossily into an owned string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: Cow<'src, str>,
    pub span: Span,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: impl Into<Cow<'src, str>>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
        }
    }

    pub(crate) fn from_bytes(kind: TokenKind, bytes: &'src [u8], span: Span) -> Self {
        Self::new(kind, String::from_utf8_lossy(bytes), span)
    }

    pub(crate) fn end(offset: usize) -> Self {
        Self::new(TokenKind::End, "", Span::empty(offset))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_end(&self) -> bool {
        self.kind == TokenKind::End
    }

    /// Detaches the token from the buffer it was lexed from.
    pub fn into_owned(self) -> Token<'static> {
        Token {
            kind: self.kind,
            text: Cow::Owned(self.text.into_owned()),
            span: self.span,
        }
    }

    /// Reclassifies a `Decimal` token containing a `.` as `Float`.
    ///
    /// Any other token is returned untouched. The text is not validated, so
    /// `1.2.3` becomes a `Float` as well.
    pub fn into_float(self) -> Self {
        if self.kind == TokenKind::Decimal && self.text.contains('.') {
            Self {
                kind: TokenKind::Float,
                ..self
            }
        } else {
            self
        }
    }

    /// Index of the first candidate equal to this token's text, or
    /// `candidates.len()` when none matches.
    pub fn token_set_index<S: AsRef<str>>(&self, candidates: &[S]) -> usize {
        candidates
            .iter()
            .position(|candidate| candidate.as_ref() == self.text())
            .unwrap_or(candidates.len())
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?}) @ {}", self.kind, self.text, self.span)
    }
}

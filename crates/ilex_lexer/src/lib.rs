//! Single-pass, on-demand tokenizer for ASCII text.
//!
//! A [`Tokenizer`] walks a borrowed byte buffer and hands out one [`Token`] per
//! call. There is no token list: lookahead is done by saving and restoring the
//! cursor, which [`Tokenizer::expect_string`], [`Tokenizer::expect_kind`] and
//! [`Tokenizer::peek`] do on the caller's behalf.

pub mod number;
pub mod token;
pub mod tokenizer;

pub use ilex_span::Span;
pub use number::NumberError;
pub use token::{Token, TokenKind};
pub use tokenizer::{tokenize, LexerConfig, Tokenizer};

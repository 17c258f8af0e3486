//! `ilex`: a single-pass tokenizer with a small command-line front end.
//!
//! The tokenizer itself lives in [`lexer`]; [`utils`] carries the logger and
//! diagnostics used around it.

pub mod cli;
pub mod config;

pub use ilex_lexer as lexer;
pub use ilex_span as span;
pub use ilex_utils as utils;

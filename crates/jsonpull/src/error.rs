//! Error taxonomy shared by the reader and the writer.
//!
//! Two kinds are caller-visible: state-sequencing errors ([`Error::IllegalState`],
//! a wrong call for the current token or nesting context) and syntax errors
//! ([`Error::Syntax`], malformed input bytes). Early end of input is a syntax
//! condition ([`SyntaxError::UnexpectedEndOfInput`]) and is distinct from the
//! valid end-of-document state the reader reports at a top-level boundary.
//! Corrupted internal state is a library defect and panics instead of being
//! returned as a value.

use thiserror::Error;

/// The result type used by every fallible reader and writer operation.
pub type Result<T> = std::result::Result<T, Error>;

/// An error produced while reading or writing a JSON stream.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying byte source or sink failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The input bytes do not form well-formed JSON.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The call is not legal for the current token or nesting context.
    ///
    /// The stream itself may be perfectly well formed; the caller asked for
    /// something else (a value where a name is pending, closing an array
    /// while an object is open, and so on).
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// A caller-supplied value cannot be represented in JSON, such as a
    /// non-finite float.
    #[error("illegal argument: {0}")]
    IllegalArgument(&'static str),

    /// The token text passed the JSON number grammar but does not fit the
    /// requested Rust type, e.g. an overflowing integer or a fractional
    /// number read through an integer accessor.
    #[error("cannot parse {0:?} as the requested number type")]
    InvalidNumber(String),
}

/// A specific lexical fault in the input bytes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SyntaxError {
    /// A byte that cannot start or continue the expected construct.
    #[error("invalid character {0:?}")]
    InvalidCharacter(char),

    /// A `true`, `false` or `null` literal with wrong bytes.
    #[error("invalid literal")]
    InvalidLiteral,

    /// A number violating the RFC 4627 grammar.
    #[error("malformed number")]
    MalformedNumber,

    /// A raw control byte below 0x20 inside a string.
    #[error("unescaped control character in string")]
    ControlCharacter,

    /// A backslash escape other than the eight standard forms or `\u`.
    #[error("invalid escape character {0:?}")]
    InvalidEscape(char),

    /// A `\u` escape whose four-digit window is not ASCII hex.
    #[error("invalid unicode escape")]
    InvalidUnicodeEscape,

    /// A UTF-16 surrogate half without its partner.
    #[error("unpaired surrogate \\u{0:04x}")]
    UnpairedSurrogate(u32),

    /// Accumulated token text that is not valid UTF-8.
    #[error("invalid utf-8 in string")]
    InvalidUtf8,

    /// The input ended where more bytes were structurally required: inside a
    /// string, an escape, a number needing a digit, or an unclosed container.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
}

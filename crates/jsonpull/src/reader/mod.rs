//! Pull-based, token-level JSON tokenization.
//!
//! The reader lexes a byte stream lazily, one token per request, with at most
//! one token of lookahead. Between calls it holds the pending token (if a
//! `peek` already scanned one), the accumulated text of that token, and the
//! has-next-sibling flag computed from the punctuation observed behind the
//! last scan. Grammar validation happens during the scan, so a pending token
//! is always well formed; accessors only check that its kind matches the
//! request.
//!
//! The string lexer serves both string values and property names: the two
//! are written identically, and only the punctuation after the closing quote
//! (`:` versus `,`/`]`/`}`/end of input) tells them apart. Skip-scans reuse
//! the same lexer with text accumulation suppressed.

mod source;
#[cfg(test)]
mod tests;

use std::io::Read;

use bstr::ByteSlice;

use crate::{
    error::{Error, Result, SyntaxError},
    token::Token,
};
use source::ByteSource;

/// Generates the numeric accessor fan-out; every width shares the scalar
/// text path and standard parsing.
macro_rules! numeric_accessors {
    ($($(#[$meta:meta])* $name:ident -> $ty:ty),* $(,)?) => {$(
        $(#[$meta])*
        ///
        /// The pending token must be a number or a string; a mismatch is a
        /// state error, while text that does not fit the target type is an
        /// [`Error::InvalidNumber`].
        pub fn $name(&mut self) -> Result<$ty> {
            let text = self.next_scalar_text()?;
            text.parse()
                .map_err(|_| Error::InvalidNumber(text.to_owned()))
        }
    )*};
}

/// Reads a JSON (RFC 4627) encoded value from an [`io::Read`] source as a
/// stream of tokens.
///
/// The reader consumes the source byte by byte and performs no block
/// buffering of its own; wrap the source in a [`std::io::BufReader`] when it
/// is backed by a file or socket. It never closes the source, and several
/// top-level values can be read back to back: after each one,
/// [`peek`](Self::peek) reports either the next value's opening token or
/// [`Token::EndDocument`].
///
/// ```
/// use jsonpull::{JsonReader, Token};
///
/// let mut r = JsonReader::new(&b"{\"a\":1,\"b\":[true,null]}"[..]);
/// r.begin_object()?;
/// assert_eq!(r.next_name()?, "a");
/// assert_eq!(r.next_i64()?, 1);
/// assert_eq!(r.next_name()?, "b");
/// r.begin_array()?;
/// assert!(r.next_bool()?);
/// r.next_null()?;
/// r.end_array()?;
/// r.end_object()?;
/// assert_eq!(r.peek()?, Token::EndDocument);
/// # Ok::<(), jsonpull::Error>(())
/// ```
///
/// [`io::Read`]: std::io::Read
#[derive(Debug)]
pub struct JsonReader<R> {
    source: ByteSource<R>,
    pending: Option<Token>,
    /// Text of the pending token; meaningful for names, strings and numbers.
    scratch: Vec<u8>,
    /// Payload of a pending boolean token.
    bool_pending: bool,
    has_next: bool,
}

impl<R: Read> JsonReader<R> {
    /// Creates a reader lexing a JSON-encoded stream from `source`.
    pub fn new(source: R) -> Self {
        JsonReader {
            source: ByteSource::new(source),
            pending: None,
            scratch: Vec::with_capacity(32),
            bool_pending: false,
            has_next: false,
        }
    }

    /// Consumes the next token, asserting that it begins an array.
    pub fn begin_array(&mut self) -> Result<()> {
        self.expect(Token::BeginArray, "expected the beginning of an array")
    }

    /// Consumes the next token, asserting that it ends the current array.
    pub fn end_array(&mut self) -> Result<()> {
        self.expect(Token::EndArray, "expected the end of the array")
    }

    /// Consumes the next token, asserting that it begins an object.
    pub fn begin_object(&mut self) -> Result<()> {
        self.expect(Token::BeginObject, "expected the beginning of an object")
    }

    /// Consumes the next token, asserting that it ends the current object.
    pub fn end_object(&mut self) -> Result<()> {
        self.expect(Token::EndObject, "expected the end of the object")
    }

    /// Returns whether the current array or object has another element.
    ///
    /// The flag reflects the punctuation already observed behind the most
    /// recent scan: it is meaningful right after entering a container and
    /// after consuming each element or name inside one.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Returns the kind of the next token without consuming it.
    pub fn peek(&mut self) -> Result<Token> {
        self.ensure_token()?;
        match self.pending {
            Some(token) => Ok(token),
            None => unreachable!("scan must leave a token pending"),
        }
    }

    /// Consumes the next token, asserting that it is a literal `null`.
    pub fn next_null(&mut self) -> Result<()> {
        self.expect(Token::Null, "expected null")
    }

    /// Returns the value of the next token, asserting that it is a boolean.
    pub fn next_bool(&mut self) -> Result<bool> {
        self.ensure_token()?;
        if self.pending == Some(Token::Boolean) {
            self.pending = None;
            Ok(self.bool_pending)
        } else {
            Err(Error::IllegalState("expected a boolean"))
        }
    }

    /// Returns the next token, a property name, consuming it.
    pub fn next_name(&mut self) -> Result<String> {
        self.ensure_token()?;
        if self.pending == Some(Token::Name) {
            self.pending = None;
            Ok(self.scratch_text()?.to_owned())
        } else {
            Err(Error::IllegalState("expected a property name"))
        }
    }

    /// Returns the string value of the next token, consuming it. A number
    /// token is returned in its text form.
    pub fn next_string(&mut self) -> Result<String> {
        Ok(self.next_scalar_text()?.to_owned())
    }

    numeric_accessors! {
        /// Returns the `i8` value of the next number or numeric string.
        next_i8 -> i8,
        /// Returns the `i16` value of the next number or numeric string.
        next_i16 -> i16,
        /// Returns the `i32` value of the next number or numeric string.
        next_i32 -> i32,
        /// Returns the `i64` value of the next number or numeric string.
        next_i64 -> i64,
        /// Returns the `u8` value of the next number or numeric string.
        next_u8 -> u8,
        /// Returns the `u16` value of the next number or numeric string.
        next_u16 -> u16,
        /// Returns the `u32` value of the next number or numeric string.
        next_u32 -> u32,
        /// Returns the `u64` value of the next number or numeric string.
        next_u64 -> u64,
        /// Returns the `f32` value of the next number or numeric string.
        next_f32 -> f32,
        /// Returns the `f64` value of the next number or numeric string.
        next_f64 -> f64,
    }

    /// Skips the next value recursively; nested elements of an array or
    /// object are consumed with text accumulation suppressed.
    ///
    /// A pending property name cannot be skipped: names are consumed
    /// explicitly with [`next_name`](Self::next_name), and a value always
    /// immediately follows one.
    pub fn skip_value(&mut self) -> Result<()> {
        if self.pending.is_none() {
            self.read_token(true)?;
        }
        if self.pending == Some(Token::Name) {
            return Err(Error::IllegalState(
                "a property name must be consumed with next_name",
            ));
        }
        let mut nesting = 0usize;
        loop {
            match self.pending {
                None => unreachable!("scan must leave a token pending"),
                Some(Token::EndDocument) => {
                    return Err(SyntaxError::UnexpectedEndOfInput.into());
                }
                Some(token) if token.opens_container() => nesting += 1,
                Some(token) if token.closes_container() => {
                    if nesting == 0 {
                        return Err(Error::IllegalState(
                            "no value to skip before the container close",
                        ));
                    }
                    nesting -= 1;
                }
                Some(_) => {}
            }
            self.pending = None;
            if nesting == 0 {
                return Ok(());
            }
            self.read_token(true)?;
        }
    }

    /// Scans one token ahead if none is pending.
    fn ensure_token(&mut self) -> Result<()> {
        if self.pending.is_none() {
            self.read_token(false)?;
        }
        Ok(())
    }

    /// Consumes the pending token if it matches `token`.
    fn expect(&mut self, token: Token, message: &'static str) -> Result<()> {
        self.ensure_token()?;
        if self.pending == Some(token) {
            self.pending = None;
            Ok(())
        } else {
            Err(Error::IllegalState(message))
        }
    }

    /// Consumes a pending string or number token and exposes its text.
    ///
    /// Numbers read back as text and strings parse as numbers, so the
    /// numeric and string accessors share this path.
    fn next_scalar_text(&mut self) -> Result<&str> {
        self.ensure_token()?;
        match self.pending {
            Some(Token::String | Token::Number) => {
                self.pending = None;
                self.scratch_text()
            }
            _ => Err(Error::IllegalState("expected a string or a number")),
        }
    }

    fn scratch_text(&self) -> Result<&str> {
        self.scratch
            .to_str()
            .map_err(|_| Error::from(SyntaxError::InvalidUtf8))
    }

    /// Returns the next byte past any JSON whitespace, or `None` at end of
    /// input.
    fn next_nonspace(&mut self) -> Result<Option<u8>> {
        loop {
            match self.source.next()? {
                Some(b' ' | b'\t' | b'\n' | b'\r') => {}
                other => return Ok(other),
            }
        }
    }

    /// Scans the next token into the lookahead slot.
    ///
    /// With `skip` set, text accumulation is suppressed; the token is still
    /// fully validated.
    fn read_token(&mut self, skip: bool) -> Result<()> {
        assert!(self.pending.is_none(), "a token is already pending");
        let Some(byte) = self.next_nonspace()? else {
            // Clean end of input where a fresh top-level token could start.
            self.pending = Some(Token::EndDocument);
            return Ok(());
        };
        self.scratch.clear();
        self.has_next = false;
        match byte {
            b'[' => {
                self.pending = Some(Token::BeginArray);
                self.container_start(b']')
            }
            b']' => {
                self.pending = Some(Token::EndArray);
                self.token_end()
            }
            b'{' => {
                self.pending = Some(Token::BeginObject);
                self.container_start(b'}')
            }
            b'}' => {
                self.pending = Some(Token::EndObject);
                self.token_end()
            }
            b't' => {
                self.pending = Some(Token::Boolean);
                self.bool_pending = true;
                self.literal(b"rue")
            }
            b'f' => {
                self.pending = Some(Token::Boolean);
                self.bool_pending = false;
                self.literal(b"alse")
            }
            b'n' => {
                self.pending = Some(Token::Null);
                self.literal(b"ull")
            }
            b'"' => self.string_or_name(skip),
            b'-' | b'0'..=b'9' => {
                self.pending = Some(Token::Number);
                self.number(byte, skip)
            }
            other => Err(SyntaxError::InvalidCharacter(char::from(other)).into()),
        }
    }

    /// Pre-computes `has_next` right after a container opens by peeking past
    /// whitespace for the matching close. End of input here means the
    /// container can never be closed.
    fn container_start(&mut self, close: u8) -> Result<()> {
        match self.next_nonspace()? {
            Some(byte) => {
                self.has_next = byte != close;
                self.source.unread(byte);
                Ok(())
            }
            None => Err(SyntaxError::UnexpectedEndOfInput.into()),
        }
    }

    /// Classifies the punctuation after a completed token: a comma means a
    /// sibling follows; anything else is pushed back for the next scan.
    fn token_end(&mut self) -> Result<()> {
        match self.next_nonspace()? {
            None => {
                self.has_next = false;
                Ok(())
            }
            Some(b',') => {
                self.has_next = true;
                Ok(())
            }
            Some(byte) => {
                self.has_next = false;
                self.source.unread(byte);
                Ok(())
            }
        }
    }

    /// Matches the remaining bytes of `true`, `false` or `null` exactly,
    /// then classifies the trailing punctuation.
    fn literal(&mut self, rest: &'static [u8]) -> Result<()> {
        for &expected in rest {
            match self.source.next()? {
                Some(byte) if byte == expected => {}
                Some(_) => return Err(SyntaxError::InvalidLiteral.into()),
                None => return Err(SyntaxError::UnexpectedEndOfInput.into()),
            }
        }
        match self.source.next()? {
            None => {
                self.has_next = false;
                Ok(())
            }
            Some(b' ' | b'\t' | b'\n' | b'\r') => self.token_end(),
            Some(b',') => {
                self.has_next = true;
                Ok(())
            }
            Some(byte @ (b']' | b'}')) => {
                self.has_next = false;
                self.source.unread(byte);
                Ok(())
            }
            Some(_) => Err(SyntaxError::InvalidLiteral.into()),
        }
    }

    /// Lexes a quoted string, then decides from the trailing punctuation
    /// whether it was a value or a property name.
    fn string_or_name(&mut self, skip: bool) -> Result<()> {
        loop {
            let Some(byte) = self.source.next()? else {
                return Err(SyntaxError::UnexpectedEndOfInput.into());
            };
            match byte {
                b'"' => break,
                b'\\' => {
                    let ch = self.escape()?;
                    if !skip {
                        let mut utf8 = [0u8; 4];
                        self.scratch
                            .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
                    }
                }
                0x00..0x20 => return Err(SyntaxError::ControlCharacter.into()),
                _ => {
                    if !skip {
                        self.scratch.push(byte);
                    }
                }
            }
        }
        match self.next_nonspace()? {
            None => {
                self.pending = Some(Token::String);
                self.has_next = false;
                Ok(())
            }
            Some(b',') => {
                self.pending = Some(Token::String);
                self.has_next = true;
                Ok(())
            }
            Some(b':') => {
                self.pending = Some(Token::Name);
                self.has_next = false;
                Ok(())
            }
            Some(byte @ (b']' | b'}')) => {
                self.pending = Some(Token::String);
                self.has_next = false;
                self.source.unread(byte);
                Ok(())
            }
            Some(other) => Err(SyntaxError::InvalidCharacter(char::from(other)).into()),
        }
    }

    /// Decodes the escape sequence after a backslash.
    fn escape(&mut self) -> Result<char> {
        let Some(byte) = self.source.next()? else {
            return Err(SyntaxError::UnexpectedEndOfInput.into());
        };
        Ok(match byte {
            b'"' => '"',
            b'\\' => '\\',
            b'/' => '/',
            b'b' => '\u{8}',
            b'f' => '\u{c}',
            b'n' => '\n',
            b'r' => '\r',
            b't' => '\t',
            b'u' => return self.unicode_escape(),
            other => return Err(SyntaxError::InvalidEscape(char::from(other)).into()),
        })
    }

    /// Decodes `\uXXXX`, pairing a high surrogate with the escaped low
    /// surrogate that must follow it.
    fn unicode_escape(&mut self) -> Result<char> {
        let unit = self.escape_unit()?;
        if (0xdc00..0xe000).contains(&unit) {
            return Err(SyntaxError::UnpairedSurrogate(unit).into());
        }
        let code_point = if (0xd800..0xdc00).contains(&unit) {
            if self.source.next()? != Some(b'\\') || self.source.next()? != Some(b'u') {
                return Err(SyntaxError::UnpairedSurrogate(unit).into());
            }
            let low = self.escape_unit()?;
            if !(0xdc00..0xe000).contains(&low) {
                return Err(SyntaxError::UnpairedSurrogate(unit).into());
            }
            0x10000 + ((unit & 0x3ff) << 10) + (low & 0x3ff)
        } else {
            unit
        };
        char::from_u32(code_point).ok_or_else(|| SyntaxError::InvalidUnicodeEscape.into())
    }

    /// Reads one four-hex-digit UTF-16 unit of a `\u` escape.
    fn escape_unit(&mut self) -> Result<u32> {
        let Some(window) = self.source.escape_window()? else {
            return Err(SyntaxError::UnexpectedEndOfInput.into());
        };
        let mut unit = 0u32;
        for byte in window {
            let digit = match byte {
                b'0'..=b'9' => u32::from(byte - b'0'),
                b'a'..=b'f' => u32::from(byte - b'a') + 10,
                b'A'..=b'F' => u32::from(byte - b'A') + 10,
                _ => return Err(SyntaxError::InvalidUnicodeEscape.into()),
            };
            unit = (unit << 4) | digit;
        }
        Ok(unit)
    }

    /// Lexes a number after its first byte, tracking the grammar flags:
    /// whether a digit is mandatory (after a sign, decimal point or exponent
    /// marker), whether the integer part began with a lone zero, whether the
    /// integer part is closed (a later `.` is illegal), whether an exponent
    /// was seen, and whether a sign is currently legal.
    fn number(&mut self, first: u8, skip: bool) -> Result<()> {
        if !skip {
            self.scratch.push(first);
        }
        let mut digit_needed = first == b'-';
        let mut leading_zero = first == b'0';
        let mut int_done = false;
        let mut exp_done = false;
        let mut sign_possible = false;
        loop {
            let Some(byte) = self.source.next()? else {
                if digit_needed {
                    return Err(SyntaxError::UnexpectedEndOfInput.into());
                }
                self.has_next = false;
                return Ok(());
            };
            match byte {
                b'0'..=b'9' => {
                    if leading_zero && !int_done {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    if digit_needed && byte == b'0' && !int_done {
                        leading_zero = true;
                    }
                    digit_needed = false;
                    sign_possible = false;
                }
                b'.' => {
                    if int_done || digit_needed {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    int_done = true;
                    digit_needed = true;
                }
                b'e' | b'E' => {
                    if exp_done || digit_needed {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    int_done = true;
                    exp_done = true;
                    digit_needed = true;
                    sign_possible = true;
                }
                b'+' | b'-' => {
                    if !sign_possible {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    sign_possible = false;
                }
                b' ' | b'\t' | b'\n' | b'\r' => {
                    if digit_needed {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    return self.token_end();
                }
                b',' => {
                    if digit_needed {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    self.has_next = true;
                    return Ok(());
                }
                byte @ (b']' | b'}') => {
                    if digit_needed {
                        return Err(SyntaxError::MalformedNumber.into());
                    }
                    self.has_next = false;
                    self.source.unread(byte);
                    return Ok(());
                }
                other => return Err(SyntaxError::InvalidCharacter(char::from(other)).into()),
            }
            if !skip {
                self.scratch.push(byte);
            }
        }
    }
}

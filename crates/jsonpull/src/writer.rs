//! Push-based, token-level JSON emission.
//!
//! The writer never buffers document content: every call emits its token
//! straight into the sink, and the only state kept between calls is the stack
//! of open containers plus a one-bit "a comma is owed before the next
//! emission" flag. Call ordering is validated against that stack, so a
//! sequence that would produce malformed output fails before any bytes for
//! the offending token are written. Output already flushed to the sink stays
//! there; callers wanting all-or-nothing output should write into a buffer
//! and commit it themselves.

use std::io::Write;

use crate::{
    error::{Error, Result},
    scalar::Scalar,
};

/// One open construct on the writer's nesting stack.
///
/// `Name` sits directly above the `Object` it belongs to while that object's
/// next value is pending; any other arrangement is a library defect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array,
    Object,
    Name,
}

/// Writes a JSON (RFC 4627) encoded value to an [`io::Write`] sink, one
/// token at a time.
///
/// The writer does not own the sink's lifecycle: it never closes or flushes
/// it, and dropping the writer leaves the sink untouched.
///
/// ```
/// use jsonpull::JsonWriter;
///
/// let mut out = Vec::new();
/// let mut w = JsonWriter::new(&mut out);
/// w.begin_object()?;
/// w.name("x")?;
/// w.int_value(5)?;
/// w.end_object()?;
/// assert_eq!(out, b"{\"x\":5}");
/// # Ok::<(), jsonpull::Error>(())
/// ```
///
/// [`io::Write`]: std::io::Write
#[derive(Debug)]
pub struct JsonWriter<W> {
    sink: W,
    stack: Vec<Frame>,
    pending_comma: bool,
}

impl<W: Write> JsonWriter<W> {
    /// Creates a writer emitting a JSON-encoded stream to `sink`.
    pub fn new(sink: W) -> Self {
        JsonWriter {
            sink,
            stack: Vec::with_capacity(16),
            pending_comma: false,
        }
    }

    /// Consumes the writer, returning the sink it was writing to.
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Validates and accounts for a value emission in the current context.
    ///
    /// Runs before the first byte of any value, array or object token: pops a
    /// pending name frame (the object beneath it is an invariant, not caller
    /// input), rejects a value requested inside an object with no name, and
    /// settles the comma owed to the previous sibling.
    fn begin_value(&mut self) -> Result<()> {
        match self.stack.last() {
            None | Some(Frame::Array) => {}
            Some(Frame::Name) => {
                self.stack.pop();
                assert!(
                    matches!(self.stack.last(), Some(Frame::Object)),
                    "corrupted writer state: name frame without an enclosing object",
                );
            }
            Some(Frame::Object) => {
                return Err(Error::IllegalState(
                    "a value inside an object must be preceded by a name",
                ));
            }
        }
        if self.pending_comma {
            self.sink.write_all(b",")?;
        } else {
            self.pending_comma = true;
        }
        Ok(())
    }

    /// Begins encoding a new array.
    pub fn begin_array(&mut self) -> Result<()> {
        self.begin_value()?;
        self.pending_comma = false;
        self.stack.push(Frame::Array);
        self.sink.write_all(b"[")?;
        Ok(())
    }

    /// Begins encoding a new object.
    pub fn begin_object(&mut self) -> Result<()> {
        self.begin_value()?;
        self.pending_comma = false;
        self.stack.push(Frame::Object);
        self.sink.write_all(b"{")?;
        Ok(())
    }

    /// Ends the current array.
    pub fn end_array(&mut self) -> Result<()> {
        if self.stack.last() != Some(&Frame::Array) {
            return Err(Error::IllegalState("no array is open here"));
        }
        self.pending_comma = true;
        self.stack.pop();
        self.sink.write_all(b"]")?;
        Ok(())
    }

    /// Ends the current object.
    pub fn end_object(&mut self) -> Result<()> {
        if self.stack.last() != Some(&Frame::Object) {
            return Err(Error::IllegalState("no object is open here"));
        }
        self.pending_comma = true;
        self.stack.pop();
        self.sink.write_all(b"}")?;
        Ok(())
    }

    /// Encodes a property name inside the current object.
    pub fn name(&mut self, name: &str) -> Result<()> {
        if self.stack.last() != Some(&Frame::Object) {
            return Err(Error::IllegalState(
                "a name is only legal directly inside an object",
            ));
        }
        self.stack.push(Frame::Name);
        if self.pending_comma {
            self.sink.write_all(b",")?;
            self.pending_comma = false;
        }
        self.write_quoted(name)?;
        self.sink.write_all(b":")?;
        Ok(())
    }

    /// Encodes `null`.
    pub fn null_value(&mut self) -> Result<()> {
        self.begin_value()?;
        self.sink.write_all(b"null")?;
        Ok(())
    }

    /// Encodes `true` or `false`.
    pub fn bool_value(&mut self, value: bool) -> Result<()> {
        self.begin_value()?;
        self.sink
            .write_all(if value { b"true" } else { b"false" })?;
        Ok(())
    }

    /// Encodes a signed integer of any width up to 64 bits as base-10 text.
    pub fn int_value(&mut self, value: impl Into<i64>) -> Result<()> {
        self.begin_value()?;
        let mut buf = itoa::Buffer::new();
        self.sink.write_all(buf.format(value.into()).as_bytes())?;
        Ok(())
    }

    /// Encodes an unsigned integer of any width up to 64 bits as base-10
    /// text.
    pub fn uint_value(&mut self, value: impl Into<u64>) -> Result<()> {
        self.begin_value()?;
        let mut buf = itoa::Buffer::new();
        self.sink.write_all(buf.format(value.into()).as_bytes())?;
        Ok(())
    }

    /// Encodes a 32-bit float as the shortest text that round-trips at 32-bit
    /// precision.
    ///
    /// # Errors
    ///
    /// Infinities and NaN have no JSON representation and are rejected with
    /// [`Error::IllegalArgument`] before anything is written.
    pub fn f32_value(&mut self, value: f32) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::IllegalArgument(
                "JSON has no representation for a non-finite number",
            ));
        }
        self.begin_value()?;
        let mut buf = ryu::Buffer::new();
        self.sink.write_all(buf.format_finite(value).as_bytes())?;
        Ok(())
    }

    /// Encodes a 64-bit float as the shortest text that round-trips at 64-bit
    /// precision.
    ///
    /// # Errors
    ///
    /// Infinities and NaN have no JSON representation and are rejected with
    /// [`Error::IllegalArgument`] before anything is written.
    pub fn f64_value(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            return Err(Error::IllegalArgument(
                "JSON has no representation for a non-finite number",
            ));
        }
        self.begin_value()?;
        let mut buf = ryu::Buffer::new();
        self.sink.write_all(buf.format_finite(value).as_bytes())?;
        Ok(())
    }

    /// Encodes a string value.
    pub fn string_value(&mut self, value: &str) -> Result<()> {
        self.begin_value()?;
        self.write_quoted(value)?;
        Ok(())
    }

    /// Encodes any supported scalar, dispatching on its kind.
    ///
    /// Composite values are deliberately not convertible to [`Scalar`]; they
    /// must be driven through explicit `begin_*`/[`name`](Self::name)/value
    /// calls.
    pub fn value<'a>(&mut self, value: impl Into<Scalar<'a>>) -> Result<()> {
        match value.into() {
            Scalar::Null => self.null_value(),
            Scalar::Bool(v) => self.bool_value(v),
            Scalar::Int(v) => self.int_value(v),
            Scalar::Uint(v) => self.uint_value(v),
            Scalar::F32(v) => self.f32_value(v),
            Scalar::F64(v) => self.f64_value(v),
            Scalar::Str(v) => self.string_value(v),
        }
    }

    /// Writes `text` wrapped in quotes, escaping the eight RFC forms and any
    /// other control byte below 0x20 as `\u00xx`. Everything else, including
    /// non-ASCII, passes through verbatim in runs.
    fn write_quoted(&mut self, text: &str) -> Result<()> {
        self.sink.write_all(b"\"")?;
        let bytes = text.as_bytes();
        let mut start = 0;
        for (i, &b) in bytes.iter().enumerate() {
            let escape: &[u8] = match b {
                0x08 => b"\\b",
                0x09 => b"\\t",
                0x0a => b"\\n",
                0x0c => b"\\f",
                0x0d => b"\\r",
                b'"' => b"\\\"",
                b'\\' => b"\\\\",
                0x00..0x20 => b"",
                _ => continue,
            };
            if start < i {
                self.sink.write_all(&bytes[start..i])?;
            }
            if escape.is_empty() {
                write!(self.sink, "\\u{b:04x}")?;
            } else {
                self.sink.write_all(escape)?;
            }
            start = i + 1;
        }
        if start < bytes.len() {
            self.sink.write_all(&bytes[start..])?;
        }
        self.sink.write_all(b"\"")?;
        Ok(())
    }
}

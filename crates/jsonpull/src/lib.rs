//! Streaming, token-level JSON (RFC 4627) reading and writing.
//!
//! `jsonpull` is a pull-based tokenizing [`JsonReader`] and a push-based
//! tokenizing [`JsonWriter`] operating directly on byte streams, with no
//! document tree in between. Application code that knows the shape of its
//! data walks that shape itself, issuing explicit begin/end/name/value calls;
//! the codec validates the call sequence against the JSON grammar and does
//! the lexing and escaping. This skips the cost of a reflective generic
//! encoder for fixed-shape data.
//!
//! Both halves are fully synchronous and blocking: a call returns once its
//! unit of work is complete, and all state lives in the instance, so neither
//! type is shareable across threads without external synchronization. The
//! reader buffers at most one token of lookahead plus one byte of pushback;
//! the writer buffers nothing beyond its nesting stack.
//!
//! ```
//! use jsonpull::{JsonReader, JsonWriter};
//!
//! let mut out = Vec::new();
//! let mut w = JsonWriter::new(&mut out);
//! w.begin_array()?;
//! w.string_value("pull")?;
//! w.uint_value(2u32)?;
//! w.end_array()?;
//!
//! let mut r = JsonReader::new(out.as_slice());
//! r.begin_array()?;
//! assert_eq!(r.next_string()?, "pull");
//! assert_eq!(r.next_u32()?, 2);
//! r.end_array()?;
//! # Ok::<(), jsonpull::Error>(())
//! ```

mod error;
mod reader;
mod scalar;
mod token;
mod writer;

pub use error::{Error, Result, SyntaxError};
pub use reader::JsonReader;
pub use scalar::Scalar;
pub use token::Token;
pub use writer::JsonWriter;

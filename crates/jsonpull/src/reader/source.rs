//! Minimal byte-level input abstraction for the lexer.
//!
//! The lexer needs exactly three things from its input: the next byte, one
//! byte of true pushback (a close bracket ending a number or string belongs
//! to the enclosing construct and must be observed again), and a fixed
//! four-byte window for the digits of a `\u` escape, read as a block rather
//! than via repeated pushback. Nothing else is buffered here; callers who
//! care about syscall counts wrap their stream in [`std::io::BufReader`].

use std::io::{ErrorKind, Read};

#[derive(Debug)]
pub(crate) struct ByteSource<R> {
    inner: R,
    pushback: Option<u8>,
}

impl<R: Read> ByteSource<R> {
    pub(crate) fn new(inner: R) -> Self {
        ByteSource {
            inner,
            pushback: None,
        }
    }

    /// Returns the next byte, or `None` at end of input.
    pub(crate) fn next(&mut self) -> std::io::Result<Option<u8>> {
        if let Some(byte) = self.pushback.take() {
            return Ok(Some(byte));
        }
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Makes `byte` the next byte returned by [`next`](Self::next).
    ///
    /// At most one byte can be pushed back at a time; a second pushback
    /// before the first is consumed is a lexer defect.
    pub(crate) fn unread(&mut self, byte: u8) {
        assert!(self.pushback.is_none(), "byte already pushed back");
        self.pushback = Some(byte);
    }

    /// Reads the fixed four-byte window of a `\u` escape.
    ///
    /// Returns `None` if the input ends inside the window.
    pub(crate) fn escape_window(&mut self) -> std::io::Result<Option<[u8; 4]>> {
        let mut window = [0u8; 4];
        for slot in &mut window {
            match self.next()? {
                Some(byte) => *slot = byte,
                None => return Ok(None),
            }
        }
        Ok(Some(window))
    }
}

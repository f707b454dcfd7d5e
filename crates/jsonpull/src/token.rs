//! Classification of the units a JSON text decomposes into.

/// A structure, name or value type in a JSON-encoded stream.
///
/// [`JsonReader::peek`](crate::JsonReader::peek) reports the kind of the next
/// parseable unit without consuming it, letting callers dispatch to the
/// matching accessor. `Token` carries no payload; the text of a pending name,
/// string or number lives in the reader until the token is consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// The opening of a JSON array, `[`.
    BeginArray,
    /// The closing of a JSON array, `]`.
    EndArray,
    /// The opening of a JSON object, `{`.
    BeginObject,
    /// The closing of a JSON object, `}`.
    EndObject,
    /// A property name inside an object.
    Name,
    /// A JSON `null`.
    Null,
    /// A JSON `true` or `false`.
    Boolean,
    /// A JSON number.
    Number,
    /// A JSON string.
    String,
    /// The end of the stream.
    ///
    /// Clean end of input at a top-level token boundary is a valid terminal
    /// state, not an error; a reader that has produced one complete value
    /// reports `EndDocument` until more input follows (several top-level
    /// values can be read back to back from one source).
    EndDocument,
}

impl Token {
    /// Returns `true` for the two container-opening tokens.
    #[must_use]
    pub fn opens_container(self) -> bool {
        matches!(self, Self::BeginArray | Self::BeginObject)
    }

    /// Returns `true` for the two container-closing tokens.
    #[must_use]
    pub fn closes_container(self) -> bool {
        matches!(self, Self::EndArray | Self::EndObject)
    }
}

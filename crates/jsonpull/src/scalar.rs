//! The closed set of scalar kinds the writer can emit generically.

/// A single JSON scalar, borrowed where it has text.
///
/// [`JsonWriter::value`](crate::JsonWriter::value) accepts anything
/// convertible into a `Scalar` and dispatches to the matching typed emitter.
/// Arrays, objects and custom types have no conversion on purpose: composite
/// values must be driven through explicit `begin_*`/`name`/value calls.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar<'a> {
    /// A JSON `null`.
    Null,
    /// A JSON `true` or `false`.
    Bool(bool),
    /// A signed integer of any width up to 64 bits.
    Int(i64),
    /// An unsigned integer of any width up to 64 bits.
    Uint(u64),
    /// A 32-bit float, written with 32-bit round-trip precision.
    F32(f32),
    /// A 64-bit float, written with 64-bit round-trip precision.
    F64(f64),
    /// A string value.
    Str(&'a str),
}

impl From<()> for Scalar<'_> {
    fn from((): ()) -> Self {
        Scalar::Null
    }
}

impl From<bool> for Scalar<'_> {
    fn from(v: bool) -> Self {
        Scalar::Bool(v)
    }
}

impl<'a> From<&'a str> for Scalar<'a> {
    fn from(v: &'a str) -> Self {
        Scalar::Str(v)
    }
}

impl<'a> From<&'a String> for Scalar<'a> {
    fn from(v: &'a String) -> Self {
        Scalar::Str(v)
    }
}

impl From<f32> for Scalar<'_> {
    fn from(v: f32) -> Self {
        Scalar::F32(v)
    }
}

impl From<f64> for Scalar<'_> {
    fn from(v: f64) -> Self {
        Scalar::F64(v)
    }
}

macro_rules! scalar_from_int {
    ($($ty:ty => $variant:ident as $wide:ty),* $(,)?) => {$(
        impl From<$ty> for Scalar<'_> {
            fn from(v: $ty) -> Self {
                Scalar::$variant(<$wide>::from(v))
            }
        }
    )*};
}

scalar_from_int! {
    i8 => Int as i64,
    i16 => Int as i64,
    i32 => Int as i64,
    i64 => Int as i64,
    u8 => Uint as u64,
    u16 => Uint as u64,
    u32 => Uint as u64,
    u64 => Uint as u64,
}

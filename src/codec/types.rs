use std::collections::BTreeSet;
use std::fmt;

/// One-byte discriminant identifying the wire type of a fully-qualified frame.
///
/// Codes are bound to codecs when the registry is built; the constants
/// below are the GraphBinary assignments used by the default registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeCode(u8);

impl TypeCode {
    pub const INT: TypeCode = TypeCode(0x01);
    pub const LONG: TypeCode = TypeCode(0x02);
    pub const STRING: TypeCode = TypeCode(0x03);
    pub const LIST: TypeCode = TypeCode(0x09);
    pub const MAP: TypeCode = TypeCode(0x0a);
    pub const SET: TypeCode = TypeCode(0x0b);
    pub const EDGE: TypeCode = TypeCode(0x0d);
    pub const VERTEX: TypeCode = TypeCode(0x11);
    pub const UNSPECIFIED_NULL: TypeCode = TypeCode(0xfe);

    pub const fn new(byte: u8) -> Self {
        TypeCode(byte)
    }

    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// GraphBinary name of a well-known code.
    pub fn well_known_name(self) -> Option<&'static str> {
        match self {
            TypeCode::INT => Some("Int"),
            TypeCode::LONG => Some("Long"),
            TypeCode::STRING => Some("String"),
            TypeCode::LIST => Some("List"),
            TypeCode::MAP => Some("Map"),
            TypeCode::SET => Some("Set"),
            TypeCode::EDGE => Some("Edge"),
            TypeCode::VERTEX => Some("Vertex"),
            TypeCode::UNSPECIFIED_NULL => Some("UnspecifiedNull"),
            _ => None,
        }
    }
}

impl From<u8> for TypeCode {
    fn from(byte: u8) -> Self {
        TypeCode(byte)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

/// Marker byte following the type code of a fully-qualified frame.
#[repr(u8)]
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ValueFlag {
    Value = 0x00,
    Null = 0x01,
}

impl ValueFlag {
    /// Converts a byte into a ValueFlag. Any byte other than 0 or 1 is invalid.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(ValueFlag::Value),
            0x01 => Some(ValueFlag::Null),
            _ => None,
        }
    }
}

/// A decoded GraphBinary value.
///
/// Values are totally ordered and hashable so that sets of values, including
/// sets of sets, compare structurally.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GValue {
    Null,
    Int(i32),
    Set(BTreeSet<GValue>),
}

impl GValue {
    pub fn is_null(&self) -> bool {
        matches!(self, GValue::Null)
    }

    pub fn as_set(&self) -> Option<&BTreeSet<GValue>> {
        match self {
            GValue::Set(members) => Some(members),
            _ => None,
        }
    }
}

impl From<i32> for GValue {
    fn from(v: i32) -> Self {
        GValue::Int(v)
    }
}

impl FromIterator<GValue> for GValue {
    fn from_iter<I: IntoIterator<Item = GValue>>(iter: I) -> Self {
        GValue::Set(iter.into_iter().collect())
    }
}

/// A decoded value and the number of bytes it occupied, counted from the
/// cursor position before decoding began.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded<T = GValue> {
    pub value: T,
    pub len: usize,
}

impl<T> Decoded<T> {
    pub fn new(value: T, len: usize) -> Self {
        Decoded { value, len }
    }
}

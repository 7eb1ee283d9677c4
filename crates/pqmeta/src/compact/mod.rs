//! Thrift compact protocol decoding into a generic value tree.

pub mod decoder;
pub mod value;

use std::fmt;

pub use decoder::CompactDecoder;
pub use value::{Field, StructValue, Value};

/// Type tags as they appear in the low nibble of field and collection
/// headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum CompactType {
    Stop = 0,
    BoolTrue = 1,
    BoolFalse = 2,
    Byte = 3,
    I16 = 4,
    I32 = 5,
    I64 = 6,
    Double = 7,
    Binary = 8,
    List = 9,
    Set = 10,
    Map = 11,
    Struct = 12,
}

impl CompactType {
    /// Get the type for a 4-bit tag, returning None for tags outside the
    /// protocol.
    pub const fn from_tag(tag: u8) -> Option<Self> {
        Some(match tag {
            0 => CompactType::Stop,
            1 => CompactType::BoolTrue,
            2 => CompactType::BoolFalse,
            3 => CompactType::Byte,
            4 => CompactType::I16,
            5 => CompactType::I32,
            6 => CompactType::I64,
            7 => CompactType::Double,
            8 => CompactType::Binary,
            9 => CompactType::List,
            10 => CompactType::Set,
            11 => CompactType::Map,
            12 => CompactType::Struct,
            _ => return None,
        })
    }

    pub const fn tag(self) -> u8 {
        self as u8
    }

    pub const fn is_bool(self) -> bool {
        matches!(self, CompactType::BoolTrue | CompactType::BoolFalse)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CompactType::Stop => "stop",
            CompactType::BoolTrue | CompactType::BoolFalse => "bool",
            CompactType::Byte => "byte",
            CompactType::I16 => "i16",
            CompactType::I32 => "i32",
            CompactType::I64 => "i64",
            CompactType::Double => "double",
            CompactType::Binary => "binary",
            CompactType::List => "list",
            CompactType::Set => "set",
            CompactType::Map => "map",
            CompactType::Struct => "struct",
        }
    }
}

impl fmt::Display for CompactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

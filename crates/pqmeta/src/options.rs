use std::fmt;
use std::str::FromStr;

/// Default bound on nested structs, lists, sets and maps.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// How an absolute (non-delta) field id is laid out after a field header byte
/// with a zero delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldIdEncoding {
    /// Zigzag varint i16, as written by Thrift compact protocol
    /// implementations.
    #[default]
    ZigzagVarint,
    /// Two raw bytes, low byte first.
    LittleEndianI16,
    /// Two raw bytes, high byte first.
    BigEndianI16,
}

impl FieldIdEncoding {
    pub const fn as_str(&self) -> &'static str {
        match self {
            FieldIdEncoding::ZigzagVarint => "zigzag",
            FieldIdEncoding::LittleEndianI16 => "le",
            FieldIdEncoding::BigEndianI16 => "be",
        }
    }
}

impl fmt::Display for FieldIdEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldIdEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "zigzag" => FieldIdEncoding::ZigzagVarint,
            "le" => FieldIdEncoding::LittleEndianI16,
            "be" => FieldIdEncoding::BigEndianI16,
            other => {
                return Err(format!(
                    "unknown field id encoding '{other}', expected one of: zigzag, le, be"
                ));
            }
        })
    }
}

/// Options for decoding compact protocol payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Max nesting depth of composite values. The root struct counts as one
    /// level.
    pub max_depth: usize,
    pub field_id_encoding: FieldIdEncoding,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            max_depth: DEFAULT_MAX_DEPTH,
            field_id_encoding: FieldIdEncoding::default(),
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_field_id_encoding(mut self, encoding: FieldIdEncoding) -> Self {
        self.field_id_encoding = encoding;
        self
    }
}

use crate::compact::CompactType;

pub type Result<T, E = PqMetaError> = std::result::Result<T, E>;

/// Errors produced while locating or decoding footer metadata.
///
/// Offsets are absolute byte offsets into the buffer handed to the loader.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PqMetaError {
    #[error("truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    Truncated {
        offset: usize,
        needed: usize,
        available: usize,
    },

    #[error("varint overflows its target width at offset {offset}")]
    VarintOverflow { offset: usize },

    #[error("invalid magic at offset {offset}: expected \"PAR1\", found \"{}\"", .found.escape_ascii())]
    InvalidMagic { offset: usize, found: Vec<u8> },

    #[error("invalid footer, metadata length {metadata_length} does not fit in file of {file_length} bytes")]
    InvalidFooter {
        file_length: usize,
        metadata_length: u32,
    },

    #[error("unknown compact type tag {tag} at offset {offset}")]
    UnknownCompactType { tag: u8, offset: usize },

    #[error("stop type used where a value was expected at offset {offset}")]
    UnexpectedStop { offset: usize },

    #[error("nesting deeper than {max_depth} levels at offset {offset}")]
    NestingTooDeep { max_depth: usize, offset: usize },

    #[error("missing required field {field_id} in {record}")]
    MissingField { record: &'static str, field_id: i16 },

    #[error("field {field_id} in {record} has type {found}, expected {expected}")]
    TypeMismatch {
        record: &'static str,
        field_id: i16,
        expected: CompactType,
        found: CompactType,
    },

    #[error("field {field_id} in {record} is not valid utf8")]
    InvalidUtf8 { record: &'static str, field_id: i16 },
}

impl PqMetaError {
    /// Byte offset the error occurred at, if the error is tied to a position
    /// in the input.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Truncated { offset, .. }
            | Self::VarintOverflow { offset }
            | Self::InvalidMagic { offset, .. }
            | Self::UnknownCompactType { offset, .. }
            | Self::UnexpectedStop { offset }
            | Self::NestingTooDeep { offset, .. } => Some(*offset),
            _ => None,
        }
    }
}

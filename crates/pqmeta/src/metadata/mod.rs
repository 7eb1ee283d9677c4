//! Parquet file metadata records.
//!
//! Records mirror the parquet format definition, with optional fields as
//! `Option`. They're built by projecting a decoded value tree, see
//! [`projector`].

pub mod loader;
pub mod projector;
pub mod types;

use serde::Serialize;

pub use types::{CompressionCodec, ConvertedType, Encoding, PhysicalType, Repetition};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileMetaData {
    /// Version of the format the file was written with.
    pub version: i32,
    /// Flattened schema tree, depth first. The first element is the root.
    pub schema: Vec<SchemaElement>,
    pub num_rows: i64,
    pub row_groups: Vec<RowGroup>,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    /// Application that wrote the file, e.g. "parquet-mr version 1.12.3".
    pub created_by: Option<String>,
}

impl FileMetaData {
    pub fn num_row_groups(&self) -> usize {
        self.row_groups.len()
    }

    /// Number of column chunks per row group, taken from the first row group.
    pub fn num_columns(&self) -> usize {
        self.row_groups.first().map(|g| g.columns.len()).unwrap_or(0)
    }

    /// Get the value for the first key/value entry with the given key.
    pub fn key_value(&self, key: &str) -> Option<&str> {
        self.key_value_metadata
            .as_ref()?
            .iter()
            .find(|kv| kv.key == key)?
            .value
            .as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaElement {
    pub name: String,
    /// Only set for leaf nodes.
    pub physical_type: Option<PhysicalType>,
    /// Byte length for FIXED_LEN_BYTE_ARRAY.
    pub type_length: Option<i32>,
    /// Not set for the root.
    pub repetition_type: Option<Repetition>,
    /// Only set for group nodes.
    pub num_children: Option<i32>,
    pub converted_type: Option<ConvertedType>,
    pub scale: Option<i32>,
    pub precision: Option<i32>,
    pub field_id: Option<i32>,
}

impl SchemaElement {
    pub fn is_group(&self) -> bool {
        self.num_children.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowGroup {
    pub columns: Vec<ColumnChunk>,
    /// Total uncompressed byte size of all column data.
    pub total_byte_size: i64,
    pub num_rows: i64,
    pub file_offset: Option<i64>,
    pub total_compressed_size: Option<i64>,
    pub ordinal: Option<i16>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnChunk {
    /// Set if the column data lives in a different file.
    pub file_path: Option<String>,
    pub file_offset: i64,
    pub meta_data: Option<ColumnMetaData>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnMetaData {
    pub physical_type: PhysicalType,
    pub encodings: Vec<Encoding>,
    pub path_in_schema: Vec<String>,
    pub codec: CompressionCodec,
    pub num_values: i64,
    pub total_uncompressed_size: i64,
    pub total_compressed_size: i64,
    pub key_value_metadata: Option<Vec<KeyValue>>,
    pub data_page_offset: i64,
    pub index_page_offset: Option<i64>,
    pub dictionary_page_offset: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyValue {
    pub key: String,
    pub value: Option<String>,
}

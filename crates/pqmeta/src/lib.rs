//! Reads the footer metadata of parquet files.
//!
//! The metadata at the end of a parquet file is a `FileMetaData` struct
//! encoded with the thrift compact protocol. Decoding happens in two steps:
//!
//! - [`compact::CompactDecoder`] decodes the bytes into a generic
//!   [`compact::Value`] tree without knowledge of the parquet schema.
//! - [`metadata::projector`] maps the tree onto typed records, ignoring fields
//!   it doesn't know about.
//!
//! [`MetaDataLoader`] wraps both steps along with locating the metadata within
//! a file.

pub mod compact;
pub mod cursor;
pub mod errors;
pub mod footer;
pub mod metadata;
pub mod options;

#[cfg(test)]
mod testutil;

pub use errors::{PqMetaError, Result};
pub use footer::ParquetFooter;
pub use metadata::FileMetaData;
pub use metadata::loader::MetaDataLoader;
pub use options::{DecodeOptions, FieldIdEncoding};

/// Read file metadata from a complete parquet file using default options.
pub fn read_file_metadata(file: &[u8]) -> Result<FileMetaData> {
    MetaDataLoader::new().load(file)
}

use tracing::debug;

use super::FileMetaData;
use super::projector::project_file_metadata;
use crate::compact::{CompactDecoder, StructValue};
use crate::cursor::ByteCursor;
use crate::errors::Result;
use crate::footer::ParquetFooter;
use crate::options::DecodeOptions;

/// Loads file metadata from the raw bytes of a parquet file.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetaDataLoader {
    options: DecodeOptions,
}

impl MetaDataLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: DecodeOptions) -> Self {
        MetaDataLoader { options }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Locate, decode, and project the file's metadata.
    pub fn load(&self, file: &[u8]) -> Result<FileMetaData> {
        let root = self.load_raw(file)?;
        project_file_metadata(&root)
    }

    /// Locate and decode the file's metadata without projecting it.
    ///
    /// Offsets in errors are relative to the start of the file.
    pub fn load_raw(&self, file: &[u8]) -> Result<StructValue> {
        let footer = ParquetFooter::locate(file)?;
        let metadata = footer.metadata_bytes(file)?;

        let cursor = ByteCursor::with_base_offset(metadata, footer.metadata_offset);
        let mut decoder = CompactDecoder::new(cursor, self.options);
        let root = decoder.read_struct()?;

        let cursor = decoder.into_cursor();
        if !cursor.is_empty() {
            debug!(
                offset = cursor.offset(),
                remaining = cursor.remaining(),
                "trailing bytes after file metadata"
            );
        }

        Ok(root)
    }
}

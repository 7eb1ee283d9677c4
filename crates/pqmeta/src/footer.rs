//! Parquet container framing.
//!
//! A file is laid out as:
//!
//! ```text
//! "PAR1" | row group data | metadata | metadata length (u32 LE) | "PAR1"
//! ```

use std::ops::Range;

use tracing::debug;

use crate::cursor::ByteCursor;
use crate::errors::{PqMetaError, Result};

/// Magic value for parquet files.
pub const PARQUET_MAGIC: &[u8; 4] = b"PAR1";

/// The length of the parquet footer in bytes (metadata length + magic).
pub const FOOTER_SIZE: usize = 8;

/// Location of the encoded metadata within a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParquetFooter {
    pub metadata_offset: usize,
    pub metadata_length: u32,
}

impl ParquetFooter {
    /// Validate the magic markers of `file` and locate the metadata.
    pub fn locate(file: &[u8]) -> Result<Self> {
        let file_length = file.len();

        let head = &file[..file_length.min(PARQUET_MAGIC.len())];
        if head != PARQUET_MAGIC {
            return Err(PqMetaError::InvalidMagic {
                offset: 0,
                found: head.to_vec(),
            });
        }

        let too_short = PqMetaError::InvalidFooter {
            file_length,
            metadata_length: 0,
        };

        // Leading and trailing magic may not overlap.
        if file_length < 2 * PARQUET_MAGIC.len() {
            return Err(too_short);
        }

        let tail_offset = file_length - PARQUET_MAGIC.len();
        let tail = &file[tail_offset..];
        if tail != PARQUET_MAGIC {
            return Err(PqMetaError::InvalidMagic {
                offset: tail_offset,
                found: tail.to_vec(),
            });
        }

        if file_length < PARQUET_MAGIC.len() + FOOTER_SIZE {
            return Err(too_short);
        }

        let length_offset = file_length - FOOTER_SIZE;
        let metadata_length =
            ByteCursor::with_base_offset(&file[length_offset..tail_offset], length_offset)
                .read_u32_le()?;

        // Metadata may not overlap the leading magic.
        let metadata_offset = length_offset
            .checked_sub(metadata_length as usize)
            .filter(|&offset| offset >= PARQUET_MAGIC.len())
            .ok_or(PqMetaError::InvalidFooter {
                file_length,
                metadata_length,
            })?;

        debug!(metadata_offset, metadata_length, file_length, "located parquet footer");

        Ok(ParquetFooter {
            metadata_offset,
            metadata_length,
        })
    }

    pub fn metadata_range(&self) -> Range<usize> {
        self.metadata_offset..self.metadata_offset + self.metadata_length as usize
    }

    /// Get the metadata bytes from the file this footer was located in.
    pub fn metadata_bytes<'a>(&self, file: &'a [u8]) -> Result<&'a [u8]> {
        file.get(self.metadata_range())
            .ok_or(PqMetaError::InvalidFooter {
                file_length: file.len(),
                metadata_length: self.metadata_length,
            })
    }
}

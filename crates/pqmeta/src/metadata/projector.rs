//! Projection of a decoded value tree onto the metadata records.
//!
//! Fields are looked up by id, the first occurrence of an id wins. Fields with
//! ids the records don't know about are ignored.

use bytes::Bytes;
use tracing::{debug, trace};

use super::{
    ColumnChunk,
    ColumnMetaData,
    CompressionCodec,
    ConvertedType,
    Encoding,
    FileMetaData,
    KeyValue,
    PhysicalType,
    Repetition,
    RowGroup,
    SchemaElement,
};
use crate::compact::{CompactType, Field, StructValue, Value};
use crate::errors::{PqMetaError, Result};

/// Field ids of `FileMetaData` that get projected.
const FILE_METADATA_FIELDS: &[i16] = &[1, 2, 3, 4, 5, 6];

/// Project the root struct of a file's metadata.
pub fn project_file_metadata(root: &StructValue) -> Result<FileMetaData> {
    let p = StructProjector::new("FileMetaData", root);

    let meta = FileMetaData {
        version: p.required_i32(1)?,
        schema: p.required_struct_list(2, project_schema_element)?,
        num_rows: p.required_i64(3)?,
        row_groups: p.required_struct_list(4, project_row_group)?,
        key_value_metadata: p.optional_struct_list(5, project_key_value)?,
        created_by: p.optional_string(6)?,
    };

    for field in &root.fields {
        if !FILE_METADATA_FIELDS.contains(&field.id) {
            trace!(id = field.id, field_type = %field.field_type, "ignoring unknown metadata field");
        }
    }

    debug!(
        version = meta.version,
        num_rows = meta.num_rows,
        num_row_groups = meta.row_groups.len(),
        schema_len = meta.schema.len(),
        "projected file metadata"
    );

    Ok(meta)
}

pub fn project_schema_element(s: &StructValue) -> Result<SchemaElement> {
    let p = StructProjector::new("SchemaElement", s);

    // The name normally lives in field 4. A binary field 1 is also accepted as
    // the name, field 1 is otherwise the physical type.
    let name_in_type_field = matches!(p.field(1), Some(f) if f.field_type == CompactType::Binary);
    let name = match p.optional_string(4)? {
        Some(name) => name,
        None if name_in_type_field => p.required_string(1)?,
        None => return Err(p.missing(4)),
    };
    let physical_type = if name_in_type_field {
        None
    } else {
        p.optional_i32(1)?.map(PhysicalType::from)
    };

    Ok(SchemaElement {
        name,
        physical_type,
        type_length: p.optional_i32(2)?,
        repetition_type: p.optional_i32(3)?.map(Repetition::from),
        num_children: p.optional_i32(5)?,
        converted_type: p.optional_i32(6)?.map(ConvertedType::from),
        scale: p.optional_i32(7)?,
        precision: p.optional_i32(8)?,
        field_id: p.optional_i32(9)?,
    })
}

pub fn project_row_group(s: &StructValue) -> Result<RowGroup> {
    let p = StructProjector::new("RowGroup", s);
    Ok(RowGroup {
        columns: p.required_struct_list(1, project_column_chunk)?,
        total_byte_size: p.required_i64(2)?,
        num_rows: p.required_i64(3)?,
        file_offset: p.optional_i64(5)?,
        total_compressed_size: p.optional_i64(6)?,
        ordinal: p.optional_i16(7)?,
    })
}

pub fn project_column_chunk(s: &StructValue) -> Result<ColumnChunk> {
    let p = StructProjector::new("ColumnChunk", s);
    Ok(ColumnChunk {
        file_path: p.optional_string(1)?,
        file_offset: p.required_i64(2)?,
        meta_data: p
            .optional_struct(3)?
            .map(project_column_meta_data)
            .transpose()?,
    })
}

pub fn project_column_meta_data(s: &StructValue) -> Result<ColumnMetaData> {
    let p = StructProjector::new("ColumnMetaData", s);
    Ok(ColumnMetaData {
        physical_type: PhysicalType::from(p.required_i32(1)?),
        encodings: p
            .required_list(2, CompactType::I32, |id, v| p.element(id, v, Value::as_i32))?
            .into_iter()
            .map(Encoding::from)
            .collect(),
        path_in_schema: p.required_list(3, CompactType::Binary, |id, v| {
            let b = p.element(id, v, Value::as_binary)?;
            p.utf8(id, b)
        })?,
        codec: CompressionCodec::from(p.required_i32(4)?),
        num_values: p.required_i64(5)?,
        total_uncompressed_size: p.required_i64(6)?,
        total_compressed_size: p.required_i64(7)?,
        key_value_metadata: p.optional_struct_list(8, project_key_value)?,
        data_page_offset: p.required_i64(9)?,
        index_page_offset: p.optional_i64(10)?,
        dictionary_page_offset: p.optional_i64(11)?,
    })
}

pub fn project_key_value(s: &StructValue) -> Result<KeyValue> {
    let p = StructProjector::new("KeyValue", s);
    Ok(KeyValue {
        key: p.required_string(1)?,
        value: p.optional_string(2)?,
    })
}

/// Typed access to the fields of a single struct.
///
/// `record` names the struct in errors.
#[derive(Debug, Clone, Copy)]
struct StructProjector<'a> {
    record: &'static str,
    value: &'a StructValue,
}

impl<'a> StructProjector<'a> {
    fn new(record: &'static str, value: &'a StructValue) -> Self {
        StructProjector { record, value }
    }

    fn field(&self, id: i16) -> Option<&'a Field> {
        self.value.field(id)
    }

    fn missing(&self, id: i16) -> PqMetaError {
        PqMetaError::MissingField {
            record: self.record,
            field_id: id,
        }
    }

    fn mismatch(&self, id: i16, expected: CompactType, found: CompactType) -> PqMetaError {
        PqMetaError::TypeMismatch {
            record: self.record,
            field_id: id,
            expected,
            found,
        }
    }

    fn utf8(&self, id: i16, b: &Bytes) -> Result<String> {
        std::str::from_utf8(b)
            .map(|s| s.to_string())
            .map_err(|_| PqMetaError::InvalidUtf8 {
                record: self.record,
                field_id: id,
            })
    }

    /// Extract a field with the expected type, returning None if the field
    /// isn't present.
    fn optional<T>(
        &self,
        id: i16,
        expected: CompactType,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<Option<T>> {
        let field = match self.field(id) {
            Some(field) => field,
            None => return Ok(None),
        };
        if field.field_type != expected {
            return Err(self.mismatch(id, expected, field.field_type));
        }
        match extract(&field.value) {
            Some(v) => Ok(Some(v)),
            None => Err(self.mismatch(id, expected, field.value.compact_type())),
        }
    }

    /// Extract a list element, `id` being the field id of the list.
    fn element<T>(
        &self,
        id: i16,
        value: &'a Value,
        extract: impl FnOnce(&'a Value) -> Option<T>,
    ) -> Result<T> {
        extract(value).ok_or_else(|| {
            // Element type was already checked, this only happens if the tree
            // wasn't produced by the decoder.
            self.mismatch(id, CompactType::List, value.compact_type())
        })
    }

    fn optional_i16(&self, id: i16) -> Result<Option<i16>> {
        self.optional(id, CompactType::I16, Value::as_i16)
    }

    fn optional_i32(&self, id: i16) -> Result<Option<i32>> {
        self.optional(id, CompactType::I32, Value::as_i32)
    }

    fn required_i32(&self, id: i16) -> Result<i32> {
        self.optional_i32(id)?.ok_or_else(|| self.missing(id))
    }

    fn optional_i64(&self, id: i16) -> Result<Option<i64>> {
        self.optional(id, CompactType::I64, Value::as_i64)
    }

    fn required_i64(&self, id: i16) -> Result<i64> {
        self.optional_i64(id)?.ok_or_else(|| self.missing(id))
    }

    fn optional_string(&self, id: i16) -> Result<Option<String>> {
        self.optional(id, CompactType::Binary, Value::as_binary)?
            .map(|b| self.utf8(id, b))
            .transpose()
    }

    fn required_string(&self, id: i16) -> Result<String> {
        self.optional_string(id)?.ok_or_else(|| self.missing(id))
    }

    fn optional_struct(&self, id: i16) -> Result<Option<&'a StructValue>> {
        self.optional(id, CompactType::Struct, Value::as_struct)
    }

    /// Project each element of a list field.
    ///
    /// The list's element type has to match `element_type`, unless the list
    /// is empty.
    fn optional_list<T>(
        &self,
        id: i16,
        element_type: CompactType,
        mut project: impl FnMut(i16, &'a Value) -> Result<T>,
    ) -> Result<Option<Vec<T>>> {
        let (actual, elements) = match self.optional(id, CompactType::List, Value::as_elements)? {
            Some(list) => list,
            None => return Ok(None),
        };
        if !elements.is_empty() && actual != element_type {
            return Err(self.mismatch(id, element_type, actual));
        }

        let projected = elements
            .iter()
            .map(|v| project(id, v))
            .collect::<Result<Vec<_>>>()?;
        Ok(Some(projected))
    }

    fn required_list<T>(
        &self,
        id: i16,
        element_type: CompactType,
        project: impl FnMut(i16, &'a Value) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.optional_list(id, element_type, project)?
            .ok_or_else(|| self.missing(id))
    }

    fn optional_struct_list<T>(
        &self,
        id: i16,
        project: impl Fn(&'a StructValue) -> Result<T>,
    ) -> Result<Option<Vec<T>>> {
        self.optional_list(id, CompactType::Struct, |id, v| {
            project(self.element(id, v, Value::as_struct)?)
        })
    }

    fn required_struct_list<T>(
        &self,
        id: i16,
        project: impl Fn(&'a StructValue) -> Result<T>,
    ) -> Result<Vec<T>> {
        self.optional_struct_list(id, project)?
            .ok_or_else(|| self.missing(id))
    }
}

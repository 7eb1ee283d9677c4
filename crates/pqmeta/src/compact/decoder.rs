use bytes::Bytes;
use tracing::trace;

use super::{CompactType, Field, StructValue, Value};
use crate::cursor::ByteCursor;
use crate::errors::{PqMetaError, Result};
use crate::options::{DecodeOptions, FieldIdEncoding};

/// Header preceding each field in a struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FieldHeader {
    id: i16,
    field_type: CompactType,
}

/// Field id state for a single struct.
///
/// A fresh scope is created for every struct that's read, including structs
/// nested in lists and maps.
#[derive(Debug, Default)]
struct FieldIdScope {
    last_field_id: i16,
}

/// Decodes compact protocol values from a cursor.
#[derive(Debug)]
pub struct CompactDecoder<'a> {
    cursor: ByteCursor<'a>,
    options: DecodeOptions,
    /// Number of composite values we're currently inside of.
    depth: usize,
}

impl<'a> CompactDecoder<'a> {
    pub fn new(cursor: ByteCursor<'a>, options: DecodeOptions) -> Self {
        CompactDecoder {
            cursor,
            options,
            depth: 0,
        }
    }

    pub fn cursor(&self) -> &ByteCursor<'a> {
        &self.cursor
    }

    pub fn into_cursor(self) -> ByteCursor<'a> {
        self.cursor
    }

    /// Read a struct, consuming everything up to and including its stop
    /// byte.
    pub fn read_struct(&mut self) -> Result<StructValue> {
        self.nested(|dec| {
            let mut scope = FieldIdScope::default();
            let mut fields = Vec::new();
            while let Some(header) = dec.read_field_header(&mut scope)? {
                let value = dec.read_value(header.field_type)?;
                fields.push(Field {
                    id: header.id,
                    field_type: header.field_type,
                    value,
                });
            }
            Ok(StructValue::new(fields))
        })
    }

    /// Read a single value of the given type.
    ///
    /// Bool types are treated as they appear in field headers, the value is
    /// the type itself and no bytes are consumed.
    pub fn read_value(&mut self, value_type: CompactType) -> Result<Value> {
        let value = match value_type {
            CompactType::Stop => {
                return Err(PqMetaError::UnexpectedStop {
                    offset: self.cursor.offset(),
                });
            }
            CompactType::BoolTrue => Value::Bool(true),
            CompactType::BoolFalse => Value::Bool(false),
            CompactType::Byte => Value::Byte(self.cursor.read_byte()? as i8),
            CompactType::I16 => Value::I16(self.read_i16()?),
            CompactType::I32 => Value::I32(self.cursor.read_zigzag32()?),
            CompactType::I64 => Value::I64(self.cursor.read_zigzag64()?),
            CompactType::Double => Value::Double(self.cursor.read_f64_le()?),
            CompactType::Binary => Value::Binary(Bytes::copy_from_slice(self.read_binary()?)),
            CompactType::List => {
                let (element_type, elements) = self.read_elements()?;
                Value::List {
                    element_type,
                    elements,
                }
            }
            CompactType::Set => {
                let (element_type, elements) = self.read_elements()?;
                Value::Set {
                    element_type,
                    elements,
                }
            }
            CompactType::Map => self.read_map()?,
            CompactType::Struct => Value::Struct(self.read_struct()?),
        };

        Ok(value)
    }

    /// Advance past a single value of the given type without building a
    /// value for it.
    pub fn skip_value(&mut self, value_type: CompactType) -> Result<()> {
        match value_type {
            CompactType::Stop => Err(PqMetaError::UnexpectedStop {
                offset: self.cursor.offset(),
            }),
            CompactType::BoolTrue | CompactType::BoolFalse => Ok(()),
            CompactType::Byte => self.cursor.skip(1),
            CompactType::I16 => self.read_i16().map(|_| ()),
            CompactType::I32 => self.cursor.read_varuint32().map(|_| ()),
            CompactType::I64 => self.cursor.read_varuint64().map(|_| ()),
            CompactType::Double => self.cursor.skip(8),
            CompactType::Binary => self.read_binary().map(|_| ()),
            CompactType::List | CompactType::Set => self.nested(|dec| {
                let (element_type, count) = dec.read_collection_header()?;
                for _ in 0..count {
                    dec.skip_element(element_type)?;
                }
                Ok(())
            }),
            CompactType::Map => self.nested(|dec| {
                let (key_type, value_type, count) = dec.read_map_header()?;
                for _ in 0..count {
                    dec.skip_element(key_type)?;
                    dec.skip_element(value_type)?;
                }
                Ok(())
            }),
            CompactType::Struct => self.nested(|dec| {
                let mut scope = FieldIdScope::default();
                while let Some(header) = dec.read_field_header(&mut scope)? {
                    trace!(id = header.id, field_type = %header.field_type, "skipping field");
                    dec.skip_value(header.field_type)?;
                }
                Ok(())
            }),
        }
    }

    /// Read the next field header, returning None once the stop byte is
    /// reached.
    fn read_field_header(&mut self, scope: &mut FieldIdScope) -> Result<Option<FieldHeader>> {
        let offset = self.cursor.offset();
        let byte = self.cursor.read_byte()?;
        let field_type = type_from_tag(byte & 0x0F, offset)?;
        if field_type == CompactType::Stop {
            return Ok(None);
        }

        let delta = (byte >> 4) as i16;
        let id = if delta != 0 {
            scope.last_field_id.wrapping_add(delta)
        } else {
            self.read_absolute_field_id()?
        };
        scope.last_field_id = id;

        trace!(id, %field_type, offset, "read field header");

        Ok(Some(FieldHeader { id, field_type }))
    }

    fn read_absolute_field_id(&mut self) -> Result<i16> {
        let offset = self.cursor.offset();
        match self.options.field_id_encoding {
            FieldIdEncoding::ZigzagVarint => {
                let id = self.cursor.read_zigzag32()?;
                i16::try_from(id).map_err(|_| PqMetaError::VarintOverflow { offset })
            }
            FieldIdEncoding::LittleEndianI16 => {
                let b = self.cursor.read_exact(2)?;
                Ok(i16::from_le_bytes([b[0], b[1]]))
            }
            FieldIdEncoding::BigEndianI16 => {
                let b = self.cursor.read_exact(2)?;
                Ok(i16::from_be_bytes([b[0], b[1]]))
            }
        }
    }

    fn read_i16(&mut self) -> Result<i16> {
        let offset = self.cursor.offset();
        let v = self.cursor.read_zigzag32()?;
        i16::try_from(v).map_err(|_| PqMetaError::VarintOverflow { offset })
    }

    fn read_binary(&mut self) -> Result<&'a [u8]> {
        let len = self.cursor.read_varuint32()?;
        self.cursor.read_exact(len as usize)
    }

    fn read_elements(&mut self) -> Result<(CompactType, Vec<Value>)> {
        self.nested(|dec| {
            let (element_type, count) = dec.read_collection_header()?;
            let mut elements = Vec::with_capacity(count as usize);
            for _ in 0..count {
                elements.push(dec.read_element(element_type)?);
            }
            Ok((element_type, elements))
        })
    }

    fn read_map(&mut self) -> Result<Value> {
        self.nested(|dec| {
            let (key_type, value_type, count) = dec.read_map_header()?;
            let mut entries = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let key = dec.read_element(key_type)?;
                let value = dec.read_element(value_type)?;
                entries.push((key, value));
            }
            Ok(Value::Map {
                key_type,
                value_type,
                entries,
            })
        })
    }

    /// Read a value inside a list, set, or map.
    ///
    /// Unlike in field headers, bools in collections take up a byte.
    fn read_element(&mut self, element_type: CompactType) -> Result<Value> {
        if element_type.is_bool() {
            let b = self.cursor.read_byte()?;
            return Ok(Value::Bool(b == CompactType::BoolTrue.tag()));
        }
        self.read_value(element_type)
    }

    fn skip_element(&mut self, element_type: CompactType) -> Result<()> {
        if element_type.is_bool() {
            return self.cursor.skip(1);
        }
        self.skip_value(element_type)
    }

    /// Read the element type and count for a list or set.
    ///
    /// Counts under 15 are packed into the high nibble, larger counts follow
    /// as a varint.
    fn read_collection_header(&mut self) -> Result<(CompactType, u32)> {
        let offset = self.cursor.offset();
        let header = self.cursor.read_byte()?;
        let element_type = type_from_tag(header & 0x0F, offset)?;
        let count = match header >> 4 {
            15 => self.cursor.read_varuint32()?,
            short => short as u32,
        };

        if count > 0 && element_type == CompactType::Stop {
            return Err(PqMetaError::UnexpectedStop { offset });
        }
        self.check_count(count, 1)?;

        Ok((element_type, count))
    }

    /// Read the count and key/value types for a map.
    ///
    /// Empty maps are just a zero count with no type byte.
    fn read_map_header(&mut self) -> Result<(CompactType, CompactType, u32)> {
        let count = self.cursor.read_varuint32()?;
        if count == 0 {
            return Ok((CompactType::Stop, CompactType::Stop, 0));
        }

        let offset = self.cursor.offset();
        let types = self.cursor.read_byte()?;
        let key_type = type_from_tag(types >> 4, offset)?;
        let value_type = type_from_tag(types & 0x0F, offset)?;
        if key_type == CompactType::Stop || value_type == CompactType::Stop {
            return Err(PqMetaError::UnexpectedStop { offset });
        }
        self.check_count(count, 2)?;

        Ok((key_type, value_type, count))
    }

    /// Check that the remaining input could possibly hold `count` entries,
    /// each at least `min_entry_size` bytes.
    ///
    /// Done before allocating for a collection.
    fn check_count(&self, count: u32, min_entry_size: usize) -> Result<()> {
        let needed = (count as usize).saturating_mul(min_entry_size);
        if needed > self.cursor.remaining() {
            return Err(PqMetaError::Truncated {
                offset: self.cursor.offset(),
                needed,
                available: self.cursor.remaining(),
            });
        }
        Ok(())
    }

    /// Run `f` one nesting level deeper.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(PqMetaError::NestingTooDeep {
                max_depth: self.options.max_depth,
                offset: self.cursor.offset(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }
}

fn type_from_tag(tag: u8, offset: usize) -> Result<CompactType> {
    CompactType::from_tag(tag).ok_or(PqMetaError::UnknownCompactType { tag, offset })
}

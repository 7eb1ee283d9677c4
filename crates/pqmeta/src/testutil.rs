//! Helpers for building compact protocol payloads in tests.

use crate::compact::CompactType;
use crate::footer::PARQUET_MAGIC;
use crate::options::FieldIdEncoding;

pub fn zigzag_encode32(n: i32) -> u32 {
    ((n << 1) ^ (n >> 31)) as u32
}

pub fn zigzag_encode64(n: i64) -> u64 {
    ((n << 1) ^ (n >> 63)) as u64
}

pub fn encode_varuint64(mut v: u64) -> Vec<u8> {
    let mut out = Vec::new();
    loop {
        let byte = (v & 0x7F) as u8;
        v >>= 7;
        if v == 0 {
            out.push(byte);
            return out;
        }
        out.push(byte | 0x80);
    }
}

/// Minimal compact protocol writer.
///
/// Tracks the last field id of each open struct so field headers use deltas
/// where possible.
#[derive(Debug, Default)]
pub struct CompactWriter {
    buf: Vec<u8>,
    scopes: Vec<i16>,
    field_id_encoding: FieldIdEncoding,
}

impl CompactWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_field_id_encoding(field_id_encoding: FieldIdEncoding) -> Self {
        CompactWriter {
            field_id_encoding,
            ..Default::default()
        }
    }

    pub fn finish(self) -> Vec<u8> {
        assert!(self.scopes.is_empty(), "unclosed struct");
        self.buf
    }

    pub fn write_byte(&mut self, b: u8) -> &mut Self {
        self.buf.push(b);
        self
    }

    pub fn write_varuint64(&mut self, v: u64) -> &mut Self {
        self.buf.extend(encode_varuint64(v));
        self
    }

    pub fn write_i32(&mut self, v: i32) -> &mut Self {
        self.write_varuint64(zigzag_encode32(v) as u64)
    }

    pub fn write_i64(&mut self, v: i64) -> &mut Self {
        self.write_varuint64(zigzag_encode64(v))
    }

    pub fn write_binary(&mut self, b: &[u8]) -> &mut Self {
        self.write_varuint64(b.len() as u64);
        self.buf.extend_from_slice(b);
        self
    }

    pub fn field_header(&mut self, id: i16, ty: CompactType) -> &mut Self {
        let last = self.scopes.last_mut().expect("field outside of struct");
        let delta = id as i32 - *last as i32;
        *last = id;

        if (1..=15).contains(&delta) {
            self.buf.push(((delta as u8) << 4) | ty.tag());
            return self;
        }

        self.buf.push(ty.tag());
        match self.field_id_encoding {
            FieldIdEncoding::ZigzagVarint => self.write_i32(id as i32),
            FieldIdEncoding::LittleEndianI16 => {
                self.buf.extend_from_slice(&id.to_le_bytes());
                self
            }
            FieldIdEncoding::BigEndianI16 => {
                self.buf.extend_from_slice(&id.to_be_bytes());
                self
            }
        }
    }

    pub fn struct_begin(&mut self) -> &mut Self {
        self.scopes.push(0);
        self
    }

    pub fn struct_end(&mut self) -> &mut Self {
        self.scopes.pop().expect("no open struct");
        self.write_byte(CompactType::Stop.tag())
    }

    pub fn list_header(&mut self, element_type: CompactType, count: u32) -> &mut Self {
        if count < 15 {
            self.write_byte(((count as u8) << 4) | element_type.tag())
        } else {
            self.write_byte(0xF0 | element_type.tag())
                .write_varuint64(count as u64)
        }
    }

    pub fn map_header(&mut self, key: CompactType, value: CompactType, count: u32) -> &mut Self {
        self.write_varuint64(count as u64);
        if count > 0 {
            self.write_byte((key.tag() << 4) | value.tag());
        }
        self
    }

    pub fn field_bool(&mut self, id: i16, v: bool) -> &mut Self {
        let ty = if v {
            CompactType::BoolTrue
        } else {
            CompactType::BoolFalse
        };
        self.field_header(id, ty)
    }

    pub fn field_i16(&mut self, id: i16, v: i16) -> &mut Self {
        self.field_header(id, CompactType::I16).write_i32(v as i32)
    }

    pub fn field_i32(&mut self, id: i16, v: i32) -> &mut Self {
        self.field_header(id, CompactType::I32).write_i32(v)
    }

    pub fn field_i64(&mut self, id: i16, v: i64) -> &mut Self {
        self.field_header(id, CompactType::I64).write_i64(v)
    }

    pub fn field_binary(&mut self, id: i16, v: &[u8]) -> &mut Self {
        self.field_header(id, CompactType::Binary).write_binary(v)
    }

    pub fn field_list_begin(&mut self, id: i16, element_type: CompactType, count: u32) -> &mut Self {
        self.field_header(id, CompactType::List)
            .list_header(element_type, count)
    }

    pub fn field_struct_begin(&mut self, id: i16) -> &mut Self {
        self.field_header(id, CompactType::Struct).struct_begin()
    }
}

/// Wrap encoded metadata in parquet framing, with `data` standing in for row
/// group data.
pub fn parquet_file(data: &[u8], metadata: &[u8]) -> Vec<u8> {
    let mut file = Vec::new();
    file.extend_from_slice(PARQUET_MAGIC);
    file.extend_from_slice(data);
    file.extend_from_slice(metadata);
    file.extend_from_slice(&(metadata.len() as u32).to_le_bytes());
    file.extend_from_slice(PARQUET_MAGIC);
    file
}

/// Metadata with an empty schema and no row groups.
pub fn minimal_metadata() -> Vec<u8> {
    let mut w = CompactWriter::new();
    w.struct_begin()
        .field_i32(1, 1)
        .field_i64(3, 0)
        .field_list_begin(2, CompactType::Struct, 0)
        .field_list_begin(4, CompactType::Struct, 0)
        .field_binary(6, b"test-writer")
        .struct_end();
    w.finish()
}

/// Metadata for a file with a single required utf8 column "text", holding 5
/// rows in one row group.
///
/// Includes column statistics and column orders, which the projector doesn't
/// map.
pub fn single_column_metadata() -> Vec<u8> {
    let mut w = CompactWriter::new();
    w.struct_begin().field_i32(1, 2);

    // Schema
    w.field_list_begin(2, CompactType::Struct, 2);
    w.struct_begin()
        .field_binary(4, b"schema")
        .field_i32(5, 1)
        .struct_end();
    w.struct_begin()
        .field_i32(1, 6)
        .field_i32(3, 0)
        .field_binary(4, b"text")
        .field_i32(6, 0)
        .struct_end();

    w.field_i64(3, 5);

    // Row groups
    w.field_list_begin(4, CompactType::Struct, 1);
    w.struct_begin().field_list_begin(1, CompactType::Struct, 1);
    w.struct_begin()
        .field_i64(2, 4)
        .field_struct_begin(3)
        .field_i32(1, 6)
        .field_list_begin(2, CompactType::I32, 2)
        .write_i32(0)
        .write_i32(3)
        .field_list_begin(3, CompactType::Binary, 1)
        .write_binary(b"text")
        .field_i32(4, 1)
        .field_i64(5, 5)
        .field_i64(6, 100)
        .field_i64(7, 80)
        .field_i64(9, 4)
        .field_struct_begin(12)
        .field_binary(1, b"text5")
        .field_binary(2, b"text1")
        .field_i64(3, 0)
        .struct_end()
        .struct_end()
        .struct_end();
    w.field_i64(2, 100)
        .field_i64(3, 5)
        .field_i16(7, 0)
        .struct_end();

    // Key/value metadata
    w.field_list_begin(5, CompactType::Struct, 1);
    w.struct_begin()
        .field_binary(1, b"writer.model.name")
        .field_binary(2, b"resnet-50")
        .struct_end();

    w.field_binary(6, b"parquet-go version 0.25");

    // Column orders
    w.field_list_begin(7, CompactType::Struct, 1);
    w.struct_begin().field_struct_begin(1).struct_end().struct_end();

    w.struct_end();
    w.finish()
}

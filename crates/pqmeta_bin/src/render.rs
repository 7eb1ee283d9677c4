//! Human readable rendering of file metadata.

use std::io::{self, Write};

use pqmeta::FileMetaData;
use pqmeta::compact::{StructValue, Value};
use pqmeta::metadata::{ColumnChunk, RowGroup, SchemaElement};

const INDENT: &str = "  ";

/// Write a summary of the file metadata.
pub fn write_text<W: Write>(out: &mut W, meta: &FileMetaData) -> io::Result<()> {
    writeln!(out, "version: {}", meta.version)?;
    writeln!(out, "num_rows: {}", meta.num_rows)?;
    writeln!(
        out,
        "created_by: {}",
        meta.created_by.as_deref().unwrap_or("<none>")
    )?;

    if let Some(kvs) = &meta.key_value_metadata {
        writeln!(out, "key_value_metadata:")?;
        for kv in kvs {
            writeln!(
                out,
                "{INDENT}{}: {}",
                kv.key,
                kv.value.as_deref().unwrap_or("<none>")
            )?;
        }
    }

    writeln!(out, "schema:")?;
    write_schema(out, &meta.schema)?;

    writeln!(out, "row_groups: {}", meta.num_row_groups())?;
    for (idx, group) in meta.row_groups.iter().enumerate() {
        write_row_group(out, idx, group)?;
    }

    Ok(())
}

/// Write the flattened schema as a tree, using `num_children` to work out the
/// nesting.
fn write_schema<W: Write>(out: &mut W, schema: &[SchemaElement]) -> io::Result<()> {
    // Remaining children for each open group.
    let mut remaining: Vec<i32> = Vec::new();

    for elem in schema {
        while remaining.last() == Some(&0) {
            remaining.pop();
        }
        if let Some(last) = remaining.last_mut() {
            *last -= 1;
        }

        let indent = INDENT.repeat(remaining.len() + 1);
        write!(out, "{indent}{}", elem.name)?;
        if let Some(rep) = elem.repetition_type {
            write!(out, " {rep}")?;
        }
        if let Some(ty) = elem.physical_type {
            write!(out, " {ty}")?;
        }
        if let Some(len) = elem.type_length {
            write!(out, "({len})")?;
        }
        if let Some(conv) = elem.converted_type {
            write!(out, " ({conv})")?;
        }
        writeln!(out)?;

        if let Some(n) = elem.num_children {
            remaining.push(n);
        }
    }

    Ok(())
}

fn write_row_group<W: Write>(out: &mut W, idx: usize, group: &RowGroup) -> io::Result<()> {
    writeln!(
        out,
        "{INDENT}[{idx}] rows: {}, total_byte_size: {}, columns: {}",
        group.num_rows,
        group.total_byte_size,
        group.columns.len()
    )?;
    for chunk in &group.columns {
        write_column_chunk(out, chunk)?;
    }
    Ok(())
}

fn write_column_chunk<W: Write>(out: &mut W, chunk: &ColumnChunk) -> io::Result<()> {
    let indent = INDENT.repeat(2);
    match &chunk.meta_data {
        Some(md) => {
            let encodings: Vec<_> = md.encodings.iter().map(|e| e.to_string()).collect();
            writeln!(
                out,
                "{indent}{} {} {} values: {}, compressed: {}, uncompressed: {}, encodings: {}",
                md.path_in_schema.join("."),
                md.physical_type,
                md.codec,
                md.num_values,
                md.total_compressed_size,
                md.total_uncompressed_size,
                encodings.join(","),
            )
        }
        None => writeln!(out, "{indent}<no metadata> offset: {}", chunk.file_offset),
    }
}

/// Write an indented dump of a decoded value tree.
pub fn write_raw<W: Write>(out: &mut W, root: &StructValue) -> io::Result<()> {
    writeln!(out, "struct")?;
    write_struct_fields(out, root, 1)
}

fn write_struct_fields<W: Write>(out: &mut W, s: &StructValue, depth: usize) -> io::Result<()> {
    for field in &s.fields {
        write!(out, "{}{}: ", INDENT.repeat(depth), field.id)?;
        write_value(out, &field.value, depth)?;
    }
    Ok(())
}

fn write_value<W: Write>(out: &mut W, value: &Value, depth: usize) -> io::Result<()> {
    match value {
        Value::Bool(v) => writeln!(out, "bool {v}"),
        Value::Byte(v) => writeln!(out, "byte {v}"),
        Value::I16(v) => writeln!(out, "i16 {v}"),
        Value::I32(v) => writeln!(out, "i32 {v}"),
        Value::I64(v) => writeln!(out, "i64 {v}"),
        Value::Double(v) => writeln!(out, "double {v}"),
        Value::Binary(b) => match std::str::from_utf8(b) {
            Ok(s) => writeln!(out, "binary {s:?}"),
            Err(_) => writeln!(out, "binary {} bytes", b.len()),
        },
        Value::List {
            element_type,
            elements,
        }
        | Value::Set {
            element_type,
            elements,
        } => {
            writeln!(
                out,
                "{}<{element_type}> [{}]",
                value.compact_type(),
                elements.len()
            )?;
            let indent = INDENT.repeat(depth + 1);
            for (idx, elem) in elements.iter().enumerate() {
                write!(out, "{indent}[{idx}] ")?;
                write_value(out, elem, depth + 1)?;
            }
            Ok(())
        }
        Value::Map {
            key_type,
            value_type,
            entries,
        } => {
            writeln!(out, "map<{key_type}, {value_type}> [{}]", entries.len())?;
            let indent = INDENT.repeat(depth + 1);
            for (key, val) in entries {
                write!(out, "{indent}key ")?;
                write_value(out, key, depth + 1)?;
                write!(out, "{indent}value ")?;
                write_value(out, val, depth + 1)?;
            }
            Ok(())
        }
        Value::Struct(s) => {
            writeln!(out, "struct")?;
            write_struct_fields(out, s, depth + 1)
        }
    }
}

use bytes::Bytes;

use super::CompactType;

/// A single decoded compact protocol value.
///
/// Composite variants own their children. The tree mirrors the wire layout
/// and carries no schema.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Double(f64),
    /// Raw bytes, used for both binary and string fields.
    Binary(Bytes),
    List {
        element_type: CompactType,
        elements: Vec<Value>,
    },
    Set {
        element_type: CompactType,
        elements: Vec<Value>,
    },
    /// Key/value pairs in wire order.
    ///
    /// An empty map carries no type information on the wire, both types are
    /// `Stop` in that case.
    Map {
        key_type: CompactType,
        value_type: CompactType,
        entries: Vec<(Value, Value)>,
    },
    Struct(StructValue),
}

impl Value {
    /// The compact type this value would be written as in a field header.
    pub fn compact_type(&self) -> CompactType {
        match self {
            Value::Bool(true) => CompactType::BoolTrue,
            Value::Bool(false) => CompactType::BoolFalse,
            Value::Byte(_) => CompactType::Byte,
            Value::I16(_) => CompactType::I16,
            Value::I32(_) => CompactType::I32,
            Value::I64(_) => CompactType::I64,
            Value::Double(_) => CompactType::Double,
            Value::Binary(_) => CompactType::Binary,
            Value::List { .. } => CompactType::List,
            Value::Set { .. } => CompactType::Set,
            Value::Map { .. } => CompactType::Map,
            Value::Struct(_) => CompactType::Struct,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i16(&self) -> Option<i16> {
        match self {
            Value::I16(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Value::I32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_binary(&self) -> Option<&Bytes> {
        match self {
            Value::Binary(v) => Some(v),
            _ => None,
        }
    }

    /// Get the element type and elements for a list or set.
    pub fn as_elements(&self) -> Option<(CompactType, &[Value])> {
        match self {
            Value::List {
                element_type,
                elements,
            }
            | Value::Set {
                element_type,
                elements,
            } => Some((*element_type, elements)),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructValue> {
        match self {
            Value::Struct(v) => Some(v),
            _ => None,
        }
    }
}

/// A field inside a struct.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub id: i16,
    /// Type from the field header.
    pub field_type: CompactType,
    pub value: Value,
}

/// Fields of a struct in the order they were read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StructValue {
    pub fields: Vec<Field>,
}

impl StructValue {
    pub fn new(fields: Vec<Field>) -> Self {
        StructValue { fields }
    }

    /// Get the first field with the given id.
    ///
    /// Later fields with the same id are ignored.
    pub fn field(&self, id: i16) -> Option<&Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

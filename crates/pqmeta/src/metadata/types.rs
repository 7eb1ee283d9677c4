//! Enums from the parquet format definition.
//!
//! Values unknown to this crate are kept as `Unknown` so newer files still
//! decode.

use std::fmt;

use serde::Serialize;

macro_rules! thrift_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $($variant:ident = $value:literal => $display:literal,)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
        pub enum $name {
            $($variant,)*
            Unknown(i32),
        }

        impl From<i32> for $name {
            fn from(v: i32) -> Self {
                match v {
                    $($value => $name::$variant,)*
                    other => $name::Unknown(other),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $($name::$variant => write!(f, $display),)*
                    $name::Unknown(v) => write!(f, "UNKNOWN({v})"),
                }
            }
        }
    };
}

thrift_enum! {
    /// Physical storage type of a column.
    PhysicalType {
        Boolean = 0 => "BOOLEAN",
        Int32 = 1 => "INT32",
        Int64 = 2 => "INT64",
        Int96 = 3 => "INT96",
        Float = 4 => "FLOAT",
        Double = 5 => "DOUBLE",
        ByteArray = 6 => "BYTE_ARRAY",
        FixedLenByteArray = 7 => "FIXED_LEN_BYTE_ARRAY",
    }
}

thrift_enum! {
    Repetition {
        Required = 0 => "REQUIRED",
        Optional = 1 => "OPTIONAL",
        Repeated = 2 => "REPEATED",
    }
}

thrift_enum! {
    /// Legacy logical type annotation.
    ConvertedType {
        Utf8 = 0 => "UTF8",
        Map = 1 => "MAP",
        MapKeyValue = 2 => "MAP_KEY_VALUE",
        List = 3 => "LIST",
        Enum = 4 => "ENUM",
        Decimal = 5 => "DECIMAL",
        Date = 6 => "DATE",
        TimeMillis = 7 => "TIME_MILLIS",
        TimeMicros = 8 => "TIME_MICROS",
        TimestampMillis = 9 => "TIMESTAMP_MILLIS",
        TimestampMicros = 10 => "TIMESTAMP_MICROS",
        Uint8 = 11 => "UINT_8",
        Uint16 = 12 => "UINT_16",
        Uint32 = 13 => "UINT_32",
        Uint64 = 14 => "UINT_64",
        Int8 = 15 => "INT_8",
        Int16 = 16 => "INT_16",
        Int32 = 17 => "INT_32",
        Int64 = 18 => "INT_64",
        Json = 19 => "JSON",
        Bson = 20 => "BSON",
        Interval = 21 => "INTERVAL",
    }
}

thrift_enum! {
    /// Encodings used for pages in a column chunk.
    Encoding {
        Plain = 0 => "PLAIN",
        PlainDictionary = 2 => "PLAIN_DICTIONARY",
        Rle = 3 => "RLE",
        BitPacked = 4 => "BIT_PACKED",
        DeltaBinaryPacked = 5 => "DELTA_BINARY_PACKED",
        DeltaLengthByteArray = 6 => "DELTA_LENGTH_BYTE_ARRAY",
        DeltaByteArray = 7 => "DELTA_BYTE_ARRAY",
        RleDictionary = 8 => "RLE_DICTIONARY",
        ByteStreamSplit = 9 => "BYTE_STREAM_SPLIT",
    }
}

thrift_enum! {
    CompressionCodec {
        Uncompressed = 0 => "UNCOMPRESSED",
        Snappy = 1 => "SNAPPY",
        Gzip = 2 => "GZIP",
        Lzo = 3 => "LZO",
        Brotli = 4 => "BROTLI",
        Lz4 = 5 => "LZ4",
        Zstd = 6 => "ZSTD",
        Lz4Raw = 7 => "LZ4_RAW",
    }
}

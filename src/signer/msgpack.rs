//! Canonical msgpack encoding for L1 actions
//!
//! Only the subset the exchange hashes is supported: nil, bool, 64-bit
//! integers, float64, UTF-8 strings, arrays and string-keyed maps. Every
//! value is written with the shortest standard prefix, so structurally
//! equal values always produce identical bytes.

use crate::error::{HyperliquidError, Result};

/// A value that can be msgpack-encoded.
///
/// Maps are an ordered list of pairs: key order is part of the encoding and
/// therefore part of the action hash.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// `nil`
    Nil,
    /// `true` / `false`
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Unsigned integer
    UInt(u64),
    /// Float64 (written as an integer when it has no fractional part)
    Float(f64),
    /// UTF-8 string
    Str(String),
    /// Array
    Array(Vec<Value>),
    /// Map with insertion-ordered keys
    Map(Vec<(String, Value)>),
}

impl Value {
    /// Start an empty ordered map
    pub fn map() -> MapBuilder {
        MapBuilder::default()
    }
}

/// Builder that keeps map keys in the order they are inserted
#[derive(Debug, Default)]
pub struct MapBuilder {
    entries: Vec<(String, Value)>,
}

impl MapBuilder {
    /// Append a key/value pair
    pub fn insert(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Append a pair only when the value is present
    pub fn insert_opt<V: Into<Value>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(v) => self.insert(key, v),
            None => self,
        }
    }

    /// Finish the map
    pub fn build(self) -> Value {
        Value::Map(self.entries)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::UInt(v as u64)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::UInt(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl TryFrom<&serde_json::Value> for Value {
    type Error = HyperliquidError;

    /// Object keys keep the order of the source document (serde_json is built
    /// with `preserve_order`).
    fn try_from(value: &serde_json::Value) -> Result<Self> {
        Ok(match value {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    Value::UInt(u)
                } else if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else if let Some(f) = n.as_f64() {
                    Value::Float(f)
                } else {
                    return Err(HyperliquidError::encoding(format!(
                        "number {} is outside the 64-bit range",
                        n
                    )));
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => Value::Array(
                items
                    .iter()
                    .map(Value::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            serde_json::Value::Object(obj) => Value::Map(
                obj.iter()
                    .map(|(k, v)| Ok((k.clone(), Value::try_from(v)?)))
                    .collect::<Result<Vec<_>>>()?,
            ),
        })
    }
}

/// Encode a value to msgpack bytes
pub fn encode(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(64);
    write_value(&mut buf, value)?;
    Ok(buf)
}

fn write_value(buf: &mut Vec<u8>, value: &Value) -> Result<()> {
    match value {
        Value::Nil => buf.push(0xc0),
        Value::Bool(false) => buf.push(0xc2),
        Value::Bool(true) => buf.push(0xc3),
        Value::UInt(u) => write_uint(buf, *u),
        Value::Int(i) => write_int(buf, *i),
        Value::Float(f) => write_float(buf, *f)?,
        Value::Str(s) => write_str(buf, s)?,
        Value::Array(items) => {
            write_len(buf, items.len(), [0x90, 0xdc, 0xdd], 16, "array")?;
            for item in items {
                write_value(buf, item)?;
            }
        }
        Value::Map(entries) => {
            write_len(buf, entries.len(), [0x80, 0xde, 0xdf], 16, "map")?;
            for (key, item) in entries {
                write_str(buf, key)?;
                write_value(buf, item)?;
            }
        }
    }
    Ok(())
}

fn write_uint(buf: &mut Vec<u8>, v: u64) {
    if v < 0x80 {
        buf.push(v as u8);
    } else if v <= u8::MAX as u64 {
        buf.extend_from_slice(&[0xcc, v as u8]);
    } else if v <= u16::MAX as u64 {
        buf.push(0xcd);
        buf.extend_from_slice(&(v as u16).to_be_bytes());
    } else if v <= u32::MAX as u64 {
        buf.push(0xce);
        buf.extend_from_slice(&(v as u32).to_be_bytes());
    } else {
        buf.push(0xcf);
        buf.extend_from_slice(&v.to_be_bytes());
    }
}

fn write_int(buf: &mut Vec<u8>, v: i64) {
    if v >= 0 {
        return write_uint(buf, v as u64);
    }
    if v >= -32 {
        buf.push(v as i8 as u8);
    } else if v >= i8::MIN as i64 {
        buf.extend_from_slice(&[0xd0, v as i8 as u8]);
    } else if v >= i16::MIN as i64 {
        buf.push(0xd1);
        buf.extend_from_slice(&(v as i16).to_be_bytes());
    } else if v >= i32::MIN as i64 {
        buf.push(0xd2);
        buf.extend_from_slice(&(v as i32).to_be_bytes());
    } else {
        buf.push(0xd3);
        buf.extend_from_slice(&v.to_be_bytes());
    }
}

fn write_float(buf: &mut Vec<u8>, v: f64) -> Result<()> {
    if !v.is_finite() {
        return Err(HyperliquidError::encoding(format!(
            "non-finite float {} cannot be encoded",
            v
        )));
    }
    // Integer-valued floats go through the integer family.
    if v.fract() == 0.0 {
        if v >= 0.0 && v < 18_446_744_073_709_551_616.0 {
            write_uint(buf, v as u64);
            return Ok(());
        }
        if v < 0.0 && v >= -9_223_372_036_854_775_808.0 {
            write_int(buf, v as i64);
            return Ok(());
        }
    }
    buf.push(0xcb);
    buf.extend_from_slice(&v.to_be_bytes());
    Ok(())
}

fn write_str(buf: &mut Vec<u8>, s: &str) -> Result<()> {
    let bytes = s.as_bytes();
    let len = bytes.len();
    if len < 32 {
        buf.push(0xa0 | len as u8);
    } else if len <= u8::MAX as usize {
        buf.extend_from_slice(&[0xd9, len as u8]);
    } else if len <= u16::MAX as usize {
        buf.push(0xda);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else if len <= u32::MAX as usize {
        buf.push(0xdb);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    } else {
        return Err(HyperliquidError::encoding(format!(
            "string of {} bytes exceeds str32",
            len
        )));
    }
    buf.extend_from_slice(bytes);
    Ok(())
}

/// Container header: fix form below `fix_limit`, then 16-bit, then 32-bit length
fn write_len(
    buf: &mut Vec<u8>,
    len: usize,
    [fix, tag16, tag32]: [u8; 3],
    fix_limit: usize,
    kind: &str,
) -> Result<()> {
    if len < fix_limit {
        buf.push(fix | len as u8);
    } else if len <= u16::MAX as usize {
        buf.push(tag16);
        buf.extend_from_slice(&(len as u16).to_be_bytes());
    } else if len <= u32::MAX as usize {
        buf.push(tag32);
        buf.extend_from_slice(&(len as u32).to_be_bytes());
    } else {
        return Err(HyperliquidError::encoding(format!(
            "{} of {} elements exceeds 32-bit length",
            kind, len
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(v: impl Into<Value>) -> Vec<u8> {
        encode(&v.into()).unwrap()
    }

    #[test]
    fn test_known_vectors() {
        assert_eq!(enc(0u64), vec![0x00]);
        assert_eq!(enc(-1i64), vec![0xff]);
        assert_eq!(enc("a"), vec![0xa1, 0x61]);
        assert_eq!(enc(true), vec![0xc3]);
        assert_eq!(enc(false), vec![0xc2]);
        assert_eq!(encode(&Value::Nil).unwrap(), vec![0xc0]);
        assert_eq!(enc(Vec::<Value>::new()), vec![0x90]);
        assert_eq!(encode(&Value::map().build()).unwrap(), vec![0x80]);
    }

    #[test]
    fn test_integer_boundaries() {
        assert_eq!(enc(127u64), vec![0x7f]);
        assert_eq!(enc(128u64), vec![0xcc, 0x80]);
        assert_eq!(enc(255u64), vec![0xcc, 0xff]);
        assert_eq!(enc(256u64), vec![0xcd, 0x01, 0x00]);
        assert_eq!(enc(65_536u64), vec![0xce, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(
            enc(1_700_000_000_000u64),
            vec![0xcf, 0x00, 0x00, 0x01, 0x8b, 0xcf, 0xe5, 0x68, 0x00]
        );
        assert_eq!(enc(-32i64), vec![0xe0]);
        assert_eq!(enc(-33i64), vec![0xd0, 0xdf]);
        assert_eq!(enc(-128i64), vec![0xd0, 0x80]);
        assert_eq!(enc(-129i64), vec![0xd1, 0xff, 0x7f]);
        assert_eq!(enc(-32_769i64), vec![0xd2, 0xff, 0xff, 0x7f, 0xff]);
        assert_eq!(enc(i64::MIN)[0], 0xd3);
        // Non-negative signed values use the unsigned family
        assert_eq!(enc(200i64), vec![0xcc, 0xc8]);
    }

    #[test]
    fn test_float_encoding() {
        assert_eq!(enc(1.5f64), vec![0xcb, 0x3f, 0xf8, 0, 0, 0, 0, 0, 0]);
        // Integer-valued floats never use the float tag
        assert_eq!(enc(30_000.0f64), vec![0xcd, 0x75, 0x30]);
        assert_eq!(enc(-1.0f64), vec![0xff]);
        assert!(matches!(
            encode(&Value::Float(f64::NAN)),
            Err(HyperliquidError::Encoding(_))
        ));
        assert!(matches!(
            encode(&Value::Float(f64::INFINITY)),
            Err(HyperliquidError::Encoding(_))
        ));
    }

    #[test]
    fn test_string_and_container_headers() {
        let s31 = "x".repeat(31);
        let s32 = "x".repeat(32);
        let s256 = "x".repeat(256);
        assert_eq!(enc(s31.as_str())[0], 0xbf);
        assert_eq!(&enc(s32.as_str())[..2], &[0xd9, 32]);
        assert_eq!(&enc(s256.as_str())[..3], &[0xda, 0x01, 0x00]);
        // UTF-8 byte length, not char count
        assert_eq!(enc("é"), vec![0xa2, 0xc3, 0xa9]);

        let arr16: Vec<Value> = (0..16u64).map(Value::from).collect();
        assert_eq!(&enc(arr16)[..3], &[0xdc, 0x00, 0x10]);

        let mut map = Value::map();
        for i in 0..16 {
            map = map.insert(format!("k{}", i), i as u64);
        }
        assert_eq!(&encode(&map.build()).unwrap()[..3], &[0xde, 0x00, 0x10]);
    }

    #[test]
    fn test_map_preserves_insertion_order() {
        let ab = Value::map().insert("a", 1u64).insert("b", 2u64).build();
        let ba = Value::map().insert("b", 2u64).insert("a", 1u64).build();
        assert_eq!(
            encode(&ab).unwrap(),
            vec![0x82, 0xa1, 0x61, 0x01, 0xa1, 0x62, 0x02]
        );
        assert_ne!(encode(&ab).unwrap(), encode(&ba).unwrap());
    }

    #[test]
    fn test_insert_opt_skips_absent_values() {
        let v = Value::map()
            .insert("a", 1u64)
            .insert_opt("c", None::<String>)
            .build();
        assert_eq!(encode(&v).unwrap(), vec![0x81, 0xa1, 0x61, 0x01]);
    }

    #[test]
    fn test_json_conversion_keeps_key_order() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"type":"cancel","cancels":[{"a":3,"o":91490942}]}"#).unwrap();
        let value = Value::try_from(&json).unwrap();
        assert_eq!(
            hex::encode(encode(&value).unwrap()),
            "82a474797065a663616e63656ca763616e63656c739182a16103a16fce05740a7e"
        );
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let build = || {
            Value::map()
                .insert("type", "order")
                .insert("orders", vec![Value::map().insert("a", 0u64).build()])
                .build()
        };
        assert_eq!(encode(&build()).unwrap(), encode(&build()).unwrap());
    }
}

use super::error::BencodeError;
use super::value::Value;
use std::io::Write;

/// Encodes a bencode value to a byte vector.
///
/// Dictionaries come out with their keys sorted, since [`Value::Dict`] keeps
/// them ordered.
///
/// # Examples
///
/// ```
/// use rbencode::bencode::{encode, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// assert_eq!(encode(&Value::Integer(-42)).unwrap(), b"i-42e");
/// assert_eq!(encode(&Value::string("")).unwrap(), b"0:");
/// assert_eq!(encode(&Value::List(vec![])).unwrap(), b"le");
///
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:ai1e1:bi2ee");
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Encodes a bencode value into `writer`.
pub fn encode_to<W: Write + ?Sized>(value: &Value, writer: &mut W) -> Result<(), BencodeError> {
    match value {
        Value::Integer(i) => write_integer(writer, *i),
        Value::Bytes(b) => write_bytes(writer, b),
        Value::List(l) => {
            write_list_start(writer)?;
            for item in l {
                encode_to(item, writer)?;
            }
            write_end(writer)
        }
        Value::Dict(d) => {
            write_dict_start(writer)?;
            for (key, val) in d {
                write_bytes(writer, key)?;
                encode_to(val, writer)?;
            }
            write_end(writer)
        }
    }
}

/// Writes `<length>:<bytes>`.
pub fn write_bytes<W: Write + ?Sized>(writer: &mut W, bytes: &[u8]) -> Result<(), BencodeError> {
    write!(writer, "{}:", bytes.len())?;
    writer.write_all(bytes)?;
    Ok(())
}

pub fn write_integer<W: Write + ?Sized>(writer: &mut W, value: i64) -> Result<(), BencodeError> {
    write!(writer, "i{}e", value)?;
    Ok(())
}

pub fn write_unsigned<W: Write + ?Sized>(writer: &mut W, value: u64) -> Result<(), BencodeError> {
    write!(writer, "i{}e", value)?;
    Ok(())
}

pub fn write_list_start<W: Write + ?Sized>(writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"l")?;
    Ok(())
}

pub fn write_dict_start<W: Write + ?Sized>(writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"d")?;
    Ok(())
}

/// Closes the innermost list or dictionary.
pub fn write_end<W: Write + ?Sized>(writer: &mut W) -> Result<(), BencodeError> {
    writer.write_all(b"e")?;
    Ok(())
}

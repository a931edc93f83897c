use super::tag::FieldDescriptor;
use crate::bencode::{
    encode_to, write_bytes, write_dict_start, write_end, write_integer, write_list_start,
    write_unsigned, BencodeError, Value,
};
use bytes::Bytes;
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::io::Write;

/// The bencode shape a typed value encodes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    ByteString,
    Integer,
    List,
    Dict,
    /// An absent value (`None`). It encodes to nothing at all.
    Null,
}

/// A type that can be written as bencode.
///
/// Implemented for strings, [`Bytes`], every fixed-width integer, sequences,
/// maps, [`Option`], [`Value`], and for structs declared with
/// [`bencode_struct!`](crate::bencode_struct). Anything else (floats, `bool`,
/// `char`) has no bencode form and is rejected at compile time.
///
/// Absent values are elided rather than encoded: a `None` element of a list
/// contributes nothing, and a `None` struct field or map value is dropped
/// together with its key.
pub trait Encode {
    fn shape(&self) -> Shape;

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError>;

    /// Whether this is the empty value of its shape (`""`, `0`, an empty
    /// container, `None`). Consulted for fields annotated `omitempty`.
    fn is_empty_value(&self) -> bool {
        false
    }
}

/// Encodes a typed value to a byte vector.
///
/// # Errors
///
/// Returns [`BencodeError::DictionaryKeyType`] if a map key is not a byte
/// string, and [`BencodeError::UnsupportedType`] if `value` itself is absent.
///
/// # Examples
///
/// ```
/// use rbencode::marshal::to_bytes;
/// use std::collections::BTreeMap;
///
/// assert_eq!(to_bytes(&-42i32).unwrap(), b"i-42e");
/// assert_eq!(to_bytes(&vec![Some(1u8), None, Some(3)]).unwrap(), b"li1ei3ee");
///
/// let mut map = BTreeMap::new();
/// map.insert("spam", "eggs");
/// assert_eq!(to_bytes(&map).unwrap(), b"d4:spam4:eggse");
/// ```
pub fn to_bytes<T: Encode + ?Sized>(value: &T) -> Result<Vec<u8>, BencodeError> {
    let mut buf = Vec::new();
    to_writer(&mut buf, value)?;
    Ok(buf)
}

/// Encodes a typed value into `writer`.
pub fn to_writer<W: Write, T: Encode + ?Sized>(
    mut writer: W,
    value: &T,
) -> Result<(), BencodeError> {
    if value.shape() == Shape::Null {
        return Err(BencodeError::UnsupportedType("absent value"));
    }
    value.encode_to(&mut writer)
}

/// Writes the fields of an aggregate as a dictionary, in the order they are
/// given.
///
/// This is what [`bencode_struct!`](crate::bencode_struct) expands to; it can
/// also back a hand-written [`Encode`] impl.
pub struct StructEncoder<'a, W: ?Sized> {
    writer: &'a mut W,
}

impl<'a, W: Write + ?Sized> StructEncoder<'a, W> {
    pub fn begin(writer: &'a mut W) -> Result<Self, BencodeError> {
        write_dict_start(&mut *writer)?;
        Ok(Self { writer })
    }

    pub fn field<T: Encode + ?Sized>(
        &mut self,
        field: &FieldDescriptor,
        value: &T,
    ) -> Result<(), BencodeError> {
        if field.ignore || !field.exposed {
            tracing::trace!("skipping field {}", field.declared);
            return Ok(());
        }

        if value.shape() == Shape::Null || (field.omit_empty && value.is_empty_value()) {
            tracing::trace!("omitting empty field {}", field.declared);
            return Ok(());
        }

        write_bytes(&mut *self.writer, field.name.as_bytes())?;
        value
            .encode_to(&mut *self.writer)
            .map_err(|e| e.in_field(field.declared))
    }

    pub fn end(self) -> Result<(), BencodeError> {
        write_end(&mut *self.writer)
    }
}

fn encode_entries<'a, K, V, W, I>(writer: &mut W, entries: I) -> Result<(), BencodeError>
where
    K: Encode + 'a,
    V: Encode + 'a,
    W: Write + ?Sized,
    I: Iterator<Item = (&'a K, &'a V)>,
{
    write_dict_start(writer)?;
    for (key, value) in entries {
        if key.shape() != Shape::ByteString {
            return Err(BencodeError::DictionaryKeyType);
        }
        if value.shape() == Shape::Null {
            continue;
        }
        key.encode_to(writer)?;
        value.encode_to(writer)?;
    }
    write_end(writer)
}

fn encode_items<'a, T, W, I>(writer: &mut W, items: I) -> Result<(), BencodeError>
where
    T: Encode + 'a,
    W: Write + ?Sized,
    I: Iterator<Item = &'a T>,
{
    write_list_start(writer)?;
    for item in items {
        item.encode_to(writer)?;
    }
    write_end(writer)
}

impl Encode for str {
    fn shape(&self) -> Shape {
        Shape::ByteString
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        write_bytes(writer, self.as_bytes())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for String {
    fn shape(&self) -> Shape {
        Shape::ByteString
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        write_bytes(writer, self.as_bytes())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for Bytes {
    fn shape(&self) -> Shape {
        Shape::ByteString
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        write_bytes(writer, self)
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

macro_rules! impl_encode_int {
    ($write:ident as $wide:ty => $($t:ty),*) => {
        $(
            impl Encode for $t {
                fn shape(&self) -> Shape {
                    Shape::Integer
                }

                fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
                    $write(writer, *self as $wide)
                }

                fn is_empty_value(&self) -> bool {
                    *self == 0
                }
            }
        )*
    };
}

impl_encode_int!(write_integer as i64 => i8, i16, i32, i64, isize);
impl_encode_int!(write_unsigned as u64 => u8, u16, u32, u64, usize);

impl<T: Encode> Encode for Option<T> {
    fn shape(&self) -> Shape {
        match self {
            Some(value) => value.shape(),
            None => Shape::Null,
        }
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        match self {
            Some(value) => value.encode_to(writer),
            None => Ok(()),
        }
    }

    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        (**self).encode_to(writer)
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn shape(&self) -> Shape {
        (**self).shape()
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        (**self).encode_to(writer)
    }

    fn is_empty_value(&self) -> bool {
        (**self).is_empty_value()
    }
}

impl<T: Encode> Encode for [T] {
    fn shape(&self) -> Shape {
        Shape::List
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        encode_items(writer, self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn shape(&self) -> Shape {
        Shape::List
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        encode_items(writer, self.iter())
    }

    fn is_empty_value(&self) -> bool {
        N == 0
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn shape(&self) -> Shape {
        Shape::List
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        encode_items(writer, self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn shape(&self) -> Shape {
        Shape::Dict
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        encode_entries(writer, self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

// Entries are written in the map's own iteration order; keys are not sorted.
impl<K: Encode, V: Encode, S: BuildHasher> Encode for HashMap<K, V, S> {
    fn shape(&self) -> Shape {
        Shape::Dict
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        encode_entries(writer, self.iter())
    }

    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl Encode for Value {
    fn shape(&self) -> Shape {
        match self {
            Value::Integer(_) => Shape::Integer,
            Value::Bytes(_) => Shape::ByteString,
            Value::List(_) => Shape::List,
            Value::Dict(_) => Shape::Dict,
        }
    }

    fn encode_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), BencodeError> {
        encode_to(self, writer)
    }

    fn is_empty_value(&self) -> bool {
        match self {
            Value::Integer(i) => *i == 0,
            Value::Bytes(b) => b.is_empty(),
            Value::List(l) => l.is_empty(),
            Value::Dict(d) => d.is_empty(),
        }
    }
}

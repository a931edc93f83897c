use super::tag::FieldDescriptor;
use crate::bencode::{decode_document, BencodeError, Value};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Read;

/// A type that can be populated in place from a decoded [`Value`].
///
/// The target shape must agree with the value's variant: byte strings go into
/// `String` or [`Bytes`], integers into any fixed-width integer (converted with
/// `as`, so out-of-range values wrap), lists into `Vec<T>` or `[T; N]`, and
/// dictionaries into structs declared with
/// [`bencode_struct!`](crate::bencode_struct). Any other pairing fails with
/// [`BencodeError::TypeMismatch`].
pub trait Unmarshal {
    fn unmarshal(&mut self, value: &Value) -> Result<(), BencodeError>;
}

/// Decodes a document and unmarshals it into `target`.
///
/// The document must be a dictionary, so `target` is normally a struct
/// declared with [`bencode_struct!`](crate::bencode_struct). Fields without a
/// matching key keep their current value; keys without a matching field are
/// ignored.
///
/// # Errors
///
/// Any decode error, or the first field that cannot be populated. The target
/// may be partially written when an error is returned.
///
/// # Examples
///
/// ```
/// use rbencode::bencode_struct;
/// use rbencode::marshal::unmarshal;
///
/// bencode_struct! {
///     #[derive(Debug, Default)]
///     pub struct Person {
///         pub name: String => "Name",
///         pub age: u32 => "Age",
///     }
/// }
///
/// let mut person = Person::default();
/// unmarshal(b"d4:Name1:x3:Agei5e5:Extrai0ee", &mut person).unwrap();
/// assert_eq!(person.name, "x");
/// assert_eq!(person.age, 5);
/// ```
pub fn unmarshal<T: Unmarshal + ?Sized>(data: &[u8], target: &mut T) -> Result<(), BencodeError> {
    unmarshal_from_reader(data, target)
}

/// Like [`unmarshal`], reading the document from a byte source.
pub fn unmarshal_from_reader<R: Read, T: Unmarshal + ?Sized>(
    reader: R,
    target: &mut T,
) -> Result<(), BencodeError> {
    let document = Value::Dict(decode_document(reader)?);
    unmarshal_value(&document, target)
}

/// Unmarshals an already decoded value into `target`.
pub fn unmarshal_value<T: Unmarshal + ?Sized>(
    value: &Value,
    target: &mut T,
) -> Result<(), BencodeError> {
    target
        .unmarshal(value)
        .inspect_err(|e| tracing::debug!("bencode unmarshal failed: {}", e))
}

/// Decodes a document into a freshly defaulted `T`.
pub fn from_bytes<T: Unmarshal + Default>(data: &[u8]) -> Result<T, BencodeError> {
    let mut target = T::default();
    unmarshal(data, &mut target)?;
    Ok(target)
}

fn mismatch(expected: &'static str, found: &Value) -> BencodeError {
    BencodeError::TypeMismatch {
        expected,
        found: found.type_name(),
    }
}

/// Returns the entries of `value`, which an aggregate target requires to be a
/// dictionary.
pub fn expect_dict(value: &Value) -> Result<&BTreeMap<Bytes, Value>, BencodeError> {
    value.as_dict().ok_or_else(|| mismatch("dict", value))
}

/// Populates one aggregate field from `dict`.
///
/// Ignored fields and fields whose key is absent are left untouched. A key
/// that resolves to a private field is an error, since the field is not part
/// of the struct's public contract.
pub fn unmarshal_field<T: Unmarshal + ?Sized>(
    dict: &BTreeMap<Bytes, Value>,
    field: &FieldDescriptor,
    target: &mut T,
) -> Result<(), BencodeError> {
    if field.ignore {
        return Ok(());
    }

    let Some(value) = dict.get(field.name.as_bytes()) else {
        return Ok(());
    };

    if !field.exposed {
        return Err(BencodeError::NonSettableTarget(field.declared));
    }

    target
        .unmarshal(value)
        .map_err(|e| e.in_field(field.declared))
}

impl Unmarshal for String {
    fn unmarshal(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Bytes(b) => {
                let s = std::str::from_utf8(b).map_err(|_| BencodeError::InvalidUtf8)?;
                self.clear();
                self.push_str(s);
                Ok(())
            }
            other => Err(mismatch("byte string", other)),
        }
    }
}

impl Unmarshal for Bytes {
    fn unmarshal(&mut self, value: &Value) -> Result<(), BencodeError> {
        match value {
            Value::Bytes(b) => {
                *self = b.clone();
                Ok(())
            }
            other => Err(mismatch("byte string", other)),
        }
    }
}

macro_rules! impl_unmarshal_int {
    ($($t:ty),*) => {
        $(
            impl Unmarshal for $t {
                fn unmarshal(&mut self, value: &Value) -> Result<(), BencodeError> {
                    match value {
                        Value::Integer(i) => {
                            *self = *i as $t;
                            Ok(())
                        }
                        other => Err(mismatch("integer", other)),
                    }
                }
            }
        )*
    };
}

impl_unmarshal_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Surplus items are dropped; surplus slots keep what they held.
impl<T: Unmarshal + Default, const N: usize> Unmarshal for [T; N] {
    fn unmarshal(&mut self, value: &Value) -> Result<(), BencodeError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        for (slot, item) in self.iter_mut().zip(items) {
            let mut element = T::default();
            element.unmarshal(item)?;
            *slot = element;
        }
        Ok(())
    }
}

// Items are appended after whatever the vector already holds.
impl<T: Unmarshal + Default> Unmarshal for Vec<T> {
    fn unmarshal(&mut self, value: &Value) -> Result<(), BencodeError> {
        let items = value.as_list().ok_or_else(|| mismatch("list", value))?;
        self.reserve(items.len());
        for item in items {
            let mut element = T::default();
            element.unmarshal(item)?;
            self.push(element);
        }
        Ok(())
    }
}

impl<T> Unmarshal for Option<T> {
    fn unmarshal(&mut self, _value: &Value) -> Result<(), BencodeError> {
        Err(BencodeError::UnsupportedType("optional target"))
    }
}

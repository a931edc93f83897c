//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses. This module works on the dynamic [`Value`] tree; see
//! [`crate::marshal`] for mapping to and from typed structs.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Examples
//!
//! ```
//! use rbencode::bencode::{decode, encode};
//!
//! let value = decode(b"d3:foo3:bar4:listli1ei2eee").unwrap();
//! assert_eq!(value.get(b"foo").and_then(|v| v.as_str()), Some("bar"));
//!
//! let encoded = encode(&value).unwrap();
//! assert_eq!(encoded, b"d3:foo3:bar4:listli1ei2eee");
//! ```
//!
//! Documents (a top-level dictionary) can be read from any [`std::io::Read`]
//! source with [`decode_document`]:
//!
//! ```
//! use rbencode::bencode::decode_document;
//!
//! let dict = decode_document(std::io::Cursor::new(b"d1:ai1ee")).unwrap();
//! assert_eq!(dict.len(), 1);
//! ```
//!
//! # Error Handling
//!
//! Decoding can fail for various reasons:
//!
//! - [`BencodeError::UnexpectedEof`] - Input ended unexpectedly
//! - [`BencodeError::InvalidInteger`] - Integer body is not a number
//! - [`BencodeError::InvalidStringLength`] - Byte string length is not a number
//! - [`BencodeError::UnexpectedChar`] - Unexpected character in input
//! - [`BencodeError::NonStringKey`] - Dictionary key is not a byte string
//! - [`BencodeError::NotADictionary`] - Document does not start with `d`
//! - [`BencodeError::NestingTooDeep`] - Recursion limit exceeded (64 levels by default)
//! - [`BencodeError::TrailingData`] - Extra data after the value
//!
//! [`BencodeError::kind`] groups these into coarse [`ErrorKind`]s.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{
    decode, decode_document, decode_document_with, decode_with, DecodeOptions, Decoder,
    DEFAULT_MAX_DEPTH,
};
pub use encode::{
    encode, encode_to, write_bytes, write_dict_start, write_end, write_integer, write_list_start,
    write_unsigned,
};
pub use error::{BencodeError, ErrorKind};
pub use value::Value;

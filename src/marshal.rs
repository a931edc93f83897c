//! Typed marshalling between Rust values and bencode.
//!
//! The [`bencode`](crate::bencode) module works on the dynamic
//! [`Value`](crate::bencode::Value) tree. This module maps that tree onto
//! statically typed data:
//!
//! - [`Encode`] writes a typed value (strings, integers of any width,
//!   sequences, maps, structs) straight to bencode.
//! - [`Unmarshal`] populates a typed target in place from a decoded value.
//! - [`bencode_struct!`](crate::bencode_struct) declares a struct together
//!   with its field annotations and derives both traits for it.
//!
//! # Field annotations
//!
//! Struct fields are matched to dictionary keys by name. An annotation can
//! rename the key, skip the field when empty, or ignore it entirely; see
//! [`FieldTag`] for the exact rules.
//!
//! # Examples
//!
//! ```
//! use rbencode::bencode_struct;
//! use rbencode::marshal::{from_bytes, to_bytes};
//!
//! bencode_struct! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct FileEntry {
//!         pub length: u64,
//!         pub path: Vec<String>,
//!         pub md5sum: String => "md5sum,omitempty",
//!     }
//! }
//!
//! bencode_struct! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Info {
//!         pub name: String,
//!         pub piece_length: u32 => "piece length",
//!         pub files: Vec<FileEntry>,
//!     }
//! }
//!
//! let info = Info {
//!     name: "album".into(),
//!     piece_length: 16384,
//!     files: vec![FileEntry {
//!         length: 3,
//!         path: vec!["cd1".into(), "01.flac".into()],
//!         ..Default::default()
//!     }],
//! };
//!
//! let encoded = to_bytes(&info).unwrap();
//! assert_eq!(
//!     encoded,
//!     b"d4:name5:album12:piece lengthi16384e5:filesld6:lengthi3e4:pathl3:cd17:01.flaceeee"
//! );
//! assert_eq!(from_bytes::<Info>(&encoded).unwrap(), info);
//! ```
//!
//! Struct fields are written in declaration order, so the output above is not
//! in sorted key order. Encode a [`Value`](crate::bencode::Value) or a
//! [`BTreeMap`](std::collections::BTreeMap) when canonical ordering matters.

mod encode;
mod macros;
mod tag;
mod unmarshal;

pub use encode::{to_bytes, to_writer, Encode, Shape, StructEncoder};
pub use tag::{FieldDescriptor, FieldTag, IGNORE, OMIT_EMPTY, SEPARATOR};
pub use unmarshal::{
    expect_dict, from_bytes, unmarshal, unmarshal_field, unmarshal_from_reader, unmarshal_value,
    Unmarshal,
};

/// A struct whose fields map to dictionary entries.
///
/// Implemented by [`bencode_struct!`](crate::bencode_struct).
pub trait Aggregate {
    /// Describes every declared field, in declaration order.
    fn fields() -> Vec<FieldDescriptor>;
}

#[cfg(test)]
mod tests;

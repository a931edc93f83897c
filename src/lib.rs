//! rbencode - A bencode codec with typed marshalling
//!
//! This library reads and writes the bencode format used by BitTorrent
//! ([BEP-3]) and maps it onto Rust types.
//!
//! # Modules
//!
//! - [`bencode`] - Decoding and encoding of the dynamic [`Value`] tree
//! - [`marshal`] - Typed encoding ([`Encode`]) and unmarshalling ([`Unmarshal`]),
//!   with per-field annotations via [`bencode_struct!`]
//!
//! # Examples
//!
//! ```
//! use rbencode::{bencode_struct, from_bytes, to_bytes};
//!
//! bencode_struct! {
//!     #[derive(Debug, Default, PartialEq)]
//!     pub struct Peer {
//!         pub ip: String,
//!         pub port: u16,
//!         pub peer_id: String => "peer id,omitempty",
//!     }
//! }
//!
//! let peer = Peer { ip: "10.0.0.1".into(), port: 6881, ..Default::default() };
//! let encoded = to_bytes(&peer).unwrap();
//! assert_eq!(encoded, b"d2:ip8:10.0.0.14:porti6881ee");
//! assert_eq!(from_bytes::<Peer>(&encoded).unwrap(), peer);
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

pub mod bencode;
pub mod marshal;

pub use bencode::{decode, decode_document, encode, BencodeError, DecodeOptions, ErrorKind, Value};
pub use marshal::{from_bytes, to_bytes, unmarshal, Encode, FieldTag, Unmarshal};

use std::collections::{BTreeMap, HashMap};

use bytes::Bytes;

use super::*;
use crate::bencode::{decode, BencodeError, ErrorKind, Value};
use crate::bencode_struct;

bencode_struct! {
    #[allow(non_snake_case)]
    #[derive(Debug, Default, PartialEq)]
    pub struct Person {
        pub Name: String,
        pub Age: i32,
    }
}

bencode_struct! {
    #[derive(Debug, Default, PartialEq)]
    pub struct Torrent {
        /// Primary tracker.
        pub announce: String,
        pub created_by: String => "created by,omitempty",
        pub comment: String => ",omitempty",
        pub title: String => "omitempty",
        pub private: Option<u8>,
        pub cached_len: u64 => "-",
        secret: String,
    }
}

bencode_struct! {
    #[derive(Debug, Default, PartialEq)]
    pub struct Window {
        pub pair: [i64; 2],
        pub quad: [u8; 4],
    }
}

bencode_struct! {
    #[derive(Debug, Default, PartialEq)]
    pub struct Tier {
        pub urls: Vec<String>,
        pub weight: u8,
    }
}

bencode_struct! {
    #[derive(Debug, Default, PartialEq)]
    pub struct Tracker {
        pub tiers: Vec<Tier> => "announce-list",
        pub pieces: Bytes,
    }
}

bencode_struct! {
    #[derive(Debug, Default)]
    pub struct Empty {}
}

bencode_struct! {
    #[derive(Debug, Default)]
    pub struct Stats {
        pub count: u32 => ",omitempty",
        pub ids: Vec<u8> => ",omitempty",
        pub flag: Option<u8> => ",omitempty",
        pub keep: Vec<u8>,
    }
}

#[test]
fn test_tag_without_annotation() {
    let tag = FieldTag::parse("length", None);
    assert_eq!(tag.name, "length");
    assert!(!tag.omit_empty);
    assert!(!tag.ignore);

    assert_eq!(FieldTag::parse("length", Some("")), tag);
}

#[test]
fn test_tag_ignore() {
    let tag = FieldTag::parse("cache", Some(IGNORE));
    assert!(tag.ignore);
}

#[test]
fn test_tag_rename() {
    let tag = FieldTag::parse("piece_length", Some("piece length"));
    assert_eq!(tag.name, "piece length");
    assert!(!tag.omit_empty);
}

#[test]
fn test_tag_with_separator() {
    let tag = FieldTag::parse("created_by", Some("created by,omitempty"));
    assert_eq!(tag.name, "created by");
    assert!(tag.omit_empty);

    let tag = FieldTag::parse("comment", Some(",omitempty"));
    assert_eq!(tag.name, "comment");
    assert!(tag.omit_empty);

    let tag = FieldTag::parse("comment", Some("note,"));
    assert_eq!(tag.name, "note");
    assert!(!tag.omit_empty);

    let tag = FieldTag::parse("comment", Some("note,omitempty,extra"));
    assert_eq!(tag.name, "note");
    assert!(!tag.omit_empty);
}

#[test]
fn test_tag_bare_omitempty_keeps_name_only() {
    let tag = FieldTag::parse("title", Some(OMIT_EMPTY));
    assert_eq!(tag.name, "title");
    assert!(!tag.omit_empty);
    assert!(!tag.ignore);
}

#[test]
fn test_tag_is_pure() {
    for annotation in [None, Some("-"), Some("x,omitempty"), Some("omitempty"), Some("y")] {
        assert_eq!(
            FieldTag::parse("field", annotation),
            FieldTag::parse("field", annotation)
        );
    }
}

#[test]
fn test_field_descriptors() {
    let fields = Torrent::fields();
    let names: Vec<_> = fields.iter().map(|f| f.name).collect();
    assert_eq!(
        names,
        [
            "announce",
            "created by",
            "comment",
            "title",
            "private",
            "cached_len",
            "secret"
        ]
    );

    assert!(fields[1].omit_empty);
    assert!(!fields[3].omit_empty);
    assert!(fields[5].ignore);
    assert!(fields[0].exposed);
    assert!(!fields[6].exposed);
    assert_eq!(fields[6].declared, "secret");
}

#[test]
fn test_encode_primitives() {
    assert_eq!(to_bytes("spam").unwrap(), b"4:spam");
    assert_eq!(to_bytes(&String::new()).unwrap(), b"0:");
    assert_eq!(to_bytes(&Bytes::from_static(b"\x01\x02")).unwrap(), b"2:\x01\x02");
    assert_eq!(to_bytes(&-42i64).unwrap(), b"i-42e");
    assert_eq!(to_bytes(&-1i8).unwrap(), b"i-1e");
    assert_eq!(to_bytes(&255u8).unwrap(), b"i255e");
    assert_eq!(to_bytes(&u64::MAX).unwrap(), b"i18446744073709551615e");
}

#[test]
fn test_encode_sequences() {
    assert_eq!(to_bytes(&Vec::<i32>::new()).unwrap(), b"le");
    assert_eq!(to_bytes(&[1u16, 2, 3]).unwrap(), b"li1ei2ei3ee");
    assert_eq!(to_bytes(&vec!["a", "bc"]).unwrap(), b"l1:a2:bce");
    assert_eq!(to_bytes(&vec![vec![1u8], vec![]]).unwrap(), b"lli1eelee");
}

#[test]
fn test_encode_elides_null_elements() {
    let list = vec![Some(1i32), None, Some(3)];
    assert_eq!(to_bytes(&list).unwrap(), b"li1ei3ee");
    assert_eq!(to_bytes(&vec![None::<i32>]).unwrap(), b"le");
}

#[test]
fn test_encode_maps() {
    assert_eq!(to_bytes(&BTreeMap::<String, i32>::new()).unwrap(), b"de");

    let mut map = BTreeMap::new();
    map.insert("b".to_string(), 2i32);
    map.insert("a".to_string(), 1);
    assert_eq!(to_bytes(&map).unwrap(), b"d1:ai1e1:bi2ee");

    let mut map = HashMap::new();
    map.insert("only", vec!["x"]);
    assert_eq!(to_bytes(&map).unwrap(), b"d4:onlyl1:xee");

    let mut map = BTreeMap::new();
    map.insert("gone", None);
    map.insert("kept", Some(1u8));
    assert_eq!(to_bytes(&map).unwrap(), b"d4:kepti1ee");
}

#[test]
fn test_encode_map_key_must_be_bytes() {
    let mut map = BTreeMap::new();
    map.insert(1i32, "one");
    let err = to_bytes(&map).unwrap_err();
    assert!(matches!(err, BencodeError::DictionaryKeyType));
    assert_eq!(err.kind(), ErrorKind::DictionaryKeyType);
}

#[test]
fn test_encode_top_level_null() {
    let err = to_bytes(&None::<i32>).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);
}

#[test]
fn test_encode_struct_in_declaration_order() {
    let person = Person {
        Name: "x".into(),
        Age: 5,
    };
    assert_eq!(to_bytes(&person).unwrap(), b"d4:Name1:x3:Agei5ee");
}

#[test]
fn test_encode_struct_skips() {
    let torrent = Torrent {
        announce: "http://t".into(),
        created_by: String::new(),
        comment: String::new(),
        title: String::new(),
        private: None,
        cached_len: 99,
        secret: "hidden".into(),
    };
    // Empty `title` is still written: a bare "omitempty" does not set the option.
    assert_eq!(
        to_bytes(&torrent).unwrap(),
        b"d8:announce8:http://t5:title0:e"
    );

    let torrent = Torrent {
        created_by: "rbencode".into(),
        comment: "hi".into(),
        private: Some(1),
        ..torrent
    };
    assert_eq!(
        to_bytes(&torrent).unwrap(),
        b"d8:announce8:http://t10:created by8:rbencode7:comment2:hi5:title0:7:privatei1ee"
    );
}

#[test]
fn test_encode_omit_empty_values() {
    assert_eq!(to_bytes(&Stats::default()).unwrap(), b"d4:keeplee");

    let stats = Stats {
        count: 1,
        ids: vec![2],
        flag: Some(0),
        keep: Vec::new(),
    };
    assert_eq!(
        to_bytes(&stats).unwrap(),
        b"d5:counti1e3:idsli2ee4:flagi0e4:keeplee"
    );
}

#[test]
fn test_encode_omit_empty_containers() {
    let omit = |name: &'static str| FieldDescriptor::describe(name, Some(",omitempty"), true);

    let mut out = Vec::new();
    let mut fields = StructEncoder::begin(&mut out).unwrap();
    fields.field(&omit("map"), &BTreeMap::<String, i64>::new()).unwrap();
    fields.field(&omit("hash"), &HashMap::<String, i64>::new()).unwrap();
    fields.field(&omit("slice"), &[0u8; 0][..]).unwrap();
    fields.field(&omit("array"), &[0u8; 0]).unwrap();
    fields.field(&omit("zero"), &Value::Integer(0)).unwrap();
    fields.field(&omit("blank"), &Value::Bytes(Bytes::new())).unwrap();
    fields.field(&omit("list"), &Value::List(vec![])).unwrap();
    fields.field(&omit("pair"), &[7u8, 8]).unwrap();
    fields.end().unwrap();

    assert_eq!(out, b"d4:pairli7ei8eee");
}

#[test]
fn test_encode_empty_struct() {
    assert_eq!(to_bytes(&Empty {}).unwrap(), b"de");
}

#[test]
fn test_encode_value() {
    let value = decode(b"d1:bli1ee1:a0:e").unwrap();
    assert_eq!(to_bytes(&value).unwrap(), b"d1:a0:1:bli1eee");
}

#[test]
fn test_unmarshal_struct() {
    let mut person = Person::default();
    unmarshal(b"d4:Name1:x3:Agei5ee", &mut person).unwrap();
    assert_eq!(
        person,
        Person {
            Name: "x".into(),
            Age: 5
        }
    );
}

#[test]
fn test_unmarshal_ignores_unknown_keys() {
    let person: Person = from_bytes(b"d4:Name1:x7:Unknownl1:ye3:Agei5ee").unwrap();
    assert_eq!(person.Name, "x");
    assert_eq!(person.Age, 5);
}

#[test]
fn test_unmarshal_missing_key_keeps_value() {
    let mut person = Person {
        Name: "before".into(),
        Age: 7,
    };
    unmarshal(b"d3:Agei8ee", &mut person).unwrap();
    assert_eq!(person.Name, "before");
    assert_eq!(person.Age, 8);
}

#[test]
fn test_unmarshal_renamed_and_ignored_fields() {
    let mut torrent = Torrent {
        cached_len: 3,
        ..Default::default()
    };
    unmarshal(
        b"d8:announce1:a10:created by1:b10:cached_leni9e7:comment1:c5:title1:de",
        &mut torrent,
    )
    .unwrap();

    assert_eq!(torrent.announce, "a");
    assert_eq!(torrent.created_by, "b");
    assert_eq!(torrent.comment, "c");
    assert_eq!(torrent.title, "d");
    assert_eq!(torrent.cached_len, 3);
}

#[test]
fn test_unmarshal_private_field() {
    let mut torrent = Torrent::default();
    let err = unmarshal(b"d6:secret1:xe", &mut torrent).unwrap_err();
    assert!(matches!(err, BencodeError::NonSettableTarget("secret")));
    assert_eq!(err.kind(), ErrorKind::NonSettableTarget);
}

#[test]
fn test_unmarshal_optional_target() {
    let mut torrent = Torrent::default();
    let err = unmarshal(b"d7:privatei1ee", &mut torrent).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedType);

    assert!(unmarshal(b"d8:announce1:ae", &mut torrent).is_ok());
}

#[test]
fn test_unmarshal_type_mismatch() {
    let mut person = Person::default();
    let err = unmarshal(b"d3:Age4:fivee", &mut person).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetTypeMismatch);
    match err {
        BencodeError::Field { name, source } => {
            assert_eq!(name, "Age");
            assert!(matches!(
                *source,
                BencodeError::TypeMismatch {
                    expected: "integer",
                    found: "byte string"
                }
            ));
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = unmarshal(b"d4:Nameli1eee", &mut person).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetTypeMismatch);
}

#[test]
fn test_unmarshal_invalid_utf8() {
    let mut person = Person::default();
    let err = unmarshal(b"d4:Name2:\xff\xfee", &mut person).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetTypeMismatch);

    let mut pieces = Bytes::new();
    unmarshal_value(&Value::Bytes(Bytes::from_static(b"\xff\xfe")), &mut pieces).unwrap();
    assert_eq!(pieces.as_ref(), b"\xff\xfe");
}

#[test]
fn test_unmarshal_integer_narrowing() {
    let mut small = 0u8;
    unmarshal_value(&Value::Integer(300), &mut small).unwrap();
    assert_eq!(small, 44);

    let mut unsigned = 0u32;
    unmarshal_value(&Value::Integer(-1), &mut unsigned).unwrap();
    assert_eq!(unsigned, u32::MAX);

    let mut wide = 0i64;
    unmarshal_value(&Value::Integer(i64::MIN), &mut wide).unwrap();
    assert_eq!(wide, i64::MIN);
}

#[test]
fn test_unmarshal_fixed_array_truncates() {
    let mut window = Window::default();
    unmarshal(b"d4:pairli1ei2ei3ei4ei5eee", &mut window).unwrap();
    assert_eq!(window.pair, [1, 2]);
}

#[test]
fn test_unmarshal_fixed_array_keeps_extra_slots() {
    let mut window = Window {
        pair: [0, 0],
        quad: [9, 9, 9, 9],
    };
    unmarshal(b"d4:quadli1ei2eee", &mut window).unwrap();
    assert_eq!(window.quad, [1, 2, 9, 9]);
}

#[test]
fn test_unmarshal_nested() {
    let data = b"d13:announce-listld4:urlsl5:udp:a5:udp:be6:weighti1eed4:urlsleee6:pieces3:\x00\x01\x02e";
    let tracker: Tracker = from_bytes(data).unwrap();

    assert_eq!(tracker.tiers.len(), 2);
    assert_eq!(tracker.tiers[0].urls, ["udp:a", "udp:b"]);
    assert_eq!(tracker.tiers[0].weight, 1);
    assert!(tracker.tiers[1].urls.is_empty());
    assert_eq!(tracker.pieces.as_ref(), b"\x00\x01\x02");
}

#[test]
fn test_unmarshal_vec_appends() {
    let mut urls = vec!["first".to_string()];
    unmarshal_value(&decode(b"l6:second5:thirde").unwrap(), &mut urls).unwrap();
    assert_eq!(urls, ["first", "second", "third"]);
}

#[test]
fn test_unmarshal_requires_document_dict() {
    let mut person = Person::default();
    let err = unmarshal(b"l4:Namee", &mut person).unwrap_err();
    assert!(matches!(err, BencodeError::NotADictionary('l')));

    let err = unmarshal_value(&Value::Integer(1), &mut person).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::TargetTypeMismatch);
}

#[test]
fn test_unmarshal_malformed_input() {
    let mut person = Person::default();
    let err = unmarshal(b"d3:Agei12", &mut person).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedEncoding);
}

#[test]
fn test_unmarshal_from_reader() {
    let mut person = Person::default();
    unmarshal_from_reader(std::io::Cursor::new(b"d4:Name3:abce"), &mut person).unwrap();
    assert_eq!(person.Name, "abc");
}

#[test]
fn test_struct_roundtrip() {
    let tracker = Tracker {
        tiers: vec![
            Tier {
                urls: vec!["http://a".into()],
                weight: 3,
            },
            Tier::default(),
        ],
        pieces: Bytes::from_static(&[0u8; 20]),
    };
    let encoded = to_bytes(&tracker).unwrap();
    assert_eq!(from_bytes::<Tracker>(&encoded).unwrap(), tracker);
}

#[test]
fn test_to_writer() {
    let mut out = Vec::new();
    to_writer(&mut out, &Person::default()).unwrap();
    assert_eq!(out, b"d4:Name0:3:Agei0ee");
}

use super::error::BencodeError;
use super::value::Value;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

/// Default limit on nested lists and dictionaries.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Longest integer body that can still fit an `i64` (`-9223372036854775808`).
const MAX_INTEGER_LEN: usize = 20;

/// Tuning knobs for the decoder.
///
/// # Examples
///
/// ```
/// use rbencode::bencode::{decode_with, DecodeOptions};
///
/// let strict = DecodeOptions::new().strict_integers(true);
/// assert!(decode_with(b"i03e", &strict).is_err());
/// assert!(decode_with(b"i3e", &strict).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested containers before decoding fails.
    pub max_depth: usize,
    /// Reject integers with leading zeros, `-0` or an explicit `+`.
    pub strict_integers: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            strict_integers: false,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn strict_integers(mut self, strict: bool) -> Self {
        self.strict_integers = strict;
        self
    }
}

/// Outcome of reading one term: a value, or the `e` that closes a container.
enum Step {
    Value(Value),
    End,
}

/// A streaming bencode decoder.
///
/// Reads one byte at a time from a [`BufRead`] source and stops right after the
/// term it was asked for, so the remaining input stays in the reader.
///
/// ```
/// use rbencode::bencode::{Decoder, Value};
///
/// let mut input: &[u8] = b"i1e4:spam";
/// let mut decoder = Decoder::new(&mut input);
/// assert_eq!(decoder.decode_value().unwrap(), Value::Integer(1));
/// assert_eq!(decoder.decode_value().unwrap().as_str(), Some("spam"));
/// ```
pub struct Decoder<R> {
    reader: R,
    options: DecodeOptions,
}

impl<R: BufRead> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self { reader, options }
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Decodes the next value of any type.
    pub fn decode_value(&mut self) -> Result<Value, BencodeError> {
        match self.step(0)? {
            Step::Value(value) => Ok(value),
            Step::End => Err(BencodeError::UnexpectedChar('e')),
        }
    }

    /// Decodes a document, which must be a dictionary.
    pub fn decode_document(&mut self) -> Result<BTreeMap<Bytes, Value>, BencodeError> {
        match self.next_byte()? {
            b'd' => self.dict(0),
            c => Err(BencodeError::NotADictionary(c as char)),
        }
    }

    fn peek(&mut self) -> Result<Option<u8>, BencodeError> {
        let buf = self.reader.fill_buf()?;
        Ok(buf.first().copied())
    }

    fn next_byte(&mut self) -> Result<u8, BencodeError> {
        let byte = self.peek()?.ok_or(BencodeError::UnexpectedEof)?;
        self.reader.consume(1);
        Ok(byte)
    }

    fn step(&mut self, depth: usize) -> Result<Step, BencodeError> {
        let byte = self.peek()?.ok_or(BencodeError::UnexpectedEof)?;

        // The length run starts at this digit, so leave it in the reader.
        if byte.is_ascii_digit() {
            return Ok(Step::Value(Value::Bytes(self.byte_string()?)));
        }

        self.reader.consume(1);
        let value = match byte {
            b'e' => return Ok(Step::End),
            b'i' => Value::Integer(self.integer()?),
            b'l' => Value::List(self.list(depth)?),
            b'd' => Value::Dict(self.dict(depth)?),
            c => return Err(BencodeError::UnexpectedChar(c as char)),
        };
        Ok(Step::Value(value))
    }

    fn byte_string(&mut self) -> Result<Bytes, BencodeError> {
        let mut len: usize = 0;
        loop {
            match self.next_byte()? {
                b':' => break,
                c @ b'0'..=b'9' => {
                    len = len
                        .checked_mul(10)
                        .and_then(|l| l.checked_add(usize::from(c - b'0')))
                        .ok_or(BencodeError::InvalidStringLength)?;
                }
                _ => return Err(BencodeError::InvalidStringLength),
            }
        }

        let mut data = Vec::new();
        (&mut self.reader).take(len as u64).read_to_end(&mut data)?;
        if data.len() != len {
            return Err(BencodeError::UnexpectedEof);
        }

        Ok(Bytes::from(data))
    }

    fn integer(&mut self) -> Result<i64, BencodeError> {
        let mut body = Vec::new();
        loop {
            match self.next_byte()? {
                b'e' => break,
                _ if body.len() == MAX_INTEGER_LEN => {
                    return Err(BencodeError::InvalidInteger("too long".into()));
                }
                c => body.push(c),
            }
        }

        let text = std::str::from_utf8(&body)
            .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

        if text.is_empty() {
            return Err(BencodeError::InvalidInteger("empty".into()));
        }

        if self.options.strict_integers
            && (text.starts_with('+')
                || text.starts_with("-0")
                || (text.starts_with('0') && text.len() > 1))
        {
            return Err(BencodeError::InvalidInteger("leading zeros".into()));
        }

        text.parse()
            .map_err(|_| BencodeError::InvalidInteger(text.into()))
    }

    fn enter(&self, depth: usize) -> Result<(), BencodeError> {
        if depth >= self.options.max_depth {
            return Err(BencodeError::NestingTooDeep);
        }
        Ok(())
    }

    fn list(&mut self, depth: usize) -> Result<Vec<Value>, BencodeError> {
        self.enter(depth)?;
        let mut list = Vec::new();

        loop {
            match self.step(depth + 1)? {
                Step::Value(value) => list.push(value),
                Step::End => return Ok(list),
            }
        }
    }

    fn dict(&mut self, depth: usize) -> Result<BTreeMap<Bytes, Value>, BencodeError> {
        self.enter(depth)?;
        let mut dict = BTreeMap::new();

        loop {
            let key = match self.step(depth + 1)? {
                Step::End => return Ok(dict),
                Step::Value(Value::Bytes(key)) => key,
                Step::Value(_) => return Err(BencodeError::NonStringKey),
            };

            let value = match self.step(depth + 1)? {
                Step::Value(value) => value,
                Step::End => return Err(BencodeError::UnexpectedChar('e')),
            };

            // Repeated keys are not rejected; the last one wins.
            dict.insert(key, value);
        }
    }
}

/// Decodes a single bencode value that spans the whole of `data`.
///
/// # Errors
///
/// Fails on any grammar violation, on nesting deeper than
/// [`DEFAULT_MAX_DEPTH`], and with [`BencodeError::TrailingData`] if bytes
/// remain after the value.
///
/// # Examples
///
/// ```
/// use rbencode::bencode::{decode, Value};
///
/// assert_eq!(decode(b"i-42e").unwrap(), Value::Integer(-42));
/// assert_eq!(decode(b"l4:spami42ee").unwrap().as_list().map(|l| l.len()), Some(2));
/// assert!(decode(b"i12").is_err());
/// ```
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Like [`decode`], with explicit [`DecodeOptions`].
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Value, BencodeError> {
    let mut decoder = Decoder::with_options(data, *options);
    let value = decoder
        .decode_value()
        .inspect_err(|e| tracing::debug!("bencode decode failed: {}", e))?;

    if !decoder.into_inner().is_empty() {
        return Err(BencodeError::TrailingData);
    }

    Ok(value)
}

/// Decodes a bencode document from a byte source.
///
/// A document is a dictionary: the first byte must be `d`. Any other leading
/// byte fails with [`BencodeError::NotADictionary`]. The source is read
/// through an internal buffer; drive a [`Decoder`] directly if the bytes after
/// the document are needed.
///
/// # Examples
///
/// ```
/// use rbencode::bencode::decode_document;
///
/// let dict = decode_document(&b"d4:Name1:x3:Agei5ee"[..]).unwrap();
/// assert_eq!(dict.len(), 2);
///
/// assert!(decode_document(&b"li1ee"[..]).is_err());
/// ```
pub fn decode_document<R: Read>(reader: R) -> Result<BTreeMap<Bytes, Value>, BencodeError> {
    decode_document_with(reader, &DecodeOptions::default())
}

/// Like [`decode_document`], with explicit [`DecodeOptions`].
pub fn decode_document_with<R: Read>(
    reader: R,
    options: &DecodeOptions,
) -> Result<BTreeMap<Bytes, Value>, BencodeError> {
    Decoder::with_options(BufReader::new(reader), *options)
        .decode_document()
        .inspect_err(|e| tracing::debug!("bencode document decode failed: {}", e))
}

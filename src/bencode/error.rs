use thiserror::Error;

/// The broad category a [`BencodeError`] belongs to.
///
/// Variants of [`BencodeError`] are fine-grained for diagnostics; callers that
/// only need to branch on the class of failure should match on this instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input violates the bencode grammar or could not be read.
    MalformedEncoding,
    /// An integer body did not parse as a signed 64-bit number.
    InvalidInteger,
    /// A map key being encoded is not a byte string.
    DictionaryKeyType,
    /// The value or target has no bencode mapping.
    UnsupportedType,
    /// The unmarshal target cannot be written to.
    NonSettableTarget,
    /// The target shape does not accept the decoded value.
    TargetTypeMismatch,
}

#[derive(Debug, Error)]
pub enum BencodeError {
    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("invalid string length")]
    InvalidStringLength,

    #[error("unexpected character: {0}")]
    UnexpectedChar(char),

    #[error("document must start with a dictionary, found {0:?}")]
    NotADictionary(char),

    #[error("dictionary key is not a byte string")]
    NonStringKey,

    #[error("trailing data after value")]
    TrailingData,

    #[error("nesting too deep")]
    NestingTooDeep,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dictionary key is not a byte string type")]
    DictionaryKeyType,

    #[error("unsupported type: {0}")]
    UnsupportedType(&'static str),

    #[error("field `{0}` cannot be set")]
    NonSettableTarget(&'static str),

    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("byte string is not valid utf-8")]
    InvalidUtf8,

    #[error("field `{name}`: {source}")]
    Field {
        name: &'static str,
        #[source]
        source: Box<BencodeError>,
    },
}

impl BencodeError {
    /// Returns the category of this error.
    ///
    /// Errors wrapped in [`BencodeError::Field`] report the kind of the
    /// underlying failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            BencodeError::UnexpectedEof
            | BencodeError::InvalidStringLength
            | BencodeError::UnexpectedChar(_)
            | BencodeError::NotADictionary(_)
            | BencodeError::NonStringKey
            | BencodeError::TrailingData
            | BencodeError::NestingTooDeep
            | BencodeError::Io(_) => ErrorKind::MalformedEncoding,
            BencodeError::InvalidInteger(_) => ErrorKind::InvalidInteger,
            BencodeError::DictionaryKeyType => ErrorKind::DictionaryKeyType,
            BencodeError::UnsupportedType(_) => ErrorKind::UnsupportedType,
            BencodeError::NonSettableTarget(_) => ErrorKind::NonSettableTarget,
            BencodeError::TypeMismatch { .. } | BencodeError::InvalidUtf8 => {
                ErrorKind::TargetTypeMismatch
            }
            BencodeError::Field { source, .. } => source.kind(),
        }
    }

    pub(crate) fn in_field(self, name: &'static str) -> Self {
        BencodeError::Field {
            name,
            source: Box::new(self),
        }
    }
}

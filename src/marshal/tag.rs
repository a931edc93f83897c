/// Annotation marking a field as skipped in both directions.
pub const IGNORE: &str = "-";

/// Option that suppresses a field holding its empty value on encode.
pub const OMIT_EMPTY: &str = "omitempty";

/// Separates the name override from the option in an annotation.
pub const SEPARATOR: char = ',';

/// Directives parsed from a field annotation.
///
/// Annotations follow the `"name,option"` convention:
///
/// | Annotation | Name | Omit empty | Ignore |
/// |------------|------|------------|--------|
/// | *(none)* | declared | no | no |
/// | `"-"` | declared | no | yes |
/// | `"info hash"` | `info hash` | no | no |
/// | `"info hash,omitempty"` | `info hash` | yes | no |
/// | `",omitempty"` | declared | yes | no |
/// | `"omitempty"` | declared | **no** | no |
///
/// The bare `"omitempty"` row is deliberate: the option only counts after the
/// separator, and on its own it merely leaves the declared name in place.
///
/// # Examples
///
/// ```
/// use rbencode::marshal::FieldTag;
///
/// let tag = FieldTag::parse("created_by", Some("created by,omitempty"));
/// assert_eq!(tag.name, "created by");
/// assert!(tag.omit_empty);
///
/// let tag = FieldTag::parse("cache", Some("-"));
/// assert!(tag.ignore);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldTag<'a> {
    /// Dictionary key the field maps to.
    pub name: &'a str,
    pub omit_empty: bool,
    pub ignore: bool,
}

impl<'a> FieldTag<'a> {
    /// Resolves the annotation of a field declared as `declared`.
    pub fn parse(declared: &'a str, annotation: Option<&'a str>) -> Self {
        let plain = Self {
            name: declared,
            omit_empty: false,
            ignore: false,
        };

        let tag = match annotation {
            Some(tag) if !tag.is_empty() => tag,
            _ => return plain,
        };

        if tag == IGNORE {
            return Self {
                ignore: true,
                ..plain
            };
        }

        match tag.split_once(SEPARATOR) {
            Some((name, option)) => Self {
                name: if name.is_empty() { declared } else { name },
                omit_empty: option == OMIT_EMPTY,
                ignore: false,
            },
            None if tag == OMIT_EMPTY => plain,
            None => Self { name: tag, ..plain },
        }
    }
}

/// Everything the marshal layer needs to know about one aggregate field.
///
/// Built on demand from the field declaration each time a struct is encoded or
/// unmarshalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDescriptor {
    /// Name of the Rust field.
    pub declared: &'static str,
    /// Dictionary key, after applying the annotation.
    pub name: &'static str,
    pub omit_empty: bool,
    pub ignore: bool,
    /// Whether the field is part of the public contract (`pub`). Private
    /// fields are never encoded and cannot be set from a dictionary.
    pub exposed: bool,
}

impl FieldDescriptor {
    pub fn describe(
        declared: &'static str,
        annotation: Option<&'static str>,
        exposed: bool,
    ) -> Self {
        let tag = FieldTag::parse(declared, annotation);
        Self {
            declared,
            name: tag.name,
            omit_empty: tag.omit_empty,
            ignore: tag.ignore,
            exposed,
        }
    }
}

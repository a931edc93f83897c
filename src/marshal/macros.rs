/// Declares a struct that maps to a bencode dictionary.
///
/// The struct is emitted unchanged apart from the field annotations, and gains
/// [`Encode`](crate::marshal::Encode), [`Unmarshal`](crate::marshal::Unmarshal)
/// and [`Aggregate`](crate::marshal::Aggregate) impls. Each field may carry an
/// annotation after `=>`, resolved by [`FieldTag`](crate::marshal::FieldTag):
///
/// - `=> "name"` uses `name` as the dictionary key,
/// - `=> "name,omitempty"` also skips the field on encode when it is empty,
/// - `=> "-"` ignores the field in both directions.
///
/// Fields are encoded in declaration order. Only `pub` fields take part in
/// the mapping.
///
/// # Examples
///
/// ```
/// use rbencode::bencode_struct;
/// use rbencode::marshal::{from_bytes, to_bytes};
///
/// bencode_struct! {
///     #[derive(Debug, Default, PartialEq)]
///     pub struct Announce {
///         pub url: String => "announce",
///         pub comment: String => "comment,omitempty",
///         pub interval: u32,
///         pub cache: u64 => "-",
///     }
/// }
///
/// let announce = Announce {
///     url: "http://tracker".into(),
///     interval: 1800,
///     ..Default::default()
/// };
/// let encoded = to_bytes(&announce).unwrap();
/// assert_eq!(encoded, b"d8:announce14:http://tracker8:intervali1800ee");
///
/// let decoded: Announce = from_bytes(&encoded).unwrap();
/// assert_eq!(decoded, announce);
/// ```
#[macro_export]
macro_rules! bencode_struct {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty $(=> $tag:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty,
            )*
        }

        impl $crate::marshal::Aggregate for $name {
            fn fields() -> ::std::vec::Vec<$crate::marshal::FieldDescriptor> {
                ::std::vec![$(
                    $crate::marshal::FieldDescriptor::describe(
                        ::core::stringify!($field),
                        ::core::option::Option::None $(.or(::core::option::Option::Some($tag)))?,
                        !::core::stringify!($field_vis).is_empty(),
                    )
                ),*]
            }
        }

        impl $crate::marshal::Encode for $name {
            fn shape(&self) -> $crate::marshal::Shape {
                $crate::marshal::Shape::Dict
            }

            fn encode_to<W: ::std::io::Write + ?Sized>(
                &self,
                writer: &mut W,
            ) -> ::core::result::Result<(), $crate::bencode::BencodeError> {
                #[allow(unused_mut)]
                let mut fields = $crate::marshal::StructEncoder::begin(writer)?;
                $(
                    fields.field(
                        &$crate::marshal::FieldDescriptor::describe(
                            ::core::stringify!($field),
                            ::core::option::Option::None $(.or(::core::option::Option::Some($tag)))?,
                            !::core::stringify!($field_vis).is_empty(),
                        ),
                        &self.$field,
                    )?;
                )*
                fields.end()
            }
        }

        impl $crate::marshal::Unmarshal for $name {
            #[allow(unused_variables)]
            fn unmarshal(
                &mut self,
                value: &$crate::bencode::Value,
            ) -> ::core::result::Result<(), $crate::bencode::BencodeError> {
                let dict = $crate::marshal::expect_dict(value)?;
                $(
                    $crate::marshal::unmarshal_field(
                        dict,
                        &$crate::marshal::FieldDescriptor::describe(
                            ::core::stringify!($field),
                            ::core::option::Option::None $(.or(::core::option::Option::Some($tag)))?,
                            !::core::stringify!($field_vis).is_empty(),
                        ),
                        &mut self.$field,
                    )?;
                )*
                ::core::result::Result::Ok(())
            }
        }
    };
}

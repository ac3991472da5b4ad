//! `impl_record!`: derive a `Record` implementation from a field list

/// Implements `Record` for a struct.
///
/// The first field, marked `#[key]`, must be an `Identity` and becomes the
/// `Id` key column; the identity column always comes first. Every other
/// listed field must implement `Primitive`; its column takes the field's name
/// and follows the listed order. Those fields may carry one attribute:
///
/// - `#[key]` adds the column to the row key after `Id`
/// - `#[private]` declares the field but keeps it out of the table
///
/// Fields left out of the list are not persisted. Records that need the
/// identity elsewhere than first implement `Record` by hand.
#[macro_export]
macro_rules! impl_record {
    (
        $record:ident {
            #[key] $id:ident
            $(, $(#[$attr:ident])? $field:ident : $ty:ty)* $(,)?
        }
    ) => {
        impl $crate::record::Record for $record {
            fn table_name() -> &'static str {
                stringify!($record)
            }

            fn fields() -> ::std::vec::Vec<$crate::schema::FieldDecl> {
                vec![
                    $crate::schema::FieldDecl::identity(),
                    $(
                        $crate::schema::FieldDecl::column(
                            stringify!($field),
                            <$ty as $crate::codec::Primitive>::COLUMN_TYPE,
                        )$(.$attr())?,
                    )*
                ]
            }

            fn id(&self) -> $crate::record::Identity {
                self.$id
            }

            fn set_id(&mut self, id: $crate::record::Identity) {
                self.$id = id;
            }

            fn read_field(&self, name: &str) -> ::std::option::Option<$crate::codec::ColumnValue> {
                match name {
                    $(
                        stringify!($field) => ::std::option::Option::Some(
                            <$ty as $crate::codec::Primitive>::to_column_value(&self.$field),
                        ),
                    )*
                    _ => ::std::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn write_field(
                &mut self,
                name: &str,
                value: $crate::codec::ColumnValue,
            ) -> $crate::codec::CodecResult<()> {
                match name {
                    $(
                        stringify!($field) => {
                            self.$field = <$ty as $crate::codec::Primitive>::from_column_value(name, value)?;
                            ::std::result::Result::Ok(())
                        }
                    )*
                    _ => ::std::result::Result::Err(
                        $crate::codec::CodecError::unknown_field(stringify!($record), name),
                    ),
                }
            }
        }
    };
}

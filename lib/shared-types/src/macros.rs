/// `Display` passthrough plus construction from the wrapped value.
macro_rules! id_conversions {
    ($id: ty; $inner: ty) => {
        impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl std::convert::From<$inner> for $id {
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }
    };
}
pub(crate) use id_conversions;

/// Identifier backed by a random uuid, parsed from its hyphenated form.
macro_rules! uuid_id {
    ($id: ty) => {
        impl std::str::FromStr for $id {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        $crate::macros::id_conversions!($id; uuid::Uuid);
    };
}
pub(crate) use uuid_id;

/// Stores an identifier in a text column. Reading a row parses the text back with `FromStr`.
///
/// Covers `eq`/`is_in` filters, `find_by_id`/`delete_by_id` taking `&id`, nullable columns
/// (`credential.session_id`) and primary keys.
macro_rules! sea_orm_text_id {
    ($id: ty) => {
        impl std::convert::From<$id> for sea_orm::Value {
            fn from(id: $id) -> Self {
                id.0.to_string().into()
            }
        }

        impl std::convert::From<&$id> for sea_orm::Value {
            fn from(id: &$id) -> Self {
                id.0.to_string().into()
            }
        }

        impl std::convert::From<&$id> for $id {
            fn from(id: &$id) -> Self {
                id.clone()
            }
        }

        impl sea_orm::TryGetable for $id {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &sea_orm::QueryResult,
                idx: I,
            ) -> Result<Self, sea_orm::TryGetError> {
                let text = <String as sea_orm::TryGetable>::try_get_by(res, idx)?;
                text.parse().map_err(|error| {
                    sea_orm::TryGetError::DbErr(sea_orm::DbErr::Type(format!(
                        "stored {} `{text}` is malformed: {error}",
                        stringify!($id)
                    )))
                })
            }
        }

        impl sea_orm::sea_query::ValueType for $id {
            fn try_from(v: sea_orm::Value) -> Result<Self, sea_orm::sea_query::ValueTypeErr> {
                <String as sea_orm::sea_query::ValueType>::try_from(v)?
                    .parse()
                    .map_err(|_| sea_orm::sea_query::ValueTypeErr)
            }

            fn type_name() -> String {
                stringify!($id).to_owned()
            }

            fn array_type() -> sea_orm::sea_query::ArrayType {
                sea_orm::sea_query::ArrayType::String
            }

            fn column_type() -> sea_orm::sea_query::ColumnType {
                sea_orm::sea_query::ColumnType::String(sea_orm::sea_query::StringLen::None)
            }
        }

        impl sea_orm::sea_query::value::Nullable for $id {
            fn null() -> sea_orm::Value {
                sea_orm::Value::String(None)
            }
        }

        impl sea_orm::TryFromU64 for $id {
            fn try_from_u64(_: u64) -> Result<Self, sea_orm::DbErr> {
                Err(sea_orm::DbErr::ConvertFromU64(stringify!($id)))
            }
        }
    };
}
pub(crate) use sea_orm_text_id;

//! Newtype IDs for type-safe entity references.
//!
//! Every entity in the store is keyed by a random UUID. The `define_id!` macro
//! wraps that UUID in a distinct type per entity so an `ItemId` can never be
//! passed where an `OrderId` is expected.

/// Macro to define a type-safe UUID wrapper.
///
/// Creates a newtype wrapper around [`uuid::Uuid`] with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors `new_v4()` and `parse()`
/// - `Display`/`FromStr` using the hyphenated UUID form
/// - `sqlx` `Type`, `Encode`, and `Decode` implementations (with `postgres` feature)
///
/// # Example
///
/// ```rust
/// # use corner_store_core::define_id;
/// define_id!(WidgetId);
/// define_id!(GadgetId);
///
/// let widget = WidgetId::new_v4();
/// let parsed: WidgetId = widget.to_string().parse().unwrap();
/// assert_eq!(widget, parsed);
///
/// // These are different types, so this won't compile:
/// // let _: GadgetId = widget;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(::uuid::Uuid);

        impl $name {
            /// Generate a fresh random ID.
            #[must_use]
            pub fn new_v4() -> Self {
                Self(::uuid::Uuid::new_v4())
            }

            /// Parse an ID from its textual UUID form.
            ///
            /// # Errors
            ///
            /// Returns `uuid::Error` if the input is not a valid UUID.
            pub fn parse(s: &str) -> ::core::result::Result<Self, ::uuid::Error> {
                ::uuid::Uuid::parse_str(s).map(Self)
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = ::uuid::Error;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Type<::sqlx::Postgres> for $name {
            fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::type_info()
            }

            fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                <::uuid::Uuid as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
            }
        }

        #[cfg(feature = "postgres")]
        impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
            fn decode(
                value: ::sqlx::postgres::PgValueRef<'r>,
            ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                let id = <::uuid::Uuid as ::sqlx::Decode<::sqlx::Postgres>>::decode(value)?;
                Ok(Self(id))
            }
        }

        #[cfg(feature = "postgres")]
        impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut ::sqlx::postgres::PgArgumentBuffer,
            ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                <::uuid::Uuid as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
            }
        }
    };
}

define_id!(UserId);
define_id!(ItemId);
define_id!(CartId);
define_id!(OrderId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_ids_are_distinct() {
        assert_ne!(ItemId::new_v4(), ItemId::new_v4());
    }

    #[test]
    fn test_parse_display_agree() {
        let raw = "2e6db091-cbbc-4b78-98b0-1ec90cd7daae";
        let id = UserId::parse(raw).unwrap();
        assert_eq!(id.to_string(), raw);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(OrderId::parse("not-a-uuid").is_err());
        assert!("".parse::<CartId>().is_err());
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = ItemId::parse("0bc224c6-f78e-4de9-a3de-fe17451e6d0d").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"0bc224c6-f78e-4de9-a3de-fe17451e6d0d\"");
    }
}

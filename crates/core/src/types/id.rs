//! Newtype IDs for type-safe entity references.
//!
//! Every table keys on a serial `i32`; wrapping each in its own type keeps
//! a `BookId` from ever being handed to a function expecting a
//! `CustomerId`, with no runtime cost.

/// Define one newtype ID per listed name.
///
/// Each generated type wraps an `i32` and carries transparent serde,
/// `Display`, `From` conversions in both directions, and (behind the
/// `postgres` feature) sqlx `Type`/`Encode`/`Decode` delegating to `i32`.
///
/// ```rust
/// # use dogear_core::define_id;
/// define_id!(CustomerId, OrderId);
///
/// let customer = CustomerId::new(1);
/// let order = OrderId::new(1);
/// // let _: CustomerId = order; // distinct types: does not compile
/// ```
#[macro_export]
macro_rules! define_id {
    ($($name:ident),+ $(,)?) => {
        $(
            #[derive(
                Debug,
                Clone,
                Copy,
                PartialEq,
                Eq,
                Hash,
                ::serde::Serialize,
                ::serde::Deserialize
            )]
            #[serde(transparent)]
            pub struct $name(i32);

            impl $name {
                #[must_use]
                pub const fn new(id: i32) -> Self {
                    Self(id)
                }

                #[must_use]
                pub const fn as_i32(self) -> i32 {
                    self.0
                }
            }

            impl ::core::fmt::Display for $name {
                fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    write!(f, "{}", self.0)
                }
            }

            impl From<i32> for $name {
                fn from(id: i32) -> Self {
                    Self(id)
                }
            }

            impl From<$name> for i32 {
                fn from(id: $name) -> Self {
                    id.0
                }
            }

            #[cfg(feature = "postgres")]
            impl ::sqlx::Type<::sqlx::Postgres> for $name {
                fn type_info() -> ::sqlx::postgres::PgTypeInfo {
                    <i32 as ::sqlx::Type<::sqlx::Postgres>>::type_info()
                }

                fn compatible(ty: &::sqlx::postgres::PgTypeInfo) -> bool {
                    <i32 as ::sqlx::Type<::sqlx::Postgres>>::compatible(ty)
                }
            }

            #[cfg(feature = "postgres")]
            impl<'r> ::sqlx::Decode<'r, ::sqlx::Postgres> for $name {
                fn decode(
                    value: ::sqlx::postgres::PgValueRef<'r>,
                ) -> ::core::result::Result<Self, ::sqlx::error::BoxDynError> {
                    <i32 as ::sqlx::Decode<::sqlx::Postgres>>::decode(value).map(Self)
                }
            }

            #[cfg(feature = "postgres")]
            impl ::sqlx::Encode<'_, ::sqlx::Postgres> for $name {
                fn encode_by_ref(
                    &self,
                    buf: &mut ::sqlx::postgres::PgArgumentBuffer,
                ) -> ::std::result::Result<::sqlx::encode::IsNull, ::sqlx::error::BoxDynError> {
                    <i32 as ::sqlx::Encode<::sqlx::Postgres>>::encode_by_ref(&self.0, buf)
                }
            }
        )+
    };
}

define_id!(BookId, CustomerId, OrderId, OrderItemId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = BookId::new(42);
        assert_eq!(id.as_i32(), 42);
        assert_eq!(i32::from(id), 42);
        assert_eq!(BookId::from(42), id);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(OrderId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = CustomerId::new(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        let parsed: CustomerId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, id);
    }
}

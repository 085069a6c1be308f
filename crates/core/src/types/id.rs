//! Newtype IDs for Shopify global identifiers.
//!
//! Use the `define_gid!` macro to create type-safe wrappers around the opaque
//! `gid://shopify/<Resource>/<n>` strings so that product and variant IDs
//! can't be mixed up.

/// Errors that can occur when parsing a global ID from user input.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum GidError {
    /// The input string is empty.
    #[error("id cannot be empty")]
    Empty,
    /// The input is a gid for another resource type.
    #[error("expected a {expected} id, got {got}")]
    WrongResource {
        /// Resource name the type expects.
        expected: &'static str,
        /// The rejected input.
        got: String,
    },
    /// The input is neither a gid nor a numeric legacy id.
    #[error("invalid id: {0}")]
    Invalid(String),
}

/// Macro to define a type-safe global ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - `parse()` accepting a full gid or a bare numeric legacy id
/// - `as_str()`, `legacy_id()`, `Display`, `FromStr`
///
/// Values coming back from the API are trusted and deserialized as-is;
/// `parse()` is for ids that arrive from forms and query strings.
///
/// # Example
///
/// ```rust
/// # use product_desk_core::define_gid;
/// define_gid!(OrderId, "Order");
///
/// let id = OrderId::parse("42").unwrap();
/// assert_eq!(id.as_str(), "gid://shopify/Order/42");
/// assert_eq!(id.legacy_id(), "42");
/// ```
#[macro_export]
macro_rules! define_gid {
    ($name:ident, $resource:literal) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Shopify resource name embedded in the gid.
            pub const RESOURCE: &'static str = $resource;

            /// Parse an id from a full gid or a numeric legacy id.
            ///
            /// # Errors
            ///
            /// Returns an error if the input is empty, names a different
            /// resource, or is neither a gid nor a number.
            pub fn parse(s: &str) -> ::core::result::Result<Self, $crate::types::id::GidError> {
                let s = s.trim();
                if s.is_empty() {
                    return Err($crate::types::id::GidError::Empty);
                }

                if let Some(rest) = s.strip_prefix("gid://shopify/") {
                    let (resource, id) = rest
                        .split_once('/')
                        .ok_or_else(|| $crate::types::id::GidError::Invalid(s.to_owned()))?;
                    if resource != $resource {
                        return Err($crate::types::id::GidError::WrongResource {
                            expected: $resource,
                            got: s.to_owned(),
                        });
                    }
                    if id.is_empty() {
                        return Err($crate::types::id::GidError::Invalid(s.to_owned()));
                    }
                    return Ok(Self(s.to_owned()));
                }

                if s.bytes().all(|b| b.is_ascii_digit()) {
                    return Ok(Self(format!("gid://shopify/{}/{}", $resource, s)));
                }

                Err($crate::types::id::GidError::Invalid(s.to_owned()))
            }

            /// Wrap a gid returned by the API without validation.
            #[must_use]
            pub fn from_api(gid: impl Into<String>) -> Self {
                Self(gid.into())
            }

            /// Returns the gid as a string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Returns the trailing numeric segment of the gid.
            #[must_use]
            pub fn legacy_id(&self) -> &str {
                self.0.rsplit('/').next().unwrap_or(&self.0)
            }

            /// Consumes the id and returns the inner gid string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::types::id::GidError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_gid!(ProductId, "Product");
define_gid!(VariantId, "ProductVariant");
define_gid!(CollectionId, "Collection");

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_gid() {
        let id = ProductId::parse("gid://shopify/Product/8123").unwrap();
        assert_eq!(id.as_str(), "gid://shopify/Product/8123");
        assert_eq!(id.legacy_id(), "8123");
    }

    #[test]
    fn test_parse_legacy_id_expands_to_gid() {
        let id = ProductId::parse(" 8123 ").unwrap();
        assert_eq!(id.as_str(), "gid://shopify/Product/8123");
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse("  "), Err(GidError::Empty));
    }

    #[test]
    fn test_parse_wrong_resource() {
        assert!(matches!(
            ProductId::parse("gid://shopify/Collection/1"),
            Err(GidError::WrongResource { expected: "Product", .. })
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            ProductId::parse("abc"),
            Err(GidError::Invalid(_))
        ));
        assert!(matches!(
            ProductId::parse("gid://shopify/Product/"),
            Err(GidError::Invalid(_))
        ));
    }

    #[test]
    fn test_variant_resource_name() {
        let id = VariantId::parse("7").unwrap();
        assert_eq!(id.to_string(), "gid://shopify/ProductVariant/7");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::from_api("gid://shopify/Product/1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"gid://shopify/Product/1\"");
        let back: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}

//! Newtype IDs for type-safe entity references.
//!
//! Backend identifiers are opaque strings (document IDs, slugs). Use the
//! `define_id!` macro to create wrappers that prevent mixing IDs from
//! different entity types.

use thiserror::Error;

/// Errors that can occur when parsing an identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    /// The identifier is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Name of the ID type that was rejected.
        kind: &'static str,
    },
}

/// Macro to define a type-safe ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Constructors: `new()` (unchecked) and `parse()` (rejects blank input)
/// - `as_str()`, `is_blank()`, `Display`, `AsRef<str>`, `From<&str>`, `From<String>`
///
/// # Example
///
/// ```rust
/// # use shopfront_core::define_id;
/// define_id!(UserId);
/// define_id!(OrderId);
///
/// let user_id = UserId::new("u-1");
/// let order_id = OrderId::new("u-1");
///
/// // These are different types, so this won't compile:
/// // let _: UserId = order_id;
/// assert!(UserId::parse("  ").is_err());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
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
            /// Create a new ID without validation.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Parse an ID, rejecting empty or whitespace-only input.
            ///
            /// # Errors
            ///
            /// Returns [`IdError::Empty`]($crate::IdError::Empty) for blank input.
            pub fn parse(id: &str) -> ::core::result::Result<Self, $crate::IdError> {
                if id.trim().is_empty() {
                    return Err($crate::IdError::Empty {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(id.to_owned()))
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the ID is empty or only whitespace.
            #[must_use]
            pub fn is_blank(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(ProductId);
define_id!(CategoryId);
define_id!(BrandId);
define_id!(OrderId);
define_id!(ReviewId);
define_id!(UserId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(
            ProductId::parse(""),
            Err(IdError::Empty { kind: "ProductId" })
        );
        assert!(CategoryId::parse("   ").is_err());
    }

    #[test]
    fn test_parse_keeps_value_verbatim() {
        let id = ProductId::parse("65f1c0ffee").unwrap();
        assert_eq!(id.as_str(), "65f1c0ffee");
        assert_eq!(id.to_string(), "65f1c0ffee");
    }

    #[test]
    fn test_serde_is_transparent() {
        let id = CategoryId::new("cat-1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"cat-1\"");
        let back: CategoryId = serde_json::from_str("\"cat-1\"").unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_is_blank() {
        assert!(ReviewId::new(" ").is_blank());
        assert!(!ReviewId::new("r1").is_blank());
    }
}

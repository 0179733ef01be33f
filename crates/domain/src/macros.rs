//! Macro for implementing Display and FromStr for wire-level enums
//!
//! The remote API and the workflow host both speak in string tags
//! (`"getAll"`, `"timesync"`, `"inweek"`). This macro maps enum variants to
//! those tags in one place. Parsing is ASCII case-insensitive, output is the
//! exact tag.
//!
//! # Example
//!
//! ```rust
//! use obscreen_domain::impl_wire_enum_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum LoopMode {
//!     Sequential,
//!     TimeSync,
//!     Random,
//! }
//!
//! impl_wire_enum_conversions!(LoopMode {
//!     Sequential => "sequential",
//!     TimeSync => "timesync",
//!     Random => "random",
//! });
//! ```

/// Implements `Display`, `FromStr` and `as_str` for a wire enum
///
/// This macro generates:
/// - `as_str()`: the exact wire tag
/// - Display trait: writes the wire tag
/// - FromStr trait: parses ASCII case-insensitive tags
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Mapping of enum variants to their wire tags
#[macro_export]
macro_rules! impl_wire_enum_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Wire tag for this variant.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }

            /// Every wire tag, in declaration order.
            pub fn tags() -> &'static [&'static str] {
                &[$($str),+]
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                $(
                    if s.eq_ignore_ascii_case($str) {
                        return Ok(Self::$variant);
                    }
                )+
                Err(format!("Invalid {}: {}", stringify!($enum_name), s))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum TestOperation {
        Get,
        GetAll,
        UpdatePositions,
    }

    impl_wire_enum_conversions!(TestOperation {
        Get => "get",
        GetAll => "getAll",
        UpdatePositions => "updatePositions",
    });

    #[test]
    fn test_display_uses_exact_tag() {
        assert_eq!(TestOperation::Get.to_string(), "get");
        assert_eq!(TestOperation::GetAll.to_string(), "getAll");
        assert_eq!(TestOperation::UpdatePositions.as_str(), "updatePositions");
    }

    #[test]
    fn test_fromstr_camel_case_tags() {
        assert_eq!(TestOperation::from_str("getAll").unwrap(), TestOperation::GetAll);
        assert_eq!(TestOperation::from_str("GETALL").unwrap(), TestOperation::GetAll);
        assert_eq!(
            TestOperation::from_str("updatepositions").unwrap(),
            TestOperation::UpdatePositions
        );
    }

    #[test]
    fn test_fromstr_invalid() {
        let result = TestOperation::from_str("getMany");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Invalid TestOperation: getMany"));
    }

    #[test]
    fn test_fromstr_empty() {
        assert!(TestOperation::from_str("").is_err());
    }

    #[test]
    fn test_tags_in_declaration_order() {
        assert_eq!(TestOperation::tags(), &["get", "getAll", "updatePositions"]);
    }
}

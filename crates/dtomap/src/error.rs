// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Mapping errors.

use crate::dynamic::DynamicDataError;

/// Errors returned by mapper registration and mapping operations.
///
/// Registration is fail-fast: every variant except `MappingNotFound` and
/// `ValueConversion` is raised while building a profile, and a failed
/// registration leaves the registry untouched. Structural mismatches found
/// while executing a profile are not errors; the destination member keeps
/// its zero value.
///
/// # Example
///
/// ```rust
/// use dtomap::{Mappable, Mapper, MappingError};
///
/// #[derive(Mappable, Default)]
/// struct User { pub name: String }
///
/// let mapper = Mapper::new();
/// match mapper.map::<User, User>(&User::default()) {
///     Err(MappingError::MappingNotFound { .. }) => {}
///     other => panic!("unexpected: {:?}", other.map(|_| ())),
/// }
/// ```
#[derive(Debug)]
pub enum MappingError {
    /// One side is not struct-shaped (after unwrapping one reference level),
    /// or only one side of a top-level mapping is a sequence.
    UnsupportedMapping {
        source_type: String,
        destination_type: String,
    },
    /// The pair (or its reference variant) is already registered.
    MappingAlreadyExists {
        source_type: String,
        destination_type: String,
    },
    /// No registration for the pair at mapping time.
    MappingNotFound {
        source_type: String,
        destination_type: String,
    },
    /// Custom registration without a transform.
    NilTransform {
        source_type: String,
        destination_type: String,
    },
    /// Profile building was handed a non-struct descriptor.
    InvalidStructuralType(String),
    /// The mapped dynamic value could not be converted back to the caller's type.
    ValueConversion {
        destination_type: String,
        cause: DynamicDataError,
    },
}

impl MappingError {
    pub(crate) fn unsupported(source_type: &str, destination_type: &str) -> Self {
        Self::UnsupportedMapping {
            source_type: source_type.to_string(),
            destination_type: destination_type.to_string(),
        }
    }

    pub(crate) fn already_exists(source_type: &str, destination_type: &str) -> Self {
        Self::MappingAlreadyExists {
            source_type: source_type.to_string(),
            destination_type: destination_type.to_string(),
        }
    }

    pub(crate) fn not_found(source_type: &str, destination_type: &str) -> Self {
        Self::MappingNotFound {
            source_type: source_type.to_string(),
            destination_type: destination_type.to_string(),
        }
    }

    pub(crate) fn nil_transform(source_type: &str, destination_type: &str) -> Self {
        Self::NilTransform {
            source_type: source_type.to_string(),
            destination_type: destination_type.to_string(),
        }
    }
}

impl std::fmt::Display for MappingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MappingError::UnsupportedMapping {
                source_type,
                destination_type,
            } => write!(
                f,
                "Unsupported mapping: {} -> {} (both sides must be structs)",
                source_type, destination_type
            ),
            MappingError::MappingAlreadyExists {
                source_type,
                destination_type,
            } => write!(
                f,
                "Mapping already exists: {} -> {}",
                source_type, destination_type
            ),
            MappingError::MappingNotFound {
                source_type,
                destination_type,
            } => write!(
                f,
                "Mapping not found: {} -> {}",
                source_type, destination_type
            ),
            MappingError::NilTransform {
                source_type,
                destination_type,
            } => write!(
                f,
                "Custom mapping {} -> {} has no transform",
                source_type, destination_type
            ),
            MappingError::InvalidStructuralType(name) => {
                write!(f, "Invalid structural type: {} is not a struct", name)
            }
            MappingError::ValueConversion {
                destination_type,
                cause,
            } => write!(
                f,
                "Cannot convert mapped value to {}: {}",
                destination_type, cause
            ),
        }
    }
}

impl std::error::Error for MappingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MappingError::ValueConversion { cause, .. } => Some(cause),
            _ => None,
        }
    }
}

/// Convenient alias for mapper results.
pub type Result<T> = core::result::Result<T, MappingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_both_types() {
        let err = MappingError::already_exists("app::User", "api::UserDto");
        assert_eq!(
            err.to_string(),
            "Mapping already exists: app::User -> api::UserDto"
        );

        let err = MappingError::not_found("a::A", "b::B");
        assert!(err.to_string().contains("a::A -> b::B"));
    }

    #[test]
    fn test_value_conversion_source() {
        use std::error::Error as _;

        let err = MappingError::ValueConversion {
            destination_type: "api::UserDto".into(),
            cause: DynamicDataError::FieldNotFound("name".into()),
        };
        assert!(err.source().is_some());
        assert!(MappingError::InvalidStructuralType("u32".into())
            .source()
            .is_none());
    }
}

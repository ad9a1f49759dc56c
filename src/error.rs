//! Manifest Errors - one variant per rejection reason
//!
//! Every failure is terminal for the validation pass. Parameter-level
//! variants carry the zero-based position and name of the offending entry.

use std::num::ParseIntError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Malformed manifest document: {0}")]
    Decode(#[from] serde_yaml::Error),

    #[error("Manifest file needs to provide a version")]
    MissingVersion,

    #[error("Manifest version '{version}' is not a valid semantic version: {source}")]
    MalformedVersion {
        version: String,
        #[source]
        source: semver::Error,
    },

    #[error("Manifest version {version} is newer than the maximum supported version {max}")]
    IncompatibleVersion { version: String, max: String },

    #[error("Parameter #{index} ('{name}') needs to provide a type")]
    MissingType { index: usize, name: String },

    #[error("Parameter #{index} ('{name}'): '{value}' is not a valid integer: {source}")]
    IntegerParse {
        index: usize,
        name: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error("Parameter #{index} ('{name}'): '{value}' is not a valid boolean")]
    BooleanParse {
        index: usize,
        name: String,
        value: String,
    },

    #[error("Parameter #{index} ('{name}'): boolean type does not allow enums")]
    BooleanEnumNotAllowed { index: usize, name: String },

    #[error("Parameter #{index} ('{name}'): unknown type '{type_tag}'")]
    UnknownType {
        index: usize,
        name: String,
        type_tag: String,
    },

    #[error("Parameter #{index}: name '{name}' is already used by parameter #{first}")]
    DuplicateName {
        index: usize,
        name: String,
        first: usize,
    },
}

impl ManifestError {
    /// Stable tag for machine-readable output
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::MissingVersion => "missing_version",
            Self::MalformedVersion { .. } => "malformed_version",
            Self::IncompatibleVersion { .. } => "incompatible_version",
            Self::MissingType { .. } => "missing_type",
            Self::IntegerParse { .. } => "integer_parse",
            Self::BooleanParse { .. } => "boolean_parse",
            Self::BooleanEnumNotAllowed { .. } => "boolean_enum_not_allowed",
            Self::UnknownType { .. } => "unknown_type",
            Self::DuplicateName { .. } => "duplicate_name",
        }
    }

    /// Position and name of the offending parameter, if the error is parameter-level.
    pub fn parameter(&self) -> Option<(usize, &str)> {
        match self {
            Self::MissingType { index, name }
            | Self::IntegerParse { index, name, .. }
            | Self::BooleanParse { index, name, .. }
            | Self::BooleanEnumNotAllowed { index, name }
            | Self::UnknownType { index, name, .. }
            | Self::DuplicateName { index, name, .. } => Some((*index, name.as_str())),
            _ => None,
        }
    }

    /// Version-level failures stop a pass before any parameter is read.
    pub fn is_version_error(&self) -> bool {
        matches!(
            self,
            Self::MissingVersion | Self::MalformedVersion { .. } | Self::IncompatibleVersion { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_context_exposed() {
        let err = ManifestError::BooleanEnumNotAllowed {
            index: 3,
            name: "flag".to_string(),
        };
        assert_eq!(err.parameter(), Some((3, "flag")));
        assert_eq!(err.kind(), "boolean_enum_not_allowed");
        assert!(!err.is_version_error());
    }

    #[test]
    fn test_version_errors_have_no_parameter() {
        let err = ManifestError::MissingVersion;
        assert!(err.parameter().is_none());
        assert!(err.is_version_error());
        assert_eq!(err.to_string(), "Manifest file needs to provide a version");
    }

    #[test]
    fn test_integer_error_keeps_source() {
        let source = "abc".parse::<isize>().unwrap_err();
        let err = ManifestError::IntegerParse {
            index: 0,
            name: "port".to_string(),
            value: "abc".to_string(),
            source,
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("'abc' is not a valid integer"));
    }
}

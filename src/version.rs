//! Version Compatibility - the manifest version is a ceiling check
//!
//! Manifests written for this engine version or any older one are accepted.
//! Anything newer may use features this engine does not understand.

use semver::{BuildMetadata, Version};

use crate::error::ManifestError;

/// Highest manifest version this engine can process. Bump deliberately.
pub const MAX_COMPAT_MANIFEST_VERSION: &str = "1.0.0";

/// Check a declared manifest version against [`MAX_COMPAT_MANIFEST_VERSION`].
pub fn check_version(version: &str) -> Result<(), ManifestError> {
    check_version_against(version, MAX_COMPAT_MANIFEST_VERSION)
}

pub(crate) fn check_version_against(version: &str, max: &str) -> Result<(), ManifestError> {
    if version.is_empty() {
        return Err(ManifestError::MissingVersion);
    }

    let declared = parse(version)?;
    let ceiling = parse(max)?;

    if precedence_key(&declared) > precedence_key(&ceiling) {
        return Err(ManifestError::IncompatibleVersion {
            version: version.to_string(),
            max: max.to_string(),
        });
    }

    tracing::debug!(version, max, "manifest version is compatible");
    Ok(())
}

fn parse(version: &str) -> Result<Version, ManifestError> {
    Version::parse(version).map_err(|source| ManifestError::MalformedVersion {
        version: version.to_string(),
        source,
    })
}

/// Build metadata carries no precedence.
fn precedence_key(v: &Version) -> Version {
    Version {
        build: BuildMetadata::EMPTY,
        ..v.clone()
    }
}

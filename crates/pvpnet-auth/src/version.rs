//! Client-version discovery.
//!
//! The remote API rejects requests whose `X-Riot-ClientVersion` header
//! doesn't match the live client build, so the version string is fetched
//! from a public version-info service at activation time and formatted
//! as `{branch}-shipping-{buildVersion}-{versionComponent}`, where the
//! version component is the 4th dot-delimited segment of the full
//! semantic version. The index matters: picking the wrong segment still
//! produces a well-formed string, just one the API silently rejects.

use std::fmt;

use serde::Deserialize;

use crate::AuthError;

const VERSION_URL: &str = "https://valorant-api.com/v1/version";

#[derive(Debug, Deserialize)]
struct VersionEnvelope {
    data: VersionInfo,
}

/// The fields of the version service's `data` object this client needs.
#[derive(Debug, Deserialize)]
struct VersionInfo {
    branch: String,
    #[serde(rename = "buildVersion")]
    build_version: BuildVersion,
    version: String,
}

/// The version service has served `buildVersion` as both a JSON string
/// and a bare number; accept either.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BuildVersion {
    Text(String),
    Number(u64),
}

impl fmt::Display for BuildVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Fetches the live client version and formats the
/// `X-Riot-ClientVersion` header value.
///
/// Fetch this once per process and reuse it: the build cannot change
/// while the game client is running.
pub async fn current_version(http: &reqwest::Client) -> Result<String, AuthError> {
    let envelope: VersionEnvelope = http
        .get(VERSION_URL)
        .send()
        .await
        .map_err(|e| AuthError::transport(e, false))?
        .json()
        .await
        .map_err(|e| AuthError::Protocol(format!("version endpoint: {e}")))?;
    format_version(&envelope.data)
}

/// Formats `{branch}-shipping-{buildVersion}-{versionComponent}`.
fn format_version(data: &VersionInfo) -> Result<String, AuthError> {
    let component = version_component(&data.version)?;
    Ok(format!(
        "{}-shipping-{}-{component}",
        data.branch, data.build_version
    ))
}

/// The 4th dot-delimited segment of the full version string.
fn version_component(full: &str) -> Result<&str, AuthError> {
    full.split('.')
        .nth(3)
        .ok_or_else(|| AuthError::Protocol(format!("version {full:?} has fewer than 4 segments")))
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn info(json: &str) -> VersionInfo {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_format_version_composes_branch_build_and_component() {
        let data = info(
            r#"{"branch": "release-07.00", "buildVersion": "71", "version": "07.00.00.1059966"}"#,
        );
        assert_eq!(
            format_version(&data).unwrap(),
            "release-07.00-shipping-71-1059966"
        );
    }

    #[test]
    fn test_format_version_accepts_numeric_build_version() {
        let data = info(
            r#"{"branch": "release-07.00", "buildVersion": 71, "version": "07.00.00.1059966"}"#,
        );
        assert_eq!(
            format_version(&data).unwrap(),
            "release-07.00-shipping-71-1059966"
        );
    }

    #[test]
    fn test_version_component_is_the_fourth_dot_segment() {
        // Index 3, not "the last segment": a longer version string must
        // still yield the 4th segment.
        assert_eq!(version_component("a.b.c.d.e").unwrap(), "d");
    }

    #[test]
    fn test_format_version_short_version_string_is_protocol_error() {
        let data =
            info(r#"{"branch": "release-07.00", "buildVersion": "71", "version": "07.00.00"}"#);
        assert!(matches!(format_version(&data), Err(AuthError::Protocol(_))));
    }

    #[test]
    fn test_version_info_rejects_missing_branch() {
        let result = serde_json::from_str::<VersionInfo>(
            r#"{"buildVersion": "71", "version": "07.00.00.1059966"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_version_envelope_reads_nested_data_object() {
        let envelope: VersionEnvelope = serde_json::from_str(
            r#"{"status": 200, "data": {"branch": "release-07.00", "buildVersion": "71", "version": "07.00.00.1059966", "manifestId": "X"}}"#,
        )
        .unwrap();
        assert_eq!(envelope.data.branch, "release-07.00");
    }
}

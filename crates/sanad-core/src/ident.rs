//! Device identifier validation
//!
//! Device QR codes and manual entry both yield a candidate string that must
//! match the canonical identifier shape (36-character hyphenated hex,
//! case-insensitive) before it may be submitted to the backend.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A candidate string did not match the canonical identifier shape.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a valid device identifier: {0:?}")]
pub struct InvalidDeviceUuid(pub String);

/// A validated device identifier in canonical 8-4-4-4-12 form.
///
/// Stored lowercased; parsing is strict about the hyphenated shape and does
/// not accept braced, URN, or 32-character compact forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceUuid(String);

impl DeviceUuid {
    /// Validate a candidate string against the canonical shape.
    ///
    /// Pure: never touches the network or filesystem.
    pub fn parse(candidate: &str) -> Result<Self, InvalidDeviceUuid> {
        if !has_canonical_shape(candidate) {
            return Err(InvalidDeviceUuid(candidate.to_string()));
        }
        // Shape already checked; Uuid::parse_str re-validates the digits
        Uuid::parse_str(candidate)
            .map(|u| Self(u.to_string()))
            .map_err(|_| InvalidDeviceUuid(candidate.to_string()))
    }

    /// The lowercased canonical form
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DeviceUuid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for DeviceUuid {
    type Err = InvalidDeviceUuid;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Check for the exact 36-character hyphenated hex layout.
fn has_canonical_shape(s: &str) -> bool {
    if s.len() != 36 {
        return false;
    }
    s.bytes().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_shape() {
        for s in [
            "11111111-1111-4111-8111-111111111111",
            "a3bb189e-8bf9-3888-9912-ace4e6543002",
            "A3BB189E-8BF9-3888-9912-ACE4E6543002",
            "00000000-0000-0000-0000-000000000000",
        ] {
            assert!(DeviceUuid::parse(s).is_ok(), "should accept {s}");
        }
    }

    #[test]
    fn test_rejects_malformed() {
        for s in [
            "",
            "not-a-uuid",
            "11111111-1111-4111-8111-11111111111",   // 35 chars
            "11111111-1111-4111-8111-1111111111111", // 37 chars
            "11111111111141118111111111111111",      // compact form
            "{11111111-1111-4111-8111-111111111111}",
            "11111111-1111-4111-8111_111111111111",
            "gggggggg-1111-4111-8111-111111111111",
            "urn:uuid:11111111-1111-4111-8111-111111111111",
        ] {
            assert!(DeviceUuid::parse(s).is_err(), "should reject {s:?}");
        }
    }

    #[test]
    fn test_lowercases() {
        let id = DeviceUuid::parse("A3BB189E-8BF9-3888-9912-ACE4E6543002").unwrap();
        assert_eq!(id.as_str(), "a3bb189e-8bf9-3888-9912-ace4e6543002");
    }
}

//! Content fingerprinting
//!
//! A fingerprint is the lowercase hex SHA-256 digest of the exact payload
//! bytes. It is deterministic and unsalted, so the same bytes produce the
//! same fingerprint across calls and across process restarts. The upload
//! gateway uses it as the deduplication key and as part of the cache key.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use sha2::{Digest, Sha256};

/// Deterministic 256-bit content digest, hex-encoded lowercase.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ContentFingerprint(String);

impl ContentFingerprint {
    /// Compute the fingerprint of a byte sequence.
    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentFingerprint(hex::encode(hasher.finalize()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ContentFingerprint {
    type Err = anyhow::Error;

    /// Parse a caller-supplied fingerprint. Uppercase hex is normalized to
    /// lowercase; anything that is not 64 hex characters is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if normalized.len() != 64 || !normalized.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!(
                "Invalid content fingerprint: expected 64 hex characters, got {:?}",
                s
            ));
        }
        Ok(ContentFingerprint(normalized))
    }
}

impl Display for ContentFingerprint {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_matches_known_vectors() {
        // NIST test vector for "abc" and the empty-input digest.
        assert_eq!(
            ContentFingerprint::digest(b"abc").as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(
            ContentFingerprint::digest(b"").as_str(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn digest_is_deterministic() {
        let data = b"the same bytes";
        assert_eq!(
            ContentFingerprint::digest(data),
            ContentFingerprint::digest(data)
        );
    }

    #[test]
    fn different_bytes_differ() {
        assert_ne!(
            ContentFingerprint::digest(b"payload one"),
            ContentFingerprint::digest(b"payload two")
        );
    }

    #[test]
    fn parse_normalizes_and_validates() {
        let hex64 = "BA7816BF8F01CFEA414140DE5DAE2223B00361A396177A9CB410FF61F20015AD";
        let parsed: ContentFingerprint = hex64.parse().unwrap();
        assert_eq!(
            parsed.as_str(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );

        assert!("too-short".parse::<ContentFingerprint>().is_err());
        assert!("zz7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
            .parse::<ContentFingerprint>()
            .is_err());
    }
}

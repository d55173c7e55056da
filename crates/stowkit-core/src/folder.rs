//! Folder classification
//!
//! Uploaded files are sorted into one of four folders derived purely from the
//! declared MIME type. Classification is total: any string, including empty
//! or malformed ones, maps to exactly one folder.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Folder a payload is classified into, by MIME type family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaFolder {
    Images,
    Videos,
    Audio,
    Documents,
}

impl MediaFolder {
    /// Classify a declared content type by its MIME prefix.
    ///
    /// Matching is case-insensitive and ignores MIME parameters
    /// (`image/png; charset=binary` classifies as `Images`). Anything that is
    /// not `image/*`, `video/*` or `audio/*` falls back to `Documents`.
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_lowercase();

        if essence.starts_with("image/") {
            MediaFolder::Images
        } else if essence.starts_with("video/") {
            MediaFolder::Videos
        } else if essence.starts_with("audio/") {
            MediaFolder::Audio
        } else {
            MediaFolder::Documents
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaFolder::Images => "images",
            MediaFolder::Videos => "videos",
            MediaFolder::Audio => "audio",
            MediaFolder::Documents => "documents",
        }
    }
}

impl FromStr for MediaFolder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "images" => Ok(MediaFolder::Images),
            "videos" => Ok(MediaFolder::Videos),
            "audio" => Ok(MediaFolder::Audio),
            "documents" => Ok(MediaFolder::Documents),
            _ => Err(anyhow::anyhow!("Invalid media folder: {}", s)),
        }
    }
}

impl Display for MediaFolder {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

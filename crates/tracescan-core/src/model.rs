//! Presence analysis domain model.
//!
//! Everything here lives for a single request/response cycle: an image goes
//! in, an [`AnalysisResult`] comes out, and nothing is kept afterwards.

use std::fmt;
use std::path::Path;

use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// MIME type assumed when nothing better is known. Camera snapshots are JPEG.
pub const DEFAULT_MIME_TYPE: &str = "image/jpeg";

/// Raw image bytes plus their MIME type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

impl ImageInput {
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Decode base64 image data.
    ///
    /// Accepts either a bare base64 payload or a `data:<mime>;base64,<payload>`
    /// URL as produced by a browser file reader. Only the payload is used; the
    /// MIME type is always the one given.
    pub fn from_base64(data: &str, mime_type: impl Into<String>) -> Result<Self, InputError> {
        let payload = match data.split_once(',') {
            Some((header, rest)) if header.starts_with("data:") => rest,
            _ => data,
        };
        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        Ok(Self::new(bytes, mime_type))
    }

    /// Read an image from disk, taking the MIME type from `mime_override` or
    /// the file extension.
    pub fn from_path(path: &Path, mime_override: Option<&str>) -> Result<Self, InputError> {
        let bytes = std::fs::read(path).map_err(|source| InputError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let mime_type = match mime_override {
            Some(m) => m.to_string(),
            None => detect_mime_type_from_path(path).to_string(),
        };
        Ok(Self::new(bytes, mime_type))
    }

    /// Standard base64 encoding of the bytes, as sent on the wire.
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Detect an image MIME type from a file extension.
pub fn detect_mime_type_from_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "bmp" => "image/bmp",
        _ => DEFAULT_MIME_TYPE,
    }
}

/// One retained citation whose URL points at a social-media domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub title: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl MatchRecord {
    pub fn platform(&self) -> Platform {
        Platform::from_url(&self.url)
    }
}

/// Social platform a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
    X,
    LinkedIn,
    TikTok,
    Reddit,
    Pinterest,
    Snapchat,
    Threads,
    Other,
}

impl Platform {
    /// Classify a URL by case-insensitive substring.
    ///
    /// Checks run in a fixed order. A URL containing several domains, such as
    /// an archive link wrapping a social URL, gets the first platform checked.
    pub fn from_url(url: &str) -> Self {
        let lower = url.to_lowercase();
        let has = |needle: &str| lower.contains(needle);

        if has("facebook.com") || has("fb.com") {
            Platform::Facebook
        } else if has("instagram.com") || has("instagr.am") {
            Platform::Instagram
        } else if has("linkedin.com") {
            Platform::LinkedIn
        } else if has("twitter.com") || has("x.com") {
            Platform::X
        } else if has("tiktok.com") {
            Platform::TikTok
        } else if has("reddit.com") {
            Platform::Reddit
        } else if has("pinterest.com") {
            Platform::Pinterest
        } else if has("snapchat.com") {
            Platform::Snapchat
        } else if has("threads.net") {
            Platform::Threads
        } else {
            Platform::Other
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::X => "X / Twitter",
            Platform::LinkedIn => "LinkedIn",
            Platform::TikTok => "TikTok",
            Platform::Reddit => "Reddit",
            Platform::Pinterest => "Pinterest",
            Platform::Snapchat => "Snapchat",
            Platform::Threads => "Threads",
            Platform::Other => "Other",
        }
    }

    /// Parse a user-supplied platform name (`x`, `twitter`, `ig`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "facebook" | "fb" => Some(Platform::Facebook),
            "instagram" | "ig" => Some(Platform::Instagram),
            "x" | "twitter" => Some(Platform::X),
            "linkedin" => Some(Platform::LinkedIn),
            "tiktok" => Some(Platform::TikTok),
            "reddit" => Some(Platform::Reddit),
            "pinterest" => Some(Platform::Pinterest),
            "snapchat" => Some(Platform::Snapchat),
            "threads" => Some(Platform::Threads),
            "other" => Some(Platform::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Narrative report plus the social-media matches, in upstream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub description: String,
    pub matches: Vec<MatchRecord>,
}

impl AnalysisResult {
    /// Distinct platforms among the matches, in first-seen order.
    pub fn platforms(&self) -> Vec<Platform> {
        let mut seen = Vec::new();
        for m in &self.matches {
            let p = m.platform();
            if !seen.contains(&p) {
                seen.push(p);
            }
        }
        seen
    }

    /// Matches on one platform, keeping their relative order.
    pub fn matches_for(&self, platform: Platform) -> Vec<&MatchRecord> {
        self.matches
            .iter()
            .filter(|m| m.platform() == platform)
            .collect()
    }
}

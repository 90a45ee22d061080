/// Identifier and small value types for segments
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of an embeddable video identifier
pub const VIDEO_ID_LEN: usize = 11;

/// Video identifier understood by the embedded player
///
/// Always exactly 11 characters of `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Validate and wrap a bare identifier
    pub fn parse(id: &str) -> Option<Self> {
        is_video_id(id).then(|| Self(id.to_string()))
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_video_id(&value) {
            Ok(Self(value))
        } else {
            Err(format!("invalid video id: {value:?}"))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl AsRef<str> for VideoId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN && s.chars().all(is_id_char)
}

/// URL prefixes that are followed directly by a video id
const ID_MARKERS: [&str; 5] = [
    "youtu.be/",
    "youtube.com/watch?v=",
    "youtube.com/embed/",
    "youtube.com/v/",
    "youtube.com/shorts/",
];

/// Extract a video id from a share URL or a bare id
///
/// Returns `None` when the input is neither.
pub fn extract_video_id(input: &str) -> Option<VideoId> {
    let input = input.trim();

    for marker in ID_MARKERS {
        if let Some(pos) = input.find(marker) {
            let rest = &input[pos + marker.len()..];
            let candidate: String = rest.chars().take(VIDEO_ID_LEN).collect();
            if let Some(id) = VideoId::parse(&candidate) {
                return Some(id);
            }
        }
    }

    VideoId::parse(input)
}

/// Segment rating, 1 to 6 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 6;

    /// Create a rating, clamping into 1..=6
    pub fn new(stars: u8) -> Self {
        Self(stars.clamp(Self::MIN, Self::MAX))
    }

    /// Number of stars
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl From<u8> for Rating {
    fn from(value: u8) -> Self {
        Self::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

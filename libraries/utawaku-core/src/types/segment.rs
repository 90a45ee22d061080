/// Segment domain types
use crate::error::ValidationError;
use crate::time::parse_time;
use crate::types::ids::{extract_video_id, Rating, VideoId};
use serde::{Deserialize, Serialize};

/// One playable clip: a video plus a trimmed time range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Embedded player video identifier
    pub video_id: VideoId,

    /// Display title
    pub title: String,

    /// Trim start in whole seconds
    #[serde(rename = "start")]
    pub start_sec: u32,

    /// Trim end in whole seconds; `end_sec <= start_sec` plays to the natural end
    #[serde(rename = "end")]
    pub end_sec: u32,

    /// 1 to 6 stars
    #[serde(default)]
    pub rating: Rating,

    /// Free text annotation
    #[serde(default)]
    pub article: String,
}

impl Segment {
    /// Create a segment with default rating and no annotation
    pub fn new(video_id: VideoId, title: impl Into<String>, start_sec: u32, end_sec: u32) -> Self {
        Self {
            video_id,
            title: title.into(),
            start_sec,
            end_sec,
            rating: Rating::default(),
            article: String::new(),
        }
    }

    /// Set the rating
    pub fn with_rating(mut self, rating: impl Into<Rating>) -> Self {
        self.rating = rating.into();
        self
    }

    /// Set the annotation
    pub fn with_article(mut self, article: impl Into<String>) -> Self {
        self.article = article.into();
        self
    }

    /// Whether the segment stops at an explicit end time
    pub fn is_trimmed(&self) -> bool {
        self.end_sec > self.start_sec
    }

    /// Second at which playback should stop, if any
    pub fn end_boundary(&self) -> Option<u32> {
        self.is_trimmed().then_some(self.end_sec)
    }
}

/// Raw segment entry as typed into the editor form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentDraft {
    /// Share URL or bare video id
    pub video: String,
    pub title: String,
    /// Start time string (`h:mm:ss`, `m:ss` or seconds)
    pub start: String,
    /// End time string (`h:mm:ss`, `m:ss` or seconds)
    pub end: String,
    pub rating: u8,
    pub article: String,
}

impl SegmentDraft {
    /// Validate the form and build a segment
    ///
    /// `end == start` is accepted and means "no trim".
    pub fn validate(&self) -> Result<Segment, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::MissingTitle);
        }

        let video_id = extract_video_id(&self.video)
            .ok_or_else(|| ValidationError::InvalidVideoId(self.video.trim().to_string()))?;

        let start = parse_time(&self.start).map_err(|_| ValidationError::InvalidTime {
            field: "start",
            input: self.start.clone(),
        })?;
        let end = parse_time(&self.end).map_err(|_| ValidationError::InvalidTime {
            field: "end",
            input: self.end.clone(),
        })?;

        if end < start {
            return Err(ValidationError::EndBeforeStart { start, end });
        }

        Ok(Segment {
            video_id,
            title: title.to_string(),
            start_sec: start,
            end_sec: end,
            rating: Rating::new(self.rating),
            article: self.article.trim().to_string(),
        })
    }
}
